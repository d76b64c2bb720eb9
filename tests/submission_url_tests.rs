use playtest::{SheetsClient, TelemetryReport};

const BASE: &str = "https://sheets.example/exec";

#[test]
fn test_empty_report_yields_only_fixed_parameters() {
    let client = SheetsClient::new(BASE);
    let url = client.submit_url("2024-06-15", "0.3P", "abcdef123456", &TelemetryReport::new());

    assert_eq!(
        url,
        format!("{BASE}?action=post&timestamp=2024-06-15&version=0.3P&id=abcdef123456")
    );
}

#[test]
fn test_components_are_percent_encoded() {
    let client = SheetsClient::new(BASE);
    let url = client.submit_url(
        "Monday, June 15, 2024 1:45:30 PM",
        "0.3P",
        "abcdef123456",
        &TelemetryReport::new(),
    );

    assert_eq!(
        url,
        format!(
            "{BASE}?action=post&timestamp=Monday%2C%20June%2015%2C%202024%201%3A45%3A30%20PM\
             &version=0.3P&id=abcdef123456"
        )
    );
}

#[test]
fn test_reserved_characters_in_values_cannot_corrupt_the_query() {
    let client = SheetsClient::new(BASE);
    let mut report = TelemetryReport::new();
    report.insert("_Feedback", "good & bad = mixed bag");

    let url = client.submit_url("t", "v", "i", &report);
    assert!(url.ends_with("&_Feedback=good%20%26%20bad%20%3D%20mixed%20bag"));

    // the query must split into the 4 fixed pairs plus one report pair,
    // each with one raw '='
    let query = url.split_once('?').expect("query string").1;
    let pairs: Vec<&str> = query.split('&').collect();
    assert_eq!(pairs.len(), 5);
    for pair in &pairs {
        assert_eq!(pair.matches('=').count(), 1, "raw '=' leaked into {pair}");
        assert!(!pair.contains(' '), "raw space leaked into {pair}");
    }
}

#[test]
fn test_non_ascii_values_are_escaped() {
    let client = SheetsClient::new(BASE);
    let mut report = TelemetryReport::new();
    report.insert("_Feedback", "très bon");

    let url = client.submit_url("t", "v", "i", &report);
    assert!(url.ends_with("&_Feedback=tr%C3%A8s%20bon"));
    assert!(url.is_ascii());
}

#[test]
fn test_report_entries_follow_insertion_order() {
    let client = SheetsClient::new(BASE);
    let mut report = TelemetryReport::new();
    report.insert("zebra", "1");
    report.insert("apple", "2");
    report.insert("mango", "3");
    report.insert("apple", "4"); // overwrite must not reorder

    let url = client.submit_url("t", "v", "i", &report);
    let query = url.split_once('?').unwrap().1;
    let keys: Vec<&str> = query
        .split('&')
        .skip(4)
        .map(|pair| pair.split_once('=').unwrap().0)
        .collect();
    assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    assert!(url.contains("apple=4"));
}

#[test]
fn test_retrieve_url_shape() {
    let client = SheetsClient::new(BASE);
    let url = client.retrieve_url("abcdef123456", 7);
    assert_eq!(url, format!("{BASE}?action=retrieve&id=abcdef123456&index=7"));
}
