use playtest::registry::VariableRegistry;
use playtest::TelemetryError;

#[test]
fn test_upsert_keeps_single_entry_with_latest_value() {
    let mut registry = VariableRegistry::with_declared_keys(["score"]);

    registry.set("score", "10", false).unwrap();
    registry.set("score", "25", false).unwrap();

    let report = registry.snapshot();
    assert_eq!(report.len(), 1, "duplicate set must overwrite, not append");
    assert_eq!(registry.get("score"), "25");
}

#[test]
fn test_undeclared_key_is_rejected_without_escape_flag() {
    let mut registry = VariableRegistry::with_declared_keys(["score"]);

    let result = registry.set("sneaky", "1", false);
    assert!(matches!(result, Err(TelemetryError::UndeclaredKey(key)) if key == "sneaky"));

    // VERIFY: no partial insert
    let report = registry.snapshot();
    assert_eq!(report.len(), 1);
    assert!(!report.contains_key("sneaky"));
    assert_eq!(registry.get("sneaky"), "");
}

#[test]
fn test_escape_hatch_admits_undeclared_key() {
    let mut registry = VariableRegistry::new();

    registry.set("_Feedback", "fun!", true).unwrap();
    assert_eq!(registry.get("_Feedback"), "fun!");
}

#[test]
fn test_missing_key_reads_as_empty_string() {
    let registry = VariableRegistry::new();
    assert_eq!(registry.get("never_set"), "");
}

#[test]
fn test_declared_keys_start_present_and_ordered() {
    let registry = VariableRegistry::with_declared_keys(["a", "b", "c"]);

    let report = registry.snapshot();
    let keys: Vec<&str> = report.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
    assert!(report.iter().all(|(_, v)| v.is_empty()));
}

#[test]
fn test_overwrite_preserves_insertion_position() {
    let mut registry = VariableRegistry::with_declared_keys(["a", "b"]);
    registry.set("a", "later", false).unwrap();

    let keys: Vec<String> = registry.snapshot().iter().map(|(k, _)| k.to_string()).collect();
    assert_eq!(keys, vec!["a", "b"], "overwriting must not move the key to the back");
}
