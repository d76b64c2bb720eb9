use playtest::config::{PlaytestConfig, DEFAULT_SHEETS_URL};

#[test]
fn test_explicit_config() {
    let config = PlaytestConfig::new("https://sheets.example/exec", "0.3");
    assert_eq!(config.base_url, "https://sheets.example/exec");
    assert_eq!(config.version, "0.3");
    assert!(config.storage_dir.is_none());
}

#[test]
fn test_env_overrides_take_precedence() {
    std::env::set_var("PLAYTEST_SHEETS_URL", "https://override.example/app");
    std::env::set_var("PLAYTEST_VERSION", "9.9");

    let config = PlaytestConfig::from_env();
    assert_eq!(config.base_url, "https://override.example/app");
    assert_eq!(config.version, "9.9");

    std::env::remove_var("PLAYTEST_SHEETS_URL");
    std::env::remove_var("PLAYTEST_VERSION");

    let fallback = PlaytestConfig::from_env();
    assert_eq!(fallback.base_url, DEFAULT_SHEETS_URL);
    assert_eq!(fallback.version, env!("CARGO_PKG_VERSION"));
}
