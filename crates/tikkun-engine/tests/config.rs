use tikkun_engine::{EngineConfig, EngineError};
use tikkun_match::PrefixMode;

#[test]
fn empty_object_gets_defaults() {
    let config = EngineConfig::from_json("{}").unwrap();
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.session_window_secs, 300);
    assert_eq!(config.match_options.prefix_mode, PrefixMode::Restrictive);
}

#[test]
fn v0_minutes_become_seconds() {
    let config = EngineConfig::from_json(r#"{"session_window_minutes": 2}"#).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.session_window_secs, 120);
}

#[test]
fn prefix_mode_is_read() {
    let config = EngineConfig::from_json(
        r#"{"config_version": 1, "match_options": {"prefix_mode": "allow_attached"}}"#,
    )
    .unwrap();
    assert_eq!(config.match_options.prefix_mode, PrefixMode::AllowAttached);
}

#[test]
fn newer_version_is_rejected() {
    let err = EngineConfig::from_json(r#"{"config_version": 7}"#).unwrap_err();
    assert!(matches!(err, EngineError::Config(_)));
}

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");
    let config = EngineConfig {
        session_window_secs: 60,
        ..Default::default()
    };
    config.save(&path).unwrap();
    assert!(!path.with_extension("json.tmp").exists());
    assert_eq!(EngineConfig::load(&path).unwrap(), config);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::load_or_default(&dir.path().join("absent.json")).unwrap();
    assert_eq!(config, EngineConfig::default());
}
