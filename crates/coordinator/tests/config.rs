use coordinator::CoordinatorError;
use coordinator::config::{CoordinatorConfig, EventsConfig, LoggingConfig, load_config};
use serde_json::json;
use std::fs;
use tempfile::tempdir;

#[test]
fn config_defaults_are_sane() {
    let logging = LoggingConfig::default();
    assert_eq!(logging.name, "coordinator");
    assert_eq!(logging.level, "info");
    assert!(logging.console);
    assert!(!logging.json);
    assert!(logging.directory.is_none());
    assert_eq!(logging.max_files, 10);

    assert_eq!(EventsConfig::default().development_events, cfg!(debug_assertions));
}

#[test]
fn config_deserializes_partial_documents() {
    let raw = json!({
        "logging": { "level": "debug", "json": true },
        "events": { "development_events": false }
    });

    let cfg: CoordinatorConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
    assert_eq!(cfg.logging.name, "coordinator", "missing fields fall back to defaults");
    assert!(!cfg.events.development_events);
}

#[test]
fn load_config_reads_toml_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("coordinator.toml");
    fs::write(
        &path,
        r#"
[logging]
name = "shell"
level = "warn"
env_filter = "coord_event_bus=trace"
max_files = 3

[events]
development_events = true
"#,
    )?;

    let cfg: CoordinatorConfig = load_config(Some(&path))?;
    assert_eq!(cfg.logging.name, "shell");
    assert_eq!(cfg.logging.level, "warn");
    assert_eq!(cfg.logging.env_filter.as_deref(), Some("coord_event_bus=trace"));
    assert_eq!(cfg.logging.max_files, 3);
    assert!(cfg.events.development_events);
    Ok(())
}

#[test]
fn load_config_missing_file_is_config_error() {
    let dir = tempdir().expect("temp dir");
    let err = load_config::<CoordinatorConfig>(Some(dir.path().join("absent.toml"))).unwrap_err();

    assert!(matches!(err, CoordinatorError::Config { .. }));
    assert!(err.to_string().contains("Failed to build config"));
}

#[test]
fn load_config_rejects_wrong_types() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[logging]\nmax_files = \"many\"\n").expect("write config");

    let err = load_config::<CoordinatorConfig>(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("Failed to deserialize config"));
}
