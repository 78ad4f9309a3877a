use coordinator::bootstrap;
use std::fs;
use tempfile::tempdir;

// Installs the global subscriber, so it is the only test in this binary.
#[test]
fn bootstrap_loads_config_and_installs_logger() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("host.toml");
    fs::write(
        &path,
        r#"
[logging]
name = "bootstrap-test"
level = "debug"

[events]
development_events = false
"#,
    )?;

    let (hub, logger) = bootstrap(Some(&path))?;
    assert_eq!(logger.name(), "bootstrap-test");
    assert!(!logger.writes_files());
    assert!(!hub.events().development_events());

    let _sub = hub.subscribe(|_: &u8| {});
    assert!(!hub.events().publish_dev(|| 1_u8));
    assert!(hub.publish(1_u8));
    Ok(())
}
