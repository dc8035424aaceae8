//! Configuration specs
//!
//! Verify that a TOML config file selects the log destination.

use crate::prelude::*;

#[test]
fn config_file_selects_log_path() {
    let scene = Scene::new();
    let log_path = scene.path("var.log");
    let config_path = scene.path("eventbus.toml");
    std::fs::write(
        &config_path,
        format!("log_path = {:?}\n", log_path.display().to_string()),
    )
    .unwrap();

    let config = DispatcherConfig::load(&config_path).unwrap();
    let dispatcher = Dispatcher::from_config(&config);
    dispatcher.add_listener("e", logged(FakeListener::returning(json!("ok")).handler()));
    dispatcher.trigger("e", &json!({}));

    assert_eq!(dispatcher.log_path(), log_path);
    assert!(std::fs::read_to_string(&log_path)
        .unwrap()
        .contains(r#""result":"ok""#));
}

#[test]
fn empty_config_defaults_to_event_log() {
    let config = DispatcherConfig::from_toml_str("").unwrap();
    assert_eq!(config, DispatcherConfig::default());
    assert_eq!(config.log_path, std::path::Path::new("event.log"));
}

#[test]
fn missing_config_file_is_an_error() {
    let scene = Scene::new();
    assert!(DispatcherConfig::load(&scene.path("absent.toml")).is_err());
}
