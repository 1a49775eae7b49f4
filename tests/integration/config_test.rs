//! Integration tests for configuration loading

use super::helpers::temp_config;
use castplay::Config;

#[test]
fn config_file_overrides_defaults() {
    let (_dir, path) = temp_config(
        r#"
[playback]
progress_interval_ms = 250
autoplay = false

[logging]
level = "debug"
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.playback.progress_interval_ms, 250);
    assert!(!config.playback.autoplay);
    assert_eq!(config.playback.seek_step_secs, 5.0);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn empty_config_file_is_default() {
    let (_dir, path) = temp_config("");
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn config_path_is_under_castplay_dir() {
    if let Ok(path) = Config::config_path() {
        assert!(path.ends_with("castplay/config.toml"));
    }
}
