//! Unit tests for configuration resolution and graceful degradation
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate SPD_CONFIG are marked with #[serial] to ensure they
//! run sequentially, not in parallel.

use spd_common::config::{DashboardConfig, CONFIG_ENV_VAR};
use serial_test::serial;
use std::env;
use std::io::Write;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
#[serial]
fn cli_path_loads_file() {
    env::remove_var(CONFIG_ENV_VAR);
    let file = write_config(
        r#"
        storage_base_url = "https://bucket.example.com/recordings"
        assumed_bitrate_kbps = 64
        "#,
    );

    let config = DashboardConfig::resolve(Some(file.path())).unwrap();
    // Trailing slash is added during normalization
    assert_eq!(config.storage_base_url, "https://bucket.example.com/recordings/");
    assert_eq!(config.assumed_bitrate_kbps, 64);
    // Unspecified fields keep compiled defaults
    assert_eq!(config.audio_extensions, vec![".mp3", ".aac", ".m4a", ".mp4"]);
}

#[test]
#[serial]
fn env_var_loads_file() {
    let file = write_config(r#"listing_url = "http://localhost:9000/files""#);
    env::set_var(CONFIG_ENV_VAR, file.path());

    let config = DashboardConfig::resolve(None).unwrap();
    assert_eq!(config.listing_url, "http://localhost:9000/files");

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn cli_path_wins_over_env_var() {
    let env_file = write_config(r#"assumed_bitrate_kbps = 96"#);
    let cli_file = write_config(r#"assumed_bitrate_kbps = 256"#);
    env::set_var(CONFIG_ENV_VAR, env_file.path());

    let config = DashboardConfig::resolve(Some(cli_file.path())).unwrap();
    assert_eq!(config.assumed_bitrate_kbps, 256);

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn explicitly_named_missing_file_is_an_error() {
    env::remove_var(CONFIG_ENV_VAR);
    let result = DashboardConfig::resolve(Some(std::path::Path::new(
        "/nonexistent/spd-config.toml",
    )));
    assert!(result.is_err());
}

#[test]
fn invalid_toml_is_an_error() {
    let file = write_config("this is not toml = = =");
    let result = DashboardConfig::load_file(file.path());
    assert!(result.is_err());
}

#[test]
fn invalid_values_are_rejected() {
    let file = write_config(r#"audio_extensions = []"#);
    assert!(DashboardConfig::load_file(file.path()).is_err());

    let file = write_config(r#"assumed_bitrate_kbps = 0"#);
    assert!(DashboardConfig::load_file(file.path()).is_err());
}
