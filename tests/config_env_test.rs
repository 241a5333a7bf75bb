//! Environment overrides for Settings.
//!
//! Kept in its own test binary: the variables set here are process-wide.

use std::fs;

use tempfile::TempDir;

use id3tree::application::ApplicationError;
use id3tree::config::Settings;

#[test]
fn given_env_vars_when_load_then_env_overrides_config_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("id3tree.toml");
    fs::write(&path, "target = \"Play\"\ndelimiter = \",\"\n").unwrap();

    std::env::set_var("ID3TREE_TARGET", "Label");
    std::env::set_var("ID3TREE_DELIMITER", ";");
    let settings = Settings::load_from(None, Some(&path)).expect("load settings");
    assert_eq!(settings.target.as_deref(), Some("Label"));
    assert_eq!(settings.delimiter_byte(), b';');

    std::env::set_var("ID3TREE_DELIMITER", ";;");
    let err = Settings::load_from(None, Some(&path)).unwrap_err();
    assert!(matches!(err, ApplicationError::Config { .. }));

    std::env::remove_var("ID3TREE_TARGET");
    std::env::remove_var("ID3TREE_DELIMITER");
}
