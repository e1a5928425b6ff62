//! # 配置文件集成测试

use std::fs;

use propanim_host::{AppConfig, ConfigError};
use propanim_runtime::Argb;
use tempfile::tempdir;

#[test]
fn test_missing_file_falls_back_to_default() {
    let dir = tempdir().unwrap();
    let config = AppConfig::load(dir.path().join("missing.json"));
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");

    let mut config = AppConfig::default();
    config.window.title = "Stars".to_string();
    config.star.color = Argb(0xFF00_FF00);
    config.shower.seed = Some(7);
    config.save(&path).unwrap();

    assert_eq!(AppConfig::load(&path), config);
}

#[test]
fn test_broken_file_falls_back_to_default() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        AppConfig::try_load(&path),
        Err(ConfigError::SerializationFailed(_))
    ));
    assert_eq!(AppConfig::load(&path), AppConfig::default());
}

#[test]
fn test_invalid_values_fall_back_to_default() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "star": { "size": 0 } }"#).unwrap();

    assert!(matches!(
        AppConfig::try_load(&path),
        Err(ConfigError::ValidationFailed(_))
    ));
    assert_eq!(AppConfig::load(&path), AppConfig::default());
}
