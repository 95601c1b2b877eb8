use std::time::{SystemTime, UNIX_EPOCH};

use bankdash_core::config::{self, Config, ConfigError};

fn unique_dir(label: &str) -> std::path::PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir()
        .join("bankdash")
        .join(format!("{label}-{unique}"))
}

#[test]
fn rejects_page_size_out_of_range() {
    let cfg = Config {
        page_size: 0,
        ..Default::default()
    };
    assert!(config::validate(&cfg).is_err());

    let cfg = Config {
        page_size: 101,
        ..Default::default()
    };
    assert!(config::validate(&cfg).is_err());
}

#[test]
fn rejects_preview_limit_out_of_range() {
    let cfg = Config {
        preview_limit: 0,
        ..Default::default()
    };
    assert!(config::validate(&cfg).is_err());
}

#[test]
fn accepts_default_config() {
    let cfg = Config::default();
    assert_eq!(cfg.page_size, 5);
    assert_eq!(cfg.preview_limit, 3);
    assert!(cfg.data_path.to_string_lossy().contains("bankdash"));
    assert!(cfg.config_path.to_string_lossy().contains("bankdash"));
    assert!(config::validate(&cfg).is_ok());
}

#[test]
fn missing_config_file_yields_defaults() {
    let path = unique_dir("missing-config").join("config.toml");
    let cfg = config::load(Some(&path)).unwrap();
    assert_eq!(cfg.page_size, 5);
    assert_eq!(cfg.config_path, path);
}

#[test]
fn saves_and_reloads_config() {
    let dir = unique_dir("roundtrip-config");
    let cfg = Config {
        page_size: 10,
        preview_limit: 5,
        config_path: dir.join("config.toml"),
        data_path: dir.join("data.json5"),
        ..Default::default()
    };

    config::save(&cfg).unwrap();
    let loaded = config::load(Some(&cfg.config_path)).unwrap();

    assert_eq!(loaded, cfg);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = unique_dir("partial-config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "page_size = 8\n").unwrap();

    let cfg = config::load(Some(&path)).unwrap();

    assert_eq!(cfg.page_size, 8);
    assert_eq!(cfg.preview_limit, 3);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn invalid_values_in_file_are_rejected() {
    let dir = unique_dir("invalid-config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");

    std::fs::write(&path, "page_size = 0\n").unwrap();
    assert!(matches!(config::load(Some(&path)), Err(ConfigError::Invalid(_))));

    std::fs::write(&path, "page_size = \"five\"\n").unwrap();
    assert!(matches!(config::load(Some(&path)), Err(ConfigError::Parse(_))));

    std::fs::remove_dir_all(&dir).unwrap();
}
