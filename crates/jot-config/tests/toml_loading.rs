//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use jot_config::JotConfig;
use pretty_assertions::assert_eq;

#[test]
fn loads_store_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[store]
data_dir = "/var/lib/jot"
create_dirs = false
"#,
        )?;

        let config: JotConfig = Figment::from(Serialized::defaults(JotConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.store.data_dir.to_str(), Some("/var/lib/jot"));
        assert!(!config.store.create_dirs);
        Ok(())
    });
}

#[test]
fn loads_general_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
default_limit = 25
default_import_prefix = "LEGACY"
default_import_type = "work"
"#,
        )?;

        let config: JotConfig = Figment::from(Serialized::defaults(JotConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.default_limit, 25);
        assert_eq!(config.general.max_limit, 200);
        assert_eq!(config.general.default_import_prefix, "LEGACY");
        let defaults = config.general.request_defaults().expect("valid");
        assert_eq!(defaults.import_type.as_str(), "work");
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".jot")?;
        jail.create_file(
            ".jot/config.toml",
            r#"
[general]
history_limit = 3
"#,
        )?;

        let config = JotConfig::load().expect("config loads");
        assert_eq!(config.general.history_limit, 3);
        Ok(())
    });
}

#[test]
fn invalid_file_values_fail_validation() {
    Jail::expect_with(|jail| {
        jail.create_dir(".jot")?;
        jail.create_file(
            ".jot/config.toml",
            r#"
[general]
default_limit = 500
"#,
        )?;

        let err = JotConfig::load().unwrap_err();
        assert!(err.to_string().contains("general.default_limit"));
        Ok(())
    });
}
