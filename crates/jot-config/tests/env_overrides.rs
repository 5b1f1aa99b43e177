use figment::Jail;
use jot_config::JotConfig;

#[test]
fn env_sets_data_dir() {
    Jail::expect_with(|jail| {
        jail.set_env("JOT_STORE__DATA_DIR", "/tmp/jot-env");
        let config = JotConfig::load().expect("config loads");
        assert_eq!(config.store.data_dir.to_str(), Some("/tmp/jot-env"));
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".jot")?;
        jail.create_file(
            ".jot/config.toml",
            r#"
[general]
default_limit = 10
"#,
        )?;
        jail.set_env("JOT_GENERAL__DEFAULT_LIMIT", "30");

        let config = JotConfig::load().expect("config loads");
        assert_eq!(config.general.default_limit, 30);
        Ok(())
    });
}

#[test]
fn bad_env_type_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("JOT_GENERAL__DEFAULT_LIMIT", "lots");
        let err = JotConfig::load().unwrap_err();
        assert!(matches!(err, jot_config::ConfigError::Figment(_)));
        Ok(())
    });
}

#[test]
fn unknown_import_type_from_env_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("JOT_GENERAL__DEFAULT_IMPORT_TYPE", "hobby");
        let err = JotConfig::load().unwrap_err();
        assert!(matches!(err, jot_config::ConfigError::InvalidValue { .. }));
        Ok(())
    });
}

#[test]
fn explicit_data_dir_beats_env() {
    Jail::expect_with(|jail| {
        jail.set_env("JOT_STORE__DATA_DIR", "/tmp/jot-env");
        let config = JotConfig::load_with_data_dir(Some(std::path::Path::new("/tmp/jot-flag")))
            .expect("config loads");
        assert_eq!(config.store.data_dir.to_str(), Some("/tmp/jot-flag"));
        Ok(())
    });
}
