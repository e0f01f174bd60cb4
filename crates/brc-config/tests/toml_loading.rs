//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed cwd and env var manipulation.

use brc_config::{BrcConfig, ConfigError};
use figment::Jail;
use pretty_assertions::assert_eq;
use std::path::Path;

#[test]
fn loads_project_local_config() {
    Jail::expect_with(|jail| {
        jail.create_dir(".brc")?;
        jail.create_file(
            ".brc/config.toml",
            r#"
[season]
start = "2019-08-15"
end = "2019-10-15"

[focus]
hb_start = "2019-08-28 00:00:00"
hb_end = "2019-09-08 23:59:59"

[checks]
age_window_minutes = 15
"#,
        )?;

        let config = BrcConfig::load().expect("config loads");
        assert!(config.season.is_configured());
        assert_eq!(config.focus.station, "2. Shuamta");
        assert_eq!(config.checks.age_window_minutes, 15);
        assert_eq!(config.checks.doublecount_window_minutes, 10);
        let window = config.focus.window().unwrap().expect("focus configured");
        assert_eq!(window.end().to_string(), "2019-09-08 23:59:59");
        Ok(())
    });
}

#[test]
fn explicit_file_overrides_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".brc")?;
        jail.create_file(".brc/config.toml", "[checks]\nage_window_minutes = 15\n")?;
        jail.create_file("override.toml", "[checks]\nage_window_minutes = 5\n")?;

        let config = BrcConfig::load_from(Some(Path::new("override.toml"))).expect("config loads");
        assert_eq!(config.checks.age_window_minutes, 5);
        Ok(())
    });
}

#[test]
fn station_names_merge_with_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("stations.toml", "[stations.names]\n2001 = \"3. Test post\"\n")?;

        let config = BrcConfig::load_from(Some(Path::new("stations.toml"))).expect("config loads");
        assert_eq!(config.stations.resolve("2001"), "3. Test post");
        assert_eq!(config.stations.resolve("1047"), "1. Sakhalvasho");
        Ok(())
    });
}

#[test]
fn inverted_focus_period_fails_to_load() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "bad.toml",
            "[focus]\nhb_start = \"2019-09-08\"\nhb_end = \"2019-08-28\"\n",
        )?;

        let result = BrcConfig::load_from(Some(Path::new("bad.toml")));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        Ok(())
    });
}
