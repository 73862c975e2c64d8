use speechlens::infrastructure::observability::TracingConfig;
use speechlens::presentation::config::{Environment, LoggingSettings};

#[test]
fn given_warn_level_when_building_config_then_crate_targets_log_at_warn() {
    let logging = LoggingSettings {
        level: "warn".to_string(),
        json: true,
    };

    let config = TracingConfig::new(Environment::Prod, &logging);

    assert_eq!(config.environment, "prod");
    assert!(config.json_format);
    assert_eq!(config.default_filter, "warn,speechlens=warn,tower_http=warn");
    assert!(!config.default_filter.contains("debug"));
}

#[test]
fn given_default_logging_settings_when_building_config_then_uses_plain_text_at_info() {
    let config = TracingConfig::new(Environment::Local, &LoggingSettings::default());

    assert_eq!(config.environment, "local");
    assert!(!config.json_format);
    assert_eq!(config.default_filter, "info,speechlens=info,tower_http=info");
}
