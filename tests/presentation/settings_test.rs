use std::path::PathBuf;

use speechlens::presentation::config::{
    ASSESSMENT_API_KEY_VAR, Environment, Settings, SettingsError, TranscriptionProvider,
};

#[test]
fn given_no_credential_when_building_settings_then_fails_fast() {
    let result = Settings::build(Environment::Test, None);

    assert!(matches!(
        result,
        Err(SettingsError::MissingCredential(var)) if var == ASSESSMENT_API_KEY_VAR
    ));
}

#[test]
fn given_blank_credential_when_building_settings_then_fails_fast() {
    let result = Settings::build(Environment::Test, Some("   ".to_string()));

    assert!(matches!(result, Err(SettingsError::MissingCredential(_))));
}

#[test]
fn given_credential_when_building_settings_then_defaults_are_applied() {
    let settings = Settings::build(Environment::Test, Some(" sk-live ".to_string())).unwrap();

    assert_eq!(settings.assessment.api_key, "sk-live");
    assert_eq!(settings.assessment.model, "gpt-4o-mini");
    assert_eq!(settings.assessment.base_url, "https://api.openai.com/v1");
    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.transcription.provider, TranscriptionProvider::Local);
    assert_eq!(settings.transcription.model, None);
    assert_eq!(
        settings.phonemes.dictionary_path,
        PathBuf::from("data/cmudict.dict")
    );
    assert!(settings.analysis.default_topic.is_none());
    assert_eq!(settings.logging.level, "info");
}

#[test]
fn given_assessment_settings_when_debug_printed_then_key_is_redacted() {
    let settings = Settings::build(Environment::Test, Some("sk-very-secret".to_string())).unwrap();

    let printed = format!("{:?}", settings.assessment);

    assert!(!printed.contains("sk-very-secret"));
    assert!(printed.contains("[REDACTED]"));
}

#[test]
fn given_upload_limit_in_megabytes_when_converting_then_returns_bytes() {
    let settings = Settings::default();

    assert_eq!(settings.analysis.max_upload_bytes(), 25 * 1024 * 1024);
}

#[test]
fn given_missing_credential_error_when_displayed_then_names_the_variable() {
    let error = SettingsError::MissingCredential(ASSESSMENT_API_KEY_VAR);

    assert!(error.to_string().contains("ASSESSMENT_SERVICE_API_KEY"));
}
