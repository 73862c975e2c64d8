mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    ASSESSMENT_API_KEY_VAR, AnalysisSettings, AssessmentSettings, LoggingSettings,
    PhonemeSettings, ServerSettings, Settings, SettingsError, TranscriptionProvider,
    TranscriptionSettings,
};
