use std::path::PathBuf;

use config::{Config, File};
use serde::Deserialize;

use super::Environment;

/// The only credential the service cannot start without.
pub const ASSESSMENT_API_KEY_VAR: &str = "ASSESSMENT_SERVICE_API_KEY";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub assessment: AssessmentSettings,
    pub transcription: TranscriptionSettings,
    pub phonemes: PhonemeSettings,
    pub analysis: AnalysisSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AssessmentSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for AssessmentSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            timeout_secs: 120,
        }
    }
}

impl std::fmt::Debug for AssessmentSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessmentSettings")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProvider {
    #[default]
    Local,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProvider,
    /// Unset means the provider's own default model.
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            provider: TranscriptionProvider::Local,
            model: None,
            api_key: None,
            base_url: None,
            timeout_secs: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PhonemeSettings {
    pub dictionary_path: PathBuf,
}

impl Default for PhonemeSettings {
    fn default() -> Self {
        Self {
            dictionary_path: PathBuf::from("data/cmudict.dict"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Topic offered to speakers using the recording flow.
    pub default_topic: Option<String>,
    pub max_upload_mb: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            default_topic: None,
            max_upload_mb: 25,
        }
    }
}

impl AnalysisSettings {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Loads settings for `environment` from the process environment.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        Self::build(environment, std::env::var(ASSESSMENT_API_KEY_VAR).ok())
    }

    /// Layers `appsettings.<env>` (optional), `APP_*` variables (`__` nests,
    /// e.g. `APP_SERVER__PORT`), then the assessment credential.
    pub fn build(
        environment: Environment,
        assessment_api_key: Option<String>,
    ) -> Result<Self, SettingsError> {
        let api_key = assessment_api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(SettingsError::MissingCredential(ASSESSMENT_API_KEY_VAR))?;

        let configuration = Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("assessment.api_key", api_key)?
            .build()?;

        Ok(configuration.try_deserialize()?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("{0} is not set; the assessment service cannot be reached without it")]
    MissingCredential(&'static str),
    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),
}
