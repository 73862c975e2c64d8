use crate::presentation::config::{Environment, LoggingSettings};

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub default_filter: String,
}

impl TracingConfig {
    /// The configured level applies to the crate and HTTP layer as well as the root,
    /// so `RUST_LOG` is the only way to raise a single target.
    pub fn new(environment: Environment, logging: &LoggingSettings) -> Self {
        Self {
            environment: environment.to_string(),
            json_format: logging.json,
            default_filter: format!("{0},speechlens={0},tower_http={0}", logging.level),
        }
    }
}
