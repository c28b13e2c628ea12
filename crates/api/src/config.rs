//! Server Configuration

use serde::Deserialize;

/// Runtime settings with environment overrides
///
/// Defaults match the original deployment; any field can be overridden via
/// `SCREENING_*` environment variables, e.g. `SCREENING_ARTIFACTS_DIR`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Directory holding the trained model artifacts
    pub artifacts_dir: String,
}

impl Settings {
    /// Load settings from defaults and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("bind_addr", "0.0.0.0:8080")?
            .set_default("artifacts_dir", "models")?
            .add_source(config::Environment::with_prefix("SCREENING"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::load().unwrap();
        assert_eq!(settings.bind_addr, "0.0.0.0:8080");
        assert_eq!(settings.artifacts_dir, "models");
    }
}
