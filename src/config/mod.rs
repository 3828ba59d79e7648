use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::eligibility::{
    AdvisoryAnnotator, CitationAnnotator, DisabledAnnotator, RuleConfig, RuleConfigError,
};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Which annotator decorates eligibility results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryMode {
    Citation,
    Off,
}

impl AdvisoryMode {
    pub fn annotator(&self) -> Box<dyn AdvisoryAnnotator> {
        match self {
            AdvisoryMode::Citation => Box::new(CitationAnnotator),
            AdvisoryMode::Off => Box::new(DisabledAnnotator),
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub rules: RulesConfig,
    pub advisory: AdvisoryMode,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let path = match env::var("APP_RULES_PATH") {
            Ok(raw) if raw.trim().is_empty() => return Err(ConfigError::EmptyRulesPath),
            Ok(raw) => Some(PathBuf::from(raw.trim())),
            Err(_) => None,
        };

        let advisory = match env::var("ADVISORY_MODE")
            .unwrap_or_else(|_| "citation".to_string())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "citation" | "on" => AdvisoryMode::Citation,
            "off" | "disabled" | "none" => AdvisoryMode::Off,
            other => return Err(ConfigError::InvalidAdvisoryMode(other.to_string())),
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig {
                log_level,
                json: environment == AppEnvironment::Production,
            },
            rules: RulesConfig { path },
            advisory,
        })
    }

    pub fn rule_config(&self) -> Result<RuleConfig, ConfigError> {
        let rules = self.rules.load()?;
        tracing::debug!(version = %rules.version, source = ?self.rules.path, "lending rules loaded");
        Ok(rules)
    }
}

/// Where the lending policy comes from.
#[derive(Debug, Clone, Default)]
pub struct RulesConfig {
    pub path: Option<PathBuf>,
}

impl RulesConfig {
    /// Load and validate the policy, falling back to the embedded canonical rules.
    pub fn load(&self) -> Result<RuleConfig, ConfigError> {
        let rules = match &self.path {
            Some(path) => RuleConfig::from_path(path)?,
            None => RuleConfig::default(),
        };
        rules.validate()?;
        Ok(rules)
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub json: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyRulesPath,
    InvalidAdvisoryMode(String),
    Rules(RuleConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyRulesPath => write!(f, "APP_RULES_PATH must not be empty when set"),
            ConfigError::InvalidAdvisoryMode(value) => {
                write!(f, "ADVISORY_MODE must be 'citation' or 'off' (found '{value}')")
            }
            ConfigError::Rules(err) => write!(f, "invalid lending rules: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::EmptyRulesPath | ConfigError::InvalidAdvisoryMode(_) => None,
            ConfigError::Rules(err) => Some(err),
        }
    }
}

impl From<RuleConfigError> for ConfigError {
    fn from(value: RuleConfigError) -> Self {
        Self::Rules(value)
    }
}
