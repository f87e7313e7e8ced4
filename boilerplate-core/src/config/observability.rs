use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::path::ConfigPath;
use crate::config::postprocess::SERVICE_NAME;
use crate::config::schema::FieldValue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObservabilityError {
    #[error("service_name is required")]
    MissingServiceName,

    #[error("environment is required")]
    MissingEnvironment,

    #[error("invalid log level '{0}'. Must be one of: debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("invalid log format '{0}'. Must be one of: json, console")]
    InvalidLogFormat(String),

    #[error("health check interval must be positive when health checks are enabled")]
    InvalidHealthCheckInterval,

    #[error("health check timeout must be positive when health checks are enabled")]
    InvalidHealthCheckTimeout,

    #[error("health check timeout ({timeout}s) must be less than interval ({interval}s)")]
    HealthCheckTimeoutExceedsInterval { timeout: u64, interval: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Console,
}

/// Observability settings.
///
/// `Default` is the all-zero value the decoder starts from; the values used
/// when the environment supplies no observability section at all come from
/// [`ObservabilityConfig::builtin`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub service_name: String,
    pub environment: String,
    pub logging: LoggingConfig,
    pub new_relic: NewRelicConfig,
    pub health_checks: HealthChecksConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    #[serde(rename = "slow_query_threshold")]
    pub slow_query_threshold_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewRelicConfig {
    pub license_key: String,
    pub app_log_forwarding_enabled: bool,
    pub distributed_tracing_enabled: bool,
    pub debug_logging: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthChecksConfig {
    pub enabled: bool,
    #[serde(rename = "interval")]
    pub interval_secs: u64,
    #[serde(rename = "timeout")]
    pub timeout_secs: u64,
    pub checks: Vec<String>,
}

impl ObservabilityConfig {
    /// Built-in value set used when the environment supplies no
    /// observability variables.
    pub fn builtin() -> Self {
        Self {
            service_name: SERVICE_NAME.to_owned(),
            environment: "development".to_owned(),
            logging: LoggingConfig {
                level: "info".to_owned(),
                format: "console".to_owned(),
                slow_query_threshold_ms: 100,
            },
            new_relic: NewRelicConfig {
                license_key: String::new(),
                app_log_forwarding_enabled: true,
                distributed_tracing_enabled: true,
                debug_logging: false,
            },
            health_checks: HealthChecksConfig {
                enabled: true,
                interval_secs: 30,
                timeout_secs: 5,
                checks: vec!["database".to_owned(), "redis".to_owned()],
            },
        }
    }

    pub fn validate(&self) -> Result<(), ObservabilityError> {
        if self.service_name.trim().is_empty() {
            return Err(ObservabilityError::MissingServiceName);
        }
        if self.environment.trim().is_empty() {
            return Err(ObservabilityError::MissingEnvironment);
        }
        if self.logging.tracing_level().is_none() {
            return Err(ObservabilityError::InvalidLogLevel(
                self.logging.level.clone(),
            ));
        }
        if self.logging.log_format().is_none() {
            return Err(ObservabilityError::InvalidLogFormat(
                self.logging.format.clone(),
            ));
        }

        let checks = &self.health_checks;
        if checks.enabled {
            if checks.interval_secs == 0 {
                return Err(ObservabilityError::InvalidHealthCheckInterval);
            }
            if checks.timeout_secs == 0 {
                return Err(ObservabilityError::InvalidHealthCheckTimeout);
            }
            if checks.timeout_secs >= checks.interval_secs {
                return Err(ObservabilityError::HealthCheckTimeoutExceedsInterval {
                    timeout: checks.timeout_secs,
                    interval: checks.interval_secs,
                });
            }
        }

        Ok(())
    }

    /// New Relic is only wired up when a license key is present.
    pub fn new_relic_enabled(&self) -> bool {
        !self.new_relic.license_key.trim().is_empty()
    }

    pub fn field(&self, path: ConfigPath) -> Option<FieldValue<'_>> {
        let value = match path {
            ConfigPath::ObservabilityServiceName => FieldValue::Str(&self.service_name),
            ConfigPath::ObservabilityEnvironment => FieldValue::Str(&self.environment),
            ConfigPath::ObservabilityLoggingLevel => FieldValue::Str(&self.logging.level),
            ConfigPath::ObservabilityLoggingFormat => FieldValue::Str(&self.logging.format),
            ConfigPath::ObservabilityLoggingSlowQueryThreshold => {
                FieldValue::Int(self.logging.slow_query_threshold_ms)
            }
            ConfigPath::ObservabilityNewRelicLicenseKey => {
                FieldValue::Str(&self.new_relic.license_key)
            }
            ConfigPath::ObservabilityNewRelicAppLogForwardingEnabled => {
                FieldValue::Bool(self.new_relic.app_log_forwarding_enabled)
            }
            ConfigPath::ObservabilityNewRelicDistributedTracingEnabled => {
                FieldValue::Bool(self.new_relic.distributed_tracing_enabled)
            }
            ConfigPath::ObservabilityNewRelicDebugLogging => {
                FieldValue::Bool(self.new_relic.debug_logging)
            }
            ConfigPath::ObservabilityHealthChecksEnabled => {
                FieldValue::Bool(self.health_checks.enabled)
            }
            ConfigPath::ObservabilityHealthChecksInterval => {
                FieldValue::Int(self.health_checks.interval_secs)
            }
            ConfigPath::ObservabilityHealthChecksTimeout => {
                FieldValue::Int(self.health_checks.timeout_secs)
            }
            ConfigPath::ObservabilityHealthChecksChecks => {
                FieldValue::List(&self.health_checks.checks)
            }
            _ => return None,
        };
        Some(value)
    }
}

impl LoggingConfig {
    pub fn tracing_level(&self) -> Option<tracing::Level> {
        match self.level.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(tracing::Level::DEBUG),
            "info" => Some(tracing::Level::INFO),
            "warn" => Some(tracing::Level::WARN),
            "error" => Some(tracing::Level::ERROR),
            _ => None,
        }
    }

    pub fn log_format(&self) -> Option<LogFormat> {
        match self.format.trim().to_ascii_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "console" => Some(LogFormat::Console),
            _ => None,
        }
    }

    pub fn slow_query_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_query_threshold_ms)
    }
}

impl HealthChecksConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::{LogFormat, ObservabilityConfig, ObservabilityError};

    #[test]
    fn builtin_values_are_valid() {
        let config = ObservabilityConfig::builtin();
        assert_eq!(config.service_name, "boilerplate");
        assert_eq!(config.logging.log_format(), Some(LogFormat::Console));
        assert_eq!(config.health_checks.checks, vec!["database", "redis"]);
        assert!(!config.new_relic_enabled());
        config.validate().expect("built-in config should be valid");
    }

    #[test]
    fn zero_value_is_rejected() {
        let error = ObservabilityConfig::default()
            .validate()
            .expect_err("zero value should fail");
        assert_eq!(error, ObservabilityError::MissingServiceName);
    }

    #[test]
    fn rejects_unknown_log_level() {
        let mut config = ObservabilityConfig::builtin();
        config.logging.level = "verbose".to_owned();

        let error = config.validate().expect_err("validation should fail");
        assert_eq!(error, ObservabilityError::InvalidLogLevel("verbose".to_owned()));
        assert!(error.to_string().contains("Must be one of"));
    }

    #[test]
    fn log_level_and_format_are_case_insensitive() {
        let mut config = ObservabilityConfig::builtin();
        config.logging.level = "WARN".to_owned();
        config.logging.format = "Json".to_owned();
        assert_eq!(config.logging.tracing_level(), Some(tracing::Level::WARN));
        assert_eq!(config.logging.log_format(), Some(LogFormat::Json));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn health_check_timeout_must_fit_inside_interval() {
        let mut config = ObservabilityConfig::builtin();
        config.health_checks.timeout_secs = 30;

        let error = config.validate().expect_err("validation should fail");
        assert!(matches!(
            error,
            ObservabilityError::HealthCheckTimeoutExceedsInterval {
                timeout: 30,
                interval: 30
            }
        ));
    }

    #[test]
    fn disabled_health_checks_skip_timing_rules() {
        let mut config = ObservabilityConfig::builtin();
        config.health_checks.enabled = false;
        config.health_checks.interval_secs = 0;
        config.health_checks.timeout_secs = 0;
        assert!(config.validate().is_ok());
    }
}
