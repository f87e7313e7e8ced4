use std::str::FromStr;

use crate::error::{Error, Result};

/// Semantic type a raw environment string is coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// Unsigned base-10 integer no larger than `max`.
    Integer { max: u64 },
    Bool,
    /// Comma-delimited list of strings.
    StringList,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Integer { max } if *max == u64::MAX => write!(f, "integer"),
            Self::Integer { max } => write!(f, "integer (0..={max})"),
            Self::Bool => write!(f, "bool"),
            Self::StringList => write!(f, "string list"),
        }
    }
}

const U16: FieldKind = FieldKind::Integer {
    max: u16::MAX as u64,
};
const U32: FieldKind = FieldKind::Integer {
    max: u32::MAX as u64,
};
const U64: FieldKind = FieldKind::Integer { max: u64::MAX };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigPath {
    PrimaryEnv,
    ServerPort,
    ServerReadTimeout,
    ServerWriteTimeout,
    ServerIdleTimeout,
    ServerCorsAllowedOrigins,
    DatabaseHost,
    DatabasePort,
    DatabaseUser,
    DatabasePassword,
    DatabaseName,
    DatabaseSslMode,
    DatabaseMaxOpenConns,
    DatabaseMaxIdleConns,
    DatabaseConnMaxLifetime,
    DatabaseConnMaxIdleTime,
    AuthSecretKey,
    RedisAddress,
    IntegrationResendApiKey,
    ObservabilityServiceName,
    ObservabilityEnvironment,
    ObservabilityLoggingLevel,
    ObservabilityLoggingFormat,
    ObservabilityLoggingSlowQueryThreshold,
    ObservabilityNewRelicLicenseKey,
    ObservabilityNewRelicAppLogForwardingEnabled,
    ObservabilityNewRelicDistributedTracingEnabled,
    ObservabilityNewRelicDebugLogging,
    ObservabilityHealthChecksEnabled,
    ObservabilityHealthChecksInterval,
    ObservabilityHealthChecksTimeout,
    ObservabilityHealthChecksChecks,
}

impl ConfigPath {
    /// Every declared field, depth-first in declaration order.
    pub const ALL: [ConfigPath; 32] = [
        Self::PrimaryEnv,
        Self::ServerPort,
        Self::ServerReadTimeout,
        Self::ServerWriteTimeout,
        Self::ServerIdleTimeout,
        Self::ServerCorsAllowedOrigins,
        Self::DatabaseHost,
        Self::DatabasePort,
        Self::DatabaseUser,
        Self::DatabasePassword,
        Self::DatabaseName,
        Self::DatabaseSslMode,
        Self::DatabaseMaxOpenConns,
        Self::DatabaseMaxIdleConns,
        Self::DatabaseConnMaxLifetime,
        Self::DatabaseConnMaxIdleTime,
        Self::AuthSecretKey,
        Self::RedisAddress,
        Self::IntegrationResendApiKey,
        Self::ObservabilityServiceName,
        Self::ObservabilityEnvironment,
        Self::ObservabilityLoggingLevel,
        Self::ObservabilityLoggingFormat,
        Self::ObservabilityLoggingSlowQueryThreshold,
        Self::ObservabilityNewRelicLicenseKey,
        Self::ObservabilityNewRelicAppLogForwardingEnabled,
        Self::ObservabilityNewRelicDistributedTracingEnabled,
        Self::ObservabilityNewRelicDebugLogging,
        Self::ObservabilityHealthChecksEnabled,
        Self::ObservabilityHealthChecksInterval,
        Self::ObservabilityHealthChecksTimeout,
        Self::ObservabilityHealthChecksChecks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrimaryEnv => "primary.env",
            Self::ServerPort => "server.port",
            Self::ServerReadTimeout => "server.read_timeout",
            Self::ServerWriteTimeout => "server.write_timeout",
            Self::ServerIdleTimeout => "server.idle_timeout",
            Self::ServerCorsAllowedOrigins => "server.cors_allowed_origins",
            Self::DatabaseHost => "database.host",
            Self::DatabasePort => "database.port",
            Self::DatabaseUser => "database.user",
            Self::DatabasePassword => "database.password",
            Self::DatabaseName => "database.name",
            Self::DatabaseSslMode => "database.ssl_mode",
            Self::DatabaseMaxOpenConns => "database.max_open_conns",
            Self::DatabaseMaxIdleConns => "database.max_idle_conns",
            Self::DatabaseConnMaxLifetime => "database.conn_max_lifetime",
            Self::DatabaseConnMaxIdleTime => "database.conn_max_idle_time",
            Self::AuthSecretKey => "auth.secret_key",
            Self::RedisAddress => "redis.address",
            Self::IntegrationResendApiKey => "integration.resend_api_key",
            Self::ObservabilityServiceName => "observability.service_name",
            Self::ObservabilityEnvironment => "observability.environment",
            Self::ObservabilityLoggingLevel => "observability.logging.level",
            Self::ObservabilityLoggingFormat => "observability.logging.format",
            Self::ObservabilityLoggingSlowQueryThreshold => {
                "observability.logging.slow_query_threshold"
            }
            Self::ObservabilityNewRelicLicenseKey => "observability.new_relic.license_key",
            Self::ObservabilityNewRelicAppLogForwardingEnabled => {
                "observability.new_relic.app_log_forwarding_enabled"
            }
            Self::ObservabilityNewRelicDistributedTracingEnabled => {
                "observability.new_relic.distributed_tracing_enabled"
            }
            Self::ObservabilityNewRelicDebugLogging => "observability.new_relic.debug_logging",
            Self::ObservabilityHealthChecksEnabled => "observability.health_checks.enabled",
            Self::ObservabilityHealthChecksInterval => "observability.health_checks.interval",
            Self::ObservabilityHealthChecksTimeout => "observability.health_checks.timeout",
            Self::ObservabilityHealthChecksChecks => "observability.health_checks.checks",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::ServerReadTimeout
            | Self::ServerWriteTimeout
            | Self::ServerIdleTimeout
            | Self::DatabaseConnMaxLifetime
            | Self::DatabaseConnMaxIdleTime
            | Self::ObservabilityLoggingSlowQueryThreshold
            | Self::ObservabilityHealthChecksInterval
            | Self::ObservabilityHealthChecksTimeout => U64,
            Self::DatabasePort => U16,
            Self::DatabaseMaxOpenConns | Self::DatabaseMaxIdleConns => U32,
            Self::ServerCorsAllowedOrigins | Self::ObservabilityHealthChecksChecks => {
                FieldKind::StringList
            }
            Self::ObservabilityNewRelicAppLogForwardingEnabled
            | Self::ObservabilityNewRelicDistributedTracingEnabled
            | Self::ObservabilityNewRelicDebugLogging
            | Self::ObservabilityHealthChecksEnabled => FieldKind::Bool,
            _ => FieldKind::String,
        }
    }

    /// Whether the root validator rejects a zero value at this path.
    pub fn is_required(&self) -> bool {
        !matches!(self, Self::DatabasePassword) && !self.is_observability()
    }

    pub fn is_secret(&self) -> bool {
        matches!(
            self,
            Self::DatabasePassword
                | Self::AuthSecretKey
                | Self::IntegrationResendApiKey
                | Self::ObservabilityNewRelicLicenseKey
        )
    }

    /// Fields the loader overwrites after defaulting, whatever the environment says.
    pub fn is_derived(&self) -> bool {
        matches!(
            self,
            Self::ObservabilityServiceName | Self::ObservabilityEnvironment
        )
    }

    pub fn is_observability(&self) -> bool {
        self.section() == "observability"
    }

    pub fn section(&self) -> &'static str {
        self.segments()[0]
    }

    pub fn segments(&self) -> Vec<&'static str> {
        self.as_str().split('.').collect()
    }

    /// Key the environment scanner produces for this field.
    ///
    /// Underscores in field names are indistinguishable from nesting
    /// separators once a variable name is normalized, so lookups compare
    /// against this flattened form rather than the canonical path.
    pub fn env_key(&self) -> String {
        self.as_str().replace('_', ".")
    }

    /// Environment variable an operator sets to supply this field.
    pub fn env_var(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.as_str().replace('.', "_").to_uppercase())
    }
}

impl FromStr for ConfigPath {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|path| path.as_str() == trimmed)
            .ok_or_else(|| Error::Config(format!("unknown config path '{trimmed}'")))
    }
}

impl std::fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
