use crate::config::observability::ObservabilityConfig;
use crate::config::schema::{Config, DecodedConfig, Primary};

/// Service identity stamped onto every observability config.
pub const SERVICE_NAME: &str = "boilerplate";

/// Returns the supplied observability section, or the built-in one when the
/// environment had none. The flag reports whether the built-in was used.
pub fn apply_observability_defaults(
    observability: Option<ObservabilityConfig>,
) -> (ObservabilityConfig, bool) {
    match observability {
        Some(observability) => (observability, false),
        None => (ObservabilityConfig::builtin(), true),
    }
}

/// Overwrites service name and environment from primary settings.
///
/// Values supplied in the environment for these two fields are already
/// dropped by the decoder; this always wins.
pub fn override_observability_identity(observability: &mut ObservabilityConfig, primary: &Primary) {
    observability.service_name = SERVICE_NAME.to_owned();
    observability.environment = primary.env.clone();
}

/// Moves the decoded sections into a [`Config`]. Any observability left on
/// `decoded` is dropped in favour of `observability`.
pub fn assemble(decoded: DecodedConfig, observability: ObservabilityConfig) -> Config {
    Config {
        primary: decoded.primary,
        server: decoded.server,
        database: decoded.database,
        auth: decoded.auth,
        redis: decoded.redis,
        integration: decoded.integration,
        observability,
    }
}
