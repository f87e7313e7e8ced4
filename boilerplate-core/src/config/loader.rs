use tracing::{debug, info, warn};

use crate::config::decoder::decode;
use crate::config::postprocess::{
    apply_observability_defaults, assemble, override_observability_identity,
};
use crate::config::scanner::{process_env, scan, DEFAULT_ENV_PREFIX};
use crate::config::schema::Config;
use crate::config::validation::validate_config;
use crate::error::Result;

/// Steps of a single load. Any step can fail, which ends the load; there is
/// no retry and no partially valid result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    Start,
    Scanned,
    Decoded,
    Validated,
    Defaulted,
    Overridden,
    ObservabilityValidated,
    Done,
}

impl LoadStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Scanned => "scanned",
            Self::Decoded => "decoded",
            Self::Validated => "validated",
            Self::Defaulted => "defaulted",
            Self::Overridden => "overridden",
            Self::ObservabilityValidated => "observability_validated",
            Self::Done => "done",
        }
    }
}

impl std::fmt::Display for LoadStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoader {
    prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_ENV_PREFIX)
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Loads from a snapshot of the current process environment.
    pub fn load_from_env(&self) -> Result<Config> {
        let vars = process_env(&self.prefix)?;
        self.load_from_vars(vars)
    }

    /// Runs the full pipeline over an explicit variable snapshot.
    pub fn load_from_vars<I>(&self, vars: I) -> Result<Config>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let raw = scan(vars, &self.prefix);
        if raw.is_empty() {
            warn!(prefix = %self.prefix, "no prefixed environment variables found");
        }
        transition(LoadStage::Scanned);

        let mut decoded = decode(&raw)?;
        transition(LoadStage::Decoded);

        validate_config(&decoded)?;
        transition(LoadStage::Validated);

        let (mut observability, defaulted) =
            apply_observability_defaults(decoded.observability.take());
        transition(LoadStage::Defaulted);

        override_observability_identity(&mut observability, &decoded.primary);
        transition(LoadStage::Overridden);

        observability.validate()?;
        transition(LoadStage::ObservabilityValidated);

        let config = assemble(decoded, observability);
        transition(LoadStage::Done);

        info!(
            keys = raw.len(),
            env = %config.primary.env,
            observability_defaulted = defaulted,
            "configuration loaded"
        );
        Ok(config)
    }
}

fn transition(stage: LoadStage) {
    debug!(stage = %stage, "configuration load advanced");
}

/// Loads from the process environment with the default prefix.
pub fn load() -> Result<Config> {
    ConfigLoader::new().load_from_env()
}

/// Loads from an explicit snapshot with the default prefix.
pub fn load_from_vars<I>(vars: I) -> Result<Config>
where
    I: IntoIterator<Item = (String, String)>,
{
    ConfigLoader::new().load_from_vars(vars)
}
