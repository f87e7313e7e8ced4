pub mod decoder;
pub mod loader;
pub mod observability;
pub mod path;
pub mod postprocess;
pub mod raw;
pub mod scanner;
pub mod schema;
mod tree;
pub mod validation;

pub use loader::{load, load_from_vars, ConfigLoader, LoadStage};
pub use observability::{LogFormat, ObservabilityConfig, ObservabilityError};
pub use path::{ConfigPath, FieldKind};
pub use raw::RawSettings;
pub use scanner::DEFAULT_ENV_PREFIX;
pub use schema::{Config, DecodedConfig};
pub use validation::{validate_config, FieldViolation, Rule, ValidationErrors};
