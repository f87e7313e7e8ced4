pub mod config;
pub mod error;
pub mod logging;

pub use config::{Config, ConfigLoader};
pub use error::{Error, Result};
