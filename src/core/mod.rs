pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, ConfigLoader, ConfigValidator, FslSettings};
pub use error::FslError;
pub use types::*;
