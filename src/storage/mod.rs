//! Configuration file and application paths.

pub mod config;
pub mod paths;

pub use config::{Config, ENV_CONFIG};
pub use paths::AppPaths;
