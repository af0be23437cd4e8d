//! Application glue module
//!
//! Configuration and command-line arguments.

mod config;

pub use config::{
    CardConfig, CliArgs, Command, Config, ConfigError, FontConfig, QuoteArgs, RotationConfig,
    ShareConfig,
};
