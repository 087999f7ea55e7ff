//! rigscore core — shared result types, configuration and errors.

pub mod config;
pub mod error;
pub mod types;

pub use config::MatchConfig;
pub use error::{Error, Result};
pub use types::{HardwareKind, MatchTier, Resolution, DEFAULT_LABEL_PREFIX, UNKNOWN_LABEL};
