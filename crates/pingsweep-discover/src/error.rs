//! Error types for the pingsweep-discover crate.

use thiserror::Error;

use pingsweep_core::SweepError;

#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error(transparent)]
    Sweep(#[from] SweepError),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for DiscoverError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

/// Failure of the probe mechanism itself, as opposed to a host not answering.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Failed to run probe command {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DiscoverError>;
