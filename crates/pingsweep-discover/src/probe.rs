//! Reachability probes.
//!
//! The engine only needs a yes/no answer per address. `CommandProbe` gets it
//! from the exit status of an external command such as `ping`.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::ProbeError;

/// Decides whether one address is alive.
///
/// `Ok(false)` means the host did not answer. `Err` means the probe itself
/// could not run; callers treat both the same way.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, address: &str, options: &[String]) -> Result<bool, ProbeError>;
}

/// Runs `program options... address` and reports alive on a zero exit.
#[derive(Debug, Clone)]
pub struct CommandProbe {
    program: String,
}

impl CommandProbe {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for CommandProbe {
    fn default() -> Self {
        Self::new("ping")
    }
}

#[async_trait]
impl Probe for CommandProbe {
    async fn probe(&self, address: &str, options: &[String]) -> Result<bool, ProbeError> {
        let status = Command::new(&self.program)
            .args(options)
            .arg(address)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|source| ProbeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        Ok(status.success())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_zero_exit_is_alive() {
        let probe = CommandProbe::new("true");
        assert!(probe.probe("10.0.0.1", &["-c1".to_string()]).await.unwrap());
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_not_alive() {
        let probe = CommandProbe::new("false");
        assert!(!probe.probe("10.0.0.1", &[]).await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_program_is_probe_error() {
        let probe = CommandProbe::new("/nonexistent/pingsweep-probe");
        let err = probe.probe("10.0.0.1", &[]).await.unwrap_err();
        assert!(matches!(err, ProbeError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_address_is_last_argument() {
        // `test X = X` exits zero only when the address lands after the options.
        let probe = CommandProbe::new("test");
        let options = vec!["10.0.0.9".to_string(), "=".to_string()];
        assert!(probe.probe("10.0.0.9", &options).await.unwrap());
        assert!(!probe.probe("10.0.0.8", &options).await.unwrap());
    }

    #[test]
    fn test_default_program_is_ping() {
        assert_eq!(CommandProbe::default().program(), "ping");
    }
}
