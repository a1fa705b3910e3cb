//! Configuration for the pingsweep scanner.

use std::num::NonZeroUsize;

use serde::Deserialize;

use pingsweep_core::ScanRequest;

use crate::error::{DiscoverError, Result};

/// Top-level discover configuration.
///
/// Loaded from the `pingsweep.toml` `[discover]` section or
/// `PINGSWEEP_DISCOVER__` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverConfig {
    /// Path to the ping binary (default: "ping").
    #[serde(default = "default_ping_path")]
    pub ping_path: String,

    /// Probe profile used when a target does not name one.
    #[serde(default)]
    pub default_profile: ProbeProfile,

    /// Explicit ping options. Replaces the profile's flags when set.
    #[serde(default)]
    pub probe_options: Option<Vec<String>>,

    /// Simultaneous probes per scan.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Maximum number of ranges swept at the same time.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_scans: usize,

    /// Ranges scanned by `--all`.
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

/// A configured range to sweep.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// CIDR range (e.g., "192.168.11.0/24").
    pub range: String,

    /// Human-readable name for this range.
    pub name: Option<String>,

    /// Probe profile override for this range.
    pub profile: Option<ProbeProfile>,

    /// Concurrency override for this range.
    pub concurrency: Option<usize>,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Predefined ping flag sets. The per-attempt deadline lives here, not in
/// the engine.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProbeProfile {
    /// One echo, one second: `-c1 -W1`
    #[default]
    Quick,
    /// Two echoes, one second each: `-c2 -W1`
    Standard,
    /// Three echoes, two seconds each: `-c3 -W2`
    Thorough,
}

impl ProbeProfile {
    /// Return the ping flags for this profile.
    pub fn ping_flags(&self) -> Vec<&'static str> {
        match self {
            Self::Quick => vec!["-c1", "-W1"],
            Self::Standard => vec!["-c2", "-W1"],
            Self::Thorough => vec!["-c3", "-W2"],
        }
    }
}

impl std::str::FromStr for ProbeProfile {
    type Err = DiscoverError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "quick" => Ok(Self::Quick),
            "standard" => Ok(Self::Standard),
            "thorough" => Ok(Self::Thorough),
            _ => Err(DiscoverError::Config(format!(
                "Invalid profile: {s}. Choose: quick, standard, thorough"
            ))),
        }
    }
}

fn default_ping_path() -> String {
    "ping".to_string()
}

fn default_concurrency() -> usize {
    100
}

fn default_max_concurrent() -> usize {
    4
}

fn default_true() -> bool {
    true
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            ping_path: default_ping_path(),
            default_profile: ProbeProfile::default(),
            probe_options: None,
            concurrency: default_concurrency(),
            max_concurrent_scans: default_max_concurrent(),
            targets: Vec::new(),
        }
    }
}

impl DiscoverConfig {
    /// Options for `profile`, unless explicit `probe_options` override it.
    pub fn options_for(&self, profile: Option<ProbeProfile>) -> Vec<String> {
        match &self.probe_options {
            Some(options) => options.clone(),
            None => profile
                .unwrap_or(self.default_profile)
                .ping_flags()
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// Build the scan request for a configured target.
    pub fn request_for(&self, target: &TargetConfig) -> Result<ScanRequest> {
        let concurrency = target.concurrency.unwrap_or(self.concurrency);
        let concurrency = NonZeroUsize::new(concurrency).ok_or_else(|| {
            DiscoverError::Config(format!("concurrency for {} must be positive", target.range))
        })?;

        Ok(ScanRequest::new(target.range.clone(), concurrency)
            .with_probe_options(self.options_for(target.profile)))
    }

    /// Requests for every enabled target.
    pub fn enabled_requests(&self) -> Result<Vec<ScanRequest>> {
        self.targets
            .iter()
            .filter(|t| {
                if !t.enabled {
                    tracing::info!(range = %t.range, "Target disabled, skipping");
                }
                t.enabled
            })
            .map(|t| self.request_for(t))
            .collect()
    }
}

/// Load `[discover]` from `<file_prefix>.toml` (optional) and the environment.
///
/// Falls back to defaults when the section is absent.
pub fn load_config(file_prefix: &str) -> Result<DiscoverConfig> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("PINGSWEEP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    match cfg.get::<DiscoverConfig>("discover") {
        Ok(c) => Ok(c),
        Err(config::ConfigError::NotFound(_)) => Ok(DiscoverConfig::default()),
        Err(e) => Err(e.into()),
    }
}
