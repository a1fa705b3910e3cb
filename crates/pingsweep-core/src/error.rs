use thiserror::Error;

/// Errors a scan can return to its caller.
///
/// Per-address probe failures never appear here; they are folded into an
/// unreachable outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SweepError {
    #[error("Invalid range specification {spec:?}: {reason}")]
    InvalidRange { spec: String, reason: String },

    #[error("Scan incomplete: received {received} of {expected} outcomes")]
    Incomplete { expected: usize, received: usize },
}

impl SweepError {
    pub fn invalid_range(spec: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_invalid_range(&self) -> bool {
        matches!(self, Self::InvalidRange { .. })
    }
}

pub type Result<T> = std::result::Result<T, SweepError>;
