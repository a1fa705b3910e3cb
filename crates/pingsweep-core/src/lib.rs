//! pingsweep-core: Shared scan types and error handling for pingsweep.
//!
//! This crate provides the value types passed across the scan engine:
//! - `ScanRequest` describing one sweep of an address range
//! - `Outcome` for a single probe result
//! - `ScanResult` holding the sorted reachable set
//! - `SweepError`, the only error a scan surfaces to its caller

pub mod error;
pub mod types;

pub use error::{Result, SweepError};
pub use types::{Outcome, ScanRequest, ScanResult};
