//! pingsweep-discover: Concurrent ping sweep over CIDR ranges.
//!
//! Expands a range into candidate addresses, probes them with a fixed pool
//! of workers, and returns the sorted set of addresses that answered.

pub mod collector;
pub mod config;
pub mod error;
pub mod expand;
pub mod probe;
pub mod scanner;
pub mod scheduler;
pub mod worker;

pub use expand::expand_range;
pub use probe::{CommandProbe, Probe};
pub use scanner::PingScanner;
