//! Core type definitions.
//!
//! Validated ports, classified targets and the outcome records the pipeline
//! emits.

mod outcome;
mod port;
mod target;

pub use outcome::OutcomeRecord;
pub use port::{Port, PortError, PortSpec};
pub use target::{HostTarget, Proto, Target, TargetError, UrlTarget};
