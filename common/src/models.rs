//! # Models
//!
//! * [`record::CandidateRecord`]: one relay row as it came out of the feed.
//! * [`record::ProbeOutcome`]: a candidate paired with its reachability verdict.
//! * [`document::OutputRecord`] / [`document::ServerDocument`]: the persisted JSON shape.

pub mod document;
pub mod record;

pub use document::{OutputRecord, ServerDocument};
pub use record::{CandidateRecord, ProbeOutcome};
