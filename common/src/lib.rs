//! # Relaygen Common
//!
//! Types shared by every crate in the workspace.
//!
//! * **[`models`]**: Candidate, probe outcome and output document shapes.
//! * **[`config`]**: The run configuration and its named defaults.
//! * **[`error`]**: The error taxonomy surfaced by the pipeline.
//! * **[`log`]**: Status macros (`success!`, `info!`, `warn!`, `error!`) on top of `tracing`.

pub mod config;
pub mod error;
pub mod log;
pub mod models;

#[doc(hidden)]
pub use tracing;
