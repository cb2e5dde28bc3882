//! Version matrix builder
//!
//! Selects, per component, the candidate versions that satisfy a rule file
//! and expands the selections into every combination of versions.
//!
//! # Modules
//!
//! - [`parser`]: Rule file and candidate list parsing
//! - [`version`]: Version comparison and rule matching
//! - [`matrix`]: Profile expansion and rendering
//! - [`runner`]: The end-to-end pipeline
//! - [`config`]: Settings, exit codes and property names
//! - [`error`]: Top-level error type
//! - [`logging`]: Tracing subscriber setup

pub mod config;
pub mod error;
pub mod logging;
pub mod matrix;
pub mod parser;
pub mod runner;
pub mod version;

pub use error::Error;
