//! Version comparison and rule matching
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐
//! │  Comparator  │◀────│   Matcher    │
//! │ (4 segments) │     │ (rules ∩     │
//! └──────────────┘     │  candidates) │
//!                      └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`comparator`]: Four-segment numeric versions and comparison operators
//! - [`matcher`]: Inclusion/exclusion matching with case-specific fallback
//! - [`error`]: Error types for version parsing and matching

pub mod comparator;
pub mod error;
pub mod matcher;

pub use comparator::{Operator, SegmentVersion};
pub use error::{MatchError, VersionError};
pub use matcher::{MatchedVersionMap, UnmatchedComponent, VersionMatcher};
