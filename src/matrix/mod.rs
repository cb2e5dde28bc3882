//! Version matrix construction
//!
//! # Modules
//!
//! - [`profile`]: Cartesian expansion of matched versions into profiles
//! - [`render`]: `-D<component>=<version>` line rendering and file output

pub mod profile;
pub mod render;

pub use profile::{ProfileEntry, VersionProfile, expand};
pub use render::{render, write_matrix};
