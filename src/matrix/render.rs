//! Flag-style rendering of version profiles
//!
//! Each profile becomes one line of `-D<component>=<version>` tokens:
//! ```text
//! -Ddubbo.version=2.7.7 -Dspring.version=5.2.0
//! ```

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::matrix::profile::{ProfileEntry, VersionProfile};

fn render_entry(entry: &ProfileEntry) -> String {
    format!("-D{}={}", entry.component, entry.version)
}

/// Render one profile as a single line without its terminator
pub fn render_profile(profile: &VersionProfile) -> String {
    profile
        .entries()
        .iter()
        .map(render_entry)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render all profiles, one `\n`-terminated line each
pub fn render(profiles: &[VersionProfile]) -> String {
    let mut out = String::new();
    for profile in profiles {
        out.push_str(&render_profile(profile));
        out.push('\n');
    }
    out
}

/// Write the rendered matrix to `path`, creating parent directories.
///
/// The text goes to a temporary file next to `path` that replaces the target
/// only once fully written, so a failed write leaves any previous matrix as is.
pub fn write_matrix(path: &Path, profiles: &[VersionProfile]) -> io::Result<String> {
    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent)?;
            parent
        }
        None => Path::new("."),
    };

    let text = render(profiles);
    let mut tmp = NamedTempFile::new_in(parent)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
    }
    tmp.persist(path)?;
    Ok(text)
}
