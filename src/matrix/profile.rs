//! Cartesian expansion of matched versions into version profiles

use std::fmt;

use crate::version::error::MatchError;
use crate::version::matcher::MatchedVersionMap;

/// One `component:version` assignment
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileEntry {
    pub component: String,
    pub version: String,
}

impl fmt::Display for ProfileEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.component, self.version)
    }
}

/// One version per participating component, in component order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct VersionProfile {
    entries: Vec<ProfileEntry>,
}

impl VersionProfile {
    pub fn entries(&self) -> &[ProfileEntry] {
        &self.entries
    }

    /// Version assigned to `component`, if it participates
    pub fn version_of(&self, component: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.component == component)
            .map(|entry| entry.version.as_str())
    }

    fn extended(&self, component: &str, version: &str) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.extend_from_slice(&self.entries);
        entries.push(ProfileEntry {
            component: component.to_string(),
            version: version.to_string(),
        });
        Self { entries }
    }
}

impl fmt::Display for VersionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}

/// Expand per-component versions into every combination.
///
/// Versions of the component being added form the outer loop, so the first
/// component varies fastest:
/// `{a: [1, 2], b: [x, y]}` -> `a:1 b:x`, `a:2 b:x`, `a:1 b:y`, `a:2 b:y`
pub fn expand(matched: &MatchedVersionMap) -> Result<Vec<VersionProfile>, MatchError> {
    if matched.is_empty() {
        return Err(MatchError::EmptyMatrix);
    }

    let mut profiles = vec![VersionProfile::default()];
    for (component, versions) in matched {
        let mut next = Vec::with_capacity(profiles.len() * versions.len());
        for version in versions {
            for profile in &profiles {
                next.push(profile.extended(component, version));
            }
        }
        profiles = next;
    }

    if profiles.is_empty() {
        return Err(MatchError::EmptyMatrix);
    }

    Ok(profiles)
}
