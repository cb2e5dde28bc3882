use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::Error;

// =============================================================================
// Property names (shared by the JSON config file and diagnostics)
// =============================================================================

pub const CASE_VERSIONS_FILE: &str = "caseVersionsFile";
pub const CANDIDATE_VERSIONS: &str = "candidateVersions";
pub const OUTPUT_FILE: &str = "outputFile";
pub const INCLUDE_CASE_SPECIFIC_VERSION: &str = "includeCaseSpecificVersion";

// =============================================================================
// Exit status
// =============================================================================

/// Bad input, parse failure or I/O failure
pub const EXIT_FAILED: u8 = 1;

/// A component matched nothing, or the matrix came out empty
pub const EXIT_UNMATCHED: u8 = 2;

/// Prefix of every fatal message, for wrapper scripts scanning the log
pub const ERROR_MARKER: &str = "[VERSION-MATRIX-ERROR]";

/// Log filter used when RUST_LOG is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Matcher configuration as read from a config file and command line
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MatcherConfig {
    /// Rule file with `component=patterns` lines
    pub case_versions_file: Option<PathBuf>,
    /// `component:ver1,ver2;component2:ver1`
    pub candidate_versions: Option<String>,
    /// Destination of the rendered matrix
    pub output_file: Option<PathBuf>,
    /// Fall back to exact versions from the rule file when nothing matched
    pub include_case_specific_version: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            case_versions_file: None,
            candidate_versions: None,
            output_file: None,
            include_case_specific_version: true,
        }
    }
}

/// Command-line values; each one present replaces the config file value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub case_versions_file: Option<PathBuf>,
    pub candidate_versions: Option<String>,
    pub output_file: Option<PathBuf>,
    pub include_case_specific_version: Option<bool>,
}

/// Fully validated settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub case_versions_file: PathBuf,
    pub candidate_versions: String,
    pub output_file: PathBuf,
    pub include_case_specific_version: bool,
}

impl MatcherConfig {
    /// Load a JSON config file; absent fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn with_overrides(self, overrides: ConfigOverrides) -> Self {
        Self {
            case_versions_file: overrides.case_versions_file.or(self.case_versions_file),
            candidate_versions: overrides.candidate_versions.or(self.candidate_versions),
            output_file: overrides.output_file.or(self.output_file),
            include_case_specific_version: overrides
                .include_case_specific_version
                .unwrap_or(self.include_case_specific_version),
        }
    }

    /// Check that every required setting is present, in reporting order
    pub fn validate(&self) -> Result<RunConfig, Error> {
        let candidate_versions = self
            .candidate_versions
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| missing(CANDIDATE_VERSIONS))?;

        let case_versions_file = self
            .case_versions_file
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| missing(CASE_VERSIONS_FILE))?;
        if !case_versions_file.is_file() {
            return Err(Error::Input(format!(
                "File not exists or isn't a file: {}",
                case_versions_file.display()
            )));
        }

        let output_file = self
            .output_file
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| missing(OUTPUT_FILE))?;

        Ok(RunConfig {
            case_versions_file: case_versions_file.to_path_buf(),
            candidate_versions: candidate_versions.to_string(),
            output_file: output_file.to_path_buf(),
            include_case_specific_version: self.include_case_specific_version,
        })
    }
}

fn missing(property: &str) -> Error {
    Error::Input(format!("Missing config: '{}'", property))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn matcher_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<MatcherConfig>(json!({
            "candidateVersions": "dubbo:2.7.7"
        }))
        .unwrap();

        assert_eq!(result.candidate_versions.as_deref(), Some("dubbo:2.7.7"));
        assert_eq!(result.case_versions_file, None);
        assert!(result.include_case_specific_version);
    }

    #[test]
    fn matcher_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<MatcherConfig>(json!({
            "caseVersionsFile": "/case/versions.conf",
            "candidateVersions": "dubbo:2.7.7,3.0.0",
            "outputFile": "/out/matrix.txt",
            "includeCaseSpecificVersion": false
        }))
        .unwrap();

        assert_eq!(
            result,
            MatcherConfig {
                case_versions_file: Some(PathBuf::from("/case/versions.conf")),
                candidate_versions: Some("dubbo:2.7.7,3.0.0".to_string()),
                output_file: Some(PathBuf::from("/out/matrix.txt")),
                include_case_specific_version: false,
            }
        );
    }

    #[test]
    fn from_file_reports_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            MatcherConfig::from_file(&path),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn with_overrides_replaces_only_given_values() {
        let file_config = MatcherConfig {
            case_versions_file: Some(PathBuf::from("/file/versions.conf")),
            candidate_versions: Some("dubbo:2.7.7".to_string()),
            output_file: Some(PathBuf::from("/file/matrix.txt")),
            include_case_specific_version: true,
        };

        let merged = file_config.with_overrides(ConfigOverrides {
            output_file: Some(PathBuf::from("/cli/matrix.txt")),
            include_case_specific_version: Some(false),
            ..ConfigOverrides::default()
        });

        assert_eq!(
            merged,
            MatcherConfig {
                case_versions_file: Some(PathBuf::from("/file/versions.conf")),
                candidate_versions: Some("dubbo:2.7.7".to_string()),
                output_file: Some(PathBuf::from("/cli/matrix.txt")),
                include_case_specific_version: false,
            }
        );
    }

    fn config_with_rules(temp_dir: &TempDir) -> MatcherConfig {
        let rules = temp_dir.path().join("versions.conf");
        std::fs::write(&rules, "dubbo=2.7*\n").unwrap();
        MatcherConfig {
            case_versions_file: Some(rules),
            candidate_versions: Some("dubbo:2.7.7".to_string()),
            output_file: Some(temp_dir.path().join("out/matrix.txt")),
            include_case_specific_version: true,
        }
    }

    #[test]
    fn validate_accepts_complete_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_with_rules(&temp_dir);

        let run = config.validate().unwrap();

        assert_eq!(run.candidate_versions, "dubbo:2.7.7");
        assert_eq!(run.output_file, temp_dir.path().join("out/matrix.txt"));
    }

    #[test]
    fn validate_reports_blank_candidate_versions_first() {
        let config = MatcherConfig {
            candidate_versions: Some("   ".to_string()),
            ..MatcherConfig::default()
        };

        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "Missing config: 'candidateVersions'");
    }

    #[test]
    fn validate_reports_missing_case_versions_file() {
        let config = MatcherConfig {
            candidate_versions: Some("dubbo:2.7.7".to_string()),
            ..MatcherConfig::default()
        };

        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "Missing config: 'caseVersionsFile'");
    }

    #[test]
    fn validate_rejects_case_versions_path_that_is_not_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = MatcherConfig {
            case_versions_file: Some(temp_dir.path().to_path_buf()),
            ..config_with_rules(&temp_dir)
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().starts_with("File not exists or isn't a file"));
    }

    #[test]
    fn validate_reports_missing_output_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = MatcherConfig {
            output_file: None,
            ..config_with_rules(&temp_dir)
        };

        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "Missing config: 'outputFile'");
    }
}
