//! End-to-end matrix pipeline
//!
//! ```text
//! candidates ──▶ CandidateVersionsParser ─┐
//!                                         ├─▶ VersionMatcher ─▶ expand ─▶ write_matrix
//! rule file  ──▶ RuleFileParser ──────────┘
//! ```

use std::path::PathBuf;

use tracing::info;

use crate::config::{
    CANDIDATE_VERSIONS, CASE_VERSIONS_FILE, INCLUDE_CASE_SPECIFIC_VERSION, OUTPUT_FILE, RunConfig,
};
use crate::error::Error;
use crate::matrix::profile::{VersionProfile, expand};
use crate::matrix::render::write_matrix;
use crate::parser::candidates::CandidateVersionsParser;
use crate::parser::rules::RuleFileParser;
use crate::parser::traits::Parser;
use crate::parser::types::RuleMap;
use crate::version::matcher::VersionMatcher;

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixReport {
    pub output_file: PathBuf,
    pub profiles: Vec<VersionProfile>,
    /// Text written to `output_file`
    pub text: String,
}

/// Match and expand without touching the filesystem
pub fn build_matrix(
    candidate_versions: &str,
    rules: &RuleMap,
    include_case_specific_version: bool,
) -> Result<Vec<VersionProfile>, Error> {
    let candidates = CandidateVersionsParser
        .parse(candidate_versions)
        .map_err(Error::Candidates)?;

    let matched =
        VersionMatcher::new(include_case_specific_version).match_components(&candidates, rules)?;

    Ok(expand(&matched)?)
}

/// Read the rule file, build the matrix and write it out
pub fn run(config: &RunConfig) -> Result<MatrixReport, Error> {
    info!("{}: {}", CANDIDATE_VERSIONS, config.candidate_versions);
    info!("{}: {}", CASE_VERSIONS_FILE, config.case_versions_file.display());
    info!("{}: {}", OUTPUT_FILE, config.output_file.display());
    info!(
        "{}: {}",
        INCLUDE_CASE_SPECIFIC_VERSION, config.include_case_specific_version
    );

    let content =
        std::fs::read_to_string(&config.case_versions_file).map_err(|source| Error::ReadRules {
            path: config.case_versions_file.clone(),
            source,
        })?;
    let rules = RuleFileParser::new()
        .parse(&content)
        .map_err(|source| Error::Rules {
            path: config.case_versions_file.clone(),
            source,
        })?;

    let profiles = build_matrix(
        &config.candidate_versions,
        &rules,
        config.include_case_specific_version,
    )?;

    let text = write_matrix(&config.output_file, &profiles).map_err(|source| Error::Io {
        path: config.output_file.clone(),
        source,
    })?;
    info!("Version matrix total: {}, list: \n{}", profiles.len(), text);

    Ok(MatrixReport {
        output_file: config.output_file.clone(),
        profiles,
        text,
    })
}
