//! Candidate version list parser
//!
//! Format: `component:ver1[,ver2...]`, entries separated by `;` or newlines.
//!
//! ```text
//! dubbo:2.7.7,2.7.8,3.0.0;spring:5.2.0
//! dubbo:2.7.7;dubbo:2.7.8
//! ```

use crate::parser::traits::{ParseError, Parser};
use crate::parser::types::CandidateMap;

/// Parser for the candidate version list
#[derive(Debug, Default)]
pub struct CandidateVersionsParser;

impl Parser for CandidateVersionsParser {
    type Output = CandidateMap;

    fn parse(&self, content: &str) -> Result<CandidateMap, ParseError> {
        let mut candidates = CandidateMap::new();

        for entry in content.split([';', '\n']) {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            let Some((component, versions)) = entry.split_once(':') else {
                return Err(ParseError::InvalidCandidates(format!(
                    "missing ':' in '{}'",
                    entry
                )));
            };

            let component = component.trim();
            if component.is_empty() {
                return Err(ParseError::InvalidCandidates(format!(
                    "missing component name in '{}'",
                    entry
                )));
            }

            // Repeated components extend the list at their first position
            candidates.entry(component.to_string()).or_default().extend(
                versions
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(String::from),
            );
        }

        Ok(candidates)
    }
}
