//! Rule matching against candidate versions
//!
//! A candidate is selected when at least one inclusion rule matches and no
//! exclusion rule does. Exclusion wins regardless of rule order.
//!
//! Plain and wildcard rules compare the raw candidate text; range rules
//! compare the qualifier-stripped numeric form:
//! - `2.7.8-SNAPSHOT` vs `>=2.7.0` -> match (read as `2.7.8`)
//! - `2.7.8-SNAPSHOT` vs `2.7.8` -> no match (text differs)

use std::fmt;

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::parser::types::{CandidateMap, MatchRule, RuleMap, format_rules};
use crate::version::comparator::SegmentVersion;
use crate::version::error::{MatchError, VersionError};

/// Matched versions per component, in candidate order
pub type MatchedVersionMap = IndexMap<String, Vec<String>>;

/// A component whose rules selected nothing
#[derive(Debug, Clone, PartialEq)]
pub struct UnmatchedComponent {
    pub component: String,
    pub rules: Vec<MatchRule>,
}

impl fmt::Display for UnmatchedComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Component not match: {}, rules: {}",
            self.component,
            format_rules(&self.rules)
        )
    }
}

/// Selects candidate versions per component
#[derive(Debug, Clone, Copy)]
pub struct VersionMatcher {
    /// Fall back to the rule file's exact versions when nothing matched
    include_case_specific_version: bool,
}

impl VersionMatcher {
    pub fn new(include_case_specific_version: bool) -> Self {
        Self {
            include_case_specific_version,
        }
    }

    /// Candidates satisfying `rules`, in candidate order, without fallback
    pub fn match_versions(
        &self,
        rules: &[MatchRule],
        candidates: &[String],
    ) -> Result<Vec<String>, VersionError> {
        let mut matched = Vec::new();
        for candidate in candidates {
            if is_included(rules, candidate)? {
                matched.push(candidate.clone());
            }
        }
        Ok(matched)
    }

    /// Matched versions for one component, applying the case-specific fallback
    pub fn match_component(
        &self,
        component: &str,
        rules: &[MatchRule],
        candidates: &[String],
    ) -> Result<Vec<String>, VersionError> {
        let mut matched = self.match_versions(rules, candidates)?;

        if matched.is_empty() && self.include_case_specific_version {
            matched = case_specific_versions(rules);
            if !matched.is_empty() {
                info!(
                    "No candidate of {} matched, using case specific versions: {:?}",
                    component, matched
                );
            }
        }

        debug!("Matched versions of {}: {:?}", component, matched);
        Ok(matched)
    }

    /// Match every component that has both candidates and rules.
    ///
    /// Every rule-file component left without a version is reported together.
    pub fn match_components(
        &self,
        candidates: &CandidateMap,
        rules: &RuleMap,
    ) -> Result<MatchedVersionMap, MatchError> {
        let mut matched_map = MatchedVersionMap::new();

        for (component, candidate_versions) in candidates {
            let Some(component_rules) = rules.get(component).filter(|r| !r.is_empty()) else {
                debug!("No match rules for {}, skipped", component);
                continue;
            };

            let matched = self.match_component(component, component_rules, candidate_versions)?;
            if !matched.is_empty() {
                matched_map.insert(component.clone(), matched);
            }
        }

        let unmatched: Vec<UnmatchedComponent> = rules
            .iter()
            .filter(|(component, _)| !matched_map.contains_key(*component))
            .map(|(component, rules)| UnmatchedComponent {
                component: component.clone(),
                rules: rules.clone(),
            })
            .collect();

        if !unmatched.is_empty() {
            return Err(MatchError::Unmatched(unmatched));
        }

        Ok(matched_map)
    }
}

impl Default for VersionMatcher {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Whether `candidate` is selected by `rules`
///
/// A matching exclusion wins over everything else, including a candidate
/// that range rules cannot read.
pub fn is_included(rules: &[MatchRule], candidate: &str) -> Result<bool, VersionError> {
    // Only range rules need the numeric form
    let normalized = SegmentVersion::normalize(candidate);
    let mut included = false;
    let mut unreadable = None;

    for rule in rules {
        let matched = match (rule, &normalized) {
            (MatchRule::Plain { version, .. }, _) => version == candidate,
            (MatchRule::Wildcard { pattern, .. }, _) => pattern.is_match(candidate),
            (MatchRule::Range(range), Ok(version)) => range.matches(version),
            (MatchRule::CombinedRange(first, second), Ok(version)) => {
                first.matches(version) && second.matches(version)
            }
            (MatchRule::Range(_) | MatchRule::CombinedRange(..), Err(e)) => {
                unreadable.get_or_insert_with(|| e.clone());
                continue;
            }
        };

        if matched {
            if rule.is_excluded() {
                return Ok(false);
            }
            included = true;
        }
    }

    match unreadable {
        Some(e) => Err(e),
        None => Ok(included),
    }
}

/// Exact versions named by non-excluded plain rules
fn case_specific_versions(rules: &[MatchRule]) -> Vec<String> {
    rules
        .iter()
        .filter_map(|rule| match rule {
            MatchRule::Plain {
                version,
                excluded: false,
            } => Some(version.clone()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{CandidateVersionsParser, Parser, RuleFileParser};
    use rstest::rstest;

    fn rules(patterns: &str) -> Vec<MatchRule> {
        RuleFileParser::new()
            .parse(&format!("c={}", patterns))
            .unwrap()
            .swap_remove("c")
            .unwrap()
    }

    fn versions(list: &[&str]) -> Vec<String> {
        list.iter().map(|v| v.to_string()).collect()
    }

    #[rstest]
    #[case("1.*, !1.2.3", "1.2.3", false)]
    #[case("!1.2.3, 1.*", "1.2.3", false)] // order does not matter
    #[case("1.*, !1.2.3", "1.2.4", true)]
    #[case("!1.2.3", "1.2.4", false)] // exclusion alone never includes
    #[case("<=2.7.7", "2.7.7", true)]
    #[case("<=2.7.7", "2.7.6", true)]
    #[case("<=2.7.7", "2.7.8", false)]
    #[case(">2.7.8, >=3.0", "2.7.9", true)]
    #[case(">2.7.8, >=3.0", "3.0.0", true)]
    #[case(">2.7.8, >=3.0", "2.7.8", false)]
    #[case(">2.7.8 <3.0", "2.7.9", true)]
    #[case(">2.7.8 <3.0", "3.0.0", false)]
    #[case("<=2.7 >=2.9", "2.8", false)] // one pattern: both bounds must hold
    #[case("<=2.7, >=2.9", "2.9.1", true)] // siblings: either bound
    #[case(">=2.7.0", "2.7.8-SNAPSHOT", true)]
    #[case("2.7.8", "2.7.8-SNAPSHOT", false)]
    #[case("2.7.8*", "2.7.8-SNAPSHOT", true)]
    #[case("2.7*, !2.7.8*", "2.7.8-SNAPSHOT", false)]
    fn is_included_returns_expected(
        #[case] patterns: &str,
        #[case] candidate: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(is_included(&rules(patterns), candidate).unwrap(), expected);
    }

    #[test]
    fn non_numeric_candidate_is_fine_for_text_rules() {
        assert!(is_included(&rules("master*"), "master-2024").unwrap());
    }

    #[test]
    fn non_numeric_candidate_fails_under_range_rules() {
        assert!(matches!(
            is_included(&rules(">=1.0"), "2.x"),
            Err(VersionError::InvalidSegment { .. })
        ));
    }

    #[rstest]
    #[case("!master*, >=1.0")]
    #[case(">=1.0, !master*")]
    #[case("<1.0 >0.1, !master-1")]
    fn excluded_non_numeric_candidate_is_dropped_in_any_rule_order(#[case] patterns: &str) {
        assert_eq!(is_included(&rules(patterns), "master-1"), Ok(false));
    }

    #[test]
    fn match_versions_keeps_candidate_order() {
        let matched = VersionMatcher::new(false)
            .match_versions(&rules("3.*, 2.7*"), &versions(&["2.7.7", "3.0.0", "2.7.8"]))
            .unwrap();

        assert_eq!(matched, versions(&["2.7.7", "3.0.0", "2.7.8"]));
    }

    #[test]
    fn match_component_falls_back_to_case_specific_versions() {
        let matched = VersionMatcher::new(true)
            .match_component("c", &rules("2.0.0"), &versions(&["3.0.0"]))
            .unwrap();

        assert_eq!(matched, versions(&["2.0.0"]));
    }

    #[test]
    fn match_component_fallback_skips_excluded_and_non_plain_rules() {
        let matched = VersionMatcher::new(true)
            .match_component(
                "c",
                &rules("2.0.0, !2.1.0, 2.2*, <1.0, 2.3.0"),
                &versions(&["3.0.0"]),
            )
            .unwrap();

        assert_eq!(matched, versions(&["2.0.0", "2.3.0"]));
    }

    #[test]
    fn match_component_without_fallback_stays_empty() {
        let matched = VersionMatcher::new(false)
            .match_component("c", &rules("2.0.0"), &versions(&["3.0.0"]))
            .unwrap();

        assert!(matched.is_empty());
    }

    #[test]
    fn match_component_does_not_fall_back_when_something_matched() {
        let matched = VersionMatcher::new(true)
            .match_component("c", &rules("2.0.0, 3.*"), &versions(&["3.0.0"]))
            .unwrap();

        assert_eq!(matched, versions(&["3.0.0"]));
    }

    fn candidate_map(content: &str) -> CandidateMap {
        CandidateVersionsParser.parse(content).unwrap()
    }

    fn rule_map(content: &str) -> RuleMap {
        RuleFileParser::new().parse(content).unwrap()
    }

    #[test]
    fn match_components_only_considers_components_with_rules() {
        let matched = VersionMatcher::new(false)
            .match_components(
                &candidate_map("dubbo:2.7.7,3.0.0;spring:5.2.0;netty:4.1.0"),
                &rule_map("netty=4.*\ndubbo=3.*"),
            )
            .unwrap();

        assert_eq!(
            matched.into_iter().collect::<Vec<_>>(),
            vec![
                ("dubbo".to_string(), versions(&["3.0.0"])),
                ("netty".to_string(), versions(&["4.1.0"])),
            ]
        );
    }

    #[test]
    fn match_components_reports_every_unmatched_component() {
        let err = VersionMatcher::new(false)
            .match_components(
                &candidate_map("dubbo:2.7.7;spring:5.2.0"),
                &rule_map("dubbo=3.*\nspring=5.*\nnetty=4.*"),
            )
            .unwrap_err();

        let MatchError::Unmatched(unmatched) = &err else {
            panic!("expected unmatched error, got {:?}", err);
        };
        let names: Vec<_> = unmatched.iter().map(|u| u.component.as_str()).collect();
        assert_eq!(names, vec!["dubbo", "netty"]);
        assert!(err.is_unmatched());
        assert_eq!(
            err.to_string(),
            "Component not match: dubbo, rules: [3.*]; Component not match: netty, rules: [4.*]"
        );
    }

    #[test]
    fn match_components_does_not_fall_back_for_components_without_candidates() {
        let err = VersionMatcher::new(true)
            .match_components(&candidate_map("dubbo:2.7.7"), &rule_map("dubbo=2.7.7\nnetty=4.1.0"))
            .unwrap_err();

        assert!(matches!(
            err,
            MatchError::Unmatched(ref unmatched) if unmatched.len() == 1 && unmatched[0].component == "netty"
        ));
    }

    #[test]
    fn match_components_propagates_invalid_versions() {
        let err = VersionMatcher::new(true)
            .match_components(&candidate_map("dubbo:2.x"), &rule_map("dubbo=>=2.0"))
            .unwrap_err();

        assert!(matches!(err, MatchError::InvalidVersion(_)));
        assert!(!err.is_unmatched());
    }
}
