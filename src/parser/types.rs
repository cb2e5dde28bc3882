//! Common types for parsers

use std::fmt;

use indexmap::IndexMap;
use regex::Regex;

use crate::version::comparator::{Operator, SegmentVersion};

/// Candidate versions per component, in input order
pub type CandidateMap = IndexMap<String, Vec<String>>;

/// Match rules per component, in rule-file order
pub type RuleMap = IndexMap<String, Vec<MatchRule>>;

/// A single version-matching rule parsed from a rule file
#[derive(Debug, Clone, PartialEq)]
pub enum MatchRule {
    /// Exact text equality: `2.7.8`, `!2.7.8.1`
    Plain { version: String, excluded: bool },
    /// Anchored glob where `*` matches any characters: `2.7*`, `!3.*`
    Wildcard {
        pattern: WildcardPattern,
        excluded: bool,
    },
    /// A single numeric bound: `<=2.7.7`
    Range(RangeRule),
    /// Two bounds that must both hold: `>2.7.8 <3.0`
    CombinedRange(RangeRule, RangeRule),
}

impl MatchRule {
    /// Range rules can never be excluded
    pub fn is_excluded(&self) -> bool {
        match self {
            MatchRule::Plain { excluded, .. } | MatchRule::Wildcard { excluded, .. } => *excluded,
            MatchRule::Range(_) | MatchRule::CombinedRange(..) => false,
        }
    }
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bang = |excluded: bool| if excluded { "!" } else { "" };
        match self {
            MatchRule::Plain { version, excluded } => write!(f, "{}{}", bang(*excluded), version),
            MatchRule::Wildcard { pattern, excluded } => {
                write!(f, "{}{}", bang(*excluded), pattern.as_str())
            }
            MatchRule::Range(range) => write!(f, "{}", range),
            MatchRule::CombinedRange(lower, upper) => write!(f, "{} {}", lower, upper),
        }
    }
}

/// One numeric bound of a range rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRule {
    pub operator: Operator,
    /// Bound as written in the rule file
    pub version: String,
    pub bound: SegmentVersion,
}

impl RangeRule {
    pub fn matches(&self, candidate: &SegmentVersion) -> bool {
        self.operator.matches(candidate, &self.bound)
    }
}

impl fmt::Display for RangeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}

/// A compiled `*` glob, anchored at both ends
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    pattern: String,
    regex: Regex,
}

impl WildcardPattern {
    /// Every character except `*` is matched literally; `*` matches lazily.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let body = pattern
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*?");
        let regex = Regex::new(&format!("^(?:{})$", body))?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn is_match(&self, version: &str) -> bool {
        self.regex.is_match(version)
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

impl PartialEq for WildcardPattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

/// Render a rule list the way diagnostics show it: `[2.7*, !2.7.8*]`
pub fn format_rules(rules: &[MatchRule]) -> String {
    let items = rules
        .iter()
        .map(|rule| rule.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", items)
}
