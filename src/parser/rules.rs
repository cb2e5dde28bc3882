//! Case version rule file parser
//!
//! One entry per line, `component=pattern[,pattern...]`. Blank lines and
//! lines starting with `#` are ignored.
//!
//! Format examples:
//! ```text
//! dubbo.version=2.7*, 3.*, !2.7.8*, !2.7.8.1
//! dubbo.version=<=2.7.7, >2.7.8, >=3.0
//! dubbo.version=[<=2.7.7, >2.7.8, >=3.0]
//! dubbo.version=["<=2.7.7", ">2.7.8", ">=3.0"]
//! dubbo.version=['<=2.7.7', '>2.7.8', '>=3.0']
//! dubbo.version=>2.7.8 <3.0
//! ```
//!
//! Comma-separated patterns are alternatives. Two bounds inside one pattern
//! (`>2.7.8 <3.0`) form a single interval that must hold as a whole.

use regex::Regex;

use crate::parser::traits::{ParseError, Parser};
use crate::parser::types::{MatchRule, RangeRule, RuleMap, WildcardPattern};
use crate::version::comparator::{Operator, SegmentVersion};

/// Parser for case version rule files
pub struct RuleFileParser {
    /// Tokens of a range expression: an operator or a dotted number
    range_token_re: Regex,
}

impl RuleFileParser {
    pub fn new() -> Self {
        Self {
            range_token_re: Regex::new(r"<=|>=|<|>|[0-9.]+").unwrap(),
        }
    }

    fn parse_line(
        &self,
        line_num: usize,
        line: &str,
    ) -> Result<(String, Vec<MatchRule>), ParseError> {
        let Some((component, patterns)) = line.split_once('=') else {
            return Err(invalid_rule(line_num, format!("missing '=' in '{}'", line)));
        };

        let component = component.trim();
        if component.is_empty() {
            return Err(invalid_rule(
                line_num,
                format!("missing component name in '{}'", line),
            ));
        }

        let patterns = unwrap_rule(patterns, '[', ']', line_num)?;
        let rules = patterns
            .split(',')
            .map(|pattern| self.parse_pattern(pattern, line_num))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((component.to_string(), rules))
    }

    fn parse_pattern(&self, pattern: &str, line_num: usize) -> Result<MatchRule, ParseError> {
        let pattern = unwrap_rule(pattern, '"', '"', line_num)?;
        let pattern = unwrap_rule(pattern, '\'', '\'', line_num)?;

        if pattern.starts_with('>') || pattern.starts_with('<') {
            return self.parse_range(pattern, line_num);
        }

        let (excluded, pattern) = match pattern.strip_prefix('!') {
            Some(rest) => (true, rest.trim()),
            None => (false, pattern),
        };

        if pattern.is_empty() {
            return Err(invalid_rule(line_num, "empty version pattern".to_string()));
        }

        if pattern.contains('*') {
            let pattern = WildcardPattern::new(pattern)
                .map_err(|e| invalid_rule(line_num, format!("'{}': {}", pattern, e)))?;
            Ok(MatchRule::Wildcard { pattern, excluded })
        } else {
            Ok(MatchRule::Plain {
                version: pattern.to_string(),
                excluded,
            })
        }
    }

    /// Scan `op version [op version]` pairs, skipping anything between tokens
    fn parse_range(&self, pattern: &str, line_num: usize) -> Result<MatchRule, ParseError> {
        let invalid = |message: String| ParseError::InvalidRange {
            line: line_num,
            message,
        };

        let mut bounds: Vec<RangeRule> = Vec::with_capacity(2);
        let mut tokens = self.range_token_re.find_iter(pattern).map(|m| m.as_str());

        while let Some(op_token) = tokens.next() {
            if bounds.len() == 2 {
                return Err(invalid(format!("more than two bounds in '{}'", pattern)));
            }

            let operator: Operator = op_token
                .parse()
                .map_err(|e| invalid(format!("'{}': {}", pattern, e)))?;

            let Some(version) = tokens.next() else {
                return Err(invalid(format!("unexpected end of '{}'", pattern)));
            };
            if version.starts_with('<') || version.starts_with('>') {
                return Err(invalid(format!(
                    "expected version after '{}' in '{}'",
                    op_token, pattern
                )));
            }

            let bound = SegmentVersion::parse(version)
                .map_err(|e| invalid(format!("'{}': {}", pattern, e)))?;
            bounds.push(RangeRule {
                operator,
                version: version.to_string(),
                bound,
            });
        }

        let mut bounds = bounds.into_iter();
        match (bounds.next(), bounds.next()) {
            (Some(single), None) => Ok(MatchRule::Range(single)),
            (Some(first), Some(second)) => Ok(MatchRule::CombinedRange(first, second)),
            _ => Err(invalid(format!("no bound found in '{}'", pattern))),
        }
    }
}

impl Default for RuleFileParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for RuleFileParser {
    type Output = RuleMap;

    fn parse(&self, content: &str) -> Result<RuleMap, ParseError> {
        let mut rules = RuleMap::new();

        for (index, line) in content.lines().enumerate() {
            let trimmed = line.trim();

            // Skip empty lines and comments
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let (component, component_rules) = self.parse_line(index + 1, trimmed)?;
            rules.insert(component, component_rules);
        }

        Ok(rules)
    }
}

/// Strip one pair of wrapping characters; an opener without its closer is an error
fn unwrap_rule(rule: &str, begin: char, end: char, line_num: usize) -> Result<&str, ParseError> {
    let rule = rule.trim();
    let Some(rest) = rule.strip_prefix(begin) else {
        return Ok(rule);
    };

    match rest.strip_suffix(end) {
        Some(inner) => Ok(inner.trim()),
        None => Err(invalid_rule(
            line_num,
            format!("unbalanced '{}{}' in '{}'", begin, end, rule),
        )),
    }
}

fn invalid_rule(line: usize, message: String) -> ParseError {
    ParseError::InvalidRule { line, message }
}
