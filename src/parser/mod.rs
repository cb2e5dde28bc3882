//! Parser layer
//! - traits.rs: Parser trait definition and ParseError
//! - types.rs: Rule model (MatchRule, RangeRule, WildcardPattern) and map aliases
//! - rules.rs: case version rule file parser
//! - candidates.rs: candidate version list parser

pub mod candidates;
pub mod rules;
pub mod traits;
pub mod types;

pub use candidates::CandidateVersionsParser;
pub use rules::RuleFileParser;
pub use traits::{ParseError, Parser};
pub use types::{CandidateMap, MatchRule, RangeRule, RuleMap, WildcardPattern};
