//! Numeric version comparison
//!
//! Versions are compared as four integer segments. Qualifiers such as
//! `-SNAPSHOT` are cut off before the segments are read:
//! - `2.7.8-SNAPSHOT` -> `[2, 7, 8, 0]`
//! - `3` -> `[3, 0, 0, 0]`
//! - `1.2.3.4.5` -> `[1, 2, 3, 4]` (extra segments are ignored)

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::version::error::VersionError;

/// Number of numeric segments taken into account when comparing versions
pub const SEGMENT_COUNT: usize = 4;

/// Comparison operators usable in range rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessThanOrEqual,
    /// Equal (==)
    Equal,
}

impl Operator {
    /// Returns the textual symbol of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::Equal => "==",
        }
    }

    /// Whether `candidate <op> bound` holds
    pub fn matches(&self, candidate: &SegmentVersion, bound: &SegmentVersion) -> bool {
        let ordering = candidate.cmp(bound);
        match self {
            Operator::GreaterThan => ordering == Ordering::Greater,
            Operator::GreaterThanOrEqual => ordering != Ordering::Less,
            Operator::LessThan => ordering == Ordering::Less,
            Operator::LessThanOrEqual => ordering != Ordering::Greater,
            Operator::Equal => ordering == Ordering::Equal,
        }
    }
}

impl FromStr for Operator {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ">" => Ok(Operator::GreaterThan),
            ">=" => Ok(Operator::GreaterThanOrEqual),
            "<" => Ok(Operator::LessThan),
            "<=" => Ok(Operator::LessThanOrEqual),
            "==" => Ok(Operator::Equal),
            _ => Err(VersionError::InvalidOperator(s.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A version reduced to exactly four numeric segments.
///
/// Ordering is lexicographic over the segments, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SegmentVersion {
    segments: [u64; SEGMENT_COUNT],
}

impl SegmentVersion {
    pub fn new(segments: [u64; SEGMENT_COUNT]) -> Self {
        Self { segments }
    }

    /// Parse an already qualifier-free version string.
    ///
    /// Empty pieces between dots are skipped, so `2..7` reads as `2.7`.
    pub fn parse(version: &str) -> Result<Self, VersionError> {
        let mut segments = [0u64; SEGMENT_COUNT];
        let pieces = version.split('.').filter(|piece| !piece.is_empty());

        for (slot, piece) in segments.iter_mut().zip(pieces) {
            *slot = piece
                .trim()
                .parse::<u64>()
                .map_err(|_| VersionError::InvalidSegment {
                    version: version.to_string(),
                    segment: piece.to_string(),
                })?;
        }

        Ok(Self { segments })
    }

    /// Strip the qualifier from a raw candidate and parse what remains
    pub fn normalize(raw: &str) -> Result<Self, VersionError> {
        Self::parse(trim_qualifier(raw))
    }
}

impl fmt::Display for SegmentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [major, minor, patch, build] = self.segments;
        write!(f, "{}.{}.{}.{}", major, minor, patch, build)
    }
}

/// Remove a qualifier suffix such as `-SNAPSHOT` or `-rc1`.
///
/// A leading `-` is not treated as a qualifier separator.
pub fn trim_qualifier(version: &str) -> &str {
    match version.find('-') {
        Some(pos) if pos > 0 => &version[..pos],
        _ => version,
    }
}

/// Compare two qualifier-free version strings under `op`
pub fn compare(op: Operator, candidate: &str, bound: &str) -> Result<bool, VersionError> {
    let candidate = SegmentVersion::parse(candidate)?;
    let bound = SegmentVersion::parse(bound)?;
    Ok(op.matches(&candidate, &bound))
}
