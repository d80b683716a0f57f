//! Range expressions and satisfaction checking
//!
//! Supported range forms:
//! - `1.2.3` - exact match (missing operator defaults to `=`)
//! - `>=1.2.3`, `>1.2.3`, `=1.2.3`, `<=1.2.3`, `<1.2.3` - comparison operators
//! - `^1.2.3` - same major, (minor, patch) at least the bound's
//! - `~1.2.3` - same major and minor, patch at least the bound's
//! - `*`, `x`, `>=0` - universal-accept sentinels
//!
//! Compound ranges (space-joined, `||`-joined, hyphen ranges) are deliberately
//! unsupported; they fail to parse rather than being partially honored.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::version::error::ParseError;
use crate::version::semver::{ParsedVersion, cmp_part};

/// Range strings that accept every version, checked before any parsing
const ACCEPTS_ALL: &[&str] = &["*", "x", ">=0"];

/// A range operator. `Eq` is assumed when no operator prefix is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Gt,
    Gte,
    Eq,
    Lte,
    Lt,
    Caret,
    Tilde,
}

impl Operator {
    /// Whether a comparison outcome against the bound satisfies this operator
    fn accepts(&self, ord: Ordering) -> bool {
        match self {
            Operator::Gt => ord == Ordering::Greater,
            Operator::Gte => ord != Ordering::Less,
            Operator::Eq => ord == Ordering::Equal,
            Operator::Lte => ord != Ordering::Greater,
            Operator::Lt => ord == Ordering::Less,
            // Shorthand operators never reduce to a single comparison
            Operator::Caret | Operator::Tilde => unreachable!(),
        }
    }
}

impl FromStr for Operator {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ">" => Ok(Operator::Gt),
            ">=" => Ok(Operator::Gte),
            "=" => Ok(Operator::Eq),
            "<=" => Ok(Operator::Lte),
            "<" => Ok(Operator::Lt),
            "^" => Ok(Operator::Caret),
            "~" => Ok(Operator::Tilde),
            _ => Err(ParseError::Operator(s.to_string())),
        }
    }
}

/// A parsed range expression: a single operator with a bound, or the
/// universal-accept sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeExpression {
    /// Matches every version (`*`, `x`, `>=0`)
    Any,
    Constraint {
        op: Operator,
        bound: ParsedVersion,
    },
}

impl RangeExpression {
    /// Check whether a parsed version satisfies this range
    pub fn satisfies(&self, version: &ParsedVersion) -> bool {
        match self {
            RangeExpression::Any => true,
            RangeExpression::Constraint { op, bound } => match op {
                Operator::Caret => caret_satisfies(version, bound),
                Operator::Tilde => tilde_satisfies(version, bound),
                _ => op.accepts(version.cmp_precedence(bound)),
            },
        }
    }
}

impl FromStr for RangeExpression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if ACCEPTS_ALL.contains(&s) {
            return Ok(RangeExpression::Any);
        }

        let op_len = s
            .find(|c| !matches!(c, '<' | '>' | '=' | '~' | '^'))
            .unwrap_or(s.len());
        let (op_str, bound) = s.split_at(op_len);
        let op = if op_str.is_empty() {
            Operator::Eq
        } else {
            op_str.parse()?
        };

        Ok(RangeExpression::Constraint {
            op,
            bound: bound.parse()?,
        })
    }
}

/// `^`: majors must match, then the (minor, patch) pair must be at least the
/// bound's under left-to-right numeric comparison. Prerelease tags play no
/// part in shorthand ranges.
fn caret_satisfies(version: &ParsedVersion, bound: &ParsedVersion) -> bool {
    version.major == bound.major
        && cmp_part(version.minor.as_ref(), bound.minor.as_ref())
            .then_with(|| cmp_part(version.patch.as_ref(), bound.patch.as_ref()))
            != Ordering::Less
}

/// `~`: majors and minors must match, then patch must be at least the bound's.
fn tilde_satisfies(version: &ParsedVersion, bound: &ParsedVersion) -> bool {
    version.major == bound.major
        && cmp_part(version.minor.as_ref(), bound.minor.as_ref()) == Ordering::Equal
        && cmp_part(version.patch.as_ref(), bound.patch.as_ref()) != Ordering::Less
}

/// Check whether `version` satisfies `range`.
///
/// A universal-accept range returns true without parsing `version` at all;
/// otherwise both strings must match the grammar.
pub fn satisfies(version: &str, range: &str) -> Result<bool, ParseError> {
    let range: RangeExpression = range.parse()?;
    if range == RangeExpression::Any {
        return Ok(true);
    }
    Ok(range.satisfies(&version.parse()?))
}

/// True iff `input` is a universal-accept sentinel or matches the version
/// grammar (with an optional leading run of operator characters).
///
/// Broader than [`RangeExpression`] parsing: the grammar puts no meaning on
/// the leading run, so `~>1.2.3` is a valid version string even though it is
/// not a usable range.
pub fn validate(input: &str) -> bool {
    input.parse::<RangeExpression>().is_ok() || input.parse::<ParsedVersion>().is_ok()
}
