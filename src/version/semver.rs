//! Version grammar parser and precedence comparator
//!
//! Accepted grammar (case-insensitive): an optional leading run of
//! `v ^ ~ < > =` characters (stripped), required major digits, optional
//! `.minor` and `.patch` (digits or a `x`/`X`/`*` wildcard), and, only when
//! the full `major.minor.patch` core is present, an optional `-prerelease`
//! (dot-separated `[0-9A-Za-z-]+` identifiers) and an optional `+build`
//! suffix. Build metadata is kept verbatim and ignored by every comparison.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::version::error::ParseError;

/// Characters that may prefix a version inside a range string.
/// They carry no meaning for the version itself and are stripped.
const PREFIX_CHARS: &[char] = &['v', 'V', '^', '~', '<', '>', '='];

/// A minor or patch component: an explicit number or a wildcard marker.
///
/// A wildcard position compares equal to any component, so `1.x` satisfies
/// both `~1.2.0` and `~1.9.0`; later positions still compare normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Number(u64),
    Wildcard,
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Number(n) => write!(f, "{n}"),
            Part::Wildcard => write!(f, "x"),
        }
    }
}

/// A prerelease identifier, classified once at parse time.
///
/// Numeric identifiers sort below textual ones at the same position
/// (`1.0.0-1` < `1.0.0-alpha`); within a kind the comparison is numeric or
/// lexicographic respectively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Numeric(u64),
    Textual(String),
}

impl Identifier {
    /// Classify a raw token: numeric iff it parses entirely as an unsigned
    /// integer, textual otherwise.
    pub fn from_token(token: &str) -> Self {
        match token.parse::<u64>() {
            Ok(n) => Identifier::Numeric(n),
            Err(_) => Identifier::Textual(token.to_string()),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{n}"),
            Identifier::Textual(s) => write!(f, "{s}"),
        }
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Identifier::Numeric(a), Identifier::Numeric(b)) => a.cmp(b),
            (Identifier::Numeric(_), Identifier::Textual(_)) => Ordering::Less,
            (Identifier::Textual(_), Identifier::Numeric(_)) => Ordering::Greater,
            (Identifier::Textual(a), Identifier::Textual(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A version parsed from the grammar above.
///
/// Missing minor/patch components stay `None` so shorthand ranges can
/// distinguish `1` from `1.0.0`; numeric comparison treats them as 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVersion {
    pub major: u64,
    pub minor: Option<Part>,
    pub patch: Option<Part>,
    pub prerelease: Vec<Identifier>,
    pub build: Option<String>,
}

impl ParsedVersion {
    /// Compare two versions by precedence:
    /// major, minor, patch numerically (absent = 0, a wildcard position
    /// compares equal while later positions still compare), then prerelease
    /// rules on equal cores: a prerelease sorts
    /// below its release, sequences compare pairwise with the shorter one
    /// sorting lower. Build metadata never participates.
    ///
    /// This is a strict total order over wildcard-free versions.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        let core = self
            .major
            .cmp(&other.major)
            .then_with(|| cmp_part(self.minor.as_ref(), other.minor.as_ref()))
            .then_with(|| cmp_part(self.patch.as_ref(), other.patch.as_ref()));
        if core != Ordering::Equal {
            return core;
        }

        match (self.prerelease.is_empty(), other.prerelease.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => cmp_identifiers(&self.prerelease, &other.prerelease),
        }
    }
}

/// Compare minor/patch components numerically.
/// Absent components count as 0; a wildcard compares equal.
pub(crate) fn cmp_part(a: Option<&Part>, b: Option<&Part>) -> Ordering {
    let a = a.unwrap_or(&Part::Number(0));
    let b = b.unwrap_or(&Part::Number(0));
    match (a, b) {
        (Part::Wildcard, _) | (_, Part::Wildcard) => Ordering::Equal,
        (Part::Number(x), Part::Number(y)) => x.cmp(y),
    }
}

/// Pairwise prerelease comparison, left to right.
/// An exhausted sequence sorts below the longer one.
fn cmp_identifiers(a: &[Identifier], b: &[Identifier]) -> Ordering {
    let len = a.len().max(b.len());
    for i in 0..len {
        let ord = match (a.get(i), b.get(i)) {
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => x.cmp(y),
            (None, None) => unreachable!(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Strip the leading prefix run and any `+build` suffix, then split at the
/// first `-` into the dotted core and the raw prerelease text.
fn split_core(s: &str) -> (&str, Option<&str>, Option<&str>) {
    let stripped = s.trim_start_matches(PREFIX_CHARS);
    let (rest, build) = match stripped.split_once('+') {
        Some((rest, build)) => (rest, Some(build)),
        None => (stripped, None),
    };
    match rest.split_once('-') {
        Some((core, pre)) => (core, Some(pre), build),
        None => (rest, None, build),
    }
}

fn parse_part(token: &str, input: &str) -> Result<Part, ParseError> {
    if matches!(token, "x" | "X" | "*") {
        return Ok(Part::Wildcard);
    }
    token
        .parse::<u64>()
        .map(Part::Number)
        .map_err(|_| ParseError::Version(input.to_string()))
}

fn parse_identifier(token: &str, input: &str) -> Result<Identifier, ParseError> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ParseError::Version(input.to_string()));
    }
    Ok(Identifier::from_token(token))
}

impl FromStr for ParsedVersion {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::Version(s.to_string());
        let (core, pre, build) = split_core(s);

        let mut parts = core.split('.');
        let major = parts
            .next()
            .filter(|t| !t.is_empty() && t.chars().all(|c| c.is_ascii_digit()))
            .and_then(|t| t.parse::<u64>().ok())
            .ok_or_else(err)?;
        let minor = parts.next().map(|t| parse_part(t, s)).transpose()?;
        let patch = parts.next().map(|t| parse_part(t, s)).transpose()?;
        if parts.next().is_some() {
            return Err(err());
        }

        // Prerelease and build are only valid after a full core
        if (pre.is_some() || build.is_some()) && (minor.is_none() || patch.is_none()) {
            return Err(err());
        }

        let prerelease = match pre {
            Some(raw) => raw
                .split('.')
                .map(|t| parse_identifier(t, s))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        if let Some(raw) = build {
            let valid = !raw.is_empty()
                && raw.split('.').all(|seg| {
                    !seg.is_empty() && seg.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
                });
            if !valid {
                return Err(err());
            }
        }

        Ok(ParsedVersion {
            major,
            minor,
            patch,
            prerelease,
            build: build.map(|b| b.to_string()),
        })
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        if let Some(minor) = &self.minor {
            write!(f, ".{minor}")?;
        }
        if let Some(patch) = &self.patch {
            write!(f, ".{patch}")?;
        }
        if !self.prerelease.is_empty() {
            write!(f, "-{}", self.prerelease[0])?;
            for ident in &self.prerelease[1..] {
                write!(f, ".{ident}")?;
            }
        }
        if let Some(build) = &self.build {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn v(s: &str) -> ParsedVersion {
        s.parse().unwrap()
    }

    #[rstest]
    #[case("1", 1, None, None)]
    #[case("1.2", 1, Some(Part::Number(2)), None)]
    #[case("1.2.3", 1, Some(Part::Number(2)), Some(Part::Number(3)))]
    #[case("v1.2.3", 1, Some(Part::Number(2)), Some(Part::Number(3)))]
    #[case("V1.2.3", 1, Some(Part::Number(2)), Some(Part::Number(3)))]
    #[case("^1.2.3", 1, Some(Part::Number(2)), Some(Part::Number(3)))]
    #[case(">=10.0.1", 10, Some(Part::Number(0)), Some(Part::Number(1)))]
    #[case("1.x", 1, Some(Part::Wildcard), None)]
    #[case("1.X.3", 1, Some(Part::Wildcard), Some(Part::Number(3)))]
    #[case("1.2.*", 1, Some(Part::Number(2)), Some(Part::Wildcard))]
    fn parse_accepts_core_forms(
        #[case] input: &str,
        #[case] major: u64,
        #[case] minor: Option<Part>,
        #[case] patch: Option<Part>,
    ) {
        let parsed = v(input);
        assert_eq!(parsed.major, major);
        assert_eq!(parsed.minor, minor);
        assert_eq!(parsed.patch, patch);
        assert!(parsed.prerelease.is_empty());
        assert_eq!(parsed.build, None);
    }

    #[test]
    fn parse_classifies_prerelease_identifiers() {
        let parsed = v("1.2.3-alpha.1.x-y");
        assert_eq!(
            parsed.prerelease,
            vec![
                Identifier::Textual("alpha".to_string()),
                Identifier::Numeric(1),
                Identifier::Textual("x-y".to_string()),
            ]
        );
    }

    #[test]
    fn parse_keeps_build_metadata_verbatim() {
        let parsed = v("1.2.3-rc.1+build.5");
        assert_eq!(parsed.build, Some("build.5".to_string()));
        assert_eq!(parsed.prerelease, vec![
            Identifier::Textual("rc".to_string()),
            Identifier::Numeric(1),
        ]);
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("x.2.3")] // wildcard major is not a version
    #[case("1.2.3.4")] // fourth core segment
    #[case("1.2-alpha")] // prerelease requires a full core
    #[case("1+build")] // so does build metadata
    #[case("1.2.3-")]
    #[case("1.2.3-al_pha")]
    #[case("1.2.3+")]
    #[case("1..3")]
    #[case("1.2.3 ")]
    fn parse_rejects_malformed_input(#[case] input: &str) {
        assert!(matches!(
            input.parse::<ParsedVersion>(),
            Err(ParseError::Version(_))
        ));
    }

    #[rstest]
    #[case("1", "1")]
    #[case("1.2", "1.2")]
    #[case("v1.2.3", "1.2.3")]
    #[case("1.x.3", "1.x.3")]
    #[case("1.2.3-alpha.1", "1.2.3-alpha.1")]
    #[case("1.2.3-rc.1+build.5", "1.2.3-rc.1+build.5")]
    fn display_round_trips(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(v(input).to_string(), expected);
    }

    #[rstest]
    #[case("1.2.3", "1.2.3", Ordering::Equal)]
    #[case("2.0.0", "1.9.9", Ordering::Greater)]
    #[case("1.2", "1.2.0", Ordering::Equal)] // absent patch counts as 0
    #[case("1", "1.0.0", Ordering::Equal)]
    #[case("1.0.1", "1.0.0", Ordering::Greater)]
    #[case("1.0.0-alpha", "1.0.0", Ordering::Less)]
    #[case("1.0.0-alpha", "1.0.0-alpha.1", Ordering::Less)]
    #[case("1.0.0-alpha.1", "1.0.0-alpha", Ordering::Greater)]
    #[case("1.0.0-beta", "1.0.0-alpha", Ordering::Greater)]
    #[case("1.0.0-1", "1.0.0-alpha", Ordering::Less)] // numeric below textual
    #[case("1.0.0-alpha.2", "1.0.0-alpha.10", Ordering::Less)]
    #[case("1.0.0+build.1", "1.0.0+build.2", Ordering::Equal)] // build ignored
    #[case("1.0.0-rc.1+a", "1.0.0-rc.1+b", Ordering::Equal)]
    #[case("1.x.9", "1.2.0", Ordering::Greater)] // wildcard minor equalizes, patch still compares
    #[case("1.x.9", "1.2.9", Ordering::Equal)]
    #[case("1.x", "1.2.0", Ordering::Equal)] // absent patch is 0 on both sides
    fn cmp_precedence_orders_versions(
        #[case] left: &str,
        #[case] right: &str,
        #[case] expected: Ordering,
    ) {
        assert_eq!(v(left).cmp_precedence(&v(right)), expected);
    }

    #[test]
    fn cmp_precedence_is_antisymmetric() {
        let versions = ["1.0.0", "1.0.0-alpha", "1.2.3", "2.0.0-rc.1", "2.0.0"];
        for a in versions {
            for b in versions {
                assert_eq!(
                    v(a).cmp_precedence(&v(b)),
                    v(b).cmp_precedence(&v(a)).reverse(),
                    "antisymmetry failed for {a} / {b}"
                );
            }
        }
    }
}
