//! Since/until compatibility windows.

use std::fmt;

use serde::{Deserialize, Serialize};

use plugspec_catalog::version::parse_component;
use plugspec_catalog::BuildVersion;

/// Upper bound of a compatibility range.
///
/// `Open` is the "no upper bound" sentinel. It is deliberately distinct
/// from a wildcard such as `241.*`: the host's own compatibility checks
/// decide the practical upper bound, so nothing here goes stale when new
/// branches ship.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum UntilBuild {
    #[default]
    Open,
    /// An explicit bound, kept exactly as supplied.
    Bound(String),
}

impl UntilBuild {
    pub fn bound(until: impl Into<String>) -> Self {
        Self::from(Some(until.into()))
    }

    pub fn is_open(&self) -> bool {
        matches!(self, UntilBuild::Open)
    }

    pub fn as_bound(&self) -> Option<&str> {
        match self {
            UntilBuild::Open => None,
            UntilBuild::Bound(s) => Some(s),
        }
    }
}

impl From<Option<String>> for UntilBuild {
    /// `None` and the empty string both mean "open".
    fn from(value: Option<String>) -> Self {
        match value {
            Some(s) if !s.is_empty() => UntilBuild::Bound(s),
            _ => UntilBuild::Open,
        }
    }
}

impl From<UntilBuild> for Option<String> {
    fn from(value: UntilBuild) -> Self {
        match value {
            UntilBuild::Open => None,
            UntilBuild::Bound(s) => Some(s),
        }
    }
}

impl fmt::Display for UntilBuild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UntilBuild::Open => f.write_str("(open)"),
            UntilBuild::Bound(s) => f.write_str(s),
        }
    }
}

/// A bounded `until` value understood by [`CompatibilityRange::admits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpperBound {
    /// `B` or `B.*`: anything on branch `B` or earlier.
    Branch(u32),
    /// `B.N`: builds up to and including `B.N`.
    Build(BuildVersion),
}

fn parse_upper_bound(until: &str) -> Option<UpperBound> {
    match until.split_once('.') {
        None => parse_component(until).ok().map(UpperBound::Branch),
        Some((branch, "*")) => parse_component(branch).ok().map(UpperBound::Branch),
        Some(_) => BuildVersion::parse(until).ok().map(UpperBound::Build),
    }
}

/// The window of host builds a plugin declares compatibility with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompatibilityRange {
    /// Inclusive lower bound: a release branch.
    pub since: u32,
    #[serde(default)]
    pub until: UntilBuild,
}

impl CompatibilityRange {
    /// Whether a concrete host build falls inside this range.
    ///
    /// An `until` that is not of the form `B`, `B.*` or `B.N` admits
    /// nothing; it is never guessed at.
    pub fn admits(&self, host: &BuildVersion) -> bool {
        if host.branch < self.since {
            return false;
        }
        let Some(until) = self.until.as_bound() else {
            return true;
        };
        match parse_upper_bound(until) {
            Some(UpperBound::Branch(branch)) => host.branch <= branch,
            Some(UpperBound::Build(build)) => *host <= build,
            None => false,
        }
    }

    /// Whether at least one host build can fall inside this range.
    ///
    /// False for a malformed `until` and for one whose branch precedes
    /// `since`.
    pub fn admits_any(&self) -> bool {
        let Some(until) = self.until.as_bound() else {
            return true;
        };
        match parse_upper_bound(until) {
            Some(UpperBound::Branch(branch)) => branch >= self.since,
            Some(UpperBound::Build(build)) => build.branch >= self.since,
            None => false,
        }
    }

    /// Whether the explicit `until`, if any, is in a recognized form.
    pub fn until_is_well_formed(&self) -> bool {
        self.until
            .as_bound()
            .map_or(true, |until| parse_upper_bound(until).is_some())
    }
}

impl fmt::Display for CompatibilityRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.since, self.until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(since: u32, until: UntilBuild) -> CompatibilityRange {
        CompatibilityRange { since, until }
    }

    #[test]
    fn empty_string_is_open() {
        assert_eq!(UntilBuild::bound(""), UntilBuild::Open);
        assert_eq!(UntilBuild::bound("242.*"), UntilBuild::Bound("242.*".into()));
    }

    #[test]
    fn open_admits_everything_from_since() {
        let r = range(241, UntilBuild::Open);
        assert!(r.admits(&BuildVersion::new(241, 0)));
        assert!(r.admits(&BuildVersion::new(999, 1)));
        assert!(!r.admits(&BuildVersion::new(233, 15026)));
    }

    #[test]
    fn wildcard_bound_is_inclusive_of_branch() {
        let r = range(241, UntilBuild::bound("242.*"));
        assert!(r.admits(&BuildVersion::new(242, 99999)));
        assert!(!r.admits(&BuildVersion::new(243, 1)));
    }

    #[test]
    fn bare_branch_bound() {
        let r = range(241, UntilBuild::bound("241"));
        assert!(r.admits(&BuildVersion::new(241, 5)));
        assert!(!r.admits(&BuildVersion::new(242, 0)));
    }

    #[test]
    fn exact_build_bound() {
        let r = range(241, UntilBuild::bound("242.100"));
        assert!(r.admits(&BuildVersion::new(242, 100)));
        assert!(!r.admits(&BuildVersion::new(242, 101)));
    }

    #[test]
    fn unrecognized_bound_admits_nothing() {
        let r = range(241, UntilBuild::bound("someday"));
        assert!(!r.admits(&BuildVersion::new(241, 1)));
        assert!(!r.until_is_well_formed());
        assert!(range(241, UntilBuild::Open).until_is_well_formed());
    }

    #[test]
    fn until_before_since_admits_nothing() {
        let inverted = range(241, UntilBuild::bound("233.*"));
        assert!(inverted.until_is_well_formed());
        assert!(!inverted.admits_any());
        assert!(!inverted.admits(&BuildVersion::new(241, 1)));
        assert!(!range(241, UntilBuild::bound("233.15026")).admits_any());

        assert!(range(241, UntilBuild::bound("241")).admits_any());
        assert!(range(241, UntilBuild::bound("241.0")).admits_any());
        assert!(range(241, UntilBuild::Open).admits_any());
        assert!(!range(241, UntilBuild::bound("someday")).admits_any());
    }

    #[test]
    fn open_serializes_as_null() {
        let json = serde_json::to_string(&range(241, UntilBuild::Open)).unwrap();
        assert_eq!(json, r#"{"since":241,"until":null}"#);
        let back: CompatibilityRange = serde_json::from_str(&json).unwrap();
        assert!(back.until.is_open());
    }

    #[test]
    fn display() {
        assert_eq!(range(241, UntilBuild::Open).to_string(), "241 .. (open)");
        assert_eq!(range(241, UntilBuild::bound("242.*")).to_string(), "241 .. 242.*");
    }
}
