use crate::error::SemaverError;
use crate::version::{Version, VERSION_PART_MAX};
use core::{
    fmt::{self, Display},
    hash::{Hash, Hasher},
    str::FromStr,
};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    // Comparison-clause grammar. Clauses are extracted by pattern search, not
    // full-string matching, so any separating text between clauses is ignored.
    static ref CLAUSE_RE: Regex =
        Regex::new(r"(==|<=|>=|>|<|~|\^)\s*(\d+)(?:\.(\d+)(?:\.(\d+))?)?").unwrap();

    // Dotted wildcard grammar, tried only when no comparison clause is found.
    static ref WILDCARD_RE: Regex =
        Regex::new(r"^(\d+|x|\*)(?:\.(\d+|x|\*)(?:\.(\d+|x|\*))?)?$").unwrap();
}

/// A `VersionRange` is a closed interval `[minimum, maximum]` of [`Version`] values,
/// used as a constraint or selector.
///
/// Ranges are parsed from one of two grammars:
///
/// - comparison clauses (`>=1.2`, `<2`, `==1.2.3`, `^1.2`, `~1.2.3`), one or more per
///   string, applied left to right onto the unconstrained range;
/// - dotted wildcard patterns (`1.2.x`, `1.*`, `*`), where `x` or `*` leaves a
///   positional field unconstrained.
///
/// The empty string, `"*"` and `"x"` all mean the unconstrained range
/// `[0.0.0, 9999.9999.9999]`.
///
/// # Examples
///
/// ```
/// use semaver::prelude::*;
///
/// let range: VersionRange = "1.1.x".parse().unwrap();
/// assert!(range.contains(&"1.1.7".parse::<Version>().unwrap()));
/// assert!(!range.contains("1.2.0"));
/// assert_eq!("==1.1.*", range.to_string());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct VersionRange {
    minimum: Version,
    maximum: Version,
}

impl VersionRange {
    /// Returns the unconstrained range, containing every version.
    pub fn any() -> Self {
        Self {
            minimum: Version::MIN,
            maximum: Version::MAX,
        }
    }

    /// Returns the lower bound (inclusive).
    pub fn minimum(&self) -> Version {
        self.minimum
    }

    /// Returns the upper bound (inclusive).
    pub fn maximum(&self) -> Version {
        self.maximum
    }

    /// Returns true if `item` lies within this range.
    ///
    /// `item` may be a [`Version`], a version string (unparseable strings are never
    /// contained), another [`VersionRange`] (contained when fully nested), or a slice or
    /// vector of any of these (contained when every element is; an empty collection is
    /// vacuously contained).
    pub fn contains<T: InRange + ?Sized>(&self, item: &T) -> bool {
        item.in_range(self)
    }

    /// Returns the integer projection of this range: the sum of the two bounds'
    /// canonical encodings.
    ///
    /// Equality and hashing go through this projection, so distinct bound pairs whose
    /// encodings sum equal compare equal. This matches the historical behavior of the
    /// range type and is relied on by callers; see the equality docs before using it as
    /// a key.
    pub fn encoded(&self) -> u64 {
        self.minimum.encoded() + self.maximum.encoded()
    }

    fn apply_clause(&mut self, caps: &Captures, identifier: &str) -> Result<(), SemaverError> {
        let op = &caps[1];
        let major = clause_component(caps, 2, identifier)?.unwrap_or_default();
        let minor = clause_component(caps, 3, identifier)?;
        let patch = clause_component(caps, 4, identifier)?;

        match op {
            ">" | ">=" => {
                self.minimum.set_major(major)?;
                self.minimum.set_minor(minor.unwrap_or(0))?;
                self.minimum.set_patch(patch.unwrap_or(0))?;
                if op == ">" {
                    self.minimum = self.minimum + 1;
                }
            }
            "<" | "<=" => {
                self.maximum.set_major(major)?;
                self.maximum.set_minor(minor.unwrap_or(0))?;
                self.maximum.set_patch(patch.unwrap_or(0))?;
                if op == "<" {
                    self.maximum = self.maximum - 1;
                }
            }
            "==" => {
                self.minimum.set_major(major)?;
                self.maximum.set_major(major)?;
                if let Some(minor) = minor {
                    self.minimum.set_minor(minor)?;
                    self.maximum.set_minor(minor)?;
                }
                if let Some(patch) = patch {
                    self.minimum.set_patch(patch)?;
                    self.maximum.set_patch(patch)?;
                }
            }
            // compatible-with: pin major on both bounds, constrain only the minimum
            // below it
            "^" => {
                self.minimum.set_major(major)?;
                self.maximum.set_major(major)?;
                self.minimum.set_minor(minor.unwrap_or(0))?;
                self.minimum.set_patch(patch.unwrap_or(0))?;
            }
            // approximately: pin major and minor on both bounds, patch only on the
            // minimum
            "~" => {
                self.minimum.set_major(major)?;
                self.maximum.set_major(major)?;
                self.minimum.set_minor(minor.unwrap_or(0))?;
                self.maximum.set_minor(minor.unwrap_or(0))?;
                self.minimum.set_patch(patch.unwrap_or(0))?;
            }
            _ => unreachable!("clause pattern only extracts known operators"),
        }

        Ok(())
    }

    fn from_wildcard(s: &str) -> Result<Self, SemaverError> {
        let caps =
            WILDCARD_RE
                .captures(s)
                .ok_or_else(|| SemaverError::InvalidVersionRangeIdentifier {
                    identifier: s.to_owned(),
                })?;

        // An absent, `x` or `*` slot keeps the field at its unconstrained default
        // (0 on the minimum, the part maximum on the maximum), independently per field.
        let mut range = Self::any();
        if let Some(major) = wildcard_component(&caps, 1, s)? {
            range.minimum.set_major(major)?;
            range.maximum.set_major(major)?;
        }
        if let Some(minor) = wildcard_component(&caps, 2, s)? {
            range.minimum.set_minor(minor)?;
            range.maximum.set_minor(minor)?;
        }
        if let Some(patch) = wildcard_component(&caps, 3, s)? {
            range.minimum.set_patch(patch)?;
            range.maximum.set_patch(patch)?;
        }
        Ok(range)
    }
}

fn clause_component(
    caps: &Captures,
    index: usize,
    identifier: &str,
) -> Result<Option<u64>, SemaverError> {
    caps.get(index)
        .map(|digits| {
            digits
                .as_str()
                .parse()
                .map_err(|_| SemaverError::InvalidVersionRangeIdentifier {
                    identifier: identifier.to_owned(),
                })
        })
        .transpose()
}

fn wildcard_component(
    caps: &Captures,
    index: usize,
    identifier: &str,
) -> Result<Option<u64>, SemaverError> {
    match caps.get(index).map(|m| m.as_str()) {
        None | Some("x") | Some("*") => Ok(None),
        Some(digits) => digits
            .parse()
            .map(Some)
            .map_err(|_| SemaverError::InvalidVersionRangeIdentifier {
                identifier: identifier.to_owned(),
            }),
    }
}

impl Default for VersionRange {
    fn default() -> Self {
        Self::any()
    }
}

impl FromStr for VersionRange {
    type Err = SemaverError;

    /// Parses a range string: empty/`*`/`x` for the unconstrained range, otherwise the
    /// comparison-clause grammar, falling back to the dotted wildcard grammar when no
    /// clause is found.
    ///
    /// # Errors
    ///
    /// - [`SemaverError::InvalidVersionRangeIdentifier`] if the string matches neither
    ///   grammar, or its clauses leave the minimum above the maximum.
    /// - [`SemaverError::FieldOutOfRange`] if a clause component exceeds
    ///   [`VERSION_PART_MAX`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "*" || s == "x" {
            return Ok(Self::any());
        }

        let mut range = Self::any();
        let mut clause_seen = false;
        for caps in CLAUSE_RE.captures_iter(s) {
            clause_seen = true;
            range.apply_clause(&caps, s)?;
        }

        if clause_seen {
            if range.minimum > range.maximum {
                return Err(SemaverError::InvalidVersionRangeIdentifier {
                    identifier: s.to_owned(),
                });
            }
            return Ok(range);
        }

        Self::from_wildcard(s)
    }
}

impl PartialEq for VersionRange {
    /// Two ranges are equal when their integer projections are equal. Distinct bound
    /// pairs whose encodings sum equal therefore compare equal; see
    /// [`VersionRange::encoded`].
    fn eq(&self, other: &Self) -> bool {
        self.encoded() == other.encoded()
    }
}

impl Eq for VersionRange {}

impl Hash for VersionRange {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.encoded().hash(state);
    }
}

impl Display for VersionRange {
    /// Renders the shortest equivalent range expression: an exact `==` form when the
    /// bounds coincide, `>=` when only the minimum constrains, a wildcard `==` form when
    /// a whole field spans its full domain, and `>=min,<=max` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.minimum == self.maximum {
            return write!(f, "=={}", self.minimum);
        }

        if self.maximum == Version::MAX {
            return write!(f, ">={}", self.minimum);
        }

        if self.minimum.major() == self.maximum.major() {
            if self.minimum.minor() == self.maximum.minor() {
                if self.minimum.patch() == 0 && self.maximum.patch() == VERSION_PART_MAX {
                    return write!(f, "=={}.{}.*", self.minimum.major(), self.minimum.minor());
                }
            } else if self.minimum.minor() == 0
                && self.maximum.minor() == VERSION_PART_MAX
                && self.minimum.patch() == 0
                && self.maximum.patch() == VERSION_PART_MAX
            {
                return write!(f, "=={}.*", self.minimum.major());
            }
        }

        write!(f, ">={},<={}", self.minimum, self.maximum)
    }
}

/// Containment against a [`VersionRange`].
///
/// Implemented by [`Version`] (interval membership), [`VersionRange`] (full nesting),
/// `str` (parse then test), and slices/vectors of implementors (all elements contained,
/// vacuously true when empty). [`VersionRange::contains`] is the usual entry point.
pub trait InRange {
    /// Returns true if `self` lies within `range`.
    fn in_range(&self, range: &VersionRange) -> bool;
}

impl InRange for Version {
    fn in_range(&self, range: &VersionRange) -> bool {
        range.minimum <= *self && *self <= range.maximum
    }
}

impl InRange for VersionRange {
    fn in_range(&self, range: &VersionRange) -> bool {
        range.minimum <= self.minimum && range.maximum >= self.maximum
    }
}

impl InRange for str {
    /// Parses `self` as a version first; strings that do not parse are never in range.
    fn in_range(&self, range: &VersionRange) -> bool {
        self.parse::<Version>()
            .map_or(false, |version| version.in_range(range))
    }
}

impl<T: InRange> InRange for [T] {
    fn in_range(&self, range: &VersionRange) -> bool {
        self.iter().all(|item| item.in_range(range))
    }
}

impl<T: InRange> InRange for Vec<T> {
    fn in_range(&self, range: &VersionRange) -> bool {
        self.as_slice().in_range(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn r(s: &str) -> VersionRange {
        s.parse().unwrap()
    }

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[rstest]
    #[case("", "*")]
    #[case("*", "x")]
    #[case("x", ">=0")]
    #[case(">=0", "<=9999.9999.9999")]
    #[case("1", "1.*")]
    #[case("1.*", "1.x")]
    #[case("1.x", "^1")]
    #[case("^1", "==1")]
    #[case("1.0", "1.0.*")]
    #[case("1.0.*", "1.0.x")]
    #[case("1.0.x", "~1.0")]
    fn test_equivalent_forms(#[case] left: &str, #[case] right: &str) {
        assert_eq!(r(left), r(right));
    }

    #[test]
    fn test_unconstrained_bounds() {
        let range = VersionRange::any();
        assert_eq!(Version::MIN, range.minimum());
        assert_eq!(Version::MAX, range.maximum());
        assert_eq!(range, VersionRange::default());
    }

    #[rstest]
    #[case(">=1.2", "1.2.0", "9999.9999.9999")]
    #[case(">1.2.3", "1.2.4", "9999.9999.9999")]
    #[case("<=2.1", "0.0.0", "2.1.0")]
    #[case("<2", "0.0.0", "1.9999.9999")]
    #[case("==1.2.3", "1.2.3", "1.2.3")]
    #[case("==1.2", "1.2.0", "1.2.9999")]
    #[case("^1.2", "1.2.0", "1.9999.9999")]
    #[case("^1.2.3", "1.2.3", "1.9999.9999")]
    #[case("~1.2", "1.2.0", "1.2.9999")]
    #[case("~1.2.3", "1.2.3", "1.2.9999")]
    #[case(">=1.2,<2", "1.2.0", "1.9999.9999")]
    #[case("1.2.x", "1.2.0", "1.2.9999")]
    #[case("1.x.3", "1.0.3", "1.9999.3")]
    #[case("x.2", "0.2.0", "9999.2.9999")]
    fn test_parsed_bounds(#[case] input: &str, #[case] minimum: &str, #[case] maximum: &str) {
        let range = r(input);
        assert_eq!(v(minimum), range.minimum());
        assert_eq!(v(maximum), range.maximum());
    }

    #[test]
    fn test_later_clauses_overwrite_earlier() {
        assert_eq!(v("2.0.0"), r(">=1,>=2").minimum());
        assert_eq!(v("3.1.0"), r(">=1 >=3.1").minimum());
    }

    #[test]
    fn test_contains_version() {
        let wide = r("1.x");
        let narrow = r("1.1.x");

        for version in ["1", "1.1", "1.1.1", "1.9999.9999"] {
            assert!(wide.contains(&v(version)));
        }
        assert!(!wide.contains(&v("2")));

        assert!(!narrow.contains(&v("1")));
        assert!(narrow.contains(&v("1.1")));
        assert!(narrow.contains(&v("1.1.1")));
        assert!(!narrow.contains(&v("1.2")));
    }

    #[test]
    fn test_contains_str() {
        let range = r("^2.3");
        assert!(range.contains("2.3.0"));
        assert!(range.contains("2.9999.9999"));
        assert!(!range.contains("3.0.0"));
        // unparseable strings are never in range
        assert!(!range.contains("not-a-version"));
    }

    #[test]
    fn test_contains_range_nesting() {
        let outer = r(">=1,<=3");
        assert!(outer.contains(&r("==2")));
        assert!(outer.contains(&outer));
        assert!(!outer.contains(&r(">=2,<=4")));
        assert!(!VersionRange::any().in_range(&outer));
        assert!(outer.in_range(&VersionRange::any()));
    }

    #[test]
    fn test_contains_collection() {
        let range = r("1.x");
        let inside = vec![v("1.0.1"), v("1.2"), v("1.9999.0")];
        let mixed = vec![v("1.0.1"), v("2.0.0")];

        assert!(range.contains(&inside));
        assert!(range.contains(inside.as_slice()));
        assert!(!range.contains(&mixed));
    }

    /// An empty collection is vacuously contained.
    #[test]
    fn test_contains_empty_collection() {
        let none: Vec<Version> = Vec::new();
        assert!(r("1.x").contains(&none));
    }

    #[rstest]
    #[case("1.0.0", "==1.0.0")]
    #[case(">1.2.3,<3.2.1", ">=1.2.4,<=3.2.0")]
    #[case(">=1.2", ">=1.2.0")]
    #[case("1.0", "==1.0.*")]
    #[case("1", "==1.*")]
    #[case("*", ">=0.0.0")]
    #[case(">=1.2,<2", ">=1.2.0,<=1.9999.9999")]
    fn test_canonical_rendering(#[case] input: &str, #[case] rendered: &str) {
        assert_eq!(rendered, r(input).to_string());
    }

    #[test]
    fn test_rendering_round_trips() {
        for input in ["", "1", "1.0", "1.2.3", ">=1.2,<2", ">1.2.3,<3.2.1", "~2.4"] {
            let range = r(input);
            assert_eq!(range, r(&range.to_string()));
        }
    }

    #[rstest]
    #[case("<1,>2")]
    #[case("a.b.c")]
    #[case("1.2.3.4")]
    #[case("one")]
    fn test_invalid_range_identifiers(#[case] identifier: &str) {
        let parsed = identifier.parse::<VersionRange>();
        assert_eq!(
            Err(SemaverError::InvalidVersionRangeIdentifier {
                identifier: identifier.to_owned(),
            }),
            parsed,
        );
    }

    #[test]
    fn test_clause_component_out_of_range() {
        assert!(matches!(
            ">=10000".parse::<VersionRange>(),
            Err(SemaverError::FieldOutOfRange { field: "major", .. })
        ));
    }

    /// Equality goes through the summed projection, so distinct bound pairs with equal
    /// sums compare equal. Historical behavior, pinned here on purpose.
    #[test]
    fn test_projection_equality_collision() {
        assert_eq!(r(">=1,<=3"), r("==2.0.0"));
        assert_eq!(
            r(">=1,<=3").encoded(),
            v("1").encoded() + v("3").encoded(),
        );
    }
}
