use crate::error::SemaverError;
use core::{
    cmp::Ordering,
    fmt::{self, Display},
    hash::{Hash, Hasher},
    ops::{Add, Sub},
    str::FromStr,
};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// The largest value a single version component can hold.
pub const VERSION_PART_MAX: u64 = 9999;

// Each component occupies a fixed 4-decimal-digit field in the integer encoding, so
// integer comparison is equivalent to lexicographic (major, minor, patch) comparison.
const FIELD: u64 = VERSION_PART_MAX + 1;

lazy_static! {
    static ref VERSION_RE: Regex = Regex::new(r"^(\d+)(?:\.(\d+)(?:\.(\d+))?)?$").unwrap();
}

/// A `Version` is a point release: a triple of `major`, `minor` and `patch` components,
/// each between 0 and [`VERSION_PART_MAX`].
///
/// Versions are parsed from `major[.minor[.patch]]` strings, where omitted trailing
/// components default to zero. They order, hash and do arithmetic through a single
/// integer encoding in which each component occupies a 4-decimal-digit field (see
/// [`Version::encoded`]).
///
/// # Examples
///
/// ```
/// use semaver::prelude::*;
///
/// let version: Version = "1.2.3".parse().unwrap();
/// assert_eq!("1.2.3", version.to_string());
/// assert_eq!(100020003, version.encoded());
/// assert!(version > "1.2".parse::<Version>().unwrap());
/// ```
///
/// Trailing components default to zero, so short forms compare equal to long ones:
///
/// ```
/// use semaver::Version;
///
/// let version: Version = "1".parse().unwrap();
/// assert_eq!(version, "1.0.0");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
}

impl Version {
    /// The smallest version, `0.0.0`.
    pub const MIN: Version = Version {
        major: 0,
        minor: 0,
        patch: 0,
    };

    /// The largest version, `9999.9999.9999`.
    pub const MAX: Version = Version {
        major: VERSION_PART_MAX,
        minor: VERSION_PART_MAX,
        patch: VERSION_PART_MAX,
    };

    /// Returns a new version from its three components.
    ///
    /// # Errors
    ///
    /// Returns a [`SemaverError::FieldOutOfRange`] if any component exceeds
    /// [`VERSION_PART_MAX`].
    pub fn new(major: u64, minor: u64, patch: u64) -> Result<Self, SemaverError> {
        let mut version = Self::default();
        version.set_major(major)?;
        version.set_minor(minor)?;
        version.set_patch(patch)?;
        Ok(version)
    }

    /// Returns the version whose canonical encoding is `encoded`.
    ///
    /// The integer is split into three 4-decimal-digit fields: `major` from digits 9-12,
    /// `minor` from digits 5-8 and `patch` from the last four. Values beyond the
    /// 12-digit encoding space are truncated by the field split, never rejected.
    pub fn from_encoded(encoded: u64) -> Self {
        Self {
            major: encoded / (FIELD * FIELD) % FIELD,
            minor: encoded / FIELD % FIELD,
            patch: encoded % FIELD,
        }
    }

    /// Returns the major component.
    pub fn major(&self) -> u64 {
        self.major
    }

    /// Returns the minor component.
    pub fn minor(&self) -> u64 {
        self.minor
    }

    /// Returns the patch component.
    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// Sets the major component.
    ///
    /// # Errors
    ///
    /// Returns a [`SemaverError::FieldOutOfRange`] if `value` exceeds
    /// [`VERSION_PART_MAX`].
    pub fn set_major(&mut self, value: u64) -> Result<(), SemaverError> {
        self.major = checked_component("major", value)?;
        Ok(())
    }

    /// Sets the minor component. Errors like [`Version::set_major`].
    pub fn set_minor(&mut self, value: u64) -> Result<(), SemaverError> {
        self.minor = checked_component("minor", value)?;
        Ok(())
    }

    /// Sets the patch component. Errors like [`Version::set_major`].
    pub fn set_patch(&mut self, value: u64) -> Result<(), SemaverError> {
        self.patch = checked_component("patch", value)?;
        Ok(())
    }

    /// Returns the canonical integer encoding,
    /// `major * 10^8 + minor * 10^4 + patch`.
    ///
    /// Equal versions encode equal, and encoding order is version order.
    pub fn encoded(&self) -> u64 {
        (self.major * FIELD + self.minor) * FIELD + self.patch
    }
}

fn checked_component(field: &'static str, value: u64) -> Result<u64, SemaverError> {
    if value > VERSION_PART_MAX {
        return Err(SemaverError::FieldOutOfRange {
            field,
            value,
            max: VERSION_PART_MAX,
        });
    }
    Ok(value)
}

impl FromStr for Version {
    type Err = SemaverError;

    /// Parses a `major[.minor[.patch]]` string. Omitted trailing components default to
    /// zero.
    ///
    /// # Errors
    ///
    /// - [`SemaverError::InvalidVersionIdentifier`] if the string does not match the
    ///   version grammar.
    /// - [`SemaverError::FieldOutOfRange`] if a component parses but exceeds
    ///   [`VERSION_PART_MAX`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = VERSION_RE
            .captures(s)
            .ok_or_else(|| SemaverError::InvalidVersionIdentifier {
                identifier: s.to_owned(),
            })?;

        let mut version = Self::default();
        version.set_major(component(&caps, 1, s)?)?;
        version.set_minor(component(&caps, 2, s)?)?;
        version.set_patch(component(&caps, 3, s)?)?;
        Ok(version)
    }
}

fn component(caps: &Captures, index: usize, identifier: &str) -> Result<u64, SemaverError> {
    match caps.get(index) {
        Some(digits) => {
            digits
                .as_str()
                .parse()
                .map_err(|_| SemaverError::InvalidVersionIdentifier {
                    identifier: identifier.to_owned(),
                })
        }
        None => Ok(0),
    }
}

impl Display for Version {
    /// Renders all three components, `{major}.{minor}.{patch}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl From<Version> for u64 {
    fn from(version: Version) -> Self {
        version.encoded()
    }
}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.encoded().hash(state);
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.encoded().cmp(&other.encoded())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq<u64> for Version {
    fn eq(&self, other: &u64) -> bool {
        self.encoded() == *other
    }
}

impl PartialEq<Version> for u64 {
    fn eq(&self, other: &Version) -> bool {
        *self == other.encoded()
    }
}

impl PartialEq<&str> for Version {
    /// A version equals a string if the string parses to the same version. Unparseable
    /// strings compare unequal.
    fn eq(&self, other: &&str) -> bool {
        other.parse::<Version>().map_or(false, |v| *self == v)
    }
}

impl PartialEq<Version> for &str {
    fn eq(&self, other: &Version) -> bool {
        other == self
    }
}

impl PartialOrd<u64> for Version {
    fn partial_cmp(&self, other: &u64) -> Option<Ordering> {
        Some(self.encoded().cmp(other))
    }
}

impl PartialOrd<&str> for Version {
    /// Orders against a version literal. Returns `None` if the string does not parse.
    fn partial_cmp(&self, other: &&str) -> Option<Ordering> {
        other.parse::<Version>().ok().map(|v| self.cmp(&v))
    }
}

impl Add for Version {
    type Output = Version;

    /// Adds the two canonical encodings and decodes the sum. This is not component-wise:
    /// a patch sum past [`VERSION_PART_MAX`] carries into the minor field.
    fn add(self, rhs: Version) -> Version {
        Version::from_encoded(self.encoded() + rhs.encoded())
    }
}

impl Add<u64> for Version {
    type Output = Version;

    fn add(self, rhs: u64) -> Version {
        Version::from_encoded(self.encoded().saturating_add(rhs))
    }
}

impl Sub for Version {
    type Output = Version;

    /// Subtracts the canonical encodings and decodes the difference, saturating at
    /// `0.0.0` when the right operand is the larger version.
    fn sub(self, rhs: Version) -> Version {
        Version::from_encoded(self.encoded().saturating_sub(rhs.encoded()))
    }
}

impl Sub<u64> for Version {
    type Output = Version;

    fn sub(self, rhs: u64) -> Version {
        Version::from_encoded(self.encoded().saturating_sub(rhs))
    }
}
