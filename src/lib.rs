//! # semaver
//!
//! A library for parsing, comparing and range-matching dotted semantic versions.
//!
//! Versions are `major[.minor[.patch]]` triples with each component between 0 and 9999.
//! They compare, hash and do arithmetic through a single canonical integer encoding in
//! which each component occupies a fixed 4-decimal-digit field. Ranges are closed
//! intervals of versions, parsed from comparison-operator expressions or dotted
//! wildcard patterns, and re-rendered in their shortest equivalent form.
//!
//! ## Examples
//!
//! Parse versions and test them against a range:
//!
//! ```
//! use semaver::prelude::*;
//!
//! let range: VersionRange = "^1.2".parse().unwrap();
//!
//! assert!(range.contains("1.2.0"));
//! assert!(range.contains("1.9.7"));
//! assert!(!range.contains("2.0.0"));
//! ```
//!
//! Range expressions combine comparison clauses, and re-serialize canonically:
//!
//! ```
//! use semaver::VersionRange;
//!
//! let range: VersionRange = ">1.2.3,<3.2.1".parse().unwrap();
//! assert_eq!(">=1.2.4,<=3.2.0", range.to_string());
//! ```
//!
//! Pick the newest version that satisfies a constraint:
//!
//! ```
//! use semaver::prelude::*;
//!
//! let versions: Vec<Version> = ["1.2.3", "1.4.0", "2.0.1"]
//!     .iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//! let range: VersionRange = "1.x".parse().unwrap();
//!
//! assert_eq!(Some("1.4.0".parse().unwrap()), latest(&versions, Some(&range)));
//! ```
//!
//! ## Grammars
//!
//! Two range grammars are supported:
//!
//! - **Comparison clauses**: one or more of `==`, `<=`, `>=`, `<`, `>`, `~`, `^`
//!   followed by a version, applied left to right (`>=1.2,<2`, `^1.2.3`, `~2.4`).
//! - **Dotted wildcards**: up to three positional tokens where `x` or `*` (or an
//!   omitted trailing token) leaves the field unconstrained (`1.2.x`, `1.*`, `*`).
//!
//! The empty string, `"*"` and `"x"` denote the unconstrained range.
#![warn(missing_docs)]

mod error;
mod range;
mod select;
mod version;

pub use crate::error::SemaverError;
pub use crate::range::{InRange, VersionRange};
pub use crate::select::latest;
pub use crate::version::{Version, VERSION_PART_MAX};

/// A convenience module appropriate for glob imports (`use semaver::prelude::*;`).
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::latest;
    #[doc(no_inline)]
    pub use crate::InRange;
    #[doc(no_inline)]
    pub use crate::SemaverError;
    #[doc(no_inline)]
    pub use crate::Version;
    #[doc(no_inline)]
    pub use crate::VersionRange;
    #[doc(no_inline)]
    pub use crate::VERSION_PART_MAX;
}
