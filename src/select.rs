use crate::range::VersionRange;
use crate::version::Version;

/// Returns the latest version among `versions`, optionally restricted to a range.
///
/// Returns `None` when the input is empty or, with a range, when nothing matches.
///
/// # Examples
///
/// ```
/// use semaver::prelude::*;
///
/// let versions: Vec<Version> = vec!["1.2.3".parse().unwrap(), "4.5.6".parse().unwrap()];
///
/// assert_eq!(Some("4.5.6".parse().unwrap()), latest(&versions, None));
///
/// let range: VersionRange = "1".parse().unwrap();
/// assert_eq!(Some("1.2.3".parse().unwrap()), latest(&versions, Some(&range)));
/// ```
pub fn latest<'a, I>(versions: I, range: Option<&VersionRange>) -> Option<Version>
where
    I: IntoIterator<Item = &'a Version>,
{
    versions
        .into_iter()
        .copied()
        .filter(|version| range.map_or(true, |r| r.contains(version)))
        .max()
}
