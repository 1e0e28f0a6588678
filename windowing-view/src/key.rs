#[cfg(not(feature = "std"))]
use alloc::collections::BTreeSet;
#[cfg(feature = "std")]
use std::collections::HashSet;

use alloc::string::String;

#[cfg(feature = "std")]
pub(crate) type KeySet<'a> = HashSet<&'a str>;
#[cfg(not(feature = "std"))]
pub(crate) type KeySet<'a> = BTreeSet<&'a str>;

/// Returns the first key that appears more than once, if any.
pub(crate) fn first_duplicate<'a>(
    keys: impl IntoIterator<Item = &'a String>,
) -> Option<&'a str> {
    let mut seen = KeySet::new();
    keys.into_iter()
        .map(String::as_str)
        .find(|&key| !seen.insert(key))
}
