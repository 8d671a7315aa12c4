use crate::{Error, Result};
use fnv::FnvHasher;
use std::hash::{Hash, Hasher};

/// Computes the hash code that composite nodes store at construction.
///
/// `FnvHasher` has no random state, so equal inputs hash equal across
/// processes as well as within one.
pub(crate) fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = FnvHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Returns `value` as an owned string, or an error naming `argument` if it is blank.
pub(crate) fn non_empty(argument: &str, value: impl Into<String>) -> Result<String> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(Error::empty(argument));
    }
    Ok(value)
}

/// Like [`non_empty`] for optional arguments: `None` stays `None`.
pub(crate) fn non_empty_opt(argument: &str, value: Option<impl Into<String>>) -> Result<Option<String>> {
    value.map(|v| non_empty(argument, v)).transpose()
}
