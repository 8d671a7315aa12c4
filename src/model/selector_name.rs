use crate::{tools::non_empty, Result};
use std::{fmt, sync::Arc};

/// Is the symbolic name of a selector (or of its alias).
///
/// A `SelectorName` is never empty. Cloning one is cheap, so names are freely
/// copied between the nodes that reference the same selector.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectorName(Arc<str>);

impl SelectorName {
    /// Creates a new selector name, failing if `name` is blank.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = non_empty("name", name)?;
        Ok(Self(name.into()))
    }

    /// Creates a name that is known to be valid.
    pub(crate) fn reserved(name: &'static str) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SelectorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SelectorName({:?})", &*self.0)
    }
}

impl fmt::Display for SelectorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SelectorName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Is the trait of types that can be turned into a [`SelectorName`].
///
/// Node constructors accept anything implementing this trait, so callers may
/// pass either an already validated name or a plain string to be validated.
pub trait IntoSelectorName {
    /// Consumes the receiver and returns a validated selector name.
    fn into_selector_name(self) -> Result<SelectorName>;
}

impl IntoSelectorName for SelectorName {
    fn into_selector_name(self) -> Result<SelectorName> {
        Ok(self)
    }
}

impl IntoSelectorName for &SelectorName {
    fn into_selector_name(self) -> Result<SelectorName> {
        Ok(self.clone())
    }
}

impl IntoSelectorName for &str {
    fn into_selector_name(self) -> Result<SelectorName> {
        SelectorName::new(self)
    }
}

impl IntoSelectorName for String {
    fn into_selector_name(self) -> Result<SelectorName> {
        SelectorName::new(self)
    }
}
