use super::{IntoSelectorName, SelectorName};
use crate::{tools::non_empty, Result};

/// Is a column of the rows a query returns: either one property of a
/// selector's nodes or all of them.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Column {
    selector_name: SelectorName,
    property_name: Option<String>,
    column_name: Option<String>,
}

impl Column {
    /// Creates a column for every property of the selector's nodes.
    pub fn all(selector_name: impl IntoSelectorName) -> Result<Self> {
        Ok(Self {
            selector_name: selector_name.into_selector_name()?,
            property_name: None,
            column_name: None,
        })
    }

    /// Creates a column named after the property.
    pub fn new(selector_name: impl IntoSelectorName, property_name: impl Into<String>) -> Result<Self> {
        let property_name = non_empty("property_name", property_name)?;
        Ok(Self {
            selector_name: selector_name.into_selector_name()?,
            column_name: Some(property_name.clone()),
            property_name: Some(property_name),
        })
    }

    /// Creates a column for the property, returned under `column_name`.
    pub fn named(
        selector_name: impl IntoSelectorName,
        property_name: impl Into<String>,
        column_name: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            selector_name: selector_name.into_selector_name()?,
            property_name: Some(non_empty("property_name", property_name)?),
            column_name: Some(non_empty("column_name", column_name)?),
        })
    }

    #[inline(always)]
    pub fn selector_name(&self) -> &SelectorName {
        &self.selector_name
    }

    /// Returns the property of the column, or `None` if it stands for all properties.
    #[inline(always)]
    pub fn property_name(&self) -> Option<&str> {
        self.property_name.as_deref()
    }

    #[inline(always)]
    pub fn column_name(&self) -> Option<&str> {
        self.column_name.as_deref()
    }

    /// Returns true if the column is returned under a name other than its property's.
    pub fn is_renamed(&self) -> bool {
        self.property_name.is_some() && self.column_name != self.property_name
    }
}

visitable!(Column);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all() {
        let column = Column::all("c").unwrap();
        assert_eq!(None, column.property_name());
        assert_eq!(None, column.column_name());
        assert!(!column.is_renamed());
    }

    #[test]
    fn test_new() {
        let column = Column::new("c", "year").unwrap();
        assert_eq!(Some("year"), column.column_name());
        assert!(!column.is_renamed());
        assert!(Column::new("c", "").is_err());
    }

    #[test]
    fn test_named() {
        let column = Column::named("c", "car:year", "year").unwrap();
        assert!(column.is_renamed());
        assert_ne!(column, Column::new("c", "car:year").unwrap());
        assert!(Column::named("c", "car:year", "").is_err());
    }
}
