use super::DynamicOperand;
use crate::{Error, Result};
use std::{fmt, str::FromStr};

/// Is the direction of an [`Ordering`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Order {
    Ascending,
    Descending,
}

impl Order {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }

    /// Returns the opposite direction.
    pub fn reverse(&self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::Ascending
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Order {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" | "ASCENDING" | "JCR.ORDER.ASCENDING" => Ok(Self::Ascending),
            "DESC" | "DESCENDING" | "JCR.ORDER.DESCENDING" => Ok(Self::Descending),
            _ => Err(Error::unsupported("order", s)),
        }
    }
}

/// Is the sort key of the rows of a query.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Ordering {
    operand: DynamicOperand,
    order: Order,
}

impl Ordering {
    pub fn new(operand: impl Into<DynamicOperand>, order: Order) -> Self {
        Self {
            operand: operand.into(),
            order,
        }
    }

    pub fn ascending(operand: impl Into<DynamicOperand>) -> Self {
        Self::new(operand, Order::Ascending)
    }

    pub fn descending(operand: impl Into<DynamicOperand>) -> Self {
        Self::new(operand, Order::Descending)
    }

    #[inline(always)]
    pub fn operand(&self) -> &DynamicOperand {
        &self.operand
    }

    #[inline(always)]
    pub fn order(&self) -> Order {
        self.order
    }
}

visitable!(Ordering);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyValue;

    #[test]
    fn test_order_from_str() {
        assert_eq!(Order::Descending, "desc".parse().unwrap());
        assert_eq!(Order::Ascending, "jcr.order.ascending".parse().unwrap());
        assert!("UP".parse::<Order>().is_err());
        assert_eq!(Order::Ascending, Order::Descending.reverse());
    }

    #[test]
    fn test_ordering() {
        let year = PropertyValue::new("c", "year").unwrap();
        let ordering = Ordering::descending(year.clone());
        assert_eq!(Order::Descending, ordering.order());
        assert_ne!(ordering, Ordering::ascending(year.clone()));
        assert_eq!(ordering, Ordering::new(year, Order::Descending));
    }
}
