use crate::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

/// Is the type of a property value stored in the repository.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum PropertyType {
    String,
    Binary,
    Long,
    Double,
    Decimal,
    Date,
    Boolean,
    Name,
    Path,
    Reference,
    WeakReference,
    Uri,
    Undefined,
}

impl PropertyType {
    /// Returns the upper-case name used for the type in query text.
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Binary => "BINARY",
            Self::Long => "LONG",
            Self::Double => "DOUBLE",
            Self::Decimal => "DECIMAL",
            Self::Date => "DATE",
            Self::Boolean => "BOOLEAN",
            Self::Name => "NAME",
            Self::Path => "PATH",
            Self::Reference => "REFERENCE",
            Self::WeakReference => "WEAKREFERENCE",
            Self::Uri => "URI",
            Self::Undefined => "UNDEFINED",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PropertyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let ty = match s.trim().to_ascii_uppercase().as_str() {
            "STRING" => Self::String,
            "BINARY" => Self::Binary,
            "LONG" => Self::Long,
            "DOUBLE" => Self::Double,
            "DECIMAL" => Self::Decimal,
            "DATE" => Self::Date,
            "BOOLEAN" => Self::Boolean,
            "NAME" => Self::Name,
            "PATH" => Self::Path,
            "REFERENCE" => Self::Reference,
            "WEAKREFERENCE" => Self::WeakReference,
            "URI" => Self::Uri,
            "UNDEFINED" => Self::Undefined,
            _ => return Err(Error::unsupported("property type", s)),
        };
        Ok(ty)
    }
}

/// Is a typed value wrapped by a [`Literal`].
///
/// Doubles compare by their bit pattern so that `Value` can be `Eq` and
/// `Hash`: `NaN` equals itself and `0.0` differs from `-0.0`.
///
/// [`Literal`]: ./struct.Literal.html
#[derive(Clone, Debug)]
pub enum Value {
    String(String),
    Binary(Vec<u8>),
    Long(i64),
    Double(f64),
    Decimal(Decimal),
    Date(DateTime<FixedOffset>),
    Boolean(bool),
    Name(String),
    Path(String),
    Reference(String),
    WeakReference(String),
    Uri(String),
}

impl Value {
    /// Returns the property type of the receiver.
    pub fn property_type(&self) -> PropertyType {
        match self {
            Value::String(_) => PropertyType::String,
            Value::Binary(_) => PropertyType::Binary,
            Value::Long(_) => PropertyType::Long,
            Value::Double(_) => PropertyType::Double,
            Value::Decimal(_) => PropertyType::Decimal,
            Value::Date(_) => PropertyType::Date,
            Value::Boolean(_) => PropertyType::Boolean,
            Value::Name(_) => PropertyType::Name,
            Value::Path(_) => PropertyType::Path,
            Value::Reference(_) => PropertyType::Reference,
            Value::WeakReference(_) => PropertyType::WeakReference,
            Value::Uri(_) => PropertyType::Uri,
        }
    }

    /// Returns the string form of the value, without quotes or type information.
    ///
    /// Binary values are base64 encoded and dates use RFC 3339.
    pub fn as_string(&self) -> String {
        match self {
            Value::String(s)
            | Value::Name(s)
            | Value::Path(s)
            | Value::Reference(s)
            | Value::WeakReference(s)
            | Value::Uri(s) => s.clone(),
            Value::Binary(bytes) => STANDARD.encode(bytes),
            Value::Long(n) => n.to_string(),
            // `{:?}` keeps the fractional part of whole numbers (`3.0`, not `3`).
            Value::Double(n) => format!("{:?}", n),
            Value::Decimal(d) => d.to_string(),
            Value::Date(d) => d.to_rfc3339(),
            Value::Boolean(b) => b.to_string(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b))
            | (Value::Name(a), Value::Name(b))
            | (Value::Path(a), Value::Path(b))
            | (Value::Reference(a), Value::Reference(b))
            | (Value::WeakReference(a), Value::WeakReference(b))
            | (Value::Uri(a), Value::Uri(b)) => a == b,
            (Value::Binary(a), Value::Binary(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.property_type().hash(state);
        match self {
            Value::String(s)
            | Value::Name(s)
            | Value::Path(s)
            | Value::Reference(s)
            | Value::WeakReference(s)
            | Value::Uri(s) => s.hash(state),
            Value::Binary(bytes) => bytes.hash(state),
            Value::Long(n) => n.hash(state),
            Value::Double(n) => n.to_bits().hash(state),
            Value::Decimal(d) => d.hash(state),
            Value::Date(d) => d.hash(state),
            Value::Boolean(b) => b.hash(state),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Long(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Value::Date(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Binary(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::hash_of;

    #[test]
    fn test_property_type_from_str() {
        assert_eq!(PropertyType::Long, "long".parse().unwrap());
        assert_eq!(PropertyType::WeakReference, "WEAKREFERENCE".parse().unwrap());
        assert_eq!(
            Err(Error::UnsupportedSymbol {
                kind: "property type".into(),
                symbol: "INTEGER".into()
            }),
            "INTEGER".parse::<PropertyType>()
        );
    }

    #[test]
    fn test_property_type() {
        assert_eq!(PropertyType::String, Value::from("x").property_type());
        assert_eq!(PropertyType::Long, Value::from(3).property_type());
        assert_eq!(PropertyType::Double, Value::from(3.5).property_type());
        assert_eq!(PropertyType::Path, Value::Path("/a".into()).property_type());
    }

    #[test]
    fn test_eq() {
        assert_eq!(Value::Long(1), Value::Long(1));
        assert_ne!(Value::Long(1), Value::Double(1.0));
        assert_ne!(Value::String("a".into()), Value::Name("a".into()));
        assert_eq!(Value::Double(f64::NAN), Value::Double(f64::NAN));
        assert_ne!(Value::Double(0.0), Value::Double(-0.0));
    }

    #[test]
    fn test_hash() {
        assert_eq!(hash_of(&Value::Long(7)), hash_of(&Value::from(7i64)));
        assert_eq!(
            hash_of(&Value::Decimal(Decimal::new(150, 2))),
            hash_of(&Value::Decimal(Decimal::new(150, 2)))
        );
    }

    #[test]
    fn test_as_string() {
        assert_eq!("3.0", Value::Double(3.0).as_string());
        assert_eq!("1.50", Value::Decimal(Decimal::new(150, 2)).as_string());
        assert_eq!("AQI=", Value::Binary(vec![1, 2]).as_string());
        let date = DateTime::parse_from_rfc3339("2010-01-02T03:04:05+00:00").unwrap();
        assert_eq!("2010-01-02T03:04:05+00:00", Value::Date(date).as_string());
    }
}
