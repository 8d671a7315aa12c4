use super::{QueryCommand, Value};
use crate::{tools::non_empty, visitor::readable, Result};
use std::hash::{Hash, Hasher};

/// Is a constant value of a query.
///
/// A literal also compares equal to the bare [`Value`] it wraps:
///
/// ```
/// # use qom::{Literal, Value};
/// assert!(Literal::new(2010) == Value::Long(2010));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Literal {
    value: Value,
}

impl Literal {
    pub fn new(value: impl Into<Value>) -> Self {
        Self { value: value.into() }
    }

    #[inline(always)]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl PartialEq<Value> for Literal {
    fn eq(&self, other: &Value) -> bool {
        &self.value == other
    }
}

/// Is a named placeholder bound to a value when the query is executed.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct BindVariableName {
    name: String,
}

impl BindVariableName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: non_empty("name", name)?,
        })
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Is a non-correlated query whose results are used as values.
///
/// Two subqueries are equal when their commands are equal or, failing that,
/// when they render to the same text. Subqueries parsed separately from the
/// same text therefore compare equal even if their trees differ in ways the
/// text does not show.
#[derive(Clone, Debug)]
pub struct Subquery {
    command: QueryCommand,
    text: String,
}

impl Subquery {
    pub fn new(command: impl Into<QueryCommand>) -> Self {
        let command = command.into();
        let text = readable(&command);
        Self { command, text }
    }

    #[inline(always)]
    pub fn query(&self) -> &QueryCommand {
        &self.command
    }
}

impl PartialEq for Subquery {
    fn eq(&self, other: &Self) -> bool {
        self.command == other.command || self.text == other.text
    }
}

impl Eq for Subquery {}

impl Hash for Subquery {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

/// Is an operand whose value is known before the query is executed.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum StaticOperand {
    Literal(Literal),
    BindVariableName(BindVariableName),
    Subquery(Subquery),
}

impl StaticOperand {
    /// Returns the wrapped literal, if the operand is one.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            StaticOperand::Literal(literal) => Some(literal),
            _ => None,
        }
    }
}

impl From<Literal> for StaticOperand {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<BindVariableName> for StaticOperand {
    fn from(variable: BindVariableName) -> Self {
        Self::BindVariableName(variable)
    }
}

impl From<Subquery> for StaticOperand {
    fn from(subquery: Subquery) -> Self {
        Self::Subquery(subquery)
    }
}

impl From<Value> for StaticOperand {
    fn from(value: Value) -> Self {
        Self::Literal(Literal::new(value))
    }
}

visitable!(Literal, BindVariableName, Subquery);
visitable_enum!(StaticOperand {
    Literal,
    BindVariableName,
    Subquery
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{NamedSelector, PropertyExistence, Query},
        tools::hash_of,
    };

    #[test]
    fn test_literal_eq_value() {
        let literal = Literal::new("red");
        assert!(literal == Value::from("red"));
        assert!(literal != Value::Name("red".into()));
        assert_eq!(Literal::new(3), Literal::new(3i64));
    }

    #[test]
    fn test_bind_variable_name() {
        assert_eq!("year", BindVariableName::new("year").unwrap().name());
        assert!(BindVariableName::new("").is_err());
    }

    #[test]
    fn test_subquery_eq() {
        let source = || NamedSelector::aliased("car:Car", "c").unwrap();
        let plain = Subquery::new(Query::new(source()));
        assert_eq!(plain, Subquery::new(Query::new(source())));
        assert_eq!(hash_of(&plain), hash_of(&Subquery::new(Query::new(source()))));

        let constrained =
            Subquery::new(Query::new(source()).constrained_by(PropertyExistence::new("c", "year").unwrap()));
        assert_ne!(plain, constrained);
        assert_eq!("SELECT * FROM [car:Car] AS c", plain.text);
    }

    #[test]
    fn test_as_literal() {
        assert!(StaticOperand::from(Value::Long(1)).as_literal().is_some());
        assert!(StaticOperand::from(BindVariableName::new("v").unwrap()).as_literal().is_none());
    }
}
