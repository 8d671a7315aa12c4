use super::{Column, Limit, Ordering, Query, SetQuery};
use std::sync::Arc;

/// Is a query that can be executed on its own: either a [`Query`] or a [`SetQuery`].
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum QueryCommand {
    Query(Arc<Query>),
    SetQuery(Arc<SetQuery>),
}

impl QueryCommand {
    #[inline(always)]
    pub fn orderings(&self) -> &[Ordering] {
        match self {
            Self::Query(q) => q.orderings(),
            Self::SetQuery(q) => q.orderings(),
        }
    }

    #[inline(always)]
    pub fn columns(&self) -> &[Column] {
        match self {
            Self::Query(q) => q.columns(),
            Self::SetQuery(q) => q.columns(),
        }
    }

    #[inline(always)]
    pub fn limits(&self) -> Limit {
        match self {
            Self::Query(q) => q.limits(),
            Self::SetQuery(q) => q.limits(),
        }
    }

    /// Returns true if both commands are the same instance.
    pub fn ptr_eq(&self, other: &QueryCommand) -> bool {
        match (self, other) {
            (Self::Query(a), Self::Query(b)) => Arc::ptr_eq(a, b),
            (Self::SetQuery(a), Self::SetQuery(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn with_limit(&self, row_limit: usize) -> QueryCommand {
        match self {
            Self::Query(q) => q.with_limit(row_limit).into(),
            Self::SetQuery(q) => q.with_limit(row_limit).into(),
        }
    }

    pub fn with_offset(&self, offset: usize) -> QueryCommand {
        match self {
            Self::Query(q) => q.with_offset(offset).into(),
            Self::SetQuery(q) => q.with_offset(offset).into(),
        }
    }

    pub fn adding_orderings(&self, orderings: impl IntoIterator<Item = Ordering>) -> QueryCommand {
        match self {
            Self::Query(q) => q.adding_orderings(orderings).into(),
            Self::SetQuery(q) => q.adding_orderings(orderings).into(),
        }
    }

    pub fn adding_columns(&self, columns: Vec<Column>) -> QueryCommand {
        match self {
            Self::Query(q) => q.adding_columns(columns).into(),
            Self::SetQuery(q) => q.adding_columns(columns).into(),
        }
    }

    pub fn returning(&self, columns: Vec<Column>) -> QueryCommand {
        match self {
            Self::Query(q) => q.returning(columns).into(),
            Self::SetQuery(q) => q.returning(columns).into(),
        }
    }
}

impl From<Arc<Query>> for QueryCommand {
    fn from(query: Arc<Query>) -> Self {
        Self::Query(query)
    }
}

impl From<Arc<SetQuery>> for QueryCommand {
    fn from(query: Arc<SetQuery>) -> Self {
        Self::SetQuery(query)
    }
}

visitable_enum!(QueryCommand { Query, SetQuery });

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NamedSelector, NodeName, SetOperation};

    fn query() -> QueryCommand {
        Query::new(NamedSelector::new("nt:file").unwrap()).into()
    }

    #[test]
    fn test_no_op_with() {
        let command = query().with_limit(2);
        assert!(command.ptr_eq(&command.with_limit(2)));
        assert!(command.ptr_eq(&command.with_offset(0)));
        assert!(!command.ptr_eq(&command.with_offset(1)));
        assert!(command.ptr_eq(&command.returning(Vec::new())));
    }

    #[test]
    fn test_delegation() {
        let set: QueryCommand = SetQuery::new(query(), SetOperation::Except, query(), false).into();
        let set = set
            .with_limit(5)
            .adding_orderings(vec![Ordering::descending(NodeName::new("nt:file").unwrap())]);
        assert_eq!(Limit::new(5, 0), set.limits());
        assert_eq!(1, set.orderings().len());
        assert!(set.columns().is_empty());

        let set = set.adding_columns(vec![Column::new("nt:file", "jcr:created").unwrap()]);
        assert_eq!(1, set.columns().len());
        assert!(!query().ptr_eq(&query()));
        assert_eq!(query(), query());
    }
}
