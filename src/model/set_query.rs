use super::{Column, Limit, Ordering, QueryCommand};
use crate::{tools::hash_of, Error, Result};
use std::{fmt, str::FromStr, sync::Arc};

/// Is the operation combining the rows of the two sides of a [`SetQuery`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SetOperation {
    Union,
    Intersect,
    Except,
}

impl SetOperation {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

impl fmt::Display for SetOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for SetOperation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UNION" => Ok(Self::Union),
            "INTERSECT" => Ok(Self::Intersect),
            "EXCEPT" | "MINUS" => Ok(Self::Except),
            _ => Err(Error::unsupported("set operation", s)),
        }
    }
}

/// Is a query combining the rows of two other queries.
///
/// With `all` set, duplicate rows are kept.
#[derive(Debug)]
pub struct SetQuery {
    hash: u64,
    left: QueryCommand,
    operation: SetOperation,
    right: QueryCommand,
    all: bool,
    orderings: Vec<Ordering>,
    limit: Limit,
}

impl SetQuery {
    pub fn new(
        left: impl Into<QueryCommand>,
        operation: SetOperation,
        right: impl Into<QueryCommand>,
        all: bool,
    ) -> Arc<Self> {
        Self::with_parts(left, operation, right, all, Vec::new(), Limit::NONE)
    }

    pub fn with_parts(
        left: impl Into<QueryCommand>,
        operation: SetOperation,
        right: impl Into<QueryCommand>,
        all: bool,
        orderings: Vec<Ordering>,
        limit: Limit,
    ) -> Arc<Self> {
        let left = left.into();
        let right = right.into();
        Arc::new(Self {
            hash: hash_of(&(&left, operation, &right, all)),
            left,
            operation,
            right,
            all,
            orderings,
            limit,
        })
    }

    #[inline(always)]
    pub fn left(&self) -> &QueryCommand {
        &self.left
    }

    #[inline(always)]
    pub fn operation(&self) -> SetOperation {
        self.operation
    }

    #[inline(always)]
    pub fn right(&self) -> &QueryCommand {
        &self.right
    }

    #[inline(always)]
    pub fn is_all(&self) -> bool {
        self.all
    }

    #[inline(always)]
    pub fn orderings(&self) -> &[Ordering] {
        &self.orderings
    }

    /// Returns the columns of the rows, which are those of the left side.
    #[inline(always)]
    pub fn columns(&self) -> &[Column] {
        self.left.columns()
    }

    #[inline(always)]
    pub fn limits(&self) -> Limit {
        self.limit
    }

    fn rebuild(
        &self,
        left: QueryCommand,
        right: QueryCommand,
        orderings: Vec<Ordering>,
        limit: Limit,
    ) -> Arc<Self> {
        Self::with_parts(left, self.operation, right, self.all, orderings, limit)
    }

    pub fn with_limit(self: &Arc<Self>, row_limit: usize) -> Arc<Self> {
        if self.limit.row_limit() == row_limit {
            return Arc::clone(self);
        }
        self.limited_by(self.limit.with_row_limit(row_limit))
    }

    pub fn with_offset(self: &Arc<Self>, offset: usize) -> Arc<Self> {
        if self.limit.offset() == offset {
            return Arc::clone(self);
        }
        self.limited_by(self.limit.with_offset(offset))
    }

    pub fn limited_by(self: &Arc<Self>, limit: Limit) -> Arc<Self> {
        if self.limit == limit {
            return Arc::clone(self);
        }
        self.rebuild(self.left.clone(), self.right.clone(), self.orderings.clone(), limit)
    }

    /// Returns the query with `orderings` appended to its own.
    pub fn adding_orderings(self: &Arc<Self>, orderings: impl IntoIterator<Item = Ordering>) -> Arc<Self> {
        let mut orderings = orderings.into_iter().peekable();
        if orderings.peek().is_none() {
            return Arc::clone(self);
        }
        let orderings = self.orderings.iter().cloned().chain(orderings).collect();
        self.rebuild(self.left.clone(), self.right.clone(), orderings, self.limit)
    }

    /// Returns the query with `columns` appended to the columns of both sides.
    pub fn adding_columns(self: &Arc<Self>, columns: Vec<Column>) -> Arc<Self> {
        if columns.is_empty() {
            return Arc::clone(self);
        }
        let left = self.left.adding_columns(columns.clone());
        let right = self.right.adding_columns(columns);
        self.rebuild(left, right, self.orderings.clone(), self.limit)
    }

    /// Returns the query with the columns of both sides replaced by `columns`.
    pub fn returning(self: &Arc<Self>, columns: Vec<Column>) -> Arc<Self> {
        let left = self.left.returning(columns.clone());
        let right = self.right.returning(columns);
        if left.ptr_eq(&self.left) && right.ptr_eq(&self.right) {
            return Arc::clone(self);
        }
        self.rebuild(left, right, self.orderings.clone(), self.limit)
    }

    pub fn with_all(self: &Arc<Self>, all: bool) -> Arc<Self> {
        if self.all == all {
            return Arc::clone(self);
        }
        Self::with_parts(
            self.left.clone(),
            self.operation,
            self.right.clone(),
            all,
            self.orderings.clone(),
            self.limit,
        )
    }
}

precomputed_hash!(SetQuery {
    operation,
    all,
    left,
    right,
    limit,
    orderings
});

visitable!(SetQuery);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{NamedSelector, NodePath, Query},
        tools::hash_of,
    };

    fn union(all: bool) -> Arc<SetQuery> {
        SetQuery::new(
            Query::new(NamedSelector::new("car:Car").unwrap()),
            SetOperation::Union,
            Query::new(NamedSelector::new("car:Truck").unwrap()),
            all,
        )
    }

    #[test]
    fn test_set_operation_from_str() {
        assert_eq!(SetOperation::Intersect, "intersect".parse().unwrap());
        assert_eq!(SetOperation::Except, "EXCEPT".parse().unwrap());
        assert!("JOIN".parse::<SetOperation>().is_err());
    }

    #[test]
    fn test_eq_and_hash() {
        assert_eq!(union(false), union(false));
        assert_eq!(hash_of(&union(false)), hash_of(&union(false)));
        assert_ne!(union(false), union(true));

        let limited = union(false).with_limit(4);
        assert_eq!(hash_of(&union(false)), hash_of(&limited));
        assert_ne!(union(false), limited);
    }

    #[test]
    fn test_no_op_with() {
        let query = union(false).with_limit(4);
        assert!(Arc::ptr_eq(&query, &query.with_limit(4)));
        assert!(Arc::ptr_eq(&query, &query.with_offset(0)));
        assert!(Arc::ptr_eq(&query, &query.with_all(false)));
        assert!(Arc::ptr_eq(&query, &query.adding_orderings(Vec::new())));
        assert!(Arc::ptr_eq(&query, &query.adding_columns(Vec::new())));
        assert!(Arc::ptr_eq(&query, &query.returning(Vec::new())));
    }

    #[test]
    fn test_with() {
        let query = union(false);
        let ordered = query
            .adding_orderings(vec![Ordering::ascending(NodePath::new("car:Car").unwrap())])
            .with_offset(3);
        assert_eq!(1, ordered.orderings().len());
        assert_eq!(Limit::NONE.with_offset(3), ordered.limits());
        assert!(ordered.with_all(true).is_all());

        let columns = query.returning(vec![Column::all("car:Car").unwrap()]);
        assert_eq!(1, columns.columns().len());
        assert_eq!(1, columns.right().columns().len());
    }
}
