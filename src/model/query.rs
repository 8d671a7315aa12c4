use super::{Column, Constraint, Limit, Ordering, Source};
use crate::tools::hash_of;
use std::sync::Arc;

/// Is a query selecting rows from a single [`Source`].
///
/// Queries are shared through `Arc`. The `with`, `adding` and `returning`
/// methods never change the receiver: they return a new query, or the
/// receiver itself when the requested change would not alter it.
///
/// ```
/// # use qom::*;
/// let query = Query::new(NamedSelector::new("car:Car")?).with_limit(10);
/// assert!(std::sync::Arc::ptr_eq(&query, &query.with_limit(10)));
/// # Ok::<(), qom::Error>(())
/// ```
#[derive(Debug)]
pub struct Query {
    hash: u64,
    source: Arc<Source>,
    constraint: Option<Arc<Constraint>>,
    orderings: Vec<Ordering>,
    columns: Vec<Column>,
    limit: Limit,
    distinct: bool,
}

impl Query {
    /// Creates a query returning every row of `source`.
    pub fn new(source: impl Into<Source>) -> Arc<Self> {
        Self::assemble(
            Arc::new(source.into()),
            None,
            Vec::new(),
            Vec::new(),
            Limit::NONE,
            false,
        )
    }

    /// Creates a query from all of its parts.
    pub fn with_parts(
        source: impl Into<Source>,
        constraint: Option<Constraint>,
        orderings: Vec<Ordering>,
        columns: Vec<Column>,
        limit: Limit,
        distinct: bool,
    ) -> Arc<Self> {
        Self::assemble(
            Arc::new(source.into()),
            constraint.map(Arc::new),
            orderings,
            columns,
            limit,
            distinct,
        )
    }

    fn assemble(
        source: Arc<Source>,
        constraint: Option<Arc<Constraint>>,
        orderings: Vec<Ordering>,
        columns: Vec<Column>,
        limit: Limit,
        distinct: bool,
    ) -> Arc<Self> {
        Arc::new(Self {
            hash: hash_of(&(&source, &constraint, distinct)),
            source,
            constraint,
            orderings,
            columns,
            limit,
            distinct,
        })
    }

    /// Returns a copy of the receiver, with `update` applied to it.
    fn rebuild(&self, update: impl FnOnce(&mut Parts)) -> Arc<Self> {
        let mut parts = Parts {
            constraint: self.constraint.clone(),
            orderings: self.orderings.clone(),
            columns: self.columns.clone(),
            limit: self.limit,
            distinct: self.distinct,
        };
        update(&mut parts);
        Self::assemble(
            Arc::clone(&self.source),
            parts.constraint,
            parts.orderings,
            parts.columns,
            parts.limit,
            parts.distinct,
        )
    }

    #[inline(always)]
    pub fn source(&self) -> &Source {
        &self.source
    }

    #[inline(always)]
    pub fn constraint(&self) -> Option<&Constraint> {
        self.constraint.as_deref()
    }

    #[inline(always)]
    pub fn orderings(&self) -> &[Ordering] {
        &self.orderings
    }

    /// Returns the columns of the query. An empty list stands for all the
    /// columns of the source.
    #[inline(always)]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[inline(always)]
    pub fn limits(&self) -> Limit {
        self.limit
    }

    #[inline(always)]
    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn with_limit(self: &Arc<Self>, row_limit: usize) -> Arc<Self> {
        if self.limit.row_limit() == row_limit {
            return Arc::clone(self);
        }
        self.rebuild(|parts| parts.limit = parts.limit.with_row_limit(row_limit))
    }

    pub fn with_offset(self: &Arc<Self>, offset: usize) -> Arc<Self> {
        if self.limit.offset() == offset {
            return Arc::clone(self);
        }
        self.rebuild(|parts| parts.limit = parts.limit.with_offset(offset))
    }

    pub fn limited_by(self: &Arc<Self>, limit: Limit) -> Arc<Self> {
        if self.limit == limit {
            return Arc::clone(self);
        }
        self.rebuild(|parts| parts.limit = limit)
    }

    /// Returns the query with `orderings` appended to its own.
    pub fn adding_orderings(self: &Arc<Self>, orderings: impl IntoIterator<Item = Ordering>) -> Arc<Self> {
        let mut orderings = orderings.into_iter().peekable();
        if orderings.peek().is_none() {
            return Arc::clone(self);
        }
        self.rebuild(|parts| parts.orderings.extend(orderings))
    }

    /// Returns the query with `columns` appended to its own.
    pub fn adding_columns(self: &Arc<Self>, columns: impl IntoIterator<Item = Column>) -> Arc<Self> {
        let mut columns = columns.into_iter().peekable();
        if columns.peek().is_none() {
            return Arc::clone(self);
        }
        self.rebuild(|parts| parts.columns.extend(columns))
    }

    /// Returns the query with its columns replaced by `columns`.
    pub fn returning(self: &Arc<Self>, columns: Vec<Column>) -> Arc<Self> {
        if self.columns == columns {
            return Arc::clone(self);
        }
        self.rebuild(|parts| parts.columns = columns)
    }

    /// Returns the query with its constraint replaced by `constraint`.
    pub fn constrained_by(self: &Arc<Self>, constraint: impl Into<Constraint>) -> Arc<Self> {
        let constraint = constraint.into();
        if self.constraint() == Some(&constraint) {
            return Arc::clone(self);
        }
        self.rebuild(|parts| parts.constraint = Some(Arc::new(constraint)))
    }

    pub fn with_distinct(self: &Arc<Self>, distinct: bool) -> Arc<Self> {
        if self.distinct == distinct {
            return Arc::clone(self);
        }
        self.rebuild(|parts| parts.distinct = distinct)
    }
}

struct Parts {
    constraint: Option<Arc<Constraint>>,
    orderings: Vec<Ordering>,
    columns: Vec<Column>,
    limit: Limit,
    distinct: bool,
}

precomputed_hash!(Query {
    distinct,
    source,
    constraint,
    limit,
    orderings,
    columns
});

visitable!(Query);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{NamedSelector, PropertyExistence, PropertyValue},
        tools::hash_of,
    };

    fn cars() -> Arc<Query> {
        Query::new(NamedSelector::aliased("car:Car", "cars").unwrap())
    }

    fn year() -> PropertyValue {
        PropertyValue::new("cars", "year").unwrap()
    }

    #[test]
    fn test_defaults() {
        let query = cars();
        assert_eq!(None, query.constraint());
        assert!(query.orderings().is_empty());
        assert!(query.columns().is_empty());
        assert_eq!(Limit::NONE, query.limits());
        assert!(!query.is_distinct());
    }

    #[test]
    fn test_no_op_with() {
        let query = cars().with_limit(5).with_offset(2);
        assert!(Arc::ptr_eq(&query, &query.with_limit(query.limits().row_limit())));
        assert!(Arc::ptr_eq(&query, &query.with_offset(query.limits().offset())));
        assert!(Arc::ptr_eq(&query, &query.limited_by(Limit::new(5, 2))));
        assert!(Arc::ptr_eq(&query, &query.adding_orderings(Vec::new())));
        assert!(Arc::ptr_eq(&query, &query.adding_columns(Vec::new())));
        assert!(Arc::ptr_eq(&query, &query.returning(Vec::new())));
        assert!(Arc::ptr_eq(&query, &query.with_distinct(false)));

        let constrained = query.constrained_by(PropertyExistence::new("cars", "model").unwrap());
        assert!(Arc::ptr_eq(
            &constrained,
            &constrained.constrained_by(PropertyExistence::new("cars", "model").unwrap())
        ));
    }

    #[test]
    fn test_with() {
        let query = cars();
        let limited = query.with_limit(10);
        assert!(!Arc::ptr_eq(&query, &limited));
        assert_eq!(Limit::new(10, 0), limited.limits());
        assert_eq!(Limit::NONE, query.limits());
        assert_eq!(Limit::new(10, 7), limited.with_offset(7).limits());

        let ordered = limited.adding_orderings(vec![Ordering::descending(year())]);
        assert_eq!(1, ordered.orderings().len());
        assert_eq!(Limit::new(10, 0), ordered.limits());
        assert!(Arc::ptr_eq(&query.source, &ordered.source));

        let columns = ordered.adding_columns(vec![Column::new("cars", "year").unwrap()]);
        let columns = columns.adding_columns(vec![Column::new("cars", "model").unwrap()]);
        assert_eq!(2, columns.columns().len());
        assert_eq!(1, columns.returning(vec![Column::all("cars").unwrap()]).columns().len());
    }

    #[test]
    fn test_constrained_by_replaces() {
        let first = cars().constrained_by(PropertyExistence::new("cars", "model").unwrap());
        let second = first.constrained_by(PropertyExistence::new("cars", "year").unwrap());
        assert_eq!(
            Some(&Constraint::from(PropertyExistence::new("cars", "year").unwrap())),
            second.constraint()
        );
    }

    #[test]
    fn test_eq_and_hash() {
        assert_eq!(cars(), cars());
        assert_eq!(hash_of(&cars()), hash_of(&cars()));

        let ordered = cars().adding_orderings(vec![Ordering::ascending(year())]);
        assert_eq!(hash_of(&cars()), hash_of(&ordered));
        assert_ne!(cars(), ordered);
        assert_ne!(cars(), cars().with_limit(3));
        assert_ne!(cars(), cars().with_distinct(true));
        assert_ne!(hash_of(&cars()), hash_of(&cars().with_distinct(true)));
    }
}
