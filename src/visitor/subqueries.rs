use super::{visit_all, Visitable, Visitor};
use crate::model::Subquery;
use std::ptr;

#[derive(Default)]
struct SubqueryCollector<'a> {
    found: Vec<&'a Subquery>,
}

impl<'a> Visitor<'a> for SubqueryCollector<'a> {
    fn visit_subquery(&mut self, subquery: &'a Subquery) {
        self.found.push(subquery);
    }
}

/// Returns the subqueries in the tree of `node`, in walking order.
///
/// With `include_nested` false, subqueries found inside other subqueries are
/// left out. A subquery given as `node` is part of the result.
pub fn subqueries<T: Visitable + ?Sized>(node: &T, include_nested: bool) -> Vec<&Subquery> {
    let found = visit_all(node, SubqueryCollector::default()).found;
    if include_nested {
        return found;
    }
    let nested: Vec<&Subquery> = found
        .iter()
        .flat_map(|subquery| visit_all(subquery.query(), SubqueryCollector::default()).found)
        .collect();
    found
        .into_iter()
        .filter(|subquery| !nested.iter().any(|n| ptr::eq(*n, *subquery)))
        .collect()
}
