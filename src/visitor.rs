mod selectors;
mod subqueries;
mod walk;
mod writer;

use crate::model::*;
use std::sync::Arc;

pub use selectors::{selector_aliases_by_name, selector_names_by_alias, selectors_referenced_by};
pub use subqueries::subqueries;
pub use walk::Navigator;

/// Is the trait of algorithms over query trees.
///
/// There is one method per kind of node. Every method does nothing by
/// default, so implementations only override the kinds they care about. A
/// visitor does not walk the tree by itself: use [`visit_all`] to call it on
/// every node of a tree, or call [`Visitable::accept`] on the children of a
/// node from the visitor's own methods.
///
/// The lifetime `'a` is the lifetime of the visited tree, so a visitor may
/// keep references to the nodes it is given.
#[allow(unused_variables)]
pub trait Visitor<'a> {
    fn visit_all_nodes(&mut self, all_nodes: &'a AllNodes) {}

    fn visit_named_selector(&mut self, selector: &'a NamedSelector) {}

    fn visit_join(&mut self, join: &'a Join) {}

    fn visit_equi_join_condition(&mut self, condition: &'a EquiJoinCondition) {}

    fn visit_child_node_join_condition(&mut self, condition: &'a ChildNodeJoinCondition) {}

    fn visit_descendant_node_join_condition(&mut self, condition: &'a DescendantNodeJoinCondition) {}

    fn visit_same_node_join_condition(&mut self, condition: &'a SameNodeJoinCondition) {}

    fn visit_and(&mut self, and: &'a And) {}

    fn visit_or(&mut self, or: &'a Or) {}

    fn visit_not(&mut self, not: &'a Not) {}

    fn visit_comparison(&mut self, comparison: &'a Comparison) {}

    fn visit_between(&mut self, between: &'a Between) {}

    fn visit_set_criteria(&mut self, criteria: &'a SetCriteria) {}

    fn visit_property_existence(&mut self, existence: &'a PropertyExistence) {}

    fn visit_same_node(&mut self, same_node: &'a SameNode) {}

    fn visit_child_node(&mut self, child: &'a ChildNode) {}

    fn visit_descendant_node(&mut self, descendant: &'a DescendantNode) {}

    fn visit_full_text_search(&mut self, search: &'a FullTextSearch) {}

    fn visit_relike(&mut self, relike: &'a Relike) {}

    fn visit_property_value(&mut self, value: &'a PropertyValue) {}

    fn visit_reference_value(&mut self, value: &'a ReferenceValue) {}

    fn visit_length(&mut self, length: &'a Length) {}

    fn visit_lower_case(&mut self, lower_case: &'a LowerCase) {}

    fn visit_upper_case(&mut self, upper_case: &'a UpperCase) {}

    fn visit_node_name(&mut self, name: &'a NodeName) {}

    fn visit_node_local_name(&mut self, name: &'a NodeLocalName) {}

    fn visit_node_path(&mut self, path: &'a NodePath) {}

    fn visit_node_depth(&mut self, depth: &'a NodeDepth) {}

    fn visit_node_id(&mut self, id: &'a NodeId) {}

    fn visit_full_text_search_score(&mut self, score: &'a FullTextSearchScore) {}

    fn visit_arithmetic_operand(&mut self, operand: &'a ArithmeticOperand) {}

    fn visit_cast(&mut self, cast: &'a Cast) {}

    fn visit_literal(&mut self, literal: &'a Literal) {}

    fn visit_bind_variable_name(&mut self, variable: &'a BindVariableName) {}

    fn visit_subquery(&mut self, subquery: &'a Subquery) {}

    fn visit_ordering(&mut self, ordering: &'a Ordering) {}

    fn visit_column(&mut self, column: &'a Column) {}

    fn visit_limit(&mut self, limit: &'a Limit) {}

    fn visit_query(&mut self, query: &'a Query) {}

    fn visit_set_query(&mut self, query: &'a SetQuery) {}
}

/// Is a reference to a node of any kind.
#[derive(Clone, Copy, Debug)]
pub enum Node<'a> {
    AllNodes(&'a AllNodes),
    NamedSelector(&'a NamedSelector),
    Join(&'a Join),
    EquiJoinCondition(&'a EquiJoinCondition),
    ChildNodeJoinCondition(&'a ChildNodeJoinCondition),
    DescendantNodeJoinCondition(&'a DescendantNodeJoinCondition),
    SameNodeJoinCondition(&'a SameNodeJoinCondition),
    And(&'a And),
    Or(&'a Or),
    Not(&'a Not),
    Comparison(&'a Comparison),
    Between(&'a Between),
    SetCriteria(&'a SetCriteria),
    PropertyExistence(&'a PropertyExistence),
    SameNode(&'a SameNode),
    ChildNode(&'a ChildNode),
    DescendantNode(&'a DescendantNode),
    FullTextSearch(&'a FullTextSearch),
    Relike(&'a Relike),
    PropertyValue(&'a PropertyValue),
    ReferenceValue(&'a ReferenceValue),
    Length(&'a Length),
    LowerCase(&'a LowerCase),
    UpperCase(&'a UpperCase),
    NodeName(&'a NodeName),
    NodeLocalName(&'a NodeLocalName),
    NodePath(&'a NodePath),
    NodeDepth(&'a NodeDepth),
    NodeId(&'a NodeId),
    FullTextSearchScore(&'a FullTextSearchScore),
    ArithmeticOperand(&'a ArithmeticOperand),
    Cast(&'a Cast),
    Literal(&'a Literal),
    BindVariableName(&'a BindVariableName),
    Subquery(&'a Subquery),
    Ordering(&'a Ordering),
    Column(&'a Column),
    Limit(&'a Limit),
    Query(&'a Query),
    SetQuery(&'a SetQuery),
}

impl<'a> Node<'a> {
    /// Calls the method of `visitor` for the kind of the node.
    pub fn accept<V: Visitor<'a> + ?Sized>(self, visitor: &mut V) {
        match self {
            Node::AllNodes(n) => visitor.visit_all_nodes(n),
            Node::NamedSelector(n) => visitor.visit_named_selector(n),
            Node::Join(n) => visitor.visit_join(n),
            Node::EquiJoinCondition(n) => visitor.visit_equi_join_condition(n),
            Node::ChildNodeJoinCondition(n) => visitor.visit_child_node_join_condition(n),
            Node::DescendantNodeJoinCondition(n) => visitor.visit_descendant_node_join_condition(n),
            Node::SameNodeJoinCondition(n) => visitor.visit_same_node_join_condition(n),
            Node::And(n) => visitor.visit_and(n),
            Node::Or(n) => visitor.visit_or(n),
            Node::Not(n) => visitor.visit_not(n),
            Node::Comparison(n) => visitor.visit_comparison(n),
            Node::Between(n) => visitor.visit_between(n),
            Node::SetCriteria(n) => visitor.visit_set_criteria(n),
            Node::PropertyExistence(n) => visitor.visit_property_existence(n),
            Node::SameNode(n) => visitor.visit_same_node(n),
            Node::ChildNode(n) => visitor.visit_child_node(n),
            Node::DescendantNode(n) => visitor.visit_descendant_node(n),
            Node::FullTextSearch(n) => visitor.visit_full_text_search(n),
            Node::Relike(n) => visitor.visit_relike(n),
            Node::PropertyValue(n) => visitor.visit_property_value(n),
            Node::ReferenceValue(n) => visitor.visit_reference_value(n),
            Node::Length(n) => visitor.visit_length(n),
            Node::LowerCase(n) => visitor.visit_lower_case(n),
            Node::UpperCase(n) => visitor.visit_upper_case(n),
            Node::NodeName(n) => visitor.visit_node_name(n),
            Node::NodeLocalName(n) => visitor.visit_node_local_name(n),
            Node::NodePath(n) => visitor.visit_node_path(n),
            Node::NodeDepth(n) => visitor.visit_node_depth(n),
            Node::NodeId(n) => visitor.visit_node_id(n),
            Node::FullTextSearchScore(n) => visitor.visit_full_text_search_score(n),
            Node::ArithmeticOperand(n) => visitor.visit_arithmetic_operand(n),
            Node::Cast(n) => visitor.visit_cast(n),
            Node::Literal(n) => visitor.visit_literal(n),
            Node::BindVariableName(n) => visitor.visit_bind_variable_name(n),
            Node::Subquery(n) => visitor.visit_subquery(n),
            Node::Ordering(n) => visitor.visit_ordering(n),
            Node::Column(n) => visitor.visit_column(n),
            Node::Limit(n) => visitor.visit_limit(n),
            Node::Query(n) => visitor.visit_query(n),
            Node::SetQuery(n) => visitor.visit_set_query(n),
        }
    }

    /// Calls `f` with each immediate child of the node, in walking order.
    ///
    /// The order is fixed per kind: a query yields its source, columns,
    /// constraint and orderings; a join its left source, condition and right
    /// source; binary nodes their left side before their right side. The
    /// limit of a query is not a child.
    pub fn for_each_child(self, mut f: impl FnMut(Node<'a>)) {
        match self {
            Node::Query(q) => {
                f(q.source().as_node());
                q.columns().iter().for_each(|c| f(c.as_node()));
                if let Some(constraint) = q.constraint() {
                    f(constraint.as_node());
                }
                q.orderings().iter().for_each(|o| f(o.as_node()));
            }
            Node::SetQuery(q) => {
                f(q.left().as_node());
                f(q.right().as_node());
            }
            Node::Subquery(s) => f(s.query().as_node()),
            Node::Join(j) => {
                f(j.left().as_node());
                f(j.condition().as_node());
                f(j.right().as_node());
            }
            Node::And(c) => {
                f(c.left().as_node());
                f(c.right().as_node());
            }
            Node::Or(c) => {
                f(c.left().as_node());
                f(c.right().as_node());
            }
            Node::Not(c) => f(c.constraint().as_node()),
            Node::Comparison(c) => {
                f(c.operand1().as_node());
                f(c.operand2().as_node());
            }
            Node::Between(c) => {
                f(c.operand().as_node());
                f(c.lower_bound().as_node());
                f(c.upper_bound().as_node());
            }
            Node::SetCriteria(c) => {
                f(c.operand().as_node());
                c.values().iter().for_each(|v| f(v.as_node()));
            }
            Node::Relike(c) => {
                f(c.operand1().as_node());
                f(c.operand2().as_node());
            }
            Node::ArithmeticOperand(o) => {
                f(o.left().as_node());
                f(o.right().as_node());
            }
            Node::Ordering(o) => f(o.operand().as_node()),
            Node::Length(o) => f(o.property_value().as_node()),
            Node::LowerCase(o) => f(o.operand().as_node()),
            Node::UpperCase(o) => f(o.operand().as_node()),
            Node::Cast(o) => f(o.operand().as_node()),
            Node::AllNodes(_)
            | Node::NamedSelector(_)
            | Node::EquiJoinCondition(_)
            | Node::ChildNodeJoinCondition(_)
            | Node::DescendantNodeJoinCondition(_)
            | Node::SameNodeJoinCondition(_)
            | Node::PropertyExistence(_)
            | Node::SameNode(_)
            | Node::ChildNode(_)
            | Node::DescendantNode(_)
            | Node::FullTextSearch(_)
            | Node::PropertyValue(_)
            | Node::ReferenceValue(_)
            | Node::NodeName(_)
            | Node::NodeLocalName(_)
            | Node::NodePath(_)
            | Node::NodeDepth(_)
            | Node::NodeId(_)
            | Node::FullTextSearchScore(_)
            | Node::Literal(_)
            | Node::BindVariableName(_)
            | Node::Column(_)
            | Node::Limit(_) => {}
        }
    }

    /// Returns the immediate children of the node, in walking order.
    pub fn children(self) -> Vec<Node<'a>> {
        let mut children = Vec::new();
        self.for_each_child(|child| children.push(child));
        children
    }

    /// Returns the name of the kind of the node.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::AllNodes(_) => "AllNodes",
            Node::NamedSelector(_) => "NamedSelector",
            Node::Join(_) => "Join",
            Node::EquiJoinCondition(_) => "EquiJoinCondition",
            Node::ChildNodeJoinCondition(_) => "ChildNodeJoinCondition",
            Node::DescendantNodeJoinCondition(_) => "DescendantNodeJoinCondition",
            Node::SameNodeJoinCondition(_) => "SameNodeJoinCondition",
            Node::And(_) => "And",
            Node::Or(_) => "Or",
            Node::Not(_) => "Not",
            Node::Comparison(_) => "Comparison",
            Node::Between(_) => "Between",
            Node::SetCriteria(_) => "SetCriteria",
            Node::PropertyExistence(_) => "PropertyExistence",
            Node::SameNode(_) => "SameNode",
            Node::ChildNode(_) => "ChildNode",
            Node::DescendantNode(_) => "DescendantNode",
            Node::FullTextSearch(_) => "FullTextSearch",
            Node::Relike(_) => "Relike",
            Node::PropertyValue(_) => "PropertyValue",
            Node::ReferenceValue(_) => "ReferenceValue",
            Node::Length(_) => "Length",
            Node::LowerCase(_) => "LowerCase",
            Node::UpperCase(_) => "UpperCase",
            Node::NodeName(_) => "NodeName",
            Node::NodeLocalName(_) => "NodeLocalName",
            Node::NodePath(_) => "NodePath",
            Node::NodeDepth(_) => "NodeDepth",
            Node::NodeId(_) => "NodeId",
            Node::FullTextSearchScore(_) => "FullTextSearchScore",
            Node::ArithmeticOperand(_) => "ArithmeticOperand",
            Node::Cast(_) => "Cast",
            Node::Literal(_) => "Literal",
            Node::BindVariableName(_) => "BindVariableName",
            Node::Subquery(_) => "Subquery",
            Node::Ordering(_) => "Ordering",
            Node::Column(_) => "Column",
            Node::Limit(_) => "Limit",
            Node::Query(_) => "Query",
            Node::SetQuery(_) => "SetQuery",
        }
    }
}

/// Is the trait of the nodes of query trees.
pub trait Visitable {
    /// Returns the receiver as a [`Node`].
    fn as_node(&self) -> Node<'_>;

    /// Calls the method of `visitor` for the receiver's kind of node.
    fn accept<'a, V: Visitor<'a> + ?Sized>(&'a self, visitor: &mut V) {
        self.as_node().accept(visitor)
    }
}

impl<'a> Visitable for Node<'a> {
    fn as_node(&self) -> Node<'_> {
        *self
    }
}

impl<T: Visitable + ?Sized> Visitable for Arc<T> {
    fn as_node(&self) -> Node<'_> {
        (**self).as_node()
    }
}

/// Calls `visitor` on `node` alone and returns it. The visitor is expected to
/// walk the children it is interested in.
pub fn visit<'a, T, V>(node: &'a T, mut visitor: V) -> V
where
    T: Visitable + ?Sized,
    V: Visitor<'a>,
{
    node.accept(&mut visitor);
    visitor
}

/// Calls `strategy` on `node` and on every node below it, in walking order,
/// and returns it.
pub fn visit_all<'a, T, S>(node: &'a T, strategy: S) -> S
where
    T: Visitable + ?Sized,
    S: Visitor<'a>,
{
    Navigator::new(strategy).walk(node.as_node())
}

/// Returns the canonical query text of `node`.
pub fn readable<T: Visitable + ?Sized>(node: &T) -> String {
    writer::render(node.as_node())
}
