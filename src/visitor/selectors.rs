use super::{visit_all, Visitable, Visitor};
use crate::model::*;
use std::collections::{BTreeMap, BTreeSet};

/// Collects the names of the selectors referenced by the nodes it visits.
#[derive(Default)]
struct SelectorNameCollector {
    names: BTreeSet<SelectorName>,
}

impl SelectorNameCollector {
    fn add(&mut self, name: &SelectorName) {
        self.names.insert(name.clone());
    }

    fn add_selector(&mut self, selector: &dyn Selector) {
        self.add(selector.alias_or_name());
    }
}

impl<'a> Visitor<'a> for SelectorNameCollector {
    fn visit_all_nodes(&mut self, all_nodes: &'a AllNodes) {
        self.add_selector(all_nodes);
    }

    fn visit_named_selector(&mut self, selector: &'a NamedSelector) {
        self.add_selector(selector);
    }

    fn visit_equi_join_condition(&mut self, condition: &'a EquiJoinCondition) {
        self.add(condition.selector1_name());
        self.add(condition.selector2_name());
    }

    fn visit_child_node_join_condition(&mut self, condition: &'a ChildNodeJoinCondition) {
        self.add(condition.parent_selector_name());
        self.add(condition.child_selector_name());
    }

    fn visit_descendant_node_join_condition(&mut self, condition: &'a DescendantNodeJoinCondition) {
        self.add(condition.ancestor_selector_name());
        self.add(condition.descendant_selector_name());
    }

    fn visit_same_node_join_condition(&mut self, condition: &'a SameNodeJoinCondition) {
        self.add(condition.selector1_name());
        self.add(condition.selector2_name());
    }

    fn visit_property_existence(&mut self, existence: &'a PropertyExistence) {
        self.add(existence.selector_name());
    }

    fn visit_same_node(&mut self, same_node: &'a SameNode) {
        self.add(same_node.selector_name());
    }

    fn visit_child_node(&mut self, child: &'a ChildNode) {
        self.add(child.selector_name());
    }

    fn visit_descendant_node(&mut self, descendant: &'a DescendantNode) {
        self.add(descendant.selector_name());
    }

    fn visit_full_text_search(&mut self, search: &'a FullTextSearch) {
        self.add(search.selector_name());
    }

    fn visit_property_value(&mut self, value: &'a PropertyValue) {
        self.add(value.selector_name());
    }

    fn visit_reference_value(&mut self, value: &'a ReferenceValue) {
        self.add(value.selector_name());
    }

    fn visit_node_name(&mut self, name: &'a NodeName) {
        self.add(name.selector_name());
    }

    fn visit_node_local_name(&mut self, name: &'a NodeLocalName) {
        self.add(name.selector_name());
    }

    fn visit_node_path(&mut self, path: &'a NodePath) {
        self.add(path.selector_name());
    }

    fn visit_node_depth(&mut self, depth: &'a NodeDepth) {
        self.add(depth.selector_name());
    }

    fn visit_node_id(&mut self, id: &'a NodeId) {
        self.add(id.selector_name());
    }

    fn visit_full_text_search_score(&mut self, score: &'a FullTextSearchScore) {
        self.add(score.selector_name());
    }

    fn visit_column(&mut self, column: &'a Column) {
        self.add(column.selector_name());
    }
}

/// Returns the names of every selector referenced in the tree of `node`,
/// subqueries included. Aliased sources contribute their alias.
pub fn selectors_referenced_by<T: Visitable + ?Sized>(node: &T) -> BTreeSet<SelectorName> {
    visit_all(node, SelectorNameCollector::default()).names
}

/// Collects the aliased sources of a tree.
#[derive(Default)]
struct AliasCollector {
    aliases: Vec<(SelectorName, SelectorName)>,
}

impl AliasCollector {
    fn add(&mut self, selector: &dyn Selector) {
        if let Some(alias) = selector.alias() {
            self.aliases.push((alias.clone(), selector.name().clone()));
        }
    }
}

impl<'a> Visitor<'a> for AliasCollector {
    fn visit_all_nodes(&mut self, all_nodes: &'a AllNodes) {
        self.add(all_nodes);
    }

    fn visit_named_selector(&mut self, selector: &'a NamedSelector) {
        self.add(selector);
    }
}

/// Returns the name of each aliased source of the tree of `node`, by alias.
pub fn selector_names_by_alias<T: Visitable + ?Sized>(node: &T) -> BTreeMap<SelectorName, SelectorName> {
    visit_all(node, AliasCollector::default()).aliases.into_iter().collect()
}

/// Returns the alias of each aliased source of the tree of `node`, by name.
///
/// If a selector is aliased more than once, the alias found last wins.
pub fn selector_aliases_by_name<T: Visitable + ?Sized>(node: &T) -> BTreeMap<SelectorName, SelectorName> {
    visit_all(node, AliasCollector::default())
        .aliases
        .into_iter()
        .map(|(alias, name)| (name, alias))
        .collect()
}
