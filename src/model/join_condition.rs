use super::{IntoSelectorName, SelectorName};
use crate::{
    tools::{non_empty, non_empty_opt},
    Result,
};

/// Is a join condition that holds when a property of one selector equals a
/// property of the other.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct EquiJoinCondition {
    selector1_name: SelectorName,
    property1_name: String,
    selector2_name: SelectorName,
    property2_name: String,
}

impl EquiJoinCondition {
    pub fn new(
        selector1_name: impl IntoSelectorName,
        property1_name: impl Into<String>,
        selector2_name: impl IntoSelectorName,
        property2_name: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            selector1_name: selector1_name.into_selector_name()?,
            property1_name: non_empty("property1_name", property1_name)?,
            selector2_name: selector2_name.into_selector_name()?,
            property2_name: non_empty("property2_name", property2_name)?,
        })
    }

    #[inline(always)]
    pub fn selector1_name(&self) -> &SelectorName {
        &self.selector1_name
    }

    #[inline(always)]
    pub fn property1_name(&self) -> &str {
        &self.property1_name
    }

    #[inline(always)]
    pub fn selector2_name(&self) -> &SelectorName {
        &self.selector2_name
    }

    #[inline(always)]
    pub fn property2_name(&self) -> &str {
        &self.property2_name
    }
}

/// Is a join condition that holds when the child selector's node is a child of
/// the parent selector's node.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ChildNodeJoinCondition {
    parent_selector_name: SelectorName,
    child_selector_name: SelectorName,
}

impl ChildNodeJoinCondition {
    pub fn new(parent_selector_name: impl IntoSelectorName, child_selector_name: impl IntoSelectorName) -> Result<Self> {
        Ok(Self {
            parent_selector_name: parent_selector_name.into_selector_name()?,
            child_selector_name: child_selector_name.into_selector_name()?,
        })
    }

    #[inline(always)]
    pub fn parent_selector_name(&self) -> &SelectorName {
        &self.parent_selector_name
    }

    #[inline(always)]
    pub fn child_selector_name(&self) -> &SelectorName {
        &self.child_selector_name
    }
}

/// Is a join condition that holds when the descendant selector's node is below
/// the ancestor selector's node.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct DescendantNodeJoinCondition {
    ancestor_selector_name: SelectorName,
    descendant_selector_name: SelectorName,
}

impl DescendantNodeJoinCondition {
    pub fn new(
        ancestor_selector_name: impl IntoSelectorName,
        descendant_selector_name: impl IntoSelectorName,
    ) -> Result<Self> {
        Ok(Self {
            ancestor_selector_name: ancestor_selector_name.into_selector_name()?,
            descendant_selector_name: descendant_selector_name.into_selector_name()?,
        })
    }

    #[inline(always)]
    pub fn ancestor_selector_name(&self) -> &SelectorName {
        &self.ancestor_selector_name
    }

    #[inline(always)]
    pub fn descendant_selector_name(&self) -> &SelectorName {
        &self.descendant_selector_name
    }
}

/// Is a join condition that holds when both selectors select the same node, or
/// when the second selector's node is found at `selector2_path` relative to the
/// first one's.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct SameNodeJoinCondition {
    selector1_name: SelectorName,
    selector2_name: SelectorName,
    selector2_path: Option<String>,
}

impl SameNodeJoinCondition {
    pub fn new(selector1_name: impl IntoSelectorName, selector2_name: impl IntoSelectorName) -> Result<Self> {
        Self::with_path(selector1_name, selector2_name, None::<String>)
    }

    pub fn with_path(
        selector1_name: impl IntoSelectorName,
        selector2_name: impl IntoSelectorName,
        selector2_path: Option<impl Into<String>>,
    ) -> Result<Self> {
        Ok(Self {
            selector1_name: selector1_name.into_selector_name()?,
            selector2_name: selector2_name.into_selector_name()?,
            selector2_path: non_empty_opt("selector2_path", selector2_path)?,
        })
    }

    #[inline(always)]
    pub fn selector1_name(&self) -> &SelectorName {
        &self.selector1_name
    }

    #[inline(always)]
    pub fn selector2_name(&self) -> &SelectorName {
        &self.selector2_name
    }

    #[inline(always)]
    pub fn selector2_path(&self) -> Option<&str> {
        self.selector2_path.as_deref()
    }
}

/// Is the condition under which the rows of a [`Join`] are combined.
///
/// [`Join`]: ./struct.Join.html
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum JoinCondition {
    Equi(EquiJoinCondition),
    ChildNode(ChildNodeJoinCondition),
    DescendantNode(DescendantNodeJoinCondition),
    SameNode(SameNodeJoinCondition),
}

impl JoinCondition {
    /// Returns the two selectors related by the condition.
    pub fn selector_names(&self) -> [&SelectorName; 2] {
        match self {
            JoinCondition::Equi(c) => [c.selector1_name(), c.selector2_name()],
            JoinCondition::ChildNode(c) => [c.parent_selector_name(), c.child_selector_name()],
            JoinCondition::DescendantNode(c) => [c.ancestor_selector_name(), c.descendant_selector_name()],
            JoinCondition::SameNode(c) => [c.selector1_name(), c.selector2_name()],
        }
    }
}

impl From<EquiJoinCondition> for JoinCondition {
    fn from(condition: EquiJoinCondition) -> Self {
        Self::Equi(condition)
    }
}

impl From<ChildNodeJoinCondition> for JoinCondition {
    fn from(condition: ChildNodeJoinCondition) -> Self {
        Self::ChildNode(condition)
    }
}

impl From<DescendantNodeJoinCondition> for JoinCondition {
    fn from(condition: DescendantNodeJoinCondition) -> Self {
        Self::DescendantNode(condition)
    }
}

impl From<SameNodeJoinCondition> for JoinCondition {
    fn from(condition: SameNodeJoinCondition) -> Self {
        Self::SameNode(condition)
    }
}

visitable!(
    EquiJoinCondition,
    ChildNodeJoinCondition,
    DescendantNodeJoinCondition,
    SameNodeJoinCondition
);
visitable_enum!(JoinCondition {
    Equi,
    ChildNode,
    DescendantNode,
    SameNode
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equi_join_condition() {
        let c = EquiJoinCondition::new("a", "id", "b", "ref").unwrap();
        assert_eq!("a", c.selector1_name().name());
        assert_eq!("ref", c.property2_name());
        assert!(EquiJoinCondition::new("a", "", "b", "ref").is_err());
        assert!(EquiJoinCondition::new("", "id", "b", "ref").is_err());
    }

    #[test]
    fn test_same_node_join_condition() {
        let c = SameNodeJoinCondition::new("a", "b").unwrap();
        assert_eq!(None, c.selector2_path());
        let c = SameNodeJoinCondition::with_path("a", "b", Some("x/y")).unwrap();
        assert_eq!(Some("x/y"), c.selector2_path());
        assert!(SameNodeJoinCondition::with_path("a", "b", Some("")).is_err());
    }

    #[test]
    fn test_selector_names() {
        let c: JoinCondition = ChildNodeJoinCondition::new("parent", "child").unwrap().into();
        let [first, second] = c.selector_names();
        assert_eq!("parent", first.name());
        assert_eq!("child", second.name());
    }

    #[test]
    fn test_eq() {
        let a: JoinCondition = DescendantNodeJoinCondition::new("x", "y").unwrap().into();
        let b: JoinCondition = DescendantNodeJoinCondition::new("x", "y").unwrap().into();
        let c: JoinCondition = DescendantNodeJoinCondition::new("y", "x").unwrap().into();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
