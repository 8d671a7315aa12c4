use super::{IntoSelectorName, JoinCondition, SelectorName};
use crate::{tools::hash_of, Error, Result};
use std::{fmt, str::FromStr, sync::Arc};

/// Is the trait of sources that select nodes under a name and an optional alias.
pub trait Selector {
    /// Returns the name of the selector.
    fn name(&self) -> &SelectorName;

    /// Returns the alias of the selector, if it has one.
    fn alias(&self) -> Option<&SelectorName>;

    /// Returns true if the selector has an alias.
    fn has_alias(&self) -> bool {
        self.alias().is_some()
    }

    /// Returns the name by which the rest of the query refers to this selector.
    fn alias_or_name(&self) -> &SelectorName {
        self.alias().unwrap_or_else(|| self.name())
    }
}

/// Is a selector matching every node in the repository.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct AllNodes {
    name: SelectorName,
    alias: Option<SelectorName>,
}

impl AllNodes {
    /// Is the reserved name of the all-nodes selector.
    pub const ALL_NODES_NAME: &'static str = "__ALLNODES__";

    /// Creates an all-nodes selector without an alias.
    pub fn new() -> Self {
        Self {
            name: SelectorName::reserved(Self::ALL_NODES_NAME),
            alias: None,
        }
    }

    /// Creates an all-nodes selector referred to as `alias`.
    pub fn aliased(alias: impl IntoSelectorName) -> Result<Self> {
        Ok(Self {
            name: SelectorName::reserved(Self::ALL_NODES_NAME),
            alias: Some(alias.into_selector_name()?),
        })
    }
}

impl Default for AllNodes {
    fn default() -> Self {
        Self::new()
    }
}

impl Selector for AllNodes {
    #[inline(always)]
    fn name(&self) -> &SelectorName {
        &self.name
    }

    #[inline(always)]
    fn alias(&self) -> Option<&SelectorName> {
        self.alias.as_ref()
    }
}

/// Is a selector matching the nodes of a declared node type.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct NamedSelector {
    name: SelectorName,
    alias: Option<SelectorName>,
}

impl NamedSelector {
    /// Creates a selector over the nodes of type `node_type`.
    pub fn new(node_type: impl IntoSelectorName) -> Result<Self> {
        Ok(Self {
            name: node_type.into_selector_name()?,
            alias: None,
        })
    }

    /// Creates a selector over the nodes of type `node_type`, referred to as `alias`.
    pub fn aliased(node_type: impl IntoSelectorName, alias: impl IntoSelectorName) -> Result<Self> {
        Ok(Self {
            name: node_type.into_selector_name()?,
            alias: Some(alias.into_selector_name()?),
        })
    }
}

impl Selector for NamedSelector {
    #[inline(always)]
    fn name(&self) -> &SelectorName {
        &self.name
    }

    #[inline(always)]
    fn alias(&self) -> Option<&SelectorName> {
        self.alias.as_ref()
    }
}

/// Is the kind of a [`Join`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum JoinType {
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
    Cross,
}

impl JoinType {
    /// Returns the keywords of the join type in query text.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::LeftOuter => "LEFT OUTER JOIN",
            Self::RightOuter => "RIGHT OUTER JOIN",
            Self::FullOuter => "FULL OUTER JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }

    /// Returns true for the outer joins.
    pub fn is_outer(&self) -> bool {
        matches!(self, Self::LeftOuter | Self::RightOuter | Self::FullOuter)
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for JoinType {
    type Err = Error;

    /// Accepts the join keywords (in any case and spacing) and the JCR join type constants.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        let join_type = match normalized.to_ascii_uppercase().as_str() {
            "INNER JOIN" | "JOIN" | "JCR.JOIN.TYPE.INNER" => Self::Inner,
            "LEFT OUTER JOIN" | "LEFT JOIN" | "JCR.JOIN.TYPE.LEFT.OUTER" => Self::LeftOuter,
            "RIGHT OUTER JOIN" | "RIGHT JOIN" | "JCR.JOIN.TYPE.RIGHT.OUTER" => Self::RightOuter,
            "FULL OUTER JOIN" | "FULL JOIN" => Self::FullOuter,
            "CROSS JOIN" => Self::Cross,
            _ => return Err(Error::unsupported("join type", s)),
        };
        Ok(join_type)
    }
}

/// Is a source combining two other sources under a [`JoinCondition`].
#[derive(Clone, Debug)]
pub struct Join {
    hash: u64,
    left: Arc<Source>,
    right: Arc<Source>,
    join_type: JoinType,
    condition: JoinCondition,
}

impl Join {
    /// Creates a new join of `left` and `right`.
    pub fn new(
        left: impl Into<Source>,
        join_type: JoinType,
        right: impl Into<Source>,
        condition: impl Into<JoinCondition>,
    ) -> Self {
        let left = Arc::new(left.into());
        let right = Arc::new(right.into());
        let condition = condition.into();
        let hash = hash_of(&(&left, join_type, &right, &condition));
        Self {
            hash,
            left,
            right,
            join_type,
            condition,
        }
    }

    /// Returns a reference to the source on left.
    #[inline(always)]
    pub fn left(&self) -> &Source {
        &self.left
    }

    /// Returns a reference to the source on right.
    #[inline(always)]
    pub fn right(&self) -> &Source {
        &self.right
    }

    #[inline(always)]
    pub fn join_type(&self) -> JoinType {
        self.join_type
    }

    #[inline(always)]
    pub fn condition(&self) -> &JoinCondition {
        &self.condition
    }
}

precomputed_hash!(Join {
    join_type,
    left,
    right,
    condition
});

/// Is the source of the rows of a [`Query`].
///
/// [`Query`]: ./struct.Query.html
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Source {
    AllNodes(AllNodes),
    NamedSelector(NamedSelector),
    Join(Join),
}

impl Source {
    /// Returns the receiver as a [`Selector`] unless it is a join.
    pub fn as_selector(&self) -> Option<&dyn Selector> {
        match self {
            Source::AllNodes(s) => Some(s),
            Source::NamedSelector(s) => Some(s),
            Source::Join(_) => None,
        }
    }
}

impl From<AllNodes> for Source {
    fn from(all_nodes: AllNodes) -> Self {
        Self::AllNodes(all_nodes)
    }
}

impl From<NamedSelector> for Source {
    fn from(selector: NamedSelector) -> Self {
        Self::NamedSelector(selector)
    }
}

impl From<Join> for Source {
    fn from(join: Join) -> Self {
        Self::Join(join)
    }
}

visitable!(AllNodes, NamedSelector, Join);
visitable_enum!(Source {
    AllNodes,
    NamedSelector,
    Join
});
