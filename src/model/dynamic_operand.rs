use super::{IntoSelectorName, PropertyType, SelectorName};
use crate::{
    tools::{hash_of, non_empty, non_empty_opt},
    Error, Result,
};
use std::{collections::BTreeSet, fmt, str::FromStr, sync::Arc};

/// Is the value of a property of the nodes of a selector.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct PropertyValue {
    selector_name: SelectorName,
    property_name: String,
}

impl PropertyValue {
    pub fn new(selector_name: impl IntoSelectorName, property_name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            selector_name: selector_name.into_selector_name()?,
            property_name: non_empty("property_name", property_name)?,
        })
    }

    #[inline(always)]
    pub fn selector_name(&self) -> &SelectorName {
        &self.selector_name
    }

    #[inline(always)]
    pub fn property_name(&self) -> &str {
        &self.property_name
    }
}

/// Is the value of the reference properties of the nodes of a selector.
///
/// Without a property name every reference property is considered. The two
/// flags tell which kinds of references take part.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ReferenceValue {
    selector_name: SelectorName,
    property_name: Option<String>,
    include_weak_references: bool,
    include_simple_references: bool,
}

impl ReferenceValue {
    /// Creates an operand over every reference property, including weak and simple references.
    pub fn new(selector_name: impl IntoSelectorName) -> Result<Self> {
        Self::with_options(selector_name, None::<String>, true, true)
    }

    /// Creates an operand over a single reference property.
    pub fn for_property(selector_name: impl IntoSelectorName, property_name: impl Into<String>) -> Result<Self> {
        Self::with_options(selector_name, Some(property_name), true, true)
    }

    pub fn with_options(
        selector_name: impl IntoSelectorName,
        property_name: Option<impl Into<String>>,
        include_weak_references: bool,
        include_simple_references: bool,
    ) -> Result<Self> {
        Ok(Self {
            selector_name: selector_name.into_selector_name()?,
            property_name: non_empty_opt("property_name", property_name)?,
            include_weak_references,
            include_simple_references,
        })
    }

    #[inline(always)]
    pub fn selector_name(&self) -> &SelectorName {
        &self.selector_name
    }

    #[inline(always)]
    pub fn property_name(&self) -> Option<&str> {
        self.property_name.as_deref()
    }

    #[inline(always)]
    pub fn includes_weak_references(&self) -> bool {
        self.include_weak_references
    }

    #[inline(always)]
    pub fn includes_simple_references(&self) -> bool {
        self.include_simple_references
    }
}

/// Is the length of the value of a property.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Length {
    property_value: PropertyValue,
}

impl Length {
    pub fn new(property_value: PropertyValue) -> Self {
        Self { property_value }
    }

    #[inline(always)]
    pub fn property_value(&self) -> &PropertyValue {
        &self.property_value
    }

    #[inline(always)]
    pub fn selector_name(&self) -> &SelectorName {
        self.property_value.selector_name()
    }
}

/// Is the lower-case form of another dynamic operand.
#[derive(Clone, Debug)]
pub struct LowerCase {
    hash: u64,
    operand: Arc<DynamicOperand>,
}

impl LowerCase {
    pub fn new(operand: impl Into<DynamicOperand>) -> Self {
        let operand = Arc::new(operand.into());
        Self {
            hash: hash_of(&("LOWER", &operand)),
            operand,
        }
    }

    #[inline(always)]
    pub fn operand(&self) -> &DynamicOperand {
        &self.operand
    }
}

precomputed_hash!(LowerCase { operand });

/// Is the upper-case form of another dynamic operand.
#[derive(Clone, Debug)]
pub struct UpperCase {
    hash: u64,
    operand: Arc<DynamicOperand>,
}

impl UpperCase {
    pub fn new(operand: impl Into<DynamicOperand>) -> Self {
        let operand = Arc::new(operand.into());
        Self {
            hash: hash_of(&("UPPER", &operand)),
            operand,
        }
    }

    #[inline(always)]
    pub fn operand(&self) -> &DynamicOperand {
        &self.operand
    }
}

precomputed_hash!(UpperCase { operand });

/// Defines the operands that only depend on the node a selector selects.
macro_rules! node_operand {
    ($(#[$doc:meta] $ty:ident),+ $(,)?) => {
        $(
            #[$doc]
            #[derive(Clone, PartialEq, Eq, Hash, Debug)]
            pub struct $ty {
                selector_name: SelectorName,
            }

            impl $ty {
                pub fn new(selector_name: impl IntoSelectorName) -> Result<Self> {
                    Ok(Self {
                        selector_name: selector_name.into_selector_name()?,
                    })
                }

                #[inline(always)]
                pub fn selector_name(&self) -> &SelectorName {
                    &self.selector_name
                }
            }
        )+
    };
}

node_operand!(
    /// Is the qualified name of the node.
    NodeName,
    /// Is the local part of the name of the node.
    NodeLocalName,
    /// Is the path of the node.
    NodePath,
    /// Is the depth of the node in the repository (the root is at depth 0).
    NodeDepth,
    /// Is the identifier of the node.
    NodeId,
    /// Is the score of the node in the full-text searches of its selector.
    FullTextSearchScore,
);

/// Is an operator of an [`ArithmeticOperand`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ArithmeticOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ArithmeticOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

impl fmt::Display for ArithmeticOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for ArithmeticOperator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "+" => Ok(Self::Add),
            "-" => Ok(Self::Subtract),
            "*" => Ok(Self::Multiply),
            "/" => Ok(Self::Divide),
            _ => Err(Error::unsupported("arithmetic operator", s)),
        }
    }
}

/// Is the result of an arithmetic operation over two dynamic operands.
#[derive(Clone, Debug)]
pub struct ArithmeticOperand {
    hash: u64,
    left: Arc<DynamicOperand>,
    operator: ArithmeticOperator,
    right: Arc<DynamicOperand>,
}

impl ArithmeticOperand {
    pub fn new(left: impl Into<DynamicOperand>, operator: ArithmeticOperator, right: impl Into<DynamicOperand>) -> Self {
        let left = Arc::new(left.into());
        let right = Arc::new(right.into());
        Self {
            hash: hash_of(&(&left, operator, &right)),
            left,
            operator,
            right,
        }
    }

    #[inline(always)]
    pub fn left(&self) -> &DynamicOperand {
        &self.left
    }

    #[inline(always)]
    pub fn operator(&self) -> ArithmeticOperator {
        self.operator
    }

    #[inline(always)]
    pub fn right(&self) -> &DynamicOperand {
        &self.right
    }
}

precomputed_hash!(ArithmeticOperand { operator, left, right });

/// Is a dynamic operand converted to another property type.
#[derive(Clone, Debug)]
pub struct Cast {
    hash: u64,
    operand: Arc<DynamicOperand>,
    target_type: PropertyType,
}

impl Cast {
    pub fn new(operand: impl Into<DynamicOperand>, target_type: PropertyType) -> Self {
        let operand = Arc::new(operand.into());
        Self {
            hash: hash_of(&(&operand, target_type)),
            operand,
            target_type,
        }
    }

    #[inline(always)]
    pub fn operand(&self) -> &DynamicOperand {
        &self.operand
    }

    #[inline(always)]
    pub fn target_type(&self) -> PropertyType {
        self.target_type
    }
}

precomputed_hash!(Cast { target_type, operand });

/// Is an operand whose value is computed for every row.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum DynamicOperand {
    PropertyValue(PropertyValue),
    ReferenceValue(ReferenceValue),
    Length(Length),
    LowerCase(LowerCase),
    UpperCase(UpperCase),
    NodeName(NodeName),
    NodeLocalName(NodeLocalName),
    NodePath(NodePath),
    NodeDepth(NodeDepth),
    NodeId(NodeId),
    FullTextSearchScore(FullTextSearchScore),
    ArithmeticOperand(ArithmeticOperand),
    Cast(Cast),
}

impl DynamicOperand {
    /// Returns the names of the selectors the operand depends on. The set is never empty.
    pub fn selector_names(&self) -> BTreeSet<SelectorName> {
        let mut names = BTreeSet::new();
        self.collect_selector_names(&mut names);
        names
    }

    fn collect_selector_names(&self, names: &mut BTreeSet<SelectorName>) {
        let name = match self {
            Self::PropertyValue(o) => o.selector_name(),
            Self::ReferenceValue(o) => o.selector_name(),
            Self::Length(o) => o.selector_name(),
            Self::NodeName(o) => o.selector_name(),
            Self::NodeLocalName(o) => o.selector_name(),
            Self::NodePath(o) => o.selector_name(),
            Self::NodeDepth(o) => o.selector_name(),
            Self::NodeId(o) => o.selector_name(),
            Self::FullTextSearchScore(o) => o.selector_name(),
            Self::LowerCase(o) => return o.operand().collect_selector_names(names),
            Self::UpperCase(o) => return o.operand().collect_selector_names(names),
            Self::Cast(o) => return o.operand().collect_selector_names(names),
            Self::ArithmeticOperand(o) => {
                o.left().collect_selector_names(names);
                return o.right().collect_selector_names(names);
            }
        };
        names.insert(name.clone());
    }
}

macro_rules! dynamic_operand_from {
    ($($ty:ident),+) => {
        $(
            impl From<$ty> for DynamicOperand {
                fn from(operand: $ty) -> Self {
                    Self::$ty(operand)
                }
            }
        )+
    };
}

dynamic_operand_from!(
    PropertyValue,
    ReferenceValue,
    Length,
    LowerCase,
    UpperCase,
    NodeName,
    NodeLocalName,
    NodePath,
    NodeDepth,
    NodeId,
    FullTextSearchScore,
    ArithmeticOperand,
    Cast
);

visitable!(
    PropertyValue,
    ReferenceValue,
    Length,
    LowerCase,
    UpperCase,
    NodeName,
    NodeLocalName,
    NodePath,
    NodeDepth,
    NodeId,
    FullTextSearchScore,
    ArithmeticOperand,
    Cast
);
visitable_enum!(DynamicOperand {
    PropertyValue,
    ReferenceValue,
    Length,
    LowerCase,
    UpperCase,
    NodeName,
    NodeLocalName,
    NodePath,
    NodeDepth,
    NodeId,
    FullTextSearchScore,
    ArithmeticOperand,
    Cast
});
