use super::{DynamicOperand, FullTextSearch, IntoSelectorName, PropertyValue, SelectorName, StaticOperand};
use crate::{
    tools::{hash_of, non_empty},
    Error, Result,
};
use std::{fmt, str::FromStr, sync::Arc};

/// Is the conjunction of two constraints.
#[derive(Clone, Debug)]
pub struct And {
    hash: u64,
    left: Arc<Constraint>,
    right: Arc<Constraint>,
}

impl And {
    pub fn new(left: impl Into<Constraint>, right: impl Into<Constraint>) -> Self {
        let left = Arc::new(left.into());
        let right = Arc::new(right.into());
        Self {
            hash: hash_of(&("AND", &left, &right)),
            left,
            right,
        }
    }

    #[inline(always)]
    pub fn left(&self) -> &Constraint {
        &self.left
    }

    #[inline(always)]
    pub fn right(&self) -> &Constraint {
        &self.right
    }
}

precomputed_hash!(And { left, right });

/// Is the disjunction of two constraints.
#[derive(Clone, Debug)]
pub struct Or {
    hash: u64,
    left: Arc<Constraint>,
    right: Arc<Constraint>,
}

impl Or {
    pub fn new(left: impl Into<Constraint>, right: impl Into<Constraint>) -> Self {
        let left = Arc::new(left.into());
        let right = Arc::new(right.into());
        Self {
            hash: hash_of(&("OR", &left, &right)),
            left,
            right,
        }
    }

    #[inline(always)]
    pub fn left(&self) -> &Constraint {
        &self.left
    }

    #[inline(always)]
    pub fn right(&self) -> &Constraint {
        &self.right
    }
}

precomputed_hash!(Or { left, right });

/// Is the negation of a constraint.
#[derive(Clone, Debug)]
pub struct Not {
    hash: u64,
    constraint: Arc<Constraint>,
}

impl Not {
    pub fn new(constraint: impl Into<Constraint>) -> Self {
        let constraint = Arc::new(constraint.into());
        Self {
            hash: hash_of(&("NOT", &constraint)),
            constraint,
        }
    }

    #[inline(always)]
    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }
}

precomputed_hash!(Not { constraint });

/// Is the operator of a [`Comparison`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Operator {
    EqualTo,
    NotEqualTo,
    LessThan,
    LessThanOrEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
    Like,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::EqualTo => "=",
            Self::NotEqualTo => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqualTo => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqualTo => ">=",
            Self::Like => "LIKE",
        }
    }

    /// Returns the operator that gives the same result when the operands are swapped.
    pub fn reverse(&self) -> Self {
        match self {
            Self::LessThan => Self::GreaterThan,
            Self::LessThanOrEqualTo => Self::GreaterThanOrEqualTo,
            Self::GreaterThan => Self::LessThan,
            Self::GreaterThanOrEqualTo => Self::LessThanOrEqualTo,
            other => *other,
        }
    }

    /// Returns the operator that gives the opposite result for the same operands.
    ///
    /// `LIKE` has no inverse among the operators.
    pub fn inverse(&self) -> Option<Self> {
        let inverse = match self {
            Self::EqualTo => Self::NotEqualTo,
            Self::NotEqualTo => Self::EqualTo,
            Self::LessThan => Self::GreaterThanOrEqualTo,
            Self::LessThanOrEqualTo => Self::GreaterThan,
            Self::GreaterThan => Self::LessThanOrEqualTo,
            Self::GreaterThanOrEqualTo => Self::LessThan,
            Self::Like => return None,
        };
        Some(inverse)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = Error;

    /// Accepts the operator symbols (`LIKE` in any case) and the JCR operator constants.
    fn from_str(s: &str) -> Result<Self> {
        let operator = match s.trim() {
            "=" | "jcr.operator.equal.to" => Self::EqualTo,
            "!=" | "<>" | "jcr.operator.not.equal.to" => Self::NotEqualTo,
            "<" | "jcr.operator.less.than" => Self::LessThan,
            "<=" | "jcr.operator.less.than.or.equal.to" => Self::LessThanOrEqualTo,
            ">" | "jcr.operator.greater.than" => Self::GreaterThan,
            ">=" | "jcr.operator.greater.than.or.equal.to" => Self::GreaterThanOrEqualTo,
            "jcr.operator.like" => Self::Like,
            other if other.eq_ignore_ascii_case("LIKE") => Self::Like,
            _ => return Err(Error::unsupported("operator", s)),
        };
        Ok(operator)
    }
}

/// Is a constraint comparing a dynamic operand with a static one.
#[derive(Clone, Debug)]
pub struct Comparison {
    hash: u64,
    operand1: DynamicOperand,
    operator: Operator,
    operand2: StaticOperand,
}

impl Comparison {
    pub fn new(operand1: impl Into<DynamicOperand>, operator: Operator, operand2: impl Into<StaticOperand>) -> Self {
        let operand1 = operand1.into();
        let operand2 = operand2.into();
        Self {
            hash: hash_of(&(&operand1, operator, &operand2)),
            operand1,
            operator,
            operand2,
        }
    }

    #[inline(always)]
    pub fn operand1(&self) -> &DynamicOperand {
        &self.operand1
    }

    #[inline(always)]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    #[inline(always)]
    pub fn operand2(&self) -> &StaticOperand {
        &self.operand2
    }
}

precomputed_hash!(Comparison {
    operator,
    operand1,
    operand2
});

/// Is a constraint that holds when an operand lies between two bounds.
#[derive(Clone, Debug)]
pub struct Between {
    hash: u64,
    operand: DynamicOperand,
    lower_bound: StaticOperand,
    upper_bound: StaticOperand,
    lower_bound_included: bool,
    upper_bound_included: bool,
}

impl Between {
    pub fn new(
        operand: impl Into<DynamicOperand>,
        lower_bound: impl Into<StaticOperand>,
        upper_bound: impl Into<StaticOperand>,
        lower_bound_included: bool,
        upper_bound_included: bool,
    ) -> Self {
        let operand = operand.into();
        let lower_bound = lower_bound.into();
        let upper_bound = upper_bound.into();
        Self {
            hash: hash_of(&(
                &operand,
                &lower_bound,
                &upper_bound,
                lower_bound_included,
                upper_bound_included,
            )),
            operand,
            lower_bound,
            upper_bound,
            lower_bound_included,
            upper_bound_included,
        }
    }

    /// Creates a constraint that includes both bounds.
    pub fn inclusive(
        operand: impl Into<DynamicOperand>,
        lower_bound: impl Into<StaticOperand>,
        upper_bound: impl Into<StaticOperand>,
    ) -> Self {
        Self::new(operand, lower_bound, upper_bound, true, true)
    }

    #[inline(always)]
    pub fn operand(&self) -> &DynamicOperand {
        &self.operand
    }

    #[inline(always)]
    pub fn lower_bound(&self) -> &StaticOperand {
        &self.lower_bound
    }

    #[inline(always)]
    pub fn upper_bound(&self) -> &StaticOperand {
        &self.upper_bound
    }

    #[inline(always)]
    pub fn is_lower_bound_included(&self) -> bool {
        self.lower_bound_included
    }

    #[inline(always)]
    pub fn is_upper_bound_included(&self) -> bool {
        self.upper_bound_included
    }
}

precomputed_hash!(Between {
    lower_bound_included,
    upper_bound_included,
    operand,
    lower_bound,
    upper_bound
});

/// Is a constraint that holds when an operand equals one of a set of values.
#[derive(Clone, Debug)]
pub struct SetCriteria {
    hash: u64,
    operand: DynamicOperand,
    values: Vec<StaticOperand>,
}

impl SetCriteria {
    /// Creates the constraint, failing if `values` is empty.
    pub fn new<I>(operand: impl Into<DynamicOperand>, values: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<StaticOperand>,
    {
        let operand = operand.into();
        let values: Vec<StaticOperand> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(Error::empty("values"));
        }
        Ok(Self {
            hash: hash_of(&(&operand, &values)),
            operand,
            values,
        })
    }

    #[inline(always)]
    pub fn operand(&self) -> &DynamicOperand {
        &self.operand
    }

    #[inline(always)]
    pub fn values(&self) -> &[StaticOperand] {
        &self.values
    }
}

precomputed_hash!(SetCriteria { operand, values });

/// Is a constraint that holds when the nodes of a selector have a property.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct PropertyExistence {
    selector_name: SelectorName,
    property_name: String,
}

impl PropertyExistence {
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

/// Defines the constraints relating the node of a selector to a path.
macro_rules! path_constraint {
    ($(#[$doc:meta] $ty:ident { $path:ident }),+ $(,)?) => {
        $(
            #[$doc]
            #[derive(Clone, PartialEq, Eq, Hash, Debug)]
            pub struct $ty {
                selector_name: SelectorName,
                $path: String,
            }

            impl $ty {
                pub fn new(selector_name: impl IntoSelectorName, $path: impl Into<String>) -> Result<Self> {
                    Ok(Self {
                        selector_name: selector_name.into_selector_name()?,
                        $path: non_empty(stringify!($path), $path)?,
                    })
                }

                #[inline(always)]
                pub fn selector_name(&self) -> &SelectorName {
                    &self.selector_name
                }

                #[inline(always)]
                pub fn $path(&self) -> &str {
                    &self.$path
                }
            }
        )+
    };
}

path_constraint!(
    /// Is a constraint that holds when the node of a selector is found at a path.
    SameNode { path },
    /// Is a constraint that holds when the node of a selector is a child of the node at a path.
    ChildNode { parent_path },
    /// Is a constraint that holds when the node of a selector is below the node at a path.
    DescendantNode { ancestor_path },
);

/// Is a reversed `LIKE`: the value of `operand1` is matched against the value
/// of the property, which is taken as the pattern.
#[derive(Clone, Debug)]
pub struct Relike {
    hash: u64,
    operand1: StaticOperand,
    operand2: PropertyValue,
}

impl Relike {
    pub fn new(operand1: impl Into<StaticOperand>, operand2: PropertyValue) -> Self {
        let operand1 = operand1.into();
        Self {
            hash: hash_of(&("RELIKE", &operand1, &operand2)),
            operand1,
            operand2,
        }
    }

    #[inline(always)]
    pub fn operand1(&self) -> &StaticOperand {
        &self.operand1
    }

    #[inline(always)]
    pub fn operand2(&self) -> &PropertyValue {
        &self.operand2
    }
}

precomputed_hash!(Relike { operand1, operand2 });

/// Is a condition the rows of a query must satisfy.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Constraint {
    And(And),
    Or(Or),
    Not(Not),
    Comparison(Comparison),
    Between(Between),
    SetCriteria(SetCriteria),
    PropertyExistence(PropertyExistence),
    SameNode(SameNode),
    ChildNode(ChildNode),
    DescendantNode(DescendantNode),
    FullTextSearch(FullTextSearch),
    Relike(Relike),
}

impl Constraint {
    /// Combines `constraints` with `AND`, folding to the left. A single
    /// constraint is returned unchanged.
    pub fn all(constraints: impl IntoIterator<Item = Constraint>) -> Result<Constraint> {
        let mut constraints = constraints.into_iter();
        let first = constraints.next().ok_or_else(|| Error::empty("constraints"))?;
        Ok(constraints.fold(first, |left, right| And::new(left, right).into()))
    }

    /// Combines `constraints` with `OR`, folding to the left. A single
    /// constraint is returned unchanged.
    pub fn any(constraints: impl IntoIterator<Item = Constraint>) -> Result<Constraint> {
        let mut constraints = constraints.into_iter();
        let first = constraints.next().ok_or_else(|| Error::empty("constraints"))?;
        Ok(constraints.fold(first, |left, right| Or::new(left, right).into()))
    }

    /// Returns the negation of the receiver.
    pub fn negated(self) -> Constraint {
        Not::new(self).into()
    }
}

macro_rules! constraint_from {
    ($($ty:ident),+) => {
        $(
            impl From<$ty> for Constraint {
                fn from(constraint: $ty) -> Self {
                    Self::$ty(constraint)
                }
            }
        )+
    };
}

constraint_from!(
    And,
    Or,
    Not,
    Comparison,
    Between,
    SetCriteria,
    PropertyExistence,
    SameNode,
    ChildNode,
    DescendantNode,
    FullTextSearch,
    Relike
);

visitable!(
    And,
    Or,
    Not,
    Comparison,
    Between,
    SetCriteria,
    PropertyExistence,
    SameNode,
    ChildNode,
    DescendantNode,
    Relike
);
visitable_enum!(Constraint {
    And,
    Or,
    Not,
    Comparison,
    Between,
    SetCriteria,
    PropertyExistence,
    SameNode,
    ChildNode,
    DescendantNode,
    FullTextSearch,
    Relike
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{Literal, NodeName},
        tools::hash_of,
    };

    fn exists(property: &str) -> Constraint {
        PropertyExistence::new("c", property).unwrap().into()
    }

    fn year() -> PropertyValue {
        PropertyValue::new("c", "year").unwrap()
    }

    #[test]
    fn test_operator_from_str() {
        assert_eq!(Operator::GreaterThanOrEqualTo, ">=".parse().unwrap());
        assert_eq!(Operator::Like, "like".parse().unwrap());
        assert_eq!(Operator::NotEqualTo, "jcr.operator.not.equal.to".parse().unwrap());
        assert_eq!(
            Err(Error::UnsupportedSymbol {
                kind: "operator".into(),
                symbol: "=~".into()
            }),
            "=~".parse::<Operator>()
        );
    }

    #[test]
    fn test_operator_reverse_inverse() {
        assert_eq!(Operator::GreaterThan, Operator::LessThan.reverse());
        assert_eq!(Operator::EqualTo, Operator::EqualTo.reverse());
        assert_eq!(Some(Operator::GreaterThanOrEqualTo), Operator::LessThan.inverse());
        assert_eq!(Some(Operator::EqualTo), Operator::NotEqualTo.inverse());
        assert_eq!(None, Operator::Like.inverse());
    }

    #[test]
    fn test_comparison_eq() {
        let a = Comparison::new(year(), Operator::EqualTo, Literal::new(2010));
        let b = Comparison::new(year(), Operator::EqualTo, Literal::new(2010));
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, Comparison::new(year(), Operator::NotEqualTo, Literal::new(2010)));
        assert_ne!(a, Comparison::new(year(), Operator::EqualTo, Literal::new(2011)));
    }

    #[test]
    fn test_between() {
        let between = Between::inclusive(year(), Literal::new(2000), Literal::new(2010));
        assert!(between.is_lower_bound_included());
        assert!(between.is_upper_bound_included());
        assert_ne!(
            between,
            Between::new(year(), Literal::new(2000), Literal::new(2010), true, false)
        );
    }

    #[test]
    fn test_set_criteria() {
        let criteria = SetCriteria::new(year(), vec![Literal::new(2000), Literal::new(2010)]).unwrap();
        assert_eq!(2, criteria.values().len());
        assert_eq!(
            Err(Error::EmptyArgument {
                argument: "values".into()
            }),
            SetCriteria::new(year(), Vec::<Literal>::new())
        );
    }

    #[test]
    fn test_path_constraints() {
        assert_eq!("/cars", SameNode::new("c", "/cars").unwrap().path());
        assert_eq!("/a", ChildNode::new("c", "/a").unwrap().parent_path());
        assert_eq!("/b", DescendantNode::new("c", "/b").unwrap().ancestor_path());
        assert!(ChildNode::new("c", "").is_err());
        assert!(DescendantNode::new("", "/b").is_err());
    }

    #[test]
    fn test_all_any() {
        assert_eq!(Ok(exists("a")), Constraint::all(vec![exists("a")]));
        assert_eq!(
            Ok(Constraint::from(And::new(And::new(exists("a"), exists("b")), exists("c")))),
            Constraint::all(vec![exists("a"), exists("b"), exists("c")])
        );
        assert_eq!(
            Ok(Constraint::from(Or::new(exists("a"), exists("b")))),
            Constraint::any(vec![exists("a"), exists("b")])
        );
        assert!(Constraint::any(Vec::new()).is_err());
        assert_eq!(
            Constraint::any(vec![exists("a"), exists("b"), exists("c")]),
            or![exists("a"), exists("b"), exists("c")]
        );
        assert_eq!(Ok(exists("a")), and![exists("a")]);
    }

    #[test]
    fn test_and_or_differ() {
        let and = Constraint::from(And::new(exists("a"), exists("b")));
        let or = Constraint::from(Or::new(exists("a"), exists("b")));
        assert_ne!(and, or);
        assert_ne!(and, Constraint::from(And::new(exists("b"), exists("a"))));
        assert_eq!(Constraint::from(Not::new(exists("a"))), exists("a").negated());
    }

    #[test]
    fn test_relike() {
        let relike = Relike::new(Literal::new("Ford"), PropertyValue::new("c", "pattern").unwrap());
        assert_eq!("pattern", relike.operand2().property_name());
        assert_eq!(relike, relike.clone());
        assert_ne!(
            Comparison::new(NodeName::new("c").unwrap(), Operator::Like, Literal::new("F%")),
            Comparison::new(NodeName::new("c").unwrap(), Operator::EqualTo, Literal::new("F%")),
        );
    }
}
