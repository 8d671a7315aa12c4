mod column;
mod command;
mod constraint;
mod dynamic_operand;
mod full_text_search;
mod join_condition;
mod limit;
mod ordering;
mod query;
mod selector_name;
mod set_query;
mod source;
mod static_operand;
mod value;

pub use column::Column;
pub use command::QueryCommand;
pub use constraint::{
    And, Between, ChildNode, Comparison, Constraint, DescendantNode, Not, Operator, Or,
    PropertyExistence, Relike, SameNode, SetCriteria,
};
pub use dynamic_operand::{
    ArithmeticOperand, ArithmeticOperator, Cast, DynamicOperand, FullTextSearchScore, Length,
    LowerCase, NodeDepth, NodeId, NodeLocalName, NodeName, NodePath, PropertyValue,
    ReferenceValue, UpperCase,
};
pub use full_text_search::FullTextSearch;
pub use join_condition::{
    ChildNodeJoinCondition, DescendantNodeJoinCondition, EquiJoinCondition, JoinCondition,
    SameNodeJoinCondition,
};
pub use limit::Limit;
pub use ordering::{Order, Ordering};
pub use query::Query;
pub use selector_name::{IntoSelectorName, SelectorName};
pub use set_query::{SetOperation, SetQuery};
pub use source::{AllNodes, Join, JoinType, NamedSelector, Selector, Source};
pub use static_operand::{BindVariableName, Literal, StaticOperand, Subquery};
pub use value::{PropertyType, Value};
