/*! `qom` is an immutable query object model for content repositories.

A query is a tree of nodes: a [`Source`] of rows (selectors and joins), an
optional [`Constraint`], [`Ordering`]s, [`Column`]s and a [`Limit`], combined
into a [`Query`] or into a [`SetQuery`] over two other queries. Nodes are built
once through validating constructors and never change afterwards; the
persistent "with-ers" of [`QueryCommand`] return updated copies that share
unchanged children.

Nodes are inspected through the [`Visitor`] trait. [`visit_all`] walks every
node of a tree and calls a visitor on each of them, [`readable`] renders the
canonical query text of a node.

```
use qom::*;

let cars = NamedSelector::aliased("car:Car", "cars")?;
let year = PropertyValue::new("cars", "car:year")?;
let query = Query::new(cars)
    .constrained_by(Comparison::new(year.clone(), Operator::GreaterThanOrEqualTo, Literal::new(2010)))
    .adding_orderings(vec![Ordering::descending(year)])
    .with_limit(10);

assert_eq!(
    "SELECT * FROM [car:Car] AS cars WHERE cars.[car:year] >= 2010 ORDER BY cars.[car:year] DESC LIMIT 10",
    query.to_string()
);
# Ok::<(), qom::Error>(())
```

Full-text predicates are expressed with [`FullTextSearch`], whose expression is
parsed into a [`Term`] on first use.
*/
#[macro_use]
mod macros;

mod error;
pub mod fulltext;
mod model;
mod tools;
pub mod visitor;

pub use error::{Error, Result};
pub use fulltext::Term;
pub use model::*;
pub use visitor::{readable, visit, visit_all, Node, Visitable, Visitor};
