use anyhow::Result;
use qom::visitor::{selectors_referenced_by, subqueries};
use qom::*;
use std::{
    collections::{hash_map::DefaultHasher, BTreeSet},
    hash::{Hash, Hasher},
    sync::Arc,
};

fn hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn cars() -> Result<Arc<Query>> {
    let year = PropertyValue::new("cars", "car:year")?;
    Ok(Query::new(NamedSelector::aliased("car:Car", "cars")?)
        .constrained_by(Comparison::new(
            year.clone(),
            Operator::GreaterThanOrEqualTo,
            Literal::new(2010),
        ))
        .adding_orderings(vec![Ordering::descending(year)])
        .with_limit(10))
}

/// Builds a set query that contains every kind of node but the limit.
fn everything() -> Result<Arc<SetQuery>> {
    let source = Join::new(
        Join::new(
            Join::new(
                Join::new(
                    NamedSelector::aliased("car:Car", "c")?,
                    JoinType::Inner,
                    AllNodes::aliased("a")?,
                    ChildNodeJoinCondition::new("c", "a")?,
                ),
                JoinType::LeftOuter,
                NamedSelector::new("m")?,
                EquiJoinCondition::new("c", "maker", "m", "name")?,
            ),
            JoinType::Cross,
            NamedSelector::new("d")?,
            DescendantNodeJoinCondition::new("c", "d")?,
        ),
        JoinType::Inner,
        NamedSelector::new("s")?,
        SameNodeJoinCondition::with_path("c", "s", Some("engine"))?,
    );
    let price = PropertyValue::new("c", "price")?;
    let subquery = Subquery::new(Query::new(NamedSelector::new("car:Maker")?));
    let constraint = Constraint::all(vec![
        Comparison::new(
            ArithmeticOperand::new(price.clone(), ArithmeticOperator::Multiply, NodeDepth::new("c")?),
            Operator::LessThan,
            BindVariableName::new("max")?,
        )
        .into(),
        Between::inclusive(Length::new(price.clone()), Literal::new(1), Literal::new(9)).into(),
        SetCriteria::new(ReferenceValue::for_property("c", "maker")?, vec![subquery])?.into(),
        Constraint::any(vec![
            PropertyExistence::new("c", "model")?.into(),
            SameNode::new("c", "/cars/1")?.into(),
            ChildNode::new("c", "/cars")?.into(),
        ])?,
        DescendantNode::new("d", "/garage")?.into(),
        FullTextSearch::new("c", "fast -slow")?.into(),
        Relike::new(Literal::new("a%"), PropertyValue::new("m", "pattern")?).into(),
        Comparison::new(
            LowerCase::new(UpperCase::new(NodeLocalName::new("c")?)),
            Operator::Like,
            Literal::new("%x%"),
        )
        .into(),
        Constraint::from(Comparison::new(
            Cast::new(NodeId::new("c")?, PropertyType::String),
            Operator::EqualTo,
            Literal::new("id"),
        ))
        .negated(),
    ])?;
    let query = Query::new(source)
        .constrained_by(constraint)
        .adding_orderings(vec![
            Ordering::descending(FullTextSearchScore::new("c")?),
            Ordering::ascending(NodeName::new("c")?),
        ])
        .adding_columns(vec![Column::new("c", "price")?, Column::all("m")?]);
    let other = Query::new(NamedSelector::new("car:Car")?)
        .adding_columns(vec![Column::named("car:Car", "p", "price")?])
        .adding_orderings(vec![Ordering::ascending(NodePath::new("car:Car")?)]);
    Ok(SetQuery::new(query, SetOperation::Union, other, false))
}

fn collect_kinds<'a>(node: Node<'a>, kinds: &mut BTreeSet<&'static str>) {
    assert!(!readable(&node).is_empty(), "{} renders as nothing", node.kind());
    kinds.insert(node.kind());
    for child in node.children() {
        collect_kinds(child, kinds);
    }
}

#[test]
fn test_cars_query() -> Result<()> {
    let query = cars()?;
    assert_eq!(
        "SELECT * FROM [car:Car] AS cars WHERE cars.[car:year] >= 2010 ORDER BY cars.[car:year] DESC LIMIT 10",
        query.to_string()
    );
    assert_eq!(Limit::new(10, 0), query.limits());
    assert_eq!(query, cars()?);
    assert_eq!(hash(&query), hash(&cars()?));
    Ok(())
}

#[test]
fn test_cars_query_with_parts() -> Result<()> {
    let query = Query::with_parts(
        NamedSelector::aliased("car:Car", "cars")?,
        Some(
            And::new(
                PropertyExistence::new("cars", "model")?,
                Comparison::new(
                    PropertyValue::new("cars", "year")?,
                    Operator::GreaterThanOrEqualTo,
                    Literal::new(2010),
                ),
            )
            .into(),
        ),
        vec![Ordering::descending(PropertyValue::new("cars", "year")?)],
        Vec::new(),
        Limit::try_from((10i64, 0i64))?,
        false,
    );
    assert_eq!(
        "SELECT * FROM [car:Car] AS cars \
         WHERE (cars.model IS NOT NULL AND cars.year >= 2010) \
         ORDER BY cars.year DESC LIMIT 10",
        query.to_string()
    );
    assert!(Limit::try_from((-1i64, 0i64)).is_err());
    Ok(())
}

#[test]
fn test_every_kind_is_rendered() -> Result<()> {
    let query = everything()?;
    let mut kinds = BTreeSet::new();
    collect_kinds(query.as_node(), &mut kinds);
    assert_eq!(39, kinds.len(), "{:?}", kinds);
    assert!(!kinds.contains("Limit"));
    assert_eq!("LIMIT 5 OFFSET 2", readable(&Limit::new(5, 2)));
    Ok(())
}

#[test]
fn test_set_query() -> Result<()> {
    let left = Query::new(NamedSelector::new("a")?);
    let right = Query::new(NamedSelector::new("b")?);
    let union = SetQuery::new(Arc::clone(&left), SetOperation::Union, Arc::clone(&right), false);
    assert_eq!("SELECT * FROM a UNION SELECT * FROM b", union.to_string());

    let union_all = union.with_all(true).with_limit(3);
    assert_eq!("SELECT * FROM a UNION ALL SELECT * FROM b LIMIT 3", union_all.to_string());
    assert_ne!(*union, *union_all);
    assert!(Arc::ptr_eq(&union_all, &union_all.with_limit(3)));
    Ok(())
}

#[test]
fn test_with_ers_share_and_preserve() -> Result<()> {
    let query = cars()?;
    let same = query.with_limit(10);
    assert!(Arc::ptr_eq(&query, &same));

    let offset = query.with_offset(20);
    assert_eq!(Limit::new(10, 20), offset.limits());
    assert_eq!(Limit::new(10, 0), query.limits());
    assert_eq!(query.constraint(), offset.constraint());
    assert!(offset.to_string().ends_with("LIMIT 10 OFFSET 20"));

    let command = QueryCommand::from(Arc::clone(&query));
    assert!(command.ptr_eq(&command.with_limit(10)));
    assert!(!command.ptr_eq(&command.with_limit(11)));
    Ok(())
}

#[test]
fn test_analysis_helpers() -> Result<()> {
    let query = everything()?;
    let names: Vec<String> = selectors_referenced_by(&*query)
        .iter()
        .map(|name| name.name().to_string())
        .collect();
    assert_eq!(vec!["a", "c", "car:Car", "car:Maker", "d", "m", "s"], names);
    assert_eq!(1, subqueries(&*query, false).len());
    Ok(())
}

#[test]
fn test_full_text_search_term() -> Result<()> {
    let search = FullTextSearch::on_property("c", "description", r#""red car" OR bike -truck"#)?;
    let term = search.term()?;
    assert!(term.matches("A red car."));
    assert!(term.matches("a bike"));
    assert!(!term.matches("a bike on a truck"));
    assert!(std::ptr::eq(term, search.term()?));
    assert_eq!(
        r#"CONTAINS(c.description,'"red car" OR bike -truck')"#,
        search.to_string()
    );

    let broken = FullTextSearch::new("c", "a OR")?;
    assert!(matches!(broken.term(), Err(Error::FullTextParse { .. })));
    Ok(())
}

#[test]
fn test_nodes_are_shared_across_threads() -> Result<()> {
    let query = everything()?;
    let texts: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| query.to_string())).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(texts.iter().all(|text| *text == texts[0]));
    Ok(())
}
