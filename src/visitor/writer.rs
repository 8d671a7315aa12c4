use super::{Node, Visitable, Visitor};
use crate::model::*;

/// Is a piece of output that is still to be written.
enum Piece<'a> {
    Text(String),
    Node(Node<'a>),
}

/// Renders nodes as canonical query text.
///
/// Visiting a node does not render its children: it records the text of the
/// node and the children in between, in output order. [`render`] keeps the
/// pieces that are not written yet on a stack, so the depth of a tree does not
/// grow the call stack.
#[derive(Default)]
struct ReadableVisitor<'a> {
    pieces: Vec<Piece<'a>>,
}

/// Returns the canonical query text of the tree rooted at `root`.
pub(crate) fn render(root: Node<'_>) -> String {
    let mut text = String::new();
    let mut writer = ReadableVisitor::default();
    let mut pending = vec![Piece::Node(root)];
    while let Some(piece) = pending.pop() {
        match piece {
            Piece::Text(t) => text.push_str(&t),
            Piece::Node(node) => {
                node.accept(&mut writer);
                pending.extend(writer.pieces.drain(..).rev());
            }
        }
    }
    text
}

impl<'a> ReadableVisitor<'a> {
    fn append(&mut self, text: &str) -> &mut Self {
        match self.pieces.last_mut() {
            Some(Piece::Text(last)) => last.push_str(text),
            _ => self.pieces.push(Piece::Text(text.to_string())),
        }
        self
    }

    fn append_char(&mut self, c: char) -> &mut Self {
        let mut buffer = [0; 4];
        self.append(c.encode_utf8(&mut buffer))
    }

    /// Appends a name, in brackets if it contains anything but letters and digits.
    fn append_name(&mut self, name: &str) -> &mut Self {
        if name.chars().all(char::is_alphanumeric) {
            self.append(name)
        } else {
            self.append_char('[').append(name).append_char(']')
        }
    }

    fn append_selector(&mut self, name: &SelectorName) -> &mut Self {
        self.append_name(name.name())
    }

    fn append_property(&mut self, selector: &SelectorName, property: &str) -> &mut Self {
        self.append_selector(selector).append_char('.').append_name(property)
    }

    /// Appends `text` in single quotes, doubling the quotes it contains.
    fn append_quoted(&mut self, text: &str) -> &mut Self {
        self.append_char('\'').append(&text.replace('\'', "''")).append_char('\'')
    }

    fn append_node<T: Visitable + ?Sized>(&mut self, node: &'a T) -> &mut Self {
        self.pieces.push(Piece::Node(node.as_node()));
        self
    }

    fn append_list<T: Visitable>(&mut self, nodes: &'a [T], separator: &str) -> &mut Self {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.append(separator);
            }
            self.append_node(node);
        }
        self
    }

    fn append_selector_function(&mut self, function: &str, selector: &SelectorName) {
        self.append(function).append_char('(').append_selector(selector).append_char(')');
    }

    fn append_selector_aliased(&mut self, selector: &dyn Selector) {
        self.append_selector(selector.name());
        if let Some(alias) = selector.alias() {
            self.append(" AS ").append_selector(alias);
        }
    }

    /// Appends `LIMIT n`, `OFFSET m` or both. The row limit is left out when
    /// rows are not limited.
    fn append_limit(&mut self, limit: &Limit) {
        if limit.has_row_limited() {
            self.append("LIMIT ").append(&limit.row_limit().to_string());
            if limit.is_offset() {
                self.append(" OFFSET ").append(&limit.offset().to_string());
            }
        } else {
            self.append("OFFSET ").append(&limit.offset().to_string());
        }
    }

    fn append_orderings_and_limit(&mut self, orderings: &'a [Ordering], limit: &Limit) {
        if !orderings.is_empty() {
            self.append(" ORDER BY ").append_list(orderings, ", ");
        }
        if !limit.is_unlimited() {
            self.append_char(' ').append_limit(limit);
        }
    }
}

impl<'a> Visitor<'a> for ReadableVisitor<'a> {
    fn visit_all_nodes(&mut self, all_nodes: &'a AllNodes) {
        self.append_selector_aliased(all_nodes);
    }

    fn visit_named_selector(&mut self, selector: &'a NamedSelector) {
        self.append_selector_aliased(selector);
    }

    fn visit_join(&mut self, join: &'a Join) {
        self.append_node(join.left())
            .append_char(' ')
            .append(join.join_type().symbol())
            .append_char(' ')
            .append_node(join.right())
            .append(" ON ")
            .append_node(join.condition());
    }

    fn visit_equi_join_condition(&mut self, condition: &'a EquiJoinCondition) {
        self.append_property(condition.selector1_name(), condition.property1_name())
            .append(" = ")
            .append_property(condition.selector2_name(), condition.property2_name());
    }

    fn visit_child_node_join_condition(&mut self, condition: &'a ChildNodeJoinCondition) {
        self.append("ISCHILDNODE(")
            .append_selector(condition.child_selector_name())
            .append_char(',')
            .append_selector(condition.parent_selector_name())
            .append_char(')');
    }

    fn visit_descendant_node_join_condition(&mut self, condition: &'a DescendantNodeJoinCondition) {
        self.append("ISDESCENDANTNODE(")
            .append_selector(condition.descendant_selector_name())
            .append_char(',')
            .append_selector(condition.ancestor_selector_name())
            .append_char(')');
    }

    fn visit_same_node_join_condition(&mut self, condition: &'a SameNodeJoinCondition) {
        self.append("ISSAMENODE(")
            .append_selector(condition.selector1_name())
            .append_char(',')
            .append_selector(condition.selector2_name());
        if let Some(path) = condition.selector2_path() {
            self.append_char(',').append_quoted(path);
        }
        self.append_char(')');
    }

    fn visit_and(&mut self, and: &'a And) {
        self.append_char('(')
            .append_node(and.left())
            .append(" AND ")
            .append_node(and.right())
            .append_char(')');
    }

    fn visit_or(&mut self, or: &'a Or) {
        self.append_char('(')
            .append_node(or.left())
            .append(" OR ")
            .append_node(or.right())
            .append_char(')');
    }

    fn visit_not(&mut self, not: &'a Not) {
        self.append("NOT (").append_node(not.constraint()).append_char(')');
    }

    fn visit_comparison(&mut self, comparison: &'a Comparison) {
        self.append_node(comparison.operand1())
            .append_char(' ')
            .append(comparison.operator().symbol())
            .append_char(' ')
            .append_node(comparison.operand2());
    }

    fn visit_between(&mut self, between: &'a Between) {
        self.append_node(between.operand())
            .append(" BETWEEN ")
            .append_node(between.lower_bound());
        if !between.is_lower_bound_included() {
            self.append(" EXCLUSIVE");
        }
        self.append(" AND ").append_node(between.upper_bound());
        if !between.is_upper_bound_included() {
            self.append(" EXCLUSIVE");
        }
    }

    fn visit_set_criteria(&mut self, criteria: &'a SetCriteria) {
        self.append_node(criteria.operand())
            .append(" IN (")
            .append_list(criteria.values(), ",")
            .append_char(')');
    }

    fn visit_property_existence(&mut self, existence: &'a PropertyExistence) {
        self.append_property(existence.selector_name(), existence.property_name())
            .append(" IS NOT NULL");
    }

    fn visit_same_node(&mut self, same_node: &'a SameNode) {
        self.append("ISSAMENODE(")
            .append_selector(same_node.selector_name())
            .append_char(',')
            .append_quoted(same_node.path())
            .append_char(')');
    }

    fn visit_child_node(&mut self, child: &'a ChildNode) {
        self.append("ISCHILDNODE(")
            .append_selector(child.selector_name())
            .append_char(',')
            .append_quoted(child.parent_path())
            .append_char(')');
    }

    fn visit_descendant_node(&mut self, descendant: &'a DescendantNode) {
        self.append("ISDESCENDANTNODE(")
            .append_selector(descendant.selector_name())
            .append_char(',')
            .append_quoted(descendant.ancestor_path())
            .append_char(')');
    }

    fn visit_full_text_search(&mut self, search: &'a FullTextSearch) {
        self.append("CONTAINS(").append_selector(search.selector_name());
        if let Some(property) = search.property_name() {
            self.append_char('.').append_name(property);
        }
        self.append_char(',').append_quoted(search.expression()).append_char(')');
    }

    fn visit_relike(&mut self, relike: &'a Relike) {
        self.append("RELIKE(")
            .append_node(relike.operand1())
            .append_char(',')
            .append_node(relike.operand2())
            .append_char(')');
    }

    fn visit_property_value(&mut self, value: &'a PropertyValue) {
        self.append_property(value.selector_name(), value.property_name());
    }

    fn visit_reference_value(&mut self, value: &'a ReferenceValue) {
        self.append("REFERENCE(").append_selector(value.selector_name());
        if let Some(property) = value.property_name() {
            self.append_char('.').append_name(property);
        }
        self.append_char(')');
    }

    fn visit_length(&mut self, length: &'a Length) {
        self.append("LENGTH(").append_node(length.property_value()).append_char(')');
    }

    fn visit_lower_case(&mut self, lower_case: &'a LowerCase) {
        self.append("LOWER(").append_node(lower_case.operand()).append_char(')');
    }

    fn visit_upper_case(&mut self, upper_case: &'a UpperCase) {
        self.append("UPPER(").append_node(upper_case.operand()).append_char(')');
    }

    fn visit_node_name(&mut self, name: &'a NodeName) {
        self.append_selector_function("NAME", name.selector_name());
    }

    fn visit_node_local_name(&mut self, name: &'a NodeLocalName) {
        self.append_selector_function("LOCALNAME", name.selector_name());
    }

    fn visit_node_path(&mut self, path: &'a NodePath) {
        self.append_selector_function("PATH", path.selector_name());
    }

    fn visit_node_depth(&mut self, depth: &'a NodeDepth) {
        self.append_selector_function("DEPTH", depth.selector_name());
    }

    fn visit_node_id(&mut self, id: &'a NodeId) {
        self.append_selector_function("ID", id.selector_name());
    }

    fn visit_full_text_search_score(&mut self, score: &'a FullTextSearchScore) {
        self.append_selector_function("SCORE", score.selector_name());
    }

    fn visit_arithmetic_operand(&mut self, operand: &'a ArithmeticOperand) {
        self.append_char('(')
            .append_node(operand.left())
            .append_char(' ')
            .append(operand.operator().symbol())
            .append_char(' ')
            .append_node(operand.right())
            .append_char(')');
    }

    fn visit_cast(&mut self, cast: &'a Cast) {
        self.append("CAST(")
            .append_node(cast.operand())
            .append(" AS ")
            .append(cast.target_type().name())
            .append_char(')');
    }

    fn visit_literal(&mut self, literal: &'a Literal) {
        let value = literal.value();
        match value {
            Value::String(s) => {
                self.append_quoted(s);
            }
            Value::Long(_) | Value::Double(_) | Value::Decimal(_) | Value::Boolean(_) => {
                self.append(&value.as_string());
            }
            _ => {
                self.append("CAST(")
                    .append_quoted(&value.as_string())
                    .append(" AS ")
                    .append(value.property_type().name())
                    .append_char(')');
            }
        }
    }

    fn visit_bind_variable_name(&mut self, variable: &'a BindVariableName) {
        self.append_char('$').append(variable.name());
    }

    fn visit_subquery(&mut self, subquery: &'a Subquery) {
        self.append_char('(').append_node(subquery.query()).append_char(')');
    }

    fn visit_ordering(&mut self, ordering: &'a Ordering) {
        self.append_node(ordering.operand())
            .append_char(' ')
            .append(ordering.order().symbol());
    }

    fn visit_column(&mut self, column: &'a Column) {
        self.append_selector(column.selector_name());
        match column.property_name() {
            None => {
                self.append(".*");
            }
            Some(property) => {
                self.append_char('.').append_name(property);
                if let Some(name) = column.column_name().filter(|_| column.is_renamed()) {
                    self.append(" AS ").append_name(name);
                }
            }
        }
    }

    fn visit_limit(&mut self, limit: &'a Limit) {
        self.append_limit(limit);
    }

    fn visit_query(&mut self, query: &'a Query) {
        self.append("SELECT ");
        if query.is_distinct() {
            self.append("DISTINCT ");
        }
        if query.columns().is_empty() {
            self.append_char('*');
        } else {
            self.append_list(query.columns(), ", ");
        }
        self.append(" FROM ").append_node(query.source());
        if let Some(constraint) = query.constraint() {
            self.append(" WHERE ").append_node(constraint);
        }
        self.append_orderings_and_limit(query.orderings(), &query.limits());
    }

    fn visit_set_query(&mut self, query: &'a SetQuery) {
        self.append_node(query.left())
            .append_char(' ')
            .append(query.operation().symbol())
            .append_char(' ');
        if query.is_all() {
            self.append("ALL ");
        }
        self.append_node(query.right());
        self.append_orderings_and_limit(query.orderings(), &query.limits());
    }
}
