use super::{Node, Visitor};
use std::collections::VecDeque;
use tracing::trace;

/// Walks query trees breadth-first, calling a strategy on every node.
///
/// Pending nodes are kept in a queue rather than on the call stack, so deep
/// constraint trees do not grow the stack.
///
/// ```
/// # use qom::{*, visitor::Navigator};
/// #[derive(Default)]
/// struct CountLiterals(usize);
///
/// impl<'a> Visitor<'a> for CountLiterals {
///     fn visit_literal(&mut self, _: &'a Literal) {
///         self.0 += 1;
///     }
/// }
///
/// let criteria = SetCriteria::new(NodeName::new("c")?, vec![Literal::new("a"), Literal::new("b")])?;
/// assert_eq!(2, Navigator::new(CountLiterals::default()).walk(criteria.as_node()).0);
/// # Ok::<(), qom::Error>(())
/// ```
pub struct Navigator<'a, S> {
    strategy: S,
    queue: VecDeque<Node<'a>>,
}

impl<'a, S: Visitor<'a>> Navigator<'a, S> {
    pub fn new(strategy: S) -> Self {
        Self {
            strategy,
            queue: VecDeque::new(),
        }
    }

    /// Walks every node of the tree rooted at `root` and returns the strategy.
    pub fn walk(self, root: Node<'a>) -> S {
        self.walk_while(root, |_| true)
    }

    /// Walks the tree rooted at `root` as long as `proceed` returns true.
    ///
    /// `proceed` is called with each node before the strategy is; once it
    /// returns false, the walk stops and no other node is visited.
    pub fn walk_while(mut self, root: Node<'a>, mut proceed: impl FnMut(&Node<'a>) -> bool) -> S {
        self.queue.push_back(root);
        let mut visited = 0usize;
        while let Some(node) = self.queue.pop_front() {
            if !proceed(&node) {
                trace!(visited, pending = self.queue.len() + 1, kind = node.kind(), "walk interrupted");
                return self.strategy;
            }
            node.accept(&mut self.strategy);
            let queue = &mut self.queue;
            node.for_each_child(|child| queue.push_back(child));
            visited += 1;
        }
        trace!(visited, "walk finished");
        self.strategy
    }
}
