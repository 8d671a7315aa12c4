use super::{IntoSelectorName, Literal, SelectorName, StaticOperand};
use crate::{
    fulltext::{self, Term},
    tools::{hash_of, non_empty, non_empty_opt},
    Result,
};
use once_cell::race::OnceBox;
use std::fmt;
use tracing::trace;

/// Is a constraint that holds when the nodes of a selector (or one of their
/// properties) match a full-text search expression.
///
/// The expression is parsed into a [`Term`] the first time [`term`] is called
/// and the result is kept for later calls. Threads calling [`term`] for the
/// first time at once may each parse the expression; they all get the same
/// `Term` back.
///
/// [`term`]: #method.term
pub struct FullTextSearch {
    hash: u64,
    selector_name: SelectorName,
    property_name: Option<String>,
    expression: String,
    term: OnceBox<Term>,
    expression_operand: OnceBox<StaticOperand>,
}

impl FullTextSearch {
    /// Creates a search over every full-text indexed property of the selector's nodes.
    pub fn new(selector_name: impl IntoSelectorName, expression: impl Into<String>) -> Result<Self> {
        Self::build(selector_name, None::<String>, expression)
    }

    /// Creates a search over a single property of the selector's nodes.
    pub fn on_property(
        selector_name: impl IntoSelectorName,
        property_name: impl Into<String>,
        expression: impl Into<String>,
    ) -> Result<Self> {
        Self::build(selector_name, Some(property_name), expression)
    }

    fn build(
        selector_name: impl IntoSelectorName,
        property_name: Option<impl Into<String>>,
        expression: impl Into<String>,
    ) -> Result<Self> {
        let selector_name = selector_name.into_selector_name()?;
        let property_name = non_empty_opt("property_name", property_name)?;
        let expression = non_empty("expression", expression)?;
        Ok(Self {
            hash: hash_of(&(&selector_name, &property_name, &expression)),
            selector_name,
            property_name,
            expression,
            term: OnceBox::new(),
            expression_operand: OnceBox::new(),
        })
    }

    /// Returns the receiver with an already parsed `term` for its expression.
    pub fn with_term(self, term: Term) -> Self {
        let cell = OnceBox::new();
        let _ = cell.set(Box::new(term));
        Self { term: cell, ..self }
    }

    #[inline(always)]
    pub fn selector_name(&self) -> &SelectorName {
        &self.selector_name
    }

    #[inline(always)]
    pub fn property_name(&self) -> Option<&str> {
        self.property_name.as_deref()
    }

    /// Returns the text of the search expression.
    #[inline(always)]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Returns the search expression as a literal operand.
    pub fn full_text_search_expression(&self) -> &StaticOperand {
        self.expression_operand.get_or_init(|| {
            trace!(expression = %self.expression, "caching full-text search expression operand");
            Box::new(Literal::new(self.expression.as_str()).into())
        })
    }

    /// Returns the parsed search expression, parsing it on first use.
    pub fn term(&self) -> Result<&Term> {
        self.term.get_or_try_init(|| {
            trace!(expression = %self.expression, "caching full-text search term");
            fulltext::parse(&self.expression).map(Box::new)
        })
    }
}

impl Clone for FullTextSearch {
    fn clone(&self) -> Self {
        Self {
            hash: self.hash,
            selector_name: self.selector_name.clone(),
            property_name: self.property_name.clone(),
            expression: self.expression.clone(),
            term: copy_cell(&self.term),
            expression_operand: copy_cell(&self.expression_operand),
        }
    }
}

fn copy_cell<T: Clone>(cell: &OnceBox<T>) -> OnceBox<T> {
    let copy = OnceBox::new();
    if let Some(value) = cell.get() {
        let _ = copy.set(Box::new(value.clone()));
    }
    copy
}

impl fmt::Debug for FullTextSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FullTextSearch")
            .field("selector_name", &self.selector_name)
            .field("property_name", &self.property_name)
            .field("expression", &self.expression)
            .finish()
    }
}

precomputed_hash!(FullTextSearch {
    selector_name,
    property_name,
    expression
});

visitable!(FullTextSearch);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tools::hash_of, Error};
    use std::{ptr, thread};

    #[test]
    fn test_new() {
        let search = FullTextSearch::on_property("c", "description", "fast car").unwrap();
        assert_eq!("c", search.selector_name().name());
        assert_eq!(Some("description"), search.property_name());
        assert_eq!("fast car", search.expression());
        assert_eq!(
            Err(Error::EmptyArgument {
                argument: "expression".into()
            }),
            FullTextSearch::new("c", " ").map(|_| ())
        );
    }

    #[test]
    fn test_term() {
        let search = FullTextSearch::new("c", "foo -bar").unwrap();
        let term = search.term().unwrap();
        assert!(term.matches("FOO baz"));
        assert!(!term.matches("foobar"));
        assert!(ptr::eq(term, search.term().unwrap()));
    }

    #[test]
    fn test_term_error() {
        let search = FullTextSearch::new("c", "foo OR").unwrap();
        assert!(search.term().is_err());
        assert!(search.term().is_err());
    }

    #[test]
    fn test_with_term() {
        let term = fulltext::parse("wheels").unwrap();
        let search = FullTextSearch::new("c", "wheels").unwrap().with_term(term.clone());
        assert_eq!(&term, search.term().unwrap());
        assert_eq!(search, FullTextSearch::new("c", "wheels").unwrap());
    }

    #[test]
    fn test_full_text_search_expression() {
        let search = FullTextSearch::new("c", "fast").unwrap();
        let operand = search.full_text_search_expression();
        assert_eq!(&StaticOperand::from(Literal::new("fast")), operand);
        assert!(ptr::eq(operand, search.full_text_search_expression()));
    }

    #[test]
    fn test_clone_keeps_cache() {
        let search = FullTextSearch::new("c", "a b").unwrap();
        search.term().unwrap();
        let clone = search.clone();
        assert_eq!(search, clone);
        assert_eq!(hash_of(&search), hash_of(&clone));
        assert_eq!(search.term().unwrap(), clone.term().unwrap());
    }

    #[test]
    fn test_concurrent_first_access() {
        let search = FullTextSearch::new("c", "\"red car\" OR truck").unwrap();
        let addresses: Vec<usize> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| search.term().unwrap() as *const Term as usize))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(addresses.iter().all(|a| *a == addresses[0]));
        assert_eq!(addresses[0], search.term().unwrap() as *const Term as usize);
    }
}
