/*! Full-text search terms.

A full-text search expression such as `fast "red car" -truck` is parsed by
[`parse`] into a [`Term`], which tells whether a text matches the expression:

```
let term = qom::fulltext::parse(r#"fast "red car" -truck"#)?;
assert!(term.matches("A fast, red car."));
assert!(!term.matches("A fast red car on a truck."));
# Ok::<(), qom::Error>(())
```
*/
mod like;
mod parser;

use crate::{tools::non_empty, Error, Result};
use regex::{Regex, RegexBuilder};
use std::{
    fmt::{self, Write},
    hash::{Hash, Hasher},
};

pub use like::like_pattern_to_regex;
pub use parser::parse;

/// Is a word or a phrase that must appear in the text.
///
/// Matching ignores case. Wildcards of the phrase (`%`, `*`, `_` and `?`) are
/// honored and the phrase may appear anywhere in the text.
#[derive(Clone, Debug)]
pub struct SimpleTerm {
    value: String,
    pattern: Regex,
}

impl SimpleTerm {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = non_empty("value", value)?;
        let mut like = String::with_capacity(value.len() + 2);
        if !value.starts_with(['%', '*']) {
            like.push('%');
        }
        like.push_str(&value);
        if !ends_with_wildcard(&value) {
            if trailing_backslashes(&value) % 2 == 1 {
                // a lone trailing backslash stands for itself
                like.push('\\');
            }
            like.push('%');
        }
        let pattern = format!(r"\A(?:{})\z", like_pattern_to_regex(&like));
        let pattern = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .unicode(true)
            .build()
            .map_err(|source| Error::InvalidPattern { pattern, source })?;
        Ok(Self { value, pattern })
    }

    /// Returns the word or phrase, as written.
    #[inline(always)]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the words of the phrase.
    pub fn values(&self) -> Vec<&str> {
        self.value.split_whitespace().collect()
    }

    /// Returns true if the value has to be quoted to be read back as a single term.
    pub fn is_quoting_required(&self) -> bool {
        self.value.chars().any(char::is_whitespace)
            || self.value.starts_with(['"', '\'', '-'])
            || self.value == "OR"
    }

    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

fn trailing_backslashes(value: &str) -> usize {
    value.chars().rev().take_while(|c| *c == '\\').count()
}

/// Returns true if `value` ends with a `%` or `*` that is not escaped.
fn ends_with_wildcard(value: &str) -> bool {
    match value.strip_suffix(['%', '*']) {
        Some(rest) => trailing_backslashes(rest) % 2 == 0,
        None => false,
    }
}

impl PartialEq for SimpleTerm {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for SimpleTerm {}

impl Hash for SimpleTerm {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

/// Writes `value` in double quotes, escaping the double quotes it contains
/// unless they are escaped already.
fn write_escaped(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_char('"')?;
    let mut escaped = false;
    for c in value.chars() {
        if c == '"' && !escaped {
            f.write_char('\\')?;
        }
        escaped = c == '\\' && !escaped;
        f.write_char(c)?;
    }
    f.write_char('"')
}

impl fmt::Display for SimpleTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_quoting_required() {
            f.write_str(&self.value)
        } else if !self.value.contains('"') {
            write!(f, "\"{}\"", self.value)
        } else if !self.value.contains('\'') {
            write!(f, "'{}'", self.value)
        } else {
            write_escaped(f, &self.value)
        }
    }
}

/// Is a term that must not match the text.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct NegationTerm {
    term: Box<Term>,
}

impl NegationTerm {
    pub fn new(term: impl Into<Term>) -> Self {
        Self {
            term: Box::new(term.into()),
        }
    }

    #[inline(always)]
    pub fn term(&self) -> &Term {
        &self.term
    }

    pub fn matches(&self, text: &str) -> bool {
        !self.term.matches(text)
    }
}

/// Is a list of terms that must all match the text.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Conjunction {
    terms: Vec<Term>,
}

impl Conjunction {
    /// Creates the conjunction, failing if `terms` is empty.
    pub fn new(terms: impl IntoIterator<Item = Term>) -> Result<Self> {
        let terms: Vec<Term> = terms.into_iter().collect();
        if terms.is_empty() {
            return Err(Error::empty("terms"));
        }
        Ok(Self { terms })
    }

    #[inline(always)]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn matches(&self, text: &str) -> bool {
        self.terms.iter().all(|t| t.matches(text))
    }
}

/// Is a list of terms one of which at least must match the text.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Disjunction {
    terms: Vec<Term>,
}

impl Disjunction {
    /// Creates the disjunction, failing if `terms` is empty.
    pub fn new(terms: impl IntoIterator<Item = Term>) -> Result<Self> {
        let terms: Vec<Term> = terms.into_iter().collect();
        if terms.is_empty() {
            return Err(Error::empty("terms"));
        }
        Ok(Self { terms })
    }

    #[inline(always)]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn matches(&self, text: &str) -> bool {
        self.terms.iter().any(|t| t.matches(text))
    }
}

/// Is a parsed full-text search expression.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Term {
    Simple(SimpleTerm),
    Negation(NegationTerm),
    Conjunction(Conjunction),
    Disjunction(Disjunction),
}

impl Term {
    /// Returns true if `text` satisfies the term.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Term::Simple(t) => t.matches(text),
            Term::Negation(t) => t.matches(text),
            Term::Conjunction(t) => t.matches(text),
            Term::Disjunction(t) => t.matches(text),
        }
    }
}

impl From<SimpleTerm> for Term {
    fn from(term: SimpleTerm) -> Self {
        Self::Simple(term)
    }
}

impl From<NegationTerm> for Term {
    fn from(term: NegationTerm) -> Self {
        Self::Negation(term)
    }
}

impl From<Conjunction> for Term {
    fn from(term: Conjunction) -> Self {
        Self::Conjunction(term)
    }
}

impl From<Disjunction> for Term {
    fn from(term: Disjunction) -> Self {
        Self::Disjunction(term)
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, terms: &[Term], separator: &str) -> fmt::Result {
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", term)?;
    }
    Ok(())
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Simple(t) => write!(f, "{}", t),
            Term::Negation(t) => write!(f, "-{}", t.term()),
            Term::Conjunction(t) => write_joined(f, t.terms(), " "),
            Term::Disjunction(t) => write_joined(f, t.terms(), " OR "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple(value: &str) -> Term {
        SimpleTerm::new(value).unwrap().into()
    }

    #[test]
    fn test_simple_term() {
        let term = SimpleTerm::new("car").unwrap();
        assert!(term.matches("car"));
        assert!(term.matches("Red CAR racing"));
        assert!(!term.matches("cat"));
        assert!(term.matches("line one\nred car"));
        assert!(SimpleTerm::new(" ").is_err());
    }

    #[test]
    fn test_simple_term_wildcards() {
        let term = SimpleTerm::new("c_r").unwrap();
        assert!(term.matches("my cur"));
        assert!(!term.matches("my cr"));
        let term = SimpleTerm::new("%red*car%").unwrap();
        assert!(term.matches("a red sports car"));
        assert!(!term.matches("a car, red"));
        let term = SimpleTerm::new(r"100\%").unwrap();
        assert!(term.matches("it is 100% done"));
        assert!(!term.matches("it is 1000 done"));
    }

    #[test]
    fn test_simple_term_unicode_case() {
        assert!(SimpleTerm::new("straße").unwrap().matches("STRASSE straße"));
        assert!(SimpleTerm::new("ÉTÉ").unwrap().matches("un été chaud"));
    }

    #[test]
    fn test_simple_term_regex_characters() {
        let term = SimpleTerm::new("a.b").unwrap();
        assert!(term.matches("xa.by"));
        assert!(!term.matches("axb"));
    }

    #[test]
    fn test_conjunction_with_negation() {
        let term = Term::from(
            Conjunction::new(vec![simple("foo"), NegationTerm::new(simple("bar")).into()]).unwrap(),
        );
        assert!(!term.matches("foobar"));
        assert!(term.matches("foobaz"));
        assert!(!term.matches("baz"));
    }

    #[test]
    fn test_disjunction() {
        let term = Disjunction::new(vec![simple("red"), simple("blue")]).unwrap();
        assert!(term.matches("a blue car"));
        assert!(!term.matches("a green car"));
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(
            Err(Error::EmptyArgument {
                argument: "terms".into()
            }),
            Conjunction::new(Vec::new())
        );
        assert!(Disjunction::new(Vec::new()).is_err());
    }

    #[test]
    fn test_simple_term_values() {
        let term = SimpleTerm::new("red  sports car").unwrap();
        assert_eq!(vec!["red", "sports", "car"], term.values());
        assert!(term.is_quoting_required());
        assert!(!SimpleTerm::new("red").unwrap().is_quoting_required());
    }

    #[test]
    fn test_display() {
        let term = Term::from(
            Disjunction::new(vec![
                Conjunction::new(vec![simple("red car"), NegationTerm::new(simple("truck")).into()])
                    .unwrap()
                    .into(),
                simple("bike"),
            ])
            .unwrap(),
        );
        assert_eq!("\"red car\" -truck OR bike", term.to_string());
    }

    #[test]
    fn test_eq_ignores_pattern() {
        assert_eq!(SimpleTerm::new("x").unwrap(), SimpleTerm::new("x").unwrap());
        assert_ne!(simple("x"), NegationTerm::new(simple("x")).into());
    }

    #[test]
    fn test_trailing_backslash() {
        let term = SimpleTerm::new(r"C:\").unwrap();
        assert!(term.matches(r"path C:\ here"));
        assert!(!term.matches("C:%"));
        let term = SimpleTerm::new(r"C:\\").unwrap();
        assert!(term.matches(r"path C:\ here"));
    }

    #[test]
    fn test_display_parses_back() {
        for expression in [r#"'say "hi" now'"#, r#""-x""#, r#""OR" b"#, "a -\"red car\""] {
            let term = parse(expression).unwrap();
            assert_eq!(term, parse(&term.to_string()).unwrap(), "{}", expression);
        }
        assert_eq!(r#"'say "hi" now'"#, parse(r#"'say "hi" now'"#).unwrap().to_string());

        let mixed = SimpleTerm::new(r#"say "hi" it's"#).unwrap();
        assert_eq!(r#""say \"hi\" it's""#, mixed.to_string());
        let reparsed = parse(&mixed.to_string()).unwrap();
        for text in [r#"they say "hi" it's late"#, "they say hi it's late"] {
            assert_eq!(mixed.matches(text), reparsed.matches(text));
        }
    }
}
