use super::{Conjunction, Disjunction, NegationTerm, SimpleTerm, Term};
use crate::{Error, Result};
use tracing::debug;

#[derive(Clone, PartialEq, Debug)]
enum Token {
    Word(String),
    Phrase(String),
    Minus,
    Or,
}

/// Splits an expression into tokens, remembering where each token starts.
struct Lexer<'a> {
    expression: &'a str,
    input: Vec<char>,
    position: usize,
}

impl<'a> Lexer<'a> {
    fn new(expression: &'a str) -> Self {
        Self {
            expression,
            input: expression.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn error(&self, position: usize, reason: &str) -> Error {
        Error::FullTextParse {
            expression: self.expression.into(),
            position,
            reason: reason.into(),
        }
    }

    /// Reads a character and, if it is a backslash, the character it escapes.
    /// Both are kept: the escape is resolved when the term is matched.
    fn read_escaped(&mut self, result: &mut String) {
        if let Some(ch) = self.current_char() {
            result.push(ch);
            self.advance();
            if ch == '\\' {
                if let Some(escaped) = self.current_char() {
                    result.push(escaped);
                    self.advance();
                }
            }
        }
    }

    fn read_word(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                break;
            }
            self.read_escaped(&mut result);
        }
        result
    }

    fn read_phrase(&mut self, quote: char) -> Result<String> {
        let start = self.position;
        self.advance();
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch == quote {
                self.advance();
                let phrase = result.trim();
                if phrase.is_empty() {
                    return Err(self.error(start, "empty phrase"));
                }
                return Ok(phrase.to_string());
            }
            self.read_escaped(&mut result);
        }
        Err(self.error(start, "missing closing quote"))
    }

    fn next_token(&mut self) -> Result<Option<(usize, Token)>> {
        self.skip_whitespace();
        let start = self.position;
        let token = match self.current_char() {
            None => return Ok(None),
            Some(quote @ ('"' | '\'')) => Token::Phrase(self.read_phrase(quote)?),
            Some('-') => match self.peek_char(1) {
                Some(next) if !next.is_whitespace() => {
                    self.advance();
                    Token::Minus
                }
                _ => return Err(self.error(start, "'-' must be followed by a term")),
            },
            Some(_) => match self.read_word() {
                word if word == "OR" => Token::Or,
                word => Token::Word(word),
            },
        };
        Ok(Some((start, token)))
    }

    fn tokenize(mut self) -> Result<Vec<(usize, Token)>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}

struct Parser<'a> {
    expression: &'a str,
    tokens: Vec<(usize, Token)>,
    position: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, position: usize, reason: &str) -> Error {
        Error::FullTextParse {
            expression: self.expression.into(),
            position,
            reason: reason.into(),
        }
    }

    /// Returns the position of the current token, or the end of the expression.
    fn offset(&self) -> usize {
        self.tokens
            .get(self.position)
            .map(|(offset, _)| *offset)
            .unwrap_or_else(|| self.expression.chars().count())
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position).map(|(_, token)| token)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn parse_disjunction(&mut self) -> Result<Term> {
        let mut terms = vec![self.parse_conjunction()?];
        while let Some(Token::Or) = self.current() {
            self.advance();
            terms.push(self.parse_conjunction()?);
        }
        if terms.len() == 1 {
            return Ok(terms.remove(0));
        }
        Ok(Disjunction::new(terms)?.into())
    }

    fn parse_conjunction(&mut self) -> Result<Term> {
        let mut terms = Vec::new();
        while let Some(token) = self.current() {
            if *token == Token::Or {
                break;
            }
            terms.push(self.parse_term()?);
        }
        match terms.len() {
            0 => Err(self.error(self.offset(), "expecting a term around 'OR'")),
            1 => Ok(terms.remove(0)),
            _ => Ok(Conjunction::new(terms)?.into()),
        }
    }

    fn parse_term(&mut self) -> Result<Term> {
        if let Some(Token::Minus) = self.current() {
            self.advance();
            return Ok(NegationTerm::new(self.parse_simple_term()?).into());
        }
        self.parse_simple_term()
    }

    fn parse_simple_term(&mut self) -> Result<Term> {
        let offset = self.offset();
        let value = match self.current() {
            Some(Token::Word(value)) | Some(Token::Phrase(value)) => value.clone(),
            _ => return Err(self.error(offset, "expecting a word or a quoted phrase")),
        };
        self.advance();
        Ok(SimpleTerm::new(value)?.into())
    }
}

/// Parses a full-text search expression into a [`Term`].
///
/// Words are separated by whitespace and must all appear in the text. A phrase
/// in single or double quotes is a single term. A `-` in front of a term negates
/// it and the (uppercase) `OR` keyword separates alternatives:
///
/// ```
/// let term = qom::fulltext::parse("red 'sports car' OR -truck")?;
/// assert_eq!("red \"sports car\" OR -truck", term.to_string());
/// # Ok::<(), qom::Error>(())
/// ```
pub fn parse(expression: &str) -> Result<Term> {
    let tokens = Lexer::new(expression).tokenize()?;
    let mut parser = Parser {
        expression,
        tokens,
        position: 0,
    };
    if parser.tokens.is_empty() {
        return Err(parser.error(0, "expression is empty"));
    }
    let term = parser.parse_disjunction()?;
    debug!(expression, term = %term, "parsed full-text search expression");
    Ok(term)
}
