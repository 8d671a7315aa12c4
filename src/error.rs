use thiserror::Error;

/// Is the type of errors returned by `qom`.
///
/// Every error is raised while a node is being built (or while a full-text
/// expression is being parsed) and none of them is transient: retrying with the
/// same input always fails the same way.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum Error {
    /// Is returned when a required argument is empty.
    #[error("argument `{argument}` may not be empty")]
    EmptyArgument { argument: String },

    /// Is returned when an argument is present but not acceptable.
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// Is returned when a symbol does not correspond to any known variant of `kind`.
    #[error("unknown or unsupported {kind}: '{symbol}'")]
    UnsupportedSymbol { kind: String, symbol: String },

    /// Is returned when a full-text search expression cannot be parsed.
    #[error("cannot parse full-text search expression '{expression}' at position {position}: {reason}")]
    FullTextParse {
        expression: String,
        position: usize,
        reason: String,
    },

    /// Is returned when the pattern derived from a full-text term does not compile.
    #[error("invalid match pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl Error {
    pub(crate) fn empty(argument: &str) -> Self {
        Self::EmptyArgument {
            argument: argument.into(),
        }
    }

    pub(crate) fn invalid(argument: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(kind: &str, symbol: &str) -> Self {
        Self::UnsupportedSymbol {
            kind: kind.into(),
            symbol: symbol.into(),
        }
    }
}

/// Is the result type of fallible `qom` operations.
pub type Result<T> = std::result::Result<T, Error>;
