/*!
# Errors

Every fallible operation of this crate returns [`Result<T>`](Result), i.e. either a value or a
[`GraphError`].

Two families of failures exist:
- **Validation failures** of mutating calls (duplicate name, unknown node, self-loop, weight out of
  range, ...). They are reported as [`GraphError::InvariantViolation`] carrying a [`Violation`] and
  never modify the graph.
- **File-format failures** when reading a graph. They distinguish an unopenable file, an invalid
  node count, a truncated stream and unparsable tokens.

Use [`GraphError::kind`] to match on the kind of failure without destructuring its payload.
*/

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::arc::Weight;

/// Shorthand used by all fallible operations
pub type Result<T> = std::result::Result<T, GraphError>;

/// Reason why a mutating call on a graph was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A node with this name already exists
    #[error("a node named `{0}` already exists")]
    DuplicateName(String),

    /// The name is empty or contains whitespace
    #[error("`{0}` is not a valid node name")]
    InvalidName(String),

    /// The referenced node is not (or no longer) part of the graph
    #[error("node does not exist")]
    UnknownNode,

    /// Both endpoints of an arc are the same node
    #[error("self-loops are not allowed")]
    SelfLoop,

    /// The weight is not in `1..INFINITY`
    #[error("weight {0} is out of range")]
    WeightOutOfRange(Weight),

    /// There is no arc between the given nodes
    #[error("no such arc")]
    MissingArc,

    /// Renaming a node to the name it already has
    #[error("node is already named `{0}`")]
    UnchangedName(String),
}

/// The error type of this crate.
#[derive(Error, Debug)]
pub enum GraphError {
    /// The graph file could not be opened.
    #[error("cannot open graph file `{}`: {source}", .path.display())]
    FileNotFound {
        /// Path that was attempted
        path: PathBuf,
        /// Underlying IO error
        source: io::Error,
    },

    /// The declared number of nodes is missing, unparsable or not positive.
    #[error("invalid number of nodes `{0}`")]
    EmptyOrInvalidCount(String),

    /// The stream ended before all declared entries were read.
    #[error("premature end of stream while reading {0}")]
    UnexpectedEndOfStream(&'static str),

    /// A token could not be parsed into the expected value.
    #[error("cannot parse {what} from `{token}`")]
    InvalidToken {
        /// Description of the expected value
        what: &'static str,
        /// The offending token
        token: String,
    },

    /// A mutating call was rejected by the graph.
    #[error(transparent)]
    InvariantViolation(#[from] Violation),

    /// Any other IO error while reading or writing.
    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Kind of a [`GraphError`] without its payload
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    FileNotFound,
    EmptyOrInvalidCount,
    UnexpectedEndOfStream,
    InvalidToken,
    InvariantViolation,
    Io,
}

impl GraphError {
    /// Returns the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphError::FileNotFound { .. } => ErrorKind::FileNotFound,
            GraphError::EmptyOrInvalidCount(_) => ErrorKind::EmptyOrInvalidCount,
            GraphError::UnexpectedEndOfStream(_) => ErrorKind::UnexpectedEndOfStream,
            GraphError::InvalidToken { .. } => ErrorKind::InvalidToken,
            GraphError::InvariantViolation(_) => ErrorKind::InvariantViolation,
            GraphError::Io(_) => ErrorKind::Io,
        }
    }

    /// Returns the violation if this error was caused by a rejected mutation
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            GraphError::InvariantViolation(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kinds() {
        let err: GraphError = Violation::SelfLoop.into();
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);
        assert_eq!(err.violation(), Some(&Violation::SelfLoop));
        assert_eq!(err.to_string(), "self-loops are not allowed");

        let err = GraphError::UnexpectedEndOfStream("node");
        assert_eq!(err.kind(), ErrorKind::UnexpectedEndOfStream);
        assert_eq!(err.violation(), None);

        let err = GraphError::FileNotFound {
            path: PathBuf::from("missing.graph"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert!(err.to_string().contains("missing.graph"));
    }
}
