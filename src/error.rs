//! Errors reported by netlist evaluation and IO

use thiserror::Error;

/// Result of a fallible operation of this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned when a netlist cannot be read, evaluated or written
///
/// Every error is fatal to the operation that raised it: an evaluation that fails
/// leaves no truth table behind.
#[derive(Debug, Error)]
pub enum Error {
    /// The netlist is structurally inconsistent
    #[error("netlist {0} is not valid")]
    InvalidNetlist(String),

    /// A strongly connected component is neither a single node nor a NOR latch
    #[error("unsupported topology: cycle through {}", .0.join(", "))]
    UnsupportedTopology(Vec<String>),

    /// A node type name outside of the gate vocabulary
    #[error("unknown node type {0}")]
    UnknownNodeType(String),

    /// The value of a node could not be derived for a state, usually because of its arity
    #[error("no value could be computed for node {node} at state {state}")]
    UnassignedOutput {
        /// Name of the node
        node: String,
        /// Index of the input state
        state: usize,
    },

    /// The output state of a node does not have exactly one key
    #[error("node {node} has {arity} outputs instead of 1")]
    InvalidOutputArity {
        /// Name of the node
        node: String,
        /// Number of keys in the output state
        arity: usize,
    },

    /// More free variables than input states can be enumerated for
    #[error("too many free variables to enumerate: {0}")]
    TooManyVariables(usize),

    /// Lookup of a state that is not part of a truth table
    #[error("state is not part of the truth table")]
    UnknownState,

    /// Malformed text input
    #[error("line {line}: {message}")]
    Parse {
        /// Line number, starting at 1
        line: usize,
        /// Description of the problem
        message: String,
    },

    /// File format not recognized from the path
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Underlying IO failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Error {
        Error::Parse {
            line,
            message: message.into(),
        }
    }
}
