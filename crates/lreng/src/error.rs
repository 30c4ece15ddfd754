//! Error types for lexing, parsing, scope checking and evaluation

use std::fmt;

use thiserror::Error;

use crate::token::Position;

/// Exit status for usage and I/O failures.
pub const EXIT_USAGE: u8 = 1;
/// Exit status for syntax errors.
pub const EXIT_SYNTAX: u8 = 2;
/// Exit status for semantic (scope) errors.
pub const EXIT_SEMANTIC: u8 = 3;
/// Exit status for runtime errors.
pub const EXIT_RUNTIME: u8 = 4;

/// Where an error was raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A position in the source text
    Source(Position),

    /// Inside a built-in function
    Builtin(&'static str),

    /// No position is available (synthetic tokens)
    Unknown,
}

impl Location {
    /// The source position, if the location has one.
    pub fn position(&self) -> Option<Position> {
        match self {
            Location::Source(pos) => Some(*pos),
            _ => None,
        }
    }
}

impl From<Option<Position>> for Location {
    fn from(position: Option<Position>) -> Self {
        position.map_or(Location::Unknown, Location::Source)
    }
}

impl From<Position> for Location {
    fn from(position: Position) -> Self {
        Location::Source(position)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Source(pos) => write!(f, "{}", pos),
            Location::Builtin(name) => write!(f, "In built-in function '{}'", name),
            Location::Unknown => write!(f, "At unknown position"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Environment Errors
// ═══════════════════════════════════════════════════════════════════════

/// Errors raised by frame operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentError {
    /// The name is already bound in the frame being written
    #[error("Identifier '{name}' is already initialized")]
    AlreadyDefined {
        /// The identifier
        name: String,
    },

    /// The name is not bound anywhere along the chain
    #[error("Identifier '{name}' is used uninitialized")]
    Undefined {
        /// The identifier
        name: String,
    },
}

// ═══════════════════════════════════════════════════════════════════════
// Syntax Errors
// ═══════════════════════════════════════════════════════════════════════

/// Raised by the lexer and the parser. Fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{location}: {message}")]
pub struct SyntaxError {
    /// Where the offending token or character starts
    pub location: Location,

    /// Human-readable error message
    pub message: String,
}

impl SyntaxError {
    /// Create a syntax error at a location.
    pub fn new(location: impl Into<Location>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Semantic Errors
// ═══════════════════════════════════════════════════════════════════════

/// What the scope checker objected to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemanticErrorKind {
    /// Left operand of `=` or `=>` is not a bare identifier
    #[error("Left side of {op} is not an identifier")]
    LeftNotIdentifier {
        /// Description of the operator
        op: &'static str,
    },

    /// Identifier bound twice in the same scope
    #[error("Repeated initialization of identifier '{name}'")]
    RepeatedInitialization {
        /// The identifier
        name: String,
    },

    /// Identifier never bound in any visible scope
    #[error("Identifier '{name}' is used but never initialized")]
    Uninitialized {
        /// The identifier
        name: String,
    },
}

/// A single scope violation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{location}: {kind}")]
pub struct SemanticError {
    /// Where the violation occurs
    pub location: Location,

    /// The violation
    pub kind: SemanticErrorKind,
}

/// Every scope violation found in one program, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticErrors {
    /// The collected errors (never empty)
    pub errors: Vec<SemanticError>,
}

impl fmt::Display for SemanticErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[SemanticError] {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for SemanticErrors {}

// ═══════════════════════════════════════════════════════════════════════
// Runtime Errors
// ═══════════════════════════════════════════════════════════════════════

/// What went wrong during evaluation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    /// Operand kinds do not match the operator's signature
    #[error("Bad operand type for operator '{op}' ({description}): expect {expected}, get {got}")]
    BadOperand {
        /// Operator symbol
        op: &'static str,
        /// Operator description
        description: &'static str,
        /// Expected operand kinds, e.g. `(Number, Number)`
        expected: String,
        /// Actual operand kinds
        got: String,
    },

    /// Division or remainder by zero
    #[error("Divided by zero")]
    DividedByZero,

    /// `^` with a non-integer exponent
    #[error("Exponent must be an integer")]
    NonIntegerExponent,

    /// `^` with an exponent outside the 32-bit range
    #[error("Exponent is too large")]
    ExponentTooLarge,

    /// Calling something that is not a function
    #[error("Cannot call a value of type {got}")]
    NotCallable {
        /// Type name of the callee
        got: &'static str,
    },

    /// `?` operand that is not a pair of functions
    #[error("Right side of conditional pair call must be a pair of functions, get {got}")]
    BadConditionalPair {
        /// Description of what was found
        got: String,
    },

    /// Left of `=>` is not an identifier
    #[error("Left side of argument binder should be an identifier")]
    BadBinderTarget,

    /// Right of `=>` is not a user function
    #[error("Right side of argument binder should be a function block, get {got}")]
    BadBinderValue {
        /// Type name found
        got: &'static str,
    },

    /// Left of `=` is not an identifier
    #[error("Left side of assignment should be an identifier")]
    BadAssignTarget,

    /// A tree node lacks an operand its operator needs
    #[error("Malformed syntax tree node '{token}'")]
    MalformedNode {
        /// The node's token text
        token: String,
    },

    /// Literal text that does not denote a value
    #[error("Invalid literal '{raw}'")]
    InvalidLiteral {
        /// The literal's source text
        raw: String,
    },

    /// Frame lookup or definition failure
    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    /// Error reported by a built-in function
    #[error("{0}")]
    Builtin(String),
}

/// Raised by the evaluator and the builtins. Fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{location}: {kind}")]
pub struct RuntimeError {
    /// Source position or builtin name
    pub location: Location,

    /// What went wrong
    pub kind: RuntimeErrorKind,
}

impl RuntimeError {
    /// Create a runtime error at a location.
    pub fn new(location: impl Into<Location>, kind: RuntimeErrorKind) -> Self {
        Self {
            location: location.into(),
            kind,
        }
    }

    /// Create an error raised by a built-in function.
    pub fn builtin(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            location: Location::Builtin(name),
            kind: RuntimeErrorKind::Builtin(message.into()),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Pipeline Error
// ═══════════════════════════════════════════════════════════════════════

/// Any error that stops a program run.
#[derive(Error, Debug)]
pub enum LrengError {
    /// Lexer or parser failure
    #[error("[SyntaxError] {0}")]
    Syntax(#[from] SyntaxError),

    /// Scope checker failure (all violations)
    #[error("{0}")]
    Semantic(#[from] SemanticErrors),

    /// Evaluation failure
    #[error("[RuntimeError] {0}")]
    Runtime(#[from] RuntimeError),
}

impl LrengError {
    /// The process exit status reserved for this error class.
    pub fn exit_code(&self) -> u8 {
        match self {
            LrengError::Syntax(_) => EXIT_SYNTAX,
            LrengError::Semantic(_) => EXIT_SEMANTIC,
            LrengError::Runtime(_) => EXIT_RUNTIME,
        }
    }
}

/// Result type alias for whole-pipeline operations
pub type Result<T> = std::result::Result<T, LrengError>;
