//! # lreng
//!
//! An interpreter for lreng, a small expression language over exact
//! rational numbers, pairs and closures.
//!
//! ## Architecture
//!
//! - **Lexer**: finite-state machine producing positioned tokens
//! - **Parser**: shunting-yard to postfix, folded into an arena tree
//! - **Checker**: static scope check of every identifier
//! - **Evaluator**: iterative tree walk with frame-chained closures
//!
//! ## Example
//!
//! ```
//! use lreng::{run, EvalContext, Value};
//!
//! let mut input: &[u8] = b"";
//! let mut output = Vec::new();
//! let mut ctx = EvalContext::new(&mut input, &mut output);
//!
//! let value = run("square = x => { x * x }; square(3) + 1 / 2", &mut ctx).unwrap();
//! assert_eq!(value, Value::ratio(19, 2));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chars;
pub mod checker;
pub mod context;
pub mod environment;
pub mod error;
pub mod eval;
pub mod frontend;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod tree;
pub mod value;

// Re-export main types
pub use checker::check;
pub use context::EvalContext;
pub use environment::{default_frame, Frame, BUILTINS};
pub use error::{
    EnvironmentError, Location, LrengError, Result, RuntimeError, RuntimeErrorKind,
    SemanticError, SemanticErrorKind, SemanticErrors, SyntaxError,
};
pub use eval::evaluate;
pub use frontend::Program;
pub use grammar::Operator;
pub use lexer::tokenize;
pub use parser::{parse, to_postfix};
pub use token::{Position, Token, TokenKind};
pub use tree::{Node, NodeId, SyntaxTree};
pub use value::{BuiltinFn, FunctionValue, Number, Pair, Value};

/// lreng version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compile and evaluate `source`.
///
/// # Errors
///
/// Returns the first syntax error, all semantic errors, or the first
/// runtime error.
pub fn run(source: &str, ctx: &mut EvalContext<'_>) -> Result<Value> {
    let program = Program::compile(source)?;
    Ok(program.run(ctx)?)
}
