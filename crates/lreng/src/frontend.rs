//! Source-to-tree pipeline
//!
//! ```text
//! Source → [lexer] → tokens → [parser] → tree → [checker] → Program → [eval] → Value
//! ```
//!
//! Every stage consumes the previous stage's complete output. A
//! [`Program`] only exists once lexing, parsing and scope checking have all
//! succeeded.

use std::rc::Rc;

use tracing::debug;

use crate::checker::check;
use crate::context::EvalContext;
use crate::environment::{default_frame, Frame};
use crate::error::{LrengError, RuntimeError};
use crate::eval::evaluate;
use crate::lexer::tokenize;
use crate::parser::parse;
use crate::tree::SyntaxTree;
use crate::value::Value;

/// A lexed, parsed and scope-checked program, ready to run.
#[derive(Debug, Clone)]
pub struct Program {
    /// `None` for source without tokens (blank or comments only)
    tree: Option<Rc<SyntaxTree>>,
}

impl Program {
    /// Run the front half of the pipeline on `source`.
    ///
    /// # Errors
    ///
    /// Returns [`LrengError::Syntax`] for the first lexing or parsing error,
    /// or [`LrengError::Semantic`] with every scope violation.
    pub fn compile(source: &str) -> Result<Self, LrengError> {
        let tokens = tokenize(source)?;
        if tokens.is_empty() {
            debug!("empty program");
            return Ok(Self { tree: None });
        }
        let tree = parse(tokens)?;
        check(&tree)?;
        debug!("scope check passed");
        Ok(Self {
            tree: Some(Rc::new(tree)),
        })
    }

    /// The syntax tree, if the program has one.
    pub fn tree(&self) -> Option<&SyntaxTree> {
        self.tree.as_deref()
    }

    /// Evaluate the program in a fresh scope under the default frame.
    ///
    /// An empty program evaluates to `null`.
    pub fn run(&self, ctx: &mut EvalContext<'_>) -> Result<Value, RuntimeError> {
        let Some(tree) = &self.tree else {
            return Ok(Value::Null);
        };
        let value = evaluate(Rc::clone(tree), Frame::child(&default_frame()), ctx)?;
        debug!(value = %value, "evaluation finished");
        Ok(value)
    }
}
