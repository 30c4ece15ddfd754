//! Iterative tree evaluation
//!
//! Evaluation never recurses on the host stack. Each function body being
//! evaluated is an [`Activation`] holding a stack of pending nodes and a
//! memo of finished operand values. A node is peeked, not popped: if an
//! operand is missing it is pushed on top and the node is retried once the
//! operand's value is in the memo.
//!
//! A call to a user function suspends the caller's activation with the call
//! node still pending. When the callee's body finishes, its value becomes
//! the call node's value in the caller's memo.

pub mod assign;
pub mod binary;
pub mod call;
pub mod control;
pub mod function;
pub mod literal;
pub mod operands;
pub mod unary;

use std::collections::HashMap;
use std::mem;
use std::rc::Rc;

use tracing::trace;

use crate::context::EvalContext;
use crate::environment::Frame;
use crate::error::{Location, RuntimeError, RuntimeErrorKind};
use crate::grammar::Operator;
use crate::token::TokenKind;
use crate::tree::{Node, NodeId, SyntaxTree};
use crate::value::{FunctionValue, Value};

/// Evaluate `tree` with `frame` as the program scope.
///
/// # Errors
///
/// Returns the first [`RuntimeError`] raised by an operator or builtin.
pub fn evaluate(
    tree: Rc<SyntaxTree>,
    frame: Rc<Frame>,
    ctx: &mut EvalContext<'_>,
) -> Result<Value, RuntimeError> {
    let root = tree.root();
    let mut current = Activation::new(tree, root, frame);
    let mut callers: Vec<Activation> = Vec::new();

    loop {
        let Some(&id) = current.pending.last() else {
            let value = current.result()?;
            let Some(mut caller) = callers.pop() else {
                return Ok(value);
            };
            trace!(depth = callers.len(), "returned from call");
            caller.resume(value);
            current = caller;
            continue;
        };

        match step(&mut current, id, ctx)? {
            Step::Done(value) => {
                current.pending.pop();
                current.memo.insert(id, value);
            }
            Step::Descend(child) => current.pending.push(child),
            Step::Invoke { function, argument } => {
                let callee = Activation::call(&function, argument);
                callers.push(mem::replace(&mut current, callee));
                trace!(depth = callers.len(), "entered call");
            }
        }
    }
}

/// Outcome of one attempt at evaluating a node.
pub(crate) enum Step {
    /// The node's value
    Done(Value),

    /// This operand must be evaluated first
    Descend(NodeId),

    /// The node's value is the result of calling `function`
    Invoke {
        /// Callee
        function: Rc<FunctionValue>,
        /// Argument bound to the callee's parameter
        argument: Value,
    },
}

/// Evaluation state of one function body (or of the whole program).
pub(crate) struct Activation {
    tree: Rc<SyntaxTree>,
    root: NodeId,
    frame: Rc<Frame>,
    pending: Vec<NodeId>,
    memo: HashMap<NodeId, Value>,
}

impl Activation {
    fn new(tree: Rc<SyntaxTree>, root: NodeId, frame: Rc<Frame>) -> Self {
        Self {
            tree,
            root,
            frame,
            pending: vec![root],
            memo: HashMap::new(),
        }
    }

    /// Start a call: a fresh frame under the captured one, holding the
    /// argument if the function names a parameter.
    fn call(function: &FunctionValue, argument: Value) -> Self {
        let frame = Frame::child(&function.frame);
        if let Some(param) = &function.param {
            frame.assign(param.as_str(), argument);
        }
        Self::new(Rc::clone(&function.tree), function.body, frame)
    }

    /// Store a finished callee's value as the value of the pending call node.
    fn resume(&mut self, value: Value) {
        if let Some(site) = self.pending.pop() {
            self.memo.insert(site, value);
        }
    }

    fn result(&mut self) -> Result<Value, RuntimeError> {
        let root = self.root;
        self.memo
            .remove(&root)
            .ok_or_else(|| malformed(self.tree.node(root)))
    }

    fn peek(&self, id: NodeId) -> Option<&Value> {
        self.memo.get(&id)
    }

    /// Take an operand's value, or name the operand to evaluate first.
    fn take_one(&mut self, id: NodeId) -> Result<Value, NodeId> {
        self.memo.remove(&id).ok_or(id)
    }

    /// Take both operand values, or name the first one still missing.
    /// Nothing is taken unless both are ready.
    fn take_two(&mut self, left: NodeId, right: NodeId) -> Result<(Value, Value), NodeId> {
        for id in [left, right] {
            if !self.memo.contains_key(&id) {
                return Err(id);
            }
        }
        match (self.memo.remove(&left), self.memo.remove(&right)) {
            (Some(l), Some(r)) => Ok((l, r)),
            _ => Err(left),
        }
    }
}

fn step(act: &mut Activation, id: NodeId, ctx: &mut EvalContext<'_>) -> Result<Step, RuntimeError> {
    let tree = Rc::clone(&act.tree);
    let node = tree.node(id);
    let location = Location::from(node.token.position);

    let op = match node.token.kind {
        TokenKind::Number => return literal::number(&node.token).map(Step::Done),
        TokenKind::Char => return literal::character(&node.token).map(Step::Done),
        TokenKind::Identifier => {
            return act
                .frame
                .lookup(&node.token.raw)
                .map(Step::Done)
                .map_err(|e| RuntimeError::new(location, e.into()));
        }
        TokenKind::Operator(op) => op,
    };

    match op {
        Operator::FuncMaker => function::make(act, node),
        Operator::Bind => function::bind(act, node),
        Operator::Assign => assign::assign(act, node),
        Operator::CondAnd | Operator::CondOr => control::short_circuit(act, node, op),
        Operator::Call => call::call(act, node, ctx),
        Operator::CondCall => call::conditional_call(act, node, ctx),
        _ if op.is_unary() => {
            let operand = unary_operand(node)?;
            match act.take_one(operand) {
                Ok(value) => unary::apply(op, value)
                    .map(Step::Done)
                    .map_err(|kind| RuntimeError::new(location, kind)),
                Err(next) => Ok(Step::Descend(next)),
            }
        }
        _ => {
            let (left, right) = binary_operands(node)?;
            match act.take_two(left, right) {
                Ok((l, r)) => binary::apply(op, l, r)
                    .map(Step::Done)
                    .map_err(|kind| RuntimeError::new(location, kind)),
                Err(next) => Ok(Step::Descend(next)),
            }
        }
    }
}

/// The operand of a unary operator node.
fn unary_operand(node: &Node) -> Result<NodeId, RuntimeError> {
    node.left.ok_or_else(|| malformed(node))
}

/// The operands of a binary operator node.
fn binary_operands(node: &Node) -> Result<(NodeId, NodeId), RuntimeError> {
    match (node.left, node.right) {
        (Some(left), Some(right)) => Ok((left, right)),
        _ => Err(malformed(node)),
    }
}

fn malformed(node: &Node) -> RuntimeError {
    RuntimeError::new(
        node.token.position,
        RuntimeErrorKind::MalformedNode {
            token: node.token.raw.clone(),
        },
    )
}
