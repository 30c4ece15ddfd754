//! Arena-backed binary syntax tree
//!
//! Nodes live in a single `Vec` and refer to their children by [`NodeId`].
//! The ids double as stable keys for per-node results during evaluation.

use std::fmt;

use serde::Serialize;

use crate::error::{Location, SyntaxError};
use crate::token::Token;

/// Handle of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A tree node. Leaves carry operand tokens, interior nodes operators.
///
/// Unary operators keep their operand in `left`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Token the node was built from
    pub token: Token,

    /// First operand
    pub left: Option<NodeId>,

    /// Second operand of a binary operator
    pub right: Option<NodeId>,
}

/// An immutable parsed program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SyntaxTree {
    /// Fold a postfix token sequence into a tree.
    ///
    /// # Errors
    ///
    /// Fails when an operator lacks operands, or when the sequence does not
    /// reduce to exactly one tree.
    pub fn from_postfix(postfix: Vec<Token>) -> Result<Self, SyntaxError> {
        let mut nodes: Vec<Node> = Vec::with_capacity(postfix.len());
        let mut stack: Vec<NodeId> = Vec::new();

        for token in postfix {
            let (left, right) = match token.as_operator() {
                None => (None, None),
                Some(op) if op.is_opening_bracket() || op.is_closing_bracket() => {
                    return Err(SyntaxError::new(
                        token.position,
                        format!("Unexpected bracket '{}'", token),
                    ));
                }
                Some(op) if op.is_unary() => {
                    let operand = stack.pop();
                    if operand.is_none() {
                        return Err(missing_operand(&token));
                    }
                    (operand, None)
                }
                Some(_) => match (stack.pop(), stack.pop()) {
                    (Some(right), Some(left)) => (Some(left), Some(right)),
                    _ => return Err(missing_operand(&token)),
                },
            };
            let id = NodeId(nodes.len());
            nodes.push(Node { token, left, right });
            stack.push(id);
        }

        match stack.as_slice() {
            [root] => Ok(Self { root: *root, nodes }),
            [] => Err(SyntaxError::new(Location::Unknown, "Empty expression")),
            [_, extra, ..] => Err(SyntaxError::new(
                nodes[extra.index()].token.position,
                format!("Unexpected operand '{}'", nodes[extra.index()].token),
            )),
        }
    }

    /// The root node's id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node.
    ///
    /// Ids are only handed out by this tree, so the index is always valid.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes with their ids, in postfix order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }
}

fn missing_operand(token: &Token) -> SyntaxError {
    SyntaxError::new(
        token.position,
        format!("Missing operand for operator '{}'", token),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Operator;
    use crate::token::{Position, TokenKind};

    fn num(raw: &str, col: usize) -> Token {
        Token::new(raw, TokenKind::Number, Position::new(1, col))
    }

    fn op(op: Operator, col: usize) -> Token {
        Token::operator(op, Some(Position::new(1, col)))
    }

    #[test]
    fn test_fold_binary() {
        let tree =
            SyntaxTree::from_postfix(vec![num("1", 1), num("2", 5), op(Operator::Add, 3)]).unwrap();
        let root = tree.node(tree.root());
        assert_eq!(root.token.as_operator(), Some(Operator::Add));
        assert_eq!(tree.node(root.left.unwrap()).token.raw, "1");
        assert_eq!(tree.node(root.right.unwrap()).token.raw, "2");
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_fold_unary_uses_left() {
        let tree = SyntaxTree::from_postfix(vec![num("1", 2), op(Operator::Neg, 1)]).unwrap();
        let root = tree.node(tree.root());
        assert!(root.left.is_some());
        assert!(root.right.is_none());
    }

    #[test]
    fn test_fold_errors() {
        assert!(SyntaxTree::from_postfix(vec![op(Operator::Add, 1)]).is_err());
        assert!(SyntaxTree::from_postfix(vec![num("1", 1), num("2", 3)]).is_err());
        assert!(SyntaxTree::from_postfix(vec![]).is_err());
    }
}
