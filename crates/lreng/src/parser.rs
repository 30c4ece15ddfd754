//! Shunting-yard parser
//!
//! Tokens are reordered into postfix while an expectation automaton checks
//! that operands and operators alternate correctly. The postfix sequence
//! is then folded into a [`SyntaxTree`].

use tracing::debug;

use crate::error::SyntaxError;
use crate::grammar::{BracketMatch, Operator};
use crate::token::Token;
use crate::tree::SyntaxTree;

/// What the next token may be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// An operand or a prefix operator
    Prefix,
    /// A binary operator, a call parenthesis or a closing bracket
    Infix,
}

/// Parse a token sequence into a tree.
///
/// # Errors
///
/// Returns a [`SyntaxError`] for misplaced tokens, unbalanced brackets or an
/// incomplete expression.
pub fn parse(tokens: Vec<Token>) -> Result<SyntaxTree, SyntaxError> {
    let postfix = to_postfix(tokens)?;
    let tree = SyntaxTree::from_postfix(postfix)?;
    debug!(nodes = tree.len(), "built syntax tree");
    Ok(tree)
}

/// Reorder infix tokens into postfix.
///
/// Bracket pairs never reach the output: grouping parentheses vanish, a
/// closed call parenthesis becomes [`Operator::Call`] and a closed body
/// becomes [`Operator::FuncMaker`], both positioned at the opening bracket.
pub fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Token>, SyntaxError> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();
    let mut expect = Expect::Prefix;
    let last_position = tokens.iter().rev().find_map(|tok| tok.position);

    for token in tokens {
        let Some(op) = token.as_operator() else {
            require(expect, Expect::Prefix, &token)?;
            output.push(token);
            expect = Expect::Infix;
            continue;
        };

        if op.is_prefix() {
            require(expect, Expect::Prefix, &token)?;
            if !op.is_opening_bracket() {
                pop_stronger(&mut stack, &mut output, op);
            }
            stack.push(token);
        } else if op == Operator::CallOpen {
            require(expect, Expect::Infix, &token)?;
            stack.push(token);
            expect = Expect::Prefix;
        } else if op.is_closing_bracket() {
            require(expect, Expect::Infix, &token)?;
            close_bracket(&mut stack, &mut output, token)?;
        } else {
            require(expect, Expect::Infix, &token)?;
            pop_stronger(&mut stack, &mut output, op);
            stack.push(token);
            expect = Expect::Prefix;
        }
    }

    if expect == Expect::Prefix {
        return Err(SyntaxError::new(last_position, "Unexpected end of input"));
    }

    while let Some(token) = stack.pop() {
        if token.as_operator().is_some_and(Operator::is_opening_bracket) {
            return Err(SyntaxError::new(
                token.position,
                format!("Unmatched opening bracket '{}'", token),
            ));
        }
        output.push(token);
    }

    debug!(postfix = output.len(), "converted to postfix");
    Ok(output)
}

fn require(expect: Expect, wanted: Expect, token: &Token) -> Result<(), SyntaxError> {
    if expect == wanted {
        return Ok(());
    }
    let message = match wanted {
        Expect::Prefix => format!("Expected an operand, got '{}'", token),
        Expect::Infix => format!("Expected an operator, got '{}'", token),
    };
    Err(SyntaxError::new(token.position, message))
}

/// Move operators that bind at least as tightly as `op` to the output.
fn pop_stronger(stack: &mut Vec<Token>, output: &mut Vec<Token>, op: Operator) {
    while let Some(top) = stack.last().and_then(Token::as_operator) {
        if top.is_opening_bracket() {
            break;
        }
        let stronger = top.precedence() > op.precedence()
            || (top.precedence() == op.precedence() && !op.is_right_assoc());
        if !stronger {
            break;
        }
        output.extend(stack.pop());
    }
}

fn close_bracket(
    stack: &mut Vec<Token>,
    output: &mut Vec<Token>,
    close: Token,
) -> Result<(), SyntaxError> {
    let Some(close_op) = close.as_operator() else {
        return Ok(());
    };
    loop {
        let Some(top) = stack.pop() else {
            return Err(SyntaxError::new(
                close.position,
                format!("Unmatched closing bracket '{}'", close),
            ));
        };
        let Some(open_op) = top.as_operator().filter(|op| op.is_opening_bracket()) else {
            output.push(top);
            continue;
        };
        return match open_op.close_with(close_op) {
            BracketMatch::Grouping => Ok(()),
            BracketMatch::Marker(marker) => {
                output.push(Token::operator(marker, top.position));
                Ok(())
            }
            BracketMatch::Mismatch => Err(SyntaxError::new(
                close.position,
                format!("Bracket '{}' does not close '{}'", close, top),
            )),
        };
    }
}
