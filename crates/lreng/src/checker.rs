//! Static scope checker
//!
//! Walks the tree once, opening a frame for every function body, and
//! reports every scope violation it finds:
//!
//! - the target of `=` or `=>` is not a bare identifier,
//! - a name is assigned twice in the same body,
//! - a name is used where no enclosing scope ever binds it.
//!
//! Uses are resolved after the walk against the final bindings of their
//! scope, so a function body may refer to a name its enclosing scope
//! assigns later.

use std::rc::Rc;

use tracing::debug;

use crate::environment::{default_frame, Frame};
use crate::error::{Location, SemanticError, SemanticErrorKind, SemanticErrors};
use crate::grammar::Operator;
use crate::tree::{NodeId, SyntaxTree};
use crate::value::Value;

/// Check every identifier in `tree` against its lexical scope.
///
/// # Errors
///
/// Returns all violations, sorted by source position.
pub fn check(tree: &SyntaxTree) -> Result<(), SemanticErrors> {
    let mut checker = Checker::default();
    checker.walk(tree);
    checker.resolve_uses();

    debug!(errors = checker.errors.len(), "scope check finished");
    if checker.errors.is_empty() {
        return Ok(());
    }
    let mut errors = checker.errors;
    errors.sort_by_key(|error| error.location.position());
    Err(SemanticErrors { errors })
}

/// A node still to be visited and the scope it appears in.
struct Visit {
    node: NodeId,
    frame: Rc<Frame>,

    /// Parameter to bind when `node` opens a function body
    param: Option<String>,
}

/// An identifier occurrence to resolve once all scopes are filled.
struct Use {
    name: String,
    location: Location,
    frame: Rc<Frame>,
}

#[derive(Default)]
struct Checker {
    uses: Vec<Use>,
    errors: Vec<SemanticError>,
}

impl Checker {
    fn walk(&mut self, tree: &SyntaxTree) {
        let mut pending = vec![Visit {
            node: tree.root(),
            frame: Frame::child(&default_frame()),
            param: None,
        }];

        while let Some(Visit { node, frame, param }) = pending.pop() {
            let current = tree.node(node);
            let Some(op) = current.token.as_operator() else {
                if let Some(name) = current.token.as_identifier() {
                    self.uses.push(Use {
                        name: name.to_string(),
                        location: current.token.position.into(),
                        frame,
                    });
                }
                continue;
            };

            match op {
                Operator::FuncMaker => {
                    let body = Frame::child(&frame);
                    if let Some(param) = param {
                        body.assign(param, Value::Null);
                    }
                    pending.extend(current.left.map(|left| Visit {
                        node: left,
                        frame: body,
                        param: None,
                    }));
                }
                Operator::Bind => {
                    let param = self.binding_target(tree, current.left, op);
                    let is_bound = param.is_some();
                    if let Some(right) = current.right {
                        let opens_body = tree.node(right).token.as_operator()
                            == Some(Operator::FuncMaker);
                        pending.push(Visit {
                            node: right,
                            frame: Rc::clone(&frame),
                            param: param.filter(|_| opens_body),
                        });
                    }
                    if !is_bound {
                        pending.extend(current.left.map(|left| Visit {
                            node: left,
                            frame,
                            param: None,
                        }));
                    }
                }
                Operator::Assign => {
                    let target = self.binding_target(tree, current.left, op);
                    if let Some(right) = current.right {
                        pending.push(Visit {
                            node: right,
                            frame: Rc::clone(&frame),
                            param: None,
                        });
                    }
                    match (target, current.left) {
                        (Some(name), Some(left)) => {
                            if frame.contains_local(&name) {
                                self.errors.push(SemanticError {
                                    location: tree.node(left).token.position.into(),
                                    kind: SemanticErrorKind::RepeatedInitialization { name },
                                });
                            } else {
                                frame.assign(name, Value::Null);
                            }
                        }
                        (None, Some(left)) => pending.push(Visit {
                            node: left,
                            frame,
                            param: None,
                        }),
                        _ => {}
                    }
                }
                _ => {
                    // Right first so the left operand is visited first.
                    for child in [current.right, current.left].into_iter().flatten() {
                        pending.push(Visit {
                            node: child,
                            frame: Rc::clone(&frame),
                            param: None,
                        });
                    }
                }
            }
        }
    }

    /// The identifier on the left of `=` or `=>`, reporting an error if the
    /// left operand is anything else.
    fn binding_target(
        &mut self,
        tree: &SyntaxTree,
        left: Option<NodeId>,
        op: Operator,
    ) -> Option<String> {
        let left = tree.node(left?);
        if let Some(name) = left.token.as_identifier() {
            return Some(name.to_string());
        }
        self.errors.push(SemanticError {
            location: left.token.position.into(),
            kind: SemanticErrorKind::LeftNotIdentifier { op: op.describe() },
        });
        None
    }

    fn resolve_uses(&mut self) {
        for Use {
            name,
            location,
            frame,
        } in self.uses.drain(..)
        {
            if !frame.contains(&name) {
                self.errors.push(SemanticError {
                    location,
                    kind: SemanticErrorKind::Uninitialized { name },
                });
            }
        }
    }
}
