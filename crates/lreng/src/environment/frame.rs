//! Chained scope frames

use std::cell::RefCell;
use std::fmt;
use std::iter;
use std::mem;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::EnvironmentError;
use crate::value::{Teardown, Value};

/// One lexical scope: local bindings plus a link to the enclosing frame.
///
/// Frames are shared through `Rc`. A function call's frame links to the
/// frame the function captured, never to the caller's frame.
///
/// # Example
///
/// ```
/// use lreng::{Frame, Value};
///
/// let outer = Frame::root();
/// outer.define("x", Value::int(1)).unwrap();
///
/// let inner = Frame::child(&outer);
/// inner.define("x", Value::int(10)).unwrap(); // shadows outer x
///
/// assert_eq!(inner.get("x"), Some(Value::int(10)));
/// assert_eq!(outer.get("x"), Some(Value::int(1)));
/// assert!(inner.define("x", Value::Null).is_err());
/// ```
#[derive(Default)]
pub struct Frame {
    /// Bindings made in this scope, in definition order
    local: RefCell<IndexMap<String, Value>>,

    /// The enclosing scope
    shared: Option<Rc<Frame>>,
}

impl Frame {
    /// Create a frame with no enclosing scope.
    pub fn root() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Create an empty frame enclosed by `parent`.
    pub fn child(parent: &Rc<Frame>) -> Rc<Self> {
        Rc::new(Self {
            local: RefCell::default(),
            shared: Some(Rc::clone(parent)),
        })
    }

    /// The enclosing frame.
    pub fn shared(&self) -> Option<&Rc<Frame>> {
        self.shared.as_ref()
    }

    /// This frame followed by every enclosing frame.
    fn chain(&self) -> impl Iterator<Item = &Frame> {
        iter::successors(Some(self), |frame| frame.shared.as_deref())
    }

    /// Number of frames in the chain, counting this one.
    pub fn depth(&self) -> usize {
        self.chain().count()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// Look up a name, innermost frame first.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.chain()
            .find_map(|frame| frame.local.borrow().get(name).cloned())
    }

    /// Look up a name, failing if it is unbound.
    pub fn lookup(&self, name: &str) -> Result<Value, EnvironmentError> {
        self.get(name).ok_or_else(|| EnvironmentError::Undefined {
            name: name.to_string(),
        })
    }

    /// Whether the name is visible from this frame.
    pub fn contains(&self, name: &str) -> bool {
        self.chain()
            .any(|frame| frame.local.borrow().contains_key(name))
    }

    /// Whether the name is bound in this frame itself.
    pub fn contains_local(&self, name: &str) -> bool {
        self.local.borrow().contains_key(name)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Binding
    // ═══════════════════════════════════════════════════════════════════

    /// Bind a name in this frame.
    ///
    /// # Errors
    ///
    /// Fails if the name is already bound in this frame. Names bound only in
    /// enclosing frames are shadowed.
    pub fn define(&self, name: impl Into<String>, value: Value) -> Result<(), EnvironmentError> {
        let name = name.into();
        let mut local = self.local.borrow_mut();
        if local.contains_key(&name) {
            return Err(EnvironmentError::AlreadyDefined { name });
        }
        local.insert(name, value);
        Ok(())
    }

    /// Bind a name in this frame, replacing any local binding. Enclosing
    /// frames are never written.
    pub fn assign(&self, name: impl Into<String>, value: Value) {
        self.local.borrow_mut().insert(name.into(), value);
    }

    /// Names bound in this frame, in definition order.
    pub fn local_names(&self) -> Vec<String> {
        self.local.borrow().keys().cloned().collect()
    }

    /// Number of bindings in this frame.
    pub fn len(&self) -> usize {
        self.local.borrow().len()
    }

    /// Whether this frame has no bindings.
    pub fn is_empty(&self) -> bool {
        self.local.borrow().is_empty()
    }

    /// Empty the frame, handing back its bindings and enclosing frame.
    pub(crate) fn detach(&mut self) -> (IndexMap<String, Value>, Option<Rc<Frame>>) {
        (mem::take(self.local.get_mut()), self.shared.take())
    }
}

// Call frames hold closures that capture earlier call frames, so a long
// chain is released through a work stack instead of nested drops.
impl Drop for Frame {
    fn drop(&mut self) {
        let (local, shared) = self.detach();
        if local.is_empty() && shared.is_none() {
            return;
        }
        let mut teardown = Teardown::default();
        for value in local.into_values() {
            teardown.value(value);
        }
        if let Some(shared) = shared {
            teardown.frame(shared);
        }
        teardown.run();
    }
}

// Frames can hold closures that capture them, so only names are printed.
impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("local", &self.local_names())
            .field("depth", &self.depth())
            .finish()
    }
}
