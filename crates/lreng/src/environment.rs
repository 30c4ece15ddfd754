//! Runtime environment: scope frames and the default prelude
//!
//! The scope checker and the evaluator share the same [`Frame`] type. The
//! checker binds names to `null` placeholders; the evaluator binds real
//! values. Both start from a child of [`default_frame`].

mod frame;
mod prelude;

pub use frame::Frame;
pub use prelude::{default_frame, BUILTINS};
