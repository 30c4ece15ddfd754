//! Default frame with built-in functions

use std::rc::Rc;

use super::Frame;
use crate::context::EvalContext;
use crate::value::{number, BuiltinFn, Value};

/// Every builtin routine, in the order they are bound.
pub const BUILTINS: &[BuiltinFn] = &[
    BuiltinFn {
        name: "input",
        func: builtin_input,
    },
    BuiltinFn {
        name: "output",
        func: builtin_output,
    },
    BuiltinFn {
        name: "is_number",
        func: builtin_is_number,
    },
    BuiltinFn {
        name: "is_callable",
        func: builtin_is_callable,
    },
    BuiltinFn {
        name: "is_pair",
        func: builtin_is_pair,
    },
];

thread_local! {
    static DEFAULT_FRAME: Rc<Frame> = build_default_frame();
}

/// The outermost frame holding `null` and the builtins.
///
/// Built once per thread and shared; programs run in a child of it and
/// never write to it.
pub fn default_frame() -> Rc<Frame> {
    DEFAULT_FRAME.with(Rc::clone)
}

fn build_default_frame() -> Rc<Frame> {
    let frame = Frame::root();
    frame.assign("null", Value::Null);
    for builtin in BUILTINS {
        frame.assign(builtin.name, Value::Builtin(*builtin));
    }
    frame
}

// ═══════════════════════════════════════════════════════════════════════
// Built-in Function Implementations
// ═══════════════════════════════════════════════════════════════════════

/// Read one byte. `null` at end of input.
fn builtin_input(_argument: &Value, ctx: &mut EvalContext<'_>) -> Result<Value, String> {
    match ctx.read_byte() {
        Ok(Some(byte)) => Ok(Value::int(byte)),
        Ok(None) => Ok(Value::Null),
        Err(e) => Err(format!("Cannot read input: {}", e)),
    }
}

/// Write one byte and flush.
fn builtin_output(argument: &Value, ctx: &mut EvalContext<'_>) -> Result<Value, String> {
    let byte = argument
        .as_number()
        .and_then(number::to_byte)
        .ok_or_else(|| {
            format!(
                "Expect an integer between 0 and 255, get {} {}",
                argument.type_name(),
                argument
            )
        })?;
    ctx.write_byte(byte)
        .map_err(|e| format!("Cannot write output: {}", e))?;
    Ok(Value::Null)
}

fn builtin_is_number(argument: &Value, _ctx: &mut EvalContext<'_>) -> Result<Value, String> {
    Ok(Value::bool(argument.is_number()))
}

fn builtin_is_callable(argument: &Value, _ctx: &mut EvalContext<'_>) -> Result<Value, String> {
    Ok(Value::bool(argument.is_callable()))
}

fn builtin_is_pair(argument: &Value, _ctx: &mut EvalContext<'_>) -> Result<Value, String> {
    Ok(Value::bool(argument.is_pair()))
}
