//! Evaluation context: the program's byte streams

use std::io::{self, ErrorKind, Read, Write};

/// I/O handles used by the `input` and `output` builtins.
///
/// The binary wires these to locked stdin/stdout; tests use byte slices and
/// vectors.
pub struct EvalContext<'io> {
    input: &'io mut dyn Read,
    output: &'io mut dyn Write,
}

impl<'io> EvalContext<'io> {
    /// Create a context over the given streams.
    pub fn new(input: &'io mut dyn Read, output: &'io mut dyn Write) -> Self {
        Self { input, output }
    }

    /// Read a single byte; `None` at end of stream.
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Write a single byte and flush it.
    pub fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.output.write_all(&[byte])?;
        self.output.flush()
    }
}

impl std::fmt::Debug for EvalContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvalContext").finish_non_exhaustive()
    }
}
