//! Output sink: indentation-aware writer over a stack of buffers.
//!
//! Every byte of markup goes through [`Output`]. It tracks the nesting
//! level used for indentation and keeps a stack of saved buffers so a
//! nested render can be captured as a string (table cells, overrides)
//! before being spliced into the parent's stream.

use crate::error::Invariant;

/// Indentation unit written once per nesting level.
const INDENT: &str = "  ";

#[derive(Debug, Default)]
pub(crate) struct Output {
    /// Active buffer.
    buf: String,
    /// Buffers saved by `push_new_buffer`, innermost last.
    stack: Vec<String>,
    level: usize,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append `s` verbatim.
    pub(crate) fn write_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// Append `\n` unless the buffer is empty or already ends in one.
    pub(crate) fn newline(&mut self) {
        if !self.buf.is_empty() && !self.buf.ends_with('\n') {
            self.buf.push('\n');
        }
    }

    /// Write indentation for the current level.
    pub(crate) fn write_indent(&mut self) {
        self.write_indent_plus(0);
    }

    /// Write indentation for `level + add`.
    pub(crate) fn write_indent_plus(&mut self, add: usize) {
        for _ in 0..self.level + add {
            self.buf.push_str(INDENT);
        }
    }

    pub(crate) fn level(&self) -> usize {
        self.level
    }

    pub(crate) fn enter_level(&mut self) {
        self.level += 1;
    }

    pub(crate) fn leave_level(&mut self) -> Result<(), Invariant> {
        self.level = self.level.checked_sub(1).ok_or(Invariant::NegativeLevel)?;
        Ok(())
    }

    /// Bytes in the active buffer.
    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    /// Save the active buffer and make a fresh one active.
    pub(crate) fn push_new_buffer(&mut self) {
        self.stack.push(std::mem::take(&mut self.buf));
    }

    /// Restore the previously saved buffer, returning the one it replaces.
    pub(crate) fn pop_buffer(&mut self) -> Result<String, Invariant> {
        let saved = self.stack.pop().ok_or(Invariant::BufferUnderflow)?;
        Ok(std::mem::replace(&mut self.buf, saved))
    }

    /// Number of saved buffers.
    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Drop every pushed buffer and reactivate the outermost one.
    pub(crate) fn unwind(&mut self) {
        if let Some(root) = self.stack.drain(..).next() {
            self.buf = root;
        }
    }
}
