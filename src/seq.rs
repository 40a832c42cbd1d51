//! The ordered code sequence the decoder consumes.
//!
//! Codes are appended while unpacking the whole input and then traversed once
//! through an internal cursor. The cursor only moves forward; `reset` rewinds
//! it to the first element.
use crate::Code;

#[derive(Default)]
pub struct CodeSeq {
    codes: Vec<Code>,
    cursor: usize,
}

impl CodeSeq {
    pub fn new() -> Self {
        CodeSeq::default()
    }

    /// Append a code at the tail. Appending does not disturb the cursor.
    pub fn push(&mut self, code: Code) {
        self.codes.push(code);
    }

    /// Rewind the cursor to the first code.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn has_next(&self) -> bool {
        self.cursor < self.codes.len()
    }

    /// The code under the cursor, advancing past it.
    pub fn next(&mut self) -> Option<Code> {
        let code = self.codes.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Drop all codes and rewind, ready for a fresh run.
    pub fn clear(&mut self) {
        self.codes.clear();
        self.cursor = 0;
    }
}
