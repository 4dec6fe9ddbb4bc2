//! Fixed-capacity scratch buffer for decoded input

use crate::error::Result;
use crate::source::ChunkSource;

/// Reusable character buffer staging input between the source and the tokenizer
///
/// The unconsumed part is the current input view. It is only refilled
/// once fully consumed, always from the front.
pub struct ScratchBuffer {
    chars: Box<[char]>,
    start: usize,
    end: usize,
}

impl ScratchBuffer {
    /// Create a buffer holding up to `capacity` characters (at least 1)
    pub fn new(capacity: usize) -> Self {
        Self {
            chars: vec!['\0'; capacity.max(1)].into_boxed_slice(),
            start: 0,
            end: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.chars.len()
    }

    /// Unconsumed characters
    pub fn view(&self) -> &[char] {
        &self.chars[self.start..self.end]
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Mark `n` characters of the view as consumed
    pub fn consume(&mut self, n: usize) {
        self.start = (self.start + n).min(self.end);
    }

    /// Drop any leftover view
    pub fn clear(&mut self) {
        self.start = 0;
        self.end = 0;
    }

    /// Refill from `source`, returning the number of characters read.
    /// Any unconsumed view is discarded.
    pub fn refill<S: ChunkSource + ?Sized>(&mut self, source: &mut S) -> Result<usize> {
        self.clear();
        let n = source.fill(&mut self.chars)?;
        self.end = n.min(self.chars.len());
        Ok(self.end)
    }
}
