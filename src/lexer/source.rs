//! Sentinel-terminated source buffer with a forward-only cursor.
//!
//! The buffer owns a copy of the input followed by a single `0x00` byte.
//! Reads at or past the end of input return that sentinel, so the automaton
//! can detect end of input without bounds-checking every lookahead.
//!
//! ```text
//! [source_bytes..., 0x00]
//!  ^                ^
//!  0                len (sentinel)
//! ```

use crate::errors::errors::ErrorImpl;

pub const SENTINEL: u8 = 0;

#[derive(Debug, Clone)]
pub struct SourceBuffer {
    buf: Vec<u8>,
    len: usize,
    pos: usize,
    line: u32,
}

impl SourceBuffer {
    /// Copies `source` into a fresh buffer and appends the sentinel.
    pub fn new(source: &[u8]) -> Result<Self, ErrorImpl> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(source.len() + 1)
            .map_err(|_| ErrorImpl::AllocationFailure)?;
        buf.extend_from_slice(source);
        buf.push(SENTINEL);

        Ok(SourceBuffer {
            buf,
            len: source.len(),
            pos: 0,
            line: 1,
        })
    }

    /// Byte under the cursor; the sentinel once the input is exhausted.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf[self.pos]
    }

    /// Byte one past the cursor; the sentinel past the end of input.
    #[inline]
    pub fn peek_next(&self) -> u8 {
        if self.pos < self.len {
            self.buf[self.pos + 1]
        } else {
            SENTINEL
        }
    }

    /// Moves the cursor forward by one byte. Stops on the sentinel.
    #[inline]
    pub fn advance(&mut self) {
        if self.pos < self.len {
            self.pos += 1;
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.len
    }

    pub fn mark(&self) -> usize {
        self.pos
    }

    /// Bytes from `mark` up to, excluding, the cursor.
    pub fn slice(&self, mark: usize) -> &[u8] {
        &self.buf[mark..self.pos]
    }

    pub fn newline(&mut self) {
        self.line += 1;
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The input bytes, without the sentinel.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}
