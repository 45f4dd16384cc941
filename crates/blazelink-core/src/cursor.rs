//! Bounds-checked read cursor with mark/reset.
//!
//! Every read in the TDF reader goes through this type: no indexing, no
//! panics, out-of-range reads come back as `Truncated`. A body buffer is
//! shared-read-only after framing, so a second traversal (e.g. the
//! diagnostics dumper after dispatch) takes its own `Cursor` or uses
//! `mark`/`reset` instead of assuming the read position is shared-safe.

use crate::error::{DecodeError, Result};

/// Forward-only reader over a borrowed byte slice.
#[derive(Debug)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    mark: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            mark: 0,
        }
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Current read position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Records the current position for a later `reset`.
    pub fn mark(&mut self) {
        self.mark = self.pos;
    }

    /// Rewinds to the last `mark` (the start, if never marked).
    pub fn reset(&mut self) {
        self.pos = self.mark;
    }

    /// Steps back `n` bytes. Saturates at the start of the buffer.
    pub fn rewind(&mut self, n: usize) {
        self.pos = self.pos.saturating_sub(n);
    }

    /// Returns the next byte without consuming it.
    pub fn peek_u8(&self) -> Result<u8> {
        match self.data.get(self.pos) {
            Some(b) => Ok(*b),
            None => Err(DecodeError::Truncated {
                needed: 1,
                available: 0,
            }),
        }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let b = self.peek_u8()?;
        self.pos += 1;
        Ok(b)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_slice(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_slice(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Borrows the next `n` bytes and advances past them.
    pub fn read_slice(&mut self, n: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if available < n {
            return Err(DecodeError::Truncated {
                needed: n,
                available,
            });
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn reads_advance_and_bound_check() {
        let mut c = Cursor::new(&[0xAB, 0xCD, 0xEF]);
        assert_eq!(c.read_u16().unwrap(), 0xABCD);
        assert_eq!(c.remaining(), 1);
        let err = c.read_u16().unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                needed: 2,
                available: 1
            }
        );
        // Failed read consumes nothing.
        assert_eq!(c.read_u8().unwrap(), 0xEF);
    }

    #[test]
    fn mark_reset_restores_position() {
        let mut c = Cursor::new(&[1, 2, 3, 4]);
        c.read_u8().unwrap();
        c.mark();
        c.read_u16().unwrap();
        c.reset();
        assert_eq!(c.position(), 1);
        assert_eq!(c.read_u8().unwrap(), 2);
    }

    #[test]
    fn rewind_saturates() {
        let mut c = Cursor::new(&[9]);
        c.rewind(5);
        assert_eq!(c.position(), 0);
        assert_eq!(c.read_u8().unwrap(), 9);
    }
}
