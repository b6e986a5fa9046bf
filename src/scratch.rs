//! Growable byte buffer for decoded string data.
//!
//! One `Scratch` instance lives inside each parse call and accumulates the
//! decoded bytes of whatever string is currently being unescaped. Each
//! string records a mark on entry and rewinds to it once its bytes are
//! copied out, so every string in the document reuses one allocation.

/// A growable byte region with a logical top.
///
/// Grows by at least 1.5x whenever an append would exceed capacity, so a
/// long run of small pushes stays amortized O(1). Allocation failure aborts
/// the process, as with every other use of the global allocator.
pub(crate) struct Scratch {
    buf: Vec<u8>,
}

/// Byte offset into a [`Scratch`], recorded before a speculative decode.
pub(crate) type Mark = usize;

impl Scratch {
    pub(crate) fn new() -> Self {
        Scratch { buf: Vec::new() }
    }

    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    /// Current top, for a later [`rewind`](Scratch::rewind).
    pub(crate) fn mark(&self) -> Mark {
        self.buf.len()
    }

    /// Drops every byte pushed since `mark` was taken.
    pub(crate) fn rewind(&mut self, mark: Mark) {
        debug_assert!(mark <= self.buf.len());
        self.buf.truncate(mark);
    }

    pub(crate) fn push(&mut self, byte: u8) {
        self.grow_for(1);
        self.buf.push(byte);
    }

    pub(crate) fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.grow_for(bytes.len());
        self.buf.extend_from_slice(bytes);
    }

    /// Appends the UTF-8 encoding of a Unicode scalar value: 1 to 4 bytes
    /// depending on range.
    pub(crate) fn push_code_point(&mut self, n: u32) {
        self.grow_for(4);
        match n {
            0..=0x7F => self.buf.push(n as u8),
            0x80..=0x7FF => {
                self.buf.push(((n >> 6) & 0b0001_1111) as u8 | 0b1100_0000);
                self.buf.push((n & 0b0011_1111) as u8 | 0b1000_0000);
            }
            0x800..=0xFFFF => {
                self.buf.push(((n >> 12) & 0b0000_1111) as u8 | 0b1110_0000);
                self.buf.push(((n >> 6) & 0b0011_1111) as u8 | 0b1000_0000);
                self.buf.push((n & 0b0011_1111) as u8 | 0b1000_0000);
            }
            _ => {
                debug_assert!(n <= 0x10_FFFF);
                self.buf.push(((n >> 18) & 0b0000_0111) as u8 | 0b1111_0000);
                self.buf.push(((n >> 12) & 0b0011_1111) as u8 | 0b1000_0000);
                self.buf.push(((n >> 6) & 0b0011_1111) as u8 | 0b1000_0000);
                self.buf.push((n & 0b0011_1111) as u8 | 0b1000_0000);
            }
        }
    }

    /// Read-only view of the bytes pushed since `mark`.
    pub(crate) fn since(&self, mark: Mark) -> &[u8] {
        &self.buf[mark..]
    }

    /// Ensures room for `additional` more bytes, growing capacity by at
    /// least 1.5x so repeated appends keep their amortized cost.
    fn grow_for(&mut self, additional: usize) {
        let needed = self.buf.len() + additional;
        if needed > self.buf.capacity() {
            let grown = self.buf.capacity() + self.buf.capacity() / 2;
            let target = usize::max(grown, needed);
            self.buf.reserve(target - self.buf.len());
        }
    }
}
