/// A fixed-capacity store of interleaved vertex floats.
///
/// The buffer is allocated once and never grows. `cursor` marks the end of
/// the populated prefix; everything past it is stale data from previous
/// batches.
#[derive(Debug)]
pub struct VertexBuffer {
    data: Box<[f32]>,
    cursor: usize,
}

impl VertexBuffer {
    /// Allocates a buffer holding `capacity` floats.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0.; capacity].into_boxed_slice(),
            cursor: 0,
        }
    }

    /// The total number of floats the buffer holds.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// The number of populated floats.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns true if nothing has been written since the last reset.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// The number of floats that can still be written.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.cursor
    }

    /// Returns true if no more floats can be written.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cursor == self.capacity()
    }

    /// The populated prefix, `[0, cursor)`.
    #[must_use]
    pub fn populated(&self) -> &[f32] {
        &self.data[..self.cursor]
    }

    /// Reserves the next `len` floats and returns them for writing.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `len` floats remain. Callers are expected to flush
    /// before the buffer overflows.
    pub fn reserve(&mut self, len: usize) -> &mut [f32] {
        assert!(
            len <= self.remaining(),
            "vertex buffer overflow: {} floats requested, {} remaining",
            len,
            self.remaining()
        );
        let start = self.cursor;
        self.cursor += len;
        &mut self.data[start..self.cursor]
    }

    /// Appends `vertices` at the cursor.
    pub fn extend_from_slice(&mut self, vertices: &[f32]) {
        self.reserve(vertices.len()).copy_from_slice(vertices);
    }

    /// Marks the buffer as empty. The stored floats are left in place.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}
