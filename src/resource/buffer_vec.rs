//! CPU-side buffer with upload tracking.

use bytemuck::Pod;

/// A vector of plain-old-data elements destined for a renderer's GPU buffer.
///
/// Every mutable access marks the buffer `dirty` and bumps its write counter; the renderer
/// uploads dirty buffers and calls [`BufferVec::clear_dirty`] afterwards.
#[derive(Clone, Debug)]
pub struct BufferVec<T: Pod> {
    dirty: bool,
    writes: usize,
    data: Vec<T>,
}

impl<T: Pod> BufferVec<T> {
    /// Creates a new `BufferVec`, marked dirty so it gets uploaded once.
    pub fn new(data: Vec<T>) -> BufferVec<T> {
        BufferVec {
            dirty: true,
            writes: 0,
            data,
        }
    }

    /// Creates a new empty `BufferVec`.
    pub fn new_empty() -> BufferVec<T> {
        BufferVec {
            dirty: false,
            writes: 0,
            data: Vec::new(),
        }
    }

    /// Is this vector empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The length of this vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Immutably accesses the elements.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutably accesses the elements.
    ///
    /// This method will mark this vector as `dirty`.
    #[inline]
    pub fn data_mut(&mut self) -> &mut Vec<T> {
        self.dirty = true;
        self.writes += 1;
        &mut self.data
    }

    /// Replaces the whole content.
    pub fn replace(&mut self, data: Vec<T>) {
        *self.data_mut() = data;
    }

    /// The elements as raw bytes, ready for upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Returns `true` if the content changed since the last upload.
    #[inline]
    pub fn dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the content as uploaded.
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Number of mutable accesses since creation.
    #[inline]
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Frees the elements.
    pub fn release(&mut self) {
        self.data = Vec::new();
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_mark_dirty() {
        let mut buf = BufferVec::new(vec![1u32, 2, 3]);
        assert!(buf.dirty());
        buf.clear_dirty();
        assert!(!buf.dirty());
        assert_eq!(buf.writes(), 0);

        buf.data_mut()[0] = 9;
        assert!(buf.dirty());
        assert_eq!(buf.writes(), 1);
        assert_eq!(buf.data(), &[9, 2, 3]);
        assert_eq!(buf.as_bytes().len(), 12);
    }

    #[test]
    fn reads_do_not_mark_dirty() {
        let mut buf: BufferVec<u16> = BufferVec::new_empty();
        assert!(!buf.dirty());
        let _ = buf.data();
        let _ = buf.as_bytes();
        assert!(!buf.dirty());
        buf.replace(vec![1, 2]);
        assert_eq!(buf.len(), 2);
        buf.release();
        assert!(buf.is_empty());
    }
}
