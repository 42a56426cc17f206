//! Index buffer width selection.

use crate::resource::BufferVec;

/// Meshes with more vertices than this use 32-bit indices; all others use 16-bit indices.
pub const WIDE_INDEX_THRESHOLD: usize = 65000;

/// Width of the elements of an index buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexFormat {
    /// 16-bit indices.
    Uint16,
    /// 32-bit indices.
    Uint32,
}

impl IndexFormat {
    /// The index format for a mesh of `vertex_count` vertices.
    #[inline]
    pub fn for_vertex_count(vertex_count: usize) -> IndexFormat {
        if vertex_count > WIDE_INDEX_THRESHOLD {
            IndexFormat::Uint32
        } else {
            IndexFormat::Uint16
        }
    }
}

/// Triangle indices stored in the width chosen by [`IndexFormat::for_vertex_count`].
#[derive(Clone, Debug)]
pub enum IndexBuffer {
    /// 16-bit indices.
    U16(BufferVec<u16>),
    /// 32-bit indices.
    U32(BufferVec<u32>),
}

impl IndexBuffer {
    /// Packs triangles for a mesh of `vertex_count` vertices.
    pub fn new(triangles: &[[u32; 3]], vertex_count: usize) -> IndexBuffer {
        let flat = triangles.iter().flatten().copied();

        match IndexFormat::for_vertex_count(vertex_count) {
            IndexFormat::Uint16 => IndexBuffer::U16(BufferVec::new(flat.map(|i| i as u16).collect())),
            IndexFormat::Uint32 => IndexBuffer::U32(BufferVec::new(flat.collect())),
        }
    }

    /// An empty 16-bit index buffer.
    pub fn empty() -> IndexBuffer {
        IndexBuffer::U16(BufferVec::new_empty())
    }

    /// The element width.
    #[inline]
    pub fn format(&self) -> IndexFormat {
        match self {
            IndexBuffer::U16(_) => IndexFormat::Uint16,
            IndexBuffer::U32(_) => IndexFormat::Uint32,
        }
    }

    /// Number of indices (three per triangle).
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            IndexBuffer::U16(b) => b.len(),
            IndexBuffer::U32(b) => b.len(),
        }
    }

    /// Whether there is no index.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `i`-th index, widened.
    #[inline]
    pub fn get(&self, i: usize) -> Option<u32> {
        match self {
            IndexBuffer::U16(b) => b.data().get(i).map(|v| *v as u32),
            IndexBuffer::U32(b) => b.data().get(i).copied(),
        }
    }

    /// The indices as raw bytes, ready for upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            IndexBuffer::U16(b) => b.as_bytes(),
            IndexBuffer::U32(b) => b.as_bytes(),
        }
    }

    /// Returns `true` if the indices changed since the last upload.
    #[inline]
    pub fn dirty(&self) -> bool {
        match self {
            IndexBuffer::U16(b) => b.dirty(),
            IndexBuffer::U32(b) => b.dirty(),
        }
    }

    /// Marks the indices as uploaded.
    #[inline]
    pub fn clear_dirty(&mut self) {
        match self {
            IndexBuffer::U16(b) => b.clear_dirty(),
            IndexBuffer::U32(b) => b.clear_dirty(),
        }
    }
}
