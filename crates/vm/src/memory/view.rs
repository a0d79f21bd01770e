//! Memory-backed integers.
//!
//! A [`MemInt`] is a `(buffer, offset, width)` descriptor: it grants read/write access to a
//! byte range of a [`ByteBuffer`] without owning it. Views produced by [`MemInt::split`]
//! point into the same buffer as their parent, so a write through any of them is visible
//! through every view covering the same bytes. There is no copy-back step.

use crate::common::error::{Result, VmError};
use crate::common::value::{self, Int};

use super::buffer::ByteBuffer;

/// A fixed-width integer living at `offset` inside a shared buffer.
#[derive(Clone, Debug)]
pub struct MemInt {
    buffer: ByteBuffer,
    offset: usize,
    width: usize,
}

impl MemInt {
    /// Creates a view of `width` bytes at `offset`.
    ///
    /// # Errors
    ///
    /// [`VmError::InvalidWidth`] for an unsupported width, [`VmError::OutOfBounds`] if the
    /// range does not fit in `buffer`.
    pub fn new(buffer: &ByteBuffer, offset: usize, width: usize) -> Result<Self> {
        value::check_width(width)?;
        buffer.check_range(offset, width)?;
        Ok(Self {
            buffer: buffer.clone(),
            offset,
            width,
        })
    }

    /// Allocates a private buffer just large enough for `value` and returns a view over it.
    pub fn detached(value: Int) -> Self {
        let buffer = ByteBuffer::new(value.width());
        let view = Self {
            buffer,
            offset: 0,
            width: value.width(),
        };
        view.store(value);
        view
    }

    /// Byte offset inside the backing buffer.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Width in bytes.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Backing buffer handle.
    pub const fn buffer(&self) -> &ByteBuffer {
        &self.buffer
    }

    /// Materializes the current contents as a value.
    pub fn read(&self) -> Int {
        Int::from_raw(self.buffer.load_le(self.offset, self.width), self.width)
    }

    /// Stores `value` little-endian, overwriting exactly `width` bytes.
    ///
    /// # Errors
    ///
    /// [`VmError::WidthMismatch`] if `value` is not exactly as wide as the view. Nothing is
    /// written in that case.
    pub fn write(&self, value: Int) -> Result<()> {
        if value.width() != self.width {
            return Err(VmError::WidthMismatch {
                expected: self.width,
                actual: value.width(),
            });
        }
        self.store(value);
        Ok(())
    }

    /// Splits the view into consecutive sub-views, lowest offset first.
    ///
    /// # Errors
    ///
    /// [`VmError::InvalidSplit`] unless every size is non-zero and the sizes sum to `width`.
    pub fn split(&self, sizes: &[usize]) -> Result<Vec<Self>> {
        value::check_split(self.width, sizes)?;
        let mut offset = self.offset;
        sizes
            .iter()
            .map(|&size| {
                let part = Self::new(&self.buffer, offset, size);
                offset += size;
                part
            })
            .collect()
    }

    /// Returns `true` if both views share storage and at least one byte.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.buffer.same_storage(&other.buffer)
            && self.offset < other.offset + other.width
            && other.offset < self.offset + self.width
    }

    fn store(&self, value: Int) {
        self.buffer.store_le(self.offset, self.width, value.magnitude());
    }
}
