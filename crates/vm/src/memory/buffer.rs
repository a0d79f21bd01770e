//! Shared Byte Buffer.
//!
//! This module provides the backing storage for variables and registers. It provides:
//! 1. **Shared ownership:** Cloning a `ByteBuffer` yields another handle to the same bytes.
//! 2. **Interior mutability:** Writes go through `&self`, so any number of views may hold a
//!    handle and observe each other's writes immediately.
//! 3. **Bounds checking:** Every slice access is validated against the buffer length.
//!
//! Buffers are single-threaded (`!Send`); each machine allocates its own.

use std::cell::Cell;
use std::rc::Rc;

use crate::common::error::{Result, VmError};

/// A fixed-size, shared, mutable byte array.
#[derive(Clone, Debug)]
pub struct ByteBuffer {
    bytes: Rc<[Cell<u8>]>,
}

impl ByteBuffer {
    /// Allocates a zero-filled buffer of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: (0..size).map(|_| Cell::new(0)).collect(),
        }
    }

    /// Returns the size of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` for a zero-sized buffer.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns `true` if both handles refer to the same storage.
    pub fn same_storage(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.bytes, &other.bytes)
    }

    /// Validates that `[offset, offset + width)` lies inside the buffer.
    pub fn check_range(&self, offset: usize, width: usize) -> Result<()> {
        match offset.checked_add(width) {
            Some(end) if end <= self.len() => Ok(()),
            _ => Err(VmError::OutOfBounds {
                offset,
                width,
                len: self.len(),
            }),
        }
    }

    /// Reads a slice of memory.
    pub fn read_slice(&self, offset: usize, len: usize) -> Result<Vec<u8>> {
        self.check_range(offset, len)?;
        Ok(self.bytes[offset..offset + len].iter().map(Cell::get).collect())
    }

    /// Writes a slice of memory.
    pub fn write_slice(&self, offset: usize, data: &[u8]) -> Result<()> {
        self.check_range(offset, data.len())?;
        for (cell, &b) in self.bytes[offset..offset + data.len()].iter().zip(data) {
            cell.set(b);
        }
        Ok(())
    }

    /// Copies the whole buffer out.
    pub fn snapshot(&self) -> Vec<u8> {
        self.bytes.iter().map(Cell::get).collect()
    }

    /// Little-endian load of `width` bytes; the range must already be validated.
    pub(crate) fn load_le(&self, offset: usize, width: usize) -> u64 {
        self.bytes[offset..offset + width]
            .iter()
            .rev()
            .fold(0u64, |acc, b| (acc << 8) | u64::from(b.get()))
    }

    /// Little-endian store of the low `width` bytes of `raw`; the range must already be
    /// validated.
    pub(crate) fn store_le(&self, offset: usize, width: usize, raw: u64) {
        for (i, cell) in self.bytes[offset..offset + width].iter().enumerate() {
            cell.set((raw >> (8 * i)) as u8);
        }
    }
}
