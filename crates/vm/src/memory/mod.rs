//! Byte storage and the integer views layered over it.
//!
//! 1. **Buffer:** A shared, interior-mutable byte array owned by one machine.
//! 2. **View:** `MemInt`, a `(buffer, offset, width)` window reading and writing [`Int`](crate::common::Int)s.

/// Shared byte buffer.
pub mod buffer;

/// Integer views into a buffer.
pub mod view;

pub use buffer::ByteBuffer;
pub use view::MemInt;
