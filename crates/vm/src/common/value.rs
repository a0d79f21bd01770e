//! Fixed-width two's-complement integers.
//!
//! `Int` is a plain value: a magnitude already reduced modulo `256^width` and a width in
//! bytes. It knows nothing about storage. Two reinterpretations are provided and must not be
//! confused:
//! 1. **Splitting** reasons about the raw little-endian byte layout.
//! 2. **Sign-extension** reasons about the signed value.

use std::fmt;

use super::error::{Result, VmError};

/// Widest supported integer, in bytes.
pub const MAX_WIDTH: usize = 8;

/// Returns the mask selecting the low `width` bytes.
#[inline]
const fn mask(width: usize) -> u64 {
    if width >= MAX_WIDTH {
        u64::MAX
    } else {
        (1u64 << (8 * width)) - 1
    }
}

/// Rejects widths outside `1..=MAX_WIDTH`.
pub(crate) fn check_width(width: usize) -> Result<()> {
    if width == 0 || width > MAX_WIDTH {
        return Err(VmError::InvalidWidth(width));
    }
    Ok(())
}

/// An N-byte two's-complement integer.
///
/// Invariant: `magnitude < 256^width`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Int {
    magnitude: u64,
    width: usize,
}

impl Int {
    /// Creates a `width`-byte integer, reducing `value` modulo `256^width`.
    ///
    /// Negative inputs wrap to their two's-complement encoding, so `Int::new(-1, 2)` has
    /// magnitude `0xFFFF`.
    ///
    /// # Errors
    ///
    /// [`VmError::InvalidWidth`] if `width` is zero or above [`MAX_WIDTH`].
    pub fn new(value: i128, width: usize) -> Result<Self> {
        check_width(width)?;
        Ok(Self {
            magnitude: (value as u64) & mask(width),
            width,
        })
    }

    /// Builds an integer from a magnitude that the caller read out of `width` bytes.
    pub(crate) const fn from_raw(magnitude: u64, width: usize) -> Self {
        Self {
            magnitude: magnitude & mask(width),
            width,
        }
    }

    /// One-byte integer.
    pub const fn byte(value: u8) -> Self {
        Self {
            magnitude: value as u64,
            width: 1,
        }
    }

    /// Two-byte integer.
    pub const fn word(value: u16) -> Self {
        Self {
            magnitude: value as u64,
            width: 2,
        }
    }

    /// Four-byte integer.
    pub const fn dword(value: u32) -> Self {
        Self {
            magnitude: value as u64,
            width: 4,
        }
    }

    /// Interprets `bytes` as a little-endian integer as wide as the slice.
    ///
    /// # Errors
    ///
    /// [`VmError::InvalidWidth`] for an empty slice or one longer than [`MAX_WIDTH`].
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self> {
        check_width(bytes.len())?;
        let magnitude = bytes
            .iter()
            .rev()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
        Ok(Self {
            magnitude,
            width: bytes.len(),
        })
    }

    /// Unsigned magnitude, always below `256^width`.
    pub const fn magnitude(&self) -> u64 {
        self.magnitude
    }

    /// Width in bytes.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Two's-complement reading of the low `8 * width` bits.
    pub const fn signed(&self) -> i64 {
        let shift = 64 - 8 * self.width as u32;
        ((self.magnitude << shift) as i64) >> shift
    }

    /// Little-endian encoding, exactly `width` bytes long.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.magnitude.to_le_bytes()[..self.width].to_vec()
    }

    /// Splits the value into consecutive little-endian byte groups, least-significant first.
    ///
    /// `Int::word(0x1234).split(&[1, 1])` yields `[0x34, 0x12]`.
    ///
    /// # Errors
    ///
    /// [`VmError::InvalidSplit`] unless every size is non-zero and the sizes sum to `width`.
    pub fn split(&self, sizes: &[usize]) -> Result<Vec<Self>> {
        check_split(self.width, sizes)?;
        let mut offset = 0;
        Ok(sizes
            .iter()
            .map(|&size| {
                let part = Self {
                    magnitude: (self.magnitude >> (8 * offset)) & mask(size),
                    width: size,
                };
                offset += size;
                part
            })
            .collect())
    }

    /// Reinterprets the signed value at a wider (or equal) width.
    ///
    /// # Errors
    ///
    /// [`VmError::InvalidExtension`] when `new_width < width`, [`VmError::InvalidWidth`] when
    /// `new_width` exceeds [`MAX_WIDTH`].
    pub fn sign_extend(&self, new_width: usize) -> Result<Self> {
        if new_width < self.width {
            return Err(VmError::InvalidExtension {
                from: self.width,
                to: new_width,
            });
        }
        Self::new(i128::from(self.signed()), new_width)
    }

    /// Modular addition; both operands must share a width.
    ///
    /// # Errors
    ///
    /// [`VmError::WidthMismatch`] when the widths differ.
    pub fn wrapping_add(self, rhs: Self) -> Result<Self> {
        self.check_same_width(rhs)?;
        Ok(Self {
            magnitude: self.magnitude.wrapping_add(rhs.magnitude) & mask(self.width),
            width: self.width,
        })
    }

    /// Modular subtraction; both operands must share a width.
    ///
    /// # Errors
    ///
    /// [`VmError::WidthMismatch`] when the widths differ.
    pub fn wrapping_sub(self, rhs: Self) -> Result<Self> {
        self.check_same_width(rhs)?;
        Ok(Self {
            magnitude: self.magnitude.wrapping_sub(rhs.magnitude) & mask(self.width),
            width: self.width,
        })
    }

    fn check_same_width(self, rhs: Self) -> Result<()> {
        if self.width != rhs.width {
            return Err(VmError::WidthMismatch {
                expected: self.width,
                actual: rhs.width,
            });
        }
        Ok(())
    }
}

/// Validates a split request against `width`. Shared with memory views.
pub(crate) fn check_split(width: usize, sizes: &[usize]) -> Result<()> {
    if sizes.contains(&0) || sizes.iter().sum::<usize>() != width {
        return Err(VmError::InvalidSplit {
            width,
            sizes: sizes.to_vec(),
        });
    }
    Ok(())
}

impl fmt::Display for Int {
    /// Formats the signed value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signed())
    }
}

impl fmt::LowerHex for Int {
    /// Formats the magnitude zero-padded to `2 * width` digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "0x")?;
        }
        write!(f, "{:0w$x}", self.magnitude, w = self.width * 2)
    }
}
