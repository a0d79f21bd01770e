//! # Fixed-Width Integer Tests
//!
//! This module verifies the `Int` value type: construction reduces modulo
//! `256^width`, splitting reinterprets raw little-endian bytes, sign-extension
//! preserves the signed value and arithmetic wraps silently.

use bytevm_core::common::value::MAX_WIDTH;
use bytevm_core::{Int, VmError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

// ──────────────────────────────────────────────────────────
// Construction
// ──────────────────────────────────────────────────────────

#[rstest]
#[case(256, 1, 0)]
#[case(257, 1, 1)]
#[case(-1, 1, 0xFF)]
#[case(-1, 2, 0xFFFF)]
#[case(65_541, 2, 5)]
#[case(-32_768, 2, 0x8000)]
#[case(-1, 8, u64::MAX)]
fn construction_reduces_modulo_width(
    #[case] value: i128,
    #[case] width: usize,
    #[case] magnitude: u64,
) {
    let v = Int::new(value, width).unwrap();
    assert_eq!(v.magnitude(), magnitude);
    assert_eq!(v.width(), width);
}

#[test]
fn construction_rejects_unsupported_widths() {
    assert!(matches!(Int::new(1, 0), Err(VmError::InvalidWidth(0))));
    assert!(matches!(
        Int::new(1, MAX_WIDTH + 1),
        Err(VmError::InvalidWidth(9))
    ));
}

#[rstest]
#[case(Int::byte(0x7F), 127)]
#[case(Int::byte(0x80), -128)]
#[case(Int::byte(0xFF), -1)]
#[case(Int::word(0x7FFF), 32_767)]
#[case(Int::word(0x8000), -32_768)]
#[case(Int::word(0xFFFF), -1)]
#[case(Int::dword(0xFFFF_FFFE), -2)]
fn signed_interpretation(#[case] v: Int, #[case] expected: i64) {
    assert_eq!(v.signed(), expected);
}

#[test]
fn little_endian_bytes() {
    assert_eq!(Int::word(0x1234).to_le_bytes(), vec![0x34, 0x12]);
    assert_eq!(Int::from_le_bytes(&[0x34, 0x12]).unwrap(), Int::word(0x1234));
    assert_eq!(
        Int::from_le_bytes(&[0x01, 0x02, 0x03]).unwrap(),
        Int::new(0x0003_0201, 3).unwrap()
    );
    assert!(Int::from_le_bytes(&[]).is_err());
}

#[test]
fn display_is_signed_decimal() {
    assert_eq!(Int::byte(0xFF).to_string(), "-1");
    assert_eq!(Int::word(10).to_string(), "10");
    assert_eq!(format!("{:#x}", Int::word(0xFF)), "0x00ff");
}

// ──────────────────────────────────────────────────────────
// Split
// ──────────────────────────────────────────────────────────

#[test]
fn split_word_into_bytes_low_first() {
    assert_eq!(
        Int::word(0x1234).split(&[1, 1]).unwrap(),
        vec![Int::byte(0x34), Int::byte(0x12)]
    );
}

#[test]
fn split_dword_into_words() {
    assert_eq!(
        Int::dword(0xAABB_CCDD).split(&[2, 2]).unwrap(),
        vec![Int::word(0xCCDD), Int::word(0xAABB)]
    );
}

#[test]
fn split_uneven_groups() {
    assert_eq!(
        Int::dword(0x1122_3344).split(&[1, 3]).unwrap(),
        vec![Int::byte(0x44), Int::new(0x11_2233, 3).unwrap()]
    );
}

#[test]
fn split_is_raw_bytes_not_signed_value() {
    // 0xFF80 is -128; its halves are 0x80 (-128) and 0xFF (-1), not a sign-extended pair.
    assert_eq!(
        Int::word(0xFF80).split(&[1, 1]).unwrap(),
        vec![Int::byte(0x80), Int::byte(0xFF)]
    );
}

#[rstest]
#[case(&[1])]
#[case(&[1, 1, 1])]
#[case(&[2, 0])]
#[case(&[])]
fn split_sizes_must_sum_to_width(#[case] sizes: &[usize]) {
    let err = Int::word(1).split(sizes).unwrap_err();
    assert!(matches!(err, VmError::InvalidSplit { width: 2, .. }));
}

// ──────────────────────────────────────────────────────────
// Sign extension
// ──────────────────────────────────────────────────────────

#[rstest]
#[case(Int::byte(0x7F), 2, Int::word(0x007F))]
#[case(Int::byte(0xFF), 2, Int::word(0xFFFF))]
#[case(Int::byte(0x80), 2, Int::word(0xFF80))]
#[case(Int::word(0x8000), 4, Int::dword(0xFFFF_8000))]
#[case(Int::word(0x1234), 4, Int::dword(0x0000_1234))]
#[case(Int::word(0xBEEF), 2, Int::word(0xBEEF))]
fn sign_extend_preserves_signed_value(#[case] v: Int, #[case] width: usize, #[case] expected: Int) {
    assert_eq!(v.sign_extend(width).unwrap(), expected);
}

#[test]
fn sign_extend_cannot_narrow() {
    let err = Int::word(1).sign_extend(1).unwrap_err();
    assert!(matches!(err, VmError::InvalidExtension { from: 2, to: 1 }));
}

// ──────────────────────────────────────────────────────────
// Arithmetic
// ──────────────────────────────────────────────────────────

#[test]
fn add_wraps_around() {
    assert_eq!(
        Int::byte(255).wrapping_add(Int::byte(2)).unwrap(),
        Int::byte(1)
    );
    assert_eq!(
        Int::word(0xFFFF).wrapping_add(Int::word(1)).unwrap(),
        Int::word(0)
    );
}

#[test]
fn sub_wraps_around() {
    assert_eq!(
        Int::byte(0).wrapping_sub(Int::byte(1)).unwrap(),
        Int::byte(0xFF)
    );
    assert_eq!(
        Int::word(0x8000).wrapping_sub(Int::word(1)).unwrap(),
        Int::word(0x7FFF)
    );
}

#[test]
fn arithmetic_requires_equal_widths() {
    let err = Int::byte(1).wrapping_add(Int::word(1)).unwrap_err();
    assert!(matches!(
        err,
        VmError::WidthMismatch {
            expected: 1,
            actual: 2
        }
    ));
    assert!(Int::word(1).wrapping_sub(Int::byte(1)).is_err());
}

// ──────────────────────────────────────────────────────────
// Properties
// ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn prop_construction_is_idempotent_under_reduction(x in any::<i64>(), w in 1usize..=MAX_WIDTH) {
        let modulus = 1i128 << (8 * w);
        let direct = Int::new(i128::from(x), w).unwrap();
        let reduced = Int::new(i128::from(x).rem_euclid(modulus), w).unwrap();
        prop_assert_eq!(direct.signed(), reduced.signed());
        prop_assert_eq!(direct, reduced);
    }

    #[test]
    fn prop_magnitude_stays_below_modulus(x in any::<i64>(), w in 1usize..MAX_WIDTH) {
        let v = Int::new(i128::from(x), w).unwrap();
        prop_assert!(u128::from(v.magnitude()) < 1u128 << (8 * w));
    }

    #[test]
    fn prop_sign_extend_preserves_signed(x in any::<i64>(), w in 1usize..=MAX_WIDTH, extra in 0usize..MAX_WIDTH) {
        let v = Int::new(i128::from(x), w).unwrap();
        let target = (w + extra).min(MAX_WIDTH);
        prop_assert_eq!(v.sign_extend(target).unwrap().signed(), v.signed());
    }

    #[test]
    fn prop_split_then_concatenate_is_identity(x in any::<u32>()) {
        let v = Int::dword(x);
        let bytes: Vec<u8> = v
            .split(&[1, 2, 1])
            .unwrap()
            .iter()
            .flat_map(Int::to_le_bytes)
            .collect();
        prop_assert_eq!(bytes, v.to_le_bytes());
    }

    #[test]
    fn prop_add_matches_modular_arithmetic(a in any::<u16>(), b in any::<u16>()) {
        let sum = Int::word(a).wrapping_add(Int::word(b)).unwrap();
        prop_assert_eq!(sum.magnitude(), (u64::from(a) + u64::from(b)) % 0x1_0000);
        let diff = Int::word(a).wrapping_sub(Int::word(b)).unwrap();
        prop_assert_eq!(diff.wrapping_add(Int::word(b)).unwrap(), Int::word(a));
    }
}
