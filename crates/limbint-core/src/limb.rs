//! Portable limb arithmetic.
//!
//! Every primitive widens to a 64-bit accumulator so carries and borrows
//! fall out of the high half.

use std::cmp::Ordering;

/// Bits per limb.
pub const LIMB_BITS: usize = 32;

/// Add with carry: a + b + carry -> (sum, `new_carry`)
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn add_with_carry(a: u32, b: u32, carry: u32) -> (u32, u32) {
    let sum = u64::from(a) + u64::from(b) + u64::from(carry);
    (sum as u32, (sum >> LIMB_BITS) as u32)
}

/// Subtract with borrow: a - b - borrow -> (diff, `new_borrow`)
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sub_with_borrow(a: u32, b: u32, borrow: u32) -> (u32, u32) {
    let diff = i64::from(a) - i64::from(b) - i64::from(borrow);
    if diff < 0 {
        ((diff + (1i64 << LIMB_BITS)) as u32, 1)
    } else {
        (diff as u32, 0)
    }
}

/// Multiply-accumulate: a * b + acc + carry -> (low, high).
///
/// Cannot overflow: (2^32 - 1)^2 + 2 * (2^32 - 1) = 2^64 - 1.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn mul_add_carry(a: u32, b: u32, acc: u32, carry: u32) -> (u32, u32) {
    let total = u64::from(a) * u64::from(b) + u64::from(acc) + u64::from(carry);
    (total as u32, (total >> LIMB_BITS) as u32)
}

/// Add a scalar into a slice of limbs, returning the carry out of the top.
pub fn add_scalar(data: &mut [u32], scalar: u32) -> u32 {
    let mut carry = scalar;
    for limb in data.iter_mut() {
        let (sum, c) = add_with_carry(*limb, carry, 0);
        *limb = sum;
        carry = c;
        if carry == 0 {
            break;
        }
    }
    carry
}

/// Subtract a scalar from a slice of limbs, returning the borrow out of the top.
pub fn sub_scalar(data: &mut [u32], scalar: u32) -> u32 {
    let mut borrow = scalar;
    for limb in data.iter_mut() {
        let (diff, b) = sub_with_borrow(*limb, borrow, 0);
        *limb = diff;
        borrow = b;
        if borrow == 0 {
            break;
        }
    }
    borrow
}

/// `data -= rhs` in place, where `rhs` is no longer than `data`.
/// Returns the borrow out of the top limb.
pub fn sub_assign_slice(data: &mut [u32], rhs: &[u32]) -> u32 {
    debug_assert!(rhs.len() <= data.len());
    let mut borrow = 0;
    for (limb, &r) in data.iter_mut().zip(rhs) {
        let (diff, b) = sub_with_borrow(*limb, r, borrow);
        *limb = diff;
        borrow = b;
    }
    sub_scalar(&mut data[rhs.len()..], borrow)
}

/// `out = src * scalar`, where `out` has exactly one more limb than `src`.
pub fn mul_scalar_into(out: &mut [u32], src: &[u32], scalar: u32) {
    debug_assert_eq!(out.len(), src.len() + 1);
    let mut carry = 0;
    for (slot, &limb) in out.iter_mut().zip(src) {
        let (low, high) = mul_add_carry(limb, scalar, 0, carry);
        *slot = low;
        carry = high;
    }
    out[src.len()] = carry;
}

/// Compare two canonical magnitudes: length first, then limbs from the top.
///
/// Both slices must be canonical. A high zero limb makes the padded slice
/// compare as larger than its value.
#[must_use]
pub fn cmp_slices(a: &[u32], b: &[u32]) -> Ordering {
    a.len()
        .cmp(&b.len())
        .then_with(|| a.iter().rev().cmp(b.iter().rev()))
}
