//! Unsigned magnitude algorithms.
//!
//! Inputs are canonical little-endian limb slices (no high zero limbs except
//! the single-limb zero). Outputs are canonical [`Limbs`], built so that short
//! results never leave inline storage.

use std::cmp::Ordering;

use limbint_storage::{Limbs, StorageError};
use tracing::trace;

use crate::limb::{
    add_scalar, add_with_carry, cmp_slices, mul_add_carry, mul_scalar_into, sub_assign_slice,
    sub_scalar, sub_with_borrow, LIMB_BITS,
};

/// The canonical zero magnitude.
#[must_use]
pub fn zero() -> Limbs {
    Limbs::from_elem(1, 0)
}

/// Whether every limb is zero.
#[inline]
#[must_use]
pub fn is_zero(a: &[u32]) -> bool {
    a.iter().all(|&limb| limb == 0)
}

/// Number of significant bits.
#[must_use]
pub fn bits(a: &[u32]) -> u64 {
    match a.iter().rposition(|&limb| limb != 0) {
        Some(top) => (top as u64 + 1) * LIMB_BITS as u64 - u64::from(a[top].leading_zeros()),
        None => 0,
    }
}

/// `a + b`.
#[must_use]
pub fn add(a: &[u32], b: &[u32]) -> Limbs {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut out = Limbs::from_slice(long);
    let limbs = out.as_mut_slice();
    let mut carry = 0;
    for (limb, &s) in limbs.iter_mut().zip(short) {
        let (sum, c) = add_with_carry(*limb, s, carry);
        *limb = sum;
        carry = c;
    }
    let carry = add_scalar(&mut limbs[short.len()..], carry);
    if carry != 0 {
        out.push(carry);
    }
    out
}

/// `a - b`.
///
/// # Panics
///
/// Debug builds panic unless `a >= b`; release builds return a meaningless
/// magnitude instead.
#[must_use]
pub fn sub(a: &[u32], b: &[u32]) -> Limbs {
    debug_assert_ne!(cmp_slices(a, b), Ordering::Less);
    let mut out = Limbs::from_slice(a);
    let limbs = out.as_mut_slice();
    let mut borrow = 0;
    for (limb, &s) in limbs.iter_mut().zip(b) {
        let (diff, bw) = sub_with_borrow(*limb, s, borrow);
        *limb = diff;
        borrow = bw;
    }
    let borrow = sub_scalar(&mut limbs[b.len()..], borrow);
    debug_assert_eq!(borrow, 0);
    out.trim_high_zeros();
    out
}

/// `a * b`, schoolbook.
#[must_use]
pub fn mul(a: &[u32], b: &[u32]) -> Limbs {
    if is_zero(a) || is_zero(b) {
        return zero();
    }
    let mut out = Limbs::from_elem(a.len() + b.len(), 0);
    let acc = out.as_mut_slice();
    for (i, &x) in a.iter().enumerate() {
        if x == 0 {
            continue;
        }
        let mut carry = 0;
        for (j, &y) in b.iter().enumerate() {
            let (low, high) = mul_add_carry(x, y, acc[i + j], carry);
            acc[i + j] = low;
            carry = high;
        }
        // Row i has not touched this slot yet, so the carry lands on zero.
        acc[i + b.len()] = carry;
    }
    out.trim_high_zeros();
    out
}

/// `data = data * factor + addend`, growing `data` when the carry spills.
pub fn mul_small_add(data: &mut Limbs, factor: u32, addend: u32) {
    let mut carry = addend;
    for limb in data.as_mut_slice() {
        let (low, high) = mul_add_carry(*limb, factor, 0, carry);
        *limb = low;
        carry = high;
    }
    if carry != 0 {
        data.push(carry);
    }
}

/// Divide in place by a single limb, returning the remainder.
/// High limbs left at zero are not trimmed.
#[allow(clippy::cast_possible_truncation)]
pub fn div_small_in_place(data: &mut [u32], divisor: u32) -> u32 {
    debug_assert_ne!(divisor, 0);
    let divisor = u64::from(divisor);
    let mut rest = 0u64;
    for limb in data.iter_mut().rev() {
        let cur = (rest << LIMB_BITS) | u64::from(*limb);
        *limb = (cur / divisor) as u32;
        rest = cur % divisor;
    }
    rest as u32
}

/// `(a / d, a % d)` for a single-limb divisor.
#[must_use]
pub fn div_rem_small(a: &[u32], divisor: u32) -> (Limbs, u32) {
    let mut quotient = Limbs::from_slice(a);
    let rest = div_small_in_place(quotient.as_mut_slice(), divisor);
    quotient.trim_high_zeros();
    (quotient, rest)
}

/// `(a / b, a % b)`.
///
/// # Panics
///
/// Panics if `b` is zero. Debug builds check this up front; release builds
/// fail inside the single-limb division.
#[must_use]
pub fn div_rem(a: &[u32], b: &[u32]) -> (Limbs, Limbs) {
    debug_assert!(!is_zero(b));
    if cmp_slices(a, b) == Ordering::Less {
        return (zero(), Limbs::from_slice(a));
    }
    if let [divisor] = b {
        let (quotient, rest) = div_rem_small(a, *divisor);
        return (quotient, Limbs::from_elem(1, rest));
    }
    long_division(a, b)
}

/// Normalized long division (Knuth, Algorithm D) for divisors of two or more
/// limbs, with `a >= b`.
///
/// Each quotient limb is estimated from the top three limbs of the current
/// dividend window and the top two limbs of the divisor. The estimate is never
/// too small and at most one too large; a too-large estimate is caught by
/// comparing the trial product with the window before subtracting.
#[allow(clippy::cast_possible_truncation)]
fn long_division(a: &[u32], b: &[u32]) -> (Limbs, Limbs) {
    let n = b.len();
    trace!(dividend_limbs = a.len(), divisor_limbs = n, "long division");

    // Scale both operands so the divisor's top bit is set.
    let shift = b[n - 1].leading_zeros() as usize;
    let divisor = shl(b, shift);
    let mut dividend = shl(a, shift);
    if dividend.len() == a.len() {
        dividend.push(0);
    }

    let v = divisor.as_slice();
    let v_top = (u128::from(v[n - 1]) << LIMB_BITS) | u128::from(v[n - 2]);
    let m = dividend.len() - n - 1;
    let mut quotient = Limbs::from_elem(m + 1, 0);
    let q = quotient.as_mut_slice();
    let u = dividend.as_mut_slice();
    let mut trial = vec![0u32; n + 1];

    for j in (0..=m).rev() {
        let window = &mut u[j..=j + n];
        let top = (u128::from(window[n]) << (2 * LIMB_BITS))
            | (u128::from(window[n - 1]) << LIMB_BITS)
            | u128::from(window[n - 2]);
        let mut q_hat = (top / v_top).min(u128::from(u32::MAX)) as u32;

        mul_scalar_into(&mut trial, v, q_hat);
        while trial.iter().rev().cmp(window.iter().rev()) == Ordering::Greater {
            q_hat -= 1;
            sub_assign_slice(&mut trial, v);
        }
        let borrow = sub_assign_slice(window, &trial);
        debug_assert_eq!(borrow, 0);
        q[j] = q_hat;
    }

    let (remainder, _) = shr(&u[..n], shift);
    quotient.trim_high_zeros();
    (quotient, remainder)
}

/// `a << bits`.
#[must_use]
pub fn shl(a: &[u32], bits: usize) -> Limbs {
    if is_zero(a) {
        return zero();
    }
    let mut out = shl_within_limb(a, bits % LIMB_BITS);
    out.insert_low(bits / LIMB_BITS);
    out
}

/// `a << bits`, or an error if the result is too long to allocate.
pub fn try_shl(a: &[u32], bits: usize) -> Result<Limbs, StorageError> {
    if is_zero(a) {
        return Ok(zero());
    }
    let mut out = shl_within_limb(a, bits % LIMB_BITS);
    out.try_insert_low(bits / LIMB_BITS)?;
    Ok(out)
}

fn shl_within_limb(a: &[u32], shift: usize) -> Limbs {
    let mut out = Limbs::from_slice(a);
    if shift != 0 {
        let mut carry = 0;
        for limb in out.as_mut_slice() {
            let next = *limb >> (LIMB_BITS - shift);
            *limb = (*limb << shift) | carry;
            carry = next;
        }
        if carry != 0 {
            out.push(carry);
        }
    }
    out
}

/// `a >> bits`, plus whether any 1-bit was shifted out.
#[must_use]
pub fn shr(a: &[u32], bits: usize) -> (Limbs, bool) {
    let blocks = bits / LIMB_BITS;
    let shift = bits % LIMB_BITS;
    if blocks >= a.len() {
        return (zero(), !is_zero(a));
    }
    let mut lost = !is_zero(&a[..blocks]);
    let mut out = Limbs::from_slice(a);
    out.erase_low(blocks);
    if shift != 0 {
        let limbs = out.as_mut_slice();
        lost |= limbs[0] & ((1 << shift) - 1) != 0;
        let mut carry = 0;
        for limb in limbs.iter_mut().rev() {
            let next = *limb << (LIMB_BITS - shift);
            *limb = (*limb >> shift) | carry;
            carry = next;
        }
    }
    out.trim_high_zeros();
    (out, lost)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limbs(values: &[u32]) -> Vec<u32> {
        values.to_vec()
    }

    #[test]
    fn add_carries_into_new_limb() {
        let sum = add(&[u32::MAX, u32::MAX], &[1]);
        assert_eq!(sum.as_slice(), &[0, 0, 1]);
        assert!(!sum.is_inline());
    }

    #[test]
    fn add_small_stays_inline() {
        let sum = add(&[1, 2], &[3]);
        assert_eq!(sum.as_slice(), &[4, 2]);
        assert!(sum.is_inline());
    }

    #[test]
    fn sub_borrows_and_trims() {
        let diff = sub(&[0, 0, 1], &[1]);
        assert_eq!(diff.as_slice(), &[u32::MAX, u32::MAX]);
        assert!(diff.is_inline());
        assert_eq!(sub(&[7, 7], &[7, 7]).as_slice(), &[0]);
    }

    #[test]
    fn mul_cross_limb() {
        // (2^32 - 1)^2 = 2^64 - 2^33 + 1
        let prod = mul(&[u32::MAX], &[u32::MAX]);
        assert_eq!(prod.as_slice(), &[1, u32::MAX - 1]);
        assert_eq!(mul(&[0], &[5, 6, 7]).as_slice(), &[0]);
    }

    #[test]
    fn mul_multi_limb() {
        // (2^64 - 1) * (2^64 - 1) = 2^128 - 2^65 + 1
        let prod = mul(&[u32::MAX, u32::MAX], &[u32::MAX, u32::MAX]);
        assert_eq!(prod.as_slice(), &[1, 0, u32::MAX - 1, u32::MAX]);
    }

    #[test]
    fn mul_small_add_grows() {
        let mut data = Limbs::from_slice(&[u32::MAX]);
        mul_small_add(&mut data, 10, 5);
        // (2^32 - 1) * 10 + 5 = 9 * 2^32 + (2^32 - 5)
        assert_eq!(data.as_slice(), &[u32::MAX - 4, 9]);
    }

    #[test]
    fn div_small_remainder() {
        let (q, r) = div_rem_small(&[7], 2);
        assert_eq!(q.as_slice(), &[3]);
        assert_eq!(r, 1);

        let (q, r) = div_rem_small(&[0, 0, 1], 10);
        // 2^64 = 1844674407370955161 * 10 + 6
        assert_eq!(r, 6);
        assert_eq!(q.as_slice(), &[0x9999_9999, 0x1999_9999]);
    }

    #[test]
    fn div_rem_smaller_dividend() {
        let (q, r) = div_rem(&[5], &[0, 1]);
        assert_eq!(q.as_slice(), &[0]);
        assert_eq!(r.as_slice(), &[5]);
    }

    #[test]
    fn long_division_exact() {
        let a = limbs(&[1, 0, u32::MAX - 1, u32::MAX]);
        let b = limbs(&[u32::MAX, u32::MAX]);
        let (q, r) = div_rem(&a, &b);
        assert_eq!(q.as_slice(), &[u32::MAX, u32::MAX]);
        assert_eq!(r.as_slice(), &[0]);
    }

    #[test]
    fn long_division_with_remainder() {
        // (2^96 + 5) / (2^32 + 1): q = 2^64 - 2^32 + 1, r = 4
        let (q, r) = div_rem(&[5, 0, 0, 1], &[1, 1]);
        assert_eq!(q.as_slice(), &[1, u32::MAX]);
        assert_eq!(r.as_slice(), &[4]);
    }

    #[test]
    fn long_division_needs_correction() {
        // Divisor with a small top limb forces a large normalization shift.
        let a = [0, 0, 0, 0x8000_0000];
        let b = [u32::MAX, 1];
        let (q, r) = div_rem(&a, &b);
        let back = add(&mul(q.as_slice(), &b), r.as_slice());
        assert_eq!(back.as_slice(), &a);
        assert_eq!(cmp_slices(r.as_slice(), &b), Ordering::Less);
    }

    #[test]
    fn try_shl_rejects_unallocatable_results() {
        assert_eq!(try_shl(&[3], 65).unwrap().as_slice(), &[0, 0, 6]);
        assert_eq!(try_shl(&[0], usize::MAX).unwrap().as_slice(), &[0]);
        assert!(matches!(
            try_shl(&[1], usize::MAX),
            Err(StorageError::CapacityOverflow { .. })
        ));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn sub_requires_larger_minuend() {
        let _ = sub(&[1], &[2]);
    }

    #[test]
    #[should_panic]
    fn div_rem_requires_nonzero_divisor() {
        let _ = div_rem(&[7], &[0]);
    }

    #[test]
    fn cmp_slices_orders_by_length_first() {
        assert_eq!(cmp_slices(&[0, 1], &[u32::MAX]), Ordering::Greater);
        assert_eq!(cmp_slices(&[5, 1], &[4, 1]), Ordering::Greater);
        assert_eq!(cmp_slices(&[4, 1], &[4, 1]), Ordering::Equal);
    }

    #[test]
    fn shl_across_limbs() {
        assert_eq!(shl(&[1], 64).as_slice(), &[0, 0, 1]);
        assert_eq!(shl(&[0x8000_0000], 1).as_slice(), &[0, 1]);
        assert_eq!(shl(&[0], 100).as_slice(), &[0]);
    }

    #[test]
    fn shr_reports_lost_bits() {
        let (out, lost) = shr(&[0, 0, 1], 64);
        assert_eq!(out.as_slice(), &[1]);
        assert!(!lost);

        let (out, lost) = shr(&[3], 1);
        assert_eq!(out.as_slice(), &[1]);
        assert!(lost);

        let (out, lost) = shr(&[1, 1], 200);
        assert_eq!(out.as_slice(), &[0]);
        assert!(lost);
    }

    #[test]
    fn bits_counts_significant() {
        assert_eq!(bits(&[0]), 0);
        assert_eq!(bits(&[1]), 1);
        assert_eq!(bits(&[0, 1]), 33);
        assert_eq!(bits(&[u32::MAX, u32::MAX]), 64);
    }
}
