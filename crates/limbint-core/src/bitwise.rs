//! Bitwise AND / OR / XOR with two's-complement semantics.
//!
//! Both operands are widened to one limb more than the longer of them, so the
//! top limb is pure sign extension. The operation runs limb by limb on that
//! encoding and on the sign flags, and a negative result is converted back to
//! sign-magnitude.

use limbint_storage::Limbs;

use crate::limb::{add_scalar, sub_scalar};
use crate::BigInteger;

/// A limb-wise boolean operation.
pub trait BitOp {
    /// Apply to one limb of each operand.
    fn limb(a: u32, b: u32) -> u32;
    /// Apply to the operands' sign flags.
    fn sign(a: bool, b: bool) -> bool;
}

/// Bitwise AND.
#[derive(Debug, Clone, Copy)]
pub struct And;

/// Bitwise OR.
#[derive(Debug, Clone, Copy)]
pub struct Or;

/// Bitwise XOR.
#[derive(Debug, Clone, Copy)]
pub struct Xor;

impl BitOp for And {
    #[inline]
    fn limb(a: u32, b: u32) -> u32 {
        a & b
    }
    #[inline]
    fn sign(a: bool, b: bool) -> bool {
        a & b
    }
}

impl BitOp for Or {
    #[inline]
    fn limb(a: u32, b: u32) -> u32 {
        a | b
    }
    #[inline]
    fn sign(a: bool, b: bool) -> bool {
        a | b
    }
}

impl BitOp for Xor {
    #[inline]
    fn limb(a: u32, b: u32) -> u32 {
        a ^ b
    }
    #[inline]
    fn sign(a: bool, b: bool) -> bool {
        a ^ b
    }
}

/// Two's-complement encoding of `value` at exactly `width` limbs.
///
/// Starts from a shared copy of the magnitude; the in-place edits below
/// detach it from `value`.
fn twos_complement(value: &BigInteger, width: usize) -> Limbs {
    let mut limbs = value.magnitude().clone();
    if value.is_negative() {
        sub_scalar(limbs.as_mut_slice(), 1);
        for limb in limbs.as_mut_slice() {
            *limb = !*limb;
        }
        limbs.resize(width, u32::MAX);
    } else {
        limbs.resize(width, 0);
    }
    limbs
}

/// Apply `Op` to `a` and `b` as infinite two's-complement bit strings.
#[must_use]
pub fn bitwise<Op: BitOp>(a: &BigInteger, b: &BigInteger) -> BigInteger {
    // Past the longer magnitude every bit of either operand equals its sign,
    // so one spare limb stands for the whole infinite tail.
    let width = a.limb_count().max(b.limb_count()) + 1;
    let lhs = twos_complement(a, width);
    let rhs = twos_complement(b, width);

    let mut out = Limbs::from_elem(width, 0);
    for ((slot, &x), &y) in out.as_mut_slice().iter_mut().zip(lhs.iter()).zip(rhs.iter()) {
        *slot = Op::limb(x, y);
    }

    let negative = Op::sign(a.is_negative(), b.is_negative());
    if negative {
        // The top limb is all ones here, so adding one cannot carry out.
        let limbs = out.as_mut_slice();
        for limb in limbs.iter_mut() {
            *limb = !*limb;
        }
        add_scalar(limbs, 1);
    }
    BigInteger::from_parts(negative, out)
}

/// `!value`, i.e. `-value - 1`.
#[must_use]
pub fn not(value: &BigInteger) -> BigInteger {
    let mut result = -value;
    result.decrement();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(value: i64) -> BigInteger {
        BigInteger::from(value)
    }

    #[test]
    fn and_or_xor_match_i64() {
        let samples = [0i64, 1, -1, 6, -6, 12345, -12345, i64::from(i32::MAX), i64::from(i32::MIN)];
        for &a in &samples {
            for &b in &samples {
                assert_eq!(bitwise::<And>(&int(a), &int(b)), int(a & b), "{a} & {b}");
                assert_eq!(bitwise::<Or>(&int(a), &int(b)), int(a | b), "{a} | {b}");
                assert_eq!(bitwise::<Xor>(&int(a), &int(b)), int(a ^ b), "{a} ^ {b}");
            }
        }
    }

    #[test]
    fn negative_multi_limb_and() {
        // -(2^32) is ...1111 0000_0000 in two's complement.
        let a: BigInteger = "-4294967296".parse().unwrap();
        let b: BigInteger = "18446744073709551615".parse().unwrap();
        let expected: BigInteger = "18446744069414584320".parse().unwrap();
        assert_eq!(bitwise::<And>(&a, &b), expected);
    }

    #[test]
    fn sign_extends_the_shorter_operand() {
        let big = |text: &str| text.parse::<BigInteger>().unwrap();
        assert_eq!(
            bitwise::<Or>(
                &big("-39614081257132168796771975168"),
                &big("39614081257132168796771975167")
            ),
            int(-1)
        );
        assert_eq!(
            bitwise::<And>(&int(-1), &big("18446744073709551621")),
            big("18446744073709551621")
        );
        assert_eq!(
            bitwise::<Xor>(&big("18446744073709551615"), &big("-18446744073709551616")),
            int(-1)
        );
        assert_eq!(
            bitwise::<And>(&int(-2_147_483_648), &big("-79228162514264337593543950337")),
            big("-79228162514264337595691433984")
        );
    }

    #[test]
    fn operands_are_not_modified() {
        let a: BigInteger = "-340282366920938463463374607431768211456".parse().unwrap();
        let b = a.clone();
        let _ = bitwise::<Xor>(&a, &b);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "-340282366920938463463374607431768211456");
    }

    #[test]
    fn not_is_negate_minus_one() {
        assert_eq!(not(&int(0)), int(-1));
        assert_eq!(not(&int(-1)), int(0));
        assert_eq!(not(&int(41)), int(-42));
        assert_eq!(not(&int(-42)), int(41));
    }
}
