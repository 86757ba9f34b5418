//! `std::ops` operator implementations.
//!
//! Binary operators are defined once on references and forwarded for every
//! owned/borrowed combination. Compound assignment computes the binary result
//! and moves it into `self`.
//!
//! `/` and `%` panic on a zero divisor, like the primitive integers; use
//! [`BigInteger::checked_div`] / [`BigInteger::checked_rem`] to get the error
//! as a value.

use std::iter::{Product, Sum};
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};

use crate::bitwise::{self, And, Or, Xor};
use crate::BigInteger;

fn add(a: &BigInteger, b: &BigInteger) -> BigInteger {
    a.add_ref(b)
}

fn sub(a: &BigInteger, b: &BigInteger) -> BigInteger {
    a.sub_ref(b)
}

fn mul(a: &BigInteger, b: &BigInteger) -> BigInteger {
    a.mul_ref(b)
}

fn div(a: &BigInteger, b: &BigInteger) -> BigInteger {
    match a.checked_div(b) {
        Ok(quotient) => quotient,
        Err(err) => panic!("{err}"),
    }
}

fn rem(a: &BigInteger, b: &BigInteger) -> BigInteger {
    match a.checked_rem(b) {
        Ok(remainder) => remainder,
        Err(err) => panic!("{err}"),
    }
}

fn bit_and(a: &BigInteger, b: &BigInteger) -> BigInteger {
    bitwise::bitwise::<And>(a, b)
}

fn bit_or(a: &BigInteger, b: &BigInteger) -> BigInteger {
    bitwise::bitwise::<Or>(a, b)
}

fn bit_xor(a: &BigInteger, b: &BigInteger) -> BigInteger {
    bitwise::bitwise::<Xor>(a, b)
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident, $assign_imp:ident, $assign_method:ident, $op:ident) => {
        impl $imp<&BigInteger> for &BigInteger {
            type Output = BigInteger;

            #[inline]
            fn $method(self, rhs: &BigInteger) -> BigInteger {
                $op(self, rhs)
            }
        }

        impl $imp<BigInteger> for &BigInteger {
            type Output = BigInteger;

            #[inline]
            fn $method(self, rhs: BigInteger) -> BigInteger {
                $op(self, &rhs)
            }
        }

        impl $imp<&BigInteger> for BigInteger {
            type Output = BigInteger;

            #[inline]
            fn $method(self, rhs: &BigInteger) -> BigInteger {
                $op(&self, rhs)
            }
        }

        impl $imp<BigInteger> for BigInteger {
            type Output = BigInteger;

            #[inline]
            fn $method(self, rhs: BigInteger) -> BigInteger {
                $op(&self, &rhs)
            }
        }

        impl $assign_imp<&BigInteger> for BigInteger {
            #[inline]
            fn $assign_method(&mut self, rhs: &BigInteger) {
                *self = $op(self, rhs);
            }
        }

        impl $assign_imp<BigInteger> for BigInteger {
            #[inline]
            fn $assign_method(&mut self, rhs: BigInteger) {
                *self = $op(self, &rhs);
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign, add);
forward_binop!(Sub, sub, SubAssign, sub_assign, sub);
forward_binop!(Mul, mul, MulAssign, mul_assign, mul);
forward_binop!(Div, div, DivAssign, div_assign, div);
forward_binop!(Rem, rem, RemAssign, rem_assign, rem);
forward_binop!(BitAnd, bitand, BitAndAssign, bitand_assign, bit_and);
forward_binop!(BitOr, bitor, BitOrAssign, bitor_assign, bit_or);
forward_binop!(BitXor, bitxor, BitXorAssign, bitxor_assign, bit_xor);

impl Shl<usize> for &BigInteger {
    type Output = BigInteger;

    fn shl(self, bits: usize) -> BigInteger {
        self.shl_bits(bits)
    }
}

impl Shl<usize> for BigInteger {
    type Output = BigInteger;

    fn shl(self, bits: usize) -> BigInteger {
        self.shl_bits(bits)
    }
}

impl ShlAssign<usize> for BigInteger {
    fn shl_assign(&mut self, bits: usize) {
        *self = self.shl_bits(bits);
    }
}

impl Shr<usize> for &BigInteger {
    type Output = BigInteger;

    fn shr(self, bits: usize) -> BigInteger {
        self.shr_bits(bits)
    }
}

impl Shr<usize> for BigInteger {
    type Output = BigInteger;

    fn shr(self, bits: usize) -> BigInteger {
        self.shr_bits(bits)
    }
}

impl ShrAssign<usize> for BigInteger {
    fn shr_assign(&mut self, bits: usize) {
        *self = self.shr_bits(bits);
    }
}

impl Neg for BigInteger {
    type Output = BigInteger;

    fn neg(mut self) -> BigInteger {
        self.negate_in_place();
        self
    }
}

impl Neg for &BigInteger {
    type Output = BigInteger;

    fn neg(self) -> BigInteger {
        -self.clone()
    }
}

impl Not for BigInteger {
    type Output = BigInteger;

    fn not(self) -> BigInteger {
        bitwise::not(&self)
    }
}

impl Not for &BigInteger {
    type Output = BigInteger;

    fn not(self) -> BigInteger {
        bitwise::not(self)
    }
}

impl Sum for BigInteger {
    fn sum<I: Iterator<Item = BigInteger>>(iter: I) -> Self {
        iter.fold(BigInteger::zero(), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a BigInteger> for BigInteger {
    fn sum<I: Iterator<Item = &'a BigInteger>>(iter: I) -> Self {
        iter.fold(BigInteger::zero(), |acc, x| acc + x)
    }
}

impl Product for BigInteger {
    fn product<I: Iterator<Item = BigInteger>>(iter: I) -> Self {
        iter.fold(BigInteger::one(), |acc, x| acc * x)
    }
}

impl<'a> Product<&'a BigInteger> for BigInteger {
    fn product<I: Iterator<Item = &'a BigInteger>>(iter: I) -> Self {
        iter.fold(BigInteger::one(), |acc, x| acc * x)
    }
}
