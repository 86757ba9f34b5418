//! `num-traits` / `num-integer` implementations, so `BigInteger` plugs into
//! code that is generic over integer types.

use num_integer::Integer;
use num_traits::{Num, One, Signed, Zero};

use crate::error::IntError;
use crate::BigInteger;

impl Zero for BigInteger {
    fn zero() -> Self {
        BigInteger::zero()
    }

    fn is_zero(&self) -> bool {
        BigInteger::is_zero(self)
    }
}

impl One for BigInteger {
    fn one() -> Self {
        BigInteger::one()
    }

    fn is_one(&self) -> bool {
        !self.is_negative() && self.limbs() == [1]
    }
}

impl Num for BigInteger {
    type FromStrRadixErr = IntError;

    /// Only radix 10 is supported.
    fn from_str_radix(text: &str, radix: u32) -> Result<Self, IntError> {
        if radix != 10 {
            return Err(IntError::InvalidArgument(format!(
                "unsupported radix {radix}, only base 10 is implemented"
            )));
        }
        Self::parse_decimal(text)
    }
}

impl Signed for BigInteger {
    fn abs(&self) -> Self {
        BigInteger::abs(self)
    }

    fn abs_sub(&self, other: &Self) -> Self {
        if self <= other {
            Self::zero()
        } else {
            self - other
        }
    }

    fn signum(&self) -> Self {
        BigInteger::signum(self)
    }

    fn is_positive(&self) -> bool {
        BigInteger::is_positive(self)
    }

    fn is_negative(&self) -> bool {
        BigInteger::is_negative(self)
    }
}

impl Integer for BigInteger {
    /// Truncating division with remainder; panics on a zero divisor.
    fn div_rem(&self, other: &Self) -> (Self, Self) {
        match self.checked_div_rem(other) {
            Ok(pair) => pair,
            Err(err) => panic!("{err}"),
        }
    }

    fn div_floor(&self, other: &Self) -> Self {
        let (mut quotient, remainder) = Integer::div_rem(self, other);
        if !remainder.is_zero() && remainder.is_negative() != other.is_negative() {
            quotient.decrement();
        }
        quotient
    }

    fn mod_floor(&self, other: &Self) -> Self {
        let (_, remainder) = Integer::div_rem(self, other);
        if !remainder.is_zero() && remainder.is_negative() != other.is_negative() {
            remainder + other
        } else {
            remainder
        }
    }

    /// Greatest common divisor; always non-negative, and `gcd(0, 0) == 0`.
    fn gcd(&self, other: &Self) -> Self {
        let mut a = BigInteger::abs(self);
        let mut b = BigInteger::abs(other);
        while !b.is_zero() {
            let remainder = &a % &b;
            a = b;
            b = remainder;
        }
        a
    }

    /// Least common multiple; always non-negative.
    fn lcm(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let gcd = self.gcd(other);
        BigInteger::abs(&(self / &gcd * other))
    }

    fn is_multiple_of(&self, other: &Self) -> bool {
        if other.is_zero() {
            return self.is_zero();
        }
        (self % other).is_zero()
    }

    fn is_even(&self) -> bool {
        self.limbs()[0] & 1 == 0
    }

    fn is_odd(&self) -> bool {
        !self.is_even()
    }
}
