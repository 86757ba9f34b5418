//! The signed `BigInteger` type: sign handling, comparison, division,
//! shifts, and in-place increment/decrement.

use std::cmp::Ordering;

use limbint_storage::Limbs;

use crate::error::IntError;
use crate::limb::{add_scalar, cmp_slices, sub_scalar};
use crate::magnitude;

/// Signed arbitrary-precision integer.
///
/// Stored as a sign flag plus a little-endian magnitude of `u32` limbs.
/// Values of up to two limbs never allocate; larger magnitudes are shared
/// between clones until one of them is written.
///
/// Canonical form: no high zero limbs (zero is the single limb `0`), and zero
/// is never negative.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BigInteger {
    negative: bool,
    mag: Limbs,
}

impl BigInteger {
    /// Zero.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            negative: false,
            mag: magnitude::zero(),
        }
    }

    /// One.
    #[must_use]
    pub fn one() -> Self {
        Self {
            negative: false,
            mag: Limbs::from_elem(1, 1),
        }
    }

    /// Build from a sign and a magnitude, canonicalizing both.
    #[must_use]
    pub fn from_parts(negative: bool, mag: Limbs) -> Self {
        let mut value = Self { negative, mag };
        value.normalize();
        value
    }

    /// Split into sign and magnitude.
    #[must_use]
    pub fn into_parts(self) -> (bool, Limbs) {
        (self.negative, self.mag)
    }

    fn normalize(&mut self) {
        if self.mag.is_empty() {
            self.mag.push(0);
        }
        self.mag.trim_high_zeros();
        if self.is_zero() {
            self.negative = false;
        }
    }

    /// Whether the value is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(self.mag.as_slice(), [0])
    }

    /// Whether the value is strictly negative.
    #[inline]
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Whether the value is strictly positive.
    #[inline]
    #[must_use]
    pub fn is_positive(&self) -> bool {
        !self.negative && !self.is_zero()
    }

    /// The magnitude's limbs, least significant first.
    #[inline]
    #[must_use]
    pub fn limbs(&self) -> &[u32] {
        self.mag.as_slice()
    }

    /// The magnitude's storage.
    #[inline]
    #[must_use]
    pub fn magnitude(&self) -> &Limbs {
        &self.mag
    }

    /// Number of magnitude limbs (at least one).
    #[inline]
    #[must_use]
    pub fn limb_count(&self) -> usize {
        self.mag.len()
    }

    /// Read one magnitude limb.
    pub fn limb(&self, index: usize) -> Result<u32, IntError> {
        Ok(self.mag.get(index)?)
    }

    /// Bit length of the magnitude (0 for zero).
    #[must_use]
    pub fn bits(&self) -> u64 {
        magnitude::bits(&self.mag)
    }

    /// Absolute value. Shares the magnitude's storage.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            negative: false,
            mag: self.mag.clone(),
        }
    }

    /// -1, 0 or 1 according to the sign.
    #[must_use]
    pub fn signum(&self) -> Self {
        if self.is_zero() {
            Self::zero()
        } else {
            Self {
                negative: self.negative,
                mag: Limbs::from_elem(1, 1),
            }
        }
    }

    /// Flip the sign in place.
    pub(crate) fn negate_in_place(&mut self) {
        if !self.is_zero() {
            self.negative = !self.negative;
        }
    }

    /// Sum of two signed magnitudes. Unlike signs reduce to a magnitude
    /// subtraction of the smaller from the larger.
    fn add_signed(a_negative: bool, a: &[u32], b_negative: bool, b: &[u32]) -> Self {
        if a_negative == b_negative {
            return Self::from_parts(a_negative, magnitude::add(a, b));
        }
        match cmp_slices(a, b) {
            Ordering::Less => Self::from_parts(b_negative, magnitude::sub(b, a)),
            Ordering::Equal => Self::zero(),
            Ordering::Greater => Self::from_parts(a_negative, magnitude::sub(a, b)),
        }
    }

    pub(crate) fn add_ref(&self, rhs: &Self) -> Self {
        Self::add_signed(self.negative, &self.mag, rhs.negative, &rhs.mag)
    }

    pub(crate) fn sub_ref(&self, rhs: &Self) -> Self {
        Self::add_signed(self.negative, &self.mag, !rhs.negative, &rhs.mag)
    }

    pub(crate) fn mul_ref(&self, rhs: &Self) -> Self {
        Self::from_parts(
            self.negative ^ rhs.negative,
            magnitude::mul(&self.mag, &rhs.mag),
        )
    }

    /// Truncating division with remainder.
    ///
    /// The quotient rounds toward zero and the remainder takes the sign of
    /// `self`, so `self == q * divisor + r` always holds.
    pub fn checked_div_rem(&self, divisor: &Self) -> Result<(Self, Self), IntError> {
        if divisor.is_zero() {
            return Err(IntError::DivideByZero);
        }
        let (quotient, remainder) = magnitude::div_rem(&self.mag, &divisor.mag);
        Ok((
            Self::from_parts(self.negative ^ divisor.negative, quotient),
            Self::from_parts(self.negative, remainder),
        ))
    }

    /// Truncating division.
    pub fn checked_div(&self, divisor: &Self) -> Result<Self, IntError> {
        self.checked_div_rem(divisor).map(|(quotient, _)| quotient)
    }

    /// Truncating remainder, with the sign of `self`.
    pub fn checked_rem(&self, divisor: &Self) -> Result<Self, IntError> {
        self.checked_div_rem(divisor).map(|(_, remainder)| remainder)
    }

    /// `self << count`; negative counts are rejected, as are counts whose
    /// result could not be allocated.
    pub fn checked_shl(&self, count: i64) -> Result<Self, IntError> {
        let mag = magnitude::try_shl(&self.mag, shift_count(count)?).map_err(|err| {
            IntError::InvalidArgument(format!("shift count {count} is too large: {err}"))
        })?;
        Ok(Self::from_parts(self.negative, mag))
    }

    /// `self >> count`, rounding toward negative infinity; negative counts are
    /// rejected.
    pub fn checked_shr(&self, count: i64) -> Result<Self, IntError> {
        Ok(self.shr_bits(shift_count(count)?))
    }

    pub(crate) fn shl_bits(&self, bits: usize) -> Self {
        Self::from_parts(self.negative, magnitude::shl(&self.mag, bits))
    }

    /// Arithmetic right shift. For negative values this is floor division by
    /// 2^bits: the magnitude rounds up whenever a 1-bit falls off.
    pub(crate) fn shr_bits(&self, bits: usize) -> Self {
        let (mut mag, lost) = magnitude::shr(&self.mag, bits);
        if self.negative && lost {
            let carry = add_scalar(mag.as_mut_slice(), 1);
            if carry != 0 {
                mag.push(carry);
            }
        }
        Self::from_parts(self.negative, mag)
    }

    /// Add one in place (`++x`).
    ///
    /// The magnitude is updated through the storage write path, so a value
    /// sharing its buffer with a clone takes a private copy first.
    pub fn increment(&mut self) -> &mut Self {
        if self.negative {
            sub_scalar(self.mag.as_mut_slice(), 1);
            self.normalize();
        } else {
            self.grow_magnitude();
        }
        self
    }

    /// Subtract one in place (`--x`).
    pub fn decrement(&mut self) -> &mut Self {
        if self.negative {
            self.grow_magnitude();
        } else if self.is_zero() {
            self.negative = true;
            self.grow_magnitude();
        } else {
            sub_scalar(self.mag.as_mut_slice(), 1);
            self.normalize();
        }
        self
    }

    /// Add one in place, returning the previous value (`x++`).
    pub fn post_increment(&mut self) -> Self {
        let previous = self.clone();
        self.increment();
        previous
    }

    /// Subtract one in place, returning the previous value (`x--`).
    pub fn post_decrement(&mut self) -> Self {
        let previous = self.clone();
        self.decrement();
        previous
    }

    fn grow_magnitude(&mut self) {
        let carry = add_scalar(self.mag.as_mut_slice(), 1);
        if carry != 0 {
            self.mag.push(carry);
        }
    }
}

fn shift_count(count: i64) -> Result<usize, IntError> {
    usize::try_from(count).map_err(|_| {
        IntError::InvalidArgument(format!("shift count {count} is negative or too large"))
    })
}

impl Default for BigInteger {
    fn default() -> Self {
        Self::zero()
    }
}

impl Ord for BigInteger {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => cmp_slices(&self.mag, &other.mag),
            (true, true) => cmp_slices(&other.mag, &self.mag),
        }
    }
}

impl PartialOrd for BigInteger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
