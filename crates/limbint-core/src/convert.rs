//! Conversions: primitive integers, decimal text, and `num-traits` primitive
//! conversions.

use std::fmt;
use std::str::FromStr;

use limbint_storage::Limbs;
use num_traits::{FromPrimitive, ToPrimitive};

use crate::error::IntError;
use crate::magnitude;
use crate::BigInteger;

/// Decimal digits produced or consumed per single-limb division/multiply.
const DECIMAL_CHUNK_DIGITS: usize = 9;

/// 10^0 ..= 10^9.
const POW10: [u32; DECIMAL_CHUNK_DIGITS + 1] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

#[allow(clippy::cast_possible_truncation)]
fn limbs_from_u128(value: u128) -> Limbs {
    let mut limbs = Limbs::new();
    let mut rest = value;
    loop {
        limbs.push(rest as u32);
        rest >>= 32;
        if rest == 0 {
            break;
        }
    }
    limbs
}

impl From<i32> for BigInteger {
    fn from(value: i32) -> Self {
        Self::from_parts(value < 0, Limbs::from_elem(1, value.unsigned_abs()))
    }
}

impl From<u32> for BigInteger {
    fn from(value: u32) -> Self {
        Self::from_parts(false, Limbs::from_elem(1, value))
    }
}

impl From<u64> for BigInteger {
    #[allow(clippy::cast_possible_truncation)]
    fn from(value: u64) -> Self {
        let mut limbs = Limbs::from_elem(1, value as u32);
        limbs.push((value >> 32) as u32);
        Self::from_parts(false, limbs)
    }
}

impl From<i64> for BigInteger {
    fn from(value: i64) -> Self {
        let mut result = Self::from(value.unsigned_abs());
        if value < 0 {
            result.negate_in_place();
        }
        result
    }
}

impl From<u128> for BigInteger {
    fn from(value: u128) -> Self {
        Self::from_parts(false, limbs_from_u128(value))
    }
}

impl From<i128> for BigInteger {
    fn from(value: i128) -> Self {
        Self::from_parts(value < 0, limbs_from_u128(value.unsigned_abs()))
    }
}

impl BigInteger {
    /// Parse an optionally signed run of ASCII decimal digits.
    ///
    /// Leading zeros are accepted; `-0` is zero. Anything else, including
    /// surrounding whitespace, is `InvalidFormat`.
    pub fn parse_decimal(input: &str) -> Result<Self, IntError> {
        let invalid = |reason| IntError::InvalidFormat {
            input: input.to_owned(),
            reason,
        };
        let (negative, digits) = match input.as_bytes().first() {
            Some(b'-') => (true, &input[1..]),
            Some(b'+') => (false, &input[1..]),
            _ => (false, input),
        };
        if digits.is_empty() {
            return Err(invalid("expected at least one decimal digit"));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("contains a non-digit character"));
        }

        let mut mag = magnitude::zero();
        for chunk in digits.as_bytes().chunks(DECIMAL_CHUNK_DIGITS) {
            let value = chunk
                .iter()
                .fold(0u32, |acc, &digit| acc * 10 + u32::from(digit - b'0'));
            magnitude::mul_small_add(&mut mag, POW10[chunk.len()], value);
        }
        Ok(Self::from_parts(negative, mag))
    }

    /// Canonical decimal text: no leading zeros, `-` for negatives, no `+`.
    #[must_use]
    pub fn to_decimal_string(&self) -> String {
        let digits = magnitude_digits(self.limbs());
        if self.is_negative() {
            let mut text = String::with_capacity(digits.len() + 1);
            text.push('-');
            text.push_str(&digits);
            text
        } else {
            digits
        }
    }
}

/// Decimal digits of a magnitude, by repeated division of a scratch copy.
#[allow(clippy::cast_possible_truncation)]
fn magnitude_digits(mag: &[u32]) -> String {
    if magnitude::is_zero(mag) {
        return "0".to_owned();
    }
    let mut scratch = Limbs::from_slice(mag);
    let mut chunks = Vec::new();
    while !magnitude::is_zero(&scratch) {
        chunks.push(magnitude::div_small_in_place(
            scratch.as_mut_slice(),
            POW10[DECIMAL_CHUNK_DIGITS],
        ));
        scratch.trim_high_zeros();
    }

    let mut text = String::with_capacity(chunks.len() * DECIMAL_CHUNK_DIGITS);
    let mut chunks = chunks.iter().rev();
    if let Some(top) = chunks.next() {
        text.push_str(&top.to_string());
    }
    for &chunk in chunks {
        let mut buf = [b'0'; DECIMAL_CHUNK_DIGITS];
        let mut rest = chunk;
        for slot in buf.iter_mut().rev() {
            *slot = b'0' + (rest % 10) as u8;
            rest /= 10;
        }
        text.extend(buf.iter().map(|&b| char::from(b)));
    }
    text
}

impl FromStr for BigInteger {
    type Err = IntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_decimal(s)
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "", &magnitude_digits(self.limbs()))
    }
}

impl BigInteger {
    fn magnitude_u128(&self) -> Option<u128> {
        let limbs = self.limbs();
        if limbs.len() > 4 {
            return None;
        }
        Some(
            limbs
                .iter()
                .rev()
                .fold(0u128, |acc, &limb| (acc << 32) | u128::from(limb)),
        )
    }
}

impl ToPrimitive for BigInteger {
    fn to_i64(&self) -> Option<i64> {
        self.to_i128().and_then(|value| i64::try_from(value).ok())
    }

    fn to_u64(&self) -> Option<u64> {
        self.to_u128().and_then(|value| u64::try_from(value).ok())
    }

    fn to_i128(&self) -> Option<i128> {
        let mag = self.magnitude_u128()?;
        if self.is_negative() {
            if mag == 1u128 << 127 {
                Some(i128::MIN)
            } else {
                i128::try_from(mag).ok().map(|value| -value)
            }
        } else {
            i128::try_from(mag).ok()
        }
    }

    fn to_u128(&self) -> Option<u128> {
        if self.is_negative() {
            None
        } else {
            self.magnitude_u128()
        }
    }
}

impl FromPrimitive for BigInteger {
    fn from_i64(n: i64) -> Option<Self> {
        Some(Self::from(n))
    }

    fn from_u64(n: u64) -> Option<Self> {
        Some(Self::from(n))
    }

    fn from_i128(n: i128) -> Option<Self> {
        Some(Self::from(n))
    }

    fn from_u128(n: u128) -> Option<Self> {
        Some(Self::from(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_i32_extremes() {
        let min = BigInteger::from(i32::MIN);
        assert!(min.is_negative());
        assert_eq!(min.limbs(), &[0x8000_0000]);
        assert_eq!(min.to_string(), "-2147483648");
        assert!(!BigInteger::from(0i32).is_negative());
    }

    #[test]
    fn from_u64_is_canonical() {
        assert_eq!(BigInteger::from(5u64).limbs(), &[5]);
        assert_eq!(BigInteger::from(u64::MAX).limbs(), &[u32::MAX, u32::MAX]);
        assert!(BigInteger::from(u64::MAX).magnitude().is_inline());
    }

    #[test]
    fn from_i128_extremes() {
        assert_eq!(
            BigInteger::from(i128::MIN).to_string(),
            "-170141183460469231731687303715884105728"
        );
        assert_eq!(
            BigInteger::from(u128::MAX).to_string(),
            "340282366920938463463374607431768211455"
        );
    }

    #[test]
    fn parse_accepts_signs_and_leading_zeros() {
        assert_eq!("+42".parse::<BigInteger>().unwrap(), BigInteger::from(42));
        assert_eq!("-0042".parse::<BigInteger>().unwrap(), BigInteger::from(-42));
        let zero: BigInteger = "-0".parse().unwrap();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());
        assert_eq!("000000000000000000000".parse::<BigInteger>().unwrap(), BigInteger::zero());
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for bad in ["", "-", "+", "12a", " 12", "12 ", "--1", "+-1", "1_000", "١٢"] {
            assert!(
                matches!(
                    bad.parse::<BigInteger>(),
                    Err(IntError::InvalidFormat { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn display_and_to_decimal_string_agree() {
        for text in [
            "0",
            "7",
            "-7",
            "1000000000",
            "-1000000000000000000",
            "123456789012345678901234567890",
        ] {
            let value: BigInteger = text.parse().unwrap();
            assert_eq!(value.to_string(), text);
            assert_eq!(value.to_decimal_string(), text);
        }
    }

    #[test]
    fn display_pads_like_integers() {
        let value = BigInteger::from(-42);
        assert_eq!(format!("{value:>6}"), "   -42");
        assert_eq!(format!("{value:06}"), "-00042");
        assert_eq!(format!("{:+}", BigInteger::from(42)), "+42");
    }

    #[test]
    fn interior_zero_chunks_are_padded() {
        let value: BigInteger = "1000000000000000001".parse().unwrap();
        assert_eq!(value.to_string(), "1000000000000000001");
    }

    #[test]
    fn to_primitive_bounds() {
        assert_eq!(BigInteger::from(i64::MIN).to_i64(), Some(i64::MIN));
        assert_eq!(BigInteger::from(u64::MAX).to_i64(), None);
        assert_eq!(BigInteger::from(u64::MAX).to_u64(), Some(u64::MAX));
        assert_eq!(BigInteger::from(-1).to_u64(), None);
        assert_eq!(BigInteger::from(i128::MIN).to_i128(), Some(i128::MIN));
        let too_big: BigInteger = "340282366920938463463374607431768211456".parse().unwrap();
        assert_eq!(too_big.to_u128(), None);
    }

    #[test]
    fn from_primitive() {
        assert_eq!(BigInteger::from_i64(-9), Some(BigInteger::from(-9)));
        assert_eq!(BigInteger::from_u64(9), Some(BigInteger::from(9)));
    }
}
