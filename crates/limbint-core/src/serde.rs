//! Serde support: a `BigInteger` serializes as its decimal string.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::BigInteger;

impl Serialize for BigInteger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct DecimalVisitor;

impl Visitor<'_> for DecimalVisitor {
    type Value = BigInteger;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal integer string or an integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<BigInteger, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<BigInteger, E> {
        Ok(BigInteger::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<BigInteger, E> {
        Ok(BigInteger::from(v))
    }
}

impl<'de> Deserialize<'de> for BigInteger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DecimalVisitor)
    }
}

#[cfg(test)]
mod tests {
    use crate::BigInteger;

    #[test]
    fn json_string_form() {
        let value: BigInteger = "-123456789012345678901234567890".parse().unwrap();
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"-123456789012345678901234567890\"");
        let back: BigInteger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn json_numbers_accepted() {
        let value: BigInteger = serde_json::from_str("-42").unwrap();
        assert_eq!(value, BigInteger::from(-42));
    }

    #[test]
    fn bad_string_is_rejected() {
        assert!(serde_json::from_str::<BigInteger>("\"4x2\"").is_err());
    }
}
