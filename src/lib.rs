//! Shared helpers for the workspace-level integration tests.

use limbint_core::BigInteger;
use num_bigint::{BigInt, Sign};
use serde::Deserialize;

/// One golden case: `op` applied to `a` (and `b` for binary operators).
#[derive(Debug, Deserialize)]
pub struct GoldenEntry {
    /// Operator name (`add`, `div`, `shr`, `not`, ...).
    pub op: String,
    /// First operand, decimal.
    pub a: String,
    /// Second operand, decimal; absent for unary operators.
    #[serde(default)]
    pub b: Option<String>,
    /// Decimal result, or an error kind such as `divide_by_zero`.
    pub expected: String,
}

/// The golden file.
#[derive(Debug, Deserialize)]
pub struct GoldenData {
    /// Free-form description of the data set.
    pub description: String,
    /// All cases.
    pub values: Vec<GoldenEntry>,
}

/// Load `tests/testdata/arith_golden.json`.
pub fn load_golden_data() -> Result<GoldenData, Box<dyn std::error::Error>> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/testdata/arith_golden.json");
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Convert to `num-bigint` for cross-checking.
pub fn to_oracle(value: &BigInteger) -> BigInt {
    let sign = if value.is_negative() {
        Sign::Minus
    } else {
        Sign::Plus
    };
    BigInt::from_slice(sign, value.limbs())
}
