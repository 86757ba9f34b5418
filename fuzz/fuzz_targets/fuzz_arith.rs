#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint::{BigInt, Sign};

use limbint_core::{BigInteger, Limbs};

/// Split the input into two signed operands of raw little-endian limbs.
fn operands(data: &[u8]) -> Option<((BigInteger, BigInt), (BigInteger, BigInt), usize)> {
    let (&header, rest) = data.split_first()?;
    let split = usize::from(header & 0x3f).min(rest.len()) & !3;
    let (left, right) = rest.split_at(split);
    let shift = usize::from(header >> 6) * 37;
    Some((
        operand(header & 0x40 != 0, left),
        operand(header & 0x80 != 0, right),
        shift,
    ))
}

fn operand(negative: bool, bytes: &[u8]) -> (BigInteger, BigInt) {
    let limbs: Vec<u32> = bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    let sign = if negative { Sign::Minus } else { Sign::Plus };
    (
        BigInteger::from_parts(negative, Limbs::from_vec(limbs.clone())),
        BigInt::from_slice(sign, &limbs),
    )
}

fn check(value: &BigInteger, oracle: &BigInt) {
    assert_eq!(value.to_string(), oracle.to_string());
}

fuzz_target!(|data: &[u8]| {
    let Some(((a, x), (b, y), shift)) = operands(data) else {
        return;
    };

    check(&(&a + &b), &(&x + &y));
    check(&(&a - &b), &(&x - &y));
    check(&(&a * &b), &(&x * &y));
    check(&(&a & &b), &(&x & &y));
    check(&(&a | &b), &(&x | &y));
    check(&(&a ^ &b), &(&x ^ &y));
    check(&(&a << shift), &(&x << shift));
    check(&(&a >> shift), &(&x >> shift));

    if !b.is_zero() {
        let (q, r) = a.checked_div_rem(&b).expect("non-zero divisor");
        check(&q, &(&x / &y));
        check(&r, &(&x % &y));
    }
});
