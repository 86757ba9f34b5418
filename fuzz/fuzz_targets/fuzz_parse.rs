#![no_main]

use libfuzzer_sys::fuzz_target;

use limbint_core::BigInteger;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(value) = text.parse::<BigInteger>() else {
        return;
    };
    // Accepted text must match the oracle's reading of it.
    let oracle: num_bigint::BigInt = text.parse().expect("oracle accepts what we accept");
    let canonical = value.to_string();
    assert_eq!(canonical, oracle.to_string());
    assert_eq!(canonical.parse::<BigInteger>().expect("canonical text parses"), value);
});
