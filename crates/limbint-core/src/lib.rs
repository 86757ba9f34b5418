//! # limbint-core
//!
//! Signed arbitrary-precision integers.
//!
//! [`BigInteger`] stores a sign flag and a little-endian magnitude of `u32`
//! limbs in [`Limbs`]: values of up to [`INLINE_CAPACITY`] limbs live inline,
//! larger ones share a copy-on-write buffer between clones. Arithmetic,
//! two's-complement bitwise operators, shifts, comparison, and decimal
//! conversion are provided through the usual `std` traits.
//!
//! # Example
//! ```
//! use limbint_core::BigInteger;
//!
//! let a: BigInteger = "123456789012345678901234567890".parse().unwrap();
//! let b = &a * &BigInteger::from(-2);
//! assert_eq!(b.to_string(), "-246913578024691357802469135780");
//! assert_eq!((BigInteger::from(-7) % BigInteger::from(2)).to_string(), "-1");
//! ```
#![warn(missing_docs)]

pub mod bitwise;
mod convert;
pub mod error;
mod integer;
pub mod io;
mod limb;
mod magnitude;
mod num;
mod ops;
#[cfg(feature = "serde")]
mod serde;

// Re-exports
pub use bitwise::{And, BitOp, Or, Xor};
pub use error::IntError;
pub use integer::BigInteger;
pub use io::{read_integer, write_integer, ReadError, TokenReader};
pub use limbint_storage::{Limbs, StorageError, StorageStats, INLINE_CAPACITY};
