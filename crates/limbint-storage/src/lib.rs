//! # limbint-storage
//!
//! Limb storage for the `limbint` workspace.
//!
//! [`Limbs`] holds a little-endian sequence of `u32` limbs. Short sequences
//! live inline without touching the heap; longer ones sit in a
//! reference-counted buffer that clones share until a write forces a
//! private copy.
#![warn(missing_docs)]

pub mod error;
pub mod limbs;
pub mod stats;

// Re-exports
pub use error::StorageError;
pub use limbs::{Limbs, INLINE_CAPACITY, MAX_LEN};
pub use stats::StorageStats;
