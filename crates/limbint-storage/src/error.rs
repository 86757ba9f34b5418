//! Storage error type.

/// Error returned by bounds-checked accessors and fallible growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// A limb index was at or past the current length.
    #[error("limb index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The length at the time of the access.
        len: usize,
    },

    /// Growing the sequence would need more memory than can be allocated.
    #[error("cannot grow {len} limbs by {additional}: capacity overflow")]
    CapacityOverflow {
        /// The length before growing.
        len: usize,
        /// The number of limbs requested on top of it.
        additional: usize,
    },
}
