//! Error type for integer operations.

use limbint_storage::StorageError;

/// Error returned by fallible `BigInteger` operations.
///
/// Every failing operation leaves its operands untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntError {
    /// The divisor of a division or remainder was zero.
    #[error("attempt to divide by zero")]
    DivideByZero,

    /// An argument was outside the operation's domain (e.g. a negative shift).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A limb index was out of range.
    #[error(transparent)]
    IndexOutOfBounds(#[from] StorageError),

    /// Text was not an optionally signed run of ASCII decimal digits.
    #[error("invalid integer literal {input:?}: {reason}")]
    InvalidFormat {
        /// The rejected text.
        input: String,
        /// What was wrong with it.
        reason: &'static str,
    },
}
