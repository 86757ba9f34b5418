//! Error handling and exit codes.

use limbint_core::IntError;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: u8 = 0;
    /// Arithmetic failure or any error without a more specific code.
    pub const ERROR_GENERIC: u8 = 1;
    /// Malformed expression: unknown token or stack underflow.
    pub const ERROR_USAGE: u8 = 2;
    /// Reading input or writing output failed.
    pub const ERROR_IO: u8 = 3;
}

/// Evaluation failure.
#[derive(Debug, thiserror::Error)]
pub enum CalcError {
    /// An operator needed more operands than the stack holds.
    #[error("'{op}' needs {needed} operand(s), stack has {available}")]
    StackUnderflow {
        /// The operator token.
        op: String,
        /// Operands it consumes.
        needed: usize,
        /// Stack depth when it was applied.
        available: usize,
    },

    /// A token that is neither an integer nor a known operator.
    #[error("unknown token {0:?}")]
    UnknownToken(String),

    /// The arithmetic itself failed (division by zero, negative shift).
    #[error(transparent)]
    Arithmetic(#[from] IntError),

    /// A shift count does not fit in a machine integer.
    #[error("shift count {0} is out of range")]
    ShiftCount(String),

    /// Reading tokens or writing results failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl CalcError {
    /// Exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::StackUnderflow { .. } | Self::UnknownToken(_) => exit_codes::ERROR_USAGE,
            Self::Arithmetic(_) | Self::ShiftCount(_) => exit_codes::ERROR_GENERIC,
            Self::Io(_) => exit_codes::ERROR_IO,
        }
    }
}

/// Exit code for an error reaching `main`.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<CalcError>()
        .map_or(exit_codes::ERROR_GENERIC, CalcError::exit_code)
}
