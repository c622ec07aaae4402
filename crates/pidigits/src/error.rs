//! Error kinds reported by a [`DigitProvider`](crate::DigitProvider).
//!
//! Callers are expected to match on the variant rather than the message:
//!
//! - [`Error::InvalidPrecision`] and [`Error::Unrepresentable`] describe a
//!   request the provider refuses to compute. They are the caller's fault and
//!   safe to report back verbatim.
//! - [`Error::Unknown`] is everything else and should be treated as an
//!   internal fault.

/// A result type defaulting to the crate's [`enum@Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors a digit provider can produce.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested precision is outside the provider's domain (e.g. zero
    /// digits).
    #[error("Invalid digits: {reason}")]
    InvalidPrecision { reason: String },

    /// The requested precision cannot be represented by the provider's
    /// working precision type.
    #[error("Invalid digits: {digits} must be less than (2^32-1)/4")]
    Unrepresentable { digits: u32 },

    /// Any other provider failure.
    #[error("Digit provider failed: {context}")]
    Unknown { context: String },
}

impl Error {
    /// Returns `true` if the error describes a request the caller could fix by
    /// asking for a different precision.
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidPrecision { .. } | Self::Unrepresentable { .. }
        )
    }
}
