use crate::Result;

/// A source of decimal digits of pi.
///
/// Implementations must be deterministic: the same `digits` always yields the
/// same string. A successful result starts with the integer part, a decimal
/// point, and then at least `digits` fractional digits (e.g. `"3.14159"` for
/// `digits = 5`).
///
/// Implementations are called from a blocking thread pool and shared across
/// requests, hence the `Send + Sync` bound.
///
/// Closures with the right signature implement this trait, which makes it easy
/// to inject a fixed or failing provider:
///
/// ```
/// use pidigits::{DigitProvider, Error};
///
/// let failing = |_digits: u32| -> Result<String, Error> {
///     Err(Error::Unknown { context: "offline".to_string() })
/// };
/// assert!(failing.pi_digits(3).is_err());
/// ```
pub trait DigitProvider: Send + Sync {
    /// Returns pi formatted to `digits` fractional digits.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPrecision`](crate::Error::InvalidPrecision) if the
    ///   provider refuses the precision.
    /// - [`Error::Unrepresentable`](crate::Error::Unrepresentable) if the
    ///   precision overflows the provider's working precision.
    /// - [`Error::Unknown`](crate::Error::Unknown) for anything else.
    fn pi_digits(&self, digits: u32) -> Result<String>;
}

impl<F> DigitProvider for F
where
    F: Fn(u32) -> Result<String> + Send + Sync,
{
    fn pi_digits(&self, digits: u32) -> Result<String> {
        self(digits)
    }
}
