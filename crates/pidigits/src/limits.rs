/// Exclusive upper bound on the number of fractional digits that can be
/// requested.
///
/// Providers work at `digits * 4` bits of precision and that product must fit
/// in a `u32`, so the bound is `ceil((2^32 - 1) / 4)`.
pub const MAX_DIGITS: u32 = u32::MAX.div_ceil(4);

/// Number of characters that precede the fractional digits in a provider's
/// output (`"3."`).
pub const PREFIX_LEN: usize = 2;

/// Bits of working precision needed for `digits` decimal digits, or `None` if
/// it does not fit in a `u32`.
pub const fn working_precision(digits: u32) -> Option<u32> {
    digits.checked_mul(4)
}

const _: () = assert!(MAX_DIGITS == 1_073_741_824);
const _: () = assert!(working_precision(MAX_DIGITS - 1).is_some());
const _: () = assert!(working_precision(MAX_DIGITS).is_none());
