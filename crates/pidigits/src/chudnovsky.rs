//! Chudnovsky series evaluated with binary splitting.
//!
//! The series
//!
//! ```text
//! 1/pi = 12 * sum_k (-1)^k (6k)! (13591409 + 545140134 k)
//!              / ((3k)! (k!)^3 640320^(3k + 3/2))
//! ```
//!
//! adds roughly 14.18 correct decimal digits per term. Binary splitting folds
//! the first `n` terms into three integers `(P, Q, R)` so that
//!
//! ```text
//! pi = 426880 * sqrt(10005) * Q(0, n) / R(0, n)
//! ```
//!
//! which is then evaluated in fixed point with a few guard digits and
//! truncated to the requested precision.

use crate::{DigitProvider, Error, PREFIX_LEN, Result, working_precision};
use num_bigint::{BigInt, BigUint, Sign};

/// Linear coefficient of the series numerator.
const A: u64 = 13_591_409;
/// Per-term slope of the series numerator.
const B: u64 = 545_140_134;
/// `640320^3 / 24`.
const C3_OVER_24: u64 = 10_939_058_860_032_000;
/// `640320^(3/2) / 12 = 426880 * sqrt(10005)`.
const MULTIPLIER: u32 = 426_880;
const SQRT_ARG: u32 = 10_005;

/// Extra decimal places carried through the fixed-point evaluation and dropped
/// before formatting. Absorbs the truncation error of the square root and the
/// final division so the kept digits are exact.
const GUARD_DIGITS: u32 = 10;

/// Pi digit provider backed by the Chudnovsky series.
///
/// Stateless and cheap to copy; every call recomputes from scratch.
///
/// ```
/// use pidigits::{Chudnovsky, DigitProvider};
///
/// assert_eq!(Chudnovsky.pi_digits(10).unwrap(), "3.1415926535");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Chudnovsky;

impl Chudnovsky {
    /// Decimal digits gained per series term, `log10(640320^3 / 24 / 72)`.
    pub fn digits_per_term() -> f64 {
        (C3_OVER_24 as f64 / 6.0 / 2.0 / 6.0).log10()
    }

    /// Number of series terms summed for `digits` digits of precision.
    ///
    /// One term more than the convergence rate strictly requires, so the
    /// guard digits are covered as well.
    pub fn terms_for(digits: u32) -> u32 {
        (f64::from(digits) / Self::digits_per_term()).ceil() as u32 + 1
    }
}

impl DigitProvider for Chudnovsky {
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip(self)))]
    fn pi_digits(&self, digits: u32) -> Result<String> {
        match digits {
            0 => Err(Error::InvalidPrecision {
                reason: "must be greater than 0".to_string(),
            }),
            1 => Ok("3.1".to_string()),
            _ if working_precision(digits).is_none() => Err(Error::Unrepresentable { digits }),
            _ => evaluate(digits),
        }
    }
}

/// Partial products `(P, Q, R)` over a half-open range of series terms.
struct Split {
    p: BigInt,
    q: BigInt,
    r: BigInt,
}

fn evaluate(digits: u32) -> Result<String> {
    let terms = Chudnovsky::terms_for(digits);

    #[cfg(feature = "tracing")]
    tracing::debug!(digits, terms, "evaluating series");

    let Split { q, r, .. } = binary_split(0, terms);
    if r.sign() != Sign::Plus {
        return Err(Error::Unknown {
            context: format!("series denominator is not positive after {terms} terms"),
        });
    }

    let one = BigUint::from(10_u32).pow(digits + GUARD_DIGITS);
    let sqrt = (&one * &one * SQRT_ARG).sqrt();
    let scaled = BigInt::from(sqrt) * MULTIPLIER * q / r;
    let truncated = scaled / BigInt::from(10_u32).pow(GUARD_DIGITS);

    let mut repr = truncated.to_string();
    if repr.len() != digits as usize + 1 {
        return Err(Error::Unknown {
            context: format!(
                "expected {} significant digits, produced {}",
                digits as usize + 1,
                repr.len()
            ),
        });
    }
    repr.insert(1, '.');
    debug_assert_eq!(repr.len(), digits as usize + PREFIX_LEN);
    Ok(repr)
}

fn binary_split(a: u32, b: u32) -> Split {
    if b - a == 1 {
        return term(a);
    }
    let m = a + (b - a) / 2;
    let left = binary_split(a, m);
    let right = binary_split(m, b);
    Split {
        r: &left.r * &right.q + &left.p * &right.r,
        p: left.p * right.p,
        q: left.q * right.q,
    }
}

fn term(a: u32) -> Split {
    if a == 0 {
        return Split {
            p: BigInt::from(1),
            q: BigInt::from(1),
            r: BigInt::from(A),
        };
    }
    let k = u64::from(a);
    let p = BigInt::from(6 * k - 5) * (2 * k - 1) * (6 * k - 1);
    let q = BigInt::from(k).pow(3) * C3_OVER_24;
    let r = &p * (BigInt::from(B) * k + A);
    let r = if a % 2 == 1 { -r } else { r };
    Split { p, q, r }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_DIGITS;

    const PI_1000: &str = concat!(
        "3.141592653589793238462643383279502884197169399375105820974944592307816406286208",
        "99862803482534211706798214808651328230664709384460955058223172535940812848111745",
        "02841027019385211055596446229489549303819644288109756659334461284756482337867831",
        "65271201909145648566923460348610454326648213393607260249141273724587006606315588",
        "17488152092096282925409171536436789259036001133053054882046652138414695194151160",
        "94330572703657595919530921861173819326117931051185480744623799627495673518857527",
        "24891227938183011949129833673362440656643086021394946395224737190702179860943702",
        "77053921717629317675238467481846766940513200056812714526356082778577134275778960",
        "91736371787214684409012249534301465495853710507922796892589235420199561121290219",
        "60864034418159813629774771309960518707211349999998372978049951059731732816096318",
        "59502445945534690830264252230825334468503526193118817101000313783875288658753320",
        "83814206171776691473035982534904287554687311595628638823537875937519577818577805",
        "321712268066130019278766111959092164201989",
    );

    #[test]
    fn matches_known_digits() -> Result<()> {
        for digits in [2_u32, 5, 14, 15, 16, 50, 99, 100, 257, 1000] {
            let pi = Chudnovsky.pi_digits(digits)?;
            assert_eq!(pi, &PI_1000[..digits as usize + PREFIX_LEN], "digits = {digits}");
        }
        Ok(())
    }

    #[test]
    fn output_length_is_digits_plus_prefix() -> Result<()> {
        for digits in 1..=64 {
            let pi = Chudnovsky.pi_digits(digits)?;
            assert_eq!(pi.len(), digits as usize + PREFIX_LEN);
            assert!(pi.starts_with("3."));
        }
        Ok(())
    }

    #[test]
    fn truncates_through_run_of_nines() -> Result<()> {
        // Six consecutive 9s start at fractional position 762.
        for digits in 760..=770 {
            let pi = Chudnovsky.pi_digits(digits)?;
            assert_eq!(pi, &PI_1000[..digits as usize + PREFIX_LEN], "digits = {digits}");
        }
        Ok(())
    }

    #[test]
    fn single_digit() -> Result<()> {
        assert_eq!(Chudnovsky.pi_digits(1)?, "3.1");
        Ok(())
    }

    #[test]
    fn zero_digits_is_invalid() {
        assert_eq!(
            Chudnovsky.pi_digits(0),
            Err(Error::InvalidPrecision {
                reason: "must be greater than 0".to_string()
            })
        );
    }

    #[test]
    fn overflowing_precision_is_unrepresentable() {
        for digits in [MAX_DIGITS, MAX_DIGITS + 1, u32::MAX] {
            assert_eq!(
                Chudnovsky.pi_digits(digits),
                Err(Error::Unrepresentable { digits })
            );
        }
    }

    #[test]
    fn deterministic() -> Result<()> {
        assert_eq!(Chudnovsky.pi_digits(333)?, Chudnovsky.pi_digits(333)?);
        Ok(())
    }

    #[test]
    fn term_count_tracks_convergence_rate() {
        let rate = Chudnovsky::digits_per_term();
        assert!((rate - 14.18).abs() < 0.01, "rate = {rate}");
        assert_eq!(Chudnovsky::terms_for(2), 2);
        assert_eq!(Chudnovsky::terms_for(1000), 72);
    }
}
