//! Glue between number literals and [`BigDecimal`].
//!
//! Every helper here looks at the decimal magnitude of a value before it
//! multiplies or divides by a power of ten, so a view never materializes more
//! digits than the value itself has.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{Pow, ToPrimitive, Zero};

/// Exponent-form threshold: a positive scale this far beyond the digit count
/// is written as `<digits>e-<scale>` instead of padding with zeros.
const MAX_PADDING_ZEROS: i64 = 6;

/// Decimal digits of `i128::MAX` and `u128::MAX`.
pub(crate) const WIDEST_INTEGER_DIGITS: i128 = 39;

/// Parses a literal already validated against the decimal grammar
/// (`-?int(.frac)?([eE][+-]?exp)?`).
pub(crate) fn parse_decimal_literal(text: &str) -> Option<BigDecimal> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (mantissa, exponent) = match rest.find(['e', 'E']) {
        Some(at) => (&rest[..at], rest[at + 1..].parse::<i64>().ok()?),
        None => (rest, 0),
    };
    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let mut digits = String::with_capacity(int.len() + frac.len());
    digits.push_str(int);
    digits.push_str(frac);
    let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10)?;
    let scale = i64::try_from(frac.len()).ok()?.checked_sub(exponent)?;
    let unscaled = if negative { -magnitude } else { magnitude };
    Some(BigDecimal::new(unscaled, scale))
}

fn digit_count(unscaled: &BigInt) -> i128 {
    if unscaled.is_zero() {
        return 0;
    }
    unscaled.magnitude().to_str_radix(10).len() as i128
}

fn trailing_zeros(unscaled: &BigInt) -> i128 {
    let digits = unscaled.magnitude().to_str_radix(10);
    (digits.len() - digits.trim_end_matches('0').len()) as i128
}

fn ten_pow(exp: u64) -> BigInt {
    BigInt::from(10u32).pow(exp)
}

/// `e` such that `10^(e-1) <= |value| < 10^e`; zero for zero.
pub(crate) fn magnitude_exponent(value: &BigDecimal) -> i128 {
    let (unscaled, scale) = value.as_bigint_and_exponent();
    if unscaled.is_zero() {
        return 0;
    }
    digit_count(&unscaled) - i128::from(scale)
}

pub(crate) fn is_integral(value: &BigDecimal) -> bool {
    let (unscaled, scale) = value.as_bigint_and_exponent();
    scale <= 0 || unscaled.is_zero() || i128::from(scale) <= trailing_zeros(&unscaled)
}

/// Integer part, truncated toward zero.
///
/// Values below one in magnitude are zero without any arithmetic; larger
/// values cost as many digits as their integer part has.
pub(crate) fn truncate(value: &BigDecimal) -> BigInt {
    if magnitude_exponent(value) <= 0 {
        return BigInt::zero();
    }
    let (unscaled, scale) = value.as_bigint_and_exponent();
    if scale > 0 {
        unscaled / ten_pow(scale.unsigned_abs())
    } else {
        unscaled * ten_pow(scale.unsigned_abs())
    }
}

/// The exact value as an `i128`, or `None` when it has a fractional part or
/// lies outside the `i128` range.
pub(crate) fn to_i128_exact(value: &BigDecimal) -> Option<i128> {
    if value.is_zero() {
        return Some(0);
    }
    if !is_integral(value) || magnitude_exponent(value) > WIDEST_INTEGER_DIGITS {
        return None;
    }
    truncate(value).to_i128()
}

fn exponent_form(value: &BigDecimal) -> String {
    let (unscaled, scale) = value.as_bigint_and_exponent();
    format!("{unscaled}e{}", -i128::from(scale))
}

/// Nearest `f64`; overflows to an infinity and underflows to zero.
pub(crate) fn to_f64(value: &BigDecimal) -> f64 {
    // Rust's float parser rounds decimal text correctly.
    exponent_form(value).parse().unwrap_or(f64::NAN)
}

/// Nearest `f32`, rounded once from the exact value.
pub(crate) fn to_f32(value: &BigDecimal) -> f32 {
    exponent_form(value).parse().unwrap_or(f32::NAN)
}

/// A literal in the decimal grammar that parses back to `value`, keeping its
/// scale (`12.50` stays `12.50`).
pub(crate) fn to_literal(value: &BigDecimal) -> String {
    let (unscaled, scale) = value.as_bigint_and_exponent();
    if scale == 0 {
        return unscaled.to_string();
    }
    if scale < 0 {
        return format!("{unscaled}e{}", -i128::from(scale));
    }
    let digits = unscaled.magnitude().to_str_radix(10);
    let len = digits.len() as i64;
    if scale > len + MAX_PADDING_ZEROS {
        return format!("{unscaled}e-{scale}");
    }
    let sign = if unscaled < BigInt::zero() { "-" } else { "" };
    if scale < len {
        let (int, frac) = digits.split_at((len - scale) as usize);
        format!("{sign}{int}.{frac}")
    } else {
        let zeros = "0".repeat((scale - len) as usize);
        format!("{sign}0.{zeros}{digits}")
    }
}
