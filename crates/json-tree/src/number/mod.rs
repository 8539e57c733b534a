//! Deferred-evaluation numbers.
//!
//! A [`NumericValue`] keeps the literal exactly as it was written and only
//! evaluates it when a typed view is requested. Each view is computed at most
//! once per instance and memoized in a [`OnceLock`]; racing first accesses all
//! compute the same value, so the cells need no further synchronization.

mod decimal;
mod radix;

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

pub use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::{ToPrimitive, Zero};

pub use radix::Radix;

use crate::error::{LexError, NumericOverflowError};
use crate::lexer::Lexer;
use crate::options::ParseOptions;

/// A number as written in a document, with lazily computed typed views.
///
/// Equality, ordering and hashing follow the exact mathematical value:
/// `0x10`, `16`, `16.0` and `1.6e1` are all equal.
#[derive(Clone)]
pub struct NumericValue {
    literal: Cow<'static, str>,
    radix: Radix,
    decimal: OnceLock<BigDecimal>,
    integer: OnceLock<Option<i128>>,
    float: OnceLock<f64>,
}

macro_rules! exact_accessors {
    ($($name:ident => $ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("The exact value as `", stringify!($ty), "`.")]
            pub fn $name(&self) -> Result<$ty, NumericOverflowError> {
                self.exact_integer()
                    .and_then(|value| <$ty>::try_from(value).ok())
                    .ok_or_else(|| self.overflow(stringify!($ty)))
            }
        )*
    };
}

impl NumericValue {
    #[allow(clippy::declare_interior_mutable_const)]
    pub(crate) const ZERO: NumericValue = NumericValue::from_static("0");

    const fn from_static(literal: &'static str) -> Self {
        Self {
            literal: Cow::Borrowed(literal),
            radix: Radix::Decimal,
            decimal: OnceLock::new(),
            integer: OnceLock::new(),
            float: OnceLock::new(),
        }
    }

    /// Wraps a literal that already passed the lexer's numeric grammar.
    pub(crate) fn from_literal(literal: String, radix: Radix) -> Self {
        Self {
            literal: Cow::Owned(literal),
            radix,
            decimal: OnceLock::new(),
            integer: OnceLock::new(),
            float: OnceLock::new(),
        }
    }

    /// A finite `f64`, written in its shortest round-trip form. Returns
    /// `None` for NaN and infinities, which have no literal.
    pub fn from_f64(value: f64) -> Option<Self> {
        Self::from_float_literal(value.is_finite(), || format!("{value:?}"))
    }

    /// A finite `f32`, written in its shortest round-trip form. Returns
    /// `None` for NaN and infinities, which have no literal.
    ///
    /// The value is the decimal literal, so `from_f32(0.1)` is exactly `0.1`
    /// and its `f64` view is `0.1_f64`, not the widened `0.1_f32`.
    pub fn from_f32(value: f32) -> Option<Self> {
        Self::from_float_literal(value.is_finite(), || format!("{value:?}"))
    }

    /// Both float constructors leave every view to be evaluated from the
    /// literal, like parsed numbers.
    fn from_float_literal(finite: bool, literal: impl FnOnce() -> String) -> Option<Self> {
        finite.then(|| Self::from_literal(literal(), Radix::Decimal))
    }

    /// The literal text, including sign and radix prefix.
    pub fn literal(&self) -> &str {
        &self.literal
    }

    pub fn radix(&self) -> Radix {
        self.radix
    }

    exact_accessors! {
        as_i8 => i8,
        as_i16 => i16,
        as_i32 => i32,
        as_i64 => i64,
        as_i128 => i128,
        as_u8 => u8,
        as_u16 => u16,
        as_u32 => u32,
        as_u64 => u64,
    }

    /// The exact value as `u128`.
    pub fn as_u128(&self) -> Result<u128, NumericOverflowError> {
        if let Some(value) = self.exact_integer() {
            return u128::try_from(value).map_err(|_| self.overflow("u128"));
        }
        let exact = self.decimal();
        if !decimal::is_integral(exact)
            || decimal::magnitude_exponent(exact) > decimal::WIDEST_INTEGER_DIGITS
        {
            return Err(self.overflow("u128"));
        }
        decimal::truncate(exact)
            .to_u128()
            .ok_or_else(|| self.overflow("u128"))
    }

    /// Nearest `f64`. Never fails; out-of-range values become infinities.
    pub fn as_f64(&self) -> f64 {
        *self.float.get_or_init(|| match self.radix {
            Radix::Decimal => self
                .literal
                .parse()
                .unwrap_or_else(|_| decimal::to_f64(self.decimal())),
            _ => decimal::to_f64(self.decimal()),
        })
    }

    /// Nearest `f32`, rounded directly from the exact value.
    pub fn as_f32(&self) -> f32 {
        match self.radix {
            Radix::Decimal => self
                .literal
                .parse()
                .unwrap_or_else(|_| decimal::to_f32(self.decimal())),
            _ => decimal::to_f32(self.decimal()),
        }
    }

    /// The integer part, truncated toward zero.
    ///
    /// Parsed literals keep their exponent within
    /// [`MAX_EXPONENT`](crate::MAX_EXPONENT), which bounds the size of
    /// the result; a number built from a [`BigDecimal`] materializes however
    /// many digits its integer part has.
    pub fn as_big_int(&self) -> BigInt {
        decimal::truncate(self.decimal())
    }

    pub fn as_big_decimal(&self) -> BigDecimal {
        self.decimal().clone()
    }

    /// Whether the value has no fractional part (`2.0` and `1e3` are integral).
    pub fn is_integral(&self) -> bool {
        self.exact_integer().is_some() || decimal::is_integral(self.decimal())
    }

    pub fn is_zero(&self) -> bool {
        self.decimal().is_zero()
    }

    /// `-1`, `0` or `1`.
    pub fn signum(&self) -> i32 {
        match self.decimal().sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        }
    }

    fn decimal(&self) -> &BigDecimal {
        self.decimal.get_or_init(|| match self.radix {
            Radix::Decimal => {
                decimal::parse_decimal_literal(&self.literal).unwrap_or_else(BigDecimal::zero)
            }
            radix => BigDecimal::new(parse_radix_literal(&self.literal, radix), 0),
        })
    }

    fn exact_integer(&self) -> Option<i128> {
        *self.integer.get_or_init(|| {
            if self.radix == Radix::Decimal && !self.literal.contains(['.', 'e', 'E']) {
                if let Ok(value) = self.literal.parse::<i128>() {
                    return Some(value);
                }
            }
            decimal::to_i128_exact(self.decimal())
        })
    }

    fn overflow(&self, target: &'static str) -> NumericOverflowError {
        NumericOverflowError {
            literal: self.literal.to_string(),
            target,
        }
    }
}

/// Evaluates a literal already validated against the radix grammar
/// (`-?0[xob]digits`).
fn parse_radix_literal(text: &str, radix: Radix) -> BigInt {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let digits = rest.get(radix.prefix().len()..).unwrap_or_default();
    let magnitude = BigInt::parse_bytes(digits.as_bytes(), radix.base()).unwrap_or_default();
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

impl Default for NumericValue {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

impl fmt::Debug for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NumericValue({})", self.literal)
    }
}

impl PartialEq for NumericValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NumericValue {}

impl PartialOrd for NumericValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NumericValue {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.radix == other.radix && self.literal == other.literal {
            return Ordering::Equal;
        }
        if let (Some(a), Some(b)) = (self.exact_integer(), other.exact_integer()) {
            return a.cmp(&b);
        }
        let (a, b) = (self.decimal(), other.decimal());
        let sign = a.sign();
        if sign != b.sign() || sign == Sign::NoSign {
            return sign.cmp(&b.sign());
        }
        // Differing magnitudes decide without rescaling either side.
        let by_magnitude =
            decimal::magnitude_exponent(a).cmp(&decimal::magnitude_exponent(b));
        match (by_magnitude, sign) {
            (Ordering::Equal, _) => a.cmp(b),
            (ordering, Sign::Minus) => ordering.reverse(),
            (ordering, _) => ordering,
        }
    }
}

impl Hash for NumericValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let exact = self.decimal();
        if exact.is_zero() {
            return BigInt::zero().hash(state);
        }
        let (unscaled, scale) = exact.normalized().as_bigint_and_exponent();
        unscaled.hash(state);
        scale.hash(state);
    }
}

impl FromStr for NumericValue {
    type Err = LexError;

    /// Accepts exactly one numeric literal (decimal or radix-prefixed).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let options = ParseOptions::default();
        let mut lexer = Lexer::new(s, &options);
        lexer.read_number_literal()
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for NumericValue {
                fn from(value: $ty) -> Self {
                    let number = Self::from_literal(value.to_string(), Radix::Decimal);
                    let _ = number.integer.set(i128::try_from(value).ok());
                    number
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<u128> for NumericValue {
    fn from(value: u128) -> Self {
        Self::from(BigInt::from(value))
    }
}

impl From<BigInt> for NumericValue {
    fn from(value: BigInt) -> Self {
        let number = Self::from_literal(value.to_string(), Radix::Decimal);
        let _ = number.decimal.set(BigDecimal::new(value, 0));
        number
    }
}

impl From<BigDecimal> for NumericValue {
    fn from(value: BigDecimal) -> Self {
        let number = Self::from_literal(decimal::to_literal(&value), Radix::Decimal);
        let _ = number.decimal.set(value);
        number
    }
}

impl From<&BigDecimal> for NumericValue {
    fn from(value: &BigDecimal) -> Self {
        Self::from(value.clone())
    }
}
