//! Exact currency amounts and the quantization policy.
//!
//! Amounts are backed by `rust_decimal::Decimal` (28 significant digits), so
//! intermediate results such as `amount * weight / total_weight` keep far more
//! precision than the cent values that are eventually observed. Rounding only
//! happens through [`Precision`], always half-up away from zero.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Largest scale a `Decimal` can represent.
const MAX_SCALE: u32 = 28;

/// Quantization configuration: resolution `10^-scale`, rounding half-up.
///
/// This is a plain `Copy` value. Construct it once and pass it to every stage
/// of a computation run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Precision {
    scale: u32,
}

impl Precision {
    /// Two fractional digits (currency cents).
    pub const CENTS: Precision = Precision { scale: 2 };

    pub fn new(scale: u32) -> DomainResult<Self> {
        if scale > MAX_SCALE {
            return Err(DomainError::invalid_amount(format!(
                "scale {scale} exceeds the maximum of {MAX_SCALE}"
            )));
        }
        Ok(Self { scale })
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Smallest representable step (0.01 for cents).
    pub fn unit(&self) -> Decimal {
        Decimal::new(1, self.scale)
    }

    /// Round to the nearest multiple of [`Self::unit`], ties away from zero.
    ///
    /// The result always carries exactly `scale` fractional digits, and zero is
    /// never negative.
    pub fn quantize(&self, value: Decimal) -> Decimal {
        let mut rounded =
            value.round_dp_with_strategy(self.scale, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }
        rounded.rescale(self.scale);
        rounded
    }

    /// Round to the nearest multiple of an arbitrary positive `resolution`.
    pub fn quantize_to(value: Decimal, resolution: Decimal) -> DomainResult<Decimal> {
        if resolution <= Decimal::ZERO {
            return Err(DomainError::invalid_amount(format!(
                "resolution must be positive, got {resolution}"
            )));
        }
        let steps = (value / resolution)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let mut rounded = steps * resolution;
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }
        rounded.rescale(resolution.scale());
        Ok(rounded)
    }

    pub fn quantize_money(&self, value: Money) -> Money {
        Money(self.quantize(value.0))
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::CENTS
    }
}

/// Raw inputs accepted by [`Money::from_primitive`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive<'a> {
    Int(i64),
    Text(&'a str),
    Exact(Decimal),
}

impl From<i64> for Primitive<'_> {
    fn from(value: i64) -> Self {
        Primitive::Int(value)
    }
}

impl<'a> From<&'a str> for Primitive<'a> {
    fn from(value: &'a str) -> Self {
        Primitive::Text(value)
    }
}

impl<'a> From<&'a String> for Primitive<'a> {
    fn from(value: &'a String) -> Self {
        Primitive::Text(value.as_str())
    }
}

impl From<Decimal> for Primitive<'_> {
    fn from(value: Decimal) -> Self {
        Primitive::Exact(value)
    }
}

/// Parse decimal text exactly (plain or scientific notation).
///
/// Surrounding whitespace is ignored. Text that would need rounding to fit a
/// `Decimal` is rejected rather than silently rounded.
pub fn parse_decimal(text: &str) -> DomainResult<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid_amount("empty amount"));
    }

    let parsed = if trimmed.contains(['e', 'E']) {
        Decimal::from_scientific(trimmed)
    } else {
        Decimal::from_str_exact(trimmed)
    };

    parsed.map_err(|e| DomainError::invalid_amount(format!("`{trimmed}`: {e}")))
}

/// An exact, signed money amount.
///
/// `Money` does not round on its own: values produced by the split, balance and
/// settlement engines are quantized by them before they are returned.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Convert an integer, decimal text, or exact decimal. Never goes through `f64`.
    pub fn from_primitive<'a>(value: impl Into<Primitive<'a>>) -> DomainResult<Self> {
        match value.into() {
            Primitive::Int(v) => Ok(Self(Decimal::from(v))),
            Primitive::Text(s) => parse_decimal(s).map(Self),
            Primitive::Exact(d) => Ok(Self(d)),
        }
    }

    pub fn amount(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn quantize(self, precision: &Precision) -> Self {
        precision.quantize_money(self)
    }

    /// `self + rhs`, failing with `InvalidAmount` instead of overflowing.
    pub fn checked_add(self, rhs: Money) -> DomainResult<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or_else(|| overflow(self, "+", rhs))
    }

    /// `self - rhs`, failing with `InvalidAmount` instead of overflowing.
    pub fn checked_sub(self, rhs: Money) -> DomainResult<Self> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or_else(|| overflow(self, "-", rhs))
    }

    /// Checked counterpart of [`Sum`].
    pub fn try_sum(values: impl IntoIterator<Item = Money>) -> DomainResult<Self> {
        values
            .into_iter()
            .try_fold(Money::ZERO, |acc, value| acc.checked_add(value))
    }

    /// `self * numerator / denominator` at full working precision (unrounded).
    ///
    /// Panics if `denominator` is zero; callers validate weights first.
    pub fn portion(self, numerator: Decimal, denominator: Decimal) -> Decimal {
        self.0 * (numerator / denominator)
    }
}

fn overflow(lhs: Money, op: &str, rhs: Money) -> DomainError {
    DomainError::invalid_amount(format!("{lhs} {op} {rhs} is out of range"))
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s).map(Self)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
