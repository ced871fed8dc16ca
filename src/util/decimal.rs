use std::{fmt::Display, marker::PhantomData, ops::Deref};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

use super::basic::SError;

use self::constraint::{GreaterEqualZero, LessEqualZero};

// These were deprecated as methods on Decimal, so re-implement them.
// Those implementations don't actually do zero checks, and can result
// in weird behaviour.
pub fn is_positive(d: &Decimal) -> bool {
    d.is_sign_positive() && !d.is_zero()
}

pub fn is_negative(d: &Decimal) -> bool {
    d.is_sign_negative() && !d.is_zero()
}

/// Rounds half away from zero to two places, and always renders both
/// fraction digits. Never renders "-0.00".
pub fn cent_precision_str(d: &Decimal) -> String {
    let mut rounded = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    format!("{:.2}", rounded)
}

/// Eg. "1234.50 EUR"
pub fn currency_amount_str(d: &Decimal, currency: &str) -> String {
    format!("{} {}", cent_precision_str(d), currency)
}

/// How numbers are printed in the source document.
/// The broker statements use German formatting, like 1.234,56
#[derive(PartialEq, Eq, Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NumberFormat {
    pub decimal_separator: char,
    pub thousands_separator: Option<char>,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat {
            decimal_separator: ',',
            thousands_separator: Some('.'),
        }
    }
}

impl NumberFormat {
    pub fn validate(&self) -> Result<(), SError> {
        if self.decimal_separator.is_ascii_digit() || self.decimal_separator == '-' {
            return Err(format!(
                "'{}' cannot be used as a decimal separator",
                self.decimal_separator
            ));
        }
        if let Some(t) = self.thousands_separator {
            if t == self.decimal_separator {
                return Err(format!(
                    "Decimal and thousands separators are both '{t}'"
                ));
            }
            if t.is_ascii_digit() || t == '-' {
                return Err(format!("'{t}' cannot be used as a thousands separator"));
            }
        }
        Ok(())
    }

    /// Parses a number as printed in the document, eg. "-1.234,56"
    pub fn parse(&self, s: &str) -> Result<Decimal, SError> {
        let trimmed = s.trim();
        let mut normalized = String::with_capacity(trimmed.len());
        for c in trimmed.chars() {
            if Some(c) == self.thousands_separator {
                continue;
            } else if c == self.decimal_separator {
                normalized.push('.');
            } else {
                normalized.push(c);
            }
        }
        Decimal::from_str_exact(&normalized)
            .map_err(|e| format!("Unable to parse number from \"{s}\": {e}"))
    }

    /// A regex fragment (no groups) which matches a single, optionally
    /// negative, number in this format.
    pub fn regex_fragment(&self) -> String {
        let dec = regex::escape(&self.decimal_separator.to_string());
        match self.thousands_separator {
            Some(t) => {
                let th = regex::escape(&t.to_string());
                format!(r"-?\d{{1,3}}(?:{th}\d{{3}})+(?:{dec}\d+)?|-?\d+(?:{dec}\d+)?")
            }
            None => format!(r"-?\d+(?:{dec}\d+)?"),
        }
    }
}

pub trait DecConstraint {
    fn is_ok(d: &Decimal) -> bool;
}

pub mod constraint {
    use rust_decimal::Decimal;

    use super::DecConstraint;

    #[derive(PartialEq, Eq, Clone, Copy, Debug)]
    pub struct LessEqualZero(());
    impl DecConstraint for LessEqualZero {
        fn is_ok(d: &Decimal) -> bool {
            d.is_sign_negative() || d.is_zero()
        }
    }

    #[derive(PartialEq, Eq, Clone, Copy, Debug)]
    pub struct GreaterEqualZero(());
    impl DecConstraint for GreaterEqualZero {
        fn is_ok(d: &Decimal) -> bool {
            d.is_sign_positive() || d.is_zero()
        }
    }
}

// A constrained instance of Decimal. This can only be created through ::try_from,
// which will enforce the DecConstraint, so a gain bucket can never hold a loss
// and vice versa.
//
// PhantomData here is size zero, and is simply to make the compiler happy.
pub struct ConstrainedDecimal<CONSTRAINT>(Decimal, PhantomData<CONSTRAINT>);

impl<CONSTRAINT: DecConstraint> TryFrom<Decimal> for ConstrainedDecimal<CONSTRAINT> {
    type Error = SError;

    fn try_from(d: Decimal) -> Result<Self, Self::Error> {
        if CONSTRAINT::is_ok(&d) {
            Ok(Self(d, PhantomData))
        } else {
            Err(format!(
                "{} does not match constraints of {}",
                d,
                std::any::type_name::<CONSTRAINT>()
            ))
        }
    }
}

impl<CONSTRAINT: DecConstraint> Deref for ConstrainedDecimal<CONSTRAINT> {
    type Target = Decimal;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<CONSTRAINT: DecConstraint> Display for ConstrainedDecimal<CONSTRAINT> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<CONSTRAINT: DecConstraint> std::fmt::Debug for ConstrainedDecimal<CONSTRAINT> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.0, f)
    }
}

impl<CONSTRAINT: DecConstraint> PartialEq for ConstrainedDecimal<CONSTRAINT> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<CONSTRAINT: DecConstraint> Eq for ConstrainedDecimal<CONSTRAINT> {}

impl<CONSTRAINT: DecConstraint> Clone for ConstrainedDecimal<CONSTRAINT> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<CONSTRAINT: DecConstraint> Copy for ConstrainedDecimal<CONSTRAINT> {}

impl std::ops::Add for ConstrainedDecimal<GreaterEqualZero> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        // GEZ + GEZ will never violate its own constraint
        Self(self.0 + rhs.0, PhantomData)
    }
}

impl std::ops::AddAssign for ConstrainedDecimal<GreaterEqualZero> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for ConstrainedDecimal<GreaterEqualZero> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, d| acc + d)
    }
}

impl ConstrainedDecimal<GreaterEqualZero> {
    pub fn zero() -> Self {
        Self(Decimal::ZERO, PhantomData)
    }

    /// Always succeeds, by discarding the sign.
    pub fn from_abs(d: Decimal) -> Self {
        Self(d.abs(), PhantomData)
    }
}

impl Default for ConstrainedDecimal<GreaterEqualZero> {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::ops::Add for ConstrainedDecimal<LessEqualZero> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        // LEZ + LEZ will never violate its own constraint
        Self(self.0 + rhs.0, PhantomData)
    }
}

impl std::ops::AddAssign for ConstrainedDecimal<LessEqualZero> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for ConstrainedDecimal<LessEqualZero> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, d| acc + d)
    }
}

impl ConstrainedDecimal<LessEqualZero> {
    pub fn zero() -> Self {
        Self(Decimal::ZERO, PhantomData)
    }

    /// Always succeeds, by forcing the sign negative.
    pub fn from_neg_abs(d: Decimal) -> Self {
        Self(-d.abs(), PhantomData)
    }
}

impl Default for ConstrainedDecimal<LessEqualZero> {
    fn default() -> Self {
        Self::zero()
    }
}

// Convenience aliases
pub type LessEqualZeroDecimal = ConstrainedDecimal<constraint::LessEqualZero>;
pub type GreaterEqualZeroDecimal = ConstrainedDecimal<constraint::GreaterEqualZero>;

#[macro_export]
macro_rules! gezdec {
    ($arg:literal) => {{
        use rust_decimal_macros::dec;
        $crate::util::decimal::GreaterEqualZeroDecimal::try_from(dec!($arg)).unwrap()
    }};
}

#[macro_export]
macro_rules! lezdec {
    ($arg:literal) => {{
        use rust_decimal_macros::dec;
        $crate::util::decimal::LessEqualZeroDecimal::try_from(dec!($arg)).unwrap()
    }};
}
