//! Arbitrary-precision integer and fixed-point decimal types.
//!
//! `Int` is a signed 256-bit integer and `Dec` a non-negative decimal with 18
//! fractional digits. Rounding follows the chain's legacy decimal rules
//! (round half to even when dropping precision) so results stay identical to
//! historical state.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use primitive_types::{U256, U512};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Number of fractional digits carried by [`Dec`].
pub const PRECISION: usize = 18;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("arithmetic overflow")]
    Overflow,

    #[error("division by zero")]
    DivisionByZero,

    #[error("negative result: {0}")]
    NegativeResult(String),

    #[error("invalid integer string: {0}")]
    InvalidInteger(String),

    #[error("invalid decimal string: {0}")]
    InvalidDecimal(String),
}

fn precision_multiplier() -> U256 {
    U256::exp10(PRECISION)
}

/// Signed 256-bit integer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Int {
    negative: bool,
    abs: U256,
}

impl Int {
    pub fn zero() -> Self {
        Int::default()
    }

    pub fn one() -> Self {
        Int::from(1u64)
    }

    fn from_parts(negative: bool, abs: U256) -> Self {
        Int {
            negative: negative && !abs.is_zero(),
            abs,
        }
    }

    /// A non-negative integer of magnitude `abs`.
    pub fn from_u256(abs: U256) -> Self {
        Int::from_parts(false, abs)
    }

    /// Magnitude without sign.
    pub fn abs(&self) -> U256 {
        self.abs
    }

    pub fn is_zero(&self) -> bool {
        self.abs.is_zero()
    }

    /// Strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        !self.negative && !self.abs.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Flips the sign; zero stays zero.
    pub fn neg(self) -> Self {
        Int::from_parts(!self.negative, self.abs)
    }

    /// Sum, failing on overflow of the magnitude.
    pub fn checked_add(self, other: Int) -> Result<Int, MathError> {
        if self.negative == other.negative {
            let abs = self.abs.checked_add(other.abs).ok_or(MathError::Overflow)?;
            return Ok(Int::from_parts(self.negative, abs));
        }
        if self.abs >= other.abs {
            Ok(Int::from_parts(self.negative, self.abs - other.abs))
        } else {
            Ok(Int::from_parts(other.negative, other.abs - self.abs))
        }
    }

    /// Difference; may be negative.
    pub fn checked_sub(self, other: Int) -> Result<Int, MathError> {
        self.checked_add(other.neg())
    }

    /// Product, failing on overflow.
    pub fn checked_mul(self, other: Int) -> Result<Int, MathError> {
        let abs = self.abs.checked_mul(other.abs).ok_or(MathError::Overflow)?;
        Ok(Int::from_parts(self.negative != other.negative, abs))
    }

    /// Quotient truncated toward zero.
    pub fn checked_quo(self, other: Int) -> Result<Int, MathError> {
        if other.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        Ok(Int::from_parts(self.negative != other.negative, self.abs / other.abs))
    }

    /// Euclidean modulus; the result is never negative.
    pub fn checked_mod(self, other: Int) -> Result<Int, MathError> {
        if other.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        let rem = self.abs % other.abs;
        if self.negative && !rem.is_zero() {
            Ok(Int::from_u256(other.abs - rem))
        } else {
            Ok(Int::from_u256(rem))
        }
    }

    /// Converts to a decimal; negative values are rejected.
    pub fn to_dec(&self) -> Result<Dec, MathError> {
        Dec::from_int(self)
    }
}

impl Ord for Int {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.abs.cmp(&other.abs),
            (true, true) => other.abs.cmp(&self.abs),
        }
    }
}

impl PartialOrd for Int {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<u64> for Int {
    fn from(v: u64) -> Self {
        Int::from_u256(U256::from(v))
    }
}

impl From<u128> for Int {
    fn from(v: u128) -> Self {
        Int::from_u256(U256::from(v))
    }
}

impl From<i64> for Int {
    fn from(v: i64) -> Self {
        Int::from_parts(v < 0, U256::from(v.unsigned_abs()))
    }
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}", self.abs)
    }
}

impl fmt::Debug for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Int({})", self)
    }
}

impl FromStr for Int {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MathError::InvalidInteger(s.to_string()));
        }
        let abs = U256::from_dec_str(digits).map_err(|_| MathError::InvalidInteger(s.to_string()))?;
        Ok(Int::from_parts(negative, abs))
    }
}

impl Serialize for Int {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Int {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Non-negative fixed-point decimal with [`PRECISION`] fractional digits.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Dec(U256);

impl Dec {
    pub fn zero() -> Self {
        Dec(U256::zero())
    }

    pub fn one() -> Self {
        Dec(precision_multiplier())
    }

    /// Builds a decimal from its scaled representation (`value * 10^18`).
    pub fn from_raw(raw: U256) -> Self {
        Dec(raw)
    }

    pub fn raw(&self) -> U256 {
        self.0
    }

    pub fn from_int(i: &Int) -> Result<Self, MathError> {
        if i.is_negative() {
            return Err(MathError::NegativeResult(i.to_string()));
        }
        i.abs()
            .checked_mul(precision_multiplier())
            .map(Dec)
            .ok_or(MathError::Overflow)
    }

    pub fn from_u64(v: u64) -> Self {
        Dec(U256::from(v) * precision_multiplier())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        !self.0.is_zero()
    }

    pub fn checked_add(self, other: Dec) -> Result<Dec, MathError> {
        self.0.checked_add(other.0).map(Dec).ok_or(MathError::Overflow)
    }

    pub fn checked_sub(self, other: Dec) -> Result<Dec, MathError> {
        self.0
            .checked_sub(other.0)
            .map(Dec)
            .ok_or_else(|| MathError::NegativeResult(format!("{} - {}", self, other)))
    }

    pub fn checked_mul(self, other: Dec) -> Result<Dec, MathError> {
        narrow(chop_precision_and_round(self.0.full_mul(other.0)))
    }

    /// Multiplies by an integer without any rounding.
    pub fn checked_mul_int(self, i: &Int) -> Result<Dec, MathError> {
        if i.is_negative() {
            return Err(MathError::NegativeResult(format!("{} * {}", self, i)));
        }
        self.0.checked_mul(i.abs()).map(Dec).ok_or(MathError::Overflow)
    }

    pub fn checked_quo(self, other: Dec) -> Result<Dec, MathError> {
        narrow(chop_precision_and_round(self.scaled_quo(other)?))
    }

    pub fn checked_quo_truncate(self, other: Dec) -> Result<Dec, MathError> {
        narrow(self.scaled_quo(other)? / U512::from(precision_multiplier()))
    }

    // (self * 10^36) / other, still carrying one extra factor of 10^18.
    fn scaled_quo(self, other: Dec) -> Result<U512, MathError> {
        if other.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        let squared = U512::from(precision_multiplier()) * U512::from(precision_multiplier());
        Ok(U512::from(self.0) * squared / U512::from(other.0))
    }

    /// Drops the fractional part.
    pub fn truncate_int(&self) -> Int {
        Int::from_u256(self.0 / precision_multiplier())
    }
}

fn narrow(v: U512) -> Result<Dec, MathError> {
    U256::try_from(v).map(Dec).map_err(|_| MathError::Overflow)
}

// Removes PRECISION digits, rounding half to even.
fn chop_precision_and_round(v: U512) -> U512 {
    let precision = U512::from(precision_multiplier());
    let (quo, rem) = v.div_mod(precision);
    if rem.is_zero() {
        return quo;
    }
    let half = precision / U512::from(2u8);
    match rem.cmp(&half) {
        Ordering::Less => quo,
        Ordering::Greater => quo + U512::one(),
        Ordering::Equal if quo.bit(0) => quo + U512::one(),
        Ordering::Equal => quo,
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (int, frac) = self.0.div_mod(precision_multiplier());
        write!(f, "{}.{:0>width$}", int, frac.to_string(), width = PRECISION)
    }
}

impl fmt::Debug for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dec({})", self)
    }
}

impl FromStr for Dec {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MathError::InvalidDecimal(s.to_string());
        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };
        let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if int_part.is_empty() || !all_digits(int_part) || !all_digits(frac_part) {
            return Err(invalid());
        }
        if s.contains('.') && frac_part.is_empty() {
            return Err(invalid());
        }
        if frac_part.len() > PRECISION {
            return Err(invalid());
        }

        let int = U256::from_dec_str(int_part).map_err(|_| invalid())?;
        let frac = if frac_part.is_empty() {
            U256::zero()
        } else {
            U256::from_dec_str(frac_part).map_err(|_| invalid())?
        };
        let raw = int
            .checked_mul(precision_multiplier())
            .and_then(|v| v.checked_add(frac * U256::exp10(PRECISION - frac_part.len())))
            .ok_or(MathError::Overflow)?;
        Ok(Dec(raw))
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Dec {
        s.parse().unwrap()
    }

    #[test]
    fn test_int_signed_arithmetic() {
        let a = Int::from(-7i64);
        let b = Int::from(10u64);
        assert_eq!(a.checked_add(b).unwrap(), Int::from(3u64));
        assert_eq!(a.checked_sub(b).unwrap(), Int::from(-17i64));
        assert_eq!(a.checked_mul(b).unwrap(), Int::from(-70i64));
        assert_eq!(a.checked_quo(Int::from(2u64)).unwrap(), Int::from(-3i64));
        assert_eq!(a.checked_mod(Int::from(3u64)).unwrap(), Int::from(2u64));
        assert!(Int::from(-1i64) < Int::zero());
        assert!(!Int::from(0i64).neg().is_negative());
    }

    #[test]
    fn test_int_parse_and_display() {
        assert_eq!("-42".parse::<Int>().unwrap(), Int::from(-42i64));
        assert_eq!(Int::from(-42i64).to_string(), "-42");
        assert!("".parse::<Int>().is_err());
        assert!("1e5".parse::<Int>().is_err());
        assert!("-".parse::<Int>().is_err());
    }

    #[test]
    fn test_int_overflow_and_zero_division() {
        let max = Int::from_u256(U256::MAX);
        assert_eq!(max.checked_add(Int::one()), Err(MathError::Overflow));
        assert_eq!(Int::one().checked_quo(Int::zero()), Err(MathError::DivisionByZero));
    }

    #[test]
    fn test_dec_display_and_parse() {
        assert_eq!(dec("0.5").to_string(), "0.500000000000000000");
        assert_eq!(dec("12").to_string(), "12.000000000000000000");
        assert_eq!(dec("0.334").raw(), U256::from(334u64) * U256::exp10(15));
        assert!("0.1234567890123456789".parse::<Dec>().is_err());
        assert!(".5".parse::<Dec>().is_err());
        assert!("1.".parse::<Dec>().is_err());
        assert!("-1".parse::<Dec>().is_err());
    }

    #[test]
    fn test_dec_mul_rounds_half_to_even() {
        // 0.000000000000000005 * 0.1 = 0.0000000000000000005 -> rounds to even (0)
        let tiny = Dec::from_raw(U256::from(5u8));
        assert_eq!(tiny.checked_mul(dec("0.1")).unwrap(), Dec::zero());
        // 0.000000000000000015 * 0.1 -> 0.0000000000000000015 -> rounds up to 2
        let odd = Dec::from_raw(U256::from(15u8));
        assert_eq!(odd.checked_mul(dec("0.1")).unwrap(), Dec::from_raw(U256::from(2u8)));
    }

    #[test]
    fn test_dec_quo_rounds_and_truncates() {
        let third = Dec::one().checked_quo(Dec::from_u64(3)).unwrap();
        assert_eq!(third.to_string(), "0.333333333333333333");
        let two_thirds = Dec::from_u64(2).checked_quo(Dec::from_u64(3)).unwrap();
        assert_eq!(two_thirds.to_string(), "0.666666666666666667");
        let truncated = Dec::from_u64(2).checked_quo_truncate(Dec::from_u64(3)).unwrap();
        assert_eq!(truncated.to_string(), "0.666666666666666666");
        assert_eq!(Dec::one().checked_quo(Dec::zero()), Err(MathError::DivisionByZero));
    }

    #[test]
    fn test_dec_mul_int_then_quo() {
        // 60 shares * 100 tokens / 100 shares
        let power = Dec::from_u64(60)
            .checked_mul_int(&Int::from(100u64))
            .unwrap()
            .checked_quo(Dec::from_u64(100))
            .unwrap();
        assert_eq!(power, Dec::from_u64(60));
        assert_eq!(dec("7.9").truncate_int(), Int::from(7u64));
    }

    #[test]
    fn test_dec_sub_below_zero_is_an_error() {
        assert!(matches!(
            Dec::one().checked_sub(Dec::from_u64(2)),
            Err(MathError::NegativeResult(_))
        ));
    }

    #[test]
    fn test_serde_as_strings() {
        let json = serde_json::to_string(&dec("0.25")).unwrap();
        assert_eq!(json, "\"0.250000000000000000\"");
        let back: Int = serde_json::from_str("\"-5\"").unwrap();
        assert_eq!(back, Int::from(-5i64));
    }
}
