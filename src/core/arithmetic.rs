//! Typed arithmetic helpers.
//!
//! Two entry points per operation family: an integer domain (`calculate`,
//! `apply_int`) and a floating-point domain (`calculate_float`,
//! `apply_float`). Each coerces its own operands, so `"10"` is parsed as an
//! integer by one and as a decimal by the other. Division by zero is checked
//! after coercion with exact equality in both domains.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::Serialize;

use crate::error::{Error, Result};

pub const ALLOWED_OPERATIONS: [&str; 4] = ["sum", "subtract", "multiply", "divide"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Sum,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Sum => "sum",
            Operator::Subtract => "subtract",
            Operator::Multiply => "multiply",
            Operator::Divide => "divide",
        }
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sum" => Ok(Operator::Sum),
            "subtract" => Ok(Operator::Subtract),
            "multiply" => Ok(Operator::Multiply),
            "divide" => Ok(Operator::Divide),
            other => Err(Error::arithmetic_unknown_operator(
                other,
                &ALLOWED_OPERATIONS,
            )),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An arithmetic input before domain coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Int(value)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Int(i64::from(value))
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Float(value)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Text(value.to_string())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Operand::Text(value)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Int(n) => write!(f, "{}", n),
            Operand::Float(n) => write!(f, "{}", n),
            Operand::Text(s) => f.write_str(s),
        }
    }
}

impl Operand {
    /// Coerce into the integer domain. Decimal values truncate toward zero.
    pub fn to_int(&self) -> Result<i64> {
        match self {
            Operand::Int(n) => Ok(*n),
            Operand::Float(n) => float_to_int(*n, &self.to_string()),
            Operand::Text(s) => {
                let trimmed = s.trim();
                if let Ok(n) = trimmed.parse::<i64>() {
                    return Ok(n);
                }
                match trimmed.parse::<f64>() {
                    Ok(n) => float_to_int(n, s),
                    Err(_) => Err(not_a_number(s, "integer")),
                }
            }
        }
    }

    /// Coerce into the floating-point domain.
    pub fn to_float(&self) -> Result<f64> {
        let value = match self {
            Operand::Int(n) => *n as f64,
            Operand::Float(n) => *n,
            Operand::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| not_a_number(s, "number"))?,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(not_a_number(&self.to_string(), "finite number"))
        }
    }
}

fn float_to_int(value: f64, raw: &str) -> Result<i64> {
    let truncated = value.trunc();
    if !truncated.is_finite() || truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
        return Err(not_a_number(raw, "integer"));
    }
    Ok(truncated as i64)
}

fn not_a_number(raw: &str, expected: &str) -> Error {
    Error::validation_invalid_argument(
        "operand",
        format!("'{}' is not a valid {}", raw, expected),
        Some(raw.to_string()),
        None,
    )
}

/// Result of an integer-domain operation.
///
/// Inexact division and overflow leave the integer domain and produce `Float`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(n) => *n as f64,
            Number::Float(n) => *n,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(n) => write!(f, "{}", n),
        }
    }
}

/// Integer-domain arithmetic on loosely typed operands.
pub fn calculate(
    a: impl Into<Operand>,
    b: impl Into<Operand>,
    operation: &str,
) -> Result<Number> {
    let a = a.into().to_int()?;
    let b = b.into().to_int()?;
    let operator: Operator = operation.parse()?;
    apply_int(a, b, operator)
}

/// Floating-point arithmetic on loosely typed operands.
pub fn calculate_float(
    a: impl Into<Operand>,
    b: impl Into<Operand>,
    operation: &str,
) -> Result<f64> {
    let a = a.into().to_float()?;
    let b = b.into().to_float()?;
    let operator: Operator = operation.parse()?;
    apply_float(a, b, operator)
}

pub fn apply_int(a: i64, b: i64, operator: Operator) -> Result<Number> {
    let widened = || (a as f64, b as f64);

    let result = match operator {
        Operator::Sum => a.checked_add(b).map(Number::Int).unwrap_or_else(|| {
            let (x, y) = widened();
            Number::Float(x + y)
        }),
        Operator::Subtract => a.checked_sub(b).map(Number::Int).unwrap_or_else(|| {
            let (x, y) = widened();
            Number::Float(x - y)
        }),
        Operator::Multiply => a.checked_mul(b).map(Number::Int).unwrap_or_else(|| {
            let (x, y) = widened();
            Number::Float(x * y)
        }),
        Operator::Divide => {
            if b == 0 {
                return Err(Error::arithmetic_division_by_zero(a, b));
            }
            match (a.checked_rem(b), a.checked_div(b)) {
                (Some(0), Some(quotient)) => Number::Int(quotient),
                _ => {
                    let (x, y) = widened();
                    Number::Float(x / y)
                }
            }
        }
    };

    Ok(result)
}

pub fn apply_float(a: f64, b: f64, operator: Operator) -> Result<f64> {
    match operator {
        Operator::Sum => Ok(a + b),
        Operator::Subtract => Ok(a - b),
        Operator::Multiply => Ok(a * b),
        Operator::Divide => {
            if b == 0.0 {
                return Err(Error::arithmetic_division_by_zero(a, b));
            }
            Ok(a / b)
        }
    }
}

/// `amount * percent / 100`, no domain checks.
pub fn percentage(amount: f64, percent: f64) -> f64 {
    amount * percent / 100.0
}

/// Commission on `amount`, optionally rounded half away from zero.
pub fn commission(amount: f64, percent: f64, precision: Option<u32>) -> f64 {
    let value = percentage(amount, percent);
    match precision {
        Some(digits) => round_to(value, digits),
        None => value,
    }
}

/// Round half away from zero to `digits` decimal places.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// Format with a fixed number of decimals and a thousands separator.
pub fn format_number(number: f64, decimals: u32, dec_point: &str, thousands_sep: &str) -> String {
    let rounded = round_to(number, decimals);
    let formatted = format!("{:.*}", decimals as usize, rounded.abs());

    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::new();
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(thousands_sep);
        }
        grouped.push(*digit);
    }

    let mut out = String::new();
    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    if rounded < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push_str(dec_point);
        out.push_str(frac);
    }
    out
}

/// Uniform integer in `[min, max]`.
pub fn random_int(min: i64, max: i64) -> Result<i64> {
    if min > max {
        return Err(Error::validation_invalid_argument(
            "range",
            format!("min ({}) must not exceed max ({})", min, max),
            None,
            None,
        ));
    }
    Ok(rand::rng().random_range(min..=max))
}

/// Uniform float between `min` and `max`.
pub fn random_float(min: f64, max: f64) -> f64 {
    let unit: f64 = rand::rng().random();
    min + unit * (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn calculate_basic_operations() {
        assert_eq!(calculate(5, 3, "sum").unwrap(), Number::Int(8));
        assert_eq!(calculate(5, 3, "subtract").unwrap(), Number::Int(2));
        assert_eq!(calculate(5, 3, "multiply").unwrap(), Number::Int(15));
        assert_eq!(calculate(10, 2, "divide").unwrap(), Number::Int(5));
    }

    #[test]
    fn calculate_divide_by_zero_fails() {
        let err = calculate(10, 0, "divide").unwrap_err();
        assert_eq!(err.code, ErrorCode::ArithmeticDivisionByZero);
        assert_eq!(err.message, "Division by zero is not allowed.");
    }

    #[test]
    fn calculate_unknown_operator_fails() {
        let err = calculate(10, 5, "invalid").unwrap_err();
        assert_eq!(err.code, ErrorCode::ArithmeticUnknownOperator);
        assert_eq!(err.details["operator"], "invalid");
        assert_eq!(err.details["allowed"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn integer_domain_parses_text() {
        assert_eq!(calculate("10", "3", "sum").unwrap(), Number::Int(13));
        assert_eq!(calculate(" 7 ", "2.9", "multiply").unwrap(), Number::Int(14));
    }

    #[test]
    fn float_domain_parses_text_as_decimal() {
        assert_eq!(calculate_float("10", "4", "divide").unwrap(), 2.5);
        assert_eq!(calculate_float("1.5", "2.5", "sum").unwrap(), 4.0);
    }

    #[test]
    fn zero_check_happens_after_coercion() {
        let err = calculate(10, "0.4", "divide").unwrap_err();
        assert_eq!(err.code, ErrorCode::ArithmeticDivisionByZero);

        assert!(calculate_float(10, "0.4", "divide").is_ok());
        let err = calculate_float(1.0, -0.0, "divide").unwrap_err();
        assert_eq!(err.code, ErrorCode::ArithmeticDivisionByZero);
    }

    #[test]
    fn inexact_integer_division_becomes_float() {
        match calculate(10, 4, "divide").unwrap() {
            Number::Float(n) => assert_eq!(n, 2.5),
            other => panic!("expected float, got {:?}", other),
        }
    }

    #[test]
    fn overflow_promotes_to_float() {
        let result = apply_int(i64::MAX, 1, Operator::Sum).unwrap();
        assert!(matches!(result, Number::Float(_)));
        let result = apply_int(i64::MIN, -1, Operator::Divide).unwrap();
        assert!(matches!(result, Number::Float(_)));
    }

    #[test]
    fn garbage_text_is_invalid_argument() {
        let err = calculate("ten", 1, "sum").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationInvalidArgument);
        let err = calculate_float("NaN", 1, "sum").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationInvalidArgument);
    }

    #[test]
    fn percentage_and_commission() {
        assert_eq!(percentage(1000.0, 25.0), 250.0);
        assert_eq!(commission(1000.0, 15.0, None), 150.0);
        assert_eq!(commission(10.0, 33.333, Some(2)), 3.33);
    }

    #[test]
    fn format_number_groups_thousands() {
        assert_eq!(format_number(1234567.891, 2, ".", ","), "1,234,567.89");
        assert_eq!(format_number(-1234.5, 0, ".", " "), "-1 235");
        assert_eq!(format_number(999.999, 2, ",", "."), "1.000,00");
        assert_eq!(format_number(-0.001, 2, ".", ","), "0.00");
    }

    #[test]
    fn random_int_respects_bounds() {
        for _ in 0..100 {
            let n = random_int(-3, 3).unwrap();
            assert!((-3..=3).contains(&n));
        }
        assert!(random_int(5, 1).is_err());
        assert_eq!(random_int(4, 4).unwrap(), 4);
    }

    #[test]
    fn random_float_respects_bounds() {
        for _ in 0..100 {
            let n = random_float(1.0, 2.0);
            assert!((1.0..=2.0).contains(&n));
        }
    }
}
