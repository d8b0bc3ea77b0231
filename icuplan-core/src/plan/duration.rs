//! Canonical values for step `distance` tokens.
//!
//! A token is one of `<float>km` (metres after conversion), `<int>m`
//! (minutes, converted to seconds), `<int>s` (seconds) or a bare integer.
//! The checks run in that order, so `10m` is always minutes and never a
//! distance.

use std::fmt;

use crate::error::UploadError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantity {
    Meters(f64),
    Seconds(i64),
}

impl Quantity {
    pub fn value(&self) -> f64 {
        match self {
            Quantity::Meters(m) => *m,
            Quantity::Seconds(s) => *s as f64,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Meters(m) => write!(f, "{} m", m),
            Quantity::Seconds(s) => write!(f, "{} s", s),
        }
    }
}

fn invalid(token: &str) -> UploadError {
    UploadError::Validation(format!("cannot parse duration token '{}'", token))
}

fn parse_int(digits: &str, token: &str) -> Result<i64, UploadError> {
    digits.trim().parse::<i64>().map_err(|_| invalid(token))
}

pub fn normalize_duration(token: &str) -> Result<Quantity, UploadError> {
    let trimmed = token.trim();

    if let Some(km) = trimmed.strip_suffix("km") {
        let km: f64 = km.trim().parse().map_err(|_| invalid(token))?;
        if !km.is_finite() {
            return Err(invalid(token));
        }
        return Ok(Quantity::Meters(km * 1000.0));
    }

    if trimmed.contains('m') {
        let minutes = parse_int(&trimmed.replace('m', ""), token)?;
        let seconds = minutes.checked_mul(60).ok_or_else(|| invalid(token))?;
        return Ok(Quantity::Seconds(seconds));
    }

    if trimmed.contains('s') {
        return Ok(Quantity::Seconds(parse_int(&trimmed.replace('s', ""), token)?));
    }

    Ok(Quantity::Seconds(parse_int(trimmed, token)?))
}
