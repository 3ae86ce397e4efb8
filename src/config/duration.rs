//! Connection-timeout duration syntax.
//!
//! A duration is an optionally signed sequence of decimal numbers, each with
//! an optional fraction and a mandatory unit: `"300ms"`, `"-1.5h"`,
//! `"2h45m"`. Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`.
//! The bare string `"0"` is also accepted.
//!
//! Parsing keeps the sign separate from the magnitude so that callers can
//! reject negative values explicitly instead of having them fail inside
//! `std::time::Duration`.

use std::time::Duration;
use thiserror::Error;

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Largest magnitude representable, matching a signed 64-bit nanosecond count.
const MAX_NANOS: u64 = 1 << 63;

/// Errors produced by [`parse_duration`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("empty duration")]
    Empty,

    #[error("invalid duration syntax near {0:?}")]
    Syntax(String),

    #[error("missing unit in duration near {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {0:?} in duration")]
    UnknownUnit(String),

    #[error("duration out of range")]
    Overflow,

    /// Parsed fine but a negative value is not allowed in this position.
    #[error("duration must not be negative")]
    Negative,
}

/// A parsed duration with its sign kept apart from the magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignedDuration {
    negative: bool,
    magnitude: Duration,
}

impl SignedDuration {
    pub const ZERO: SignedDuration = SignedDuration {
        negative: false,
        magnitude: Duration::ZERO,
    };

    /// True only for a strictly negative value; `-0s` is not negative.
    pub fn is_negative(&self) -> bool {
        self.negative && !self.magnitude.is_zero()
    }

    /// True for a strictly positive value.
    pub fn is_positive(&self) -> bool {
        !self.negative && !self.magnitude.is_zero()
    }

    /// Magnitude of the duration, ignoring the sign.
    pub fn as_duration(&self) -> Duration {
        self.magnitude
    }
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3600 * NANOS_PER_SEC),
        _ => None,
    }
}

/// Split the leading run of ASCII digits off `s`.
fn take_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Parse a duration string such as `"30s"` or `"1m30s"`.
pub fn parse_duration(input: &str) -> Result<SignedDuration, DurationError> {
    let mut s = input;
    if s.is_empty() {
        return Err(DurationError::Empty);
    }

    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }

    if s == "0" {
        return Ok(SignedDuration { negative, magnitude: Duration::ZERO });
    }
    if s.is_empty() {
        return Err(DurationError::Syntax(input.to_string()));
    }

    let mut total: u64 = 0;
    while !s.is_empty() {
        let component = s;

        let (int_digits, rest) = take_digits(s);
        s = rest;
        let mut whole: u64 = 0;
        for d in int_digits.bytes() {
            whole = whole
                .checked_mul(10)
                .and_then(|v| v.checked_add(u64::from(d - b'0')))
                .ok_or(DurationError::Overflow)?;
        }

        // Fraction digits past what fits are dropped, they cannot change
        // the result at nanosecond precision.
        let mut frac: u64 = 0;
        let mut scale: u64 = 1;
        let mut has_frac = false;
        if let Some(rest) = s.strip_prefix('.') {
            let (frac_digits, rest) = take_digits(rest);
            s = rest;
            has_frac = !frac_digits.is_empty();
            for d in frac_digits.bytes() {
                if scale > u64::MAX / 100 {
                    break;
                }
                frac = frac * 10 + u64::from(d - b'0');
                scale *= 10;
            }
        }

        if int_digits.is_empty() && !has_frac {
            return Err(DurationError::Syntax(component.to_string()));
        }

        let unit_end = s
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        let (unit, rest) = s.split_at(unit_end);
        s = rest;
        if unit.is_empty() {
            return Err(DurationError::MissingUnit(component.to_string()));
        }
        let per_unit = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit(unit.to_string()))?;

        let mut nanos = whole.checked_mul(per_unit).ok_or(DurationError::Overflow)?;
        if frac > 0 {
            // frac < scale, so this is below per_unit and truncates like integer division.
            let frac_nanos = u128::from(frac) * u128::from(per_unit) / u128::from(scale);
            let frac_nanos = u64::try_from(frac_nanos).map_err(|_| DurationError::Overflow)?;
            nanos = nanos.checked_add(frac_nanos).ok_or(DurationError::Overflow)?;
        }
        total = total.checked_add(nanos).ok_or(DurationError::Overflow)?;
        if total > MAX_NANOS {
            return Err(DurationError::Overflow);
        }
    }

    if !negative && total == MAX_NANOS {
        return Err(DurationError::Overflow);
    }

    Ok(SignedDuration {
        negative,
        magnitude: Duration::from_nanos(total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: &str) -> Duration {
        parse_duration(s).unwrap().as_duration()
    }

    #[test]
    fn test_simple_units() {
        assert_eq!(secs("30s"), Duration::from_secs(30));
        assert_eq!(secs("250ms"), Duration::from_millis(250));
        assert_eq!(secs("15us"), Duration::from_micros(15));
        assert_eq!(secs("15µs"), Duration::from_micros(15));
        assert_eq!(secs("7ns"), Duration::from_nanos(7));
        assert_eq!(secs("2m"), Duration::from_secs(120));
        assert_eq!(secs("1h"), Duration::from_secs(3600));
    }

    #[test]
    fn test_compound_and_fractional() {
        assert_eq!(secs("1m30s"), Duration::from_secs(90));
        assert_eq!(secs("2h45m"), Duration::from_secs(2 * 3600 + 45 * 60));
        assert_eq!(secs("1.5h"), Duration::from_secs(5400));
        assert_eq!(secs(".5s"), Duration::from_millis(500));
        assert_eq!(secs("5.s"), Duration::from_secs(5));
        assert_eq!(secs("1.25s500ms"), Duration::from_millis(1750));
    }

    #[test]
    fn test_fraction_truncates_not_rounds() {
        assert_eq!(secs("1.999999999999999999s"), Duration::from_nanos(1_999_999_999));
        assert_eq!(secs("0.0000000019s"), Duration::from_nanos(1));
        assert_eq!(secs("1.0000000001h"), Duration::from_nanos(3_600_000_000_360));
    }

    #[test]
    fn test_sign_handling() {
        let d = parse_duration("-5s").unwrap();
        assert!(d.is_negative());
        assert!(!d.is_positive());
        assert_eq!(d.as_duration(), Duration::from_secs(5));

        let d = parse_duration("+5s").unwrap();
        assert!(d.is_positive());

        let d = parse_duration("-0s").unwrap();
        assert!(!d.is_negative());
        assert!(!d.is_positive());
    }

    #[test]
    fn test_bare_zero() {
        assert_eq!(parse_duration("0").unwrap(), SignedDuration::ZERO);
        assert!(!parse_duration("-0").unwrap().is_negative());
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_duration(""), Err(DurationError::Empty));
        assert!(matches!(parse_duration("-"), Err(DurationError::Syntax(_))));
        assert!(matches!(parse_duration("30"), Err(DurationError::MissingUnit(_))));
        assert!(matches!(parse_duration("s"), Err(DurationError::Syntax(_))));
        assert!(matches!(parse_duration("."), Err(DurationError::Syntax(_))));
        assert_eq!(parse_duration("3d"), Err(DurationError::UnknownUnit("d".into())));
        assert!(matches!(parse_duration("5 s"), Err(DurationError::UnknownUnit(_))));
        assert_eq!(parse_duration("9999999999999999999h"), Err(DurationError::Overflow));
        assert_eq!(parse_duration("3000000h"), Err(DurationError::Overflow));
    }
}
