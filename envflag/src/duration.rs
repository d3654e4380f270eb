/*!
A signed span of time with a compact textual syntax, like `1h30m` or `-1.5s`.
*/

use core::fmt::{self, Display, Write as _};
use core::str::FromStr;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

const UNITS: &[(&str, u64)] = &[
    ("ns", NANOSECOND),
    ("us", MICROSECOND),
    ("µs", MICROSECOND), // U+00B5 micro sign
    ("μs", MICROSECOND), // U+03BC greek small letter mu
    ("ms", MILLISECOND),
    ("s", SECOND),
    ("m", MINUTE),
    ("h", HOUR),
];

/**
A signed count of nanoseconds.

Unlike [`std::time::Duration`], this can be negative, which matters for
settings like clock offsets. Use [`to_std`][Duration::to_std] to get a
standard duration for sleeping or timeouts.

Durations parse from a sequence of decimal numbers, each with an optional
fraction and a mandatory unit suffix (`ns`, `us`/`µs`, `ms`, `s`, `m`, `h`),
optionally preceded by a sign. `0` needs no unit.

```
use envflag::Duration;

let duration: Duration = "1h30m".parse().unwrap();
assert_eq!(duration, Duration::from_mins(90));
assert_eq!(duration.to_string(), "1h30m0s");
```
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration {
    nanos: i64,
}

/// The `from_*` constructors saturate at the bounds of an `i64` count of
/// nanoseconds.
impl Duration {
    pub const ZERO: Self = Self { nanos: 0 };

    #[inline]
    #[must_use]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self { nanos }
    }

    #[inline]
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self::from_nanos(millis.saturating_mul(MILLISECOND as i64))
    }

    #[inline]
    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Self::from_nanos(secs.saturating_mul(SECOND as i64))
    }

    #[inline]
    #[must_use]
    pub const fn from_mins(mins: i64) -> Self {
        Self::from_nanos(mins.saturating_mul(MINUTE as i64))
    }

    #[inline]
    #[must_use]
    pub const fn from_hours(hours: i64) -> Self {
        Self::from_nanos(hours.saturating_mul(HOUR as i64))
    }

    #[inline]
    #[must_use]
    pub const fn as_nanos(&self) -> i64 {
        self.nanos
    }

    #[inline]
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.nanos < 0
    }

    /// Convert to a [`std::time::Duration`]. Returns `None` if this span is
    /// negative.
    #[must_use]
    pub fn to_std(&self) -> Option<std::time::Duration> {
        u64::try_from(self.nanos)
            .ok()
            .map(std::time::Duration::from_nanos)
    }
}

impl TryFrom<std::time::Duration> for Duration {
    type Error = ParseDurationError;

    fn try_from(duration: std::time::Duration) -> Result<Self, Self::Error> {
        i64::try_from(duration.as_nanos())
            .map(Self::from_nanos)
            .map_err(|_| ParseDurationError::Overflow(format!("{duration:?}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseDurationError {
    #[error("empty duration")]
    Empty,

    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {text:?}")]
    UnknownUnit { unit: String, text: String },

    #[error("duration {0:?} is out of range")]
    Overflow(String),
}

/// Split a leading run of ASCII digits off of `s`, returning the value (or
/// `None` on overflow), the number of digits consumed, and the rest.
fn leading_int(s: &str) -> (Option<u64>, usize, &str) {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();

    let value = s[..digits].bytes().try_fold(0u64, |value, digit| {
        value
            .checked_mul(10)
            .and_then(|value| value.checked_add(u64::from(digit - b'0')))
    });

    (value, digits, &s[digits..])
}

/// Split a leading fraction off of `s` (the digits after a decimal point).
/// Returns the fraction as `value / scale`, the number of digits consumed, and
/// the rest. Digits beyond what fits in a `u64` are dropped from the value.
fn leading_fraction(s: &str) -> (u64, f64, usize, &str) {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value = 0u64;
    let mut scale = 1.0;
    let mut overflowed = false;

    for digit in s[..digits].bytes() {
        if overflowed {
            continue;
        }

        match value
            .checked_mul(10)
            .and_then(|value| value.checked_add(u64::from(digit - b'0')))
        {
            Some(next) => {
                value = next;
                scale *= 10.0;
            }
            None => overflowed = true,
        }
    }

    (value, scale, digits, &s[digits..])
}

impl FromStr for Duration {
    type Err = ParseDurationError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseDurationError::Invalid(text.to_owned());
        let overflow = || ParseDurationError::Overflow(text.to_owned());

        let (negative, mut s) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            Some(_) => (false, text),
            None => return Err(ParseDurationError::Empty),
        };

        match s {
            "0" => return Ok(Self::ZERO),
            "" => return Err(invalid()),
            _ => {}
        }

        let mut total: u64 = 0;

        while !s.is_empty() {
            if !s.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
                return Err(invalid());
            }

            let (whole, whole_digits, rest) = leading_int(s);
            let whole = whole.ok_or_else(overflow)?;
            s = rest;

            let (fraction, scale, fraction_digits) = match s.strip_prefix('.') {
                Some(rest) => {
                    let (fraction, scale, digits, rest) = leading_fraction(rest);
                    s = rest;
                    (fraction, scale, digits)
                }
                None => (0, 1.0, 0),
            };

            if whole_digits == 0 && fraction_digits == 0 {
                return Err(invalid());
            }

            let unit_len = s
                .find(|c: char| c == '.' || c.is_ascii_digit())
                .unwrap_or(s.len());

            if unit_len == 0 {
                return Err(ParseDurationError::MissingUnit(text.to_owned()));
            }

            let (unit, rest) = s.split_at(unit_len);
            s = rest;

            let &(_, unit) = UNITS
                .iter()
                .find(|&&(name, _)| name == unit)
                .ok_or_else(|| ParseDurationError::UnknownUnit {
                    unit: unit.to_owned(),
                    text: text.to_owned(),
                })?;

            let mut value = whole.checked_mul(unit).ok_or_else(overflow)?;

            if fraction > 0 {
                let fractional = (fraction as f64 * (unit as f64 / scale)) as u64;
                value = value.checked_add(fractional).ok_or_else(overflow)?;
            }

            total = total.checked_add(value).ok_or_else(overflow)?;
        }

        let nanos = match negative {
            true => 0i64.checked_sub_unsigned(total),
            false => i64::try_from(total).ok(),
        };

        nanos.map(Self::from_nanos).ok_or_else(overflow)
    }
}

/// Write the `prec` low digits of `value` as a decimal fraction, with trailing
/// zeros removed. Writes nothing at all if those digits are all zero.
fn write_fraction(out: &mut impl fmt::Write, value: u64, prec: u32) -> fmt::Result {
    let fraction = value % 10u64.pow(prec);

    if fraction == 0 {
        return Ok(());
    }

    let digits = format!("{fraction:0width$}", width = prec as usize);
    write!(out, ".{}", digits.trim_end_matches('0'))
}

impl Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        let nanos = self.nanos.unsigned_abs();

        if self.nanos < 0 {
            out.push('-');
        }

        if nanos < SECOND {
            let (unit, prec, whole) = match nanos {
                0 => return f.pad("0s"),
                n if n < MICROSECOND => ("ns", 0, n),
                n if n < MILLISECOND => ("µs", 3, n / MICROSECOND),
                n => ("ms", 6, n / MILLISECOND),
            };

            write!(out, "{whole}")?;
            if prec > 0 {
                write_fraction(&mut out, nanos, prec)?;
            }
            out.push_str(unit);
        } else {
            let secs = nanos / SECOND;
            let (hours, mins, secs) = (secs / 3600, (secs / 60) % 60, secs % 60);

            if hours > 0 {
                write!(out, "{hours}h{mins}m")?;
            } else if mins > 0 {
                write!(out, "{mins}m")?;
            }

            write!(out, "{secs}")?;
            write_fraction(&mut out, nanos, 9)?;
            out.push('s');
        }

        f.pad(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Duration, ParseDurationError> {
        text.parse()
    }

    #[test]
    fn parse_simple() {
        assert_eq!(parse("0"), Ok(Duration::ZERO));
        assert_eq!(parse("5s"), Ok(Duration::from_secs(5)));
        assert_eq!(parse("300ms"), Ok(Duration::from_millis(300)));
        assert_eq!(parse("1h"), Ok(Duration::from_hours(1)));
        assert_eq!(parse("12ns"), Ok(Duration::from_nanos(12)));
        assert_eq!(parse("7us"), Ok(Duration::from_nanos(7_000)));
        assert_eq!(parse("7µs"), Ok(Duration::from_nanos(7_000)));
        assert_eq!(parse("7μs"), Ok(Duration::from_nanos(7_000)));
    }

    #[test]
    fn parse_compound() {
        assert_eq!(parse("1h30m"), Ok(Duration::from_mins(90)));
        assert_eq!(
            parse("1h2m3s4ms"),
            Ok(Duration::from_millis(3_723_004))
        );
        assert_eq!(parse("+2m"), Ok(Duration::from_mins(2)));
    }

    #[test]
    fn parse_fractions_and_signs() {
        assert_eq!(parse("1.5h"), Ok(Duration::from_mins(90)));
        assert_eq!(parse(".5s"), Ok(Duration::from_millis(500)));
        assert_eq!(parse("1.s"), Ok(Duration::from_secs(1)));
        assert_eq!(parse("-1.5s"), Ok(Duration::from_millis(-1500)));
        assert_eq!(parse("-0"), Ok(Duration::ZERO));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(parse(""), Err(ParseDurationError::Empty));
        assert_eq!(parse("-"), Err(ParseDurationError::Invalid("-".into())));
        assert_eq!(parse("."), Err(ParseDurationError::Invalid(".".into())));
        assert_eq!(parse("s"), Err(ParseDurationError::Invalid("s".into())));
        assert_eq!(parse("1"), Err(ParseDurationError::MissingUnit("1".into())));
        assert_eq!(
            parse("3x"),
            Err(ParseDurationError::UnknownUnit {
                unit: "x".into(),
                text: "3x".into()
            })
        );
        assert_eq!(
            parse("1h 30m"),
            Err(ParseDurationError::UnknownUnit {
                unit: "h ".into(),
                text: "1h 30m".into()
            })
        );
    }

    #[test]
    fn parse_range() {
        assert_eq!(
            parse("9223372036854775807ns"),
            Ok(Duration::from_nanos(i64::MAX))
        );
        assert_eq!(
            parse("-9223372036854775808ns"),
            Ok(Duration::from_nanos(i64::MIN))
        );
        assert!(matches!(
            parse("9223372036854775808ns"),
            Err(ParseDurationError::Overflow(_))
        ));
        assert!(matches!(
            parse("3000000h"),
            Err(ParseDurationError::Overflow(_))
        ));
    }

    #[test]
    fn display() {
        let cases = [
            (Duration::ZERO, "0s"),
            (Duration::from_nanos(1), "1ns"),
            (Duration::from_nanos(1_100), "1.1µs"),
            (Duration::from_nanos(2_200_000), "2.2ms"),
            (Duration::from_millis(3_300), "3.3s"),
            (Duration::from_secs(4 * 60 + 5), "4m5s"),
            (Duration::from_mins(90), "1h30m0s"),
            (Duration::from_hours(1), "1h0m0s"),
            (Duration::from_nanos(-1_500_000_000), "-1.5s"),
            (Duration::from_nanos(i64::MIN), "-2562047h47m16.854775808s"),
        ];

        for (duration, expected) in cases {
            assert_eq!(duration.to_string(), expected);
        }
    }

    #[test]
    fn display_then_parse() {
        for text in ["1h30m0s", "2.2ms", "-4m5s", "1.000000001s"] {
            assert_eq!(parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn constructors_saturate() {
        assert_eq!(Duration::from_hours(i64::MAX).as_nanos(), i64::MAX);
        assert_eq!(Duration::from_secs(i64::MIN).as_nanos(), i64::MIN);
        assert_eq!(Duration::from_millis(-2).as_nanos(), -2_000_000);
    }

    #[test]
    fn std_conversion() {
        assert_eq!(
            Duration::from_secs(3).to_std(),
            Some(std::time::Duration::from_secs(3))
        );
        assert_eq!(Duration::from_secs(-3).to_std(), None);
        assert_eq!(
            Duration::try_from(std::time::Duration::from_millis(5)),
            Ok(Duration::from_millis(5))
        );
        assert!(Duration::try_from(std::time::Duration::MAX).is_err());
    }
}
