//! Signed time offsets and their `33s` / `-1.5m` / `2h45m` text form.

use serde::{Serialize, Serializer};

use std::fmt;
use std::str::FromStr;

use crate::{SpeedclipError, SpeedclipResult};

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SEC: u64 = 1_000_000_000;
const NANOS_PER_MIN: u64 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MIN;

/// A signed span of absolute time with nanosecond resolution.
///
/// Negative offsets count back from the end of a profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOffset(i64);

impl TimeOffset {
    pub const ZERO: Self = Self(0);

    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    pub const fn from_millis(millis: i64) -> Self {
        Self(millis.saturating_mul(NANOS_PER_MILLI as i64))
    }

    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl FromStr for TimeOffset {
    type Err = SpeedclipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_duration(s)
    }
}

impl Serialize for TimeOffset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl fmt::Display for TimeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            f.write_str("-")?;
        }
        let n = self.0.unsigned_abs();
        if n == 0 {
            return f.write_str("0s");
        }
        if n < NANOS_PER_MICRO {
            return write!(f, "{n}ns");
        }
        if n < NANOS_PER_MILLI {
            return write!(f, "{}us", decimal(n, NANOS_PER_MICRO));
        }
        if n < NANOS_PER_SEC {
            return write!(f, "{}ms", decimal(n, NANOS_PER_MILLI));
        }

        let hours = n / NANOS_PER_HOUR;
        let minutes = (n % NANOS_PER_HOUR) / NANOS_PER_MIN;
        let rest = n % NANOS_PER_MIN;
        if hours > 0 {
            write!(f, "{hours}h")?;
        }
        if hours > 0 || minutes > 0 {
            write!(f, "{minutes}m")?;
        }
        write!(f, "{}s", decimal(rest, NANOS_PER_SEC))
    }
}

fn decimal(value: u64, unit: u64) -> String {
    let whole = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return whole.to_string();
    }
    let width = unit.ilog10() as usize;
    let digits = format!("{frac:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

/// Parses a signed duration: an optional sign followed by one or more
/// `<number><unit>` groups, or a bare `0`.
///
/// Units: `ns`, `us` (`µs`), `ms`, `s`, `m`, `h`. Fractions below one
/// nanosecond are truncated.
pub fn parse_duration(input: &str) -> SpeedclipResult<TimeOffset> {
    let text = input.trim();
    let invalid = |why: &str| SpeedclipError::InvalidDuration(format!("{input:?}: {why}"));

    let (negative, mut rest) = match text.as_bytes().first().copied() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if rest == "0" {
        return Ok(TimeOffset::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid("empty duration"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let number = &rest[..number_end];
        rest = &rest[number_end..];

        let unit_end = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit = &rest[..unit_end];
        rest = &rest[unit_end..];

        if number.is_empty() {
            return Err(invalid("expected a number"));
        }
        let scale = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => NANOS_PER_MICRO,
            "ms" => NANOS_PER_MILLI,
            "s" => NANOS_PER_SEC,
            "m" => NANOS_PER_MIN,
            "h" => NANOS_PER_HOUR,
            "" => return Err(invalid("missing unit")),
            other => return Err(invalid(&format!("unknown unit {other:?}"))),
        };
        let nanos = group_nanos(number, u128::from(scale)).ok_or_else(|| invalid("bad number"))?;
        total = total
            .checked_add(nanos)
            .ok_or_else(|| invalid("out of range"))?;
    }

    let magnitude = i64::try_from(total).map_err(|_| invalid("out of range"))?;
    Ok(TimeOffset::from_nanos(if negative {
        -magnitude
    } else {
        magnitude
    }))
}

fn group_nanos(number: &str, scale: u128) -> Option<u128> {
    let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
    if frac.contains('.') || (whole.is_empty() && frac.is_empty()) {
        return None;
    }
    let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut nanos = whole.checked_mul(scale)?;

    // 18 digits keeps the numerator well inside u128 for any unit.
    let frac = &frac[..frac.len().min(18)];
    if !frac.is_empty() {
        let numerator: u128 = frac.parse().ok()?;
        let denominator = 10u128.pow(frac.len() as u32);
        nanos = nanos.checked_add(numerator * scale / denominator)?;
    }
    Some(nanos)
}
