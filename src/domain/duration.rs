//! Run length value object for capture sessions

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::DurationParseError;

/// Default length of a capture run (10 seconds)
pub const DEFAULT_DURATION_SECS: u64 = 10;

/// How long a capture run lasts. Always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration {
    milliseconds: u64,
}

impl Duration {
    pub const fn from_millis(ms: u64) -> Self {
        Self { milliseconds: ms }
    }

    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs * 1000,
        }
    }

    pub const fn default_duration() -> Self {
        Self::from_secs(DEFAULT_DURATION_SECS)
    }

    pub const fn as_secs(&self) -> u64 {
        self.milliseconds / 1000
    }

    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }
}

/// Multiplier for a unit suffix, in milliseconds
fn unit_millis(unit: &str) -> Option<u64> {
    match unit {
        "ms" => Some(1),
        "s" => Some(1_000),
        "m" => Some(60_000),
        _ => None,
    }
}

impl FromStr for Duration {
    type Err = DurationParseError;

    /// Accepts one or more `<number><unit>` groups with units `m`, `s`, `ms`
    /// in descending order, e.g. `30s`, `1m`, `2m30s`, `1s500ms`, `250ms`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DurationParseError {
            input: s.to_string(),
        };
        let input = s.trim().to_lowercase();
        let mut rest = input.as_str();
        let mut total: u64 = 0;
        let mut last_unit = u64::MAX;

        if rest.is_empty() {
            return Err(invalid());
        }

        while !rest.is_empty() {
            let digits = rest.find(|c: char| !c.is_ascii_digit()).ok_or_else(invalid)?;
            if digits == 0 {
                return Err(invalid());
            }
            let value: u64 = rest[..digits].parse().map_err(|_| invalid())?;
            rest = &rest[digits..];

            let unit_len = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
            let millis = unit_millis(&rest[..unit_len]).ok_or_else(invalid)?;
            if millis >= last_unit {
                return Err(invalid());
            }
            last_unit = millis;
            rest = &rest[unit_len..];

            total = value
                .checked_mul(millis)
                .and_then(|v| total.checked_add(v))
                .ok_or_else(invalid)?;
        }

        if total == 0 {
            return Err(invalid());
        }
        Ok(Self::from_millis(total))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.milliseconds / 60_000;
        let seconds = (self.milliseconds % 60_000) / 1000;
        let millis = self.milliseconds % 1000;

        let mut wrote = false;
        if minutes > 0 {
            write!(f, "{}m", minutes)?;
            wrote = true;
        }
        if seconds > 0 {
            write!(f, "{}s", seconds)?;
            wrote = true;
        }
        if millis > 0 || !wrote {
            write!(f, "{}ms", millis)?;
        }
        Ok(())
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::default_duration()
    }
}
