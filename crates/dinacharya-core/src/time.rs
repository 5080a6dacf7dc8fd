//! Clock-string helpers.
//!
//! Internally every instant is a count of minutes since midnight. Values may
//! run past 1440 while a day is being laid out; wrapping only happens when a
//! value is turned back into an `HH:MM` string.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TimeFormatError;

/// Minutes since midnight. Not wrapped, may exceed a day.
pub type Minutes = u32;

/// Minutes in one day.
pub const MINUTES_PER_DAY: Minutes = 24 * 60;

/// Parse an `HH:MM` string into minutes since midnight.
///
/// Only the shape is checked: `25:90` parses to 1590. Surrounding whitespace on
/// either component is ignored.
pub fn parse_clock(input: &str) -> Result<Minutes, TimeFormatError> {
    let mut parts = input.split(':');
    let (hours, minutes) = match (parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(m), None) => (h, m),
        _ => {
            return Err(TimeFormatError::MissingSeparator {
                input: input.to_string(),
            })
        }
    };

    let hours: Minutes = hours
        .trim()
        .parse()
        .map_err(|_| TimeFormatError::InvalidComponent {
            input: input.to_string(),
            component: "hour",
        })?;
    let minutes: Minutes = minutes
        .trim()
        .parse()
        .map_err(|_| TimeFormatError::InvalidComponent {
            input: input.to_string(),
            component: "minute",
        })?;

    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(|| TimeFormatError::InvalidComponent {
            input: input.to_string(),
            component: "hour",
        })
}

/// Format minutes as `HH:MM`, wrapping at midnight.
pub fn format_clock(minutes: Minutes) -> String {
    ClockTime::wrapping(minutes).to_string()
}

/// A wall-clock reading within one day, always in `[0, 1440)`.
///
/// Serialized as an `HH:MM` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(Minutes);

impl ClockTime {
    /// Build from a possibly out-of-range minute count.
    pub fn wrapping(minutes: Minutes) -> Self {
        Self(minutes % MINUTES_PER_DAY)
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> Minutes {
        self.0
    }

    /// Signed distance from `self` to `later`.
    ///
    /// Negative when `later` has wrapped past midnight.
    pub fn minutes_until(self, later: ClockTime) -> i64 {
        i64::from(later.0) - i64::from(self.0)
    }

    /// The reading `minutes` after this one, wrapped.
    pub fn plus(self, minutes: Minutes) -> Self {
        Self::wrapping(self.0 + minutes % MINUTES_PER_DAY)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl std::str::FromStr for ClockTime {
    type Err = TimeFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_clock(s).map(Self::wrapping)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = TimeFormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}
