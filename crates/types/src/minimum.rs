//! Inclusive lower bound applied to selectable times.
//!
//! The bound is trusted input: it is stored as given, so a bound whose hour is
//! past 23 simply leaves nothing selectable instead of being rejected.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::time::{ClockTime, HOURS_PER_DAY, MINUTES_PER_HOUR, split_components};

/// Minimum selectable time. The default `00:00` restricts nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MinimumTime {
    hour: u8,
    minute: u8,
}

impl MinimumTime {
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// Lenient parser: absent or malformed input restricts nothing.
    ///
    /// Components larger than `u8::MAX` saturate, which keeps the
    /// "nothing selectable" meaning of an oversized hour.
    pub fn parse(value: Option<&str>) -> Self {
        let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::default();
        };
        match split_components(raw) {
            Ok((hour, minute)) => Self {
                hour: u8::try_from(hour).unwrap_or(u8::MAX),
                minute: u8::try_from(minute).unwrap_or(u8::MAX),
            },
            Err(error) => {
                tracing::warn!(value = raw, %error, "ignoring malformed minimum time");
                Self::default()
            }
        }
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// True when the bound excludes nothing.
    pub const fn is_unrestricted(&self) -> bool {
        self.hour == 0 && self.minute == 0
    }

    /// An hour is disabled when it lies before the minimum hour.
    pub const fn is_hour_disabled(&self, hour: u8) -> bool {
        hour < self.hour
    }

    /// A minute is disabled when its hour is disabled, or when it lies before
    /// the minimum minute on the boundary hour.
    pub const fn is_minute_disabled(&self, hour: u8, minute: u8) -> bool {
        if hour < self.hour {
            return true;
        }
        hour == self.hour && minute < self.minute
    }

    pub const fn allows(&self, time: ClockTime) -> bool {
        !self.is_minute_disabled(time.hour(), time.minute())
    }

    /// First hour at or after the bound, if it exists on the clock.
    pub const fn first_allowed_hour(&self) -> Option<u8> {
        if self.hour < HOURS_PER_DAY { Some(self.hour) } else { None }
    }

    /// First selectable minute within `hour`.
    pub const fn first_allowed_minute(&self, hour: u8) -> Option<u8> {
        if hour < self.hour {
            return None;
        }
        if hour > self.hour {
            return Some(0);
        }
        if self.minute < MINUTES_PER_HOUR { Some(self.minute) } else { None }
    }

    /// Raises a candidate on the boundary hour up to the minimum minute.
    ///
    /// Returns `None` when the candidate cannot be made selectable by that
    /// clamp (its hour is disabled, or the bound lies past the end of the hour).
    pub fn clamp(&self, candidate: ClockTime) -> Option<ClockTime> {
        if self.allows(candidate) {
            return Some(candidate);
        }
        if candidate.hour() != self.hour {
            return None;
        }
        let minute = self.first_allowed_minute(candidate.hour())?;
        ClockTime::new(candidate.hour(), minute)
    }
}

impl From<ClockTime> for MinimumTime {
    fn from(value: ClockTime) -> Self {
        Self::new(value.hour(), value.minute())
    }
}

impl fmt::Display for MinimumTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for MinimumTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MinimumTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(Some(&raw)))
    }
}
