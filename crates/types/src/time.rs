//! Wall-clock time values exchanged between the selector and its callers.
//!
//! A [`ClockTime`] is always in range: hours in `0..24`, minutes in `0..60`.
//! The canonical textual form is the zero-padded 24-hour `HH:MM`.

use std::{fmt, str::FromStr};

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Number of cells in the hour column.
pub const HOURS_PER_DAY: u8 = 24;
/// Number of cells in the minute column.
pub const MINUTES_PER_HOUR: u8 = 60;

/// Error returned by the strict `HH:MM` parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseTimeError {
    /// The input did not contain a `:` separator.
    #[error("expected HH:MM, found '{0}'")]
    MissingSeparator(String),
    /// One of the components was not an unsigned integer.
    #[error("invalid {component} component '{value}'")]
    InvalidNumber { component: &'static str, value: String },
    /// Hour outside `0..24`.
    #[error("hour {0} is out of range (0-23)")]
    HourOutOfRange(u32),
    /// Minute outside `0..60`.
    #[error("minute {0} is out of range (0-59)")]
    MinuteOutOfRange(u32),
}

/// An hour/minute pair on a 24-hour clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Midnight, the neutral value used when nothing else is known.
    pub const MIDNIGHT: ClockTime = ClockTime { hour: 0, minute: 0 };

    /// Builds a time, returning `None` when either component is out of range.
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < HOURS_PER_DAY && minute < MINUTES_PER_HOUR {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Parses a caller-supplied value into a selection.
    ///
    /// Empty, absent, or malformed values are treated as "unset".
    pub fn parse_selection(value: Option<&str>) -> Option<Self> {
        let raw = value.map(str::trim).filter(|raw| !raw.is_empty())?;
        match raw.parse::<ClockTime>() {
            Ok(time) => Some(time),
            Err(error) => {
                tracing::warn!(value = raw, %error, "ignoring malformed time value");
                None
            }
        }
    }
}

/// Splits `HH:MM` into its two raw numeric components.
///
/// Shared with the lenient minimum-time parser, which accepts components that
/// a [`ClockTime`] would reject.
pub(crate) fn split_components(input: &str) -> Result<(u32, u32), ParseTimeError> {
    let trimmed = input.trim();
    let (hour_text, minute_text) = trimmed
        .split_once(':')
        .ok_or_else(|| ParseTimeError::MissingSeparator(trimmed.to_string()))?;
    let hour = parse_component("hour", hour_text)?;
    let minute = parse_component("minute", minute_text)?;
    Ok((hour, minute))
}

fn parse_component(component: &'static str, text: &str) -> Result<u32, ParseTimeError> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ParseTimeError::InvalidNumber {
            component,
            value: text.to_string(),
        });
    }
    text.parse::<u32>().map_err(|_| ParseTimeError::InvalidNumber {
        component,
        value: text.to_string(),
    })
}

impl FromStr for ClockTime {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = split_components(s)?;
        if hour >= u32::from(HOURS_PER_DAY) {
            return Err(ParseTimeError::HourOutOfRange(hour));
        }
        if minute >= u32::from(MINUTES_PER_HOUR) {
            return Err(ParseTimeError::MinuteOutOfRange(minute));
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(value: NaiveTime) -> Self {
        // chrono guarantees hour < 24 and minute < 60.
        Self {
            hour: value.hour() as u8,
            minute: value.minute() as u8,
        }
    }
}

impl From<ClockTime> for NaiveTime {
    fn from(value: ClockTime) -> Self {
        NaiveTime::from_hms_opt(u32::from(value.hour), u32::from(value.minute), 0).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero_padded_twenty_four_hour() {
        let time = ClockTime::new(9, 5).expect("valid time");
        assert_eq!(time.to_string(), "09:05");
        let time = ClockTime::new(23, 59).expect("valid time");
        assert_eq!(time.to_string(), "23:59");
    }

    #[test]
    fn parse_inverts_format_for_every_valid_pair() {
        for hour in 0..HOURS_PER_DAY {
            for minute in 0..MINUTES_PER_HOUR {
                let time = ClockTime::new(hour, minute).expect("valid time");
                assert_eq!(time.to_string().parse::<ClockTime>(), Ok(time));
            }
        }
    }

    #[test]
    fn strict_parser_reports_the_failing_part() {
        assert_eq!(
            "0930".parse::<ClockTime>(),
            Err(ParseTimeError::MissingSeparator("0930".into()))
        );
        assert!(matches!(
            "ab:10".parse::<ClockTime>(),
            Err(ParseTimeError::InvalidNumber { component: "hour", .. })
        ));
        assert_eq!("24:00".parse::<ClockTime>(), Err(ParseTimeError::HourOutOfRange(24)));
        assert_eq!("10:60".parse::<ClockTime>(), Err(ParseTimeError::MinuteOutOfRange(60)));
    }

    #[test]
    fn soft_parsing_never_fails() {
        assert_eq!(ClockTime::parse_selection(None), None);
        assert_eq!(ClockTime::parse_selection(Some("garbage")), None);
        assert_eq!(ClockTime::parse_selection(Some("7:3")), ClockTime::new(7, 3));
        assert_eq!(ClockTime::parse_selection(Some("  ")), None);
        assert_eq!(ClockTime::parse_selection(Some("12:61")), None);
    }

    #[test]
    fn serializes_as_canonical_string() {
        let time = ClockTime::new(8, 0).unwrap();
        assert_eq!(serde_json::to_string(&time).unwrap(), "\"08:00\"");
        let parsed: ClockTime = serde_json::from_str("\"17:45\"").unwrap();
        assert_eq!(parsed, ClockTime::new(17, 45).unwrap());
        assert!(serde_json::from_str::<ClockTime>("\"99:00\"").is_err());
    }

    #[test]
    fn converts_to_and_from_chrono() {
        let naive = NaiveTime::from_hms_opt(14, 27, 59).unwrap();
        let time = ClockTime::from(naive);
        assert_eq!(time, ClockTime::new(14, 27).unwrap());
        assert_eq!(NaiveTime::from(time), NaiveTime::from_hms_opt(14, 27, 0).unwrap());
    }
}
