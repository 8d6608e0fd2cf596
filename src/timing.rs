use crate::errors;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

pub const SECONDS_PER_DAY: u64 = 86_400;
pub const MINUTES_PER_DAY: u32 = 1_440;

lazy_static! {
    static ref INTERVAL_RE: Regex = Regex::new(r"^(\d+):(\d{1,2}):(\d{1,2})$").unwrap();
    static ref TIME_OF_DAY_RE: Regex = Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?$").unwrap();
}

/// Parses a `HH:MM:SS` polling interval into a strictly positive number of seconds.
///
/// # Errors
/// Returns `Error::InvalidCadence` when the text is malformed or the interval is zero.
///
/// # Examples
/// ```
/// use rowcast::timing::parse_interval;
/// assert_eq!(parse_interval("00:01:30").unwrap(), 90);
/// assert!(parse_interval("00:00:00").is_err());
/// ```
pub fn parse_interval(s: &str) -> Result<u64, errors::Error> {
    let trimmed = s.trim();
    let caps = INTERVAL_RE
        .captures(trimmed)
        .ok_or_else(|| err!(InvalidCadence, "Expected HH:MM:SS, got '{}'", trimmed))?;

    let field = |i: usize| -> Result<u64, errors::Error> {
        caps[i]
            .parse::<u64>()
            .map_err(|e| err!(InvalidCadence, "Invalid interval '{}': {}", trimmed, e))
    };
    let (hours, minutes, seconds) = (field(1)?, field(2)?, field(3)?);

    if minutes > 59 || seconds > 59 {
        return Err(err!(
            InvalidCadence,
            "Minutes and seconds must be below 60 in '{}'",
            trimmed
        ));
    }

    let total = hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes * 60 + seconds))
        .ok_or_else(|| err!(InvalidCadence, "Interval '{}' is too large", trimmed))?;

    if total == 0 {
        return Err(err!(
            InvalidCadence,
            "Polling interval must be greater than zero"
        ));
    }
    Ok(total)
}

/// Formats seconds back into `HH:MM:SS`.
pub fn format_interval(seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Result<Self, errors::Error> {
        if hour > 23 || minute > 59 {
            return Err(err!(InvalidTime, "{:02}:{:02} is not a time of day", hour, minute));
        }
        Ok(Self { hour, minute })
    }

    pub fn minutes(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }
}

impl FromStr for TimeOfDay {
    type Err = errors::Error;

    /// Accepts `HH:MM`, or `HH:MM:SS` with the seconds checked and then ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let caps = TIME_OF_DAY_RE
            .captures(trimmed)
            .ok_or_else(|| err!(InvalidTime, "Expected HH:MM, got '{}'", trimmed))?;
        let hour = caps[1]
            .parse::<u8>()
            .map_err(|e| err!(InvalidTime, "Invalid hour in '{}': {}", trimmed, e))?;
        let minute = caps[2]
            .parse::<u8>()
            .map_err(|e| err!(InvalidTime, "Invalid minute in '{}': {}", trimmed, e))?;
        if let Some(seconds) = caps.get(3) {
            let seconds = seconds
                .as_str()
                .parse::<u8>()
                .map_err(|e| err!(InvalidTime, "Invalid second in '{}': {}", trimmed, e))?;
            if seconds > 59 {
                return Err(err!(InvalidTime, "Invalid second in '{}'", trimmed));
            }
        }
        TimeOfDay::new(hour, minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// When agents are writing rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityWindow {
    AlwaysActive,
    /// `end` before `start` wraps past midnight; `start == end` is a full day.
    Between { start: TimeOfDay, end: TimeOfDay },
}

impl ActivityWindow {
    pub fn active_seconds_per_day(&self) -> u64 {
        match self {
            ActivityWindow::AlwaysActive => SECONDS_PER_DAY,
            ActivityWindow::Between { start, end } => {
                let mut diff = end.minutes() as i64 - start.minutes() as i64;
                if diff < 0 {
                    diff += MINUTES_PER_DAY as i64;
                }
                if diff == 0 {
                    diff = MINUTES_PER_DAY as i64;
                }
                diff as u64 * 60
            }
        }
    }

    pub fn active_hours_per_day(&self) -> f64 {
        self.active_seconds_per_day() as f64 / 3600.0
    }
}

impl fmt::Display for ActivityWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityWindow::AlwaysActive => write!(f, "always active"),
            ActivityWindow::Between { start, end } => write!(f, "{} - {}", start, end),
        }
    }
}
