//! Opening hours parsed from catalogue `timeRange` strings.
//!
//! Two shapes are recognised: the literal `Open 24 hours` and a daily window
//! such as `8:00 AM - 5:00 PM`. Windows are compared in minutes after
//! midnight with inclusive bounds; a window whose end precedes its start
//! never matches.

use chrono::{NaiveTime, Timelike};
use log::warn;
use thiserror::Error;

use crate::Location;

const OPEN_24_HOURS: &str = "Open 24 hours";
const MINUTES_PER_HOUR: u16 = 60;

/// Errors returned by [`OpeningHours::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpeningHoursError {
    /// The range did not contain a `start - end` separator.
    #[error("opening hours '{input}' are not of the form 'H:MM AM - H:MM PM'")]
    MissingSeparator {
        /// The rejected input.
        input: String,
    },
    /// One side of the range was not a valid `H:MM AM|PM` time.
    #[error("invalid time '{time}' in opening hours")]
    InvalidTime {
        /// The rejected time.
        time: String,
    },
}

/// When a destination is open.
///
/// # Examples
/// ```
/// use chrono::NaiveTime;
/// use itinera_core::OpeningHours;
///
/// let hours = OpeningHours::parse("8:00 AM - 5:00 PM")?;
/// let noon = NaiveTime::from_hms_opt(12, 0, 0).expect("valid time");
/// assert!(hours.is_open_at(noon));
/// assert!(OpeningHours::parse("Open 24 hours")?.is_open_at(noon));
/// # Ok::<(), itinera_core::OpeningHoursError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpeningHours {
    /// Open around the clock.
    AlwaysOpen,
    /// Open daily between two times, in minutes after midnight.
    Daily {
        /// Opening minute.
        opens: u16,
        /// Closing minute, inclusive.
        closes: u16,
    },
}

impl OpeningHours {
    /// Parse a catalogue `timeRange` string.
    ///
    /// # Errors
    ///
    /// Returns [`OpeningHoursError`] when the input is neither
    /// `Open 24 hours` nor a `H:MM AM - H:MM PM` window.
    pub fn parse(input: &str) -> Result<Self, OpeningHoursError> {
        let trimmed = input.trim();
        if trimmed == OPEN_24_HOURS {
            return Ok(Self::AlwaysOpen);
        }
        let (start, end) =
            trimmed
                .split_once(" - ")
                .ok_or_else(|| OpeningHoursError::MissingSeparator {
                    input: input.to_owned(),
                })?;
        Ok(Self::Daily {
            opens: parse_clock_time(start)?,
            closes: parse_clock_time(end)?,
        })
    }

    /// Whether the destination is open at `time`.
    #[must_use]
    pub fn is_open_at(&self, time: NaiveTime) -> bool {
        match *self {
            Self::AlwaysOpen => true,
            Self::Daily { opens, closes } => {
                let minute = minute_of_day(time);
                opens <= minute && minute <= closes
            }
        }
    }
}

/// Parse `H:MM AM` or `H:MM PM` into minutes after midnight.
///
/// `12 AM` is midnight and `12 PM` is noon.
fn parse_clock_time(time: &str) -> Result<u16, OpeningHoursError> {
    let invalid = || OpeningHoursError::InvalidTime {
        time: time.trim().to_owned(),
    };
    let (clock, period) = time.trim().split_once(' ').ok_or_else(invalid)?;
    let (hours, minutes) = clock.split_once(':').ok_or_else(invalid)?;
    let hours: u16 = hours.parse().map_err(|_| invalid())?;
    let minutes: u16 = minutes.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&hours) || minutes >= MINUTES_PER_HOUR {
        return Err(invalid());
    }
    let hours = match (period.trim(), hours) {
        ("AM", 12) => 0,
        ("AM", h) => h,
        ("PM", 12) => 12,
        ("PM", h) => h + 12,
        _ => return Err(invalid()),
    };
    Ok(hours * MINUTES_PER_HOUR + minutes)
}

fn minute_of_day(time: NaiveTime) -> u16 {
    // At most 1439.
    u16::try_from(time.hour() * 60 + time.minute()).unwrap_or(u16::MAX)
}

/// Whether the location is open at `time`.
///
/// Locations without hours, or with hours that fail to parse, count as
/// closed; the parse failure is logged.
#[must_use]
pub fn is_open(location: &Location, time: NaiveTime) -> bool {
    let Some(range) = location.time_range.as_deref() else {
        return false;
    };
    match OpeningHours::parse(range) {
        Ok(hours) => hours.is_open_at(time),
        Err(err) => {
            warn!("treating '{}' as closed: {err}", location.title);
            false
        }
    }
}

/// Order locations so that those open at `time` come first.
///
/// The sort is stable: relative order inside the open and closed groups is
/// preserved.
#[must_use]
pub fn order_by_open_status(locations: &[Location], time: NaiveTime) -> Vec<Location> {
    let mut ranked: Vec<(bool, &Location)> = locations
        .iter()
        .map(|location| (is_open(location, time), location))
        .collect();
    ranked.sort_by_key(|(open, _)| !*open);
    ranked.into_iter().map(|(_, location)| location.clone()).collect()
}
