use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::{TimeError, TimeResult};

/// Weekday keys in calendar order, as stored in `studios.opening_hours`.
pub const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

pub fn weekday_key(weekday: Weekday) -> &'static str {
    WEEKDAYS[weekday.num_days_from_monday() as usize]
}

/// One day of a studio's weekly schedule.
///
/// A closed day may be stored without `open`/`close`, so both default to
/// empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    #[serde(default)]
    pub open: String,
    #[serde(default)]
    pub close: String,
    #[serde(default)]
    pub is_open: bool,
}

impl DaySchedule {
    pub fn open(open: &str, close: &str) -> Self {
        Self {
            open: open.to_string(),
            close: close.to_string(),
            is_open: true,
        }
    }

    pub fn closed() -> Self {
        Self {
            open: String::new(),
            close: String::new(),
            is_open: false,
        }
    }
}

/// Weekly opening hours keyed by lowercase weekday name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpeningHours(BTreeMap<String, DaySchedule>);

impl OpeningHours {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_day(mut self, day: &str, schedule: DaySchedule) -> Self {
        self.0.insert(day.to_string(), schedule);
        self
    }

    /// The schedule new studios start from: weekdays 09:00-17:00, weekends
    /// pre-filled with 10:00-16:00 but closed.
    pub fn default_week() -> Self {
        let mut hours = Self::new();
        for day in &WEEKDAYS[..5] {
            hours = hours.with_day(day, DaySchedule::open("09:00", "17:00"));
        }
        for day in &WEEKDAYS[5..] {
            hours = hours.with_day(
                day,
                DaySchedule {
                    is_open: false,
                    ..DaySchedule::open("10:00", "16:00")
                },
            );
        }
        hours
    }

    pub fn get(&self, day: &str) -> Option<&DaySchedule> {
        self.0.get(day)
    }

    pub fn for_date(&self, date: NaiveDate) -> Option<&DaySchedule> {
        self.get(weekday_key(date.weekday()))
    }

    pub fn days(&self) -> impl Iterator<Item = (&str, &DaySchedule)> {
        self.0.iter().map(|(day, schedule)| (day.as_str(), schedule))
    }

    /// Checks hours submitted by a studio owner before they are stored.
    ///
    /// Closed days are accepted with any `open`/`close` contents.
    pub fn validate(&self) -> TimeResult<()> {
        for (day, schedule) in &self.0 {
            if !WEEKDAYS.contains(&day.as_str()) {
                return Err(TimeError::Validation(format!("Unknown weekday '{}'", day)));
            }
            if !schedule.is_open {
                continue;
            }

            let open = parse_clock(&schedule.open).ok_or_else(|| {
                TimeError::Validation(format!(
                    "Invalid opening time '{}' for {}, expected HH:MM",
                    schedule.open, day
                ))
            })?;
            let close = parse_clock(&schedule.close).ok_or_else(|| {
                TimeError::Validation(format!(
                    "Invalid closing time '{}' for {}, expected HH:MM",
                    schedule.close, day
                ))
            })?;

            if open >= close {
                return Err(TimeError::Validation(format!(
                    "Opening time must be before closing time on {}",
                    day
                )));
            }
        }
        Ok(())
    }
}

/// Parses a strict `HH:MM` clock value. `24:00` is accepted as end of day.
pub fn parse_clock(value: &str) -> Option<(u32, u32)> {
    let (hour, minute) = value.split_once(':')?;
    if hour.len() != 2 || minute.len() != 2 {
        return None;
    }
    if !hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    match (hour, minute) {
        (24, 0) => Some((24, 0)),
        (h, m) if h < 24 && m < 60 => Some((h, m)),
        _ => None,
    }
}
