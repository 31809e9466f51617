use chrono::{NaiveDate, NaiveDateTime};

use crate::models::opening_hours::OpeningHours;

/// Whether `date` cannot be picked in the booking calendar.
///
/// A date is compared by its midnight, so once `now` is past 00:00 the
/// current day is disabled as well. With opening hours, weekdays explicitly
/// marked closed are disabled; weekdays missing from the schedule are not.
pub fn is_date_disabled(
    date: NaiveDate,
    now: NaiveDateTime,
    opening_hours: Option<&OpeningHours>,
) -> bool {
    let started = date
        .and_hms_opt(0, 0, 0)
        .is_some_and(|midnight| midnight < now);
    if started {
        return true;
    }

    opening_hours
        .and_then(|hours| hours.for_date(date))
        .is_some_and(|day| !day.is_open)
}
