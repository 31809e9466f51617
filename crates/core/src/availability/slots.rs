use chrono::NaiveDate;

use crate::{availability::taken::TakenSlots, models::opening_hours::OpeningHours};

/// Offered when a studio has never configured opening hours.
pub const FALLBACK_SLOTS: [&str; 9] = [
    "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00",
];

/// Generates the ordered `HH:00` slots still bookable on `date`.
///
/// Without opening hours the fixed [`FALLBACK_SLOTS`] list is returned and
/// `taken` is not applied to it. With opening hours, a missing or closed day
/// yields no slots; an open day yields one slot per whole hour from the
/// opening hour up to, but excluding, the closing hour. Minutes are dropped,
/// so `09:30`-`12:45` offers `09:00`, `10:00` and `11:00`.
///
/// Hours whose leading field is not a number produce no slots.
pub fn generate_slots(
    opening_hours: Option<&OpeningHours>,
    date: NaiveDate,
    taken: &TakenSlots,
) -> Vec<String> {
    let Some(hours) = opening_hours else {
        // taken slots are intentionally not filtered here
        return FALLBACK_SLOTS.iter().map(|slot| slot.to_string()).collect();
    };

    let Some(day) = hours.for_date(date).filter(|day| day.is_open) else {
        return Vec::new();
    };

    let (Some(open), Some(close)) = (leading_hour(&day.open), leading_hour(&day.close)) else {
        return Vec::new();
    };

    (open..close.min(24))
        .map(|hour| format!("{:02}:00", hour))
        .filter(|slot| !taken.contains(slot))
        .collect()
}

fn leading_hour(value: &str) -> Option<u32> {
    value.split(':').next()?.trim().parse().ok()
}

/// Slots plus the two flags the booking form uses to explain an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotAvailability {
    pub slots: Vec<String>,
    /// Nothing offered and nothing booked: the studio is not working that day.
    pub closed: bool,
    /// Nothing offered although bookings exist: every hour is taken.
    pub fully_booked: bool,
}

impl SlotAvailability {
    pub fn resolve(opening_hours: Option<&OpeningHours>, date: NaiveDate, taken: &TakenSlots) -> Self {
        let slots = generate_slots(opening_hours, date, taken);
        let empty = slots.is_empty();

        Self {
            slots,
            closed: empty && taken.is_empty(),
            fully_booked: empty && !taken.is_empty(),
        }
    }
}
