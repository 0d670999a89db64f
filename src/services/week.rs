//! Week partition-key computation. A selection cycle is identified by the ISO
//! date of its Saturday: the upcoming Saturday, or today when today already is
//! Saturday. Computed in UTC so every client agrees on the key.

use time::{Date, Duration, OffsetDateTime};

/// Partition key for the current selection cycle (`YYYY-MM-DD`).
pub fn current_week() -> String {
    week_key(OffsetDateTime::now_utc().date())
}

/// Partition key for the cycle containing `today`.
pub fn week_key(today: Date) -> String {
    let saturday = saturday_of(today);
    format!(
        "{:04}-{:02}-{:02}",
        saturday.year(),
        u8::from(saturday.month()),
        saturday.day()
    )
}

/// The Saturday ending the week `today` belongs to (Sunday starts the week).
fn saturday_of(today: Date) -> Date {
    let days_ahead = 6 - i64::from(today.weekday().number_days_from_sunday());
    today.saturating_add(Duration::days(days_ahead))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn saturday_maps_to_itself() {
        assert_eq!(week_key(date!(2026 - 08 - 08)), "2026-08-08");
    }

    #[test]
    fn sunday_maps_to_the_next_saturday() {
        // The Sunday right after a Saturday belongs to the following cycle.
        assert_eq!(week_key(date!(2026 - 08 - 09)), "2026-08-15");
    }

    #[test]
    fn midweek_maps_to_the_upcoming_saturday() {
        assert_eq!(week_key(date!(2026 - 08 - 05)), "2026-08-08");
        assert_eq!(week_key(date!(2026 - 08 - 03)), "2026-08-08");
    }

    #[test]
    fn week_key_crosses_month_and_year_boundaries() {
        assert_eq!(week_key(date!(2026 - 08 - 31)), "2026-09-05");
        assert_eq!(week_key(date!(2026 - 12 - 30)), "2027-01-02");
    }
}
