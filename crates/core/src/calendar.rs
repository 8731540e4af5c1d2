//! Pure date arithmetic for the appointments calendar.
//!
//! The calendar view always displays whole weeks starting on Sunday.
//! Everything here is deterministic and side-effect free; "today" is
//! always passed in by the caller.

use chrono::{Datelike, Days, NaiveDate};

/// Number of days in a displayed week.
pub const WEEK_LEN: usize = 7;

/// Return the Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_sunday() as u64;
    // num_days_from_sunday is 0..=6, so this cannot underflow the
    // calendar range for any date the API accepts.
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// The 7 consecutive days of the week containing `date`.
///
/// The first element is always a Sunday and the days ascend by one.
pub fn week_dates(date: NaiveDate) -> Vec<NaiveDate> {
    let start = week_start(date);
    (0..WEEK_LEN as u64)
        .filter_map(|i| start.checked_add_days(Days::new(i)))
        .collect()
}

/// Shift `date` by whole weeks (negative = backwards).
///
/// Used for prev/next week navigation; the "today" shortcut is just the
/// caller selecting the current date again.
pub fn shift_weeks(date: NaiveDate, weeks: i64) -> NaiveDate {
    // Saturate so an absurd offset degrades to a no-op instead of an
    // arithmetic panic; the day-shift below already caps at the
    // calendar range.
    let days = weeks.saturating_mul(WEEK_LEN as i64);
    if days >= 0 {
        date.checked_add_days(Days::new(days as u64)).unwrap_or(date)
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
            .unwrap_or(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn week_always_starts_on_sunday() {
        // One date per weekday.
        for day in 1..=7 {
            let date = d(2026, 3, day);
            let week = week_dates(date);
            assert_eq!(week.len(), WEEK_LEN);
            assert_eq!(week[0].weekday(), Weekday::Sun, "for {date}");
        }
    }

    #[test]
    fn week_days_are_contiguous_ascending() {
        let week = week_dates(d(2026, 8, 30));
        for pair in week.windows(2) {
            assert_eq!(pair[1], pair[0].succ_opt().unwrap());
        }
    }

    #[test]
    fn week_contains_the_selected_date() {
        let date = d(2025, 12, 31);
        assert!(week_dates(date).contains(&date));
    }

    #[test]
    fn sunday_is_its_own_week_start() {
        let sunday = d(2026, 8, 30);
        assert_eq!(sunday.weekday(), Weekday::Sun);
        assert_eq!(week_start(sunday), sunday);
    }

    #[test]
    fn week_start_crosses_month_boundary() {
        // Tuesday 2026-09-01 belongs to the week of Sunday 2026-08-30.
        assert_eq!(week_start(d(2026, 9, 1)), d(2026, 8, 30));
    }

    #[test]
    fn shift_weeks_moves_by_seven_days() {
        let date = d(2026, 8, 30);
        assert_eq!(shift_weeks(date, 1), d(2026, 9, 6));
        assert_eq!(shift_weeks(date, -1), d(2026, 8, 23));
        assert_eq!(shift_weeks(date, 0), date);
    }

    #[test]
    fn shift_weeks_degrades_to_no_op_on_extreme_offsets() {
        let date = d(2026, 8, 30);
        assert_eq!(shift_weeks(date, i64::MAX), date);
        assert_eq!(shift_weeks(date, i64::MIN), date);
    }
}
