//! Calendar rules used by the historical model.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::config::HistoryCalibration;

/// Day of week with Sunday = 0 … Saturday = 6.
pub fn day_of_week(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Friday, Saturday and Sunday carry the weekend multiplier.
pub fn is_weekend_peak(day_of_week: u32) -> bool {
    matches!(day_of_week, 0 | 5 | 6)
}

/// Monday through Sunday around the fourth Thursday of November.
pub fn thanksgiving_week(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let thanksgiving = NaiveDate::from_weekday_of_month_opt(year, 11, Weekday::Thu, 4)?;
    Some((
        thanksgiving - Duration::days(3),
        thanksgiving + Duration::days(3),
    ))
}

/// Whether `date` falls inside any configured peak-travel window.
pub fn is_peak_travel(date: NaiveDate, calibration: &HistoryCalibration) -> bool {
    let in_window = calibration.peak_windows.iter().any(|w| {
        date.month() == w.month && (w.first_day..=w.last_day).contains(&date.day())
    });
    if in_window {
        return true;
    }

    calibration.thanksgiving_week
        && thanksgiving_week(date.year())
            .is_some_and(|(first, last)| (first..=last).contains(&date))
}
