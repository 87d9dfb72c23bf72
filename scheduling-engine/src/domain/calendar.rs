use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use shared::ShiftCode;
use std::collections::HashSet;

/// Day-of-week normalized to its own 7-value enum so entities do not leak
/// chrono types into their serialized form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn from_date(date: NaiveDate) -> DayOfWeek {
        match date.weekday() {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

/// Time-of-day window of a work shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub crosses_midnight: bool,
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn is_holiday(date: NaiveDate, holidays: &HashSet<NaiveDate>) -> bool {
    holidays.contains(&date)
}

/// Staffing targets and some generator rules distinguish only weekday
/// versus weekend-or-holiday days.
pub fn is_weekend_or_holiday(date: NaiveDate, holidays: &HashSet<NaiveDate>) -> bool {
    is_weekend(date) || is_holiday(date, holidays)
}

/// Time window for a work code; rest codes carry no times.
pub fn shift_times(code: ShiftCode) -> Option<ShiftWindow> {
    match code {
        ShiftCode::Morning => Some(ShiftWindow {
            start: hm(7, 0),
            end: hm(14, 0),
            crosses_midnight: false,
        }),
        ShiftCode::Afternoon => Some(ShiftWindow {
            start: hm(14, 0),
            end: hm(21, 0),
            crosses_midnight: false,
        }),
        ShiftCode::Night => Some(ShiftWindow {
            start: hm(21, 0),
            end: hm(7, 0),
            crosses_midnight: true,
        }),
        _ => None,
    }
}

/// Absolute (naive local) instant at which a work shift starts on `date`.
pub fn shift_start_instant(date: NaiveDate, code: ShiftCode) -> Option<NaiveDateTime> {
    shift_times(code).map(|window| date.and_time(window.start))
}

/// Absolute (naive local) instant at which a work shift ends. A night shift
/// ends on the following calendar day.
pub fn shift_end_instant(date: NaiveDate, code: ShiftCode) -> Option<NaiveDateTime> {
    shift_times(code).map(|window| {
        let end_date = if window.crosses_midnight {
            date.succ_opt().unwrap_or(date)
        } else {
            date
        };
        end_date.and_time(window.end)
    })
}

pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// All calendar days of the given month, oldest first. Empty for an
/// invalid year/month pair.
pub fn month_days(year: i32, month: u32) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return days;
    };

    let mut day = first;
    while day.month() == month {
        days.push(day);
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    days
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time literal")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekend_classification() {
        assert!(is_weekend(date(2025, 2, 1))); // Saturday
        assert!(is_weekend(date(2025, 2, 2))); // Sunday
        assert!(!is_weekend(date(2025, 2, 3))); // Monday
    }

    #[test]
    fn test_holiday_membership() {
        let holidays: HashSet<NaiveDate> = [date(2025, 2, 17)].into_iter().collect();
        assert!(is_holiday(date(2025, 2, 17), &holidays));
        assert!(!is_holiday(date(2025, 2, 18), &holidays));
        assert!(is_weekend_or_holiday(date(2025, 2, 17), &holidays));
    }

    #[test]
    fn test_rest_codes_have_no_times() {
        for code in [
            ShiftCode::DayOff,
            ShiftCode::HolidayRest,
            ShiftCode::PaidLeave,
            ShiftCode::SickLeave,
            ShiftCode::CompRest,
        ] {
            assert!(shift_times(code).is_none());
        }
    }

    #[test]
    fn test_night_shift_ends_next_day() {
        let end = shift_end_instant(date(2025, 3, 10), ShiftCode::Night).unwrap();
        assert_eq!(end, date(2025, 3, 11).and_time(hm(7, 0)));

        let end = shift_end_instant(date(2025, 3, 10), ShiftCode::Afternoon).unwrap();
        assert_eq!(end, date(2025, 3, 10).and_time(hm(21, 0)));
    }

    #[test]
    fn test_month_days_covers_whole_month() {
        let days = month_days(2025, 2);
        assert_eq!(days.len(), 28);
        assert_eq!(days[0], date(2025, 2, 1));
        assert_eq!(days[27], date(2025, 2, 28));

        assert_eq!(month_days(2024, 2).len(), 29);
        assert!(month_days(2025, 13).is_empty());
    }

    #[test]
    fn test_day_of_week_from_date() {
        assert_eq!(DayOfWeek::from_date(date(2025, 2, 17)), DayOfWeek::Monday);
        assert_eq!(DayOfWeek::from_date(date(2025, 2, 22)), DayOfWeek::Saturday);
        assert_eq!(DayOfWeek::Saturday.as_str(), "Saturday");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(hm(7, 0)), "07:00");
        assert_eq!(format_time(hm(21, 0)), "21:00");
    }
}
