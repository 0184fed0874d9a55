//! Fixed national holiday table.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::calendar::timeline::validate_range;
use crate::error::GenerateError;

/// `(month, day)` of every holiday, the same in every year.
pub const HOLIDAYS: [(u32, u32); 9] = [
    (1, 1),
    (1, 7),
    (3, 8),
    (5, 1),
    (5, 9),
    (6, 28),
    (8, 24),
    (10, 14),
    (12, 25),
];

/// Holiday dates of one year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayTable {
    year: i32,
    dates: [NaiveDate; 9],
}

impl HolidayTable {
    pub fn for_year(year: i32) -> Result<Self, GenerateError> {
        validate_range(year, year)?;

        let mut dates = [NaiveDate::MIN; 9];
        for (slot, &(month, day)) in dates.iter_mut().zip(HOLIDAYS.iter()) {
            *slot = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
                GenerateError::invalid_range(year, year, format!("no {month:02}-{day:02} in {year}"))
            })?;
        }
        Ok(Self { year, dates })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Membership by calendar date; time of day is ignored.
    pub fn is_holiday(&self, timestamp: NaiveDateTime) -> bool {
        timestamp.year() == self.year && self.contains(timestamp.date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nine_holidays_per_year() {
        let table = HolidayTable::for_year(2024).unwrap();
        assert_eq!(table.dates().len(), 9);
        assert_eq!(table.dates()[0], NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(table.dates()[8], NaiveDate::from_ymd_opt(2024, 12, 25).unwrap());
    }

    #[test]
    fn membership_ignores_time_of_day() {
        let table = HolidayTable::for_year(2024).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 8, 24).unwrap();
        assert!(table.is_holiday(day.and_hms_opt(0, 0, 0).unwrap()));
        assert!(table.is_holiday(day.and_hms_opt(23, 0, 0).unwrap()));

        let next = NaiveDate::from_ymd_opt(2024, 8, 25).unwrap();
        assert!(!table.is_holiday(next.and_hms_opt(0, 0, 0).unwrap()));
    }

    #[test]
    fn other_years_do_not_match() {
        let table = HolidayTable::for_year(2024).unwrap();
        let ts = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
        assert!(!table.is_holiday(ts));
    }

    #[test]
    fn invalid_year_is_rejected() {
        assert!(HolidayTable::for_year(10_000).is_err());
    }
}
