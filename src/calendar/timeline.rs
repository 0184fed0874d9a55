//! Hourly timeline for a year range.
//!
//! The timeline is the backbone of the generator: one `HourStamp` per hour from
//! Jan 1 00:00 of the first year through Dec 31 23:00 of the last year, using
//! the real Gregorian calendar (leap years have 8784 hours).

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::error::GenerateError;

/// Earliest year accepted by the generator.
pub const MIN_YEAR: i32 = 1900;
/// Latest year accepted by the generator.
pub const MAX_YEAR: i32 = 2200;

/// A single hour with its derived time features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourStamp {
    pub timestamp: NaiveDateTime,
    /// 0..=23
    pub hour: u32,
    /// 0 = Monday .. 6 = Sunday
    pub day_of_week: u32,
    /// 1..=366
    pub day_of_year: u32,
    pub year: i32,
    /// `year - start_year`
    pub year_offset: i32,
}

impl HourStamp {
    fn from_timestamp(timestamp: NaiveDateTime, start_year: i32) -> Self {
        let year = timestamp.year();
        Self {
            timestamp,
            hour: timestamp.hour(),
            day_of_week: timestamp.weekday().num_days_from_monday(),
            day_of_year: timestamp.ordinal(),
            year,
            year_offset: year - start_year,
        }
    }

    pub fn is_weekend(&self) -> bool {
        self.day_of_week >= 5
    }
}

/// Check a year range before any work is done.
pub fn validate_range(start_year: i32, end_year: i32) -> Result<(), GenerateError> {
    if start_year > end_year {
        return Err(GenerateError::invalid_range(
            start_year,
            end_year,
            "start year is after end year",
        ));
    }
    for year in [start_year, end_year] {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(GenerateError::invalid_range(
                start_year,
                end_year,
                format!("year {year} outside supported range {MIN_YEAR}..={MAX_YEAR}"),
            ));
        }
    }
    Ok(())
}

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

pub fn hours_in_year(year: i32) -> usize {
    days_in_year(year) as usize * 24
}

/// Number of hourly rows in `[start_year, end_year]` (0 for an empty range).
pub fn hours_in_range(start_year: i32, end_year: i32) -> usize {
    (start_year..=end_year).map(hours_in_year).sum()
}

/// Build the complete ordered hourly sequence for the range.
pub fn timeline(start_year: i32, end_year: i32) -> Result<Vec<HourStamp>, GenerateError> {
    validate_range(start_year, end_year)?;

    let mut out = Vec::with_capacity(hours_in_range(start_year, end_year));
    for year in start_year..=end_year {
        out.extend(year_hours(year, start_year)?);
    }
    Ok(out)
}

/// Hourly stamps for a single year, with `year_offset` relative to `start_year`.
pub fn year_hours(
    year: i32,
    start_year: i32,
) -> Result<impl Iterator<Item = HourStamp>, GenerateError> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| GenerateError::invalid_range(start_year, year, format!("no Jan 1 in {year}")))?;

    Ok((0..hours_in_year(year) as i64)
        .map(move |h| HourStamp::from_timestamp(first + Duration::hours(h), start_year)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2023, 2023, 8760)]
    #[case(2024, 2024, 8784)]
    #[case(2023, 2025, 8760 + 8784 + 8760)]
    #[case(1900, 1900, 8760)]
    #[case(2000, 2000, 8784)]
    fn timeline_length_matches_calendar(#[case] start: i32, #[case] end: i32, #[case] expected: usize) {
        let stamps = timeline(start, end).unwrap();
        assert_eq!(stamps.len(), expected);
        assert_eq!(hours_in_range(start, end), expected);
    }

    #[test]
    fn timeline_is_strictly_hourly_without_gaps() {
        let stamps = timeline(2023, 2024).unwrap();
        for w in stamps.windows(2) {
            assert_eq!(w[1].timestamp - w[0].timestamp, Duration::hours(1));
        }

        let first = stamps.first().unwrap();
        let last = stamps.last().unwrap();
        assert_eq!(first.timestamp.to_string(), "2023-01-01 00:00:00");
        assert_eq!(last.timestamp.to_string(), "2024-12-31 23:00:00");
    }

    #[test]
    fn derived_features() {
        let stamps = timeline(2024, 2025).unwrap();

        // 2024-01-01 was a Monday.
        assert_eq!(stamps[0].day_of_week, 0);
        assert_eq!(stamps[0].day_of_year, 1);
        assert_eq!(stamps[0].year_offset, 0);
        assert!(!stamps[0].is_weekend());
        // 2024-01-06 was a Saturday.
        assert!(stamps[5 * 24].is_weekend());

        // 2024-12-31 23:00 is hour 8783: leap day counted.
        let dec31 = stamps[8783];
        assert_eq!(dec31.day_of_year, 366);
        assert_eq!(dec31.hour, 23);

        let next = stamps[8784];
        assert_eq!(next.year, 2025);
        assert_eq!(next.year_offset, 1);
        assert_eq!(next.day_of_year, 1);
        // 2025-01-01 was a Wednesday.
        assert_eq!(next.day_of_week, 2);
    }

    #[test]
    fn invalid_ranges_are_rejected() {
        assert!(matches!(
            timeline(2025, 2024),
            Err(GenerateError::InvalidRange { start: 2025, end: 2024, .. })
        ));
        assert!(matches!(timeline(1800, 2024), Err(GenerateError::InvalidRange { .. })));
        assert!(matches!(timeline(2024, 9999), Err(GenerateError::InvalidRange { .. })));
    }
}
