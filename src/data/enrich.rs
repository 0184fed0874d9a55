//! Derived calendar/categorical fields.
//!
//! Enrichment is a pure per-record mapping, so it runs in parallel with rayon;
//! `collect` keeps the input order.

use chrono::{Datelike, NaiveDateTime, Timelike};
use rayon::prelude::*;
use tracing::debug;

use crate::data::locale::{month_name, weekday_name};
use crate::domain::{
    DayType, EnrichedLoadTable, EnrichedRecord, LoadRecord, LoadRow, LoadRows, LoadTable, Locale, Preset,
    TableMeta,
};
use crate::error::GenerateError;

/// Timestamp formats accepted when reading rows back.
const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Attach derived fields to every record.
///
/// Accepts an already enriched table too; the derived fields are recomputed
/// from `timestamp`/`is_holiday` only, so re-enrichment is a no-op.
pub fn enrich(table: &impl LoadRows, locale: Locale) -> EnrichedLoadTable {
    let records: Vec<&LoadRecord> = table.load_records().collect();
    let rows: Vec<EnrichedRecord> = records.par_iter().map(|r| enrich_record(r, locale)).collect();
    debug!(rows = rows.len(), ?locale, "enriched table");
    EnrichedLoadTable::new(*table.meta(), locale, rows)
}

pub fn enrich_record(record: &LoadRecord, locale: Locale) -> EnrichedRecord {
    let ts = record.timestamp;
    let month = ts.month();
    EnrichedRecord {
        record: record.clone(),
        date: ts.date(),
        month,
        month_name: month_name(locale, month),
        month_order: month,
        quarter: month.div_ceil(3),
        hour: ts.hour(),
        day_type: DayType::from_flag(record.is_holiday),
        day_of_week: weekday_name(locale, ts.weekday().num_days_from_monday()),
    }
}

impl LoadTable {
    /// Build a table from raw rows, checking every row.
    ///
    /// Rows must carry a parseable timestamp, all numeric fields, a 0/1
    /// holiday flag and a year matching the timestamp (when given), and must
    /// advance by exactly one hour. Years in `meta` are replaced by the years
    /// actually present.
    pub fn from_rows(rows: &[LoadRow], meta: Option<TableMeta>) -> Result<LoadTable, GenerateError> {
        if rows.is_empty() {
            return Err(GenerateError::malformed(0, "dataset has no rows"));
        }

        let mut records: Vec<LoadRecord> = Vec::with_capacity(rows.len());
        for (idx, row) in rows.iter().enumerate() {
            let line = idx + 1;
            let record = record_from_row(line, row)?;
            if let Some(prev) = records.last() {
                if record.timestamp - prev.timestamp != chrono::Duration::hours(1) {
                    return Err(GenerateError::malformed(
                        line,
                        format!("timestamp {} does not follow {} by one hour", record.timestamp, prev.timestamp),
                    ));
                }
            }
            records.push(record);
        }

        let start_year = records[0].year;
        let end_year = records[records.len() - 1].year;
        let meta = match meta {
            Some(m) => TableMeta { start_year, end_year, ..m },
            None => TableMeta {
                start_year,
                end_year,
                preset: Preset::Basic,
                seed: None,
            },
        };
        Ok(LoadTable::new(meta, records))
    }
}

fn record_from_row(line: usize, row: &LoadRow) -> Result<LoadRecord, GenerateError> {
    let raw_ts = row
        .timestamp
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| GenerateError::malformed(line, "missing timestamp"))?;
    let timestamp = parse_timestamp(raw_ts)
        .ok_or_else(|| GenerateError::malformed(line, format!("invalid timestamp '{raw_ts}'")))?;

    let field = |name: &str, v: Option<f64>| -> Result<f64, GenerateError> {
        match v {
            Some(x) if x.is_finite() => Ok(x),
            Some(x) => Err(GenerateError::malformed(line, format!("non-finite {name}: {x}"))),
            None => Err(GenerateError::malformed(line, format!("missing {name}"))),
        }
    };

    let is_holiday = match row.is_holiday {
        Some(0) => false,
        Some(1) => true,
        Some(other) => {
            return Err(GenerateError::malformed(line, format!("is_holiday must be 0 or 1, got {other}")));
        }
        None => return Err(GenerateError::malformed(line, "missing is_holiday")),
    };

    let year = timestamp.year();
    if let Some(y) = row.year {
        if y != year {
            return Err(GenerateError::malformed(
                line,
                format!("year {y} does not match timestamp {timestamp}"),
            ));
        }
    }

    Ok(LoadRecord {
        timestamp,
        load_mw: field("load_mw", row.load_mw)?,
        temperature_c: field("temperature_c", row.temperature_c)?,
        wind_mps: field("wind_mps", row.wind_mps)?,
        is_holiday,
        capacity_mw: field("capacity_mw", row.capacity_mw)?,
        year,
    })
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::rstest;

    use super::*;
    use crate::data::generator::generate;
    use crate::domain::GenerationConfig;

    fn row(ts: Option<&str>) -> LoadRow {
        LoadRow {
            timestamp: ts.map(str::to_string),
            load_mw: Some(4000.0),
            temperature_c: Some(5.0),
            wind_mps: Some(3.0),
            is_holiday: Some(0),
            capacity_mw: Some(5000.0),
            year: Some(2024),
        }
    }

    #[test]
    fn enriched_fields() {
        let table = generate(&GenerationConfig::reproducible(2024, 2024, 42)).unwrap();
        let enriched = enrich(&table, Locale::Uk);
        assert_eq!(enriched.len(), table.len());

        let first = &enriched.rows()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(first.month, 1);
        assert_eq!(first.month_name, "Січень");
        assert_eq!(first.month_order, 1);
        assert_eq!(first.quarter, 1);
        assert_eq!(first.hour, 0);
        assert_eq!(first.day_type, DayType::Holiday);
        assert_eq!(first.day_of_week, "Понеділок");

        // 2024-10-05 14:00 is a Saturday in Q4.
        let idx = enriched
            .rows()
            .iter()
            .position(|r| r.record.timestamp.to_string() == "2024-10-05 14:00:00")
            .unwrap();
        let r = &enriched.rows()[idx];
        assert_eq!(r.quarter, 4);
        assert_eq!(r.hour, 14);
        assert_eq!(r.day_of_week, "Субота");
        assert_eq!(r.day_type, DayType::Regular);
    }

    #[rstest]
    #[case(1, 1)]
    #[case(3, 1)]
    #[case(4, 2)]
    #[case(6, 2)]
    #[case(7, 3)]
    #[case(9, 3)]
    #[case(10, 4)]
    #[case(12, 4)]
    fn quarter_is_ceil_month_over_three(#[case] month: u32, #[case] quarter: u32) {
        let ts = NaiveDate::from_ymd_opt(2024, month, 10).unwrap().and_hms_opt(5, 0, 0).unwrap();
        let record = LoadRecord {
            timestamp: ts,
            load_mw: 4000.0,
            temperature_c: 1.0,
            wind_mps: 1.0,
            is_holiday: false,
            capacity_mw: 5000.0,
            year: 2024,
        };
        assert_eq!(enrich_record(&record, Locale::En).quarter, quarter);
    }

    #[test]
    fn enrichment_is_idempotent() {
        let table = generate(&GenerationConfig::reproducible(2024, 2024, 1)).unwrap();
        let once = enrich(&table, Locale::En);
        let twice = enrich(&once, Locale::En);
        assert_eq!(once, twice);
    }

    #[test]
    fn rows_round_trip_into_a_table() {
        let rows = vec![row(Some("2024-03-01 00:00:00")), row(Some("2024-03-01 01:00:00"))];
        let table = LoadTable::from_rows(&rows, None).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.meta().start_year, 2024);
        assert_eq!(table.meta().seed, None);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    #[case(Some("yesterday"))]
    fn missing_or_bad_timestamp_is_malformed(#[case] ts: Option<&str>) {
        let rows = vec![row(Some("2024-03-01 00:00:00")), row(ts)];
        let err = LoadTable::from_rows(&rows, None).unwrap_err();
        assert!(matches!(err, GenerateError::MalformedRecord { row: 2, .. }), "{err}");
    }

    #[test]
    fn gaps_and_bad_fields_are_malformed() {
        let gap = vec![row(Some("2024-03-01 00:00:00")), row(Some("2024-03-01 02:00:00"))];
        assert!(matches!(
            LoadTable::from_rows(&gap, None),
            Err(GenerateError::MalformedRecord { row: 2, .. })
        ));

        let mut bad_flag = row(Some("2024-03-01 00:00:00"));
        bad_flag.is_holiday = Some(2);
        assert!(LoadTable::from_rows(&[bad_flag], None).is_err());

        let mut wrong_year = row(Some("2024-03-01 00:00:00"));
        wrong_year.year = Some(2023);
        assert!(LoadTable::from_rows(&[wrong_year], None).is_err());

        let mut missing_load = row(Some("2024-03-01 00:00:00"));
        missing_load.load_mw = None;
        assert!(LoadTable::from_rows(&[missing_load], None).is_err());

        assert!(matches!(
            LoadTable::from_rows(&[], None),
            Err(GenerateError::MalformedRecord { row: 0, .. })
        ));
    }
}
