//! Formatted terminal output and the plain-text analysis report.
//!
//! We keep formatting code in one place so:
//! - the aggregation code stays clean and testable
//! - output changes are localized (golden tests live here)

use chrono::NaiveDateTime;

use crate::data::locale::{day_type_label, mode_description};
use crate::domain::{DatasetStats, Locale, TableMeta};
use crate::report::aggregate::{DailyConsumption, MonthStats, MonthlyConsumption};

/// Fixed text of the analysis report.
struct ReportLabels {
    title: &'static str,
    generated_at: &'static str,
    period: &'static str,
    years_suffix: &'static str,
    mode: &'static str,
    stats_header: &'static str,
    records: &'static str,
    load_mean: &'static str,
    load_max: &'static str,
    load_min: &'static str,
    temperature_mean: &'static str,
    mw: &'static str,
    summaries_header: &'static str,
    summaries: [&'static str; 4],
}

const LABELS_UK: ReportLabels = ReportLabels {
    title: "ЗВІТ З АНАЛІЗУ НАВАНТАЖЕННЯ ЕНЕРГОСИСТЕМИ",
    generated_at: "Дата генерації",
    period: "Період аналізу",
    years_suffix: "роки",
    mode: "Режим генерації",
    stats_header: "СТАТИСТИКА ДАНИХ:",
    records: "Загальна кількість записів",
    load_mean: "Середнє навантаження",
    load_max: "Максимальне навантаження",
    load_min: "Мінімальне навантаження",
    temperature_mean: "Середня температура",
    mw: "МВт",
    summaries_header: "ДОСТУПНІ ЗВЕДЕНІ ТАБЛИЦІ:",
    summaries: [
        "Погодинний моніторинг - за конкретний день",
        "Місячний моніторинг - за рік",
        "Споживання за день",
        "Споживання за місяць",
    ],
};

const LABELS_EN: ReportLabels = ReportLabels {
    title: "POWER GRID LOAD ANALYSIS REPORT",
    generated_at: "Generated at",
    period: "Analysis period",
    years_suffix: "",
    mode: "Generation mode",
    stats_header: "DATA STATISTICS:",
    records: "Total records",
    load_mean: "Mean load",
    load_max: "Maximum load",
    load_min: "Minimum load",
    temperature_mean: "Mean temperature",
    mw: "MW",
    summaries_header: "AVAILABLE SUMMARY TABLES:",
    summaries: [
        "Hourly monitor - for a given day",
        "Monthly monitor - for a year",
        "Daily consumption",
        "Monthly consumption",
    ],
};

fn labels(locale: Locale) -> &'static ReportLabels {
    match locale {
        Locale::Uk => &LABELS_UK,
        Locale::En => &LABELS_EN,
    }
}

/// The `power_load_analysis_report.txt` body.
pub fn format_text_report(meta: &TableMeta, stats: &DatasetStats, generated_at: NaiveDateTime, locale: Locale) -> String {
    let l = labels(locale);
    let mut out = String::new();

    out.push_str(l.title);
    out.push('\n');
    out.push_str(&"=".repeat(50));
    out.push_str("\n\n");
    out.push_str(&format!("{}: {}\n", l.generated_at, generated_at.format("%Y-%m-%d %H:%M")));
    out.push_str(
        format!("{}: {} - {} {}", l.period, meta.start_year, meta.end_year, l.years_suffix)
            .trim_end(),
    );
    out.push('\n');
    out.push_str(&format!("{}: {}\n\n", l.mode, mode_description(locale, meta.mode())));

    out.push_str(l.stats_header);
    out.push('\n');
    out.push_str(&format!("- {}: {}\n", l.records, fmt_thousands(stats.n_rows)));
    out.push_str(&format!("- {}: {:.1} {}\n", l.load_mean, stats.load_mean, l.mw));
    out.push_str(&format!("- {}: {:.1} {}\n", l.load_max, stats.load_max, l.mw));
    out.push_str(&format!("- {}: {:.1} {}\n", l.load_min, stats.load_min, l.mw));
    out.push_str(&format!("- {}: {:.1} °C\n\n", l.temperature_mean, stats.temperature_mean));

    out.push_str(l.summaries_header);
    out.push('\n');
    for (i, s) in l.summaries.iter().enumerate() {
        out.push_str(&format!("{}. {s}\n", i + 1));
    }
    out
}

/// Short terminal summary printed after `generate`.
pub fn format_run_summary(meta: &TableMeta, stats: &DatasetStats, anomalies: Option<usize>) -> String {
    let mut out = String::new();

    out.push_str("=== gridload - synthetic grid load ===\n");
    out.push_str(&format!("Years: {}..={}\n", meta.start_year, meta.end_year));
    out.push_str(&format!("Preset: {}\n", meta.preset.display_name()));
    match meta.seed {
        Some(seed) => out.push_str(&format!("Mode: {} (seed={seed})\n", meta.mode().display_name())),
        None => out.push_str(&format!("Mode: {}\n", meta.mode().display_name())),
    }
    out.push_str(&format!(
        "Rows: n={} | holiday hours={}\n",
        stats.n_rows, stats.holiday_hours
    ));
    out.push_str(&format!(
        "Load: mean={:.1} min={:.1} max={:.1} MW\n",
        stats.load_mean, stats.load_min, stats.load_max
    ));
    out.push_str(&format!(
        "Weather: temp mean={:.1} C | wind mean={:.1} m/s\n",
        stats.temperature_mean, stats.wind_mean
    ));
    out.push_str(&format!("Capacity: mean={:.1} MW\n", stats.capacity_mean));
    if let Some(n) = anomalies {
        out.push_str(&format!("Anomalies: {n}\n"));
    }
    out
}

/// Monthly monitor table for one year.
pub fn format_monthly_monitor(rows: &[MonthStats], year: i32) -> String {
    let mut out = String::new();
    out.push_str(&format!("Monthly monitor {year}:\n"));
    push_line(
        &mut out,
        format!("{:<12} {:>10} {:>10} {:>10} {:>14} {:>6}", "month", "max", "min", "mean", "sum", "hours"),
    );
    push_line(&mut out, format!("{:-<12} {:-<10} {:-<10} {:-<10} {:-<14} {:-<6}", "", "", "", "", "", ""));
    for r in rows {
        push_line(
            &mut out,
            format!(
                "{:<12} {:>10.1} {:>10.1} {:>10.1} {:>14.1} {:>6}",
                truncate(r.month_name, 12),
                r.max_mw,
                r.min_mw,
                r.mean_mw,
                r.sum_mw,
                r.hours
            ),
        );
    }
    out
}

/// Daily consumption table; `limit` caps the number of rows shown.
pub fn format_daily_consumption(rows: &[DailyConsumption], locale: Locale, limit: Option<usize>) -> String {
    let mut out = String::new();
    out.push_str("Daily consumption:\n");
    push_line(
        &mut out,
        format!("{:<10} {:<10} {:>12} {:>10} {:>10}", "date", "day_type", "sum", "mean", "max"),
    );
    push_line(&mut out, format!("{:-<10} {:-<10} {:-<12} {:-<10} {:-<10}", "", "", "", "", ""));
    let shown = limit.unwrap_or(rows.len()).min(rows.len());
    for r in &rows[..shown] {
        push_line(
            &mut out,
            format!(
                "{:<10} {:<10} {:>12.1} {:>10.1} {:>10.1}",
                r.date,
                truncate(day_type_label(locale, r.day_type), 10),
                r.sum_mw,
                r.mean_mw,
                r.max_mw
            ),
        );
    }
    if shown < rows.len() {
        out.push_str(&format!("... {} more\n", rows.len() - shown));
    }
    out
}

pub fn format_monthly_consumption(rows: &[MonthlyConsumption]) -> String {
    let mut out = String::new();
    out.push_str("Monthly consumption:\n");
    push_line(
        &mut out,
        format!("{:<6} {:<12} {:>14} {:>10} {:>10} {:>5}", "year", "month", "sum", "mean", "max", "days"),
    );
    push_line(&mut out, format!("{:-<6} {:-<12} {:-<14} {:-<10} {:-<10} {:-<5}", "", "", "", "", "", ""));
    for r in rows {
        push_line(
            &mut out,
            format!(
                "{:<6} {:<12} {:>14.1} {:>10.1} {:>10.1} {:>5}",
                r.year,
                truncate(r.month_name, 12),
                r.sum_mw,
                r.mean_mw,
                r.max_mw,
                r.days_count
            ),
        );
    }
    out
}

fn push_line(out: &mut String, line: String) {
    out.push_str(line.trim_end());
    out.push('\n');
}

/// `1234567` -> `1,234,567`.
fn fmt_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{DayType, Preset};

    fn stats() -> DatasetStats {
        DatasetStats {
            n_rows: 8784,
            load_mean: 4012.345,
            load_min: 2500.0,
            load_max: 5500.0,
            temperature_mean: 10.04,
            wind_mean: 3.0,
            capacity_mean: 5600.0,
            holiday_hours: 216,
        }
    }

    fn meta(seed: Option<u64>) -> TableMeta {
        TableMeta {
            start_year: 2024,
            end_year: 2025,
            preset: Preset::Basic,
            seed,
        }
    }

    #[test]
    fn text_report_uk_golden() {
        let at = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap().and_hms_opt(9, 30, 0).unwrap();
        let report = format_text_report(&meta(Some(42)), &stats(), at, Locale::Uk);
        let expected = "\
ЗВІТ З АНАЛІЗУ НАВАНТАЖЕННЯ ЕНЕРГОСИСТЕМИ
==================================================

Дата генерації: 2025-03-04 09:30
Період аналізу: 2024 - 2025 роки
Режим генерації: Відтворювані дані - однакові результати при кожному запуску

СТАТИСТИКА ДАНИХ:
- Загальна кількість записів: 8,784
- Середнє навантаження: 4012.3 МВт
- Максимальне навантаження: 5500.0 МВт
- Мінімальне навантаження: 2500.0 МВт
- Середня температура: 10.0 °C

ДОСТУПНІ ЗВЕДЕНІ ТАБЛИЦІ:
1. Погодинний моніторинг - за конкретний день
2. Місячний моніторинг - за рік
3. Споживання за день
4. Споживання за місяць
";
        assert_eq!(report, expected);
    }

    #[test]
    fn text_report_en_random_mode() {
        let at = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap().and_hms_opt(9, 30, 0).unwrap();
        let report = format_text_report(&meta(None), &stats(), at, Locale::En);
        assert!(report.contains("Analysis period: 2024 - 2025\n"));
        assert!(report.contains("Random data - unique results on every run"));
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(fmt_thousands(0), "0");
        assert_eq!(fmt_thousands(999), "999");
        assert_eq!(fmt_thousands(8760), "8,760");
        assert_eq!(fmt_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn daily_consumption_respects_limit() {
        let row = |d: u32| DailyConsumption {
            date: NaiveDate::from_ymd_opt(2024, 1, d).unwrap(),
            day_type: DayType::Regular,
            sum_mw: 96000.0,
            mean_mw: 4000.0,
            max_mw: 5000.0,
        };
        let rows: Vec<_> = (1..=5).map(row).collect();
        let out = format_daily_consumption(&rows, Locale::En, Some(2));
        assert!(out.contains("2024-01-02 Regular"));
        assert!(!out.contains("2024-01-03"));
        assert!(out.ends_with("... 3 more\n"));
    }
}
