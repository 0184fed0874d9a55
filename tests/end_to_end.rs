use chrono::{NaiveDate, NaiveDateTime};
use gridload_synth::app::pipeline::{RunConfig, load_pipeline, run_pipeline};
use gridload_synth::data::{NoProgress, enrich, generate};
use gridload_synth::domain::{DayType, GenerationConfig, Locale, Preset};
use gridload_synth::io::export_all;

fn at(date: &str, hour: u32) -> NaiveDateTime {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

#[test]
fn generated_year_has_expected_shape() {
    let table = generate(&GenerationConfig::reproducible(2024, 2024, 42)).unwrap();
    assert_eq!(table.len(), 8784);

    let enriched = enrich(&table, Locale::En);
    let new_year = &enriched.rows()[0];
    assert_eq!(new_year.record.timestamp, at("2024-01-01", 0));
    assert!(new_year.record.is_holiday);
    assert_eq!(new_year.day_type, DayType::Holiday);

    let summer = enriched
        .rows()
        .iter()
        .find(|r| r.record.timestamp == at("2024-07-15", 13))
        .unwrap();
    assert!(summer.record.temperature_c > 25.0, "{}", summer.record.temperature_c);
    assert!(summer.record.load_mw > 4000.0, "{}", summer.record.load_mw);
    assert_eq!(summer.day_type, DayType::Regular);
}

#[test]
fn export_then_ingest_reproduces_the_table() {
    let config = RunConfig {
        generation: GenerationConfig::reproducible(2023, 2023, 7).with_preset(Preset::Extended),
        locale: Locale::Uk,
    };
    let run = run_pipeline(&config, &mut NoProgress, None).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let summary = run.summary(at("2024-02-01", 12));
    let files = export_all(dir.path(), &run.table, &run.stats, &summary).unwrap();
    for path in files.all() {
        assert!(path.exists(), "{}", path.display());
    }

    let loaded = load_pipeline(&files.dataset, None).unwrap();
    assert_eq!(loaded.table.meta(), run.table.meta());
    assert_eq!(loaded.table.locale(), Locale::Uk);
    assert_eq!(loaded.anomalies, run.anomalies);
    assert_eq!(loaded.table.rows(), run.table.rows());
}
