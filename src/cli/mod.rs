//! Command-line parsing for the synthetic grid-load generator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling code. Every command converts its args into plain
//! config structs before any work happens.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::{GenerationConfig, GenerationMode, Locale, Preset};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gridload", version, about = "Synthetic hourly power-grid load generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate, enrich and export a dataset, then print a summary.
    Generate(GenerateArgs),
    /// Print the monthly monitor and consumption tables.
    Report(ReportArgs),
    /// Plot one day's hourly profile and load/temperature trend.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// Uses the same pipeline as `gridload generate`, but renders results in a
    /// terminal UI using Ratatui.
    Tui(GenerationArgs),
}

/// Options shared by every command that may generate data.
#[derive(Debug, Args, Clone)]
pub struct GenerationArgs {
    /// First year to generate.
    #[arg(long, default_value_t = 2024)]
    pub start_year: i32,

    /// Last year to generate (inclusive).
    #[arg(long, default_value_t = 2024)]
    pub end_year: i32,

    /// Seeded (reproducible) or entropy-seeded (random) generation.
    #[arg(long, value_enum, default_value_t = GenerationMode::Reproducible)]
    pub mode: GenerationMode,

    /// Seed used in reproducible mode.
    #[arg(long, env = "GRIDLOAD_SEED", default_value_t = 42)]
    pub seed: u64,

    /// Model constants to use.
    #[arg(long, value_enum, default_value_t = Preset::Basic)]
    pub preset: Preset,

    /// Label language for months, weekdays and day types [default: uk].
    #[arg(long, value_enum, env = "GRIDLOAD_LOCALE")]
    pub locale: Option<Locale>,

    /// Log progress to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl GenerationArgs {
    pub fn generation_config(&self) -> GenerationConfig {
        let base = match self.mode {
            GenerationMode::Reproducible => GenerationConfig::reproducible(self.start_year, self.end_year, self.seed),
            GenerationMode::Random => GenerationConfig::stochastic(self.start_year, self.end_year),
        };
        base.with_preset(self.preset)
    }

    pub fn locale_or_default(&self) -> Locale {
        self.locale.unwrap_or_default()
    }
}

#[derive(Debug, Args, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub generation: GenerationArgs,

    /// Directory for CSV/TXT/JSON exports.
    #[arg(long, env = "GRIDLOAD_OUTPUT_DIR", default_value = "results")]
    pub output_dir: PathBuf,

    /// Skip writing export files.
    #[arg(long)]
    pub no_export: bool,
}

/// Where `report`/`plot` take their data from.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    #[command(flatten)]
    pub generation: GenerationArgs,

    /// Read a previously exported `power_load_data.csv` instead of generating.
    #[arg(short = 'i', long, value_name = "CSV", conflicts_with = "pick")]
    pub input: Option<PathBuf>,

    /// Choose an exported dataset interactively.
    #[arg(long)]
    pub pick: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Restrict the monthly monitor to one year (default: every year).
    #[arg(long)]
    pub year: Option<i32>,

    /// Maximum number of daily consumption rows to print.
    #[arg(long, default_value_t = 31)]
    pub limit: usize,
}

#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Day to plot (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub date: NaiveDate,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_defaults() {
        let cli = Cli::try_parse_from(["gridload", "generate"]).unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        let config = args.generation.generation_config();
        assert_eq!(config, GenerationConfig::reproducible(2024, 2024, 42));
        assert_eq!(args.generation.locale_or_default(), Locale::Uk);
        assert!(!args.no_export);
    }

    #[test]
    fn random_mode_drops_seed() {
        let cli = Cli::try_parse_from([
            "gridload",
            "generate",
            "--mode",
            "random",
            "--preset",
            "extended",
            "--start-year",
            "2020",
            "--end-year",
            "2022",
        ])
        .unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        let config = args.generation.generation_config();
        assert_eq!(config.seed, None);
        assert_eq!(config.preset, Preset::Extended);
        assert_eq!((config.start_year, config.end_year), (2020, 2022));
    }

    #[test]
    fn plot_requires_date() {
        assert!(Cli::try_parse_from(["gridload", "plot"]).is_err());
        let cli = Cli::try_parse_from(["gridload", "plot", "--date", "2024-07-15", "-i", "x.csv"]).unwrap();
        let Command::Plot(args) = cli.command else {
            panic!("expected plot");
        };
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 7, 15).unwrap());
        assert_eq!(args.source.input, Some(PathBuf::from("x.csv")));
    }
}
