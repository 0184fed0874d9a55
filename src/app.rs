//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - runs the generate/enrich pipeline (or ingests an export)
//! - prints reports/plots
//! - writes exports

use chrono::Local;
use clap::Parser;
use tracing::info;

use crate::app::pipeline::{RunConfig, RunOutput, load_pipeline, run_pipeline};
use crate::cli::{Command, GenerateArgs, GenerationArgs, PlotArgs, ReportArgs, SourceArgs};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `gridload` binary.
pub fn run() -> Result<(), AppError> {
    // A missing `.env` is fine; a broken one is not worth failing over either.
    let _ = dotenvy::dotenv();

    // We want `gridload` and `gridload --preset extended` to behave like `gridload tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Generate(args) => {
            crate::telemetry::init_tracing(args.generation.verbose);
            handle_generate(args)
        }
        Command::Report(args) => {
            crate::telemetry::init_tracing(args.source.generation.verbose);
            handle_report(args)
        }
        Command::Plot(args) => {
            crate::telemetry::init_tracing(args.source.generation.verbose);
            handle_plot(args)
        }
        Command::Tui(args) => crate::tui::run(args),
    }
}

pub fn run_config_from_args(args: &GenerationArgs) -> RunConfig {
    RunConfig {
        generation: args.generation_config(),
        locale: args.locale_or_default(),
    }
}

fn generate_from_args(args: &GenerationArgs) -> Result<RunOutput, AppError> {
    let config = run_config_from_args(args);
    let mut log_progress = |percent: u8, message: &str| info!(percent, "{message}");
    Ok(run_pipeline(&config, &mut log_progress, None)?)
}

/// Ingest `--input`/`--pick` when given, otherwise generate.
fn load_or_generate(args: &SourceArgs) -> Result<RunOutput, AppError> {
    let path = if args.pick {
        Some(crate::cli::picker::prompt_for_dataset()?)
    } else {
        args.input
            .as_deref()
            .map(crate::cli::picker::validate_csv_path)
            .transpose()?
    };
    match path {
        Some(path) => load_pipeline(&path, args.generation.locale),
        None => generate_from_args(&args.generation),
    }
}

fn handle_generate(args: GenerateArgs) -> Result<(), AppError> {
    let run = generate_from_args(&args.generation)?;

    println!(
        "{}",
        crate::report::format_run_summary(run.table.meta(), &run.stats, run.anomalies)
    );

    if args.no_export {
        return Ok(());
    }

    let summary = run.summary(Local::now().naive_local());
    let files = crate::io::export_all(&args.output_dir, &run.table, &run.stats, &summary)?;
    println!("Exported:");
    for path in files.all() {
        println!("  {}", path.display());
    }
    Ok(())
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let run = load_or_generate(&args.source)?;
    let table = &run.table;

    let years = match args.year {
        Some(year) if table.years().contains(&year) => vec![year],
        Some(year) => return Err(AppError::new(2, format!("No data for year {year}."))),
        None => table.years(),
    };

    for year in years {
        let monitor = crate::report::monthly_monitor(table, year);
        println!("{}", crate::report::format_monthly_monitor(&monitor, year));
    }

    let daily = crate::report::daily_consumption(table);
    println!(
        "{}",
        crate::report::format_daily_consumption(&daily, table.locale(), Some(args.limit))
    );

    let monthly = crate::report::monthly_consumption(table);
    println!("{}", crate::report::format_monthly_consumption(&monthly));
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let run = load_or_generate(&args.source)?;
    let profile = crate::report::hourly_profile(&run.table, args.date);
    if profile.is_empty() {
        return Err(AppError::new(2, format!("No data for {}.", args.date)));
    }
    let trend = crate::report::day_temperature_trend(&run.table, args.date);

    println!(
        "{}",
        crate::plot::render_hourly_profile(&profile, args.width, args.height)
    );
    println!(
        "{}",
        crate::plot::render_temperature_plot(&profile, trend.as_ref(), args.width, args.height)
    );
    match trend {
        Some(t) => println!(
            "Trend: load = {:.3} + {:.3}*t + {:.4}*t^2",
            t.coeffs[0], t.coeffs[1], t.coeffs[2]
        ),
        None => println!("Trend: not enough distinct temperatures to fit."),
    }
    Ok(())
}

/// Rewrite argv so `gridload` defaults to `gridload tui`.
///
/// Rules:
/// - `gridload`                          -> `gridload tui`
/// - `gridload --preset extended ...`    -> `gridload tui --preset extended ...`
/// - `gridload --help/--version/-h`      -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "generate" | "report" | "plot" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
