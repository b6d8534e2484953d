//! Process command - parse a directory of matrix files and cache them

use crate::cli::args::{OutputFormat, ProcessArgs};
use crate::config::Config;
use crate::driver::{list_input_files, run_batch, BatchReport, DriverOptions};
use crate::error::{MatcacheError, MatcacheResult};
use crate::report::{write_timing, RunSummary};
use crate::store::{MemoryConnector, RedisConnector, StoreConnector};
use crate::ui::{self, FileProgress, UiContext};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Execute the process command
pub async fn execute(args: ProcessArgs, config: &Config) -> MatcacheResult<()> {
    let ctx = UiContext::detect().with_quiet(args.format.is_machine_readable());

    let dir = args
        .dir
        .clone()
        .or_else(|| config.input.dir.clone())
        .ok_or(MatcacheError::InputDirMissing)?;

    let mut workers = config.workers.clone();
    if let Some(max) = args.workers {
        workers.max_workers = max;
    }
    if let Some(secs) = args.timeout {
        workers.timeout_secs = secs;
    }
    let options = DriverOptions::from_config(&workers);

    let report_path = args
        .report
        .clone()
        .unwrap_or_else(|| config.report.path.clone());

    let files = list_input_files(&dir).await?;
    debug!("Found {} file(s) in {}", files.len(), dir.display());

    let connector: Arc<dyn StoreConnector> = if args.dry_run {
        Arc::new(MemoryConnector::default())
    } else {
        Arc::new(RedisConnector::new(&args.cache.resolve(config))?)
    };

    ui::intro(&ctx, "matcache");
    ui::key_value(&ctx, "input", &dir.display().to_string());
    ui::key_value(&ctx, "cache", &connector.describe());
    ui::key_value(&ctx, "workers", &options.workers.to_string());
    ui::key_value(&ctx, "files", &files.len().to_string());

    let mut progress = FileProgress::new(&ctx, files.len());
    let report = run_batch(files, connector, options, |path| progress.file_done(path)).await;
    progress.finish();

    // Keep stdout valid JSON in json mode
    let timing = report.timing_line();
    if args.format == OutputFormat::Json {
        eprintln!("{}", timing);
    } else {
        println!("{}", timing);
    }

    write_timing(&report_path, &report).await?;

    match args.format {
        OutputFormat::Table => print_summary(&ctx, &report, &report_path),
        OutputFormat::Json => print_json(&report, options.workers)?,
        OutputFormat::Plain => print_plain(&report),
    }

    Ok(())
}

fn print_summary(ctx: &UiContext, report: &BatchReport, report_path: &Path) {
    ui::step_ok_detail(
        ctx,
        &format!("Cached {} matrices", report.matrices_cached()),
        &format!("{} file(s)", report.outcomes.len()),
    );

    if report.line_errors() > 0 {
        ui::step_warn_hint(
            ctx,
            &format!("Skipped {} malformed line(s)", report.line_errors()),
            "see warnings above",
        );
    }

    if report.write_failures() > 0 {
        ui::step_warn_hint(
            ctx,
            &format!("{} matrices could not be written", report.write_failures()),
            "check the cache connection",
        );
    }

    for outcome in report.outcomes.iter().filter(|o| o.read_error.is_some()) {
        ui::step_error_detail(
            ctx,
            &format!("Unreadable {}", outcome.path.display()),
            outcome.read_error.as_deref().unwrap_or_default(),
        );
    }

    for failure in &report.failures {
        ui::step_error_detail(
            ctx,
            &format!("Failed {}", failure.path.display()),
            &failure.reason,
        );
    }

    for path in &report.abandoned {
        ui::step_warn_hint(
            ctx,
            &format!("Abandoned {}", path.display()),
            "raise --timeout to let it finish",
        );
    }

    ui::step_ok(ctx, &format!("Report written to {}", report_path.display()));

    if report.is_clean() {
        ui::outro_success(ctx, "All files cached");
    } else {
        ui::outro_warn(ctx, "Finished with problems");
    }
}

fn print_json(report: &BatchReport, workers: usize) -> MatcacheResult<()> {
    let summary = RunSummary::new(report, workers);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn print_plain(report: &BatchReport) {
    for outcome in &report.outcomes {
        println!("{}\t{}", outcome.path.display(), outcome.matrices_cached());
    }
}
