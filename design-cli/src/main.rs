//! # Design Replay
//!
//! Replays a gesture script against the design surface and saves the result.

use clap::Parser;
use design_cli::{replay_design, CliArgs, Script};
use design_core::{EditorConfig, FileRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: info,design_core=debug).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,design_core=debug,design_cli=debug"));

    // Logs go to stderr so stdout carries only the report.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    tracing::info!("Replaying {}", args.script.display());

    let config = match &args.config {
        Some(path) => EditorConfig::from_file(path).map_err(|e| {
            anyhow::anyhow!("Failed to load config {}: {}", path.display(), e)
        })?,
        None => EditorConfig::default(),
    };
    tracing::debug!(
        "Canvas {}x{}, double tap window {}ms",
        config.canvas_width,
        config.canvas_height,
        config.double_tap_ms
    );

    let script = Script::from_file(&args.script)
        .map_err(|e| anyhow::anyhow!("Failed to read script {}: {}", args.script.display(), e))?;
    let repository = FileRepository::new(&args.data_dir).map_err(|e| {
        anyhow::anyhow!(
            "Failed to open data directory {}: {}",
            args.data_dir.display(),
            e
        )
    })?;

    let report = replay_design(
        config,
        &script,
        &repository,
        &args.design_id,
        args.base.as_deref(),
    )?;
    tracing::info!(
        "Saved design {} ({} elements) to {}",
        report.receipt.design_id,
        report.receipt.element_count,
        repository.data_dir().display()
    );

    let output = if args.document_only {
        serde_json::to_string_pretty(&report.document)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{output}");
    Ok(())
}
