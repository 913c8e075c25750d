//! # Design Replay
//!
//! Headless host for `design-core`. Replays a JSON gesture script through the
//! interaction engine, saves the resulting design and reports what each step
//! did.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p design-cli -- demos/poster.json --design-id poster
//! ```
//!
//! ## Continuing a saved design
//!
//! ```bash
//! DESIGN_DATA_DIR=./designs cargo run -p design-cli -- more.json --base poster --design-id poster-v2
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `script` - Script format and the step replayer
//! - `replay_design` - Load, replay and save in one call

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

pub mod script;

use std::path::PathBuf;

use clap::Parser;
use design_core::{DesignDocument, DesignRepository, EditorConfig, InteractionEngine, SaveReceipt};
use serde::Serialize;

pub use script::{replay, Script, ScriptError, ScriptStep, ScriptedImages, StepResult};

/// Command-line arguments for design-replay.
#[derive(Debug, Clone, Parser)]
#[command(name = "design-replay")]
#[command(about = "Replay a gesture script against the design surface and save the result")]
#[command(version)]
pub struct CliArgs {
    /// Path to the JSON gesture script
    pub script: PathBuf,

    /// Id to save the resulting design under
    #[arg(long, default_value = "untitled")]
    pub design_id: String,

    /// Directory designs are stored in
    #[arg(long, env = "DESIGN_DATA_DIR", default_value = "designs")]
    pub data_dir: PathBuf,

    /// Editor configuration file (JSON)
    #[arg(long, env = "DESIGN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Saved design to load before replaying
    #[arg(long)]
    pub base: Option<String>,

    /// Print only the saved document instead of the full report
    #[arg(long)]
    pub document_only: bool,
}

/// Everything a replay produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    /// Confirmation from the repository.
    pub receipt: SaveReceipt,
    /// One result per script step.
    pub steps: Vec<StepResult>,
    /// The design as saved.
    pub document: DesignDocument,
}

/// Load the optional base design, replay `script` and save under `design_id`.
///
/// # Errors
///
/// Returns [`ScriptError::Canvas`] if the base design cannot be loaded or the
/// result cannot be saved, and [`ScriptError::Step`] for a rejected step. A
/// failed step means nothing is saved.
pub fn replay_design(
    config: EditorConfig,
    script: &Script,
    repository: &dyn DesignRepository,
    design_id: &str,
    base: Option<&str>,
) -> Result<ReplayReport, ScriptError> {
    let mut engine = InteractionEngine::new(config);
    if let Some(base) = base {
        engine.store_mut().load_design(repository, base)?;
    }

    let steps = replay(&mut engine, script)?;
    tracing::info!(
        "Replayed {} steps, design has {} elements",
        steps.len(),
        engine.store().elements().len()
    );

    let document = engine.store().to_document(design_id);
    let receipt = repository.save(design_id, &document)?;
    Ok(ReplayReport {
        receipt,
        steps,
        document,
    })
}
