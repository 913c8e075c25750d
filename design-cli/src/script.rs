//! Gesture scripts.
//!
//! A script is a JSON object with an ordered list of `steps` and an optional
//! queue of `images` that stands in for the platform picker:
//!
//! ```json
//! {
//!   "images": [{ "outcome": "picked", "uri": "file:///cat.png" }],
//!   "steps": [
//!     { "op": "tab", "tab": "shapes" },
//!     { "op": "tool", "tool": "rectangle" },
//!     { "op": "pointer", "phase": "press", "x": 150, "y": 125 },
//!     { "op": "insertImage" },
//!     { "op": "undo" }
//!   ]
//! }
//! ```

use std::collections::VecDeque;
use std::path::Path;

use design_core::{
    CanvasError, CanvasResult, ColorTarget, ElementId, EngineOutcome, ImageInsert, ImagePick,
    ImageSource, InteractionEngine, Point, PointerEvent, Tab, TextEdit, Tool,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or replaying a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The script is not valid JSON or has an unknown step.
    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),

    /// A step was rejected by the editor.
    #[error("Step {index} failed: {source}")]
    Step {
        /// Zero-based position of the failing step.
        index: usize,
        /// What the editor reported.
        #[source]
        source: CanvasError,
    },

    /// Loading or saving the design failed.
    #[error("Design error: {0}")]
    Canvas(#[from] CanvasError),
}

/// One scripted user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ScriptStep {
    /// A raw pointer event in page coordinates.
    Pointer(PointerEvent),
    /// Pick a tool from the toolbar.
    Tool {
        /// The tool to activate.
        tool: Tool,
    },
    /// Switch the bottom panel tab.
    Tab {
        /// The tab to activate.
        tab: Tab,
    },
    /// Move the canvas on the page.
    CanvasOffset {
        /// Canvas left edge in page coordinates.
        x: f32,
        /// Canvas top edge in page coordinates.
        y: f32,
    },
    /// Undo the last commit.
    Undo,
    /// Redo the last undone commit.
    Redo,
    /// Delete the selection.
    Delete,
    /// Remove every element.
    Clear,
    /// Confirm a color picker choice.
    Color {
        /// Where the color goes.
        target: ColorTarget,
        /// The picked color.
        color: String,
    },
    /// Save the text editor overlay for the element being edited.
    ///
    /// Does nothing when no overlay is open, for example after its element
    /// was undone away.
    EditText(TextEdit),
    /// Close the text editor overlay without saving.
    FinishEditing,
    /// Open the image picker; it answers with the next queued image.
    InsertImage,
}

/// A replayable gesture script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Script {
    /// Answers the image picker gives, in order.
    pub images: Vec<ImagePick>,
    /// Actions to replay, in order.
    pub steps: Vec<ScriptStep>,
}

impl Script {
    /// Parse a script from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Parse`] for malformed JSON or unknown steps.
    pub fn from_json_str(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a script file.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Io`] if the file cannot be read, otherwise as
    /// [`Script::from_json_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

/// What a replayed step did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", content = "result", rename_all = "camelCase")]
pub enum StepResult {
    /// Outcome of a pointer event.
    Pointer(EngineOutcome),
    /// Whether undo changed anything.
    Undo(bool),
    /// Whether redo changed anything.
    Redo(bool),
    /// Number of elements deleted.
    Delete(usize),
    /// Number of elements recolored (0 for the canvas background).
    Color(usize),
    /// The text element that was edited.
    EditText(ElementId),
    /// Result of the image picker hand-off.
    InsertImage(ImageInsert),
    /// The step has no result to report.
    Done,
}

/// Image source that answers from the script's queue.
#[derive(Debug, Default)]
pub struct ScriptedImages {
    picks: VecDeque<ImagePick>,
}

impl ScriptedImages {
    /// Queue the given picker answers.
    #[must_use]
    pub fn new(picks: impl IntoIterator<Item = ImagePick>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
        }
    }
}

impl ImageSource for ScriptedImages {
    fn pick_image(&mut self) -> CanvasResult<ImagePick> {
        self.picks
            .pop_front()
            .ok_or_else(|| CanvasError::ImageSource("no scripted image left".into()))
    }
}

/// Replay every step of `script` against `engine`.
///
/// # Errors
///
/// Returns [`ScriptError::Step`] for the first step the editor rejects.
/// Steps before it stay applied.
pub fn replay(
    engine: &mut InteractionEngine,
    script: &Script,
) -> Result<Vec<StepResult>, ScriptError> {
    let mut images = ScriptedImages::new(script.images.iter().cloned());
    let mut results = Vec::with_capacity(script.steps.len());
    for (index, step) in script.steps.iter().enumerate() {
        let result = apply_step(engine, &mut images, step)
            .map_err(|source| ScriptError::Step { index, source })?;
        tracing::debug!("Step {index} {step:?} -> {result:?}");
        results.push(result);
    }
    Ok(results)
}

fn apply_step(
    engine: &mut InteractionEngine,
    images: &mut ScriptedImages,
    step: &ScriptStep,
) -> CanvasResult<StepResult> {
    let result = match step {
        ScriptStep::Pointer(event) => StepResult::Pointer(engine.handle_event(event)?),
        ScriptStep::Tool { tool } => {
            engine.store_mut().set_current_tool(*tool);
            StepResult::Done
        }
        ScriptStep::Tab { tab } => {
            engine.store_mut().set_active_tab(*tab);
            StepResult::Done
        }
        ScriptStep::CanvasOffset { x, y } => {
            engine.set_canvas_offset(Point::new(*x, *y));
            StepResult::Done
        }
        ScriptStep::Undo => StepResult::Undo(engine.undo()),
        ScriptStep::Redo => StepResult::Redo(engine.redo()),
        ScriptStep::Delete => StepResult::Delete(engine.delete_selected()),
        ScriptStep::Clear => {
            engine.store_mut().clear_design();
            StepResult::Done
        }
        ScriptStep::Color { target, color } => {
            StepResult::Color(engine.store_mut().apply_color(*target, color)?)
        }
        ScriptStep::EditText(edit) => {
            if let Some(id) = engine.editing() {
                engine.store_mut().apply_text_edit(id, edit)?;
                engine.finish_editing();
                StepResult::EditText(id)
            } else {
                tracing::warn!("Ignoring text edit; no text element is being edited");
                StepResult::Done
            }
        }
        ScriptStep::FinishEditing => {
            engine.finish_editing();
            StepResult::Done
        }
        ScriptStep::InsertImage => StepResult::InsertImage(engine.store_mut().insert_image(images)?),
    };
    Ok(result)
}
