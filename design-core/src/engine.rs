//! The interaction engine: turns one pointer's press/move/release stream
//! into selection, creation, drag and resize operations on a [`DesignStore`].
//!
//! ```text
//!            press on handle            release/cancel (commit if changed)
//!   Idle ──────────────────────▶ Resizing ───────────────────────────────┐
//!    │ ▲                                                                  │
//!    │ └──────────────────────────────────────────────────────────────────┘
//!    │       press on selected body       release/cancel
//!    └──────────────────────▶ Dragging ─────────────────▶ Idle
//! ```
//!
//! Any other press is a tap, handled immediately without leaving `Idle`.
//! Moves mutate the live element only; the single history commit happens
//! when the gesture ends.

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::event::{PointerEvent, PointerPhase};
use crate::geometry::{Bounds, Point};
use crate::handle::{handle_at, ResizeHandle};
use crate::hit::hit_test;
use crate::store::DesignStore;
use crate::tool::{create_shape, create_text, Tab, Tool};
use crate::{CanvasResult, ElementId};

/// The live gesture, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    /// No gesture in progress.
    Idle,
    /// Moving a selected element.
    Dragging {
        /// Element being moved.
        element_id: ElementId,
        /// Pointer that owns the gesture.
        pointer_id: u32,
        /// Pointer position relative to the element's top-left corner.
        grab_offset: Point,
        /// Element box when the gesture began.
        start: Bounds,
        /// Press timestamp, used when the gesture turns out to be a tap.
        pressed_at: u64,
    },
    /// Dragging one of a selected element's handles.
    Resizing {
        /// Element being resized.
        element_id: ElementId,
        /// Pointer that owns the gesture.
        pointer_id: u32,
        /// Handle being dragged.
        handle: ResizeHandle,
        /// Pointer position at press.
        origin: Point,
        /// Element box when the gesture began.
        start: Bounds,
        /// Press timestamp.
        pressed_at: u64,
    },
}

impl GestureState {
    const fn pointer_id(&self) -> Option<u32> {
        match self {
            Self::Idle => None,
            Self::Dragging { pointer_id, .. } | Self::Resizing { pointer_id, .. } => {
                Some(*pointer_id)
            }
        }
    }

    /// The element the gesture targets.
    #[must_use]
    pub const fn element_id(&self) -> Option<ElementId> {
        match self {
            Self::Idle => None,
            Self::Dragging { element_id, .. } | Self::Resizing { element_id, .. } => {
                Some(*element_id)
            }
        }
    }
}

/// What a pointer event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "id", rename_all = "camelCase")]
pub enum EngineOutcome {
    /// The event was ignored or changed nothing.
    Nothing,
    /// An element was selected.
    Selected(ElementId),
    /// The selection was emptied.
    SelectionCleared,
    /// A tap created an element.
    ElementCreated(ElementId),
    /// A drag or resize began on the element.
    GestureStarted(ElementId),
    /// The live geometry of the element changed.
    GestureUpdated(ElementId),
    /// The gesture ended and was committed to history.
    GestureCommitted(ElementId),
    /// The text editor should open for the element.
    EditRequested(ElementId),
}

#[derive(Debug, Clone, Copy)]
struct LastTap {
    id: ElementId,
    at: u64,
}

/// Gesture state machine driving a [`DesignStore`].
#[derive(Debug)]
pub struct InteractionEngine {
    store: DesignStore,
    config: EditorConfig,
    canvas_offset: Point,
    gesture: GestureState,
    last_tap: Option<LastTap>,
    editing: Option<ElementId>,
}

impl Default for InteractionEngine {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl InteractionEngine {
    /// Create an engine over a fresh store built from `config`.
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        let store = DesignStore::new(&config);
        Self::with_store(store, config)
    }

    /// Create an engine over an existing store.
    #[must_use]
    pub fn with_store(store: DesignStore, config: EditorConfig) -> Self {
        Self {
            store,
            config,
            canvas_offset: Point::default(),
            gesture: GestureState::Idle,
            last_tap: None,
            editing: None,
        }
    }

    /// Read access to the store.
    #[must_use]
    pub fn store(&self) -> &DesignStore {
        &self.store
    }

    /// Write access to the store. Ends any active gesture first.
    pub fn store_mut(&mut self) -> &mut DesignStore {
        self.settle_gesture();
        self.forget_vanished();
        &mut self.store
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The live gesture.
    #[must_use]
    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    /// The text element currently open in the editor.
    ///
    /// `None` once that element has been removed, by undo or otherwise.
    #[must_use]
    pub fn editing(&self) -> Option<ElementId> {
        self.editing.filter(|id| self.store.element(*id).is_some())
    }

    /// Close the text editor.
    pub fn finish_editing(&mut self) {
        self.editing = None;
    }

    /// Where the canvas's top-left corner sits in page coordinates.
    pub fn set_canvas_offset(&mut self, offset: Point) {
        self.canvas_offset = offset;
    }

    /// Feed one pointer event through the state machine.
    ///
    /// # Errors
    ///
    /// Returns an error only if a tap tries to create an element the store
    /// refuses (for example because the design is full).
    pub fn handle_event(&mut self, event: &PointerEvent) -> CanvasResult<EngineOutcome> {
        let point = event.canvas_point(self.canvas_offset);
        match event.phase {
            PointerPhase::Press => self.press(point, event.pointer_id, event.timestamp_ms),
            PointerPhase::Move => Ok(self.move_to(point, event.pointer_id)),
            PointerPhase::Release | PointerPhase::Cancel => {
                Ok(self.release(event.pointer_id))
            }
        }
    }

    /// Finger down at a canvas-local point.
    ///
    /// # Errors
    ///
    /// As [`InteractionEngine::handle_event`].
    pub fn press(&mut self, point: Point, pointer_id: u32, at: u64) -> CanvasResult<EngineOutcome> {
        if self.gesture != GestureState::Idle {
            tracing::debug!("Ignoring press from pointer {pointer_id} during a gesture");
            return Ok(EngineOutcome::Nothing);
        }
        self.forget_vanished();

        if self.store.current_tool() == Tool::Select && !self.store.selection().is_empty() {
            if let Some((id, gesture)) = self.begin_gesture(point, pointer_id, at) {
                self.gesture = gesture;
                tracing::debug!("Gesture started on {id}: {gesture:?}");
                return Ok(EngineOutcome::GestureStarted(id));
            }
        }

        self.tap(point, at)
    }

    /// Finger moved to a canvas-local point.
    pub fn move_to(&mut self, point: Point, pointer_id: u32) -> EngineOutcome {
        if self.gesture.pointer_id() != Some(pointer_id) {
            return EngineOutcome::Nothing;
        }
        let canvas = self.store.canvas();
        let (id, bounds) = match self.gesture {
            GestureState::Idle => return EngineOutcome::Nothing,
            GestureState::Dragging {
                element_id,
                grab_offset,
                start,
                ..
            } => {
                let target = Bounds::new(
                    point.x - grab_offset.x,
                    point.y - grab_offset.y,
                    start.width,
                    start.height,
                );
                (element_id, target.clamp_position(canvas))
            }
            GestureState::Resizing {
                element_id,
                handle,
                origin,
                start,
                ..
            } => {
                let bounds = handle.resize(start, point.x - origin.x, point.y - origin.y, canvas);
                (element_id, bounds)
            }
        };

        if self.store.set_live_bounds(id, bounds) {
            EngineOutcome::GestureUpdated(id)
        } else {
            tracing::debug!("Element {id} vanished mid-gesture");
            self.gesture = GestureState::Idle;
            EngineOutcome::Nothing
        }
    }

    /// Finger up (or gesture cancelled).
    ///
    /// A gesture that changed the element commits one history entry. One
    /// that left it untouched is treated as a tap on the element.
    pub fn release(&mut self, pointer_id: u32) -> EngineOutcome {
        if self.gesture.pointer_id() != Some(pointer_id) {
            return EngineOutcome::Nothing;
        }
        let gesture = std::mem::replace(&mut self.gesture, GestureState::Idle);
        let (id, start, pressed_at) = match gesture {
            GestureState::Idle => return EngineOutcome::Nothing,
            GestureState::Dragging {
                element_id,
                start,
                pressed_at,
                ..
            }
            | GestureState::Resizing {
                element_id,
                start,
                pressed_at,
                ..
            } => (element_id, start, pressed_at),
        };

        let Some(element) = self.store.element(id) else {
            tracing::debug!("Element {id} vanished before release");
            return EngineOutcome::Nothing;
        };
        if element.bounds() == start {
            return self.tap_element(id, pressed_at);
        }

        self.store.commit_gesture();
        self.last_tap = None;
        tracing::debug!("Gesture committed on {id}");
        EngineOutcome::GestureCommitted(id)
    }

    /// Undo, ending any active gesture first.
    pub fn undo(&mut self) -> bool {
        self.settle_gesture();
        let changed = self.store.undo();
        self.forget_vanished();
        changed
    }

    /// Redo, ending any active gesture first.
    pub fn redo(&mut self) -> bool {
        self.settle_gesture();
        let changed = self.store.redo();
        self.forget_vanished();
        changed
    }

    /// Delete the selection, ending any active gesture first.
    pub fn delete_selected(&mut self) -> usize {
        self.settle_gesture();
        let removed = self.store.delete_selected_elements();
        self.forget_vanished();
        removed
    }

    fn begin_gesture(
        &self,
        point: Point,
        pointer_id: u32,
        at: u64,
    ) -> Option<(ElementId, GestureState)> {
        let half = self.config.handle_hit_size;
        for element in self.store.selected_elements().rev() {
            let start = element.bounds();
            if let Some(handle) = handle_at(point, start, half) {
                let gesture = GestureState::Resizing {
                    element_id: element.id,
                    pointer_id,
                    handle,
                    origin: point,
                    start,
                    pressed_at: at,
                };
                return Some((element.id, gesture));
            }
        }
        let padding = self.config.selection_padding;
        self.store
            .selected_elements()
            .rev()
            .find(|e| e.bounds().contains_padded(point, padding))
            .map(|element| {
                let gesture = GestureState::Dragging {
                    element_id: element.id,
                    pointer_id,
                    grab_offset: Point::new(point.x - element.x, point.y - element.y),
                    start: element.bounds(),
                    pressed_at: at,
                };
                (element.id, gesture)
            })
    }

    fn tap(&mut self, point: Point, at: u64) -> CanvasResult<EngineOutcome> {
        if self.store.active_tab() == Tab::Text {
            let id = self.store.add_element(create_text(point))?;
            self.store.set_current_tool(Tool::Select);
            self.store.set_active_tab(Tab::Select);
            self.editing = Some(id);
            self.last_tap = None;
            tracing::debug!("Created text {id} and opened the editor");
            return Ok(EngineOutcome::ElementCreated(id));
        }

        match self.store.current_tool().shape_kind() {
            None => {
                let hit = hit_test(
                    self.store.elements(),
                    point,
                    self.config.selection_padding,
                );
                if let Some(id) = hit {
                    Ok(self.tap_element(id, at))
                } else {
                    self.last_tap = None;
                    if self.store.selection().is_empty() {
                        return Ok(EngineOutcome::Nothing);
                    }
                    self.store.clear_selection();
                    Ok(EngineOutcome::SelectionCleared)
                }
            }
            Some(kind) => {
                let id = self.store.add_element(create_shape(kind, point))?;
                self.store.set_current_tool(Tool::Select);
                self.store.set_active_tab(Tab::Select);
                self.last_tap = None;
                tracing::debug!("Created {} {id}", kind.as_str());
                Ok(EngineOutcome::ElementCreated(id))
            }
        }
    }

    /// A tap on an existing element: double tap opens the text editor,
    /// anything else (re)selects it.
    fn tap_element(&mut self, id: ElementId, at: u64) -> EngineOutcome {
        let is_text = self.store.element(id).is_some_and(crate::Element::is_text);
        let double = self.last_tap.is_some_and(|last| {
            last.id == id && at.saturating_sub(last.at) < self.config.double_tap_ms
        });

        if double && is_text {
            self.last_tap = None;
            self.editing = Some(id);
            self.store.set_active_tab(Tab::Select);
            self.store.set_current_tool(Tool::Select);
            tracing::debug!("Double tap on {id}, opening the editor");
            return EngineOutcome::EditRequested(id);
        }

        if self.store.select_element(id, false).is_err() {
            self.last_tap = None;
            return EngineOutcome::Nothing;
        }
        self.last_tap = Some(LastTap { id, at });
        EngineOutcome::Selected(id)
    }

    /// Drop edit and double-tap state that points at removed elements.
    fn forget_vanished(&mut self) {
        let store = &self.store;
        if self.editing.is_some_and(|id| store.element(id).is_none()) {
            tracing::debug!("Closing the editor; its element is gone");
            self.editing = None;
        }
        if self.last_tap.is_some_and(|tap| store.element(tap.id).is_none()) {
            self.last_tap = None;
        }
    }

    /// End the active gesture, committing whatever it changed.
    fn settle_gesture(&mut self) {
        if let Some(pointer_id) = self.gesture.pointer_id() {
            let start = match self.gesture {
                GestureState::Dragging { start, .. } | GestureState::Resizing { start, .. } => {
                    start
                }
                GestureState::Idle => return,
            };
            let changed = self
                .gesture
                .element_id()
                .and_then(|id| self.store.element(id))
                .is_some_and(|e| e.bounds() != start);
            if changed {
                self.release(pointer_id);
            } else {
                self.gesture = GestureState::Idle;
            }
        }
    }
}
