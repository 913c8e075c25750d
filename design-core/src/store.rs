//! The design store: element list, selection, background, tool state and
//! undo history behind one set of operations.
//!
//! Every committing operation follows the same steps: remember the live
//! selection on the current history entry, mutate, normalize geometry, push a
//! snapshot, then notify listeners. Gestures bypass the log through
//! [`DesignStore::set_live_bounds`] and commit once when they end.

use serde::{Deserialize, Serialize};

use crate::collab::{ColorTarget, ImageInsert, ImagePick, ImageSource, Notice, TextEdit};
use crate::config::EditorConfig;
use crate::geometry::{Bounds, CanvasSize};
use crate::history::{History, Snapshot};
use crate::persistence::{current_timestamp_ms, DesignRepository, SaveReceipt};
use crate::schema::DesignDocument;
use crate::selection::Selection;
use crate::tool::{create_image, Tab, Tool};
use crate::validation::{
    validate_color, validate_design_id, validate_finite, validate_text, ValidationError,
    MAX_ELEMENTS_PER_DESIGN,
};
use crate::{CanvasError, CanvasResult, Element, ElementId, ElementKind, ElementPatch};

/// Color reported to the picker when nothing better applies.
const FALLBACK_PICKER_COLOR: &str = "#FFFFFF";

/// What changed in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StoreEvent {
    /// Elements were added, removed or modified.
    ElementsChanged,
    /// The selection changed.
    SelectionChanged,
    /// The canvas background changed.
    BackgroundChanged,
    /// The active tool changed.
    ToolChanged,
    /// The active tab changed.
    TabChanged,
    /// Undo/redo availability may have changed.
    HistoryChanged,
}

/// Callback invoked for every store event.
pub type StoreListener = Box<dyn Fn(&StoreEvent) + Send + Sync>;

/// Handle returned by [`DesignStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Canonical editor state.
pub struct DesignStore {
    canvas: CanvasSize,
    elements: Vec<Element>,
    background_color: String,
    default_background: String,
    tool: Tool,
    tab: Tab,
    selection: Selection,
    history: History,
    listeners: Vec<(SubscriptionId, StoreListener)>,
    next_subscription: u64,
}

impl std::fmt::Debug for DesignStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesignStore")
            .field("canvas", &self.canvas)
            .field("elements", &self.elements.len())
            .field("background_color", &self.background_color)
            .field("tool", &self.tool)
            .field("tab", &self.tab)
            .field("selection", &self.selection)
            .field("history", &self.history.len())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Default for DesignStore {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl DesignStore {
    /// Create an empty design sized and colored per `config`.
    #[must_use]
    pub fn new(config: &EditorConfig) -> Self {
        let initial = Snapshot {
            elements: Vec::new(),
            background_color: config.background_color.clone(),
            selection: Vec::new(),
        };
        Self {
            canvas: config.canvas(),
            elements: Vec::new(),
            background_color: config.background_color.clone(),
            default_background: config.background_color.clone(),
            tool: Tool::Select,
            tab: config.initial_tab,
            selection: Selection::new(),
            history: History::new(initial, config.history_limit),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    /// Elements in z-order (last is topmost).
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Look up an element by id.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// The selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selected ids in selection order.
    #[must_use]
    pub fn selected_ids(&self) -> &[ElementId] {
        self.selection.ids()
    }

    /// Selected elements in z-order.
    pub fn selected_elements(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.elements
            .iter()
            .filter(|e| self.selection.contains(e.id))
    }

    /// Canvas background color.
    #[must_use]
    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    /// Canvas extent.
    #[must_use]
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// Active tool.
    #[must_use]
    pub fn current_tool(&self) -> Tool {
        self.tool
    }

    /// Active tab.
    #[must_use]
    pub fn active_tab(&self) -> Tab {
        self.tab
    }

    /// Whether [`DesignStore::undo`] would do anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether [`DesignStore::redo`] would do anything.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of snapshots in the undo log.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    // -----------------------------------------------------------------------
    // Element mutations
    // -----------------------------------------------------------------------

    /// Append an element on top, select it and commit.
    ///
    /// The element's geometry is normalized into the canvas first.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidOperation`] for a duplicate id and
    /// [`CanvasError::Validation`] for bad content or a full design.
    pub fn add_element(&mut self, mut element: Element) -> CanvasResult<ElementId> {
        if self.elements.len() >= MAX_ELEMENTS_PER_DESIGN {
            return Err(ValidationError::TooManyElements.into());
        }
        if self.element(element.id).is_some() {
            return Err(CanvasError::InvalidOperation(format!(
                "element {} already exists",
                element.id
            )));
        }
        validate_element(&element)?;
        element.normalize(self.canvas);

        let id = element.id;
        self.checkpoint_selection();
        self.elements.push(element);
        self.selection.select(id, false);
        self.sync_selected_flags();
        self.push_history();
        tracing::debug!(
            "Added {} element {id}",
            self.elements.last().map_or("", Element::type_name)
        );
        self.notify(&[StoreEvent::ElementsChanged, StoreEvent::SelectionChanged]);
        Ok(id)
    }

    /// Merge `patch` into an element and commit.
    ///
    /// A patch that leaves the element unchanged does not commit.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ElementNotFound`] for an unknown id, otherwise
    /// the errors of [`Element::apply_patch`]. The element is untouched on
    /// error.
    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) -> CanvasResult<()> {
        let index = self.index_of(id)?;
        let mut next = self.elements[index].clone();
        next.apply_patch(patch)?;
        next.normalize(self.canvas);
        if next == self.elements[index] {
            return Ok(());
        }
        self.checkpoint_selection();
        self.elements[index] = next;
        self.push_history();
        tracing::debug!("Updated element {id}");
        self.notify(&[StoreEvent::ElementsChanged]);
        Ok(())
    }

    /// Move an element's top-left corner and commit.
    ///
    /// # Errors
    ///
    /// As [`DesignStore::update_element`].
    pub fn move_element(&mut self, id: ElementId, x: f32, y: f32) -> CanvasResult<()> {
        self.update_element(id, &ElementPatch::position(x, y))
    }

    /// Resize an element and commit.
    ///
    /// # Errors
    ///
    /// As [`DesignStore::update_element`].
    pub fn resize_element(&mut self, id: ElementId, width: f32, height: f32) -> CanvasResult<()> {
        self.update_element(id, &ElementPatch::size(width, height))
    }

    /// Remove every selected element, empty the selection and commit.
    ///
    /// Returns the number of elements removed; nothing is committed when the
    /// selection is empty.
    pub fn delete_selected_elements(&mut self) -> usize {
        if self.selection.is_empty() {
            return 0;
        }
        self.checkpoint_selection();
        let before = self.elements.len();
        let selection = &self.selection;
        self.elements.retain(|e| !selection.contains(e.id));
        let removed = before - self.elements.len();
        self.selection.clear();
        self.push_history();
        tracing::debug!("Deleted {removed} selected elements");
        self.notify(&[StoreEvent::ElementsChanged, StoreEvent::SelectionChanged]);
        removed
    }

    /// Remove every element, restore the default background and commit.
    pub fn clear_design(&mut self) {
        self.checkpoint_selection();
        self.elements.clear();
        self.selection.clear();
        self.background_color.clone_from(&self.default_background);
        self.push_history();
        tracing::debug!("Cleared design");
        self.notify(&[
            StoreEvent::ElementsChanged,
            StoreEvent::SelectionChanged,
            StoreEvent::BackgroundChanged,
        ]);
    }

    /// Set the canvas background and commit.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Validation`] for a malformed color.
    pub fn set_canvas_background_color(&mut self, color: &str) -> CanvasResult<()> {
        validate_color(color)?;
        if self.background_color == color {
            return Ok(());
        }
        self.checkpoint_selection();
        self.background_color = color.to_string();
        self.push_history();
        self.notify(&[StoreEvent::BackgroundChanged]);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    /// Step back one commit. Returns false at the oldest entry.
    pub fn undo(&mut self) -> bool {
        self.checkpoint_selection();
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        tracing::debug!("Undo to history position {}", self.history.position());
        true
    }

    /// Step forward one commit. Returns false at the newest entry.
    pub fn redo(&mut self) -> bool {
        self.checkpoint_selection();
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        tracing::debug!("Redo to history position {}", self.history.position());
        true
    }

    // -----------------------------------------------------------------------
    // Selection, tool and tab (not undoable)
    // -----------------------------------------------------------------------

    /// Select an element, replacing or toggling per `additive`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ElementNotFound`] for an unknown id.
    pub fn select_element(&mut self, id: ElementId, additive: bool) -> CanvasResult<()> {
        self.index_of(id)?;
        let before = self.selection.clone();
        self.selection.select(id, additive);
        if self.selection != before {
            self.sync_selected_flags();
            self.notify(&[StoreEvent::SelectionChanged]);
        }
        Ok(())
    }

    /// Empty the selection.
    pub fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        self.sync_selected_flags();
        self.notify(&[StoreEvent::SelectionChanged]);
    }

    /// Switch the active tool.
    pub fn set_current_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            self.tool = tool;
            self.notify(&[StoreEvent::ToolChanged]);
        }
    }

    /// Switch the active tab.
    pub fn set_active_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.notify(&[StoreEvent::TabChanged]);
        }
    }

    // -----------------------------------------------------------------------
    // Collaborator hand-offs
    // -----------------------------------------------------------------------

    /// Apply a picked color to the canvas or to the selection, in one commit.
    ///
    /// Selected elements without a fill color are skipped. Returns how many
    /// targets changed.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Validation`] for a malformed color.
    pub fn apply_color(&mut self, target: ColorTarget, color: &str) -> CanvasResult<usize> {
        validate_color(color)?;
        match target {
            ColorTarget::Canvas => {
                let changed = self.background_color != color;
                self.set_canvas_background_color(color)?;
                Ok(usize::from(changed))
            }
            ColorTarget::Selection => {
                let targets: Vec<usize> = self
                    .elements
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| {
                        self.selection.contains(e.id)
                            && e.background_color().is_some_and(|c| c != color)
                    })
                    .map(|(i, _)| i)
                    .collect();
                if targets.is_empty() {
                    return Ok(0);
                }
                self.checkpoint_selection();
                for &i in &targets {
                    if let ElementKind::Shape {
                        background_color, ..
                    } = &mut self.elements[i].kind
                    {
                        *background_color = color.to_string();
                    }
                }
                self.push_history();
                self.notify(&[StoreEvent::ElementsChanged]);
                Ok(targets.len())
            }
        }
    }

    /// The color the picker should open with for `target`.
    #[must_use]
    pub fn initial_color(&self, target: ColorTarget) -> String {
        match target {
            ColorTarget::Canvas => self.background_color.clone(),
            ColorTarget::Selection => self
                .selected_elements()
                .find_map(Element::background_color)
                .unwrap_or(FALLBACK_PICKER_COLOR)
                .to_string(),
        }
    }

    /// Apply the text editor's result to a text element in one commit.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ElementNotFound`] for an unknown id,
    /// [`CanvasError::InvalidOperation`] if the element is not text, and
    /// validation errors for bad content.
    pub fn apply_text_edit(&mut self, id: ElementId, edit: &TextEdit) -> CanvasResult<()> {
        let index = self.index_of(id)?;
        if !self.elements[index].is_text() {
            return Err(CanvasError::InvalidOperation(format!(
                "element {id} is not text"
            )));
        }
        let patch = ElementPatch {
            text: edit.text.clone(),
            font_size: edit.font_size,
            font_family: edit.font_family.clone(),
            color: edit.color.clone(),
            ..ElementPatch::default()
        };
        self.update_element(id, &patch)
    }

    /// Ask `source` for an image and insert it.
    ///
    /// Cancellation, permission denial and picker failures come back as a
    /// [`Notice`] with the design unchanged.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`DesignStore::add_element`].
    pub fn insert_image(&mut self, source: &mut dyn ImageSource) -> CanvasResult<ImageInsert> {
        match source.pick_image() {
            Ok(pick) => self.insert_picked_image(pick),
            Err(e) => {
                tracing::warn!("Image source failed: {e}");
                Ok(ImageInsert::Notice(Notice::ImageSourceFailed(e.to_string())))
            }
        }
    }

    /// Insert the result of an image pick that already completed.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`DesignStore::add_element`].
    pub fn insert_picked_image(&mut self, pick: ImagePick) -> CanvasResult<ImageInsert> {
        match pick {
            ImagePick::Picked { uri } => {
                if uri.is_empty() {
                    tracing::warn!("Inserting image element with an empty URI");
                }
                let id = self.add_element(create_image(uri))?;
                Ok(ImageInsert::Inserted(id))
            }
            ImagePick::Cancelled => Ok(ImageInsert::Notice(Notice::ImagePickCancelled)),
            ImagePick::PermissionDenied => {
                tracing::warn!("Media library permission denied");
                Ok(ImageInsert::Notice(Notice::PermissionDenied(
                    "Media library access is required to add images".into(),
                )))
            }
        }
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// The live design as a serializable document.
    #[must_use]
    pub fn to_document(&self, design_id: &str) -> DesignDocument {
        DesignDocument::from_elements(
            design_id,
            self.canvas,
            self.background_color.clone(),
            &self.elements,
            current_timestamp_ms(),
        )
    }

    /// Write the live design to `repository`. Never changes editor state.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Validation`] for a bad id and any repository
    /// error.
    pub fn save_design(
        &self,
        repository: &dyn DesignRepository,
        design_id: &str,
    ) -> CanvasResult<SaveReceipt> {
        validate_design_id(design_id)?;
        repository.save(design_id, &self.to_document(design_id))
    }

    /// Replace the live design with one from `repository`.
    ///
    /// Empties the selection and resets history to the loaded state. On error
    /// the editor is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::DesignNotFound`], malformed-document and
    /// validation errors, and any repository error.
    pub fn load_design(
        &mut self,
        repository: &dyn DesignRepository,
        design_id: &str,
    ) -> CanvasResult<()> {
        validate_design_id(design_id)?;
        let document = repository.load(design_id)?;
        validate_color(&document.background_color)?;
        let mut elements = document.to_elements()?;
        if document.canvas != self.canvas {
            tracing::warn!(
                "Design {design_id} was saved on a {}x{} canvas; fitting to {}x{}",
                document.canvas.width,
                document.canvas.height,
                self.canvas.width,
                self.canvas.height
            );
        }
        for element in &mut elements {
            validate_element(element)?;
            element.normalize(self.canvas);
            element.selected = false;
        }

        self.elements = elements;
        self.background_color = document.background_color;
        self.selection.clear();
        self.history.reset(self.snapshot());
        tracing::info!(
            "Loaded design {design_id} with {} elements",
            self.elements.len()
        );
        self.notify(&[
            StoreEvent::ElementsChanged,
            StoreEvent::SelectionChanged,
            StoreEvent::BackgroundChanged,
            StoreEvent::HistoryChanged,
        ]);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Change notification
    // -----------------------------------------------------------------------

    /// Register a listener for store events.
    pub fn subscribe(
        &mut self,
        listener: impl Fn(&StoreEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    // -----------------------------------------------------------------------
    // Gesture support
    // -----------------------------------------------------------------------

    /// Overwrite an element's box without touching history.
    ///
    /// Returns false if the element no longer exists.
    pub(crate) fn set_live_bounds(&mut self, id: ElementId, bounds: Bounds) -> bool {
        let canvas = self.canvas;
        let Some(element) = self.elements.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        element.set_bounds(bounds);
        element.normalize(canvas);
        self.notify(&[StoreEvent::ElementsChanged]);
        true
    }

    /// Commit the live state reached by a gesture.
    pub(crate) fn commit_gesture(&mut self) {
        self.checkpoint_selection();
        self.push_history();
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn index_of(&self, id: ElementId) -> CanvasResult<usize> {
        self.elements
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CanvasError::ElementNotFound(id.to_string()))
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            elements: self.elements.clone(),
            background_color: self.background_color.clone(),
            selection: self.selection.ids().to_vec(),
        }
    }

    /// Remember the live selection on the entry about to be left.
    fn checkpoint_selection(&mut self) {
        self.history.record_selection(self.selection.ids());
    }

    fn push_history(&mut self) {
        self.history.push(self.snapshot());
        self.notify(&[StoreEvent::HistoryChanged]);
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.elements = snapshot.elements;
        self.background_color = snapshot.background_color;
        let elements = &self.elements;
        self.selection = Selection::from_ids(snapshot.selection);
        self.selection
            .retain(|id| elements.iter().any(|e| e.id == id));
        self.sync_selected_flags();
        self.notify(&[
            StoreEvent::ElementsChanged,
            StoreEvent::SelectionChanged,
            StoreEvent::BackgroundChanged,
            StoreEvent::HistoryChanged,
        ]);
    }

    fn sync_selected_flags(&mut self) {
        for element in &mut self.elements {
            element.selected = self.selection.contains(element.id);
        }
    }

    fn notify(&self, events: &[StoreEvent]) {
        for event in events {
            for (_, listener) in &self.listeners {
                listener(event);
            }
        }
    }
}

/// Check an element's content before it enters the store.
fn validate_element(element: &Element) -> CanvasResult<()> {
    validate_finite("x", element.x)?;
    validate_finite("y", element.y)?;
    validate_finite("width", element.width)?;
    validate_finite("height", element.height)?;
    match &element.kind {
        ElementKind::Shape {
            background_color, ..
        } => validate_color(background_color)?,
        ElementKind::Text {
            text,
            font_size,
            color,
            ..
        } => {
            validate_text(text)?;
            validate_finite("fontSize", *font_size)?;
            validate_color(color)?;
        }
        ElementKind::Image { .. } => {}
    }
    Ok(())
}
