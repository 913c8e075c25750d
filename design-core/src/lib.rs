//! # Design Core
//!
//! Element model and interaction engine for a touch-driven vector design
//! surface. Framework-free: a host feeds pointer events in and draws the
//! render view out.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │            InteractionEngine                │
//! │  - Idle / Dragging / Resizing               │
//! │  - Tap dispatch, double tap                 │
//! ├─────────────────────────────────────────────┤
//! │  DesignStore      │  Geometry               │
//! │  - Elements       │  - Hit testing          │
//! │  - Selection      │  - Resize handles       │
//! │  - History        │  - Canvas clamping      │
//! ├─────────────────────────────────────────────┤
//! │  Schema + DesignRepository (file / memory)  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use design_core::{EditorConfig, InteractionEngine, PointerEvent, Tab, Tool};
//!
//! let mut engine = InteractionEngine::new(EditorConfig::default());
//! engine.store_mut().set_active_tab(Tab::Shapes);
//! engine.store_mut().set_current_tool(Tool::Rectangle);
//! engine.handle_event(&PointerEvent::press(150.0, 125.0, 0)).unwrap();
//!
//! let store = engine.store();
//! assert_eq!(store.elements().len(), 1);
//! assert_eq!(store.current_tool(), Tool::Select);
//! assert!(store.can_undo());
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod collab;
pub mod config;
pub mod element;
pub mod engine;
pub mod error;
pub mod event;
pub mod geometry;
pub mod handle;
pub mod history;
pub mod hit;
pub mod persistence;
pub mod schema;
pub mod selection;
pub mod store;
pub mod tool;
pub mod validation;
pub mod view;

pub use collab::{ColorTarget, ImageInsert, ImagePick, ImageSource, Notice, TextEdit};
pub use config::EditorConfig;
pub use element::{
    min_font_size, text_extent, Element, ElementId, ElementKind, ElementPatch, ShapeKind,
};
pub use engine::{EngineOutcome, GestureState, InteractionEngine};
pub use error::{CanvasError, CanvasResult};
pub use event::{PointerEvent, PointerPhase};
pub use geometry::{Bounds, CanvasSize, Point, MIN_ELEMENT_SIZE};
pub use handle::{handle_at, ResizeHandle};
pub use history::{History, Snapshot};
pub use hit::{hit_test, hit_test_all};
pub use persistence::{DesignRepository, FileRepository, MemoryRepository, SaveReceipt};
pub use schema::{DesignDocument, ElementDocument, ElementType};
pub use selection::Selection;
pub use store::{DesignStore, StoreEvent, StoreListener, SubscriptionId};
pub use tool::{create_shape, create_text, Tab, Tool};
pub use validation::ValidationError;
pub use view::{DrawCommand, HandleRect, Primitive};

/// Design core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
