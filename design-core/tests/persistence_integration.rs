//! Integration tests for design persistence.
//!
//! Tests filesystem persistence across editor recreation (simulating an app
//! restart), the on-disk schema, and failure isolation.

use design_core::{
    Bounds, CanvasError, DesignRepository, DesignStore, EditorConfig, Element, ElementKind,
    FileRepository, InteractionEngine, Point, ShapeKind, Tab, Tool,
};

/// Build a store holding one of each element family.
fn populated_store() -> DesignStore {
    let mut store = DesignStore::default();
    store
        .add_element(Element::shape(
            ShapeKind::Triangle,
            Bounds::new(40.0, 40.0, 80.0, 70.0),
            "#118AB2",
        ))
        .expect("add triangle");
    store
        .add_element(Element::text(
            10.0,
            300.0,
            "Persistent text",
            24.0,
            "Helvetica",
            "#333333",
        ))
        .expect("add text");
    store
        .add_element(Element::image(
            Bounds::new(100.0, 100.0, 200.0, 150.0),
            "file:///photos/cat.png",
        ))
        .expect("add image");
    store
        .set_canvas_background_color("#F0F0F0")
        .expect("background");
    store
}

// ===========================================================================
// Test 1: Persistence across editor recreation
// ===========================================================================

#[test]
fn test_persistence_across_editor_recreation() {
    let dir = tempfile::tempdir().expect("tempdir");

    // Phase 1: build a design and save it
    let saved = {
        let repo = FileRepository::new(dir.path()).expect("repo1");
        let store = populated_store();
        let receipt = store.save_design(&repo, "launch-poster").expect("save");
        assert_eq!(receipt.element_count, 3);
        store.elements().to_vec()
    };
    // Editor and repository dropped; only the file remains

    // Phase 2: open a new editor on the same directory
    let repo = FileRepository::new(dir.path()).expect("repo2");
    assert_eq!(repo.list().expect("list"), vec!["launch-poster".to_string()]);

    let mut store = DesignStore::default();
    store.load_design(&repo, "launch-poster").expect("load");
    assert_eq!(store.elements().len(), saved.len());
    for (loaded, original) in store.elements().iter().zip(&saved) {
        assert_eq!(loaded.id, original.id);
        assert_eq!(loaded.kind, original.kind);
        assert_eq!(loaded.bounds(), original.bounds());
        assert!(!loaded.selected);
    }
    assert_eq!(store.background_color(), "#F0F0F0");
    assert!(store.selection().is_empty());
    assert!(!store.can_undo(), "load starts a fresh history");
}

// ===========================================================================
// Test 2: On-disk schema
// ===========================================================================

#[test]
fn test_saved_file_uses_flat_tagged_elements() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = FileRepository::new(dir.path()).expect("repo");
    populated_store()
        .save_design(&repo, "schema-check")
        .expect("save");

    let raw = std::fs::read_to_string(dir.path().join("schema-check.json")).expect("read");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(json["designId"], "schema-check");
    assert_eq!(json["backgroundColor"], "#F0F0F0");
    assert_eq!(json["canvas"]["width"], 800.0);

    let elements = json["elements"].as_array().expect("elements array");
    let types: Vec<&str> = elements
        .iter()
        .map(|e| e["type"].as_str().expect("type tag"))
        .collect();
    assert_eq!(types, vec!["triangle", "text", "image"]);
    assert_eq!(elements[0]["backgroundColor"], "#118AB2");
    assert_eq!(elements[1]["fontFamily"], "Helvetica");
    assert_eq!(elements[1]["fontSize"], 24.0);
    assert_eq!(elements[2]["uri"], "file:///photos/cat.png");
}

// ===========================================================================
// Test 3: Failures are isolated
// ===========================================================================

#[test]
fn test_failed_load_keeps_editor_state() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = FileRepository::new(dir.path()).expect("repo");
    std::fs::write(dir.path().join("corrupt.json"), "{ \"designId\": ").expect("write");

    let mut store = populated_store();
    let before = store.elements().to_vec();
    let undo_before = store.can_undo();

    assert!(matches!(
        store.load_design(&repo, "corrupt"),
        Err(CanvasError::Serialization(_))
    ));
    assert!(matches!(
        store.load_design(&repo, "never-saved"),
        Err(CanvasError::DesignNotFound(_))
    ));
    assert!(matches!(
        store.load_design(&repo, "../outside"),
        Err(CanvasError::Validation(_))
    ));

    assert_eq!(store.elements(), before.as_slice());
    assert_eq!(store.can_undo(), undo_before);
}

#[test]
fn test_malformed_element_rejects_whole_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = FileRepository::new(dir.path()).expect("repo");
    let doc = r##"{
        "designId": "broken",
        "canvas": { "width": 800, "height": 600 },
        "backgroundColor": "#FFFFFF",
        "elements": [
            { "id": "00000000-0000-4000-8000-000000000001", "type": "rectangle",
              "x": 0, "y": 0, "width": 50, "height": 50, "backgroundColor": "#FF0000" },
            { "id": "00000000-0000-4000-8000-000000000002", "type": "text",
              "x": 0, "y": 0, "width": 0, "height": 0 }
        ]
    }"##;
    std::fs::write(dir.path().join("broken.json"), doc).expect("write");

    let mut store = DesignStore::default();
    assert!(matches!(
        store.load_design(&repo, "broken"),
        Err(CanvasError::MalformedDocument(_))
    ));
    assert!(store.elements().is_empty());
}

#[test]
fn test_save_does_not_touch_history() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = FileRepository::new(dir.path()).expect("repo");
    let store = populated_store();
    let history = store.history_len();
    store.save_design(&repo, "a").expect("save");
    store.save_design(&repo, "a").expect("save again");
    assert_eq!(store.history_len(), history);
    assert_eq!(repo.list().expect("list"), vec!["a".to_string()]);

    repo.delete("a").expect("delete");
    assert!(repo.list().expect("list").is_empty());
}

// ===========================================================================
// Test 4: Documents from another canvas size are fitted
// ===========================================================================

#[test]
fn test_load_fits_elements_into_smaller_canvas() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = FileRepository::new(dir.path()).expect("repo");
    let mut wide = DesignStore::new(&EditorConfig {
        canvas_width: 1600.0,
        canvas_height: 1200.0,
        ..EditorConfig::default()
    });
    let id = wide
        .add_element(Element::shape(
            ShapeKind::Rectangle,
            Bounds::new(1200.0, 900.0, 300.0, 200.0),
            "#FF6B6B",
        ))
        .expect("add");
    wide.save_design(&repo, "wide").expect("save");

    let mut narrow = DesignStore::default();
    narrow.load_design(&repo, "wide").expect("load");
    let element = narrow.element(id).expect("loaded");
    assert_eq!(element.bounds(), Bounds::new(500.0, 400.0, 300.0, 200.0));
}

// ===========================================================================
// Test 5: Engine-built design survives a round trip
// ===========================================================================

#[test]
fn test_engine_session_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = FileRepository::new(dir.path().join("nested").join("designs")).expect("repo");

    let mut engine = InteractionEngine::default();
    assert_eq!(engine.store().active_tab(), Tab::Text);
    engine.press(Point::new(20.0, 20.0), 0, 0).expect("create text");
    engine.finish_editing();
    engine.store_mut().set_current_tool(Tool::Star);
    engine.press(Point::new(400.0, 300.0), 0, 1_000).expect("create star");
    engine.store().save_design(&repo, "session").expect("save");

    let mut restored = InteractionEngine::default();
    restored
        .store_mut()
        .load_design(&repo, "session")
        .expect("load");
    let kinds: Vec<&str> = restored
        .store()
        .elements()
        .iter()
        .map(Element::type_name)
        .collect();
    assert_eq!(kinds, vec!["text", "star"]);
    assert!(matches!(
        &restored.store().elements()[0].kind,
        ElementKind::Text { text, .. } if text == "Double tap to edit"
    ));
}
