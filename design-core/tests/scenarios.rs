//! Gesture Scenario Tests
//!
//! Drives the interaction engine end to end:
//! - Handle resize (scenario A)
//! - Tap on empty canvas (scenario B)
//! - Double tap to edit text (scenario C)
//! - Delete then undo (scenario D)
//! - Tool dispatch and text resizing

use design_core::{
    Bounds, EditorConfig, Element, ElementId, ElementKind, EngineOutcome, InteractionEngine,
    Point, PointerEvent, ShapeKind, Tab, Tool,
};

/// Engine with the select tab active so taps don't create text.
fn select_engine() -> InteractionEngine {
    let config = EditorConfig {
        initial_tab: Tab::Select,
        ..EditorConfig::default()
    };
    InteractionEngine::new(config)
}

/// Add the rectangle used throughout scenario A.
fn add_scenario_rect(engine: &mut InteractionEngine) -> ElementId {
    engine
        .store_mut()
        .add_element(Element::shape(
            ShapeKind::Rectangle,
            Bounds::new(100.0, 100.0, 100.0, 50.0),
            "#FF6B6B",
        ))
        .expect("add rectangle")
}

/// Add an unselected text element.
fn add_text(engine: &mut InteractionEngine) -> ElementId {
    let id = engine
        .store_mut()
        .add_element(Element::text(100.0, 100.0, "Hello", 20.0, "System", "#000000"))
        .expect("add text");
    engine.store_mut().clear_selection();
    id
}

/// Press and release at the same point.
fn tap(engine: &mut InteractionEngine, x: f32, y: f32, at: u64) -> EngineOutcome {
    let pressed = engine
        .handle_event(&PointerEvent::press(x, y, at))
        .expect("press");
    let released = engine
        .handle_event(&PointerEvent::release(x, y, at + 40))
        .expect("release");
    if released == EngineOutcome::Nothing {
        pressed
    } else {
        released
    }
}

fn bounds_of(engine: &InteractionEngine, id: ElementId) -> Bounds {
    engine.store().element(id).expect("element present").bounds()
}

// ===========================================================================
// Scenario A: bottom-right handle drag
// ===========================================================================

#[test]
fn test_scenario_a_bottom_right_resize() {
    let mut engine = select_engine();
    let id = add_scenario_rect(&mut engine);
    assert_eq!(engine.store().selected_ids(), &[id]);
    let history = engine.store().history_len();

    engine
        .handle_event(&PointerEvent::press(200.0, 150.0, 0))
        .expect("press");
    engine
        .handle_event(&PointerEvent::moved(210.0, 155.0, 16))
        .expect("move");
    engine
        .handle_event(&PointerEvent::moved(220.0, 160.0, 32))
        .expect("move");
    let outcome = engine
        .handle_event(&PointerEvent::release(220.0, 160.0, 48))
        .expect("release");

    assert_eq!(outcome, EngineOutcome::GestureCommitted(id));
    assert_eq!(bounds_of(&engine, id), Bounds::new(100.0, 100.0, 120.0, 60.0));
    assert_eq!(engine.store().history_len(), history + 1);

    assert!(engine.undo());
    assert_eq!(bounds_of(&engine, id), Bounds::new(100.0, 100.0, 100.0, 50.0));
}

#[test]
fn test_resize_never_below_minimum() {
    let mut engine = select_engine();
    let id = add_scenario_rect(&mut engine);
    engine.press(Point::new(100.0, 100.0), 0, 0).expect("press");
    engine.move_to(Point::new(400.0, 400.0), 0);
    engine.release(0);
    let b = bounds_of(&engine, id);
    assert!(b.width >= 10.0 && b.height >= 10.0);
    assert_eq!(b, Bounds::new(190.0, 140.0, 10.0, 10.0));
}

// ===========================================================================
// Scenario B: tap on empty canvas with nothing selected
// ===========================================================================

#[test]
fn test_scenario_b_tap_empty_canvas() {
    let mut engine = select_engine();
    add_scenario_rect(&mut engine);
    engine.store_mut().clear_selection();
    let history = engine.store().history_len();

    assert_eq!(tap(&mut engine, 600.0, 500.0, 0), EngineOutcome::Nothing);
    assert!(engine.store().selection().is_empty());
    assert_eq!(engine.store().history_len(), history);
}

// ===========================================================================
// Scenario C: double tap on text
// ===========================================================================

#[test]
fn test_scenario_c_double_tap_enters_edit_mode() {
    let mut engine = select_engine();
    let id = add_text(&mut engine);

    assert_eq!(tap(&mut engine, 130.0, 110.0, 0), EngineOutcome::Selected(id));
    assert_eq!(
        tap(&mut engine, 130.0, 110.0, 200),
        EngineOutcome::EditRequested(id)
    );
    assert_eq!(engine.editing(), Some(id));
    assert_eq!(engine.store().active_tab(), Tab::Select);
    assert_eq!(engine.store().current_tool(), Tool::Select);
}

#[test]
fn test_scenario_c_slow_taps_reselect() {
    let mut engine = select_engine();
    let id = add_text(&mut engine);

    assert_eq!(tap(&mut engine, 130.0, 110.0, 0), EngineOutcome::Selected(id));
    assert_eq!(tap(&mut engine, 130.0, 110.0, 500), EngineOutcome::Selected(id));
    assert_eq!(engine.editing(), None);
    assert_eq!(engine.store().selected_ids(), &[id]);

    // The slow tap still counts as the first of a new pair.
    assert_eq!(
        tap(&mut engine, 130.0, 110.0, 700),
        EngineOutcome::EditRequested(id)
    );
}

#[test]
fn test_double_tap_window_is_exclusive() {
    let mut engine = select_engine();
    let id = add_text(&mut engine);
    tap(&mut engine, 130.0, 110.0, 1_000);
    assert_eq!(
        tap(&mut engine, 130.0, 110.0, 1_350),
        EngineOutcome::Selected(id)
    );
}

#[test]
fn test_double_tap_on_shape_only_selects() {
    let mut engine = select_engine();
    let id = add_scenario_rect(&mut engine);
    engine.store_mut().clear_selection();
    assert_eq!(tap(&mut engine, 150.0, 125.0, 0), EngineOutcome::Selected(id));
    assert_eq!(tap(&mut engine, 150.0, 125.0, 100), EngineOutcome::Selected(id));
    assert_eq!(engine.editing(), None);
}

#[test]
fn test_double_tap_across_elements_does_not_edit() {
    let mut engine = select_engine();
    let text = add_text(&mut engine);
    let rect = engine
        .store_mut()
        .add_element(Element::shape(
            ShapeKind::Ellipse,
            Bounds::new(400.0, 400.0, 80.0, 40.0),
            "#FFD166",
        ))
        .expect("add");
    engine.store_mut().clear_selection();

    assert_eq!(tap(&mut engine, 440.0, 420.0, 0), EngineOutcome::Selected(rect));
    assert_eq!(tap(&mut engine, 130.0, 110.0, 100), EngineOutcome::Selected(text));
    assert_eq!(engine.editing(), None);
}

// ===========================================================================
// Scenario D: delete then undo
// ===========================================================================

#[test]
fn test_scenario_d_delete_then_undo() {
    let mut engine = select_engine();
    let keep = engine
        .store_mut()
        .add_element(Element::shape(
            ShapeKind::Star,
            Bounds::new(400.0, 300.0, 80.0, 70.0),
            "#EF476F",
        ))
        .expect("add");
    let id = add_scenario_rect(&mut engine);
    engine.store_mut().clear_selection();

    assert_eq!(tap(&mut engine, 150.0, 125.0, 0), EngineOutcome::Selected(id));
    let before = engine.store().element(id).expect("rect").clone();
    let selection_before = engine.store().selected_ids().to_vec();

    assert_eq!(engine.delete_selected(), 1);
    assert!(engine.store().element(id).is_none());
    assert!(engine.store().element(keep).is_some());

    assert!(engine.undo());
    assert_eq!(engine.store().element(id), Some(&before));
    assert_eq!(engine.store().selected_ids(), selection_before.as_slice());
    assert!(!engine.store().element(keep).expect("star").selected);
}

// ===========================================================================
// Tool dispatch
// ===========================================================================

#[test]
fn test_every_shape_tool_creates_its_shape() {
    for kind in ShapeKind::ALL {
        let mut engine = select_engine();
        engine.store_mut().set_current_tool(Tool::from(kind));
        let outcome = engine.press(Point::new(400.0, 300.0), 0, 0).expect("press");
        let EngineOutcome::ElementCreated(id) = outcome else {
            panic!("{kind:?}: expected creation, got {outcome:?}");
        };
        let element = engine.store().element(id).expect("created");
        assert!(matches!(
            element.kind,
            ElementKind::Shape { shape, .. } if shape == kind
        ));
        assert_eq!(engine.store().current_tool(), Tool::Select);
        assert_eq!(engine.store().selected_ids(), &[id]);
    }
}

#[test]
fn test_shape_created_near_edge_is_clamped() {
    let mut engine = select_engine();
    engine.store_mut().set_current_tool(Tool::Rectangle);
    let outcome = engine.press(Point::new(790.0, 595.0), 0, 0).expect("press");
    let EngineOutcome::ElementCreated(id) = outcome else {
        panic!("expected creation, got {outcome:?}");
    };
    assert_eq!(bounds_of(&engine, id), Bounds::new(700.0, 550.0, 100.0, 50.0));
}

#[test]
fn test_drag_requires_selected_element() {
    let mut engine = select_engine();
    let a = add_scenario_rect(&mut engine);
    let b = engine
        .store_mut()
        .add_element(Element::shape(
            ShapeKind::Circle,
            Bounds::new(400.0, 400.0, 50.0, 50.0),
            "#4ECDC4",
        ))
        .expect("add");
    assert_eq!(engine.store().selected_ids(), &[b]);

    // Pressing the unselected rectangle selects it instead of dragging it.
    assert_eq!(
        engine.press(Point::new(150.0, 125.0), 0, 0).expect("press"),
        EngineOutcome::Selected(a)
    );
    engine.move_to(Point::new(300.0, 300.0), 0);
    engine.release(0);
    assert_eq!(bounds_of(&engine, a), Bounds::new(100.0, 100.0, 100.0, 50.0));
}

#[test]
fn test_text_resize_scales_font() {
    let mut engine = select_engine();
    let id = engine
        .store_mut()
        .add_element(Element::text(100.0, 100.0, "Hello", 20.0, "System", "#000000"))
        .expect("add");
    // Bottom edge handle of the 60 x 20 box sits at (130, 120).
    engine.press(Point::new(130.0, 120.0), 0, 0).expect("press");
    engine.move_to(Point::new(130.0, 130.0), 0);
    assert_eq!(engine.release(0), EngineOutcome::GestureCommitted(id));

    let element = engine.store().element(id).expect("text");
    let ElementKind::Text { font_size, .. } = &element.kind else {
        panic!("expected text");
    };
    assert!((font_size - 30.0).abs() < f32::EPSILON);
    assert!((element.width - 90.0).abs() < 1e-3);
    assert!((element.height - 30.0).abs() < f32::EPSILON);
}
