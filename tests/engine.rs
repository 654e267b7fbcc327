use inkveil::draw::{BackgroundPattern, ElementKind, Point, ShapeKind, StrokeTool};
use inkveil::input::{EngineError, NoOpReason, PageDirection, Tool};
use inkveil::{CanvasEngine, Config};
use std::cell::Cell;
use std::rc::Rc;

fn engine() -> CanvasEngine {
    CanvasEngine::from_config(&Config::default()).unwrap()
}

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn stroke(engine: &mut CanvasEngine, points: &[(f64, f64)]) {
    let (first, rest) = points.split_first().unwrap();
    engine.pointer_down(p(first.0, first.1)).unwrap();
    for &(x, y) in rest {
        engine.pointer_move(p(x, y)).unwrap();
    }
    engine.pointer_up().unwrap();
}

fn element_ids(engine: &CanvasEngine) -> Vec<u64> {
    engine
        .active_page()
        .elements()
        .iter()
        .map(|element| element.id.0)
        .collect()
}

#[test]
fn n_commits_then_n_undos_leave_page_empty() {
    let mut engine = engine();
    for i in 0..6 {
        let offset = f64::from(i) * 10.0;
        stroke(&mut engine, &[(offset, 0.0), (offset + 5.0, 5.0)]);
    }
    assert_eq!(engine.active_page().len(), 6);

    for _ in 0..6 {
        engine.undo().unwrap();
    }
    assert!(engine.active_page().is_empty());
    assert_eq!(
        engine.undo(),
        Err(EngineError::NoOp(NoOpReason::NothingToUndo))
    );
}

#[test]
fn k_undos_then_k_redos_restore_sequence() {
    let mut engine = engine();
    for i in 0..5 {
        let offset = f64::from(i) * 20.0;
        stroke(&mut engine, &[(offset, offset), (offset + 8.0, offset + 3.0)]);
    }
    let before = engine.active_page().elements().to_vec();

    for k in 1..=5 {
        for _ in 0..k {
            engine.undo().unwrap();
        }
        for _ in 0..k {
            engine.redo().unwrap();
        }
        assert_eq!(engine.active_page().elements(), before.as_slice());
    }
}

#[test]
fn commit_after_undo_discards_redo() {
    let mut engine = engine();
    stroke(&mut engine, &[(0.0, 0.0), (10.0, 10.0)]);
    stroke(&mut engine, &[(20.0, 0.0), (30.0, 10.0)]);
    engine.undo().unwrap();
    engine.undo().unwrap();
    assert!(engine.can_redo());

    stroke(&mut engine, &[(40.0, 0.0), (50.0, 10.0)]);
    assert!(!engine.can_redo());
    assert_eq!(
        engine.redo(),
        Err(EngineError::NoOp(NoOpReason::NothingToRedo))
    );
}

#[test]
fn single_tap_commits_dot_stroke() {
    let mut engine = engine();
    engine.select_tool(Tool::Pen);
    engine.pointer_down(p(5.0, 5.0)).unwrap();
    engine.pointer_up().unwrap();

    let page = engine.active_page();
    assert_eq!(page.len(), 1);
    let ElementKind::Stroke(stroke) = &page.elements()[0].kind else {
        panic!("expected a stroke");
    };
    assert!(stroke.points.len() >= 2);
    for point in stroke.points.iter() {
        assert!((point.x - 5.0).abs() <= 1.0 && (point.y - 5.0).abs() <= 1.0);
    }
}

#[test]
fn rectangle_survives_undo_redo() {
    let mut engine = engine();
    engine.select_tool(Tool::Rectangle);
    engine.pointer_down(p(0.0, 0.0)).unwrap();
    engine.pointer_move(p(60.0, 20.0)).unwrap();
    engine.pointer_move(p(100.0, 50.0)).unwrap();
    engine.pointer_up().unwrap();

    engine.undo().unwrap();
    assert!(engine.active_page().is_empty());
    engine.redo().unwrap();

    let elements = engine.active_page().elements();
    assert_eq!(elements.len(), 1);
    let ElementKind::Shape(shape) = &elements[0].kind else {
        panic!("expected a shape");
    };
    assert_eq!(shape.kind, ShapeKind::Rectangle);
    assert_eq!(shape.start, p(0.0, 0.0));
    assert_eq!(shape.end, p(100.0, 50.0));
}

#[test]
fn next_on_last_page_is_silent_noop() {
    let mut engine = engine();
    engine.new_page();
    assert_eq!(engine.active_page_index(), 1);

    let notified = Rc::new(Cell::new(0));
    let counter = Rc::clone(&notified);
    engine.subscribe(move |_| counter.set(counter.get() + 1));

    assert_eq!(
        engine.switch_page(PageDirection::Next),
        Err(EngineError::NoOp(NoOpReason::AtLastPage))
    );
    assert_eq!(engine.active_page_index(), 1);
    assert_eq!(notified.get(), 0);

    engine.switch_page(PageDirection::Previous).unwrap();
    assert_eq!(engine.active_page_index(), 0);
    assert_eq!(notified.get(), 1);
}

#[test]
fn clear_then_undo_restores_elements_in_order() {
    let mut engine = engine();
    engine.select_tool(Tool::Line);
    stroke(&mut engine, &[(0.0, 0.0), (10.0, 0.0)]);
    engine.select_tool(Tool::Ellipse);
    stroke(&mut engine, &[(20.0, 20.0), (40.0, 30.0)]);
    engine.select_tool(Tool::Pen);
    stroke(&mut engine, &[(50.0, 50.0), (55.0, 60.0), (70.0, 62.0)]);

    let before = engine.active_page().elements().to_vec();
    engine.clear_active_page().unwrap();
    assert!(engine.active_page().is_empty());

    engine.undo().unwrap();
    assert_eq!(engine.active_page().elements(), before.as_slice());
}

#[test]
fn eraser_strokes_use_the_same_history() {
    let mut engine = engine();
    engine.set_background(BackgroundPattern::White).unwrap();
    stroke(&mut engine, &[(0.0, 0.0), (40.0, 40.0)]);
    engine.select_tool(Tool::Eraser);
    stroke(&mut engine, &[(0.0, 40.0), (40.0, 0.0)]);

    let ids = element_ids(&engine);
    assert_eq!(ids.len(), 2);
    let ElementKind::Stroke(eraser) = &engine.active_page().elements()[1].kind else {
        panic!("expected a stroke");
    };
    assert_eq!(eraser.tool, StrokeTool::Eraser);
    assert_eq!(
        eraser.paint(BackgroundPattern::White).color,
        BackgroundPattern::White.eraser_color()
    );

    engine.undo().unwrap();
    assert_eq!(element_ids(&engine), ids[..1].to_vec());
    engine.redo().unwrap();
    assert_eq!(element_ids(&engine), ids);
}

#[test]
fn pages_keep_independent_histories() {
    let mut engine = engine();
    stroke(&mut engine, &[(0.0, 0.0), (10.0, 10.0)]);
    engine.new_page();
    assert!(!engine.can_undo());
    stroke(&mut engine, &[(5.0, 5.0), (15.0, 15.0)]);
    engine.undo().unwrap();

    engine.go_to_page(0).unwrap();
    assert_eq!(engine.active_page().len(), 1);
    assert!(engine.can_undo());
    assert!(!engine.can_redo());
}

#[test]
fn visible_elements_match_history_replay() {
    let mut config = Config::default();
    config.history.capacity = 3;
    let mut engine = CanvasEngine::from_config(&config).unwrap();

    for i in 0..6 {
        let offset = f64::from(i) * 10.0;
        stroke(&mut engine, &[(offset, 0.0), (offset, 8.0)]);
    }
    engine.clear_active_page().unwrap();
    engine.undo().unwrap();

    let page = engine.active_page();
    assert_eq!(page.len(), 6);
    assert_eq!(page.history().undo_len(), 2);
    assert_eq!(page.history().replay(), page.elements().to_vec());
}

#[test]
fn images_are_undoable_elements() {
    let mut engine = engine();
    let id = engine
        .insert_image("screenshot.png", p(10.0, 10.0), 320.0, 200.0)
        .unwrap();
    assert_eq!(element_ids(&engine), vec![id.0]);

    assert!(matches!(
        engine.insert_image("broken.png", p(0.0, 0.0), 0.0, 10.0),
        Err(EngineError::InvalidGeometry { .. })
    ));

    engine.undo().unwrap();
    assert!(engine.active_page().is_empty());
}
