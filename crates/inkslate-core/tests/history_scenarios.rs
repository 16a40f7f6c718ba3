//! Undo/redo behavior of the drawing surface.

use inkslate_core::{Canvas, DrawSettings, Shape, ToolKind};
use kurbo::Point;

fn draw(canvas: &mut Canvas, tool: ToolKind, to: Point) {
    canvas.begin_shape(tool, Point::ZERO);
    canvas.extend_current(to).unwrap();
    assert!(canvas.commit_current());
}

#[test]
fn test_new_commit_invalidates_redo() {
    let mut canvas = Canvas::new();
    draw(&mut canvas, ToolKind::Line, Point::new(1.0, 1.0));
    draw(&mut canvas, ToolKind::Line, Point::new(2.0, 2.0));

    assert!(canvas.undo());
    draw(&mut canvas, ToolKind::Rectangle, Point::new(3.0, 3.0));
    assert!(!canvas.redo());
    assert_eq!(canvas.len(), 2);
}

#[test]
fn test_undo_redo_symmetry() {
    let mut canvas = Canvas::new();
    for i in 1..=5 {
        draw(&mut canvas, ToolKind::Freehand, Point::new(i as f64, 0.0));
    }
    let before: Vec<Shape> = canvas.shapes().to_vec();

    for _ in 0..5 {
        assert!(canvas.undo());
    }
    assert!(canvas.is_empty());
    assert!(!canvas.undo());

    for _ in 0..5 {
        assert!(canvas.redo());
    }
    assert!(!canvas.redo());
    assert_eq!(canvas.shapes(), before.as_slice());
}

#[test]
fn test_partial_undo_order() {
    let mut canvas = Canvas::new();
    draw(&mut canvas, ToolKind::Line, Point::new(1.0, 0.0));
    draw(&mut canvas, ToolKind::Oval, Point::new(2.0, 0.0));
    draw(&mut canvas, ToolKind::Circle, Point::new(3.0, 0.0));

    assert!(canvas.undo());
    assert!(canvas.undo());
    assert!(canvas.redo());

    let kinds: Vec<_> = canvas.shapes().iter().map(Shape::kind).collect();
    assert_eq!(kinds.len(), 2);
    assert_eq!(canvas.history().undone().len(), 1);
    assert_eq!(canvas.history().undone()[0].kind(), inkslate_core::ShapeKind::Circle);
}

#[test]
fn test_boundary_noops() {
    let mut canvas = Canvas::new();
    assert!(!canvas.undo());
    assert!(!canvas.redo());
    assert!(!canvas.commit_current());
    assert!(!canvas.commit_text());
    assert!(!canvas.take_redraw());
}

#[test]
fn test_settings_independence() {
    let mut canvas = Canvas::with_settings(DrawSettings {
        color: "#ff0000".to_string(),
        stroke_width: 4.0,
        ..DrawSettings::default()
    });
    draw(&mut canvas, ToolKind::Rectangle, Point::new(10.0, 10.0));

    canvas.settings.color = "#00ff00".to_string();
    canvas.settings.stroke_width = 12.0;
    canvas.settings.filled = true;
    draw(&mut canvas, ToolKind::Rectangle, Point::new(20.0, 20.0));

    let first = canvas.shapes()[0].settings();
    assert_eq!(first.color, "#ff0000");
    assert!((first.stroke_width - 4.0).abs() < f64::EPSILON);
    assert!(!first.filled);

    let second = canvas.shapes()[1].settings();
    assert_eq!(second.color, "#00ff00");
    assert!(second.filled);
}

#[test]
fn test_eraser_snapshot_is_widened() {
    let mut canvas = Canvas::with_settings(DrawSettings {
        stroke_width: 10.0,
        ..DrawSettings::default()
    });
    draw(&mut canvas, ToolKind::Eraser, Point::new(5.0, 5.0));
    assert!((canvas.shapes()[0].settings().stroke_width - 20.0).abs() < f64::EPSILON);
    assert!((canvas.settings.stroke_width - 10.0).abs() < f64::EPSILON);
}
