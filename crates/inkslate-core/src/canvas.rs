//! Drawing surface state: committed shapes, the shape being drawn, and history.

use crate::history::History;
use crate::render::RenderSurface;
use crate::shapes::{DrawSettings, ExtendInput, Shape, ShapeError};
use crate::storage::codec::{self, CodecError};
use crate::tools::ToolKind;
use kurbo::{Point, Rect};

/// The drawing surface.
///
/// Owned by the host and passed by reference to every event handler. All
/// mutation goes through `&mut self`, which keeps ordering of commits, undo
/// and redo strictly sequential.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    /// Committed shapes in paint order. Doubles as the undo stack.
    committed: Vec<Shape>,
    /// Shape currently being drawn.
    in_progress: Option<Shape>,
    /// Ambient settings new shapes take a snapshot of.
    pub settings: DrawSettings,
    /// Currently selected tool.
    active_tool: ToolKind,
    /// Redo history.
    history: History,
    /// Whether the host should call `redraw_all`.
    needs_redraw: bool,
}

impl Canvas {
    /// Create an empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty canvas with initial ambient settings.
    pub fn with_settings(settings: DrawSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Committed shapes in paint order.
    pub fn shapes(&self) -> &[Shape] {
        &self.committed
    }

    pub fn in_progress(&self) -> Option<&Shape> {
        self.in_progress.as_ref()
    }

    pub fn active_tool(&self) -> ToolKind {
        self.active_tool
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Check if a text label is being composed.
    pub fn is_composing_text(&self) -> bool {
        self.in_progress.as_ref().is_some_and(Shape::is_text)
    }

    /// Select a tool. A text label being composed is committed first, even
    /// when the text tool itself is re-selected; any other shape in progress
    /// is abandoned.
    pub fn select_tool(&mut self, tool: ToolKind) {
        self.commit_pending_text();
        if let Some(abandoned) = self.in_progress.take() {
            log::debug!("Abandoning in-progress {}", abandoned.kind());
            self.needs_redraw = true;
        }
        if self.active_tool != tool {
            log::debug!("Tool switched to {}", tool.name());
        }
        self.active_tool = tool;
    }

    /// Start a new shape of `tool` anchored at `at`.
    pub fn begin_shape(&mut self, tool: ToolKind, at: Point) {
        self.select_tool(tool);
        self.in_progress = Some(tool.create_shape(at, &self.settings));
        self.needs_redraw = true;
    }

    /// Feed input to the shape being drawn. No-op when nothing is in progress.
    pub fn extend_current(&mut self, input: impl Into<ExtendInput>) -> Result<(), ShapeError> {
        let Some(shape) = self.in_progress.as_mut() else {
            return Ok(());
        };
        shape.extend(&input.into())?;
        self.needs_redraw = true;
        Ok(())
    }

    /// Commit the shape being drawn, unless the text tool is active (text
    /// commits on Enter or tool switch). Returns true if a shape was committed.
    pub fn commit_current(&mut self) -> bool {
        if self.active_tool == ToolKind::Text {
            return false;
        }
        self.commit_in_progress()
    }

    /// Commit the text label being composed. Empty labels are committed too.
    /// Returns true if a label was committed.
    pub fn commit_text(&mut self) -> bool {
        self.commit_pending_text()
    }

    fn commit_pending_text(&mut self) -> bool {
        if self.is_composing_text() {
            self.commit_in_progress()
        } else {
            false
        }
    }

    fn commit_in_progress(&mut self) -> bool {
        let Some(shape) = self.in_progress.take() else {
            return false;
        };
        log::debug!("Committed {} (#{})", shape.kind(), self.committed.len());
        self.history.commit(&mut self.committed, shape);
        self.needs_redraw = true;
        true
    }

    /// Clear `target` and paint every committed shape in order, then the
    /// in-progress shape on top.
    pub fn redraw_all(&self, target: &mut dyn RenderSurface) {
        target.clear();
        for shape in &self.committed {
            shape.render(target);
        }
        if let Some(shape) = &self.in_progress {
            shape.render(target);
        }
    }

    /// Remove everything, including redo history. Not undoable.
    pub fn clear_all(&mut self) {
        self.committed.clear();
        self.in_progress = None;
        self.history.invalidate();
        self.needs_redraw = true;
        log::debug!("Canvas cleared");
    }

    /// Undo the last commit. Returns true if anything changed.
    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo(&mut self.committed);
        if changed {
            log::debug!("Undo ({} shapes left)", self.committed.len());
            self.needs_redraw = true;
        }
        changed
    }

    /// Redo the last undone commit. Returns true if anything changed.
    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo(&mut self.committed);
        if changed {
            log::debug!("Redo ({} shapes)", self.committed.len());
            self.needs_redraw = true;
        }
        changed
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Encode the committed shapes as a drawing file.
    pub fn save(&self) -> Result<Vec<u8>, CodecError> {
        codec::encode(&self.committed)
    }

    /// Replace the whole canvas with the shapes in a drawing file.
    ///
    /// Malformed records are skipped. If the input is not a drawing file at
    /// all, the canvas is left untouched. Returns the number of shapes loaded.
    pub fn load(&mut self, bytes: &[u8]) -> Result<usize, CodecError> {
        let shapes = codec::decode(bytes)?;
        self.in_progress = None;
        self.committed.clear();
        self.history.invalidate();
        self.committed.extend(shapes);
        self.needs_redraw = true;
        log::info!("Loaded {} shapes", self.committed.len());
        Ok(self.committed.len())
    }

    /// Returns whether a redraw is pending and resets the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Get the bounding box of all committed shapes.
    pub fn bounds(&self) -> Option<Rect> {
        self.committed
            .iter()
            .map(Shape::bounds)
            .reduce(|acc, bounds| acc.union(bounds))
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    /// Get the number of committed shapes.
    pub fn len(&self) -> usize {
        self.committed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{BACKSPACE, ShapeKind};
    use kurbo::{BezPath, Stroke};
    use peniko::{Color, Compose};

    /// Surface that only counts paint calls.
    #[derive(Default)]
    struct CountingSurface {
        clears: usize,
        paints: usize,
    }

    impl RenderSurface for CountingSurface {
        fn clear(&mut self) {
            self.clears += 1;
            self.paints = 0;
        }

        fn fill(&mut self, _path: &BezPath, _color: Color) {
            self.paints += 1;
        }

        fn stroke(&mut self, _path: &BezPath, _style: &Stroke, _color: Color, _compose: Compose) {
            self.paints += 1;
        }

        fn text(&mut self, _content: &str, _origin: Point, _font: &str, _color: Color) {
            self.paints += 1;
        }
    }

    fn draw_line(canvas: &mut Canvas, from: Point, to: Point) {
        canvas.begin_shape(ToolKind::Line, from);
        canvas.extend_current(to).unwrap();
        assert!(canvas.commit_current());
    }

    #[test]
    fn test_canvas_creation() {
        let canvas = Canvas::new();
        assert!(canvas.is_empty());
        assert!(canvas.in_progress().is_none());
        assert!(!canvas.can_undo());
        assert!(!canvas.can_redo());
    }

    #[test]
    fn test_draw_and_commit() {
        let mut canvas = Canvas::new();
        canvas.begin_shape(ToolKind::Rectangle, Point::new(10.0, 10.0));
        assert!(canvas.in_progress().is_some());
        assert!(canvas.is_empty());

        canvas.extend_current(Point::new(50.0, 40.0)).unwrap();
        assert!(canvas.commit_current());
        assert_eq!(canvas.len(), 1);
        assert!(canvas.in_progress().is_none());
        assert!(!canvas.commit_current());
    }

    #[test]
    fn test_extend_without_shape_is_noop() {
        let mut canvas = Canvas::new();
        canvas.take_redraw();
        assert!(canvas.extend_current(Point::new(1.0, 1.0)).is_ok());
        assert!(!canvas.needs_redraw());
    }

    #[test]
    fn test_extend_mismatch_is_reported() {
        let mut canvas = Canvas::new();
        canvas.begin_shape(ToolKind::Line, Point::ZERO);
        assert!(canvas.extend_current("a").is_err());
    }

    #[test]
    fn test_text_commits_only_on_enter_or_switch() {
        let mut canvas = Canvas::new();
        canvas.begin_shape(ToolKind::Text, Point::new(5.0, 5.0));
        canvas.extend_current("H").unwrap();
        canvas.extend_current("i").unwrap();
        canvas.extend_current(BACKSPACE).unwrap();

        // Pointer-up does not commit text.
        assert!(!canvas.commit_current());
        assert!(canvas.is_composing_text());

        canvas.select_tool(ToolKind::Line);
        assert_eq!(canvas.len(), 1);
        let text = canvas.shapes()[0].as_text().unwrap();
        assert_eq!(text.chars(), &['H']);
    }

    #[test]
    fn test_reselecting_text_commits_pending_label() {
        let mut canvas = Canvas::new();
        canvas.begin_shape(ToolKind::Text, Point::ZERO);
        canvas.extend_current("a").unwrap();
        canvas.begin_shape(ToolKind::Text, Point::new(0.0, 40.0));
        assert_eq!(canvas.len(), 1);
        assert!(canvas.is_composing_text());
    }

    #[test]
    fn test_empty_text_commit_clears_redo() {
        let mut canvas = Canvas::new();
        draw_line(&mut canvas, Point::ZERO, Point::new(10.0, 10.0));
        assert!(canvas.undo());
        assert!(canvas.can_redo());

        canvas.begin_shape(ToolKind::Text, Point::ZERO);
        assert!(canvas.commit_text());
        assert!(!canvas.can_redo());
        assert!(!canvas.redo());
        assert_eq!(canvas.shapes()[0].kind(), ShapeKind::DrawnText);
    }

    #[test]
    fn test_non_text_shape_replaced_on_begin() {
        let mut canvas = Canvas::new();
        canvas.begin_shape(ToolKind::Line, Point::ZERO);
        canvas.begin_shape(ToolKind::Rectangle, Point::new(1.0, 1.0));
        assert!(canvas.is_empty());
        assert_eq!(canvas.in_progress().map(Shape::kind), Some(ShapeKind::Rectangle));
    }

    #[test]
    fn test_clear_all_is_irreversible() {
        let mut canvas = Canvas::new();
        draw_line(&mut canvas, Point::ZERO, Point::new(1.0, 1.0));
        draw_line(&mut canvas, Point::ZERO, Point::new(2.0, 2.0));
        assert!(canvas.undo());
        canvas.begin_shape(ToolKind::Line, Point::ZERO);

        canvas.clear_all();
        assert!(canvas.is_empty());
        assert!(canvas.in_progress().is_none());
        assert!(!canvas.undo());
        assert!(!canvas.redo());
    }

    #[test]
    fn test_redraw_paints_in_progress_last() {
        let mut canvas = Canvas::new();
        draw_line(&mut canvas, Point::ZERO, Point::new(1.0, 1.0));
        canvas.begin_shape(ToolKind::Freehand, Point::ZERO);

        let mut surface = CountingSurface::default();
        canvas.redraw_all(&mut surface);
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.paints, 2);

        canvas.redraw_all(&mut surface);
        assert_eq!(surface.clears, 2);
        assert_eq!(surface.paints, 2);
    }

    #[test]
    fn test_redraw_flag() {
        let mut canvas = Canvas::new();
        assert!(!canvas.take_redraw());
        draw_line(&mut canvas, Point::ZERO, Point::new(1.0, 1.0));
        assert!(canvas.take_redraw());
        assert!(!canvas.take_redraw());

        assert!(canvas.undo());
        assert!(canvas.take_redraw());
        assert!(!canvas.undo());
        assert!(!canvas.take_redraw());
    }

    #[test]
    fn test_load_rejects_garbage_without_touching_state() {
        let mut canvas = Canvas::new();
        draw_line(&mut canvas, Point::ZERO, Point::new(1.0, 1.0));
        assert!(canvas.load(b"{\"not\": \"an array\"}").is_err());
        assert!(canvas.load(b"not json").is_err());
        assert_eq!(canvas.len(), 1);
    }

    #[test]
    fn test_bounds() {
        let mut canvas = Canvas::new();
        assert!(canvas.bounds().is_none());
        draw_line(&mut canvas, Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        draw_line(&mut canvas, Point::new(20.0, 5.0), Point::new(30.0, -5.0));
        let bounds = canvas.bounds().unwrap();
        assert!((bounds.x1 - 30.0).abs() < f64::EPSILON);
        assert!((bounds.y0 + 5.0).abs() < f64::EPSILON);
    }
}
