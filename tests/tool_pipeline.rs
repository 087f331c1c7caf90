use std::cell::RefCell;
use std::rc::Rc;

use pixelpaint::brush::BrushShape;
use pixelpaint::event::{EngineEvent, EventHandler};
use pixelpaint::{BrushDescriptor, Editor, Rgba, SymmetryPreset, ToolKind};

struct Recorder(Rc<RefCell<Vec<EngineEvent>>>);

impl EventHandler for Recorder {
    fn handle_event(&mut self, event: &EngineEvent) {
        self.0.borrow_mut().push(event.clone());
    }
}

fn recorded(editor: &Editor) -> Rc<RefCell<Vec<EngineEvent>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    editor.events().subscribe(Box::new(Recorder(seen.clone())));
    seen
}

#[test]
fn brush_stroke_paints_foreground_color() {
    let mut editor = Editor::new(16, 16).unwrap();
    editor.set_tool(ToolKind::Brush);
    editor.set_foreground_color(Rgba::opaque(10, 200, 30));

    editor.pointer_down(2, 2);
    editor.pointer_move(6, 2);
    editor.pointer_up(6, 2);

    let buf = editor.snapshot();
    for x in 2..=6 {
        assert_eq!(buf.get(x, 2).unwrap(), Rgba::opaque(10, 200, 30));
    }
}

#[test]
fn eraser_clears_alpha_but_keeps_rgb() {
    let mut editor = Editor::new(8, 8).unwrap();
    editor.set_tool(ToolKind::Brush);
    editor.set_foreground_color(Rgba::opaque(90, 120, 150));
    editor.pointer_down(3, 3);
    editor.pointer_up(3, 3);

    editor.set_tool(ToolKind::Eraser);
    editor.pointer_down(3, 3);
    editor.pointer_up(3, 3);

    let erased = editor.snapshot().get(3, 3).unwrap();
    assert_eq!(erased, Rgba::new(90, 120, 150, 0));

    // Erasing again is idempotent at the floor and records no history entry.
    let depth_before = editor.can_undo();
    editor.pointer_down(3, 3);
    editor.pointer_up(3, 3);
    assert_eq!(editor.snapshot().get(3, 3).unwrap(), Rgba::new(90, 120, 150, 0));
    assert_eq!(editor.can_undo(), depth_before);
}

#[test]
fn bucket_fill_floods_transparent_canvas() {
    let mut editor = Editor::new(10, 10).unwrap();
    editor.set_tool(ToolKind::Bucket);
    editor.set_foreground_color(Rgba::opaque(0, 0, 250));

    editor.pointer_down(5, 5);
    editor.pointer_up(5, 5);

    assert!(editor
        .snapshot()
        .pixels()
        .iter()
        .all(|p| *p == Rgba::opaque(0, 0, 250)));
}

#[test]
fn mirrored_bucket_fill_runs_per_seed() {
    let mut editor = Editor::new(21, 21).unwrap();
    // Wall splitting the canvas vertically at x=10, so the two halves are
    // separate regions.
    editor.set_tool(ToolKind::Brush);
    editor.set_foreground_color(Rgba::BLACK);
    editor.pointer_down(10, 0);
    editor.pointer_move(10, 20);
    editor.pointer_up(10, 20);

    editor.apply_preset(SymmetryPreset::Vertical);
    editor.set_tool(ToolKind::Bucket);
    editor.set_foreground_color(Rgba::opaque(240, 10, 10));
    editor.pointer_down(3, 10);
    editor.pointer_up(3, 10);

    let buf = editor.snapshot();
    // Both halves filled from their own seed; the wall stands.
    assert_eq!(buf.get(3, 10).unwrap(), Rgba::opaque(240, 10, 10));
    assert_eq!(buf.get(17, 10).unwrap(), Rgba::opaque(240, 10, 10));
    assert_eq!(buf.get(10, 10).unwrap(), Rgba::BLACK);
}

#[test]
fn eyedropper_picks_without_mutating() {
    let mut editor = Editor::new(8, 8).unwrap();
    editor.set_tool(ToolKind::Brush);
    editor.set_foreground_color(Rgba::opaque(1, 2, 3));
    editor.pointer_down(4, 4);
    editor.pointer_up(4, 4);

    editor.set_foreground_color(Rgba::opaque(200, 200, 200));
    editor.set_tool(ToolKind::Eyedropper);
    let seen = recorded(&editor);
    let before: Vec<_> = editor.snapshot().pixels().to_vec();

    editor.pointer_down(4, 4);
    editor.pointer_up(4, 4);

    assert_eq!(editor.foreground_color(), Rgba::opaque(1, 2, 3));
    assert_eq!(editor.snapshot().pixels(), &before[..]);
    assert!(seen
        .borrow()
        .contains(&EngineEvent::ColorPicked(Rgba::opaque(1, 2, 3))));
    // Picking is not an edit; nothing to undo beyond the first stroke.
    assert!(editor.can_undo());
    editor.undo();
    assert!(!editor.can_undo());
}

#[test]
fn eyedropper_outside_canvas_is_ignored() {
    let mut editor = Editor::new(8, 8).unwrap();
    editor.set_tool(ToolKind::Eyedropper);
    editor.set_foreground_color(Rgba::opaque(9, 9, 9));
    editor.pointer_down(-3, 50);
    editor.pointer_up(-3, 50);
    assert_eq!(editor.foreground_color(), Rgba::opaque(9, 9, 9));
}

#[test]
fn invalid_brush_config_keeps_previous() {
    let mut editor = Editor::new(8, 8).unwrap();
    editor.set_brush(7, BrushShape::Square, true).unwrap();
    let before = editor.brush();
    assert!(editor.set_brush(0, BrushShape::Circle, false).is_err());
    assert!(editor.set_brush(51, BrushShape::Circle, false).is_err());
    assert_eq!(editor.brush(), before);
}

#[test]
fn dirty_events_cover_the_touched_region() {
    let mut editor = Editor::new(32, 32).unwrap();
    editor.set_tool(ToolKind::Brush);
    editor.set_foreground_color(Rgba::BLACK);
    let seen = recorded(&editor);

    editor.pointer_down(4, 6);
    editor.pointer_move(9, 11);
    editor.pointer_up(9, 11);

    let events = seen.borrow();
    let mut covered: Option<pixelpaint::DirtyRect> = None;
    for e in events.iter() {
        if let EngineEvent::DirtyRegion(r) = e {
            covered = Some(match covered {
                Some(c) => c.union(r),
                None => *r,
            });
        }
    }
    let covered = covered.expect("no dirty events emitted");
    assert!(covered.contains(pixelpaint::PixelPoint::new(4, 6)));
    assert!(covered.contains(pixelpaint::PixelPoint::new(9, 11)));
    // Incremental, not whole-canvas.
    assert!(covered.width() <= 7 && covered.height() <= 7);
}

#[test]
fn session_settings_round_trip_through_serde() {
    let brush = BrushDescriptor::new(12, BrushShape::Square, true).unwrap();
    let json = serde_json::to_string(&brush).unwrap();
    assert_eq!(serde_json::from_str::<BrushDescriptor>(&json).unwrap(), brush);

    let tool = ToolKind::Bucket;
    let json = serde_json::to_string(&tool).unwrap();
    assert_eq!(serde_json::from_str::<ToolKind>(&json).unwrap(), tool);
}

#[test]
fn fill_tolerance_is_configurable() {
    let mut editor = Editor::new(3, 1).unwrap();
    editor.set_tool(ToolKind::Brush);
    editor.set_foreground_color(Rgba::opaque(100, 100, 100));
    editor.pointer_down(0, 0);
    editor.pointer_up(0, 0);
    editor.set_foreground_color(Rgba::opaque(104, 100, 100));
    editor.pointer_down(1, 0);
    editor.pointer_up(1, 0);

    editor.set_tool(ToolKind::Bucket);
    editor.set_fill_tolerance(5);
    editor.set_foreground_color(Rgba::opaque(0, 255, 0));
    editor.pointer_down(0, 0);
    editor.pointer_up(0, 0);

    let buf = editor.snapshot();
    assert_eq!(buf.get(0, 0).unwrap(), Rgba::opaque(0, 255, 0));
    assert_eq!(buf.get(1, 0).unwrap(), Rgba::opaque(0, 255, 0));
    // Transparent neighbor is far outside tolerance of the opaque target.
    assert!(buf.get(2, 0).unwrap().is_transparent());
}

#[test]
fn eraser_outline_matches_brush_footprint_perimeter() {
    let mut editor = Editor::new(16, 16).unwrap();
    editor.set_brush(3, BrushShape::Square, false).unwrap();
    let outline = editor.eraser_outline(pixelpaint::PixelPoint::new(8, 8));
    // 3x3 square: every footprint pixel is on the perimeter except the center.
    assert_eq!(outline.len(), 8);
    assert!(!outline.contains(&pixelpaint::PixelPoint::new(8, 8)));
}

#[test]
fn symmetry_lines_can_be_managed_through_the_editor() {
    let mut editor = Editor::new(32, 32).unwrap();
    let id = editor.add_symmetry_line((16.0, 16.0), 0.0).unwrap();
    editor.move_symmetry_line(id, (4.0, 40.5));
    assert_eq!(editor.document().symmetry().lines()[0].center(), (4.0, 40.5));

    editor.remove_symmetry_line(id);
    assert!(editor.document().symmetry().lines().is_empty());

    // The 9th line is rejected and the set left untouched.
    for i in 0..8 {
        editor.add_symmetry_line((16.0, 16.0), i as f32 * 10.0).unwrap();
    }
    assert!(editor.add_symmetry_line((0.0, 0.0), 5.0).is_err());
    assert_eq!(editor.document().symmetry().lines().len(), 8);
}

#[test]
fn symmetry_line_angle_toggle_and_clear_through_the_editor() {
    let mut editor = Editor::new(21, 21).unwrap();
    editor.set_tool(ToolKind::Brush);
    editor.set_foreground_color(Rgba::BLACK);
    let id = editor.add_symmetry_line((10.0, 10.0), 0.0).unwrap();
    editor.set_symmetry_enabled(true);

    editor.set_symmetry_line_angle(id, 450.0);
    let line = editor.document().symmetry().lines()[0];
    assert_eq!(line.angle_deg(), 90.0);

    // A toggled-off line stops mirroring.
    editor.toggle_symmetry_line(id);
    editor.pointer_down(15, 15);
    editor.pointer_up(15, 15);
    assert_eq!(editor.snapshot().get(15, 15).unwrap(), Rgba::BLACK);
    assert!(editor.snapshot().get(5, 15).unwrap().is_transparent());

    editor.toggle_symmetry_line(id);
    editor.pointer_down(15, 3);
    editor.pointer_up(15, 3);
    assert_eq!(editor.snapshot().get(5, 3).unwrap(), Rgba::BLACK);

    editor.clear_symmetry_lines();
    assert!(editor.document().symmetry().lines().is_empty());
    editor.pointer_down(18, 18);
    editor.pointer_up(18, 18);
    assert!(editor.snapshot().get(2, 18).unwrap().is_transparent());
}

#[test]
fn symmetry_center_drag_captures_the_pointer() {
    let mut editor = Editor::new(40, 40).unwrap();
    editor.set_tool(ToolKind::Brush);
    editor.set_foreground_color(Rgba::BLACK);
    let id = editor.add_symmetry_line((20.0, 20.0), 90.0).unwrap();
    editor.set_symmetry_enabled(true);

    // Press lands on the center handle: drags the line, paints nothing.
    editor.pointer_down(20, 20);
    editor.pointer_move(28, 14);
    editor.pointer_up(28, 14);

    assert!(editor.snapshot().pixels().iter().all(|p| p.is_transparent()));
    let line = editor
        .document()
        .symmetry()
        .lines()
        .iter()
        .find(|l| l.id() == id)
        .unwrap();
    assert_eq!(line.center(), (28.0, 14.0));
    assert!(!editor.can_undo());
}
