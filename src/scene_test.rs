#![allow(clippy::float_cmp)]

use super::*;

fn rect_at(left: f64, top: f64) -> SceneObject {
    SceneObject::new(ObjectKind::Rect, left, top, 40.0, 20.0)
}

// =============================================================
// SceneObject
// =============================================================

#[test]
fn new_object_has_fresh_coords() {
    let obj = rect_at(10.0, 5.0);
    assert_eq!(obj.coords().top_left, Point::new(10.0, 5.0));
    assert_eq!(obj.coords().bottom_right, Point::new(50.0, 25.0));
}

#[test]
fn setters_leave_coords_stale_until_recompute() {
    let mut obj = rect_at(0.0, 0.0);
    obj.set_left(8.0);
    obj.set_top(-4.0);
    assert_eq!(obj.coords().top_left, Point::new(0.0, 0.0));
    obj.recompute_coords();
    assert_eq!(obj.coords().top_left, Point::new(8.0, -4.0));
    assert_eq!(obj.coords().bottom_right, Point::new(48.0, 16.0));
}

#[test]
fn preview_includes_clip_only_when_present() {
    let clip = ClipRegion { x: 0.0, y: 0.0, width: 10.0, height: 10.0 };
    let mut obj = rect_at(0.0, 0.0).clipped(clip);
    assert!(obj.preview().contains("clip-path"));
    obj.clear_clip();
    assert!(obj.clip.is_none());
    let preview = obj.preview();
    assert!(preview.starts_with("data:image/svg+xml"));
    assert!(!preview.contains("clip-path"));
}

#[test]
fn named_sets_name() {
    let obj = rect_at(0.0, 0.0).named("frame");
    assert_eq!(CanvasObject::name(&obj), Some("frame"));
    assert_eq!(obj.kind(), ObjectKind::Rect);
}

// =============================================================
// Store
// =============================================================

#[test]
fn insert_appends_in_draw_order() {
    let mut scene = SceneCanvas::new();
    let a = scene.insert(rect_at(0.0, 0.0));
    let b = scene.insert(rect_at(1.0, 1.0));
    let ids: Vec<ObjectRef> = scene.objects().into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![a, b]);
    assert_eq!(scene.len(), 2);
}

#[test]
fn remove_clears_active_selection() {
    let mut scene = SceneCanvas::new();
    let a = scene.insert(rect_at(0.0, 0.0));
    assert!(scene.set_active(Some(a)));
    assert!(scene.remove(a).is_some());
    assert_eq!(scene.active_object(), None);
    assert!(scene.is_empty());
}

#[test]
fn remove_unknown_records_nothing() {
    let mut scene = SceneCanvas::new();
    assert!(scene.remove(ObjectRef::new()).is_none());
    assert_eq!(scene.history_depth(), (0, 0));
}

#[test]
fn set_active_refuses_unknown_ref() {
    let mut scene = SceneCanvas::new();
    assert!(!scene.set_active(Some(ObjectRef::new())));
    assert!(scene.set_active(None));
}

#[test]
fn add_object_selects_and_keeps_source() {
    let mut scene = SceneCanvas::new();
    let desc = ObjectDescriptor::svg(AssetSource::Url("https://cdn.test/heart.svg".into()));
    let id = scene.add_object(desc);
    assert_eq!(scene.active_object(), Some(id));
    let obj = scene.get(id).unwrap();
    assert_eq!(obj.kind, ObjectKind::Svg);
    assert_eq!(obj.source, Some(AssetSource::Url("https://cdn.test/heart.svg".into())));
}

#[test]
fn request_render_counts() {
    let mut scene = SceneCanvas::new();
    scene.request_render();
    scene.request_render();
    assert_eq!(scene.render_count(), 2);
}

// =============================================================
// History
// =============================================================

#[test]
fn undo_and_redo_on_empty_history_are_noops() {
    let mut scene = SceneCanvas::new();
    scene.undo();
    scene.redo();
    assert!(scene.is_empty());
    assert_eq!(scene.history_depth(), (0, 0));
}

#[test]
fn undo_reverts_insert_and_redo_restores_it() {
    let mut scene = SceneCanvas::new();
    let a = scene.insert(rect_at(0.0, 0.0));
    scene.undo();
    assert!(scene.get(a).is_none());
    assert_eq!(scene.history_depth(), (0, 1));
    scene.redo();
    assert!(scene.get(a).is_some());
    assert_eq!(scene.history_depth(), (1, 0));
}

#[test]
fn undo_drops_selection_of_vanished_object() {
    let mut scene = SceneCanvas::new();
    let a = scene.insert(rect_at(0.0, 0.0));
    scene.set_active(Some(a));
    scene.undo();
    assert_eq!(scene.active_object(), None);
}

#[test]
fn new_edit_clears_redo_stack() {
    let mut scene = SceneCanvas::new();
    scene.insert(rect_at(0.0, 0.0));
    scene.undo();
    scene.insert(rect_at(5.0, 5.0));
    assert_eq!(scene.history_depth(), (1, 0));
}

#[test]
fn history_is_bounded() {
    let mut scene = SceneCanvas::with_history_limit(3);
    for n in 0..10 {
        scene.insert(rect_at(f64::from(n), 0.0));
    }
    assert_eq!(scene.history_depth(), (3, 0));
    for _ in 0..5 {
        scene.undo();
    }
    assert_eq!(scene.len(), 7);
}

#[test]
fn zero_history_limit_disables_undo() {
    let mut scene = SceneCanvas::with_history_limit(0);
    scene.insert(rect_at(0.0, 0.0));
    scene.undo();
    assert_eq!(scene.len(), 1);
}

#[test]
fn zoom_defaults_and_stores() {
    let mut scene = SceneCanvas::new();
    assert_eq!(scene.zoom(), 1.0);
    scene.set_zoom(0.5);
    assert_eq!(scene.zoom(), 0.5);
}
