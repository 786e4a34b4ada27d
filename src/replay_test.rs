#![allow(clippy::float_cmp)]

use super::*;
use crate::canvas::AssetSource;

fn replay(seed: usize) -> Replay {
    Replay::new(InteractionConfig::default(), seed)
}

fn run(replay: &Replay, lines: &[&str]) {
    for line in lines {
        replay.apply_line(line).unwrap();
    }
}

#[test]
fn seeds_objects_in_a_row() {
    let report = replay(3).report();
    let lefts: Vec<f64> = report.objects.iter().map(|o| o.left).collect();
    assert_eq!(lefts, vec![0.0, 120.0, 240.0]);
    assert!(report.objects.iter().all(|o| o.top == 100.0));
    assert_eq!(report.objects[2].name.as_deref(), Some("object-2"));
    assert_eq!(report.state, InteractionState::new());
}

#[test]
fn select_then_arrow_moves_object() {
    let r = replay(2);
    run(&r, &[
        r#"{"event":"select","index":1}"#,
        r#"{"event":"keydown","code":"ArrowUp"}"#,
        r#"{"event":"keydown","code":"ArrowLeft"}"#,
    ]);
    let report = r.report();
    assert_eq!((report.objects[1].left, report.objects[1].top), (118.0, 98.0));
    assert_eq!(report.state.active_object(), Some(report.objects[1].id));
}

#[test]
fn ctrl_wheel_zooms_canvas_and_state() {
    let r = replay(0);
    run(&r, &[r#"{"event":"wheel","deltaY":100,"ctrlKey":true}"#, r#"{"event":"wheel","deltaY":100}"#]);
    let report = r.report();
    assert!((report.state.zoom_ratio() - 0.95).abs() < 1e-9);
    assert_eq!(report.canvas_zoom, report.state.zoom_ratio());
}

#[test]
fn right_click_on_object_opens_menu_and_click_elsewhere_closes() {
    let r = replay(1);
    run(&r, &[r#"{"event":"pointer-down","button":3,"target":0,"offsetX":120,"offsetY":64}"#]);
    assert!(r.report().state.context_menu().visible);
    run(&r, &[r#"{"event":"pointer-down","button":1,"offsetX":5,"offsetY":5}"#]);
    let menu = r.report().state.context_menu();
    assert!(!menu.visible);
    assert_eq!((menu.left, menu.top), (120.0, 64.0));
}

#[test]
fn dom_key_codes_drive_undo_and_redo() {
    let r = replay(2);
    run(&r, &[r#"{"event":"keydown","code":"KeyZ","ctrlKey":true}"#]);
    assert_eq!(r.report().objects.len(), 1);
    run(&r, &[r#"{"event":"keydown","code":"KeyZ","ctrlKey":true,"shiftKey":true}"#]);
    assert_eq!(r.report().objects.len(), 2);
}

#[test]
fn add_then_clear() {
    let r = replay(0);
    run(&r, &[
        r#"{"event":"add","descriptor":{"type":"svg","source":{"type":"url","value":"https://cdn.test/a.svg"}}}"#,
        r#"{"event":"select","index":0}"#,
    ]);
    assert!(r.report().state.active_object().is_some());
    run(&r, &[r#"{"event":"clear"}"#]);
    let report = r.report();
    assert_eq!(report.state.active_object(), None);
    assert_eq!(report.objects[0].kind, ObjectKind::Svg);
}

#[test]
fn apply_add_event_directly() {
    let r = replay(0);
    let descriptor = ObjectDescriptor::svg(AssetSource::Markup("<svg/>".into()));
    r.apply(TraceEvent::Add { descriptor }).unwrap();
    assert_eq!(r.report().objects.len(), 1);
}

#[test]
fn blank_lines_are_ignored() {
    let r = replay(0);
    assert!(r.apply_line("   \n").is_ok());
}

#[test]
fn bad_lines_are_errors_and_change_nothing() {
    let r = replay(1);
    assert!(matches!(r.apply_line("not json"), Err(ReplayError::Json(_))));
    assert!(matches!(r.apply_line(r#"{"event":"teleport"}"#), Err(ReplayError::Json(_))));
    assert!(matches!(r.apply_line(r#"{"event":"select","index":7}"#), Err(ReplayError::UnknownObject(7))));
    assert!(matches!(
        r.apply_line(r#"{"event":"pointer-down","button":9,"offsetX":0,"offsetY":0}"#),
        Err(ReplayError::Input(InputError::UnknownButton(9)))
    ));
    assert!(matches!(r.apply_line(r#"{"event":"keydown","code":""}"#), Err(ReplayError::Input(InputError::EmptyKeyCode))));
    assert_eq!(r.report().state, InteractionState::new());
}

#[test]
fn report_serializes() {
    let r = replay(1);
    let json = serde_json::to_value(r.report()).unwrap();
    assert_eq!(json["state"]["zoom_ratio"], 1.0);
    assert_eq!(json["objects"][0]["kind"], "rect");
    assert!(r.controller().is_attached());
}

#[test]
fn select_on_busy_canvas_fails_without_announcing() {
    let r = replay(1);
    let result = r.canvas.with(|_| r.apply(TraceEvent::Select { index: 0 })).unwrap();
    assert!(matches!(result, Err(ReplayError::CanvasBusy)));
    assert_eq!(r.report().state.active_object(), None);
    assert_eq!(r.canvas.with(SceneCanvas::active_object).flatten(), None);
}

#[test]
fn clear_on_busy_canvas_fails_and_keeps_selection() {
    let r = replay(1);
    run(&r, &[r#"{"event":"select","index":0}"#]);
    let result = r.canvas.with(|_| r.apply(TraceEvent::Clear)).unwrap();
    assert!(matches!(result, Err(ReplayError::CanvasBusy)));
    assert!(r.report().state.active_object().is_some());
}

#[test]
fn controller_uses_replay_config() {
    let config = InteractionConfig { move_step: 5.0, ..InteractionConfig::default() };
    let r = Replay::new(config, 1);
    assert_eq!(r.controller().config(), config);
    run(&r, &[r#"{"event":"select","index":0}"#, r#"{"event":"keydown","code":"ArrowRight"}"#]);
    assert_eq!(r.report().objects[0].left, 5.0);
}
