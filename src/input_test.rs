#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Button
// =============================================================

#[test]
fn button_codes_follow_engine_numbering() {
    assert_eq!(Button::from_code(1), Some(Button::Primary));
    assert_eq!(Button::from_code(2), Some(Button::Middle));
    assert_eq!(Button::from_code(3), Some(Button::Secondary));
}

#[test]
fn button_unknown_code_is_none() {
    assert_eq!(Button::from_code(0), None);
    assert_eq!(Button::from_code(4), None);
    assert_eq!(Button::from_code(-1), None);
}

// =============================================================
// WheelInput flags
// =============================================================

#[test]
fn wheel_flags_start_cleared() {
    let w = WheelInput::new(10.0, true);
    assert!(!w.is_default_prevented());
    assert!(!w.is_propagation_stopped());
}

#[test]
fn wheel_flags_set_through_shared_reference() {
    let w = WheelInput::new(-3.0, false);
    let r = &w;
    r.prevent_default();
    r.stop_propagation();
    assert!(w.is_default_prevented());
    assert!(w.is_propagation_stopped());
}

// =============================================================
// Raw pointer validation
// =============================================================

#[test]
fn raw_pointer_parses_from_json() {
    let id = ObjectRef::new();
    let json = format!(r#"{{"button":3,"target":"{id}","offsetX":12.5,"offsetY":40}}"#);
    let raw: RawPointerEvent = serde_json::from_str(&json).unwrap();
    let down = PointerDown::try_from(raw).unwrap();
    assert_eq!(down.button, Button::Secondary);
    assert_eq!(down.target, Some(id));
    assert_eq!(down.offset, Point::new(12.5, 40.0));
}

#[test]
fn raw_pointer_missing_target_is_none() {
    let raw: RawPointerEvent = serde_json::from_str(r#"{"button":1,"offsetX":0,"offsetY":0}"#).unwrap();
    let down = PointerDown::try_from(raw).unwrap();
    assert_eq!(down.target, None);
}

#[test]
fn raw_pointer_rejects_unknown_button() {
    let raw = RawPointerEvent { button: 9, target: None, offset_x: 0.0, offset_y: 0.0 };
    assert_eq!(PointerDown::try_from(raw), Err(InputError::UnknownButton(9)));
}

#[test]
fn raw_pointer_rejects_nan_offset() {
    let raw = RawPointerEvent { button: 1, target: None, offset_x: f64::NAN, offset_y: 0.0 };
    assert_eq!(PointerDown::try_from(raw), Err(InputError::NonFinite { field: "offsetX" }));
}

// =============================================================
// Raw wheel validation
// =============================================================

#[test]
fn raw_wheel_parses_ctrl_default_false() {
    let raw: RawWheelEvent = serde_json::from_str(r#"{"deltaY":-120}"#).unwrap();
    let wheel = WheelInput::try_from(raw).unwrap();
    assert_eq!(wheel.delta_y, -120.0);
    assert!(!wheel.ctrl);
}

#[test]
fn raw_wheel_rejects_infinite_delta() {
    let raw = RawWheelEvent { delta_y: f64::INFINITY, ctrl_key: true };
    let err = WheelInput::try_from(raw).unwrap_err();
    assert_eq!(err, InputError::NonFinite { field: "deltaY" });
}

// =============================================================
// Raw key validation
// =============================================================

#[test]
fn raw_key_normalizes_dom_letter_code() {
    let raw: RawKeyEvent = serde_json::from_str(r#"{"code":"KeyZ","ctrlKey":true}"#).unwrap();
    let key = KeyInput::try_from(raw).unwrap();
    assert_eq!(key, KeyInput::new("Z", true, false));
}

#[test]
fn raw_key_keeps_arrow_code() {
    let raw = RawKeyEvent { code: "ArrowLeft".into(), ctrl_key: false, shift_key: true };
    let key = KeyInput::try_from(raw).unwrap();
    assert_eq!(key.code, "ArrowLeft");
    assert!(key.shift);
}

#[test]
fn raw_key_rejects_blank_code() {
    let raw = RawKeyEvent { code: "  ".into(), ctrl_key: false, shift_key: false };
    assert_eq!(KeyInput::try_from(raw), Err(InputError::EmptyKeyCode));
}

#[test]
fn normalize_code_cases() {
    assert_eq!(normalize_code("KeyA"), "A");
    assert_eq!(normalize_code("Keyz"), "Z");
    assert_eq!(normalize_code("Z"), "Z");
    assert_eq!(normalize_code("KeyboardLayout"), "KeyboardLayout");
    assert_eq!(normalize_code("Digit1"), "Digit1");
}

#[test]
fn input_error_messages() {
    assert_eq!(InputError::UnknownButton(7).to_string(), "unknown mouse button code: 7");
    assert_eq!(InputError::NonFinite { field: "deltaY" }.to_string(), "non-finite value for `deltaY`");
    assert_eq!(InputError::EmptyKeyCode.to_string(), "key event has an empty code");
}
