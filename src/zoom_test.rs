use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

#[test]
fn wheel_delta_direction() {
    assert_eq!(ZoomDirection::from_wheel_delta(-100.0), ZoomDirection::In);
    assert_eq!(ZoomDirection::from_wheel_delta(100.0), ZoomDirection::Out);
    assert_eq!(ZoomDirection::from_wheel_delta(0.0), ZoomDirection::In);
}

#[test]
fn step_moves_by_exactly_one_step() {
    assert!(approx_eq(step_zoom(1.0, ZoomDirection::Out, 0.05), 0.95));
    assert!(approx_eq(step_zoom(1.0, ZoomDirection::In, 0.05), 1.05));
}

#[test]
fn step_clamps_at_bounds() {
    assert!(approx_eq(step_zoom(0.12, ZoomDirection::Out, 0.05), MIN_ZOOM));
    assert!(approx_eq(step_zoom(2.98, ZoomDirection::In, 0.05), MAX_ZOOM));
}

#[test]
fn clamp_handles_out_of_range_and_nan() {
    assert!(approx_eq(clamp_zoom(-5.0), MIN_ZOOM));
    assert!(approx_eq(clamp_zoom(50.0), MAX_ZOOM));
    assert!(approx_eq(clamp_zoom(f64::NAN), MIN_ZOOM));
    assert!(approx_eq(clamp_zoom(1.5), 1.5));
}

#[test]
fn repeated_steps_never_leave_range() {
    let mut z = 1.0;
    for n in 0..200 {
        let dir = if (n / 37) % 2 == 0 { ZoomDirection::In } else { ZoomDirection::Out };
        z = step_zoom(z, dir, 0.05);
        assert!((MIN_ZOOM..=MAX_ZOOM).contains(&z), "zoom {z} escaped range at step {n}");
    }
}
