// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn drag_reports_deltas_only_while_active() {
    let mut drag = DragState::default();
    assert_eq!(drag.move_to(1, Vec2::new(5.0, 5.0)), None);

    drag.begin(1, Vec2::new(10.0, 10.0));
    assert_eq!(drag.move_to(1, Vec2::new(14.0, 7.0)), Some(Vec2::new(4.0, -3.0)));
    assert_eq!(drag.move_to(1, Vec2::new(15.0, 7.0)), Some(Vec2::new(1.0, 0.0)));

    assert!(drag.end(1));
    assert!(!drag.end(1));
    assert_eq!(drag.move_to(1, Vec2::new(20.0, 20.0)), None);
}

#[test]
fn other_pointers_do_not_steal_the_drag() {
    let mut drag = DragState::default();
    drag.begin(7, Vec2::ZERO);
    assert_eq!(drag.move_to(8, Vec2::new(50.0, 50.0)), None);
    assert!(!drag.end(8));
    assert_eq!(drag.move_to(7, Vec2::new(2.0, 0.0)), Some(Vec2::new(2.0, 0.0)));
}

#[test]
fn wheel_delta_modes() {
    assert_eq!(wheel_delta_px(3.0, 0, 16.0, 800.0), 3.0);
    assert_eq!(wheel_delta_px(3.0, 1, 16.0, 800.0), 48.0);
    assert_eq!(wheel_delta_px(-1.0, 2, 16.0, 800.0), -800.0);
    assert_eq!(wheel_delta_px(2.0, 9, 16.0, 800.0), 2.0);
}

#[test]
fn aspect_ratio_never_divides_by_zero() {
    assert_eq!(aspect_ratio(1920, 1080), 1920.0 / 1080.0);
    assert_eq!(aspect_ratio(100, 0), 100.0);
    assert_eq!(aspect_ratio(0, 0), 1.0);
}

#[test]
fn tension_is_a_clamped_percentage() {
    assert_eq!(tension_percent(0.0), 0);
    assert_eq!(tension_percent(0.424), 42);
    assert_eq!(tension_percent(0.999), 100);
    assert_eq!(tension_percent(3.0), 100);
    assert_eq!(tension_percent(-1.0), 0);
}
