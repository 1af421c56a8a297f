// Host-side sanity checks for front-end constants.
// The web crate is wasm-only, so the pure modules are included directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn dom_ids_are_distinct_and_non_empty() {
    let ids = [CANVAS_ID, TOGGLE_MODE_ID, TOGGLE_AUTO_ID, HINT_ID];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        assert!(!a.contains(' '), "{:?} is not a valid element id", a);
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn frame_step_cap_is_a_few_frames() {
    assert!(MAX_FRAME_DT_SEC > 1.0 / 60.0);
    assert!(MAX_FRAME_DT_SEC <= 0.25);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn wheel_units_are_ordered() {
    assert!(WHEEL_LINE_PX > 1.0);
    assert!(WHEEL_PAGE_PX > WHEEL_LINE_PX);
    assert!(WHEEL_PX_PER_STEP > 0.0);
    assert!(DRAG_DEADZONE_PX >= 0.0);
}

#[test]
fn clear_color_is_dark_and_in_range() {
    for c in CLEAR_COLOR {
        assert!((0.0..=1.0).contains(&c));
        assert!(c < 0.1, "clear color should stay close to black");
    }
    assert!(EXPOSURE > 0.0);
}
