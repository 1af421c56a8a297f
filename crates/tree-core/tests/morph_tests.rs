// Host-side tests for the morph controller, easing and the mode driver.

use tree_core::{smoothstep, weighted_blend, Mode, ModeDriver, MorphController};

const DT: f32 = 1.0 / 60.0;

#[test]
fn smoothstep_has_fixed_endpoints_and_flat_ends() {
    assert_eq!(smoothstep(0.0), 0.0);
    assert_eq!(smoothstep(1.0), 1.0);
    assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
    // Clamped outside the unit interval.
    assert_eq!(smoothstep(-2.0), 0.0);
    assert_eq!(smoothstep(3.0), 1.0);
    // Zero derivative at both ends: tiny steps barely move the output.
    let h = 1e-3;
    assert!(smoothstep(h) / h < 0.01);
    assert!((1.0 - smoothstep(1.0 - h)) / h < 0.01);
}

#[test]
fn smoothstep_is_monotonic() {
    let mut prev = 0.0;
    for i in 0..=200 {
        let v = smoothstep(i as f32 / 200.0);
        assert!(v >= prev);
        prev = v;
    }
}

#[test]
fn weight_two_squares_weight_one() {
    for i in 0..=20 {
        let p = i as f32 / 20.0;
        let t1 = weighted_blend(p, 1.0);
        let t2 = weighted_blend(p, 2.0);
        assert!((t2 - t1 * t1).abs() < 1e-6, "p={p}: t1={t1} t2={t2}");
    }
}

#[test]
fn lighter_weights_arrive_first() {
    for i in 1..20 {
        let p = i as f32 / 20.0;
        let fast = weighted_blend(p, 0.6);
        let base = weighted_blend(p, 1.0);
        let slow = weighted_blend(p, 1.6);
        assert!(fast > base && base > slow, "p={p}: {fast} {base} {slow}");
    }
}

#[test]
fn controller_starts_at_initial_mode_target() {
    assert_eq!(MorphController::new(Mode::Formed, 1.6).progress(), 1.0);
    assert_eq!(MorphController::new(Mode::Chaos, 1.6).progress(), 0.0);
}

#[test]
fn controller_converges_to_formed_without_leaving_range() {
    let mut morph = MorphController::new(Mode::Chaos, 1.6);
    let mut prev = morph.progress();
    for _ in 0..(60 * 10) {
        let p = morph.step(DT, Mode::Formed);
        assert!((0.0..=1.0).contains(&p), "progress {p} out of range");
        assert!(p >= prev, "progress went backwards: {prev} -> {p}");
        prev = p;
    }
    assert!((1.0 - morph.progress()).abs() < 1e-3);
}

#[test]
fn controller_is_frame_rate_independent() {
    let mut coarse = MorphController::new(Mode::Chaos, 2.0);
    let mut fine = MorphController::new(Mode::Chaos, 2.0);
    for _ in 0..30 {
        coarse.step(1.0 / 30.0, Mode::Formed);
    }
    for _ in 0..120 {
        fine.step(1.0 / 120.0, Mode::Formed);
    }
    assert!((coarse.progress() - fine.progress()).abs() < 1e-4);
}

#[test]
fn controller_ignores_bad_time_steps() {
    let mut morph = MorphController::new(Mode::Chaos, 1.6);
    morph.step(-1.0, Mode::Formed);
    morph.step(f32::NAN, Mode::Formed);
    morph.step(f32::INFINITY, Mode::Formed);
    assert_eq!(morph.progress(), 0.0);
    // A single huge step lands on the target, not past it.
    morph.step(1e6, Mode::Formed);
    assert_eq!(morph.progress(), 1.0);
}

#[test]
fn mode_round_trips_and_parses() {
    assert_eq!(Mode::Chaos.toggled(), Mode::Formed);
    assert_eq!(Mode::Formed.toggled().toggled(), Mode::Formed);
    assert_eq!("chaos".parse::<Mode>(), Ok(Mode::Chaos));
    assert_eq!(" Formed ".parse::<Mode>(), Ok(Mode::Formed));
    assert!("sideways".parse::<Mode>().is_err());
    assert_eq!(Mode::Chaos.to_string(), "chaos");
}

#[test]
fn interval_ticks_flip_once_each_when_enabled() {
    let mut driver = ModeDriver::new(Mode::Formed, true);
    let mut expected = Mode::Formed;
    for _ in 0..10 {
        assert!(driver.on_interval_tick());
        expected = expected.toggled();
        assert_eq!(driver.mode(), expected);
    }
    assert_eq!(driver.flip_count(), 10);
}

#[test]
fn interval_ticks_do_nothing_when_disabled() {
    let mut driver = ModeDriver::new(Mode::Chaos, true);
    driver.set_auto_shift(false);
    for _ in 0..10 {
        assert!(!driver.on_interval_tick());
    }
    assert_eq!(driver.mode(), Mode::Chaos);
    assert_eq!(driver.flip_count(), 0);
}

#[test]
fn simulated_wall_clock_flips_once_per_interval() {
    // 16 ms frames for 65 s; the 6.5 s timer fires on its own schedule.
    let interval_ms = 6_500u64;
    let mut driver = ModeDriver::new(Mode::Formed, true);
    let mut next_fire = interval_ms;
    let mut now_ms = 0u64;
    while now_ms < 65_000 {
        now_ms += 16;
        while now_ms >= next_fire {
            driver.on_interval_tick();
            next_fire += interval_ms;
        }
    }
    assert_eq!(driver.flip_count(), 10);

    driver.set_auto_shift(false);
    let before = driver.flip_count();
    while now_ms < 130_000 {
        now_ms += 16;
        while now_ms >= next_fire {
            driver.on_interval_tick();
            next_fire += interval_ms;
        }
    }
    assert_eq!(driver.flip_count(), before);
}

#[test]
fn manual_toggle_works_regardless_of_auto_shift() {
    let mut driver = ModeDriver::new(Mode::Formed, false);
    assert_eq!(driver.toggle_mode(), Mode::Chaos);
    driver.set_auto_shift(true);
    assert_eq!(driver.toggle_mode(), Mode::Formed);
    // A tick right after a manual toggle flips exactly once more.
    assert!(driver.on_interval_tick());
    assert_eq!(driver.mode(), Mode::Chaos);
    assert_eq!(driver.flip_count(), 3);
}

#[test]
fn toggling_auto_shift_reports_new_state() {
    let mut driver = ModeDriver::default();
    assert!(driver.auto_shift());
    assert!(!driver.toggle_auto_shift());
    assert!(driver.toggle_auto_shift());
    driver.set_mode(Mode::Formed);
    assert_eq!(driver.flip_count(), 0);
}
