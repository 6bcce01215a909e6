use super::*;

fn settle(spring: &mut Spring, steps: u32) {
    for _ in 0..steps {
        spring.update(1.0 / 120.0);
    }
}

#[test]
fn starts_at_rest_on_target() {
    let s = Spring::stiff(5.0);
    assert_eq!(s.value(), 5.0);
    assert_eq!(s.velocity(), 0.0);
    assert!(s.is_at_rest());
}

#[test]
fn converges_to_a_new_target() {
    let mut s = Spring::stiff(0.0);
    s.set_target(1.0);
    settle(&mut s, 1200);
    assert!((s.value() - 1.0).abs() < 0.001, "value = {}", s.value());
    assert!(s.is_at_rest());
}

#[test]
fn all_presets_converge() {
    for mut s in [Spring::gentle(0.0), Spring::wobbly(0.0), Spring::stiff(0.0), Spring::slow(0.0)] {
        s.set_target(10.0);
        settle(&mut s, 2400);
        assert!((s.value() - 10.0).abs() < 0.01, "value = {}", s.value());
    }
}

#[test]
fn underdamped_spring_overshoots() {
    let mut s = Spring::wobbly(0.0);
    s.set_target(1.0);
    let mut max = f32::MIN;
    for _ in 0..1200 {
        max = max.max(s.update(1.0 / 120.0));
    }
    assert!(max > 1.0, "wobbly never overshot ({max})");
}

#[test]
fn set_value_teleports_and_kills_momentum() {
    let mut s = Spring::stiff(0.0);
    s.set_target(10.0);
    settle(&mut s, 10);
    assert!(s.velocity().abs() > 0.0);
    s.set_value(3.0);
    assert_eq!(s.value(), 3.0);
    assert_eq!(s.velocity(), 0.0);
}

#[test]
fn retargeting_keeps_momentum() {
    let mut s = Spring::stiff(0.0);
    s.set_target(10.0);
    settle(&mut s, 20);
    let v = s.velocity();
    s.set_target(-10.0);
    assert_eq!(s.velocity(), v);
}

#[test]
fn negative_dt_is_ignored() {
    let mut s = Spring::stiff(0.0);
    s.set_target(1.0);
    settle(&mut s, 5);
    let (value, velocity) = (s.value(), s.velocity());
    s.update(-1.0);
    assert_eq!(s.value(), value);
    assert_eq!(s.velocity(), velocity);
}

#[test]
fn degenerate_coefficients_are_clamped() {
    let mut s = Spring::new(0.0, -5.0, -5.0, 0.0);
    s.set_target(1.0);
    // Must stay finite under integration.
    for _ in 0..100 {
        s.update(1.0 / 120.0);
    }
    assert!(s.value().is_finite());
}
