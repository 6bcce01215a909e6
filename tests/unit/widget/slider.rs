use super::*;

use std::cell::RefCell;
use std::rc::Rc;

use crate::input::PointerButton;

fn moved(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerMoved { x, y }
}

fn down(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerDown { x, y, button: PointerButton::Left }
}

fn up(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerUp { x, y, button: PointerButton::Left }
}

#[test]
fn linear_mapping_round_trips() {
    let mut s = Slider::new(100, 10, SliderTrack::Linear).unwrap();
    s.set_value(0.25);
    assert!((s.value() - 0.25).abs() < 1e-6);
    let pos = s.value_to_position(0.25);
    assert!((pos - 25.0).abs() < 1e-4);
    assert!((s.position_to_value(pos) - 0.25).abs() < 1e-6);
}

#[test]
fn set_range_swaps_reversed_bounds() {
    let mut s = Slider::new(100, 10, SliderTrack::Linear).unwrap();
    s.set_range(5.0, 1.0);
    s.set_value(3.0);
    assert!((s.value_to_t(3.0) - 0.5).abs() < 1e-6);
    assert!((s.value() - 3.0).abs() < 1e-5);
}

#[test]
fn set_value_clamps_to_the_range() {
    let mut s = Slider::new(100, 10, SliderTrack::Linear).unwrap();
    s.set_range(0.0, 10.0);
    s.set_value(50.0);
    assert!((s.value() - 10.0).abs() < 1e-5);
    s.set_value(-50.0);
    assert!(s.value().abs() < 1e-5);
}

#[test]
fn selector_interpolates_geometrically() {
    let s = Slider::new(100, 10, SliderTrack::Selector { stops: vec![1.0, 10.0, 100.0] }).unwrap();
    // Stops sit at equidistant track marks.
    assert!((s.value_to_t(1.0) - 0.0).abs() < 1e-6);
    assert!((s.value_to_t(10.0) - 0.5).abs() < 1e-6);
    assert!((s.value_to_t(100.0) - 1.0).abs() < 1e-6);
    // Halfway into a decade is the geometric mean.
    let v = s.t_to_value(0.25);
    assert!((v - 10.0f32.sqrt()).abs() < 1e-3, "v = {v}");
    // Round trip through an interior value.
    let t = s.value_to_t(50.0);
    assert!((s.t_to_value(t) - 50.0).abs() < 1e-2);
}

#[test]
fn selector_range_comes_from_its_stops() {
    let mut s = Slider::new(100, 10, SliderTrack::Selector { stops: vec![2.0, 20.0] }).unwrap();
    s.set_range(0.0, 1.0);
    s.set_value(20.0);
    assert!((s.value() - 20.0).abs() < 1e-4);
    s.set_value(1000.0);
    assert!((s.value() - 20.0).abs() < 1e-4);
}

#[test]
fn selector_handles_non_positive_stops_linearly() {
    let s = Slider::new(100, 10, SliderTrack::Selector { stops: vec![-10.0, 10.0] }).unwrap();
    assert!((s.t_to_value(0.5) - 0.0).abs() < 1e-4);
    assert!((s.value_to_t(0.0) - 0.5).abs() < 1e-6);
}

#[test]
fn hit_band_extends_past_a_thin_track() {
    let s = Slider::new(100, 10, SliderTrack::Linear).unwrap();
    // Band is max(2 * height, 20) centered on the track line.
    assert!(s.hit_test(50.0, -5.0));
    assert!(s.hit_test(50.0, 15.0));
    assert!(!s.hit_test(50.0, -6.0));
    assert!(!s.hit_test(-1.0, 5.0));
    assert!(!s.hit_test(101.0, 5.0));
}

#[test]
fn dragging_maps_the_pointer_and_notifies() {
    let mut s = Slider::new(100, 10, SliderTrack::Linear).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    s.set_on_change(move |v| sink.borrow_mut().push(v));

    s.handle_event(&down(50.0, 5.0));
    assert_eq!(s.state(), InteractionState::Pressed);
    assert!((s.value() - 0.5).abs() < 1e-5);

    s.handle_event(&moved(75.0, 5.0));
    assert!((s.value() - 0.75).abs() < 1e-5);

    s.handle_event(&up(75.0, 5.0));
    assert_eq!(s.state(), InteractionState::Hover);
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn set_value_does_not_notify() {
    let mut s = Slider::new(100, 10, SliderTrack::Linear).unwrap();
    let seen = Rc::new(RefCell::new(0));
    let sink = seen.clone();
    s.set_on_change(move |_| *sink.borrow_mut() += 1);
    s.set_value(0.7);
    assert_eq!(*seen.borrow(), 0);
}

#[test]
fn dragging_past_the_end_clamps() {
    let mut s = Slider::new(100, 10, SliderTrack::Linear).unwrap();
    s.handle_event(&down(50.0, 5.0));
    s.handle_event(&moved(300.0, 5.0));
    assert!((s.value() - 1.0).abs() < 1e-6);
    s.handle_event(&moved(-300.0, 5.0));
    assert!(s.value().abs() < 1e-6);
}

#[test]
fn holding_still_arms_fine_control() {
    let mut s = Slider::new(100, 10, SliderTrack::Linear).unwrap();
    s.handle_event(&down(50.0, 5.0));
    assert!(!s.is_zoomed());

    s.update(0.35);
    assert!(s.is_zoomed());

    // Zoomed drags move the value at reduced sensitivity.
    s.handle_event(&moved(60.0, 5.0));
    assert!((s.value() - 0.52).abs() < 1e-4, "value = {}", s.value());

    s.handle_event(&up(60.0, 5.0));
    assert!(!s.is_zoomed());
}

#[test]
fn pointer_movement_resets_the_hold_timer() {
    let mut s = Slider::new(100, 10, SliderTrack::Linear).unwrap();
    s.handle_event(&down(50.0, 5.0));
    s.update(0.2);
    s.handle_event(&moved(60.0, 5.0));
    s.update(0.2);
    assert!(!s.is_zoomed());
    s.update(0.15);
    assert!(s.is_zoomed());
}

#[test]
fn arc_pointer_maps_by_angle() {
    let mut s = Slider::new(100, 10, SliderTrack::Arc { start_deg: 0.0, sweep_deg: 90.0 }).unwrap();
    // Center (50, 50), radius 50; angles run clockwise from east.
    s.handle_event(&down(100.0, 50.0));
    assert!(s.value().abs() < 1e-5);
    s.handle_event(&moved(50.0, 100.0));
    assert!((s.value() - 1.0).abs() < 1e-5);
}

#[test]
fn arc_dead_zone_snaps_to_the_nearer_end() {
    let mut s = Slider::new(100, 10, SliderTrack::Arc { start_deg: 0.0, sweep_deg: 90.0 }).unwrap();
    s.set_value(0.5);
    // Straight above the center: closer to the start than the end.
    s.handle_event(&down(50.0, 0.0));
    assert!(s.value().abs() < 1e-5);
    s.handle_event(&up(50.0, 0.0));
    // Straight left: closer to the end.
    s.handle_event(&down(0.0, 50.0));
    assert!((s.value() - 1.0).abs() < 1e-5);
}

#[test]
fn arc_track_length_follows_the_sweep() {
    let s = Slider::new(100, 10, SliderTrack::Arc { start_deg: 0.0, sweep_deg: 90.0 }).unwrap();
    let len = s.value_to_position(1.0);
    assert!((len - std::f32::consts::FRAC_PI_2 * 50.0).abs() < 1e-2, "len = {len}");
}

#[test]
fn display_value_settles_on_the_target() {
    let mut s = Slider::new(100, 10, SliderTrack::Linear).unwrap();
    s.set_value(0.8);
    for _ in 0..480 {
        s.update(1.0 / 120.0);
    }
    assert!((s.display_value() - 0.8).abs() < 1e-3, "display = {}", s.display_value());
}

#[test]
fn update_renders_track_fill_and_thumb() {
    let mut s = Slider::new(100, 10, SliderTrack::Linear).unwrap();
    s.set_value(0.5);
    for _ in 0..480 {
        s.update(1.0 / 120.0);
    }
    let surface = s.surface();
    let cy = surface.height() as i32 / 2;
    // Filled on the left of the thumb, bare track on the right.
    assert_eq!(surface.get_pixel(58, cy), s.fill_color);
    assert_eq!(surface.get_pixel(130, cy), s.track_color);
    // Thumb sits at the halfway point.
    assert_eq!(surface.get_pixel(98, cy), s.thumb_color);
}

#[test]
fn apply_to_layer_offsets_for_the_drawing_margin() {
    let mut s = Slider::new(100, 10, SliderTrack::Linear).unwrap();
    s.set_position(60.0, 60.0);
    s.update(0.0);
    let mut layer = Layer::new(
        crate::scene::layer::LayerId(0),
        Surface::new(s.surface().width(), s.surface().height()).unwrap(),
    );
    s.apply_to_layer(&mut layer);
    assert_eq!(layer.x, 12);
    // Track center line stays at stack y = 65.
    assert_eq!(layer.y, 65 - s.surface().height() as i32 / 2);
}
