use super::*;

use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::core::Rgba8;
use crate::scene::layer::LayerId;
use crate::widget::style::StyleOverride;

fn button() -> Button {
    let mut b = Button::new(20, 10, WidgetShape::Rectangle).unwrap();
    b.set_position(10.0, 10.0);
    b
}

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
fn hit_test_uses_half_open_bounds() {
    let b = button();
    assert!(b.hit_test(10.0, 10.0));
    assert!(b.hit_test(29.9, 19.9));
    assert!(!b.hit_test(30.0, 15.0));
    assert!(!b.hit_test(9.9, 15.0));
}

#[test]
fn state_machine_tracks_the_pointer() {
    let mut b = button();
    assert_eq!(b.state(), InteractionState::Normal);

    b.handle_event(&moved(15.0, 15.0));
    assert_eq!(b.state(), InteractionState::Hover);

    b.handle_event(&down(15.0, 15.0));
    assert_eq!(b.state(), InteractionState::Pressed);

    b.handle_event(&up(15.0, 15.0));
    assert_eq!(b.state(), InteractionState::Hover);

    b.handle_event(&moved(0.0, 0.0));
    assert_eq!(b.state(), InteractionState::Normal);
}

#[test]
fn click_fires_on_release_inside() {
    let mut b = button();
    let clicks = Rc::new(RefCell::new(0));
    let seen = clicks.clone();
    b.set_on_click(move |_| *seen.borrow_mut() += 1);

    b.handle_event(&down(15.0, 15.0));
    let ev = b.handle_event(&up(16.0, 14.0)).unwrap();
    assert_eq!((ev.x, ev.y), (16.0, 14.0));
    assert_eq!(ev.button, PointerButton::Left);
    assert_eq!(*clicks.borrow(), 1);
}

#[test]
fn release_outside_cancels_the_click() {
    let mut b = button();
    b.handle_event(&down(15.0, 15.0));
    assert_eq!(b.handle_event(&up(100.0, 100.0)), None);
    assert_eq!(b.state(), InteractionState::Normal);
}

#[test]
fn press_must_start_inside() {
    let mut b = button();
    b.handle_event(&down(0.0, 0.0));
    assert_eq!(b.state(), InteractionState::Normal);
    assert_eq!(b.handle_event(&up(15.0, 15.0)), None);
}

#[test]
fn one_click_per_press_cycle() {
    let mut b = button();
    b.handle_event(&down(15.0, 15.0));
    assert!(b.handle_event(&up(15.0, 15.0)).is_some());
    // Release again without a press.
    assert_eq!(b.handle_event(&up(15.0, 15.0)), None);
}

#[test]
fn state_changes_ease_instead_of_snapping() {
    let mut b = button();
    b.set_styles(StyleSet {
        normal: StateStyle { opacity: 1.0, ..StateStyle::default() },
        hover: StyleOverride { opacity: Some(0.0), ..StyleOverride::default() },
        ..StyleSet::default()
    });
    b.set_transition(0.2, Ease::Linear);

    b.handle_event(&moved(15.0, 15.0));
    b.update(0.1);
    let opacity = b.current_style().opacity;
    assert!(opacity > 0.01 && opacity < 0.99, "opacity = {opacity}");

    b.update(0.2);
    assert_eq!(b.current_style().opacity, 0.0);
}

#[test]
fn set_styles_at_rest_applies_immediately() {
    let mut b = button();
    let styles = StyleSet {
        normal: StateStyle { color: Rgba8::opaque(1, 2, 3), ..StateStyle::default() },
        ..StyleSet::default()
    };
    b.set_styles(styles);
    assert_eq!(b.current_style().color, Rgba8::opaque(1, 2, 3));
}

#[test]
fn update_rasterizes_the_current_style() {
    let mut b = Button::new(8, 8, WidgetShape::Rectangle).unwrap();
    b.set_styles(StyleSet {
        normal: StateStyle { color: Rgba8::opaque(50, 60, 70), ..StateStyle::default() },
        ..StyleSet::default()
    });
    b.update(0.0);
    assert_eq!(b.surface().get_pixel(4, 4), Rgba8::opaque(50, 60, 70));
}

#[test]
fn apply_to_layer_mirrors_style_and_position() {
    let mut b = button();
    b.set_styles(StyleSet {
        normal: StateStyle {
            opacity: 0.5,
            scale: 1.2,
            blur_radius: 4.0,
            ..StateStyle::default()
        },
        ..StyleSet::default()
    });
    b.update(0.0);

    let mut layer = Layer::new(LayerId(0), Surface::new(20, 10).unwrap());
    b.apply_to_layer(&mut layer);
    assert_eq!((layer.x, layer.y), (10, 10));
    assert_eq!(layer.opacity(), 0.5);
    assert_eq!(layer.scale(), 1.2);
    assert_eq!(layer.material, Material::frosted_glass(4.0));
}
