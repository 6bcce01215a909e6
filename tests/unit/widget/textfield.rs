use super::*;

use std::cell::RefCell;
use std::rc::Rc;

use crate::input::PointerButton;

fn field() -> (TextField, FocusManager) {
    let mut focus = FocusManager::new();
    let tf = TextField::new(200, 30, &mut focus).unwrap();
    (tf, focus)
}

fn focused_field() -> (TextField, FocusManager) {
    let (mut tf, mut focus) = field();
    tf.handle_event(&down(10.0, 10.0), &mut focus);
    (tf, focus)
}

fn down(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerDown { x, y, button: PointerButton::Left }
}

fn key(k: Key) -> InputEvent {
    InputEvent::KeyDown { key: k, modifiers: Modifiers::NONE }
}

fn key_mod(k: Key, modifiers: Modifiers) -> InputEvent {
    InputEvent::KeyDown { key: k, modifiers }
}

fn type_str(tf: &mut TextField, focus: &mut FocusManager, s: &str) {
    for ch in s.chars() {
        tf.handle_event(&InputEvent::TextInput { ch }, focus);
    }
}

const SHIFT: Modifiers = Modifiers { shift: true, ctrl: false, alt: false };
const CTRL: Modifiers = Modifiers { shift: false, ctrl: true, alt: false };

#[test]
fn click_inside_takes_focus_and_outside_releases_it() {
    let (mut tf, mut focus) = field();
    assert!(!tf.is_focused());

    assert!(tf.handle_event(&down(10.0, 10.0), &mut focus));
    assert!(tf.is_focused());
    assert!(focus.is_focused(tf.id()));
    assert_eq!(tf.state(), InteractionState::Focused);

    assert!(!tf.handle_event(&down(500.0, 500.0), &mut focus));
    assert!(!tf.is_focused());
    assert_eq!(focus.focused(), None);
}

#[test]
fn keys_are_ignored_without_focus() {
    let (mut tf, mut focus) = field();
    assert!(!tf.handle_event(&InputEvent::TextInput { ch: 'x' }, &mut focus));
    assert!(!tf.handle_event(&key(Key::Backspace), &mut focus));
    assert_eq!(tf.text(), "");
}

#[test]
fn text_input_inserts_at_the_caret() {
    let (mut tf, mut focus) = focused_field();
    type_str(&mut tf, &mut focus, "hello");
    assert_eq!(tf.text(), "hello");
    assert_eq!(tf.cursor(), 5);

    tf.handle_event(&key(Key::Home), &mut focus);
    tf.handle_event(&InputEvent::TextInput { ch: '>' }, &mut focus);
    assert_eq!(tf.text(), ">hello");
    assert_eq!(tf.cursor(), 1);
}

#[test]
fn control_characters_are_dropped() {
    let (mut tf, mut focus) = focused_field();
    tf.handle_event(&InputEvent::TextInput { ch: '\u{7}' }, &mut focus);
    tf.handle_event(&InputEvent::TextInput { ch: '\n' }, &mut focus);
    assert_eq!(tf.text(), "");
}

#[test]
fn backspace_removes_the_char_before_the_caret() {
    let (mut tf, mut focus) = focused_field();
    type_str(&mut tf, &mut focus, "abc");
    tf.handle_event(&key(Key::Backspace), &mut focus);
    assert_eq!(tf.text(), "ab");
    tf.handle_event(&key(Key::Left), &mut focus);
    tf.handle_event(&key(Key::Backspace), &mut focus);
    assert_eq!(tf.text(), "b");
    assert_eq!(tf.cursor(), 0);
}

#[test]
fn ctrl_backspace_deletes_a_word() {
    let (mut tf, mut focus) = focused_field();
    type_str(&mut tf, &mut focus, "one two  ");
    tf.handle_event(&key_mod(Key::Backspace, CTRL), &mut focus);
    assert_eq!(tf.text(), "one ");
    tf.handle_event(&key_mod(Key::Backspace, CTRL), &mut focus);
    assert_eq!(tf.text(), "");
}

#[test]
fn delete_removes_the_char_after_the_caret() {
    let (mut tf, mut focus) = focused_field();
    type_str(&mut tf, &mut focus, "abc");
    tf.handle_event(&key(Key::Home), &mut focus);
    tf.handle_event(&key(Key::Delete), &mut focus);
    assert_eq!(tf.text(), "bc");
    assert_eq!(tf.cursor(), 0);
}

#[test]
fn shift_arrows_build_a_selection() {
    let (mut tf, mut focus) = focused_field();
    type_str(&mut tf, &mut focus, "abcd");
    tf.handle_event(&key_mod(Key::Left, SHIFT), &mut focus);
    tf.handle_event(&key_mod(Key::Left, SHIFT), &mut focus);
    assert_eq!(tf.selection(), Some((2, 4)));

    // Moving without shift collapses it.
    tf.handle_event(&key(Key::Right), &mut focus);
    assert_eq!(tf.selection(), None);
}

#[test]
fn select_all_spans_the_whole_text() {
    let (mut tf, mut focus) = focused_field();
    type_str(&mut tf, &mut focus, "abcd");
    tf.handle_event(&key_mod(Key::A, CTRL), &mut focus);
    assert_eq!(tf.selection(), Some((0, 4)));
}

#[test]
fn typing_replaces_the_selection() {
    let (mut tf, mut focus) = focused_field();
    type_str(&mut tf, &mut focus, "abcd");
    tf.handle_event(&key_mod(Key::A, CTRL), &mut focus);
    tf.handle_event(&InputEvent::TextInput { ch: 'z' }, &mut focus);
    assert_eq!(tf.text(), "z");
    assert_eq!(tf.cursor(), 1);
    assert_eq!(tf.selection(), None);
}

#[test]
fn backspace_deletes_the_selection_whole() {
    let (mut tf, mut focus) = focused_field();
    type_str(&mut tf, &mut focus, "abcd");
    tf.handle_event(&key(Key::Home), &mut focus);
    tf.handle_event(&key_mod(Key::Right, SHIFT), &mut focus);
    tf.handle_event(&key_mod(Key::Right, SHIFT), &mut focus);
    tf.handle_event(&key(Key::Backspace), &mut focus);
    assert_eq!(tf.text(), "cd");
    assert_eq!(tf.cursor(), 0);
}

#[test]
fn enter_submits_the_current_text() {
    let (mut tf, mut focus) = focused_field();
    let seen = Rc::new(RefCell::new(String::new()));
    let sink = seen.clone();
    tf.set_on_submit(move |s| *sink.borrow_mut() = s.to_owned());
    type_str(&mut tf, &mut focus, "go");
    tf.handle_event(&key(Key::Enter), &mut focus);
    assert_eq!(*seen.borrow(), "go");
}

#[test]
fn escape_releases_focus() {
    let (mut tf, mut focus) = focused_field();
    tf.handle_event(&key(Key::Escape), &mut focus);
    assert!(!tf.is_focused());
    assert_eq!(focus.focused(), None);
}

#[test]
fn edits_notify_the_change_handler() {
    let (mut tf, mut focus) = focused_field();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    tf.set_on_change(move |s| sink.borrow_mut().push(s.to_owned()));
    type_str(&mut tf, &mut focus, "ab");
    tf.handle_event(&key(Key::Backspace), &mut focus);
    assert_eq!(*seen.borrow(), vec!["a", "ab", "a"]);
}

#[test]
fn max_chars_caps_typing_and_truncates() {
    let (mut tf, mut focus) = focused_field();
    tf.set_max_chars(Some(3));
    type_str(&mut tf, &mut focus, "abcdef");
    assert_eq!(tf.text(), "abc");

    tf.set_text("wxyz");
    assert_eq!(tf.text(), "wxy");
}

#[test]
fn set_text_clamps_the_caret() {
    let (mut tf, mut focus) = focused_field();
    type_str(&mut tf, &mut focus, "abcdef");
    assert_eq!(tf.cursor(), 6);
    tf.set_text("ab");
    assert_eq!(tf.cursor(), 2);
}

#[test]
fn click_places_the_caret_at_the_nearest_boundary() {
    let (mut tf, mut focus) = focused_field();
    type_str(&mut tf, &mut focus, "abcde");
    // Monospace advance at 16 px is 9.6 px per char, after 8 px padding.
    tf.handle_event(&down(8.0 + 19.0, 10.0), &mut focus);
    assert_eq!(tf.cursor(), 2);
    tf.handle_event(&down(0.0, 10.0), &mut focus);
    assert_eq!(tf.cursor(), 0);
    tf.handle_event(&down(199.0, 10.0), &mut focus);
    assert_eq!(tf.cursor(), 5);
}

#[test]
fn caret_moves_on_char_boundaries_in_multibyte_text() {
    let (mut tf, mut focus) = focused_field();
    type_str(&mut tf, &mut focus, "aé日b");
    assert_eq!(tf.cursor(), 4);
    tf.handle_event(&key(Key::Left), &mut focus);
    tf.handle_event(&key(Key::Backspace), &mut focus);
    assert_eq!(tf.text(), "aéb");
    assert_eq!(tf.cursor(), 2);
}

#[test]
fn caret_blinks_only_while_focused() {
    let (mut tf, mut focus) = focused_field();
    tf.update(0.1);
    let lit = tf.surface().clone();
    tf.update(0.5);
    let dark = tf.surface().clone();
    assert_ne!(lit.data(), dark.data());

    tf.handle_event(&key(Key::Escape), &mut focus);
    tf.update(0.1);
    let a = tf.surface().clone();
    tf.update(0.5);
    let b = tf.surface().clone();
    assert_eq!(a.data(), b.data());
}

#[test]
fn focus_restyles_the_background() {
    let (mut tf, mut focus) = field();
    tf.update(1.0);
    let unfocused = tf.surface().get_pixel(100, 15);
    tf.handle_event(&down(10.0, 10.0), &mut focus);
    tf.update(1.0);
    let focused = tf.surface().get_pixel(100, 15);
    assert_ne!(unfocused, focused);
}
