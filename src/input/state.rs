//! Pressed-key bookkeeping and hotkey matching.

use smallvec::SmallVec;

use crate::input::event::InputEvent;
use crate::input::keys::{Key, Modifiers};

/// Rolling set of currently-held keys with press timestamps.
///
/// Time is an internal clock advanced only by [`KeyState::advance`] with
/// the frame driver's delta time; no wall clock is sampled. Auto-repeat
/// presses of an already-held key keep the original timestamp.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    now: f64,
    pressed: SmallVec<[(Key, f64); 8]>,
}

impl KeyState {
    /// An empty key state at clock zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the internal clock by `dt` seconds (negative ignored).
    pub fn advance(&mut self, dt: f32) {
        self.now += f64::from(dt.max(0.0));
    }

    /// The internal clock, seconds since creation.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Record a key press at the current clock.
    pub fn press(&mut self, key: Key) {
        if self.timestamp(key).is_none() {
            self.pressed.push((key, self.now));
        }
    }

    /// Forget a key.
    pub fn release(&mut self, key: Key) {
        self.pressed.retain(|(k, _)| *k != key);
    }

    /// Drop all held keys (for example on window focus loss).
    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    /// Whether a key is currently held.
    pub fn is_pressed(&self, key: Key) -> bool {
        self.timestamp(key).is_some()
    }

    /// The press timestamp of a held key.
    pub fn timestamp(&self, key: Key) -> Option<f64> {
        self.pressed.iter().find(|(k, _)| *k == key).map(|&(_, t)| t)
    }

    /// Match a hotkey combo against the held keys.
    ///
    /// Unordered: every key in `combo` is held, press order irrelevant.
    /// Ordered: every key is held and press timestamps are non-decreasing
    /// along the combo (ties satisfy). Extra held keys never invalidate a
    /// match; an empty combo never matches.
    pub fn check(&self, combo: &[Key], ordered: bool) -> bool {
        if combo.is_empty() {
            return false;
        }
        let mut prev = f64::NEG_INFINITY;
        for &key in combo {
            let Some(t) = self.timestamp(key) else {
                return false;
            };
            if ordered {
                if t < prev {
                    return false;
                }
                prev = t;
            }
        }
        true
    }
}

/// Per-frame input funnel: feeds key events into a [`KeyState`] and
/// tracks the pointer.
///
/// The external loop calls [`InputDispatcher::advance`] once per frame and
/// [`InputDispatcher::process`] per event, then routes events on to the
/// widgets it owns.
#[derive(Debug, Clone, Default)]
pub struct InputDispatcher {
    keys: KeyState,
    pointer_x: f32,
    pointer_y: f32,
    modifiers: Modifiers,
}

impl InputDispatcher {
    /// A dispatcher with no held keys and the pointer at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the hotkey clock by the frame delta.
    pub fn advance(&mut self, dt: f32) {
        self.keys.advance(dt);
    }

    /// Fold one event into the tracked state.
    pub fn process(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key, modifiers } => {
                self.keys.press(key);
                self.modifiers = modifiers;
            }
            InputEvent::KeyUp { key } => self.keys.release(key),
            InputEvent::PointerMoved { x, y }
            | InputEvent::PointerDown { x, y, .. }
            | InputEvent::PointerUp { x, y, .. } => {
                self.pointer_x = x;
                self.pointer_y = y;
            }
            InputEvent::Quit | InputEvent::TextInput { .. } | InputEvent::Scroll { .. } => {}
        }
    }

    /// The tracked key state, for hotkey checks.
    pub fn keys(&self) -> &KeyState {
        &self.keys
    }

    /// Mutable key state (for tests or synthetic input).
    pub fn keys_mut(&mut self) -> &mut KeyState {
        &mut self.keys
    }

    /// Last seen pointer position.
    pub fn pointer(&self) -> (f32, f32) {
        (self.pointer_x, self.pointer_y)
    }

    /// Modifier state from the most recent key event.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/state.rs"]
mod tests;
