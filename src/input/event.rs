//! Discrete input events supplied by the frame driver.

use serde::{Deserialize, Serialize};

use crate::input::keys::{Key, Modifiers};

/// Pointer button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Middle button / wheel press.
    Middle,
}

/// One discrete event from the external event loop.
///
/// Coordinates are in stack/output pixels; the frame driver does any
/// window-to-surface mapping before handing events in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    /// The host asked to quit; carried through for the caller's loop.
    Quit,
    /// A key went down.
    KeyDown {
        /// The pressed key.
        key: Key,
        /// Modifier state at press time.
        modifiers: Modifiers,
    },
    /// A key went up.
    KeyUp {
        /// The released key.
        key: Key,
    },
    /// Translated text input (already layout- and IME-resolved).
    TextInput {
        /// The produced character.
        ch: char,
    },
    /// The pointer moved.
    PointerMoved {
        /// X in output pixels.
        x: f32,
        /// Y in output pixels.
        y: f32,
    },
    /// A pointer button went down at the pointer's current position.
    PointerDown {
        /// X in output pixels.
        x: f32,
        /// Y in output pixels.
        y: f32,
        /// Which button.
        button: PointerButton,
    },
    /// A pointer button went up.
    PointerUp {
        /// X in output pixels.
        x: f32,
        /// Y in output pixels.
        y: f32,
        /// Which button.
        button: PointerButton,
    },
    /// Scroll wheel / trackpad delta.
    Scroll {
        /// Horizontal delta.
        dx: f32,
        /// Vertical delta, positive away from the user.
        dy: f32,
    },
}
