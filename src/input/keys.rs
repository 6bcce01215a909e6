//! Key identifiers and modifier flags.

use serde::{Deserialize, Serialize};

/// A physical key identity, independent of any OS scancode table. The
/// frame driver translates its native events into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Key {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    Space, Enter, Escape, Backspace, Delete, Tab,
    Left, Right, Up, Down, Home, End, PageUp, PageDown,
    LShift, RShift, LCtrl, RCtrl, LAlt, RAlt, Super,
}

impl Key {
    /// Whether this key is a modifier (shift/ctrl/alt/super).
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Key::LShift | Key::RShift | Key::LCtrl | Key::RCtrl | Key::LAlt | Key::RAlt | Key::Super
        )
    }
}

/// Modifier flags attached to pointer and key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers {
    /// Either shift key held.
    pub shift: bool,
    /// Either control key held.
    pub ctrl: bool,
    /// Either alt key held.
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false, alt: false };
}
