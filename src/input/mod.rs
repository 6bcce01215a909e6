//! Input events, pressed-key state and hotkey matching.

mod event;
mod keys;
mod state;

pub use event::{InputEvent, PointerButton};
pub use keys::{Key, Modifiers};
pub use state::{InputDispatcher, KeyState};
