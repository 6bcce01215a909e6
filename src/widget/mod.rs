//! Stateful interactive widgets sharing one interaction model.
//!
//! Widgets own their pixels (each draws into its own
//! [`Surface`](crate::surface::Surface)) and
//! their interaction state; the host loop feeds them
//! [`InputEvent`](crate::input::InputEvent)s and delta time, then mirrors
//! them onto layers for compositing.

mod button;
mod focus;
mod slider;
mod style;
mod text;
mod textfield;

pub use button::{Button, ClickEvent, WidgetShape};
pub use focus::{FocusManager, WidgetId};
pub use slider::{Slider, SliderTrack};
pub use style::{InteractionState, StateStyle, StyleOverride, StyleSet, StyleTransition};
pub use text::{MonospaceMeasure, TextMeasure, TextMetrics};
pub use textfield::TextField;
