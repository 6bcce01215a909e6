//! A clickable shape with per-state styles and smooth transitions.

use serde::{Deserialize, Serialize};

use crate::animation::Ease;
use crate::foundation::error::LucentResult;
use crate::input::{InputEvent, PointerButton};
use crate::scene::layer::Layer;
use crate::scene::material::Material;
use crate::surface::Surface;
use crate::widget::style::{InteractionState, StateStyle, StyleSet, StyleTransition};

/// Fill geometry of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetShape {
    /// Sharp-cornered box.
    Rectangle,
    /// Box with the given corner radius in pixels.
    RoundedRect {
        /// Corner radius; clamped to half the short edge when drawn.
        radius: i32,
    },
    /// Largest circle fitting the bounds.
    Circle,
    /// Capsule.
    Pill,
    /// Superellipse.
    Squircle,
}

/// Payload delivered to a click handler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    /// Pointer x at release, in stack coordinates.
    pub x: f32,
    /// Pointer y at release, in stack coordinates.
    pub y: f32,
    /// The button that completed the click.
    pub button: PointerButton,
}

type ClickHandler = Box<dyn FnMut(ClickEvent)>;

/// A stateful button.
///
/// Feed it events with [`Button::handle_event`] and time with
/// [`Button::update`]; mirror it onto a layer with
/// [`Button::apply_to_layer`]. A click fires exactly once per
/// press-then-release-inside cycle; releasing outside fires nothing.
pub struct Button {
    x: f32,
    y: f32,
    width: u32,
    height: u32,
    shape: WidgetShape,
    styles: StyleSet,
    transition: StyleTransition,
    hovered: bool,
    pressed: bool,
    on_click: Option<ClickHandler>,
    /// Opaque application data carried by the widget.
    pub user_data: Option<u64>,
    surface: Surface,
    drawn_style: Option<StateStyle>,
}

impl Button {
    /// Default transition duration in seconds.
    pub const DEFAULT_TRANSITION: f32 = 0.1;

    /// Create a button of the given pixel size.
    pub fn new(width: u32, height: u32, shape: WidgetShape) -> LucentResult<Self> {
        let styles = StyleSet::default();
        Ok(Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            shape,
            styles,
            transition: StyleTransition::new(styles.normal, Self::DEFAULT_TRANSITION, Ease::OutQuad),
            hovered: false,
            pressed: false,
            on_click: None,
            user_data: None,
            surface: Surface::new(width, height)?,
            drawn_style: None,
        })
    }

    /// Move the button's top-left corner in stack coordinates.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Top-left corner.
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Pixel size.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The style table.
    pub fn styles(&self) -> &StyleSet {
        &self.styles
    }

    /// Replace the style table. If the button is at rest in its normal
    /// state the new normal style applies immediately, without easing.
    pub fn set_styles(&mut self, styles: StyleSet) {
        self.styles = styles;
        if self.state() == InteractionState::Normal && self.transition.is_settled() {
            self.transition.snap(styles.normal);
        } else {
            self.transition.retarget(styles.resolve(self.state()));
        }
    }

    /// Configure the transition used between states.
    pub fn set_transition(&mut self, duration: f32, ease: Ease) {
        self.transition.configure(duration.max(0.0), ease);
    }

    /// Register the click handler, replacing any previous one.
    pub fn set_on_click(&mut self, handler: impl FnMut(ClickEvent) + 'static) {
        self.on_click = Some(Box::new(handler));
    }

    /// Current interaction state.
    pub fn state(&self) -> InteractionState {
        if self.pressed {
            InteractionState::Pressed
        } else if self.hovered {
            InteractionState::Hover
        } else {
            InteractionState::Normal
        }
    }

    /// The style currently on screen (mid-interpolation values included).
    pub fn current_style(&self) -> StateStyle {
        self.transition.current()
    }

    /// Whether a stack-space point is inside the button's bounds.
    pub fn hit_test(&self, px: f32, py: f32) -> bool {
        px >= self.x && py >= self.y && px < self.x + self.width as f32 && py < self.y + self.height as f32
    }

    /// Fold one input event into the interaction state machine.
    ///
    /// Returns the click payload when this event completed a click, in
    /// addition to invoking the registered handler.
    pub fn handle_event(&mut self, event: &InputEvent) -> Option<ClickEvent> {
        let before = self.state();
        let mut click = None;
        match *event {
            InputEvent::PointerMoved { x, y } => {
                self.hovered = self.hit_test(x, y);
            }
            InputEvent::PointerDown { x, y, .. } => {
                self.hovered = self.hit_test(x, y);
                if self.hovered {
                    self.pressed = true;
                }
            }
            InputEvent::PointerUp { x, y, button } => {
                let inside = self.hit_test(x, y);
                if self.pressed && inside {
                    let ev = ClickEvent { x, y, button };
                    if let Some(handler) = self.on_click.as_mut() {
                        handler(ev);
                    }
                    click = Some(ev);
                }
                self.pressed = false;
                self.hovered = inside;
            }
            _ => {}
        }
        let after = self.state();
        if after != before {
            self.transition.retarget(self.styles.resolve(after));
        }
        click
    }

    /// Advance the style interpolation and redraw if it moved.
    pub fn update(&mut self, dt: f32) {
        let style = self.transition.update(dt);
        if self.drawn_style != Some(style) {
            self.redraw(style);
        }
    }

    /// The button's rendered pixels.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Mirror position, pixels and style-driven layer state onto `layer`.
    pub fn apply_to_layer(&self, layer: &mut Layer) {
        let style = self.current_style();
        layer.set_position(self.x.round() as i32, self.y.round() as i32);
        layer.set_opacity(style.opacity);
        layer.set_scale(style.scale);
        layer.material = if style.blur_radius > 0.0 {
            Material::frosted_glass(style.blur_radius)
        } else {
            Material::solid()
        };
        let surface = layer.surface_mut();
        surface.clear();
        surface.blit(&self.surface, 0, 0);
    }

    fn redraw(&mut self, style: StateStyle) {
        let w = self.width as i32;
        let h = self.height as i32;
        self.surface.clear();
        match self.shape {
            WidgetShape::Rectangle => self.surface.fill_rect(0, 0, w, h, style.color),
            WidgetShape::RoundedRect { radius } => {
                self.surface.fill_round_rect(0, 0, w, h, radius, style.color)
            }
            WidgetShape::Circle => {
                let r = w.min(h) / 2;
                self.surface.fill_circle(w / 2, h / 2, r, style.color);
            }
            WidgetShape::Pill => self.surface.fill_pill(0, 0, w, h, style.color),
            WidgetShape::Squircle => self.surface.fill_squircle(0, 0, w, h, style.color),
        }
        self.drawn_style = Some(style);
    }
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("shape", &self.shape)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widget/button.rs"]
mod tests;
