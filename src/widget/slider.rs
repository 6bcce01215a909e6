//! A draggable value control with linear, arc and selector tracks.

use serde::{Deserialize, Serialize};

use crate::animation::Spring;
use crate::foundation::core::Rgba8;
use crate::foundation::error::LucentResult;
use crate::input::InputEvent;
use crate::scene::layer::Layer;
use crate::surface::Surface;
use crate::widget::style::InteractionState;

/// Pointer overshoot past the track ends is capped at this many pixels.
const MAX_STRETCH: f32 = 50.0;
/// Rendered stretch is half the pointer overshoot.
const STRETCH_VISUAL: f32 = 0.5;
/// Thickness squash floor while stretched.
const SQUASH_FLOOR: f32 = 0.4;
/// Hover/drag thickness expansion.
const THICKNESS_EXPAND: f32 = 1.5;
/// Stationary hold time that arms fine-control zoom, seconds.
const ZOOM_HOLD: f32 = 0.3;
/// Pointer-to-value sensitivity while zoomed.
const ZOOM_SENSITIVITY: f32 = 0.2;
/// Pointer movement below this many pixels counts as stationary.
const ZOOM_JITTER: f32 = 2.0;
/// Drawing margin so stretch, expansion and the thumb stay unclipped.
const PAD: i32 = 48;

/// Geometry the slider value maps onto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliderTrack {
    /// Horizontal track across the widget width.
    Linear,
    /// Circular arc. Angles are degrees measured clockwise from east
    /// (screen coordinates, y down).
    Arc {
        /// Angle of the value minimum.
        start_deg: f32,
        /// Swept angle to the value maximum; less than a full turn.
        sweep_deg: f32,
    },
    /// Selector tape: `stops` are the values at visually equidistant
    /// track marks, interpolated geometrically between neighbors so
    /// equal track distances cover exponential value ranges. Needs at
    /// least two stops; the first and last define the range.
    Selector {
        /// Ascending stop values.
        stops: Vec<f32>,
    },
}

type ChangeHandler = Box<dyn FnMut(f32)>;

/// A stateful slider widget.
///
/// Dragging maps the pointer back through the same piecewise mapping used
/// for rendering, so `position -> value -> position` round-trips exactly.
/// Holding the pointer still for ~0.3 s while dragging switches to a
/// reduced-sensitivity fine-control mode until release.
pub struct Slider {
    x: f32,
    y: f32,
    width: u32,
    height: u32,
    track: SliderTrack,
    min: f32,
    max: f32,
    t: f32,
    display: Spring,
    thickness: Spring,
    overshoot: Spring,
    overshoot_target: f32,
    hovered: bool,
    dragging: bool,
    zoom: bool,
    hold_time: f32,
    last_px: f32,
    last_py: f32,
    last_pointer_t: f32,
    /// Track background color.
    pub track_color: Rgba8,
    /// Filled-portion color.
    pub fill_color: Rgba8,
    /// Thumb color.
    pub thumb_color: Rgba8,
    on_change: Option<ChangeHandler>,
    /// Opaque application data carried by the widget.
    pub user_data: Option<u64>,
    surface: Surface,
}

impl Slider {
    /// Create a slider.
    ///
    /// For `Linear`/`Selector`, `width` is the track length and `height`
    /// the base thickness. For `Arc`, `width` is the circle diameter and
    /// `height` the base thickness.
    pub fn new(width: u32, height: u32, track: SliderTrack) -> LucentResult<Self> {
        let (min, max) = match &track {
            SliderTrack::Selector { stops } if stops.len() >= 2 => {
                (stops[0], stops[stops.len() - 1])
            }
            _ => (0.0, 1.0),
        };
        let surf_w = width + 2 * PAD as u32;
        let surf_h = match track {
            SliderTrack::Arc { .. } => surf_w,
            _ => height * 2 + 2 * PAD as u32,
        };
        let thickness = height as f32;
        Ok(Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            track,
            min,
            max,
            t: 0.0,
            display: Spring::new(min, 150.0, 25.0, 1.0),
            thickness: Spring::new(thickness, 150.0, 25.0, 1.0),
            overshoot: Spring::new(0.0, 150.0, 25.0, 1.0),
            overshoot_target: 0.0,
            hovered: false,
            dragging: false,
            zoom: false,
            hold_time: 0.0,
            last_px: 0.0,
            last_py: 0.0,
            last_pointer_t: 0.0,
            track_color: Rgba8::opaque(60, 60, 70),
            fill_color: Rgba8::opaque(90, 140, 240),
            thumb_color: Rgba8::WHITE,
            on_change: None,
            user_data: None,
            surface: Surface::new(surf_w, surf_h)?,
        })
    }

    /// Move the track's top-left corner (arc: bounding box corner).
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Replace the value range. Ignored for selector tracks, whose range
    /// comes from their stops.
    pub fn set_range(&mut self, min: f32, max: f32) {
        if matches!(self.track, SliderTrack::Selector { .. }) {
            return;
        }
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.min = min;
        self.max = max.max(min + f32::EPSILON);
        self.t = self.t.clamp(0.0, 1.0);
        self.display.set_value(self.value());
    }

    /// The current value.
    pub fn value(&self) -> f32 {
        self.t_to_value(self.t)
    }

    /// Set the value programmatically (clamped to the range). Does not
    /// invoke the change handler; only user drags do.
    pub fn set_value(&mut self, value: f32) {
        self.t = self.value_to_t(value);
        self.display.set_target(self.value());
    }

    /// The spring-smoothed value used for drawing.
    pub fn display_value(&self) -> f32 {
        self.display.value()
    }

    /// Whether fine-control zoom is currently armed.
    pub fn is_zoomed(&self) -> bool {
        self.zoom
    }

    /// Current interaction state.
    pub fn state(&self) -> InteractionState {
        if self.dragging {
            InteractionState::Pressed
        } else if self.hovered {
            InteractionState::Hover
        } else {
            InteractionState::Normal
        }
    }

    /// Register the change handler, invoked with the new value on every
    /// drag-driven change.
    pub fn set_on_change(&mut self, handler: impl FnMut(f32) + 'static) {
        self.on_change = Some(Box::new(handler));
    }

    /// Normalized track progress for a value, in `[0, 1]`.
    pub fn value_to_t(&self, value: f32) -> f32 {
        let v = value.clamp(self.min.min(self.max), self.max.max(self.min));
        match &self.track {
            SliderTrack::Selector { stops } if stops.len() >= 2 => {
                let n = stops.len() - 1;
                let i = stops[..n].partition_point(|s| *s <= v).saturating_sub(1).min(n - 1);
                let (a, b) = (stops[i], stops[i + 1]);
                let u = segment_invert(a, b, v);
                (i as f32 + u) / n as f32
            }
            _ => {
                if (self.max - self.min).abs() <= f32::EPSILON {
                    0.0
                } else {
                    (v - self.min) / (self.max - self.min)
                }
            }
        }
    }

    /// Inverse of [`Slider::value_to_t`].
    pub fn t_to_value(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match &self.track {
            SliderTrack::Selector { stops } if stops.len() >= 2 => {
                let n = stops.len() - 1;
                let s = t * n as f32;
                let i = (s.floor() as usize).min(n - 1);
                let u = s - i as f32;
                segment_eval(stops[i], stops[i + 1], u)
            }
            _ => self.min + t * (self.max - self.min),
        }
    }

    /// Track-local pixel position of a value (distance along the track,
    /// or along the arc for arc tracks).
    pub fn value_to_position(&self, value: f32) -> f32 {
        self.value_to_t(value) * self.track_len()
    }

    /// Inverse of [`Slider::value_to_position`].
    pub fn position_to_value(&self, position: f32) -> f32 {
        self.t_to_value(position / self.track_len().max(f32::EPSILON))
    }

    fn track_len(&self) -> f32 {
        match self.track {
            SliderTrack::Arc { sweep_deg, .. } => {
                let r = self.width as f32 / 2.0;
                sweep_deg.abs().to_radians() * r
            }
            _ => self.width as f32,
        }
    }

    /// Whether a stack-space point is on the (expanded) hit band.
    pub fn hit_test(&self, px: f32, py: f32) -> bool {
        match self.track {
            SliderTrack::Arc { .. } => {
                let r = self.width as f32 / 2.0;
                let cx = self.x + r;
                let cy = self.y + r;
                let dist = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
                let band = (self.height as f32 * 2.0).max(20.0);
                (dist - r).abs() <= band / 2.0
            }
            _ => {
                let band = (self.height as f32 * 2.0).max(20.0);
                let cy = self.y + self.height as f32 / 2.0;
                px >= self.x
                    && px <= self.x + self.width as f32
                    && py >= cy - band / 2.0
                    && py <= cy + band / 2.0
            }
        }
    }

    /// Fold one input event into the slider.
    pub fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMoved { x, y } => {
                self.hovered = self.hit_test(x, y);
                if self.dragging {
                    if (x - self.last_px).hypot(y - self.last_py) > ZOOM_JITTER {
                        self.hold_time = 0.0;
                    }
                    self.drag_to(x, y);
                }
                self.last_px = x;
                self.last_py = y;
            }
            InputEvent::PointerDown { x, y, .. } => {
                self.hovered = self.hit_test(x, y);
                if self.hovered {
                    self.dragging = true;
                    self.hold_time = 0.0;
                    self.zoom = false;
                    self.last_pointer_t = self.pointer_t(x, y);
                    self.drag_to(x, y);
                }
                self.last_px = x;
                self.last_py = y;
            }
            InputEvent::PointerUp { x, y, .. } => {
                self.dragging = false;
                self.zoom = false;
                self.hold_time = 0.0;
                self.overshoot_target = 0.0;
                self.hovered = self.hit_test(x, y);
            }
            _ => {}
        }
    }

    /// Raw pointer-derived progress, before zoom scaling.
    fn pointer_t(&mut self, px: f32, py: f32) -> f32 {
        match self.track {
            SliderTrack::Arc { start_deg, sweep_deg } => {
                let r = self.width as f32 / 2.0;
                let dx = px - (self.x + r);
                let dy = py - (self.y + r);
                // atan2 with y down measures clockwise from east.
                let angle = dy.atan2(dx).to_degrees();
                let sweep = sweep_deg.clamp(f32::EPSILON, 360.0);
                let mut rel = angle - start_deg;
                while rel < 0.0 {
                    rel += 360.0;
                }
                while rel >= 360.0 {
                    rel -= 360.0;
                }
                if rel > sweep {
                    // Dead zone between the arc ends: snap to the nearer end.
                    let to_start = 360.0 - rel;
                    let to_end = rel - sweep;
                    if to_start < to_end { 0.0 } else { 1.0 }
                } else {
                    (rel / sweep).clamp(0.0, 1.0)
                }
            }
            _ => {
                let local = px - self.x;
                let raw = local / self.width.max(1) as f32;
                self.overshoot_target = if raw < 0.0 {
                    local.clamp(-MAX_STRETCH, 0.0)
                } else if raw > 1.0 {
                    (local - self.width as f32).clamp(0.0, MAX_STRETCH)
                } else {
                    0.0
                };
                raw.clamp(0.0, 1.0)
            }
        }
    }

    fn drag_to(&mut self, px: f32, py: f32) {
        let pointer_t = self.pointer_t(px, py);
        let new_t = if self.zoom {
            (self.t + (pointer_t - self.last_pointer_t) * ZOOM_SENSITIVITY).clamp(0.0, 1.0)
        } else {
            pointer_t
        };
        self.last_pointer_t = pointer_t;
        if new_t != self.t {
            self.t = new_t;
            let value = self.value();
            self.display.set_target(value);
            if let Some(handler) = self.on_change.as_mut() {
                handler(value);
            }
        }
    }

    /// Advance springs, zoom arming and the rendered pixels.
    pub fn update(&mut self, dt: f32) {
        if self.dragging && !self.zoom {
            self.hold_time += dt.max(0.0);
            if self.hold_time >= ZOOM_HOLD {
                self.zoom = true;
                self.last_pointer_t = self.t;
            }
        }
        let base = self.height as f32;
        let expanded = if self.hovered || self.dragging { base * THICKNESS_EXPAND } else { base };
        self.thickness.set_target(expanded);
        self.overshoot.set_target(if self.dragging { self.overshoot_target } else { 0.0 });
        self.display.update(dt);
        self.thickness.update(dt);
        self.overshoot.update(dt);
        self.redraw();
    }

    /// The slider's rendered pixels.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Mirror position and pixels onto `layer`.
    pub fn apply_to_layer(&self, layer: &mut Layer) {
        let (ox, oy) = self.surface_origin();
        layer.set_position(ox.round() as i32, oy.round() as i32);
        let surface = layer.surface_mut();
        surface.clear();
        surface.blit(&self.surface, 0, 0);
    }

    /// Stack-space origin of the padded drawing surface.
    fn surface_origin(&self) -> (f32, f32) {
        match self.track {
            SliderTrack::Arc { .. } => (self.x - PAD as f32, self.y - PAD as f32),
            _ => {
                let cy = self.y + self.height as f32 / 2.0;
                (self.x - PAD as f32, cy - self.surface.height() as f32 / 2.0)
            }
        }
    }

    fn redraw(&mut self) {
        self.surface.clear();
        let t = self.value_to_t(self.display.value());
        match self.track {
            SliderTrack::Arc { start_deg, sweep_deg } => self.draw_arc(t, start_deg, sweep_deg),
            _ => self.draw_linear(t),
        }
    }

    fn draw_linear(&mut self, t: f32) {
        let stretch = self.overshoot.value() * STRETCH_VISUAL;
        let mut dx = PAD as f32;
        let mut dw = self.width as f32;
        if stretch < 0.0 {
            dx += stretch;
            dw -= stretch;
        } else {
            dw += stretch;
        }
        // Conserve area: stretching thins the track, floored at 40%.
        let thick = self.thickness.value();
        let squashed = (thick * self.width as f32 / dw.max(1.0)).clamp(thick * SQUASH_FLOOR, thick);
        let cy = self.surface.height() as f32 / 2.0;

        let top = (cy - squashed / 2.0).round() as i32;
        let th = squashed.round().max(1.0) as i32;
        self.surface.fill_pill(dx.round() as i32, top, dw.round() as i32, th, self.track_color);

        let mut fill_w = t * dw;
        if t >= 0.99 && stretch > 0.0 {
            fill_w = dw;
        }
        if fill_w >= 1.0 {
            self.surface.fill_pill(dx.round() as i32, top, fill_w.round() as i32, th, self.fill_color);
        }

        let thumb_r = (squashed * 0.9).max(3.0) as i32;
        let thumb_x = (dx + fill_w).round() as i32;
        self.surface.fill_circle(thumb_x, cy.round() as i32, thumb_r, self.thumb_color);
    }

    fn draw_arc(&mut self, t: f32, start_deg: f32, sweep_deg: f32) {
        let r = self.width as f32 / 2.0;
        let c = PAD as f32 + r;
        let thick = self.thickness.value();
        let dot = (thick / 2.0).max(1.5);
        let sweep = sweep_deg.clamp(f32::EPSILON, 360.0);

        // Stamp discs along the arc; step small enough to overlap.
        let steps = ((sweep.to_radians() * r) / (dot * 0.5)).ceil().max(2.0) as u32;
        for i in 0..=steps {
            let frac = i as f32 / steps as f32;
            let ang = (start_deg + frac * sweep).to_radians();
            let px = c + ang.cos() * r;
            let py = c + ang.sin() * r;
            let color = if frac <= t { self.fill_color } else { self.track_color };
            self.surface.fill_circle(px.round() as i32, py.round() as i32, dot.round() as i32, color);
        }

        let ang = (start_deg + t * sweep).to_radians();
        let px = c + ang.cos() * r;
        let py = c + ang.sin() * r;
        let thumb_r = (dot * 1.6).max(3.0) as i32;
        self.surface.fill_circle(px.round() as i32, py.round() as i32, thumb_r, self.thumb_color);
    }
}

impl std::fmt::Debug for Slider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slider")
            .field("track", &self.track)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("value", &self.value())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Evaluate one selector segment at fraction `u`, geometric when both
/// ends allow it, linear otherwise.
fn segment_eval(a: f32, b: f32, u: f32) -> f32 {
    if a > 0.0 && b > 0.0 && a != b {
        a * (b / a).powf(u)
    } else {
        a + (b - a) * u
    }
}

/// Inverse of [`segment_eval`].
fn segment_invert(a: f32, b: f32, v: f32) -> f32 {
    if a > 0.0 && b > 0.0 && a != b {
        (v / a).ln() / (b / a).ln()
    } else if (b - a).abs() > f32::EPSILON {
        (v - a) / (b - a)
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widget/slider.rs"]
mod tests;
