//! Single-line text editing with selection, caret blink and focus.

use crate::animation::Ease;
use crate::foundation::core::Rgba8;
use crate::foundation::error::LucentResult;
use crate::input::{InputEvent, Key, Modifiers};
use crate::scene::layer::Layer;
use crate::surface::Surface;
use crate::widget::focus::{FocusManager, WidgetId};
use crate::widget::style::{InteractionState, StateStyle, StyleSet, StyleTransition};
use crate::widget::text::{MonospaceMeasure, TextMeasure};

/// Caret blink half-period, seconds.
const BLINK_INTERVAL: f32 = 0.5;
/// Inner horizontal padding between the border and the text run.
const PADDING: f32 = 8.0;

type TextHandler = Box<dyn FnMut(&str)>;

/// A focusable single-line text input.
///
/// The field edits its string, tracks the caret and selection on char
/// boundaries, and renders its background, selection band and caret.
/// Glyph rasterization stays with the host's text stack; the field only
/// consumes a [`TextMeasure`] to place the caret and selection.
pub struct TextField {
    id: WidgetId,
    x: f32,
    y: f32,
    width: u32,
    height: u32,
    text: String,
    /// Caret position in chars.
    cursor: usize,
    /// Selection anchor in chars; `None` means no selection.
    anchor: Option<usize>,
    max_chars: Option<usize>,
    font_size: f32,
    styles: StyleSet,
    transition: StyleTransition,
    hovered: bool,
    focused: bool,
    blink: f32,
    measure: Box<dyn TextMeasure>,
    /// Selection band color.
    pub selection_color: Rgba8,
    /// Caret color.
    pub caret_color: Rgba8,
    on_change: Option<TextHandler>,
    on_submit: Option<TextHandler>,
    /// Opaque application data carried by the widget.
    pub user_data: Option<u64>,
    surface: Surface,
}

impl TextField {
    /// Create a field and register it with `focus`.
    pub fn new(width: u32, height: u32, focus: &mut FocusManager) -> LucentResult<Self> {
        let mut styles = StyleSet::default();
        styles.normal.color = Rgba8::opaque(40, 40, 48);
        styles.focused.color = Some(Rgba8::opaque(52, 52, 64));
        Ok(Self {
            id: focus.register(),
            x: 0.0,
            y: 0.0,
            width,
            height,
            text: String::new(),
            cursor: 0,
            anchor: None,
            max_chars: None,
            font_size: 16.0,
            styles,
            transition: StyleTransition::new(styles.normal, 0.1, Ease::OutQuad),
            hovered: false,
            focused: false,
            blink: 0.0,
            measure: Box::new(MonospaceMeasure::default()),
            selection_color: Rgba8::new(90, 140, 240, 110),
            caret_color: Rgba8::WHITE,
            on_change: None,
            on_submit: None,
            user_data: None,
            surface: Surface::new(width, height)?,
        })
    }

    /// The field's focus identity.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Move the top-left corner in stack coordinates.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// The current contents.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the contents, clamping the caret. Does not invoke the
    /// change handler.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        if let Some(limit) = self.max_chars
            && self.text.chars().count() > limit
        {
            let end = byte_of(&self.text, limit);
            self.text.truncate(end);
        }
        self.cursor = self.cursor.min(self.char_len());
        self.anchor = None;
    }

    /// Cap the contents at `limit` chars; existing text is truncated.
    pub fn set_max_chars(&mut self, limit: Option<usize>) {
        self.max_chars = limit;
        if let Some(limit) = limit
            && self.char_len() > limit
        {
            let end = byte_of(&self.text, limit);
            self.text.truncate(end);
            self.cursor = self.cursor.min(limit);
            self.anchor = None;
        }
    }

    /// Font size used for measurement, pixels.
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size.max(1.0);
    }

    /// Replace the measurement oracle.
    pub fn set_measure(&mut self, measure: impl TextMeasure + 'static) {
        self.measure = Box::new(measure);
    }

    /// The style table.
    pub fn styles(&self) -> &StyleSet {
        &self.styles
    }

    /// Replace the style table.
    pub fn set_styles(&mut self, styles: StyleSet) {
        self.styles = styles;
        self.transition.retarget(styles.resolve(self.state()));
    }

    /// Register the change handler, invoked after every edit.
    pub fn set_on_change(&mut self, handler: impl FnMut(&str) + 'static) {
        self.on_change = Some(Box::new(handler));
    }

    /// Register the submit handler, invoked on Enter.
    pub fn set_on_submit(&mut self, handler: impl FnMut(&str) + 'static) {
        self.on_submit = Some(Box::new(handler));
    }

    /// Caret position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Selected char range, ordered, if a selection exists.
    pub fn selection(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        if anchor == self.cursor {
            return None;
        }
        Some((anchor.min(self.cursor), anchor.max(self.cursor)))
    }

    /// Whether this field holds keyboard focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Current interaction state.
    pub fn state(&self) -> InteractionState {
        if self.focused {
            InteractionState::Focused
        } else if self.hovered {
            InteractionState::Hover
        } else {
            InteractionState::Normal
        }
    }

    /// Whether a stack-space point is inside the bounds.
    pub fn hit_test(&self, px: f32, py: f32) -> bool {
        px >= self.x
            && py >= self.y
            && px < self.x + self.width as f32
            && py < self.y + self.height as f32
    }

    /// Fold one input event into the field.
    ///
    /// Pointer events manage focus through `focus`; keyboard and text
    /// events are consumed only while focused. Returns whether the event
    /// was consumed.
    pub fn handle_event(&mut self, event: &InputEvent, focus: &mut FocusManager) -> bool {
        let before = self.state();
        let consumed = match *event {
            InputEvent::PointerMoved { x, y } => {
                self.hovered = self.hit_test(x, y);
                false
            }
            InputEvent::PointerDown { x, y, .. } => {
                self.hovered = self.hit_test(x, y);
                if self.hovered {
                    focus.focus(self.id);
                    self.focused = true;
                    self.cursor = self.caret_from_x(x - self.x);
                    self.anchor = None;
                    self.blink = 0.0;
                    true
                } else {
                    focus.release(self.id);
                    self.focused = false;
                    false
                }
            }
            InputEvent::TextInput { ch } if self.focused => {
                self.insert_char(ch);
                true
            }
            InputEvent::KeyDown { key, modifiers } if self.focused => {
                self.handle_key(key, modifiers, focus)
            }
            _ => false,
        };
        self.focused = focus.is_focused(self.id);
        let after = self.state();
        if after != before {
            self.transition.retarget(self.styles.resolve(after));
        }
        consumed
    }

    fn handle_key(&mut self, key: Key, modifiers: Modifiers, focus: &mut FocusManager) -> bool {
        self.blink = 0.0;
        match key {
            Key::Backspace => {
                if self.delete_selection() {
                } else if modifiers.ctrl {
                    self.delete_word_back();
                } else if self.cursor > 0 {
                    self.remove_chars(self.cursor - 1, self.cursor);
                    self.cursor -= 1;
                } else {
                    return true;
                }
                self.notify_change();
                true
            }
            Key::Delete => {
                if self.delete_selection() {
                    self.notify_change();
                } else if self.cursor < self.char_len() {
                    self.remove_chars(self.cursor, self.cursor + 1);
                    self.notify_change();
                }
                true
            }
            Key::Left => {
                self.move_cursor(self.cursor.saturating_sub(1), modifiers.shift);
                true
            }
            Key::Right => {
                self.move_cursor((self.cursor + 1).min(self.char_len()), modifiers.shift);
                true
            }
            Key::Home => {
                self.move_cursor(0, modifiers.shift);
                true
            }
            Key::End => {
                self.move_cursor(self.char_len(), modifiers.shift);
                true
            }
            Key::A if modifiers.ctrl => {
                self.anchor = Some(0);
                self.cursor = self.char_len();
                true
            }
            Key::Enter => {
                if let Some(handler) = self.on_submit.as_mut() {
                    handler(&self.text);
                }
                true
            }
            Key::Escape => {
                focus.release(self.id);
                self.focused = false;
                self.anchor = None;
                true
            }
            _ => false,
        }
    }

    /// Advance the caret blink and style, and redraw.
    pub fn update(&mut self, dt: f32) {
        if self.focused {
            self.blink = (self.blink + dt.max(0.0)) % (2.0 * BLINK_INTERVAL);
        }
        let style = self.transition.update(dt);
        self.redraw(style);
    }

    /// The field's rendered pixels.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Mirror position, pixels and style onto `layer`.
    pub fn apply_to_layer(&self, layer: &mut Layer) {
        let style = self.transition.current();
        layer.set_position(self.x.round() as i32, self.y.round() as i32);
        layer.set_opacity(style.opacity);
        layer.set_scale(style.scale);
        let surface = layer.surface_mut();
        surface.clear();
        surface.blit(&self.surface, 0, 0);
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn move_cursor(&mut self, to: usize, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.cursor);
            }
        } else {
            self.anchor = None;
        }
        self.cursor = to;
        self.blink = 0.0;
    }

    /// Removes the selection from the text. Returns whether one existed.
    fn delete_selection(&mut self) -> bool {
        let Some((a, b)) = self.selection() else {
            self.anchor = None;
            return false;
        };
        self.remove_chars(a, b);
        self.cursor = a;
        self.anchor = None;
        true
    }

    fn delete_word_back(&mut self) {
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor;
        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        if pos < self.cursor {
            self.remove_chars(pos, self.cursor);
            self.cursor = pos;
        }
    }

    fn remove_chars(&mut self, from: usize, to: usize) {
        let start = byte_of(&self.text, from);
        let end = byte_of(&self.text, to);
        self.text.replace_range(start..end, "");
    }

    fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        self.delete_selection();
        if let Some(limit) = self.max_chars
            && self.char_len() >= limit
        {
            return;
        }
        let at = byte_of(&self.text, self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
        self.blink = 0.0;
        self.notify_change();
    }

    fn notify_change(&mut self) {
        if let Some(handler) = self.on_change.as_mut() {
            handler(&self.text);
        }
    }

    /// Measured x of the caret before char `index`, field-local.
    fn caret_x(&self, index: usize) -> f32 {
        let end = byte_of(&self.text, index);
        PADDING + self.measure.measure(&self.text[..end], self.font_size).width
    }

    /// Nearest char boundary to a field-local x.
    fn caret_from_x(&self, local_x: f32) -> usize {
        let len = self.char_len();
        let mut best = 0;
        let mut best_dist = f32::MAX;
        for i in 0..=len {
            let dist = (self.caret_x(i) - local_x).abs();
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }
        best
    }

    fn redraw(&mut self, style: StateStyle) {
        let w = self.width as i32;
        let h = self.height as i32;
        self.surface.clear();
        self.surface.fill_round_rect(0, 0, w, h, 4, style.color);

        let line_height = self.measure.measure("", self.font_size).line_height.max(self.font_size);
        let band_top = ((self.height as f32 - line_height) / 2.0).max(0.0) as i32;
        let band_h = (line_height as i32).min(h);

        if let Some((a, b)) = self.selection() {
            let x0 = self.caret_x(a);
            let x1 = self.caret_x(b);
            self.surface.fill_rect(
                x0.round() as i32,
                band_top,
                (x1 - x0).round().max(1.0) as i32,
                band_h,
                self.selection_color,
            );
        }

        let caret_visible = self.focused && self.blink < BLINK_INTERVAL;
        if caret_visible && self.selection().is_none() {
            let cx = self.caret_x(self.cursor).round() as i32;
            self.surface.fill_rect(cx, band_top, 2, band_h, self.caret_color);
        }
    }
}

impl std::fmt::Debug for TextField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextField")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("cursor", &self.cursor)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Byte offset of char index `index` in `text`.
fn byte_of(text: &str, index: usize) -> usize {
    text.char_indices().nth(index).map_or(text.len(), |(b, _)| b)
}

#[cfg(test)]
#[path = "../../tests/unit/widget/textfield.rs"]
mod tests;
