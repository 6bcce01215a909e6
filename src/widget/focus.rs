//! Exclusive keyboard focus, owned by the caller instead of a global.

use serde::{Deserialize, Serialize};

/// Identity of a focusable widget within one [`FocusManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetId(u64);

/// Hands out widget ids and tracks which one holds keyboard focus.
///
/// Focus is exclusive: acquiring it for one id releases any other. The
/// application owns the manager and passes it to the widgets that need
/// it; there is no process-wide state.
#[derive(Debug, Clone, Default)]
pub struct FocusManager {
    next: u64,
    focused: Option<WidgetId>,
}

impl FocusManager {
    /// An empty manager with nothing focused.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh widget id.
    pub fn register(&mut self) -> WidgetId {
        let id = WidgetId(self.next);
        self.next += 1;
        id
    }

    /// Give `id` exclusive focus, releasing any current holder.
    pub fn focus(&mut self, id: WidgetId) {
        self.focused = Some(id);
    }

    /// Release focus if `id` holds it.
    pub fn release(&mut self, id: WidgetId) {
        if self.focused == Some(id) {
            self.focused = None;
        }
    }

    /// Release focus unconditionally.
    pub fn clear(&mut self) {
        self.focused = None;
    }

    /// The current focus holder.
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Whether `id` holds focus.
    pub fn is_focused(&self, id: WidgetId) -> bool {
        self.focused == Some(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widget/focus.rs"]
mod tests;
