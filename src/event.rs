use std::cell::RefCell;

use crate::color::Rgba;
use crate::geometry::DirtyRect;
use crate::tools::ToolKind;

/// Notifications the engine broadcasts to its UI collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A region of the buffer changed; redraw at least this rectangle.
    DirtyRegion(DirtyRect),
    /// The active tool changed.
    ToolChanged(ToolKind),
    /// The foreground color changed (slider, swatch, or eyedropper).
    ForegroundChanged(Rgba),
    /// The eyedropper sampled this color from the canvas.
    ColorPicked(Rgba),
    /// A stroke transaction was committed.
    StrokeCompleted,
    /// Undo/redo availability may have changed.
    HistoryChanged,
}

pub trait EventHandler {
    fn handle_event(&mut self, event: &EngineEvent);
}

/// Broadcasts engine events to registered handlers.
///
/// The engine is single-threaded by contract, so a `RefCell` guards the
/// handler list; emitting from inside a handler would panic on the re-borrow,
/// which surfaces the misuse immediately instead of silently reordering
/// notifications.
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.borrow().len())
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive every subsequent event.
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    /// Emit an event to all registered handlers, in subscription order.
    pub fn emit(&self, event: EngineEvent) {
        for handler in self.handlers.borrow_mut().iter_mut() {
            handler.handle_event(&event);
        }
    }
}
