use crate::api::types::StarId;

/// Input events the scene understands.
///
/// Pointer events carry local-bubble canvas coordinates (y down) and are
/// resolved into drag subjects by the scene's drag tracker. The `Drag*`
/// events are for hosts that do their own hit testing: they carry the
/// subject and the proposed offset relative to the subject's group origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A press began at canvas coordinates (x, y).
    PointerDown { x: f64, y: f64 },
    /// The pointer moved to canvas coordinates (x, y).
    PointerMove { x: f64, y: f64 },
    /// A press ended at canvas coordinates (x, y).
    PointerUp { x: f64, y: f64 },
    /// Earth dragged to an offset from the orbit centre.
    DragEarth { x: f64, y: f64 },
    /// Background star dragged to a vertical offset.
    DragBackgroundStar { id: StarId, y: f64 },
    /// Foreground star dragged to an offset in its group.
    DragForegroundStar { id: StarId, x: f64, y: f64 },
    /// The "animate" control was pressed.
    TriggerAnimation,
    /// Stop the running sweep, if any.
    CancelAnimation,
}

/// A queue of input events.
/// The host pushes events as they arrive; the scene drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
