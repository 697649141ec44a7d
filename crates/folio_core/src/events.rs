//! Pointer events
//!
//! The input vocabulary delivered by the host to interactive surfaces.
//! Coordinates are surface-local pixels.

use crate::clock::Timestamp;
use crate::fsm::EventId;

/// Event ids used by interaction state machines
pub mod event_types {
    use crate::fsm::EventId;

    pub const POINTER_ENTER: EventId = 1;
    pub const POINTER_LEAVE: EventId = 2;
    pub const POINTER_MOVE: EventId = 3;
    pub const CLICK: EventId = 4;
    /// Synthetic event sent when a cooldown window has elapsed
    pub const COOLDOWN_ELAPSED: EventId = 10;
    /// Synthetic event sent when a surface is torn down
    pub const UNMOUNT: EventId = 11;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Enter,
    Leave,
    Move,
    Click,
}

impl PointerKind {
    /// State machine event for this pointer kind
    pub fn event_id(self) -> EventId {
        match self {
            PointerKind::Enter => event_types::POINTER_ENTER,
            PointerKind::Leave => event_types::POINTER_LEAVE,
            PointerKind::Move => event_types::POINTER_MOVE,
            PointerKind::Click => event_types::CLICK,
        }
    }
}

/// A pointer event with its position and arrival time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f32,
    pub y: f32,
    pub timestamp: Timestamp,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f32, y: f32, timestamp: Timestamp) -> Self {
        Self {
            kind,
            x,
            y,
            timestamp,
        }
    }

    pub fn enter(x: f32, y: f32, timestamp: Timestamp) -> Self {
        Self::new(PointerKind::Enter, x, y, timestamp)
    }

    pub fn leave(x: f32, y: f32, timestamp: Timestamp) -> Self {
        Self::new(PointerKind::Leave, x, y, timestamp)
    }

    pub fn moved(x: f32, y: f32, timestamp: Timestamp) -> Self {
        Self::new(PointerKind::Move, x, y, timestamp)
    }

    pub fn click(x: f32, y: f32, timestamp: Timestamp) -> Self {
        Self::new(PointerKind::Click, x, y, timestamp)
    }

    pub fn event_id(&self) -> EventId {
        self.kind.event_id()
    }
}
