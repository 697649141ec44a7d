//! Effect Trigger Controller
//!
//! Turns the pointer stream of one surface into spawn requests. The
//! interaction state lives in a flat [`StateMachine`]:
//!
//! ```text
//! Idle --enter--> Armed --move--> Cooldown --elapsed--> Armed
//!   ^               |                 |
//!   +-----leave-----+-------leave-----+
//! ```
//!
//! In click mode a click passes through Armed and releases straight back to
//! Idle. A move only spawns when strictly more than the throttle window has
//! passed since the last hover-spawned instance, so a burst of moves inside
//! one window yields at most one instance no matter how fast events arrive.

use crate::error::EffectError;
use folio_core::fsm::{EventId, StateId, StateMachine};
use folio_core::{event_types, PointerEvent, PointerKind, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod states {
    use folio_core::fsm::StateId;

    pub const IDLE: StateId = 0;
    pub const ARMED: StateId = 1;
    pub const COOLDOWN: StateId = 2;
    /// Terminal; the surface has been torn down
    pub const STOPPED: StateId = 3;
}

use states::{ARMED, COOLDOWN, IDLE, STOPPED};

/// Ends the instantaneous Armed phase of a click
const RELEASE: EventId = 20;

/// What drives a surface's effects
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerMode {
    #[default]
    Hover,
    Click,
    Auto,
}

impl TriggerMode {
    pub fn id(self) -> &'static str {
        match self {
            TriggerMode::Hover => "hover",
            TriggerMode::Click => "click",
            TriggerMode::Auto => "auto",
        }
    }
}

impl FromStr for TriggerMode {
    type Err = EffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hover" => Ok(TriggerMode::Hover),
            "click" => Ok(TriggerMode::Click),
            "auto" => Ok(TriggerMode::Auto),
            _ => Err(EffectError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for TriggerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Why an instance was created
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriggerSource {
    /// Programmatic trigger from the host
    Explicit,
    Click,
    HoverMove,
    /// Periodic ambient trigger
    Auto,
}

impl TriggerSource {
    /// Deliberate interactions spawn at full magnitude, incidental ones
    /// at a reduced one
    pub fn is_deliberate(self) -> bool {
        matches!(self, TriggerSource::Explicit | TriggerSource::Click)
    }
}

/// A request to create one instance at a position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnRequest {
    pub x: f32,
    pub y: f32,
    pub at: Timestamp,
    pub source: TriggerSource,
}

pub struct TriggerController {
    mode: TriggerMode,
    throttle_ms: u64,
    fsm: StateMachine,
    last_spawn: Option<Timestamp>,
}

impl TriggerController {
    pub fn new(mode: TriggerMode, throttle_ms: u64) -> Self {
        Self {
            mode,
            throttle_ms,
            fsm: Self::build_fsm(mode),
            last_spawn: None,
        }
    }

    fn build_fsm(mode: TriggerMode) -> StateMachine {
        let builder = StateMachine::builder(IDLE);
        let builder = match mode {
            TriggerMode::Hover => builder
                .on(IDLE, event_types::POINTER_ENTER, ARMED)
                .on(ARMED, event_types::POINTER_MOVE, COOLDOWN)
                .on(COOLDOWN, event_types::COOLDOWN_ELAPSED, ARMED)
                .on(ARMED, event_types::POINTER_LEAVE, IDLE)
                .on(COOLDOWN, event_types::POINTER_LEAVE, IDLE),
            TriggerMode::Click => builder
                .on(IDLE, event_types::CLICK, ARMED)
                .on(ARMED, RELEASE, IDLE),
            TriggerMode::Auto => builder,
        };
        builder
            .on(IDLE, event_types::UNMOUNT, STOPPED)
            .on(ARMED, event_types::UNMOUNT, STOPPED)
            .on(COOLDOWN, event_types::UNMOUNT, STOPPED)
            .build()
    }

    pub fn mode(&self) -> TriggerMode {
        self.mode
    }

    pub fn throttle_ms(&self) -> u64 {
        self.throttle_ms
    }

    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn is_stopped(&self) -> bool {
        self.fsm.is_in(STOPPED)
    }

    pub fn last_spawn(&self) -> Option<Timestamp> {
        self.last_spawn
    }

    /// Feed one pointer event; returns a spawn request if it creates an instance
    pub fn handle(&mut self, event: &PointerEvent) -> Option<SpawnRequest> {
        if self.is_stopped() {
            return None;
        }
        match (self.mode, event.kind) {
            (TriggerMode::Hover, PointerKind::Enter) => {
                self.fsm.send(event_types::POINTER_ENTER);
                None
            }
            (TriggerMode::Hover, PointerKind::Leave) => {
                self.fsm.send(event_types::POINTER_LEAVE);
                None
            }
            (TriggerMode::Hover, PointerKind::Move) => self.hover_move(event),
            (TriggerMode::Click, PointerKind::Click) => {
                self.fsm.send(event_types::CLICK);
                self.fsm.send(RELEASE);
                Some(SpawnRequest {
                    x: event.x,
                    y: event.y,
                    at: event.timestamp,
                    source: TriggerSource::Click,
                })
            }
            _ => None,
        }
    }

    fn hover_move(&mut self, event: &PointerEvent) -> Option<SpawnRequest> {
        let now = event.timestamp;

        // A move without a preceding enter still starts a stream
        if self.fsm.is_in(IDLE) {
            self.fsm.send(event_types::POINTER_ENTER);
        }
        if !self.throttle_elapsed(now) {
            tracing::trace!("move at {} throttled (last spawn {:?})", now, self.last_spawn);
            return None;
        }
        if self.fsm.is_in(COOLDOWN) {
            self.fsm.send(event_types::COOLDOWN_ELAPSED);
        }
        self.fsm.send(event_types::POINTER_MOVE)?;

        self.last_spawn = Some(now);
        Some(SpawnRequest {
            x: event.x,
            y: event.y,
            at: now,
            source: TriggerSource::HoverMove,
        })
    }

    /// Leave Cooldown once the throttle window has passed
    pub fn tick(&mut self, now: Timestamp) {
        if self.fsm.is_in(COOLDOWN) && self.throttle_elapsed(now) {
            self.fsm.send(event_types::COOLDOWN_ELAPSED);
        }
    }

    fn throttle_elapsed(&self, now: Timestamp) -> bool {
        self.last_spawn
            .map_or(true, |last| now.saturating_sub(last) > self.throttle_ms)
    }

    /// Stop reacting to input; terminal
    pub fn stop(&mut self) {
        if self.fsm.send(event_types::UNMOUNT).is_some() {
            tracing::debug!("{} trigger stopped", self.mode);
        }
    }

    /// Back to Idle with no throttle history
    pub fn reset(&mut self) {
        self.fsm.reset(IDLE);
        self.last_spawn = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_ids_round_trip() {
        for mode in [TriggerMode::Hover, TriggerMode::Click, TriggerMode::Auto] {
            assert_eq!(mode.id().parse::<TriggerMode>(), Ok(mode));
        }
        assert!("drag".parse::<TriggerMode>().is_err());
    }

    #[test]
    fn test_hover_enter_arms_without_spawning() {
        let mut trigger = TriggerController::new(TriggerMode::Hover, 200);
        assert!(trigger.handle(&PointerEvent::enter(0.0, 0.0, 0)).is_none());
        assert_eq!(trigger.state(), ARMED);
    }

    #[test]
    fn test_first_move_spawns_incidental() {
        let mut trigger = TriggerController::new(TriggerMode::Hover, 200);
        trigger.handle(&PointerEvent::enter(0.0, 0.0, 0));

        let spawn = trigger.handle(&PointerEvent::moved(5.0, 6.0, 10)).unwrap();
        assert_eq!((spawn.x, spawn.y, spawn.at), (5.0, 6.0, 10));
        assert_eq!(spawn.source, TriggerSource::HoverMove);
        assert!(!spawn.source.is_deliberate());
        assert_eq!(trigger.state(), COOLDOWN);
    }

    #[test]
    fn test_throttle_is_strict() {
        let mut trigger = TriggerController::new(TriggerMode::Hover, 200);
        assert!(trigger.handle(&PointerEvent::moved(0.0, 0.0, 1_000)).is_some());
        assert!(trigger.handle(&PointerEvent::moved(0.0, 0.0, 1_100)).is_none());
        assert!(trigger.handle(&PointerEvent::moved(0.0, 0.0, 1_200)).is_none());
        assert!(trigger.handle(&PointerEvent::moved(0.0, 0.0, 1_201)).is_some());
    }

    #[test]
    fn test_out_of_order_timestamps_do_not_spawn() {
        let mut trigger = TriggerController::new(TriggerMode::Hover, 200);
        trigger.handle(&PointerEvent::moved(0.0, 0.0, 1_000));
        assert!(trigger.handle(&PointerEvent::moved(0.0, 0.0, 10)).is_none());
    }

    #[test]
    fn test_tick_leaves_cooldown() {
        let mut trigger = TriggerController::new(TriggerMode::Hover, 200);
        trigger.handle(&PointerEvent::moved(0.0, 0.0, 0));
        trigger.tick(200);
        assert_eq!(trigger.state(), COOLDOWN);
        trigger.tick(201);
        assert_eq!(trigger.state(), ARMED);
    }

    #[test]
    fn test_leave_returns_to_idle() {
        let mut trigger = TriggerController::new(TriggerMode::Hover, 200);
        trigger.handle(&PointerEvent::moved(0.0, 0.0, 0));
        trigger.handle(&PointerEvent::leave(0.0, 0.0, 50));
        assert_eq!(trigger.state(), IDLE);
    }

    #[test]
    fn test_click_mode_is_instantaneous_and_deliberate() {
        let mut trigger = TriggerController::new(TriggerMode::Click, 200);
        assert!(trigger.handle(&PointerEvent::moved(0.0, 0.0, 0)).is_none());

        let first = trigger.handle(&PointerEvent::click(1.0, 2.0, 10)).unwrap();
        let second = trigger.handle(&PointerEvent::click(1.0, 2.0, 11)).unwrap();
        assert!(first.source.is_deliberate());
        assert_eq!(second.at, 11);
        assert_eq!(trigger.state(), IDLE);
    }

    #[test]
    fn test_auto_mode_ignores_pointer() {
        let mut trigger = TriggerController::new(TriggerMode::Auto, 200);
        assert!(trigger.handle(&PointerEvent::moved(0.0, 0.0, 0)).is_none());
        assert!(trigger.handle(&PointerEvent::click(0.0, 0.0, 0)).is_none());
    }

    #[test]
    fn test_stopped_controller_is_inert() {
        let mut trigger = TriggerController::new(TriggerMode::Hover, 200);
        trigger.handle(&PointerEvent::enter(0.0, 0.0, 0));
        trigger.stop();
        assert!(trigger.is_stopped());
        assert!(trigger.handle(&PointerEvent::moved(0.0, 0.0, 1_000)).is_none());

        trigger.reset();
        assert_eq!(trigger.state(), IDLE);
        assert!(trigger.last_spawn().is_none());
    }
}
