//! Folio Core Runtime
//!
//! Foundational primitives shared by the Folio presentation runtime:
//!
//! - **Clocks**: injectable millisecond time sources ([`SystemClock`], [`ManualClock`])
//! - **Timers**: a single-threaded deadline queue with cancellable, generational handles
//! - **State Machines**: flat transition tables for interaction states
//! - **Pointer Events**: the input vocabulary of effect trigger surfaces
//! - **Listeners**: keyed change subscribers
//!
//! Everything here is designed for a cooperative, single-threaded event loop.
//! Mutation goes through `&mut self`, so each operation is atomic with respect
//! to any other callback the host interleaves with it.
//!
//! # Example
//!
//! ```rust
//! use folio_core::{ManualClock, Clock, TimerQueue};
//!
//! let clock = ManualClock::new(0);
//! let mut timers = TimerQueue::new();
//!
//! let expire = timers.schedule_once(clock.now() + 500, "expire");
//! let _tick = timers.schedule_repeating(clock.now() + 100, 100, "tick");
//!
//! clock.advance(100);
//! assert_eq!(timers.poll(clock.now()).len(), 1);
//!
//! assert!(timers.cancel(expire));
//! clock.advance(1_000);
//! let fired = timers.poll(clock.now());
//! assert!(fired.iter().all(|f| f.payload == "tick"));
//! ```

pub mod clock;
pub mod events;
pub mod fsm;
pub mod listeners;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use events::{event_types, PointerEvent, PointerKind};
pub use fsm::{EventId, StateId, StateMachine, StateMachineBuilder, Transition};
pub use listeners::{ListenerId, Listeners};
pub use timer::{Fired, TimerId, TimerQueue};
