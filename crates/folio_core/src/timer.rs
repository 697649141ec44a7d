//! Cancellable timer queue
//!
//! A deadline queue polled by the host event loop. Every scheduled timer is
//! identified by a generational [`TimerId`]: once a timer fires (one-shot) or
//! is cancelled, its id is dead and can never cancel a timer scheduled later
//! in the same slot.
//!
//! Cancelled timers are removed from the slot map immediately and dropped
//! lazily from the heap, which is compacted when stale entries pile up.

use crate::clock::Timestamp;
use slotmap::{new_key_type, SlotMap};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

new_key_type! {
    /// Handle to a scheduled timer
    pub struct TimerId;
}

struct TimerEntry<T> {
    deadline: Timestamp,
    /// Repeat period in milliseconds (`None` for one-shot timers)
    period: Option<u64>,
    /// Sequence number of the live heap entry for this timer
    seq: u64,
    payload: T,
}

/// A timer that came due during [`TimerQueue::poll`]
#[derive(Clone, Debug, PartialEq)]
pub struct Fired<T> {
    pub id: TimerId,
    /// The deadline the timer was scheduled for (may be earlier than `now`)
    pub deadline: Timestamp,
    pub payload: T,
}

/// Single-threaded deadline queue
pub struct TimerQueue<T> {
    timers: SlotMap<TimerId, TimerEntry<T>>,
    heap: BinaryHeap<Reverse<(Timestamp, u64, TimerId)>>,
    seq: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Schedule a timer that fires once at `deadline`
    pub fn schedule_once(&mut self, deadline: Timestamp, payload: T) -> TimerId {
        self.insert(deadline, None, payload)
    }

    /// Schedule a timer that first fires at `first` and then every `period_ms`
    ///
    /// A zero period is treated as one millisecond.
    pub fn schedule_repeating(&mut self, first: Timestamp, period_ms: u64, payload: T) -> TimerId {
        self.insert(first, Some(period_ms.max(1)), payload)
    }

    fn insert(&mut self, deadline: Timestamp, period: Option<u64>, payload: T) -> TimerId {
        self.seq += 1;
        let seq = self.seq;
        let id = self.timers.insert(TimerEntry {
            deadline,
            period,
            seq,
            payload,
        });
        self.heap.push(Reverse((deadline, seq, id)));
        id
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let removed = self.timers.remove(id).is_some();
        if removed {
            self.maybe_compact();
        }
        removed
    }

    /// Cancel every outstanding timer, returning how many were live
    pub fn cancel_all(&mut self) -> usize {
        let count = self.timers.len();
        self.timers.clear();
        self.heap.clear();
        count
    }

    /// Whether `id` still refers to a scheduled timer
    pub fn contains(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Number of live timers
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Earliest deadline among live timers
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.timers.values().map(|entry| entry.deadline).min()
    }

    /// Deadline of a specific timer
    pub fn deadline(&self, id: TimerId) -> Option<Timestamp> {
        self.timers.get(id).map(|entry| entry.deadline)
    }

    fn maybe_compact(&mut self) {
        if self.heap.len() <= self.timers.len() * 2 + 32 {
            return;
        }
        let timers = &self.timers;
        let live: Vec<_> = self
            .heap
            .drain()
            .filter(|Reverse((_, seq, id))| timers.get(*id).is_some_and(|e| e.seq == *seq))
            .collect();
        self.heap = live.into_iter().collect();
    }
}

impl<T: Clone> TimerQueue<T> {
    /// Fire every timer whose deadline is `<= now`, in deadline order
    ///
    /// One-shot timers are removed. Repeating timers fire at most once per
    /// poll; missed periods are skipped and the next deadline lands strictly
    /// after `now`.
    pub fn poll(&mut self, now: Timestamp) -> Vec<Fired<T>> {
        let mut fired = Vec::new();

        while let Some(&Reverse((deadline, seq, id))) = self.heap.peek() {
            if deadline > now {
                break;
            }
            self.heap.pop();

            let period = match self.timers.get(id) {
                Some(entry) if entry.seq == seq => entry.period,
                // Cancelled or rescheduled; stale heap entry
                _ => continue,
            };

            match period {
                Some(period) => {
                    let missed = (now - deadline) / period;
                    let next = deadline + period * (missed + 1);
                    self.seq += 1;
                    let next_seq = self.seq;
                    if let Some(entry) = self.timers.get_mut(id) {
                        entry.deadline = next;
                        entry.seq = next_seq;
                        fired.push(Fired {
                            id,
                            deadline,
                            payload: entry.payload.clone(),
                        });
                    }
                    self.heap.push(Reverse((next, next_seq, id)));
                }
                None => {
                    if let Some(entry) = self.timers.remove(id) {
                        fired.push(Fired {
                            id,
                            deadline,
                            payload: entry.payload,
                        });
                    }
                }
            }
        }

        if !fired.is_empty() {
            tracing::trace!("TimerQueue::poll({}) fired {} timers", now, fired.len());
        }
        fired
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
