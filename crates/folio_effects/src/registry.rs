//! Bounded, self-expiring effect collection
//!
//! Each surface owns one [`EffectRegistry`]. Instances are kept in insertion
//! order; inserting past capacity evicts the oldest instance (FIFO, never
//! LRU). Every insert schedules an expiration timer whose handle is stored
//! next to the instance, so eviction and [`EffectRegistry::clear`] cancel
//! exactly the timers they orphan.

use crate::instance::{EffectId, EffectInstance};
use folio_core::{TimerId, TimerQueue, Timestamp};
use std::collections::VecDeque;

struct Entry {
    instance: EffectInstance,
    ttl_ms: u64,
    timer: TimerId,
}

pub struct EffectRegistry {
    entries: VecDeque<Entry>,
    timers: TimerQueue<EffectId>,
    max_instances: usize,
}

impl EffectRegistry {
    /// Create a registry holding at most `max_instances` (minimum 1)
    pub fn new(max_instances: usize) -> Self {
        let max_instances = max_instances.max(1);
        Self {
            entries: VecDeque::with_capacity(max_instances),
            timers: TimerQueue::new(),
            max_instances,
        }
    }

    pub fn max_instances(&self) -> usize {
        self.max_instances
    }

    /// Insert `instance`, due for removal at `created_at + ttl_ms`
    ///
    /// Returns the evicted instance when the registry was full.
    pub fn add(&mut self, instance: EffectInstance, ttl_ms: u64) -> Option<EffectInstance> {
        let evicted = if self.entries.len() >= self.max_instances {
            self.entries.pop_front().map(|oldest| {
                self.timers.cancel(oldest.timer);
                tracing::trace!(
                    "evicted {} (capacity {})",
                    oldest.instance.id(),
                    self.max_instances
                );
                oldest.instance
            })
        } else {
            None
        };

        let timer = self
            .timers
            .schedule_once(instance.expires_at(ttl_ms), instance.id());
        self.entries.push_back(Entry {
            instance,
            ttl_ms,
            timer,
        });
        evicted
    }

    /// Remove and return every instance whose `created_at + ttl <= now`
    pub fn expire(&mut self, now: Timestamp) -> Vec<EffectInstance> {
        let fired = self.timers.poll(now);
        if fired.is_empty() {
            return Vec::new();
        }

        let mut removed = Vec::with_capacity(fired.len());
        for timer in fired {
            if let Some(pos) = self.entries.iter().position(|e| e.instance.id() == timer.payload) {
                if let Some(entry) = self.entries.remove(pos) {
                    removed.push(entry.instance);
                }
            }
        }
        tracing::trace!("expired {} effects at {}", removed.len(), now);
        removed
    }

    /// Copy of the live instances in insertion order
    pub fn snapshot(&self) -> Vec<EffectInstance> {
        self.entries.iter().map(|e| e.instance.clone()).collect()
    }

    /// Live instances with their ttl, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&EffectInstance, u64)> {
        self.entries.iter().map(|e| (&e.instance, e.ttl_ms))
    }

    /// Remove every instance and cancel its expiration timer
    pub fn clear(&mut self) {
        let cancelled = self.timers.cancel_all();
        self.entries.clear();
        if cancelled > 0 {
            tracing::debug!("cleared effect registry, cancelled {} timers", cancelled);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of scheduled expirations still outstanding
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn next_expiry(&self) -> Option<Timestamp> {
        self.timers.next_deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::EffectKind;

    fn ripple(at: Timestamp) -> EffectInstance {
        EffectInstance::new(EffectKind::Ripple, 0.0, 0.0, at, 1.0)
    }

    #[test]
    fn test_fifo_eviction_keeps_newest() {
        let mut registry = EffectRegistry::new(2);
        let a = ripple(0);
        let b = ripple(1);
        let c = ripple(2);
        let (a_id, b_id, c_id) = (a.id(), b.id(), c.id());

        assert!(registry.add(a, 1_000).is_none());
        assert!(registry.add(b, 1_000).is_none());
        let evicted = registry.add(c, 1_000).unwrap();

        assert_eq!(evicted.id(), a_id);
        let ids: Vec<_> = registry.snapshot().iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec![b_id, c_id]);
        assert_eq!(registry.pending_timers(), 2);
    }

    #[test]
    fn test_expiry_boundary() {
        let mut registry = EffectRegistry::new(4);
        registry.add(ripple(100), 500);

        assert!(registry.expire(599).is_empty());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.expire(600).len(), 1);
        assert!(registry.is_empty());
        assert!(registry.expire(600).is_empty());
    }

    #[test]
    fn test_expire_only_due_instances() {
        let mut registry = EffectRegistry::new(4);
        registry.add(ripple(0), 100);
        registry.add(ripple(0), 300);
        registry.add(ripple(50), 100);

        assert_eq!(registry.expire(150).len(), 2);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.next_expiry(), Some(300));
    }

    #[test]
    fn test_evicted_timer_never_fires() {
        let mut registry = EffectRegistry::new(1);
        registry.add(ripple(0), 100);
        registry.add(ripple(200), 100);

        assert_eq!(registry.pending_timers(), 1);
        assert!(registry.expire(150).is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_clear_cancels_timers() {
        let mut registry = EffectRegistry::new(3);
        for t in 0..3 {
            registry.add(ripple(t), 1_000);
        }
        registry.clear();

        assert!(registry.is_empty());
        assert_eq!(registry.pending_timers(), 0);
        assert!(registry.expire(10_000).is_empty());
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut registry = EffectRegistry::new(0);
        registry.add(ripple(0), 10);
        registry.add(ripple(0), 10);
        assert_eq!(registry.len(), 1);
    }
}
