//! Change listeners
//!
//! Keyed subscriber list. Subscribers are notified in insertion order.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle returned by [`Listeners::add`]
    pub struct ListenerId;
}

type Listener<T> = Box<dyn FnMut(&T)>;

pub struct Listeners<T> {
    slots: SlotMap<ListenerId, Listener<T>>,
    order: Vec<ListenerId>,
}

impl<T> Listeners<T> {
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    pub fn add(&mut self, listener: impl FnMut(&T) + 'static) -> ListenerId {
        let id = self.slots.insert(Box::new(listener));
        self.order.push(id);
        id
    }

    /// Remove a listener. Returns false if it was already removed.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        if self.slots.remove(id).is_some() {
            self.order.retain(|other| *other != id);
            true
        } else {
            false
        }
    }

    pub fn notify(&mut self, value: &T) {
        for id in &self.order {
            if let Some(listener) = self.slots.get_mut(*id) {
                listener(value);
            }
        }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_notify_in_insertion_order_and_remove() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();

        let a = seen.clone();
        let first = listeners.add(move |v: &i32| a.borrow_mut().push(("first", *v)));
        let b = seen.clone();
        listeners.add(move |v: &i32| b.borrow_mut().push(("second", *v)));

        listeners.notify(&1);
        assert!(listeners.remove(first));
        assert!(!listeners.remove(first));
        listeners.notify(&2);

        assert_eq!(
            *seen.borrow(),
            vec![("first", 1), ("second", 1), ("second", 2)]
        );
        assert_eq!(listeners.len(), 1);
    }
}
