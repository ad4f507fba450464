use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use log::trace;

pub type Callback<T> = Rc<dyn Fn(&T)>;
pub type SubscriptionId = u64;

/// Synchronous, single-threaded fan-out. Listeners run in subscription order
/// on the emitting call stack.
pub struct Channel<T: std::fmt::Debug> {
    listeners: Rc<RefCell<BTreeMap<SubscriptionId, Callback<T>>>>,
    next_id: Rc<Cell<SubscriptionId>>,
}

impl<T: std::fmt::Debug> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
            next_id: Rc::clone(&self.next_id),
        }
    }
}

/// Sending half handed to whoever produces `T`.
pub struct EventEmitter<T: std::fmt::Debug> {
    channel: Channel<T>,
}

impl<T: std::fmt::Debug> Clone for EventEmitter<T> {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel.clone(),
        }
    }
}

/// Receiving half; cloned freely into every consumer.
pub struct EventObserver<T: std::fmt::Debug> {
    channel: Channel<T>,
}

impl<T: std::fmt::Debug> Clone for EventObserver<T> {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel.clone(),
        }
    }
}

/// Handle returned by `subscribe`. Dropping it keeps the listener alive;
/// call `unsubscribe` to remove it.
pub struct Unsubscriber<T: std::fmt::Debug> {
    channel: Channel<T>,
    id: SubscriptionId,
}

impl<T: std::fmt::Debug> Unsubscriber<T> {
    pub fn unsubscribe(self) -> bool {
        self.channel.remove(self.id)
    }
}

impl<T: std::fmt::Debug> Channel<T> {
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> (EventEmitter<T>, EventObserver<T>) {
        let channel = Channel {
            listeners: Rc::new(RefCell::new(BTreeMap::new())),
            next_id: Rc::new(Cell::new(0)),
        };
        (
            EventEmitter {
                channel: channel.clone(),
            },
            EventObserver { channel },
        )
    }

    fn subscribe<F>(&self, callback: F) -> Unsubscriber<T>
    where
        F: Fn(&T) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().insert(id, Rc::new(callback));
        Unsubscriber {
            channel: self.clone(),
            id,
        }
    }

    fn remove(&self, id: SubscriptionId) -> bool {
        self.listeners.borrow_mut().remove(&id).is_some()
    }

    fn emit(&self, data: &T) {
        // Snapshot so a listener may unsubscribe itself mid-dispatch.
        let listeners: Vec<Callback<T>> = self.listeners.borrow().values().cloned().collect();
        trace!(target: "events", "Emitting event to {} listeners: {:?}", listeners.len(), data);
        for listener in listeners {
            listener(data);
        }
    }

    fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl<T: std::fmt::Debug> EventEmitter<T> {
    pub fn emit(&self, data: T) {
        self.channel.emit(&data);
    }

    pub fn has_listeners(&self) -> bool {
        self.channel.listener_count() > 0
    }
}

impl<T: std::fmt::Debug> EventObserver<T> {
    pub fn subscribe<F>(&self, callback: F) -> Unsubscriber<T>
    where
        F: Fn(&T) + 'static,
    {
        self.channel.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Ping {
        Guess(&'static str),
        GiveUp,
    }

    fn recorder(observer: &EventObserver<Ping>) -> (Rc<RefCell<Vec<Ping>>>, Unsubscriber<Ping>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let handle = observer.subscribe(move |event: &Ping| sink.borrow_mut().push(event.clone()));
        (seen, handle)
    }

    #[test]
    fn test_events_arrive_in_emission_order() {
        let (emitter, observer) = Channel::<Ping>::new();
        let (seen, _handle) = recorder(&observer);

        emitter.emit(Ping::Guess("1234"));
        emitter.emit(Ping::GiveUp);

        assert_eq!(*seen.borrow(), vec![Ping::Guess("1234"), Ping::GiveUp]);
    }

    #[test]
    fn test_every_listener_sees_each_event() {
        let (emitter, observer) = Channel::<Ping>::new();
        let (first, _a) = recorder(&observer);
        let (second, _b) = recorder(&observer.clone());

        emitter.clone().emit(Ping::GiveUp);

        assert_eq!(first.borrow().len(), 1);
        assert_eq!(second.borrow().len(), 1);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let (emitter, observer) = Channel::<Ping>::new();
        let (seen, handle) = recorder(&observer);
        assert!(emitter.has_listeners());

        emitter.emit(Ping::GiveUp);
        assert!(handle.unsubscribe());
        emitter.emit(Ping::GiveUp);

        assert_eq!(seen.borrow().len(), 1);
        assert!(!emitter.has_listeners());
    }

    #[test]
    fn test_listener_can_unsubscribe_while_dispatching() {
        let (emitter, observer) = Channel::<Ping>::new();
        let slot: Rc<RefCell<Option<Unsubscriber<Ping>>>> = Rc::new(RefCell::new(None));
        let count = Rc::new(Cell::new(0));

        let slot_handle = Rc::clone(&slot);
        let counter = Rc::clone(&count);
        let handle = observer.subscribe(move |_| {
            counter.set(counter.get() + 1);
            if let Some(handle) = slot_handle.borrow_mut().take() {
                handle.unsubscribe();
            }
        });
        *slot.borrow_mut() = Some(handle);

        emitter.emit(Ping::GiveUp);
        emitter.emit(Ping::GiveUp);

        assert_eq!(count.get(), 1);
    }
}
