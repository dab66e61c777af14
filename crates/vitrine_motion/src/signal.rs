//! # Signals
//!
//! Explicit observer registration for every value the primitives publish
//! and for every input the host feeds them.
//!
//! ```text
//!  host event ──emit──> Signal<T> ──callback──> primitive ──emit──> Signal<U> ──> renderer
//!                          │                                           │
//!                     Subscription                                Subscription
//!                  (owned by primitive)                       (owned by renderer)
//! ```
//!
//! Nothing registers itself globally. Whoever holds a [`Subscription`] owns
//! the registration, and dropping the handle releases it.
//!
//! Each callback runs on one thread at a time. An emit from another thread
//! waits for a running callback to return; a nested emit on the same thread
//! skips the callback that is already running.

use std::cell::RefCell;
use std::fmt;
use std::sync::{Arc, Weak};

use crossbeam_channel::{bounded, Receiver, TrySendError};
use parking_lot::{Mutex, ReentrantMutex};

type Callback<T> = Box<dyn FnMut(&T) + Send>;
type SharedCallback<T> = Arc<ReentrantMutex<RefCell<Callback<T>>>>;

struct Listener<T> {
    id: u64,
    callback: SharedCallback<T>,
}

struct Registry<T> {
    next_id: u64,
    listeners: Vec<Listener<T>>,
}

impl<T> Registry<T> {
    fn contains(&self, id: u64) -> bool {
        self.listeners.iter().any(|l| l.id == id)
    }

    fn take(&mut self, id: u64) -> Option<Listener<T>> {
        let index = self.listeners.iter().position(|l| l.id == id)?;
        Some(self.listeners.remove(index))
    }
}

/// A multi-listener event source.
///
/// Cloning a `Signal` yields another handle to the same registry, so a
/// host can keep one clone for emitting and hand others out for
/// subscribing.
pub struct Signal<T> {
    registry: Arc<Mutex<Registry<T>>>,
}

impl<T> Signal<T> {
    /// Creates a signal with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Number of live listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.lock().listeners.len()
    }

    /// True when at least one listener is registered.
    #[must_use]
    pub fn is_observed(&self) -> bool {
        self.listener_count() > 0
    }
}

impl<T: 'static> Signal<T> {
    /// Registers a callback, returning the handle that owns the registration.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&T) + Send + 'static,
    {
        let id = {
            let mut registry = self.registry.lock();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push(Listener {
                id,
                callback: Arc::new(ReentrantMutex::new(RefCell::new(Box::new(callback)))),
            });
            id
        };
        tracing::debug!(listener = id, "signal listener registered");

        let registry: Weak<Mutex<Registry<T>>> = Arc::downgrade(&self.registry);
        Subscription::new(move || {
            let Some(registry) = registry.upgrade() else {
                return;
            };
            // Dropped outside the lock: the callback may own subscriptions of its own.
            let released = registry.lock().take(id);
            if released.is_some() {
                tracing::debug!(listener = id, "signal listener released");
            }
        })
    }

    /// Registers a bounded channel as a listener.
    ///
    /// Values that do not fit are dropped so the emitting callback never
    /// blocks the event thread.
    pub fn subscribe_channel(&self, capacity: usize) -> (Subscription, Receiver<T>)
    where
        T: Clone + Send,
    {
        let (sender, receiver) = bounded(capacity);
        let subscription = self.subscribe(move |value: &T| match sender.try_send(value.clone()) {
            Ok(()) | Err(TrySendError::Disconnected(_)) => {}
            Err(TrySendError::Full(_)) => {
                tracing::debug!("signal channel full, value dropped");
            }
        });
        (subscription, receiver)
    }

    /// Delivers `value` to every listener, returning how many ran.
    ///
    /// The registry lock is not held while callbacks run, so callbacks may
    /// subscribe or unsubscribe freely. A listener released during this
    /// emit is not called afterwards. A listener that re-enters its own
    /// signal is skipped for the nested emit.
    pub fn emit(&self, value: &T) -> usize {
        let snapshot: Vec<(u64, SharedCallback<T>)> = self
            .registry
            .lock()
            .listeners
            .iter()
            .map(|l| (l.id, Arc::clone(&l.callback)))
            .collect();

        let mut delivered = 0;
        for (id, callback) in snapshot {
            if !self.registry.lock().contains(id) {
                continue;
            }
            let guard = callback.lock();
            // Already borrowed means this thread is inside the callback.
            let Ok(mut running) = guard.try_borrow_mut() else {
                continue;
            };
            let call = &mut *running;
            call(value);
            delivered += 1;
        }
        delivered
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Owned registration on a [`Signal`].
///
/// Releasing is idempotent, and dropping the handle releases it.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    fn new<F>(release: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Releases the registration. Calling it again does nothing.
    pub fn unsubscribe(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    /// True until [`Subscription::unsubscribe`] runs.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// A primitive fed by a host event source.
///
/// `start` takes out an owned subscription on the source; `stop` releases
/// it and halts any per-frame work. Both are idempotent.
pub trait EventDriven {
    /// Event consumed from the host.
    type Input: 'static;

    /// Subscribes to `source`. Does nothing while already running.
    fn start(&mut self, source: &Signal<Self::Input>);

    /// Releases the source subscription and any scheduled frame work.
    fn stop(&mut self);

    /// True between `start` and `stop`.
    fn is_running(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_emit_reaches_all_listeners() {
        let signal = Signal::<u32>::new();
        let total = Arc::new(AtomicUsize::new(0));

        let t1 = Arc::clone(&total);
        let _a = signal.subscribe(move |v| {
            t1.fetch_add(*v as usize, Ordering::SeqCst);
        });
        let t2 = Arc::clone(&total);
        let _b = signal.subscribe(move |v| {
            t2.fetch_add(*v as usize, Ordering::SeqCst);
        });

        assert_eq!(signal.emit(&5), 2);
        assert_eq!(total.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let signal = Signal::<()>::new();
        let sub = signal.subscribe(|_| {});
        assert_eq!(signal.listener_count(), 1);

        drop(sub);
        assert_eq!(signal.listener_count(), 0);
        assert_eq!(signal.emit(&()), 0);
    }

    #[test]
    fn test_double_unsubscribe_is_noop() {
        let signal = Signal::<()>::new();
        let _keep = signal.subscribe(|_| {});
        let mut sub = signal.subscribe(|_| {});

        sub.unsubscribe();
        sub.unsubscribe();
        assert!(!sub.is_active());
        assert_eq!(signal.listener_count(), 1);
    }

    #[test]
    fn test_released_mid_emit_is_skipped() {
        let signal = Signal::<()>::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let victim: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let slot = Arc::clone(&victim);
        let _killer = signal.subscribe(move |_| {
            if let Some(mut sub) = slot.lock().take() {
                sub.unsubscribe();
            }
        });
        let c = Arc::clone(&calls);
        *victim.lock() = Some(signal.subscribe(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        }));

        signal.emit(&());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_reentrant_emit_does_not_deadlock() {
        let signal = Signal::<u8>::new();
        let inner = signal.clone();
        let calls = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&calls);
        let _sub = signal.subscribe(move |v| {
            c.fetch_add(1, Ordering::SeqCst);
            if *v == 0 {
                inner.emit(&1);
            }
        });

        signal.emit(&0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_emits_are_all_delivered() {
        let signal = Signal::<u32>::new();
        let total = Arc::new(AtomicUsize::new(0));
        let t = Arc::clone(&total);
        let _sub = signal.subscribe(move |v| {
            t.fetch_add(*v as usize, Ordering::SeqCst);
            std::thread::yield_now();
        });

        let emitters: Vec<_> = (0..4)
            .map(|_| {
                let signal = signal.clone();
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        assert_eq!(signal.emit(&1), 1);
                    }
                })
            })
            .collect();
        for emitter in emitters {
            emitter.join().unwrap();
        }
        assert_eq!(total.load(Ordering::SeqCst), 2000);
    }

    #[test]
    fn test_channel_listener_drops_when_full() {
        let signal = Signal::<u32>::new();
        let (_sub, rx) = signal.subscribe_channel(2);

        for v in 0..5 {
            signal.emit(&v);
        }
        let got: Vec<u32> = rx.try_iter().collect();
        assert_eq!(got, vec![0, 1]);
    }

    #[test]
    fn test_subscription_outlives_signal() {
        let signal = Signal::<()>::new();
        let mut sub = signal.subscribe(|_| {});
        drop(signal);
        sub.unsubscribe();
        assert!(!sub.is_active());
    }
}
