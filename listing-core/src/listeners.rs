//! Scoped listener registration
//!
//! A [`Listeners`] registry holds callbacks; registering one returns a
//! [`Subscription`] handle. Dropping the handle (or calling
//! [`Subscription::unsubscribe`]) removes the callback. This is how store
//! observers and task-failure handlers are attached and released.
//!
//! # Example
//!
//! ```
//! use listing_core::Listeners;
//!
//! let listeners = Listeners::<u32>::new();
//! let sub = listeners.subscribe(|value| println!("got {value}"));
//! assert_eq!(listeners.notify(&7), 1);
//!
//! drop(sub);
//! assert_eq!(listeners.notify(&8), 0);
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Callback<T> = Box<dyn FnMut(&T) + Send>;

struct Registry<T> {
    next_id: u64,
    entries: Vec<(u64, Callback<T>)>,
}

impl<T> Registry<T> {
    fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }
}

fn lock<T>(registry: &Mutex<Registry<T>>) -> MutexGuard<'_, Registry<T>> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A set of callbacks notified with `&T`.
///
/// Cloning yields another handle to the same registry, so a registry can be
/// shared with spawned tasks.
///
/// Callbacks run while the registry is locked; a callback must not register
/// or release listeners on the registry that is notifying it.
pub struct Listeners<T> {
    inner: Arc<Mutex<Registry<T>>>,
}

impl<T> Clone for Listeners<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.len())
            .finish()
    }
}

impl<T> Listeners<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Call every registered callback with `value`.
    ///
    /// Returns the number of callbacks invoked.
    pub fn notify(&self, value: &T) -> usize {
        let mut registry = lock(&self.inner);
        for (_, callback) in registry.entries.iter_mut() {
            callback(value);
        }
        registry.entries.len()
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        lock(&self.inner).entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Listeners<T> {
    /// Register a callback for the lifetime of the returned handle.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&T) + Send + 'static,
    {
        let id = {
            let mut registry = lock(&self.inner);
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push((id, Box::new(callback)));
            id
        };

        let weak: Weak<Mutex<Registry<T>>> = Arc::downgrade(&self.inner);
        Subscription {
            id,
            release: Some(Box::new(move || {
                // Registry may already be gone if its owner was dropped first
                if let Some(registry) = weak.upgrade() {
                    lock(&registry).remove(id);
                }
            })),
        }
    }
}

/// Handle to a registered listener; releases the registration on drop.
#[must_use = "dropping a Subscription immediately releases the listener"]
pub struct Subscription {
    id: u64,
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Registration id, unique within the issuing registry.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Release the registration now.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.release.is_some())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}
