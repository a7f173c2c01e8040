//! Handler registry.
//!
//! Observers subscribe with [`HandlerRegistry::register`] and receive every
//! dispatched [`DiagnosticEvent`]. Registration returns a
//! [`HandlerRegistration`] token that removes the handler when dropped, so a
//! handler can never outlive its subscription.
//!
//! # Ordering
//!
//! Handlers are visited newest-first: registering `A` then `B` delivers each
//! event to `B` before `A`.
//!
//! # Thread Safety
//!
//! A single mutex guards add, remove and snapshot. Dispatch never holds the
//! lock while calling handlers; it iterates a snapshot instead, so a handler
//! may register, unregister or raise further violations without deadlocking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::DiagnosticEvent;

/// Observer of dispatched diagnostics.
///
/// The handler's own state plays the role of the user context. Handlers must
/// not panic; a panicking handler is contained and logged by the dispatcher.
pub trait ErrorHandler: Send + Sync {
    fn handle(&self, event: &DiagnosticEvent);
}

impl<F> ErrorHandler for F
where
    F: Fn(&DiagnosticEvent) + Send + Sync,
{
    fn handle(&self, event: &DiagnosticEvent) {
        self(event);
    }
}

/// Identity of one registration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct HandlerId(u64);

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler#{}", self.0)
    }
}

struct Entry {
    id: HandlerId,
    handler: Arc<dyn ErrorHandler>,
}

struct Inner {
    /// Oldest first; dispatch walks it in reverse.
    entries: Mutex<Vec<Entry>>,
    next_id: AtomicU64,
}

impl Inner {
    fn remove(&self, id: HandlerId) -> bool {
        let mut entries = self.entries.lock();
        match entries.iter().position(|entry| entry.id == id) {
            Some(pos) => {
                entries.remove(pos);
                tracing::trace!(%id, remaining = entries.len(), "handler unregistered");
                true
            }
            None => false,
        }
    }
}

/// Ordered set of diagnostic observers.
///
/// Empty at construction, mutated only by explicit register/unregister (or
/// dropping a registration token), never cleared implicitly.
#[derive(Clone)]
pub struct HandlerRegistry {
    inner: Arc<Inner>,
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HandlerRegistry {
    pub fn new() -> Self {
        HandlerRegistry {
            inner: Arc::new(Inner {
                entries: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Add a handler in front of all existing ones.
    ///
    /// The handler stays registered until the returned token is dropped,
    /// unregistered, or made permanent with [`HandlerRegistration::keep`].
    #[must_use = "dropping the registration immediately unregisters the handler"]
    pub fn register(&self, handler: impl ErrorHandler + 'static) -> HandlerRegistration {
        self.register_arc(Arc::new(handler))
    }

    /// Register a shared handler. The same `Arc` may be registered more than
    /// once; each registration gets its own id and is delivered separately.
    #[must_use = "dropping the registration immediately unregisters the handler"]
    pub fn register_arc(&self, handler: Arc<dyn ErrorHandler>) -> HandlerRegistration {
        let id = HandlerId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let mut entries = self.inner.entries.lock();
        entries.push(Entry { id, handler });
        tracing::trace!(%id, registered = entries.len(), "handler registered");
        HandlerRegistration {
            id,
            registry: Some(Arc::downgrade(&self.inner)),
        }
    }

    /// Remove a handler by identity.
    ///
    /// Returns `false` if `id` is not registered; that case is not reported.
    pub fn unregister(&self, id: HandlerId) -> bool {
        self.inner.remove(id)
    }

    pub fn len(&self) -> usize {
        self.inner.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.lock().is_empty()
    }

    pub fn contains(&self, id: HandlerId) -> bool {
        self.inner.entries.lock().iter().any(|entry| entry.id == id)
    }

    /// Handlers in dispatch order (newest first).
    ///
    /// The lock is released before the snapshot is returned.
    pub fn snapshot(&self) -> Vec<Arc<dyn ErrorHandler>> {
        let entries = self.inner.entries.lock();
        entries
            .iter()
            .rev()
            .map(|entry| Arc::clone(&entry.handler))
            .collect()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<HandlerId> = self.inner.entries.lock().iter().map(|e| e.id).collect();
        f.debug_struct("HandlerRegistry").field("handlers", &ids).finish()
    }
}

/// Token for one registration; unregisters on drop.
#[must_use = "dropping the registration immediately unregisters the handler"]
pub struct HandlerRegistration {
    id: HandlerId,
    /// `None` once the registration has been made permanent.
    registry: Option<Weak<Inner>>,
}

impl HandlerRegistration {
    pub fn id(&self) -> HandlerId {
        self.id
    }

    /// Unregister now. Equivalent to dropping the token.
    pub fn unregister(self) {
        drop(self);
    }

    /// Keep the handler registered for the registry's whole lifetime.
    ///
    /// It can still be removed with [`HandlerRegistry::unregister`].
    pub fn keep(mut self) -> HandlerId {
        self.registry = None;
        self.id
    }
}

impl Drop for HandlerRegistration {
    fn drop(&mut self) {
        if let Some(inner) = self.registry.take().and_then(|weak| weak.upgrade()) {
            inner.remove(self.id);
        }
    }
}

impl fmt::Debug for HandlerRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistration")
            .field("id", &self.id)
            .field("permanent", &self.registry.is_none())
            .finish()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
