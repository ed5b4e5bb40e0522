//! Collaborator interfaces: the identity provider and the document store.
//!
//! The core never talks to a concrete backend. Anything that can sign users
//! in and persist issues implements these traits; [`crate::store`] and
//! [`crate::identity`] provide in-process implementations.
//!
//! Change notification is an explicit observer: [`DocumentStore::subscribe`]
//! registers a listener and hands back a [`Subscription`]. The listener is
//! invoked synchronously with the full, newest-first issue list after every
//! write. Dropping or cancelling the subscription unregisters it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::error::Result;
use crate::model::{Issue, IssueUpdate, NewIssue, User};

/// Listener invoked with the full ordered issue list on every change.
pub type ChangeListener = Box<dyn FnMut(&[Issue])>;

/// Identity provider.
pub trait IdentityProvider {
    /// The signed-in user, if any.
    fn current_user(&self) -> Option<User>;

    /// Create an account. Providers may sign the new user in.
    ///
    /// # Errors
    ///
    /// Returns `EmailInUse`, a validation error, or a backend failure.
    fn create_account(&mut self, email: &str, password: &str) -> Result<User>;

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` or a backend failure.
    fn authenticate(&mut self, email: &str, password: &str) -> Result<User>;

    /// Sign the current user out. Succeeds when nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns a backend failure if the session cannot be cleared.
    fn end_session(&mut self) -> Result<()>;
}

/// Document store for the `issues` collection.
pub trait DocumentStore {
    /// Write a new issue. The store assigns `id` and `created_at`.
    ///
    /// # Errors
    ///
    /// Returns a backend failure if the write cannot be completed.
    fn create_issue(&mut self, fields: NewIssue) -> Result<Issue>;

    /// Write the given fields onto an existing issue.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` or a backend failure.
    fn update_issue(&mut self, id: &str, update: &IssueUpdate) -> Result<()>;

    /// All issues, newest `created_at` first.
    ///
    /// # Errors
    ///
    /// Returns a backend failure if the collection cannot be read.
    fn list_issues(&self) -> Result<Vec<Issue>>;

    /// Fetch one issue.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` or a backend failure.
    fn get_issue(&self, id: &str) -> Result<Issue>;

    /// Register a change listener.
    ///
    /// The listener receives the current list immediately and then the full
    /// list after every change until the subscription is dropped.
    ///
    /// # Errors
    ///
    /// Returns a backend failure if the subscription cannot be established.
    fn subscribe(&self, listener: ChangeListener) -> Result<Subscription>;
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<(u64, ChangeListener)>,
    /// Cancellations that arrive while listeners are checked out for delivery.
    cancelled: Vec<u64>,
}

/// Listener bookkeeping shared by store implementations.
///
/// Single-threaded by construction (`Rc`), matching the event-driven model:
/// notifications run on the caller's stack. Listeners may cancel
/// subscriptions, including their own, while being notified.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    inner: Rc<RefCell<Registry>>,
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`, deliver `initial` to it, and return its handle.
    pub fn register(&self, mut listener: ChangeListener, initial: &[Issue]) -> Subscription {
        listener(initial);

        let mut registry = self.inner.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push((id, listener));
        tracing::debug!(subscription = id, "listener registered");

        Subscription {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver `snapshot` to every registered listener.
    pub fn notify(&self, snapshot: &[Issue]) {
        // Check listeners out so they can subscribe or cancel re-entrantly.
        let mut delivering = std::mem::take(&mut self.inner.borrow_mut().entries);
        tracing::trace!(listeners = delivering.len(), issues = snapshot.len(), "notify");

        for (_, listener) in &mut delivering {
            listener(snapshot);
        }

        let mut registry = self.inner.borrow_mut();
        let cancelled = std::mem::take(&mut registry.cancelled);
        delivering.retain(|(id, _)| !cancelled.contains(id));
        // Listeners registered during delivery go after the existing ones.
        let added = std::mem::take(&mut registry.entries);
        registry.entries = delivering;
        registry.entries.extend(added);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cancellation handle for a change listener.
///
/// Dropping the handle unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Unsubscribe explicitly.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(shared) = self.registry.upgrade() else {
            return;
        };
        let mut registry = shared.borrow_mut();
        let before = registry.entries.len();
        registry.entries.retain(|(id, _)| *id != self.id);
        if registry.entries.len() == before {
            // Checked out for delivery; drop it when delivery finishes.
            registry.cancelled.push(self.id);
        }
        tracing::debug!(subscription = self.id, "listener unregistered");
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_delivers_initial_snapshot() {
        let registry = ListenerRegistry::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = registry.register(
            Box::new(move |issues: &[Issue]| sink.borrow_mut().push(issues.len())),
            &[],
        );
        assert_eq!(*seen.borrow(), vec![0]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let registry = ListenerRegistry::new();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let sub = registry.register(Box::new(move |_: &[Issue]| *counter.borrow_mut() += 1), &[]);
        registry.notify(&[]);
        sub.cancel();
        registry.notify(&[]);
        assert_eq!(*calls.borrow(), 2);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_cancel_during_notify() {
        let registry = ListenerRegistry::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(RefCell::new(0));

        let own_slot = Rc::clone(&slot);
        let counter = Rc::clone(&calls);
        let sub = registry.register(
            Box::new(move |_: &[Issue]| {
                *counter.borrow_mut() += 1;
                // Unsubscribe after the first change notification.
                if *counter.borrow() > 1 {
                    own_slot.borrow_mut().take();
                }
            }),
            &[],
        );
        *slot.borrow_mut() = Some(sub);

        registry.notify(&[]);
        registry.notify(&[]);
        assert_eq!(*calls.borrow(), 2);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_drop_after_registry_gone_is_harmless() {
        let registry = ListenerRegistry::new();
        let sub = registry.register(Box::new(|_: &[Issue]| {}), &[]);
        drop(registry);
        drop(sub);
    }
}
