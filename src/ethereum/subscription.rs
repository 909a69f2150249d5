//! Event subscription handles.
//!
//! Each registration runs as a tokio task. A [`Subscription`] cancels its own
//! task; a [`SubscriptionSet`] tracks the registrations of one owner so they can
//! be cancelled by name or all at once.

use std::collections::HashMap;

use tokio::task::{AbortHandle, JoinHandle};

/// Handle to a running registration.
///
/// Dropping the handle does not cancel the registration.
#[derive(Debug, Clone)]
pub struct Subscription {
    name: String,
    handle: AbortHandle,
}

impl Subscription {
    /// Wrap a spawned watcher task.
    pub fn new<T>(name: impl Into<String>, task: &JoinHandle<T>) -> Self {
        Self { name: name.into(), handle: task.abort_handle() }
    }

    /// Name of the subscribed event.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the registration is still delivering events.
    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stop delivering events. Idempotent.
    pub fn cancel(&self) {
        if !self.handle.is_finished() {
            tracing::info!(event = %self.name, "Stopped listening");
        }
        self.handle.abort();
    }
}

/// Registrations grouped by event name.
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    by_name: HashMap<String, Vec<Subscription>>,
}

impl SubscriptionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a registration, dropping ones that are no longer active.
    pub fn insert(&mut self, subscription: Subscription) {
        self.by_name.retain(|_, subs| {
            subs.retain(Subscription::is_active);
            !subs.is_empty()
        });
        self.by_name.entry(subscription.name.clone()).or_default().push(subscription);
    }

    /// Cancel every registration for `name`. Returns how many were still active.
    pub fn cancel(&mut self, name: &str) -> usize {
        self.by_name.remove(name).map(cancel_active).unwrap_or(0)
    }

    /// Cancel every registration. Returns how many were still active.
    pub fn cancel_all(&mut self) -> usize {
        self.by_name.drain().map(|(_, subs)| cancel_active(subs)).sum()
    }

    /// Number of registrations still active.
    pub fn active(&self) -> usize {
        self.by_name.values().flatten().filter(|s| s.is_active()).count()
    }
}

fn cancel_active(subscriptions: Vec<Subscription>) -> usize {
    subscriptions
        .into_iter()
        .filter(|s| s.is_active())
        .map(|s| s.cancel())
        .count()
}
