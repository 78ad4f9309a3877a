use crate::bus::{BusState, Subscriber};
use std::any::TypeId;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::trace;

/// Synthetic identity of a subscription, unique per bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Caller-held handle of a bus subscription.
///
/// Dropping the handle, or calling [`Subscription::cancel`], removes exactly the
/// entry it was created for. Cancelling is idempotent.
#[must_use = "dropping a Subscription cancels it immediately"]
pub struct Subscription {
    bus: Weak<BusState>,
    key: TypeId,
    event: &'static str,
    id: SubscriptionId,
    entry: Option<Arc<Subscriber>>,
}

impl Subscription {
    pub(crate) fn new(
        bus: Weak<BusState>,
        key: TypeId,
        event: &'static str,
        entry: Arc<Subscriber>,
    ) -> Self {
        Self { bus, key, event, id: entry.id, entry: Some(entry) }
    }

    /// Identity of the underlying subscription.
    #[must_use]
    pub const fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Type name of the event this subscription listens to.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        self.event
    }

    /// `false` once cancelled, or once the bus was cleared or dropped.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.bus.strong_count() > 0 && self.entry.as_ref().is_some_and(|entry| entry.is_active())
    }

    /// Removes the subscription from its bus.
    ///
    /// A callback already running in the current publish round completes; the
    /// entry is skipped for the rest of the round and never invoked again.
    pub fn cancel(&self) {
        let Some(entry) = &self.entry else { return };
        if !entry.deactivate() {
            return;
        }
        let Some(bus) = self.bus.upgrade() else { return };
        let removed = bus.remove(self.key, self.id);
        drop(bus);
        trace!(event = self.event, id = %self.id, removed = removed.is_some(), "Subscription cancelled");
    }

    /// Keeps the subscription registered for the lifetime of the bus.
    pub fn detach(mut self) {
        self.entry = None;
    }

    /// Moves the handle into `set`, tying its lifetime to the set.
    pub fn store_in(self, set: &mut SubscriptionSet) {
        set.insert(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("event", &self.event)
            .field("active", &self.is_active())
            .finish()
    }
}

/// A bag of subscriptions cancelled together.
///
/// Typically owned by a module or screen so that everything it listens to goes
/// away with it.
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    handles: Vec<Subscription>,
}

impl SubscriptionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, subscription: Subscription) {
        self.handles.push(subscription);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Cancels and forgets every handle in the set.
    pub fn cancel_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.cancel();
        }
    }
}

impl Extend<Subscription> for SubscriptionSet {
    fn extend<I: IntoIterator<Item = Subscription>>(&mut self, iter: I) {
        self.handles.extend(iter);
    }
}

impl FromIterator<Subscription> for SubscriptionSet {
    fn from_iter<I: IntoIterator<Item = Subscription>>(iter: I) -> Self {
        Self { handles: iter.into_iter().collect() }
    }
}
