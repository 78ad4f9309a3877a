use crate::subscription::{Subscription, SubscriptionId};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::panic::Location;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, Weak};
use tracing::{debug, trace};

/// Marker trait for types that can be sent across the [`EventBus`].
///
/// Any type that is `Send + Sync + 'static` automatically implements this trait.
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

/// Correlation object attached to a publish.
///
/// Matching against a target is done by allocation identity, never by value.
pub type Object = Arc<dyn Any + Send + Sync>;

type Handler = dyn Fn(&dyn Any, Option<&Object>) + Send + Sync;

static GLOBAL: LazyLock<EventBus> = LazyLock::new(EventBus::new);

/// One registered callback inside a bucket.
pub(crate) struct Subscriber {
    pub(crate) id: SubscriptionId,
    active: AtomicBool,
    handler: Box<Handler>,
}

impl Subscriber {
    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Returns `true` only for the call that actually flipped the flag.
    pub(crate) fn deactivate(&self) -> bool {
        self.active.swap(false, Ordering::AcqRel)
    }
}

impl fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

pub(crate) struct BusState {
    buckets: RwLock<FxHashMap<TypeId, Vec<Arc<Subscriber>>>>,
    next_id: AtomicU64,
    development_events: bool,
}

impl BusState {
    fn insert(&self, key: TypeId, handler: Box<Handler>) -> Arc<Subscriber> {
        let id = SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let subscriber = Arc::new(Subscriber { id, active: AtomicBool::new(true), handler });
        self.buckets.write().entry(key).or_default().push(Arc::clone(&subscriber));
        subscriber
    }

    /// Removes one entry by identity. The removed entry is returned so that its
    /// captures are dropped by the caller after the lock is released.
    pub(crate) fn remove(&self, key: TypeId, id: SubscriptionId) -> Option<Arc<Subscriber>> {
        let mut buckets = self.buckets.write();
        let bucket = buckets.get_mut(&key)?;
        let position = bucket.iter().position(|s| s.id == id)?;
        let removed = bucket.remove(position);
        if bucket.is_empty() {
            buckets.remove(&key);
        }
        drop(buckets);
        Some(removed)
    }

    fn snapshot(&self, key: TypeId) -> Vec<Arc<Subscriber>> {
        self.buckets.read().get(&key).map(|bucket| bucket.to_vec()).unwrap_or_default()
    }
}

impl fmt::Debug for BusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BusState")
            .field("buckets", &self.buckets.read().len())
            .field("development_events", &self.development_events)
            .finish_non_exhaustive()
    }
}

/// A synchronous, thread-safe broadcast bus keyed by the payload's [`TypeId`].
///
/// Cloning is cheap and yields a handle to the same bus.
///
/// Delivery happens on the publishing thread. `publish` takes a snapshot of the
/// bucket under a read lock and invokes the callbacks after releasing it, so a
/// callback may subscribe, cancel, or publish again without deadlocking.
#[derive(Debug, Clone)]
pub struct EventBus {
    state: Arc<BusState>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a new, empty `EventBus`.
    ///
    /// Development events ([`EventBus::publish_dev`]) are enabled in debug builds.
    #[must_use]
    pub fn new() -> Self {
        Self::with_development_events(cfg!(debug_assertions))
    }

    /// Creates a new, empty `EventBus` with development events explicitly switched on or off.
    #[must_use]
    pub fn with_development_events(enabled: bool) -> Self {
        Self {
            state: Arc::new(BusState {
                buckets: RwLock::new(FxHashMap::default()),
                next_id: AtomicU64::new(1),
                development_events: enabled,
            }),
        }
    }

    /// The process-wide bus, constructed on first use.
    ///
    /// Modules that need isolation (tests, plugins) should own an instance from
    /// [`EventBus::new`] instead.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Whether [`EventBus::publish_dev`] delivers on this bus.
    #[must_use]
    pub fn development_events(&self) -> bool {
        self.state.development_events
    }

    /// Subscribes `callback` to every event of type `T`.
    ///
    /// The subscription lives as long as the returned handle.
    ///
    /// # Examples
    /// ```rust
    /// use coord_event_bus::EventBus;
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicU64, Ordering};
    ///
    /// struct UserCreated(u64);
    ///
    /// let bus = EventBus::new();
    /// let seen = Arc::new(AtomicU64::new(0));
    /// let sink = Arc::clone(&seen);
    /// let _subscription = bus.subscribe(move |event: &UserCreated| {
    ///     sink.store(event.0, Ordering::SeqCst);
    /// });
    ///
    /// assert!(bus.publish(UserCreated(7)));
    /// assert_eq!(seen.load(Ordering::SeqCst), 7);
    /// ```
    pub fn subscribe<T, F>(&self, callback: F) -> Subscription
    where
        T: Event,
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.insert::<T>(Box::new(move |event: &dyn Any, _: Option<&Object>| {
            if let Some(event) = event.downcast_ref::<T>() {
                callback(event);
            }
        }))
    }

    /// Subscribes `callback` to events of type `T`, also handing it the
    /// correlation object of the publish, if any.
    pub fn subscribe_with_object<T, F>(&self, callback: F) -> Subscription
    where
        T: Event,
        F: Fn(&T, Option<&Object>) + Send + Sync + 'static,
    {
        self.insert::<T>(Box::new(move |event: &dyn Any, object: Option<&Object>| {
            if let Some(event) = event.downcast_ref::<T>() {
                callback(event, object);
            }
        }))
    }

    /// Subscribes `callback` to events of type `T` published with `target` as
    /// their correlation object.
    ///
    /// The bus keeps only a weak reference to `target`. Once it is dropped the
    /// subscription never fires again. Publishes without a correlation object,
    /// or with a different allocation holding an equal value, are ignored.
    ///
    /// # Examples
    /// ```rust
    /// use coord_event_bus::EventBus;
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    ///
    /// struct Tapped;
    /// struct Button(&'static str);
    ///
    /// let bus = EventBus::new();
    /// let ok = Arc::new(Button("ok"));
    /// let hits = Arc::new(AtomicUsize::new(0));
    /// let counter = Arc::clone(&hits);
    /// let _subscription = bus.subscribe_targeted(&ok, move |_: &Tapped| {
    ///     counter.fetch_add(1, Ordering::SeqCst);
    /// });
    ///
    /// bus.publish(Tapped);
    /// bus.publish_with(Tapped, Arc::new(Button("ok")));
    /// bus.publish_with(Tapped, ok.clone());
    /// assert_eq!(hits.load(Ordering::SeqCst), 1);
    /// ```
    pub fn subscribe_targeted<T, O, F>(&self, target: &Arc<O>, callback: F) -> Subscription
    where
        T: Event,
        O: ?Sized + Send + Sync + 'static,
        F: Fn(&T) + Send + Sync + 'static,
    {
        let target: Weak<O> = Arc::downgrade(target);
        self.insert::<T>(Box::new(move |event: &dyn Any, object: Option<&Object>| {
            let Some(object) = object else { return };
            let Some(target) = target.upgrade() else { return };
            if !std::ptr::addr_eq(Arc::as_ptr(&target), Arc::as_ptr(object)) {
                return;
            }
            if let Some(event) = event.downcast_ref::<T>() {
                callback(event);
            }
        }))
    }

    /// Publishes `event` to every current subscriber of `T`.
    ///
    /// Returns `false` when nobody is subscribed; that is not an error.
    #[track_caller]
    pub fn publish<T: Event>(&self, event: T) -> bool {
        self.dispatch(&event, None, Location::caller())
    }

    /// Publishes `event` together with a correlation `object`.
    ///
    /// Plain subscribers receive the event as usual; target-scoped subscribers
    /// receive it only if `object` is their target.
    #[track_caller]
    pub fn publish_with<T: Event>(&self, event: T, object: Object) -> bool {
        self.dispatch(&event, Some(&object), Location::caller())
    }

    /// Builds and publishes an event only when development events are enabled.
    ///
    /// `make` is not called otherwise, so diagnostics that are expensive to
    /// assemble cost nothing in production.
    #[track_caller]
    pub fn publish_dev<T, F>(&self, make: F) -> bool
    where
        T: Event,
        F: FnOnce() -> T,
    {
        if !self.state.development_events {
            return false;
        }
        self.dispatch(&make(), None, Location::caller())
    }

    /// Number of live subscriptions for `T`.
    #[must_use]
    pub fn subscriber_count<T: Event>(&self) -> usize {
        self.state.buckets.read().get(&TypeId::of::<T>()).map_or(0, Vec::len)
    }

    /// Whether at least one subscription for `T` exists.
    #[must_use]
    pub fn has_subscribers<T: Event>(&self) -> bool {
        self.subscriber_count::<T>() > 0
    }

    /// Drops every subscription on this bus.
    ///
    /// Outstanding handles become inactive; cancelling them later is a no-op.
    /// Returns the number of event types that had subscribers.
    pub fn clear(&self) -> usize {
        let drained = std::mem::take(&mut *self.state.buckets.write());
        let count = drained.len();
        for subscriber in drained.values().flatten() {
            subscriber.deactivate();
        }
        debug!(buckets = count, "Event bus cleared");
        count
    }

    fn insert<T: Event>(&self, handler: Box<Handler>) -> Subscription {
        let key = TypeId::of::<T>();
        let subscriber = self.state.insert(key, handler);
        trace!(event = type_name::<T>(), id = %subscriber.id, "Subscription registered");
        Subscription::new(Arc::downgrade(&self.state), key, type_name::<T>(), subscriber)
    }

    fn dispatch<T: Event>(
        &self,
        event: &T,
        object: Option<&Object>,
        caller: &'static Location<'static>,
    ) -> bool {
        let snapshot = self.state.snapshot(TypeId::of::<T>());
        if snapshot.is_empty() {
            trace!(
                event = type_name::<T>(),
                file = caller.file(),
                line = caller.line(),
                "Event dropped: no active subscribers"
            );
            return false;
        }

        trace!(
            event = type_name::<T>(),
            subscribers = snapshot.len(),
            correlated = object.is_some(),
            file = caller.file(),
            line = caller.line(),
            "Dispatching event"
        );
        for subscriber in &snapshot {
            // Cancelled by an earlier callback of this same round.
            if subscriber.is_active() {
                (subscriber.handler)(event as &dyn Any, object);
            }
        }
        true
    }
}
