use crate::bus::{Event, EventBus, Object};
use crate::subscription::Subscription;

/// Opt-in, self-dispatching view of an event type.
///
/// Implement it with an empty block to let the payload publish and listen for
/// itself:
///
/// ```rust
/// use coord_event_bus::{Action, EventBus};
///
/// #[derive(Debug)]
/// struct LoggedOut;
/// impl Action for LoggedOut {}
///
/// let bus = EventBus::new();
/// let _subscription = LoggedOut::sink(&bus, |_| {});
/// assert!(LoggedOut.send(&bus));
/// ```
pub trait Action: Event + Sized {
    /// Publishes `self` on `bus`.
    #[track_caller]
    fn send(self, bus: &EventBus) -> bool {
        bus.publish(self)
    }

    /// Publishes `self` on `bus` with a correlation object.
    #[track_caller]
    fn send_with(self, bus: &EventBus, object: Object) -> bool {
        bus.publish_with(self, object)
    }

    /// Subscribes `callback` to this action type on `bus`.
    fn sink<F>(bus: &EventBus, callback: F) -> Subscription
    where
        F: Fn(&Self) + Send + Sync + 'static,
    {
        bus.subscribe(callback)
    }

    /// Publishes `self` on the process-wide bus.
    #[track_caller]
    fn send_global(self) -> bool {
        EventBus::global().publish(self)
    }
}
