use crate::error::ResolveError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::{Arc, LazyLock};
use tracing::{debug, trace, warn};

/// Marker trait for values whose type selects a producer.
///
/// Any `'static` type qualifies; enums of navigation targets are the usual choice.
pub trait Route: Any {}
impl<T: Any> Route for T {}

/// Type-erased producer output, recovered by [`RouteResolver::resolve`].
pub type Resolved = Box<dyn Any + Send>;

/// Wraps a value as a successful producer output.
///
/// ```rust
/// use coord_route_hub::resolved;
///
/// let out = resolved(42_u32);
/// assert!(out.is_some());
/// ```
#[must_use]
pub fn resolved<T: Any + Send>(value: T) -> Option<Resolved> {
    Some(Box::new(value))
}

static GLOBAL: LazyLock<RouteResolver> = LazyLock::new(RouteResolver::new);

struct Producer<R> {
    call: Box<dyn Fn(R) -> Option<Resolved> + Send + Sync>,
}

struct Entry {
    route: &'static str,
    producer: Arc<dyn Any + Send + Sync>,
}

/// A one-to-one registry from a route type to the single producer handling it.
///
/// Cloning is cheap and yields a handle to the same registry. Producers are
/// invoked outside the lock, so a producer may itself register, unregister or
/// resolve.
#[derive(Clone, Default)]
pub struct RouteResolver {
    entries: Arc<RwLock<FxHashMap<TypeId, Entry>>>,
}

impl RouteResolver {
    /// Creates a new, empty `RouteResolver`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide resolver, constructed on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Registers `producer` for routes of type `R`, replacing any previous one.
    ///
    /// # Examples
    /// ```rust
    /// use coord_route_hub::{RouteResolver, resolved};
    ///
    /// enum Screen { Profile, Settings }
    ///
    /// let resolver = RouteResolver::new();
    /// resolver.register(|screen: Screen| match screen {
    ///     Screen::Profile => resolved("Profile"),
    ///     Screen::Settings => None,
    /// });
    ///
    /// let title: &str = resolver.resolve(Screen::Profile).unwrap();
    /// assert_eq!(title, "Profile");
    /// assert!(resolver.resolve::<_, &str>(Screen::Settings).is_err());
    /// ```
    pub fn register<R, F>(&self, producer: F)
    where
        R: Route,
        F: Fn(R) -> Option<Resolved> + Send + Sync + 'static,
    {
        let entry = Entry {
            route: type_name::<R>(),
            producer: Arc::new(Producer { call: Box::new(producer) }),
        };
        let previous = self.entries.write().insert(TypeId::of::<R>(), entry);
        if previous.is_some() {
            debug!(route = type_name::<R>(), "Route producer replaced");
        } else {
            trace!(route = type_name::<R>(), "Route producer registered");
        }
    }

    /// Removes the producer for `R`. Returns whether one was registered.
    pub fn unregister<R: Route>(&self) -> bool {
        let removed = self.entries.write().remove(&TypeId::of::<R>());
        trace!(route = type_name::<R>(), removed = removed.is_some(), "Route producer unregistered");
        removed.is_some()
    }

    /// Resolves `route` into a `T`.
    ///
    /// # Errors
    /// * [`ResolveError::UnregisteredType`] when no producer handles `R`.
    /// * [`ResolveError::ProducerReturnedNil`] when the producer yields `None` for `route`.
    /// * [`ResolveError::TypeMismatch`] when the produced value is not a `T`.
    pub fn resolve<R: Route, T: Any>(&self, route: R) -> Result<T, ResolveError> {
        let name = type_name::<R>();
        let Some(producer) = self.producer::<R>() else {
            warn!(route = name, "Resolving a route type without a producer");
            return Err(ResolveError::UnregisteredType { route: name, context: None });
        };

        let Some(value) = (producer.call)(route) else {
            debug!(route = name, "Route producer returned no value");
            return Err(ResolveError::ProducerReturnedNil { route: name, context: None });
        };

        value.downcast::<T>().map(|value| *value).map_err(|_| {
            debug!(route = name, expected = type_name::<T>(), "Resolved value has another type");
            ResolveError::TypeMismatch { route: name, expected: type_name::<T>(), context: None }
        })
    }

    /// Whether a producer is registered for `R`.
    #[must_use]
    pub fn is_registered<R: Route>(&self) -> bool {
        self.entries.read().contains_key(&TypeId::of::<R>())
    }

    /// Type names of every registered route, sorted.
    #[must_use]
    pub fn routes(&self) -> Vec<&'static str> {
        let mut routes: Vec<_> = self.entries.read().values().map(|entry| entry.route).collect();
        routes.sort_unstable();
        routes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Removes every producer, returning how many were registered.
    pub fn clear(&self) -> usize {
        let drained = std::mem::take(&mut *self.entries.write());
        debug!(routes = drained.len(), "Route resolver cleared");
        drained.len()
    }

    fn producer<R: Route>(&self) -> Option<Arc<Producer<R>>> {
        let producer = Arc::clone(&self.entries.read().get(&TypeId::of::<R>())?.producer);
        producer.downcast::<Producer<R>>().ok()
    }
}

impl fmt::Debug for RouteResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteResolver").field("routes", &self.routes()).finish()
    }
}
