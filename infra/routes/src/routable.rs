use crate::error::ResolveError;
use crate::resolver::{Resolved, Route, RouteResolver};
use std::any::Any;

/// Opt-in, self-registering view of a route type.
///
/// ```rust
/// use coord_route_hub::{Routable, RouteResolver, resolved};
///
/// #[derive(Debug)]
/// enum Checkout { Cart, Payment }
/// impl Routable for Checkout {}
///
/// let resolver = RouteResolver::new();
/// Checkout::register(&resolver, |route| match route {
///     Checkout::Cart => resolved(1_u8),
///     Checkout::Payment => resolved(2_u8),
/// });
///
/// assert_eq!(Checkout::Payment.resolve::<u8>(&resolver), Ok(2));
/// assert!(Checkout::unregister(&resolver));
/// ```
pub trait Routable: Route + Sized {
    /// Registers `producer` for this route type on `resolver`.
    fn register<F>(resolver: &RouteResolver, producer: F)
    where
        F: Fn(Self) -> Option<Resolved> + Send + Sync + 'static,
    {
        resolver.register::<Self, F>(producer);
    }

    /// Removes this route type's producer from `resolver`.
    fn unregister(resolver: &RouteResolver) -> bool {
        resolver.unregister::<Self>()
    }

    /// Whether `resolver` has a producer for this route type.
    fn is_registered(resolver: &RouteResolver) -> bool {
        resolver.is_registered::<Self>()
    }

    /// Resolves `self` on `resolver`.
    ///
    /// # Errors
    /// See [`RouteResolver::resolve`].
    fn resolve<T: Any>(self, resolver: &RouteResolver) -> Result<T, ResolveError> {
        resolver.resolve(self)
    }

    /// Resolves `self` on the process-wide resolver.
    ///
    /// # Errors
    /// See [`RouteResolver::resolve`].
    fn resolve_global<T: Any>(self) -> Result<T, ResolveError> {
        RouteResolver::global().resolve(self)
    }
}
