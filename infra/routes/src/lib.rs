//! # Route Hub
//!
//! A type-keyed resolver: each route type has at most one producer, and
//! resolving a route value yields a strongly typed result or a structured
//! [`ResolveError`].
//!
//! Modules register producers for the route enums they own; other modules ask
//! for a target (a screen, a handler, a title) without depending on the
//! producer's concrete types.
//!
//! ## Resolution order
//!
//! 1. No producer for the route type: [`ResolveError::UnregisteredType`].
//! 2. The producer returned `None`: [`ResolveError::ProducerReturnedNil`].
//! 3. The value is not the requested type: [`ResolveError::TypeMismatch`].
//!
//! # Example
//!
//! ```rust
//! use coord_route_hub::{ResolveError, RouteResolver, resolved};
//!
//! #[derive(Debug)]
//! enum Screen { Profile, Settings }
//!
//! let resolver = RouteResolver::new();
//! resolver.register(|screen: Screen| match screen {
//!     Screen::Profile => resolved(String::from("Profile")),
//!     Screen::Settings => None,
//! });
//!
//! assert_eq!(resolver.resolve::<_, String>(Screen::Profile).unwrap(), "Profile");
//! assert!(matches!(
//!     resolver.resolve::<_, String>(Screen::Settings),
//!     Err(ResolveError::ProducerReturnedNil { .. })
//! ));
//! ```

mod error;
mod resolver;
mod routable;

pub use error::{ResolveError, ResolveErrorExt};
pub use resolver::{Resolved, Route, RouteResolver, resolved};
pub use routable::Routable;
