//! Facade crate composing the event bus and the route resolver.
//! Re-exports both components and wires them to configuration and logging.
//! Keep this crate thin: it should compose other crates, not implement dispatch logic.
//!
//! ## Usage
//! - Construct an isolated [`Coordinator::new`] per module or test, or share
//!   [`Coordinator::global`].
//! - Hosts call [`bootstrap`] once at startup to load config and install logging.
//!
//! ```rust
//! use coordinator::Coordinator;
//! use coordinator::routes::resolved;
//!
//! #[derive(Debug)]
//! enum Screen { Profile, Settings }
//! struct ProfileOpened;
//!
//! let hub = Coordinator::new();
//! hub.register(|screen: Screen| match screen {
//!     Screen::Profile => resolved("Profile"),
//!     Screen::Settings => None,
//! });
//! let _sub = hub.subscribe(|_: &ProfileOpened| {});
//!
//! let title: &str = hub.resolve(Screen::Profile).unwrap();
//! assert_eq!(title, "Profile");
//! assert!(hub.publish(ProfileOpened));
//! ```

pub mod config;
mod error;

pub use coord_event_bus as events;
pub use coord_logger as logger;
pub use coord_route_hub as routes;
pub use error::{CoordinatorError, CoordinatorErrorExt};

use crate::config::{CoordinatorConfig, LoggingConfig, load_config};
use coord_event_bus::{Event, EventBus, Subscription};
use coord_logger::Logger;
use coord_route_hub::{ResolveError, Resolved, Route, RouteResolver};
use std::any::Any;
use std::path::Path;
use std::sync::LazyLock;
use tracing::info;

static GLOBAL: LazyLock<Coordinator> = LazyLock::new(|| Coordinator {
    events: EventBus::global().clone(),
    routes: RouteResolver::global().clone(),
});

/// One event bus and one route resolver, side by side.
///
/// The two are independent; the facade only saves callers from threading both
/// through their modules.
#[derive(Debug, Clone, Default)]
pub struct Coordinator {
    events: EventBus,
    routes: RouteResolver,
}

impl Coordinator {
    /// Creates a coordinator with fresh, isolated components.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a coordinator with fresh components tuned by `config`.
    #[must_use]
    pub fn from_config(config: &CoordinatorConfig) -> Self {
        Self {
            events: EventBus::with_development_events(config.events.development_events),
            routes: RouteResolver::new(),
        }
    }

    /// The process-wide coordinator, backed by [`EventBus::global`] and
    /// [`RouteResolver::global`].
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    #[must_use]
    pub const fn events(&self) -> &EventBus {
        &self.events
    }

    #[must_use]
    pub const fn routes(&self) -> &RouteResolver {
        &self.routes
    }

    /// See [`EventBus::publish`].
    #[track_caller]
    pub fn publish<T: Event>(&self, event: T) -> bool {
        self.events.publish(event)
    }

    /// See [`EventBus::subscribe`].
    pub fn subscribe<T, F>(&self, callback: F) -> Subscription
    where
        T: Event,
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.events.subscribe(callback)
    }

    /// See [`RouteResolver::register`].
    pub fn register<R, F>(&self, producer: F)
    where
        R: Route,
        F: Fn(R) -> Option<Resolved> + Send + Sync + 'static,
    {
        self.routes.register(producer);
    }

    /// See [`RouteResolver::unregister`].
    pub fn unregister<R: Route>(&self) -> bool {
        self.routes.unregister::<R>()
    }

    /// See [`RouteResolver::resolve`].
    ///
    /// # Errors
    /// Any [`ResolveError`] the resolver reports.
    pub fn resolve<R: Route, T: Any>(&self, route: R) -> Result<T, ResolveError> {
        self.routes.resolve(route)
    }
}

/// Installs the global logger described by `config`.
///
/// # Errors
/// Returns [`CoordinatorError::Logger`] for an unknown level or when the
/// logger cannot be installed.
pub fn init_logging(config: &LoggingConfig) -> Result<Logger, CoordinatorError> {
    let level = coord_logger::parse_level(&config.level).context("Parsing logging.level")?;

    let mut builder = Logger::builder(config.name.as_str())
        .level(level)
        .console(config.console)
        .json(config.json)
        .max_files(config.max_files);
    if let Some(filter) = &config.env_filter {
        builder = builder.env_filter(filter.as_str());
    }
    if let Some(directory) = &config.directory {
        builder = builder.directory(directory);
    }

    Ok(builder.init()?)
}

/// Loads configuration from `path` (or [`config::DEFAULT_CONFIG_FILE`]), installs
/// logging and builds a [`Coordinator`] from it.
///
/// The returned [`Logger`] must be kept alive for the lifetime of the host.
///
/// # Errors
/// Returns [`CoordinatorError::Config`] or [`CoordinatorError::Logger`].
pub fn bootstrap(
    path: Option<impl AsRef<Path>>,
) -> Result<(Coordinator, Logger), CoordinatorError> {
    let config: CoordinatorConfig = load_config(path)?;
    let logger = init_logging(&config.logging)?;
    info!(
        logger = logger.name(),
        development_events = config.events.development_events,
        "Coordinator bootstrapped"
    );
    Ok((Coordinator::from_config(&config), logger))
}
