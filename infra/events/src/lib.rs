//! # Event Bus
//!
//! A synchronous, type-keyed broadcast bus for decoupling independently
//! developed modules inside one process.
//!
//! ## Overview
//!
//! Publishers and subscribers agree only on a payload type. Every subscriber
//! registered for the exact type `T` receives a reference to each published
//! `T`; nothing is queued, retried or persisted.
//!
//! ## Features
//!
//! * **Type-Safe**: Events are identified by their [`TypeId`](std::any::TypeId).
//! * **Handle-scoped lifetime**: [`Subscription`] removes its entry on drop.
//! * **Correlation objects**: target-scoped subscriptions match by `Arc` identity.
//! * **Re-entrant delivery**: callbacks may subscribe, cancel or publish.
//! * **High Performance**: `FxHashMap` + `parking_lot::RwLock`.
//!
//! # Example
//!
//! ```rust
//! use coord_event_bus::EventBus;
//! use std::sync::{Arc, Mutex};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct UserCreated { id: u64 }
//!
//! let bus = EventBus::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&seen);
//! let subscription = bus.subscribe(move |event: &UserCreated| {
//!     sink.lock().unwrap().push(event.id);
//! });
//!
//! assert!(bus.publish(UserCreated { id: 42 }));
//! drop(subscription);
//! assert!(!bus.publish(UserCreated { id: 43 }));
//!
//! assert_eq!(*seen.lock().unwrap(), vec![42]);
//! ```

mod action;
mod bus;
mod subscription;

pub use action::Action;
pub use bus::{Event, EventBus, Object};
pub use subscription::{Subscription, SubscriptionId, SubscriptionSet};
