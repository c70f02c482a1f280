//! Folio in-process event bus.
//!
//! - [`EventBus`]: publish/subscribe hub backed by `tokio::sync::broadcast`.
//! - [`PlatformEvent`]: the domain event envelope.
//! - [`event_types`]: names of the events the platform publishes.
//!
//! Subscribing returns a `broadcast::Receiver`; dropping it unsubscribes.

pub mod bus;
pub mod event_types;

pub use bus::{EventBus, PlatformEvent};
