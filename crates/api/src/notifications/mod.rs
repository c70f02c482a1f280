//! Event-driven notification delivery.
//!
//! The [`NotificationRouter`] subscribes to the event bus and writes in-app
//! notifications according to each recipient's settings.

pub mod router;

pub use router::NotificationRouter;
