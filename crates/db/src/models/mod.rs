//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` entity structs matching table rows or joined query shapes
//! - plain create/update DTOs carrying already-validated values
//! - `Serialize` response shapes where a row must not be exposed as-is

pub mod connection;
pub mod dashboard;
pub mod engagement;
pub mod notification;
pub mod portfolio;
pub mod report;
pub mod session;
pub mod support;
pub mod user;
