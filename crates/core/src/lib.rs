//! Folio domain core.
//!
//! Pure domain logic shared by the repository layer, the HTTP API and any
//! future worker or CLI tooling. Nothing in this crate talks to the database
//! directly; persistence seams are expressed as traits (see
//! [`engagement::EngagementStore`]).

pub mod account;
pub mod connection;
pub mod content;
pub mod engagement;
pub mod error;
pub mod hashing;
pub mod import;
pub mod moderation;
pub mod notification;
pub mod portfolio;
pub mod search;
pub mod support;
pub mod template;
pub mod tier;
pub mod token_crypto;
pub mod types;
