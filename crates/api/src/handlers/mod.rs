//! Request handlers, one submodule per resource.
//!
//! Handlers delegate to the repositories in `folio_db` and the rules in
//! `folio_core`, map errors via [`AppError`](crate::error::AppError) and
//! wrap successful bodies in [`DataResponse`](crate::response::DataResponse).

pub mod account;
pub mod admin;
pub mod auth;
pub mod community;
pub mod connection;
pub mod engagement;
pub mod notification;
pub mod portfolio;
pub mod report;
pub mod support;
pub mod template;
