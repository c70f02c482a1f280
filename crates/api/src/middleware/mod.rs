//! Request extractors for authentication and authorization.
//!
//! - [`auth::AuthUser`] -- the signed-in user from a Bearer token.
//! - [`auth::OptionalAuthUser`] -- the same, or anonymous on public routes.
//! - [`rbac::RequireAdmin`] -- an admin, confirmed against the database.

pub mod auth;
pub mod rbac;
