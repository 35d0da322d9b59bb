//! # API Route Modules
//!
//! | Route                      | Module              | Pipeline stage          |
//! |----------------------------|---------------------|-------------------------|
//! | `GET /`, `POST /`          | [`model`]           | [`ValidatedJson`] (injecting) |
//! | `GET /schemas[/{type}]`    | [`schemas`]         | none                    |
//! | `POST /validate/{type}`    | [`schemas`]         | middleware (non-injecting) |
//!
//! [`ValidatedJson`]: crate::extractors::ValidatedJson

pub mod model;
pub mod schemas;
