//! Recipe catalogue backend.
//!
//! Dishes, ingredients and their quantified associations, plus per-user
//! carts, favourites and usage statistics. The crate follows a hexagonal
//! layout: [`domain`] owns the rules and ports, [`outbound`] implements the
//! driven ports, and [`inbound`] exposes the REST surface.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
