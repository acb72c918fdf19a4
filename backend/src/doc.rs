//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST endpoint from the inbound layer, the
//! error schema wrappers and the session cookie security scheme. The
//! document is served by Swagger UI in debug builds.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/session.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Food catalogue API",
        description = "Recipes, ingredients, per-user carts, favourites and usage statistics."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::sign_in,
        crate::inbound::http::auth::sign_out,
        crate::inbound::http::users::register,
        crate::inbound::http::users::profile,
        crate::inbound::http::ingredients::create_ingredient,
        crate::inbound::http::dishes::list_dishes,
        crate::inbound::http::dishes::list_dishes_by_category,
        crate::inbound::http::dishes::search_dishes,
        crate::inbound::http::dishes::get_dish,
        crate::inbound::http::dishes::create_dish,
        crate::inbound::http::dishes::list_dish_ingredients,
        crate::inbound::http::dishes::add_dish_ingredient,
        crate::inbound::http::cart::list_cart,
        crate::inbound::http::cart::add_cart_item,
        crate::inbound::http::cart::adjust_cart_item,
        crate::inbound::http::cart::remove_cart_item,
        crate::inbound::http::cart::clear_cart,
        crate::inbound::http::favourites::list_favourites,
        crate::inbound::http::favourites::add_favourite,
        crate::inbound::http::favourites::remove_favourite,
        crate::inbound::http::statistics::list_usage,
        crate::inbound::http::statistics::record_usage,
        crate::inbound::http::statistics::remove_usage,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "session", description = "Sign in and out"),
        (name = "users", description = "Registration and profile"),
        (name = "ingredients", description = "Ingredient catalogue"),
        (name = "dishes", description = "Dishes and their ingredient lines"),
        (name = "cart", description = "Per-user ingredient cart"),
        (name = "favourites", description = "Per-user dish bookmarks"),
        (name = "statistics", description = "Per-user dish usage log"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
