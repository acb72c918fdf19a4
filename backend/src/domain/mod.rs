//! Domain primitives, aggregates and services.
//!
//! Purpose: Define the catalogue, cart, favourites and usage statistics
//! model, the ports that adapters implement, and the services that enforce
//! the consistency rules across them. Types are validated on construction and
//! document their serialisation contracts (serde) in their Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - DishWithIngredients: the single composed dish view used by every read.
//! - Catalogue, cart, favourites and statistics services implementing the
//!   driving ports in [`ports`].

pub mod cart;
pub mod catalogue;
pub mod dish_view;
pub mod error;
pub mod favourites;
pub mod ids;
pub mod ports;
pub mod statistics;
pub mod trace_id;
pub mod user;

mod cart_service;
mod catalogue_service;
mod favourites_service;
mod statistics_service;
mod user_lookup;

pub use self::cart::{
    AdjustOutcome, AdjustmentPlan, CartItem, CartLine, CartValidationError, merged_quantity,
    plan_adjustment, validate_addition,
};
pub use self::cart_service::CartService;
pub use self::catalogue::{
    AssociationQuantity, Category, CatalogueValidationError, Dish, DishDraft, DishIngredient,
    Ingredient, IngredientPortion, Nutrients, SearchTerm,
};
pub use self::catalogue_service::CatalogueService;
pub use self::dish_view::{
    AssociatedLine, DishWithIngredients, IngredientLine, IngredientSummary, sort_lines,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::favourites::Favourite;
pub use self::favourites_service::FavouritesService;
pub use self::ids::{
    CartItemId, DishId, DishIngredientId, FavouriteId, IngredientId, UsageEventId, UserId,
};
pub use self::statistics::{UsageEntry, UsageEvent, join_usage_entries};
pub use self::statistics_service::StatisticsService;
pub use self::trace_id::TraceId;
pub use self::user::{EmailAddress, USER_NAME_MAX, User, UserRef, UserValidationError};
pub(crate) use self::user_lookup::{map_directory_error, register_user};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use foodapp::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
