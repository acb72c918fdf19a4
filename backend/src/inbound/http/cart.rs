//! Cart ledger endpoints.
//!
//! ```text
//! GET    /api/v1/cart?email=
//! POST   /api/v1/cart/items
//! PATCH  /api/v1/cart/items
//! DELETE /api/v1/cart/items/{ingredient_id}
//! DELETE /api/v1/cart
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, IngredientId, UserRef, map_directory_error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::catalogue_dto::{
    AdjustResponse, CartLineResponse, CreatedResponse, EmailQuery,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_email, parse_id};

const INGREDIENT_ID: FieldName = FieldName::new("ingredientId");

#[derive(Debug, Deserialize)]
struct IngredientPath {
    ingredient_id: String,
}

/// Quantity to merge into the cart.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemBody {
    pub ingredient_id: String,
    #[schema(example = 2)]
    pub quantity: i32,
}

/// Signed adjustment to a cart row.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjustCartItemBody {
    pub ingredient_id: String,
    #[schema(example = -1)]
    pub delta: i32,
}

/// List the signed-in user's cart.
///
/// `email` may name the caller's own address; any other user's cart is
/// forbidden.
#[utoipa::path(
    get,
    path = "/api/v1/cart",
    params(("email" = Option<String>, Query, description = "Owner of the cart")),
    responses(
        (status = 200, description = "Cart lines", body = [CartLineResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "E-mail belongs to another user", body = ErrorSchema),
        (status = 404, description = "Unknown e-mail", body = ErrorSchema)
    ),
    tags = ["cart"],
    operation_id = "listCart",
    security(("SessionCookie" = []))
)]
#[get("/cart")]
pub async fn list_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<EmailQuery>,
) -> ApiResult<web::Json<Vec<CartLineResponse>>> {
    let user_id = session.require_user_id()?;
    if let Some(raw) = query.email.as_deref() {
        let email = parse_email(raw, FieldName::new("email"))?;
        let owner = state
            .users
            .find_by_email(&email)
            .await
            .map_err(map_directory_error)?
            .ok_or_else(|| Error::not_found(format!("no user with email {email}")))?;
        if owner.id != user_id {
            return Err(Error::forbidden("cannot read another user's cart"));
        }
    }
    let lines = state.cart_query.list_cart(&UserRef::Id(user_id)).await?;
    Ok(web::Json(lines.into_iter().map(Into::into).collect()))
}

/// Add a positive quantity, merging with any existing row.
#[utoipa::path(
    post,
    path = "/api/v1/cart/items",
    request_body = AddCartItemBody,
    responses(
        (status = 201, description = "Row created or merged", body = CreatedResponse),
        (status = 400, description = "Non-positive quantity or overflow", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown ingredient", body = ErrorSchema)
    ),
    tags = ["cart"],
    operation_id = "addCartItem",
    security(("SessionCookie" = []))
)]
#[post("/cart/items")]
pub async fn add_cart_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AddCartItemBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let ingredient_id: IngredientId = parse_id(&payload.ingredient_id, INGREDIENT_ID)?;
    let row_id = state
        .cart
        .add_or_merge(&user_id, &ingredient_id, payload.quantity)
        .await?;
    Ok(HttpResponse::Created().json(CreatedResponse::new(row_id)))
}

/// Apply a signed adjustment; rows that reach zero are removed.
#[utoipa::path(
    patch,
    path = "/api/v1/cart/items",
    request_body = AdjustCartItemBody,
    responses(
        (status = 200, description = "Adjustment outcome", body = AdjustResponse),
        (status = 400, description = "Non-positive delta for a missing row", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown ingredient", body = ErrorSchema)
    ),
    tags = ["cart"],
    operation_id = "adjustCartItem",
    security(("SessionCookie" = []))
)]
#[patch("/cart/items")]
pub async fn adjust_cart_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AdjustCartItemBody>,
) -> ApiResult<web::Json<AdjustResponse>> {
    let user_id = session.require_user_id()?;
    let ingredient_id: IngredientId = parse_id(&payload.ingredient_id, INGREDIENT_ID)?;
    let outcome = state
        .cart
        .adjust_or_remove(&user_id, &ingredient_id, payload.delta)
        .await?;
    Ok(web::Json(outcome.into()))
}

/// Remove one ingredient from the cart.
#[utoipa::path(
    delete,
    path = "/api/v1/cart/items/{ingredient_id}",
    params(("ingredient_id" = String, Path, description = "Ingredient identifier")),
    responses(
        (status = 204, description = "Row removed"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not in the cart", body = ErrorSchema)
    ),
    tags = ["cart"],
    operation_id = "removeCartItem",
    security(("SessionCookie" = []))
)]
#[delete("/cart/items/{ingredient_id}")]
pub async fn remove_cart_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<IngredientPath>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let ingredient_id: IngredientId = parse_id(&path.ingredient_id, INGREDIENT_ID)?;
    state.cart.remove_item(&user_id, &ingredient_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Remove every row from the signed-in user's cart.
#[utoipa::path(
    delete,
    path = "/api/v1/cart",
    responses(
        (status = 204, description = "Cart cleared"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Cart already empty", body = ErrorSchema)
    ),
    tags = ["cart"],
    operation_id = "clearCart",
    security(("SessionCookie" = []))
)]
#[delete("/cart")]
pub async fn clear_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state.cart.clear_cart(&user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
