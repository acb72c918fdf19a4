//! Favourite dish endpoints.
//!
//! ```text
//! GET    /api/v1/favourites?email=
//! POST   /api/v1/favourites
//! DELETE /api/v1/favourites/{dish_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DishId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::catalogue_dto::{
    CreatedResponse, DishPath, DishResponse, EmailQuery, dish_list,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

const DISH_ID: FieldName = FieldName::new("dishId");

/// Dish to bookmark.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavouriteBody {
    pub dish_id: String,
}

/// List favourite dishes for the user named by `email`, or the signed-in
/// user when omitted.
#[utoipa::path(
    get,
    path = "/api/v1/favourites",
    params(("email" = Option<String>, Query, description = "Owner of the favourites")),
    responses(
        (status = 200, description = "Favourite dishes in bookmark order", body = [DishResponse]),
        (status = 401, description = "No e-mail and no session", body = ErrorSchema),
        (status = 404, description = "Unknown e-mail", body = ErrorSchema)
    ),
    tags = ["favourites"],
    operation_id = "listFavourites",
    security([], ("SessionCookie" = []))
)]
#[get("/favourites")]
pub async fn list_favourites(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<EmailQuery>,
) -> ApiResult<web::Json<Vec<DishResponse>>> {
    let user = session.user_ref_or(query.email.as_deref())?;
    let views = state.favourites_query.list_favourites(&user).await?;
    Ok(web::Json(dish_list(views)))
}

/// Bookmark a dish.
#[utoipa::path(
    post,
    path = "/api/v1/favourites",
    request_body = FavouriteBody,
    responses(
        (status = 201, description = "Bookmark created", body = CreatedResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown dish", body = ErrorSchema),
        (status = 409, description = "Already a favourite", body = ErrorSchema)
    ),
    tags = ["favourites"],
    operation_id = "addFavourite",
    security(("SessionCookie" = []))
)]
#[post("/favourites")]
pub async fn add_favourite(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<FavouriteBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let dish_id: DishId = parse_id(&payload.dish_id, DISH_ID)?;
    let id = state.favourites.add_favourite(&user_id, &dish_id).await?;
    Ok(HttpResponse::Created().json(CreatedResponse::new(id)))
}

/// Remove a bookmark.
#[utoipa::path(
    delete,
    path = "/api/v1/favourites/{dish_id}",
    params(("dish_id" = String, Path, description = "Dish identifier")),
    responses(
        (status = 204, description = "Bookmark removed"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not a favourite", body = ErrorSchema)
    ),
    tags = ["favourites"],
    operation_id = "removeFavourite",
    security(("SessionCookie" = []))
)]
#[delete("/favourites/{dish_id}")]
pub async fn remove_favourite(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<DishPath>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let dish_id: DishId = parse_id(&path.dish_id, DISH_ID)?;
    state.favourites.remove_favourite(&user_id, &dish_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
