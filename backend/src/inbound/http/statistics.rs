//! Usage statistics endpoints.
//!
//! ```text
//! GET    /api/v1/statistics
//! POST   /api/v1/statistics
//! DELETE /api/v1/statistics/{event_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DishId, UsageEventId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::catalogue_dto::{CreatedResponse, UsageEntryResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

#[derive(Debug, Deserialize)]
struct EventPath {
    event_id: String,
}

/// Dish that was cooked.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageBody {
    pub dish_id: String,
}

/// List the signed-in user's usage events with their dishes.
#[utoipa::path(
    get,
    path = "/api/v1/statistics",
    responses(
        (status = 200, description = "Usage entries in recording order", body = [UsageEntryResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No usage recorded", body = ErrorSchema)
    ),
    tags = ["statistics"],
    operation_id = "listUsage",
    security(("SessionCookie" = []))
)]
#[get("/statistics")]
pub async fn list_usage(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<UsageEntryResponse>>> {
    let user_id = session.require_user_id()?;
    let entries = state.statistics_query.list_usage(&user_id).await?;
    Ok(web::Json(entries.into_iter().map(Into::into).collect()))
}

/// Record that the signed-in user cooked a dish.
#[utoipa::path(
    post,
    path = "/api/v1/statistics",
    request_body = UsageBody,
    responses(
        (status = 201, description = "Event recorded", body = CreatedResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown dish", body = ErrorSchema)
    ),
    tags = ["statistics"],
    operation_id = "recordUsage",
    security(("SessionCookie" = []))
)]
#[post("/statistics")]
pub async fn record_usage(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UsageBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let dish_id: DishId = parse_id(&payload.dish_id, FieldName::new("dishId"))?;
    let event_id = state.statistics.record_usage(&user_id, &dish_id).await?;
    Ok(HttpResponse::Created().json(CreatedResponse::new(event_id)))
}

/// Delete one of the signed-in user's usage events.
#[utoipa::path(
    delete,
    path = "/api/v1/statistics/{event_id}",
    params(("event_id" = String, Path, description = "Usage event identifier")),
    responses(
        (status = 204, description = "Event removed"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No such event for this user", body = ErrorSchema)
    ),
    tags = ["statistics"],
    operation_id = "removeUsage",
    security(("SessionCookie" = []))
)]
#[delete("/statistics/{event_id}")]
pub async fn remove_usage(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<EventPath>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let event_id: UsageEventId = parse_id(&path.event_id, FieldName::new("eventId"))?;
    state.statistics.remove_usage(&event_id, &user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
