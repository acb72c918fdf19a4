//! Ingredient creation endpoint.
//!
//! ```text
//! POST /api/v1/ingredients
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CreateIngredientRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::catalogue_dto::CreatedResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, decode_base64};

/// Request payload for adding an ingredient.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateIngredientBody {
    #[schema(example = "Pecorino")]
    pub name: String,
    /// Base64 encoded image.
    pub image: Option<String>,
}

/// Add an ingredient to the catalogue.
#[utoipa::path(
    post,
    path = "/api/v1/ingredients",
    request_body = CreateIngredientBody,
    responses(
        (status = 201, description = "Ingredient created", body = CreatedResponse),
        (status = 400, description = "Blank name or malformed image", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "createIngredient",
    security(("SessionCookie" = []))
)]
#[post("/ingredients")]
pub async fn create_ingredient(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateIngredientBody>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let CreateIngredientBody { name, image } = payload.into_inner();
    let request = CreateIngredientRequest {
        name,
        image: decode_base64(image.as_deref(), FieldName::new("image"))?,
    };
    let id = state.catalogue.create_ingredient(request).await?;
    Ok(HttpResponse::Created().json(CreatedResponse::new(id)))
}
