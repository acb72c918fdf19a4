//! User registration and profile.
//!
//! ```text
//! POST /api/v1/users          Register with a user name and e-mail
//! GET  /api/v1/users/profile  The signed-in user's profile
//! ```
//!
//! Registering does not sign the user in; clients follow up with
//! `POST /api/v1/session`.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, User, map_directory_error, register_user};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_email};

/// Registration request body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserBody {
    #[schema(example = "Ada")]
    pub user_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
}

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub user_name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            user_name: user.user_name,
            email: user.email.to_string(),
        }
    }
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterUserBody,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Blank or overlong name, malformed e-mail", body = ErrorSchema),
        (status = 409, description = "E-mail already registered", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUserBody>,
) -> ApiResult<HttpResponse> {
    let email = parse_email(&payload.email, FieldName::new("email"))?;
    let user = register_user(state.users.as_ref(), &payload.user_name, email).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Fetch the signed-in user's profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/profile",
    responses(
        (status = 200, description = "Profile", body = UserResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Session user no longer exists", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getProfile",
    security(("SessionCookie" = []))
)]
#[get("/users/profile")]
pub async fn profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    let user = state
        .users
        .find_by_id(&user_id)
        .await
        .map_err(map_directory_error)?
        .ok_or_else(|| Error::not_found("user not found"))?;
    Ok(web::Json(user.into()))
}
