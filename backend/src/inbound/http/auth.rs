//! Session sign-in and sign-out.
//!
//! ```text
//! POST   /api/v1/session  Sign in as a known user by e-mail
//! DELETE /api/v1/session  Sign out
//! ```
//!
//! There are no credentials; signing in only checks that the e-mail belongs
//! to a user registered through `POST /api/v1/users`.

use actix_web::{HttpResponse, delete, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, map_directory_error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::UserResponse;
use crate::inbound::http::validation::{FieldName, parse_email};

/// Sign-in request body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SignInRequest {
    #[schema(example = "chef@example.com")]
    pub email: String,
}

/// Sign in by e-mail and set the session cookie.
#[utoipa::path(
    post,
    path = "/api/v1/session",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Malformed e-mail", body = ErrorSchema),
        (status = 401, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["session"],
    operation_id = "signIn",
    security([])
)]
#[post("/session")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignInRequest>,
) -> ApiResult<HttpResponse> {
    let email = parse_email(&payload.email, FieldName::new("email"))?;
    let user = state
        .users
        .find_by_email(&email)
        .await
        .map_err(map_directory_error)?
        .ok_or_else(|| Error::unauthorized("unknown user"))?;
    session.persist_user(&user.id)?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// Clear the session cookie.
#[utoipa::path(
    delete,
    path = "/api/v1/session",
    responses((status = 204, description = "Signed out")),
    tags = ["session"],
    operation_id = "signOut",
    security([])
)]
#[delete("/session")]
pub async fn sign_out(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}
