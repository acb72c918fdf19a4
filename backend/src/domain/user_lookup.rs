//! Resolution of [`UserRef`] values against the user directory, and
//! registration of new users.

use serde_json::json;
use tracing::info;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{EmailAddress, Error, User, UserId, UserRef, UserValidationError};

pub(crate) fn map_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserDirectoryError::Query { message } => {
            Error::internal(format!("user directory error: {message}"))
        }
        UserDirectoryError::DuplicateEmail { email } => {
            Error::conflict(format!("email {email} is already registered"))
        }
    }
}

fn map_user_validation_error(error: UserValidationError) -> Error {
    let (field, code) = match error {
        UserValidationError::EmptyEmail | UserValidationError::MalformedEmail => {
            ("email", "invalid_email")
        }
        UserValidationError::EmptyUserName | UserValidationError::UserNameTooLong { .. } => {
            ("userName", "invalid_user_name")
        }
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": field,
        "code": code,
    }))
}

/// Validate and store a new user.
///
/// A taken e-mail address yields a conflict.
pub(crate) async fn register_user<U>(
    directory: &U,
    user_name: &str,
    email: EmailAddress,
) -> Result<User, Error>
where
    U: UserDirectory + ?Sized,
{
    let user = User::register(user_name, email).map_err(map_user_validation_error)?;
    directory
        .register(&user)
        .await
        .map_err(map_directory_error)?;
    info!(user_id = %user.id, "registered user");
    Ok(user)
}

/// Turn a user reference into an identifier.
///
/// Identifiers are trusted as-is; they come from the authenticated session.
/// E-mail references are looked up and yield not-found when unknown.
pub(crate) async fn resolve_user_ref<U>(directory: &U, user: &UserRef) -> Result<UserId, Error>
where
    U: UserDirectory + ?Sized,
{
    match user {
        UserRef::Id(id) => Ok(*id),
        UserRef::Email(email) => directory
            .find_by_email(email)
            .await
            .map_err(map_directory_error)?
            .map(|found| found.id)
            .ok_or_else(|| Error::not_found(format!("no user with email {email}"))),
    }
}
