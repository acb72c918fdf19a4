//! User directory data model.
//!
//! Users register with a display name and an e-mail address. The address is
//! the sign-in key, so it is normalised and unique across the directory.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::UserId;

/// Longest accepted user name, in characters.
pub const USER_NAME_MAX: usize = 64;

/// Validation errors returned by [`EmailAddress::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The address was blank.
    #[error("email must not be empty")]
    EmptyEmail,
    /// The address lacked a local part, domain, or `@` separator.
    #[error("email must look like local@domain")]
    MalformedEmail,
    /// The user name was blank.
    #[error("user name must not be empty")]
    EmptyUserName,
    /// The user name exceeded [`USER_NAME_MAX`] characters.
    #[error("user name must be at most {max} characters")]
    UserNameTooLong { max: usize },
}

/// Normalised e-mail address used as a lookup key.
///
/// Addresses are trimmed and lower-cased so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and normalise an e-mail address.
    ///
    /// # Examples
    /// ```
    /// use foodapp::domain::EmailAddress;
    ///
    /// let email = EmailAddress::new("  Ada@Example.com ").expect("valid email");
    /// assert_eq!(email.as_ref(), "ada@example.com");
    /// ```
    pub fn new(value: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        match trimmed.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(trimmed.to_lowercase()))
            }
            _ => Err(UserValidationError::MalformedEmail),
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Read model of a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub user_name: String,
    pub email: EmailAddress,
}

impl User {
    /// Build a new user with a fresh identifier.
    ///
    /// The name is trimmed before its length is checked.
    pub fn register(
        user_name: impl AsRef<str>,
        email: EmailAddress,
    ) -> Result<Self, UserValidationError> {
        let user_name = user_name.as_ref().trim();
        if user_name.is_empty() {
            return Err(UserValidationError::EmptyUserName);
        }
        if user_name.chars().count() > USER_NAME_MAX {
            return Err(UserValidationError::UserNameTooLong {
                max: USER_NAME_MAX,
            });
        }
        Ok(Self {
            id: UserId::random(),
            user_name: user_name.to_owned(),
            email,
        })
    }
}

/// Reference to a user either by identifier or by e-mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRef {
    /// The identifier carried by the authenticated session.
    Id(UserId),
    /// An e-mail address resolved through the user directory.
    Email(EmailAddress),
}

impl From<UserId> for UserRef {
    fn from(value: UserId) -> Self {
        Self::Id(value)
    }
}
