//! Port onto the user directory: registration plus lookups by id and
//! e-mail.

use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// Directory connection could not be established.
        Connection { message: String } =>
            "user directory connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } =>
            "user directory query failed: {message}",
        /// Another user already holds the e-mail address.
        DuplicateEmail { email: String } =>
            "email {email} is already registered",
    }
}

/// Port for resolving registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Store a new user, failing with `DuplicateEmail` when the address is
    /// taken.
    async fn register(&self, user: &User) -> Result<(), UserDirectoryError>;

    /// Look up a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserDirectoryError>;

    /// Look up a user by normalised e-mail address.
    async fn find_by_email(&self, email: &EmailAddress)
    -> Result<Option<User>, UserDirectoryError>;
}

/// Fixture directory that knows no users.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn register(&self, _user: &User) -> Result<(), UserDirectoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, UserDirectoryError> {
        Ok(None)
    }

    async fn find_by_email(
        &self,
        _email: &EmailAddress,
    ) -> Result<Option<User>, UserDirectoryError> {
        Ok(None)
    }
}
