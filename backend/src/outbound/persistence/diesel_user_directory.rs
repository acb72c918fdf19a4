//! `UserDirectory` over the `users` table.
//!
//! Registration relies on the `users_email_key` unique index over
//! `lower(email)`; a violation means the address is taken.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{EmailAddress, User, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserDirectory` port.
#[derive(Clone)]
pub struct DieselUserDirectory {
    pool: DbPool,
}

impl DieselUserDirectory {
    /// Create a new directory with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserDirectoryError {
    UserDirectoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> UserDirectoryError {
    map_failure(classify_diesel_error(error))
}

fn map_failure(failure: DieselFailure) -> UserDirectoryError {
    match failure {
        DieselFailure::Connection(message) => UserDirectoryError::connection(message),
        DieselFailure::Query(message) => UserDirectoryError::query(message),
        _ => UserDirectoryError::query("database error"),
    }
}

fn is_email_key(constraint: Option<&str>) -> bool {
    constraint.is_some_and(|name| name == "users_email_key")
}

fn convert_row(row: Option<UserRow>) -> Result<Option<User>, UserDirectoryError> {
    row.map(|row| {
        row.into_user().map_err(|message| {
            warn!(%message, "stored user row is malformed");
            UserDirectoryError::query(message)
        })
    })
    .transpose()
}

#[async_trait]
impl UserDirectory for DieselUserDirectory {
    async fn register(&self, user: &User) -> Result<(), UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result = diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .execute(&mut conn)
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(error) => match classify_diesel_error(error) {
                DieselFailure::Unique { constraint } if is_email_key(constraint.as_deref()) => {
                    Err(UserDirectoryError::duplicate_email(user.email.as_ref()))
                }
                failure => Err(map_failure(failure)),
            },
        }
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        convert_row(row)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        convert_row(row)
    }
}
