//! PostgreSQL-backed usage statistics log.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UsageRepository, UsageRepositoryError};
use crate::domain::{UsageEvent, UsageEventId, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::UsageEventRow;
use super::pool::{DbPool, PoolError};
use super::schema::usage_events;

/// Diesel-backed implementation of the `UsageRepository` port.
#[derive(Clone)]
pub struct DieselUsageRepository {
    pool: DbPool,
}

impl DieselUsageRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UsageRepositoryError {
    UsageRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> UsageRepositoryError {
    let failure = classify_diesel_error(error);
    if failure.is_foreign_key_on("dish_id") {
        return UsageRepositoryError::dish_not_found();
    }
    match failure {
        DieselFailure::Connection(message) => UsageRepositoryError::connection(message),
        DieselFailure::Query(message) => UsageRepositoryError::query(message),
        DieselFailure::ForeignKey { .. } => UsageRepositoryError::query("unknown user"),
        DieselFailure::Unique { .. } | DieselFailure::Check { .. } | DieselFailure::OutOfRange => {
            UsageRepositoryError::query("constraint violation")
        }
    }
}

#[async_trait]
impl UsageRepository for DieselUsageRepository {
    async fn record(&self, event: &UsageEvent) -> Result<(), UsageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(usage_events::table)
            .values(UsageEventRow::from(event))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UsageEvent>, UsageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UsageEventRow> = usage_events::table
            .filter(usage_events::user_id.eq(user_id.as_uuid()))
            .select(UsageEventRow::as_select())
            .order_by((usage_events::created_at, usage_events::id))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(UsageEvent::from).collect())
    }

    async fn remove(
        &self,
        event_id: &UsageEventId,
        user_id: &UserId,
    ) -> Result<bool, UsageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Scoped to the owner so users cannot delete each other's events.
        let removed = diesel::delete(
            usage_events::table
                .filter(usage_events::id.eq(event_id.as_uuid()))
                .filter(usage_events::user_id.eq(user_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }
}
