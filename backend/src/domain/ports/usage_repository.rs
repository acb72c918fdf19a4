//! Port for the append-only usage statistics log.

use async_trait::async_trait;

use crate::domain::{UsageEvent, UsageEventId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by usage repository adapters.
    pub enum UsageRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "usage repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "usage repository query failed: {message}",
        /// The referenced dish does not exist.
        DishNotFound => "dish not found",
    }
}

/// Port for usage event storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsageRepository: Send + Sync {
    /// Append an event.
    async fn record(&self, event: &UsageEvent) -> Result<(), UsageRepositoryError>;

    /// List the user's events ordered by creation time.
    async fn list_for_user(&self, user_id: &UserId)
    -> Result<Vec<UsageEvent>, UsageRepositoryError>;

    /// Delete an event owned by `user_id`. Returns whether a row was removed.
    async fn remove(
        &self,
        event_id: &UsageEventId,
        user_id: &UserId,
    ) -> Result<bool, UsageRepositoryError>;
}

/// Fixture implementation with an empty log.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUsageRepository;

#[async_trait]
impl UsageRepository for FixtureUsageRepository {
    async fn record(&self, _event: &UsageEvent) -> Result<(), UsageRepositoryError> {
        Ok(())
    }

    async fn list_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<UsageEvent>, UsageRepositoryError> {
        Ok(Vec::new())
    }

    async fn remove(
        &self,
        _event_id: &UsageEventId,
        _user_id: &UserId,
    ) -> Result<bool, UsageRepositoryError> {
        Ok(false)
    }
}
