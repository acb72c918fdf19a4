//! Dish usage statistics.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::catalogue_service::{load_dish_views, map_dish_error};
use crate::domain::ports::{
    DishRepository, StatisticsCommand, StatisticsQuery, UsageRepository, UsageRepositoryError,
};
use crate::domain::{
    DishId, Error, UsageEntry, UsageEvent, UsageEventId, UserId, join_usage_entries,
};

/// Statistics service implementing [`StatisticsCommand`] and
/// [`StatisticsQuery`].
#[derive(Clone)]
pub struct StatisticsService<S, D> {
    usage_repo: Arc<S>,
    dish_repo: Arc<D>,
}

impl<S, D> StatisticsService<S, D> {
    /// Create a new service.
    pub fn new(usage_repo: Arc<S>, dish_repo: Arc<D>) -> Self {
        Self {
            usage_repo,
            dish_repo,
        }
    }
}

fn map_usage_error(error: UsageRepositoryError) -> Error {
    match error {
        UsageRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("usage repository unavailable: {message}"))
        }
        UsageRepositoryError::Query { message } => {
            Error::internal(format!("usage repository error: {message}"))
        }
        UsageRepositoryError::DishNotFound => Error::not_found("dish not found"),
    }
}

#[async_trait]
impl<S, D> StatisticsCommand for StatisticsService<S, D>
where
    S: UsageRepository,
    D: DishRepository,
{
    async fn record_usage(
        &self,
        user_id: &UserId,
        dish_id: &DishId,
    ) -> Result<UsageEventId, Error> {
        let event = UsageEvent::new(*user_id, *dish_id, Utc::now());
        self.usage_repo
            .record(&event)
            .await
            .map_err(map_usage_error)?;
        Ok(event.id)
    }

    async fn remove_usage(&self, event_id: &UsageEventId, user_id: &UserId) -> Result<(), Error> {
        let removed = self
            .usage_repo
            .remove(event_id, user_id)
            .await
            .map_err(map_usage_error)?;
        if removed {
            Ok(())
        } else {
            Err(Error::not_found("usage event not found"))
        }
    }
}

#[async_trait]
impl<S, D> StatisticsQuery for StatisticsService<S, D>
where
    S: UsageRepository,
    D: DishRepository,
{
    async fn list_usage(&self, user_id: &UserId) -> Result<Vec<UsageEntry>, Error> {
        let events = self
            .usage_repo
            .list_for_user(user_id)
            .await
            .map_err(map_usage_error)?;
        if events.is_empty() {
            return Err(Error::not_found("no usage statistics recorded"));
        }

        let dish_ids: Vec<DishId> = events
            .iter()
            .map(|event| event.dish_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let dishes = self
            .dish_repo
            .find_many(&dish_ids)
            .await
            .map_err(map_dish_error)?;
        let views = load_dish_views(self.dish_repo.as_ref(), dishes).await?;
        Ok(join_usage_entries(events, views))
    }
}

#[cfg(test)]
#[path = "statistics_service_tests.rs"]
mod tests;
