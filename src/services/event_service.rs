use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::mapper::{to_storage, ColumnValue, StorageField};
use crate::models::{from_storage, CreateEvent, Event, EventChanges};
use crate::repository::{EventRepository, StoreError};
use crate::utils::error::{AppError, AppResult};

/// Event lookups and writes, with slug uniqueness and draft visibility rules.
#[derive(Clone)]
pub struct EventService {
    repository: Arc<dyn EventRepository>,
}

impl EventService {
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_public(&self) -> AppResult<Vec<Event>> {
        let records = self.repository.list_public().await?;
        Ok(records.into_iter().map(from_storage).collect())
    }

    /// With `include_private` off, a draft is reported as not found.
    pub async fn get_by_id(&self, id: Uuid, include_private: bool) -> AppResult<Event> {
        let event = self
            .repository
            .find_by_id(id)
            .await?
            .map(from_storage)
            .filter(|event| include_private || event.status.is_public())
            .ok_or_else(|| AppError::event_not_found(id))?;

        Ok(event)
    }

    pub async fn create(&self, input: CreateEvent) -> AppResult<Event> {
        let slug = input.slug.clone();
        let fields = to_storage(&input.into());

        let record = self
            .repository
            .insert(&fields)
            .await
            .map_err(|e| slug_conflict(e, Some(&slug)))?;

        tracing::info!(event_id = %record.id, slug = %record.slug, "Event created");
        Ok(from_storage(record))
    }

    pub async fn update(&self, id: Uuid, changes: EventChanges) -> AppResult<Event> {
        if changes.is_empty() {
            return self.get_by_id(id, true).await;
        }

        let fields = to_storage(&changes);
        let record = self
            .repository
            .update(id, &fields)
            .await
            .map_err(|e| slug_conflict(e, changes.slug.as_deref()))?
            .ok_or_else(|| AppError::event_not_found(id))?;

        tracing::info!(event_id = %id, columns = fields.len(), "Event updated");
        Ok(from_storage(record))
    }

    /// Touches only the two date columns. Ordering is checked by the caller.
    pub async fn update_dates(
        &self,
        id: Uuid,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> AppResult<Event> {
        let fields = [
            StorageField {
                column: "start_date",
                value: ColumnValue::Timestamp(start_date),
            },
            StorageField {
                column: "end_date",
                value: ColumnValue::Timestamp(end_date),
            },
        ];

        let record = self
            .repository
            .update(id, &fields)
            .await?
            .ok_or_else(|| AppError::event_not_found(id))?;

        Ok(from_storage(record))
    }

    /// Deleting an id that does not exist is reported as not found.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::event_not_found(id));
        }

        tracing::info!(event_id = %id, "Event deleted");
        Ok(())
    }
}

fn slug_conflict(err: StoreError, slug: Option<&str>) -> AppError {
    match (err, slug) {
        (StoreError::UniqueViolation { .. }, Some(slug)) => AppError::Conflict(slug.to_string()),
        (err, _) => AppError::Infrastructure(err),
    }
}
