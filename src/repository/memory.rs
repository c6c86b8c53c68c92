use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AdminRepository, EventRepository, StoreError, StoreResult};
use crate::models::mapper::StorageField;
use crate::models::{Admin, EventRecord, EventStatus};

const SLUG_CONSTRAINT: &str = "events_slug_key";

/// In-memory `events` table (for development/testing). Enforces the same
/// unique slug constraint as the Postgres schema.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<HashMap<Uuid, EventRecord>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn slug_taken(events: &HashMap<Uuid, EventRecord>, slug: &str, except: Option<Uuid>) -> bool {
    events
        .values()
        .any(|e| e.slug == slug && Some(e.id) != except)
}

fn slug_violation() -> StoreError {
    StoreError::UniqueViolation {
        constraint: SLUG_CONSTRAINT.to_string(),
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn list_public(&self) -> StoreResult<Vec<EventRecord>> {
        let events = self.events.read().await;
        let mut visible: Vec<EventRecord> = events
            .values()
            .filter(|e| e.status != EventStatus::Draft)
            .cloned()
            .collect();
        visible.sort_by_key(|e| e.start_date);
        Ok(visible)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<EventRecord>> {
        let events = self.events.read().await;
        Ok(events.get(&id).cloned())
    }

    async fn insert(&self, fields: &[StorageField]) -> StoreResult<EventRecord> {
        let mut events = self.events.write().await;
        let record = EventRecord::from_fields(Uuid::new_v4(), Utc::now(), fields);

        if slug_taken(&events, &record.slug, None) {
            return Err(slug_violation());
        }

        events.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: Uuid, fields: &[StorageField]) -> StoreResult<Option<EventRecord>> {
        let mut events = self.events.write().await;
        let Some(existing) = events.get(&id) else {
            return Ok(None);
        };

        let mut record = existing.clone();
        record.apply(fields);
        if slug_taken(&events, &record.slug, Some(id)) {
            return Err(slug_violation());
        }

        record.updated_at = Utc::now();
        events.insert(id, record.clone());
        Ok(Some(record))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut events = self.events.write().await;
        Ok(events.remove(&id).is_some())
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryAdminRepository {
    admins: Arc<RwLock<HashMap<String, Admin>>>,
}

impl InMemoryAdminRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an account with an already-hashed password.
    pub async fn seed(&self, username: &str, password_hash: &str) -> Admin {
        let admin = Admin {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        self.admins
            .write()
            .await
            .insert(admin.username.clone(), admin.clone());
        admin
    }
}

#[async_trait]
impl AdminRepository for InMemoryAdminRepository {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Admin>> {
        let admins = self.admins.read().await;
        Ok(admins.get(username).cloned())
    }
}
