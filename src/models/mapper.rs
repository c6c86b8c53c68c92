//! Conversion between the API shape of an event and its `events` table row.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::event::{Event, EventChanges, EventStatus};

/// Column list shared by every statement that returns an event row.
pub const EVENT_COLUMNS: &str = "id, title, slug, description, start_date, end_date, status, \
     location, cta_text, cta_url, is_featured, created_at, updated_at";

/// An `events` row in storage naming.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct EventRecord {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub status: EventStatus,
    pub location: Option<String>,
    pub cta_text: Option<String>,
    pub cta_url: Option<String>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Text(String),
    NullableText(Option<String>),
    Timestamp(DateTime<Utc>),
    Status(EventStatus),
    Flag(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorageField {
    pub column: &'static str,
    pub value: ColumnValue,
}

/// Only the provided fields, keyed by column name.
pub fn to_storage(changes: &EventChanges) -> Vec<StorageField> {
    let mut fields = Vec::new();
    let mut push = |column, value| fields.push(StorageField { column, value });

    if let Some(title) = &changes.title {
        push("title", ColumnValue::Text(title.clone()));
    }
    if let Some(slug) = &changes.slug {
        push("slug", ColumnValue::Text(slug.clone()));
    }
    if let Some(description) = &changes.description {
        push("description", ColumnValue::Text(description.clone()));
    }
    if let Some(start_date) = changes.start_date {
        push("start_date", ColumnValue::Timestamp(start_date));
    }
    if let Some(end_date) = changes.end_date {
        push("end_date", ColumnValue::Timestamp(end_date));
    }
    if let Some(status) = changes.status {
        push("status", ColumnValue::Status(status));
    }
    if let Some(location) = &changes.location {
        push("location", ColumnValue::NullableText(location.clone()));
    }
    if let Some(cta_text) = &changes.cta_text {
        push("cta_text", ColumnValue::NullableText(cta_text.clone()));
    }
    if let Some(cta_url) = &changes.cta_url {
        push("cta_url", ColumnValue::NullableText(cta_url.clone()));
    }
    if let Some(is_featured) = changes.is_featured {
        push("is_featured", ColumnValue::Flag(is_featured));
    }

    fields
}

pub fn from_storage(record: EventRecord) -> Event {
    Event {
        id: record.id,
        title: record.title,
        slug: record.slug,
        description: record.description,
        start_date: record.start_date,
        end_date: record.end_date,
        status: record.status,
        location: record.location,
        cta_text: record.cta_text,
        cta_url: record.cta_url,
        is_featured: record.is_featured,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

impl EventRecord {
    /// Builds a fresh row the way the `events` table defaults would.
    pub fn from_fields(id: Uuid, now: DateTime<Utc>, fields: &[StorageField]) -> Self {
        let mut record = EventRecord {
            id,
            title: String::new(),
            slug: String::new(),
            description: String::new(),
            start_date: now,
            end_date: now,
            status: EventStatus::Draft,
            location: None,
            cta_text: None,
            cta_url: None,
            is_featured: false,
            created_at: now,
            updated_at: now,
        };
        record.apply(fields);
        record
    }

    /// Writes each field into its column. Unknown columns are ignored.
    pub fn apply(&mut self, fields: &[StorageField]) {
        for field in fields {
            match (field.column, &field.value) {
                ("title", ColumnValue::Text(v)) => self.title = v.clone(),
                ("slug", ColumnValue::Text(v)) => self.slug = v.clone(),
                ("description", ColumnValue::Text(v)) => self.description = v.clone(),
                ("start_date", ColumnValue::Timestamp(v)) => self.start_date = *v,
                ("end_date", ColumnValue::Timestamp(v)) => self.end_date = *v,
                ("status", ColumnValue::Status(v)) => self.status = *v,
                ("location", ColumnValue::NullableText(v)) => self.location = v.clone(),
                ("cta_text", ColumnValue::NullableText(v)) => self.cta_text = v.clone(),
                ("cta_url", ColumnValue::NullableText(v)) => self.cta_url = v.clone(),
                ("is_featured", ColumnValue::Flag(v)) => self.is_featured = *v,
                _ => {}
            }
        }
    }
}
