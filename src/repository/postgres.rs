use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use super::{AdminRepository, EventRepository, StoreResult};
use crate::models::mapper::{ColumnValue, StorageField, EVENT_COLUMNS};
use crate::models::{Admin, EventRecord};

#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_value(builder: &mut QueryBuilder<'_, Postgres>, value: &ColumnValue) {
    match value {
        ColumnValue::Text(v) => builder.push_bind(v.clone()),
        ColumnValue::NullableText(v) => builder.push_bind(v.clone()),
        ColumnValue::Timestamp(v) => builder.push_bind(*v),
        ColumnValue::Status(v) => builder.push_bind(v.as_str()),
        ColumnValue::Flag(v) => builder.push_bind(*v),
    };
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn list_public(&self) -> StoreResult<Vec<EventRecord>> {
        let sql = format!(
            "SELECT {} FROM events WHERE status <> 'draft' ORDER BY start_date ASC",
            EVENT_COLUMNS
        );
        let records = sqlx::query_as::<_, EventRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<EventRecord>> {
        let sql = format!("SELECT {} FROM events WHERE id = $1", EVENT_COLUMNS);
        let record = sqlx::query_as::<_, EventRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn insert(&self, fields: &[StorageField]) -> StoreResult<EventRecord> {
        let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO events (");
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            builder.push(field.column);
        }
        builder.push(") VALUES (");
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            push_value(&mut builder, &field.value);
        }
        builder.push(") RETURNING ").push(EVENT_COLUMNS);

        let record = builder
            .build_query_as::<EventRecord>()
            .fetch_one(&self.pool)
            .await?;

        tracing::info!(event_id = %record.id, slug = %record.slug, "Inserted event");
        Ok(record)
    }

    async fn update(&self, id: Uuid, fields: &[StorageField]) -> StoreResult<Option<EventRecord>> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE events SET ");
        for field in fields {
            builder.push(field.column).push(" = ");
            push_value(&mut builder, &field.value);
            builder.push(", ");
        }
        builder
            .push("updated_at = NOW() WHERE id = ")
            .push_bind(id)
            .push(" RETURNING ")
            .push(EVENT_COLUMNS);

        let record = builder
            .build_query_as::<EventRecord>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Clone)]
pub struct PgAdminRepository {
    pool: PgPool,
}

impl PgAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRepository for PgAdminRepository {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT id, username, password_hash, created_at FROM admin_user WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(admin)
    }
}
