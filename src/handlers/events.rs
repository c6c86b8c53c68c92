use axum::{
    extract::{Path, State},
    response::Response,
    Extension,
};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{CreateEvent, EventChanges, UpdateDates};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::jwt::AuthClaims;
use crate::utils::response::{created, success};
use crate::validation::ValidatedJson;

#[derive(Serialize)]
struct DeletedEvent {
    id: Uuid,
}

/// Ids that are not UUIDs cannot match any event.
fn event_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::event_not_found(raw))
}

/// GET /api/events
pub async fn list_events(State(state): State<AppState>) -> AppResult<Response> {
    let events = state.events.list_public().await?;
    Ok(success(events, "Events retrieved successfully"))
}

/// GET /api/events/:id
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let event = state.events.get_by_id(event_id(&id)?, false).await?;
    Ok(success(event, "Event retrieved successfully"))
}

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthClaims>,
    ValidatedJson(input): ValidatedJson<CreateEvent>,
) -> AppResult<Response> {
    let event = state.events.create(input).await?;
    tracing::info!(admin = %admin.username, event_id = %event.id, "Admin created event");
    Ok(created(event, "Event created successfully"))
}

/// PUT /api/events/:id
pub async fn update_event(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthClaims>,
    Path(id): Path<String>,
    ValidatedJson(changes): ValidatedJson<EventChanges>,
) -> AppResult<Response> {
    let event = state.events.update(event_id(&id)?, changes).await?;
    tracing::info!(admin = %admin.username, event_id = %event.id, "Admin updated event");
    Ok(success(event, "Event updated successfully"))
}

/// PATCH /api/events/:id/dates
pub async fn update_event_dates(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthClaims>,
    Path(id): Path<String>,
    ValidatedJson(dates): ValidatedJson<UpdateDates>,
) -> AppResult<Response> {
    let event = state
        .events
        .update_dates(event_id(&id)?, dates.start_date, dates.end_date)
        .await?;
    tracing::info!(admin = %admin.username, event_id = %event.id, "Admin moved event dates");
    Ok(success(event, "Event dates updated successfully"))
}

/// DELETE /api/events/:id
pub async fn delete_event(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthClaims>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = event_id(&id)?;
    state.events.delete(id).await?;
    tracing::info!(admin = %admin.username, event_id = %id, "Admin deleted event");
    Ok(success(DeletedEvent { id }, "Event deleted successfully"))
}
