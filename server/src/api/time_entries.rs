use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{NaiveDateTime, Utc};
use entity::time_entry::{self, EntryKind};
use platform_api::{Envelope, ErrorList, Page};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ConnectionTrait, IntoActiveModel, Order};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    http::{ApiError, ApiResult, AppState},
    store,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Deserialize)]
pub struct TimeEntryPayload {
    pub id: Option<i64>,
    /// `%Y-%m-%d %H:%M:%S`
    pub recorded_at: String,
    pub kind: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub employee_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct TimeEntryDto {
    pub id: i64,
    pub recorded_at: String,
    pub kind: &'static str,
    pub description: Option<String>,
    pub location: Option<String>,
    pub employee_id: i64,
}

impl From<time_entry::Model> for TimeEntryDto {
    fn from(model: time_entry::Model) -> Self {
        Self {
            id: model.id,
            recorded_at: model.recorded_at.format(TIMESTAMP_FORMAT).to_string(),
            kind: model.kind.as_str(),
            description: model.description,
            location: model.location,
            employee_id: model.employee_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_sort")]
    pub sort: String,
    #[serde(default = "default_dir")]
    pub dir: String,
}

fn default_sort() -> String {
    "id".into()
}

fn default_dir() -> String {
    "desc".into()
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<TimeEntryPayload>,
) -> ApiResult<(StatusCode, Json<Envelope<TimeEntryDto>>)> {
    info!(employee_id = ?payload.employee_id, "creating time entry");
    // The create path never upserts: a client-supplied id is ignored.
    let payload = TimeEntryPayload {
        id: None,
        ..payload
    };

    let mut errors = ErrorList::new();
    validate_employee(&state.pool, &payload, &mut errors).await?;
    let mut entry = entry_from_payload(&state.pool, &payload, &mut errors).await?;

    if !errors.is_empty() {
        warn!(errors = ?errors.messages(), "time entry rejected");
        return Ok((StatusCode::BAD_REQUEST, Json(Envelope::rejected(errors))));
    }

    let now = Utc::now();
    entry.created_at = Set(now.into());
    entry.updated_at = Set(now.into());
    let saved = entry.insert(&state.pool).await?;
    Ok((StatusCode::OK, Json(Envelope::ok(saved.into()))))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<TimeEntryPayload>,
) -> ApiResult<(StatusCode, Json<Envelope<TimeEntryDto>>)> {
    info!(id, "updating time entry");
    // The path id wins over whatever the payload carries.
    let payload = TimeEntryPayload {
        id: Some(id),
        ..payload
    };

    let mut errors = ErrorList::new();
    validate_employee(&state.pool, &payload, &mut errors).await?;
    let mut entry = entry_from_payload(&state.pool, &payload, &mut errors).await?;

    if !errors.is_empty() {
        warn!(errors = ?errors.messages(), "time entry update rejected");
        return Ok((StatusCode::BAD_REQUEST, Json(Envelope::rejected(errors))));
    }

    entry.updated_at = Set(Utc::now().into());
    let saved = entry.update(&state.pool).await?;
    Ok((StatusCode::OK, Json(Envelope::ok(saved.into()))))
}

pub async fn find_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<(StatusCode, Json<Envelope<TimeEntryDto>>)> {
    info!(id, "looking up time entry");
    match store::time_entries::find_by_id(&state.pool, id).await? {
        Some(entry) => Ok((StatusCode::OK, Json(Envelope::ok(entry.into())))),
        None => Ok((
            StatusCode::BAD_REQUEST,
            Json(Envelope::error(format!("Time entry not found for id {id}."))),
        )),
    }
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<(StatusCode, Json<Envelope<()>>)> {
    info!(id, "removing time entry");
    if store::time_entries::find_by_id(&state.pool, id).await?.is_none() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(Envelope::error(format!(
                "Cannot remove: time entry not found for id {id}."
            ))),
        ));
    }
    store::time_entries::delete_by_id(&state.pool, id).await?;
    Ok((StatusCode::OK, Json(Envelope::empty())))
}

pub async fn list_by_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<i64>,
    Query(params): Query<ListParams>,
) -> ApiResult<(StatusCode, Json<Envelope<Page<TimeEntryDto>>>)> {
    info!(employee_id, page = params.page, "listing time entries");
    let mut errors = ErrorList::new();
    let sort = sort_column(&params.sort);
    if sort.is_none() {
        errors.add(format!("Invalid sort field {}.", params.sort));
    }
    let order = sort_order(&params.dir);
    if order.is_none() {
        errors.add(format!("Invalid sort direction {}.", params.dir));
    }
    let (Some(sort), Some(order)) = (sort, order) else {
        return Ok((StatusCode::BAD_REQUEST, Json(Envelope::rejected(errors))));
    };

    let page = store::time_entries::page_by_employee(
        &state.pool,
        employee_id,
        params.page,
        state.config.page_size,
        sort,
        order,
    )
    .await?;
    Ok((StatusCode::OK, Json(Envelope::ok(page.map(Into::into)))))
}

/// A time entry must reference an existing employee. The lookup is skipped
/// when the id is structurally absent, which is already an error on its own.
async fn validate_employee<C: ConnectionTrait>(
    db: &C,
    payload: &TimeEntryPayload,
    errors: &mut ErrorList,
) -> Result<(), ApiError> {
    let Some(employee_id) = payload.employee_id else {
        errors.add("Employee id not supplied.");
        return Ok(());
    };
    if store::employees::find_by_id(db, employee_id).await?.is_none() {
        errors.add(format!("Employee not found for id {employee_id}."));
    }
    Ok(())
}

/// Builds the entry to persist. With an id the existing record is fetched
/// and mutated in place, preserving its owning employee; without one a fresh
/// record is constructed from the payload.
async fn entry_from_payload<C: ConnectionTrait>(
    db: &C,
    payload: &TimeEntryPayload,
    errors: &mut ErrorList,
) -> Result<time_entry::ActiveModel, ApiError> {
    let mut entry = match payload.id {
        Some(id) => match store::time_entries::find_by_id(db, id).await? {
            Some(existing) => existing.into_active_model(),
            None => {
                errors.add(format!("Time entry not found for id {id}."));
                <time_entry::ActiveModel as Default>::default()
            }
        },
        None => {
            let mut fresh = <time_entry::ActiveModel as Default>::default();
            if let Some(employee_id) = payload.employee_id {
                fresh.employee_id = Set(employee_id);
            }
            fresh
        }
    };

    entry.recorded_at = Set(parse_timestamp(&payload.recorded_at)?);
    entry.description = Set(payload.description.clone());
    entry.location = Set(payload.location.clone());
    match EntryKind::parse(&payload.kind) {
        Some(kind) => entry.kind = Set(kind),
        None => errors.add(format!("Invalid entry kind {}.", payload.kind)),
    }

    Ok(entry)
}

/// No partial record is usable without a valid timestamp, so a parse
/// failure is a fault rather than an accumulated validation error.
fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ApiError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|_| {
        ApiError::InvalidTimestamp {
            value: value.to_string(),
        }
    })
}

fn sort_column(name: &str) -> Option<time_entry::Column> {
    match name {
        "id" => Some(time_entry::Column::Id),
        "recorded_at" => Some(time_entry::Column::RecordedAt),
        "kind" => Some(time_entry::Column::Kind),
        _ => None,
    }
}

fn sort_order(dir: &str) -> Option<Order> {
    match dir.to_ascii_lowercase().as_str() {
        "asc" => Some(Order::Asc),
        "desc" => Some(Order::Desc),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_round_trips_through_the_wire_format() {
        let parsed = parse_timestamp("2026-01-10 08:30:00").unwrap();
        assert_eq!(
            parsed.format(TIMESTAMP_FORMAT).to_string(),
            "2026-01-10 08:30:00"
        );
    }

    #[test]
    fn malformed_timestamp_is_a_fault() {
        assert!(matches!(
            parse_timestamp("10/01/2026 08:30"),
            Err(ApiError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn sort_whitelist_rejects_unknown_columns() {
        assert!(sort_column("id").is_some());
        assert!(sort_column("recorded_at").is_some());
        assert!(sort_column("password_hash").is_none());
    }

    #[test]
    fn sort_direction_is_case_insensitive() {
        assert!(matches!(sort_order("ASC"), Some(Order::Asc)));
        assert!(matches!(sort_order("desc"), Some(Order::Desc)));
        assert!(sort_order("sideways").is_none());
    }
}
