use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::auth::AdminToken;
use super::signups_to_csv;
use crate::errors::AppError;
use crate::insights::{EventSummary, ReferralRank, SignupFilter};
use crate::models::content::{FieldNote, Testimonial};
use crate::models::signup::Signup;
use crate::state::AppState;
use crate::store::{FieldNotePatch, NewFieldNote, NewTestimonial, TestimonialPatch};

const LEADERBOARD_LIMIT: usize = 10;

#[derive(Deserialize)]
pub struct SignupListQuery {
    size: Option<String>,
    confirmed: Option<bool>,
    start: Option<String>,
    end: Option<String>,
}

fn filter_from_query(query: SignupListQuery) -> Result<SignupFilter, AppError> {
    Ok(SignupFilter {
        size: query.size,
        confirmed: query.confirmed,
        start: parse_bound(query.start, "start")?,
        end: parse_bound(query.end, "end")?,
    })
}

fn parse_bound(value: Option<String>, name: &str) -> Result<Option<DateTime<Utc>>, AppError> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|_| AppError::Validation(format!("{name} must be an RFC 3339 timestamp")))
        })
        .transpose()
}

/// GET /api/admin/signups
pub async fn handle_list_signups(
    _admin: AdminToken,
    State(state): State<AppState>,
    Query(query): Query<SignupListQuery>,
) -> Result<Json<Vec<Signup>>, AppError> {
    let filter = filter_from_query(query)?;
    Ok(Json(state.store.list_signups(&filter)))
}

/// GET /api/admin/export. The full collection as a CSV attachment.
pub async fn handle_export_csv(
    _admin: AdminToken,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let csv = signups_to_csv(&state.store.list_signups(&SignupFilter::default()));
    (
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"snooom-signups.csv\"",
            ),
        ],
        csv,
    )
}

/// GET /api/admin/referrals
pub async fn handle_referral_leaderboard(
    _admin: AdminToken,
    State(state): State<AppState>,
) -> Json<Vec<ReferralRank>> {
    Json(state.store.referral_leaderboard(LEADERBOARD_LIMIT))
}

/// GET /api/admin/events
pub async fn handle_event_summary(
    _admin: AdminToken,
    State(state): State<AppState>,
) -> Json<EventSummary> {
    Json(state.store.event_summary())
}

#[derive(Deserialize)]
pub struct ContentBody {
    quote: Option<String>,
    author: Option<String>,
    role: Option<String>,
    active: Option<bool>,
}

fn require_quote_and_author(body: &ContentBody) -> Result<(String, String), AppError> {
    match (&body.quote, &body.author) {
        (Some(quote), Some(author)) if !quote.trim().is_empty() && !author.trim().is_empty() => {
            Ok((quote.clone(), author.clone()))
        }
        _ => Err(AppError::Validation(
            "quote and author are required".to_string(),
        )),
    }
}

/// POST /api/admin/field-notes
pub async fn handle_add_field_note(
    _admin: AdminToken,
    State(state): State<AppState>,
    Json(body): Json<ContentBody>,
) -> Result<(StatusCode, Json<FieldNote>), AppError> {
    let (quote, author) = require_quote_and_author(&body)?;
    let note = state.store.add_field_note(NewFieldNote {
        quote,
        author,
        active: body.active,
    })?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// PUT /api/admin/field-notes/:id
pub async fn handle_update_field_note(
    _admin: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<FieldNotePatch>,
) -> Result<Json<FieldNote>, AppError> {
    state
        .store
        .update_field_note(id, patch)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Field note {id} not found")))
}

/// DELETE /api/admin/field-notes/:id
pub async fn handle_delete_field_note(
    _admin: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.store.delete_field_note(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Field note {id} not found")))
    }
}

/// POST /api/admin/testimonials
pub async fn handle_add_testimonial(
    _admin: AdminToken,
    State(state): State<AppState>,
    Json(body): Json<ContentBody>,
) -> Result<(StatusCode, Json<Testimonial>), AppError> {
    let (quote, author) = require_quote_and_author(&body)?;
    let testimonial = state.store.add_testimonial(NewTestimonial {
        quote,
        author,
        role: body.role,
        active: body.active,
    })?;
    Ok((StatusCode::CREATED, Json(testimonial)))
}

/// PUT /api/admin/testimonials/:id
pub async fn handle_update_testimonial(
    _admin: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<TestimonialPatch>,
) -> Result<Json<Testimonial>, AppError> {
    state
        .store
        .update_testimonial(id, patch)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Testimonial {id} not found")))
}

/// DELETE /api/admin/testimonials/:id
pub async fn handle_delete_testimonial(
    _admin: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.store.delete_testimonial(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Testimonial {id} not found")))
    }
}
