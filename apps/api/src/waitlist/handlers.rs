use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use super::{confirmation_email, referral_link, ALLOWED_SIZES};
use crate::errors::AppError;
use crate::insights::DayCount;
use crate::models::content::{FieldNote, Testimonial};
use crate::models::drop::DropStatus;
use crate::state::AppState;
use crate::store::{NewSignup, RedeemOutcome, SignupOutcome};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    name: Option<String>,
    email: Option<String>,
    size: Option<String>,
    referral_code: Option<String>,
}

#[derive(Deserialize)]
pub struct SignupQuery {
    /// Referral code carried by shared links (`/?ref=REF-XXXXXX`); the body
    /// field wins when both are present.
    #[serde(rename = "ref")]
    referred_by: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    status: &'static str,
    message: &'static str,
    early_access_code: String,
    referral_link: String,
}

/// POST /api/signups
///
/// Normalizes and validates input here; the store assumes it. A repeated
/// submission for a known email returns the existing record (200); only a
/// brand-new signup (201) triggers the confirmation email, spawned and never
/// awaited.
pub async fn handle_signup(
    State(state): State<AppState>,
    Query(query): Query<SignupQuery>,
    Json(body): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let name = body.name.unwrap_or_default().trim().to_string();
    let email = body.email.unwrap_or_default().trim().to_lowercase();
    let size = body.size.unwrap_or_default().trim().to_uppercase();
    if name.is_empty() || email.is_empty() || !ALLOWED_SIZES.contains(&size.as_str()) {
        return Err(AppError::Validation(
            "name, email, and valid size are required".to_string(),
        ));
    }
    let referred_by_code = body.referral_code.or(query.referred_by);

    let outcome = state.store.upsert_signup(NewSignup {
        name,
        email,
        size,
        referred_by_code,
    })?;

    match outcome {
        SignupOutcome::Existing(record) => {
            let (status, message) = if record.confirmed {
                ("confirmed", "You are already confirmed.")
            } else {
                ("pending", "Check your inbox to confirm your spot.")
            };
            Ok((
                StatusCode::OK,
                Json(SignupResponse {
                    status,
                    message,
                    referral_link: referral_link(&state.config, &record.referral_code),
                    early_access_code: record.early_access_code,
                }),
            ))
        }
        SignupOutcome::Created(record) => {
            if let Some(email) = confirmation_email(&state.config, &record) {
                let notifier = state.notifier.clone();
                tokio::spawn(async move {
                    if let Err(e) = notifier.send(email).await {
                        warn!("confirmation email failed: {e}");
                    }
                });
            }
            Ok((
                StatusCode::CREATED,
                Json(SignupResponse {
                    status: "pending",
                    message: "Check your email to confirm your spot.",
                    referral_link: referral_link(&state.config, &record.referral_code),
                    early_access_code: record.early_access_code,
                }),
            ))
        }
    }
}

#[derive(Deserialize)]
pub struct ConfirmQuery {
    token: Option<String>,
}

/// GET /api/signups/confirm?token=...
/// Lands in the browser from the email link, so responses are small HTML
/// pages rather than JSON.
pub async fn handle_confirm(
    State(state): State<AppState>,
    Query(query): Query<ConfirmQuery>,
) -> Result<(StatusCode, Html<String>), AppError> {
    let Some(token) = query.token.filter(|t| !t.is_empty()) else {
        return Ok((
            StatusCode::BAD_REQUEST,
            Html("<h2>Missing confirmation token.</h2>".to_string()),
        ));
    };

    match state.store.confirm_signup(&token)? {
        None => Ok((
            StatusCode::NOT_FOUND,
            Html("<h2>Confirmation link is invalid or already used.</h2>".to_string()),
        )),
        Some(signup) => Ok((
            StatusCode::OK,
            Html(format!(
                "<style>\
                   body {{ font-family: Arial, sans-serif; background:#050c1c; color:#f7f9ff; text-align:center; padding:60px; }}\
                   a {{ color:#d8b46d; }}\
                 </style>\
                 <h1>Confirmed.</h1>\
                 <p>You are officially on the list. Your code <strong>{}</strong> will unlock early access once the drop opens.</p>\
                 <p><a href=\"{}\">Return to SNOOOM</a></p>",
                signup.early_access_code, state.config.app_base_url
            )),
        )),
    }
}

#[derive(Deserialize)]
pub struct ValidateCodeRequest {
    code: Option<String>,
}

#[derive(Serialize)]
pub struct ValidateCodeResponse {
    success: bool,
    signup: RedeemedSignup,
}

#[derive(Serialize)]
pub struct RedeemedSignup {
    email: String,
    name: String,
}

/// POST /api/codes/validate
/// Denials map to 400 with the denial's exact reason string.
pub async fn handle_validate_code(
    State(state): State<AppState>,
    Json(body): Json<ValidateCodeRequest>,
) -> Result<Json<ValidateCodeResponse>, AppError> {
    let code = body.code.unwrap_or_default().trim().to_uppercase();
    if code.is_empty() {
        return Err(AppError::Validation("code is required".to_string()));
    }

    match state.store.redeem_access_code(&code, Utc::now())? {
        RedeemOutcome::Denied(denial) => Err(denial.into()),
        RedeemOutcome::Granted(signup) => Ok(Json(ValidateCodeResponse {
            success: true,
            signup: RedeemedSignup {
                email: signup.email,
                name: signup.name,
            },
        })),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    #[serde(rename = "type")]
    kind: Option<String>,
    user_id: Option<String>,
    metadata: Option<Value>,
}

/// POST /api/events
pub async fn handle_log_event(
    State(state): State<AppState>,
    Json(body): Json<EventRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Some(kind) = body.kind.filter(|k| !k.is_empty()) else {
        return Err(AppError::Validation("type is required".to_string()));
    };
    state
        .store
        .log_event(kind, body.user_id, body.metadata.unwrap_or_else(|| json!({})))?;
    Ok((StatusCode::CREATED, Json(json!({ "status": "logged" }))))
}

/// GET /api/field-notes (active notes only).
pub async fn handle_list_field_notes(State(state): State<AppState>) -> Json<Vec<FieldNote>> {
    Json(state.store.list_field_notes())
}

/// GET /api/testimonials (unfiltered, active or not).
pub async fn handle_list_testimonials(State(state): State<AppState>) -> Json<Vec<Testimonial>> {
    Json(state.store.list_testimonials())
}

/// GET /api/drop-state
pub async fn handle_drop_state(State(state): State<AppState>) -> Json<DropStatus> {
    Json(state.store.drop_state(Utc::now()))
}

/// GET /api/insights/sizes
pub async fn handle_size_counts(State(state): State<AppState>) -> Json<HashMap<String, u64>> {
    Json(state.store.size_counts())
}

/// GET /api/insights/signups
pub async fn handle_signup_timeline(State(state): State<AppState>) -> Json<Vec<DayCount>> {
    Json(state.store.signup_timeline())
}
