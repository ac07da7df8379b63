use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use crate::errors::AppError;
use crate::state::AppState;

/// Proof that the request carried the shared admin secret, either in the
/// `x-admin-token` header or a `token` query parameter (the latter exists so
/// export links can be opened straight from a browser).
pub struct AdminToken;

#[async_trait]
impl FromRequestParts<AppState> for AdminToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let expected = state.config.admin_token.as_str();

        let header = parts
            .headers
            .get("x-admin-token")
            .and_then(|h| h.to_str().ok());
        if header == Some(expected) {
            return Ok(Self);
        }

        let query = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .ok();
        let from_query = query.as_ref().and_then(|q| q.get("token"));
        if from_query.map(String::as_str) == Some(expected) {
            return Ok(Self);
        }

        Err(AppError::Unauthorized)
    }
}
