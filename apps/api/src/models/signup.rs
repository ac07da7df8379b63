use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A waitlist registration, keyed by unique normalized email.
///
/// Field names serialize in camelCase; this is both the wire shape and the
/// persisted shape, so renames here are a breaking change to the store file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signup {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub size: String,
    /// Code this signup shares; other signups citing it bump `referral_count`.
    pub referral_code: String,
    /// Captured at creation, never changed afterwards. May reference a code
    /// that matched no one at the time; stored verbatim either way.
    pub referred_by_code: Option<String>,
    pub referral_count: u32,
    pub confirmed: bool,
    /// One-time secret proving email ownership. None once consumed; a signup
    /// with a cleared token can never be confirmed through a token again.
    pub confirmation_token: Option<String>,
    pub early_access_code: String,
    pub early_access_max_uses: u32,
    pub early_access_uses: u32,
    pub early_access_expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
