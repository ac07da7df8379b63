use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scheduled interval during which the product is purchasable, plus the
/// copy to show before, during, and after it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropWindow {
    pub id: Uuid,
    pub name: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub waitlist_copy: String,
    pub live_copy: String,
    pub post_copy: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropState {
    Waitlist,
    Live,
    Post,
}

/// Derived view of the current drop phase. Recomputed on every call; there
/// are no stored state transitions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropStatus {
    pub state: DropState,
    pub message: String,
    pub window: Option<DropWindow>,
}
