//! Record store: the single owner of all waitlist collections.
//!
//! Every mutation runs read-modify-persist under one writer lock and rewrites
//! the backing JSON file in full before returning, so reads issued after any
//! mutation from this process observe it. Handlers only ever get copies or
//! derived views; the collections themselves never leave this module.

pub mod codes;
mod content;
mod seed;
mod signups;

pub use content::{FieldNotePatch, NewFieldNote, NewTestimonial, TestimonialPatch};
pub use signups::{CodeDenial, NewSignup, RedeemOutcome, SignupOutcome};

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::insights::{self, DayCount, EventSummary, ReferralRank, SignupFilter};
use crate::models::content::{FieldNote, Testimonial};
use crate::models::drop::{DropState, DropStatus, DropWindow};
use crate::models::event::Event;
use crate::models::signup::Signup;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read store file: {0}")]
    Read(#[source] io::Error),

    #[error("failed to write store file: {0}")]
    Write(#[source] io::Error),

    #[error("store file is corrupt: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Persisted shape of the store: one document, top-level ordered collections.
/// Unknown fields from newer builds are dropped on load; missing collections
/// default to empty, so adding a collection stays backward-compatible.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreData {
    pub signups: Vec<Signup>,
    pub field_notes: Vec<FieldNote>,
    pub testimonials: Vec<Testimonial>,
    pub drop_windows: Vec<DropWindow>,
    pub events: Vec<Event>,
}

/// In-memory representation. Id-keyed maps give O(1) lookup and removal for
/// the deletable collections; the order vectors keep the insertion order the
/// persisted layout and every listing must preserve.
struct Inner {
    signups: Vec<Signup>,
    email_index: HashMap<String, usize>,
    field_notes: HashMap<Uuid, FieldNote>,
    field_note_order: Vec<Uuid>,
    testimonials: HashMap<Uuid, Testimonial>,
    testimonial_order: Vec<Uuid>,
    drop_windows: Vec<DropWindow>,
    events: Vec<Event>,
}

impl Inner {
    fn from_data(data: StoreData) -> Self {
        let email_index = data
            .signups
            .iter()
            .enumerate()
            .map(|(idx, s)| (s.email.clone(), idx))
            .collect();
        let field_note_order: Vec<Uuid> = data.field_notes.iter().map(|n| n.id).collect();
        let field_notes = data.field_notes.into_iter().map(|n| (n.id, n)).collect();
        let testimonial_order: Vec<Uuid> = data.testimonials.iter().map(|t| t.id).collect();
        let testimonials = data.testimonials.into_iter().map(|t| (t.id, t)).collect();
        Self {
            signups: data.signups,
            email_index,
            field_notes,
            field_note_order,
            testimonials,
            testimonial_order,
            drop_windows: data.drop_windows,
            events: data.events,
        }
    }

    fn to_data(&self) -> StoreData {
        StoreData {
            signups: self.signups.clone(),
            field_notes: self
                .field_note_order
                .iter()
                .filter_map(|id| self.field_notes.get(id).cloned())
                .collect(),
            testimonials: self
                .testimonial_order
                .iter()
                .filter_map(|id| self.testimonials.get(id).cloned())
                .collect(),
            drop_windows: self.drop_windows.clone(),
            events: self.events.clone(),
        }
    }
}

pub struct Store {
    path: PathBuf,
    inner: RwLock<Inner>,
}

impl Store {
    /// Opens the store at `path`, creating parent directories as needed.
    /// A missing or empty file is initialized with the seeded defaults and
    /// written out immediately; a present file must parse or opening fails.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(StoreError::Write)?;
        }

        let existing = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => None,
            Ok(raw) => Some(serde_json::from_str::<StoreData>(&raw)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(StoreError::Read(e)),
        };

        let fresh = existing.is_none();
        let data = existing.unwrap_or_else(|| seed::default_data(Utc::now()));
        let store = Self {
            path,
            inner: RwLock::new(Inner::from_data(data)),
        };
        if fresh {
            let inner = store.read();
            store.persist(&inner)?;
        }
        Ok(store)
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().expect("store lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().expect("store lock poisoned")
    }

    /// Full-state rewrite. Called while the caller still holds the lock, so
    /// in-memory and on-disk state cannot diverge silently: a write failure
    /// surfaces to the caller as the operation's error.
    fn persist(&self, inner: &Inner) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&inner.to_data())?;
        std::fs::write(&self.path, json).map_err(StoreError::Write)
    }

    // ── events ──────────────────────────────────────────────────────────

    /// Appends to the event log. Events are never mutated or deleted.
    pub fn log_event(
        &self,
        kind: String,
        user_id: Option<String>,
        metadata: Value,
    ) -> Result<Event, StoreError> {
        let mut inner = self.write();
        let event = Event {
            id: Uuid::new_v4(),
            kind,
            user_id,
            metadata,
            created_at: Utc::now(),
        };
        inner.events.push(event.clone());
        self.persist(&inner)?;
        Ok(event)
    }

    // ── drop window ─────────────────────────────────────────────────────

    /// Derives the current drop phase from the first configured window.
    /// Both interval ends are inclusive: `now == start_at` and
    /// `now == end_at` are live. Additional windows are inert data.
    pub fn drop_state(&self, now: DateTime<Utc>) -> DropStatus {
        let inner = self.read();
        match inner.drop_windows.first() {
            None => DropStatus {
                state: DropState::Waitlist,
                message: "Waitlist only".to_string(),
                window: None,
            },
            Some(w) if now < w.start_at => DropStatus {
                state: DropState::Waitlist,
                message: w.waitlist_copy.clone(),
                window: Some(w.clone()),
            },
            Some(w) if now <= w.end_at => DropStatus {
                state: DropState::Live,
                message: w.live_copy.clone(),
                window: Some(w.clone()),
            },
            Some(w) => DropStatus {
                state: DropState::Post,
                message: w.post_copy.clone(),
                window: Some(w.clone()),
            },
        }
    }

    // ── read-only queries (fresh per call, no caching) ──────────────────

    pub fn size_counts(&self) -> HashMap<String, u64> {
        insights::size_counts(&self.read().signups)
    }

    pub fn signup_timeline(&self) -> Vec<DayCount> {
        insights::signup_timeline(&self.read().signups)
    }

    pub fn referral_leaderboard(&self, limit: usize) -> Vec<ReferralRank> {
        insights::referral_leaderboard(&self.read().signups, limit)
    }

    pub fn list_signups(&self, filter: &SignupFilter) -> Vec<Signup> {
        insights::filter_signups(&self.read().signups, filter)
    }

    pub fn event_summary(&self) -> EventSummary {
        insights::event_summary(&self.read().events)
    }

    #[cfg(test)]
    pub(crate) fn replace_drop_windows(&self, windows: Vec<DropWindow>) {
        self.write().drop_windows = windows;
    }
}
