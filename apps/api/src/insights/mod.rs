//! Read-only aggregation over store collections.
//!
//! Every query recomputes from scratch on the snapshot it is handed; nothing
//! here caches, maintains incremental state, or mutates.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::models::event::Event;
use crate::models::signup::Signup;

/// One calendar-day bucket (UTC date of the record's creation instant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralRank {
    pub name: String,
    pub email: String,
    pub referral_count: u32,
    pub referral_code: String,
}

/// Optional conjunctive filters over the signup collection. `start`/`end`
/// bound the creation instant inclusively.
#[derive(Debug, Clone, Default)]
pub struct SignupFilter {
    pub size: Option<String>,
    pub confirmed: Option<bool>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub by_type: HashMap<String, u64>,
    pub by_day: Vec<DayCount>,
}

pub fn size_counts(signups: &[Signup]) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for signup in signups {
        *counts.entry(signup.size.clone()).or_default() += 1;
    }
    counts
}

/// Day-ascending signup counts, bucketed by the UTC calendar day of
/// `created_at` regardless of insertion order.
pub fn signup_timeline(signups: &[Signup]) -> Vec<DayCount> {
    day_buckets(signups.iter().map(|s| s.created_at))
}

/// All signups ranked by referral count descending, truncated to `limit`.
/// The sort is stable, so ties keep their encounter order.
pub fn referral_leaderboard(signups: &[Signup], limit: usize) -> Vec<ReferralRank> {
    let mut ranked: Vec<&Signup> = signups.iter().collect();
    ranked.sort_by(|a, b| b.referral_count.cmp(&a.referral_count));
    ranked
        .into_iter()
        .take(limit)
        .map(|s| ReferralRank {
            name: s.name.clone(),
            email: s.email.clone(),
            referral_count: s.referral_count,
            referral_code: s.referral_code.clone(),
        })
        .collect()
}

pub fn filter_signups(signups: &[Signup], filter: &SignupFilter) -> Vec<Signup> {
    signups
        .iter()
        .filter(|s| {
            if let Some(size) = &filter.size {
                if s.size != *size {
                    return false;
                }
            }
            if let Some(confirmed) = filter.confirmed {
                if s.confirmed != confirmed {
                    return false;
                }
            }
            if let Some(start) = filter.start {
                if s.created_at < start {
                    return false;
                }
            }
            if let Some(end) = filter.end {
                if s.created_at > end {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

pub fn event_summary(events: &[Event]) -> EventSummary {
    let mut by_type: HashMap<String, u64> = HashMap::new();
    for event in events {
        *by_type.entry(event.kind.clone()).or_default() += 1;
    }
    EventSummary {
        by_type,
        by_day: day_buckets(events.iter().map(|e| e.created_at)),
    }
}

fn day_buckets(stamps: impl Iterator<Item = DateTime<Utc>>) -> Vec<DayCount> {
    let mut counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for stamp in stamps {
        *counts.entry(stamp.date_naive()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(date, count)| DayCount { date, count })
        .collect()
}
