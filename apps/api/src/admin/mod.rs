//! Shared-secret admin surface: signup oversight, CSV export, referral
//! leaderboard, event summary, and content management.

pub mod auth;
pub mod handlers;

use crate::models::signup::Signup;

/// CSV projection of the signup collection. Values containing commas are
/// quoted so spreadsheet imports keep their columns.
pub fn signups_to_csv(signups: &[Signup]) -> String {
    let mut lines =
        vec!["name,email,size,confirmed,referralCode,referralCount,createdAt".to_string()];
    for s in signups {
        let fields = [
            csv_field(&s.name),
            csv_field(&s.email),
            csv_field(&s.size),
            s.confirmed.to_string(),
            csv_field(&s.referral_code),
            s.referral_count.to_string(),
            s.created_at.to_rfc3339(),
        ];
        lines.push(fields.join(","));
    }
    lines.join("\n")
}

fn csv_field(value: &str) -> String {
    if value.contains(',') {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}
