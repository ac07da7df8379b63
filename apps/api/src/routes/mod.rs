pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::admin::handlers as admin;
use crate::state::AppState;
use crate::waitlist::handlers as waitlist;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Public waitlist API
        .route("/api/signups", post(waitlist::handle_signup))
        .route("/api/signups/confirm", get(waitlist::handle_confirm))
        .route("/api/codes/validate", post(waitlist::handle_validate_code))
        .route("/api/events", post(waitlist::handle_log_event))
        .route("/api/field-notes", get(waitlist::handle_list_field_notes))
        .route("/api/testimonials", get(waitlist::handle_list_testimonials))
        .route("/api/drop-state", get(waitlist::handle_drop_state))
        .route("/api/insights/sizes", get(waitlist::handle_size_counts))
        .route("/api/insights/signups", get(waitlist::handle_signup_timeline))
        // Admin API (shared secret)
        .route("/api/admin/signups", get(admin::handle_list_signups))
        .route("/api/admin/export", get(admin::handle_export_csv))
        .route("/api/admin/referrals", get(admin::handle_referral_leaderboard))
        .route("/api/admin/events", get(admin::handle_event_summary))
        .route("/api/admin/field-notes", post(admin::handle_add_field_note))
        .route(
            "/api/admin/field-notes/:id",
            axum::routing::put(admin::handle_update_field_note)
                .delete(admin::handle_delete_field_note),
        )
        .route("/api/admin/testimonials", post(admin::handle_add_testimonial))
        .route(
            "/api/admin/testimonials/:id",
            axum::routing::put(admin::handle_update_testimonial)
                .delete(admin::handle_delete_testimonial),
        )
        .with_state(state)
}
