//! Public waitlist flow: signup, email confirmation, early-access redemption,
//! and the landing-page reads.

pub mod handlers;

use crate::config::Config;
use crate::models::signup::Signup;
use crate::notify::EmailMessage;

/// Garment sizes accepted at signup. Validation happens here, before the
/// store is touched; the store treats size as an opaque string.
pub const ALLOWED_SIZES: [&str; 5] = ["S", "M", "L", "XL", "XXL"];

pub fn referral_link(config: &Config, referral_code: &str) -> String {
    format!("{}/?ref={}", config.app_base_url, referral_code)
}

/// Confirmation email for a brand-new signup: a confirm link carrying the
/// one-time token, the early-access code, and the shareable referral link.
/// `None` when the signup has no outstanding token left to confirm.
pub fn confirmation_email(config: &Config, signup: &Signup) -> Option<EmailMessage> {
    let token = signup.confirmation_token.as_deref()?;
    let confirm_url = format!("{}/api/signups/confirm?token={token}", config.app_base_url);
    let referral = referral_link(config, &signup.referral_code);
    let html = format!(
        "<h2>Confirm your SNOOOM Hoodie waitlist spot</h2>\
         <p>Tap the link below to confirm:</p>\
         <p><a href=\"{confirm_url}\">Confirm my spot</a></p>\
         <p>Your early access code: <strong>{}</strong></p>\
         <p>Share your referral link: <strong>{referral}</strong></p>",
        signup.early_access_code
    );
    Some(EmailMessage {
        to: signup.email.clone(),
        subject: "Confirm your SNOOOM waitlist spot".to_string(),
        html,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn test_config() -> Config {
        Config {
            port: 4000,
            admin_token: "secret".to_string(),
            app_base_url: "https://snooom.example".to_string(),
            data_path: "data/store.json".into(),
            email_from: Some("drops@snooom.example".to_string()),
            resend_api_key: Some("re_test".to_string()),
            rust_log: "info".to_string(),
        }
    }

    fn fresh_signup() -> Signup {
        let now = Utc::now();
        Signup {
            id: Uuid::new_v4(),
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            size: "M".to_string(),
            referral_code: "REF-A1B2C3".to_string(),
            referred_by_code: None,
            referral_count: 0,
            confirmed: false,
            confirmation_token: Some("deadbeef".to_string()),
            early_access_code: "SNOOOM-D4E5F6".to_string(),
            early_access_max_uses: 1,
            early_access_uses: 0,
            early_access_expires_at: now + Duration::days(30),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn confirmation_email_embeds_token_code_and_link() {
        let config = test_config();
        let email = confirmation_email(&config, &fresh_signup()).expect("email for fresh signup");

        assert_eq!(email.to, "ann@x.com");
        assert!(email
            .html
            .contains("https://snooom.example/api/signups/confirm?token=deadbeef"));
        assert!(email.html.contains("SNOOOM-D4E5F6"));
        assert!(email.html.contains("https://snooom.example/?ref=REF-A1B2C3"));
    }

    #[test]
    fn no_email_without_an_outstanding_token() {
        let mut signup = fresh_signup();
        signup.confirmation_token = None;
        assert!(confirmation_email(&test_config(), &signup).is_none());
    }
}
