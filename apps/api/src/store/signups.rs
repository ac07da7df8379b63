//! Signup lifecycle: idempotent creation, one-time confirmation, and
//! early-access code redemption.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::{codes, Store, StoreError};
use crate::models::signup::Signup;

/// How long a freshly minted early-access code stays redeemable.
const ACCESS_CODE_TTL_DAYS: i64 = 30;

/// Caller-normalized signup input. The HTTP layer owns normalization: email
/// arrives lowercased and trimmed, size already validated against the
/// allowed set.
#[derive(Debug, Clone)]
pub struct NewSignup {
    pub name: String,
    pub email: String,
    pub size: String,
    pub referred_by_code: Option<String>,
}

#[derive(Debug, Clone)]
pub enum SignupOutcome {
    /// Brand-new record. The caller owes the confirmation notification.
    Created(Signup),
    /// The email was already registered; nothing was mutated. This is what
    /// makes retried submissions safe.
    Existing(Signup),
}

impl SignupOutcome {
    pub fn record(&self) -> &Signup {
        match self {
            Self::Created(s) | Self::Existing(s) => s,
        }
    }
}

/// Early-access redemption denial. The `Display` strings are the exact
/// reasons surfaced to callers, and the check order is fixed: unknown code,
/// then expiry, then exhaustion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodeDenial {
    #[error("Code not found")]
    NotFound,
    #[error("Code expired")]
    Expired,
    #[error("Code already used")]
    AlreadyUsed,
}

#[derive(Debug, Clone)]
pub enum RedeemOutcome {
    Granted(Signup),
    Denied(CodeDenial),
}

impl Store {
    /// Creates a signup, or returns the existing record for an already-known
    /// email without mutating anything.
    ///
    /// When `referred_by_code` names a known referral code, that referrer's
    /// count is bumped in the same locked mutation, so both changes land in
    /// one persist. An unknown code is stored verbatim and has no effect.
    pub fn upsert_signup(&self, input: NewSignup) -> Result<SignupOutcome, StoreError> {
        let mut inner = self.write();
        if let Some(&idx) = inner.email_index.get(&input.email) {
            return Ok(SignupOutcome::Existing(inner.signups[idx].clone()));
        }

        let now = Utc::now();
        let referral_code = loop {
            let candidate = codes::referral_code();
            if !inner.signups.iter().any(|s| s.referral_code == candidate) {
                break candidate;
            }
        };
        let early_access_code = loop {
            let candidate = codes::access_code();
            if !inner.signups.iter().any(|s| s.early_access_code == candidate) {
                break candidate;
            }
        };

        let record = Signup {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            size: input.size,
            referral_code,
            referred_by_code: input.referred_by_code,
            referral_count: 0,
            confirmed: false,
            confirmation_token: Some(codes::confirmation_token()),
            early_access_code,
            early_access_max_uses: 1,
            early_access_uses: 0,
            early_access_expires_at: now + Duration::days(ACCESS_CODE_TTL_DAYS),
            created_at: now,
            updated_at: now,
        };

        let idx = inner.signups.len();
        inner.email_index.insert(record.email.clone(), idx);
        inner.signups.push(record.clone());

        if let Some(code) = record.referred_by_code.as_deref() {
            if let Some(referrer) = inner.signups.iter_mut().find(|s| s.referral_code == code) {
                referrer.referral_count += 1;
                referrer.updated_at = now;
            }
        }

        self.persist(&inner)?;
        Ok(SignupOutcome::Created(record))
    }

    /// Consumes a confirmation token. Tokens are single-use: the match clears
    /// the token, so a repeat call with the same value finds nothing and
    /// returns `None`.
    pub fn confirm_signup(&self, token: &str) -> Result<Option<Signup>, StoreError> {
        let mut inner = self.write();
        let Some(signup) = inner
            .signups
            .iter_mut()
            .find(|s| s.confirmation_token.as_deref() == Some(token))
        else {
            return Ok(None);
        };

        signup.confirmed = true;
        signup.confirmation_token = None;
        signup.updated_at = Utc::now();
        let record = signup.clone();
        self.persist(&inner)?;
        Ok(Some(record))
    }

    /// Redeems an early-access code at instant `now`. Exactly at the expiry
    /// instant the code is still valid; one instant later it is not. The use
    /// counter only ever grows and never passes `early_access_max_uses`.
    pub fn redeem_access_code(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<RedeemOutcome, StoreError> {
        let mut inner = self.write();
        let Some(signup) = inner.signups.iter_mut().find(|s| s.early_access_code == code) else {
            return Ok(RedeemOutcome::Denied(CodeDenial::NotFound));
        };
        if now > signup.early_access_expires_at {
            return Ok(RedeemOutcome::Denied(CodeDenial::Expired));
        }
        if signup.early_access_uses >= signup.early_access_max_uses {
            return Ok(RedeemOutcome::Denied(CodeDenial::AlreadyUsed));
        }

        signup.early_access_uses += 1;
        signup.updated_at = now;
        let record = signup.clone();
        self.persist(&inner)?;
        Ok(RedeemOutcome::Granted(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::SignupFilter;

    fn open_store() -> (Store, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = Store::open(dir.path().join("store.json")).expect("open store");
        (store, dir)
    }

    fn signup(store: &Store, name: &str, email: &str, referred_by: Option<&str>) -> SignupOutcome {
        store
            .upsert_signup(NewSignup {
                name: name.to_string(),
                email: email.to_string(),
                size: "M".to_string(),
                referred_by_code: referred_by.map(str::to_string),
            })
            .expect("upsert signup")
    }

    fn stored(store: &Store, email: &str) -> Signup {
        store
            .list_signups(&SignupFilter::default())
            .into_iter()
            .find(|s| s.email == email)
            .expect("signup present")
    }

    fn is_upper_hex(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase())
    }

    #[test]
    fn new_signup_has_expected_defaults() {
        let (store, _dir) = open_store();
        let outcome = signup(&store, "Ann", "ann@x.com", None);
        let SignupOutcome::Created(record) = outcome else {
            panic!("expected a created record");
        };

        assert_eq!(record.referral_count, 0);
        assert!(!record.confirmed);
        assert!(record.confirmation_token.is_some());
        assert_eq!(record.early_access_max_uses, 1);
        assert_eq!(record.early_access_uses, 0);
        assert_eq!(
            record.early_access_expires_at,
            record.created_at + Duration::days(30)
        );

        let ref_suffix = record.referral_code.strip_prefix("REF-").expect("REF- prefix");
        assert_eq!(ref_suffix.len(), 6);
        assert!(is_upper_hex(ref_suffix));
        assert!(record.early_access_code.starts_with("SNOOOM-"));
    }

    #[test]
    fn upsert_is_idempotent_per_email() {
        let (store, _dir) = open_store();
        let first = signup(&store, "Ann", "ann@x.com", None);
        let second = signup(&store, "Ann again", "ann@x.com", None);

        let SignupOutcome::Existing(record) = second else {
            panic!("expected the existing record back");
        };
        assert_eq!(record.id, first.record().id);
        assert_eq!(record.referral_code, first.record().referral_code);
        assert_eq!(store.list_signups(&SignupFilter::default()).len(), 1);
    }

    #[test]
    fn referral_increments_referrer_only() {
        let (store, _dir) = open_store();
        let ann = signup(&store, "Ann", "ann@x.com", None);
        let bo = signup(&store, "Bo", "bo@x.com", Some(&ann.record().referral_code));

        assert_eq!(stored(&store, "ann@x.com").referral_count, 1);
        assert_eq!(bo.record().referral_count, 0);
        assert_eq!(
            bo.record().referred_by_code.as_deref(),
            Some(ann.record().referral_code.as_str())
        );
    }

    #[test]
    fn unknown_referral_code_is_a_silent_noop() {
        let (store, _dir) = open_store();
        signup(&store, "Ann", "ann@x.com", None);
        let bo = signup(&store, "Bo", "bo@x.com", Some("REF-000000"));

        let SignupOutcome::Created(record) = bo else {
            panic!("unknown referral code must not fail the signup");
        };
        assert_eq!(record.referred_by_code.as_deref(), Some("REF-000000"));
        assert_eq!(stored(&store, "ann@x.com").referral_count, 0);
    }

    #[test]
    fn confirmation_is_exactly_once() {
        let (store, _dir) = open_store();
        let ann = signup(&store, "Ann", "ann@x.com", None);
        let token = ann
            .record()
            .confirmation_token
            .clone()
            .expect("fresh signup has a token");

        let confirmed = store
            .confirm_signup(&token)
            .expect("confirm")
            .expect("token matches");
        assert!(confirmed.confirmed);
        assert!(confirmed.confirmation_token.is_none());

        // Consumed tokens find no match, ever.
        assert!(store.confirm_signup(&token).expect("confirm").is_none());
    }

    #[test]
    fn redeem_respects_max_uses() {
        let (store, _dir) = open_store();
        let ann = signup(&store, "Ann", "ann@x.com", None);
        let code = ann.record().early_access_code.clone();
        let now = Utc::now();

        match store.redeem_access_code(&code, now).expect("redeem") {
            RedeemOutcome::Granted(s) => assert_eq!(s.early_access_uses, 1),
            RedeemOutcome::Denied(d) => panic!("first redemption denied: {d}"),
        }
        match store.redeem_access_code(&code, now).expect("redeem") {
            RedeemOutcome::Denied(denial) => assert_eq!(denial, CodeDenial::AlreadyUsed),
            RedeemOutcome::Granted(_) => panic!("max uses not enforced"),
        }
        assert_eq!(stored(&store, "ann@x.com").early_access_uses, 1);
    }

    #[test]
    fn redeem_after_expiry_fails_even_when_unused() {
        let (store, _dir) = open_store();
        let ann = signup(&store, "Ann", "ann@x.com", None);
        let code = ann.record().early_access_code.clone();
        let late = ann.record().early_access_expires_at + Duration::seconds(1);

        match store.redeem_access_code(&code, late).expect("redeem") {
            RedeemOutcome::Denied(denial) => assert_eq!(denial, CodeDenial::Expired),
            RedeemOutcome::Granted(_) => panic!("expired code accepted"),
        }
    }

    #[test]
    fn redeem_exactly_at_expiry_is_still_valid() {
        let (store, _dir) = open_store();
        let ann = signup(&store, "Ann", "ann@x.com", None);
        let code = ann.record().early_access_code.clone();
        let at_expiry = ann.record().early_access_expires_at;

        assert!(matches!(
            store.redeem_access_code(&code, at_expiry).expect("redeem"),
            RedeemOutcome::Granted(_)
        ));
    }

    #[test]
    fn unknown_code_is_not_found_before_any_other_check() {
        let (store, _dir) = open_store();
        signup(&store, "Ann", "ann@x.com", None);
        // Far in the future so an expiry check would trip if it ran first.
        let far = Utc::now() + Duration::days(365);

        match store.redeem_access_code("SNOOOM-FFFFFF", far).expect("redeem") {
            RedeemOutcome::Denied(denial) => assert_eq!(denial, CodeDenial::NotFound),
            RedeemOutcome::Granted(_) => panic!("unknown code accepted"),
        }
    }

    #[test]
    fn denial_reasons_render_exact_strings() {
        assert_eq!(CodeDenial::NotFound.to_string(), "Code not found");
        assert_eq!(CodeDenial::Expired.to_string(), "Code expired");
        assert_eq!(CodeDenial::AlreadyUsed.to_string(), "Code already used");
    }

    #[test]
    fn signups_survive_a_reload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        let referral_code = {
            let store = Store::open(&path).expect("open store");
            signup(&store, "Ann", "ann@x.com", None)
                .record()
                .referral_code
                .clone()
        };

        let reopened = Store::open(&path).expect("reopen store");
        assert_eq!(stored(&reopened, "ann@x.com").referral_code, referral_code);
    }

    // The walkthrough from the product brief: Ann signs up, Bo joins through
    // her link, Ann's access code works once and only once.
    #[test]
    fn full_waitlist_walkthrough() {
        let (store, _dir) = open_store();

        let ann = signup(&store, "Ann", "ann@x.com", None);
        assert_eq!(ann.record().referral_count, 0);
        assert!(!ann.record().confirmed);

        signup(&store, "Bo", "bo@x.com", Some(&ann.record().referral_code));
        assert_eq!(stored(&store, "ann@x.com").referral_count, 1);

        let code = ann.record().early_access_code.clone();
        let now = Utc::now();
        assert!(matches!(
            store.redeem_access_code(&code, now).expect("redeem"),
            RedeemOutcome::Granted(_)
        ));
        match store.redeem_access_code(&code, now).expect("redeem") {
            RedeemOutcome::Denied(denial) => {
                assert_eq!(denial.to_string(), "Code already used");
            }
            RedeemOutcome::Granted(_) => panic!("second redemption must fail"),
        }
    }
}
