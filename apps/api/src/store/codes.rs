//! Opaque, human-shareable identifiers minted from the OS random source.
//!
//! Formats are load-bearing: referral codes and early-access codes are typed
//! back in by people, confirmation tokens travel inside email links. Callers
//! own uniqueness; these functions only produce candidates.

use rand::rngs::OsRng;
use rand::RngCore;

/// `REF-` + 6 uppercase hex characters (3 random bytes).
pub fn referral_code() -> String {
    format!("REF-{}", hex_upper(3))
}

/// `SNOOOM-` + 6 uppercase hex characters (3 random bytes).
pub fn access_code() -> String {
    format!("SNOOOM-{}", hex_upper(3))
}

/// 48 lowercase hex characters (24 random bytes). Single-use by contract:
/// the store clears it after the first successful confirmation.
pub fn confirmation_token() -> String {
    hex_lower(24)
}

fn random_bytes(n: usize) -> Vec<u8> {
    let mut buf = vec![0u8; n];
    OsRng.fill_bytes(&mut buf);
    buf
}

fn hex_upper(n_bytes: usize) -> String {
    random_bytes(n_bytes).iter().map(|b| format!("{b:02X}")).collect()
}

fn hex_lower(n_bytes: usize) -> String {
    random_bytes(n_bytes).iter().map(|b| format!("{b:02x}")).collect()
}
