//! HMAC-SHA256 request signatures for both API generations.
//!
//! Legacy endpoints sign the key-sorted `k=v&k=v` rendering of every
//! parameter sent, including `api_key` and `timestamp`. V5 endpoints sign
//! `timestamp + api_key + payload`, where the payload is the exact query
//! string or JSON body placed on the wire.

use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::Result;
use crate::request::Params;

type HmacSha256 = Hmac<Sha256>;

/// Current UTC time in milliseconds since the epoch.
///
/// Fails with [`Error::Clock`](crate::Error::Clock) if the system clock is
/// set before the epoch.
pub fn timestamp_ms() -> Result<u64> {
    millis_since_epoch(SystemTime::now())
}

fn millis_since_epoch(now: SystemTime) -> Result<u64> {
    let elapsed = now.duration_since(UNIX_EPOCH).map_err(|e| {
        tracing::error!("System time error: {}", e);
        e
    })?;
    Ok(elapsed.as_millis() as u64)
}

/// Build the legacy canonical string: keys in ascending byte order, joined
/// as `key=value` with `&`, no trailing separator. Values are not escaped.
pub fn canonical_query(params: &Params) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the v5 canonical string.
pub fn canonical_v5(timestamp: u64, api_key: &str, payload: &[u8]) -> Vec<u8> {
    let mut material = format!("{timestamp}{api_key}").into_bytes();
    material.extend_from_slice(payload);
    material
}

/// Sign a legacy parameter set.
///
/// Callers always include at least `api_key` and `timestamp`; an empty set
/// has no meaningful signature.
pub fn sign_legacy(params: &Params, secret: &str) -> String {
    debug_assert!(!params.is_empty(), "legacy signature over empty parameter set");
    hmac_hex(secret, canonical_query(params).as_bytes())
}

/// Sign a v5 request.
pub fn sign_v5(timestamp: u64, api_key: &str, payload: &[u8], secret: &str) -> String {
    hmac_hex(secret, &canonical_v5(timestamp, api_key, payload))
}

/// Lowercase hex HMAC-SHA256 of `message` keyed by `secret`.
pub fn hmac_hex(secret: &str, message: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}
