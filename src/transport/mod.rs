//! Transport layer: wire-format details (serialization/deserialization).

mod callback;
mod send_sms;

pub use callback::decode_delivery_callback;
pub use send_sms::{decode_error_response, decode_send_sms_response, encode_send_sms_body};

use chrono::{DateTime, FixedOffset};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a platform timestamp.
///
/// The platform emits ISO-8601 both with a colon in the zone offset
/// (RFC 3339, `+00:00`) and without (`+0000`).
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .ok()
}
