use std::fmt;

use chrono::{DateTime, FixedOffset};

use crate::domain::value::DeliveryState;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Per-message status block of a successful send response.
pub struct SendStatus {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Successful response to a send: the message was accepted by the platform.
pub struct SendSmsResponse {
    /// Vendor-assigned unique message id.
    pub umid: String,
    /// Echo of the caller-assigned idempotency token, if one was sent.
    pub client_message_id: Option<String>,
    /// Destination as the platform resolved it.
    pub destination: String,
    /// Encoding the platform selected for the message.
    pub encoding: Option<String>,
    pub status: SendStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Structured error payload returned by the platform on a non-2xx response.
pub struct ApiError {
    pub code: i32,
    pub message: Option<String>,
    pub error_id: String,
    /// Timestamp of the failure; `None` when the platform sends a value this
    /// crate cannot parse.
    pub timestamp: Option<DateTime<FixedOffset>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error from the Wavecell platform, code: {}, message: {}, error ID: {}",
            self.code,
            self.message.as_deref().unwrap_or(""),
            self.error_id,
        )?;
        if let Some(timestamp) = self.timestamp {
            write!(f, ", timestamp: {timestamp}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Delivery-status callback (DLR) pushed by the vendor out-of-band.
///
/// Passive data: this crate only decodes it, the consuming application owns
/// any persistence or state tracking.
pub struct DeliveryCallback {
    pub namespace: String,
    pub event_type: String,
    pub description: Option<String>,
    pub payload: DeliveryPayload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Message payload of a DLR callback.
pub struct DeliveryPayload {
    pub umid: String,
    pub batch_id: Option<String>,
    pub client_message_id: Option<String>,
    pub client_batch_id: Option<String>,
    pub sub_account_id: Option<String>,
    pub source: Option<String>,
    pub destination: String,
    pub status: DeliveryStatus,
    pub price: DeliveryPrice,
    pub sms_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Final delivery state of a message as reported by the operator.
pub struct DeliveryStatus {
    pub state: DeliveryState,
    pub detail: Option<String>,
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub error_code: Option<i32>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Price charged for the message.
///
/// Amounts are preserved as strings: the vendor sends either JSON strings or
/// numbers, and this crate does not do arithmetic on money.
pub struct DeliveryPrice {
    pub total: Option<String>,
    pub per_sms: Option<String>,
    pub currency: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_code_message_and_id() {
        let err = ApiError {
            code: 1004,
            message: Some("Invalid destination".to_owned()),
            error_id: "bda3d56d-1424-e711-813c-06ed3428fe67".to_owned(),
            timestamp: None,
        };
        assert_eq!(
            err.to_string(),
            "error from the Wavecell platform, code: 1004, message: Invalid destination, \
             error ID: bda3d56d-1424-e711-813c-06ed3428fe67"
        );
    }

    #[test]
    fn api_error_display_appends_timestamp_when_present() {
        let timestamp = DateTime::parse_from_rfc3339("2023-01-01T12:00:00+00:00").unwrap();
        let err = ApiError {
            code: 1001,
            message: None,
            error_id: "abc".to_owned(),
            timestamp: Some(timestamp),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("code: 1001"));
        assert!(rendered.contains("timestamp: 2023-01-01 12:00:00 +00:00"));
    }
}
