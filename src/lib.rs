//! Typed Rust client for the 8x8 (Wavecell) SMS HTTP API.
//!
//! The design has three layers: a domain layer of strong types carrying the
//! vendor's validation rules, a transport layer for the JSON wire format, and
//! a small client layer issuing one authenticated POST per send. Delivery
//! receipts (DLRs) pushed by the vendor are decoded as passive data via
//! [`decode_delivery_callback`].
//!
//! ```rust,no_run
//! use wavecell::{
//!     Credentials, Destination, MessageText, SendOptions, SendSms, SourceId, WavecellClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), wavecell::WavecellError> {
//!     let client = WavecellClient::new(Credentials::new("YOUR_API_KEY", "SUB_ACCOUNT_ID")?);
//!     let request = SendSms::new(
//!         SourceId::new("acme")?,
//!         Some(Destination::new("+628123456789")?),
//!         MessageText::new("Hello!")?,
//!         SendOptions::default(),
//!     );
//!     let response = client.send(request).await?;
//!     println!("accepted: umid={} status={}", response.umid, response.status.code);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    Credentials, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HttpResponse, HttpTransport, WavecellClient,
    WavecellClientBuilder, WavecellError,
};
pub use domain::{
    ApiError, ApiKey, CallbackUrl, ClientMessageId, DeliveryCallback, DeliveryPayload,
    DeliveryPrice, DeliveryState, DeliveryStatus, Destination, Encoding, KnownDeliveryDetail,
    KnownDeliveryState, MessageText, SendOptions, SendSms, SendSmsResponse, SendStatus, SourceId,
    SubAccountId, Track, ValidationError,
};

/// Decode a delivery-status callback body pushed by the vendor.
///
/// This is the inbound half of the integration: the surrounding application
/// receives the HTTP callback and hands the JSON body here.
pub fn decode_delivery_callback(json: &str) -> Result<DeliveryCallback, WavecellError> {
    transport::decode_delivery_callback(json).map_err(|err| WavecellError::Parse(Box::new(err)))
}
