use std::net::IpAddr;

use chrono::{DateTime, Utc};

use crate::domain::value::{
    CallbackUrl, ClientMessageId, Destination, Encoding, MessageText, SourceId, Track,
};

#[derive(Debug, Clone, Default)]
/// Optional fields of a send request.
///
/// Everything here is omitted from the wire body when unset.
pub struct SendOptions {
    /// Caller-assigned idempotency token echoed back in the response and DLR.
    pub client_message_id: Option<ClientMessageId>,
    /// Requested message encoding; the vendor defaults to automatic detection.
    pub encoding: Option<Encoding>,
    /// ISO country code hint for destinations without a country prefix.
    pub country: Option<String>,
    /// Schedule the send for a future point in time.
    pub scheduled: Option<DateTime<Utc>>,
    /// Drop the message if not sent by this point in time.
    pub expiry: Option<DateTime<Utc>>,
    /// Per-message override for the delivery-receipt callback URL.
    pub dlr_callback_url: Option<CallbackUrl>,
    /// End-user IP address, for vendor-side abuse checks.
    pub client_ip: Option<IpAddr>,
    /// Link click-tracking mode.
    pub track: Option<Track>,
}

#[derive(Debug, Clone)]
/// One outbound message to one recipient.
///
/// Field invariants are enforced by the value constructors, in the same order
/// the platform checks them: source first, then destination. A request that
/// constructs successfully is ready to serialize.
pub struct SendSms {
    source: SourceId,
    destination: Option<Destination>,
    text: MessageText,
    options: SendOptions,
}

impl SendSms {
    /// Assemble a send request from validated parts.
    pub fn new(
        source: SourceId,
        destination: Option<Destination>,
        text: MessageText,
        options: SendOptions,
    ) -> Self {
        Self {
            source,
            destination,
            text,
            options,
        }
    }

    pub fn source(&self) -> &SourceId {
        &self.source
    }

    pub fn destination(&self) -> Option<&Destination> {
        self.destination.as_ref()
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}
