use crate::domain::validation::ValidationError;

use phonenumber::country;

fn is_numeric(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}

fn length_in(value: &str, min_exclusive: usize, max_inclusive: usize) -> bool {
    let len = value.len();
    len > min_exclusive && len <= max_inclusive
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Wavecell API key used as the bearer token.
///
/// Invariant: non-empty after trimming.
pub struct ApiKey(String);

impl ApiKey {
    pub const FIELD: &'static str = "apiKey";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Wavecell sub-account identifier scoping message sends.
///
/// Invariant: non-empty after trimming.
pub struct SubAccountId(String);

impl SubAccountId {
    pub const FIELD: &'static str = "subAccountId";

    /// Create a validated [`SubAccountId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender id (`source`): either a numeric short/long code or an alphanumeric brand name.
///
/// Invariants:
/// - all-digit values must be 4..=14 digits ([`ValidationError::SourceNonAlphanumericLength`]),
/// - any other value must be 4..=13 characters ([`ValidationError::SourceAlphanumericLength`]).
///
/// An empty value counts as all-digit and is therefore rejected.
pub struct SourceId(String);

impl SourceId {
    pub const FIELD: &'static str = "source";

    /// Create a validated [`SourceId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if is_numeric(trimmed) {
            if !length_in(trimmed, 3, 14) {
                return Err(ValidationError::SourceNonAlphanumericLength {
                    actual: trimmed.len(),
                });
            }
        } else if !length_in(trimmed, 3, 13) {
            return Err(ValidationError::SourceAlphanumericLength {
                actual: trimmed.len(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Recipient phone number (`destination`) as provided by the caller.
///
/// Invariants: non-empty after trimming; all-digit values must be 4..=14 digits
/// ([`ValidationError::DestinationNonAlphanumericLength`]). Formatting characters
/// (`+`, spaces, dashes) are allowed here and stripped by [`Destination::normalized`].
pub struct Destination(String);

impl Destination {
    pub const FIELD: &'static str = "destination";

    /// Create a validated [`Destination`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if is_numeric(trimmed) && !length_in(trimmed, 3, 14) {
            return Err(ValidationError::DestinationNonAlphanumericLength {
                actual: trimmed.len(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as provided by the caller.
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Normalize to E.164 for the wire.
    ///
    /// `default_region` is applied when the value carries no explicit country
    /// prefix. Values the `phonenumber` crate cannot parse are passed through
    /// unchanged; normalization never fails a send.
    pub fn normalized(&self, default_region: Option<country::Id>) -> String {
        match phonenumber::parse(default_region, &self.0) {
            Ok(parsed) => phonenumber::format(&parsed)
                .mode(phonenumber::Mode::E164)
                .to_string(),
            Err(_) => self.0.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message body (`text`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    pub const FIELD: &'static str = "text";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Caller-assigned idempotency token (`clientMessageId`), echoed back by the vendor.
///
/// Invariant: non-empty after trimming.
pub struct ClientMessageId(String);

impl ClientMessageId {
    pub const FIELD: &'static str = "clientMessageId";

    /// Create a validated [`ClientMessageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Delivery-receipt callback URL (`dlrCallbackUrl`).
///
/// Invariant: parses as an absolute URL.
pub struct CallbackUrl(String);

impl CallbackUrl {
    pub const FIELD: &'static str = "dlrCallbackUrl";

    /// Create a validated [`CallbackUrl`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        url::Url::parse(trimmed).map_err(|_| ValidationError::InvalidCallbackUrl {
            input: trimmed.to_owned(),
        })?;
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Message encoding requested for the send (`encoding`).
pub enum Encoding {
    /// Let the vendor pick between GSM7 and UCS2 based on the text.
    #[default]
    Auto,
    Gsm7,
    Ucs2,
}

impl Encoding {
    pub const FIELD: &'static str = "encoding";

    /// Wire value as expected by the Wavecell API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::Gsm7 => "GSM7",
            Self::Ucs2 => "UCS2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Link click-tracking mode (`track`).
pub enum Track {
    None,
    Url,
}

impl Track {
    pub const FIELD: &'static str = "track";

    /// Wire value as expected by the Wavecell API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Url => "URL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Delivery state reported in a DLR callback (`status.state`).
///
/// The raw string is preserved as-is even when the state is unknown to this crate.
pub struct DeliveryState(String);

impl DeliveryState {
    /// Wrap a raw state string as reported by the vendor.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw state string as reported by the vendor.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Map this state to a known variant, if one exists.
    pub fn known(&self) -> Option<KnownDeliveryState> {
        KnownDeliveryState::from_state(&self.0)
    }

    /// Returns `true` if this state is terminal and no further callback is expected.
    pub fn is_final(&self) -> bool {
        matches!(
            self.known(),
            Some(state) if state.is_final()
        )
    }

    /// Returns `true` if this state reports the message was not delivered.
    pub fn is_failure(&self) -> bool {
        matches!(
            self.known(),
            Some(state) if state.is_failure()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known delivery states reported by the Wavecell platform.
///
/// Unknown states are preserved as [`DeliveryState`] and return `None` from
/// [`KnownDeliveryState::from_state`].
pub enum KnownDeliveryState {
    Unknown,
    Queued,
    Failed,
    Sent,
    Delivered,
    Undelivered,
    Read,
    Ok,
    Error,
    Rejected,
}

impl KnownDeliveryState {
    /// Convert a raw state string into a known variant.
    pub fn from_state(state: &str) -> Option<Self> {
        Some(match state {
            "unknown" => Self::Unknown,
            "queued" => Self::Queued,
            "failed" => Self::Failed,
            "sent" => Self::Sent,
            "delivered" => Self::Delivered,
            "undelivered" => Self::Undelivered,
            "read" => Self::Read,
            "ok" => Self::Ok,
            "error" => Self::Error,
            "rejected" => Self::Rejected,
            _ => return None,
        })
    }

    /// Whether this state is terminal for the message.
    pub fn is_final(self) -> bool {
        matches!(
            self,
            Self::Delivered | Self::Undelivered | Self::Read | Self::Failed | Self::Rejected
        )
    }

    /// Whether this state reports a delivery failure.
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            Self::Failed | Self::Undelivered | Self::Error | Self::Rejected
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known `status.detail` values accompanying a DLR callback state.
pub enum KnownDeliveryDetail {
    DeliveredToOperator,
    DeliveredToRecipient,
    RejectedByOperator,
    UndeliveredToRecipient,
}

impl KnownDeliveryDetail {
    /// Convert a raw detail string into a known variant.
    pub fn from_detail(detail: &str) -> Option<Self> {
        Some(match detail {
            "delivered_to_operator" => Self::DeliveredToOperator,
            "delivered_to_recipient" => Self::DeliveredToRecipient,
            "rejected_by_operator" => Self::RejectedByOperator,
            "undelivered_to_recipient" => Self::UndeliveredToRecipient,
            _ => return None,
        })
    }
}
