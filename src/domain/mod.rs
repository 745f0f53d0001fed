//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{SendOptions, SendSms};
pub use response::{
    ApiError, DeliveryCallback, DeliveryPayload, DeliveryPrice, DeliveryStatus, SendSmsResponse,
    SendStatus,
};
pub use validation::ValidationError;
pub use value::{
    ApiKey, CallbackUrl, ClientMessageId, DeliveryState, Destination, Encoding,
    KnownDeliveryDetail, KnownDeliveryState, MessageText, SourceId, SubAccountId, Track,
};
