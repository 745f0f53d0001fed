use serde::Deserialize;

use crate::domain::{
    DeliveryCallback, DeliveryPayload, DeliveryPrice, DeliveryState, DeliveryStatus,
};
use crate::transport::{TransportError, parse_timestamp};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CallbackJson {
    #[serde(default)]
    namespace: String,
    #[serde(default)]
    event_type: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    payload: PayloadJson,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayloadJson {
    #[serde(default)]
    umid: String,
    #[serde(default)]
    batch_id: Option<String>,
    #[serde(default)]
    client_message_id: Option<String>,
    #[serde(default)]
    client_batch_id: Option<String>,
    #[serde(default)]
    sub_account_id: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    destination: String,
    #[serde(default)]
    status: StatusJson,
    #[serde(default)]
    price: PriceJson,
    #[serde(default)]
    sms_count: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusJson {
    #[serde(default)]
    state: String,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    error_code: Option<i32>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceJson {
    #[serde(default)]
    total: Option<MoneyJson>,
    #[serde(default)]
    per_sms: Option<MoneyJson>,
    #[serde(default)]
    currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum MoneyJson {
    String(String),
    Number(serde_json::Number),
}

impl MoneyJson {
    fn into_string(self) -> String {
        match self {
            Self::String(value) => value,
            Self::Number(value) => value.to_string(),
        }
    }
}

/// Decode a delivery-status callback pushed by the vendor.
pub fn decode_delivery_callback(json: &str) -> Result<DeliveryCallback, TransportError> {
    let parsed: CallbackJson = serde_json::from_str(json)?;
    let status = DeliveryStatus {
        state: DeliveryState::new(parsed.payload.status.state),
        detail: parsed.payload.status.detail,
        timestamp: parsed
            .payload
            .status
            .timestamp
            .as_deref()
            .and_then(parse_timestamp),
        error_code: parsed.payload.status.error_code,
        error_message: parsed.payload.status.error_message,
    };

    Ok(DeliveryCallback {
        namespace: parsed.namespace,
        event_type: parsed.event_type,
        description: parsed.description,
        payload: DeliveryPayload {
            umid: parsed.payload.umid,
            batch_id: parsed.payload.batch_id,
            client_message_id: parsed.payload.client_message_id,
            client_batch_id: parsed.payload.client_batch_id,
            sub_account_id: parsed.payload.sub_account_id,
            source: parsed.payload.source,
            destination: parsed.payload.destination,
            status,
            price: DeliveryPrice {
                total: parsed.payload.price.total.map(MoneyJson::into_string),
                per_sms: parsed.payload.price.per_sms.map(MoneyJson::into_string),
                currency: parsed.payload.price.currency,
            },
            sms_count: parsed.payload.sms_count,
        },
    })
}

#[cfg(test)]
mod tests {
    use crate::domain::KnownDeliveryState;

    use super::*;

    #[test]
    fn decode_delivery_callback_maps_full_payload() {
        let json = r#"
        {
          "namespace": "sms",
          "eventType": "mt_dlr",
          "description": "Message delivered",
          "payload": {
            "umid": "bda3d56d-1424-e711-813c-06ed3428fe67",
            "batchId": "batch-1",
            "clientMessageId": "order-42",
            "clientBatchId": "cb-1",
            "subAccountId": "sub-1",
            "source": "acme",
            "destination": "+628123456789",
            "status": {
              "state": "delivered",
              "detail": "delivered_to_recipient",
              "timestamp": "2023-01-01T12:00:00.000+0000",
              "errorCode": 0
            },
            "price": {
              "total": "0.0075",
              "perSms": 0.0075,
              "currency": "USD"
            },
            "smsCount": 1
          }
        }
        "#;

        let callback = decode_delivery_callback(json).unwrap();
        assert_eq!(callback.namespace, "sms");
        assert_eq!(callback.event_type, "mt_dlr");
        assert_eq!(callback.description.as_deref(), Some("Message delivered"));

        let payload = &callback.payload;
        assert_eq!(payload.umid, "bda3d56d-1424-e711-813c-06ed3428fe67");
        assert_eq!(payload.destination, "+628123456789");
        assert_eq!(payload.sms_count, 1);
        assert_eq!(
            payload.status.state.known(),
            Some(KnownDeliveryState::Delivered)
        );
        assert!(payload.status.state.is_final());
        assert_eq!(
            payload.status.detail.as_deref(),
            Some("delivered_to_recipient")
        );
        assert_eq!(
            payload.status.timestamp.unwrap().to_rfc3339(),
            "2023-01-01T12:00:00+00:00"
        );
        assert_eq!(payload.price.total.as_deref(), Some("0.0075"));
        assert_eq!(payload.price.per_sms.as_deref(), Some("0.0075"));
        assert_eq!(payload.price.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn decode_delivery_callback_preserves_unknown_state() {
        let json = r#"
        {
          "namespace": "sms",
          "eventType": "mt_dlr",
          "payload": {
            "umid": "u-1",
            "destination": "+628123456789",
            "status": { "state": "teleported" },
            "smsCount": 1
          }
        }
        "#;

        let callback = decode_delivery_callback(json).unwrap();
        assert_eq!(callback.payload.status.state.as_str(), "teleported");
        assert_eq!(callback.payload.status.state.known(), None);
        assert!(callback.payload.price.total.is_none());
    }

    #[test]
    fn decode_delivery_callback_tolerates_missing_payload() {
        let callback = decode_delivery_callback(r#"{"namespace": "sms"}"#).unwrap();
        assert_eq!(callback.payload.umid, "");
        assert_eq!(callback.payload.sms_count, 0);
    }

    #[test]
    fn decode_delivery_callback_rejects_invalid_json() {
        assert!(matches!(
            decode_delivery_callback("{ not json }"),
            Err(TransportError::Json(_))
        ));
    }
}
