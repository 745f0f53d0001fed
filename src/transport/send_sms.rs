use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::domain::{ApiError, SendSms, SendSmsResponse, SendStatus};
use crate::transport::{TransportError, parse_timestamp};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendSmsJsonRequest<'a> {
    source: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    destination: Option<&'a str>,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_message_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    encoding: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scheduled: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dlr_callback_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    track: Option<&'static str>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SendStatusJson {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendSmsJsonResponse {
    #[serde(default)]
    umid: String,
    #[serde(default)]
    client_message_id: Option<String>,
    #[serde(default)]
    destination: String,
    #[serde(default)]
    encoding: Option<String>,
    #[serde(default)]
    status: SendStatusJson,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorJsonResponse {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_id: String,
    #[serde(default)]
    timestamp: Option<String>,
}

/// Encode the JSON request body for a send.
///
/// `destination` is the already-normalized E.164 value; the raw domain value
/// never goes on the wire.
pub fn encode_send_sms_body(
    request: &SendSms,
    destination: Option<&str>,
) -> Result<String, TransportError> {
    let options = request.options();
    let body = SendSmsJsonRequest {
        source: request.source().as_str(),
        destination,
        text: request.text().as_str(),
        client_message_id: options.client_message_id.as_ref().map(|id| id.as_str()),
        encoding: options.encoding.map(|e| e.as_str()),
        country: options.country.as_deref(),
        scheduled: options
            .scheduled
            .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        expiry: options
            .expiry
            .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        dlr_callback_url: options.dlr_callback_url.as_ref().map(|url| url.as_str()),
        client_ip: options.client_ip.map(|ip| ip.to_string()),
        track: options.track.map(|t| t.as_str()),
    };
    Ok(serde_json::to_string(&body)?)
}

pub fn decode_send_sms_response(json: &str) -> Result<SendSmsResponse, TransportError> {
    let parsed: SendSmsJsonResponse = serde_json::from_str(json)?;
    Ok(SendSmsResponse {
        umid: parsed.umid,
        client_message_id: parsed.client_message_id,
        destination: parsed.destination,
        encoding: parsed.encoding,
        status: SendStatus {
            code: parsed.status.code,
            description: parsed.status.description,
        },
    })
}

pub fn decode_error_response(json: &str) -> Result<ApiError, TransportError> {
    let parsed: ErrorJsonResponse = serde_json::from_str(json)?;
    Ok(ApiError {
        code: parsed.code,
        message: parsed.message,
        error_id: parsed.error_id,
        // Unparseable timestamps are dropped rather than failing the decode.
        timestamp: parsed.timestamp.as_deref().and_then(parse_timestamp),
    })
}

#[cfg(test)]
mod tests {
    use std::net::IpAddr;

    use chrono::{TimeZone, Utc};

    use crate::domain::{
        CallbackUrl, ClientMessageId, Destination, Encoding, MessageText, SendOptions, SourceId,
        Track,
    };

    use super::*;

    fn request(options: SendOptions) -> SendSms {
        SendSms::new(
            SourceId::new("acme").unwrap(),
            Some(Destination::new("+628123456789").unwrap()),
            MessageText::new("hello").unwrap(),
            options,
        )
    }

    #[test]
    fn encode_minimal_body_omits_unset_fields() {
        let req = request(SendOptions::default());
        let body = encode_send_sms_body(&req, Some("+628123456789")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "source": "acme",
                "destination": "+628123456789",
                "text": "hello",
            })
        );
    }

    #[test]
    fn encode_full_body_uses_vendor_field_names() {
        let options = SendOptions {
            client_message_id: Some(ClientMessageId::new("order-42").unwrap()),
            encoding: Some(Encoding::Ucs2),
            country: Some("ID".to_owned()),
            scheduled: Some(Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap()),
            expiry: Some(Utc.with_ymd_and_hms(2023, 5, 2, 12, 0, 0).unwrap()),
            dlr_callback_url: Some(CallbackUrl::new("https://example.com/dlr").unwrap()),
            client_ip: Some(IpAddr::from([127, 0, 0, 1])),
            track: Some(Track::Url),
        };
        let req = request(options);
        let body = encode_send_sms_body(&req, Some("+628123456789")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "source": "acme",
                "destination": "+628123456789",
                "text": "hello",
                "clientMessageId": "order-42",
                "encoding": "UCS2",
                "country": "ID",
                "scheduled": "2023-05-01T12:00:00Z",
                "expiry": "2023-05-02T12:00:00Z",
                "dlrCallbackUrl": "https://example.com/dlr",
                "clientIp": "127.0.0.1",
                "track": "URL",
            })
        );
    }

    #[test]
    fn encode_omits_destination_when_absent() {
        let req = SendSms::new(
            SourceId::new("acme").unwrap(),
            None,
            MessageText::new("hello").unwrap(),
            SendOptions::default(),
        );
        let body = encode_send_sms_body(&req, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(value.get("destination").is_none());
    }

    #[test]
    fn decode_success_response_maps_all_fields() {
        let json = r#"
        {
          "umid": "bda3d56d-1424-e711-813c-06ed3428fe67",
          "clientMessageId": "1234",
          "destination": "41793026727",
          "encoding": "GSM7",
          "status": {
            "code": "QUEUED",
            "description": "SMS is accepted and queued for processing"
          }
        }
        "#;

        let resp = decode_send_sms_response(json).unwrap();
        assert_eq!(resp.umid, "bda3d56d-1424-e711-813c-06ed3428fe67");
        assert_eq!(resp.client_message_id.as_deref(), Some("1234"));
        assert_eq!(resp.destination, "41793026727");
        assert_eq!(resp.encoding.as_deref(), Some("GSM7"));
        assert_eq!(resp.status.code, "QUEUED");
        assert_eq!(
            resp.status.description,
            "SMS is accepted and queued for processing"
        );
    }

    #[test]
    fn decode_success_response_tolerates_missing_fields() {
        let resp = decode_send_sms_response("{}").unwrap();
        assert_eq!(resp.umid, "");
        assert!(resp.client_message_id.is_none());
        assert_eq!(resp.status.code, "");
    }

    #[test]
    fn decode_error_response_maps_payload() {
        let json = r#"
        {
          "code": 1004,
          "message": "Invalid destination",
          "errorId": "cb9c5757-ab86-4f1f-a475-7d21b193a875",
          "timestamp": "2023-01-01T12:00:00Z"
        }
        "#;

        let err = decode_error_response(json).unwrap();
        assert_eq!(err.code, 1004);
        assert_eq!(err.message.as_deref(), Some("Invalid destination"));
        assert_eq!(err.error_id, "cb9c5757-ab86-4f1f-a475-7d21b193a875");
        assert_eq!(
            err.timestamp.unwrap().to_rfc3339(),
            "2023-01-01T12:00:00+00:00"
        );
    }

    #[test]
    fn decode_error_response_drops_unparseable_timestamp() {
        let json = r#"{"code": 1, "errorId": "x", "timestamp": "yesterday"}"#;
        let err = decode_error_response(json).unwrap();
        assert!(err.timestamp.is_none());
    }

    #[test]
    fn decode_rejects_invalid_json() {
        assert!(matches!(
            decode_send_sms_response("{ not json }"),
            Err(TransportError::Json(_))
        ));
        assert!(matches!(
            decode_error_response("{ not json }"),
            Err(TransportError::Json(_))
        ));
    }
}
