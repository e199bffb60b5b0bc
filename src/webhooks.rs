//! Webhook event envelopes delivered by Telnyx to your HTTP endpoint.
//!
//! Every delivery has the shape
//! `{"data": {"id", "event_type", "occurred_at", "payload", "record_type"},
//! "meta": {"attempt", "delivered_to"}}`.
//! [`WebhookEvent`] keeps the payload as raw JSON and `occurred_at` as its wire text, so the
//! envelope re-serializes without loss; [`EventData::typed_payload`] decodes the payload
//! for the event types this crate knows.
//!
//! ```rust
//! use telnyx::webhooks::{EventPayload, WebhookEvent};
//!
//! let body = r#"{
//!   "data": {
//!     "id": "0ccc7b54-4df3-4bca-a65a-3da1ecc777f0",
//!     "event_type": "message.received",
//!     "occurred_at": "2024-01-15T20:16:07.588Z",
//!     "record_type": "event",
//!     "payload": {"id": "b301ed3f-1490-491f-995f-6e64e69674d4", "text": "Hello"}
//!   },
//!   "meta": {"attempt": 1, "delivered_to": "https://example.com/webhooks"}
//! }"#;
//! let event = WebhookEvent::parse(body).unwrap();
//! match event.data.typed_payload().unwrap() {
//!     EventPayload::MessageReceived(message) => {
//!         assert_eq!(message.text.as_deref(), Some("Hello"))
//!     }
//!     other => panic!("unexpected payload: {other:?}"),
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{EnumValue, Model, ModelError, Timestamp, wire_enum};
use crate::resources::messages::Message;

wire_enum! {
    pub enum EventType {
        MessageReceived = "message.received",
        MessageSent = "message.sent",
        MessageFinalized = "message.finalized",
        CallInitiated = "call.initiated",
        CallAnswered = "call.answered",
        CallHangup = "call.hangup",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub data: EventData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<DeliveryMeta>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WebhookEvent {
    /// Parse a raw webhook request body.
    pub fn parse(body: &str) -> Result<Self, ModelError> {
        serde_json::from_str(body).map_err(|source| ModelError::Invalid {
            model: Self::NAME,
            source,
        })
    }

    /// Shorthand for `data.event_type`.
    pub fn event_type(&self) -> &EnumValue<EventType> {
        &self.data.event_type
    }
}

impl Model for WebhookEvent {
    const NAME: &'static str = "WebhookEvent";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    pub id: String,
    pub event_type: EnumValue<EventType>,
    pub occurred_at: Timestamp,
    pub payload: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EventData {
    /// Decode `payload` according to `event_type`.
    ///
    /// Unrecognized event types are not an error; they come back as
    /// [`EventPayload::Unknown`] with the payload untouched.
    pub fn typed_payload(&self) -> Result<EventPayload, ModelError> {
        let payload = self.payload.clone();
        let event_type = match &self.event_type {
            EnumValue::Known(event_type) => *event_type,
            EnumValue::Other(raw) => {
                tracing::debug!(event_type = %raw, "unrecognized webhook event type");
                return Ok(EventPayload::Unknown {
                    event_type: raw.clone(),
                    payload,
                });
            }
        };
        Ok(match event_type {
            EventType::MessageReceived => {
                EventPayload::MessageReceived(Message::from_map(payload)?)
            }
            EventType::MessageSent => EventPayload::MessageSent(Message::from_map(payload)?),
            EventType::MessageFinalized => {
                EventPayload::MessageFinalized(Message::from_map(payload)?)
            }
            EventType::CallInitiated => EventPayload::CallInitiated(CallEvent::from_map(payload)?),
            EventType::CallAnswered => EventPayload::CallAnswered(CallEvent::from_map(payload)?),
            EventType::CallHangup => EventPayload::CallHangup(CallEvent::from_map(payload)?),
        })
    }
}

impl Model for EventData {
    const NAME: &'static str = "EventData";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Delivery bookkeeping: which attempt this is and where it was sent.
pub struct DeliveryMeta {
    pub attempt: u32,
    pub delivered_to: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

wire_enum! {
    pub enum CallDirection {
        Incoming = "incoming",
        Outgoing = "outgoing",
    }
}

wire_enum! {
    pub enum HangupCause {
        CallRejected = "call_rejected",
        NormalClearing = "normal_clearing",
        OriginatorCancel = "originator_cancel",
        Timeout = "timeout",
        TimeLimit = "time_limit",
        UserBusy = "user_busy",
        NotFound = "not_found",
        Unspecified = "unspecified",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Payload shared by the call-control events.
pub struct CallEvent {
    pub call_control_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_leg_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<EnumValue<CallDirection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hangup_cause: Option<EnumValue<HangupCause>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Model for CallEvent {
    const NAME: &'static str = "CallEvent";
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    MessageReceived(Message),
    MessageSent(Message),
    MessageFinalized(Message),
    CallInitiated(CallEvent),
    CallAnswered(CallEvent),
    CallHangup(CallEvent),
    /// An event type this crate has no model for.
    Unknown {
        event_type: String,
        payload: Map<String, Value>,
    },
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn hangup_body() -> Value {
        json!({
            "data": {
                "id": "c1b2f4e6-9b4f-4a0c-8e0e-8cb0f58f8c21",
                "event_type": "call.hangup",
                "occurred_at": "2024-03-01T10:15:30.120+00:00",
                "record_type": "event",
                "payload": {
                    "call_control_id": "v3:abc",
                    "call_leg_id": "leg-1",
                    "connection_id": "7267xxxxxxxxxxxxxx",
                    "from": "+13125550199",
                    "to": "+13125550100",
                    "direction": "incoming",
                    "hangup_cause": "normal_clearing",
                    "hangup_source": "caller",
                    "start_time": "2024-03-01T10:14:00Z",
                    "end_time": "2024-03-01T10:15:30Z"
                }
            },
            "meta": {"attempt": 2, "delivered_to": "https://example.com/hooks"}
        })
    }

    #[test]
    fn envelope_round_trips_without_loss() {
        let body = hangup_body();
        let event = WebhookEvent::parse(&body.to_string()).unwrap();
        assert_eq!(event.meta.as_ref().map(|meta| meta.attempt), Some(2));
        assert_eq!(event.to_value().unwrap(), body);
    }

    #[test]
    fn occurred_at_keeps_wire_text_and_parses() {
        let event = WebhookEvent::from_value(hangup_body()).unwrap();
        assert_eq!(
            event.data.occurred_at.as_str(),
            "2024-03-01T10:15:30.120+00:00"
        );
        assert_eq!(
            event.data.occurred_at.to_utc().to_rfc3339(),
            "2024-03-01T10:15:30.120+00:00"
        );
        assert_eq!(
            event.to_value().unwrap()["data"]["occurred_at"],
            json!("2024-03-01T10:15:30.120+00:00")
        );

        let mut bad = hangup_body();
        bad["data"]["occurred_at"] = json!("last tuesday");
        assert!(matches!(
            WebhookEvent::from_value(bad),
            Err(ModelError::Invalid {
                model: "WebhookEvent",
                ..
            })
        ));
    }

    #[test]
    fn call_hangup_payload_is_typed() {
        let event = WebhookEvent::from_value(hangup_body()).unwrap();
        assert_eq!(event.event_type(), &EnumValue::Known(EventType::CallHangup));

        let EventPayload::CallHangup(call) = event.data.typed_payload().unwrap() else {
            panic!("expected call.hangup");
        };
        assert_eq!(call.call_control_id, "v3:abc");
        assert_eq!(
            call.hangup_cause,
            Some(EnumValue::Known(HangupCause::NormalClearing))
        );
        assert_eq!(call.extra.get("hangup_source"), Some(&json!("caller")));
    }

    #[test]
    fn message_finalized_decodes_into_message() {
        let event = WebhookEvent::from_value(json!({
            "data": {
                "id": "e1",
                "event_type": "message.finalized",
                "occurred_at": "2024-03-01T10:15:30Z",
                "payload": {
                    "id": "m1",
                    "type": "MMS",
                    "to": [{"phone_number": "+13125550100", "status": "delivered"}]
                }
            }
        }))
        .unwrap();
        assert!(event.meta.is_none());

        let EventPayload::MessageFinalized(message) = event.data.typed_payload().unwrap() else {
            panic!("expected message.finalized");
        };
        assert_eq!(message.id, "m1");
    }

    #[test]
    fn unrecognized_event_type_is_kept_raw() {
        let event = WebhookEvent::from_value(json!({
            "data": {
                "id": "e2",
                "event_type": "fax.delivered",
                "occurred_at": "2024-03-01T10:15:30Z",
                "payload": {"fax_id": "f1"}
            }
        }))
        .unwrap();

        assert_eq!(
            event.data.typed_payload().unwrap(),
            EventPayload::Unknown {
                event_type: "fax.delivered".to_owned(),
                payload: json!({"fax_id": "f1"}).as_object().cloned().unwrap(),
            }
        );
    }

    #[test]
    fn known_event_with_malformed_payload_is_an_error() {
        let event = WebhookEvent::from_value(json!({
            "data": {
                "id": "e3",
                "event_type": "call.answered",
                "occurred_at": "2024-03-01T10:15:30Z",
                "payload": {"call_leg_id": "leg-1"}
            }
        }))
        .unwrap();
        assert!(matches!(
            event.data.typed_payload(),
            Err(ModelError::Invalid {
                model: "CallEvent",
                ..
            })
        ));
    }
}
