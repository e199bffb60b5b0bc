//! Messaging: outbound SMS/MMS and message records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{ApiRequest, TelnyxClient, TelnyxError};
use crate::domain::{
    EnumValue, IntoModel, Model, RawPhoneNumber, ResourceId, ValidationError, require_known_opt,
    wire_enum,
};

wire_enum! {
    pub enum MessageType {
        Sms = "SMS",
        Mms = "MMS",
    }
}

wire_enum! {
    pub enum MessageDirection {
        Inbound = "inbound",
        Outbound = "outbound",
    }
}

wire_enum! {
    /// Delivery state of one recipient.
    pub enum MessageStatus {
        Queued = "queued",
        Sending = "sending",
        Sent = "sent",
        Expired = "expired",
        SendingFailed = "sending_failed",
        DeliveryUnconfirmed = "delivery_unconfirmed",
        Delivered = "delivered",
        DeliveryFailed = "delivery_failed",
        WebhookDelivered = "webhook_delivered",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Body of `POST /messages`.
pub struct SendMessageParams {
    to: RawPhoneNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    from: Option<RawPhoneNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    messaging_profile_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subject: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    media_urls: Vec<String>,
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    message_type: Option<EnumValue<MessageType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    webhook_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    webhook_failover_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    use_profile_webhooks: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auto_detect: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    validity_period_secs: Option<u32>,
}

impl SendMessageParams {
    pub const MIN_VALIDITY_SECS: u32 = 60;
    pub const MAX_VALIDITY_SECS: u32 = 14_400;

    /// Message to `to`; add a sender and content before sending.
    pub fn new(to: RawPhoneNumber) -> Self {
        Self {
            to,
            from: None,
            messaging_profile_id: None,
            text: None,
            subject: None,
            media_urls: Vec::new(),
            message_type: None,
            webhook_url: None,
            webhook_failover_url: None,
            use_profile_webhooks: None,
            auto_detect: None,
            validity_period_secs: None,
        }
    }

    /// Sending number; may be omitted when a messaging profile with a number pool is used.
    pub fn with_from(mut self, from: RawPhoneNumber) -> Self {
        self.from = Some(from);
        self
    }

    /// Send through a messaging profile instead of, or in addition to, `from`.
    pub fn with_messaging_profile_id(mut self, id: impl Into<String>) -> Self {
        self.messaging_profile_id = Some(id.into());
        self
    }

    /// Message body.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// MMS subject line.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Media to attach; makes the message an MMS.
    pub fn with_media_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.media_urls = urls.into_iter().map(Into::into).collect();
        self
    }

    /// Force SMS or MMS.
    pub fn with_type(mut self, message_type: impl Into<EnumValue<MessageType>>) -> Self {
        self.message_type = Some(message_type.into());
        self
    }

    /// Delivery status webhook for this message only.
    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    /// Fallback for [`Self::with_webhook_url`].
    pub fn with_webhook_failover_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_failover_url = Some(url.into());
        self
    }

    /// Use the webhooks of the messaging profile.
    pub fn with_use_profile_webhooks(mut self, enabled: bool) -> Self {
        self.use_profile_webhooks = Some(enabled);
        self
    }

    /// Let Telnyx pick the encoding for long messages.
    pub fn with_auto_detect(mut self, enabled: bool) -> Self {
        self.auto_detect = Some(enabled);
        self
    }

    /// Seconds the message may stay queued, `60..=14400`.
    pub fn with_validity_period_secs(mut self, secs: u32) -> Self {
        self.validity_period_secs = Some(secs);
        self
    }

    /// Destination number.
    pub fn to(&self) -> &RawPhoneNumber {
        &self.to
    }

    /// Check content, sender, type and validity period before sending.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let has_text = self
            .text
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty());
        if !has_text && self.media_urls.is_empty() {
            return Err(ValidationError::Empty { field: "text" });
        }
        if self.from.is_none() && self.messaging_profile_id.is_none() {
            return Err(ValidationError::Empty { field: "from" });
        }
        require_known_opt(self.message_type.as_ref(), "type")?;
        let Some(secs) = self.validity_period_secs else {
            return Ok(());
        };
        if !(Self::MIN_VALIDITY_SECS..=Self::MAX_VALIDITY_SECS).contains(&secs) {
            return Err(ValidationError::OutOfRange {
                field: "validity_period_secs",
                min: i64::from(Self::MIN_VALIDITY_SECS),
                max: i64::from(Self::MAX_VALIDITY_SECS),
                actual: i64::from(secs),
            });
        }
        Ok(())
    }
}

impl Model for SendMessageParams {
    const NAME: &'static str = "SendMessageParams";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEndpoint {
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EnumValue<MessageStatus>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Model for MessageEndpoint {
    const NAME: &'static str = "MessageEndpoint";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageMedia {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Model for MessageMedia {
    const NAME: &'static str = "MessageMedia";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageCost {
    pub amount: String,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Message record returned by the messaging API and delivered in message webhooks.
pub struct Message {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<EnumValue<MessageDirection>>,
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub message_type: Option<EnumValue<MessageType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messaging_profile_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<MessageEndpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Vec<MessageEndpoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<MessageMedia>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<MessageCost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Model for Message {
    const NAME: &'static str = "Message";
}

/// Service handle returned by [`TelnyxClient::messages`].
#[derive(Debug, Clone, Copy)]
pub struct Messages<'c> {
    client: &'c TelnyxClient,
}

impl TelnyxClient {
    /// Messaging.
    pub fn messages(&self) -> Messages<'_> {
        Messages { client: self }
    }
}

impl Messages<'_> {
    /// Queue a message; the returned record is its initial state.
    pub async fn send(
        &self,
        params: impl IntoModel<SendMessageParams>,
    ) -> Result<Message, TelnyxError> {
        let params = params.into_model()?;
        params.validate()?;
        let request = ApiRequest::post("/messages").json(&params)?;
        self.client.send_data(request).await
    }

    /// Fetch one message by id.
    pub async fn retrieve(&self, id: &ResourceId) -> Result<Message, TelnyxError> {
        let request = ApiRequest::get("/messages/{}").segment(id.as_str());
        self.client.send_data(request).await
    }
}
