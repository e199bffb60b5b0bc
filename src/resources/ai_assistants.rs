//! AI assistants: instructions, tools and voice settings for voice/chat agents.
//!
//! Voice settings carry a [`BackgroundAudio`], a union of three shapes told apart by
//! their literal `type` field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::client::{ApiRequest, Paginated, TelnyxClient, TelnyxError};
use crate::domain::{
    EnumValue, IntoModel, Model, ModelError, ResourceId, ValidationError, Variant,
    collect_models, literal_tag, parse_variant, resolve_union, wire_enum,
};

wire_enum! {
    pub enum PredefinedAudio {
        Silence = "silence",
        Office = "office",
    }
}

wire_enum! {
    pub enum ToolType {
        Webhook = "webhook",
        Retrieval = "retrieval",
        Handoff = "handoff",
        Hangup = "hangup",
        Transfer = "transfer",
        SendDtmf = "send_dtmf",
    }
}

literal_tag!(
    /// `type` of [`PredefinedMedia`].
    pub PredefinedMediaTag = "predefined_media"
);
literal_tag!(
    /// `type` of [`MediaUrl`].
    pub MediaUrlTag = "media_url"
);
literal_tag!(
    /// `type` of [`MediaName`].
    pub MediaNameTag = "media_name"
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One of the audio beds shipped by Telnyx.
pub struct PredefinedMedia {
    #[serde(rename = "type")]
    tag: PredefinedMediaTag,
    pub value: EnumValue<PredefinedAudio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl PredefinedMedia {
    /// Predefined bed at the default volume.
    pub fn new(value: impl Into<EnumValue<PredefinedAudio>>) -> Self {
        Self {
            tag: PredefinedMediaTag,
            value: value.into(),
            volume: None,
        }
    }

    /// Playback volume.
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }
}

impl Model for PredefinedMedia {
    const NAME: &'static str = "PredefinedMedia";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Audio fetched from a public URL.
pub struct MediaUrl {
    #[serde(rename = "type")]
    tag: MediaUrlTag,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl MediaUrl {
    /// Audio at `url` at the default volume.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            tag: MediaUrlTag,
            value: url.into(),
            volume: None,
        }
    }

    /// Playback volume.
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }
}

impl Model for MediaUrl {
    const NAME: &'static str = "MediaUrl";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Audio previously uploaded to media storage, referenced by name.
pub struct MediaName {
    #[serde(rename = "type")]
    tag: MediaNameTag,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl MediaName {
    /// Uploaded media `name` at the default volume.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            tag: MediaNameTag,
            value: name.into(),
            volume: None,
        }
    }

    /// Playback volume.
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }
}

impl Model for MediaName {
    const NAME: &'static str = "MediaName";
}

#[derive(Debug, Clone, PartialEq)]
/// Background audio played under the assistant's voice.
pub enum BackgroundAudio {
    PredefinedMedia(PredefinedMedia),
    MediaUrl(MediaUrl),
    MediaName(MediaName),
}

impl BackgroundAudio {
    const VARIANTS: &'static [Variant<BackgroundAudio>] = &[
        Variant::new(PredefinedMedia::NAME, parse_predefined_media),
        Variant::new(MediaUrl::NAME, parse_media_url),
        Variant::new(MediaName::NAME, parse_media_name),
    ];

    /// Wire discriminant of the held variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PredefinedMedia(_) => PredefinedMediaTag::VALUE,
            Self::MediaUrl(_) => MediaUrlTag::VALUE,
            Self::MediaName(_) => MediaNameTag::VALUE,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::PredefinedMedia(media) => {
                media.value.require_known("background_audio.value")?;
            }
            Self::MediaUrl(media) if media.value.trim().is_empty() => {
                return Err(ValidationError::Empty {
                    field: "background_audio.value",
                });
            }
            Self::MediaName(media) if media.value.trim().is_empty() => {
                return Err(ValidationError::Empty {
                    field: "background_audio.value",
                });
            }
            Self::MediaUrl(_) | Self::MediaName(_) => {}
        }
        Ok(())
    }
}

fn parse_predefined_media(payload: Value) -> Result<BackgroundAudio, ModelError> {
    parse_variant::<PredefinedMedia>(payload).map(BackgroundAudio::PredefinedMedia)
}

fn parse_media_url(payload: Value) -> Result<BackgroundAudio, ModelError> {
    parse_variant::<MediaUrl>(payload).map(BackgroundAudio::MediaUrl)
}

fn parse_media_name(payload: Value) -> Result<BackgroundAudio, ModelError> {
    parse_variant::<MediaName>(payload).map(BackgroundAudio::MediaName)
}

impl Model for BackgroundAudio {
    const NAME: &'static str = "BackgroundAudio";

    fn from_value(value: Value) -> Result<Self, ModelError> {
        resolve_union(Self::NAME, value, Self::VARIANTS)
    }
}

impl Serialize for BackgroundAudio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::PredefinedMedia(media) => media.serialize(serializer),
            Self::MediaUrl(media) => media.serialize(serializer),
            Self::MediaName(media) => media.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for BackgroundAudio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let payload = Value::deserialize(deserializer)?;
        resolve_union(Self::NAME, payload, Self::VARIANTS).map_err(serde::de::Error::custom)
    }
}

impl From<PredefinedMedia> for BackgroundAudio {
    fn from(value: PredefinedMedia) -> Self {
        Self::PredefinedMedia(value)
    }
}

impl From<MediaUrl> for BackgroundAudio {
    fn from(value: MediaUrl) -> Self {
        Self::MediaUrl(value)
    }
}

impl From<MediaName> for BackgroundAudio {
    fn from(value: MediaName) -> Self {
        Self::MediaName(value)
    }
}

impl IntoModel<BackgroundAudio> for PredefinedMedia {
    fn into_model(self) -> Result<BackgroundAudio, ModelError> {
        Ok(self.into())
    }
}

impl IntoModel<BackgroundAudio> for MediaUrl {
    fn into_model(self) -> Result<BackgroundAudio, ModelError> {
        Ok(self.into())
    }
}

impl IntoModel<BackgroundAudio> for MediaName {
    fn into_model(self) -> Result<BackgroundAudio, ModelError> {
        Ok(self.into())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A tool the assistant may invoke; the settings object depends on `type`.
pub struct AssistantTool {
    #[serde(rename = "type")]
    pub tool_type: EnumValue<ToolType>,
    #[serde(flatten)]
    pub config: Map<String, Value>,
}

impl AssistantTool {
    /// Tool of the given type with no settings yet.
    pub fn new(tool_type: impl Into<EnumValue<ToolType>>) -> Self {
        Self {
            tool_type: tool_type.into(),
            config: Map::new(),
        }
    }

    /// Attach the settings object keyed by the tool type, e.g. `{"webhook": {...}}`.
    pub fn with_config(mut self, key: impl Into<String>, value: Value) -> Self {
        self.config.insert(key.into(), value);
        self
    }
}

impl Model for AssistantTool {
    const NAME: &'static str = "AssistantTool";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub voice: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_audio: Option<BackgroundAudio>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VoiceSettings {
    /// `voice` is a provider-qualified name such as `Telnyx.KokoroTTS.af`.
    pub fn new(voice: impl Into<String>) -> Self {
        Self {
            voice: voice.into(),
            voice_speed: None,
            api_key_ref: None,
            background_audio: None,
            extra: Map::new(),
        }
    }

    /// Speech rate multiplier.
    pub fn with_voice_speed(mut self, speed: f64) -> Self {
        self.voice_speed = Some(speed);
        self
    }

    /// Name of a stored secret holding the voice provider's API key.
    pub fn with_api_key_ref(mut self, reference: impl Into<String>) -> Self {
        self.api_key_ref = Some(reference.into());
        self
    }

    /// Accepts any variant, a [`BackgroundAudio`] or a raw JSON map.
    pub fn with_background_audio(
        mut self,
        audio: impl IntoModel<BackgroundAudio>,
    ) -> Result<Self, ModelError> {
        self.background_audio = Some(audio.into_model()?);
        Ok(self)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.voice.trim().is_empty() {
            return Err(ValidationError::Empty { field: "voice" });
        }
        match &self.background_audio {
            Some(audio) => audio.validate(),
            None => Ok(()),
        }
    }
}

impl Model for VoiceSettings {
    const NAME: &'static str = "VoiceSettings";
}

fn validate_tools(tools: &[AssistantTool]) -> Result<(), ValidationError> {
    for tool in tools {
        tool.tool_type.require_known("tools.type")?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Body of `POST /ai/assistants`.
pub struct CreateAssistantParams {
    name: String,
    model: String,
    instructions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    greeting: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tools: Vec<AssistantTool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    voice_settings: Option<VoiceSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dynamic_variables: Option<Map<String, Value>>,
}

impl CreateAssistantParams {
    /// Validated create body; `name`, `model` and `instructions` must not be blank.
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let params = Self {
            name: name.into(),
            model: model.into(),
            instructions: instructions.into(),
            description: None,
            greeting: None,
            tools: Vec::new(),
            voice_settings: None,
            dynamic_variables: None,
        };
        params.validate()?;
        Ok(params)
    }

    /// Free-form description shown in the portal.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// First sentence spoken when a call starts.
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = Some(greeting.into());
        self
    }

    /// Each tool may be an [`AssistantTool`] or a raw JSON map.
    pub fn with_tools<I, M>(mut self, tools: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = M>,
        M: IntoModel<AssistantTool>,
    {
        self.tools = collect_models(tools)?;
        Ok(self)
    }

    /// Accepts [`VoiceSettings`] or a raw JSON map.
    pub fn with_voice_settings(
        mut self,
        settings: impl IntoModel<VoiceSettings>,
    ) -> Result<Self, ModelError> {
        self.voice_settings = Some(settings.into_model()?);
        Ok(self)
    }

    /// Defaults for `{{variable}}` placeholders in the instructions.
    pub fn with_dynamic_variables(mut self, variables: Map<String, Value>) -> Self {
        self.dynamic_variables = Some(variables);
        self
    }

    /// Assistant name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// LLM model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Check required text fields, tool types and voice settings.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("name", &self.name),
            ("model", &self.model),
            ("instructions", &self.instructions),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::Empty { field });
            }
        }
        validate_tools(&self.tools)?;
        match &self.voice_settings {
            Some(settings) => settings.validate(),
            None => Ok(()),
        }
    }
}

impl Model for CreateAssistantParams {
    const NAME: &'static str = "CreateAssistantParams";
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
/// Body of `POST /ai/assistants/{id}`; only the fields set are changed.
pub struct UpdateAssistantParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    greeting: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<AssistantTool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    voice_settings: Option<VoiceSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    promote_to_main: Option<bool>,
}

impl UpdateAssistantParams {
    /// Empty update; the body is `{}` until a setter is used.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rename the assistant.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Switch the LLM model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Replace the system instructions.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Replace the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the greeting.
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = Some(greeting.into());
        self
    }

    /// Replace the tool list. Each tool may be an [`AssistantTool`] or a raw JSON map.
    pub fn with_tools<I, M>(mut self, tools: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = M>,
        M: IntoModel<AssistantTool>,
    {
        self.tools = Some(collect_models(tools)?);
        Ok(self)
    }

    /// Accepts [`VoiceSettings`] or a raw JSON map.
    pub fn with_voice_settings(
        mut self,
        settings: impl IntoModel<VoiceSettings>,
    ) -> Result<Self, ModelError> {
        self.voice_settings = Some(settings.into_model()?);
        Ok(self)
    }

    /// Make this version the one served to callers.
    pub fn with_promote_to_main(mut self, promote: bool) -> Self {
        self.promote_to_main = Some(promote);
        self
    }

    /// Reject blank text fields and unknown tool types.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("name", &self.name),
            ("model", &self.model),
            ("instructions", &self.instructions),
        ] {
            if value.as_deref().is_some_and(|value| value.trim().is_empty()) {
                return Err(ValidationError::Empty { field });
            }
        }
        validate_tools(self.tools.as_deref().unwrap_or_default())?;
        match &self.voice_settings {
            Some(settings) => settings.validate(),
            None => Ok(()),
        }
    }
}

impl Model for UpdateAssistantParams {
    const NAME: &'static str = "UpdateAssistantParams";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assistant {
    pub id: String,
    pub name: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeting: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<AssistantTool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_settings: Option<VoiceSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Model for Assistant {
    const NAME: &'static str = "Assistant";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantDeleted {
    pub id: String,
    pub object: String,
    pub deleted: bool,
}

impl Model for AssistantDeleted {
    const NAME: &'static str = "AssistantDeleted";
}

/// Service handle returned by [`TelnyxClient::ai_assistants`].
#[derive(Debug, Clone, Copy)]
pub struct AiAssistants<'c> {
    client: &'c TelnyxClient,
}

impl TelnyxClient {
    /// AI assistants for voice and chat.
    pub fn ai_assistants(&self) -> AiAssistants<'_> {
        AiAssistants { client: self }
    }
}

impl<'c> AiAssistants<'c> {
    /// Create an assistant; the response is the bare assistant object.
    pub async fn create(
        &self,
        params: impl IntoModel<CreateAssistantParams>,
    ) -> Result<Assistant, TelnyxError> {
        let params = params.into_model()?;
        params.validate()?;
        let request = ApiRequest::post("/ai/assistants").json(&params)?;
        self.client.send_bare(request).await
    }

    /// All assistants of the account; the endpoint returns them as a single page.
    pub async fn list(&self) -> Result<Paginated<'c, Assistant>, TelnyxError> {
        self.client.send_page(ApiRequest::get("/ai/assistants")).await
    }

    /// Fetch one assistant by id.
    pub async fn retrieve(&self, id: &ResourceId) -> Result<Assistant, TelnyxError> {
        let request = ApiRequest::get("/ai/assistants/{}").segment(id.as_str());
        self.client.send_bare(request).await
    }

    /// Change an assistant. Only fields set on `params` are sent.
    pub async fn update(
        &self,
        id: &ResourceId,
        params: impl IntoModel<UpdateAssistantParams>,
    ) -> Result<Assistant, TelnyxError> {
        let params = params.into_model()?;
        params.validate()?;
        let request = ApiRequest::post("/ai/assistants/{}")
            .segment(id.as_str())
            .json(&params)?;
        self.client.send_bare(request).await
    }

    /// Delete an assistant.
    pub async fn delete(&self, id: &ResourceId) -> Result<AssistantDeleted, TelnyxError> {
        let request = ApiRequest::delete("/ai/assistants/{}").segment(id.as_str());
        self.client.send_bare(request).await
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::json;

    use super::*;
    use crate::client::testing::{FakeTransport, make_client};

    const ASSISTANT: &str = r#"{
      "id": "assistant-6d5b6f1e",
      "name": "Front desk",
      "model": "meta-llama/Meta-Llama-3.1-70B-Instruct",
      "instructions": "Greet callers and route them.",
      "tools": [{"type": "hangup", "hangup": {"description": "End the call"}}],
      "voice_settings": {
        "voice": "Telnyx.KokoroTTS.af",
        "background_audio": {"type": "media_name", "value": "lobby.mp3"}
      },
      "created_at": "2025-01-10T12:00:00Z"
    }"#;

    #[test]
    fn each_variant_resolves_from_its_discriminant() {
        let cases = [
            (json!({"type": "predefined_media", "value": "office"}), "predefined_media"),
            (json!({"type": "media_url", "value": "https://example.com/a.mp3"}), "media_url"),
            (json!({"type": "media_name", "value": "lobby.mp3", "volume": 0.5}), "media_name"),
        ];
        for (payload, kind) in cases {
            let audio = BackgroundAudio::from_value(payload.clone()).unwrap();
            assert_eq!(audio.kind(), kind);
            assert_eq!(audio.to_value().unwrap(), payload);
        }
    }

    #[test]
    fn payload_without_discriminant_matches_no_variant() {
        let err = BackgroundAudio::from_value(json!({"value": "lobby.mp3"})).unwrap_err();
        assert!(matches!(
            err,
            ModelError::NoVariant {
                union: "BackgroundAudio",
                ..
            }
        ));
    }

    #[test]
    fn literal_discriminant_is_written_without_being_set() {
        let audio: BackgroundAudio = MediaName::new("lobby.mp3").into();
        assert_eq!(
            audio.to_value().unwrap(),
            json!({"type": "media_name", "value": "lobby.mp3"})
        );
        assert!(MediaUrl::from_value(json!({"type": "media_name", "value": "x"})).is_err());
    }

    #[test]
    fn required_fields_are_checked_at_construction() {
        assert!(matches!(
            CreateAssistantParams::new("Desk", " ", "hello"),
            Err(ValidationError::Empty { field: "model" })
        ));
    }

    #[test]
    fn unknown_predefined_audio_fails_validation() {
        let settings = VoiceSettings::new("Telnyx.KokoroTTS.af")
            .with_background_audio(PredefinedMedia::new("jungle"))
            .unwrap();
        let params = CreateAssistantParams::new("Desk", "gpt-4o", "hi")
            .unwrap()
            .with_voice_settings(settings)
            .unwrap();
        assert!(matches!(
            params.validate(),
            Err(ValidationError::UnknownEnumValue {
                field: "background_audio.value",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn create_accepts_raw_maps_for_nested_models() {
        let transport = FakeTransport::new(200, ASSISTANT);
        let client = make_client(transport.clone());

        let Value::Object(voice) = json!({
            "voice": "Telnyx.KokoroTTS.af",
            "background_audio": {"type": "media_name", "value": "lobby.mp3"}
        }) else {
            unreachable!()
        };
        let Value::Object(tool) = json!({
            "type": "hangup",
            "hangup": {"description": "End the call"}
        }) else {
            unreachable!()
        };
        let params = CreateAssistantParams::new(
            "Front desk",
            "meta-llama/Meta-Llama-3.1-70B-Instruct",
            "Greet callers and route them.",
        )
        .unwrap()
        .with_tools([tool])
        .unwrap()
        .with_voice_settings(voice)
        .unwrap();

        let assistant = client.ai_assistants().create(params).await.unwrap();
        assert_eq!(assistant.tools[0].tool_type, EnumValue::Known(ToolType::Hangup));
        let audio = assistant
            .voice_settings
            .and_then(|settings| settings.background_audio)
            .unwrap();
        assert_eq!(audio, BackgroundAudio::from(MediaName::new("lobby.mp3")));

        let sent = transport.last_request();
        assert_eq!(sent.url.path(), "/v2/ai/assistants");
        assert_eq!(
            sent.json_body()["voice_settings"]["background_audio"],
            json!({"type": "media_name", "value": "lobby.mp3"})
        );
        assert_eq!(sent.json_body()["tools"][0]["type"], json!("hangup"));
    }

    #[tokio::test]
    async fn update_posts_to_assistant_path() {
        let transport = FakeTransport::new(200, ASSISTANT);
        let client = make_client(transport.clone());

        client
            .ai_assistants()
            .update(
                &ResourceId::new("assistant-6d5b6f1e").unwrap(),
                UpdateAssistantParams::new()
                    .with_greeting("Hello!")
                    .with_promote_to_main(true),
            )
            .await
            .unwrap();

        let sent = transport.last_request();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.url.path(), "/v2/ai/assistants/assistant-6d5b6f1e");
        assert_eq!(
            sent.json_body(),
            json!({"greeting": "Hello!", "promote_to_main": true})
        );
    }

    #[tokio::test]
    async fn list_without_meta_is_one_page_and_delete_decodes_ack() {
        let list = format!(r#"{{"data":[{ASSISTANT}]}}"#);
        let deleted =
            r#"{"id":"assistant-6d5b6f1e","object":"assistant","deleted":true}"#.to_owned();
        let transport = FakeTransport::scripted(vec![(200, list), (200, deleted)]);
        let client = make_client(transport.clone());

        let page = client.ai_assistants().list().await.unwrap();
        assert_eq!(page.items().len(), 1);
        assert!(!page.has_next_page());

        let ack = client
            .ai_assistants()
            .delete(&ResourceId::new("assistant-6d5b6f1e").unwrap())
            .await
            .unwrap();
        assert!(ack.deleted);
        assert_eq!(transport.requests()[1].method, Method::DELETE);
    }
}
