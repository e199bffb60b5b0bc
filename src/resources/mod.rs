//! Resource services: one module per API resource, each reached through a borrowed
//! handle on [`crate::TelnyxClient`] (`client.messages().send(...)`).

pub mod ai_assistants;
pub mod channel_zones;
pub mod messages;
pub mod phone_numbers;
pub mod sim_cards;
pub mod verified_numbers;

pub use ai_assistants::{
    AiAssistants, Assistant, AssistantDeleted, AssistantTool, BackgroundAudio,
    CreateAssistantParams, MediaName, MediaUrl, PredefinedAudio, PredefinedMedia, ToolType,
    UpdateAssistantParams, VoiceSettings,
};
pub use channel_zones::{
    ChannelZone, ChannelZones, ListChannelZonesParams, UpdateChannelZoneParams,
};
pub use messages::{
    Message, MessageCost, MessageDirection, MessageEndpoint, MessageMedia, MessageStatus,
    MessageType, Messages, SendMessageParams,
};
pub use phone_numbers::{
    ListPhoneNumbersParams, PhoneNumberFilter, PhoneNumberRecord, PhoneNumberSort,
    PhoneNumberStatus, PhoneNumbers, TextMatch, UpdatePhoneNumberParams,
};
pub use sim_cards::{
    ListSimCardsParams, SimCard, SimCardAction, SimCardActionState, SimCardActionType,
    SimCardFilter, SimCardState, SimCardStatus, SimCards,
};
pub use verified_numbers::{
    CreateVerifiedNumberParams, ListVerifiedNumbersParams, VerificationMethod,
    VerificationRequested, VerifiedNumber, VerifiedNumbers, VerifyCodeParams,
};
