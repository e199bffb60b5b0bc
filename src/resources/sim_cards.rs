//! Wireless SIM cards and their enable/disable actions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{ApiRequest, Paginated, TelnyxClient, TelnyxError};
use crate::domain::{
    EnumValue, IntoModel, Model, ModelError, PageParams, ResourceId, ValidationError, WireEnum,
    wire_enum,
};

wire_enum! {
    /// Connectivity state of a SIM card.
    pub enum SimCardState {
        Registering = "registering",
        Enabling = "enabling",
        Enabled = "enabled",
        Disabling = "disabling",
        Disabled = "disabled",
        DataLimitExceeded = "data_limit_exceeded",
        SettingStandby = "setting_standby",
        Standby = "standby",
    }
}

wire_enum! {
    /// Kind of asynchronous action run against a card.
    pub enum SimCardActionType {
        Enable = "enable",
        EnableStandbySimCard = "enable_standby_sim_card",
        Disable = "disable",
        SetStandby = "set_standby",
    }
}

wire_enum! {
    /// Progress of a [`SimCardAction`].
    pub enum SimCardActionState {
        InProgress = "in-progress",
        Completed = "completed",
        Failed = "failed",
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
/// `filter[...]` parameters of `GET /sim_cards`.
pub struct SimCardFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iccid: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    status: Vec<EnumValue<SimCardState>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sim_card_group_id: Option<String>,
}

impl SimCardFilter {
    /// Empty filter; every field is omitted from the query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Card with the given ICCID.
    pub fn with_iccid(mut self, iccid: impl Into<String>) -> Self {
        self.iccid = Some(iccid.into());
        self
    }

    /// Cards carrying every one of `tags`.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Cards in any of the given states.
    pub fn with_status<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<EnumValue<SimCardState>>,
    {
        self.status = states.into_iter().map(Into::into).collect();
        self
    }

    /// Cards belonging to a SIM card group.
    pub fn with_sim_card_group_id(mut self, id: impl Into<String>) -> Self {
        self.sim_card_group_id = Some(id.into());
        self
    }

    /// Reject states this crate does not know.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for state in &self.status {
            state.require_known("filter[status]")?;
        }
        Ok(())
    }
}

impl Model for SimCardFilter {
    const NAME: &'static str = "SimCardFilter";
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
/// Query of `GET /sim_cards`.
pub struct ListSimCardsParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page: Option<PageParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filter: Option<SimCardFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    include_sim_card_group: Option<bool>,
}

impl ListSimCardsParams {
    /// First page, server-default size, no filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Page selection (`page[number]`, `page[size]`).
    pub fn with_page(mut self, page: PageParams) -> Self {
        self.page = Some(page);
        self
    }

    /// Accepts a [`SimCardFilter`] or a raw JSON map of the same shape.
    pub fn with_filter(
        mut self,
        filter: impl IntoModel<SimCardFilter>,
    ) -> Result<Self, ModelError> {
        self.filter = Some(filter.into_model()?);
        Ok(self)
    }

    /// Embed the card's SIM card group in each record.
    pub fn with_include_sim_card_group(mut self, include: bool) -> Self {
        self.include_sim_card_group = Some(include);
        self
    }

    /// Validate the filter, if any.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.filter {
            Some(filter) => filter.validate(),
            None => Ok(()),
        }
    }
}

impl Model for ListSimCardsParams {
    const NAME: &'static str = "ListSimCardsParams";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "S: WireEnum", deserialize = "S: WireEnum"))]
/// Current state of a SIM card or action, with an optional explanation.
pub struct SimCardStatus<S> {
    pub value: EnumValue<S>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A wireless SIM card on the account.
pub struct SimCard {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iccid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imsi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msisdn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SimCardStatus<SimCardState>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sim_card_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Model for SimCard {
    const NAME: &'static str = "SimCard";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Asynchronous state change requested on a SIM card.
pub struct SimCardAction {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sim_card_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_type: Option<EnumValue<SimCardActionType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SimCardStatus<SimCardActionState>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Model for SimCardAction {
    const NAME: &'static str = "SimCardAction";
}

/// Service handle returned by [`TelnyxClient::sim_cards`].
#[derive(Debug, Clone, Copy)]
pub struct SimCards<'c> {
    client: &'c TelnyxClient,
}

impl TelnyxClient {
    /// Wireless SIM cards.
    pub fn sim_cards(&self) -> SimCards<'_> {
        SimCards { client: self }
    }
}

impl<'c> SimCards<'c> {
    /// List SIM cards, one page at a time.
    pub async fn list(
        &self,
        params: impl IntoModel<ListSimCardsParams>,
    ) -> Result<Paginated<'c, SimCard>, TelnyxError> {
        let params = params.into_model()?;
        params.validate()?;
        let request = ApiRequest::get("/sim_cards").query(&params)?;
        self.client.send_page(request).await
    }

    /// Fetch one SIM card by id.
    pub async fn retrieve(&self, id: &ResourceId) -> Result<SimCard, TelnyxError> {
        let request = ApiRequest::get("/sim_cards/{}").segment(id.as_str());
        self.client.send_data(request).await
    }

    /// Start enabling the card. The returned action completes asynchronously.
    pub async fn enable(&self, id: &ResourceId) -> Result<SimCardAction, TelnyxError> {
        let request = ApiRequest::post("/sim_cards/{}/actions/enable").segment(id.as_str());
        self.client.send_data(request).await
    }

    /// Start disabling the card. The returned action completes asynchronously.
    pub async fn disable(&self, id: &ResourceId) -> Result<SimCardAction, TelnyxError> {
        let request = ApiRequest::post("/sim_cards/{}/actions/disable").segment(id.as_str());
        self.client.send_data(request).await
    }
}
