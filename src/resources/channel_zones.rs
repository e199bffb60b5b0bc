//! Channel zones: inbound channel capacity grouped by country.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{ApiRequest, Paginated, TelnyxClient, TelnyxError};
use crate::domain::{IntoModel, Model, PageParams, ResourceId};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
/// Query of `GET /channel_zones`.
pub struct ListChannelZonesParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page: Option<PageParams>,
}

impl ListChannelZonesParams {
    /// First page, server-default size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Page selection (`page[number]`, `page[size]`).
    pub fn with_page(mut self, page: PageParams) -> Self {
        self.page = Some(page);
        self
    }
}

impl Model for ListChannelZonesParams {
    const NAME: &'static str = "ListChannelZonesParams";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Body of `PUT /channel_zones/{id}`.
pub struct UpdateChannelZoneParams {
    channels: u32,
}

impl UpdateChannelZoneParams {
    /// Set the zone's channel count.
    pub fn new(channels: u32) -> Self {
        Self { channels }
    }

    /// Requested channel count.
    pub fn channels(&self) -> u32 {
        self.channels
    }
}

impl Model for UpdateChannelZoneParams {
    const NAME: &'static str = "UpdateChannelZoneParams";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelZone {
    pub id: String,
    pub channels: u32,
    pub countries: Vec<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Model for ChannelZone {
    const NAME: &'static str = "ChannelZone";
}

/// Service handle returned by [`TelnyxClient::channel_zones`].
#[derive(Debug, Clone, Copy)]
pub struct ChannelZones<'c> {
    client: &'c TelnyxClient,
}

impl TelnyxClient {
    /// Channel zones of the account.
    pub fn channel_zones(&self) -> ChannelZones<'_> {
        ChannelZones { client: self }
    }
}

impl<'c> ChannelZones<'c> {
    /// List channel zones, one page at a time.
    pub async fn list(
        &self,
        params: impl IntoModel<ListChannelZonesParams>,
    ) -> Result<Paginated<'c, ChannelZone>, TelnyxError> {
        let params = params.into_model()?;
        let request = ApiRequest::get("/channel_zones").query(&params)?;
        self.client.send_page(request).await
    }

    /// Set the number of reserved channels; the zone comes back without an envelope.
    pub async fn update(
        &self,
        id: &ResourceId,
        params: impl IntoModel<UpdateChannelZoneParams>,
    ) -> Result<ChannelZone, TelnyxError> {
        let params = params.into_model()?;
        let request = ApiRequest::put("/channel_zones/{}")
            .segment(id.as_str())
            .json(&params)?;
        self.client.send_bare(request).await
    }
}
