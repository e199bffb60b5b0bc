//! Owned phone numbers: listing with filters, settings updates and release.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{ApiRequest, Paginated, TelnyxClient, TelnyxError};
use crate::domain::{
    EnumValue, IntoModel, Model, ModelError, Nullable, PageParams, ResourceId, ValidationError,
    require_known_opt, wire_enum,
};

wire_enum! {
    /// Lifecycle state of an owned number.
    pub enum PhoneNumberStatus {
        PurchasePending = "purchase-pending",
        PurchaseFailed = "purchase-failed",
        PortPending = "port-pending",
        PortFailed = "port-failed",
        Active = "active",
        Deleted = "deleted",
        EmergencyOnly = "emergency-only",
        PortedOut = "ported-out",
        PortOutPending = "port-out-pending",
    }
}

wire_enum! {
    /// Sort key for `GET /phone_numbers`; the `Desc` variants carry the `-` prefix.
    pub enum PhoneNumberSort {
        PurchasedAt = "purchased_at",
        PurchasedAtDesc = "-purchased_at",
        PhoneNumber = "phone_number",
        PhoneNumberDesc = "-phone_number",
        ConnectionName = "connection_name",
        ConnectionNameDesc = "-connection_name",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
/// String match operators, sent as `filter[field][eq]` or `filter[field][contains]`.
pub struct TextMatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    eq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    contains: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    starts_with: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ends_with: Option<String>,
}

impl TextMatch {
    /// Exact match (`[eq]`).
    pub fn equals(value: impl Into<String>) -> Self {
        Self {
            eq: Some(value.into()),
            ..Self::default()
        }
    }

    /// Substring match (`[contains]`).
    pub fn contains(value: impl Into<String>) -> Self {
        Self {
            contains: Some(value.into()),
            ..Self::default()
        }
    }

    /// Prefix match (`[starts_with]`).
    pub fn starts_with(value: impl Into<String>) -> Self {
        Self {
            starts_with: Some(value.into()),
            ..Self::default()
        }
    }

    /// Suffix match (`[ends_with]`).
    pub fn ends_with(value: impl Into<String>) -> Self {
        Self {
            ends_with: Some(value.into()),
            ..Self::default()
        }
    }
}

impl Model for TextMatch {
    const NAME: &'static str = "TextMatch";
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
/// `filter[...]` parameters of `GET /phone_numbers`.
pub struct PhoneNumberFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<EnumValue<PhoneNumberStatus>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    connection_id: Option<String>,
    #[serde(
        rename = "voice.connection_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    voice_connection_name: Option<TextMatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    customer_reference: Option<String>,
}

impl PhoneNumberFilter {
    /// Empty filter; every field is omitted from the query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Partial match on the number; digits only, no `+`.
    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    /// Numbers in the given lifecycle state.
    pub fn with_status(mut self, status: impl Into<EnumValue<PhoneNumberStatus>>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Numbers carrying `tag`.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Numbers attached to the given connection.
    pub fn with_connection_id(mut self, id: impl Into<String>) -> Self {
        self.connection_id = Some(id.into());
        self
    }

    /// Match on the voice connection name. Accepts a [`TextMatch`] or a raw JSON map
    /// such as `{"starts_with": "office"}`.
    pub fn with_voice_connection_name(
        mut self,
        matcher: impl IntoModel<TextMatch>,
    ) -> Result<Self, ModelError> {
        self.voice_connection_name = Some(matcher.into_model()?);
        Ok(self)
    }

    /// Numbers whose customer reference equals `reference`.
    pub fn with_customer_reference(mut self, reference: impl Into<String>) -> Self {
        self.customer_reference = Some(reference.into());
        self
    }
}

impl Model for PhoneNumberFilter {
    const NAME: &'static str = "PhoneNumberFilter";
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
/// Query of `GET /phone_numbers`.
pub struct ListPhoneNumbersParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page: Option<PageParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filter: Option<PhoneNumberFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sort: Option<EnumValue<PhoneNumberSort>>,
}

impl ListPhoneNumbersParams {
    /// First page, server-default size, no filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Page selection (`page[number]`, `page[size]`).
    pub fn with_page(mut self, page: PageParams) -> Self {
        self.page = Some(page);
        self
    }

    /// Accepts a [`PhoneNumberFilter`] or a raw JSON map of the same shape.
    pub fn with_filter(
        mut self,
        filter: impl IntoModel<PhoneNumberFilter>,
    ) -> Result<Self, ModelError> {
        self.filter = Some(filter.into_model()?);
        Ok(self)
    }

    /// Order of the results.
    pub fn with_sort(mut self, sort: impl Into<EnumValue<PhoneNumberSort>>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Reject sort keys and status filters this crate does not know.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_known_opt(self.sort.as_ref(), "sort")?;
        if let Some(filter) = &self.filter {
            require_known_opt(filter.status.as_ref(), "filter[status]")?;
        }
        Ok(())
    }
}

impl Model for ListPhoneNumbersParams {
    const NAME: &'static str = "ListPhoneNumbersParams";
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
/// Body of `PATCH /phone_numbers/{id}`.
///
/// Fields left untouched are omitted from the body; `clear_*` sends an explicit `null`.
pub struct UpdatePhoneNumberParams {
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    connection_id: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    billing_group_id: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    customer_reference: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    external_pin: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hd_voice_enabled: Option<bool>,
}

impl UpdatePhoneNumberParams {
    /// Empty update; the body is `{}` until a setter is used.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the number to another connection.
    pub fn with_connection_id(mut self, id: impl Into<String>) -> Self {
        self.connection_id = Nullable::Value(id.into());
        self
    }

    /// Detach the number from its connection.
    pub fn clear_connection_id(mut self) -> Self {
        self.connection_id = Nullable::Null;
        self
    }

    /// Move the number to a billing group.
    pub fn with_billing_group_id(mut self, id: impl Into<String>) -> Self {
        self.billing_group_id = Nullable::Value(id.into());
        self
    }

    /// Remove the number from its billing group.
    pub fn clear_billing_group_id(mut self) -> Self {
        self.billing_group_id = Nullable::Null;
        self
    }

    /// Set the free-form customer reference.
    pub fn with_customer_reference(mut self, reference: impl Into<String>) -> Self {
        self.customer_reference = Nullable::Value(reference.into());
        self
    }

    /// Erase the customer reference.
    pub fn clear_customer_reference(mut self) -> Self {
        self.customer_reference = Nullable::Null;
        self
    }

    /// PIN required when porting the number out.
    pub fn with_external_pin(mut self, pin: impl Into<String>) -> Self {
        self.external_pin = Nullable::Value(pin.into());
        self
    }

    /// Erase the port-out PIN.
    pub fn clear_external_pin(mut self) -> Self {
        self.external_pin = Nullable::Null;
        self
    }

    /// Replaces the whole tag list.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Toggle HD voice on the number.
    pub fn with_hd_voice_enabled(mut self, enabled: bool) -> Self {
        self.hd_voice_enabled = Some(enabled);
        self
    }

    /// Connection change carried by this update, if any.
    pub fn connection_id(&self) -> &Nullable<String> {
        &self.connection_id
    }

    /// Reject blank tags.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let blank_tag = self
            .tags
            .iter()
            .flatten()
            .any(|tag| tag.trim().is_empty());
        if blank_tag {
            return Err(ValidationError::Empty { field: "tags" });
        }
        Ok(())
    }
}

impl Model for UpdatePhoneNumberParams {
    const NAME: &'static str = "UpdatePhoneNumberParams";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A number owned by the account.
pub struct PhoneNumberRecord {
    pub id: String,
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EnumValue<PhoneNumberStatus>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_pin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_forwarding_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchased_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Model for PhoneNumberRecord {
    const NAME: &'static str = "PhoneNumberRecord";
}

/// Service handle returned by [`TelnyxClient::phone_numbers`].
#[derive(Debug, Clone, Copy)]
pub struct PhoneNumbers<'c> {
    client: &'c TelnyxClient,
}

impl TelnyxClient {
    /// Numbers owned by the account.
    pub fn phone_numbers(&self) -> PhoneNumbers<'_> {
        PhoneNumbers { client: self }
    }
}

impl<'c> PhoneNumbers<'c> {
    /// List owned numbers, one page at a time.
    pub async fn list(
        &self,
        params: impl IntoModel<ListPhoneNumbersParams>,
    ) -> Result<Paginated<'c, PhoneNumberRecord>, TelnyxError> {
        let params = params.into_model()?;
        params.validate()?;
        let request = ApiRequest::get("/phone_numbers").query(&params)?;
        self.client.send_page(request).await
    }

    /// Fetch one number by id.
    pub async fn retrieve(&self, id: &ResourceId) -> Result<PhoneNumberRecord, TelnyxError> {
        let request = ApiRequest::get("/phone_numbers/{}").segment(id.as_str());
        self.client.send_data(request).await
    }

    /// Change the settings of a number. Only fields set on `params` are sent.
    pub async fn update(
        &self,
        id: &ResourceId,
        params: impl IntoModel<UpdatePhoneNumberParams>,
    ) -> Result<PhoneNumberRecord, TelnyxError> {
        let params = params.into_model()?;
        params.validate()?;
        let request = ApiRequest::patch("/phone_numbers/{}")
            .segment(id.as_str())
            .json(&params)?;
        self.client.send_data(request).await
    }

    /// Release the number; the record is returned as it was at deletion.
    pub async fn delete(&self, id: &ResourceId) -> Result<PhoneNumberRecord, TelnyxError> {
        let request = ApiRequest::delete("/phone_numbers/{}").segment(id.as_str());
        self.client.send_data(request).await
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::json;

    use super::*;
    use crate::client::testing::{FakeTransport, make_client};

    const RECORD: &str = r#"{
      "data": {
        "id": "1293384261075731499",
        "record_type": "phone_number",
        "phone_number": "+19705555098",
        "status": "active",
        "tags": ["tag_1", "tag_2"],
        "connection_id": null,
        "customer_reference": "MY REF 001",
        "emergency_enabled": true,
        "purchased_at": "2019-10-23T18:10:00.000Z"
      }
    }"#;

    fn id() -> ResourceId {
        ResourceId::new("1293384261075731499").unwrap()
    }

    #[test]
    fn clearing_sends_explicit_null_and_untouched_fields_are_omitted() {
        let params = UpdatePhoneNumberParams::new()
            .clear_connection_id()
            .with_customer_reference("MY REF 002");
        assert!(params.connection_id().is_null());
        assert_eq!(
            params.to_value().unwrap(),
            json!({"connection_id": null, "customer_reference": "MY REF 002"})
        );
        assert_eq!(UpdatePhoneNumberParams::new().to_value().unwrap(), json!({}));
    }

    #[test]
    fn null_and_absent_survive_a_map_round_trip() {
        let params =
            UpdatePhoneNumberParams::from_value(json!({"billing_group_id": null})).unwrap();
        assert!(params.billing_group_id.is_null());
        assert!(params.connection_id.is_absent());
        assert_eq!(params.to_value().unwrap(), json!({"billing_group_id": null}));
    }

    #[tokio::test]
    async fn list_encodes_filter_and_sort_as_deep_object() {
        let transport = FakeTransport::new(
            200,
            r#"{"data":[],"meta":{"page_number":2,"page_size":50,"total_pages":2,"total_results":51}}"#,
        );
        let client = make_client(transport.clone());

        let params = ListPhoneNumbersParams::new()
            .with_page(PageParams::new(2, 50).unwrap())
            .with_filter(
                PhoneNumberFilter::new()
                    .with_status(PhoneNumberStatus::Active)
                    .with_tag("vip")
                    .with_voice_connection_name(TextMatch::contains("office"))
                    .unwrap(),
            )
            .unwrap()
            .with_sort(PhoneNumberSort::PurchasedAtDesc);
        client.phone_numbers().list(params).await.unwrap();

        assert_eq!(
            transport.last_request().query(),
            vec![
                ("filter[status]".to_owned(), "active".to_owned()),
                ("filter[tag]".to_owned(), "vip".to_owned()),
                (
                    "filter[voice.connection_name][contains]".to_owned(),
                    "office".to_owned()
                ),
                ("page[number]".to_owned(), "2".to_owned()),
                ("page[size]".to_owned(), "50".to_owned()),
                ("sort".to_owned(), "-purchased_at".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn filter_accepts_raw_map() {
        let transport = FakeTransport::new(200, r#"{"data":[]}"#);
        let client = make_client(transport.clone());

        let filter = json!({"phone_number": "970555"});
        let Value::Object(filter) = filter else {
            unreachable!()
        };
        let params = ListPhoneNumbersParams::new().with_filter(filter).unwrap();
        client.phone_numbers().list(params).await.unwrap();

        assert_eq!(
            transport.last_request().query(),
            vec![("filter[phone_number]".to_owned(), "970555".to_owned())]
        );
    }

    #[test]
    fn voice_connection_name_accepts_raw_map() {
        let Value::Object(matcher) = json!({"starts_with": "office"}) else {
            unreachable!()
        };
        let filter = PhoneNumberFilter::new()
            .with_voice_connection_name(matcher)
            .unwrap();
        assert_eq!(
            filter,
            PhoneNumberFilter::new()
                .with_voice_connection_name(TextMatch::starts_with("office"))
                .unwrap()
        );
        assert_eq!(
            filter.to_value().unwrap(),
            json!({"voice.connection_name": {"starts_with": "office"}})
        );

        let err = PhoneNumberFilter::new()
            .with_voice_connection_name(json!({"starts_with": 7}))
            .unwrap_err();
        assert!(matches!(err, ModelError::Invalid { model: "TextMatch", .. }));
    }

    #[tokio::test]
    async fn unknown_status_filter_is_rejected_before_sending() {
        let transport = FakeTransport::new(200, r#"{"data":[]}"#);
        let client = make_client(transport.clone());

        let params = ListPhoneNumbersParams::new()
            .with_filter(PhoneNumberFilter::new().with_status("sleeping"))
            .unwrap();
        let err = client.phone_numbers().list(params).await.unwrap_err();
        assert!(matches!(
            err,
            TelnyxError::Validation(ValidationError::UnknownEnumValue {
                field: "filter[status]",
                ..
            })
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn update_patches_and_decodes_record() {
        let transport = FakeTransport::new(200, RECORD);
        let client = make_client(transport.clone());

        let record = client
            .phone_numbers()
            .update(&id(), UpdatePhoneNumberParams::new().clear_connection_id())
            .await
            .unwrap();
        assert_eq!(record.phone_number, "+19705555098");
        assert_eq!(record.status, Some(EnumValue::Known(PhoneNumberStatus::Active)));
        assert!(record.connection_id.is_none());
        assert_eq!(record.tags, ["tag_1", "tag_2"]);

        let sent = transport.last_request();
        assert_eq!(sent.method, Method::PATCH);
        assert_eq!(sent.url.path(), "/v2/phone_numbers/1293384261075731499");
        assert_eq!(sent.json_body(), json!({"connection_id": null}));
    }

    #[tokio::test]
    async fn retrieve_and_delete_address_the_number() {
        let transport = FakeTransport::scripted(vec![
            (200, RECORD.to_owned()),
            (200, RECORD.to_owned()),
        ]);
        let client = make_client(transport.clone());

        client.phone_numbers().retrieve(&id()).await.unwrap();
        client.phone_numbers().delete(&id()).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[1].method, Method::DELETE);
        assert_eq!(requests[1].url.path(), "/v2/phone_numbers/1293384261075731499");
    }
}
