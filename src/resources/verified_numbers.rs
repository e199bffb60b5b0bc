//! Verified numbers: caller-owned numbers proven by an SMS or call code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{ApiRequest, Paginated, TelnyxClient, TelnyxError};
use crate::domain::{
    EnumValue, IntoModel, Model, PageParams, RawPhoneNumber, ValidationError, wire_enum,
};

wire_enum! {
    /// How the verification code is delivered.
    pub enum VerificationMethod {
        Sms = "sms",
        Call = "call",
        Flashcall = "flashcall",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Body of `POST /verified_numbers`.
pub struct CreateVerifiedNumberParams {
    phone_number: RawPhoneNumber,
    verification_method: EnumValue<VerificationMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    extension: Option<String>,
}

impl CreateVerifiedNumberParams {
    /// Verification of `phone_number` by SMS or call.
    pub fn new(
        phone_number: RawPhoneNumber,
        verification_method: impl Into<EnumValue<VerificationMethod>>,
    ) -> Self {
        Self {
            phone_number,
            verification_method: verification_method.into(),
            extension: None,
        }
    }

    /// DTMF extension dialed after the call connects (call verification only).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Number to verify.
    pub fn phone_number(&self) -> &RawPhoneNumber {
        &self.phone_number
    }

    /// How the code is delivered.
    pub fn verification_method(&self) -> &EnumValue<VerificationMethod> {
        &self.verification_method
    }

    /// DTMF extension, if set.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Reject unknown verification methods.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.verification_method
            .require_known("verification_method")?;
        Ok(())
    }
}

impl Model for CreateVerifiedNumberParams {
    const NAME: &'static str = "CreateVerifiedNumberParams";
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
/// Query of `GET /verified_numbers`.
pub struct ListVerifiedNumbersParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page: Option<PageParams>,
}

impl ListVerifiedNumbersParams {
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

impl Model for ListVerifiedNumbersParams {
    const NAME: &'static str = "ListVerifiedNumbersParams";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Body of `POST /verified_numbers/{phone_number}/actions/verify`.
pub struct VerifyCodeParams {
    verification_code: String,
}

impl VerifyCodeParams {
    pub const FIELD: &'static str = "verification_code";

    /// Code as received; must not be blank.
    pub fn new(verification_code: impl Into<String>) -> Result<Self, ValidationError> {
        let verification_code = verification_code.into();
        if verification_code.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self { verification_code })
    }

    /// The code.
    pub fn verification_code(&self) -> &str {
        &self.verification_code
    }

    /// Reject a blank code.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.verification_code.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(())
    }
}

impl Model for VerifyCodeParams {
    const NAME: &'static str = "VerifyCodeParams";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Answer to a verification request; the code is on its way.
pub struct VerificationRequested {
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_method: Option<EnumValue<VerificationMethod>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Model for VerificationRequested {
    const NAME: &'static str = "VerificationRequested";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiedNumber {
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Model for VerifiedNumber {
    const NAME: &'static str = "VerifiedNumber";
}

/// Service handle returned by [`TelnyxClient::verified_numbers`].
#[derive(Debug, Clone, Copy)]
pub struct VerifiedNumbers<'c> {
    client: &'c TelnyxClient,
}

impl TelnyxClient {
    /// Numbers verified for use as caller ID or message sender.
    pub fn verified_numbers(&self) -> VerifiedNumbers<'_> {
        VerifiedNumbers { client: self }
    }
}

impl<'c> VerifiedNumbers<'c> {
    /// Start verification of a number by sending a code over SMS or a call.
    pub async fn create(
        &self,
        params: impl IntoModel<CreateVerifiedNumberParams>,
    ) -> Result<VerificationRequested, TelnyxError> {
        let params = params.into_model()?;
        params.validate()?;
        let request = ApiRequest::post("/verified_numbers").json(&params)?;
        self.client.send_data(request).await
    }

    /// List verified numbers, one page at a time.
    pub async fn list(
        &self,
        params: impl IntoModel<ListVerifiedNumbersParams>,
    ) -> Result<Paginated<'c, VerifiedNumber>, TelnyxError> {
        let params = params.into_model()?;
        let request = ApiRequest::get("/verified_numbers").query(&params)?;
        self.client.send_page(request).await
    }

    /// Fetch one verified number.
    pub async fn retrieve(
        &self,
        phone_number: &RawPhoneNumber,
    ) -> Result<VerifiedNumber, TelnyxError> {
        let request = ApiRequest::get("/verified_numbers/{}").segment(phone_number.raw());
        self.client.send_data(request).await
    }

    /// Remove a verified number; the deleted record is returned.
    pub async fn delete(
        &self,
        phone_number: &RawPhoneNumber,
    ) -> Result<VerifiedNumber, TelnyxError> {
        let request = ApiRequest::delete("/verified_numbers/{}").segment(phone_number.raw());
        self.client.send_data(request).await
    }

    /// Submit the code received on `phone_number`.
    pub async fn verify(
        &self,
        phone_number: &RawPhoneNumber,
        params: impl IntoModel<VerifyCodeParams>,
    ) -> Result<VerifiedNumber, TelnyxError> {
        let params = params.into_model()?;
        params.validate()?;
        let request = ApiRequest::post("/verified_numbers/{}/actions/verify")
            .segment(phone_number.raw())
            .json(&params)?;
        self.client.send_data(request).await
    }
}
