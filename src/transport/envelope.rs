use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::TransportError;
use crate::domain::Page;

#[derive(Debug, Clone, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// Decode a body shaped as `{"data": T}`.
pub fn decode_data<T: DeserializeOwned>(json: &str) -> Result<T, TransportError> {
    let parsed: DataEnvelope<T> = serde_json::from_str(json)?;
    Ok(parsed.data)
}

/// Decode a body that is the model itself, without an envelope.
pub fn decode_bare<T: DeserializeOwned>(json: &str) -> Result<T, TransportError> {
    Ok(serde_json::from_str(json)?)
}

/// Decode a list body shaped as `{"data": [T], "meta": {...}}`.
pub fn decode_page<T: DeserializeOwned>(json: &str) -> Result<Page<T>, TransportError> {
    Ok(serde_json::from_str(json)?)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
/// One entry of the `errors` array Telnyx returns with non-2xx responses.
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub source: Option<ApiErrorSource>,
    #[serde(default)]
    pub meta: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
/// Location of the offending input for an [`ApiErrorDetail`].
pub struct ApiErrorSource {
    #[serde(default)]
    pub pointer: Option<String>,
    #[serde(default)]
    pub parameter: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

/// Best-effort decoding of an error body; anything unparseable yields no details.
pub fn decode_error_details(json: &str) -> Vec<ApiErrorDetail> {
    serde_json::from_str::<ErrorEnvelope>(json)
        .map(|parsed| parsed.errors)
        .unwrap_or_default()
}
