use reqwest::Method;
use serde_json::{Map, Value};

use crate::domain::{Model, ModelError};

#[derive(Debug, Clone, PartialEq)]
/// Description of one API call: method, templated path, deepObject query and JSON body.
///
/// Services build these; [`crate::TelnyxClient::send_raw`] accepts them for endpoints this
/// crate has no typed service for.
pub struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) template: &'static str,
    pub(crate) segments: Vec<String>,
    pub(crate) query: Option<Value>,
    pub(crate) body: Option<Value>,
}

impl ApiRequest {
    /// Request with no segments, query or body yet.
    pub fn new(method: Method, template: &'static str) -> Self {
        Self {
            method,
            template,
            segments: Vec::new(),
            query: None,
            body: None,
        }
    }

    /// `GET` request for `template`.
    pub fn get(template: &'static str) -> Self {
        Self::new(Method::GET, template)
    }

    /// `POST` request for `template`.
    pub fn post(template: &'static str) -> Self {
        Self::new(Method::POST, template)
    }

    /// `PUT` request for `template`.
    pub fn put(template: &'static str) -> Self {
        Self::new(Method::PUT, template)
    }

    /// `PATCH` request for `template`.
    pub fn patch(template: &'static str) -> Self {
        Self::new(Method::PATCH, template)
    }

    /// `DELETE` request for `template`.
    pub fn delete(template: &'static str) -> Self {
        Self::new(Method::DELETE, template)
    }

    /// Fill the next `{}` placeholder of the path template.
    pub fn segment(mut self, value: impl Into<String>) -> Self {
        self.segments.push(value.into());
        self
    }

    /// Use the serialized model as the deepObject query string.
    pub fn query<M: Model>(mut self, params: &M) -> Result<Self, ModelError> {
        self.query = Some(params.to_value()?);
        Ok(self)
    }

    /// Use the serialized model as the JSON body.
    pub fn json<M: Model>(mut self, params: &M) -> Result<Self, ModelError> {
        self.body = Some(params.to_value()?);
        Ok(self)
    }

    /// HTTP method of the request.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Unexpanded path template, e.g. `/sim_cards/{}`; used as the log field `path`.
    pub fn template(&self) -> &'static str {
        self.template
    }

    /// `page[number]` of the query, if set.
    pub fn page_number(&self) -> Option<u64> {
        self.query
            .as_ref()
            .and_then(|query| query.get("page"))
            .and_then(|page| page.get("number"))
            .and_then(Value::as_u64)
    }

    /// Same request for another page, keeping every other query parameter.
    pub(crate) fn with_page_number(&self, number: u32) -> Self {
        let mut next = self.clone();
        let query = next
            .query
            .get_or_insert_with(|| Value::Object(Map::new()));
        if !query.is_object() {
            *query = Value::Object(Map::new());
        }
        if let Value::Object(map) = query {
            let page = map
                .entry("page")
                .or_insert_with(|| Value::Object(Map::new()));
            if !page.is_object() {
                *page = Value::Object(Map::new());
            }
            if let Value::Object(page) = page {
                page.insert("number".to_owned(), Value::from(number));
            }
        }
        next
    }
}
