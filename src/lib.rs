//! Typed Rust client for the Telnyx v2 REST API and its webhook payloads.
//!
//! The crate is layered: a domain layer of strong types and model behaviour (no I/O),
//! a transport layer for wire-format details (deepObject queries, `{"data": ...}`
//! envelopes, error bodies) and a client layer that issues one HTTP request per call.
//! Resources hang off [`TelnyxClient`] as borrowed service handles.
//!
//! ```rust,no_run
//! use telnyx::resources::SendMessageParams;
//! use telnyx::{RawPhoneNumber, TelnyxClientBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), telnyx::TelnyxError> {
//!     let client = TelnyxClientBuilder::from_env()?.build()?;
//!     let params = SendMessageParams::new(RawPhoneNumber::new("+13125550100")?)
//!         .with_from(RawPhoneNumber::new("+13125550199")?)
//!         .with_text("hello");
//!     let message = client.messages().send(params).await?;
//!     println!("queued {}", message.id);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod resources;
mod transport;
pub mod webhooks;

pub use client::{
    ApiError, ApiErrorKind, ApiRequest, Auth, Paginated, RawResponse, TelnyxClient,
    TelnyxClientBuilder, TelnyxError,
};
pub use domain::{
    ApiKey, EnumValue, IntoModel, Model, ModelError, Nullable, PageMeta, PageParams, PhoneNumber,
    RawPhoneNumber, ResourceId, Timestamp, ValidationError, WireEnum,
};
pub use transport::{ApiErrorDetail, ApiErrorSource};
