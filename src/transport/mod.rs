//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod envelope;
mod path;
mod query;

pub use envelope::{
    ApiErrorDetail, ApiErrorSource, decode_bare, decode_data, decode_error_details, decode_page,
};
pub use path::expand_path;
pub use query::encode_query;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("path template {template} expects {expected} segment(s), got {actual}")]
    PathArity {
        template: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("path template {template} refuses dot segment {value:?}")]
    DotSegment {
        template: &'static str,
        value: String,
    },

    #[error("base URL cannot carry path segments: {base}")]
    CannotBeABase { base: String },
}
