//! Domain layer: model base behaviour and strong types with validation (no I/O).

mod enums;
mod model;
mod page;
mod union;
mod validation;
mod value;

pub(crate) use enums::{require_known_opt, wire_enum};
pub use enums::{EnumValue, WireEnum};
pub(crate) use model::literal_tag;
pub use model::{IntoModel, Model, ModelError, Nullable, collect_models};
pub use page::{Page, PageMeta, PageParams};
pub use union::{Variant, parse_variant, resolve_union};
pub use validation::ValidationError;
pub use value::{ApiKey, PhoneNumber, RawPhoneNumber, ResourceId, Timestamp};
