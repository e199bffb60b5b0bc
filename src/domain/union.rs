//! Resolution of payloads whose shape is one of several alternative models.

use serde_json::Value;

use crate::domain::model::{Model, ModelError};

/// One candidate shape of a union.
pub struct Variant<U> {
    pub name: &'static str,
    pub parse: fn(Value) -> Result<U, ModelError>,
}

impl<U> Variant<U> {
    pub const fn new(name: &'static str, parse: fn(Value) -> Result<U, ModelError>) -> Self {
        Self { name, parse }
    }
}

/// Trial-parse `payload` against every candidate.
///
/// Exactly one accepting candidate resolves the union. Zero or several are errors; the
/// declaration order of `variants` only determines the order of names in the error.
pub fn resolve_union<U>(
    union: &'static str,
    payload: Value,
    variants: &[Variant<U>],
) -> Result<U, ModelError> {
    let mut matched = Vec::<(&'static str, U)>::new();
    for variant in variants {
        if let Ok(value) = (variant.parse)(payload.clone()) {
            matched.push((variant.name, value));
        }
    }

    if matched.len() > 1 {
        return Err(ModelError::AmbiguousVariant {
            union,
            candidates: matched.into_iter().map(|(name, _)| name).collect(),
            payload,
        });
    }

    match matched.pop() {
        Some((_, value)) => Ok(value),
        None => Err(ModelError::NoVariant { union, payload }),
    }
}

/// Parse one candidate model; for use in [`Variant`] tables.
pub fn parse_variant<M: Model>(payload: Value) -> Result<M, ModelError> {
    M::from_value(payload)
}
