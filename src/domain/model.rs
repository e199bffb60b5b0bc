//! Base behaviour shared by every request/response shape.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error)]
/// A JSON payload could not be turned into (or out of) a typed model.
pub enum ModelError {
    /// The payload is missing a required field or carries a value of the wrong type.
    #[error("payload does not match {model}: {source}")]
    Invalid {
        model: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The model serialized to something other than a JSON object.
    #[error("{model} did not serialize to a JSON object")]
    NotAnObject { model: &'static str },

    /// No candidate of a union accepted the payload.
    #[error("payload matches no variant of {union}: {payload}")]
    NoVariant { union: &'static str, payload: Value },

    /// More than one candidate of a union accepted the payload.
    #[error("payload matches several variants of {union} ({candidates:?}): {payload}")]
    AmbiguousVariant {
        union: &'static str,
        candidates: Vec<&'static str>,
        payload: Value,
    },
}

/// A typed representation of one JSON object shape.
///
/// Implementors only declare [`Model::NAME`]; conversions come from their serde impls.
pub trait Model: Serialize + DeserializeOwned {
    /// Name used in error messages.
    const NAME: &'static str;

    fn from_value(value: Value) -> Result<Self, ModelError> {
        serde_json::from_value(value).map_err(|source| ModelError::Invalid {
            model: Self::NAME,
            source,
        })
    }

    fn from_map(map: Map<String, Value>) -> Result<Self, ModelError> {
        Self::from_value(Value::Object(map))
    }

    fn to_value(&self) -> Result<Value, ModelError> {
        serde_json::to_value(self).map_err(|source| ModelError::Invalid {
            model: Self::NAME,
            source,
        })
    }

    fn to_map(&self) -> Result<Map<String, Value>, ModelError> {
        match self.to_value()? {
            Value::Object(map) => Ok(map),
            _ => Err(ModelError::NotAnObject { model: Self::NAME }),
        }
    }
}

/// Anything that can be normalized into a model: the model itself or a raw JSON map.
pub trait IntoModel<T: Model> {
    fn into_model(self) -> Result<T, ModelError>;
}

impl<T: Model> IntoModel<T> for T {
    fn into_model(self) -> Result<T, ModelError> {
        Ok(self)
    }
}

impl<T: Model> IntoModel<T> for Map<String, Value> {
    fn into_model(self) -> Result<T, ModelError> {
        T::from_map(self)
    }
}

impl<T: Model> IntoModel<T> for Value {
    fn into_model(self) -> Result<T, ModelError> {
        T::from_value(self)
    }
}

/// Normalize a list whose elements are models or raw maps, element-wise.
pub fn collect_models<T, I, M>(items: I) -> Result<Vec<T>, ModelError>
where
    T: Model,
    I: IntoIterator<Item = M>,
    M: IntoModel<T>,
{
    items.into_iter().map(IntoModel::into_model).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Field that distinguishes "never set" from "explicitly null".
///
/// Use with `#[serde(default, skip_serializing_if = "Nullable::is_absent")]`.
pub enum Nullable<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Nullable<T> {
    /// `true` when the field is left out of the body.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// `true` when the field is sent as `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The value, if one is set.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }
}

impl<T> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::Absent | Self::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    // Only reached when the key is present; absent keys fall back to `Default`.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Self::Value(value),
            None => Self::Null,
        })
    }
}

/// Declare a zero-sized discriminant that always serializes as one fixed string.
macro_rules! literal_tag {
    ($(#[$meta:meta])* $vis:vis $name:ident = $literal:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $name {
            pub const VALUE: &'static str = $literal;

            /// The literal discriminant.
            pub fn as_str(self) -> &'static str {
                Self::VALUE
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(Self::VALUE)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Self, D::Error> {
                let value = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                if value == Self::VALUE {
                    Ok(Self)
                } else {
                    Err(<D::Error as ::serde::de::Error>::invalid_value(
                        ::serde::de::Unexpected::Str(&value),
                        &Self::VALUE,
                    ))
                }
            }
        }
    };
}

pub(crate) use literal_tag;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    literal_tag!(MediaNameTag = "media_name");

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(rename = "type")]
        kind: MediaNameTag,
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note: Option<String>,
        #[serde(default, skip_serializing_if = "Nullable::is_absent")]
        parent: Nullable<String>,
        #[serde(rename = "evpID", default, skip_serializing_if = "Option::is_none")]
        evp_id: Option<String>,
        #[serde(flatten)]
        extra: Map<String, Value>,
    }

    impl Model for Sample {
        const NAME: &'static str = "Sample";
    }

    #[test]
    fn literal_tag_serializes_without_being_set() {
        let sample = Sample {
            kind: MediaNameTag,
            name: "hold".to_owned(),
            note: None,
            parent: Nullable::Absent,
            evp_id: None,
            extra: Map::new(),
        };
        assert_eq!(
            sample.to_value().unwrap(),
            json!({"type": "media_name", "name": "hold"})
        );
    }

    #[test]
    fn literal_tag_rejects_other_values() {
        let err = Sample::from_value(json!({"type": "media_url", "name": "x"})).unwrap_err();
        assert!(matches!(err, ModelError::Invalid { model: "Sample", .. }));
    }

    #[test]
    fn nullable_keeps_null_and_absent_apart() {
        let absent = Sample::from_value(json!({"type": "media_name", "name": "a"})).unwrap();
        assert!(absent.parent.is_absent());

        let null =
            Sample::from_value(json!({"type": "media_name", "name": "a", "parent": null})).unwrap();
        assert!(null.parent.is_null());
        assert_eq!(
            null.to_value().unwrap(),
            json!({"type": "media_name", "name": "a", "parent": null})
        );

        let set = Sample::from_value(json!({"type": "media_name", "name": "a", "parent": "p"}))
            .unwrap();
        assert_eq!(set.parent.value().map(String::as_str), Some("p"));
    }

    #[test]
    fn irregular_wire_names_map_both_ways() {
        let sample =
            Sample::from_value(json!({"type": "media_name", "name": "a", "evpID": "e-1"})).unwrap();
        assert_eq!(sample.evp_id.as_deref(), Some("e-1"));
        assert!(sample.extra.is_empty());
        assert_eq!(sample.to_map().unwrap().get("evpID"), Some(&json!("e-1")));
    }

    #[test]
    fn unknown_keys_survive_a_round_trip() {
        let payload = json!({"type": "media_name", "name": "a", "added_later": {"x": 1}});
        let sample = Sample::from_value(payload.clone()).unwrap();
        assert_eq!(sample.extra.get("added_later"), Some(&json!({"x": 1})));
        assert_eq!(sample.to_value().unwrap(), payload);
    }

    #[test]
    fn into_model_accepts_instances_and_raw_maps() {
        let from_map: Sample = json!({"type": "media_name", "name": "a"})
            .as_object()
            .cloned()
            .unwrap()
            .into_model()
            .unwrap();
        let from_instance: Sample = from_map.clone().into_model().unwrap();
        assert_eq!(from_map, from_instance);

        let listed: Vec<Sample> = collect_models(vec![
            json!({"type": "media_name", "name": "a"}),
            json!({"type": "media_name", "name": "b"}),
        ])
        .unwrap();
        assert_eq!(listed[1].name, "b");
    }

    #[test]
    fn missing_required_field_is_reported_with_model_name() {
        let err = Sample::from_value(json!({"type": "media_name"})).unwrap_err();
        match err {
            ModelError::Invalid { model, source } => {
                assert_eq!(model, "Sample");
                assert!(source.to_string().contains("name"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
