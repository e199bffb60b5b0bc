//! Closed string enums and their forward-compatible wrapper.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::validation::ValidationError;

/// Closed set of wire strings for one field.
pub trait WireEnum: Copy + Eq + 'static {
    /// Name used in validation errors.
    const NAME: &'static str;
    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    fn as_wire(self) -> &'static str;

    fn from_wire(value: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.as_wire() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Enum-typed field value: a known variant or a wire string this crate does not know.
///
/// Unknown values are preserved when decoding responses. Request validation rejects them.
pub enum EnumValue<E> {
    Known(E),
    Other(String),
}

impl<E: WireEnum> EnumValue<E> {
    /// Resolve a raw wire string, falling back to [`EnumValue::Other`].
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        match E::from_wire(&raw) {
            Some(known) => Self::Known(known),
            None => Self::Other(raw),
        }
    }

    /// Wire string, whether known or not.
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Known(known) => known.as_wire(),
            Self::Other(raw) => raw,
        }
    }

    /// The known variant, or `None` for an unrecognized value.
    pub fn known(&self) -> Option<E> {
        match self {
            Self::Known(known) => Some(*known),
            Self::Other(_) => None,
        }
    }

    /// Reject values outside the closed set; used before a request is sent.
    pub fn require_known(&self, field: &'static str) -> Result<E, ValidationError> {
        match self {
            Self::Known(known) => Ok(*known),
            Self::Other(raw) => Err(ValidationError::UnknownEnumValue {
                field,
                value: raw.clone(),
            }),
        }
    }
}

impl<E: WireEnum> From<&str> for EnumValue<E> {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl<E: WireEnum> From<String> for EnumValue<E> {
    fn from(value: String) -> Self {
        Self::parse(value)
    }
}

impl<E: WireEnum> fmt::Display for EnumValue<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl<E: WireEnum> Serialize for EnumValue<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de, E: WireEnum> Deserialize<'de> for EnumValue<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(raw))
    }
}

/// Validate an optional enum field of a request.
pub(crate) fn require_known_opt<E: WireEnum>(
    value: Option<&EnumValue<E>>,
    field: &'static str,
) -> Result<(), ValidationError> {
    if let Some(value) = value {
        value.require_known(field)?;
    }
    Ok(())
}

/// Declare a closed wire enum with `Display`, `FromStr`, serde and [`WireEnum`] impls.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident = $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl $crate::domain::WireEnum for $name {
            const NAME: &'static str = stringify!($name);
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            fn as_wire(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::domain::WireEnum::as_wire(*self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::domain::ValidationError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                <Self as $crate::domain::WireEnum>::from_wire(value).ok_or_else(|| {
                    $crate::domain::ValidationError::UnknownEnumValue {
                        field: stringify!($name),
                        value: value.to_owned(),
                    }
                })
            }
        }

        impl From<$name> for $crate::domain::EnumValue<$name> {
            fn from(value: $name) -> Self {
                Self::Known(value)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::domain::WireEnum::as_wire(*self))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Self, D::Error> {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                <Self as $crate::domain::WireEnum>::from_wire(&raw).ok_or_else(|| {
                    <D::Error as ::serde::de::Error>::unknown_variant(
                        &raw,
                        &[$($wire),+],
                    )
                })
            }
        }
    };
}

pub(crate) use wire_enum;
