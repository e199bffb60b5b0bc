use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty {
        field: &'static str,
    },
    InvalidPhoneNumber {
        input: String,
    },
    UnknownEnumValue {
        field: &'static str,
        value: String,
    },
    PageNumberOutOfRange {
        actual: u32,
    },
    PageSizeOutOfRange {
        min: u32,
        max: u32,
        actual: u32,
    },
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        actual: i64,
    },
    DotSegment {
        field: &'static str,
        value: String,
    },
    InvalidTimestamp {
        input: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::UnknownEnumValue { field, value } => {
                write!(f, "{field} does not accept value {value:?}")
            }
            Self::PageNumberOutOfRange { actual } => {
                write!(f, "page number must be at least 1 (got {actual})")
            }
            Self::PageSizeOutOfRange { min, max, actual } => {
                write!(f, "page size out of range: {actual} (expected {min}..={max})")
            }
            Self::OutOfRange {
                field,
                min,
                max,
                actual,
            } => write!(
                f,
                "{field} out of range: {actual} (expected {min}..={max})"
            ),
            Self::DotSegment { field, value } => {
                write!(f, "{field} must not be the path segment {value:?}")
            }
            Self::InvalidTimestamp { input } => {
                write!(f, "invalid RFC 3339 timestamp: {input:?}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty {
            field: "phone_number",
        };
        assert_eq!(err.to_string(), "phone_number must not be empty");

        let err = ValidationError::InvalidPhoneNumber {
            input: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid phone number: bad");

        let err = ValidationError::UnknownEnumValue {
            field: "verification_method",
            value: "fax".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "verification_method does not accept value \"fax\""
        );

        let err = ValidationError::PageNumberOutOfRange { actual: 0 };
        assert_eq!(err.to_string(), "page number must be at least 1 (got 0)");

        let err = ValidationError::PageSizeOutOfRange {
            min: 1,
            max: 250,
            actual: 251,
        };
        assert_eq!(
            err.to_string(),
            "page size out of range: 251 (expected 1..=250)"
        );

        let err = ValidationError::OutOfRange {
            field: "channels",
            min: 0,
            max: 10,
            actual: -1,
        };
        assert_eq!(
            err.to_string(),
            "channels out of range: -1 (expected 0..=10)"
        );

        let err = ValidationError::DotSegment {
            field: "id",
            value: "..".to_owned(),
        };
        assert_eq!(err.to_string(), "id must not be the path segment \"..\"");

        let err = ValidationError::InvalidTimestamp {
            input: "yesterday".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid RFC 3339 timestamp: \"yesterday\"");
    }
}
