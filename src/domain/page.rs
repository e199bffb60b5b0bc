use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Page selection sent as `page[number]` / `page[size]`.
pub struct PageParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<u32>,
}

impl PageParams {
    pub const MIN_SIZE: u32 = 1;
    pub const MAX_SIZE: u32 = 250;

    /// Create a validated page selection.
    pub fn new(number: u32, size: u32) -> Result<Self, ValidationError> {
        Self::default().with_number(number)?.with_size(size)
    }

    /// Select a page; numbering starts at 1.
    pub fn with_number(mut self, number: u32) -> Result<Self, ValidationError> {
        if number < 1 {
            return Err(ValidationError::PageNumberOutOfRange { actual: number });
        }
        self.number = Some(number);
        Ok(self)
    }

    /// Set the page size, within `MIN_SIZE..=MAX_SIZE`.
    pub fn with_size(mut self, size: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN_SIZE..=Self::MAX_SIZE).contains(&size) {
            return Err(ValidationError::PageSizeOutOfRange {
                min: Self::MIN_SIZE,
                max: Self::MAX_SIZE,
                actual: size,
            });
        }
        self.size = Some(size);
        Ok(self)
    }

    /// Requested page number, if set.
    pub fn number(&self) -> Option<u32> {
        self.number
    }

    /// Requested page size, if set.
    pub fn size(&self) -> Option<u32> {
        self.size
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Page metadata returned next to list results.
pub struct PageMeta {
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_results: u64,
}

impl PageMeta {
    /// `true` while `page_number` is below `total_pages`.
    pub fn has_next_page(&self) -> bool {
        self.page_number < self.total_pages
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One page of list results as decoded from the wire (`{"data": [...], "meta": {...}}`).
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn page_params_validate_ranges() {
        assert!(PageParams::new(1, 1).is_ok());
        assert!(PageParams::new(3, 250).is_ok());
        assert_eq!(
            PageParams::new(0, 20),
            Err(ValidationError::PageNumberOutOfRange { actual: 0 })
        );
        assert!(matches!(
            PageParams::new(1, 251),
            Err(ValidationError::PageSizeOutOfRange { actual: 251, .. })
        ));
    }

    #[test]
    fn unset_page_fields_are_omitted() {
        let params = PageParams::default().with_size(5).unwrap();
        assert_eq!(serde_json::to_value(params).unwrap(), json!({"size": 5}));
    }

    #[test]
    fn meta_reports_next_page() {
        let meta: PageMeta = serde_json::from_value(json!({
            "page_number": 2,
            "page_size": 2,
            "total_pages": 3,
            "total_results": 6
        }))
        .unwrap();
        assert!(meta.has_next_page());

        let last = PageMeta {
            page_number: 3,
            ..meta
        };
        assert!(!last.has_next_page());
    }
}
