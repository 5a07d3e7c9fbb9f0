//! Listing page query.

use crate::error::{AppError, Result};

/// One listing page request: subject plus pagination window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub subject_id: String,
    pub offset: u32,
    pub page_size: u32,
}

impl PageQuery {
    /// Query for the zero-based page `page_index`.
    ///
    /// Fails when the offset does not fit in a `u32`.
    pub fn for_page(subject_id: &str, page_index: u32, page_size: u32) -> Result<Self> {
        let offset = page_index.checked_mul(page_size).ok_or_else(|| {
            AppError::validation(format!(
                "Listing offset overflows for page {} with page size {}",
                page_index, page_size
            ))
        })?;

        Ok(Self {
            subject_id: subject_id.to_string(),
            offset,
            page_size,
        })
    }

    /// Request parameters: fixed sort/filter/display plus the offset.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        listing_params(self.offset)
    }
}

/// Listing request parameters for `offset`.
///
/// Sorted by recency, no rating or type filtering, grid display mode.
pub fn listing_params(offset: u32) -> Vec<(&'static str, String)> {
    vec![
        ("start", offset.to_string()),
        ("sort", "time".to_string()),
        ("rating", "all".to_string()),
        ("filter", "all".to_string()),
        ("mode", "grid".to_string()),
        ("type", "all".to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_advances_by_page_size() {
        assert_eq!(PageQuery::for_page("u", 0, 15).unwrap().offset, 0);
        assert_eq!(PageQuery::for_page("u", 3, 15).unwrap().offset, 45);
    }

    #[test]
    fn offset_overflow_is_an_error() {
        let err = PageQuery::for_page("u", 2, 1u32 << 31).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(PageQuery::for_page("u", 1, 1u32 << 31).unwrap().offset, 1u32 << 31);
    }

    #[test]
    fn params_carry_offset_and_fixed_shape() {
        let params = PageQuery::for_page("u", 2, 15).unwrap().params();
        assert!(params.contains(&("start", "30".to_string())));
        assert!(params.contains(&("sort", "time".to_string())));
        assert!(params.contains(&("mode", "grid".to_string())));
        assert_eq!(params.len(), 6);
    }
}
