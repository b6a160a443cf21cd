//! Offset pagination contract for catalog listings.

use serde::{Deserialize, Serialize};

/// A page request. `page` is 1-based.
///
/// Values below 1 never reach the service; the API boundary rejects
/// them before the core runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

impl PageRequest {
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        let defaults = Self::default();
        Self {
            page: page.unwrap_or(defaults.page),
            limit: limit.unwrap_or(defaults.limit),
        }
    }

    /// Rows to skip before the requested page starts.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// Listing metadata returned alongside a page of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: u32,
    pub total_products: u64,
    pub total_pages: u64,
}

impl PageMeta {
    pub fn new(request: PageRequest, total_products: u64) -> Self {
        Self {
            current_page: request.page,
            total_products,
            total_pages: total_products.div_ceil(u64::from(request.limit)),
        }
    }
}

/// One page of rows plus its metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn defaults_are_first_page_of_ten() {
        let request = PageRequest::new(None, None);
        assert_eq!(request, PageRequest { page: 1, limit: 10 });
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let request = PageRequest::new(Some(3), Some(25));
        assert_eq!(request.offset(), 50);
    }

    #[test]
    fn empty_listing_has_zero_pages() {
        let meta = PageMeta::new(PageRequest::default(), 0);
        assert_eq!(meta.total_pages, 0);
        assert_eq!(meta.total_products, 0);
    }

    #[test]
    fn meta_serializes_with_camel_case_keys() {
        let meta = PageMeta::new(PageRequest { page: 2, limit: 10 }, 35);
        let json = serde_json::to_value(meta).unwrap();
        assert_eq!(json["currentPage"], 2);
        assert_eq!(json["totalProducts"], 35);
        assert_eq!(json["totalPages"], 4);
    }

    proptest! {
        #[test]
        fn total_pages_is_ceiling_division(total in 0u64..100_000, limit in 1u32..1_000) {
            let meta = PageMeta::new(PageRequest { page: 1, limit }, total);
            let limit = u64::from(limit);
            prop_assert_eq!(meta.total_pages, (total + limit - 1) / limit);
        }

        #[test]
        fn last_page_holds_the_remainder(total in 1u64..100_000, limit in 1u32..1_000) {
            let meta = PageMeta::new(PageRequest { page: 1, limit }, total);
            let limit = u64::from(limit);
            let on_last_page = total - (meta.total_pages - 1) * limit;
            let expected = if total % limit == 0 { limit } else { total % limit };
            prop_assert_eq!(on_last_page, expected);
        }
    }
}
