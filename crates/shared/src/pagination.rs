//! Page-based pagination types shared across list endpoints.

use serde::{Deserialize, Serialize};

/// Default page size for list endpoints.
pub const DEFAULT_PER_PAGE: i32 = 50;

/// Maximum page size accepted from clients.
pub const MAX_PER_PAGE: i32 = 100;

/// Query parameters for page-based pagination.
#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct PageParams {
    pub page: Option<i32>,
    pub per_page: Option<i32>,
}

impl PageParams {
    /// Normalized page number (1-based).
    pub fn page(&self) -> i32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Normalized page size, clamped to `1..=MAX_PER_PAGE`.
    pub fn per_page(&self) -> i32 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
    }

    /// SQL OFFSET for the normalized page. Widened to `i64` before the
    /// multiply so a huge `page` cannot overflow.
    pub fn offset(&self) -> i64 {
        i64::from(self.page() - 1) * i64::from(self.per_page())
    }

    /// SQL LIMIT for the normalized page.
    pub fn limit(&self) -> i64 {
        self.per_page() as i64
    }
}

/// Pagination metadata returned alongside list data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PageInfo {
    pub page: i32,
    pub per_page: i32,
    pub total: i64,
    pub total_pages: i32,
}

impl PageInfo {
    /// Build pagination metadata from normalized params and a total count.
    pub fn new(params: &PageParams, total: i64) -> Self {
        let per_page = params.per_page();
        let total_pages = ((total as f64) / (per_page as f64)).ceil() as i32;
        Self {
            page: params.page(),
            per_page,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_params_defaults() {
        let params = PageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), DEFAULT_PER_PAGE);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_page_params_clamping() {
        let params = PageParams {
            page: Some(0),
            per_page: Some(10_000),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), MAX_PER_PAGE);

        let params = PageParams {
            page: Some(-3),
            per_page: Some(0),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), 1);
    }

    #[test]
    fn test_page_params_offset() {
        let params = PageParams {
            page: Some(3),
            per_page: Some(25),
        };
        assert_eq!(params.offset(), 50);
        assert_eq!(params.limit(), 25);
    }

    #[test]
    fn test_offset_survives_max_page() {
        let params = PageParams {
            page: Some(i32::MAX),
            per_page: Some(MAX_PER_PAGE),
        };
        assert_eq!(
            params.offset(),
            i64::from(i32::MAX - 1) * i64::from(MAX_PER_PAGE)
        );
    }

    #[test]
    fn test_page_info_total_pages() {
        let params = PageParams {
            page: Some(1),
            per_page: Some(10),
        };
        assert_eq!(PageInfo::new(&params, 0).total_pages, 0);
        assert_eq!(PageInfo::new(&params, 10).total_pages, 1);
        assert_eq!(PageInfo::new(&params, 11).total_pages, 2);
        assert_eq!(PageInfo::new(&params, 95).total_pages, 10);
    }

    #[test]
    fn test_page_info_serialization() {
        let params = PageParams {
            page: Some(2),
            per_page: Some(20),
        };
        let info = PageInfo::new(&params, 45);
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"page\":2"));
        assert!(json.contains("\"total\":45"));
        assert!(json.contains("\"total_pages\":3"));
    }
}
