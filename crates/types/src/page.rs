use serde::{Deserialize, Serialize};

/// One fixed-size batch as returned natively by the upstream catalog.
///
/// The upstream always pages in batches of [`Page::UPSTREAM_PAGE_SIZE`]
/// items and never serves more than [`Page::MAX_PAGES`] pages, however
/// large `total_results` is.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub page: u32,
    pub results: Vec<T>,
    pub total_pages: u32,
    pub total_results: u32,
}

impl<T> Page<T> {
    pub const UPSTREAM_PAGE_SIZE: u32 = 20;
    pub const MAX_PAGES: u32 = 500;

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::Movie;

    #[test]
    fn test_decode_page_envelope() {
        let raw = r#"{
            "page": 3,
            "results": [{"id": 11, "title": "Star Wars"}],
            "total_pages": 500,
            "total_results": 10000
        }"#;
        let page: Page<Movie> = serde_json::from_str(raw).unwrap();
        assert_eq!(page.page, 3);
        assert_eq!(page.len(), 1);
        assert_eq!(page.results[0].title, "Star Wars");
        assert_eq!(page.total_results, 10000);
    }
}
