use metflix_types::page::Page;

/// The upstream never serves more than this many pages, so derived
/// application page counts are capped to match.
pub const MAX_VISIBLE_PAGES: u32 = 500;

#[derive(Debug, Clone, Copy)]
pub struct WindowConfig {
    pub target_page_size: u32,
    pub upstream_page_size: u32,
}

impl WindowConfig {
    const DEFAULT_TARGET_PAGE_SIZE: u32 = 28;

    pub fn new(target_page_size: u32, upstream_page_size: u32) -> Self {
        assert!(target_page_size > 0);
        assert!(upstream_page_size > 0);
        Self {
            target_page_size,
            upstream_page_size,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_TARGET_PAGE_SIZE,
            Page::<()>::UPSTREAM_PAGE_SIZE,
        )
    }
}

/// Which upstream pages cover one application window, and where the
/// window starts inside their concatenation.
///
/// `pages_to_fetch` is `ceil(target / upstream)` regardless of where
/// the window starts, so a window landing deep enough into its first
/// upstream page runs past the fetched span and comes back short even
/// when upstream has more data. Callers rely on that exact behavior;
/// see `tests::short_window_at_offset_sixteen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPlan {
    pub first_upstream_page: u32,
    pub pages_to_fetch: u32,
    pub offset: u32,
}

impl WindowPlan {
    /// Plan the fetch for 1-based `application_page`.
    pub fn for_page(application_page: u32, cfg: WindowConfig) -> Self {
        assert!(application_page >= 1);
        let start = (application_page - 1) * cfg.target_page_size;
        Self {
            first_upstream_page: start / cfg.upstream_page_size + 1,
            pages_to_fetch: cfg.target_page_size.div_ceil(cfg.upstream_page_size),
            offset: start % cfg.upstream_page_size,
        }
    }

    /// Upstream page numbers to request, in upstream order.
    pub fn upstream_pages(&self) -> impl Iterator<Item = u32> {
        self.first_upstream_page..self.first_upstream_page + self.pages_to_fetch
    }
}

/// One application-sized batch plus the derived application page count.
#[derive(Debug, Clone)]
pub struct Window<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
}

impl<T> Window<T> {
    /// Slice one window out of fetched upstream pages, concatenated in
    /// upstream order. Short slices are returned as-is, never padded.
    pub fn assemble(plan: &WindowPlan, cfg: WindowConfig, pages: Vec<Page<T>>) -> Self {
        let total_results = pages.first().map(|p| p.total_results).unwrap_or(0);
        let total_pages = u32::min(
            total_results.div_ceil(cfg.target_page_size),
            MAX_VISIBLE_PAGES,
        );
        let items = pages
            .into_iter()
            .flat_map(|p| p.results)
            .skip(plan.offset as usize)
            .take(cfg.target_page_size as usize)
            .collect();
        Self { items, total_pages }
    }

    /// An upstream page passed through unchanged, with the page count
    /// capped at what the upstream will actually serve.
    pub fn from_page(page: Page<T>) -> Self {
        Self {
            total_pages: u32::min(page.total_pages, MAX_VISIBLE_PAGES),
            items: page.results,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Window<U> {
        Window {
            items: self.items.into_iter().map(f).collect(),
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream_page(page: u32, total_results: u32) -> Page<u32> {
        let size = Page::<()>::UPSTREAM_PAGE_SIZE;
        Page {
            page,
            results: ((page - 1) * size..page * size).collect(),
            total_pages: total_results.div_ceil(size),
            total_results,
        }
    }

    fn fetch(plan: &WindowPlan, total_results: u32) -> Vec<Page<u32>> {
        plan.upstream_pages()
            .map(|p| upstream_page(p, total_results))
            .collect()
    }

    #[test]
    fn test_first_window_starts_at_zero() {
        let cfg = WindowConfig::default();
        let plan = WindowPlan::for_page(1, cfg);
        assert_eq!(
            plan,
            WindowPlan {
                first_upstream_page: 1,
                pages_to_fetch: 2,
                offset: 0,
            }
        );
        let window = Window::assemble(&plan, cfg, fetch(&plan, 10_000));
        assert_eq!(window.items, (0..28).collect::<Vec<_>>());
    }

    #[test]
    fn test_second_window_straddles_upstream_pages() {
        let cfg = WindowConfig::default();
        let plan = WindowPlan::for_page(2, cfg);
        assert_eq!(plan.first_upstream_page, 2);
        assert_eq!(plan.offset, 8);
        assert_eq!(plan.upstream_pages().collect::<Vec<_>>(), vec![2, 3]);
        let window = Window::assemble(&plan, cfg, fetch(&plan, 10_000));
        assert_eq!(window.items, (28..56).collect::<Vec<_>>());
    }

    // Offset 16 into a 40-item span leaves only 24 items past the
    // offset, so the window comes back short even though upstream page
    // 5 exists. Pinned: callers page through the catalog assuming this.
    #[test]
    fn short_window_at_offset_sixteen() {
        let cfg = WindowConfig::default();
        let plan = WindowPlan::for_page(3, cfg);
        assert_eq!(plan.first_upstream_page, 3);
        assert_eq!(plan.offset, 16);
        assert_eq!(plan.pages_to_fetch, 2);
        let window = Window::assemble(&plan, cfg, fetch(&plan, 10_000));
        assert_eq!(window.items.len(), 24);
        assert_eq!(window.items, (56..80).collect::<Vec<_>>());
    }

    #[test]
    fn test_window_preserves_upstream_order() {
        let cfg = WindowConfig::default();
        let plan = WindowPlan::for_page(5, cfg);
        let window = Window::assemble(&plan, cfg, fetch(&plan, 10_000));
        assert!(window.items.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_exhausted_upstream_returns_short_slice_unpadded() {
        let cfg = WindowConfig::default();
        let plan = WindowPlan::for_page(1, cfg);
        let mut pages = fetch(&plan, 25);
        pages[1].results.truncate(5);
        let window = Window::assemble(&plan, cfg, pages);
        assert_eq!(window.items.len(), 25);
        assert_eq!(window.total_pages, 1);
    }

    #[test]
    fn test_total_pages_capped() {
        let cfg = WindowConfig::default();
        let plan = WindowPlan::for_page(1, cfg);
        // 1,000,000 results / 28 would be 35,715 application pages.
        let window = Window::assemble(&plan, cfg, fetch(&plan, 1_000_000));
        assert_eq!(window.total_pages, MAX_VISIBLE_PAGES);

        let passthrough = Window::from_page(upstream_page(1, 1_000_000));
        assert_eq!(passthrough.total_pages, MAX_VISIBLE_PAGES);
    }

    #[test]
    fn test_plan_is_deterministic() {
        let cfg = WindowConfig::default();
        for page in 1..200 {
            assert_eq!(
                WindowPlan::for_page(page, cfg),
                WindowPlan::for_page(page, cfg)
            );
        }
    }

    #[test]
    fn test_even_tiling_needs_single_page() {
        let cfg = WindowConfig::new(20, 20);
        let plan = WindowPlan::for_page(4, cfg);
        assert_eq!(
            plan,
            WindowPlan {
                first_upstream_page: 4,
                pages_to_fetch: 1,
                offset: 0,
            }
        );
    }
}
