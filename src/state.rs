/// Pagination and query state of one search session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    /// The active query, empty when no search has succeeded validation
    pub current_query: String,

    /// 1-based page currently requested
    pub current_page: u32,

    /// Total pages reported by the last rendered response
    pub total_pages: u32,

    /// Whether results are restricted to records with an image
    pub has_image_filter: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            current_query: String::new(),
            current_page: 1,
            total_pages: 1,
            has_image_filter: false,
        }
    }
}

impl SearchState {
    /// Start a new search for `query`
    pub fn reset_for(&mut self, query: String, has_image_filter: bool) {
        self.current_query = query;
        self.has_image_filter = has_image_filter;
        self.current_page = 1;
    }

    /// Whether a query has been submitted
    pub fn has_query(&self) -> bool {
        !self.current_query.is_empty()
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether `page` is a selectable page number
    pub fn in_range(&self, page: u32) -> bool {
        (1..=self.total_pages).contains(&page)
    }

    /// Record the page count of a rendered response, never below one
    pub fn set_total_pages(&mut self, pages: u32) {
        self.total_pages = pages.max(1);
    }
}
