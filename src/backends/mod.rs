pub mod http;

use crate::cache::CacheKey;
use crate::error::SearchError;
use crate::results::ResultPage;

pub use http::HttpBackend;

/// Parameters of one `/search` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Search term, sent as `value`
    pub value: String,
    /// 1-based page, sent as `page`
    pub page: u32,
    /// Sent as `has_image` only when present
    pub has_image: Option<bool>,
}

impl From<&CacheKey> for SearchRequest {
    fn from(key: &CacheKey) -> Self {
        Self {
            value: key.query.clone(),
            page: key.page,
            has_image: key.has_image,
        }
    }
}

/// Source of result pages
#[allow(async_fn_in_trait)]
pub trait SearchBackend {
    /// Fetch one page of results
    async fn search(&self, request: &SearchRequest) -> Result<ResultPage, SearchError>;
}
