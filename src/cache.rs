use crate::results::ResultPage;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Composite key of a cached result page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub query: String,
    pub page: u32,
    /// `None` when the image filter feature is disabled
    pub has_image: Option<bool>,
}

impl CacheKey {
    pub fn new(query: &str, page: u32, has_image: Option<bool>) -> Self {
        Self {
            query: query.to_string(),
            page,
            has_image,
        }
    }
}

/// Result pages fetched during this session.
///
/// Unbounded unless a capacity is given, in which case the least recently
/// used page is evicted first.
pub struct ResultCache {
    pages: LruCache<CacheKey, ResultPage>,
}

impl ResultCache {
    pub fn new(capacity: Option<usize>) -> Self {
        let pages = match capacity.and_then(NonZeroUsize::new) {
            Some(capacity) => LruCache::new(capacity),
            None => LruCache::unbounded(),
        };
        Self { pages }
    }

    pub fn get(&mut self, key: &CacheKey) -> Option<&ResultPage> {
        self.pages.get(key)
    }

    pub fn insert(&mut self, key: CacheKey, page: ResultPage) {
        if let Some((evicted, _)) = self.pages.push(key.clone(), page) {
            if evicted != key {
                ::log::debug!("Evicted cached page {:?}", evicted);
            }
        }
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.pages.contains(key)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(None)
    }
}
