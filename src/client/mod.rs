//! The search page controller.
//!
//! `SearchClient` owns the session state and the result cache, reacts to page
//! events, fetches result pages through a [`SearchBackend`] and renders them
//! into a [`Document`].

#[cfg(test)]
mod tests;

use crate::backends::{SearchBackend, SearchRequest};
use crate::cache::{CacheKey, ResultCache};
use crate::config::Features;
use crate::document::{Display, Document, ElementId};
use crate::error::{DocumentError, SearchError};
use crate::render;
use crate::results::ResultPage;
use crate::state::SearchState;

/// Events raised by the search page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SearchClicked,
    /// Enter pressed in the search input
    EnterPressed,
    PreviousClicked,
    NextClicked,
    /// The page selector changed to the given raw value
    PageSelected(String),
    ImageFilterChanged,
}

/// Identifies one issued request; only the latest one may update the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// A request that has been issued but not yet applied
#[derive(Debug, Clone)]
pub struct PendingFetch {
    pub ticket: RequestTicket,
    pub key: CacheKey,
    pub request: SearchRequest,
}

/// Outcome of starting a fetch
#[derive(Debug)]
pub enum FetchStep {
    /// Served from the cache and already rendered
    Rendered,
    /// A network request is needed
    Pending(PendingFetch),
}

/// Controller for one search page
pub struct SearchClient<B, D> {
    backend: B,
    document: D,
    features: Features,
    state: SearchState,
    cache: ResultCache,
    last_ticket: u64,
}

impl<B: SearchBackend, D: Document> SearchClient<B, D> {
    pub fn new(backend: B, document: D, features: Features, cache: ResultCache) -> Self {
        Self {
            backend,
            document,
            features,
            state: SearchState::default(),
            cache,
            last_ticket: 0,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn features(&self) -> &Features {
        &self.features
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    /// Tear the client apart, e.g. to close a browser session
    pub fn into_parts(self) -> (B, D) {
        (self.backend, self.document)
    }

    /// Prepare a freshly loaded page
    pub async fn initialize(&mut self) -> Result<(), DocumentError> {
        self.clear_error().await
    }

    /// Dispatch a page event to its handler
    pub async fn handle(&mut self, event: UiEvent) -> Result<(), DocumentError> {
        ::log::debug!("Handling {:?}", event);
        match event {
            UiEvent::SearchClicked | UiEvent::EnterPressed => self.submit_search().await,
            UiEvent::PreviousClicked => self.go_to_previous_page().await,
            UiEvent::NextClicked => self.go_to_next_page().await,
            UiEvent::PageSelected(raw) => self.jump_to_page(&raw).await,
            UiEvent::ImageFilterChanged => self.toggle_image_filter().await,
        }
    }

    /// Start a new search from the input box
    pub async fn submit_search(&mut self) -> Result<(), DocumentError> {
        let query = self
            .document
            .value(ElementId::SearchInput)
            .await?
            .trim()
            .to_string();

        if query.is_empty() {
            // An empty submission also ends the previous search
            self.state.current_query.clear();
            return self.show_error(&SearchError::Validation).await;
        }

        let has_image = if self.features.image_filter {
            self.document.checked(ElementId::ImageFilter).await?
        } else {
            false
        };

        ::log::info!("New search for {:?} (has_image: {})", query, has_image);
        self.state.reset_for(query, has_image);
        self.fetch_results().await
    }

    pub async fn go_to_previous_page(&mut self) -> Result<(), DocumentError> {
        if !self.state.has_query() || !self.state.can_go_previous() {
            return Ok(());
        }
        self.state.current_page -= 1;
        self.fetch_results().await
    }

    pub async fn go_to_next_page(&mut self) -> Result<(), DocumentError> {
        if !self.state.has_query() || !self.state.can_go_next() {
            return Ok(());
        }
        self.state.current_page += 1;
        self.fetch_results().await
    }

    /// Jump to a page chosen in the selector; invalid input is ignored
    pub async fn jump_to_page(&mut self, raw: &str) -> Result<(), DocumentError> {
        let page = match raw.trim().parse::<u32>() {
            Ok(page) if self.state.in_range(page) => page,
            _ => {
                ::log::debug!("Ignoring page selection {:?}", raw);
                return Ok(());
            }
        };
        if !self.state.has_query() {
            return Ok(());
        }
        self.state.current_page = page;
        self.fetch_results().await
    }

    /// React to the image filter checkbox changing
    pub async fn toggle_image_filter(&mut self) -> Result<(), DocumentError> {
        if !self.features.image_filter {
            return Ok(());
        }
        self.state.has_image_filter = self.document.checked(ElementId::ImageFilter).await?;
        self.state.current_page = 1;

        if self.state.has_query() {
            self.fetch_results().await
        } else {
            Ok(())
        }
    }

    /// Show the current page, from the cache or the backend
    pub async fn fetch_results(&mut self) -> Result<(), DocumentError> {
        match self.begin_fetch().await? {
            FetchStep::Rendered => Ok(()),
            FetchStep::Pending(pending) => {
                let outcome = self.backend.search(&pending.request).await;
                self.finish_fetch(pending, outcome).await
            }
        }
    }

    /// Cache key for the current state
    pub fn current_key(&self) -> CacheKey {
        let has_image = self
            .features
            .image_filter
            .then_some(self.state.has_image_filter);
        CacheKey::new(&self.state.current_query, self.state.current_page, has_image)
    }

    /// First half of a fetch: render from the cache or issue a ticket.
    ///
    /// On a miss the loading indicator is shown and the caller is expected to
    /// run the request and hand the outcome to [`SearchClient::finish_fetch`].
    pub async fn begin_fetch(&mut self) -> Result<FetchStep, DocumentError> {
        self.clear_error().await?;
        let key = self.current_key();

        if let Some(page) = self.cache.get(&key).cloned() {
            ::log::debug!("Cache hit for {:?}", key);
            // A cached page supersedes anything still in flight
            self.last_ticket += 1;
            self.show_loading(false).await?;
            self.render_results(&page).await?;
            return Ok(FetchStep::Rendered);
        }

        ::log::debug!("Cache miss for {:?}", key);
        self.last_ticket += 1;
        let ticket = RequestTicket(self.last_ticket);
        self.show_loading(true).await?;

        Ok(FetchStep::Pending(PendingFetch {
            ticket,
            request: SearchRequest::from(&key),
            key,
        }))
    }

    /// Second half of a fetch: apply the outcome unless a newer request exists
    pub async fn finish_fetch(
        &mut self,
        pending: PendingFetch,
        outcome: Result<ResultPage, SearchError>,
    ) -> Result<(), DocumentError> {
        let latest = pending.ticket == RequestTicket(self.last_ticket);
        if latest {
            self.show_loading(false).await?;
        } else {
            ::log::warn!(
                "Discarding stale response for {:?} (ticket {:?}, latest {})",
                pending.key,
                pending.ticket,
                self.last_ticket
            );
            if let Ok(page) = outcome {
                // Still a valid answer for its own key
                self.cache.insert(pending.key, page);
            }
            return Ok(());
        }

        match outcome {
            Ok(page) => {
                self.cache.insert(pending.key, page.clone());
                self.render_results(&page).await
            }
            Err(e) => {
                ::log::warn!("Search failed: {}", e);
                self.show_error(&e).await
            }
        }
    }

    /// Replace the result list and pagination controls with `page`
    pub async fn render_results(&mut self, page: &ResultPage) -> Result<(), DocumentError> {
        let markup = render::results(page, &self.features).into_string();
        self.document
            .set_inner_html(ElementId::ResultContainer, &markup)
            .await?;
        self.document
            .set_display(ElementId::ResultsWrapper, Display::Block)
            .await?;

        self.state.set_total_pages(page.pages);
        let total = self.state.total_pages;

        self.document
            .set_display(ElementId::Pagination, Display::shown(total > 1, Display::Flex))
            .await?;
        self.document
            .set_disabled(ElementId::PreviousPage, !self.state.can_go_previous())
            .await?;
        self.document
            .set_disabled(ElementId::NextPage, !self.state.can_go_next())
            .await?;

        let options = render::page_options(total, page.page).into_string();
        self.document
            .set_inner_html(ElementId::PageSelect, &options)
            .await?;

        ::log::info!(
            "Rendered page {} of {} with {} records",
            page.page,
            total,
            page.results.len()
        );
        Ok(())
    }

    async fn show_error(&mut self, error: &SearchError) -> Result<(), DocumentError> {
        let markup = render::error_message(error.user_message()).into_string();
        self.document
            .set_inner_html(ElementId::ErrorContainer, &markup)
            .await?;
        self.document
            .set_display(ElementId::ErrorContainer, Display::Block)
            .await?;
        self.document
            .set_display(ElementId::ResultsWrapper, Display::None)
            .await
    }

    async fn clear_error(&mut self) -> Result<(), DocumentError> {
        self.document
            .set_inner_html(ElementId::ErrorContainer, "")
            .await?;
        self.document
            .set_display(ElementId::ErrorContainer, Display::None)
            .await
    }

    async fn show_loading(&mut self, loading: bool) -> Result<(), DocumentError> {
        self.document
            .set_display(
                ElementId::LoadingIndicator,
                Display::shown(loading, Display::Block),
            )
            .await?;
        if loading {
            self.document
                .set_display(ElementId::ResultsWrapper, Display::None)
                .await?;
        }
        Ok(())
    }
}
