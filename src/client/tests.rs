use super::*;
use crate::cache::ResultCache;
use crate::document::MemoryDocument;
use crate::results::DrugRecord;
use scraper::{Html, Selector};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

/// Backend that replays canned outcomes and records every request
#[derive(Default)]
struct StubBackend {
    responses: RefCell<VecDeque<Result<ResultPage, SearchError>>>,
    requests: RefCell<Vec<SearchRequest>>,
}

impl StubBackend {
    fn with(responses: Vec<Result<ResultPage, SearchError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    fn last_request(&self) -> SearchRequest {
        self.requests.borrow().last().cloned().unwrap()
    }
}

impl SearchBackend for StubBackend {
    async fn search(&self, request: &SearchRequest) -> Result<ResultPage, SearchError> {
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(result_page(request.page, 1)))
    }
}

fn record(name: &str) -> DrugRecord {
    let mut detailed = HashMap::new();
    detailed.insert("中文品名".to_string(), Some(name.to_string()));
    DrugRecord {
        detailed,
        ..DrugRecord::default()
    }
}

fn result_page(page: u32, pages: u32) -> ResultPage {
    ResultPage {
        page,
        pages,
        results: vec![record(&format!("藥品 {}", page))],
    }
}

fn client_with(
    responses: Vec<Result<ResultPage, SearchError>>,
    features: Features,
) -> SearchClient<StubBackend, MemoryDocument> {
    SearchClient::new(
        StubBackend::with(responses),
        MemoryDocument::new(),
        features,
        ResultCache::default(),
    )
}

async fn search_for(client: &mut SearchClient<StubBackend, MemoryDocument>, query: &str) {
    client
        .document_mut()
        .set_value(ElementId::SearchInput, query)
        .await
        .unwrap();
    client.handle(UiEvent::SearchClicked).await.unwrap();
}

fn option_values(html: &str, selector: &str) -> Vec<String> {
    let doc = Html::parse_fragment(html);
    let selector = Selector::parse(selector).unwrap();
    doc.select(&selector)
        .filter_map(|e| e.value().attr("value").map(str::to_string))
        .collect()
}

#[tokio::test]
async fn test_first_page_of_three() {
    let mut client = client_with(vec![Ok(result_page(1, 3))], Features::full());
    search_for(&mut client, "阿斯匹靈").await;

    let request = client.backend().last_request();
    assert_eq!(request.value, "阿斯匹靈");
    assert_eq!(request.page, 1);
    assert_eq!(request.has_image, Some(false));

    let doc = client.document();
    assert_eq!(doc.display(ElementId::Pagination), Display::Flex);
    assert_eq!(doc.display(ElementId::ResultsWrapper), Display::Block);
    assert!(doc.disabled(ElementId::PreviousPage));
    assert!(!doc.disabled(ElementId::NextPage));

    let select = doc.inner_html(ElementId::PageSelect);
    assert_eq!(option_values(select, "option"), vec!["1", "2", "3"]);
    assert_eq!(option_values(select, "option[selected]"), vec!["1"]);
    assert_eq!(client.state().total_pages, 3);
}

#[tokio::test]
async fn test_empty_query_is_rejected() {
    let mut client = client_with(vec![], Features::full());
    for query in ["", "   ", "\t\n"] {
        search_for(&mut client, query).await;

        assert_eq!(client.backend().calls(), 0);
        let doc = client.document_mut();
        assert_eq!(doc.display(ElementId::ErrorContainer), Display::Block);
        assert_eq!(
            doc.text(ElementId::ErrorContainer).await.unwrap(),
            crate::error::EMPTY_QUERY_MESSAGE
        );
        assert_eq!(doc.display(ElementId::ResultsWrapper), Display::None);
    }
    assert!(!client.state().has_query());
}

#[tokio::test]
async fn test_query_is_trimmed() {
    let mut client = client_with(vec![], Features::full());
    search_for(&mut client, "  普拿疼  ").await;
    assert_eq!(client.backend().last_request().value, "普拿疼");
}

#[tokio::test]
async fn test_cache_hit_skips_network_and_renders_identically() {
    let mut client = client_with(vec![Ok(result_page(1, 2))], Features::full());
    search_for(&mut client, "阿斯匹靈").await;
    let first = client
        .document()
        .inner_html(ElementId::ResultContainer)
        .to_string();

    // Wipe the container so the second render is observable
    client
        .document_mut()
        .set_inner_html(ElementId::ResultContainer, "")
        .await
        .unwrap();
    client.fetch_results().await.unwrap();

    assert_eq!(client.backend().calls(), 1);
    assert_eq!(client.document().inner_html(ElementId::ResultContainer), first);
    assert_eq!(
        client.document().display(ElementId::LoadingIndicator),
        Display::None
    );
}

#[tokio::test]
async fn test_cache_hit_never_shows_loading() {
    let mut client = client_with(vec![Ok(result_page(1, 2))], Features::full());
    search_for(&mut client, "q").await;

    // Pretend the indicator is in some unrelated state; a hit only hides it
    match client.begin_fetch().await.unwrap() {
        FetchStep::Rendered => {}
        FetchStep::Pending(_) => panic!("expected a cache hit"),
    }
    assert_eq!(
        client.document().display(ElementId::LoadingIndicator),
        Display::None
    );
}

#[tokio::test]
async fn test_previous_and_next_bounds() {
    let mut client = client_with(
        vec![Ok(result_page(1, 2)), Ok(result_page(2, 2))],
        Features::full(),
    );
    search_for(&mut client, "q").await;

    // Already on the first page
    client.handle(UiEvent::PreviousClicked).await.unwrap();
    assert_eq!(client.backend().calls(), 1);
    assert_eq!(client.state().current_page, 1);

    client.handle(UiEvent::NextClicked).await.unwrap();
    assert_eq!(client.backend().calls(), 2);
    assert_eq!(client.state().current_page, 2);
    assert!(client.document().disabled(ElementId::NextPage));
    assert!(!client.document().disabled(ElementId::PreviousPage));

    // Already on the last page
    client.handle(UiEvent::NextClicked).await.unwrap();
    assert_eq!(client.backend().calls(), 2);
    assert_eq!(client.state().current_page, 2);

    // Going back is served from the cache
    client.handle(UiEvent::PreviousClicked).await.unwrap();
    assert_eq!(client.backend().calls(), 2);
    assert_eq!(client.state().current_page, 1);
}

#[tokio::test]
async fn test_jump_to_page_validation() {
    let mut client = client_with(vec![Ok(result_page(1, 3))], Features::full());
    search_for(&mut client, "q").await;

    for raw in ["0", "4", "-1", "abc", "", "2.5"] {
        client
            .handle(UiEvent::PageSelected(raw.to_string()))
            .await
            .unwrap();
        assert_eq!(client.backend().calls(), 1, "input {:?} should be ignored", raw);
        assert_eq!(client.state().current_page, 1);
    }

    client.jump_to_page("3").await.unwrap();
    assert_eq!(client.backend().calls(), 2);
    assert_eq!(client.backend().last_request().page, 3);
    assert_eq!(client.state().current_page, 3);
}

#[tokio::test]
async fn test_navigation_without_query_is_noop() {
    let mut client = client_with(vec![], Features::full());
    client.handle(UiEvent::NextClicked).await.unwrap();
    client.handle(UiEvent::PreviousClicked).await.unwrap();
    client.jump_to_page("1").await.unwrap();
    assert_eq!(client.backend().calls(), 0);
}

#[tokio::test]
async fn test_toggle_image_filter() {
    let mut client = client_with(
        vec![Ok(result_page(1, 4)), Ok(result_page(2, 4)), Ok(result_page(1, 2))],
        Features::full(),
    );

    // No active query: nothing is fetched
    client
        .document_mut()
        .set_checked(ElementId::ImageFilter, true)
        .await
        .unwrap();
    client.handle(UiEvent::ImageFilterChanged).await.unwrap();
    assert_eq!(client.backend().calls(), 0);

    client
        .document_mut()
        .set_checked(ElementId::ImageFilter, false)
        .await
        .unwrap();
    client.handle(UiEvent::ImageFilterChanged).await.unwrap();
    search_for(&mut client, "q").await;
    client.handle(UiEvent::NextClicked).await.unwrap();
    assert_eq!(client.state().current_page, 2);

    // With a query the page resets and the filter is sent
    client
        .document_mut()
        .set_checked(ElementId::ImageFilter, true)
        .await
        .unwrap();
    client.handle(UiEvent::ImageFilterChanged).await.unwrap();

    assert_eq!(client.backend().calls(), 3);
    let request = client.backend().last_request();
    assert_eq!(request.page, 1);
    assert_eq!(request.has_image, Some(true));
    assert_eq!(client.state().current_page, 1);
    assert_eq!(client.state().total_pages, 2);
}

#[tokio::test]
async fn test_filter_is_part_of_cache_key() {
    let mut client = client_with(
        vec![Ok(result_page(1, 1)), Ok(result_page(1, 1))],
        Features::full(),
    );
    search_for(&mut client, "q").await;

    client
        .document_mut()
        .set_checked(ElementId::ImageFilter, true)
        .await
        .unwrap();
    client.handle(UiEvent::ImageFilterChanged).await.unwrap();
    assert_eq!(client.backend().calls(), 2);

    // Flipping back hits the cache
    client
        .document_mut()
        .set_checked(ElementId::ImageFilter, false)
        .await
        .unwrap();
    client.handle(UiEvent::ImageFilterChanged).await.unwrap();
    assert_eq!(client.backend().calls(), 2);
}

#[tokio::test]
async fn test_basic_features_ignore_filter() {
    let mut client = client_with(vec![Ok(result_page(1, 1))], Features::basic());
    client
        .document_mut()
        .set_checked(ElementId::ImageFilter, true)
        .await
        .unwrap();
    search_for(&mut client, "q").await;

    let request = client.backend().last_request();
    assert_eq!(request.has_image, None);
    assert_eq!(client.current_key().has_image, None);

    client.handle(UiEvent::ImageFilterChanged).await.unwrap();
    assert_eq!(client.backend().calls(), 1);
}

#[tokio::test]
async fn test_backend_error_is_displayed() {
    let mut client = client_with(
        vec![Err(SearchError::Backend {
            status: 404,
            message: Some("no results".to_string()),
        })],
        Features::full(),
    );
    search_for(&mut client, "zzz").await;

    let doc = client.document_mut();
    assert_eq!(doc.display(ElementId::ErrorContainer), Display::Block);
    assert_eq!(doc.text(ElementId::ErrorContainer).await.unwrap(), "no results");
    assert_eq!(doc.display(ElementId::ResultsWrapper), Display::None);
    assert_eq!(doc.display(ElementId::LoadingIndicator), Display::None);
    // Failures are not cached
    assert!(client.cache().is_empty());
}

#[tokio::test]
async fn test_generic_error_message() {
    let mut client = client_with(
        vec![Err(SearchError::Backend {
            status: 500,
            message: None,
        })],
        Features::full(),
    );
    search_for(&mut client, "q").await;
    assert_eq!(
        client
            .document_mut()
            .text(ElementId::ErrorContainer)
            .await
            .unwrap(),
        crate::error::GENERIC_FAILURE_MESSAGE
    );
}

#[tokio::test]
async fn test_error_cleared_before_next_attempt() {
    let mut client = client_with(
        vec![
            Err(SearchError::Backend {
                status: 400,
                message: Some("Missing query parameters".to_string()),
            }),
            Ok(result_page(1, 1)),
        ],
        Features::full(),
    );
    search_for(&mut client, "q").await;
    assert_eq!(
        client.document().display(ElementId::ErrorContainer),
        Display::Block
    );

    search_for(&mut client, "q").await;
    let doc = client.document();
    assert_eq!(doc.display(ElementId::ErrorContainer), Display::None);
    assert_eq!(doc.inner_html(ElementId::ErrorContainer), "");
    assert_eq!(doc.display(ElementId::ResultsWrapper), Display::Block);
}

#[tokio::test]
async fn test_loading_shown_only_while_pending() {
    let mut client = client_with(vec![], Features::full());
    client
        .document_mut()
        .set_value(ElementId::SearchInput, "q")
        .await
        .unwrap();
    client.state.reset_for("q".to_string(), false);

    let pending = match client.begin_fetch().await.unwrap() {
        FetchStep::Pending(pending) => pending,
        FetchStep::Rendered => panic!("expected a cache miss"),
    };
    assert_eq!(
        client.document().display(ElementId::LoadingIndicator),
        Display::Block
    );
    assert_eq!(
        client.document().display(ElementId::ResultsWrapper),
        Display::None
    );

    client
        .finish_fetch(pending, Ok(result_page(1, 1)))
        .await
        .unwrap();
    assert_eq!(
        client.document().display(ElementId::LoadingIndicator),
        Display::None
    );
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let mut client = client_with(vec![], Features::full());
    client.state.reset_for("q".to_string(), false);
    client.state.set_total_pages(3);

    let older = match client.begin_fetch().await.unwrap() {
        FetchStep::Pending(pending) => pending,
        FetchStep::Rendered => panic!("expected a cache miss"),
    };
    client.state.current_page = 2;
    let newer = match client.begin_fetch().await.unwrap() {
        FetchStep::Pending(pending) => pending,
        FetchStep::Rendered => panic!("expected a cache miss"),
    };
    assert!(newer.ticket > older.ticket);

    // The newer response lands first
    client
        .finish_fetch(newer, Ok(result_page(2, 3)))
        .await
        .unwrap();
    let rendered = client
        .document()
        .inner_html(ElementId::ResultContainer)
        .to_string();
    assert!(rendered.contains("藥品 2"));

    // The late response must not overwrite the display
    client
        .finish_fetch(older, Ok(result_page(1, 3)))
        .await
        .unwrap();
    assert_eq!(client.document().inner_html(ElementId::ResultContainer), rendered);
    let select = client.document().inner_html(ElementId::PageSelect);
    assert_eq!(option_values(select, "option[selected]"), vec!["2"]);

    // It is still kept for its own key
    assert!(client.cache().contains(&CacheKey::new("q", 1, Some(false))));
}

#[tokio::test]
async fn test_stale_error_is_discarded() {
    let mut client = client_with(vec![], Features::full());
    client.state.reset_for("q".to_string(), false);

    let older = match client.begin_fetch().await.unwrap() {
        FetchStep::Pending(pending) => pending,
        FetchStep::Rendered => panic!("expected a cache miss"),
    };
    let newer = match client.begin_fetch().await.unwrap() {
        FetchStep::Pending(pending) => pending,
        FetchStep::Rendered => panic!("expected a cache miss"),
    };

    client
        .finish_fetch(older, Err(SearchError::Validation))
        .await
        .unwrap();
    assert_eq!(
        client.document().display(ElementId::ErrorContainer),
        Display::None
    );
    // The newer request is still outstanding
    assert_eq!(
        client.document().display(ElementId::LoadingIndicator),
        Display::Block
    );

    client
        .finish_fetch(newer, Ok(result_page(1, 1)))
        .await
        .unwrap();
    assert_eq!(
        client.document().display(ElementId::LoadingIndicator),
        Display::None
    );
}

#[tokio::test]
async fn test_single_page_hides_pagination() {
    let mut client = client_with(vec![Ok(result_page(1, 1))], Features::full());
    search_for(&mut client, "q").await;

    let doc = client.document();
    assert_eq!(doc.display(ElementId::Pagination), Display::None);
    assert!(doc.disabled(ElementId::PreviousPage));
    assert!(doc.disabled(ElementId::NextPage));
    assert_eq!(
        option_values(doc.inner_html(ElementId::PageSelect), "option"),
        vec!["1"]
    );
}

#[tokio::test]
async fn test_zero_pages_treated_as_one() {
    let mut client = client_with(
        vec![Ok(ResultPage {
            page: 1,
            pages: 0,
            results: Vec::new(),
        })],
        Features::full(),
    );
    search_for(&mut client, "nothing").await;

    assert_eq!(client.state().total_pages, 1);
    let doc = client.document();
    assert_eq!(doc.display(ElementId::Pagination), Display::None);
    assert_eq!(doc.inner_html(ElementId::ResultContainer), "");
}

#[tokio::test]
async fn test_record_without_lists_renders_detail_block_only() {
    let mut client = client_with(
        vec![Ok(ResultPage {
            page: 1,
            pages: 1,
            results: vec![record("阿斯匹靈")],
        })],
        Features::full(),
    );
    search_for(&mut client, "阿斯匹靈").await;

    let html = client.document().inner_html(ElementId::ResultContainer);
    let doc = Html::parse_fragment(html);
    let item = Selector::parse(".result-item > div").unwrap();
    let classes: Vec<_> = doc
        .select(&item)
        .filter_map(|e| e.value().attr("class"))
        .collect();
    assert_eq!(classes, vec!["drug-info"]);
}

#[tokio::test]
async fn test_new_search_resets_page() {
    let mut client = client_with(
        vec![Ok(result_page(1, 3)), Ok(result_page(2, 3)), Ok(result_page(1, 2))],
        Features::full(),
    );
    search_for(&mut client, "q").await;
    client.handle(UiEvent::NextClicked).await.unwrap();
    assert_eq!(client.state().current_page, 2);

    client
        .document_mut()
        .set_value(ElementId::SearchInput, "other")
        .await
        .unwrap();
    client.handle(UiEvent::EnterPressed).await.unwrap();
    assert_eq!(client.state().current_page, 1);
    assert_eq!(client.state().current_query, "other");
    assert_eq!(client.backend().last_request().page, 1);
}

#[tokio::test]
async fn test_initialize_clears_error() {
    let mut client = client_with(vec![], Features::full());
    let doc = client.document_mut();
    doc.set_inner_html(ElementId::ErrorContainer, "stale")
        .await
        .unwrap();
    doc.set_display(ElementId::ErrorContainer, Display::Block)
        .await
        .unwrap();

    client.initialize().await.unwrap();
    assert_eq!(
        client.document().display(ElementId::ErrorContainer),
        Display::None
    );
    assert_eq!(client.document().inner_html(ElementId::ErrorContainer), "");
}
