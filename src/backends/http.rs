use crate::backends::{SearchBackend, SearchRequest};
use crate::error::SearchError;
use crate::results::{ErrorBody, ResultPage};
use url::Url;

/// Backend talking to the registry's HTTP `/search` endpoint
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpBackend {
    /// Create a backend for the given endpoint URL
    pub fn new(endpoint: &str) -> Result<Self, url::ParseError> {
        Ok(Self::with_client(reqwest::Client::new(), Url::parse(endpoint)?))
    }

    /// Create a backend that reuses an existing HTTP client
    pub fn with_client(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build the request URL, percent-encoding the query value
    pub fn request_url(&self, request: &SearchRequest) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("value", &request.value)
                .append_pair("page", &request.page.to_string());
            if let Some(has_image) = request.has_image {
                pairs.append_pair("has_image", if has_image { "true" } else { "false" });
            }
        }
        url
    }
}

impl SearchBackend for HttpBackend {
    async fn search(&self, request: &SearchRequest) -> Result<ResultPage, SearchError> {
        let url = self.request_url(request);
        ::log::info!("Requesting {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(SearchError::Network)?;

        let status = response.status();
        if !status.is_success() {
            // An unreadable error body still counts as a backend error
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.into_message(),
                Err(e) => {
                    ::log::debug!("Error body for status {} was not JSON: {}", status, e);
                    None
                }
            };
            ::log::warn!(
                "Search for {:?} page {} failed with status {}",
                request.value,
                request.page,
                status
            );
            return Err(SearchError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<ResultPage>().await.map_err(SearchError::Decode)
    }
}
