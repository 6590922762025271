use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use serde_json::json;

use crate::error::PageFetchError;
use crate::query::QueryTemplate;
use crate::range::PageRequest;
use crate::{Record, Result};

/// Anything that can produce the records of one page.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, page: PageRequest) -> core::result::Result<Vec<Record>, PageFetchError>;
}

/// Queries the AniList GraphQL endpoint, one POST per page.
#[derive(Debug, Clone)]
pub struct AniListClient {
    // Client uses Arc so we can clone cheaply
    client: Client,
    endpoint: String,
    per_page: u32,
    template: QueryTemplate,
}

impl AniListClient {
    pub fn new(
        endpoint: impl Into<String>,
        per_page: u32,
        template: QueryTemplate,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            per_page,
            template,
        })
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: Option<PageData>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct PageData {
    #[serde(rename = "Page")]
    page: Option<MediaPage>,
}

#[derive(Debug, Deserialize)]
struct MediaPage {
    #[serde(default)]
    media: Option<Vec<Record>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[async_trait]
impl PageSource for AniListClient {
    /// Requests a page and returns the media entries it contains.
    async fn fetch_page(&self, page: PageRequest) -> core::result::Result<Vec<Record>, PageFetchError> {
        let body = json!({
            "query": self.template.document(),
            "variables": { "page": page, "perPage": self.per_page },
        });

        let res = self
            .client
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| PageFetchError::from_reqwest(page, e))?;

        let status = res.status();
        if !status.is_success() {
            return Err(PageFetchError::Status { page, status });
        }

        let bytes = res
            .bytes()
            .await
            .map_err(|e| PageFetchError::from_reqwest(page, e))?;
        parse_envelope(page, &bytes)
    }
}

fn parse_envelope(page: PageRequest, bytes: &[u8]) -> core::result::Result<Vec<Record>, PageFetchError> {
    let envelope: Envelope =
        serde_json::from_slice(bytes).map_err(|e| PageFetchError::Malformed {
            page,
            reason: e.to_string(),
        })?;

    if let Some(errors) = envelope.errors.filter(|errs| !errs.is_empty()) {
        let message = errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(PageFetchError::Graphql { page, message });
    }

    let media_page = envelope
        .data
        .and_then(|data| data.page)
        .ok_or_else(|| PageFetchError::Malformed {
            page,
            reason: "missing `data.Page` in response".to_string(),
        })?;

    Ok(media_page.media.unwrap_or_default())
}
