use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::context::InteractionContext;
use crate::errors::CommandError;
use crate::registry::CommandHandler;
use crate::types::InteractionResponse;

pub const DEFAULT_MDN_BASE_URL: &str = "https://developer.mozilla.org";
const DOCS_URL: &str = "https://developer.mozilla.org/en-US/docs/";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Document {
    pub title: String,
    pub slug: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponseWire {
    #[serde(default)]
    documents: Vec<Document>,
}

#[async_trait]
pub trait DocSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Document>, CommandError>;
}

pub struct MdnClient {
    base_url: String,
    client: reqwest::Client,
}

impl MdnClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl DocSearch for MdnClient {
    async fn search(&self, query: &str) -> Result<Vec<Document>, CommandError> {
        let url = format!(
            "{}/api/v1/search?q={}&locale=en-US",
            self.base_url,
            urlencoding::encode(query)
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CommandError::Upstream(format!("failed to search MDN: {e}")))?;

        if !resp.status().is_success() {
            return Err(CommandError::Upstream(format!(
                "failed to search MDN: status {}",
                resp.status().as_u16()
            )));
        }

        let parsed: SearchResponseWire = resp.json().await.map_err(|e| {
            CommandError::Upstream(format!("failed to unmarshal MDN search results: {e}"))
        })?;
        Ok(parsed.documents)
    }
}

/// Answers with a link to the best documentation match for the `query` option.
pub struct MdnSearch<C: DocSearch> {
    client: C,
}

impl<C: DocSearch> MdnSearch<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: DocSearch> CommandHandler for MdnSearch<C> {
    async fn handle(&self, ctx: &InteractionContext) -> Result<InteractionResponse, CommandError> {
        let Some(query) = ctx.string_option("query")? else {
            return Ok(InteractionResponse::message("Please provide a search query"));
        };

        let documents = self.client.search(query).await?;
        let Some(top) = documents.first() else {
            return Ok(InteractionResponse::message("No articles found"));
        };

        Ok(InteractionResponse::message(format!(
            "{}: {DOCS_URL}{}",
            top.title, top.slug
        )))
    }
}
