//! Remote object catalog client.
//!
//! The Objects panel browses a hosted icon catalog. [`Catalog`] is the seam
//! the panel talks to; [`HttpCatalog`] is a thin `reqwest` wrapper for the
//! catalog's JSON API. Response parsing lives in pure functions so it can be
//! tested without a network.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::canvas::AssetSource;
use crate::config::CatalogConfig;

/// Errors from catalog requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response.
    #[error("catalog request failed: {0}")]
    Request(String),

    /// The catalog returned a non-success status.
    #[error("catalog response error: status {status}")]
    Response { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("catalog response parse failed: {0}")]
    Parse(String),
}

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogItem {
    pub id: String,
    pub thumbnail_url: String,
}

/// A searchable source of vector assets.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Items matching `query`, in catalog order.
    async fn search(&self, query: &str) -> Result<Vec<CatalogItem>, CatalogError>;

    /// Resolve an item id to loadable content.
    async fn fetch_asset(&self, id: &str) -> Result<AssetSource, CatalogError>;
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpCatalog {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpCatalog {
    /// Build a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::HttpClientBuild`] if the HTTP client cannot be constructed.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| CatalogError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url, api_key: config.api_key })
    }

    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, CatalogError> {
        let mut request = self.http.get(url).query(query);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send().await.map_err(|e| CatalogError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| CatalogError::Request(e.to_string()))?;

        if status != 200 {
            return Err(CatalogError::Response { status, body: text });
        }
        Ok(text)
    }
}

impl std::fmt::Debug for HttpCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCatalog")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn search(&self, query: &str) -> Result<Vec<CatalogItem>, CatalogError> {
        let url = format!("{}/search", self.base_url);
        let text = self.get(&url, &[("query", query)]).await?;
        parse_search_response(&text)
    }

    async fn fetch_asset(&self, id: &str) -> Result<AssetSource, CatalogError> {
        let url = format!("{}/items/{id}", self.base_url);
        let text = self.get(&url, &[]).await?;
        parse_asset_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
struct SearchEnvelope {
    response: SearchBody,
}

#[derive(Deserialize)]
struct SearchBody {
    items: ItemPage,
}

#[derive(Deserialize)]
struct ItemPage {
    #[serde(default)]
    data: Vec<WireItem>,
}

#[derive(Deserialize)]
struct WireItem {
    uuid: String,
    urls: WireUrls,
}

#[derive(Deserialize)]
struct WireUrls {
    thumb: String,
}

#[derive(Deserialize)]
struct AssetEnvelope {
    response: AssetBody,
}

#[derive(Deserialize)]
struct AssetBody {
    download: WireDownload,
}

#[derive(Deserialize)]
struct WireDownload {
    url: Option<String>,
    svg: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

/// Parse a search response body into items.
///
/// # Errors
///
/// Returns [`CatalogError::Parse`] if the body is not the expected JSON shape.
pub fn parse_search_response(json: &str) -> Result<Vec<CatalogItem>, CatalogError> {
    let envelope: SearchEnvelope = serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
    Ok(envelope
        .response
        .items
        .data
        .into_iter()
        .map(|item| CatalogItem { id: item.uuid, thumbnail_url: item.urls.thumb })
        .collect())
}

/// Parse an item response body into loadable content. A download URL wins
/// over inline markup when both are present.
///
/// # Errors
///
/// Returns [`CatalogError::Parse`] if the body is malformed or carries neither.
pub fn parse_asset_response(json: &str) -> Result<AssetSource, CatalogError> {
    let envelope: AssetEnvelope = serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
    match envelope.response.download {
        WireDownload { url: Some(url), .. } => Ok(AssetSource::Url(url)),
        WireDownload { svg: Some(markup), .. } => Ok(AssetSource::Markup(markup)),
        WireDownload { url: None, svg: None } => Err(CatalogError::Parse("download has neither url nor svg".into())),
    }
}
