//! Reading the upstream download page.

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use std::sync::OnceLock;
use std::time::Duration;
use sx_core::{Error, Result};
use tracing::debug;

/// Fetches a page as text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetches pages over HTTP(S) with reqwest.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!("sx/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::fetch(url, e))?;

        if !response.status().is_success() {
            return Err(Error::FetchFailed {
                url: url.to_string(),
                message: format!("HTTP {}", response.status()),
                source: None,
            });
        }

        response.text().await.map_err(|e| Error::fetch(url, e))
    }
}

fn anchor_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?is)<a\b([^>]*)>").expect("Invalid regex pattern"))
}

fn attribute_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r#"(?is)\b([a-z][a-z0-9_-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .expect("Invalid regex pattern")
    })
}

/// Collect the archive links of a download page.
///
/// Keeps the `href` of every anchor pointing under `/builds/` for the given
/// platform family, except anchors whose class marks debug symbols.
pub fn extract_download_links(html: &str, family: &str) -> Vec<String> {
    anchor_regex()
        .captures_iter(html)
        .filter_map(|anchor| {
            let mut href = None;
            let mut class = None;
            for attr in attribute_regex().captures_iter(&anchor[1]) {
                let value = attr
                    .get(2)
                    .or_else(|| attr.get(3))
                    .map(|m| m.as_str());
                match attr[1].to_ascii_lowercase().as_str() {
                    "href" => href = value,
                    "class" => class = value,
                    _ => {}
                }
            }

            if class.is_some_and(|c| c.split_whitespace().any(|c| c == "debug")) {
                return None;
            }
            href.filter(|h| h.starts_with("/builds/") && h.contains(family))
                .map(str::to_string)
        })
        .collect()
}

/// Fetch the download page and return its archive links.
pub async fn fetch_listing(
    fetcher: &dyn PageFetcher,
    url: &str,
    family: &str,
) -> Result<Vec<String>> {
    let html = fetcher.fetch(url).await?;
    let links = extract_download_links(&html, family);
    debug!("Found {} {} links at {}", links.len(), family, url);
    Ok(links)
}
