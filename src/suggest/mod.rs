use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Public search-autocomplete endpoint used for related-keyword discovery.
const DEFAULT_ENDPOINT: &str = "https://ac.search.naver.com/nx/ac";

pub struct SuggestClient {
    client: Client,
    endpoint: Url,
}

impl SuggestClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(DEFAULT_ENDPOINT).expect("default endpoint URL should be valid");
        Self::with_endpoint(endpoint, timeout)
    }

    pub fn with_endpoint(endpoint: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("building HTTP client")?;
        Ok(Self { client, endpoint })
    }

    /// Suggested search terms for `keyword`, in the order the endpoint ranks
    /// them. Any transport or payload problem yields an empty list; the
    /// feature degrades, it never fails the caller.
    pub async fn suggestions(&self, keyword: &str) -> Vec<String> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", keyword)
            .append_pair("st", "100")
            .append_pair("r_format", "json");

        match self.fetch(url).await {
            Ok(terms) => {
                debug!(keyword, count = terms.len(), "autocomplete lookup done");
                terms
            }
            Err(err) => {
                warn!(keyword, %err, "autocomplete lookup failed");
                Vec::new()
            }
        }
    }

    async fn fetch(&self, url: Url) -> Result<Vec<String>> {
        let payload: Value = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(extract_suggestions(&payload))
    }
}

/// Pull every term out of the `items` groups, preserving order. The payload
/// nests each suggestion inside an array of arrays; anything with an
/// unexpected shape is skipped rather than treated as an error.
pub fn extract_suggestions(payload: &Value) -> Vec<String> {
    let mut terms = Vec::new();
    let Some(groups) = payload.get("items").and_then(Value::as_array) else {
        return terms;
    };
    for group in groups {
        let Some(entries) = group.as_array() else {
            continue;
        };
        for entry in entries {
            match entry {
                Value::String(term) => terms.push(term.clone()),
                Value::Array(parts) => {
                    if let Some(term) = parts.first().and_then(Value::as_str) {
                        terms.push(term.to_string());
                    }
                }
                _ => {}
            }
        }
    }
    terms
}
