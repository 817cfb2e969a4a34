//! RIPE database access: route-object lookup over the REST search API

use crate::asn::Asn;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// RIPE REST search endpoint, filtered to objects whose `origin`
/// attribute references the queried ASN.
const RIPE_SEARCH_URL: &str =
    "https://rest.db.ripe.net/search.json?inverse-attribute=origin&source=RIPE&query-string=";

/// Request timeout for the registry query
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for registry lookups
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The registry returned a non-success HTTP status
    #[error("bad status: {0}")]
    Status(u16),

    /// The request could not be completed
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body could not be decoded
    #[error("bad response: {0}")]
    BadResponse(String),

    /// No route objects exist for the queried ASN
    #[error("route objects not found")]
    NotFound,
}

/// A source of route-object prefix strings for an ASN.
///
/// The real implementation is [`RipeClient`]; tests substitute an
/// in-memory source so the rest of the pipeline runs without network
/// access.
#[async_trait]
pub trait RouteSource {
    /// Look up the route objects registered against `asn`, returning
    /// raw prefix strings in response order. `want_v4` selects `route`
    /// objects, `want_v6` selects `route6` objects.
    async fn lookup_routes(
        &self,
        asn: &Asn,
        want_v4: bool,
        want_v6: bool,
    ) -> Result<Vec<String>, RegistryError>;
}

/// Queries the RIPE database REST search API over HTTPS.
pub struct RipeClient {
    client: reqwest::Client,
}

impl RipeClient {
    /// Create a client with a bounded request timeout.
    pub fn new() -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RegistryError::Transport(e.to_string()))?;
        Ok(RipeClient { client })
    }

    /// The URL queried for `asn`.
    pub fn query_url(asn: &Asn) -> String {
        format!("{RIPE_SEARCH_URL}{asn}")
    }

    async fn fetch(&self, url: &str) -> Result<reqwest::Response, RegistryError> {
        match self.client.get(url).send().await {
            Ok(response) => Ok(response),
            // One retry on transient failure; anything else is final.
            Err(e) if e.is_timeout() || e.is_connect() => self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| RegistryError::Transport(e.to_string())),
            Err(e) => Err(RegistryError::Transport(e.to_string())),
        }
    }
}

#[async_trait]
impl RouteSource for RipeClient {
    async fn lookup_routes(
        &self,
        asn: &Asn,
        want_v4: bool,
        want_v6: bool,
    ) -> Result<Vec<String>, RegistryError> {
        let response = self.fetch(&Self::query_url(asn)).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RegistryError::Transport(e.to_string()))?;

        let search: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| RegistryError::BadResponse(e.to_string()))?;

        let objects = search.objects.ok_or(RegistryError::NotFound)?;
        Ok(extract_routes(&objects, want_v4, want_v6))
    }
}

/// Pull `route`/`route6` attribute values out of the decoded response,
/// preserving response order.
fn extract_routes(objects: &Objects, want_v4: bool, want_v6: bool) -> Vec<String> {
    let mut routes = Vec::new();
    for object in &objects.object {
        for attribute in &object.attributes.attribute {
            let keep = match attribute.name.as_str() {
                "route" => want_v4,
                "route6" => want_v6,
                _ => false,
            };
            if keep {
                routes.push(attribute.value.clone());
            }
        }
    }
    routes
}

// Just the slice of the RIPE search response this tool reads; everything
// else in the document is ignored.

#[derive(Debug, Deserialize)]
struct SearchResponse {
    objects: Option<Objects>,
}

#[derive(Debug, Deserialize)]
struct Objects {
    #[serde(default)]
    object: Vec<RpslObject>,
}

#[derive(Debug, Deserialize)]
struct RpslObject {
    attributes: Attributes,
}

#[derive(Debug, Deserialize)]
struct Attributes {
    #[serde(default)]
    attribute: Vec<Attribute>,
}

#[derive(Debug, Deserialize)]
struct Attribute {
    name: String,
    value: String,
}
