use crate::config::CatalogConfig;
use crate::net::Fetcher;
use crate::sources::CatalogSource;
use crate::{Result, TallyError};
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

/// One page of the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    /// Catalog-wide entry count as reported by this page
    pub total: u64,
    pub entries: Vec<CatalogEntry>,
}

/// One catalog item to be resolved and measured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    /// Direct IMDB id, when the catalog already carries one (bare digits)
    pub imdb_id: Option<String>,
}

/// HTTP catalog source speaking the in-theaters JSON schema
///
/// The response body is `{"total": N, "movies": [...]}`; a body carrying an
/// `error` field is the API's rate-limit signal and counts as a transient
/// failure, so the same request is reissued under the fetcher's policy. A
/// success body whose shape cannot be read is not retried — there is no
/// well-defined recovery, the caller logs and moves on.
pub struct HttpCatalog {
    fetcher: Fetcher,
    endpoint: Url,
    api_key: String,
    page_size: u32,
}

impl HttpCatalog {
    pub fn new(fetcher: Fetcher, config: &CatalogConfig) -> Result<Self> {
        Ok(Self {
            fetcher,
            endpoint: Url::parse(&config.endpoint)?,
            api_key: config.api_key.clone(),
            page_size: config.page_size,
        })
    }

    fn page_url(&self, page: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("page_limit", &self.page_size.to_string())
            .append_pair("apikey", &self.api_key);
        url
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch_page(&self, page: u32) -> Result<CatalogPage> {
        let url = self.page_url(page);
        let mut rejections: u32 = 0;

        loop {
            let body = self.fetcher.fetch_text(url.as_str()).await?;
            let value: serde_json::Value = serde_json::from_str(&body)?;

            // API-level throttling ("too many requests") arrives as a 200
            // with an error payload; retry the same fetch until it clears.
            if value.get("error").is_some() {
                rejections += 1;
                tracing::debug!("Catalog page {} rejected by API ({})", page, rejections);
                if !self.fetcher.policy().allows(rejections) {
                    return Err(TallyError::RetriesExhausted {
                        url: url.to_string(),
                        attempts: rejections,
                    });
                }
                continue;
            }

            let raw: RawPage = serde_json::from_value(value).map_err(|e| {
                TallyError::CatalogShape(format!("page {}: {}", page, e))
            })?;

            return Ok(CatalogPage {
                total: raw.total,
                entries: raw.movies.into_iter().map(CatalogEntry::from).collect(),
            });
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawPage {
    total: u64,
    #[serde(default)]
    movies: Vec<RawMovie>,
}

#[derive(Debug, Deserialize)]
struct RawMovie {
    id: RawId,
    title: String,
    #[serde(default)]
    alternate_ids: Option<RawAlternateIds>,
}

#[derive(Debug, Deserialize)]
struct RawAlternateIds {
    imdb: Option<String>,
}

/// Catalog ids appear both as JSON numbers and strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl From<RawMovie> for CatalogEntry {
    fn from(raw: RawMovie) -> Self {
        let id = match raw.id {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        };
        CatalogEntry {
            id,
            title: raw.title,
            imdb_id: raw.alternate_ids.and_then(|alt| alt.imdb),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::{build_http_client, RetryPolicy};

    fn catalog(endpoint: &str) -> HttpCatalog {
        let fetcher = Fetcher::new(build_http_client().unwrap(), RetryPolicy::Limited(1));
        HttpCatalog::new(
            fetcher,
            &CatalogConfig {
                endpoint: endpoint.to_string(),
                api_key: "test-key".to_string(),
                page_size: 50,
                seed_interval_ms: 250,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_page_url_carries_pagination_params() {
        let catalog = catalog("http://example.com/in_theaters.json");
        let url = catalog.page_url(3);

        assert_eq!(
            url.as_str(),
            "http://example.com/in_theaters.json?page=3&page_limit=50&apikey=test-key"
        );
    }

    #[test]
    fn test_raw_page_parses_mixed_entry_shapes() {
        let raw: RawPage = serde_json::from_str(
            r#"{
                "total": 120,
                "movies": [
                    {"id": 771312089, "title": "Direct", "alternate_ids": {"imdb": "2024544"}},
                    {"id": "abc-1", "title": "Needs Search"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(raw.total, 120);
        let entries: Vec<CatalogEntry> = raw.movies.into_iter().map(CatalogEntry::from).collect();
        assert_eq!(entries[0].id, "771312089");
        assert_eq!(entries[0].imdb_id.as_deref(), Some("2024544"));
        assert_eq!(entries[1].id, "abc-1");
        assert_eq!(entries[1].imdb_id, None);
    }

    #[test]
    fn test_missing_total_is_a_shape_error() {
        let result: std::result::Result<RawPage, _> =
            serde_json::from_str(r#"{"movies": []}"#);
        assert!(result.is_err());
    }
}
