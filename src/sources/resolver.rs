use crate::config::ResolverConfig;
use crate::net::Fetcher;
use crate::sources::TitleResolver;
use crate::Result;
use async_trait::async_trait;
use url::Url;

/// HTTP title resolver speaking the OMDb query shape
///
/// A hit answers with an `imdbID` field (`"tt1234567"`); a body without one
/// is a miss, not an error — the caller decides whether to retry with fewer
/// words. Returned ids are normalized by stripping the leading `t`s so they
/// match the catalog's bare-digit form.
pub struct HttpResolver {
    fetcher: Fetcher,
    endpoint: Url,
}

impl HttpResolver {
    pub fn new(fetcher: Fetcher, config: &ResolverConfig) -> Result<Self> {
        Ok(Self {
            fetcher,
            endpoint: Url::parse(&config.endpoint)?,
        })
    }

    fn search_url(&self, words: &[&str]) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("t", &words.join(" "));
        url
    }
}

#[async_trait]
impl TitleResolver for HttpResolver {
    async fn search(&self, words: &[&str]) -> Result<Option<String>> {
        let url = self.search_url(words);
        tracing::debug!("Search url: {}", url);

        let body = self.fetcher.fetch_text(url.as_str()).await?;
        let value: serde_json::Value = serde_json::from_str(&body)?;

        Ok(value
            .get("imdbID")
            .and_then(|id| id.as_str())
            .map(|id| id.trim_start_matches('t').to_string()))
    }
}
