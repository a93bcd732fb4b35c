use crate::config::DocumentConfig;
use crate::net::Fetcher;
use crate::sources::DocumentSource;
use crate::Result;
use async_trait::async_trait;

/// A fetched per-entry document with the address it came from
///
/// The address is part of the result record, so it travels with the body.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub url: String,
    pub body: String,
}

/// HTTP document source addressing IMDB title pages
///
/// The document address is the configured base with `tt<id>` appended; the
/// body is returned raw, since the metric is a literal text scan rather than
/// anything structural.
pub struct HttpDocuments {
    fetcher: Fetcher,
    endpoint: String,
}

impl HttpDocuments {
    pub fn new(fetcher: Fetcher, config: &DocumentConfig) -> Self {
        Self {
            fetcher,
            endpoint: config.endpoint.clone(),
        }
    }

    fn document_url(&self, imdb_id: &str) -> String {
        format!("{}tt{}", self.endpoint, imdb_id)
    }
}

#[async_trait]
impl DocumentSource for HttpDocuments {
    async fn fetch_document(&self, imdb_id: &str) -> Result<FetchedDocument> {
        let url = self.document_url(imdb_id);
        let body = self.fetcher.fetch_text(&url).await?;
        Ok(FetchedDocument { url, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::{build_http_client, RetryPolicy};

    #[test]
    fn test_document_url_construction() {
        let fetcher = Fetcher::new(build_http_client().unwrap(), RetryPolicy::Limited(1));
        let documents = HttpDocuments::new(
            fetcher,
            &DocumentConfig {
                endpoint: "http://www.imdb.com/title/".to_string(),
            },
        );

        assert_eq!(
            documents.document_url("2024544"),
            "http://www.imdb.com/title/tt2024544"
        );
    }
}
