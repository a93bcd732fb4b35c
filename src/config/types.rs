use serde::Deserialize;

/// Main configuration structure for Reel-Tally
///
/// Every section has sensible defaults so a config file is optional; a file
/// only needs to name the keys it wants to override.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pool: PoolConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub documents: DocumentConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pool: PoolConfig::default(),
            catalog: CatalogConfig::default(),
            resolver: ResolverConfig::default(),
            documents: DocumentConfig::default(),
        }
    }
}

/// Worker pool configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PoolConfig {
    /// Number of parallel workers draining the command queue.
    /// The work is I/O bound, so this is deliberately high; around 40 the
    /// throughput tops out and further workers mostly sit idle.
    #[serde(default = "default_workers")]
    pub workers: u32,

    /// The queue capacity never drops below this floor, regardless of how
    /// few workers are configured. A full page of entries must fit.
    #[serde(rename = "queue-floor", default = "default_queue_floor")]
    pub queue_floor: u32,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            queue_floor: default_queue_floor(),
        }
    }
}

/// Paginated catalog API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Endpoint listing in-theater movies, paginated
    #[serde(default = "default_catalog_endpoint")]
    pub endpoint: String,

    /// API key appended to every catalog request
    #[serde(rename = "api-key", default = "default_api_key")]
    pub api_key: String,

    /// Entries per catalog page
    #[serde(rename = "page-size", default = "default_page_size")]
    pub page_size: u32,

    /// Delay between successive page submissions (milliseconds); keeps the
    /// orchestrator from flooding the queue with speculative page fetches
    #[serde(rename = "seed-interval-ms", default = "default_seed_interval")]
    pub seed_interval_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: default_catalog_endpoint(),
            api_key: default_api_key(),
            page_size: default_page_size(),
            seed_interval_ms: default_seed_interval(),
        }
    }
}

/// Title-search resolver configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ResolverConfig {
    /// Endpoint answering `?t=<title words>` with an `imdbID` field on a hit
    #[serde(default = "default_resolver_endpoint")]
    pub endpoint: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            endpoint: default_resolver_endpoint(),
        }
    }
}

/// Per-entry document source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentConfig {
    /// Base URL the IMDB id is appended to (as `tt<id>`)
    #[serde(default = "default_document_endpoint")]
    pub endpoint: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            endpoint: default_document_endpoint(),
        }
    }
}

fn default_workers() -> u32 {
    200
}

fn default_queue_floor() -> u32 {
    150
}

fn default_catalog_endpoint() -> String {
    "http://api.rottentomatoes.com/api/public/v1.0/lists/movies/in_theaters.json".to_string()
}

fn default_api_key() -> String {
    "skdrr2udj575jebmn7x68dud".to_string()
}

fn default_page_size() -> u32 {
    50
}

fn default_seed_interval() -> u64 {
    250
}

fn default_resolver_endpoint() -> String {
    "http://www.omdbapi.com/".to_string()
}

fn default_document_endpoint() -> String {
    "http://www.imdb.com/title/".to_string()
}
