use crate::config::types::{CatalogConfig, Config, DocumentConfig, PoolConfig, ResolverConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_pool_config(&config.pool)?;
    validate_catalog_config(&config.catalog)?;
    validate_resolver_config(&config.resolver)?;
    validate_document_config(&config.documents)?;
    Ok(())
}

/// Validates worker pool configuration
fn validate_pool_config(config: &PoolConfig) -> Result<(), ConfigError> {
    if config.workers < 1 {
        return Err(ConfigError::Validation(format!(
            "workers must be >= 1, got {}",
            config.workers
        )));
    }

    if config.queue_floor < 1 {
        return Err(ConfigError::Validation(format!(
            "queue-floor must be >= 1, got {}",
            config.queue_floor
        )));
    }

    Ok(())
}

/// Validates catalog source configuration
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    validate_endpoint("catalog.endpoint", &config.endpoint)?;

    if config.page_size < 1 {
        return Err(ConfigError::Validation(format!(
            "page-size must be >= 1, got {}",
            config.page_size
        )));
    }

    Ok(())
}

/// Validates title resolver configuration
fn validate_resolver_config(config: &ResolverConfig) -> Result<(), ConfigError> {
    validate_endpoint("resolver.endpoint", &config.endpoint)
}

/// Validates document source configuration
fn validate_document_config(config: &DocumentConfig) -> Result<(), ConfigError> {
    validate_endpoint("documents.endpoint", &config.endpoint)
}

/// Checks that an endpoint string parses as an absolute http(s) URL
fn validate_endpoint(name: &str, endpoint: &str) -> Result<(), ConfigError> {
    let url = Url::parse(endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", name, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Invalid {}: expected http or https, got {}",
            name,
            url.scheme()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = Config::default();
        config.pool.workers = 0;

        let err = validate(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut config = Config::default();
        config.catalog.page_size = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_relative_endpoint_rejected() {
        let mut config = Config::default();
        config.resolver.endpoint = "omdbapi.com/".to_string();

        let err = validate(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let mut config = Config::default();
        config.documents.endpoint = "ftp://www.imdb.com/title/".to_string();
        assert!(validate(&config).is_err());
    }
}
