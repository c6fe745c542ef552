//! Request URL composition.
//!
//! Every call goes to
//! `{base}/{ServicePath}.svc/{major}/{minor}/{token}/{endpoint}` where `base`
//! and `endpoint` lose their leading and trailing slashes. Endpoints are
//! inserted verbatim, query string included; the remote expects the raw
//! characters, so nothing is escaped.

use crate::config::{ApiVersion, ConnectorConfig};
use crate::error::ConfigError;
use crate::service::Service;

/// Composes request URLs for a fixed base and API version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    base_url: String,
    api_version: ApiVersion,
}

impl Default for UrlBuilder {
    fn default() -> Self {
        Self::from_config(&ConnectorConfig::default())
    }
}

impl UrlBuilder {
    pub fn new(base_url: &str, api_version: ApiVersion) -> Self {
        Self {
            base_url: strip_slashes(base_url).to_string(),
            api_version,
        }
    }

    pub fn from_config(config: &ConnectorConfig) -> Self {
        Self::new(&config.base_url, config.api_version)
    }

    /// Build a URL for a service given by its logical name.
    pub fn build(&self, endpoint: &str, service: &str, token: &str) -> Result<String, ConfigError> {
        let service = service.parse::<Service>()?;
        self.build_for(endpoint, service, token)
    }

    pub fn build_for(
        &self,
        endpoint: &str,
        service: Service,
        token: &str,
    ) -> Result<String, ConfigError> {
        if token.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        Ok(format!(
            "{}/{}.svc/{}/{}/{}",
            self.base_url,
            service.path_segment(),
            self.api_version,
            token,
            strip_slashes(endpoint)
        ))
    }
}

/// Build a URL against the production base and default API version.
pub fn build(endpoint: &str, service: &str, token: &str) -> Result<String, ConfigError> {
    UrlBuilder::default().build(endpoint, service, token)
}

/// Remove every leading and trailing `/`; interior slashes stay.
fn strip_slashes(s: &str) -> &str {
    s.trim_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_contract_url() {
        assert_eq!(
            build("/mediacontract", "activate", "TOK").unwrap(),
            "https://api.wazzupsoftware.com/ActivateService.svc/16/0/TOK/mediacontract"
        );
    }

    #[test]
    fn preserves_query_string() {
        assert_eq!(
            build("/realestate/?realtorid=7&id=42", "output", "TOK").unwrap(),
            "https://api.wazzupsoftware.com/OutputService.svc/16/0/TOK/realestate/?realtorid=7&id=42"
        );
    }

    #[test]
    fn missing_token() {
        assert_eq!(build("/x", "activate", ""), Err(ConfigError::MissingToken));
    }

    #[test]
    fn unknown_service() {
        assert_eq!(
            build("/x", "nope", "TOK"),
            Err(ConfigError::UnknownService("nope".to_string()))
        );
    }

    #[test]
    fn unknown_service_wins_over_missing_token() {
        assert!(matches!(
            build("/x", "nope", ""),
            Err(ConfigError::UnknownService(_))
        ));
    }

    #[test]
    fn redundant_slashes_are_ignored() {
        let expected = build("x", "output", "T").unwrap();
        assert_eq!(build("/x/", "output", "T").unwrap(), expected);
        assert_eq!(build("//x//", "output", "T").unwrap(), expected);
    }

    #[test]
    fn interior_slashes_survive() {
        assert!(build("/a/b/c/", "output", "T").unwrap().ends_with("/T/a/b/c"));
    }

    #[test]
    fn custom_base_and_version() {
        let builder = UrlBuilder::new("http://localhost:3000//", ApiVersion { major: 1, minor: 0 });
        assert_eq!(
            builder.build_for("mediacontract", Service::Activate, "T").unwrap(),
            "http://localhost:3000/ActivateService.svc/1/0/T/mediacontract"
        );
    }

    #[test]
    fn token_is_a_path_segment() {
        for service in Service::ALL {
            let url = build("/endpoint", service.name(), "secret").unwrap();
            assert!(url.starts_with("https://api.wazzupsoftware.com/"));
            assert!(url.split('/').any(|segment| segment == "secret"));
        }
    }
}
