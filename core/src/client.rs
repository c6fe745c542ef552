//! The connector: the crate's public entry point.
//!
//! # Design
//! `Connector` holds an auth token, a `UrlBuilder` and a `Transport`. Every
//! public operation follows the same path: format the endpoint, build the URL
//! for its service, make exactly one transport call, reject statuses above 299
//! and decode the envelope. Nothing is retried or cached.
//!
//! `Connector::within` gives a view whose calls pass a timeout to the
//! transport for that call only.
//!
//! The token sits behind an `RwLock` so it can be rotated while the connector
//! is shared. The read lock is held only while the URL is being built, never
//! across the network call. Everything else is immutable after construction,
//! so `Connector<T>` is `Send + Sync` whenever `T` is.

use std::fmt;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::ConnectorConfig;
use crate::envelope;
use crate::error::{ApiError, ConfigError, ErrorKind, Operation};
use crate::http::{HttpMethod, HttpTransport, Transport};
use crate::service::Service;
use crate::types::Response;
use crate::url::UrlBuilder;

pub struct Connector<T = HttpTransport> {
    token: RwLock<String>,
    urls: UrlBuilder,
    transport: T,
}

impl Connector<HttpTransport> {
    /// A connector using the default ureq transport, configured from `config`.
    pub fn http(token: impl Into<String>, config: ConnectorConfig) -> Self {
        let transport = HttpTransport::from_config(&config);
        Self::with_config(config, token, transport)
    }
}

impl<T: Transport> Connector<T> {
    /// A connector for the production API.
    pub fn new(token: impl Into<String>, transport: T) -> Self {
        Self::with_config(ConnectorConfig::default(), token, transport)
    }

    pub fn with_config(config: ConnectorConfig, token: impl Into<String>, transport: T) -> Self {
        Self {
            token: RwLock::new(token.into()),
            urls: UrlBuilder::from_config(&config),
            transport,
        }
    }

    pub fn token(&self) -> String {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the token used by subsequent calls. Calls already past URL
    /// construction keep the old one.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token.into();
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch every media contract visible to the token.
    pub fn get_contracts(&self) -> Result<Response, ApiError> {
        self.contracts(None)
    }

    /// Ask the remote to activate a contract.
    ///
    /// The request is sent whatever the caller believes the contract's status
    /// to be; the remote decides. The returned envelope carries no payload.
    pub fn activate_contract(&self, contract_id: i64) -> Result<Response, ApiError> {
        self.activate(contract_id, None)
    }

    /// Fetch the property summaries for a realtor.
    pub fn get_property_summary(&self, realtor_id: i64) -> Result<Response, ApiError> {
        self.summary(realtor_id, None)
    }

    /// Fetch one property in full. Also returns the URL that was requested.
    pub fn get_property(
        &self,
        realtor_id: i64,
        property_id: i64,
    ) -> Result<(Response, String), ApiError> {
        self.property(realtor_id, property_id, None)
    }

    /// The same operations, each call abandoned after `timeout`.
    ///
    /// ```no_run
    /// # use std::time::Duration;
    /// # use wazzup_core::{Connector, ConnectorConfig};
    /// let connector = Connector::http("token", ConnectorConfig::default());
    /// let contracts = connector.within(Duration::from_secs(5)).get_contracts();
    /// ```
    pub fn within(&self, timeout: Duration) -> Bounded<'_, T> {
        Bounded {
            connector: self,
            timeout,
        }
    }

    fn contracts(&self, timeout: Option<Duration>) -> Result<Response, ApiError> {
        self.dispatch(
            Operation::GetContracts,
            Service::Activate,
            HttpMethod::Get,
            "/mediacontract",
            timeout,
        )
        .map(|(response, _)| response)
    }

    fn activate(&self, contract_id: i64, timeout: Option<Duration>) -> Result<Response, ApiError> {
        let endpoint = format!("/mediacontract/?id={contract_id}&action=acceptactivation");
        self.dispatch(
            Operation::ActivateContract,
            Service::Activate,
            HttpMethod::Post,
            &endpoint,
            timeout,
        )
        .map(|(response, _)| response)
    }

    fn summary(&self, realtor_id: i64, timeout: Option<Duration>) -> Result<Response, ApiError> {
        let endpoint = format!("/realestatesummary/?realtorid={realtor_id}");
        self.dispatch(
            Operation::GetPropertySummary,
            Service::Output,
            HttpMethod::Get,
            &endpoint,
            timeout,
        )
        .map(|(response, _)| response)
    }

    fn property(
        &self,
        realtor_id: i64,
        property_id: i64,
        timeout: Option<Duration>,
    ) -> Result<(Response, String), ApiError> {
        let endpoint = format!("/realestate/?realtorid={realtor_id}&id={property_id}");
        self.dispatch(
            Operation::GetProperty,
            Service::Output,
            HttpMethod::Get,
            &endpoint,
            timeout,
        )
    }

    fn url(&self, service: Service, endpoint: &str) -> Result<String, ConfigError> {
        let token = self.token.read().unwrap_or_else(PoisonError::into_inner);
        self.urls.build_for(endpoint, service, &token)
    }

    fn dispatch(
        &self,
        operation: Operation,
        service: Service,
        method: HttpMethod,
        endpoint: &str,
        timeout: Option<Duration>,
    ) -> Result<(Response, String), ApiError> {
        let url = self
            .url(service, endpoint)
            .map_err(|e| ApiError::new(operation, e))?;

        debug!(?operation, %service, ?method, endpoint, ?timeout, "calling remote");
        let result = match method {
            HttpMethod::Get => self.transport.get(&url, timeout),
            HttpMethod::Post => self.transport.post(&url, &[], timeout),
        };
        let response = result.map_err(|e| {
            warn!(?operation, %service, endpoint, error = %e, "transport failed");
            ApiError::new(operation, e)
        })?;

        if !response.is_success() {
            warn!(
                ?operation,
                %service,
                endpoint,
                status = response.status,
                "unexpected status"
            );
            return Err(ApiError::new(operation, ErrorKind::Status(response.status)));
        }

        let decoded =
            envelope::decode(&response.body).map_err(|kind| ApiError::new(operation, kind))?;
        Ok((decoded, url))
    }
}

/// Borrowed view of a `Connector` whose calls carry a timeout. Built by
/// `Connector::within`.
#[derive(Debug)]
pub struct Bounded<'a, T> {
    connector: &'a Connector<T>,
    timeout: Duration,
}

impl<T: Transport> Bounded<'_, T> {
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn get_contracts(&self) -> Result<Response, ApiError> {
        self.connector.contracts(Some(self.timeout))
    }

    pub fn activate_contract(&self, contract_id: i64) -> Result<Response, ApiError> {
        self.connector.activate(contract_id, Some(self.timeout))
    }

    pub fn get_property_summary(&self, realtor_id: i64) -> Result<Response, ApiError> {
        self.connector.summary(realtor_id, Some(self.timeout))
    }

    pub fn get_property(
        &self,
        realtor_id: i64,
        property_id: i64,
    ) -> Result<(Response, String), ApiError> {
        self.connector
            .property(realtor_id, property_id, Some(self.timeout))
    }
}

impl<T> fmt::Debug for Connector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connector")
            .field("token", &"<redacted>")
            .field("urls", &self.urls)
            .finish_non_exhaustive()
    }
}
