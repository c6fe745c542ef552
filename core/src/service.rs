//! Catalog of the remote's services.
//!
//! The remote groups its endpoints under two WCF-style services. Callers
//! refer to them by a short logical name; the URL carries the service's path
//! segment followed by `.svc`.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// A logical service exposed by the remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// Media contract lifecycle.
    Activate,
    /// Property data.
    Output,
}

impl Service {
    pub const ALL: [Service; 2] = [Service::Activate, Service::Output];

    /// Logical name, as accepted by `resolve`.
    pub fn name(self) -> &'static str {
        match self {
            Service::Activate => "activate",
            Service::Output => "output",
        }
    }

    /// Remote path segment, without the `.svc` suffix.
    pub fn path_segment(self) -> &'static str {
        match self {
            Service::Activate => "ActivateService",
            Service::Output => "OutputService",
        }
    }
}

impl FromStr for Service {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Service::ALL
            .into_iter()
            .find(|service| service.name() == name)
            .ok_or_else(|| ConfigError::UnknownService(name.to_string()))
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Map a logical service name to its remote path segment.
pub fn resolve(name: &str) -> Result<&'static str, ConfigError> {
    name.parse::<Service>().map(Service::path_segment)
}
