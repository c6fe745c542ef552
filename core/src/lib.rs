//! Blocking client for the Wazzup real-estate API.
//!
//! # Overview
//! The remote exposes two services, `ActivateService` (media contracts) and
//! `OutputService` (property data), that answer every call with an XML
//! `<Result>` envelope. `Connector` wraps the four calls this crate supports:
//!
//! - `get_contracts` lists media contracts,
//! - `activate_contract` asks the remote to activate one,
//! - `get_property_summary` lists a realtor's properties,
//! - `get_property` fetches one property in full.
//!
//! # Design
//! - The network round-trip sits behind the `Transport` trait. `HttpTransport`
//!   (ureq) is the default; tests plug in their own.
//! - URL composition (`url`) and envelope decoding (`envelope`) are plain
//!   functions, usable without a connector.
//! - The XML schema is declared on the domain types in `types` and decoded
//!   with quick-xml's serde support.
//! - A failure envelope (`IsSuccess=false`) is an error that still carries
//!   the decoded `Response`; see `ApiError::response`.

pub mod client;
pub mod config;
mod de;
pub mod envelope;
pub mod error;
pub mod http;
pub mod service;
pub mod types;
pub mod url;

pub use client::{Bounded, Connector};
pub use config::{ApiVersion, ConnectorConfig};
pub use de::parse_timestamp;
pub use error::{ApiError, ConfigError, ErrorKind, Operation, TransportError};
pub use http::{HttpMethod, HttpResponse, HttpTransport, Transport};
pub use service::Service;
pub use types::{
    Acceptance, Agency, Attachment, AttachmentType, Contract, Descriptions, FileType, Info,
    Location, Offer, Price, PriceCode, Property, PropertyStatus, PurchaseCondition,
    PurchaseSpecification, RentSpecification, RentType, Response, Summary, Translation,
};
pub use url::UrlBuilder;
