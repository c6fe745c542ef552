//! In-process stand-in for the Wazzup API.
//!
//! Serves the four endpoints the connector uses under the same path layout
//! as the real service (`/{Service}.svc/16/0/{token}/...`) and answers with
//! the same `<Result>` envelope. Contract activation is stateful, so a test
//! can list, activate and list again. Property data comes from the shared
//! fixtures in `test-vectors/`.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

/// Token accepted by `app()`.
pub const DEFAULT_TOKEN: &str = "test-token";

/// Realtor whose properties are served from the fixtures.
pub const KNOWN_REALTOR: i64 = 1001;
/// Property served in full by `/realestate/`.
pub const KNOWN_PROPERTY: i64 = 4001;

const SUMMARIES_XML: &str = include_str!("../../test-vectors/summaries.xml");
const PROPERTY_XML: &str = include_str!("../../test-vectors/property.xml");

const ACCEPT_ACTIVATION: &str = "acceptactivation";
/// Media type the real service expects on activation requests.
pub const ACTIVATION_CONTENT_TYPE: &str = "text/html";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaContract {
    pub id: i64,
    pub realtor_id: i64,
    pub name: String,
    pub active: bool,
}

pub type Db = Arc<RwLock<BTreeMap<i64, MediaContract>>>;

#[derive(Clone)]
struct AppState {
    token: Arc<str>,
    contracts: Db,
}

/// Contracts every fresh server starts with: one active, one not.
pub fn seed_contracts() -> Vec<MediaContract> {
    vec![
        MediaContract {
            id: 1,
            realtor_id: KNOWN_REALTOR,
            name: "Makelaardij Zuid".to_string(),
            active: true,
        },
        MediaContract {
            id: 2,
            realtor_id: 1002,
            name: "Van Dam Wonen".to_string(),
            active: false,
        },
    ]
}

pub fn app() -> Router {
    app_with_token(DEFAULT_TOKEN)
}

pub fn app_with_token(token: &str) -> Router {
    let contracts = seed_contracts().into_iter().map(|c| (c.id, c)).collect();
    let state = AppState {
        token: Arc::from(token),
        contracts: Arc::new(RwLock::new(contracts)),
    };
    Router::new()
        .route(
            "/ActivateService.svc/16/0/{token}/mediacontract",
            get(list_contracts),
        )
        .route(
            "/ActivateService.svc/16/0/{token}/mediacontract/",
            post(activate_contract),
        )
        .route(
            "/OutputService.svc/16/0/{token}/realestatesummary/",
            get(list_summaries),
        )
        .route("/OutputService.svc/16/0/{token}/realestate/", get(get_property))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_token(listener, DEFAULT_TOKEN).await
}

pub async fn run_with_token(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock Wazzup API listening");
    }
    axum::serve(listener, app_with_token(token)).await
}

#[derive(Deserialize)]
struct ActivateParams {
    id: i64,
    action: String,
}

#[derive(Deserialize)]
struct SummaryParams {
    realtorid: i64,
}

#[derive(Deserialize)]
struct PropertyParams {
    realtorid: i64,
    id: i64,
}

async fn list_contracts(State(state): State<AppState>, Path(token): Path<String>) -> Response {
    if let Some(rejected) = check_token(&state, &token) {
        return rejected;
    }
    let contracts = state.contracts.read().await;
    let items: String = contracts.values().map(contract_xml).collect();
    xml(success_envelope(&format!(
        "<ArrayOfMediaContractSnapshot>{items}</ArrayOfMediaContractSnapshot>"
    )))
}

async fn activate_contract(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(params): Query<ActivateParams>,
    headers: HeaderMap,
    body: String,
) -> Response {
    if !is_activation_content_type(&headers) {
        debug!(content_type = ?headers.get(header::CONTENT_TYPE), "rejecting activation");
        return StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response();
    }
    if !body.is_empty() {
        debug!(len = body.len(), "rejecting activation with a body");
        return StatusCode::BAD_REQUEST.into_response();
    }
    if let Some(rejected) = check_token(&state, &token) {
        return rejected;
    }
    if params.action != ACCEPT_ACTIVATION {
        return xml(failure_envelope(&format!("Unknown action '{}'", params.action)));
    }
    let mut contracts = state.contracts.write().await;
    match contracts.get_mut(&params.id) {
        Some(contract) => {
            contract.active = true;
            debug!(id = params.id, "contract activated");
            xml(success_envelope(""))
        }
        None => xml(failure_envelope(&format!(
            "Media contract {} not found",
            params.id
        ))),
    }
}

async fn list_summaries(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(params): Query<SummaryParams>,
) -> Response {
    if let Some(rejected) = check_token(&state, &token) {
        return rejected;
    }
    if params.realtorid < 0 {
        return StatusCode::BAD_REQUEST.into_response();
    }
    if params.realtorid == KNOWN_REALTOR {
        return xml(SUMMARIES_XML.to_string());
    }
    xml(success_envelope("<ArrayOfRealEstatePropertySummarySnapshot/>"))
}

async fn get_property(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(params): Query<PropertyParams>,
) -> Response {
    if let Some(rejected) = check_token(&state, &token) {
        return rejected;
    }
    if params.realtorid < 0 || params.id < 0 {
        return StatusCode::BAD_REQUEST.into_response();
    }
    if params.realtorid == KNOWN_REALTOR && params.id == KNOWN_PROPERTY {
        return xml(PROPERTY_XML.to_string());
    }
    xml(failure_envelope(&format!(
        "Real estate property {} not found for realtor {}",
        params.id, params.realtorid
    )))
}

/// Parameters after `;` (such as a charset) are ignored.
fn is_activation_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|media| media.trim().eq_ignore_ascii_case(ACTIVATION_CONTENT_TYPE))
}

/// The real service answers a bad token with 200 and a failure envelope.
fn check_token(state: &AppState, token: &str) -> Option<Response> {
    if token == &*state.token {
        return None;
    }
    debug!("rejecting request with unknown token");
    Some(xml(failure_envelope("Invalid token")))
}

fn xml(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], body).into_response()
}

pub fn success_envelope(payload: &str) -> String {
    format!("<Result><IsSuccess>true</IsSuccess><ErrorMessage/>{payload}</Result>")
}

pub fn failure_envelope(message: &str) -> String {
    format!(
        "<Result><IsSuccess>false</IsSuccess><ErrorMessage>{}</ErrorMessage></Result>",
        escape(message)
    )
}

fn contract_xml(contract: &MediaContract) -> String {
    let status = if contract.active { "Active" } else { "Inactive" };
    format!(
        "<MediaContractSnapshot>\
         <MediaContractID>{}</MediaContractID>\
         <MediaContractStatus>{status}</MediaContractStatus>\
         <DateTimeCreatedUtc>2016-05-04T08:00:00</DateTimeCreatedUtc>\
         <RealtorID>{}</RealtorID>\
         <Name>{}</Name>\
         <CountryCode>NL</CountryCode>\
         </MediaContractSnapshot>",
        contract.id,
        contract.realtor_id,
        escape(&contract.name)
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
