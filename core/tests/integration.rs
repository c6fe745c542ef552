//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, points a `Connector` with the
//! default ureq transport at it, and exercises every operation over real
//! HTTP. Activation goes through the mock's content-type and empty-body
//! checks, so the lifecycle test also pins what the client puts on the wire.
//! Also runs all four operations concurrently on one connector and
//! checks the results match a serial run.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mock_server::{DEFAULT_TOKEN, KNOWN_PROPERTY, KNOWN_REALTOR};
use wazzup_core::{ApiVersion, Connector, ConnectorConfig, ErrorKind, HttpTransport, Response};

/// Start the mock server on its own runtime thread and return its address.
fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn config(addr: SocketAddr) -> ConnectorConfig {
    ConnectorConfig {
        base_url: format!("http://{addr}/"),
        api_version: ApiVersion::default(),
        timeout_secs: Some(10),
    }
}

fn connector(addr: SocketAddr, token: &str) -> Connector<HttpTransport> {
    Connector::http(token, config(addr))
}

#[test]
fn contract_activation_lifecycle() {
    let addr = start_server();
    let c = connector(addr, DEFAULT_TOKEN);

    // Step 1: list, contract 2 is inactive.
    let response = c.get_contracts().unwrap();
    assert_eq!(response.contracts.len(), 2);
    let second = response.contracts.iter().find(|c| c.id == 2).unwrap();
    assert!(!second.is_active());

    // Step 2: activate it.
    let response = c.activate_contract(2).unwrap();
    assert!(response.success);
    assert!(response.contracts.is_empty());

    // Step 3: list again, everything is active.
    let response = c.get_contracts().unwrap();
    assert!(response.contracts.iter().all(|c| c.is_active()));

    // Step 4: activating again is still accepted by the remote.
    assert!(c.activate_contract(2).unwrap().success);

    // Step 5: unknown contract.
    let err = c.activate_contract(99).unwrap_err();
    assert_eq!(
        err.to_string(),
        "could not activate contract: Media contract 99 not found"
    );
}

#[test]
fn property_data() {
    let addr = start_server();
    let c = connector(addr, DEFAULT_TOKEN);

    let summaries = c.get_property_summary(KNOWN_REALTOR).unwrap().summaries;
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].id, KNOWN_PROPERTY);

    assert!(c.get_property_summary(5).unwrap().summaries.is_empty());

    let (response, url) = c.get_property(KNOWN_REALTOR, KNOWN_PROPERTY).unwrap();
    assert_eq!(
        url,
        format!(
            "http://{addr}/OutputService.svc/16/0/{DEFAULT_TOKEN}/realestate/?realtorid=1001&id=4001"
        )
    );
    let property = response.property.unwrap();
    assert_eq!(property.info.unwrap().id, KNOWN_PROPERTY);
    assert_eq!(property.attachments.len(), 3);

    let err = c.get_property(KNOWN_REALTOR, 1).unwrap_err();
    assert!(err.response().unwrap().property.is_none());
}

#[test]
fn bounded_calls_reach_the_server() {
    let addr = start_server();
    let c = Connector::http(
        DEFAULT_TOKEN,
        ConnectorConfig {
            timeout_secs: None,
            ..config(addr)
        },
    );
    let bounded = c.within(Duration::from_secs(5));

    assert_eq!(bounded.get_contracts().unwrap().contracts.len(), 2);
    assert!(bounded.activate_contract(2).unwrap().success);
    assert_eq!(
        bounded.get_property_summary(KNOWN_REALTOR).unwrap().summaries.len(),
        2
    );
    let (response, _) = bounded.get_property(KNOWN_REALTOR, KNOWN_PROPERTY).unwrap();
    assert!(response.property.is_some());
}

#[test]
fn bad_token_is_an_envelope_error() {
    let addr = start_server();
    let c = connector(addr, "wrong");

    let err = c.get_contracts().unwrap_err();
    assert_eq!(err.to_string(), "could not fetch contracts: Invalid token");
    let response = err.into_response().unwrap();
    assert!(!response.success);
    assert_eq!(response.error_message, "Invalid token");

    // Rotating to the right token fixes it without a new connector.
    c.set_token(DEFAULT_TOKEN);
    assert!(c.get_contracts().unwrap().success);
}

#[test]
fn error_status_is_reported() {
    let addr = start_server();
    let c = connector(addr, DEFAULT_TOKEN);

    let err = c.get_property_summary(-1).unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "could not fetch summary: call error, status 400");
}

#[test]
fn unreachable_server_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let err = connector(addr, DEFAULT_TOKEN).get_contracts().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Transport(_)));
    assert!(err.to_string().starts_with("could not fetch contracts: fetch error: "));
}

#[test]
fn concurrent_calls_match_serial_results() {
    let addr = start_server();
    let c = Arc::new(connector(addr, DEFAULT_TOKEN));

    // Contract 1 is already active, so activating it leaves state unchanged
    // and every interleaving yields the same responses.
    let serial: Vec<Response> = vec![
        c.get_contracts().unwrap(),
        c.activate_contract(1).unwrap(),
        c.get_property_summary(KNOWN_REALTOR).unwrap(),
        c.get_property(KNOWN_REALTOR, KNOWN_PROPERTY).unwrap().0,
    ];

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let c = Arc::clone(&c);
            std::thread::spawn(move || {
                vec![
                    c.get_contracts().unwrap(),
                    c.activate_contract(1).unwrap(),
                    c.get_property_summary(KNOWN_REALTOR).unwrap(),
                    c.get_property(KNOWN_REALTOR, KNOWN_PROPERTY).unwrap().0,
                ]
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), serial);
    }
}
