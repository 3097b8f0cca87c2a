//! End-to-end flow against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every client
//! operation over real HTTP through `UreqTransport`. Validates that request
//! building, the transport and response parsing agree with an actual server.

use std::sync::Arc;

use threetaps_core::{
    ApiError, Client, ClientConfig, Dimension, PostingStatusUpdate, RangeParams, SearchParams,
    StatusQueryId, SummaryParams, UreqTransport,
};

/// Start the mock server on a background thread and return its base URL.
fn start_mock_server() -> String {
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

    format!("http://{addr}")
}

#[test]
fn full_api_flow() {
    let base_url = start_mock_server();
    let config = ClientConfig::default()
        .with_base_url(&base_url)
        .with_credentials("agent", "auth");
    let client = Client::new(config, UreqTransport::new());

    // Step 1: system status.
    let status = client.system_status().unwrap();
    assert_eq!(status["message"], "OK");

    // Step 2: search echoes the query it received, +OR+ intact.
    let params = SearchParams::new()
        .location("LAX")
        .category("VAUT+OR+VOTH")
        .rpp(10);
    let results = client.search(&params).unwrap();
    assert_eq!(results["success"], true);
    assert_eq!(results["query"]["category"], "VAUT+OR+VOTH");
    assert_eq!(results["query"]["rpp"], "10");

    // Step 3: the rest of the search family.
    assert_eq!(client.count(&params).unwrap()["count"], 0);
    assert_eq!(client.best_match("iPhone 4").unwrap()["keywords"], "iPhone 4");
    let range = client
        .range(&RangeParams::new(params.clone(), "price,year"))
        .unwrap();
    assert!(range["range"]["year"].is_object());
    let summary = client
        .summary(&SummaryParams::new(params, Dimension::Source))
        .unwrap();
    assert_eq!(summary["dimension"], "source");

    // Step 4: record two status events, then read them back.
    let postings = vec![
        PostingStatusUpdate::new("CRAIG", "42", "sent").with_timestamp("2011/12/21 01:09:41"),
        PostingStatusUpdate::new("CRAIG", "42", "found").with_attribute("postKey", "3JE8VFD"),
    ];
    let ack = client.update_status(&postings).unwrap();
    assert_eq!(ack["success"], true);

    let ids = [StatusQueryId::new("CRAIG", "42"), StatusQueryId::new("E_BAY", "1")];
    let statuses = client.get_status(&ids).unwrap();
    assert_eq!(statuses[0]["exists"], true);
    assert_eq!(statuses[0]["history"][0]["status"], "sent");
    assert_eq!(statuses[0]["history"][0]["timestamp"], "2011/12/21 01:09:41");
    assert_eq!(statuses[0]["history"][1]["attributes"]["postKey"], "3JE8VFD");
    assert_eq!(statuses[1]["exists"], false);

    // Step 5: pre-flight failures never reach the server.
    assert!(matches!(
        client.search(&SearchParams::new()),
        Err(ApiError::MissingParameter { .. })
    ));
    assert!(matches!(
        client.search(&SearchParams::new().start("1970-02-31 12:00:00")),
        Err(ApiError::Validation { .. })
    ));
}

#[test]
fn unknown_endpoint_is_request_failed() {
    let base_url = start_mock_server();
    // A base path the mock server does not serve turns every call into a 404.
    let client = Client::new(
        ClientConfig::default().with_base_url(format!("{base_url}/v2")),
        UreqTransport::new(),
    );
    match client.system_status().unwrap_err() {
        ApiError::RequestFailed {
            status,
            status_text,
            ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(status_text, "Not Found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn shared_client_across_threads() {
    let base_url = start_mock_server();
    let client = Arc::new(Client::new(
        ClientConfig::default().with_base_url(&base_url),
        UreqTransport::new(),
    ));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let client = Arc::clone(&client);
            std::thread::spawn(move || {
                let params = SearchParams::new().text(format!("query {i}"));
                client.search(&params).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let results = handle.join().unwrap();
        assert_eq!(results["query"]["text"], format!("query {i}"));
    }
}

#[test]
fn connection_refused_is_transport_error() {
    // Bind then drop to get a port nothing is listening on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = Client::new(
        ClientConfig::default().with_base_url(format!("http://{addr}")),
        UreqTransport::new(),
    );
    assert!(matches!(
        client.system_status(),
        Err(ApiError::Transport(_))
    ));
}
