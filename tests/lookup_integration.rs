//! Integration tests for storm event lookups against a mock data server.

use std::time::Duration;

use clap::Parser;
use freeboard::cli::{self, Cli, Command, LookupArgs};
use freeboard::{FetcherConfig, FreeboardError, Location, PfdsClient, StormQuery};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to build a response body with every cell of a table set to `depth`
fn uniform_body(depth: &str) -> String {
    let row = format!("[{}]", vec![format!("'{depth}'"); 10].join(", "));
    let table = format!("[{}]", vec![row; 19].join(", "));
    format!("result = 'values';\nquantiles = {table};\nupper = {table};\nlower = {table};\n")
}

fn lookup_args(argv: &[&str]) -> LookupArgs {
    let mut full = vec!["freeboard", "lookup"];
    full.extend_from_slice(argv);
    match Cli::try_parse_from(full).unwrap().command {
        Command::Lookup(args) => args,
        Command::Serve => panic!("expected lookup"),
    }
}

#[tokio::test]
async fn test_lookup_prints_report() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("lat", "39"))
        .and(query_param("lon", "-77"))
        .respond_with(ResponseTemplate::new(200).set_body_string(uniform_body("5.17")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let args = lookup_args(&["39.0", "-77.0", "-r", "100-yr", "-d", "24-hr"]);
    let report = cli::lookup(&args, FetcherConfig::with_base_url(mock_server.uri()))
        .await
        .unwrap();

    assert!(report.contains("Geographic Coordinate: 39\u{00b0}N / 77\u{00b0}W"));
    assert!(report.contains("Average Return Interval: 100-yr"));
    assert!(report.contains("Storm Event: 5.17 inch"));
}

#[tokio::test]
async fn test_lookup_saves_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_string(uniform_body("131")))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storm.json");
    let path_arg = path.to_string_lossy().to_string();

    let args = lookup_args(&["39", "-77", "-u", "mm", "-f", "json", "-o", &path_arg]);
    let report = cli::lookup(&args, FetcherConfig::with_base_url(mock_server.uri()))
        .await
        .unwrap();

    let saved = std::fs::read_to_string(&path).unwrap();
    assert_eq!(saved, report);

    let value: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(value["depth"], 131.0);
    assert_eq!(value["units"], "mm");
}

#[tokio::test]
async fn test_invalid_location_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(uniform_body("1.0")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let args = lookup_args(&["999", "-77"]);
    let err = cli::lookup(&args, FetcherConfig::with_base_url(mock_server.uri()))
        .await
        .unwrap_err();

    let err = err.downcast_ref::<FreeboardError>().unwrap();
    assert!(matches!(err, FreeboardError::InvalidLocation(_)));
}

#[tokio::test]
async fn test_unreachable_server() {
    // Nothing listens on the discard port
    let config = FetcherConfig {
        base_url: "http://127.0.0.1:9/".to_string(),
        timeout: Duration::from_secs(2),
    };
    let client = PfdsClient::new(config).unwrap();
    let location = Location::new(39.0, -77.0).unwrap();

    let err = client
        .fetch(&location, &StormQuery::default())
        .await
        .unwrap_err();

    assert!(err.is_network());
}

#[tokio::test]
async fn test_depth_is_non_negative() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(uniform_body("0.000")))
        .mount(&mock_server)
        .await;

    let client = PfdsClient::new(FetcherConfig::with_base_url(mock_server.uri())).unwrap();
    let location = Location::new(39.0, -77.0).unwrap();
    let result = client
        .fetch(&location, &StormQuery::default())
        .await
        .unwrap();

    assert_eq!(result.depth, 0.0);
}
