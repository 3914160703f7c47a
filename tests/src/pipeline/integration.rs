use std::path::PathBuf;
use std::time::Duration;

use relaygen_common::config::{FeedSource, ProbeConfig, RunConfig};
use relaygen_common::error::PipelineError;
use relaygen_core::pipeline::{Pipeline, RunSummary};
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::support::{closed_port, open_port, row, write_feed};

fn local_run(feed: PathBuf, output: PathBuf) -> RunConfig {
    RunConfig {
        source: FeedSource::Local { path: feed },
        output,
        probe: None,
        ..RunConfig::default()
    }
}

#[tokio::test]
async fn three_row_feed_publishes_one_relay() {
    let dir = tempfile::tempdir().unwrap();
    let feed: PathBuf = write_feed(
        dir.path(),
        &[
            row("1.2.3.4", 50_000, "Japan", "JP", "remote 1.2.3.4 443\nproto udp\n"),
            row("5.6.7.8", 200_000, "United States", "US", "client\nremote 5.6.7.8 1194\nproto udp\n"),
            row("9.9.9.9", 300_000, "Russian Federation", "RU", "remote 9.9.9.9 443\n"),
        ],
    )
    .await;
    let output: PathBuf = dir.path().join("assets").join("servers.json");

    let summary: RunSummary = Pipeline::run(&local_run(feed, output.clone())).await.unwrap();
    assert_eq!(summary.parsed, 3);
    assert_eq!(summary.qualified, 1);

    let written: Value = serde_json::from_str(&tokio::fs::read_to_string(&output).await.unwrap()).unwrap();
    let servers = written["servers"].as_array().unwrap();
    assert_eq!(servers.len(), 1);
    assert_eq!(servers[0]["endpoint"], "5.6.7.8");
    assert_eq!(servers[0]["port"], 1194);
    assert_eq!(servers[0]["protocol"], "OpenVPN");
    assert_eq!(servers[0]["country"], "US");
    assert_eq!(servers[0]["city"], "United States");
    assert_eq!(servers[0]["throughput"], 3.0);
    assert_eq!(servers[0]["config"], "client\nremote 5.6.7.8 1194\nproto udp\n");
    assert_eq!(written["version"], "2.0");

    let stamp: &str = written["lastUpdated"].as_str().unwrap();
    assert_eq!(stamp.len(), "2024-01-01T00:00:00Z".len());
    assert!(stamp.ends_with('Z'));
}

#[tokio::test]
async fn documented_three_row_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let feed: PathBuf = write_feed(
        dir.path(),
        &[
            row("9.9.9.9", 800_000, "Russian Federation", "RU", "remote 9.9.9.9 443\n"),
            row("1.2.3.4", 50_000, "Japan", "JP", "remote 1.2.3.4 443\n"),
            row("5.6.7.8", 500_000, "Japan", "JP", "remote 5.6.7.8 1194 proto tcp"),
        ],
    )
    .await;
    let output: PathBuf = dir.path().join("servers.json");

    let summary: RunSummary = Pipeline::run(&local_run(feed, output)).await.unwrap();

    assert_eq!(summary.document.servers.len(), 1);
    let server = &summary.document.servers[0];
    assert_eq!(server.endpoint, "5.6.7.8");
    assert_eq!(server.port, 1194);
    assert_eq!(server.protocol, "OpenVPN");
    assert_eq!(server.country, "JP");
    assert_eq!(server.config, "remote 5.6.7.8 1194 proto tcp");
}

#[tokio::test]
async fn remote_feed_with_loopback_probing() {
    let open: u16 = open_port().await;
    let closed: u16 = closed_port().await;

    let server: MockServer = MockServer::start().await;
    let body: String = super::support::feed(&[
        row("127.0.0.1", 500_000, "Japan", "JP", &format!("remote 127.0.0.1 {closed}\nproto tcp\n")),
        row("host.invalid", 900_000, "Korea Republic of", "KR", "remote host.invalid 443\n"),
    ]);
    Mock::given(method("GET"))
        .and(path("/api/iphone/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cfg: RunConfig = RunConfig {
        source: FeedSource::Remote {
            url: format!("{}/api/iphone/", server.uri()),
        },
        output: dir.path().join("servers.json"),
        probe: Some(ProbeConfig {
            connect_timeout: Duration::from_secs(1),
            fallback_ports: vec![closed, open],
            ..ProbeConfig::default()
        }),
        ..RunConfig::default()
    };

    let summary: RunSummary = Pipeline::run(&cfg).await.unwrap();

    assert_eq!(summary.tested, 2);
    assert_eq!(summary.reachable, 1);
    assert_eq!(summary.document.servers.len(), 1);
    assert_eq!(summary.document.servers[0].endpoint, "127.0.0.1");
    assert_eq!(summary.document.servers[0].port, open);
}

#[tokio::test]
async fn download_failure_is_fatal() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output: PathBuf = dir.path().join("servers.json");
    let cfg: RunConfig = RunConfig {
        source: FeedSource::Remote { url: server.uri() },
        output: output.clone(),
        ..RunConfig::default()
    };

    let err: PipelineError = Pipeline::run(&cfg).await.unwrap_err();
    assert!(matches!(err, PipelineError::Feed(_)));
    assert!(!err.is_empty_result());
    assert!(!output.exists());
}

#[tokio::test]
async fn empty_results_keep_the_previous_list() {
    let dir = tempfile::tempdir().unwrap();
    let output: PathBuf = dir.path().join("servers.json");
    tokio::fs::write(&output, "previous").await.unwrap();

    let feed: PathBuf = write_feed(
        dir.path(),
        &[row("9.9.9.9", 300_000, "Russian Federation", "RU", "remote 9.9.9.9 443\n")],
    )
    .await;
    let err: PipelineError = Pipeline::run(&local_run(feed, output.clone())).await.unwrap_err();
    assert!(matches!(err, PipelineError::NoneQualified));

    let headerless: PathBuf = dir.path().join("headerless.csv");
    tokio::fs::write(&headerless, "no header here\n1,2,3\n").await.unwrap();
    let err: PipelineError = Pipeline::run(&local_run(headerless, output.clone())).await.unwrap_err();
    assert!(matches!(err, PipelineError::NoRecords));

    assert_eq!(tokio::fs::read_to_string(&output).await.unwrap(), "previous");
}

#[tokio::test]
async fn only_the_twenty_best_are_written() {
    let dir = tempfile::tempdir().unwrap();
    let rows: Vec<String> = (0..30u64)
        .map(|i| row(&format!("10.1.0.{i}"), 100_000 + i * 1_000, "Japan", "JP", "remote x 443\n"))
        .collect();
    let feed: PathBuf = write_feed(dir.path(), &rows).await;

    let summary: RunSummary = Pipeline::run(&local_run(feed, dir.path().join("servers.json")))
        .await
        .unwrap();

    let endpoints: Vec<&str> = summary.document.servers.iter().map(|s| s.endpoint.as_str()).collect();
    assert_eq!(endpoints.len(), 20);
    assert_eq!(endpoints[0], "10.1.0.29");
    assert_eq!(endpoints[19], "10.1.0.10");
}
