// Tests for the individual source fetchers against a mock server

use urlsift_sources::alienvault::AlienVault;
use urlsift_sources::commoncrawl::CommonCrawl;
use urlsift_sources::shodan::Shodan;
use urlsift_sources::urlscan::UrlScan;
use urlsift_sources::wayback::Wayback;
use urlsift_sources::{FetchOutcome, Query, Source, SourceError, build_client};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn query() -> Query {
    Query::new("example.com", true)
}

#[tokio::test]
async fn test_alienvault_fetch() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/indicators/domain/example.com/url_list"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"url_list": [{"url": "http://example.com/a"}, {"url": "http://example.com/b"}]}"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_client(None).unwrap();
    let source = AlienVault::with_base_url(mock_server.uri());
    let urls = source.fetch_urls(&client, &query()).await.unwrap();

    assert_eq!(urls, vec!["http://example.com/a", "http://example.com/b"]);
}

#[tokio::test]
async fn test_wayback_query_parameters() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cdx/search/cdx"))
        .and(query_param("url", "*.example.com/*"))
        .and(query_param("output", "json"))
        .and(query_param("fl", "original"))
        .and(query_param("filter", "statuscode:200"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[["original"],["http://example.com/"],["http://www.example.com/x"]]"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_client(None).unwrap();
    let source = Wayback::with_base_url(mock_server.uri());
    let urls = source.fetch_urls(&client, &query()).await.unwrap();

    assert_eq!(urls, vec!["http://example.com/", "http://www.example.com/x"]);
}

#[tokio::test]
async fn test_wayback_without_subdomains() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cdx/search/cdx"))
        .and(query_param("url", "example.com/*"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"[["original"],["http://example.com/"]]"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_client(None).unwrap();
    let source = Wayback::with_base_url(mock_server.uri());
    let urls = source
        .fetch_urls(&client, &Query::new("example.com", false))
        .await
        .unwrap();

    assert_eq!(urls, vec!["http://example.com/"]);
}

#[tokio::test]
async fn test_urlscan_sends_api_key() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search/"))
        .and(header("API-Key", "secret-key"))
        .and(query_param("q", "example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"results": [{"page": {"url": "https://example.com/login"}}]}"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_client(None).unwrap();
    let source = UrlScan::with_base_url(mock_server.uri(), "secret-key");
    let urls = source.fetch_urls(&client, &query()).await.unwrap();

    assert_eq!(urls, vec!["https://example.com/login"]);
}

#[tokio::test]
async fn test_shodan_returns_ip_tokens() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shodan/host/search"))
        .and(query_param("query", "example.com"))
        .and(query_param("key", "shodan-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"matches": [{"ip_str": "93.184.216.34"}, {"ip_str": "93.184.216.35"}]}"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_client(None).unwrap();
    let source = Shodan::with_base_url(mock_server.uri(), "shodan-key");
    let urls = source.fetch_urls(&client, &query()).await.unwrap();

    assert_eq!(urls, vec!["93.184.216.34", "93.184.216.35"]);
}

#[tokio::test]
async fn test_shodan_status_error_hides_key() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shodan/host/search"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
        .mount(&mock_server)
        .await;

    let client = build_client(None).unwrap();
    let source = Shodan::with_base_url(mock_server.uri(), "shodan-key");
    let outcome = source.fetch(&client, &query()).await;

    match outcome {
        FetchOutcome::Failure { source, reason } => {
            assert_eq!(source, "shodan");
            assert!(reason.contains("401"), "reason was: {}", reason);
            assert!(!reason.contains("shodan-key"), "reason leaked key: {}", reason);
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_commoncrawl_discovers_then_queries_latest_index() {
    let mock_server = MockServer::start().await;
    let listing = r#"<html><body>
        <a href="/CC-MAIN-2024-10/">CC-MAIN-2024-10</a>
        <a href="/CC-MAIN-2024-18/">CC-MAIN-2024-18</a>
        <a href="/CC-MAIN-2023-50/">CC-MAIN-2023-50</a>
    </body></html>"#;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(listing),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/CC-MAIN-2024-18-index"))
        .and(query_param("url", "*.example.com/*"))
        .and(query_param("output", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "{\"url\": \"http://example.com/\"}\n{\"url\": \"http://blog.example.com/post\"}\n",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_client(None).unwrap();
    let source = CommonCrawl::with_base_url(mock_server.uri());
    let urls = source.fetch_urls(&client, &query()).await.unwrap();

    assert_eq!(urls, vec!["http://example.com/", "http://blog.example.com/post"]);
}

#[tokio::test]
async fn test_commoncrawl_discovery_failure_skips_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><a href=\"/faq\">faq</a></html>"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    // Nothing may reach a collection endpoint
    Mock::given(method("GET"))
        .and(path("/CC-MAIN-2024-18-index"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = build_client(None).unwrap();
    let source = CommonCrawl::with_base_url(mock_server.uri());
    let err = source.fetch_urls(&client, &query()).await.unwrap_err();

    assert!(matches!(err, SourceError::Discovery(_)));
}

#[tokio::test]
async fn test_commoncrawl_no_captures_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<a href=\"/CC-MAIN-2024-18/\">x</a>"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/CC-MAIN-2024-18-index"))
        .respond_with(ResponseTemplate::new(404).set_body_string(
            r#"{"message": "No Captures found for: example.com"}"#,
        ))
        .mount(&mock_server)
        .await;

    let client = build_client(None).unwrap();
    let source = CommonCrawl::with_base_url(mock_server.uri());
    let outcome = source.fetch(&client, &query()).await;

    assert_eq!(outcome, FetchOutcome::success("commoncrawl", vec![]));
}

#[tokio::test]
async fn test_commoncrawl_other_404_is_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<a href=\"/CC-MAIN-2024-18/\">x</a>"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/CC-MAIN-2024-18-index"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string("<html><h1>404 Not Found</h1></html>"),
        )
        .mount(&mock_server)
        .await;

    let client = build_client(None).unwrap();
    let source = CommonCrawl::with_base_url(mock_server.uri());

    let err = source.fetch_urls(&client, &query()).await.unwrap_err();
    assert!(matches!(err, SourceError::Status { status: 404, .. }));

    let outcome = source.fetch(&client, &query()).await;
    assert!(!outcome.is_success());
    assert_eq!(outcome.source(), "commoncrawl");
}

#[tokio::test]
async fn test_malformed_body_becomes_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/indicators/domain/example.com/url_list"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let client = build_client(None).unwrap();
    let source = AlienVault::with_base_url(mock_server.uri());

    let err = source.fetch_urls(&client, &query()).await.unwrap_err();
    assert!(matches!(err, SourceError::Parse(_)));

    let outcome = source.fetch(&client, &query()).await;
    assert!(!outcome.is_success());
    assert_eq!(outcome.source(), "alienvault");
}

#[tokio::test]
async fn test_connection_refused_is_transport_failure() {
    let client = build_client(None).unwrap();
    let source = Wayback::with_base_url("http://127.0.0.1:1");
    let err = source.fetch_urls(&client, &query()).await.unwrap_err();

    assert!(matches!(err, SourceError::Transport(_)));
}
