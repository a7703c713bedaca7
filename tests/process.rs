//! End-to-end tests: fetch over HTTP, classify, decode, follow.

use pretty_assertions::assert_eq;
use resourcesync::feed::{FeedError, FeedKind, FetchError, HttpFetcher, ResourceSync, Walker};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CAPABILITY_LIST: &str = include_str!("fixtures/capabilitylist.xml");
const RESOURCE_LIST_INDEX: &str = include_str!("fixtures/resourcelist_index.xml");
const UNSUPPORTED: &str = include_str!("fixtures/unsupported.xml");

async fn serve(server: &MockServer, at: &str, body: impl Into<String>) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.into())
                .insert_header("content-type", "application/xml"),
        )
        .mount(server)
        .await;
}

fn resource_list(locations: &[&str]) -> String {
    let urls: String = locations
        .iter()
        .map(|loc| format!("<url><loc>{loc}</loc></url>"))
        .collect();
    format!(
        r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" xmlns:rs="http://www.openarchives.org/rs/terms/"><rs:md capability="resourcelist"/>{urls}</urlset>"#
    )
}

fn resource_list_index(locations: &[String]) -> String {
    let sitemaps: String = locations
        .iter()
        .map(|loc| format!("<sitemap><loc>{loc}</loc></sitemap>"))
        .collect();
    format!(
        r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" xmlns:rs="http://www.openarchives.org/rs/terms/"><rs:md capability="resourcelist"/>{sitemaps}</sitemapindex>"#
    )
}

// ============================================================================
// Single document
// ============================================================================

#[tokio::test]
async fn test_process_capability_list() {
    let server = MockServer::start().await;
    serve(&server, "/capabilitylist.xml", CAPABILITY_LIST).await;

    let rs = ResourceSync::new(HttpFetcher::default());
    let feed = rs
        .process(&format!("{}/capabilitylist.xml", server.uri()))
        .await
        .unwrap();

    assert_eq!(feed.kind(), FeedKind::CapabilityList);
    assert_eq!(feed.entry_count(), 1);
    assert_eq!(
        feed.as_list().unwrap().entries[0].metadata.capability,
        "resourcelist"
    );
}

#[tokio::test]
async fn test_process_resource_list_index() {
    let server = MockServer::start().await;
    serve(&server, "/resourcelist-index.xml", RESOURCE_LIST_INDEX).await;

    let rs = ResourceSync::<HttpFetcher>::default();
    let feed = rs
        .process(&format!("{}/resourcelist-index.xml", server.uri()))
        .await
        .unwrap();

    assert_eq!(feed.kind(), FeedKind::ResourceListIndex);
    assert!(feed.kind().is_index());
    assert_eq!(feed.entry_count(), 2);
}

#[tokio::test]
async fn test_process_unsupported_capability() {
    let server = MockServer::start().await;
    serve(&server, "/unsupported.xml", UNSUPPORTED).await;

    let rs = ResourceSync::new(HttpFetcher::default());
    let result = rs
        .process(&format!("{}/unsupported.xml", server.uri()))
        .await;

    assert!(matches!(result, Err(FeedError::UnsupportedFeedType)));
}

#[tokio::test]
async fn test_process_non_xml_body() {
    let server = MockServer::start().await;
    serve(&server, "/page.html", "<html><body>Not a feed</body></html>").await;

    let rs = ResourceSync::new(HttpFetcher::default());
    let result = rs.process(&format!("{}/page.html", server.uri())).await;

    assert!(matches!(result, Err(FeedError::UnsupportedFeedType)));
}

#[tokio::test]
async fn test_process_http_error_is_transport() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.xml"))
        .respond_with(ResponseTemplate::new(404).set_body_string(CAPABILITY_LIST))
        .mount(&server)
        .await;

    let rs = ResourceSync::new(HttpFetcher::default());
    let err = rs
        .process(&format!("{}/missing.xml", server.uri()))
        .await
        .unwrap_err();

    // The body of a failed response is never parsed
    assert!(matches!(
        err,
        FeedError::Transport(FetchError::HttpStatus(404))
    ));
    assert_eq!(err.status(), Some(404));
}

// ============================================================================
// Following
// ============================================================================

#[tokio::test]
async fn test_walk_index_to_lists() {
    let server = MockServer::start().await;
    let base = server.uri();
    serve(
        &server,
        "/index.xml",
        resource_list_index(&[format!("{base}/list0.xml"), format!("{base}/list1.xml")]),
    )
    .await;
    serve(
        &server,
        "/list0.xml",
        resource_list(&["http://example.com/a", "http://example.com/b"]),
    )
    .await;
    serve(&server, "/list1.xml", resource_list(&["http://example.com/c"])).await;

    let rs = ResourceSync::new(HttpFetcher::default());
    let mut observed = Vec::new();
    let summary = Walker::new(&rs)
        .walk(&format!("{base}/index.xml"), |url, feed| {
            observed.push((url.to_string(), feed.kind()));
        })
        .await
        .unwrap();

    assert_eq!(
        observed,
        vec![
            (format!("{base}/index.xml"), FeedKind::ResourceListIndex),
            (format!("{base}/list0.xml"), FeedKind::ResourceList),
            (format!("{base}/list1.xml"), FeedKind::ResourceList),
        ]
    );
    assert_eq!(summary.index_links, 2);
    assert_eq!(summary.resource_links, 3);
    assert!(summary.failures.is_empty());
}

#[tokio::test]
async fn test_walk_relative_locations_and_missing_child() {
    let server = MockServer::start().await;
    let base = server.uri();
    serve(
        &server,
        "/sitemaps/index.xml",
        resource_list_index(&["list0.xml".to_string(), "gone.xml".to_string()]),
    )
    .await;
    serve(
        &server,
        "/sitemaps/list0.xml",
        resource_list(&["http://example.com/a"]),
    )
    .await;

    let rs = ResourceSync::new(HttpFetcher::default());
    let summary = Walker::new(&rs)
        .walk(&format!("{base}/sitemaps/index.xml"), |_, _| {})
        .await
        .unwrap();

    assert_eq!(summary.visited.len(), 2);
    assert_eq!(summary.visited[1].url, format!("{base}/sitemaps/list0.xml"));
    assert_eq!(summary.visited[1].depth, 1);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].url, format!("{base}/sitemaps/gone.xml"));
    assert_eq!(summary.failures[0].error.status(), Some(404));
}

#[tokio::test]
async fn test_walk_without_follow_fetches_once() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/index.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(resource_list_index(&[format!("{base}/list0.xml")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let rs = ResourceSync::new(HttpFetcher::default());
    let summary = Walker::new(&rs)
        .follow(false)
        .walk(&format!("{base}/index.xml"), |_, _| {})
        .await
        .unwrap();

    assert_eq!(summary.visited.len(), 1);
    assert_eq!(summary.index_links, 1);
    assert_eq!(summary.resource_links, 0);
}

#[tokio::test]
async fn test_walk_start_failure_is_returned() {
    let server = MockServer::start().await;

    let rs = ResourceSync::new(HttpFetcher::default());
    let result = Walker::new(&rs)
        .walk(&format!("{}/nothing.xml", server.uri()), |_, _| {})
        .await;

    assert!(matches!(
        result,
        Err(FeedError::Transport(FetchError::HttpStatus(404)))
    ));
}
