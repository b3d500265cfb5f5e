//! Entry point discovery against a live mock site

use crate::common::*;
use javadoc_crawler::crawler::{EntryPointGroup, UrlExtractor};
use javadoc_crawler::url::{normalize_base_url, PackageFilter};
use javadoc_crawler::{Coordinator, CrawlPhase};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_configured_entry_points_replace_defaults() {
    let server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();

    // A page without type links is skipped in favor of the next candidate
    mount_page(
        &server,
        "/api/idx1.html",
        "<html><body><a href=\"help-doc.html\">Help</a></body></html>".to_string(),
    )
    .await;
    mount_page(
        &server,
        "/api/idx2.html",
        index_page(&[("com/acme/Foo.html", "Foo")]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/allclasses-frame.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(index_page(&[("Other.html", "Other")])))
        .expect(0)
        .mount(&server)
        .await;
    mount_type_page(&server, "/api/com/acme/Foo.html", "Foo", 1).await;

    let mut config = create_test_config(&server, cache_dir.path());
    config.crawler.entry_points = Some(vec!["idx1.html".to_string(), "idx2.html".to_string()]);
    let result = Coordinator::new(config).unwrap().run().await.unwrap();

    let entry_point = result.entry_point.as_ref().unwrap();
    assert_eq!(entry_point.candidate.name, "idx2.html");
    assert_eq!(entry_point.group(), EntryPointGroup::Configured);
    assert_eq!(result.full_names(), vec!["com.acme.Foo"]);
}

#[tokio::test]
async fn test_configured_entry_points_exhausted() {
    let server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/idx1.html"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = create_test_config(&server, cache_dir.path());
    config.crawler.entry_points = Some(vec!["idx1.html".to_string(), "idx2.html".to_string()]);
    let result = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(result.phase, CrawlPhase::Failed);
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_overview_used_when_no_all_types_page() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/api/overview-summary.html",
        index_page(&[("com/acme/Foo.html", "Foo")]),
    )
    .await;

    let config = create_test_config(&server, std::path::Path::new("unused"));
    let coordinator = Coordinator::new(config).unwrap();
    let base = normalize_base_url(&base_url(&server)).unwrap();
    let extractor = UrlExtractor::new(base.clone(), PackageFilter::default()).unwrap();
    let client = reqwest::Client::new();

    let entry_point = coordinator
        .discovery()
        .discover(&client, &base, &extractor)
        .await
        .unwrap();

    assert_eq!(entry_point.candidate.name, "overview-summary.html");
    assert_eq!(entry_point.group(), EntryPointGroup::Overview);
    assert_eq!(entry_point.url, base.join("overview-summary.html").unwrap());
}
