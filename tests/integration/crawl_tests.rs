//! End-to-end crawl tests

use crate::common::*;
use javadoc_crawler::config::OutputFormat;
use javadoc_crawler::output::writer_for;
use javadoc_crawler::{Coordinator, CrawlPhase};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_crawl_groups_types_by_package() {
    let server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/api/allclasses-frame.html",
        index_page(&[("com/acme/Foo.html", "Foo"), ("com/acme/Bar.html", "Bar")]),
    )
    .await;
    mount_type_page(&server, "/api/com/acme/Foo.html", "Foo", 1).await;
    mount_type_page(&server, "/api/com/acme/Bar.html", "Bar", 1).await;

    let config = create_test_config(&server, cache_dir.path());
    let coordinator = Coordinator::new(config).unwrap();
    let result = coordinator.run().await.unwrap();

    assert_eq!(result.phase, CrawlPhase::Done);
    assert_eq!(result.packages.len(), 1);
    assert_eq!(result.packages[0].name, "com.acme");
    assert_eq!(result.full_names(), vec!["com.acme.Bar", "com.acme.Foo"]);

    let foo = &result.packages[0].types[1];
    assert_eq!(foo.description, "Foo docs.");
    assert_eq!(foo.methods.len(), 1);
    assert_eq!(foo.methods[0].name, "run");

    assert_eq!(result.stats.total, 2);
    assert_eq!(result.stats.processed, 2);
    assert_eq!(result.stats.failed, 0);

    let entry_point = result.entry_point.unwrap();
    assert_eq!(entry_point.candidate.name, "allclasses-frame.html");
}

#[tokio::test]
async fn test_crawl_applies_package_filter() {
    let server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/api/allclasses-frame.html",
        index_page(&[
            ("com/acme/core/Foo.html", "Foo"),
            ("org/other/Bar.html", "Bar"),
        ]),
    )
    .await;
    mount_type_page(&server, "/api/com/acme/core/Foo.html", "Foo", 1).await;
    mount_type_page(&server, "/api/org/other/Bar.html", "Bar", 0).await;

    let mut config = create_test_config(&server, cache_dir.path());
    config.crawler.package_filters = vec![r"com\.acme\..*".to_string()];
    let result = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(result.full_names(), vec!["com.acme.core.Foo"]);
    assert_eq!(result.stats.total, 1);
}

#[tokio::test]
async fn test_crawl_counts_timed_out_pages_as_failed() {
    let server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/api/allclasses-frame.html",
        index_page(&[("com/acme/Foo.html", "Foo"), ("com/acme/Slow.html", "Slow")]),
    )
    .await;
    mount_type_page(&server, "/api/com/acme/Foo.html", "Foo", 1).await;
    Mock::given(method("GET"))
        .and(path("/api/com/acme/Slow.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(type_page("Slow", "Slow docs."))
                .set_delay(Duration::from_millis(1_500)),
        )
        .mount(&server)
        .await;

    let mut config = create_test_config(&server, cache_dir.path());
    config.http.timeout_ms = 300;
    let result = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(result.phase, CrawlPhase::Done);
    assert_eq!(result.full_names(), vec!["com.acme.Foo"]);
    assert_eq!(result.stats.processed, 1);
    assert_eq!(result.stats.failed, 1);
}

#[tokio::test]
async fn test_crawl_reuses_cache_across_runs() {
    let server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/api/allclasses-frame.html",
        index_page(&[("com/acme/Foo.html", "Foo"), ("com/acme/Bar.html", "Bar")]),
    )
    .await;
    // Each type page may only be fetched by the first run
    mount_type_page(&server, "/api/com/acme/Foo.html", "Foo", 1).await;
    mount_type_page(&server, "/api/com/acme/Bar.html", "Bar", 1).await;

    let config = create_test_config(&server, cache_dir.path());
    let first = Coordinator::new(config.clone()).unwrap().run().await.unwrap();
    let second = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(first.stats.processed, 2);
    assert_eq!(second.stats.processed, 0);
    assert_eq!(second.stats.skipped, 2);
    assert_eq!(first.packages, second.packages);
}

#[tokio::test]
async fn test_crawl_without_cache_fetches_again() {
    let server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/api/allclasses-frame.html",
        index_page(&[("com/acme/Foo.html", "Foo")]),
    )
    .await;
    mount_type_page(&server, "/api/com/acme/Foo.html", "Foo", 2).await;

    let mut config = create_test_config(&server, cache_dir.path());
    config.cache.enabled = false;
    for _ in 0..2 {
        let result = Coordinator::new(config.clone()).unwrap().run().await.unwrap();
        assert_eq!(result.stats.processed, 1);
    }
}

#[tokio::test]
async fn test_crawl_without_entry_point_is_empty() {
    let server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();

    let config = create_test_config(&server, cache_dir.path());
    let result = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(result.phase, CrawlPhase::Failed);
    assert!(result.is_empty());
    assert!(result.entry_point.is_none());
    assert_eq!(result.stats.total, 0);
}

#[tokio::test]
async fn test_crawl_probes_package_pages_when_index_is_filtered_out() {
    let server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/api/allclasses-frame.html",
        index_page(&[("org/other/Bar.html", "Bar")]),
    )
    .await;
    mount_page(
        &server,
        "/api/com/acme/core/package-summary.html",
        index_page(&[("Foo.html", "Foo")]),
    )
    .await;
    mount_type_page(&server, "/api/com/acme/core/Foo.html", "Foo", 1).await;

    let mut config = create_test_config(&server, cache_dir.path());
    config.crawler.package_filters = vec![r"com\.acme\.core".to_string()];
    let result = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(result.phase, CrawlPhase::Done);
    assert_eq!(result.full_names(), vec!["com.acme.core.Foo"]);
}

#[tokio::test]
async fn test_crawl_result_written_as_per_type_files() {
    let server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/api/allclasses-frame.html",
        index_page(&[("com/acme/Foo.html", "Foo"), ("Top.html", "Top")]),
    )
    .await;
    mount_type_page(&server, "/api/com/acme/Foo.html", "Foo", 1).await;
    mount_type_page(&server, "/api/Top.html", "Top", 1).await;

    let mut config = create_test_config(&server, cache_dir.path());
    config.output.path = output_dir.path().to_path_buf();
    config.output.format = OutputFormat::PerType;
    let output = config.output.clone();
    let result = Coordinator::new(config).unwrap().run().await.unwrap();

    let summary = writer_for(&output)
        .write(&result.packages, &base_url(&server))
        .unwrap();
    assert_eq!(summary.files, 2);

    let foo = std::fs::read_to_string(output_dir.path().join("com.acme.Foo.json")).unwrap();
    let foo: serde_json::Value = serde_json::from_str(&foo).unwrap();
    assert_eq!(foo["packageName"], "com.acme");
    assert_eq!(foo["methodCount"], 1);
    assert!(output_dir.path().join("Top.json").exists());
}
