use javadoc_crawler::config::Config;
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Documentation root served by the mock server
pub fn base_url(server: &MockServer) -> String {
    format!("{}/api/", server.uri())
}

/// Creates a test configuration with a private cache directory
pub fn create_test_config(server: &MockServer, cache_dir: &Path) -> Config {
    let mut config = Config::new(base_url(server));
    config.crawler.thread_pool_size = 2;
    config.crawler.progress_interval_ms = 60_000;
    config.crawler.shutdown_grace_ms = 10_000;
    config.http.user_agent = "TestBot/1.0".to_string();
    config.http.timeout_ms = 2_000;
    config.cache.directory = cache_dir.to_path_buf();
    config
}

/// An index page linking to each `(href, text)` pair
pub fn index_page(links: &[(&str, &str)]) -> String {
    let items: String = links
        .iter()
        .map(|(href, text)| format!(r#"<li><a href="{}" title="class">{}</a></li>"#, href, text))
        .collect();
    format!(
        "<html><head><title>All Classes</title></head><body><h1>All Classes</h1><ul>{}</ul></body></html>",
        items
    )
}

/// A classic-layout type page with one method
pub fn type_page(name: &str, description: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html><body>
<div class="header"><h2 class="title">Class {name}</h2></div>
<div class="contentContainer">
<div class="description"><ul class="blockList"><li class="blockList">
<pre>public class <span class="typeNameLabel">{name}</span></pre>
<div class="block">{description}</div>
</li></ul></div>
<div class="summary"><ul class="blockList"><li class="blockList">
<a id="method.summary"><!-- --></a>
<table class="memberSummary">
<tr><th class="colFirst">Modifier and Type</th><th class="colSecond">Method</th><th class="colLast">Description</th></tr>
<tr><td class="colFirst"><code>void</code></td><th class="colSecond"><code><a href="#run()">run</a>&#8203;()</code></th><td class="colLast"><div class="block">Runs it.</div></td></tr>
</table>
</li></ul></div>
<div class="details"><ul class="blockList"><li class="blockList">
<h4>run</h4>
<pre class="methodSignature">public&nbsp;void&nbsp;run&#8203;()</pre>
<div class="block">Runs it.</div>
</li></ul></div>
</div>
</body></html>"##
    )
}

/// Serves `body` at `route` with status 200
pub async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Serves a type page at `route`, failing verification unless it is
/// requested exactly `times` times
pub async fn mount_type_page(server: &MockServer, route: &str, name: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(type_page(name, &format!("{} docs.", name))))
        .expect(times)
        .mount(server)
        .await;
}
