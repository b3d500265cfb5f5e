//! Type-page link extraction
//!
//! Scans a listing page (all-types index, overview, package summary) for
//! links that look like type pages, resolves them against the page they
//! appear on and keeps those whose inferred package passes the filter.

use crate::dialect::{compile, text};
use crate::url::{is_type_link, resolve_link, type_location, PackageFilter};
use crate::Result;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Extracts type-page URLs from listing documents
#[derive(Debug)]
pub struct UrlExtractor {
    links: Selector,
    base_url: Url,
    filter: PackageFilter,
}

impl UrlExtractor {
    pub fn new(base_url: Url, filter: PackageFilter) -> Result<Self> {
        Ok(Self {
            links: compile("a[href]")?,
            base_url,
            filter,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn filter(&self) -> &PackageFilter {
        &self.filter
    }

    /// Returns true if the document holds at least one link passing the
    /// type-link predicate, before resolution or filtering
    pub fn has_type_links(&self, document: &Html) -> bool {
        document.select(&self.links).any(|link| {
            link.value()
                .attr("href")
                .map_or(false, |href| is_type_link(href, &text::block_text(&link)))
        })
    }

    /// Parses `source` and checks it with [`has_type_links`](Self::has_type_links)
    pub fn accepts_source(&self, source: &str) -> bool {
        let document = Html::parse_document(source);
        self.has_type_links(&document)
    }

    /// Collects the filtered, deduplicated set of type-page URLs
    ///
    /// Relative links resolve against `page_url`; links that leave the
    /// documentation root are dropped.
    pub fn extract(&self, document: &Html, page_url: &Url) -> BTreeSet<Url> {
        let mut urls = BTreeSet::new();
        let mut rejected = 0usize;

        for link in document.select(&self.links) {
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            if !is_type_link(href, &text::block_text(&link)) {
                continue;
            }
            let Some(url) = resolve_link(href, page_url) else {
                continue;
            };
            match type_location(&url, &self.base_url) {
                Ok(location) if self.filter.matches(&location.package_name) => {
                    urls.insert(url);
                }
                Ok(_) => rejected += 1,
                Err(e) => tracing::trace!("Ignoring link {}: {}", url, e),
            }
        }

        if rejected > 0 {
            tracing::debug!(
                "Package filter rejected {} links on {}",
                rejected,
                page_url
            );
        }
        urls
    }

    /// Parses `source` and runs [`extract`](Self::extract) on it
    pub fn extract_from_source(&self, source: &str, page_url: &Url) -> BTreeSet<Url> {
        let document = Html::parse_document(source);
        self.extract(&document, page_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_CLASSES: &str = r#"
        <html><body>
          <h1>All Classes</h1>
          <ul>
            <li><a href="com/acme/Foo.html" title="class in com.acme">Foo</a></li>
            <li><a href="com/acme/Foo.html#method.summary">Foo</a></li>
            <li><a href="org/other/Bar.html" title="interface in org.other"><span>Bar</span></a></li>
            <li><a href="com/acme/package-summary.html">com.acme</a></li>
            <li><a href="overview-summary.html">Overview</a></li>
            <li><a href="com/acme/class-use/Foo.html">Foo</a></li>
            <li><a href="com/acme/helper.html">helper</a></li>
            <li><a href="https://elsewhere.org/api/Baz.html">Baz</a></li>
          </ul>
        </body></html>
    "#;

    fn base() -> Url {
        Url::parse("https://docs.example.com/api/").unwrap()
    }

    fn extractor(filters: &[&str]) -> UrlExtractor {
        UrlExtractor::new(base(), PackageFilter::new(filters).unwrap()).unwrap()
    }

    fn page() -> Url {
        base().join("allclasses-frame.html").unwrap()
    }

    #[test]
    fn test_extract_collapses_duplicates() {
        let urls = extractor(&[]).extract_from_source(ALL_CLASSES, &page());
        let urls: Vec<&str> = urls.iter().map(Url::as_str).collect();
        assert_eq!(
            urls,
            vec![
                "https://docs.example.com/api/com/acme/Foo.html",
                "https://docs.example.com/api/org/other/Bar.html",
            ]
        );
    }

    #[test]
    fn test_extract_applies_package_filter() {
        let urls = extractor(&[r"com\.acme\..*", r"com\.acme"]).extract_from_source(ALL_CLASSES, &page());
        assert_eq!(urls.len(), 1);
        assert!(urls.iter().all(|u| u.path().ends_with("/Foo.html")));
    }

    #[test]
    fn test_filter_is_full_match() {
        let html = r#"<a href="com/example/core/A.html">A</a>
                      <a href="com/example/core2/B.html">B</a>"#;
        let urls = extractor(&[r"com\.example\.core"]).extract_from_source(html, &page());
        assert_eq!(urls.len(), 1);
        assert!(urls.iter().all(|u| u.path().contains("/core/")));
    }

    #[test]
    fn test_root_types_are_filtered_as_empty_package() {
        let html = r#"<a href="Foo.html">Foo</a>"#;
        assert_eq!(extractor(&[]).extract_from_source(html, &page()).len(), 1);
        assert!(extractor(&["com\\..*"]).extract_from_source(html, &page()).is_empty());
    }

    #[test]
    fn test_links_resolve_against_their_page() {
        let html = r#"<a href="Foo.html">Foo</a><a href="../other/Bar.html">Bar</a>"#;
        let package_page = base().join("com/acme/package-summary.html").unwrap();
        let urls = extractor(&[]).extract_from_source(html, &package_page);
        let urls: Vec<&str> = urls.iter().map(Url::as_str).collect();
        assert_eq!(
            urls,
            vec![
                "https://docs.example.com/api/com/acme/Foo.html",
                "https://docs.example.com/api/com/other/Bar.html",
            ]
        );
    }

    #[test]
    fn test_has_type_links() {
        let extractor = extractor(&[]);
        assert!(extractor.accepts_source(ALL_CLASSES));
        assert!(!extractor.accepts_source(
            r#"<html><body><a href="index.html">Index</a><a href="about.html">about</a></body></html>"#
        ));
        assert!(!extractor.accepts_source("<html><body>Not Found</body></html>"));
    }
}
