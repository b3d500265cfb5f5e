use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes the documentation root so relative names resolve beneath it
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Accept only http and https
/// 3. Drop query and fragment
/// 4. Ensure the path ends with `/`
///
/// # Examples
///
/// ```
/// use javadoc_crawler::url::normalize_base_url;
///
/// let url = normalize_base_url("https://docs.example.com/api?x=1").unwrap();
/// assert_eq!(url.as_str(), "https://docs.example.com/api/");
/// ```
pub fn normalize_base_url(url_str: &str) -> UrlResult<Url> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    url.set_query(None);
    url.set_fragment(None);

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// Resolves a link href against the page it appeared on
///
/// Returns None if the link should be excluded:
/// - empty or fragment-only hrefs
/// - javascript:, mailto:, tel: schemes and data: URIs
/// - Non-HTTP(S) URLs after resolution
///
/// The fragment is dropped so `Foo.html#method` and `Foo.html` collapse.
pub fn resolve_link(href: &str, page_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let mut resolved = page_url.join(href).ok()?;
    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }
    resolved.set_fragment(None);
    resolved.set_query(None);

    Some(resolved)
}

/// Where a type page sits relative to the documentation root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeLocation {
    pub url: Url,
    /// Dot-separated package, empty for pages at the root
    pub package_name: String,
    pub simple_name: String,
}

impl TypeLocation {
    /// Fully-qualified name used as the cache key
    pub fn full_name(&self) -> String {
        crate::model::full_name(&self.package_name, &self.simple_name)
    }
}

/// Derives package and simple name from a type page URL
///
/// `https://host/api/com/acme/Foo.html` under `https://host/api/` is
/// `com.acme` / `Foo`. Pages outside the root are rejected.
pub fn type_location(url: &Url, base_url: &Url) -> UrlResult<TypeLocation> {
    if url.origin() != base_url.origin() {
        return Err(UrlError::NotATypePage(format!(
            "{} is not on {}",
            url,
            base_url.origin().ascii_serialization()
        )));
    }

    let relative = url
        .path()
        .strip_prefix(base_url.path())
        .ok_or_else(|| UrlError::NotATypePage(format!("{} is outside {}", url, base_url)))?;

    let mut segments: Vec<&str> = relative
        .trim_start_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    let file_name = segments
        .pop()
        .ok_or_else(|| UrlError::NotATypePage(url.to_string()))?;

    let simple_name = file_name
        .strip_suffix(".html")
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| UrlError::NotATypePage(url.to_string()))?;

    Ok(TypeLocation {
        url: url.clone(),
        package_name: segments.join("."),
        simple_name: simple_name.to_string(),
    })
}

/// Package name inferred from a type page URL, empty when unknown
pub fn infer_package(url: &Url, base_url: &Url) -> String {
    type_location(url, base_url)
        .map(|location| location.package_name)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        normalize_base_url("https://docs.example.com/api/").unwrap()
    }

    #[test]
    fn test_base_gets_trailing_slash() {
        let url = normalize_base_url("https://docs.example.com/api").unwrap();
        assert_eq!(url.as_str(), "https://docs.example.com/api/");

        let url = normalize_base_url("https://docs.example.com").unwrap();
        assert_eq!(url.as_str(), "https://docs.example.com/");
    }

    #[test]
    fn test_base_drops_query_and_fragment() {
        let url = normalize_base_url("http://localhost:8080/api/?lang=en#top").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/");
    }

    #[test]
    fn test_base_rejects_other_schemes() {
        assert!(matches!(
            normalize_base_url("ftp://docs.example.com/"),
            Err(UrlError::InvalidScheme(_))
        ));
        assert!(matches!(
            normalize_base_url("not a url"),
            Err(UrlError::Parse(_))
        ));
    }

    #[test]
    fn test_resolve_relative_link() {
        let page = base().join("allclasses.html").unwrap();
        let url = resolve_link("com/acme/Foo.html", &page).unwrap();
        assert_eq!(url.as_str(), "https://docs.example.com/api/com/acme/Foo.html");

        let url = resolve_link("../api/Bar.html#method.summary", &page).unwrap();
        assert_eq!(url.as_str(), "https://docs.example.com/api/Bar.html");
    }

    #[test]
    fn test_resolve_skips_special_links() {
        let page = base();
        assert!(resolve_link("", &page).is_none());
        assert!(resolve_link("#top", &page).is_none());
        assert!(resolve_link("javascript:void(0)", &page).is_none());
        assert!(resolve_link("mailto:docs@example.com", &page).is_none());
        assert!(resolve_link("ftp://example.com/Foo.html", &page).is_none());
    }

    #[test]
    fn test_type_location() {
        let url = base().join("com/acme/Foo.html").unwrap();
        let location = type_location(&url, &base()).unwrap();
        assert_eq!(location.package_name, "com.acme");
        assert_eq!(location.simple_name, "Foo");
        assert_eq!(location.full_name(), "com.acme.Foo");
    }

    #[test]
    fn test_type_location_at_root_has_no_package() {
        let url = base().join("Foo.html").unwrap();
        let location = type_location(&url, &base()).unwrap();
        assert_eq!(location.package_name, "");
        assert_eq!(location.full_name(), "Foo");
    }

    #[test]
    fn test_nested_type_keeps_dotted_name() {
        let url = base().join("java/util/Map.Entry.html").unwrap();
        let location = type_location(&url, &base()).unwrap();
        assert_eq!(location.package_name, "java.util");
        assert_eq!(location.simple_name, "Map.Entry");
    }

    #[test]
    fn test_type_location_rejects_foreign_pages() {
        let other_host = Url::parse("https://other.example.com/api/Foo.html").unwrap();
        assert!(type_location(&other_host, &base()).is_err());

        let outside = Url::parse("https://docs.example.com/other/Foo.html").unwrap();
        assert!(type_location(&outside, &base()).is_err());

        let not_html = base().join("com/acme/package-list").unwrap();
        assert!(type_location(&not_html, &base()).is_err());
    }

    #[test]
    fn test_infer_package() {
        let url = base().join("org/other/Bar.html").unwrap();
        assert_eq!(infer_package(&url, &base()), "org.other");

        let outside = Url::parse("https://elsewhere.org/Bar.html").unwrap();
        assert_eq!(infer_package(&outside, &base()), "");
    }
}
