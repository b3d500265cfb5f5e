/// File-name prefixes of pages that are never type pages
const DENIED_NAMES: &[&str] = &[
    "package-",
    "overview",
    "index",
    "help-",
    "constant-values",
    "serialized-form",
    "deprecated-list",
    "allclasses",
    "module-summary",
    "search",
];

/// Directories holding generated pages about types rather than the types
const DENIED_DIRECTORIES: &[&str] = &["class-use", "doc-files", "src-html", "index-files"];

/// Extension of generated documentation pages
const PAGE_EXTENSION: &str = ".html";

/// Checks whether a link looks like a link to a type page
///
/// A link qualifies when:
/// 1. its target (without query or fragment) ends in `.html`
/// 2. its file name is not one of the known listing pages
/// 3. it does not point into a generated directory such as `class-use/`
/// 4. its visible text starts with an uppercase letter
///
/// # Examples
///
/// ```
/// use javadoc_crawler::url::is_type_link;
///
/// assert!(is_type_link("com/acme/Foo.html", "Foo"));
/// assert!(!is_type_link("com/acme/package-summary.html", "Summary"));
/// assert!(!is_type_link("com/acme/Foo.html", "foo"));
/// ```
pub fn is_type_link(href: &str, text: &str) -> bool {
    let target = href
        .split(['#', '?'])
        .next()
        .unwrap_or("")
        .trim();

    if !target.ends_with(PAGE_EXTENSION) {
        return false;
    }

    let mut segments = target.rsplit('/');
    let file_name = segments.next().unwrap_or("");
    if file_name.len() <= PAGE_EXTENSION.len() || is_denied_name(file_name) {
        return false;
    }
    if segments.any(|dir| DENIED_DIRECTORIES.contains(&dir)) {
        return false;
    }

    starts_uppercase(text)
}

/// Returns true if the file name starts with a denied prefix
pub fn is_denied_name(file_name: &str) -> bool {
    DENIED_NAMES.iter().any(|denied| file_name.starts_with(denied))
}

fn starts_uppercase(text: &str) -> bool {
    text.trim()
        .chars()
        .next()
        .map_or(false, |c| c.is_uppercase())
}
