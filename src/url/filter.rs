use crate::{ConfigError, ConfigResult};
use regex::Regex;
use std::collections::HashSet;

/// Package-name filter built from the configured regular expressions
///
/// Every pattern must match the whole package name: `com\.acme\.core` accepts
/// `com.acme.core` but not `com.acme.core2`. An empty filter accepts everything.
#[derive(Debug, Clone, Default)]
pub struct PackageFilter {
    sources: Vec<String>,
    patterns: Vec<Regex>,
}

impl PackageFilter {
    /// Compiles each pattern anchored at both ends
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> ConfigResult<Self> {
        let mut filter = Self::default();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let regex = Regex::new(&format!("^(?:{})$", pattern))
                .map_err(|e| ConfigError::InvalidPattern(format!("'{}': {}", pattern, e)))?;
            filter.sources.push(pattern.to_string());
            filter.patterns.push(regex);
        }
        Ok(filter)
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns true if no filters are set or one matches the whole name
    ///
    /// Pages with no inferable package are tested as the empty string.
    pub fn matches(&self, package_name: &str) -> bool {
        self.is_empty() || self.patterns.iter().any(|re| re.is_match(package_name))
    }

    /// Literal package prefix of each pattern, as a directory path
    ///
    /// `com\.acme\..*` gives `com/acme`. Used to probe package index pages
    /// directly when the entry page listed nothing.
    pub fn package_paths(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.sources
            .iter()
            .map(|source| literal_prefix(source))
            .filter(|prefix| !prefix.is_empty())
            .map(|prefix| prefix.replace('.', "/"))
            .filter(|path| seen.insert(path.clone()))
            .collect()
    }
}

/// Leading whole package segments spelled literally by a pattern
///
/// `\.` is read as a dot. When the literal run ends early the last,
/// possibly partial, segment is dropped.
fn literal_prefix(pattern: &str) -> String {
    let mut prefix = String::new();
    let mut chars = pattern.trim_start_matches('^').chars().peekable();
    let mut complete = true;

    while let Some(c) = chars.next() {
        let literal = match c {
            '\\' if chars.peek() == Some(&'.') => {
                chars.next();
                '.'
            }
            '$' if chars.peek().is_none() => break,
            c if c.is_alphanumeric() || c == '_' || c == '$' => c,
            _ => {
                complete = false;
                break;
            }
        };
        // a following quantifier makes the literal optional
        if matches!(chars.peek(), Some('*' | '?' | '{' | '+')) {
            complete = false;
            break;
        }
        prefix.push(literal);
    }

    if !complete {
        match prefix.rfind('.') {
            Some(idx) => prefix.truncate(idx),
            None => prefix.clear(),
        }
    }

    prefix.trim_matches('.').to_string()
}
