use crate::model::doc::TypeDoc;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Package name used for types found at the documentation root
pub const DEFAULT_PACKAGE: &str = "default";

/// A package and the types documented in it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PackageDoc {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "classes")]
    pub types: Vec<TypeDoc>,
}

/// Metadata block of the aggregate record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub generated_at: String,
    pub source: String,
    pub base_url: String,
    pub version: String,
}

/// Format version written into every aggregate record
pub const FORMAT_VERSION: &str = "1.0.0";

impl Metadata {
    /// Metadata stamped with the current time
    pub fn now(source: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            source: source.into(),
            base_url: base_url.into(),
            version: FORMAT_VERSION.to_string(),
        }
    }
}

/// Aggregate record: metadata plus every package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocRoot {
    pub metadata: Metadata,
    pub packages: Vec<PackageDoc>,
}

/// Package name to types, filled concurrently by crawl workers
///
/// Workers only ever append; the sorted view is built once at the end.
#[derive(Debug, Default)]
pub struct PackageGrouping {
    packages: DashMap<String, Vec<TypeDoc>>,
}

impl PackageGrouping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a type under its package, or under `default` without one
    pub fn insert(&self, doc: TypeDoc) {
        let key = if doc.package_name.is_empty() {
            DEFAULT_PACKAGE.to_string()
        } else {
            doc.package_name.clone()
        };
        self.packages.entry(key).or_default().push(doc);
    }

    /// Number of types collected so far
    pub fn type_count(&self) -> usize {
        self.packages.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Consumes the grouping, sorting packages by name and types by name
    pub fn into_sorted(self) -> Vec<PackageDoc> {
        sort_packages(self.packages.into_iter())
    }

    /// Sorted copy of the grouping, leaving it in place
    pub fn to_sorted(&self) -> Vec<PackageDoc> {
        sort_packages(
            self.packages
                .iter()
                .map(|entry| (entry.key().clone(), entry.value().clone())),
        )
    }
}

fn sort_packages(entries: impl Iterator<Item = (String, Vec<TypeDoc>)>) -> Vec<PackageDoc> {
    let mut packages: Vec<PackageDoc> = entries
        .map(|(name, mut types)| {
            types.sort_by(|a, b| a.name.cmp(&b.name));
            PackageDoc {
                name,
                description: None,
                types,
            }
        })
        .collect();
    packages.sort_by(|a, b| a.name.cmp(&b.name));
    packages
}
