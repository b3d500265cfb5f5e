use super::traits::{OutputError, OutputResult, OutputWriter, WriteSummary};
use crate::model::{DocRoot, Metadata, PackageDoc, TypeDoc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Source label of records produced by the crawler
pub const CRAWL_SOURCE: &str = "javadoc-html-crawl";

/// File name used when the aggregate path names a directory
pub const AGGREGATE_FILE_NAME: &str = "javadoc.json";

const MCP_VERSION: &str = "1.0";
const MCP_FORMAT: &str = "javadoc-class-json";
const MCP_COMPATIBLE: &str = "mcp-javadoc-search";

#[derive(Serialize)]
struct McpMetadata {
    version: &'static str,
    format: &'static str,
    compatible: &'static str,
    #[serde(rename = "className")]
    class_name: String,
}

/// A type record with the extra fields search tools index on
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct McpTypeRecord<'a> {
    #[serde(flatten)]
    doc: &'a TypeDoc,
    method_count: usize,
    field_count: usize,
    constructor_count: usize,
    search_keywords: Vec<String>,
    mcp_metadata: McpMetadata,
}

impl<'a> McpTypeRecord<'a> {
    fn new(doc: &'a TypeDoc) -> Self {
        let full_name = doc.full_name();
        Self {
            doc,
            method_count: doc.methods.len(),
            field_count: doc.fields.len(),
            constructor_count: doc.constructors.len(),
            search_keywords: vec![
                doc.name.clone(),
                full_name.clone(),
                doc.kind.as_str().to_string(),
            ],
            mcp_metadata: McpMetadata {
                version: MCP_VERSION,
                format: MCP_FORMAT,
                compatible: MCP_COMPATIBLE,
                class_name: full_name,
            },
        }
    }
}

fn write_file(path: &Path, content: &[u8]) -> OutputResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// One `<package.Name>.json` file per type
#[derive(Debug, Clone)]
pub struct PerTypeWriter {
    directory: PathBuf,
    mcp_compatible: bool,
}

impl PerTypeWriter {
    pub fn new(directory: impl Into<PathBuf>, mcp_compatible: bool) -> Self {
        Self {
            directory: directory.into(),
            mcp_compatible,
        }
    }

    fn render(&self, doc: &TypeDoc) -> OutputResult<Vec<u8>> {
        let rendered = if self.mcp_compatible {
            serde_json::to_vec_pretty(&McpTypeRecord::new(doc))
        } else {
            serde_json::to_vec_pretty(doc)
        };
        rendered.map_err(|source| OutputError::Json {
            name: doc.full_name(),
            source,
        })
    }
}

impl OutputWriter for PerTypeWriter {
    fn write(&self, packages: &[PackageDoc], _base_url: &str) -> OutputResult<WriteSummary> {
        fs::create_dir_all(&self.directory).map_err(|source| OutputError::Io {
            path: self.directory.clone(),
            source,
        })?;

        let mut files = 0;
        for doc in packages.iter().flat_map(|p| p.types.iter()) {
            let path = self.directory.join(format!("{}.json", doc.full_name()));
            write_file(&path, &self.render(doc)?)?;
            files += 1;
        }

        tracing::info!(
            "Wrote {} type records to {}",
            files,
            self.directory.display()
        );
        Ok(WriteSummary {
            files,
            types: files,
            location: self.directory.clone(),
        })
    }
}

/// A single file holding metadata and every package
#[derive(Debug, Clone)]
pub struct AggregateWriter {
    path: PathBuf,
}

impl AggregateWriter {
    /// `path` is the output file; a path without a `.json` extension is
    /// treated as a directory receiving `javadoc.json`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_file = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        Self {
            path: if is_file {
                path
            } else {
                path.join(AGGREGATE_FILE_NAME)
            },
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputWriter for AggregateWriter {
    fn write(&self, packages: &[PackageDoc], base_url: &str) -> OutputResult<WriteSummary> {
        let root = DocRoot {
            metadata: Metadata::now(CRAWL_SOURCE, base_url),
            packages: packages.to_vec(),
        };
        let content = serde_json::to_vec_pretty(&root).map_err(|source| OutputError::Json {
            name: self.path.display().to_string(),
            source,
        })?;
        write_file(&self.path, &content)?;

        let types = packages.iter().map(|p| p.types.len()).sum();
        tracing::info!(
            "Wrote {} packages ({} types) to {}",
            packages.len(),
            types,
            self.path.display()
        );
        Ok(WriteSummary {
            files: 1,
            types,
            location: self.path.clone(),
        })
    }
}
