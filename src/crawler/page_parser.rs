//! Type page parsing
//!
//! Turns one fetched type page into a [`TypeDoc`]. Name and package come
//! from the page URL; everything else is read through the dialect that
//! claims the page.

use super::fetcher::fetch_page;
use crate::dialect::signature::{constant_value, parse_parameters, parse_throws, split_modifiers, split_note};
use crate::dialect::text::{block_text, inline_text};
use crate::dialect::{compile, notes, DialectRegistry, MemberCategory, MemberRules, ParsingDialect};
use crate::model::{ConstructorDoc, FieldDoc, MethodDoc, ParameterDoc, TypeDoc};
use crate::url::TypeLocation;
use crate::Result;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

/// Parses type pages with the dialects of a registry
#[derive(Debug)]
pub struct PageParser {
    registry: DialectRegistry,
    dt: Selector,
}

/// Parts shared by methods and constructors
struct Callable {
    name: String,
    signature: String,
    description: String,
    modifiers: Vec<String>,
    return_type: String,
    parameters: Vec<ParameterDoc>,
    exceptions: Vec<String>,
    detail_text: String,
}

impl PageParser {
    pub fn new(registry: DialectRegistry) -> Result<Self> {
        Ok(Self {
            registry,
            dt: compile("dt")?,
        })
    }

    /// Parser with the built-in dialects
    pub fn standard() -> Result<Self> {
        Self::new(DialectRegistry::standard()?)
    }

    pub fn registry(&self) -> &DialectRegistry {
        &self.registry
    }

    /// Fetches a type page and parses it
    ///
    /// Only fetch failures are errors; a page without recognizable members
    /// still yields a sparse record.
    pub async fn fetch_and_parse(&self, client: &Client, location: &TypeLocation) -> Result<TypeDoc> {
        let source = fetch_page(client, &location.url).await?;
        Ok(self.parse(&source, location))
    }

    /// Parses the source of a type page
    pub fn parse(&self, source: &str, location: &TypeLocation) -> TypeDoc {
        let document = Html::parse_document(source);
        let dialect = self.registry.select(&document);

        let mut doc = TypeDoc::new(location.simple_name.clone(), location.package_name.clone());
        doc.description = dialect.description(&document);
        doc.kind = dialect.kind(&document);
        doc.modifiers = dialect.modifiers(&document);
        doc.super_class = dialect.superclass(&document);
        doc.interfaces = dialect.interfaces(&document);

        doc.methods = self
            .callables(dialect, MemberCategory::Method, &document)
            .into_iter()
            .map(|c| MethodDoc {
                name: c.name,
                signature: c.signature,
                description: c.description,
                modifiers: c.modifiers,
                return_type: c.return_type,
                parameters: c.parameters,
                exceptions: c.exceptions,
                detail_text: c.detail_text,
            })
            .collect();

        doc.constructors = self
            .callables(dialect, MemberCategory::Constructor, &document)
            .into_iter()
            .map(|c| ConstructorDoc {
                name: c.name,
                signature: c.signature,
                description: c.description,
                modifiers: c.modifiers,
                parameters: c.parameters,
                exceptions: c.exceptions,
                detail_text: c.detail_text,
            })
            .collect();

        doc.fields = self.fields(dialect, &document);

        tracing::debug!(
            "Parsed {} with {}: {} methods, {} fields, {} constructors",
            doc.full_name(),
            dialect.name(),
            doc.methods.len(),
            doc.fields.len(),
            doc.constructors.len()
        );
        doc
    }

    /// Valid rows of one member section, first occurrence of each name only
    fn unique_rows<'a>(
        &self,
        rules: &dyn MemberRules,
        document: &'a Html,
    ) -> Vec<(String, ElementRef<'a>)> {
        let mut seen = HashSet::new();
        document
            .select(rules.selector())
            .filter(|element| rules.is_valid(element))
            .filter_map(|element| {
                let name = rules.name(&element);
                if name.is_empty() || !seen.insert(name.clone()) {
                    return None;
                }
                Some((name, element))
            })
            .collect()
    }

    fn callables(
        &self,
        dialect: &dyn ParsingDialect,
        category: MemberCategory,
        document: &Html,
    ) -> Vec<Callable> {
        let rules = dialect.members(category);
        self.unique_rows(rules, document)
            .into_iter()
            .map(|(name, row)| {
                let signature = rules.signature(&row);
                let (summary_modifiers, return_type) = split_modifiers(&rules.modifier_and_type(&row));
                let detail = rules.detail(&row, document);
                let detail_signature = detail.as_ref().and_then(|d| rules.detail_signature(d));

                let modifiers = detail_signature
                    .as_deref()
                    .map(|s| split_modifiers(s).0)
                    .filter(|m| !m.is_empty())
                    .unwrap_or(summary_modifiers);

                let mut parameters = parse_parameters(&signature);
                let mut exceptions = detail_signature.as_deref().map(parse_throws).unwrap_or_default();
                let mut detail_text = String::new();

                if let Some(detail) = detail {
                    self.describe_parameters(detail, &mut parameters);
                    if exceptions.is_empty() {
                        exceptions = self.thrown(detail);
                    }
                    detail_text = block_text(&detail);
                }

                Callable {
                    name,
                    signature,
                    description: rules.description(&row),
                    modifiers,
                    return_type: match category {
                        MemberCategory::Method => return_type,
                        _ => String::new(),
                    },
                    parameters,
                    exceptions,
                    detail_text,
                }
            })
            .collect()
    }

    fn fields(&self, dialect: &dyn ParsingDialect, document: &Html) -> Vec<FieldDoc> {
        let rules = dialect.members(MemberCategory::Field);
        self.unique_rows(rules, document)
            .into_iter()
            .map(|(name, row)| {
                let constant = rules
                    .detail(&row, document)
                    .and_then(|d| rules.detail_signature(&d))
                    .and_then(|s| constant_value(&s));
                FieldDoc {
                    name,
                    description: rules.description(&row),
                    modifier_and_type: rules.modifier_and_type(&row),
                    constant_value: constant,
                }
            })
            .collect()
    }

    /// Fills parameter descriptions from the `Parameters:` notes
    fn describe_parameters(&self, detail: ElementRef<'_>, parameters: &mut [ParameterDoc]) {
        for dd in notes(detail, &self.dt, "Parameters") {
            let (name, description) = split_note(&block_text(&dd));
            if let Some(param) = parameters.iter_mut().find(|p| p.name == name) {
                param.description = description;
            }
        }
    }

    /// Exception types from the `Throws:` notes
    fn thrown(&self, detail: ElementRef<'_>) -> Vec<String> {
        let mut exceptions: Vec<String> = Vec::new();
        for dd in notes(detail, &self.dt, "Throws") {
            let (name, _) = split_note(&inline_text(&dd));
            if !name.is_empty() && !exceptions.contains(&name) {
                exceptions.push(name);
            }
        }
        exceptions
    }
}
