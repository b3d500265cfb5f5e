//! HTML conventions of documentation generators
//!
//! A [`ParsingDialect`] knows where one generator puts the type description,
//! inheritance and member tables. The page parser never looks at markup
//! directly; it asks the dialect chosen by [`DialectRegistry::select`].

mod html5;
mod jdk9;
pub mod signature;
pub mod text;

pub use html5::Html5Dialect;
pub use jdk9::Jdk9Dialect;

use crate::model::TypeKind;
use crate::{DocCrawlError, Result};
use scraper::{ElementRef, Html, Selector};
use std::fmt;

/// The three member sections of a type page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberCategory {
    Method,
    Field,
    Constructor,
}

impl fmt::Display for MemberCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberCategory::Method => write!(f, "method"),
            MemberCategory::Field => write!(f, "field"),
            MemberCategory::Constructor => write!(f, "constructor"),
        }
    }
}

/// Extraction strategy for one generator's type pages
pub trait ParsingDialect: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Returns true if this dialect recognizes the page layout
    fn is_applicable(&self, document: &Html) -> bool;

    fn description(&self, document: &Html) -> String;

    fn kind(&self, document: &Html) -> TypeKind;

    fn modifiers(&self, document: &Html) -> Vec<String>;

    fn superclass(&self, document: &Html) -> Option<String>;

    fn interfaces(&self, document: &Html) -> Vec<String>;

    /// Rules for one member section
    fn members(&self, category: MemberCategory) -> &dyn MemberRules;
}

/// Selector and extractors for the rows of one member section
///
/// `element` is always a node matched by [`MemberRules::selector`].
pub trait MemberRules: Send + Sync {
    /// Enumerates candidate rows; may over-match
    fn selector(&self) -> &Selector;

    /// Rejects header rows and anything else the selector caught by accident
    fn is_valid(&self, element: &ElementRef<'_>) -> bool;

    fn name(&self, element: &ElementRef<'_>) -> String;

    /// Name with parameter list as shown in the summary, e.g. `foo(int x)`
    fn signature(&self, element: &ElementRef<'_>) -> String;

    fn modifier_and_type(&self, element: &ElementRef<'_>) -> String;

    fn description(&self, element: &ElementRef<'_>) -> String;

    /// The member's detail block, if the page has one
    fn detail<'a>(&self, element: &ElementRef<'a>, document: &'a Html) -> Option<ElementRef<'a>>;

    /// Full declaration inside a detail block
    fn detail_signature(&self, detail: &ElementRef<'_>) -> Option<String>;
}

/// Ordered dialects plus the one used when none claims a page
pub struct DialectRegistry {
    dialects: Vec<Box<dyn ParsingDialect>>,
    fallback: Box<dyn ParsingDialect>,
}

impl DialectRegistry {
    pub fn new(dialects: Vec<Box<dyn ParsingDialect>>, fallback: Box<dyn ParsingDialect>) -> Self {
        Self { dialects, fallback }
    }

    /// Modern layout first, classic layout second and as fallback
    pub fn standard() -> Result<Self> {
        Ok(Self::new(
            vec![
                Box::new(Html5Dialect::new()?),
                Box::new(Jdk9Dialect::new()?),
            ],
            Box::new(Jdk9Dialect::new()?),
        ))
    }

    /// First dialect whose applicability check accepts the page
    pub fn select(&self, document: &Html) -> &dyn ParsingDialect {
        self.dialects
            .iter()
            .find(|d| d.is_applicable(document))
            .map(|d| &**d)
            .unwrap_or(&*self.fallback)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.dialects.iter().map(|d| d.name()).collect()
    }
}

impl fmt::Debug for DialectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialectRegistry")
            .field("dialects", &self.names())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

/// Compiles a selector known at build time
pub(crate) fn compile(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| DocCrawlError::Dialect(format!("invalid selector '{}': {:?}", css, e)))
}

/// `dd` entries following every `dt` whose text starts with `label`
pub fn notes<'a>(scope: ElementRef<'a>, dt: &Selector, label: &str) -> Vec<ElementRef<'a>> {
    let mut entries = Vec::new();
    for term in scope.select(dt) {
        if !text::inline_text(&term).starts_with(label) {
            continue;
        }
        for sibling in term.next_siblings().filter_map(ElementRef::wrap) {
            match sibling.value().name() {
                "dd" => entries.push(sibling),
                "dt" => break,
                _ => {}
            }
        }
    }
    entries
}

/// Kind keyword that follows the modifiers of a type declaration
fn is_kind_keyword(token: &str) -> bool {
    matches!(token, "class" | "interface" | "enum" | "@interface" | "record")
}

/// Modifiers of a type declaration such as `public abstract class Foo`
pub(crate) fn declaration_modifiers(declaration: &str) -> Vec<String> {
    declaration
        .split_whitespace()
        .take_while(|token| !is_kind_keyword(token))
        .filter(|token| signature::is_modifier(token))
        .map(str::to_string)
        .collect()
}

/// Kind from a declaration keyword, falling back to the page heading
pub(crate) fn declaration_kind(declaration: &str, heading: &str) -> TypeKind {
    declaration
        .split_whitespace()
        .find(|token| is_kind_keyword(token))
        .map(TypeKind::from_keyword)
        .unwrap_or_else(|| TypeKind::from_keyword(heading))
}
