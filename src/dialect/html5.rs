//! Modern grid layout (JDK 17 and later javadoc)

use super::signature::{contains_signature, is_modifier, member_name, split_top_level};
use super::text::{block_text, inline_text, normalize};
use super::{compile, declaration_kind, declaration_modifiers, notes};
use super::{MemberCategory, MemberRules, ParsingDialect};
use crate::model::TypeKind;
use crate::Result;
use scraper::{ElementRef, Html, Node, Selector};

pub struct Html5Dialect {
    applicable: Selector,
    class_section: Selector,
    description: Selector,
    title: Selector,
    type_signature: Selector,
    modifiers: Selector,
    inheritance: Selector,
    dt: Selector,
    methods: Html5Members,
    fields: Html5Members,
    constructors: Html5Members,
}

/// Summary cells form a flat grid, so the name cell anchors each row and
/// the type and description cells are its element siblings.
struct Html5Members {
    category: MemberCategory,
    cells: Selector,
    details: Selector,
    member_signature: Selector,
    link: Selector,
}

fn has_class(element: &ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

impl Html5Members {
    fn new(category: MemberCategory, section: &str, name_cell: &str) -> Result<Self> {
        Ok(Self {
            category,
            cells: compile(&format!("section.{}-summary div.{}", section, name_cell))?,
            details: compile(&format!("section.{}-details section.detail", section))?,
            member_signature: compile("div.member-signature")?,
            link: compile("a[href]")?,
        })
    }

    fn first_cell<'a>(&self, element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
        element
            .prev_siblings()
            .filter_map(ElementRef::wrap)
            .next()
            .filter(|cell| has_class(cell, "col-first"))
    }

    fn last_cell<'a>(&self, element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
        element
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .next()
            .filter(|cell| has_class(cell, "col-last"))
    }

    /// Fragment of the summary link, which is the detail section's id
    fn anchor(&self, element: &ElementRef<'_>) -> Option<String> {
        element
            .select(&self.link)
            .filter_map(|a| a.value().attr("href"))
            .find_map(|href| href.split_once('#').map(|(_, fragment)| fragment.to_string()))
    }
}

impl MemberRules for Html5Members {
    fn selector(&self) -> &Selector {
        &self.cells
    }

    fn is_valid(&self, element: &ElementRef<'_>) -> bool {
        if has_class(element, "table-header") || self.last_cell(element).is_none() {
            return false;
        }
        match self.category {
            MemberCategory::Constructor => true,
            _ => self.first_cell(element).is_some(),
        }
    }

    fn name(&self, element: &ElementRef<'_>) -> String {
        let signature = self.signature(element);
        match self.category {
            MemberCategory::Field => signature,
            _ => member_name(&signature),
        }
    }

    fn signature(&self, element: &ElementRef<'_>) -> String {
        inline_text(element)
    }

    fn modifier_and_type(&self, element: &ElementRef<'_>) -> String {
        self.first_cell(element)
            .map(|cell| inline_text(&cell))
            .unwrap_or_default()
    }

    fn description(&self, element: &ElementRef<'_>) -> String {
        self.last_cell(element)
            .map(|cell| block_text(&cell))
            .unwrap_or_default()
    }

    fn detail<'a>(&self, element: &ElementRef<'a>, document: &'a Html) -> Option<ElementRef<'a>> {
        if let Some(anchor) = self.anchor(element) {
            let by_id = document
                .select(&self.details)
                .find(|section| section.value().id() == Some(anchor.as_str()));
            if by_id.is_some() {
                return by_id;
            }
        }

        let signature = self.signature(element);
        let name = self.name(element);
        document.select(&self.details).find(|section| {
            let Some(declaration) = self.detail_signature(section) else {
                return false;
            };
            match self.category {
                MemberCategory::Field => member_name(&declaration) == name,
                _ => contains_signature(&declaration, &signature),
            }
        })
    }

    fn detail_signature(&self, detail: &ElementRef<'_>) -> Option<String> {
        detail
            .select(&self.member_signature)
            .next()
            .map(|sig| inline_text(&sig))
    }
}

impl Html5Dialect {
    pub fn new() -> Result<Self> {
        Ok(Self {
            applicable: compile("section.class-description, div.type-signature")?,
            class_section: compile("section.class-description")?,
            description: compile("section.class-description div.block")?,
            title: compile("h1.title")?,
            type_signature: compile("div.type-signature")?,
            modifiers: compile("div.type-signature span.modifiers")?,
            inheritance: compile("div.inheritance")?,
            dt: compile("dt")?,
            methods: Html5Members::new(MemberCategory::Method, "method", "col-second")?,
            fields: Html5Members::new(MemberCategory::Field, "field", "col-second")?,
            constructors: Html5Members::new(
                MemberCategory::Constructor,
                "constructor",
                "col-constructor-name",
            )?,
        })
    }

    fn type_signature(&self, document: &Html) -> String {
        document
            .select(&self.type_signature)
            .next()
            .map(|sig| inline_text(&sig))
            .unwrap_or_default()
    }

    /// Text of an inheritance level without the nested levels below it
    fn own_label(element: &ElementRef<'_>) -> String {
        let mut label = String::new();
        for child in element.children() {
            match child.value() {
                Node::Text(text) => label.push_str(text),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        if !has_class(&child, "inheritance") {
                            label.push_str(&child.text().collect::<String>());
                        }
                    }
                }
                _ => {}
            }
        }
        normalize(&label)
    }
}

impl ParsingDialect for Html5Dialect {
    fn name(&self) -> &'static str {
        "html5"
    }

    fn is_applicable(&self, document: &Html) -> bool {
        document.select(&self.applicable).next().is_some()
    }

    fn description(&self, document: &Html) -> String {
        document
            .select(&self.description)
            .next()
            .map(|block| block_text(&block))
            .unwrap_or_default()
    }

    fn kind(&self, document: &Html) -> TypeKind {
        let heading = document
            .select(&self.title)
            .next()
            .map(|h| inline_text(&h))
            .unwrap_or_default();
        declaration_kind(&self.type_signature(document), &heading)
    }

    fn modifiers(&self, document: &Html) -> Vec<String> {
        let tagged: Vec<String> = document
            .select(&self.modifiers)
            .next()
            .map(|span| {
                inline_text(&span)
                    .split_whitespace()
                    .filter(|token| is_modifier(token))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if tagged.is_empty() {
            declaration_modifiers(&self.type_signature(document))
        } else {
            tagged
        }
    }

    fn superclass(&self, document: &Html) -> Option<String> {
        let chain: Vec<String> = document
            .select(&self.inheritance)
            .map(|level| Self::own_label(&level))
            .filter(|label| !label.is_empty())
            .collect();

        if chain.len() >= 2 {
            chain.get(chain.len() - 2).cloned()
        } else {
            None
        }
    }

    fn interfaces(&self, document: &Html) -> Vec<String> {
        let scope = document
            .select(&self.class_section)
            .next()
            .unwrap_or_else(|| document.root_element());

        let mut interfaces = Vec::new();
        for label in ["All Implemented Interfaces", "All Superinterfaces"] {
            for dd in notes(scope, &self.dt, label) {
                interfaces.extend(split_top_level(&inline_text(&dd), ','));
            }
        }
        interfaces
    }

    fn members(&self, category: MemberCategory) -> &dyn MemberRules {
        match category {
            MemberCategory::Method => &self.methods,
            MemberCategory::Field => &self.fields,
            MemberCategory::Constructor => &self.constructors,
        }
    }
}
