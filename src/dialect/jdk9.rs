//! Classic table-based layout (JDK 9 through 11 javadoc)
//!
//! Member summaries are `table.memberSummary` rows placed after a named
//! anchor (`method.summary`, `field.summary`, `constructor.summary`); each
//! member's detail block is a `li.blockList` holding its declaration `pre`.

use super::signature::{contains_signature, member_name, split_top_level};
use super::text::{block_text, inline_text};
use super::{compile, declaration_kind, declaration_modifiers, notes};
use super::{MemberCategory, MemberRules, ParsingDialect};
use crate::model::TypeKind;
use crate::Result;
use scraper::{ElementRef, Html, Selector};

pub struct Jdk9Dialect {
    applicable: Selector,
    description: Selector,
    title: Selector,
    declaration: Selector,
    inheritance_items: Selector,
    nested_list: Selector,
    dt: Selector,
    methods: Jdk9Members,
    fields: Jdk9Members,
    constructors: Jdk9Members,
}

struct Jdk9Members {
    category: MemberCategory,
    rows: Selector,
    first_cell: Selector,
    name_cell: Selector,
    last_cell: Selector,
    detail_signatures: Selector,
}

impl Jdk9Members {
    fn new(category: MemberCategory, anchor: &str, name_cell: &str) -> Result<Self> {
        let rows = format!(
            "#{id} ~ table.memberSummary tr, a[name=\"{name}\"] ~ table.memberSummary tr, #{id} ~ div.memberSummary tr",
            id = anchor.replace('.', "\\."),
            name = anchor,
        );
        Ok(Self {
            category,
            rows: compile(&rows)?,
            first_cell: compile("td.colFirst")?,
            name_cell: compile(name_cell)?,
            last_cell: compile("td.colLast")?,
            detail_signatures: compile("pre.methodSignature, li.blockList > h4 + pre")?,
        })
    }

    fn cell<'a>(&self, row: &ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
        row.select(selector).next()
    }
}

impl MemberRules for Jdk9Members {
    fn selector(&self) -> &Selector {
        &self.rows
    }

    fn is_valid(&self, element: &ElementRef<'_>) -> bool {
        let has_name = self.cell(element, &self.name_cell).is_some();
        let has_last = self.cell(element, &self.last_cell).is_some();
        match self.category {
            MemberCategory::Constructor => has_name && has_last,
            _ => has_name && has_last && self.cell(element, &self.first_cell).is_some(),
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
        self.cell(element, &self.name_cell)
            .map(|cell| inline_text(&cell))
            .unwrap_or_default()
    }

    fn modifier_and_type(&self, element: &ElementRef<'_>) -> String {
        self.cell(element, &self.first_cell)
            .map(|cell| inline_text(&cell))
            .unwrap_or_default()
    }

    fn description(&self, element: &ElementRef<'_>) -> String {
        self.cell(element, &self.last_cell)
            .map(|cell| block_text(&cell))
            .unwrap_or_default()
    }

    fn detail<'a>(&self, element: &ElementRef<'a>, document: &'a Html) -> Option<ElementRef<'a>> {
        let signature = self.signature(element);
        if signature.is_empty() {
            return None;
        }
        let name = self.name(element);

        document
            .select(&self.detail_signatures)
            .find(|pre| {
                let declaration = inline_text(pre);
                match self.category {
                    MemberCategory::Field => member_name(&declaration) == name,
                    _ => contains_signature(&declaration, &signature),
                }
            })
            .and_then(|pre| pre.parent())
            .and_then(ElementRef::wrap)
    }

    fn detail_signature(&self, detail: &ElementRef<'_>) -> Option<String> {
        detail
            .select(&self.detail_signatures)
            .next()
            .map(|pre| inline_text(&pre))
    }
}

impl Jdk9Dialect {
    pub fn new() -> Result<Self> {
        Ok(Self {
            applicable: compile("table.memberSummary, ul.inheritance, div.contentContainer")?,
            description: compile(".contentContainer .description .block")?,
            title: compile("h1.title, h2.title")?,
            declaration: compile(".description pre")?,
            inheritance_items: compile("ul.inheritance li")?,
            nested_list: compile("ul")?,
            dt: compile("dt")?,
            methods: Jdk9Members::new(MemberCategory::Method, "method.summary", ".colSecond")?,
            fields: Jdk9Members::new(MemberCategory::Field, "field.summary", ".colSecond")?,
            constructors: Jdk9Members::new(
                MemberCategory::Constructor,
                "constructor.summary",
                ".colConstructorName, .colSecond, .colOne",
            )?,
        })
    }

    fn declaration(&self, document: &Html) -> String {
        document
            .select(&self.declaration)
            .next()
            .map(|pre| inline_text(&pre))
            .unwrap_or_default()
    }

    fn heading(&self, document: &Html) -> String {
        document
            .select(&self.title)
            .next()
            .map(|h| inline_text(&h))
            .unwrap_or_default()
    }
}

impl ParsingDialect for Jdk9Dialect {
    fn name(&self) -> &'static str {
        "jdk9"
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
        declaration_kind(&self.declaration(document), &self.heading(document))
    }

    fn modifiers(&self, document: &Html) -> Vec<String> {
        declaration_modifiers(&self.declaration(document))
    }

    fn superclass(&self, document: &Html) -> Option<String> {
        // leaf items only; the others wrap the next nested level
        let chain: Vec<String> = document
            .select(&self.inheritance_items)
            .filter(|li| li.select(&self.nested_list).next().is_none())
            .map(|li| inline_text(&li))
            .filter(|label| !label.is_empty())
            .collect();

        if chain.len() >= 2 {
            chain.get(chain.len() - 2).cloned()
        } else {
            None
        }
    }

    fn interfaces(&self, document: &Html) -> Vec<String> {
        let root = document.root_element();
        let mut interfaces = Vec::new();
        for label in ["All Implemented Interfaces", "All Superinterfaces"] {
            for dd in notes(root, &self.dt, label) {
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

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"<!DOCTYPE html>
<html><body>
<div class="header">
<div class="subTitle">com.acme</div>
<h2 title="Class Widget" class="title">Class Widget</h2>
</div>
<div class="contentContainer">
<ul class="inheritance">
<li><a href="#">java.lang.Object</a></li>
<li>
<ul class="inheritance">
<li><a href="Base.html">com.acme.Base</a></li>
<li>
<ul class="inheritance">
<li>com.acme.Widget</li>
</ul>
</li>
</ul>
</li>
</ul>
<div class="description">
<ul class="blockList"><li class="blockList">
<dl><dt>All Implemented Interfaces:</dt><dd><code>Comparable&lt;Widget&gt;, java.io.Serializable</code></dd></dl>
<hr>
<pre>public abstract class <span class="typeNameLabel">Widget</span>
extends <a href="Base.html">Base</a></pre>
<div class="block">A widget that does things.</div>
</li></ul>
</div>
<div class="summary"><ul class="blockList"><li class="blockList">
<ul class="blockList"><li class="blockList">
<a name="field.summary"><!-- --></a>
<h3>Field Summary</h3>
<table class="memberSummary">
<tr><th class="colFirst" scope="col">Modifier and Type</th><th class="colSecond" scope="col">Field</th><th class="colLast" scope="col">Description</th></tr>
<tr class="altColor"><td class="colFirst"><code>static int</code></td><th class="colSecond" scope="row"><code><a href="#MAX">MAX</a></code></th><td class="colLast"><div class="block">Upper bound.</div></td></tr>
</table>
</li></ul>
<ul class="blockList"><li class="blockList">
<a id="constructor.summary"><!-- --></a>
<h3>Constructor Summary</h3>
<table class="memberSummary">
<tr><th class="colFirst" scope="col">Constructor</th><th class="colLast" scope="col">Description</th></tr>
<tr class="altColor"><th class="colConstructorName" scope="row"><code><a href="#Widget(int)">Widget</a>&#8203;(int&nbsp;size)</code></th><td class="colLast"><div class="block">Creates a widget.</div></td></tr>
</table>
</li></ul>
<ul class="blockList"><li class="blockList">
<a id="method.summary"><!-- --></a>
<h3>Method Summary</h3>
<table class="memberSummary">
<tr><th class="colFirst" scope="col">Modifier and Type</th><th class="colSecond" scope="col">Method</th><th class="colLast" scope="col">Description</th></tr>
<tr id="i0" class="altColor"><td class="colFirst"><code>int</code></td><th class="colSecond" scope="row"><code><a href="#size()">size</a>&#8203;()</code></th><td class="colLast"><div class="block">Returns the size.</div></td></tr>
<tr id="i1" class="rowColor"><td class="colFirst"><code>static void</code></td><th class="colSecond" scope="row"><code><a href="#copy(int,int)">copy</a>&#8203;(int&nbsp;from, int&nbsp;to)</code></th><td class="colLast"><div class="block">Copies.</div></td></tr>
</table>
</li></ul>
</li></ul></div>
<div class="details"><ul class="blockList"><li class="blockList">
<ul class="blockList"><li class="blockList">
<a id="method.detail"><!-- --></a>
<h3>Method Detail</h3>
<a id="size()"><!-- --></a>
<ul class="blockList"><li class="blockList">
<h4>size</h4>
<pre class="methodSignature">public&nbsp;int&nbsp;size&#8203;()</pre>
<div class="block">Returns the size.</div>
</li></ul>
<a id="copy(int,int)"><!-- --></a>
<ul class="blockListLast"><li class="blockList">
<h4>copy</h4>
<pre class="methodSignature">public static&nbsp;void&nbsp;copy&#8203;(int&nbsp;from, int&nbsp;to) throws java.io.IOException</pre>
<div class="block">Copies.</div>
<dl><dt><span class="paramLabel">Parameters:</span></dt><dd><code>from</code> - start index</dd><dd><code>to</code> - end index</dd></dl>
</li></ul>
</li></ul>
</li></ul></div>
</div>
</body></html>"##;

    fn page() -> Html {
        Html::parse_document(PAGE)
    }

    #[test]
    fn test_class_level_fields() {
        let dialect = Jdk9Dialect::new().unwrap();
        let doc = page();

        assert!(dialect.is_applicable(&doc));
        assert_eq!(dialect.description(&doc), "A widget that does things.");
        assert_eq!(dialect.kind(&doc), TypeKind::Class);
        assert_eq!(dialect.modifiers(&doc), vec!["public", "abstract"]);
        assert_eq!(dialect.superclass(&doc), Some("com.acme.Base".to_string()));
        assert_eq!(
            dialect.interfaces(&doc),
            vec!["Comparable<Widget>", "java.io.Serializable"]
        );
    }

    #[test]
    fn test_method_rows_skip_header() {
        let dialect = Jdk9Dialect::new().unwrap();
        let doc = page();
        let rules = dialect.members(MemberCategory::Method);

        let rows: Vec<_> = doc
            .select(rules.selector())
            .filter(|row| rules.is_valid(row))
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rules.name(&rows[0]), "size");
        assert_eq!(rules.signature(&rows[1]), "copy(int from, int to)");
        assert_eq!(rules.modifier_and_type(&rows[1]), "static void");
        assert_eq!(rules.description(&rows[1]), "Copies.");
    }

    #[test]
    fn test_method_detail_lookup() {
        let dialect = Jdk9Dialect::new().unwrap();
        let doc = page();
        let rules = dialect.members(MemberCategory::Method);
        let row = doc
            .select(rules.selector())
            .filter(|row| rules.is_valid(row))
            .nth(1)
            .unwrap();

        let detail = rules.detail(&row, &doc).unwrap();
        assert_eq!(
            rules.detail_signature(&detail).unwrap(),
            "public static void copy(int from, int to) throws java.io.IOException"
        );
    }

    #[test]
    fn test_constructor_and_field_rows() {
        let dialect = Jdk9Dialect::new().unwrap();
        let doc = page();

        let ctors = dialect.members(MemberCategory::Constructor);
        let rows: Vec<_> = doc
            .select(ctors.selector())
            .filter(|row| ctors.is_valid(row))
            .collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(ctors.name(&rows[0]), "Widget");
        assert_eq!(ctors.modifier_and_type(&rows[0]), "");

        let fields = dialect.members(MemberCategory::Field);
        let rows: Vec<_> = doc
            .select(fields.selector())
            .filter(|row| fields.is_valid(row))
            .collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(fields.name(&rows[0]), "MAX");
        assert_eq!(fields.modifier_and_type(&rows[0]), "static int");
    }
}
