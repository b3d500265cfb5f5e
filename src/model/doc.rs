use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of documented type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
}

impl TypeKind {
    /// Returns the lowercase keyword used in records
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Annotation => "annotation",
        }
    }

    /// Maps a page heading or signature keyword onto a kind
    ///
    /// Records and unknown keywords are treated as classes.
    pub fn from_keyword(keyword: &str) -> Self {
        let lower = keyword.trim().to_ascii_lowercase();
        if lower.starts_with("annotation") || lower.starts_with("@interface") {
            TypeKind::Annotation
        } else if lower.starts_with("interface") {
            TypeKind::Interface
        } else if lower.starts_with("enum") {
            TypeKind::Enum
        } else {
            TypeKind::Class
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One documented class, interface, enum or annotation type
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDoc {
    pub name: String,
    pub package_name: String,
    #[serde(rename = "type")]
    pub kind: TypeKind,
    pub description: String,
    pub modifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub methods: Vec<MethodDoc>,
    pub fields: Vec<FieldDoc>,
    pub constructors: Vec<ConstructorDoc>,
}

impl TypeDoc {
    /// Creates an empty record for a type whose name and package are known
    pub fn new(name: impl Into<String>, package_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package_name: package_name.into(),
            ..Self::default()
        }
    }

    /// Fully-qualified name (`package.Name`, or `Name` without a package)
    pub fn full_name(&self) -> String {
        full_name(&self.package_name, &self.name)
    }
}

/// Joins a package and a simple name into a fully-qualified name
pub fn full_name(package_name: &str, simple_name: &str) -> String {
    if package_name.is_empty() {
        simple_name.to_string()
    } else {
        format!("{}.{}", package_name, simple_name)
    }
}

/// A documented method
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDoc {
    pub name: String,
    pub signature: String,
    pub description: String,
    pub modifiers: Vec<String>,
    pub return_type: String,
    pub parameters: Vec<ParameterDoc>,
    pub exceptions: Vec<String>,
    /// Full text of the member's detail block
    #[serde(default)]
    pub detail_text: String,
}

/// A documented constructor
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorDoc {
    pub name: String,
    pub signature: String,
    pub description: String,
    pub modifiers: Vec<String>,
    pub parameters: Vec<ParameterDoc>,
    pub exceptions: Vec<String>,
    #[serde(default)]
    pub detail_text: String,
}

/// A documented field or enum constant
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDoc {
    pub name: String,
    pub description: String,
    /// Modifiers and type as one string, e.g. `static final int`
    pub modifier_and_type: String,
    #[serde(
        rename = "defaultValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub constant_value: Option<String>,
}

/// One declared parameter of a method or constructor
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParameterDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub description: String,
}
