//! Documentation records produced by the crawler
//!
//! These are the values cached per type and serialized by the output writers.

mod doc;
mod package;

pub use doc::{full_name, ConstructorDoc, FieldDoc, MethodDoc, ParameterDoc, TypeDoc, TypeKind};
pub use package::{DocRoot, Metadata, PackageDoc, PackageGrouping, DEFAULT_PACKAGE, FORMAT_VERSION};
