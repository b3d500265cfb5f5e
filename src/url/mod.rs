//! URL handling module for the Javadoc crawler
//!
//! This module provides base URL normalization, link resolution, the
//! type-link predicate and package inference and filtering.

mod filter;
mod matcher;
mod normalize;

pub use filter::PackageFilter;
pub use matcher::{is_denied_name, is_type_link};
pub use normalize::{
    infer_package, normalize_base_url, resolve_link, type_location, TypeLocation,
};
