//! MeshCore command registry: recovers the CLI command set from MeshCore's
//! `CommonCLI.cpp` and the node preference layout from `CommonCLI.h`.
//!
//! Extraction is a best-effort line scan: it never fails, it only finds less.
//! See [`Extractor`] for the scan rules and [`Registry`] for the published
//! document.

pub mod catalog;
pub mod extract;
pub mod matchers;
pub mod model;
pub mod prefs;
pub mod registry;
pub mod typescript;

pub use catalog::{Catalog, classify_category, normalize_response_format};
pub use extract::{DEFAULT_LOOKAHEAD, ExtractConfig, Extractor, extract_commands};
pub use model::{
    Category, CommandDescriptor, FieldDescriptor, FieldMap, Param, ParamType, PrimitiveType,
};
pub use prefs::{DEFAULT_STRUCT_NAME, parse_node_prefs, parse_struct_fields};
pub use registry::{Registry, RegistryInfo};
pub use typescript::render_typescript;
