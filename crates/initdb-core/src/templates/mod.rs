//! Template catalog, placeholder binding and materialization
//!
//! This module provides:
//! - The embedded catalog and its manifest types
//! - Resource name binding for template bodies and file names
//! - Staged, overwrite-on-conflict writing of a manifest to disk

pub mod binder;
pub mod copier;
pub mod manifest;
pub mod source;

pub use binder::{bind, is_identifier, pascal, Bindings};
pub use copier::{materialize, Change, MaterializeReport};
pub use manifest::{
    lookup, module_manifest, Catalog, FileDescriptor, ScaffoldManifest, EXAMPLE_RESOURCE,
};
