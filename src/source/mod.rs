//! External configuration sources.
//!
//! Each loader normalizes one kind of input (environment variables or
//! multi-level document files) into entries the update layer can apply
//! against the store.

pub mod document;
pub mod env;
pub mod template;

pub use document::{MultiLevelDocument, Section};
