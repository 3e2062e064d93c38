//! # Spec Module
//!
//! OpenAPI-3.0-like data model produced by the resolver and consumed by the
//! routing table: [`HandlerSpec`], [`Operation`], [`Parameter`],
//! [`RequestBody`] and the recursive [`SchemaFragment`].
//!
//! Every type serializes to the OpenAPI JSON shape (`in`, `$ref`,
//! `requestBody`, `x-operation-name`), so a resolved spec can be written out
//! and loaded back with [`load_handler_spec`].

mod load;
mod types;

pub use load::*;
pub use types::*;
