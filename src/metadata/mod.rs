//! # Metadata Module
//!
//! Explicit store for the metadata that annotations attach to controller
//! classes. It replaces decorator reflection with three keyed channels:
//!
//! - class level: `(class)` → [`HandlerSpec`](crate::spec::HandlerSpec) recorded by [`MetadataRegistry::api`]
//! - method level: `(class, method)` → endpoint `{verb, path, spec?}` and
//!   method-level parameter lists
//! - parameter level: `(class, method, index)` → [`Parameter`](crate::spec::Parameter)
//!   or [`RequestBody`](crate::spec::RequestBody)
//!
//! Lookups come in two modes: own metadata (exact class) and aggregated
//! metadata, which walks the inheritance chain from the root class down so
//! that subclasses inherit base-class endpoints and can add to or replace them.
//!
//! Parameter types are supplied explicitly when a class is defined
//! ([`ClassDef::method`]); decorations use them to infer schemas.
//!
//! ```rust
//! use ctrlrouter::metadata::{ClassDef, MetadataRegistry};
//! use ctrlrouter::schema::TypeDescriptor;
//! use ctrlrouter::spec::Parameter;
//!
//! let mut registry = MetadataRegistry::new();
//! let class = registry
//!     .define_class(
//!         ClassDef::new("GreetController")
//!             .method("greet", [TypeDescriptor::string(), TypeDescriptor::string()]),
//!     )
//!     .unwrap();
//! registry.get(class, "greet", "/greet", None).unwrap();
//! registry.param(class, "greet", 1, Parameter::query("message")).unwrap();
//! ```

mod class;
mod registry;

pub use class::{ClassDef, ClassId, ControllerRef};
pub use registry::{MetadataRegistry, RestEndpoint};
