//! # Router Module
//!
//! Path normalization, template matching and the routing table that maps
//! requests to controller operations.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Normalizing paths ([`join_path`]) so base paths and templates compose
//! - Compiling path templates (`/users/{id}`) into segment matchers
//! - Holding every registered operation in an append-only [`RoutingTable`]
//! - Extracting path parameters for the matched route
//!
//! ## Architecture
//!
//! 1. **Registration**: at bootstrap each resolved
//!    [`HandlerSpec`](crate::spec::HandlerSpec) is decomposed into one
//!    [`RouteEntry`] per path and verb, with the controller's base path
//!    joined in front.
//!
//! 2. **Matching**: a lookup normalizes the request path and scans entries in
//!    registration order. The first entry whose verb matches and whose
//!    template has the same segment count, equal static segments and
//!    non-empty captures wins.
//!
//! ## Example
//!
//! ```rust
//! use ctrlrouter::metadata::{ClassDef, MetadataRegistry};
//! use ctrlrouter::router::RoutingTable;
//! use ctrlrouter::spec::{HandlerSpec, Operation, Verb};
//! use http::Method;
//!
//! let mut registry = MetadataRegistry::new();
//! let class = registry.define_class(ClassDef::new("PetController")).unwrap();
//! let owner = registry.controller_ref(class).unwrap();
//!
//! let spec = HandlerSpec::new()
//!     .with_base_path("/api")
//!     .with_operation(Verb::Get, "/pets/{id}", Operation::new().operation_name("getPet"));
//!
//! let mut table = RoutingTable::new();
//! table.register_controller(&owner, &spec).unwrap();
//!
//! let record = table.route(&Method::GET, "/api/pets/42").unwrap();
//! assert_eq!(record.describe(), "PetController.getPet");
//! assert_eq!(record.get_path_param("id"), Some("42"));
//! ```

mod path;
mod table;

pub use path::{join_path, ParamVec, PathTemplate, Segment, MAX_INLINE_PARAMS};
pub use table::{RouteEntry, RoutingTable};
