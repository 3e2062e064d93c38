//! # ctrlrouter
//!
//! **ctrlrouter** turns metadata attached to API controller classes into a
//! normalized OpenAPI-3-style [`HandlerSpec`] and routes incoming requests to
//! the controller method that handles them.
//!
//! ## Overview
//!
//! Controllers are declared against an explicit [`MetadataRegistry`]: a class
//! level spec (`basePath`, components), one endpoint per method
//! (`GET /notes/{id}`), and per-parameter descriptions (query, header, path,
//! cookie parameters and the request body). The [`MetadataResolver`] merges
//! those three granularities across the inheritance chain, infers schemas from
//! the declared parameter types, and caches the result per class. Resolved
//! specs are registered into an append-only [`RoutingTable`] whose lookups
//! yield a [`RouteRecord`]: operation, owning method and path parameters.
//!
//! ## Architecture
//!
//! - **[`spec`]** - the `HandlerSpec` data model (serde, OpenAPI field names)
//! - **[`schema`]** - type descriptors, schema inference, JSON schema conversion
//! - **[`metadata`]** - class / method / parameter metadata store
//! - **[`resolver`]** - metadata → `HandlerSpec`, memoized per class
//! - **[`router`]** - `join_path`, path templates and the routing table
//! - **[`dispatcher`]** - parsed requests, route records and the invoker seam
//! - **[`registry`]** - dotted-key context holding the config and controllers
//! - **[`application`]** - bootstrap wiring all of the above
//! - **[`config`]** / **[`logging`]** - file + environment configuration, tracing
//! - **[`cli`]** - the `ctrlrouter` binary
//!
//! ### Bootstrap and Request Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant App as Application
//!     participant Meta as MetadataRegistry
//!     participant Res as MetadataResolver
//!     participant Schema as schema
//!     participant Table as RoutingTable
//!     participant Host as Invoker
//!
//!     App->>Meta: define_class / get / param / request_body
//!     App->>App: controller(class) binds controllers.<Name>
//!     App->>Res: start() → resolve(class)
//!     Res->>Meta: aggregated endpoints, params, bodies
//!     Res->>Schema: generate + convert first complex type
//!     Res-->>App: Arc<HandlerSpec> (cached)
//!     App->>Table: register_controller_at(base_path, owner, spec)
//!
//!     Host->>Table: find(ParsedRequest)
//!     Table->>Table: normalize path, scan entries in order
//!     alt No Route Match
//!         Table-->>Host: None (transport answers 404)
//!     end
//!     Table-->>Host: RouteRecord (Class.method, path params)
//!     Host->>Host: resolve arguments, call the method
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use ctrlrouter::{Application, ApplicationConfig, ClassDef, ParsedRequest, Parameter, TypeDescriptor};
//! use http::Method;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut app = Application::new(ApplicationConfig::default());
//! let notes = app.metadata_mut().define_class(
//!     ClassDef::new("NoteController").method("findById", [TypeDescriptor::string()]),
//! )?;
//! app.metadata_mut().get(notes, "findById", "/notes/{id}", None)?;
//! app.metadata_mut().param(notes, "findById", 0, Parameter::path("id"))?;
//! app.controller(notes, None)?;
//! app.start()?;
//!
//! let record = app
//!     .find(&ParsedRequest::from_url(Method::GET, "/notes/42"))
//!     .expect("route");
//! assert_eq!(record.describe(), "NoteController.findById");
//! assert_eq!(record.get_path_param("id"), Some("42"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Resolution and registration take `&mut self` and run once at bootstrap.
//! Lookups take `&self`; a finished [`RoutingTable`] can be shared across
//! threads. Nothing in the crate blocks or awaits.

pub mod application;
pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod registry;
pub mod resolver;
pub mod router;
pub mod schema;
pub mod spec;

pub use application::Application;
pub use config::ApplicationConfig;
pub use dispatcher::{Dispatcher, Invoker, ParsedRequest, RouteRecord};
pub use error::{DispatchError, RegistryError, SpecError, SpecResult};
pub use metadata::{ClassDef, ClassId, ControllerRef, MetadataRegistry};
pub use registry::Context;
pub use resolver::MetadataResolver;
pub use router::{join_path, RoutingTable};
pub use schema::TypeDescriptor;
pub use spec::{
    HandlerSpec, Operation, Parameter, ParameterLocation, RequestBody, SchemaFragment, Verb,
};
