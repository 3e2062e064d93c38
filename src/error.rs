//! Error types raised while recording metadata, resolving controller specs and
//! registering routes.
//!
//! Route lookups never fail: a miss is reported as `None` by
//! [`RoutingTable::find`](crate::router::RoutingTable::find).

use crate::metadata::ClassId;
use crate::spec::Verb;

/// Errors produced by the metadata registry, the resolver and the routing table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecError {
    /// More than one parameter of a single operation is marked as the request body.
    #[error("An operation should only have one parameter decorated as request body ({class}.{method}, {count} found)")]
    MultipleRequestBodies {
        class: String,
        method: String,
        count: usize,
    },

    /// A parameter schema declares `type: array` but the declared type is not an array.
    #[error("The parameter type is set to 'array' but the declared type is {declared} ({class}.{method} #{index})")]
    ArrayTypeMismatch {
        class: String,
        method: String,
        index: usize,
        declared: String,
    },

    /// A JSON schema declares `type: array` without `items`.
    #[error("\"items\" property must be present if \"type\" is an array")]
    MissingItems,

    /// Parameters of one method were declared both on the method and on its parameters.
    #[error("Mixed method-level and parameter-level parameter declarations are not supported ({class}.{method})")]
    MixedParameterDeclarations { class: String, method: String },

    /// An operation carries neither `x-operation-name` nor `operationId`.
    #[error("Operation {verb} {path} of {class} has no x-operation-name or operationId")]
    MissingOperationName {
        class: String,
        verb: Verb,
        path: String,
    },

    /// The class id was not issued by this registry.
    #[error("Unknown controller class id {0}")]
    UnknownClass(ClassId),
}

/// Convenience alias used across the crate.
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors reported by [`Dispatcher::dispatch`](crate::dispatcher::Dispatcher::dispatch).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// No registered route matches the request; map to a transport-level 404.
    #[error("No route found for {method} {path}")]
    NotFound { method: http::Method, path: String },
}

/// Errors reported by the [`Context`](crate::registry::Context) key/value registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("The key {0} was not bound to any value")]
    NotBound(String),

    /// The key exists but no value was attached with `Binding::to`.
    #[error("The key {0} is bound without a value")]
    Unresolved(String),

    #[error("The value bound to {key} is not a {expected}")]
    TypeMismatch { key: String, expected: &'static str },
}
