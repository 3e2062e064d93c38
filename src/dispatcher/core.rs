use super::request::ParsedRequest;
use crate::error::DispatchError;
use crate::metadata::ControllerRef;
use crate::router::{ParamVec, RoutingTable};
use crate::spec::{Operation, Parameter, ParameterLocation, Verb};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Result of a successful lookup: the operation, its owning controller
/// method and the extracted path parameters.
#[derive(Debug, Clone)]
pub struct RouteRecord {
    pub verb: Verb,
    /// Full template of the matched route, base path included.
    pub path_template: Arc<str>,
    pub operation: Arc<Operation>,
    pub owner: ControllerRef,
    pub method_name: Arc<str>,
    /// Captures in template order.
    pub path_params: ParamVec,
}

impl RouteRecord {
    /// `<ClassName>.<methodName>`, for diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{}.{}", self.owner.name, self.method_name)
    }

    /// Get a path parameter by name
    ///
    /// Uses "last write wins" semantics: if duplicate parameter names exist
    /// at different path depths (e.g., `/org/{id}/team/{team_id}/user/{id}`),
    /// returns the last occurrence.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Note: This allocates - use get_path_param() in hot paths instead
    #[must_use]
    pub fn path_params_map(&self) -> HashMap<String, String> {
        self.path_params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    /// Raw value of a declared parameter, taken from the location it names.
    #[must_use]
    pub fn raw_argument<'a>(&'a self, param: &Parameter, request: &'a ParsedRequest) -> Option<&'a str> {
        match param.location {
            ParameterLocation::Path => self.get_path_param(&param.name),
            ParameterLocation::Query => request.get_query_param(&param.name),
            ParameterLocation::Header => request.get_header(&param.name),
            ParameterLocation::Cookie => request.get_cookie(&param.name),
        }
    }

    /// Raw values of every declared parameter, in declaration order.
    #[must_use]
    pub fn raw_arguments<'a>(&'a self, request: &'a ParsedRequest) -> Vec<(&'a str, Option<&'a str>)> {
        self.operation
            .parameters()
            .iter()
            .map(|param| (param.name.as_str(), self.raw_argument(param, request)))
            .collect()
    }
}

/// Invokes the controller method named by a [`RouteRecord`].
///
/// Argument resolution and the call itself belong to the host application;
/// closures taking the record and the request implement this directly.
pub trait Invoker {
    type Output;

    fn invoke(&self, record: &RouteRecord, request: &ParsedRequest) -> Self::Output;
}

impl<F, O> Invoker for F
where
    F: Fn(&RouteRecord, &ParsedRequest) -> O,
{
    type Output = O;

    fn invoke(&self, record: &RouteRecord, request: &ParsedRequest) -> O {
        self(record, request)
    }
}

/// Couples a routing table with an invoker.
pub struct Dispatcher<'t, I> {
    table: &'t RoutingTable,
    invoker: I,
}

impl<'t, I: Invoker> Dispatcher<'t, I> {
    pub fn new(table: &'t RoutingTable, invoker: I) -> Self {
        Self { table, invoker }
    }

    /// Look up `request` and hand the match to the invoker.
    ///
    /// # Errors
    ///
    /// [`DispatchError::NotFound`] when no route matches.
    pub fn dispatch(&self, request: &ParsedRequest) -> Result<I::Output, DispatchError> {
        let record = self.table.find(request).ok_or_else(|| DispatchError::NotFound {
            method: request.method.clone(),
            path: request.path.clone(),
        })?;
        debug!(
            handler = %record.describe(),
            path_params = ?record.path_params,
            "Dispatching request"
        );
        Ok(self.invoker.invoke(&record, request))
    }
}
