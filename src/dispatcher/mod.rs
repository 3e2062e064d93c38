//! # Dispatcher Module
//!
//! Per-request glue between the [`RoutingTable`](crate::router::RoutingTable)
//! and the code that actually calls controller methods.
//!
//! ## Overview
//!
//! - [`ParsedRequest`] is the transport-independent request: method, path,
//!   query pairs, headers, cookies and an optional JSON body.
//! - [`RouteRecord`] is the lookup result. It is pure data: the matched
//!   operation, its owner and method name, and the path parameters.
//! - [`Invoker`] is the seam to the host application, which resolves each
//!   declared parameter (see [`RouteRecord::raw_argument`]) and calls the
//!   method.
//! - [`Dispatcher`] looks a request up and forwards the match to an invoker,
//!   reporting unmatched requests as [`DispatchError::NotFound`](crate::error::DispatchError).
//!
//! ## Example
//!
//! ```rust,ignore
//! let dispatcher = Dispatcher::new(&table, |record: &RouteRecord, req: &ParsedRequest| {
//!     format!("{} {:?}", record.describe(), record.raw_arguments(req))
//! });
//! let out = dispatcher.dispatch(&ParsedRequest::from_url(Method::GET, "/pets/7?verbose=1"))?;
//! ```

mod core;
mod request;

pub use core::{Dispatcher, Invoker, RouteRecord};
pub use request::{parse_cookies, parse_query_params, HeaderVec, ParsedRequest, MAX_INLINE_HEADERS};
