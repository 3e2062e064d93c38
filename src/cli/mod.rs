//! # CLI Module
//!
//! Command-line access to the routing layer for a serialized
//! [`HandlerSpec`](crate::spec::HandlerSpec) (YAML or JSON).
//!
//! ## Commands
//!
//! ### `routes`
//!
//! Print the route table of a spec:
//!
//! ```bash
//! ctrlrouter routes --spec notes.yaml --controller NoteController
//! ```
//!
//! ### `match`
//!
//! Route one request and print the matched handler, its path parameters and
//! the raw values of its declared parameters. Exits non-zero when nothing
//! matches:
//!
//! ```bash
//! ctrlrouter match --spec notes.yaml --method GET --url '/notes/7?verbose=true'
//! ```
//!
//! Global options:
//! - `--config <FILE>` - application config (YAML, TOML or JSON); `rest.base_path`
//!   is joined in front of every route
//! - `--verbose` - log at debug level

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{build_application, match_lines, route_lines, run_cli, Cli, Commands};
