use crate::application::Application;
use crate::config::ApplicationConfig;
use crate::dispatcher::ParsedRequest;
use crate::logging::init_logging;
use crate::metadata::ClassDef;
use crate::router::RoutingTable;
use crate::spec::{load_handler_spec, ParameterLocation};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use http::Method;
use std::path::{Path, PathBuf};

/// Command-line interface for ctrlrouter
#[derive(Parser)]
#[command(name = "ctrlrouter")]
#[command(about = "Inspect and route controller specs", long_about = None)]
pub struct Cli {
    /// Application config file (YAML, TOML or JSON)
    #[arg(long, global = true, env = "CTRLR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the routes of a spec
    Routes {
        /// Path to the spec file (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// Class name the routes are attributed to
        #[arg(short, long, default_value = "Controller")]
        controller: String,
    },
    /// Route a single request against a spec
    Match {
        /// Path to the spec file (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// Class name the routes are attributed to
        #[arg(short, long, default_value = "Controller")]
        controller: String,

        /// HTTP method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request path, optionally with a query string
        #[arg(short, long)]
        url: String,
    },
}

pub fn run_cli(cli: Cli) -> Result<()> {
    let mut config = ApplicationConfig::load_or_default(cli.config.as_deref())?;
    if cli.verbose {
        config.log.level = "debug".to_string();
    }
    init_logging(&config.log)?;

    match &cli.command {
        Commands::Routes { spec, controller } => {
            let app = build_application(config, spec, controller)?;
            for line in route_lines(app.routes()) {
                println!("{line}");
            }
            Ok(())
        }
        Commands::Match {
            spec,
            controller,
            method,
            url,
        } => {
            let app = build_application(config, spec, controller)?;
            match match_lines(app.routes(), method, url)? {
                Some(lines) => {
                    for line in lines {
                        println!("{line}");
                    }
                    Ok(())
                }
                None => bail!("No route matched {method} {url}"),
            }
        }
    }
}

/// Start an application serving the spec at `spec_path` as class `controller`.
pub fn build_application(config: ApplicationConfig, spec_path: &Path, controller: &str) -> Result<Application> {
    let spec = load_handler_spec(spec_path)?;
    let mut app = Application::new(config);
    let class = app.metadata_mut().define_class(ClassDef::new(controller))?;
    app.metadata_mut().api(class, spec)?;
    app.controller(class, None)?;
    app.start()
        .with_context(|| format!("Failed to load routes from {}", spec_path.display()))?;
    Ok(app)
}

/// One line per route: `GET     /notes/{id} -> NoteController.findById`.
#[must_use]
pub fn route_lines(table: &RoutingTable) -> Vec<String> {
    table
        .routes()
        .iter()
        .map(|entry| format!("{:<7} {} -> {}", entry.verb, entry.path, entry.describe()))
        .collect()
}

/// Route `method url`; `None` when nothing matches.
pub fn match_lines(table: &RoutingTable, method: &str, url: &str) -> Result<Option<Vec<String>>> {
    let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("Invalid HTTP method '{method}'"))?;
    let request = ParsedRequest::from_url(method, url);
    let Some(record) = table.find(&request) else {
        return Ok(None);
    };

    let mut lines = vec![format!("{} {} -> {}", record.verb, record.path_template, record.describe())];
    for (name, value) in &record.path_params {
        lines.push(format!("  path {name} = {value}"));
    }
    let declared = record.operation.parameters().iter();
    for param in declared.filter(|p| p.location != ParameterLocation::Path) {
        if let Some(value) = record.raw_argument(param, &request) {
            lines.push(format!("  {} {} = {value}", param.location, param.name));
        }
    }
    Ok(Some(lines))
}
