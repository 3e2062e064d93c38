//! Application bootstrap: owns the metadata registry, the resolver, the
//! routing table and the key/value [`Context`], and wires them together.
//!
//! ```rust
//! use ctrlrouter::application::Application;
//! use ctrlrouter::config::ApplicationConfig;
//! use ctrlrouter::dispatcher::ParsedRequest;
//! use ctrlrouter::metadata::ClassDef;
//! use http::Method;
//!
//! let mut app = Application::new(ApplicationConfig::default());
//! let class = app
//!     .metadata_mut()
//!     .define_class(ClassDef::new("PingController").method("ping", []))
//!     .unwrap();
//! app.metadata_mut().get(class, "ping", "/ping", None).unwrap();
//! app.controller(class, None).unwrap();
//! app.start().unwrap();
//!
//! let record = app.find(&ParsedRequest::new(Method::GET, "/ping")).unwrap();
//! assert_eq!(record.describe(), "PingController.ping");
//! ```

use crate::config::ApplicationConfig;
use crate::dispatcher::{Dispatcher, Invoker, ParsedRequest, RouteRecord};
use crate::metadata::{ClassId, ControllerRef, MetadataRegistry};
use crate::registry::Context;
use crate::resolver::MetadataResolver;
use crate::router::RoutingTable;
use crate::spec::HandlerSpec;
use anyhow::{Context as _, Result};
use indexmap::IndexSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Registry key of the application configuration.
pub const CONFIG_KEY: &str = "application.config";

/// Key prefix of controller bindings.
pub const CONTROLLERS_PREFIX: &str = "controllers.";

/// Tag carried by every controller binding.
pub const CONTROLLER_TAG: &str = "controller";

pub struct Application {
    config: Arc<ApplicationConfig>,
    metadata: MetadataRegistry,
    resolver: MetadataResolver,
    routes: RoutingTable,
    context: Context,
    registered: IndexSet<ClassId>,
}

impl Application {
    /// Create an application and bind `config` at [`CONFIG_KEY`].
    #[must_use]
    pub fn new(config: ApplicationConfig) -> Self {
        let mut context = Context::new();
        context.bind(CONFIG_KEY).to(config.clone());
        Self {
            config: Arc::new(config),
            metadata: MetadataRegistry::new(),
            resolver: MetadataResolver::new(),
            routes: RoutingTable::new(),
            context,
            registered: IndexSet::new(),
        }
    }

    /// Bind `class` at `controllers.<name>`, tagged `controller`.
    ///
    /// `name` defaults to the class name. Returns the binding key. Routes are
    /// registered by [`start`](Self::start).
    pub fn controller(&mut self, class: ClassId, name: Option<&str>) -> Result<String> {
        let controller = self
            .metadata
            .controller_ref(class)
            .context("Cannot bind an undefined controller class")?;
        let name = name.map_or_else(|| controller.name.to_string(), str::to_string);
        let key = format!("{CONTROLLERS_PREFIX}{name}");

        self.context
            .bind(key.clone())
            .to(controller)
            .tag(CONTROLLER_TAG);
        info!(key = %key, "Controller bound");
        Ok(key)
    }

    /// Resolve and register every bound controller, in bind order.
    ///
    /// Controllers already registered by an earlier call are skipped. Returns
    /// the number of routes added.
    pub fn start(&mut self) -> Result<usize> {
        let mut controllers: Vec<ControllerRef> = Vec::new();
        for binding in self.context.find(&format!("{CONTROLLERS_PREFIX}*")) {
            match self.context.get::<ControllerRef>(binding.key()) {
                Ok(controller) => controllers.push(controller.as_ref().clone()),
                Err(err) => warn!(key = %binding.key(), error = %err, "Skipping binding that is not a controller"),
            }
        }

        let prefix = self.config.rest.base_path.as_deref().unwrap_or_default();
        let mut added = 0;
        for controller in controllers {
            if self.registered.contains(&controller.id) {
                debug!(controller = %controller, "Controller already registered");
                continue;
            }
            let spec = self
                .resolver
                .resolve(&self.metadata, controller.id)
                .with_context(|| format!("Failed to resolve the spec of {controller}"))?;
            added += self
                .routes
                .register_controller_at(prefix, &controller, &spec)
                .with_context(|| format!("Failed to register the routes of {controller}"))?;
            self.registered.insert(controller.id);
        }

        info!(
            controllers_count = self.registered.len(),
            routes_added = added,
            routes_count = self.routes.len(),
            "Application started"
        );
        if self.config.rest.dump_routes_on_start {
            self.routes.dump_routes();
        }
        Ok(added)
    }

    /// Route a request.
    #[must_use]
    pub fn find(&self, request: &ParsedRequest) -> Option<RouteRecord> {
        self.routes.find(request)
    }

    /// Dispatcher over this application's routes.
    pub fn dispatcher<I: Invoker>(&self, invoker: I) -> Dispatcher<'_, I> {
        Dispatcher::new(&self.routes, invoker)
    }

    /// Spec of the whole application: the merged paths of every registered
    /// route and the component schemas of every registered controller.
    #[must_use]
    pub fn api_spec(&self) -> HandlerSpec {
        let mut spec = HandlerSpec {
            paths: self.routes.describe_api_paths(),
            ..HandlerSpec::default()
        };
        for class in &self.registered {
            let Some(components) = self.resolver.cached(*class).and_then(|s| s.components.clone()) else {
                continue;
            };
            spec.schemas_mut().extend(components.schemas);
        }
        spec
    }

    #[must_use]
    pub fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    #[must_use]
    pub fn metadata(&self) -> &MetadataRegistry {
        &self.metadata
    }

    /// Metadata recording surface; changes after [`start`](Self::start) only
    /// affect controllers not yet registered.
    pub fn metadata_mut(&mut self) -> &mut MetadataRegistry {
        &mut self.metadata
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    #[must_use]
    pub fn routes(&self) -> &RoutingTable {
        &self.routes
    }
}
