//! In-memory key/value registry with dotted keys (`controllers.NoteController`).
//!
//! The application binds its configuration and every controller here; the
//! host resolves them by key, by `*` pattern or by tag.

use crate::error::RegistryError;
use indexmap::IndexMap;
use std::any::{type_name, Any};
use std::sync::Arc;
use tracing::debug;

type BoundValue = Arc<dyn Any + Send + Sync>;

/// A key, its tags and the value bound to it.
#[derive(Clone)]
pub struct Binding {
    key: String,
    tags: Vec<String>,
    value: Option<BoundValue>,
}

impl Binding {
    fn new(key: String) -> Self {
        Self {
            key,
            tags: Vec::new(),
            value: None,
        }
    }

    /// Attach `value`, replacing any previous one.
    pub fn to<T: Any + Send + Sync>(&mut self, value: T) -> &mut Self {
        self.value = Some(Arc::new(value));
        self
    }

    pub fn tag(&mut self, tag: impl Into<String>) -> &mut Self {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.value.is_some()
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("key", &self.key)
            .field("tags", &self.tags)
            .field("resolved", &self.value.is_some())
            .finish()
    }
}

/// Bindings in bind order.
#[derive(Debug, Clone, Default)]
pub struct Context {
    bindings: IndexMap<String, Binding>,
}

impl Context {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create (or reset) the binding for `key`.
    ///
    /// Rebinding keeps the key's original position.
    pub fn bind(&mut self, key: impl Into<String>) -> &mut Binding {
        let key = key.into();
        debug!(key = %key, "Binding key");
        let binding = self
            .bindings
            .entry(key.clone())
            .or_insert_with(|| Binding::new(key.clone()));
        *binding = Binding::new(key);
        binding
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.bindings.contains_key(key)
    }

    #[must_use]
    pub fn binding(&self, key: &str) -> Option<&Binding> {
        self.bindings.get(key)
    }

    /// Value bound to `key`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotBound`], [`RegistryError::Unresolved`] or
    /// [`RegistryError::TypeMismatch`] when the value is not a `T`.
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Result<Arc<T>, RegistryError> {
        let binding = self
            .bindings
            .get(key)
            .ok_or_else(|| RegistryError::NotBound(key.to_string()))?;
        let value = binding
            .value
            .as_ref()
            .ok_or_else(|| RegistryError::Unresolved(key.to_string()))?;
        Arc::clone(value)
            .downcast::<T>()
            .map_err(|_| RegistryError::TypeMismatch {
                key: key.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Same as [`get`](Self::get); every binding resolves synchronously.
    pub fn get_sync<T: Any + Send + Sync>(&self, key: &str) -> Result<Arc<T>, RegistryError> {
        self.get(key)
    }

    /// Bindings whose key matches `pattern`, in bind order.
    ///
    /// `*` matches any run of characters, so `controllers.*` selects every
    /// controller. A pattern without `*` matches its key exactly.
    #[must_use]
    pub fn find(&self, pattern: &str) -> Vec<&Binding> {
        self.bindings
            .values()
            .filter(|binding| glob_match(pattern, &binding.key))
            .collect()
    }

    #[must_use]
    pub fn find_by_tag(&self, tag: &str) -> Vec<&Binding> {
        self.bindings
            .values()
            .filter(|binding| binding.has_tag(tag))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

fn glob_match(pattern: &str, key: &str) -> bool {
    let mut parts = pattern.split('*');
    let Some(first) = parts.next() else {
        return key.is_empty();
    };
    let Some(mut rest) = key.strip_prefix(first) else {
        return false;
    };
    let mut parts = parts.peekable();
    if parts.peek().is_none() {
        return rest.is_empty();
    }
    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            return rest.ends_with(part);
        }
        match rest.find(part) {
            Some(pos) => rest = &rest[pos + part.len()..],
            None => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Greeter(&'static str);

    #[test]
    fn test_bind_and_get() {
        let mut ctx = Context::new();
        ctx.bind("greeter.en").to(Greeter("hello"));

        let greeter = ctx.get::<Greeter>("greeter.en").unwrap();
        assert_eq!(*greeter, Greeter("hello"));
        assert_eq!(*ctx.get_sync::<Greeter>("greeter.en").unwrap(), Greeter("hello"));
    }

    #[test]
    fn test_get_errors() {
        let mut ctx = Context::new();
        ctx.bind("empty");
        ctx.bind("number").to(42_u32);

        assert_eq!(
            ctx.get::<u32>("missing").unwrap_err(),
            RegistryError::NotBound("missing".to_string())
        );
        assert_eq!(
            ctx.get::<u32>("empty").unwrap_err(),
            RegistryError::Unresolved("empty".to_string())
        );
        assert!(matches!(
            ctx.get::<String>("number").unwrap_err(),
            RegistryError::TypeMismatch { ref key, .. } if key == "number"
        ));
    }

    #[test]
    fn test_find_with_wildcard_keeps_bind_order() {
        let mut ctx = Context::new();
        ctx.bind("controllers.B").to(2_u8);
        ctx.bind("application.config").to(0_u8);
        ctx.bind("controllers.A").to(1_u8);

        let keys: Vec<_> = ctx.find("controllers.*").iter().map(|b| b.key()).collect();
        assert_eq!(keys, ["controllers.B", "controllers.A"]);
        assert_eq!(ctx.find("application.config").len(), 1);
        assert_eq!(ctx.find("application").len(), 0);
        assert_eq!(ctx.find("*").len(), 3);
        assert_eq!(ctx.find("*.A").len(), 1);
    }

    #[test]
    fn test_rebind_resets_value_and_tags() {
        let mut ctx = Context::new();
        ctx.bind("a").to(1_i32).tag("first");
        ctx.bind("b");
        ctx.bind("a").to(2_i32);

        assert_eq!(*ctx.get::<i32>("a").unwrap(), 2);
        assert!(ctx.find_by_tag("first").is_empty());
        assert_eq!(ctx.find("*")[0].key(), "a");
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn test_tags() {
        let mut ctx = Context::new();
        ctx.bind("controllers.Notes").to(()).tag("controller").tag("controller");
        ctx.bind("servers.rest");

        let tagged = ctx.find_by_tag("controller");
        assert_eq!(tagged.len(), 1);
        assert_eq!(tagged[0].tags(), ["controller".to_string()]);
        assert!(tagged[0].is_resolved());
        assert!(!ctx.binding("servers.rest").unwrap().is_resolved());
    }
}
