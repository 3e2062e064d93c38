//! Path normalization and template matching.

use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Maximum number of path parameters before heap allocation.
/// Most REST APIs have ≤4 path params (e.g., /users/{id}/posts/{postId}).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated path parameter storage for the lookup path.
///
/// Param names use `Arc<str>`: they come from the compiled templates and are
/// shared by every match. Values are per-request data from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Join `base` and `path` into a normalized absolute path.
///
/// Runs of slashes collapse into one, the trailing slash is dropped and the
/// result always starts with exactly one `/`. An empty result is `/`.
///
/// ```rust
/// use ctrlrouter::router::join_path;
///
/// assert_eq!(join_path("root//x", "//a///b////c"), "/root/x/a/b/c");
/// assert_eq!(join_path("/root/", "/"), "/root");
/// assert_eq!(join_path("", ""), "/");
/// ```
#[must_use]
pub fn join_path(base: &str, path: &str) -> String {
    let mut joined = String::with_capacity(base.len() + path.len() + 1);
    for segment in base
        .split('/')
        .chain(path.split('/'))
        .filter(|s| !s.is_empty())
    {
        joined.push('/');
        joined.push_str(segment);
    }
    if joined.is_empty() {
        joined.push('/');
    }
    joined
}

/// One segment of a compiled path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the request segment byte for byte.
    Static(Box<str>),
    /// `{name}`: binds the request segment to `name`.
    Capture(Arc<str>),
}

/// A compiled path template such as `/users/{id}/posts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    template: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Compile `template`, normalizing it first.
    #[must_use]
    pub fn compile(template: &str) -> Self {
        let template = join_path("", template);
        let segments = template
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|segment| match capture_name(segment) {
                Some(name) => Segment::Capture(Arc::from(name)),
                None => Segment::Static(Box::from(segment)),
            })
            .collect();
        Self { template, segments }
    }

    /// Match a normalized request path, returning the bound captures in
    /// template order.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<ParamVec> {
        let mut params = ParamVec::new();
        let mut parts = path.split('/').filter(|s| !s.is_empty());
        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Static(expected) => {
                    if expected.as_ref() != part {
                        return None;
                    }
                }
                Segment::Capture(name) => params.push((Arc::clone(name), part.to_string())),
            }
        }
        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }

    /// Names of the capture segments, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Capture(name) => Some(name.as_ref()),
            Segment::Static(_) => None,
        })
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.template
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

fn capture_name(segment: &str) -> Option<&str> {
    segment
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .filter(|name| !name.is_empty())
}
