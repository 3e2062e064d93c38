use http::request::Parts;
use http::Method;
use serde_json::Value;
use smallvec::SmallVec;
use std::sync::Arc;

/// Maximum inline headers/cookies/query pairs before heap allocation.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Name/value pairs of a request; names are shared `Arc<str>`.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Transport-independent view of an incoming request.
///
/// Header names are stored lowercase; query values are percent-decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequest {
    pub method: Method,
    /// Request path without the query string.
    pub path: String,
    pub query: HeaderVec,
    pub headers: HeaderVec,
    pub cookies: HeaderVec,
    /// JSON body, when the transport decoded one.
    pub body: Option<Value>,
}

impl ParsedRequest {
    /// Request for `path` without query, headers or body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: HeaderVec::new(),
            headers: HeaderVec::new(),
            cookies: HeaderVec::new(),
            body: None,
        }
    }

    /// Split `url` (`/path?query`) into path and decoded query pairs.
    #[must_use]
    pub fn from_url(method: Method, url: &str) -> Self {
        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, parse_query_params(query)),
            None => (url, HeaderVec::new()),
        };
        Self {
            query,
            ..Self::new(method, path)
        }
    }

    /// Build from `http` request parts, parsing query and cookies.
    #[must_use]
    pub fn from_http_parts(parts: &Parts, body: Option<Value>) -> Self {
        let headers: HeaderVec = parts
            .headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (Arc::from(name.as_str()), v.to_string()))
            })
            .collect();
        let cookies = parse_cookies(&headers);
        Self {
            method: parts.method.clone(),
            path: parts.uri.path().to_string(),
            query: parts.uri.query().map(parse_query_params).unwrap_or_default(),
            headers,
            cookies,
            body,
        }
    }

    #[must_use]
    pub fn with_query(mut self, name: &str, value: impl Into<String>) -> Self {
        self.query.push((Arc::from(name), value.into()));
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        if name.eq_ignore_ascii_case("cookie") {
            self.cookies.extend(parse_cookie_header(&value));
        }
        self.headers.push((Arc::from(name.to_ascii_lowercase()), value));
        self
    }

    #[must_use]
    pub fn with_cookie(mut self, name: &str, value: impl Into<String>) -> Self {
        self.cookies.push((Arc::from(name), value.into()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Last occurrence wins for repeated names (`?limit=10&limit=20`).
    #[inline]
    #[must_use]
    pub fn get_query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Case-insensitive per RFC 7230.
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    #[must_use]
    pub fn get_cookie(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Decode `a=1&b=x%20y` into pairs.
#[must_use]
pub fn parse_query_params(query: &str) -> HeaderVec {
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (Arc::from(k.as_ref()), v.into_owned()))
        .collect()
}

/// Pairs from every `cookie` header.
#[must_use]
pub fn parse_cookies(headers: &HeaderVec) -> HeaderVec {
    headers
        .iter()
        .filter(|(name, _)| name.eq_ignore_ascii_case("cookie"))
        .flat_map(|(_, value)| parse_cookie_header(value))
        .collect()
}

/// `name=value` pairs of one `Cookie` header value; nameless pairs are dropped.
fn parse_cookie_header(value: &str) -> impl Iterator<Item = (Arc<str>, String)> + '_ {
    value.split(';').filter_map(|pair| {
        let mut parts = pair.trim().splitn(2, '=');
        let name = parts.next()?.trim();
        if name.is_empty() {
            return None;
        }
        let value = parts.next().unwrap_or_default().trim();
        Some((Arc::from(name), value.to_string()))
    })
}
