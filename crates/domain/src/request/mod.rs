//! Request descriptor types
//!
//! A [`FetchRequest`] describes one HTTP call declaratively: where it
//! goes, what it carries, and how the fetch layer should trigger it.
//! Resolving a descriptor yields an [`HttpRequest`] ready for a
//! transport to execute.

mod method;
mod url;

pub use method::HttpMethod;
pub use url::build_url;

use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// Declarative description of a single HTTP request.
///
/// Immutable per invocation; the fetch layer merges [`FetchOverrides`]
/// into a copy rather than mutating the original. `deps` is the
/// caller-supplied dependency list: a change in it re-triggers an
/// automatic fetch. `skip` suppresses automatic fetches entirely and
/// `auto` decides whether dependency changes dispatch on their own.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    /// Base URL of the API, e.g. `https://api.pitchside.app`.
    pub base_url: String,
    /// Path relative to the base URL. May embed query pairs.
    pub path: String,
    /// Query parameters, set last-write-wins over pairs in `path`.
    pub query: Vec<(String, String)>,
    /// HTTP method.
    pub method: HttpMethod,
    /// Optional JSON request body.
    pub body: Option<Value>,
    /// Extra request headers.
    pub headers: Vec<(String, String)>,
    /// Dependency list; a change re-triggers an automatic fetch.
    pub deps: Vec<String>,
    /// When true, automatic fetches are suppressed.
    pub skip: bool,
    /// When false, dependency changes do not dispatch on their own.
    pub auto: bool,
}

impl FetchRequest {
    /// Creates a GET descriptor for the given base URL and path.
    #[must_use]
    pub fn new(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
            query: Vec::new(),
            method: HttpMethod::default(),
            body: None,
            headers: Vec::new(),
            deps: Vec::new(),
            skip: false,
            auto: true,
        }
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Appends a request header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the dependency list.
    #[must_use]
    pub fn with_deps(mut self, deps: Vec<String>) -> Self {
        self.deps = deps;
        self
    }

    /// Suppresses automatic fetches for this descriptor.
    #[must_use]
    pub const fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }

    /// Disables automatic dispatch on dependency change.
    #[must_use]
    pub const fn manual(mut self) -> Self {
        self.auto = false;
        self
    }

    /// Returns a copy with the override fields shallow-merged in.
    ///
    /// Unset override fields keep the descriptor's values; the original
    /// descriptor is not mutated.
    #[must_use]
    pub fn merged(&self, overrides: FetchOverrides) -> Self {
        let mut merged = self.clone();
        if let Some(path) = overrides.path {
            merged.path = path;
        }
        if let Some(query) = overrides.query {
            merged.query = query;
        }
        if let Some(method) = overrides.method {
            merged.method = method;
        }
        if let Some(body) = overrides.body {
            merged.body = Some(body);
        }
        if let Some(headers) = overrides.headers {
            merged.headers = headers;
        }
        merged
    }

    /// Resolves the descriptor into an executable [`HttpRequest`].
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRequest`] if the base URL is empty,
    /// or [`DomainError::InvalidUrl`] if the combined URL does not parse.
    pub fn resolve(&self) -> DomainResult<HttpRequest> {
        if self.base_url.is_empty() {
            return Err(DomainError::InvalidRequest("empty base URL".to_string()));
        }
        let url = build_url(&self.base_url, &self.path, &self.query)?;
        Ok(HttpRequest {
            url,
            method: self.method,
            headers: self.headers.clone(),
            body: self.body.clone(),
        })
    }
}

/// Shallow overrides applied to a [`FetchRequest`] on refetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOverrides {
    /// Replacement path.
    pub path: Option<String>,
    /// Replacement query parameters.
    pub query: Option<Vec<(String, String)>>,
    /// Replacement HTTP method.
    pub method: Option<HttpMethod>,
    /// Replacement JSON body.
    pub body: Option<Value>,
    /// Replacement headers.
    pub headers: Option<Vec<(String, String)>>,
}

impl FetchOverrides {
    /// Overrides carrying only replacement query parameters.
    #[must_use]
    pub fn query(query: Vec<(String, String)>) -> Self {
        Self {
            query: Some(query),
            ..Self::default()
        }
    }
}

/// A fully resolved HTTP request ready for a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Absolute request URL including query string.
    pub url: ::url::Url,
    /// HTTP method.
    pub method: HttpMethod,
    /// Request headers.
    pub headers: Vec<(String, String)>,
    /// Optional JSON body.
    pub body: Option<Value>,
}
