//! Building a search-engine request one parameter at a time.
//!
//! A search request carries nine parameters. Passing them all to a constructor
//! is unwieldy, so `SearchRequestBuilder` collects them through chained
//! setters and validates the mandatory `query` once, in `build`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("missing required field: '{field}'")]
    MissingField { field: &'static str },
}

// =============================================================================
// Milestone 1: The immutable product
// =============================================================================

/// Only `SearchRequestBuilder` can create one; there are no setters.
///
/// There is no `Default` and the fields are private, so this does not compile:
///
/// ```compile_fail
/// use creational_patterns::builder::SearchRequest;
///
/// let request = SearchRequest::default();
/// ```
///
/// ```compile_fail
/// use creational_patterns::builder::SearchRequest;
///
/// let request = SearchRequest {
///     query: String::new(),
///     count: 0,
///     page: 0,
///     user_agent: String::new(),
///     timeout_ms: 0,
///     src: String::new(),
///     ip: String::new(),
///     correct: false,
///     refer: String::new(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    count: i64,
    page: i64,
    user_agent: String,
    timeout_ms: i64,
    src: String,
    ip: String,
    correct: bool,
    refer: String,
}

impl SearchRequest {
    pub fn builder() -> SearchRequestBuilder {
        SearchRequestBuilder::new()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn timeout_ms(&self) -> i64 {
        self.timeout_ms
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn correct(&self) -> bool {
        self.correct
    }

    pub fn refer(&self) -> &str {
        &self.refer
    }

    pub fn summary(&self) -> String {
        format!(
            "Start Search ...\nQuery: {}\nCount: {}\nPage: {}\nSearch Success ...",
            self.query, self.count, self.page
        )
    }

    /// Pretends to send the request. Nothing leaves the process.
    pub fn search(&self) {
        for line in self.summary().lines() {
            tracing::info!(query = %self.query, "{line}");
        }
    }
}

// =============================================================================
// Milestone 2: Consuming builder with build-time validation
// =============================================================================

/// Setters take `self` by value, so a chain never aliases a half-built
/// request and `build` leaves nothing behind to reuse.
///
/// Not synchronized: share it across threads by moving it, not by reference.
#[must_use = "a builder does nothing unless you call `.build()`"]
#[derive(Debug, Clone, Default)]
pub struct SearchRequestBuilder {
    query: String,
    count: i64,
    page: i64,
    user_agent: String,
    timeout_ms: i64,
    src: String,
    ip: String,
    correct: bool,
    refer: String,
}

impl SearchRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn count(mut self, count: i64) -> Self {
        self.count = count;
        self
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: i64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn src(mut self, src: impl Into<String>) -> Self {
        self.src = src.into();
        self
    }

    pub fn ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = ip.into();
        self
    }

    pub fn correct(mut self, correct: bool) -> Self {
        self.correct = correct;
        self
    }

    pub fn refer(mut self, refer: impl Into<String>) -> Self {
        self.refer = refer.into();
        self
    }

    /// Only `query`, `count` and `page` reach the request; the other six
    /// parameters are accepted and dropped.
    pub fn try_build(self) -> Result<SearchRequest, BuildError> {
        if self.query.is_empty() {
            return Err(BuildError::MissingField { field: "query" });
        }

        tracing::debug!(
            query = %self.query,
            count = self.count,
            page = self.page,
            "search request built"
        );

        Ok(SearchRequest {
            query: self.query,
            count: self.count,
            page: self.page,
            user_agent: String::new(),
            timeout_ms: 0,
            src: String::new(),
            ip: String::new(),
            correct: false,
            refer: String::new(),
        })
    }

    /// Panics when `query` is empty. Missing it is a bug at the call site.
    pub fn build(self) -> SearchRequest {
        match self.try_build() {
            Ok(request) => request,
            Err(err) => panic!("{err}"),
        }
    }
}
