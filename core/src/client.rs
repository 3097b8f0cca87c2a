//! Client facade for the 3taps search and status API.
//!
//! # Design
//! Every operation is split into a `build_*` method, which validates its
//! inputs and produces an `HttpRequest` without touching the network, and the
//! operation itself, which sends that request through the injected
//! `Transport` exactly once and decodes the body with `parse_response`.
//! Responses are passed through as `serde_json::Value` without reshaping.

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::params::{PostingStatusUpdate, RangeParams, SearchParams, StatusQueryId, SummaryParams};
use crate::request::RequestBuilder;
use crate::validate::{check, FieldKind};

const NEED_QUERY_PARAM: &str = "at least one query parameter is required";

/// Synchronous client for the 3taps API.
///
/// Holds only immutable configuration and the transport, so a shared
/// reference can be used from several threads when the transport allows it.
#[derive(Debug, Clone)]
pub struct Client<T> {
    builder: RequestBuilder,
    transport: T,
}

#[cfg(feature = "ureq")]
impl Client<crate::http::UreqTransport> {
    /// Client for the public origin over a default `ureq` agent.
    pub fn with_defaults() -> Self {
        Self::new(ClientConfig::default(), crate::http::UreqTransport::new())
    }
}

impl<T: Transport> Client<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            builder: RequestBuilder::new(&config),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        self.builder.base_url()
    }

    // -----------------------------------------------------------------------
    // Request building
    // -----------------------------------------------------------------------

    pub fn build_search(&self, params: &SearchParams) -> Result<HttpRequest, ApiError> {
        self.build_search_like("search", "search", params, Vec::new())
    }

    pub fn build_count(&self, params: &SearchParams) -> Result<HttpRequest, ApiError> {
        self.build_search_like("count", "search/count", params, Vec::new())
    }

    pub fn build_best_match(&self, keyword: &str) -> Result<HttpRequest, ApiError> {
        if keyword.is_empty() {
            return Err(ApiError::MissingParameter {
                operation: "best_match",
                detail: "a keyword is required",
            });
        }
        Ok(self.builder.get("search/best-match", &[("keywords", keyword)]))
    }

    pub fn build_range(&self, params: &RangeParams) -> Result<HttpRequest, ApiError> {
        check("fields", FieldKind::List, &params.fields)?;
        self.build_search_like(
            "range",
            "search/range",
            &params.search,
            vec![("fields", params.fields.clone())],
        )
    }

    pub fn build_summary(&self, params: &SummaryParams) -> Result<HttpRequest, ApiError> {
        self.build_search_like(
            "summary",
            "search/summary",
            &params.search,
            vec![("dimension", params.dimension.as_str().to_string())],
        )
    }

    pub fn build_update_status(
        &self,
        postings: &[PostingStatusUpdate],
    ) -> Result<HttpRequest, ApiError> {
        if postings.is_empty() {
            return Err(ApiError::MissingParameter {
                operation: "update_status",
                detail: "at least one posting is required",
            });
        }
        for posting in postings {
            posting.validate()?;
        }
        self.builder.post("status/update", postings)
    }

    pub fn build_get_status(&self, ids: &[StatusQueryId]) -> Result<HttpRequest, ApiError> {
        if ids.is_empty() {
            return Err(ApiError::MissingParameter {
                operation: "get_status",
                detail: "at least one posting id is required",
            });
        }
        for id in ids {
            id.validate()?;
        }
        self.builder.post("status/get", ids)
    }

    pub fn build_system_status(&self) -> HttpRequest {
        self.builder.get::<&str, &str>("status/system", &[])
    }

    /// Shared pre-flight for the search family: at least one filter, every
    /// filter valid, then the endpoint's own required pair appended.
    fn build_search_like(
        &self,
        operation: &'static str,
        path: &str,
        params: &SearchParams,
        required: Vec<(&'static str, String)>,
    ) -> Result<HttpRequest, ApiError> {
        if params.is_empty() {
            return Err(ApiError::MissingParameter {
                operation,
                detail: NEED_QUERY_PARAM,
            });
        }
        params.validate()?;
        let mut pairs = params.query_pairs();
        pairs.extend(required);
        Ok(self.builder.get(path, pairs.as_slice()))
    }

    // -----------------------------------------------------------------------
    // Response parsing
    // -----------------------------------------------------------------------

    /// Decode a response body, mapping non-2xx statuses to `RequestFailed`.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, ApiError> {
        if !response.is_success() {
            tracing::warn!(
                status = response.status,
                status_text = %response.status_text,
                "3taps request failed"
            );
            return Err(ApiError::RequestFailed {
                status: response.status,
                status_text: response.status_text,
                body: response.body,
            });
        }
        serde_json::from_str(&response.body).map_err(|e| {
            tracing::warn!(error = %e, "3taps response is not valid JSON");
            ApiError::ResponseDecode(e.to_string())
        })
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    pub fn search(&self, params: &SearchParams) -> Result<Value, ApiError> {
        self.send(self.build_search(params)?)
    }

    pub fn count(&self, params: &SearchParams) -> Result<Value, ApiError> {
        self.send(self.build_count(params)?)
    }

    pub fn best_match(&self, keyword: &str) -> Result<Value, ApiError> {
        self.send(self.build_best_match(keyword)?)
    }

    pub fn range(&self, params: &RangeParams) -> Result<Value, ApiError> {
        self.send(self.build_range(params)?)
    }

    pub fn summary(&self, params: &SummaryParams) -> Result<Value, ApiError> {
        self.send(self.build_summary(params)?)
    }

    pub fn update_status(&self, postings: &[PostingStatusUpdate]) -> Result<Value, ApiError> {
        self.send(self.build_update_status(postings)?)
    }

    pub fn get_status(&self, ids: &[StatusQueryId]) -> Result<Value, ApiError> {
        self.send(self.build_get_status(ids)?)
    }

    pub fn system_status(&self) -> Result<Value, ApiError> {
        self.send(self.build_system_status())
    }

    fn send(&self, request: HttpRequest) -> Result<Value, ApiError> {
        tracing::debug!(method = request.method.as_str(), url = %request.url, "sending 3taps request");
        let response = self.transport.execute(&request)?;
        self.parse_response(response)
    }
}
