//! Turns an endpoint path and already-validated parameters into an
//! `HttpRequest`.
//!
//! GET parameters travel in the query string. POST payloads are JSON-encoded
//! into a single form field named `data`, followed by `agentID` and `authID`
//! when credentials are configured.

use serde::Serialize;
use url::form_urlencoded;

use crate::config::{ClientConfig, Credentials};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: String,
    credentials: Option<Credentials>,
}

impl RequestBuilder {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials: config.credentials(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `<base>/<path>?<pairs>`. No `?` is appended when `pairs` is empty.
    pub fn get<K, V>(&self, path: &str, pairs: &[(K, V)]) -> HttpRequest
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut url = self.endpoint(path);
        if !pairs.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))
                .finish();
            url.push('?');
            url.push_str(&query);
        }
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// POST a form body whose `data` field is `payload` as JSON.
    pub fn post<P: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &P,
    ) -> Result<HttpRequest, ApiError> {
        let data =
            serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;

        let mut form = form_urlencoded::Serializer::new(String::new());
        form.append_pair("data", &data);
        if let Some(credentials) = &self.credentials {
            form.append_pair("agentID", &credentials.agent_id);
            form.append_pair("authID", &credentials.auth_id);
        }

        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.endpoint(path),
            headers: vec![("content-type".to_string(), FORM_CONTENT_TYPE.to_string())],
            body: Some(form.finish()),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
