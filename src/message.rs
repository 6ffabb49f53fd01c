// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Captured HTTP Message Model
 * Read-only request/response pairs as recorded by the proxy, plus
 * parameter extraction for reflection checks
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use url::Url;

/// Where a request parameter was carried.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ParamOrigin {
    Url,
    Form,
}

/// One request parameter. `Ord` gives the deterministic (name, value, origin)
/// iteration order the reflection checks rely on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Parameter {
    pub name: String,
    pub value: String,
    pub origin: ParamOrigin,
}

/// The request half of a captured exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpRequest {
    pub method: String,
    pub uri: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// First header value matching `name`, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// True when the captured request went over TLS.
    pub fn is_secure(&self) -> bool {
        match Url::parse(&self.uri) {
            Ok(url) => url.scheme().eq_ignore_ascii_case("https"),
            Err(_) => false,
        }
    }
}

/// The response half of a captured exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// First header value matching `name`, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Every value carried under `name`, case-insensitive. Headers like
    /// Cache-Control may legitimately appear more than once.
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

/// One fully-received request/response pair. Immutable for the duration of a
/// detector invocation; detectors never write to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpMessage {
    pub request: HttpRequest,
    pub response: HttpResponse,
}

impl HttpMessage {
    pub fn new(request: HttpRequest, response: HttpResponse) -> Self {
        Self { request, response }
    }

    /// Parameters from the request URI query string.
    pub fn url_params(&self) -> BTreeSet<Parameter> {
        let mut params = BTreeSet::new();
        if let Ok(url) = Url::parse(&self.request.uri) {
            for (name, value) in url.query_pairs() {
                params.insert(Parameter {
                    name: name.into_owned(),
                    value: value.into_owned(),
                    origin: ParamOrigin::Url,
                });
            }
        }
        params
    }

    /// Parameters from an application/x-www-form-urlencoded request body.
    pub fn form_params(&self) -> BTreeSet<Parameter> {
        let mut params = BTreeSet::new();
        let is_form = self
            .request
            .header("content-type")
            .map(|ct| ct.to_lowercase().contains("application/x-www-form-urlencoded"))
            .unwrap_or(false);
        if is_form && !self.request.body.is_empty() {
            for (name, value) in url::form_urlencoded::parse(self.request.body.as_bytes()) {
                params.insert(Parameter {
                    name: name.into_owned(),
                    value: value.into_owned(),
                    origin: ParamOrigin::Form,
                });
            }
        }
        params
    }

    /// URL and form parameters combined, deduplicated by (name, value,
    /// origin) and sorted so iteration is reproducible across runs.
    pub fn all_params(&self) -> BTreeSet<Parameter> {
        let mut params = self.url_params();
        params.extend(self.form_params());
        params
    }
}
