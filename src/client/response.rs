//! The envelope every Reddit HTTP response is turned into.
//!
//! A [`RestResponse`] owns the headers, the raw body text and the parsed JSON
//! tree of a single response, along with any application-level errors Reddit
//! reported under `json.errors`. Typed objects are extracted from it with
//! [`RestResponse::as_thing`] and [`RestResponse::as_listing`].

use std::io::Read;

use log::{debug, warn};
use serde_json::Value;

use super::error::{ApiError, RedditClientError, Result};
use crate::models::listing::Listing;
use crate::models::Thing;

/// Longest body excerpt kept on a parse error.
const RAW_EXCERPT_LEN: usize = 500;
/// How far into the body we look for an HTML doctype.
const DOCTYPE_WINDOW: usize = 20;

#[derive(Debug, Clone)]
pub struct RestResponse {
    status: u16,
    headers: Vec<(String, String)>,
    raw: String,
    json: Value,
    api_errors: Vec<ApiError>,
}

impl RestResponse {
    /// Consume a reqwest response, reading its whole body.
    ///
    /// Taking the response by value means the body stream is drained exactly
    /// once and the connection goes back to the pool whatever the outcome.
    pub async fn from_reqwest(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = response.text().await?;
        debug!("Response status: {}, body length: {} bytes", status, body.len());

        Self::from_body(status, headers, body)
    }

    /// Build an envelope from a status, header pairs and a readable body.
    pub fn from_parts<R: Read>(
        status: u16,
        headers: Vec<(String, String)>,
        mut body: R,
    ) -> Result<Self> {
        let mut raw = String::new();
        body.read_to_string(&mut raw)?;
        Self::from_body(status, headers, raw)
    }

    fn from_body(status: u16, headers: Vec<(String, String)>, raw: String) -> Result<Self> {
        let json = parse_body(&raw)?;
        let api_errors = extract_api_errors(&json);
        if !api_errors.is_empty() {
            warn!("Reddit reported {} API error(s)", api_errors.len());
        }

        Ok(Self {
            status,
            headers,
            raw,
            json,
            api_errors,
        })
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Case-insensitive header lookup; the first match wins.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn json(&self) -> &Value {
        &self.json
    }

    pub fn api_errors(&self) -> &[ApiError] {
        &self.api_errors
    }

    pub fn has_errors(&self) -> bool {
        !self.api_errors.is_empty()
    }

    /// Turn collected API errors into an `Err`, passing clean responses through.
    pub fn error_for_api(self) -> Result<Self> {
        if self.has_errors() {
            Err(RedditClientError::Api(self.api_errors))
        } else {
            Ok(self)
        }
    }

    /// Fail on a non-2xx status, keeping a body excerpt for diagnostics.
    ///
    /// A failing response that carries `json.errors` reports those instead, so
    /// callers get typed [`ApiError`]s whatever the status.
    pub fn error_for_status(self) -> Result<Self> {
        if (200..300).contains(&self.status) {
            Ok(self)
        } else if self.has_errors() {
            Err(RedditClientError::Api(self.api_errors))
        } else {
            Err(RedditClientError::Status {
                status: self.status,
                body: self.raw.chars().take(RAW_EXCERPT_LEN).collect(),
            })
        }
    }

    /// Parse the whole tree as a single thing of type `T`.
    pub fn as_thing<T: Thing>(&self) -> Result<T> {
        T::from_tree(&self.json)
    }

    /// Parse the tree as a listing of `T`.
    pub fn as_listing<T: Thing>(&self) -> Result<Listing<T>> {
        let data = self
            .json
            .get("data")
            .ok_or(RedditClientError::MissingField {
                field: "data",
                variant: "Listing",
            })?;
        Listing::from_json(data)
    }
}

fn parse_body(raw: &str) -> Result<Value> {
    if raw.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(raw).map_err(|source| {
        let excerpt: String = raw
            .chars()
            .filter(|c| *c != '\n' && *c != '\r')
            .take(RAW_EXCERPT_LEN)
            .collect();
        debug!("Unable to parse JSON: {}", excerpt);

        let rate_limit_suspected = looks_like_html(raw);
        if rate_limit_suspected {
            warn!("Received HTML from the Reddit API instead of JSON. Are you making too many requests?");
        }

        RedditClientError::Parse {
            raw: excerpt,
            rate_limit_suspected,
            source,
        }
    })
}

fn looks_like_html(raw: &str) -> bool {
    let head: String = raw.chars().take(DOCTYPE_WINDOW).collect();
    head.to_lowercase().contains("<!doctype")
}

fn extract_api_errors(json: &Value) -> Vec<ApiError> {
    let Some(errors) = json
        .get("json")
        .and_then(|inner| inner.get("errors"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    errors
        .iter()
        .map(|entry| ApiError {
            code: entry.get(0).map(value_text).unwrap_or_default(),
            message: entry.get(1).map(value_text).unwrap_or_default(),
            field: entry.get(2).filter(|v| !v.is_null()).map(value_text),
        })
        .collect()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
