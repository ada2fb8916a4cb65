//! Test request description and the outcome handed back to scenarios

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// One HTTP call plus the status code it is expected to return.
#[derive(Debug)]
pub struct TestRequest {
    name: String,
    method: Method,
    endpoint: String,
    expected_status: u16,
    query: Vec<(String, String)>,
    body: Option<Result<Value, serde_json::Error>>,
}

impl TestRequest {
    pub fn new(
        name: impl Into<String>,
        method: Method,
        endpoint: impl Into<String>,
        expected_status: u16,
    ) -> Self {
        Self {
            name: name.into(),
            method,
            endpoint: endpoint.into(),
            expected_status,
            query: Vec::new(),
            body: None,
        }
    }

    /// GET expecting 200
    pub fn get(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::new(name, Method::GET, endpoint, 200)
    }

    /// POST expecting 200
    pub fn post(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::new(name, Method::POST, endpoint, 200)
    }

    pub fn expect_status(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body. An encoding error is kept and surfaces as a failed
    /// test when the request is run.
    pub fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> Self {
        self.body = Some(serde_json::to_value(payload));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn expected_status(&self) -> u16 {
        self.expected_status
    }

    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    pub(crate) fn into_body(self) -> Option<Result<Value, serde_json::Error>> {
        self.body
    }
}

/// Result of one test request: the pass flag and the decoded body.
///
/// The body is the parsed JSON on success, or an empty object whenever the
/// request failed or the response was not JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct TestOutcome {
    pub success: bool,
    pub body: Value,
}

impl TestOutcome {
    pub fn passed(body: Value) -> Self {
        Self {
            success: true,
            body,
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            body: empty_body(),
        }
    }

    /// Number of items in the body: array length or object key count
    pub fn len(&self) -> usize {
        match &self.body {
            Value::Array(items) => items.len(),
            Value::Object(fields) => fields.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode every row of an array body that matches `T`.
    ///
    /// Rows of the wrong shape are skipped with a warning; a non-array body
    /// yields no records, which scenarios treat like an empty listing.
    pub fn records<T: DeserializeOwned>(&self) -> Vec<T> {
        (0..self.body.as_array().map_or(0, Vec::len))
            .filter_map(|index| self.record_at(index))
            .collect()
    }

    /// Decode only the item at `index` of an array body.
    ///
    /// Other rows are never looked at, so a malformed row elsewhere in the
    /// listing does not hide a usable one.
    pub fn record_at<T: DeserializeOwned>(&self, index: usize) -> Option<T> {
        let item = self.body.as_array()?.get(index)?;
        match <T as serde::Deserialize>::deserialize(item) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Response item {} does not match the expected shape: {}", index, e);
                None
            }
        }
    }

    /// Decode the whole body as a single record
    pub fn decode<T: DeserializeOwned>(&self) -> Option<T> {
        serde_json::from_value(self.body.clone()).ok()
    }
}

/// Parse a response body, falling back to an empty object
pub fn parse_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| empty_body())
}

fn empty_body() -> Value {
    Value::Object(Map::new())
}
