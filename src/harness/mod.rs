//! HTTP assertion harness
//!
//! `ApiTester` owns the run state (counters, optional bearer token, the
//! reference date) and is the only thing that mutates it. Each call to
//! [`ApiTester::run_test`] issues exactly one request, prints a pass/fail
//! line, and hands the decoded body back to the calling scenario.
//!
//! Requests are awaited one at a time; nothing is retried or cached.

use std::time::{Duration, Instant};

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;

use crate::config::HarnessConfig;

mod errors;
mod request;

pub use errors::RequestFailure;
pub use request::{parse_body, TestOutcome, TestRequest};

pub struct ApiTester {
    client: Client,
    base_url: String,
    token: Option<String>,
    tests_run: usize,
    tests_passed: usize,
    current_date: String,
}

impl ApiTester {
    /// Build a tester from validated configuration.
    pub fn new(config: &HarnessConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let mut tester = Self::with_client(builder.build()?, config.normalized_base_url());
        tester.token = config.token.clone();
        Ok(tester)
    }

    /// Tester with a default HTTP client and no credential.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            tests_run: 0,
            tests_passed: 0,
            current_date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        }
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Date (`YYYY-MM-DD`) fixed when the tester was created
    pub fn current_date(&self) -> &str {
        &self.current_date
    }

    pub fn tests_run(&self) -> usize {
        self.tests_run
    }

    pub fn tests_passed(&self) -> usize {
        self.tests_passed
    }

    pub fn all_passed(&self) -> bool {
        self.tests_passed == self.tests_run
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Run a single API test.
    ///
    /// Always counts the test, never returns an error: status mismatches and
    /// transport failures are printed and come back as a failed outcome with
    /// an empty body.
    pub async fn run_test(&mut self, request: TestRequest) -> TestOutcome {
        self.tests_run += 1;
        println!("\n🔍 Testing {}...", request.name());

        let expected = request.expected_status();
        match self.send(request).await {
            Ok((status, body)) => {
                self.tests_passed += 1;
                println!("✅ Passed - Status: {}", status);
                TestOutcome::passed(body)
            }
            Err(failure) => {
                println!("❌ Failed - {}", failure);
                if let Some(body) = failure.response_body() {
                    println!("Response: {}", body);
                }
                log::debug!("Test failed (expected status {}): {:?}", expected, failure);
                TestOutcome::failed()
            }
        }
    }

    async fn send(&self, request: TestRequest) -> Result<(u16, Value), RequestFailure> {
        let url = self.endpoint_url(request.endpoint());
        let method: Method = request.method().clone();
        let expected = request.expected_status();

        let mut builder = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if !request.query_params().is_empty() {
            builder = builder.query(request.query_params());
        }
        if let Some(body) = request.into_body() {
            builder = builder.json(&body?);
        }

        let started = Instant::now();
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        log::debug!(
            "{} {} -> {} in {:.3}ms",
            method,
            url,
            status,
            started.elapsed().as_secs_f64() * 1000.0
        );

        if status != expected {
            return Err(RequestFailure::StatusMismatch {
                expected,
                actual: status,
                body: text,
            });
        }

        Ok((status, parse_body(&text)))
    }
}
