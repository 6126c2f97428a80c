/// HTTP testing utilities
use anyhow::Result;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use pm25api::dataset::SharedStore;
use pm25api::config::Pm25Config;
use pm25api::http::server::{app, app_router};
use pm25api::test_utils::state_with;
use tower::ServiceExt; // for `oneshot` and `ready`

/// HTTP test client for making requests to our app
pub struct TestApp {
    app: axum::Router,
}

impl TestApp {
    /// Create a new test app serving the provided store
    pub fn new(store: SharedStore) -> Self {
        // Routes only, `with_config` adds the transport middleware
        let app = app_router(state_with(store));
        Self { app }
    }

    /// Create a test app behind the transport middleware built from `config`
    #[allow(dead_code)] // Test helper method
    pub fn with_config(store: SharedStore, config: &Pm25Config) -> Result<Self> {
        let app = app(state_with(store), config)?;
        Ok(Self { app })
    }

    /// Send a GET request with extra headers
    #[allow(dead_code)] // Test helper method
    pub async fn get_with_headers(
        &self,
        path: &str,
        headers: &[(&str, &str)],
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method("GET").uri(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let response = self.app.clone().oneshot(builder.body(Body::empty())?).await?;
        Ok(TestResponse::new(response).await)
    }

    /// Send a GET request
    pub async fn get(&self, path: &str) -> Result<TestResponse> {
        self.send("GET", path, None).await
    }

    /// Send a POST request with JSON data
    pub async fn post_json(&self, path: &str, json_data: &str) -> Result<TestResponse> {
        self.send("POST", path, Some(json_data)).await
    }

    /// Send a PUT request with JSON data
    pub async fn put_json(&self, path: &str, json_data: &str) -> Result<TestResponse> {
        self.send("PUT", path, Some(json_data)).await
    }

    /// Send a DELETE request
    pub async fn delete(&self, path: &str) -> Result<TestResponse> {
        self.send("DELETE", path, None).await
    }

    async fn send(&self, method: &str, path: &str, json: Option<&str>) -> Result<TestResponse> {
        let builder = Request::builder().method(method).uri(path);
        let request = match json {
            Some(json_data) => builder
                .header("content-type", "application/json")
                .body(Body::from(json_data.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.app.clone().oneshot(request).await?;
        Ok(TestResponse::new(response).await)
    }
}

/// Test response wrapper for easier assertions
pub struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl TestResponse {
    async fn new(response: axum::response::Response) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default()
            .to_vec();
        let body = String::from_utf8_lossy(&body_bytes).to_string();

        Self {
            status,
            headers,
            body,
        }
    }

    /// Get response status
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get a response header as string
    #[allow(dead_code)] // Test helper method
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get response body as string
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parse response body as JSON
    pub fn json<T>(&self) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_str(&self.body).map_err(Into::into)
    }

    /// Assert status code
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status, expected,
            "Expected status {}, got {}. Body: {}",
            expected, self.status, self.body
        );
        self
    }

    /// Assert the `detail` field of an error body
    pub fn assert_detail(&self, expected: &str) -> &Self {
        let value: serde_json::Value = self.json().unwrap_or_default();
        assert_eq!(
            value["detail"], expected,
            "Unexpected error detail. Body: {}",
            self.body
        );
        self
    }

    /// Assert content-type header
    pub fn assert_content_type(&self, expected: &str) -> &Self {
        let actual = self
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("<missing>");
        assert_eq!(
            actual, expected,
            "Expected content-type '{}', but was '{}'",
            expected, actual
        );
        self
    }
}
