//! Reqwest-based client for the Scaile REST API.

use std::sync::Arc;
use std::time::Instant;

use reqwest::multipart::Form;
use reqwest::{Client, Method, Response};
use serde_json::Value;
use url::Url;

use crate::{
    Annotations, ClientConfig, Error, Filters, Result, Rewards, Storage, TRACING_TARGET,
};

/// Request body variants.
pub(crate) enum Body<'a> {
    Empty,
    Json(&'a Value),
    Multipart(Form),
}

/// Inner client that holds the HTTP client and configuration.
struct ScaileClientInner {
    http: Client,
    base_url: Url,
    config: ClientConfig,
}

/// Client for the Scaile REST API.
///
/// Every request carries the configured API key as a bearer token. Responses
/// with a 2xx status are decoded as JSON (an empty body yields
/// [`Value::Null`]); any other status becomes [`Error::Api`].
///
/// # Examples
///
/// ```rust,ignore
/// use scaile_client::{ClientConfig, ScaileClient};
///
/// let client = ScaileClient::new(ClientConfig::new("api-key"))?;
/// if client.authenticate().await? {
///     let projects = client.projects().await?;
/// }
/// ```
#[derive(Clone)]
pub struct ScaileClient {
    inner: Arc<ScaileClientInner>,
}

impl std::fmt::Debug for ScaileClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScaileClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ScaileClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        let timeout = config.effective_timeout();
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(config.effective_user_agent())
            .build()?;

        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %base_url,
            timeout_ms = timeout.as_millis(),
            "Created API client"
        );

        let inner = ScaileClientInner {
            http,
            base_url,
            config,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Returns the annotation endpoints.
    pub fn annotations(&self) -> Annotations {
        Annotations::new(self.clone())
    }

    /// Returns the storage endpoints.
    pub fn storage(&self) -> Storage {
        Storage::new(self.clone())
    }

    /// Returns the reward endpoints.
    pub fn rewards(&self) -> Rewards {
        Rewards::new(self.clone())
    }

    /// Checks whether the API key is accepted.
    pub async fn authenticate(&self) -> Result<bool> {
        let response = self.get("/auth/validate").await?;
        Ok(response.get("valid").and_then(Value::as_bool).unwrap_or(false))
    }

    /// Lists the projects available to this account.
    pub async fn projects(&self) -> Result<Value> {
        self.get("/projects").await
    }

    /// Creates a project.
    pub async fn create_project(&self, project: &Value) -> Result<Value> {
        self.post("/projects", project).await
    }

    /// Deletes a project.
    pub async fn delete_project(&self, project_id: &str) -> Result<Value> {
        self.send(Method::DELETE, &["projects", project_id], None, Body::Empty)
            .await
    }

    /// Lists the annotations of a project.
    pub async fn project_annotations(&self, project_id: &str) -> Result<Value> {
        self.annotations().list(project_id, None).await
    }

    /// Submits an annotation to a project.
    pub async fn submit_annotation(&self, project_id: &str, annotation: &Value) -> Result<Value> {
        self.annotations().create(project_id, annotation).await
    }

    /// Sends a `GET` request to `path`.
    pub async fn get(&self, path: &str) -> Result<Value> {
        self.send(Method::GET, &split_path(path), None, Body::Empty)
            .await
    }

    /// Sends a `POST` request with a JSON body to `path`.
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.send(Method::POST, &split_path(path), None, Body::Json(body))
            .await
    }

    /// Sends a `PUT` request with a JSON body to `path`.
    pub async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        self.send(Method::PUT, &split_path(path), None, Body::Json(body))
            .await
    }

    /// Sends a `DELETE` request to `path`.
    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.send(Method::DELETE, &split_path(path), None, Body::Empty)
            .await
    }

    /// Builds the URL for the given path segments.
    ///
    /// Segments are percent-encoded, so identifiers cannot escape their
    /// position in the path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a request and decodes the response.
    pub(crate) async fn send(
        &self,
        method: Method,
        segments: &[&str],
        query: Option<&Filters>,
        body: Body<'_>,
    ) -> Result<Value> {
        let url = self.endpoint(segments)?;
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            method = %method,
            url = %url,
            "Sending request"
        );

        let mut request = self
            .inner
            .http
            .request(method.clone(), url.clone())
            .bearer_auth(&self.inner.config.api_key);

        if let Some(query) = query {
            request = request.query(query);
        }

        request = match body {
            Body::Empty => request,
            Body::Json(json) => request.json(json),
            Body::Multipart(form) => request.multipart(form),
        };

        let response = request.send().await.inspect_err(|error| {
            tracing::error!(
                target: TRACING_TARGET,
                method = %method,
                url = %url,
                error = %error,
                "Request failed"
            );
        })?;

        let result = handle_response(response).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(_) => {
                tracing::info!(
                    target: TRACING_TARGET,
                    method = %method,
                    url = %url,
                    elapsed_ms = elapsed.as_millis(),
                    "Successful response"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    method = %method,
                    url = %url,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Error response"
                );
            }
        }

        result
    }
}

/// Splits a slash-separated path into non-empty segments.
fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Decodes a successful response or converts a failed one into [`Error::Api`].
async fn handle_response(response: Response) -> Result<Value> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        return Err(Error::api(status, &String::from_utf8_lossy(&bytes)));
    }

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::test_server::spawn_test_server;

    #[test]
    fn test_rejects_invalid_base_url() {
        let error = ScaileClient::new(ClientConfig::new("key").with_base_url("not a url"));
        assert!(matches!(error, Err(Error::Url(_))));

        let error = ScaileClient::new(ClientConfig::new("key").with_base_url("mailto:a@b.c"));
        assert!(matches!(error, Err(Error::Url(_))));
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let config = ClientConfig::new("key").with_base_url("https://api.example.com/v1/");
        let client = ScaileClient::new(config).unwrap();

        let url = client.endpoint(&["projects", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/projects/a%2Fb%20c");
    }

    #[tokio::test]
    async fn test_sends_bearer_token() {
        let client = spawn_test_server().await;

        let echo = client.get("/projects").await.unwrap();
        assert_eq!(echo["method"], "GET");
        assert_eq!(echo["path"], "/projects");
        assert_eq!(echo["authorization"], "Bearer test-key");
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let client = spawn_test_server().await;

        let echo = client
            .create_project(&json!({"name": "labels"}))
            .await
            .unwrap();
        assert_eq!(echo["method"], "POST");
        assert_eq!(echo["content_type"], "application/json");
        assert_eq!(echo["body"], r#"{"name":"labels"}"#);
    }

    #[tokio::test]
    async fn test_authenticate() {
        let client = spawn_test_server().await;
        assert!(client.authenticate().await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_body_is_null() {
        let client = spawn_test_server().await;
        assert_eq!(client.delete("/empty").await.unwrap(), Value::Null);
    }

    #[tokio::test]
    async fn test_api_error_with_json_message() {
        let client = spawn_test_server().await;

        let error = client.get("/fail/json").await.unwrap_err();
        assert_eq!(error.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(matches!(error, Error::Api { ref message, .. } if message == "bad input"));
    }

    #[tokio::test]
    async fn test_api_error_with_text_body() {
        let client = spawn_test_server().await;

        let error = client.get("/fail/text").await.unwrap_err();
        assert_eq!(error.status(), Some(StatusCode::BAD_GATEWAY));
        assert!(matches!(error, Error::Api { ref message, .. } if message == "upstream down"));
    }
}
