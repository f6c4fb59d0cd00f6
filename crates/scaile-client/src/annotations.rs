//! Annotation endpoints.

use reqwest::Method;
use serde_json::Value;

use crate::client::Body;
use crate::{Filters, Result, ScaileClient};

/// Create, read, update and delete annotations of a project.
#[derive(Debug, Clone)]
pub struct Annotations {
    client: ScaileClient,
}

impl Annotations {
    pub(crate) fn new(client: ScaileClient) -> Self {
        Self { client }
    }

    /// Creates an annotation.
    pub async fn create(&self, project_id: &str, annotation: &Value) -> Result<Value> {
        self.client
            .send(
                Method::POST,
                &["projects", project_id, "annotations"],
                None,
                Body::Json(annotation),
            )
            .await
    }

    /// Retrieves an annotation by id.
    pub async fn get(&self, project_id: &str, annotation_id: &str) -> Result<Value> {
        self.client
            .send(
                Method::GET,
                &["projects", project_id, "annotations", annotation_id],
                None,
                Body::Empty,
            )
            .await
    }

    /// Replaces an annotation.
    pub async fn update(
        &self,
        project_id: &str,
        annotation_id: &str,
        annotation: &Value,
    ) -> Result<Value> {
        self.client
            .send(
                Method::PUT,
                &["projects", project_id, "annotations", annotation_id],
                None,
                Body::Json(annotation),
            )
            .await
    }

    /// Deletes an annotation.
    pub async fn delete(&self, project_id: &str, annotation_id: &str) -> Result<Value> {
        self.client
            .send(
                Method::DELETE,
                &["projects", project_id, "annotations", annotation_id],
                None,
                Body::Empty,
            )
            .await
    }

    /// Lists annotations, optionally narrowed by query filters.
    pub async fn list(&self, project_id: &str, filters: Option<&Filters>) -> Result<Value> {
        self.client
            .send(
                Method::GET,
                &["projects", project_id, "annotations"],
                filters,
                Body::Empty,
            )
            .await
    }
}
