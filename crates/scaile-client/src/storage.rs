//! File storage endpoints.

use std::path::Path;

use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::client::Body;
use crate::{Filters, Result, ScaileClient};

/// Form field carrying the uploaded file.
const FILE_FIELD: &str = "file";

/// Upload, retrieve and delete project files.
#[derive(Debug, Clone)]
pub struct Storage {
    client: ScaileClient,
}

impl Storage {
    pub(crate) fn new(client: ScaileClient) -> Self {
        Self { client }
    }

    /// Uploads a local file as a multipart form.
    pub async fn upload(&self, project_id: &str, path: impl AsRef<Path>) -> Result<Value> {
        let path = path.as_ref();
        let contents = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| FILE_FIELD.to_owned());

        self.upload_bytes(project_id, file_name, contents).await
    }

    /// Uploads in-memory contents under the given file name.
    pub async fn upload_bytes(
        &self,
        project_id: &str,
        file_name: impl Into<String>,
        contents: impl Into<Vec<u8>>,
    ) -> Result<Value> {
        let part = Part::bytes(contents.into()).file_name(file_name.into());
        let form = Form::new().part(FILE_FIELD, part);

        self.client
            .send(
                Method::POST,
                &["projects", project_id, "storage", "upload"],
                None,
                Body::Multipart(form),
            )
            .await
    }

    /// Retrieves a file or its metadata.
    pub async fn retrieve(&self, project_id: &str, file_id: &str) -> Result<Value> {
        self.client
            .send(
                Method::GET,
                &["projects", project_id, "storage", "files", file_id],
                None,
                Body::Empty,
            )
            .await
    }

    /// Deletes a file.
    pub async fn delete(&self, project_id: &str, file_id: &str) -> Result<Value> {
        self.client
            .send(
                Method::DELETE,
                &["projects", project_id, "storage", "files", file_id],
                None,
                Body::Empty,
            )
            .await
    }

    /// Lists files, optionally narrowed by query filters.
    pub async fn list(&self, project_id: &str, filters: Option<&Filters>) -> Result<Value> {
        self.client
            .send(
                Method::GET,
                &["projects", project_id, "storage", "files"],
                filters,
                Body::Empty,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::Error;
    use crate::test_server::spawn_test_server;

    #[tokio::test]
    async fn test_upload_sends_multipart_file() {
        let storage = spawn_test_server().await.storage();

        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"id,label\n1,cat\n").unwrap();

        let echo = storage.upload("p1", file.path()).await.unwrap();
        let file_name = file.path().file_name().unwrap().to_string_lossy();

        assert_eq!(echo["method"], "POST");
        assert_eq!(echo["path"], "/projects/p1/storage/upload");
        assert!(
            echo["content_type"]
                .as_str()
                .unwrap()
                .starts_with("multipart/form-data")
        );

        let body = echo["body"].as_str().unwrap();
        assert!(body.contains(r#"name="file""#));
        assert!(body.contains(file_name.as_ref()));
        assert!(body.contains("1,cat"));
    }

    #[tokio::test]
    async fn test_upload_missing_file() {
        let storage = spawn_test_server().await.storage();

        let error = storage
            .upload("p1", "/definitely/not/here.bin")
            .await
            .unwrap_err();
        assert!(matches!(error, Error::Io(_)));
    }

    #[tokio::test]
    async fn test_file_paths() {
        let storage = spawn_test_server().await.storage();

        let echo = storage.retrieve("p1", "f9").await.unwrap();
        assert_eq!(echo["method"], "GET");
        assert_eq!(echo["path"], "/projects/p1/storage/files/f9");

        let echo = storage.delete("p1", "f9").await.unwrap();
        assert_eq!(echo["method"], "DELETE");

        let echo = storage.list("p1", None).await.unwrap();
        assert_eq!(echo["path"], "/projects/p1/storage/files");
        assert_eq!(echo["query"], "");
    }
}
