//! In-process API server used by client tests.

use axum::Router;
use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tokio::net::TcpListener;

use crate::{ClientConfig, ScaileClient};

/// Echoes the request back as JSON, except for a few canned paths.
async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    match uri.path() {
        "/auth/validate" => return axum::Json(json!({"valid": true})).into_response(),
        "/empty" => return StatusCode::NO_CONTENT.into_response(),
        "/fail/json" => {
            let body = axum::Json(json!({"message": "bad input"}));
            return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
        }
        "/fail/text" => return (StatusCode::BAD_GATEWAY, "upstream down").into_response(),
        _ => {}
    }

    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned()
    };

    axum::Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query().unwrap_or_default(),
        "authorization": header_value(header::AUTHORIZATION),
        "content_type": header_value(header::CONTENT_TYPE),
        "body": String::from_utf8_lossy(&body),
    }))
    .into_response()
}

/// Starts the echo server on an ephemeral port and returns a client for it.
pub(crate) async fn spawn_test_server() -> ScaileClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().fallback(echo);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = ClientConfig::new("test-key").with_base_url(format!("http://{addr}"));
    ScaileClient::new(config).unwrap()
}
