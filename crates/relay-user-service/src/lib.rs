//! SOAP user service for the relay platform.
//!
//! Serves `createUser`, `list_users` and `get_user` envelopes on `POST /`
//! from a [`UserStore`]. Failures are answered with a SOAP fault and HTTP 500,
//! which is what SOAP 1.1 clients expect.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use relay_store::UserRecordStore;
//! use relay_user_service::create_router;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_router(Arc::new(UserRecordStore::new()));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8001").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use relay_soap::{
    encode_user_list_response, encode_user_response, SoapFault, SoapRequest, UserOperation,
    SOAP_CONTENT_TYPE,
};
use relay_store::UserStore;

/// Create the service router.
///
/// # Routes
///
/// - `POST /` - SOAP endpoint
/// - `GET /health` - Health check
pub fn create_router<S>(store: Arc<S>) -> Router
where
    S: UserStore + 'static,
{
    Router::new()
        .route("/", post(soap_endpoint::<S>))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        service: "relay-user-service",
    })
}

async fn soap_endpoint<S>(State(store): State<Arc<S>>, body: Bytes) -> Response
where
    S: UserStore + 'static,
{
    let outcome = std::str::from_utf8(&body)
        .map_err(|_| SoapFault::client("Request body is not valid UTF-8."))
        .and_then(|xml| dispatch(store.as_ref(), xml));

    match outcome {
        Ok(envelope) => soap_response(StatusCode::OK, envelope),
        Err(fault) => {
            tracing::warn!(code = %fault.code, message = %fault.message, "Answering with SOAP fault");
            match fault.encode() {
                Ok(envelope) => soap_response(StatusCode::INTERNAL_SERVER_ERROR, envelope),
                Err(err) => {
                    tracing::error!(error = %err, "Failed to encode SOAP fault");
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            }
        }
    }
}

/// Decode one request envelope, run it against the store, encode the reply.
fn dispatch<S: UserStore + ?Sized>(store: &S, xml: &str) -> Result<String, SoapFault> {
    let request =
        SoapRequest::decode(xml).map_err(|e| SoapFault::client(format!("Invalid request: {e}")))?;
    tracing::debug!(operation = request.operation().element_name(), "SOAP request");

    let encoded = match request {
        SoapRequest::CreateUser { name, email } => {
            let user = store.create(&name, &email);
            encode_user_response(UserOperation::CreateUser, &user)
        }
        SoapRequest::ListUsers => encode_user_list_response(&store.list()),
        SoapRequest::GetUser { user_id } => {
            let user = store
                .get(user_id)
                .map_err(|e| SoapFault::client(e.to_string()))?;
            encode_user_response(UserOperation::GetUser, &user)
        }
    };

    encoded.map_err(|e| SoapFault::server(format!("Could not encode response: {e}")))
}

fn soap_response(status: StatusCode, envelope: String) -> Response {
    (status, [(header::CONTENT_TYPE, SOAP_CONTENT_TYPE)], envelope).into_response()
}
