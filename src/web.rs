//! HTTP surface of the gateway.
//!
//! Every route here is plumbing around the decision path: extract claims,
//! decide visibility, serialize. The service never returns 401/403 from the
//! decision path. A malformed or absent credential degrades to the anonymous
//! identity and an empty document list, and mapping that to a user-visible
//! failure is the caller's business.

use crate::authz::engine;
use crate::authz::types::{DocumentsResponse, Resource};
use crate::claims;
use crate::settings::Settings;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use axum::middleware::{self, Next};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use miette::IntoDiagnostic;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub catalog: Arc<Vec<Resource>>,
    pub started: Instant,
}

// Security headers middleware
async fn security_headers(request: Request<Body>, next: Next) -> impl IntoResponse {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    // X-Frame-Options: Prevent clickjacking
    headers.insert(
        HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );

    // X-Content-Type-Options: Prevent MIME sniffing
    headers.insert(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );

    // X-XSS-Protection: Legacy XSS protection (still useful for older browsers)
    headers.insert(
        HeaderName::from_static("x-xss-protection"),
        HeaderValue::from_static("1; mode=block"),
    );

    // Content-Security-Policy: this service only ever serves JSON
    headers.insert(
        HeaderName::from_static("content-security-policy"),
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
    );

    // Referrer-Policy: Control referrer information
    headers.insert(
        HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    // Permissions-Policy: Disable unnecessary browser features
    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static("geolocation=(), microphone=(), camera=()"),
    );

    response
}

pub fn router(state: AppState) -> Router {
    // NOTE: Rate limiting and TLS belong to the fronting proxy (Envoy), which
    // also terminates mTLS and runs the policy engine before requests get here.
    Router::new()
        .route("/health", get(health))
        .route("/api/documents", get(documents))
        .route("/api/admin", get(admin))
        .route("/api/spiffe-debug", get(spiffe_debug))
        .layer(middleware::from_fn(security_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(settings: Settings, catalog: Vec<Resource>) -> miette::Result<()> {
    let state = AppState {
        settings: Arc::new(settings),
        catalog: Arc::new(catalog),
        started: Instant::now(),
    };

    let addr: SocketAddr = format!(
        "{}:{}",
        state.settings.server.host, state.settings.server.port
    )
    .parse()
    .map_err(|e| miette::miette!("bad listen addr: {e}"))?;

    let environment = state.settings.server.environment.clone();
    let router = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await.into_diagnostic()?;
    tracing::info!(%addr, %environment, "Zero trust backend listening");
    axum::serve(listener, router).await.into_diagnostic()?;
    Ok(())
}

/// Forwarded client IP, for request logs only. The gateway always sits behind
/// a proxy, so only `x-forwarded-for` is consulted.
fn client_ip(headers: &HeaderMap) -> &str {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "uptime": state.started.elapsed().as_secs(),
        "environment": state.settings.server.environment,
    }))
}

async fn documents(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let authorization = headers.get("authorization").and_then(|v| v.to_str().ok());
    let identity = claims::extract(authorization);
    let decision = engine::decide(&identity, &state.catalog);

    tracing::info!(
        client_ip = client_ip(&headers),
        subject = %identity.subject,
        tier = engine::access_tier(&identity).unwrap_or("none"),
        visible = decision.count,
        "Document access request"
    );

    Json(DocumentsResponse {
        documents: decision.visible,
        message: "Document list retrieved successfully".to_string(),
        document_count: decision.count,
    })
}

async fn admin(headers: HeaderMap) -> impl IntoResponse {
    tracing::info!(client_ip = client_ip(&headers), "Admin access request");

    Json(json!({
        "message": "Admin endpoint accessed successfully",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Echoes the identity headers the mTLS proxy injects. They are absent when
/// the service is reached directly.
async fn spiffe_debug(headers: HeaderMap) -> impl IntoResponse {
    let forwarded = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("Not present")
            .to_string()
    };

    Json(json!({
        "message": "SPIFFE debug information",
        "headers": {
            "x-forwarded-client-cert": forwarded("x-forwarded-client-cert"),
            "x-forwarded-tls-version": forwarded("x-forwarded-tls-version"),
        },
        "note": "When accessed through the mTLS proxy, additional headers will be present",
    }))
}
