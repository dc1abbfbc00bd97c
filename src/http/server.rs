//! HTTP server setup and the request handler.
//!
//! # Responsibilities
//! - Create Axum Router with the proxy handler
//! - Wire up middleware (tracing, request ID, panic recovery)
//! - Serve connections from the listener until shutdown
//! - Decide per request: local override or upstream forward

use axum::{
    extract::{ConnectInfo, State},
    http::{
        header::{InvalidHeaderValue, USER_AGENT},
        HeaderMap, Method, Uri,
    },
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::any::Any;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::response::{bad_gateway, not_implemented, override_response, relay_response};
use crate::http::upstream::{UpstreamClient, UpstreamError};
use crate::http::X_REQUEST_ID;
use crate::overrides::{read_override, OverrideTable};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub overrides: Arc<OverrideTable>,
    pub upstream: UpstreamClient,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    upstream_url: String,
    overrides: Arc<OverrideTable>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, InvalidHeaderValue> {
        let overrides = Arc::new(OverrideTable::new(config.overrides.clone()));
        let state = AppState {
            overrides: overrides.clone(),
            upstream: UpstreamClient::new(&config.upstream)?,
        };

        let router = Self::build_router(state);
        Ok(Self {
            router,
            upstream_url: config.upstream.base_url,
            overrides,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(CatchPanicLayer::custom(handle_panic)),
            )
    }

    /// Serve connections until `shutdown` resolves.
    ///
    /// Every connection runs on its own task; a stalled client or origin only
    /// holds up its own request.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.upstream_url,
            overrides = %self.overrides,
            "HamClock proxy listening"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

}

/// Answer a request whose handling panicked; the server keeps running.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "Request handler panicked");
    bad_gateway()
}

/// Main proxy handler.
/// Serves an override when its file is present, otherwise forwards upstream.
async fn proxy_handler(
    State(state): State<AppState>,
    ConnectInfo(client): ConnectInfo<SocketAddr>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if method != Method::GET {
        tracing::info!(client = %client, method = %method, "Unsupported method");
        return not_implemented();
    }

    let request_id = headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    // 1. Local override
    if let Some(file) = state.overrides.lookup(target) {
        match read_override(file).await {
            Some(data) => {
                tracing::info!(
                    client = %client,
                    request_id = %request_id,
                    path = %target,
                    bytes = data.len(),
                    "Served from local override"
                );
                return override_response(data);
            }
            None => {
                tracing::warn!(
                    client = %client,
                    request_id = %request_id,
                    path = %target,
                    file = %file.display(),
                    "Local override file missing, forwarding upstream"
                );
            }
        }
    }

    // 2. Upstream
    let user_agent = headers.get(USER_AGENT).cloned();

    match state.upstream.fetch(target, user_agent).await {
        Ok(upstream) => {
            tracing::info!(
                client = %client,
                request_id = %request_id,
                status = upstream.status.as_u16(),
                path = %target,
                bytes = upstream.body.len(),
                "GET relayed"
            );
            relay_response(upstream)
        }
        Err(UpstreamError::Status(status)) => {
            tracing::info!(
                client = %client,
                request_id = %request_id,
                status = status.as_u16(),
                path = %target,
                "GET relayed upstream error status"
            );
            UpstreamError::Status(status).into_response()
        }
        Err(e) => {
            tracing::error!(
                client = %client,
                request_id = %request_id,
                url = %state.upstream.url_for(target),
                error = ?e,
                "Proxy error"
            );
            e.into_response()
        }
    }
}
