//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router for each service role
//! - Wire up middleware (panic recovery, timeout, request ID, access log)
//! - Serve on a listener until shutdown

use axum::{
    routing::{get, post},
    Router,
};
use opentelemetry::trace::Tracer;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::http::handlers::{get_health, post_temperature, post_weather};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::response::panic_response;
use crate::pipeline::{Orchestrator, WeatherPipeline};

/// Router for the input role: `POST /v1/temperature`.
pub fn input_router<T>(orchestrator: Arc<Orchestrator<T>>, request_timeout: Duration) -> Router
where
    T: Tracer + Send + Sync + 'static,
    T::Span: Send + Sync + 'static,
{
    let routes = Router::new()
        .route("/v1/temperature", post(post_temperature::<T>))
        .with_state(orchestrator);
    with_middleware(routes, request_timeout)
}

/// Router for the weather role: `POST /v1/weather`.
pub fn weather_router<T>(pipeline: Arc<WeatherPipeline<T>>, request_timeout: Duration) -> Router
where
    T: Tracer + Send + Sync + 'static,
    T::Span: Send + Sync + 'static,
{
    let routes = Router::new()
        .route("/v1/weather", post(post_weather::<T>))
        .with_state(pipeline);
    with_middleware(routes, request_timeout)
}

/// Shared middleware stack, innermost first.
#[allow(deprecated)]
fn with_middleware(routes: Router, request_timeout: Duration) -> Router {
    routes
        .route("/health", get(get_health))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(set_request_id_layer())
}

/// HTTP server for one service role.
pub struct HttpServer {
    router: Router,
    role: &'static str,
}

impl HttpServer {
    pub fn new(router: Router, role: &'static str) -> Self {
        Self { router, role }
    }

    /// Run the server, accepting connections on the given listener until a
    /// shutdown signal arrives. In-flight requests are drained first.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, role = self.role, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!(role = self.role, "HTTP server stopped");
        Ok(())
    }

    pub fn role(&self) -> &'static str {
        self.role
    }
}
