use super::shutdown::ShutdownCoordinator;
use axum::Router;
use std::io;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};

/// Wraps API routes with the cross-cutting layers every HTTP server gets.
///
/// Currently that is request tracing at INFO. Domain routers apply their own
/// state and fallback before being passed in, so the trace span covers them.
pub fn create_router(apis: Router) -> Router {
    apis.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
}

/// Serves `router` on an already bound listener.
///
/// In-flight requests finish before this returns once shutdown has been
/// initiated. Any error also initiates shutdown so sibling servers stop.
pub async fn serve(
    router: Router,
    listener: TcpListener,
    coordinator: ShutdownCoordinator,
) -> io::Result<()> {
    let result = serve_until_shutdown(router, listener, coordinator.clone()).await;
    coordinator
        .shutdown_on_error(result)
        .inspect_err(|e| tracing::error!("HTTP server encountered an error: {:?}", e))
}

async fn serve_until_shutdown(
    router: Router,
    listener: TcpListener,
    coordinator: ShutdownCoordinator,
) -> io::Result<()> {
    info!("HTTP server starting on {}", listener.local_addr()?);

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { coordinator.wait_for_shutdown().await })
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
