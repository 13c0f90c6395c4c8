//! Process entrypoint: configuration, store, and both transports
//!
//! - Tracing initialization (JSON for prod, pretty for dev)
//! - SQLite pool and schema
//! - JSON/HTTP server (axum) and gRPC server (tonic) sharing one service
//! - Health check service (grpc.health.v1.Health)
//! - Coordinated graceful shutdown of both servers

use axum_helpers::server::{ShutdownCoordinator, create_router, serve as serve_http};
use core_config::FromEnv;
use domain_mailing_list::{EmailRepository, MailingListService, SqliteEmailRepository, handlers};
use eyre::{Result, WrapErr};
use grpc_client::server::{GrpcServer, ServerConfig, create_health_service};
use rpc::mailinglist::mailing_list_service_server::{MailingListServiceServer, SERVICE_NAME};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::codec::CompressionEncoding;
use tonic::transport::Server;
use tracing::{error, info};

use crate::config::Config;
use crate::service::MailingListServiceImpl;

/// Run both servers until SIGINT/SIGTERM or until one of them fails
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - The database cannot be opened or its schema created
/// - Either listener fails to bind
/// - Either server fails while running
pub async fn run() -> Result<()> {
    let config = Config::from_env().wrap_err("Failed to load configuration")?;
    core_config::tracing::init_tracing(&config.environment);

    info!(path = %config.database.path().display(), "Opening database");
    let pool = database::sqlite::connect_from_config(&config.database)
        .await
        .wrap_err("Failed to open database")?;
    database::sqlite::check_health(&pool)
        .await
        .wrap_err("Database health check failed")?;

    let service = MailingListService::new(SqliteEmailRepository::new(pool.clone()));
    service
        .ensure_schema()
        .await
        .wrap_err("Failed to create emails table")?;

    let http_listener = TcpListener::bind(config.http.socket_addr())
        .await
        .wrap_err_with(|| format!("Failed to bind JSON server to {}", config.http))?;
    let grpc_listener = TcpListener::bind(config.grpc.socket_addr())
        .await
        .wrap_err_with(|| format!("Failed to bind gRPC server to {}", config.grpc.addr))?;

    let coordinator = ShutdownCoordinator::new();
    let signals = coordinator.clone();
    tokio::spawn(async move { signals.wait_for_signal().await });

    let result = serve(service, http_listener, grpc_listener, config.grpc, coordinator).await;

    pool.close().await;
    info!("Database closed");
    result
}

/// Serve the JSON and gRPC transports on already bound listeners
///
/// Returns once both servers have stopped. Whichever server fails first
/// triggers shutdown of the other; its error is returned.
pub async fn serve<R>(
    service: MailingListService<R>,
    http_listener: TcpListener,
    grpc_listener: TcpListener,
    grpc_config: ServerConfig,
    coordinator: ShutdownCoordinator,
) -> Result<()>
where
    R: EmailRepository + 'static,
{
    let router = create_router(handlers::router(service.clone()));

    let http = tokio::spawn(serve_http(router, http_listener, coordinator.clone()));
    let grpc = tokio::spawn(serve_grpc(service, grpc_listener, grpc_config, coordinator));

    let (http_result, grpc_result) = tokio::join!(http, grpc);

    http_result
        .wrap_err("JSON server task panicked")?
        .wrap_err("JSON server failed")?;
    grpc_result.wrap_err("gRPC server task panicked")??;

    info!("All servers stopped");
    Ok(())
}

/// Serve the gRPC transport (plus health) until the coordinator shuts down
///
/// Any error also initiates shutdown so the JSON server stops too.
pub async fn serve_grpc<R>(
    service: MailingListService<R>,
    listener: TcpListener,
    config: ServerConfig,
    coordinator: ShutdownCoordinator,
) -> Result<()>
where
    R: EmailRepository + 'static,
{
    let result = serve_grpc_until_shutdown(service, listener, config, coordinator.clone()).await;
    coordinator
        .shutdown_on_error(result)
        .inspect_err(|e| error!("gRPC server encountered an error: {:?}", e))
}

async fn serve_grpc_until_shutdown<R>(
    service: MailingListService<R>,
    listener: TcpListener,
    config: ServerConfig,
    coordinator: ShutdownCoordinator,
) -> Result<()>
where
    R: EmailRepository + 'static,
{
    let local_addr = listener.local_addr().wrap_err("gRPC listener has no local address")?;

    let (health_reporter, health_service) = create_health_service();
    GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;
    GrpcServer::log_startup(&config, SERVICE_NAME);
    info!("gRPC server starting on {}", local_addr);

    let mut mailing_list = MailingListServiceServer::new(MailingListServiceImpl::new(service))
        .max_decoding_message_size(config.max_decoding_message_size)
        .max_encoding_message_size(config.max_encoding_message_size);
    if config.enable_compression {
        mailing_list = mailing_list
            .accept_compressed(CompressionEncoding::Zstd)
            .send_compressed(CompressionEncoding::Zstd);
    }

    Server::builder()
        .add_service(health_service)
        .add_service(mailing_list)
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async move {
            coordinator.wait_for_shutdown().await;
            GrpcServer::mark_not_serving(&health_reporter, SERVICE_NAME).await;
        })
        .await
        .wrap_err("gRPC server failed")?;

    info!("gRPC server stopped");
    Ok(())
}
