//! Startup logging and health reporting for gRPC servers.

use super::config::ServerConfig;
use tonic_health::ServingStatus;
use tonic_health::server::HealthReporter;
use tracing::info;

/// Helper for creating gRPC servers with health checks.
///
/// # Example
///
/// ```ignore
/// use grpc_client::server::{GrpcServer, ServerConfig, create_health_service};
/// use rpc::mailinglist::mailing_list_service_server::SERVICE_NAME;
///
/// let (health_reporter, health_service) = create_health_service();
/// GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;
/// GrpcServer::log_startup(&config, SERVICE_NAME);
/// ```
pub struct GrpcServer;

impl GrpcServer {
    /// Log server startup information.
    pub fn log_startup(config: &ServerConfig, service_name: &str) {
        info!(
            addr = %config.addr,
            service = service_name,
            compression = config.enable_compression,
            "gRPC server starting"
        );
    }

    /// Mark the service, and the empty service name used by generic probes,
    /// as serving.
    pub async fn setup_health(health_reporter: &HealthReporter, service_name: &str) {
        Self::set_status(health_reporter, service_name, ServingStatus::Serving).await;
        info!(service = service_name, "Service marked as serving");
    }

    /// Flip the service to not-serving, e.g. once shutdown has begun.
    pub async fn mark_not_serving(health_reporter: &HealthReporter, service_name: &str) {
        Self::set_status(health_reporter, service_name, ServingStatus::NotServing).await;
    }

    async fn set_status(health_reporter: &HealthReporter, service_name: &str, status: ServingStatus) {
        health_reporter.set_service_status(service_name, status).await;
        health_reporter.set_service_status("", status).await;
    }
}

pub use tonic_health::server::health_reporter as create_health_service;
