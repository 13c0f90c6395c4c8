//! Runs the client against a live gRPC server backed by the in-memory store

use axum_helpers::server::ShutdownCoordinator;
use domain_mailing_list::{InMemoryEmailRepository, MailingListService};
use grpc_client::server::ServerConfig;
use mailing_list_client::commands::DEMO_CONFIRMED_AT;
use mailing_list_client::{MailingListClient, demo};
use mailing_list_server::server::serve_grpc;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

async fn start_server() -> (SocketAddr, ShutdownCoordinator, JoinHandle<eyre::Result<()>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let coordinator = ShutdownCoordinator::new();

    let service = MailingListService::new(InMemoryEmailRepository::new());
    let handle = tokio::spawn(serve_grpc(
        service,
        listener,
        ServerConfig::new(addr),
        coordinator.clone(),
    ));

    (addr, coordinator, handle)
}

async fn stop(coordinator: ShutdownCoordinator, handle: JoinHandle<eyre::Result<()>>) {
    coordinator.shutdown();
    tokio::time::timeout(Duration::from_secs(10), handle)
        .await
        .expect("server should stop after shutdown")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_demo_flow() {
    let (addr, coordinator, handle) = start_server().await;
    let mut client = MailingListClient::connect(&addr.to_string(), Duration::from_secs(5)).unwrap();

    let other = client.create("abc@example.com").await.unwrap().unwrap();
    assert_eq!(other.id, 1);

    // The demo subscriber is deleted by the time the batch is listed
    let batch = demo(&mut client, "pqr@yahoo.in").await.unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].email, "abc@example.com");

    let entry = client.get("pqr@yahoo.in").await.unwrap().unwrap();
    assert_eq!(entry.id, 2);
    assert!(entry.opt_out);
    assert_eq!(entry.confirmed_at.timestamp(), DEMO_CONFIRMED_AT);

    stop(coordinator, handle).await;
}

#[tokio::test]
async fn test_demo_reuses_existing_subscriber() {
    let (addr, coordinator, handle) = start_server().await;
    let mut client = MailingListClient::connect(&addr.to_string(), Duration::from_secs(5)).unwrap();

    demo(&mut client, "pqr@yahoo.in").await.unwrap();
    let batch = demo(&mut client, "pqr@yahoo.in").await.unwrap();
    assert!(batch.is_empty());

    stop(coordinator, handle).await;
}

#[tokio::test]
async fn test_invalid_email_surfaces_status() {
    let (addr, coordinator, handle) = start_server().await;
    let mut client = MailingListClient::connect(&addr.to_string(), Duration::from_secs(5)).unwrap();

    let status = client.create("not-an-email").await.unwrap_err();
    assert_eq!(status.code(), tonic::Code::InvalidArgument);

    assert!(client.get("nobody@example.com").await.unwrap().is_none());

    stop(coordinator, handle).await;
}
