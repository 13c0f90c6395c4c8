//! # gRPC Helpers
//!
//! Shared tonic plumbing for the mailing list services.
//!
//! - **Channels**: endpoint normalization and tuned client channels with
//!   connect and per-request timeouts
//! - **Server**: listener configuration from the environment plus health
//!   reporting (`grpc.health.v1.Health`)
//! - **Conversions**: epoch-second timestamps to and from `chrono`
//! - **Errors**: `GrpcError` and extension traits that turn plain errors
//!   into `tonic::Status`
//!
//! ## Quick Start
//!
//! ```ignore
//! use grpc_client::{create_channel_lazy_with_config, normalize_endpoint, ChannelConfig};
//! use rpc::mailinglist::mailing_list_service_client::MailingListServiceClient;
//! use std::time::Duration;
//!
//! let addr = normalize_endpoint(":8081");
//! let config = ChannelConfig::new().with_request_timeout(Duration::from_secs(5));
//! let channel = create_channel_lazy_with_config(addr, config)?;
//! let client = MailingListServiceClient::new(channel);
//! ```

pub mod channel;
pub mod conversions;
pub mod error;
pub mod server;

pub use channel::{
  ChannelConfig, create_channel, create_channel_lazy_with_config,
  create_channel_with_config, normalize_endpoint,
};
pub use error::{GrpcError, GrpcResult, ToTonicOption, ToTonicResult};
