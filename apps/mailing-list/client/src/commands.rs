use domain_mailing_list::EmailEntry;
use eyre::{Result, WrapErr, eyre};
use grpc_client::{
    ChannelConfig, ToTonicResult, create_channel_lazy_with_config, normalize_endpoint,
};
use rpc::mailinglist::mailing_list_service_client::MailingListServiceClient;
use rpc::mailinglist::{
    self as proto, CreateEmailRequest, DeleteEmailRequest, EmailResponse, GetEmailBatchRequest,
    GetEmailRequest, UpdateEmailRequest,
};
use std::time::Duration;
use tonic::transport::Channel;
use tracing::{info, warn};

use crate::cli::{Cli, Commands};

/// Confirmation time the demo writes, in Unix seconds
pub const DEMO_CONFIRMED_AT: i64 = 10_000;

/// Thin wrapper over the generated client that speaks domain types
pub struct MailingListClient {
    inner: MailingListServiceClient<Channel>,
}

impl MailingListClient {
    /// Lazily connect to `addr`; every call carries the `timeout` deadline.
    pub fn connect(addr: &str, timeout: Duration) -> Result<Self> {
        let endpoint = normalize_endpoint(addr);
        let config = ChannelConfig::new()
            .with_connect_timeout(timeout)
            .with_request_timeout(timeout);

        let channel = create_channel_lazy_with_config(endpoint.clone(), config)
            .wrap_err_with(|| format!("Invalid server address {}", addr))?;
        info!(%endpoint, "Using mailing list server");

        Ok(Self::new(MailingListServiceClient::new(channel)))
    }

    pub fn new(inner: MailingListServiceClient<Channel>) -> Self {
        Self { inner }
    }

    pub async fn create(&mut self, email: &str) -> Result<Option<EmailEntry>, tonic::Status> {
        let response = self
            .inner
            .create_email(CreateEmailRequest {
                email_addr: email.to_string(),
            })
            .await?;
        entry_from(response.into_inner())
    }

    pub async fn get(&mut self, email: &str) -> Result<Option<EmailEntry>, tonic::Status> {
        let response = self
            .inner
            .get_email(GetEmailRequest {
                email_addr: email.to_string(),
            })
            .await?;
        entry_from(response.into_inner())
    }

    pub async fn batch(&mut self, page: i32, count: i32) -> Result<Vec<EmailEntry>, tonic::Status> {
        let response = self
            .inner
            .get_email_batch(GetEmailBatchRequest { page, count })
            .await?;

        response
            .into_inner()
            .email_entries
            .into_iter()
            .map(|entry| EmailEntry::try_from(entry).to_tonic_with_code(tonic::Code::Internal))
            .collect()
    }

    pub async fn update(
        &mut self,
        email: &str,
        confirmed_at: i64,
        opt_out: bool,
    ) -> Result<Option<EmailEntry>, tonic::Status> {
        let response = self
            .inner
            .update_email(UpdateEmailRequest {
                email_entry: Some(proto::EmailEntry {
                    id: 0,
                    email: email.to_string(),
                    confirmed_at,
                    opt_out,
                }),
            })
            .await?;
        entry_from(response.into_inner())
    }

    pub async fn delete(&mut self, email: &str) -> Result<Option<EmailEntry>, tonic::Status> {
        let response = self
            .inner
            .delete_email(DeleteEmailRequest {
                email_addr: email.to_string(),
            })
            .await?;
        entry_from(response.into_inner())
    }
}

fn entry_from(response: EmailResponse) -> Result<Option<EmailEntry>, tonic::Status> {
    response
        .email_entry
        .map(EmailEntry::try_from)
        .transpose()
        .to_tonic_with_code(tonic::Code::Internal)
}

fn log_entry(action: &str, entry: Option<&EmailEntry>) {
    match entry {
        Some(entry) => info!(
            action,
            entry = %serde_json::to_string(entry).unwrap_or_default(),
            "response"
        ),
        None => info!(action, "email not found"),
    }
}

fn log_batch(entries: &[EmailEntry]) {
    for (i, entry) in entries.iter().enumerate() {
        info!(
            item = i + 1,
            of = entries.len(),
            entry = %serde_json::to_string(entry).unwrap_or_default(),
            "batch"
        );
    }
}

/// Create `email` (reusing it if it already exists), confirm and opt it out,
/// soft-delete it, then list the first page of five active subscribers.
pub async fn demo(client: &mut MailingListClient, email: &str) -> Result<Vec<EmailEntry>> {
    let created = match client.create(email).await {
        Ok(entry) => entry,
        Err(status) if status.code() == tonic::Code::AlreadyExists => {
            warn!(email, "already subscribed, reusing the existing entry");
            client.get(email).await.wrap_err("GetEmail failed")?
        }
        Err(status) => return Err(eyre!(status).wrap_err("CreateEmail failed")),
    };
    log_entry("create", created.as_ref());

    let updated = client
        .update(email, DEMO_CONFIRMED_AT, true)
        .await
        .wrap_err("UpdateEmail failed")?;
    log_entry("update", updated.as_ref());

    let deleted = client.delete(email).await.wrap_err("DeleteEmail failed")?;
    log_entry("delete", deleted.as_ref());

    let batch = client.batch(1, 5).await.wrap_err("GetEmailBatch failed")?;
    log_batch(&batch);

    Ok(batch)
}

/// Execute the parsed command line
pub async fn run(cli: &Cli) -> Result<()> {
    let mut client = MailingListClient::connect(&cli.grpc_addr, cli.timeout())?;

    match cli.command() {
        Commands::Demo { email } => {
            demo(&mut client, &email).await?;
        }
        Commands::Create { email } => {
            let entry = client.create(&email).await.wrap_err("CreateEmail failed")?;
            log_entry("create", entry.as_ref());
        }
        Commands::Get { email } => {
            let entry = client.get(&email).await.wrap_err("GetEmail failed")?;
            log_entry("get", entry.as_ref());
        }
        Commands::Batch { page, count } => {
            let entries = client
                .batch(page, count)
                .await
                .wrap_err("GetEmailBatch failed")?;
            log_batch(&entries);
        }
        Commands::Update {
            email,
            confirmed_at,
            opt_out,
        } => {
            let entry = client
                .update(&email, confirmed_at, opt_out)
                .await
                .wrap_err("UpdateEmail failed")?;
            log_entry("update", entry.as_ref());
        }
        Commands::Delete { email } => {
            let entry = client.delete(&email).await.wrap_err("DeleteEmail failed")?;
            log_entry("delete", entry.as_ref());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_from_absent() {
        assert!(entry_from(EmailResponse { email_entry: None }).unwrap().is_none());
    }

    #[test]
    fn test_entry_from_out_of_range_is_internal() {
        let status = entry_from(EmailResponse {
            email_entry: Some(proto::EmailEntry {
                id: 1,
                email: "a@x.com".into(),
                confirmed_at: i64::MAX,
                opt_out: false,
            }),
        })
        .unwrap_err();
        assert_eq!(status.code(), tonic::Code::Internal);
    }

    #[tokio::test]
    async fn test_connect_is_lazy() {
        assert!(MailingListClient::connect(":1", Duration::from_millis(100)).is_ok());
    }
}
