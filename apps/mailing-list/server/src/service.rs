use domain_mailing_list::conversions::{batch_response, email_response};
use domain_mailing_list::{EmailRepository, MailingListService, UpsertEmail};
use grpc_client::{ToTonicOption, ToTonicResult};
use rpc::mailinglist::{
    CreateEmailRequest, DeleteEmailRequest, EmailResponse, GetEmailBatchRequest,
    GetEmailBatchResponse, GetEmailRequest, UpdateEmailRequest,
    mailing_list_service_server::MailingListService as MailingListRpc,
};
use tonic::{Request, Response, Status};
use tracing::info;

/// gRPC front end over the shared service layer
pub struct MailingListServiceImpl<R>
where
    R: EmailRepository + 'static,
{
    service: MailingListService<R>,
}

impl<R> MailingListServiceImpl<R>
where
    R: EmailRepository + 'static,
{
    pub fn new(service: MailingListService<R>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl<R> MailingListRpc for MailingListServiceImpl<R>
where
    R: EmailRepository + 'static,
{
    async fn create_email(
        &self,
        request: Request<CreateEmailRequest>,
    ) -> Result<Response<EmailResponse>, Status> {
        let req = request.into_inner();
        info!(email = %req.email_addr, "gRPC CreateEmail");

        let entry = self.service.create_email(&req.email_addr).await?;
        Ok(Response::new(email_response(entry)))
    }

    async fn get_email(
        &self,
        request: Request<GetEmailRequest>,
    ) -> Result<Response<EmailResponse>, Status> {
        let req = request.into_inner();
        info!(email = %req.email_addr, "gRPC GetEmail");

        let entry = self.service.get_email(&req.email_addr).await?;
        Ok(Response::new(email_response(entry)))
    }

    async fn get_email_batch(
        &self,
        request: Request<GetEmailBatchRequest>,
    ) -> Result<Response<GetEmailBatchResponse>, Status> {
        let req = request.into_inner();
        info!(page = req.page, count = req.count, "gRPC GetEmailBatch");

        let entries = self.service.get_email_batch(req.into()).await?;
        Ok(Response::new(batch_response(entries)))
    }

    async fn update_email(
        &self,
        request: Request<UpdateEmailRequest>,
    ) -> Result<Response<EmailResponse>, Status> {
        let entry = request
            .into_inner()
            .email_entry
            .ok_or_invalid("email_entry is required")?;
        info!(email = %entry.email, "gRPC UpdateEmail");

        let input = UpsertEmail::try_from(entry).to_tonic()?;
        let entry = self.service.update_email(input).await?;
        Ok(Response::new(email_response(entry)))
    }

    async fn delete_email(
        &self,
        request: Request<DeleteEmailRequest>,
    ) -> Result<Response<EmailResponse>, Status> {
        let req = request.into_inner();
        info!(email = %req.email_addr, "gRPC DeleteEmail");

        let entry = self.service.delete_email(&req.email_addr).await?;
        Ok(Response::new(email_response(entry)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_mailing_list::InMemoryEmailRepository;
    use rpc::mailinglist::EmailEntry;

    fn grpc_service() -> MailingListServiceImpl<InMemoryEmailRepository> {
        MailingListServiceImpl::new(MailingListService::new(InMemoryEmailRepository::new()))
    }

    async fn create(svc: &MailingListServiceImpl<InMemoryEmailRepository>, email: &str) -> EmailEntry {
        svc.create_email(Request::new(CreateEmailRequest {
            email_addr: email.to_string(),
        }))
        .await
        .unwrap()
        .into_inner()
        .email_entry
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_email_defaults() {
        let svc = grpc_service();
        let entry = create(&svc, "pqr@yahoo.in").await;

        assert_eq!(entry.email, "pqr@yahoo.in");
        assert_eq!(entry.confirmed_at, 0);
        assert!(!entry.opt_out);
    }

    #[tokio::test]
    async fn test_duplicate_create_is_already_exists() {
        let svc = grpc_service();
        create(&svc, "dup@example.com").await;

        let status = svc
            .create_email(Request::new(CreateEmailRequest {
                email_addr: "dup@example.com".to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), tonic::Code::AlreadyExists);
    }

    #[tokio::test]
    async fn test_get_unknown_is_empty_response() {
        let svc = grpc_service();
        let response = svc
            .get_email(Request::new(GetEmailRequest {
                email_addr: "ghost@example.com".to_string(),
            }))
            .await
            .unwrap();

        assert!(response.into_inner().email_entry.is_none());
    }

    #[tokio::test]
    async fn test_batch_validation_is_invalid_argument() {
        let svc = grpc_service();
        let status = svc
            .get_email_batch(Request::new(GetEmailBatchRequest { page: 0, count: 5 }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        assert_eq!(
            status.message(),
            "page and count fields are required and must be > 0"
        );
    }

    #[tokio::test]
    async fn test_update_without_entry_is_invalid_argument() {
        let svc = grpc_service();
        let status = svc
            .update_email(Request::new(UpdateEmailRequest { email_entry: None }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), tonic::Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_update_and_delete_roundtrip() {
        let svc = grpc_service();
        let created = create(&svc, "pqr@yahoo.in").await;

        let updated = svc
            .update_email(Request::new(UpdateEmailRequest {
                email_entry: Some(EmailEntry {
                    id: created.id,
                    email: "pqr@yahoo.in".to_string(),
                    confirmed_at: 10_000,
                    opt_out: true,
                }),
            }))
            .await
            .unwrap()
            .into_inner()
            .email_entry
            .unwrap();
        assert_eq!(updated.confirmed_at, 10_000);
        assert!(updated.opt_out);

        let deleted = svc
            .delete_email(Request::new(DeleteEmailRequest {
                email_addr: "pqr@yahoo.in".to_string(),
            }))
            .await
            .unwrap()
            .into_inner()
            .email_entry
            .unwrap();
        assert!(deleted.opt_out);

        let batch = svc
            .get_email_batch(Request::new(GetEmailBatchRequest { page: 1, count: 5 }))
            .await
            .unwrap()
            .into_inner();
        assert!(batch.email_entries.is_empty());
    }
}
