use axum::{
    Router,
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::json;
use std::sync::Arc;

use crate::error::EmailResult;
use crate::models::{BatchQueryParams, EmailAddress, UpsertEmail};
use crate::repository::EmailRepository;
use crate::service::MailingListService;

/// Create the mailing-list router with all HTTP endpoints
///
/// Every endpoint takes a JSON body, including the GET and DELETE ones.
pub fn router<R: EmailRepository + 'static>(service: MailingListService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/email/create", post(create_email))
        .route("/email/get", get(get_email))
        .route("/email/get_batch", get(get_email_batch))
        .route("/email/update", patch(update_email))
        .route("/email/delete", delete(delete_email))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .with_state(shared_service)
}

/// JSON body extractor that does not insist on a `Content-Type` header.
///
/// Undecodable bodies are rejected with 400 and `{"Err": message}`.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| error_body(StatusCode::BAD_REQUEST, &e.body_text()))?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| error_body(StatusCode::BAD_REQUEST, &format!("invalid request body: {}", e)))
    }
}

/// Serialize `value` as the response body. A value that cannot be encoded
/// yields 500 with an empty body.
fn json_response<T: Serialize>(value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(json!({ "Err": message }))).into_response()
}

async fn not_found() -> Response {
    error_body(StatusCode::NOT_FOUND, "not found")
}

async fn method_not_allowed() -> Response {
    error_body(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}

/// Create a subscriber: `{"Email": "..."}` → entry
async fn create_email<R: EmailRepository>(
    State(service): State<Arc<MailingListService<R>>>,
    JsonBody(input): JsonBody<EmailAddress>,
) -> EmailResult<Response> {
    tracing::info!(email = %input.email, "JSON CreateEmail");
    let entry = service.create_email(&input.email).await?;
    Ok(json_response(&entry))
}

/// Fetch a subscriber: `{"Email": "..."}` → entry or `null`
async fn get_email<R: EmailRepository>(
    State(service): State<Arc<MailingListService<R>>>,
    JsonBody(input): JsonBody<EmailAddress>,
) -> EmailResult<Response> {
    tracing::info!(email = %input.email, "JSON GetEmail");
    let entry = service.get_email(&input.email).await?;
    Ok(json_response(&entry))
}

/// One page of active subscribers: `{"Page": n, "Count": m}` → entries
async fn get_email_batch<R: EmailRepository>(
    State(service): State<Arc<MailingListService<R>>>,
    JsonBody(params): JsonBody<BatchQueryParams>,
) -> EmailResult<Response> {
    tracing::info!(page = params.page, count = params.count, "JSON GetEmailBatch");
    let entries = service.get_email_batch(params).await?;
    Ok(json_response(&entries))
}

/// Upsert a subscriber from a full entry → entry
async fn update_email<R: EmailRepository>(
    State(service): State<Arc<MailingListService<R>>>,
    JsonBody(input): JsonBody<UpsertEmail>,
) -> EmailResult<Response> {
    tracing::info!(email = %input.email, "JSON UpdateEmail");
    let entry = service.update_email(input).await?;
    Ok(json_response(&entry))
}

/// Opt a subscriber out: `{"Email": "..."}` → entry or `null`
async fn delete_email<R: EmailRepository>(
    State(service): State<Arc<MailingListService<R>>>,
    JsonBody(input): JsonBody<EmailAddress>,
) -> EmailResult<Response> {
    tracing::info!(email = %input.email, "JSON DeleteEmail");
    let entry = service.delete_email(&input.email).await?;
    Ok(json_response(&entry))
}
