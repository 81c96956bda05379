//! Handlers for URL submission endpoints.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::submit::SubmitUrlRequest;
use crate::domain::entities::{RawCredential, SubmissionRequest, SubmissionResult};
use crate::error::AppError;
use crate::state::AppState;

/// Notifies the Indexing API about a single URL.
///
/// # Endpoint
///
/// `POST /submit-url`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/page",
///   "type": "URL_UPDATED",            // optional
///   "service_account": { ... },       // optional inline credential
///   "project_id": "my-project",       // optional
///   "scopes": ["https://..."]         // optional
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "status_code": 200,
///   "message": "URL submitted successfully",
///   "url": "https://example.com/page",
///   "type": "URL_UPDATED"
/// }
/// ```
///
/// A non-200 answer from the Indexing API is still a `200 OK` response here
/// with `success: false` and the upstream body as `message`.
///
/// # Errors
///
/// - 400 Bad Request if validation fails
/// - 500 Internal Server Error if credentials cannot be resolved, the token
///   exchange fails, or the call to the Indexing API fails
pub async fn submit_url_handler(
    State(state): State<AppState>,
    Json(payload): Json<SubmitUrlRequest>,
) -> Result<Json<SubmissionResult>, AppError> {
    payload.validate()?;

    let mut request = SubmissionRequest::from(payload);
    let credential = state
        .credential_resolver
        .resolve(request.credential.take())
        .await?;

    let result = state
        .submission_service
        .submit_one(&credential, &request, request.scopes.as_deref())
        .await?;

    Ok(Json(result))
}

/// Notifies the Indexing API about several URLs with one token.
///
/// # Endpoint
///
/// `POST /submit-urls`
///
/// # Batch Processing
///
/// Processes URLs independently. If one fails, others continue processing.
/// The response is an array of results in the same order as the request.
///
/// The credential and scopes are taken from the first item that carries
/// them; each item may still name its own `project_id`.
///
/// # Errors
///
/// - 400 Bad Request if any item fails validation
/// - 500 Internal Server Error if credentials cannot be resolved or the
///   token exchange fails. Per-URL failures are reported in the array.
pub async fn submit_urls_handler(
    State(state): State<AppState>,
    Json(payload): Json<Vec<SubmitUrlRequest>>,
) -> Result<Json<Vec<SubmissionResult>>, AppError> {
    for item in &payload {
        item.validate()?;
    }

    if payload.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let mut requests: Vec<SubmissionRequest> =
        payload.into_iter().map(SubmissionRequest::from).collect();

    let inline = take_batch_credential(&mut requests);
    let scopes = requests.iter().find_map(|r| r.scopes.clone());

    let credential = state.credential_resolver.resolve(inline).await?;

    let results = state
        .submission_service
        .submit_batch(&credential, &requests, scopes.as_deref())
        .await?;

    Ok(Json(results))
}

/// Removes inline credentials from all items and returns the first one.
fn take_batch_credential(requests: &mut [SubmissionRequest]) -> Option<RawCredential> {
    let mut inline: Option<RawCredential> = None;
    for request in requests.iter_mut() {
        let Some(credential) = request.credential.take() else {
            continue;
        };

        if inline.is_none() {
            inline = Some(credential);
        } else if inline.as_ref() != Some(&credential) {
            tracing::warn!(
                url = %request.url,
                "Ignoring differing inline credential; batch uses the first one"
            );
        }
    }
    inline
}
