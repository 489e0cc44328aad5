//! Single-attempt request helper.
//!
//! Requests are sent once. Non-2xx responses become
//! [`ClientError::ApiError`] carrying Vault's joined `errors` list.

use reqwest::{RequestBuilder, Response};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::models::VaultErrors;

/// Sends an HTTP request and maps non-success statuses to `ApiError`.
///
/// # Errors
///
/// Returns `ClientError::HttpError` for transport failures and
/// `ClientError::ApiError` for non-2xx responses.
pub async fn send_request(builder: RequestBuilder) -> Result<Response> {
    let response = builder.send().await?;
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    let message = match serde_json::from_str::<VaultErrors>(&body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed
            .errors
            .iter()
            .map(|e| e.trim())
            .collect::<Vec<_>>()
            .join("; "),
        Ok(_) => String::new(),
        Err(_) => body,
    };

    debug!(status, %url, "Vault request failed");
    Err(ClientError::ApiError {
        status,
        url,
        message,
    })
}
