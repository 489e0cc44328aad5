//! Authentication endpoints.

use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::json;
use tracing::debug;

use crate::auth::AuthMethod;
use crate::endpoints::{api_url, send_request};
use crate::error::{ClientError, Result};
use crate::models::LoginResponse;

/// Log in with `method` and return the client token and its lease in seconds.
///
/// # Errors
///
/// Returns `ClientError::AuthFailed` when Vault rejects the login.
pub async fn login(client: &Client, address: &str, method: &AuthMethod) -> Result<(String, u64)> {
    let (mount, body) = match method {
        AuthMethod::Kubernetes { mount, role, jwt } => (
            mount,
            json!({"role": role, "jwt": jwt.expose_secret()}),
        ),
        AuthMethod::AppRole {
            mount,
            role_id,
            secret_id,
        } => (
            mount,
            json!({"role_id": role_id.expose_secret(), "secret_id": secret_id.expose_secret()}),
        ),
        AuthMethod::Certificate { mount, role } => (mount, json!({"name": role})),
    };

    debug!(method = method.name(), mount = %mount, "Logging in to Vault");

    let url = api_url(address, ["auth", mount.as_str(), "login"])?;
    let response = match send_request(client.post(url).json(&body)).await {
        Ok(response) => response,
        Err(ClientError::ApiError { status, message, .. }) => {
            return Err(ClientError::AuthFailed(format!(
                "{} login rejected ({status}): {message}",
                method.name()
            )));
        }
        Err(e) => return Err(e),
    };

    let login: LoginResponse = response.json().await?;
    let auth = login
        .auth
        .ok_or_else(|| ClientError::InvalidResponse("Missing auth in login response".to_string()))?;

    Ok((auth.client_token, auth.lease_duration))
}
