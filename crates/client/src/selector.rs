//! Ordered authentication fallback.
//!
//! Responsibilities:
//! - Try Kubernetes, then AppRole, then Certificate; the first success wins.
//! - Collect every failure reason when no strategy succeeds.
//!
//! Invariants:
//! - Selection performs no network I/O.
//! - Strategies after the successful one are not attempted.

use std::fmt;
use thiserror::Error;
use tracing::{info, warn};

use crate::client::VaultClient;
use crate::strategy::{AppRoleStrategy, AuthStrategy, CertificateStrategy, KubernetesStrategy};
use vault_config::ConnectionSettings;

/// Result of one strategy attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationOutcome {
    Established { strategy: &'static str },
    Failed { strategy: &'static str, reason: String },
}

impl AuthenticationOutcome {
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::Established { strategy } | Self::Failed { strategy, .. } => strategy,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Established { .. } => None,
            Self::Failed { reason, .. } => Some(reason),
        }
    }
}

impl fmt::Display for AuthenticationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Established { strategy } => write!(f, "{strategy}: established"),
            Self::Failed { strategy, reason } => write!(f, "{strategy}: {reason}"),
        }
    }
}

/// Every strategy failed.
#[derive(Error, Debug, Clone)]
#[error("Unable to connect to vault to retrieve configuration. {}", summarize(.outcomes))]
pub struct AuthenticationExhausted {
    pub outcomes: Vec<AuthenticationOutcome>,
}

fn summarize(outcomes: &[AuthenticationOutcome]) -> String {
    outcomes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build a client with the first strategy whose inputs are usable.
///
/// # Errors
///
/// Returns [`AuthenticationExhausted`] carrying each strategy's reason.
pub fn select_client(settings: &ConnectionSettings) -> Result<VaultClient, AuthenticationExhausted> {
    select_with(
        settings,
        &[&KubernetesStrategy, &AppRoleStrategy, &CertificateStrategy],
    )
}

/// Like [`select_client`] with an explicit strategy order.
pub fn select_with(
    settings: &ConnectionSettings,
    strategies: &[&dyn AuthStrategy],
) -> Result<VaultClient, AuthenticationExhausted> {
    let mut outcomes = Vec::with_capacity(strategies.len());

    for strategy in strategies {
        match strategy.attempt(settings) {
            Ok(client) => {
                info!(strategy = strategy.name(), "Vault authentication strategy selected");
                return Ok(client);
            }
            Err(reason) => {
                warn!(strategy = strategy.name(), reason = %reason, "Vault authentication strategy unavailable");
                outcomes.push(AuthenticationOutcome::Failed {
                    strategy: strategy.name(),
                    reason,
                });
            }
        }
    }

    Err(AuthenticationExhausted { outcomes })
}
