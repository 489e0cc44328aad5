//! Centralized constants for the Vault configuration workspace.
//!
//! Environment variable names and settings-file keys are part of the
//! external contract: deployments set them, so they must not change.

// =============================================================================
// Settings Section
// =============================================================================

/// Name of the configuration section holding the Vault connection settings.
pub const VAULT_SECTION: &str = "Vault";

// =============================================================================
// Environment Variables
// =============================================================================

/// Address of the Vault server.
pub const ENV_VAULT_ADDR: &str = "VAULT_ADDR";

/// Vault mount point (secrets engine path) to read from.
pub const ENV_VAULT_MOUNTPOINT: &str = "VAULT_MOUNTPOINT";

/// Whether to skip validation of the Vault server's TLS certificate.
pub const ENV_VAULT_SKIP_VERIFY: &str = "VAULT_SKIP_VERIFY";

/// AppRole authentication method name.
pub const ENV_APPROLE_AUTH_NAME: &str = "APPROLE_AUTH_NAME";

/// Path of the file holding the AppRole role ID.
pub const ENV_APPROLE_ROLE_ID_PATH: &str = "APPROLE_ROLE_ID_PATH";

/// Path of the file holding the AppRole secret ID.
pub const ENV_APPROLE_SECRET_ID_PATH: &str = "APPROLE_SECRET_ID_PATH";

/// Kubernetes authentication method name.
pub const ENV_K8S_AUTH_NAME: &str = "VAULT_K8S_NAME";

/// Kubernetes authentication role name.
pub const ENV_K8S_ROLE: &str = "VAULT_ROLE";

/// Path of the Kubernetes service account token.
pub const ENV_SA_TOKEN_PATH: &str = "SA_TOKEN_PATH";

/// Path of the client certificate bundle.
pub const ENV_CLIENT_CERT: &str = "VAULT_CLIENT_CERT";

/// Role name used by certificate authentication.
pub const ENV_CLIENT_CERT_NAME: &str = "VAULT_CLIENT_CERT_NAME";

/// Password protecting the client certificate.
pub const ENV_CLIENT_CERT_PASSWORD: &str = "VAULT_CLIENT_CERT_PASSWORD";

/// Disables `.env` loading when set to `1` or `true`.
pub const ENV_DOTENV_DISABLED: &str = "DOTENV_DISABLED";

/// Home directory on Unix-like systems.
pub const ENV_HOME: &str = "HOME";

/// Home directory on Windows.
pub const ENV_USERPROFILE: &str = "USERPROFILE";

// =============================================================================
// Settings File Keys (inside the `Vault` section)
// =============================================================================

pub const KEY_VAULT_ADDRESS: &str = "vaultAddress";
pub const KEY_MOUNT_POINT: &str = "mountPoint";
pub const KEY_SKIP_VERIFY: &str = "vaultSkipVerify";
pub const KEY_APPROLE_AUTH_NAME: &str = "approleAuthName";
pub const KEY_ROLE_ID_PATH: &str = "roleIdPath";
pub const KEY_SECRET_ID_PATH: &str = "secretIdPath";
pub const KEY_K8S_AUTH_NAME: &str = "kubernetesAuthName";
pub const KEY_K8S_ROLE_NAME: &str = "kubernetesSaRoleName";
pub const KEY_K8S_TOKEN_PATH: &str = "kubernetesSaTokenPath";
pub const KEY_CERTIFICATE_PATH: &str = "certificatePath";
pub const KEY_CERTIFICATE_PASSWORD: &str = "certificatePassword";
// The published settings schema spells this key with a plural "Roles".
pub const KEY_CERTIFICATE_ROLE_NAME: &str = "certificateRolesName";

// =============================================================================
// Authentication Defaults
// =============================================================================

/// Default location of the Kubernetes service account token.
pub const DEFAULT_K8S_TOKEN_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";

/// Default mount name of the Kubernetes auth method.
pub const DEFAULT_K8S_AUTH_NAME: &str = "kubernetes";

/// Default mount name of the AppRole auth method.
pub const DEFAULT_APPROLE_AUTH_NAME: &str = "approle";

/// Mount name of the TLS certificate auth method.
pub const DEFAULT_CERT_AUTH_NAME: &str = "cert";

// =============================================================================
// Connection Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Buffer before token lease expiry at which a fresh login is performed.
pub const DEFAULT_EXPIRY_BUFFER_SECS: u64 = 60;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;
