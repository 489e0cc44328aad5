//! TLS client identity for certificate authentication.
//!
//! Two bundle layouts are accepted, both unlocked with the configured
//! certificate password:
//! - a PKCS#12 (`.pfx`/`.p12`) archive holding the key and certificate chain;
//! - a PEM bundle with the certificate chain and an encrypted PKCS#8 key.
//!
//! A PEM bundle whose key is not encrypted is used as is.

use pem::{EncodeConfig, LineEnding, Pem};
use pkcs8::EncryptedPrivateKeyInfo;
use reqwest::Identity;

use crate::error::{ClientError, Result};

const PEM_MARKER: &[u8] = b"-----BEGIN ";
const ENCRYPTED_KEY_TAG: &str = "ENCRYPTED PRIVATE KEY";
const PRIVATE_KEY_TAG: &str = "PRIVATE KEY";
const CERTIFICATE_TAG: &str = "CERTIFICATE";

/// A client certificate and key ready to be attached to the HTTP client.
pub struct ClientIdentity {
    inner: Identity,
}

impl ClientIdentity {
    /// Build an identity from a password-protected bundle.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidIdentity`] if the password does not
    /// unlock the bundle or it lacks a usable certificate and key. The
    /// password never appears in the error.
    pub fn from_bundle(bundle: &[u8], password: &str) -> Result<Self> {
        let blocks = if is_pem(bundle) {
            unlock_pem(bundle, password)?
        } else {
            unlock_pkcs12(bundle, password)?
        };

        let pem = pem::encode_many_config(
            &blocks,
            EncodeConfig::new().set_line_ending(LineEnding::LF),
        );
        let inner = Identity::from_pem(pem.as_bytes())
            .map_err(|e| ClientError::InvalidIdentity(e.to_string()))?;
        Ok(Self { inner })
    }

    pub(crate) fn into_inner(self) -> Identity {
        self.inner
    }
}

impl std::fmt::Debug for ClientIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ClientIdentity([REDACTED])")
    }
}

fn is_pem(bundle: &[u8]) -> bool {
    bundle.windows(PEM_MARKER.len()).any(|w| w == PEM_MARKER)
}

/// Decrypt any encrypted PKCS#8 key in a PEM bundle, keeping the other blocks.
fn unlock_pem(bundle: &[u8], password: &str) -> Result<Vec<Pem>> {
    let blocks = pem::parse_many(bundle)
        .map_err(|e| ClientError::InvalidIdentity(format!("malformed PEM bundle: {e}")))?;

    blocks
        .into_iter()
        .map(|block| {
            if block.tag() != ENCRYPTED_KEY_TAG {
                return Ok(block);
            }
            let info = EncryptedPrivateKeyInfo::try_from(block.contents()).map_err(|e| {
                ClientError::InvalidIdentity(format!("malformed encrypted private key: {e}"))
            })?;
            let key = info.decrypt(password).map_err(|_| {
                ClientError::InvalidIdentity(
                    "unable to decrypt the private key with the certificate password".to_string(),
                )
            })?;
            Ok(Pem::new(PRIVATE_KEY_TAG, key.as_bytes().to_vec()))
        })
        .collect()
}

/// Open a PKCS#12 archive and re-encode its key and chain as PEM blocks.
fn unlock_pkcs12(bundle: &[u8], password: &str) -> Result<Vec<Pem>> {
    let store = p12_keystore::KeyStore::from_pkcs12(bundle, password).map_err(|_| {
        ClientError::InvalidIdentity(
            "unable to open the PKCS#12 bundle with the certificate password".to_string(),
        )
    })?;

    let (_, chain) = store.private_key_chain().ok_or_else(|| {
        ClientError::InvalidIdentity("PKCS#12 bundle holds no private key".to_string())
    })?;

    let mut blocks: Vec<Pem> = chain
        .chain()
        .iter()
        .map(|cert| Pem::new(CERTIFICATE_TAG, cert.as_der().to_vec()))
        .collect();
    blocks.push(Pem::new(PRIVATE_KEY_TAG, chain.key().to_vec()));
    Ok(blocks)
}
