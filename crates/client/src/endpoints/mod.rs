//! Vault REST API endpoint implementations.

mod auth;
mod kv;
mod request;

pub use auth::login;
pub use kv::read_kv2;
pub use request::send_request;

use url::Url;

use crate::error::{ClientError, Result};

/// Build `{address}/v1/...` from path parts.
///
/// Each part is split on `/` and empty segments are dropped. Every remaining
/// segment is percent-encoded, so `#` or `?` in a secret path stay in the path.
pub(crate) fn api_url<'a>(address: &str, parts: impl IntoIterator<Item = &'a str>) -> Result<Url> {
    let mut url =
        Url::parse(address).map_err(|e| ClientError::InvalidUrl(format!("{address}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| ClientError::InvalidUrl(format!("{address} cannot hold an API path")))?
        .pop_if_empty()
        .push("v1")
        .extend(
            parts
                .into_iter()
                .flat_map(|part| part.split('/'))
                .filter(|segment| !segment.is_empty()),
        );
    Ok(url)
}
