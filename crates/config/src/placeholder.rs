//! Placeholder grammar for configuration values.
//!
//! Responsibilities:
//! - Find `{% <kind> <key> %}` tokens inside a configuration value.
//! - Decompose a token into its kind and lookup key.
//! - Split `vault_secret` lookup keys into secret path and field.
//!
//! Does NOT handle:
//! - Fetching anything from Vault (see the resolver crate).
//! - Deciding whether an unrecognized kind is an error; that happens at
//!   resolution time.
//!
//! Invariants:
//! - Scanning is pure and total: text without tokens yields an empty list.
//! - Matching runs on the `regex` crate, whose matching time is linear in the
//!   input length; the compiled program size is capped as well.
//! - Kinds are matched case-insensitively; the original tag text is kept for
//!   error messages.

use regex::{Regex, RegexBuilder};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Tag of placeholders materialized into a single string.
pub const SECRET_FIELD_TAG: &str = "vault_secret";

/// Tag of placeholders materialized into a dictionary of sub-keys.
pub const SECRET_DICT_TAG: &str = "vault_dict";

/// Tag of placeholders materialized into the user's home directory.
pub const USER_HOME_TAG: &str = "user_home";

const PATTERN_SIZE_LIMIT: usize = 1 << 20;

// Interior may not contain '(', ')', '%' or '}'.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"\{%[^(%})]*%\}")
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
        .expect("placeholder token pattern must compile")
});

static FIELD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"[^\s{%}]+")
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
        .expect("placeholder field pattern must compile")
});

/// Errors raised by the placeholder grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderError {
    /// The token interior does not split into `<kind> <key>`.
    #[error("Could not parse the content of placeholder {placeholder}")]
    Malformed { placeholder: String },

    /// A `vault_secret` key is not of the form `<path>:<field>`.
    #[error("Could not parse placeholder secret key '{key}'")]
    MalformedSecretKey { key: String },
}

/// The type tag of a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// `vault_secret`: one field of a secret, spliced into the value.
    SecretField,
    /// `vault_dict`: every field of a secret, expanded into sub-keys.
    SecretDict,
    /// `user_home`: the user's home directory, never fetched from Vault.
    UserHome,
    /// Any other tag, kept verbatim.
    Unrecognized(String),
}

impl PlaceholderKind {
    pub fn from_tag(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case(SECRET_FIELD_TAG) {
            Self::SecretField
        } else if tag.eq_ignore_ascii_case(SECRET_DICT_TAG) {
            Self::SecretDict
        } else if tag.eq_ignore_ascii_case(USER_HOME_TAG) {
            Self::UserHome
        } else {
            Self::Unrecognized(tag.to_string())
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::SecretField => SECRET_FIELD_TAG,
            Self::SecretDict => SECRET_DICT_TAG,
            Self::UserHome => USER_HOME_TAG,
            Self::Unrecognized(tag) => tag,
        }
    }

    /// Whether resolving this kind requires a Vault lookup.
    pub fn is_store_backed(&self) -> bool {
        matches!(self, Self::SecretField | Self::SecretDict)
    }
}

impl fmt::Display for PlaceholderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A parsed placeholder token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    raw: String,
    kind: PlaceholderKind,
    key: Option<String>,
}

impl Placeholder {
    /// Parse a raw token such as `{% vault_secret mssql:password %}`.
    ///
    /// `user_home` tokens carry no key; anything after the tag is ignored.
    /// Every other token must have exactly two fields.
    pub fn parse(raw: &str) -> Result<Self, PlaceholderError> {
        let fields: Vec<&str> = FIELD_PATTERN.find_iter(raw).map(|m| m.as_str()).collect();

        match fields.as_slice() {
            [tag, ..] if tag.eq_ignore_ascii_case(USER_HOME_TAG) => {
                Ok(Self {
                    raw: raw.to_string(),
                    kind: PlaceholderKind::UserHome,
                    key: None,
                })
            }
            [tag, key] => Ok(Self {
                raw: raw.to_string(),
                kind: PlaceholderKind::from_tag(tag),
                key: Some((*key).to_string()),
            }),
            _ => Err(PlaceholderError::Malformed {
                placeholder: raw.to_string(),
            }),
        }
    }

    /// The token exactly as it appears in the configuration value.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> &PlaceholderKind {
        &self.kind
    }

    /// The lookup key; `None` for `user_home`.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Split a `vault_secret` key into `(path, field)`.
    pub fn secret_field_key(&self) -> Result<(&str, &str), PlaceholderError> {
        let key = self.key.as_deref().unwrap_or_default();
        split_field_key(key).ok_or_else(|| PlaceholderError::MalformedSecretKey {
            key: key.to_string(),
        })
    }
}

/// Find every placeholder token in `text`, in order of appearance.
pub fn scan(text: &str) -> Vec<&str> {
    TOKEN_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Whether `text` contains at least one placeholder token.
pub fn contains_placeholder(text: &str) -> bool {
    TOKEN_PATTERN.is_match(text)
}

/// Split `<path>:<field>`; any colon count other than one yields `None`.
pub fn split_field_key(key: &str) -> Option<(&str, &str)> {
    let mut parts = key.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(path), Some(field), None) => Some((path, field)),
        _ => None,
    }
}

/// Remove every `user_home` token from `text`.
///
/// Returns `None` when `text` has no `user_home` token, so callers can tell
/// "nothing to expand" apart from "expanded to the same string".
pub fn strip_user_home(text: &str) -> Option<String> {
    let mut stripped = text.to_string();
    let mut found = false;
    for raw in scan(text) {
        if matches!(Placeholder::parse(raw), Ok(p) if p.kind == PlaceholderKind::UserHome) {
            stripped = stripped.replacen(raw, "", 1);
            found = true;
        }
    }
    found.then_some(stripped)
}
