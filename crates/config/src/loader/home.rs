//! `{% user_home %}` expansion for credential file paths.

use std::path::{Path, PathBuf};

use super::error::SettingsError;
use crate::placeholder::strip_user_home;

/// Platform home directory, used when the environment does not name one.
pub(crate) fn platform_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Replace a `{% user_home %}` token with `home`, joined by one separator.
///
/// Paths without the token are returned unchanged.
pub(crate) fn expand_user_home(raw: &str, home: Option<&Path>) -> Result<PathBuf, SettingsError> {
    let Some(rest) = strip_user_home(raw) else {
        return Ok(PathBuf::from(raw));
    };
    let home = home.ok_or(SettingsError::HomeDirUnavailable)?;
    let rest = rest.trim_start_matches(['/', '\\']);
    if rest.is_empty() {
        Ok(home.to_path_buf())
    } else {
        Ok(home.join(rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expands_with_single_separator() {
        let home = Path::new("/home/app");
        assert_eq!(
            expand_user_home("{% user_home %}/.vault/role_id", Some(home)).unwrap(),
            PathBuf::from("/home/app/.vault/role_id")
        );
        assert_eq!(
            expand_user_home("{% user_home %}.vault/role_id", Some(home)).unwrap(),
            PathBuf::from("/home/app/.vault/role_id")
        );
        assert_eq!(
            expand_user_home("{% user_home %}", Some(home)).unwrap(),
            PathBuf::from("/home/app")
        );
    }

    #[test]
    fn test_plain_path_is_untouched() {
        assert_eq!(
            expand_user_home("/etc/vault/role_id", None).unwrap(),
            PathBuf::from("/etc/vault/role_id")
        );
    }

    #[test]
    fn test_missing_home_is_an_error() {
        let err = expand_user_home("{% user_home %}/role_id", None).unwrap_err();
        assert!(matches!(err, SettingsError::HomeDirUnavailable));
    }
}
