//! Linter rules for placeholders and the `Vault` section.

use regex::Regex;
use std::ops::ControlFlow;
use std::sync::LazyLock;
use vault_config::constants::{
    KEY_APPROLE_AUTH_NAME, KEY_K8S_AUTH_NAME, KEY_K8S_ROLE_NAME, KEY_K8S_TOKEN_PATH,
    KEY_MOUNT_POINT, KEY_ROLE_ID_PATH, KEY_SECRET_ID_PATH, KEY_VAULT_ADDRESS, VAULT_SECTION,
};
use vault_config::{ConfigNode, walk_leaves};

use super::report::FileReport;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("linter pattern is valid")
}

static PLACEHOLDER_BODY: LazyLock<Regex> = LazyLock::new(|| compile(r"\{% (.+?) %\}"));

static SECRET_FIELD_RULE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^vault_secret\s+([_a-zA-Z]+(?:[-/][_a-zA-Z]+)*):([_a-zA-Z]+(?:[-/][_a-zA-Z]+)*)$")
});

static SECRET_DICT_RULE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^vault_dict\s+([_a-zA-Z]+(?:[-/][_a-zA-Z]+)*)$"));

static MOUNT_POINT_RULE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^([a-zA-Z0-9-]*/)*[a-zA-Z0-9-]+$"));

static AUTH_NAME_RULE: LazyLock<Regex> = LazyLock::new(|| compile(r"^[a-zA-Z0-9-]*$"));

static FILE_PATH_RULE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^(\{% user_home %\})?(/*[a-zA-Z0-9_\-.]+)+(.[a-zA-Z]+?)$")
});

const UNEXPECTED_PLACEHOLDER: &str =
    "Are you sure that this is correct? You might be using it for something else!";

const MISPLACED_PLACEHOLDER: &str =
    "As a best practice you should put all your secret placeholders in the base appsettings.json file!";

/// Placeholder bodies (`vault_secret a:b`) in leaves outside the `Vault` section.
fn placeholder_bodies(tree: &ConfigNode) -> Vec<String> {
    let mut bodies = Vec::new();
    for section in tree
        .children()
        .iter()
        .filter(|child| !child.key().eq_ignore_ascii_case(VAULT_SECTION))
    {
        let _ = walk_leaves(section, &mut |leaf: &ConfigNode| {
            if let Some(value) = leaf.value() {
                bodies.extend(
                    PLACEHOLDER_BODY
                        .captures_iter(value)
                        .filter_map(|c| c.get(1))
                        .map(|m| m.as_str().to_string()),
                );
            }
            ControlFlow::<()>::Continue(())
        });
    }
    bodies
}

fn shown(body: &str) -> String {
    format!("'{{% {body} %}}'")
}

fn check_placeholder(file: &mut FileReport, body: &str, rule: &Regex, message: &str) {
    if rule.is_match(body) {
        file.success(shown(body), "Meets the placeholder syntax requirements.");
    } else {
        file.failure(shown(body), message);
    }
}

/// Placeholder syntax rules for the base file.
pub(super) fn check_base_placeholders(tree: &ConfigNode, file: &mut FileReport) {
    for body in placeholder_bodies(tree) {
        if body.starts_with("vault_secret ") {
            check_placeholder(
                file,
                &body,
                &SECRET_FIELD_RULE,
                "Vault secret field placeholders should be similar to: '{% vault_secret path/to/secret:key %}'.",
            );
        } else if body.starts_with("vault_dict ") {
            check_placeholder(
                file,
                &body,
                &SECRET_DICT_RULE,
                "Vault secret dict placeholders should be similar to: '{% vault_dict path/to/secret %}'.",
            );
        } else if body.starts_with("user_home") {
            if body == "user_home" {
                file.success(shown(&body), "Meets the placeholder syntax requirements.");
            } else {
                file.failure(
                    shown(&body),
                    "The user home placeholder should be literally only: '{% user_home %}'.",
                );
            }
        } else {
            file.warning(shown(&body), UNEXPECTED_PLACEHOLDER);
        }
    }
}

/// Environment files should not carry secret placeholders at all.
pub(super) fn check_environment_placeholders(tree: &ConfigNode, file: &mut FileReport) {
    for body in placeholder_bodies(tree) {
        file.warning(shown(&body), MISPLACED_PLACEHOLDER);
    }
}

fn is_valid_address(value: &str) -> bool {
    url::Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false)
}

fn is_valid_mount_point(value: &str) -> bool {
    MOUNT_POINT_RULE.is_match(value)
        && !value.starts_with(['-', '/'])
        && !["--", "//", "-/", "/-"].iter().any(|seq| value.contains(seq))
}

fn is_valid_auth_name(value: &str) -> bool {
    AUTH_NAME_RULE.is_match(value) && !value.starts_with('-') && !value.contains("--")
}

fn is_valid_file_path(value: &str) -> bool {
    FILE_PATH_RULE.is_match(value)
}

fn check_field(file: &mut FileReport, value: &str, valid: bool, what: &str) {
    if valid {
        file.success(value, format!("is a valid {what}."));
    } else {
        file.failure(value, format!("is NOT a valid {what}."));
    }
}

/// Syntax rules for the `Vault` connection section.
pub(super) fn check_vault_section(tree: &ConfigNode, file: &mut FileReport) {
    let Some(vault) = tree.child(VAULT_SECTION) else {
        file.warning(
            "Vault Section",
            "You don't have the Vault connection configuration section in this appsettings file!",
        );
        return;
    };

    let rules: [(&str, fn(&str) -> bool, &str); 8] = [
        (KEY_VAULT_ADDRESS, is_valid_address, "Vault address"),
        (KEY_MOUNT_POINT, is_valid_mount_point, "Vault mountpoint"),
        (
            KEY_APPROLE_AUTH_NAME,
            is_valid_auth_name,
            "Vault AppRole authentication method name",
        ),
        (KEY_ROLE_ID_PATH, is_valid_file_path, "Vault AppRole ID path"),
        (
            KEY_SECRET_ID_PATH,
            is_valid_file_path,
            "Vault AppRole secret ID path",
        ),
        (
            KEY_K8S_AUTH_NAME,
            is_valid_auth_name,
            "Vault Kubernetes authentication method name",
        ),
        (
            KEY_K8S_ROLE_NAME,
            is_valid_auth_name,
            "Vault Kubernetes Service Account name",
        ),
        (
            KEY_K8S_TOKEN_PATH,
            is_valid_file_path,
            "Vault Kubernetes Service Account token path",
        ),
    ];

    for (key, is_valid, what) in rules {
        if let Some(node) = vault.child(key) {
            let value = node.value().unwrap_or_default();
            check_field(file, value, is_valid(value), what);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report_for(value: serde_json::Value, base: bool) -> FileReport {
        let tree = ConfigNode::from_json(&value);
        let mut file = FileReport::new("appsettings.json".to_string());
        if base {
            check_base_placeholders(&tree, &mut file);
        } else {
            check_environment_placeholders(&tree, &mut file);
        }
        check_vault_section(&tree, &mut file);
        file
    }

    #[test]
    fn test_secret_placeholders() {
        let file = report_for(
            json!({
                "Vault": {},
                "Good": "{% vault_secret path/to/secret:key %}",
                "Dashed": "{% vault_secret my-app/db:pass_word %}",
                "Bad": "{% vault_secret path/to/secret %}",
                "Digits": "{% vault_secret db1:pass %}"
            }),
            true,
        );
        assert_eq!(file.successes().len(), 2);
        assert_eq!(file.failures().len(), 2);
        assert!(file.failures().iter().any(|f| f.item == "'{% vault_secret path/to/secret %}'"));
    }

    #[test]
    fn test_dict_and_user_home_placeholders() {
        let file = report_for(
            json!({
                "Vault": {},
                "Dict": "{% vault_dict mssql/clients %}",
                "BadDict": "{% vault_dict mssql:clients %}",
                "Home": "{% user_home %}/cache",
                "BadHome": "{% user_home extra %}"
            }),
            true,
        );
        assert_eq!(file.successes().len(), 2);
        assert_eq!(file.failures().len(), 2);
    }

    #[test]
    fn test_unknown_placeholder_is_warning() {
        let file = report_for(json!({"Vault": {}, "Jinja": "{% if x %}"}), true);
        assert_eq!(file.warnings().len(), 1);
        assert!(file.warnings()[0].message.contains("something else"));
    }

    #[test]
    fn test_vault_section_placeholders_are_ignored() {
        let file = report_for(
            json!({"Vault": {"roleIdPath": "{% user_home %}/vault/role_id.txt"}}),
            true,
        );
        assert_eq!(file.successes().len(), 1);
        assert_eq!(file.successes()[0].message, "is a valid Vault AppRole ID path.");
    }

    #[test]
    fn test_environment_placeholders_are_warnings() {
        let file = report_for(
            json!({"Vault": {}, "Db": "{% vault_secret db:pass %}"}),
            false,
        );
        assert_eq!(file.warnings().len(), 1);
        assert!(file.failures().is_empty());
    }

    #[test]
    fn test_missing_vault_section_is_warning() {
        let file = report_for(json!({"Logging": {}}), true);
        assert_eq!(file.warnings()[0].item, "Vault Section");
    }

    #[test]
    fn test_address_rule() {
        assert!(is_valid_address("https://vault.example.com:8200"));
        assert!(is_valid_address("http://127.0.0.1:8200"));
        assert!(!is_valid_address("vault.example.com"));
        assert!(!is_valid_address("ftp://vault"));
    }

    #[test]
    fn test_mount_point_rule() {
        assert!(is_valid_mount_point("secret"));
        assert!(is_valid_mount_point("team-a/kv"));
        for bad in ["-secret", "/secret", "a--b", "a//b", "a-/b", "a/-b", "a/", "kv_1"] {
            assert!(!is_valid_mount_point(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_auth_name_rule() {
        assert!(is_valid_auth_name("approle"));
        assert!(is_valid_auth_name("k8s-prod"));
        assert!(!is_valid_auth_name("-k8s"));
        assert!(!is_valid_auth_name("k8s--prod"));
        assert!(!is_valid_auth_name("k8s/prod"));
    }

    #[test]
    fn test_file_path_rule() {
        assert!(is_valid_file_path("/var/run/secrets/token"));
        assert!(is_valid_file_path("{% user_home %}/vault/role_id.txt"));
        assert!(is_valid_file_path("role_id"));
        assert!(!is_valid_file_path("/var/run/secrets/"));
        assert!(!is_valid_file_path("{% user_home%}/role_id"));
    }
}
