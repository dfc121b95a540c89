//! Environment-variable and flag name derivation, plus the scalar parsers
//! shared by the default, environment and flag stages.

/// Derive a flag name from an environment-variable key.
///
/// The key is uppercased, `prefix` is stripped from its front (compared
/// case-insensitively), underscores become hyphens and the result is
/// lowercased: `MYAPP_FOO_BAR` with prefix `MYAPP_` yields `foo-bar`.
pub fn form_flag_name(prefix: &str, key: &str) -> String {
    let upper = key.to_uppercase();
    let prefix = prefix.to_uppercase();
    let name = upper.strip_prefix(prefix.as_str()).unwrap_or(&upper);
    name.replace('_', "-").to_lowercase()
}

/// The environment variable consulted for a field, or `None` when the field
/// declares no env suffix.
pub fn env_key(prefix: &str, suffix: &str) -> Option<String> {
    if suffix.is_empty() {
        return None;
    }
    Some(format!("{prefix}{suffix}").to_uppercase())
}

/// Parse a boolean token. Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and
/// their false counterparts; anything else is rejected.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Parse a base-10 integer with an optional sign.
pub fn parse_int(s: &str) -> Option<i64> {
    s.parse::<i64>().ok()
}

/// Join a parent path and a segment with a dot.
pub(crate) fn join_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}.{segment}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "CONFIGURATOR_";

    #[test]
    fn flag_name_lowercases() {
        assert_eq!(form_flag_name(PREFIX, "TEST"), "test");
        assert_eq!(form_flag_name(PREFIX, "test"), "test");
    }

    #[test]
    fn flag_name_hyphenates() {
        assert_eq!(form_flag_name(PREFIX, "test_foo"), "test-foo");
    }

    #[test]
    fn flag_name_strips_prefix_regardless_of_case() {
        assert_eq!(form_flag_name(PREFIX, "CONFIGURATOR_foo_bar"), "foo-bar");
        assert_eq!(form_flag_name(PREFIX, "CONFIGURATOR_FOO_BAR"), "foo-bar");
        assert_eq!(form_flag_name(PREFIX, "configurator_foo_bar"), "foo-bar");
        assert_eq!(form_flag_name("configurator_", "CONFIGURATOR_FOO"), "foo");
    }

    #[test]
    fn flag_name_only_strips_leading_prefix() {
        assert_eq!(
            form_flag_name(PREFIX, "FOO_CONFIGURATOR_BAR"),
            "foo-configurator-bar"
        );
    }

    #[test]
    fn flag_name_total_over_empty_input() {
        assert_eq!(form_flag_name(PREFIX, ""), "");
        assert_eq!(form_flag_name("", "A_B"), "a-b");
    }

    #[test]
    fn env_key_uppercases_whole_name() {
        assert_eq!(
            env_key("MYAPP_", "db_url").as_deref(),
            Some("MYAPP_DB_URL")
        );
    }

    #[test]
    fn env_key_empty_suffix_is_none() {
        assert_eq!(env_key("MYAPP_", ""), None);
    }

    #[test]
    fn parse_bool_accepts_known_tokens() {
        for t in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(t), Some(true), "{t}");
        }
        for f in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(f), Some(false), "{f}");
        }
    }

    #[test]
    fn parse_bool_rejects_others() {
        assert_eq!(parse_bool("yes"), None);
        assert_eq!(parse_bool("tRUE"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn parse_int_base_ten() {
        assert_eq!(parse_int("1234"), Some(1234));
        assert_eq!(parse_int("-5"), Some(-5));
        assert_eq!(parse_int("+5"), Some(5));
        assert_eq!(parse_int("0x10"), None);
        assert_eq!(parse_int("12.5"), None);
    }

    #[test]
    fn join_path_handles_root() {
        assert_eq!(join_path("", "foo"), "foo");
        assert_eq!(join_path("test", "foo"), "test.foo");
    }
}
