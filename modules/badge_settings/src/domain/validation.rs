//! Settings form validation and merge

use super::extensions::ExtensionRegistry;
use crate::contract::{fields, SettingsInput, SettingsRecord, CHECKBOX_ON};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Validate a submission and merge it into the previously stored record
///
/// Scalar fields missing from `input` keep their stored value.
/// `remove_data_on_uninstall` is the exception: an unchecked box is absent
/// from the submission, so absence clears it.
pub fn validate_settings(
    input: &SettingsInput,
    previous: &SettingsRecord,
    extensions: &ExtensionRegistry,
) -> SettingsRecord {
    let merge = |field: &str, stored: &Option<String>| -> Option<String> {
        match input.get(field) {
            Some(raw) => Some(sanitize_text_field(raw)),
            None => stored.clone(),
        }
    };

    let mut merged = SettingsRecord {
        minimum_role: merge(fields::MINIMUM_ROLE, &previous.minimum_role),
        submission_manager_role: merge(
            fields::SUBMISSION_MANAGER_ROLE,
            &previous.submission_manager_role,
        ),
        debug_mode: merge(fields::DEBUG_MODE, &previous.debug_mode),
        log_entries: merge(fields::LOG_ENTRIES, &previous.log_entries),
        ms_show_all_achievements: merge(
            fields::MS_SHOW_ALL_ACHIEVEMENTS,
            &previous.ms_show_all_achievements,
        ),
        remove_data_on_uninstall: match input.get(fields::REMOVE_DATA_ON_UNINSTALL) {
            Some(CHECKBOX_ON) => Some(CHECKBOX_ON.to_string()),
            _ => None,
        },
        submission_email: merge(fields::SUBMISSION_EMAIL, &previous.submission_email),
        submission_email_addresses: merge(
            fields::SUBMISSION_EMAIL_ADDRESSES,
            &previous.submission_email_addresses,
        ),
        licenses: previous.licenses.clone(),
        extra: previous.extra.clone(),
    };

    extensions.apply(&mut merged, input);

    tracing::debug!(
        remove_data_on_uninstall = merged.remove_data_on_uninstall(),
        extensions = extensions.len(),
        "Validated settings submission"
    );

    merged
}

static SCRIPT_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?is)<script[^>]*>.*?</script\s*>|<style[^>]*>.*?</style\s*>")
});
static TAG: LazyLock<Regex> = LazyLock::new(|| compile(r"<[^>]*>"));
static UNCLOSED_TAG: LazyLock<Regex> = LazyLock::new(|| compile(r"<[^>]*$"));
static LESS_THAN: LazyLock<Regex> = LazyLock::new(|| compile(r"<"));
static OCTET: LazyLock<Regex> = LazyLock::new(|| compile(r"%[a-fA-F0-9]{2}"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| compile(r"[\s\p{Cc}]+"));

#[allow(clippy::expect_used)] // literal patterns, covered by tests
fn compile(pattern: &'static str) -> Regex {
    Regex::new(pattern).expect("sanitizer pattern must compile")
}

/// Sanitize a single-line text value
///
/// Strips tags (dropping `<script>`/`<style>` bodies), escapes a stray `<`,
/// removes percent-encoded octets, turns control characters and whitespace
/// runs into a single space and trims the result.
pub fn sanitize_text_field(raw: &str) -> String {
    let escaped = escape_stray_less_than(raw);
    let without_scripts = SCRIPT_STYLE.replace_all(&escaped, "");
    let without_tags = TAG.replace_all(&without_scripts, "");
    // Unclosed tag swallows the remainder
    let mut filtered = UNCLOSED_TAG.replace_all(&without_tags, "").into_owned();

    while OCTET.is_match(&filtered) {
        filtered = OCTET.replace_all(&filtered, "").into_owned();
    }

    WHITESPACE.replace_all(&filtered, " ").trim().to_string()
}

/// `<` that cannot open a tag becomes `&lt;`
fn escape_stray_less_than(raw: &str) -> Cow<'_, str> {
    LESS_THAN.replace_all(raw, |caps: &Captures<'_>| {
        let end = caps.get(0).map_or(raw.len(), |m| m.end());
        let opens_tag = raw[end..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'));
        if opens_tag { "<" } else { "&lt;" }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn stored() -> SettingsRecord {
        SettingsRecord {
            minimum_role: Some("delete_others_posts".to_string()),
            submission_manager_role: Some("publish_posts".to_string()),
            debug_mode: Some("enabled".to_string()),
            log_entries: Some("disabled".to_string()),
            ms_show_all_achievements: Some("enabled".to_string()),
            remove_data_on_uninstall: Some("on".to_string()),
            submission_email: Some("enabled".to_string()),
            submission_email_addresses: Some("a@example.test".to_string()),
            licenses: BTreeMap::from([("reports".to_string(), "KEY".to_string())]),
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_empty_input_preserves_scalars() {
        let previous = stored();
        let merged = validate_settings(&SettingsInput::new(), &previous, &ExtensionRegistry::new());

        assert_eq!(merged.minimum_role, previous.minimum_role);
        assert_eq!(merged.submission_manager_role, previous.submission_manager_role);
        assert_eq!(merged.debug_mode, previous.debug_mode);
        assert_eq!(merged.log_entries, previous.log_entries);
        assert_eq!(merged.ms_show_all_achievements, previous.ms_show_all_achievements);
        assert_eq!(merged.submission_email, previous.submission_email);
        assert_eq!(merged.submission_email_addresses, previous.submission_email_addresses);
        assert_eq!(merged.licenses, previous.licenses);
    }

    #[test]
    fn test_absent_checkbox_clears_remove_data() {
        let merged = validate_settings(&SettingsInput::new(), &stored(), &ExtensionRegistry::new());
        assert_eq!(merged.remove_data_on_uninstall, None);
        assert!(!merged.remove_data_on_uninstall());
    }

    #[test]
    fn test_checked_box_sets_remove_data() {
        let input = SettingsInput::new().with("remove_data_on_uninstall", "on");
        let merged = validate_settings(&input, &SettingsRecord::default(), &ExtensionRegistry::new());
        assert_eq!(merged.remove_data_on_uninstall.as_deref(), Some("on"));
    }

    #[test]
    fn test_other_checkbox_values_clear_remove_data() {
        for value in ["ON", "1", "true", " on", ""] {
            let input = SettingsInput::new().with("remove_data_on_uninstall", value);
            let merged = validate_settings(&input, &stored(), &ExtensionRegistry::new());
            assert_eq!(merged.remove_data_on_uninstall, None, "value {:?}", value);
        }
    }

    #[test]
    fn test_submitted_fields_are_sanitized() {
        let input = SettingsInput::new()
            .with("minimum_role", "  publish_posts\n")
            .with("debug_mode", "<b>disabled</b>")
            .with("submission_email_addresses", "a@example.test,\tb@example.test");
        let merged = validate_settings(&input, &stored(), &ExtensionRegistry::new());

        assert_eq!(merged.minimum_role.as_deref(), Some("publish_posts"));
        assert_eq!(merged.debug_mode.as_deref(), Some("disabled"));
        assert_eq!(
            merged.submission_email_addresses.as_deref(),
            Some("a@example.test, b@example.test")
        );
        // untouched
        assert_eq!(merged.log_entries.as_deref(), Some("disabled"));
    }

    #[test]
    fn test_absent_everywhere_stays_absent() {
        let input = SettingsInput::new().with("debug_mode", "enabled");
        let merged = validate_settings(&input, &SettingsRecord::default(), &ExtensionRegistry::new());

        assert_eq!(merged.debug_mode.as_deref(), Some("enabled"));
        assert_eq!(merged.minimum_role, None);
        assert_eq!(merged.submission_manager_role, None);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let input = SettingsInput::new()
            .with("minimum_role", "publish_posts")
            .with("remove_data_on_uninstall", "on");
        let registry = ExtensionRegistry::new();
        let once = validate_settings(&input, &stored(), &registry);
        let twice = validate_settings(&input, &once, &registry);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sanitize_strips_tags_and_scripts() {
        assert_eq!(sanitize_text_field("<em>Editor</em>"), "Editor");
        assert_eq!(
            sanitize_text_field("ok<script>alert('x')</script> done"),
            "ok done"
        );
        assert_eq!(sanitize_text_field("a <style>p{}</style>b"), "a b");
        assert_eq!(sanitize_text_field("broken <div"), "broken");
        assert_eq!(sanitize_text_field("<SCRIPT type=\"x\">a\nb</Script >c"), "c");
    }

    #[test]
    fn test_sanitize_unclosed_script_keeps_text() {
        assert_eq!(sanitize_text_field("a <script>x"), "a x");
    }

    #[test]
    fn test_sanitize_escapes_stray_angle_bracket() {
        assert_eq!(sanitize_text_field("1 < 2"), "1 &lt; 2");
        assert_eq!(sanitize_text_field("a << b"), "a &lt;&lt; b");
        assert_eq!(sanitize_text_field("x <3 <b>y</b>"), "x &lt;3 y");
    }

    #[test]
    fn test_sanitize_control_characters_and_whitespace() {
        assert_eq!(sanitize_text_field("  a\u{0}b \r\n\t c  "), "a b c");
        assert_eq!(sanitize_text_field(""), "");
        assert_eq!(sanitize_text_field(" \n\t "), "");
    }

    #[test]
    fn test_sanitize_removes_octets() {
        assert_eq!(sanitize_text_field("manage%20options"), "manageoptions");
        assert_eq!(sanitize_text_field("%%4141x"), "x");
        assert_eq!(sanitize_text_field("%2%41x"), "%2x");
        assert_eq!(sanitize_text_field("100%"), "100%");
        assert_eq!(sanitize_text_field("Éditeur"), "Éditeur");
    }
}
