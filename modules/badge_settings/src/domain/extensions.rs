//! Settings extension points
//!
//! Add-ons register a [`SettingsExtension`] to contribute license keys and
//! their own fields when the settings form is saved, and to add rows when it
//! is rendered. Extensions run in registration order; when two extensions
//! claim the same key the earlier one keeps it. Core fields are never
//! writable from an extension.

use crate::contract::{fields, FormRow, HelpSection, LicensedAddon, SettingsDelta, SettingsInput, SettingsRecord};
use std::sync::Arc;

/// Add-on hook into settings validation and rendering
pub trait SettingsExtension: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Contribute fields for a save; `merged` already holds the core fields
    fn validate(&self, _merged: &SettingsRecord, _input: &SettingsInput) -> SettingsDelta {
        SettingsDelta::default()
    }

    /// Add-ons whose license key is edited on the settings page
    fn licensed_addons(&self, _settings: &SettingsRecord) -> Vec<LicensedAddon> {
        Vec::new()
    }

    /// Extra rows appended to the settings form
    fn render_rows(&self, _settings: &SettingsRecord) -> Vec<FormRow> {
        Vec::new()
    }

    /// Markup appended to a section of the help and support page
    fn help_sections(&self, _section: HelpSection) -> Vec<String> {
        Vec::new()
    }
}

/// Ordered list of settings extensions
#[derive(Clone, Default)]
pub struct ExtensionRegistry {
    extensions: Vec<Arc<dyn SettingsExtension>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an extension; it runs after every extension registered before it
    pub fn register(&mut self, extension: Arc<dyn SettingsExtension>) {
        tracing::debug!(extension = extension.name(), "Registered settings extension");
        self.extensions.push(extension);
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Run every extension against `merged` and fold their deltas into it
    pub fn apply(&self, merged: &mut SettingsRecord, input: &SettingsInput) {
        let mut claimed_licenses: Vec<(String, &str)> = Vec::new();
        let mut claimed_extra: Vec<(String, &str)> = Vec::new();

        for extension in &self.extensions {
            let delta = extension.validate(merged, input);
            if delta.is_empty() {
                continue;
            }

            for (slug, key) in delta.licenses {
                if let Some((_, owner)) = claimed_licenses.iter().find(|(s, _)| *s == slug) {
                    tracing::warn!(
                        extension = extension.name(),
                        owner = *owner,
                        slug = %slug,
                        "License key already set by an earlier extension, ignoring"
                    );
                    continue;
                }
                merged.licenses.insert(slug.clone(), key);
                claimed_licenses.push((slug, extension.name()));
            }

            for (field, value) in delta.extra {
                if fields::CORE.contains(&field.as_str()) {
                    tracing::warn!(
                        extension = extension.name(),
                        field = %field,
                        "Extension attempted to overwrite a core setting, ignoring"
                    );
                    continue;
                }
                if let Some((_, owner)) = claimed_extra.iter().find(|(f, _)| *f == field) {
                    tracing::warn!(
                        extension = extension.name(),
                        owner = *owner,
                        field = %field,
                        "Field already set by an earlier extension, ignoring"
                    );
                    continue;
                }
                merged.extra.insert(field.clone(), value);
                claimed_extra.push((field, extension.name()));
            }
        }
    }

    /// Licensed add-ons from every extension, sorted by slug
    pub fn licensed_addons(&self, settings: &SettingsRecord) -> Vec<LicensedAddon> {
        let mut addons: Vec<LicensedAddon> = self
            .extensions
            .iter()
            .flat_map(|e| e.licensed_addons(settings))
            .collect();
        addons.sort_by(|a, b| a.slug.cmp(&b.slug));
        addons
    }

    /// Extra form rows in registration order
    pub fn render_rows(&self, settings: &SettingsRecord) -> Vec<FormRow> {
        self.extensions
            .iter()
            .flat_map(|e| e.render_rows(settings))
            .collect()
    }

    /// Help page markup for `section` in registration order
    pub fn help_sections(&self, section: HelpSection) -> Vec<String> {
        self.extensions
            .iter()
            .flat_map(|e| e.help_sections(section))
            .collect()
    }
}

/// Extension that stores submitted license keys for a fixed set of add-ons
///
/// Keys for slugs it does not own are left for other extensions.
pub struct LicenseKeysExtension {
    addons: Vec<LicensedAddon>,
}

impl LicenseKeysExtension {
    pub fn new(addons: Vec<LicensedAddon>) -> Self {
        Self { addons }
    }
}

impl SettingsExtension for LicenseKeysExtension {
    fn name(&self) -> &str {
        "license_keys"
    }

    fn validate(&self, _merged: &SettingsRecord, input: &SettingsInput) -> SettingsDelta {
        let mut delta = SettingsDelta::default();
        for addon in &self.addons {
            if let Some(key) = input.licenses.get(&addon.slug) {
                delta
                    .licenses
                    .insert(addon.slug.clone(), super::validation::sanitize_text_field(key));
            }
        }
        delta
    }

    fn licensed_addons(&self, settings: &SettingsRecord) -> Vec<LicensedAddon> {
        self.addons
            .iter()
            .map(|addon| LicensedAddon {
                license: settings
                    .licenses
                    .get(&addon.slug)
                    .cloned()
                    .unwrap_or_else(|| addon.license.clone()),
                ..addon.clone()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FieldExtension {
        name: &'static str,
        field: &'static str,
        value: serde_json::Value,
    }

    impl SettingsExtension for FieldExtension {
        fn name(&self) -> &str {
            self.name
        }

        fn validate(&self, _merged: &SettingsRecord, _input: &SettingsInput) -> SettingsDelta {
            let mut delta = SettingsDelta::default();
            delta.extra.insert(self.field.to_string(), self.value.clone());
            delta
        }
    }

    struct HelpExtension {
        name: &'static str,
        section: HelpSection,
    }

    impl SettingsExtension for HelpExtension {
        fn name(&self) -> &str {
            self.name
        }

        fn help_sections(&self, section: HelpSection) -> Vec<String> {
            if section == self.section {
                vec![format!("<p>{}</p>", self.name)]
            } else {
                Vec::new()
            }
        }
    }

    fn addon(slug: &str, status: Option<&str>) -> LicensedAddon {
        LicensedAddon {
            slug: slug.to_string(),
            item_name: slug.to_uppercase(),
            license: String::new(),
            license_status: status.map(str::to_string),
        }
    }

    #[test]
    fn test_first_registration_wins() {
        let mut registry = ExtensionRegistry::new();
        registry.register(Arc::new(FieldExtension {
            name: "first",
            field: "reports_page",
            value: json!(12),
        }));
        registry.register(Arc::new(FieldExtension {
            name: "second",
            field: "reports_page",
            value: json!(99),
        }));

        let mut merged = SettingsRecord::default();
        registry.apply(&mut merged, &SettingsInput::new());

        assert_eq!(merged.extra.get("reports_page"), Some(&json!(12)));
    }

    #[test]
    fn test_help_sections_by_section_in_order() {
        let mut registry = ExtensionRegistry::new();
        for (name, section) in [
            ("leaderboard", HelpSection::Shortcodes),
            ("reports", HelpSection::About),
            ("nominations", HelpSection::Shortcodes),
        ] {
            registry.register(Arc::new(HelpExtension { name, section }));
        }

        assert_eq!(
            registry.help_sections(HelpSection::Shortcodes),
            vec!["<p>leaderboard</p>", "<p>nominations</p>"]
        );
        assert_eq!(registry.help_sections(HelpSection::About), vec!["<p>reports</p>"]);
        assert!(registry.help_sections(HelpSection::Help).is_empty());
    }

    #[test]
    fn test_core_fields_not_writable() {
        let mut registry = ExtensionRegistry::new();
        registry.register(Arc::new(FieldExtension {
            name: "sneaky",
            field: "minimum_role",
            value: json!("read"),
        }));

        let mut merged = SettingsRecord {
            minimum_role: Some("manage_options".to_string()),
            ..Default::default()
        };
        registry.apply(&mut merged, &SettingsInput::new());

        assert_eq!(merged.minimum_role.as_deref(), Some("manage_options"));
        assert!(merged.extra.is_empty());
    }

    #[test]
    fn test_license_extension_only_takes_owned_slugs() {
        let mut registry = ExtensionRegistry::new();
        registry.register(Arc::new(LicenseKeysExtension::new(vec![addon("reports", None)])));

        let input = SettingsInput::new()
            .with_license("reports", "  KEY-123 ")
            .with_license("unknown", "KEY-999");
        let mut merged = SettingsRecord::default();
        registry.apply(&mut merged, &input);

        assert_eq!(merged.licenses.get("reports").map(String::as_str), Some("KEY-123"));
        assert!(!merged.licenses.contains_key("unknown"));
    }

    #[test]
    fn test_licensed_addons_sorted_with_stored_keys() {
        let mut registry = ExtensionRegistry::new();
        registry.register(Arc::new(LicenseKeysExtension::new(vec![
            addon("zebra", Some("valid")),
            addon("alpha", None),
        ])));

        let mut settings = SettingsRecord::default();
        settings.licenses.insert("alpha".to_string(), "A-KEY".to_string());

        let addons = registry.licensed_addons(&settings);
        let slugs: Vec<&str> = addons.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, vec!["alpha", "zebra"]);
        assert_eq!(addons[0].license, "A-KEY");
        assert_eq!(addons[0].status(), "inactive");
        assert_eq!(addons[1].status(), "valid");
    }
}
