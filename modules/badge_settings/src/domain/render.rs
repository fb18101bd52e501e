//! Settings and add-ons page rendering with Handlebars
//!
//! Stored values are HTML-escaped. Extension field markup and the add-ons
//! feed are trusted and inserted verbatim.

use crate::contract::{
    fields, FormRow, LicensedAddon, PageView, SettingsError, SettingsRecord,
    DEFAULT_MANAGER_CAPABILITY,
};
use handlebars::Handlebars;
use serde_json::{json, Value};

const SELECT_TEMPLATE: &str = r#"<tr valign="top"><th scope="row"><label for="{{id}}">{{label}}</label></th>
	<td>
		<select id="{{id}}" name="badgeos_settings[{{name}}]">
{{#each options}}			<option value="{{value}}"{{#if selected}} selected="selected"{{/if}}>{{label}}</option>
{{/each}}		</select>
	</td>
</tr>
"#;

const SETTINGS_TEMPLATE: &str = r#"<div class="wrap">
	<div id="icon-options-general" class="icon32"></div>
	<h2>BadgeOS Settings</h2>
	<form method="post" action="options.php">
		<table class="form-table">
{{#if can_edit_roles}}{{#with minimum_role}}{{> badgeos_select}}{{/with}}{{#with submission_manager_role}}{{> badgeos_select}}{{/with}}{{/if}}{{#with submission_email}}{{> badgeos_select}}{{/with}}<tr valign="top"><th scope="row"><label for="submission_email_addresses">Notification email addresses:</label></th>
	<td>
		<input id="submission_email_addresses" name="badgeos_settings[submission_email_addresses]" type="text" value="{{submission_email_addresses}}" class="regular-text" />
		<p class="description">Comma-separated list of email addresses to send submission/nomination notifications, in addition to the Site Admin email.</p>
	</td>
</tr>
<tr valign="top"><th scope="row"><label for="remove_data_on_uninstall">Delete Data on Uninstall:</label></th>
	<td>
		<input id="remove_data_on_uninstall" name="badgeos_settings[remove_data_on_uninstall]" type="checkbox" {{#if remove_data_on_uninstall}}checked{{/if}} class="regular-text" />
		<p class="description">It will delete all BadgeOS DB entries on uninstall including posts, setting options, usermeta</p>
	</td>
</tr>
{{#with debug_mode}}{{> badgeos_select}}{{/with}}{{#with log_entries}}{{> badgeos_select}}{{/with}}{{#if show_network_row}}{{#with ms_show_all_achievements}}{{> badgeos_select}}{{/with}}{{/if}}{{#each extension_rows}}<tr valign="top"><th scope="row"><label for="{{id}}">{{label}}</label></th>
	<td>
		{{{input_html}}}
{{#if description}}		<p class="description">{{description}}</p>
{{/if}}	</td>
</tr>
{{/each}}{{#if licenses}}<tr><td colspan="2"><hr/><h2>BadgeOS Add-on Licenses</h2></td></tr>
{{#each licenses}}<tr valign="top"><th scope="row"><label for="badgeos_settings[licenses][{{slug}}]">{{item_name}}: </label></th>
	<td>
		<input type="text" size="30" name="badgeos_settings[licenses][{{slug}}]" id="badgeos_settings[licenses][{{slug}}]" value="{{license}}" /> <span class="badgeos-license-status {{status}}">License Status: <strong>{{status_label}}</strong></span>
	</td>
</tr>
{{/each}}{{/if}}		</table>
		<p class="submit">
			<input type="submit" class="button-primary" value="Save Settings" />
		</p>
	</form>
</div>
"#;

const ADD_ONS_TEMPLATE: &str = r#"<div class="wrap badgeos-addons">
	<div id="icon-options-general" class="icon32"></div>
	<h2>BadgeOS Add-Ons &nbsp;&mdash;&nbsp; <a href="http://badgeos.org/add-ons/?ref=badgeos" class="button-primary" target="_blank">Browse All Add-Ons</a></h2>
	<p>These add-ons extend the functionality of BadgeOS.</p>
	{{{feed}}}
</div>
"#;

const HELP_SUPPORT_TEMPLATE: &str = r#"<div class="wrap">
	<div id="icon-options-general" class="icon32"></div>
	<h2>BadgeOS Help and Support</h2>
	<h2>About BadgeOS:</h2>
	<p>BadgeOS&trade; is plugin to WordPress that allows your site's users to complete tasks, demonstrate achievements, and earn badges. You define the achievement types, organize your requirements any way you like, and choose from a range of options to determine whether each task or requirement has been achieved. Badges earned in BadgeOS are Mozilla OBI compatible through out-of-the-box integration of the "Open Credit" API by <a href="https://credly.com/" target="_blank">Credly</a>, the free web service for issuing, earning and sharing badges.</p>
	<p>BadgeOS is extremely extensible. Check out examples of what we've built with it, and stay connected to the project site for updates, add-ins and news. Share your ideas and code improvements on <a href="https://github.com/opencredit/BadgeOS" target="_blank">GitHub</a> so we can keep making BadgeOS better for everyone.</p>
{{#each about}}	{{{this}}}
{{/each}}
	<h2>Help / Support:</h2>
	<p>For support on using BadgeOS or to suggest feature enhancements, visit the <a href="http://badgeos.org" target="_blank">BadgeOS site</a>. The BadgeOS team does perform custom development that extends the BadgeOS platform in some incredibly powerful ways. <a href="http://badgeos.org/contact/" target="_blank">Contact us</a> with inquiries. See examples of <a href="http://badgeos.org/about/sample-sites/">enhanced BadgeOS projects</a>.</p>
	<p>Please submit bugs or issues to <a href="https://github.com/opencredit/BadgeOS" target="_blank">Github</a> for the BadgeOS Project.</p>
{{#each help}}	{{{this}}}
{{/each}}
	<h2>Shortcodes:</h2>
	<p>With BadgeOS activated, the following shortcodes can be placed on any page or post within WordPress to expose a variety of BadgeOS functions. Visit <a href="http://badgeos.org/support/shortcodes/" target="_blank">BadgeOS.org</a> for additional information on shortcodes.</p>
{{#each shortcodes}}	{{{this}}}
{{/each}}</div>
"#;

const ROLE_OPTIONS: &[(&str, &str)] = &[
    ("manage_options", "Administrator"),
    ("delete_others_posts", "Editor"),
    ("publish_posts", "Author"),
];

const ENABLED_FIRST: &[(&str, &str)] = &[("enabled", "Enabled"), ("disabled", "Disabled")];
const DISABLED_FIRST: &[(&str, &str)] = &[("disabled", "Disabled"), ("enabled", "Enabled")];

/// Template engine for the admin pages
pub struct SettingsRenderer {
    handlebars: Handlebars<'static>,
}

impl SettingsRenderer {
    /// Create a renderer with the built-in templates registered
    pub fn new() -> anyhow::Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_partial("badgeos_select", SELECT_TEMPLATE)?;
        handlebars.register_template_string("settings_page", SETTINGS_TEMPLATE)?;
        handlebars.register_template_string("add_ons_page", ADD_ONS_TEMPLATE)?;
        handlebars.register_template_string("help_support_page", HELP_SUPPORT_TEMPLATE)?;
        Ok(Self { handlebars })
    }

    /// Render the settings form
    pub fn settings_page(
        &self,
        settings: &SettingsRecord,
        view: PageView,
        extension_rows: &[FormRow],
        licenses: &[LicensedAddon],
    ) -> Result<String, SettingsError> {
        let ctx = settings_context(settings, view, extension_rows, licenses);
        self.render("settings_page", &ctx)
    }

    /// Render the add-ons page around already fetched feed markup
    pub fn add_ons_page(&self, feed: &str) -> Result<String, SettingsError> {
        self.render("add_ons_page", &json!({ "feed": feed }))
    }

    /// Render the help and support page; extension markup is inserted verbatim
    pub fn help_support_page(
        &self,
        about: &[String],
        help: &[String],
        shortcodes: &[String],
    ) -> Result<String, SettingsError> {
        let ctx = json!({
            "about": about,
            "help": help,
            "shortcodes": shortcodes,
        });
        self.render("help_support_page", &ctx)
    }

    fn render(&self, template: &str, ctx: &Value) -> Result<String, SettingsError> {
        self.handlebars.render(template, ctx).map_err(|e| {
            tracing::error!(template, error = %e, "Failed to render template");
            SettingsError::Render {
                message: e.to_string(),
            }
        })
    }
}

fn settings_context(
    settings: &SettingsRecord,
    view: PageView,
    extension_rows: &[FormRow],
    licenses: &[LicensedAddon],
) -> Value {
    let stored = |value: &Option<String>, default: &str| -> String {
        value.clone().unwrap_or_else(|| default.to_string())
    };

    let rows: Vec<Value> = extension_rows
        .iter()
        .map(|row| {
            json!({
                "id": row.id,
                "label": row.label,
                "input_html": row.input_html,
                "description": row.description,
            })
        })
        .collect();

    let license_rows: Vec<Value> = licenses
        .iter()
        .map(|addon| {
            let status = addon.status();
            json!({
                "slug": addon.slug,
                "item_name": decode_item_name(&addon.item_name),
                "license": addon.license,
                "status": status,
                "status_label": capitalize(status),
            })
        })
        .collect();

    json!({
        "can_edit_roles": view.can_edit_roles,
        "show_network_row": view.is_super_admin && view.is_multisite,
        "minimum_role": select(
            fields::MINIMUM_ROLE,
            "Minimum Role to Administer BadgeOS plugin: ",
            ROLE_OPTIONS,
            &stored(&settings.minimum_role, DEFAULT_MANAGER_CAPABILITY),
        ),
        "submission_manager_role": select(
            fields::SUBMISSION_MANAGER_ROLE,
            "Minimum Role to Administer Submissions/Nominations: ",
            ROLE_OPTIONS,
            &stored(&settings.submission_manager_role, DEFAULT_MANAGER_CAPABILITY),
        ),
        "submission_email": select(
            fields::SUBMISSION_EMAIL,
            "Send email when submissions/nominations are received:",
            ENABLED_FIRST,
            &stored(&settings.submission_email, ""),
        ),
        "submission_email_addresses": stored(&settings.submission_email_addresses, ""),
        "remove_data_on_uninstall": settings.remove_data_on_uninstall(),
        "debug_mode": select(
            fields::DEBUG_MODE,
            "Debug Mode:",
            DISABLED_FIRST,
            &stored(&settings.debug_mode, "disabled"),
        ),
        "log_entries": select(
            fields::LOG_ENTRIES,
            "Log Entries:",
            DISABLED_FIRST,
            &stored(&settings.log_entries, "disabled"),
        ),
        "ms_show_all_achievements": select(
            fields::MS_SHOW_ALL_ACHIEVEMENTS,
            "Show achievements earned across all sites on the network:",
            DISABLED_FIRST,
            &stored(&settings.ms_show_all_achievements, "disabled"),
        ),
        "extension_rows": rows,
        "licenses": license_rows,
    })
}

fn select(name: &str, label: &str, options: &[(&str, &str)], current: &str) -> Value {
    let options: Vec<Value> = options
        .iter()
        .map(|(value, label)| {
            json!({
                "value": value,
                "label": label,
                "selected": *value == current,
            })
        })
        .collect();

    json!({
        "id": name,
        "name": name,
        "label": label,
        "options": options,
    })
}

fn decode_item_name(name: &str) -> String {
    urlencoding::decode(name)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| name.to_string())
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
