use super::form::{
    schema_name_key, schema_required_key, schema_type_key, ACTION_KEY, ENABLE_EMAIL_KEY,
    PRODUCT_SCHEMA_KEY, SCHEMA_COUNT_KEY, STEP_KEY,
};
use crate::site_admin::ProfileForm;
use crate::store::ConfigurationRecord;
use crate::wizard::{
    active_steps, ProductFieldType, WizardField, WizardSession, WizardStep, COLOR_PRESETS,
    INDUSTRIES,
};
use std::fmt::Write as _;

pub const NEW_BUSINESS_FALLBACK: &str = "New Business";
const NOT_PROVIDED: &str = "Not provided";

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape_html(title)
    )
}

fn hidden(out: &mut String, name: &str, value: &str) {
    let _ = writeln!(
        out,
        "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
        escape_html(name),
        escape_html(value)
    );
}

fn text_input(out: &mut String, field: WizardField, label: &str, value: &str, kind: &str) {
    let key = field.form_key();
    let _ = writeln!(
        out,
        "<label for=\"{key}\">{label}</label>\n\
         <input type=\"{kind}\" id=\"{key}\" name=\"{key}\" value=\"{}\">",
        escape_html(value)
    );
}

fn step_fields(step: WizardStep) -> &'static [WizardField] {
    match step {
        WizardStep::BusinessInfo => &[
            WizardField::BusinessName,
            WizardField::Tagline,
            WizardField::Description,
            WizardField::Industry,
        ],
        WizardStep::Contact => &[WizardField::Email, WizardField::Phone, WizardField::Address],
        WizardStep::Branding => &[WizardField::PrimaryColor, WizardField::SecondaryColor],
        WizardStep::Email | WizardStep::ProductSchema => &[],
    }
}

/// Lets one submission through per page load, then disables every button
/// and shows the pressed button's `data-busy-label`. The submitter is
/// disabled only after the browser has captured its value.
const SUBMIT_ONCE_SCRIPT: &str = r#"<script>
document.querySelectorAll("form[data-submit-once]").forEach(function (form) {
  form.addEventListener("submit", function (event) {
    if (form.dataset.busy === "true") {
      event.preventDefault();
      return;
    }
    form.dataset.busy = "true";
    var pressed = event.submitter;
    setTimeout(function () {
      form.querySelectorAll("button[type=submit]").forEach(function (button) {
        button.disabled = true;
      });
      if (pressed && pressed.dataset.busyLabel) {
        pressed.textContent = pressed.dataset.busyLabel;
      }
    }, 0);
  });
});
window.addEventListener("pageshow", function () {
  document.querySelectorAll("form[data-submit-once]").forEach(function (form) {
    form.dataset.busy = "false";
    form.querySelectorAll("button[type=submit]").forEach(function (button) {
      button.disabled = false;
    });
  });
});
</script>"#;

/// Off-screen copy of the primary action. Enter submits a form through its
/// first submit button, so this must precede Back and the preset buttons.
fn default_action_button(out: &mut String, session: &WizardSession) {
    let (value, label) = if session.is_last_step() {
        ("submit", "Complete Setup")
    } else {
        ("next", "Continue")
    };
    let _ = writeln!(
        out,
        "<button type=\"submit\" name=\"{ACTION_KEY}\" value=\"{value}\" class=\"default-action\" \
         tabindex=\"-1\" aria-hidden=\"true\" style=\"position:absolute;left:-10000px\">{label}</button>"
    );
}

fn render_progress(out: &mut String, session: &WizardSession) {
    let steps = active_steps(&session.state().industry);
    out.push_str("<ol class=\"progress\">\n");
    for (index, step) in steps.iter().enumerate() {
        let position = index + 1;
        let class = match position.cmp(&session.position()) {
            std::cmp::Ordering::Less => "done",
            std::cmp::Ordering::Equal => "current",
            std::cmp::Ordering::Greater => "upcoming",
        };
        let _ = writeln!(out, "<li class=\"{class}\">{position}. {}</li>", step.title());
    }
    out.push_str("</ol>\n");
}

fn render_business_info(out: &mut String, session: &WizardSession) {
    let state = session.state();
    text_input(out, WizardField::BusinessName, "Business Name *", &state.business_name, "text");
    text_input(out, WizardField::Tagline, "Tagline", &state.tagline, "text");

    let _ = writeln!(
        out,
        "<label for=\"description\">Description</label>\n\
         <textarea id=\"description\" name=\"description\" rows=\"4\">{}</textarea>",
        escape_html(&state.description)
    );
    let _ = writeln!(
        out,
        "<button type=\"submit\" name=\"{ACTION_KEY}\" value=\"generate\" \
         data-busy-label=\"Generating...\">Generate tagline with AI</button>"
    );
    if let Some(ai_error) = session.ai_error() {
        let _ = writeln!(out, "<p class=\"ai-error\">{}</p>", escape_html(ai_error));
    }

    out.push_str("<label for=\"industry\">Industry</label>\n<select id=\"industry\" name=\"industry\">\n");
    out.push_str("<option value=\"\">Select an industry...</option>\n");
    for (value, label) in INDUSTRIES {
        let selected = if state.industry == value { " selected" } else { "" };
        let _ = writeln!(out, "<option value=\"{value}\"{selected}>{label}</option>");
    }
    out.push_str("</select>\n");
}

fn render_contact(out: &mut String, session: &WizardSession) {
    let state = session.state();
    text_input(out, WizardField::Email, "Business Email", &state.email, "email");
    text_input(out, WizardField::Phone, "Phone", &state.phone, "tel");
    text_input(out, WizardField::Address, "Address", &state.address, "text");
}

fn render_branding(out: &mut String, session: &WizardSession) {
    let state = session.state();
    out.push_str("<fieldset class=\"presets\">\n<legend>Color Presets</legend>\n");
    for preset in COLOR_PRESETS {
        let _ = writeln!(
            out,
            "<button type=\"submit\" name=\"{ACTION_KEY}\" value=\"preset:{}\" \
             style=\"background:{}\">{}</button>",
            escape_html(preset.name),
            preset.primary,
            escape_html(preset.name)
        );
    }
    out.push_str("</fieldset>\n");
    text_input(out, WizardField::PrimaryColor, "Primary Color", &state.primary_color, "color");
    text_input(out, WizardField::SecondaryColor, "Secondary Color", &state.secondary_color, "color");
    let _ = writeln!(
        out,
        "<div class=\"preview\" style=\"border-color:{}\"><strong style=\"color:{}\">{}</strong></div>",
        escape_html(&state.primary_color),
        escape_html(&state.secondary_color),
        escape_html(&state.business_name)
    );
}

fn render_email(out: &mut String, session: &WizardSession) {
    let checked = if session.state().enable_email {
        " checked"
    } else {
        ""
    };
    let _ = writeln!(
        out,
        "<label><input type=\"checkbox\" name=\"{ENABLE_EMAIL_KEY}\" value=\"true\"{checked}> \
         Enable email notifications for contact form submissions</label>\n\
         <p class=\"hint\">The site administrator configures the email provider.</p>"
    );
}

fn render_product_schema(out: &mut String, session: &WizardSession) {
    let fields = &session.state().product_schema;
    let _ = writeln!(
        out,
        "<p>Define the fields each product carries.</p>\n\
         <input type=\"hidden\" name=\"{SCHEMA_COUNT_KEY}\" value=\"{}\">",
        fields.len()
    );
    for (index, field) in fields.iter().enumerate() {
        let _ = writeln!(
            out,
            "<div class=\"schema-row\">\n\
             <input type=\"text\" name=\"{}\" value=\"{}\" placeholder=\"Field name\">",
            schema_name_key(index),
            escape_html(&field.name)
        );
        let _ = writeln!(out, "<select name=\"{}\">", schema_type_key(index));
        for option in [
            ProductFieldType::Text,
            ProductFieldType::Number,
            ProductFieldType::Boolean,
        ] {
            let selected = if option == field.field_type {
                " selected"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "<option value=\"{0}\"{selected}>{0}</option>",
                option.as_str()
            );
        }
        let checked = if field.required { " checked" } else { "" };
        let _ = writeln!(
            out,
            "</select>\n\
             <label><input type=\"checkbox\" name=\"{}\" value=\"true\"{checked}> Required</label>\n\
             <button type=\"submit\" name=\"{ACTION_KEY}\" value=\"remove_field:{index}\">Remove</button>\n\
             </div>",
            schema_required_key(index)
        );
    }
    let _ = writeln!(
        out,
        "<button type=\"submit\" name=\"{ACTION_KEY}\" value=\"add_field\">+ Add Field</button>"
    );
}

/// Renders the current step with visible inputs and carries every other
/// field as a hidden input so no key appears twice.
pub fn render_setup_page(session: &WizardSession, error: Option<&str>) -> String {
    let state = session.state();
    let step = session.current_step();
    let mut body = String::new();

    body.push_str("<header><h1>Site Setup</h1></header>\n");
    render_progress(&mut body, session);
    let _ = writeln!(body, "<main>\n<h2>{}</h2>", step.title());
    if let Some(message) = error.or(session.submit_error()) {
        let _ = writeln!(body, "<div class=\"error\">{}</div>", escape_html(message));
    }

    body.push_str("<form method=\"post\" action=\"/setup\" data-submit-once>\n");
    default_action_button(&mut body, session);
    hidden(&mut body, STEP_KEY, &session.position().to_string());

    let visible = step_fields(step);
    for field in crate::wizard::ALL_WIZARD_FIELDS {
        if !visible.contains(&field) {
            hidden(&mut body, field.form_key(), state.field(field));
        }
    }
    if step != WizardStep::Email {
        hidden(
            &mut body,
            ENABLE_EMAIL_KEY,
            if state.enable_email { "true" } else { "false" },
        );
    }
    if step != WizardStep::ProductSchema {
        hidden(&mut body, PRODUCT_SCHEMA_KEY, &state.product_schema_json());
    }

    match step {
        WizardStep::BusinessInfo => render_business_info(&mut body, session),
        WizardStep::Contact => render_contact(&mut body, session),
        WizardStep::Branding => render_branding(&mut body, session),
        WizardStep::Email => render_email(&mut body, session),
        WizardStep::ProductSchema => render_product_schema(&mut body, session),
    }

    body.push_str("<nav class=\"wizard-nav\">\n");
    if session.position() > 1 {
        let _ = writeln!(
            body,
            "<button type=\"submit\" name=\"{ACTION_KEY}\" value=\"back\">Back</button>"
        );
    }
    if session.is_last_step() {
        let _ = writeln!(
            body,
            "<button type=\"submit\" name=\"{ACTION_KEY}\" value=\"submit\" \
             data-busy-label=\"Saving...\">Complete Setup</button>"
        );
    } else {
        let _ = writeln!(
            body,
            "<button type=\"submit\" name=\"{ACTION_KEY}\" value=\"next\">Continue</button>"
        );
    }
    body.push_str("</nav>\n</form>\n</main>\n");
    body.push_str(SUBMIT_ONCE_SCRIPT);

    layout("Site Setup", &body)
}

pub fn provisioning_mailto(admin_email: &str, business_name: &str, email: &str) -> String {
    let contact = if email.trim().is_empty() {
        NOT_PROVIDED
    } else {
        email
    };
    let subject = format!("Provisioning Request: {business_name}");
    let body = format!(
        "\nHi,\n\n\
         A new site setup has been submitted and is waiting for provisioning.\n\n\
         BUSINESS DETAILS\n\
         ----------------\n\
         Name: {business_name}\n\
         Email: {contact}\n\n\
         REQUIRED ACTIONS\n\
         ----------------\n\
         1. Review the saved configuration:\n   bizsite provision status\n\n\
         2. (Optional) Configure the email provider for contact form notifications\n\n\
         3. Confirm provisioning at /admin/provision or run:\n   bizsite provision confirm\n\n\
         Thanks!\n"
    );
    format!(
        "mailto:{admin_email}?subject={}&body={}",
        urlencoding::encode(&subject),
        urlencoding::encode(&body)
    )
}

pub fn render_pending_page(business_name: &str, email: &str, admin_email: &str) -> String {
    let mailto = provisioning_mailto(admin_email, business_name, email);
    let body = format!(
        "<main class=\"pending\">\n\
         <h1>Setup Complete!</h1>\n\
         <p>Your configuration for <strong>{name}</strong> has been saved. \
         The site administrator needs to provision the resources before your site goes live.</p>\n\
         <a class=\"btn-primary\" href=\"{mailto}\">Send Provisioning Request</a>\n\
         <p class=\"hint\">This will open your email client with the required steps pre-filled.</p>\n\
         <h3>What happens next?</h3>\n\
         <ol>\n\
         <li>Administrator receives provisioning request</li>\n\
         <li>Resources are reviewed and configured</li>\n\
         <li>Administrator confirms at <code>/admin/provision</code></li>\n\
         <li>Your site goes live!</li>\n\
         </ol>\n\
         </main>",
        name = escape_html(business_name),
        mailto = escape_html(&mailto),
    );
    layout("Setup Pending", &body)
}

#[derive(Debug, Clone, Copy)]
pub enum ProvisionView<'a> {
    NoConfiguration,
    Pending(&'a ConfigurationRecord),
    Unavailable,
}

pub fn render_provision_page(view: ProvisionView<'_>, error: Option<&str>) -> String {
    let mut body = String::from("<main class=\"provision\">\n<h1>Provisioning Confirmation</h1>\n");
    if let Some(message) = error {
        let _ = writeln!(body, "<div class=\"error\">{}</div>", escape_html(message));
    }
    match view {
        ProvisionView::NoConfiguration => body.push_str(
            "<p>No configuration found. The customer may need to complete the setup wizard.</p>\n",
        ),
        ProvisionView::Unavailable => body.push_str(
            "<p>The configuration database could not be read. Check the database path and permissions.</p>\n",
        ),
        ProvisionView::Pending(record) => {
            body.push_str("<p>A customer has completed the setup wizard. Confirm when you are ready.</p>\n");
            let _ = writeln!(
                body,
                "<dl>\n<dt>Business</dt><dd>{}</dd>",
                escape_html(&record.business_name)
            );
            if let Some(email) = record.email.as_deref() {
                let _ = writeln!(body, "<dt>Email</dt><dd>{}</dd>", escape_html(email));
            }
            body.push_str("</dl>\n");
            let _ = writeln!(
                body,
                "<form method=\"post\" action=\"/admin/provision\">\n\
                 <input type=\"hidden\" name=\"{ACTION_KEY}\" value=\"confirm\">\n\
                 <button type=\"submit\">Confirm &amp; Activate Site</button>\n\
                 </form>"
            );
        }
    }
    body.push_str("<p class=\"hint\">This page is only accessible to administrators.</p>\n</main>");
    layout("Provisioning | Admin", &body)
}

#[derive(Debug, Clone, Copy)]
pub enum AdminConfigView<'a> {
    NoConfiguration,
    Editing(&'a ProfileForm),
    Unavailable,
}

fn labelled_input(out: &mut String, key: &str, label: &str, value: &str, kind: &str) {
    let _ = writeln!(
        out,
        "<label for=\"{key}\">{label}</label>\n\
         <input type=\"{kind}\" id=\"{key}\" name=\"{key}\" value=\"{}\">",
        escape_html(value)
    );
}

pub fn render_admin_config_page(view: AdminConfigView<'_>, error: Option<&str>, saved: bool) -> String {
    let mut body = String::from(
        "<main class=\"admin-config\">\n<h1>Site Configuration</h1>\n\
         <p>Manage your business information and branding.</p>\n",
    );
    if let Some(message) = error {
        let _ = writeln!(body, "<div class=\"error\">{}</div>", escape_html(message));
    }
    if saved {
        body.push_str("<div class=\"notice\">Changes saved.</div>\n");
    }
    match view {
        AdminConfigView::NoConfiguration => body.push_str(
            "<p>No configuration found. The customer may need to complete the setup wizard.</p>\n",
        ),
        AdminConfigView::Unavailable => body.push_str(
            "<p>The configuration database could not be read. Check the database path and permissions.</p>\n",
        ),
        AdminConfigView::Editing(form) => {
            body.push_str("<form method=\"post\" action=\"/admin/config\" data-submit-once>\n");
            labelled_input(&mut body, "businessName", "Business Name *", &form.business_name, "text");
            labelled_input(&mut body, "tagline", "Tagline", &form.tagline, "text");
            let _ = writeln!(
                body,
                "<label for=\"description\">Description</label>\n\
                 <textarea id=\"description\" name=\"description\" rows=\"3\">{}</textarea>",
                escape_html(&form.description)
            );
            labelled_input(&mut body, "phone", "Phone Number", &form.phone, "tel");
            labelled_input(&mut body, "email", "Business Email", &form.email, "email");
            labelled_input(&mut body, "address", "Business Address", &form.address, "text");
            labelled_input(&mut body, "primaryColor", "Primary Color", &form.primary_color, "color");
            labelled_input(&mut body, "secondaryColor", "Secondary Color", &form.secondary_color, "color");
            body.push_str(
                "<button type=\"submit\" data-busy-label=\"Saving...\">Save Changes</button>\n</form>\n",
            );
        }
    }
    body.push_str("</main>\n");
    body.push_str(SUBMIT_ONCE_SCRIPT);
    layout("Site Configuration | Admin", &body)
}

pub fn render_landing_page(record: &ConfigurationRecord) -> String {
    let mut body = format!(
        "<header style=\"background:{}\">\n<h1 style=\"color:{}\">{}</h1>\n",
        escape_html(&record.primary_color),
        escape_html(&record.secondary_color),
        escape_html(&record.business_name)
    );
    if let Some(tagline) = record.tagline.as_deref() {
        let _ = writeln!(body, "<p class=\"tagline\">{}</p>", escape_html(tagline));
    }
    body.push_str("</header>\n<main>\n");
    if let Some(description) = record.description.as_deref() {
        let _ = writeln!(body, "<p>{}</p>", escape_html(description));
    }
    body.push_str("<section class=\"contact\">\n");
    for value in [&record.email, &record.phone, &record.address]
        .into_iter()
        .flatten()
    {
        let _ = writeln!(body, "<p>{}</p>", escape_html(value));
    }
    body.push_str("</section>\n</main>");
    layout(&record.business_name, &body)
}

pub fn render_error_page(title: &str, message: &str) -> String {
    let body = format!(
        "<main class=\"error-page\">\n<h1>{}</h1>\n<p>{}</p>\n</main>",
        escape_html(title),
        escape_html(message)
    );
    layout(title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::WizardState;

    #[test]
    fn escape_html_covers_attribute_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn mailto_marks_missing_email() {
        let url = provisioning_mailto("ops@example.com", "Crumb", "");
        assert!(url.starts_with("mailto:ops@example.com?subject=Provisioning%20Request%3A%20Crumb&body="));
        assert!(url.contains("Email%3A%20Not%20provided"));
    }

    #[test]
    fn setup_page_never_repeats_a_field_key() {
        let state = WizardState::default()
            .with_field(WizardField::BusinessName, "Crumb")
            .with_field(WizardField::Industry, "retail")
            .with_product_field_added();
        for position in 1..=5 {
            let session = WizardSession::resume(state.clone(), position);
            let html = render_setup_page(&session, None);
            for key in ["name=\"businessName\"", "name=\"industry\"", "name=\"enableEmail\""] {
                assert_eq!(html.matches(key).count(), 1, "{key} at step {position}");
            }
        }
    }

    fn first_submit_action(html: &str) -> &str {
        let button = html
            .find("<button type=\"submit\"")
            .map(|at| &html[at..])
            .unwrap_or_default();
        let value = button
            .find("value=\"")
            .map(|at| &button[at + 7..])
            .unwrap_or_default();
        value.split('"').next().unwrap_or_default()
    }

    #[test]
    fn continue_is_enabled_on_a_fresh_page() {
        let html = render_setup_page(&WizardSession::new(), None);
        assert!(html.contains("value=\"next\">Continue</button>"));
        assert!(!html.contains(" disabled"));
    }

    #[test]
    fn enter_key_triggers_the_primary_action_on_every_step() {
        let state = WizardState::default()
            .with_field(WizardField::BusinessName, "Crumb")
            .with_field(WizardField::Industry, "retail")
            .with_product_field_added();
        for position in 1..=4 {
            let html = render_setup_page(&WizardSession::resume(state.clone(), position), None);
            assert_eq!(first_submit_action(&html), "next", "step {position}");
        }
        let html = render_setup_page(&WizardSession::resume(state, 5), None);
        assert_eq!(first_submit_action(&html), "submit");
    }

    #[test]
    fn slow_actions_disable_themselves_once_submitted() {
        let html = render_setup_page(&WizardSession::new(), None);
        assert!(html.contains("<form method=\"post\" action=\"/setup\" data-submit-once>"));
        assert!(html.contains("data-busy-label=\"Generating...\""));
        assert!(html.contains("form.dataset.busy === \"true\""));

        let last = WizardSession::resume(WizardState::default(), 4);
        assert!(render_setup_page(&last, None).contains("data-busy-label=\"Saving...\">Complete Setup"));
    }
}
