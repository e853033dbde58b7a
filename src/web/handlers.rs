use super::env::AppEnv;
use super::form::{parse_setup_form, recover_setup_form, SetupAction, ACTION_KEY};
use super::pages::{
    render_admin_config_page, render_error_page, AdminConfigView, render_landing_page, render_pending_page, render_provision_page,
    render_setup_page, ProvisionView, NEW_BUSINESS_FALLBACK,
};
use crate::ai::{polish_text, PolishRequest};
use crate::provisioning::{confirm_provisioning, ProvisionError, ProvisionOutcome};
use crate::site_admin::{update_site_profile, ProfileError, ProfileForm};
use crate::store::SetupStatus;
use crate::wizard::{
    color_preset_by_name, CopyAssistClient, CopyAssistError, CopyAssistRequest, NavError,
    NavOutcome, SessionError, SubmissionError, ValidationError, WizardSession, WizardStep,
};
use serde_json::{json, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum WebResponse {
    Html { status: u16, body: String },
    Json { status: u16, body: Value },
    Redirect { location: String },
}

impl WebResponse {
    fn html(body: String) -> Self {
        WebResponse::Html { status: 200, body }
    }

    fn redirect(location: impl Into<String>) -> Self {
        WebResponse::Redirect {
            location: location.into(),
        }
    }

    fn json_error(status: u16, message: impl Into<String>) -> Self {
        WebResponse::Json {
            status,
            body: json!({ "error": message.into() }),
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            WebResponse::Html { status, .. } | WebResponse::Json { status, .. } => *status,
            WebResponse::Redirect { .. } => 303,
        }
    }
}

fn tenant_status(env: &AppEnv) -> Option<SetupStatus> {
    match env.store.setup_status(&env.tenant_id) {
        Ok(status) => Some(status),
        Err(err) => {
            env.log.error("store.status_failed", &err.to_string());
            None
        }
    }
}

/// `GET /`: the branded landing page once live, otherwise the wizard.
pub fn home(env: &AppEnv) -> WebResponse {
    match env.store.load(&env.tenant_id) {
        Ok(Some(record)) if record.setup_complete => WebResponse::html(render_landing_page(&record)),
        Ok(_) => WebResponse::redirect("/setup"),
        Err(err) => {
            env.log.error("store.load_failed", &err.to_string());
            WebResponse::redirect("/setup")
        }
    }
}

/// `GET /setup`. An unreadable store is treated as a fresh setup.
pub fn setup_page(env: &AppEnv) -> WebResponse {
    if tenant_status(env) == Some(SetupStatus::Live) {
        return WebResponse::redirect("/");
    }
    WebResponse::html(render_setup_page(&WizardSession::new(), None))
}

fn nav_error_message(err: &NavError) -> String {
    match err {
        NavError::StepIncomplete {
            step: WizardStep::BusinessInfo,
        } => ValidationError::BusinessNameRequired.to_string(),
        other => other.to_string(),
    }
}

fn run_generate(env: &AppEnv, session: &mut WizardSession) {
    let Some(generator) = env.generator.as_deref() else {
        session.report_generate_unavailable();
        return;
    };
    let client = CopyAssistClient::new(generator).with_max_tokens(env.ai_max_tokens);
    match session.generate_with(&client) {
        Ok(Some(_)) => env.log.info("copy_assist.merged", "tagline suggestion applied"),
        Ok(None) => env.log.warn(
            "copy_assist.failed",
            session.ai_error().unwrap_or_default(),
        ),
        Err(err) => env.log.warn("copy_assist.busy", &err.to_string()),
    }
}

fn render_with_status(status: u16, session: &WizardSession, error: Option<&str>) -> WebResponse {
    WebResponse::Html {
        status,
        body: render_setup_page(session, error),
    }
}

fn run_submit(env: &AppEnv, session: &mut WizardSession) -> WebResponse {
    match session.submit_with(env.store.as_ref(), &env.tenant_id) {
        Ok(redirect) => {
            env.log.info(
                "setup.submitted",
                &format!(
                    "tenant={} outcome={:?}",
                    env.tenant_id, redirect.outcome
                ),
            );
            WebResponse::redirect(redirect.location())
        }
        Err(SessionError::Submission(SubmissionError::Validation(_))) => {
            render_with_status(400, session, None)
        }
        Err(SessionError::Submission(SubmissionError::Persistence(source))) => {
            env.log.error("setup.persist_failed", &source.to_string());
            render_with_status(500, session, None)
        }
        Err(err @ SessionError::Busy { .. }) => {
            render_with_status(409, session, Some(&err.to_string()))
        }
    }
}

/// `POST /setup`: applies one wizard action to the state carried by the form.
pub fn setup_action(env: &AppEnv, form: &HashMap<String, String>) -> WebResponse {
    if tenant_status(env) == Some(SetupStatus::Live) {
        return WebResponse::redirect("/");
    }

    let parsed = match parse_setup_form(form) {
        Ok(parsed) => parsed,
        Err(err) => {
            env.log.warn("setup.form_invalid", &err.to_string());
            let (state, position) = recover_setup_form(form);
            let session = WizardSession::resume(state, position);
            return render_with_status(400, &session, Some(&err.to_string()));
        }
    };

    let mut session = WizardSession::resume(parsed.state, parsed.position);
    let mut error = None;
    match parsed.action {
        SetupAction::Next => match session.next() {
            Ok(NavOutcome::Moved(_)) => {}
            Ok(NavOutcome::Submit) => return run_submit(env, &mut session),
            Err(err) => error = Some(nav_error_message(&err)),
        },
        SetupAction::Back => {
            if let Err(err) = session.back() {
                env.log.warn("setup.nav_rejected", &err.to_string());
            }
        }
        SetupAction::Generate => run_generate(env, &mut session),
        SetupAction::AddField => session.add_product_field(),
        SetupAction::RemoveField(index) => {
            if let Err(err) = session.remove_product_field(index) {
                error = Some(err.to_string());
            }
        }
        SetupAction::Preset(name) => match color_preset_by_name(&name) {
            Some(preset) => session.apply_color_preset(preset),
            None => error = Some(format!("Unknown color preset `{name}`")),
        },
        SetupAction::Submit => return run_submit(env, &mut session),
    }

    let status = if error.is_some() { 400 } else { 200 };
    render_with_status(status, &session, error.as_deref())
}

/// `GET /setup/pending?name=&email=`.
pub fn setup_pending(env: &AppEnv, query: &HashMap<String, String>) -> WebResponse {
    let name = query
        .get("name")
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .unwrap_or(NEW_BUSINESS_FALLBACK);
    let email = query.get("email").map(|v| v.trim()).unwrap_or_default();
    WebResponse::html(render_pending_page(name, email, &env.admin_email))
}

/// `POST /api/ai-generate`.
pub fn ai_generate(env: &AppEnv, body: &[u8]) -> WebResponse {
    let Some(generator) = env.generator.as_deref() else {
        let err = CopyAssistError::Unavailable;
        return WebResponse::json_error(err.status_code(), err.to_string());
    };

    let request: CopyAssistRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(err) => {
            env.log.warn("copy_assist.bad_request", &err.to_string());
            return WebResponse::json_error(400, format!("Invalid request body: {err}"));
        }
    };

    let client = CopyAssistClient::new(generator).with_max_tokens(env.ai_max_tokens);
    match client.generate(&request) {
        Ok(copy) => WebResponse::Json {
            status: 200,
            body: serde_json::to_value(&copy).unwrap_or_else(|_| json!({})),
        },
        Err(err) => {
            if err.status_code() >= 500 {
                env.log.error("copy_assist.failed", &err.detail());
            }
            WebResponse::json_error(err.status_code(), err.to_string())
        }
    }
}

/// `POST /api/ai-polish`: rewrites rough text as marketing copy.
pub fn ai_polish(env: &AppEnv, body: &[u8]) -> WebResponse {
    let Some(generator) = env.generator.as_deref() else {
        let err = CopyAssistError::Unavailable;
        return WebResponse::json_error(err.status_code(), err.to_string());
    };

    let request: PolishRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(err) => {
            env.log.warn("polish.bad_request", &err.to_string());
            return WebResponse::json_error(400, "Invalid JSON body");
        }
    };

    match polish_text(generator, &request, env.ai_max_tokens) {
        Ok(polished) => WebResponse::Json {
            status: 200,
            body: serde_json::to_value(&polished).unwrap_or_else(|_| json!({})),
        },
        Err(err) => {
            let status = err.status_code();
            if status >= 500 {
                let details = std::error::Error::source(&err)
                    .map(ToString::to_string)
                    .unwrap_or_default();
                env.log.error("polish.failed", &details);
                return WebResponse::Json {
                    status,
                    body: json!({ "error": err.to_string(), "details": details }),
                };
            }
            WebResponse::json_error(status, err.to_string())
        }
    }
}

/// `GET /admin/config`.
pub fn admin_config_page(env: &AppEnv) -> WebResponse {
    match env.store.load(&env.tenant_id) {
        Ok(Some(record)) => {
            let form = ProfileForm::from_record(&record);
            WebResponse::html(render_admin_config_page(
                AdminConfigView::Editing(&form),
                None,
                false,
            ))
        }
        Ok(None) => WebResponse::html(render_admin_config_page(
            AdminConfigView::NoConfiguration,
            None,
            false,
        )),
        Err(err) => {
            env.log.error("store.load_failed", &err.to_string());
            WebResponse::html(render_admin_config_page(AdminConfigView::Unavailable, None, false))
        }
    }
}

/// `POST /admin/config`. Rejected input is echoed back unchanged.
pub fn admin_config_action(env: &AppEnv, form: &HashMap<String, String>) -> WebResponse {
    let submitted = ProfileForm::from_form(form);
    match update_site_profile(env.store.as_ref(), &env.tenant_id, &submitted) {
        Ok(update) => {
            env.log.info(
                "admin.profile_updated",
                &format!("tenant={} business={}", env.tenant_id, update.business_name),
            );
            match env.store.load(&env.tenant_id) {
                Ok(Some(record)) => {
                    let saved = ProfileForm::from_record(&record);
                    WebResponse::html(render_admin_config_page(
                        AdminConfigView::Editing(&saved),
                        None,
                        true,
                    ))
                }
                _ => WebResponse::html(render_admin_config_page(
                    AdminConfigView::Editing(&submitted),
                    None,
                    true,
                )),
            }
        }
        Err(err @ ProfileError::Validation(_)) => WebResponse::Html {
            status: 400,
            body: render_admin_config_page(
                AdminConfigView::Editing(&submitted),
                Some(&err.to_string()),
                false,
            ),
        },
        Err(ProfileError::NoConfiguration { .. }) => WebResponse::Html {
            status: 404,
            body: render_admin_config_page(AdminConfigView::NoConfiguration, None, false),
        },
        Err(err @ ProfileError::Store(_)) => {
            if let Some(source) = std::error::Error::source(&err) {
                env.log.error("admin.profile_failed", &source.to_string());
            }
            WebResponse::Html {
                status: 500,
                body: render_admin_config_page(
                    AdminConfigView::Editing(&submitted),
                    Some(&err.to_string()),
                    false,
                ),
            }
        }
    }
}

/// `GET /admin/provision`.
pub fn provision_page(env: &AppEnv) -> WebResponse {
    match env.store.load(&env.tenant_id) {
        Ok(Some(record)) if record.setup_complete => WebResponse::redirect("/"),
        Ok(Some(record)) => {
            WebResponse::html(render_provision_page(ProvisionView::Pending(&record), None))
        }
        Ok(None) => WebResponse::html(render_provision_page(ProvisionView::NoConfiguration, None)),
        Err(err) => {
            env.log.error("store.load_failed", &err.to_string());
            WebResponse::html(render_provision_page(ProvisionView::Unavailable, None))
        }
    }
}

/// `POST /admin/provision` with `_action=confirm`.
pub fn provision_action(env: &AppEnv, form: &HashMap<String, String>) -> WebResponse {
    if form.get(ACTION_KEY).map(|v| v.trim()) != Some("confirm") {
        return WebResponse::Html {
            status: 400,
            body: render_error_page("Invalid action", "Only `confirm` is supported here."),
        };
    }

    match confirm_provisioning(env.store.as_ref(), &env.tenant_id) {
        Ok(outcome) => {
            if outcome == ProvisionOutcome::Activated {
                env.log.info("provision.confirmed", &format!("tenant={}", env.tenant_id));
            }
            WebResponse::redirect("/")
        }
        Err(ProvisionError::NoConfiguration { .. }) => WebResponse::Html {
            status: 404,
            body: render_provision_page(ProvisionView::NoConfiguration, None),
        },
        Err(ProvisionError::Store(err)) => {
            env.log.error("provision.failed", &err.to_string());
            WebResponse::Html {
                status: 500,
                body: render_provision_page(
                    ProvisionView::Unavailable,
                    Some("Failed to update configuration"),
                ),
            }
        }
    }
}
