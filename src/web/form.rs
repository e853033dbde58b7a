use crate::wizard::{ProductField, ProductFieldType, WizardState, ALL_WIZARD_FIELDS};
use std::collections::HashMap;

pub const STEP_KEY: &str = "step";
pub const ACTION_KEY: &str = "_action";
pub const INDEX_KEY: &str = "_index";
pub const PRESET_KEY: &str = "preset";
pub const ENABLE_EMAIL_KEY: &str = "enableEmail";
pub const PRODUCT_SCHEMA_KEY: &str = "productSchema";
pub const SCHEMA_COUNT_KEY: &str = "schemaCount";
const MAX_PRODUCT_FIELDS: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupAction {
    Next,
    Back,
    Generate,
    AddField,
    RemoveField(usize),
    Preset(String),
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupForm {
    pub state: WizardState,
    pub position: usize,
    pub action: SetupAction,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("unknown form action `{0}`")]
    UnknownAction(String),
    #[error("invalid `{key}` value `{value}`")]
    InvalidNumber { key: String, value: String },
    #[error("invalid product schema: {0}")]
    ProductSchema(String),
}

pub fn schema_name_key(index: usize) -> String {
    format!("schemaName{index}")
}

pub fn schema_type_key(index: usize) -> String {
    format!("schemaType{index}")
}

pub fn schema_required_key(index: usize) -> String {
    format!("schemaRequired{index}")
}

fn parse_flag(value: Option<&String>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("true" | "on" | "1")
    )
}

fn parse_number(key: &str, raw: &str) -> Result<usize, FormError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| FormError::InvalidNumber {
            key: key.to_string(),
            value: raw.to_string(),
        })
}

/// `_action` values may carry their argument after a colon, as in
/// `remove_field:2` or `preset:Emerald`.
fn parse_action(form: &HashMap<String, String>) -> Result<SetupAction, FormError> {
    let raw = form.get(ACTION_KEY).map(|v| v.trim()).unwrap_or("next");
    let (verb, arg) = match raw.split_once(':') {
        Some((verb, arg)) => (verb, arg.trim()),
        None => (raw, ""),
    };

    match verb {
        "" | "next" => Ok(SetupAction::Next),
        "back" => Ok(SetupAction::Back),
        "generate" => Ok(SetupAction::Generate),
        "add_field" => Ok(SetupAction::AddField),
        "remove_field" if arg.is_empty() => {
            let raw = form.get(INDEX_KEY).map(String::as_str).unwrap_or_default();
            parse_number(INDEX_KEY, raw).map(SetupAction::RemoveField)
        }
        "remove_field" => parse_number(ACTION_KEY, arg).map(SetupAction::RemoveField),
        "preset" => {
            let name = if arg.is_empty() {
                form.get(PRESET_KEY).map(|v| v.trim()).unwrap_or_default()
            } else {
                arg
            };
            Ok(SetupAction::Preset(name.to_string()))
        }
        "submit" => Ok(SetupAction::Submit),
        other => Err(FormError::UnknownAction(other.to_string())),
    }
}

fn schema_rows(
    form: &HashMap<String, String>,
    count: usize,
    unknown_type: impl Fn(&str) -> Result<ProductFieldType, FormError>,
) -> Result<Vec<ProductField>, FormError> {
    let mut fields = Vec::with_capacity(count);
    for index in 0..count {
        let field_type = match form.get(&schema_type_key(index)) {
            Some(raw) => match ProductFieldType::parse(raw) {
                Some(parsed) => parsed,
                None => unknown_type(raw.as_str())?,
            },
            None => ProductFieldType::Text,
        };
        fields.push(ProductField {
            name: form.get(&schema_name_key(index)).cloned().unwrap_or_default(),
            field_type,
            required: parse_flag(form.get(&schema_required_key(index))),
        });
    }
    Ok(fields)
}

fn parse_product_schema(form: &HashMap<String, String>) -> Result<Vec<ProductField>, FormError> {
    if let Some(count) = form.get(SCHEMA_COUNT_KEY) {
        let count = parse_number(SCHEMA_COUNT_KEY, count)?;
        if count > MAX_PRODUCT_FIELDS {
            return Err(FormError::ProductSchema(format!(
                "at most {MAX_PRODUCT_FIELDS} fields are supported"
            )));
        }
        return schema_rows(form, count, |raw| {
            Err(FormError::ProductSchema(format!("unknown field type `{raw}`")))
        });
    }

    match form.get(PRODUCT_SCHEMA_KEY).map(|v| v.trim()) {
        None | Some("") => Ok(Vec::new()),
        Some(raw) => {
            serde_json::from_str(raw).map_err(|err| FormError::ProductSchema(err.to_string()))
        }
    }
}

/// Row inputs with unknown types fall back to text; an unreadable JSON list
/// is dropped.
fn salvage_product_schema(form: &HashMap<String, String>) -> Vec<ProductField> {
    let count = form
        .get(SCHEMA_COUNT_KEY)
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .map(|count| count.min(MAX_PRODUCT_FIELDS));
    match count {
        Some(count) => {
            schema_rows(form, count, |_| Ok(ProductFieldType::Text)).unwrap_or_default()
        }
        None => Vec::new(),
    }
}

fn parse_fields(form: &HashMap<String, String>) -> WizardState {
    let mut state = WizardState::default();
    for field in ALL_WIZARD_FIELDS {
        if let Some(value) = form.get(field.form_key()) {
            state = state.with_field(field, value.clone());
        }
    }
    state.with_email_enabled(parse_flag(form.get(ENABLE_EMAIL_KEY)))
}

fn parse_position(form: &HashMap<String, String>) -> Result<usize, FormError> {
    match form.get(STEP_KEY) {
        Some(raw) => parse_number(STEP_KEY, raw),
        None => Ok(1),
    }
}

/// Rebuilds the wizard state and requested action from a form post. Missing
/// text fields read as empty; missing colours keep their defaults.
pub fn parse_setup_form(form: &HashMap<String, String>) -> Result<SetupForm, FormError> {
    let mut state = parse_fields(form);
    state.product_schema = parse_product_schema(form)?;

    Ok(SetupForm {
        state,
        position: parse_position(form)?,
        action: parse_action(form)?,
    })
}

/// Everything still readable from a post that `parse_setup_form` rejected,
/// so the page can be re-rendered without losing what the user typed.
pub fn recover_setup_form(form: &HashMap<String, String>) -> (WizardState, usize) {
    let mut state = parse_fields(form);
    state.product_schema =
        parse_product_schema(form).unwrap_or_else(|_| salvage_product_schema(form));
    (state, parse_position(form).unwrap_or(1))
}
