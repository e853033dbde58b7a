use crate::store::{DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR};
use serde::{Deserialize, Serialize};

pub const RETAIL_INDUSTRY: &str = "retail";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPreset {
    pub name: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
}

pub const COLOR_PRESETS: [ColorPreset; 6] = [
    ColorPreset {
        name: "Sky Blue",
        primary: "#0ea5e9",
        secondary: "#1e293b",
    },
    ColorPreset {
        name: "Emerald",
        primary: "#10b981",
        secondary: "#1e293b",
    },
    ColorPreset {
        name: "Violet",
        primary: "#8b5cf6",
        secondary: "#1e293b",
    },
    ColorPreset {
        name: "Rose",
        primary: "#f43f5e",
        secondary: "#1e293b",
    },
    ColorPreset {
        name: "Amber",
        primary: "#f59e0b",
        secondary: "#1e293b",
    },
    ColorPreset {
        name: "Slate",
        primary: "#64748b",
        secondary: "#0f172a",
    },
];

pub fn color_preset_by_name(name: &str) -> Option<&'static ColorPreset> {
    COLOR_PRESETS
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name.trim()))
}

/// `(value, label)` pairs offered by the industry picker.
pub const INDUSTRIES: [(&str, &str); 7] = [
    ("consulting", "Consulting / Professional Services"),
    ("agency", "Creative Agency"),
    ("restaurant", "Restaurant / Food Service"),
    ("retail", "Retail / E-commerce"),
    ("healthcare", "Healthcare"),
    ("technology", "Technology"),
    ("other", "Other"),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductFieldType {
    #[default]
    Text,
    Number,
    Boolean,
}

impl ProductFieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductFieldType::Text => "text",
            ProductFieldType::Number => "number",
            ProductFieldType::Boolean => "boolean",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "text" => Some(ProductFieldType::Text),
            "number" => Some(ProductFieldType::Number),
            "boolean" => Some(ProductFieldType::Boolean),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductField {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: ProductFieldType,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardField {
    BusinessName,
    Tagline,
    Description,
    Industry,
    Email,
    Phone,
    Address,
    PrimaryColor,
    SecondaryColor,
}

pub const ALL_WIZARD_FIELDS: [WizardField; 9] = [
    WizardField::BusinessName,
    WizardField::Tagline,
    WizardField::Description,
    WizardField::Industry,
    WizardField::Email,
    WizardField::Phone,
    WizardField::Address,
    WizardField::PrimaryColor,
    WizardField::SecondaryColor,
];

impl WizardField {
    pub fn form_key(self) -> &'static str {
        match self {
            WizardField::BusinessName => "businessName",
            WizardField::Tagline => "tagline",
            WizardField::Description => "description",
            WizardField::Industry => "industry",
            WizardField::Email => "email",
            WizardField::Phone => "phone",
            WizardField::Address => "address",
            WizardField::PrimaryColor => "primaryColor",
            WizardField::SecondaryColor => "secondaryColor",
        }
    }

    pub fn from_form_key(key: &str) -> Option<Self> {
        ALL_WIZARD_FIELDS
            .iter()
            .copied()
            .find(|field| field.form_key() == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    ProductFieldIndex { index: usize, len: usize },
}

impl std::fmt::Display for StateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateError::ProductFieldIndex { index, len } => write!(
                f,
                "product field index {index} is out of range for {len} field(s)"
            ),
        }
    }
}

impl std::error::Error for StateError {}

/// Everything the wizard has collected so far. Updates return a new value so
/// callers can keep the previous state on any error path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    pub business_name: String,
    pub tagline: String,
    pub description: String,
    pub industry: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub enable_email: bool,
    pub product_schema: Vec<ProductField>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            business_name: String::new(),
            tagline: String::new(),
            description: String::new(),
            industry: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            secondary_color: DEFAULT_SECONDARY_COLOR.to_string(),
            enable_email: false,
            product_schema: Vec::new(),
        }
    }
}

impl WizardState {
    pub fn field(&self, field: WizardField) -> &str {
        match field {
            WizardField::BusinessName => &self.business_name,
            WizardField::Tagline => &self.tagline,
            WizardField::Description => &self.description,
            WizardField::Industry => &self.industry,
            WizardField::Email => &self.email,
            WizardField::Phone => &self.phone,
            WizardField::Address => &self.address,
            WizardField::PrimaryColor => &self.primary_color,
            WizardField::SecondaryColor => &self.secondary_color,
        }
    }

    pub fn with_field(&self, field: WizardField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            WizardField::BusinessName => next.business_name = value,
            WizardField::Tagline => next.tagline = value,
            WizardField::Description => next.description = value,
            WizardField::Industry => next.industry = value,
            WizardField::Email => next.email = value,
            WizardField::Phone => next.phone = value,
            WizardField::Address => next.address = value,
            WizardField::PrimaryColor => next.primary_color = value,
            WizardField::SecondaryColor => next.secondary_color = value,
        }
        next
    }

    pub fn with_email_enabled(&self, enabled: bool) -> Self {
        let mut next = self.clone();
        next.enable_email = enabled;
        next
    }

    pub fn with_color_preset(&self, preset: &ColorPreset) -> Self {
        let mut next = self.clone();
        next.primary_color = preset.primary.to_string();
        next.secondary_color = preset.secondary.to_string();
        next
    }

    pub fn with_product_field_added(&self) -> Self {
        let mut next = self.clone();
        next.product_schema.push(ProductField::default());
        next
    }

    pub fn with_product_field_updated(
        &self,
        index: usize,
        field: ProductField,
    ) -> Result<Self, StateError> {
        let len = self.product_schema.len();
        if index >= len {
            return Err(StateError::ProductFieldIndex { index, len });
        }
        let mut next = self.clone();
        next.product_schema[index] = field;
        Ok(next)
    }

    pub fn with_product_field_removed(&self, index: usize) -> Result<Self, StateError> {
        let len = self.product_schema.len();
        if index >= len {
            return Err(StateError::ProductFieldIndex { index, len });
        }
        let mut next = self.clone();
        next.product_schema.remove(index);
        Ok(next)
    }

    pub fn is_retail(&self) -> bool {
        self.industry.trim() == RETAIL_INDUSTRY
    }

    pub fn product_schema_json(&self) -> String {
        serde_json::to_string(&self.product_schema).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_keys_round_trip_for_every_field() {
        for field in ALL_WIZARD_FIELDS {
            assert_eq!(WizardField::from_form_key(field.form_key()), Some(field));
        }
        assert_eq!(WizardField::from_form_key("productSchema"), None);
    }

    #[test]
    fn product_field_serializes_with_type_key() {
        let field = ProductField {
            name: "Size".to_string(),
            field_type: ProductFieldType::Number,
            required: true,
        };
        let json = serde_json::to_string(&field).expect("serialize");
        assert_eq!(json, r#"{"name":"Size","type":"number","required":true}"#);
    }

    #[test]
    fn preset_lookup_ignores_case() {
        let preset = color_preset_by_name("slate").expect("preset");
        assert_eq!(preset.secondary, "#0f172a");
        assert!(color_preset_by_name("Neon").is_none());
    }
}
