use serde::{Deserialize, Serialize};

/// Semantic role a legacy content item plays inside a dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    #[serde(alias = "dropdown_container", alias = "dropdown")]
    Container,
    Label,
    Placeholder,
    #[serde(alias = "dropdown_option")]
    Option,
    /// Anything else the legacy table holds (text, button, link, ...)
    #[serde(other)]
    Unsupported,
}

impl ComponentType {
    pub fn is_dropdown_part(&self) -> bool {
        !matches!(self, ComponentType::Unsupported)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Container => "container",
            ComponentType::Label => "label",
            ComponentType::Placeholder => "placeholder",
            ComponentType::Option => "option",
            ComponentType::Unsupported => "unsupported",
        }
    }

    /// Parse a CLI/user spelling. Accepts the legacy `dropdown_*` names too.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "container" | "dropdown_container" | "dropdown" => Some(ComponentType::Container),
            "label" => Some(ComponentType::Label),
            "placeholder" => Some(ComponentType::Placeholder),
            "option" | "dropdown_option" => Some(ComponentType::Option),
            _ => None,
        }
    }
}

/// One translated value of one legacy content item, as returned by the
/// `content_items JOIN content_translations` read query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRow {
    pub content_key: String,

    pub component_type: ComponentType,

    pub screen_location: String,

    pub language_code: String,

    #[serde(rename = "content_value", default)]
    pub value: Option<String>,

    #[serde(default = "default_status")]
    pub status: String,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ContentRow {
    pub fn new(
        content_key: &str,
        component_type: ComponentType,
        screen_location: &str,
        language_code: &str,
        value: &str,
    ) -> Self {
        Self {
            content_key: content_key.to_string(),
            component_type,
            screen_location: screen_location.to_string(),
            language_code: language_code.to_string(),
            value: Some(value.to_string()),
            status: default_status(),
            is_active: true,
            category: None,
        }
    }

    /// The translation, or `None` when it is null or blank.
    pub fn text(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.trim().is_empty())
    }
}

fn default_status() -> String {
    "approved".to_string()
}

fn default_true() -> bool {
    true
}
