use serde::{Deserialize, Serialize};

/// Input kinds the extraction service reports for a form field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Date,
    Signature,
    Checkbox,
    Email,
    Tel,
}

impl Default for FieldType {
    fn default() -> Self {
        FieldType::Text
    }
}

/// One field of an extracted form schema.
///
/// Produced by the OCR/LLM extraction service and immutable once received.
/// `name` is machine-oriented; `label` is the human-visible text from the
/// scanned form and may be in any language. `confidence` is the extractor's
/// own score, passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormFieldDescriptor {
    pub name: String,
    #[serde(default)]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub confidence: Option<f32>,
}

impl FormFieldDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Text,
            label: label.into(),
            required: false,
            description: None,
            confidence: None,
        }
    }
}
