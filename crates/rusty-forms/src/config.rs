// File: src/config.rs
// Purpose: Helper configuration parsing from forms.toml

use anyhow::{Context, Result};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::rules::ops;

static GLOBAL: Lazy<FormsConfig> = Lazy::new(FormsConfig::default);

/// Form helper configuration
///
/// Values are read once and never mutated; pass `&FormsConfig` around or use
/// [`FormsConfig::global`] for the built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormsConfig {
    /// Separator between component names in a control id (default: `-`)
    #[serde(default = "default_separator")]
    pub name_separator: char,

    /// Field names that collide with DOM form properties and get a `_` prefix
    #[serde(default = "default_unsafe_names")]
    pub unsafe_names: Vec<String>,

    /// Render void elements as `<input />` and boolean attributes as `checked="checked"`
    #[serde(default = "default_false")]
    pub xhtml: bool,

    /// Default validation messages keyed by operator name
    #[serde(default = "default_messages")]
    pub messages: IndexMap<String, String>,
}

fn default_separator() -> char {
    '-'
}

fn default_unsafe_names() -> Vec<String> {
    [
        "attributes",
        "children",
        "elements",
        "focus",
        "length",
        "reset",
        "style",
        "submit",
        "onsubmit",
        "form",
        "presenter",
        "action",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_false() -> bool {
    false
}

fn default_messages() -> IndexMap<String, String> {
    [
        (ops::EQUAL, "Please enter %s."),
        (ops::NOT_EQUAL, "This value should not be %s."),
        (ops::FILLED, "This field is required."),
        (ops::BLANK, "This field should be blank."),
        (ops::MIN_LENGTH, "Please enter at least %d characters."),
        (ops::MAX_LENGTH, "Please enter no more than %d characters."),
        (ops::LENGTH, "Please enter a value between %d and %d characters long."),
        (ops::EMAIL, "Please enter a valid email address."),
        (ops::URL, "Please enter a valid URL."),
        (ops::INTEGER, "Please enter a valid integer."),
        (ops::FLOAT, "Please enter a valid number."),
        (ops::MIN, "Please enter a value greater than or equal to %d."),
        (ops::MAX, "Please enter a value less than or equal to %d."),
        (ops::RANGE, "Please enter a value between %d and %d."),
        (ops::MAX_FILE_SIZE, "The size of the uploaded file can be up to %d bytes."),
        (ops::MAX_POST_SIZE, "The uploaded data exceeds the limit of %d bytes."),
        (ops::MIME_TYPE, "The uploaded file is not in the expected format."),
        (ops::IMAGE, "The uploaded file must be image in format JPEG, GIF, PNG or WebP."),
    ]
    .iter()
    .map(|(op, msg)| (op.to_string(), msg.to_string()))
    .collect()
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            name_separator: default_separator(),
            unsafe_names: default_unsafe_names(),
            xhtml: false,
            messages: default_messages(),
        }
    }
}

impl FormsConfig {
    /// Shared default configuration
    pub fn global() -> &'static FormsConfig {
        &GLOBAL
    }

    /// Load configuration from a TOML file
    ///
    /// A missing or empty file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./forms.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("forms.toml")
    }

    /// Parse configuration from TOML source
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: FormsConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Check whether a field name collides with a built-in DOM property
    pub fn is_unsafe_name(&self, name: &str) -> bool {
        self.unsafe_names.iter().any(|n| n == name)
    }

    /// Default message for an operator, if one is configured
    pub fn message_for(&self, op: &str) -> Option<&str> {
        self.messages.get(op).map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FormsConfig::default();
        assert_eq!(config.name_separator, '-');
        assert!(!config.xhtml);
        assert!(config.is_unsafe_name("length"));
        assert!(config.is_unsafe_name("submit"));
        assert!(!config.is_unsafe_name("email"));
        assert_eq!(config.message_for(ops::FILLED), Some("This field is required."));
    }

    #[test]
    fn test_empty_config() {
        let config = FormsConfig::from_toml_str("   \n").unwrap();
        assert_eq!(config, FormsConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let toml = r#"
            xhtml = true
            unsafe_names = ["length", "item"]

            [messages]
            ":filled" = "Required."
        "#;
        let config = FormsConfig::from_toml_str(toml).unwrap();
        assert!(config.xhtml);
        assert_eq!(config.name_separator, '-');
        assert!(config.is_unsafe_name("item"));
        assert!(!config.is_unsafe_name("submit"));
        assert_eq!(config.message_for(ops::FILLED), Some("Required."));
        assert_eq!(config.message_for(ops::EMAIL), None);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = FormsConfig::load("does/not/exist/forms.toml").unwrap();
        assert_eq!(config, FormsConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(FormsConfig::from_toml_str("xhtml = \"maybe\"").is_err());
    }
}
