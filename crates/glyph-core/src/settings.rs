//! Build settings loaded from TOML.
//!
//! - `Settings::default()` parses the embedded `default_settings.toml`
//! - `parse_settings_toml` parses and validates a custom file
//!
//! Settings are passed to the builder explicitly; the alias table in
//! particular is never a hidden global.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::catalog::category_key;
use crate::dict::DedupPolicy;
use crate::resolver::AliasTable;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub build: BuildSettings,
    /// Legacy category → current category, applied to codes before resolution.
    #[serde(default)]
    pub category_remap: BTreeMap<String, String>,
    #[serde(default)]
    aliases: AliasTable,
}

impl Settings {
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn with_aliases(mut self, aliases: AliasTable) -> Self {
        self.aliases = aliases;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("default settings TOML must be valid")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildSettings {
    /// Separator between sign codes in a record's glyph field.
    pub delimiter: String,
    #[serde(default)]
    pub dedup: DedupPolicy,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn invalid(field: impl Into<String>, reason: &str) -> SettingsError {
    SettingsError::InvalidValue {
        field: field.into(),
        reason: reason.to_string(),
    }
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    if s.build.delimiter.is_empty() {
        return Err(invalid("build.delimiter", "must not be empty"));
    }
    if s.build.delimiter.chars().any(char::is_whitespace) {
        return Err(invalid("build.delimiter", "must not contain whitespace"));
    }

    for (from, to) in &s.category_remap {
        let field = format!("category_remap.{from}");
        if category_key(from) != Some(from.as_str()) {
            return Err(invalid(field, "key must be a category code"));
        }
        if category_key(to) != Some(to.as_str()) {
            return Err(invalid(field, "value must be a category code"));
        }
    }

    for (code, target) in s.aliases.iter() {
        if code.is_empty() {
            return Err(invalid("aliases", "empty code"));
        }
        if target.is_empty() {
            return Err(invalid(format!("aliases.{code}"), "must not be empty"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.build.delimiter, "-");
        assert_eq!(s.build.dedup, DedupPolicy::AllFieldsDiffer);
        assert_eq!(s.category_remap.get("J").map(String::as_str), Some("Aa"));
        let aliases = s.aliases();
        assert_eq!(aliases.len(), 6);
        assert_eq!(aliases.get("Y1V"), Some("Y1"));
        assert_eq!(aliases.get("X6"), Some("X6A"));
        assert_eq!(aliases.get("B12"), Some("B9"));
        assert_eq!(aliases.get("O90"), Some("O8"));
        assert_eq!(aliases.get("O90A"), Some("O8"));
        assert_eq!(aliases.get("G87"), Some("G20"));
    }

    #[test]
    fn default_matches_embedded_toml() {
        let s = Settings::default();
        assert_eq!(s.aliases().len(), 6);
        assert_eq!(default_toml(), DEFAULT_SETTINGS_TOML);
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[build]
delimiter = ":"
dedup = "exact-duplicate"

[category_remap]
J = "Aa"
Q = "R"

[aliases]
A99 = "A1"
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.build.delimiter, ":");
        assert_eq!(s.build.dedup, DedupPolicy::ExactDuplicate);
        assert_eq!(s.category_remap.len(), 2);
        assert_eq!(s.aliases().get("A99"), Some("A1"));
    }

    #[test]
    fn optional_sections_default() {
        let s = parse_settings_toml("[build]\ndelimiter = \"-\"\n").unwrap();
        assert_eq!(s.build.dedup, DedupPolicy::AllFieldsDiffer);
        assert!(s.category_remap.is_empty());
        assert!(s.aliases().is_empty());
    }

    #[test]
    fn error_unknown_dedup_policy() {
        let toml = "[build]\ndelimiter = \"-\"\ndedup = \"strict\"\n";
        assert!(matches!(
            parse_settings_toml(toml),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn error_empty_delimiter() {
        let err = parse_settings_toml("[build]\ndelimiter = \"\"\n").unwrap_err();
        assert!(
            matches!(err, SettingsError::InvalidValue { ref field, .. } if field == "build.delimiter")
        );
    }

    #[test]
    fn error_whitespace_delimiter() {
        let err = parse_settings_toml("[build]\ndelimiter = \" \"\n").unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
    }

    #[test]
    fn error_bad_remap_category() {
        let toml = "[build]\ndelimiter = \"-\"\n[category_remap]\nJ = \"a1\"\n";
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(
            matches!(err, SettingsError::InvalidValue { ref field, .. } if field == "category_remap.J")
        );
    }

    #[test]
    fn error_empty_alias_target() {
        let toml = "[build]\ndelimiter = \"-\"\n[aliases]\nG87 = \"\"\n";
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(
            matches!(err, SettingsError::InvalidValue { ref field, .. } if field == "aliases.G87")
        );
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn with_aliases_replaces_table() {
        let table: AliasTable = [("A9", "A1")].into_iter().collect();
        let s = Settings::default().with_aliases(table);
        assert_eq!(s.aliases().len(), 1);
    }
}
