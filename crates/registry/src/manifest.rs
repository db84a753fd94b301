use serde::{Deserialize, Serialize};

/// One record of a component manifest: register `class` from `module` as `name`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ManifestEntry {
    /// Registry key.
    #[serde(default)]
    pub name: String,
    /// Module path the class lives in (e.g., "crewkit.builtin").
    #[serde(default)]
    pub module: String,
    /// Class name within the module (e.g., "EchoTool").
    #[serde(default)]
    pub class: String,
}

impl ManifestEntry {
    pub fn new(name: impl Into<String>, module: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
            class: class.into(),
        }
    }

    /// Dotted `module.class` path.
    pub fn qualified_path(&self) -> String {
        format!("{}.{}", self.module, self.class)
    }

    /// Check that every field is present.
    pub fn validate(&self) -> Result<(), String> {
        for (field, value) in [("name", &self.name), ("module", &self.module), ("class", &self.class)] {
            if value.trim().is_empty() {
                return Err(format!("manifest entry is missing '{}'", field));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry() {
        let entry: ManifestEntry = serde_json::from_str(
            r#"{"name": "search", "module": "tools.web", "class": "WebSearch"}"#,
        )
        .unwrap();

        assert_eq!(entry, ManifestEntry::new("search", "tools.web", "WebSearch"));
        assert_eq!(entry.qualified_path(), "tools.web.WebSearch");
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let entry: ManifestEntry = serde_json::from_str(r#"{"name": "search"}"#).unwrap();
        assert_eq!(entry.validate().unwrap_err(), "manifest entry is missing 'module'");

        let entry = ManifestEntry::new(" ", "m", "c");
        assert!(entry.validate().is_err());
    }
}
