//! Configuration file loading

use anyhow::{Context as _, Result};
use ch_lower::LowerOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Compiler configuration, usually read from `choop.toml`
///
/// ```toml
/// [lowering]
/// stack_list = "locals"
/// fold_constants = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Lowering options
    #[serde(default)]
    pub lowering: LowerOptions,
}

impl Config {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a valid configuration.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML, unknown keys or values of the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_lowering_table() {
        let config = Config::from_toml_str(
            r#"
            [lowering]
            stack_list = "locals"
            fold_constants = false
            "#,
        )
        .unwrap();

        assert_eq!(config.lowering.stack_list, "locals");
        assert!(!config.lowering.fold_constants);
        assert_eq!(config.lowering.return_variable_prefix, "return ");
        assert_eq!(config.lowering.max_inline_repetitions, 10_000);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = Config::from_toml_str("[lowering]\nstack = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[lowering]\nmax_inline_repetitions = 16").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.lowering.max_inline_repetitions, 16);
    }

    #[test]
    fn test_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("choop.toml");

        let error = Config::from_file(&path).unwrap_err();
        assert!(error.to_string().contains("choop.toml"));
    }
}
