//! Viewer configuration.
//!
//! Parsed from TOML; every field has a default and unknown fields are
//! ignored so hosts can embed the table in a larger config file.
//!
//! ```toml
//! visible_rows = 60
//! max_scroll_position = 10000
//! small_scroll_threshold = 10
//!
//! [copy]
//! addresses = true
//! byte_code = false
//! comments = true
//! comment_column = 25
//! ```

use crate::export::CopyOptions;
use crate::scroll::{DEFAULT_MAX_SCROLL_POSITION, DEFAULT_SMALL_SCROLL_THRESHOLD};
use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;
use tracing::info;

/// Errors raised while loading a [`DisassemblyConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is syntactically fine but unusable.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Tunables for a disassembly viewport.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisassemblyConfig {
    /// Rows materialized per refresh.
    pub visible_rows: usize,
    /// Scrollbar resolution.
    pub max_scroll_position: usize,
    /// Largest scrollbar delta handled as a row step rather than a jump.
    pub small_scroll_threshold: usize,
    /// Rows scrolled per mouse wheel notch.
    pub mouse_wheel_delta: usize,
    /// Export layout.
    pub copy: CopyOptions,
}

impl Default for DisassemblyConfig {
    fn default() -> Self {
        Self {
            visible_rows: 100,
            max_scroll_position: DEFAULT_MAX_SCROLL_POSITION,
            small_scroll_threshold: DEFAULT_SMALL_SCROLL_THRESHOLD,
            mouse_wheel_delta: 3,
            copy: CopyOptions::default(),
        }
    }
}

impl DisassemblyConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!(target: "disasm.config", path = %path.display(), visible_rows = config.visible_rows, "config_loaded");
        Ok(config)
    }

    /// Rejects values the viewport cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.visible_rows == 0 {
            return Err(ConfigError::Invalid {
                field: "visible_rows",
                reason: "must be at least 1",
            });
        }
        if self.max_scroll_position == 0 {
            return Err(ConfigError::Invalid {
                field: "max_scroll_position",
                reason: "must be at least 1",
            });
        }
        if self.copy.batch_size == 0 {
            return Err(ConfigError::Invalid {
                field: "copy.batch_size",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = DisassemblyConfig::from_toml_str("").unwrap();
        assert_eq!(config, DisassemblyConfig::default());
        assert_eq!(config.copy.comment_column, 25);
        assert_eq!(config.copy.batch_size, 5000);
    }

    #[test]
    fn test_partial_copy_table() {
        let config = DisassemblyConfig::from_toml_str(
            "visible_rows = 40\nunknown = 1\n[copy]\nbyte_code = false\n",
        )
        .unwrap();
        assert_eq!(config.visible_rows, 40);
        assert!(!config.copy.byte_code);
        assert!(config.copy.addresses);
        assert!(config.copy.comments);
    }

    #[test]
    fn test_zero_rows_rejected() {
        let err = DisassemblyConfig::from_toml_str("visible_rows = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "visible_rows",
                ..
            }
        ));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = DisassemblyConfig::from_toml_str("visible_rows = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_scroll_position = 500").unwrap();
        let config = DisassemblyConfig::load(file.path()).unwrap();
        assert_eq!(config.max_scroll_position, 500);

        let missing = DisassemblyConfig::load(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
