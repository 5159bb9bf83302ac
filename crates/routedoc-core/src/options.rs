//! Generation options.
//!
//! Handles loading, saving, and validating the options that control a
//! generated document:
//! - Servers listed in the document
//! - Title and version (the version is also part of the file name)
//! - Output file name prefix

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::document::{Info, Server};
use crate::error::{Result, RouteDocError};

/// Environment variable naming an options file to load.
pub const OPTIONS_ENV: &str = "ROUTEDOC_CONFIG";

/// Options file looked up in the working directory.
pub const LOCAL_OPTIONS_FILE: &str = "routedoc.toml";

/// Options for one generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// File name prefix; output is `<filename>-<version>.json`.
    pub filename: String,

    /// Servers copied into the document.
    #[serde(default)]
    pub servers: Vec<Server>,

    /// Document title and version.
    pub info: Info,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            servers: vec![Server::new("http://localhost:3000")],
            info: Info::new("API", "1.0.0"),
            filename: "openapi".to_string(),
        }
    }
}

impl GenerateOptions {
    /// Build options in code.
    pub fn new(servers: Vec<Server>, info: Info, filename: impl Into<String>) -> Self {
        Self {
            servers,
            info,
            filename: filename.into(),
        }
    }

    /// Name of the file the document is written to.
    #[must_use]
    pub fn output_file_name(&self) -> String {
        format!("{}-{}.json", self.filename, self.info.version)
    }

    /// Load options from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, unparsable or
    /// fails validation.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RouteDocError::OptionsNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let options: Self = toml::from_str(&content)?;
        options.validate()?;
        tracing::debug!(path = %path.display(), "generation options loaded");
        Ok(options)
    }

    /// Load options from the first location that exists.
    ///
    /// Looks at the path in `ROUTEDOC_CONFIG`, then `./routedoc.toml`, then
    /// the platform config directory. Falls back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `ROUTEDOC_CONFIG` points to a missing file, or a
    /// file that exists cannot be loaded.
    pub fn load() -> Result<Self> {
        if let Ok(explicit) = std::env::var(OPTIONS_ENV) {
            return Self::load_from(Path::new(&explicit));
        }

        let candidates =
            std::iter::once(PathBuf::from(LOCAL_OPTIONS_FILE)).chain(Self::user_options_path());
        for candidate in candidates {
            if candidate.exists() {
                return Self::load_from(&candidate);
            }
        }

        tracing::debug!("no options file found, using defaults");
        Ok(Self::default())
    }

    /// Save options to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check that the options describe a writable document.
    ///
    /// # Errors
    ///
    /// Returns [`RouteDocError::OptionsValidationError`] listing every
    /// problem found.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        if self.filename.trim().is_empty() {
            problems.push("filename must not be empty".to_string());
        } else if self.filename.contains(['/', '\\']) {
            problems.push(format!(
                "filename '{}' must not contain path separators",
                self.filename
            ));
        }
        if self.info.title.trim().is_empty() {
            problems.push("info.title must not be empty".to_string());
        }
        if self.info.version.trim().is_empty() {
            problems.push("info.version must not be empty".to_string());
        }
        for (index, server) in self.servers.iter().enumerate() {
            if server.url.trim().is_empty() {
                problems.push(format!("servers[{index}].url must not be empty"));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(RouteDocError::OptionsValidationError(problems.join("; ")))
        }
    }

    /// `~/.config/routedoc/routedoc.toml` or the platform equivalent.
    fn user_options_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "routedoc")
            .map(|dirs| dirs.config_dir().join(LOCAL_OPTIONS_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_output_file_name() {
        let options = GenerateOptions::new(
            vec![Server::new("https://api.example.com")],
            Info::new("Shop", "2.1.0"),
            "shop",
        );
        assert_eq!(options.output_file_name(), "shop-2.1.0.json");
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("routedoc.toml");
        std::fs::write(
            &path,
            r#"
filename = "shop"

[[servers]]
url = "https://api.example.com"

[info]
title = "Shop API"
version = "1.2.3"
"#,
        )
        .unwrap();

        let options = GenerateOptions::load_from(&path).unwrap();

        assert_eq!(options.filename, "shop");
        assert_eq!(options.servers, vec![Server::new("https://api.example.com")]);
        assert_eq!(options.info, Info::new("Shop API", "1.2.3"));
    }

    #[test]
    fn test_save_then_load_preserves_options() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("routedoc.toml");
        let options = GenerateOptions::default();

        options.save_to(&path).unwrap();

        assert_eq!(GenerateOptions::load_from(&path).unwrap(), options);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = tempdir().unwrap();
        let err = GenerateOptions::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, RouteDocError::OptionsNotFound(_)));
    }

    #[test]
    fn test_unparsable_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "filename = [").unwrap();

        let err = GenerateOptions::load_from(&path).unwrap_err();
        assert!(err.is_config_error());
        assert_eq!(err.error_code(), "OPTIONS_PARSE_ERROR");
    }

    #[test]
    fn test_validation_collects_all_problems() {
        let options = GenerateOptions::new(
            vec![Server::new(" ")],
            Info::new("", "1.0.0"),
            "out/doc",
        );

        let err = options.validate().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("path separators"));
        assert!(message.contains("info.title"));
        assert!(message.contains("servers[0].url"));
        assert!(!message.contains("info.version"));
    }
}
