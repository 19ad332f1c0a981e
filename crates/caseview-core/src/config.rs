//! Conversion configuration.
//!
//! Settings come from an optional TOML file, overridden field by field by
//! explicit values (command-line flags), with `CASEVIEW_BASE_DATA` as the last
//! source for the image base directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use caseview_model::DEFAULT_MODEL_PREFIX;

use crate::error::{PipelineError, Result};

/// Environment variable consulted for `base_data`.
pub const BASE_DATA_ENV: &str = "CASEVIEW_BASE_DATA";

/// Suffix of the folder that receives converted documents.
pub const CHECKED_FOLDER_SUFFIX: &str = "_for_check";

/// Partially specified conversion settings, as read from a file or flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub base_data: Option<String>,
    pub model_prefix: Option<String>,
}

impl ConvertConfig {
    /// Loads a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| PipelineError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(path, &contents)
    }

    fn parse(path: &Path, contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| PipelineError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Fields set in `overrides` replace the ones in `self`.
    pub fn merge(self, overrides: ConvertConfig) -> Self {
        Self {
            input_dir: overrides.input_dir.or(self.input_dir),
            output_dir: overrides.output_dir.or(self.output_dir),
            base_data: overrides.base_data.or(self.base_data),
            model_prefix: overrides.model_prefix.or(self.model_prefix),
        }
    }

    /// Fills defaults, reading `base_data` from the environment when unset.
    pub fn resolve(self) -> Result<ConvertSettings> {
        let env_base = std::env::var(BASE_DATA_ENV).ok();
        self.resolve_with(env_base)
    }

    /// Same as [`ConvertConfig::resolve`] with an explicit fallback base directory.
    pub fn resolve_with(self, fallback_base_data: Option<String>) -> Result<ConvertSettings> {
        let input_dir = self.input_dir.ok_or(PipelineError::MissingSetting {
            name: "input_dir",
            hint: "pass --input-dir or set input_dir in the config file",
        })?;
        let base_data = self
            .base_data
            .or(fallback_base_data)
            .filter(|value| !value.trim().is_empty())
            .ok_or(PipelineError::MissingSetting {
                name: "base_data",
                hint: "pass --base-data, set base_data in the config file or CASEVIEW_BASE_DATA",
            })?;
        let output_dir = self
            .output_dir
            .unwrap_or_else(|| checked_folder_for(&input_dir));
        let model_prefix = self
            .model_prefix
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL_PREFIX.to_string());

        Ok(ConvertSettings {
            input_dir,
            output_dir,
            base_data,
            model_prefix,
        })
    }
}

/// Fully resolved settings for one batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertSettings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub base_data: String,
    pub model_prefix: String,
}

/// Conventional output folder next to a raw result folder: `<raw>_for_check`.
pub fn checked_folder_for(raw_dir: &Path) -> PathBuf {
    let name = raw_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    raw_dir.with_file_name(format!("{name}{CHECKED_FOLDER_SUFFIX}"))
}
