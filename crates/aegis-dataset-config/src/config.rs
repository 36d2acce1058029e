// crates/aegis-dataset-config/src/config.rs
// ============================================================================
// Module: Aegis Dataset Configuration
// Description: Configuration loading and validation for dataset runs.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: aegis-dataset-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The path comes from the caller, then `AEGIS_DATASET_CONFIG`, then
//! `./aegis-dataset.toml`. Only the implicit default file may be absent, in
//! which case built-in defaults apply; an explicitly named file that cannot be
//! read is an error. Unknown keys are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use aegis_dataset_core::DEFAULT_MAX_ATTEMPTS;
use aegis_dataset_core::DatasetSplit;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "aegis-dataset.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "AEGIS_DATASET_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;
/// Smallest accepted per-sample attempt ceiling.
pub(crate) const MIN_MAX_ATTEMPTS: usize = 1;
/// Largest accepted per-sample attempt ceiling.
pub(crate) const MAX_MAX_ATTEMPTS: usize = 1000;
/// Largest accepted sample count for one split.
pub(crate) const MAX_SPLIT_SAMPLES: usize = 10_000_000;
/// Default training split size.
pub(crate) const DEFAULT_TRAIN_SAMPLES: usize = 12_000;
/// Default size of each evaluation split.
pub(crate) const DEFAULT_EVAL_SAMPLES: usize = 1_000;
/// Default output directory.
pub(crate) const DEFAULT_OUT_DIR: &str = "DataSet";

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Dataset run configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
    /// Sampling configuration.
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Split sizes.
    #[serde(default)]
    pub splits: SplitsConfig,
    /// Output and schema document paths.
    #[serde(default)]
    pub paths: PathsConfig,
}

impl DatasetConfig {
    /// Loads configuration using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, env::var_os(CONFIG_ENV_VAR))
    }

    /// Loads configuration with an explicit value for the override variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load_with_env(path: Option<&Path>, env_path: Option<OsString>) -> Result<Self, ConfigError> {
        let source = resolve_path(path, env_path)?;
        validate_path(source.path())?;
        let bytes = match fs::read(source.path()) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound && source.is_default() => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(ConfigError::Io(format!("{}: {err}", source.path().display())));
            }
        };
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::Invalid`] when a value is out of range.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generation.validate()?;
        self.splits.validate()?;
        self.paths.validate()
    }
}

/// Sampling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// Seed for the single run RNG.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Attempts allowed per sample before the run aborts.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl GenerationConfig {
    /// Validates the attempt ceiling range.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_MAX_ATTEMPTS..=MAX_MAX_ATTEMPTS).contains(&self.max_attempts) {
            return Err(ConfigError::Invalid(format!(
                "generation.max_attempts must be between {MIN_MAX_ATTEMPTS} and {MAX_MAX_ATTEMPTS}"
            )));
        }
        Ok(())
    }
}

/// Sample counts per split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplitsConfig {
    /// Training split size.
    #[serde(default = "default_train_samples")]
    pub train: usize,
    /// First evaluation split size.
    #[serde(default = "default_eval_samples")]
    pub eval_a: usize,
    /// Second (degraded-context) evaluation split size.
    #[serde(default = "default_eval_samples")]
    pub eval_b: usize,
}

impl Default for SplitsConfig {
    fn default() -> Self {
        Self {
            train: default_train_samples(),
            eval_a: default_eval_samples(),
            eval_b: default_eval_samples(),
        }
    }
}

impl SplitsConfig {
    /// Returns the configured size of `split`.
    #[must_use]
    pub const fn get(&self, split: DatasetSplit) -> usize {
        match split {
            DatasetSplit::Train => self.train,
            DatasetSplit::EvalA => self.eval_a,
            DatasetSplit::EvalB => self.eval_b,
        }
    }

    /// Validates per-split upper bounds.
    fn validate(&self) -> Result<(), ConfigError> {
        for split in DatasetSplit::ALL {
            if self.get(split) > MAX_SPLIT_SAMPLES {
                return Err(ConfigError::Invalid(format!(
                    "splits.{} must be at most {MAX_SPLIT_SAMPLES}",
                    split.as_str()
                )));
            }
        }
        Ok(())
    }
}

/// Output directory and optional schema document overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory receiving the three split files.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    /// Context tool document; the bundled document when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_schema: Option<PathBuf>,
    /// Action tool document; the bundled document when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_schema: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            context_schema: None,
            action_schema: None,
        }
    }
}

impl PathsConfig {
    /// Validates path lengths and non-emptiness.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("paths.out_dir", &self.out_dir.to_string_lossy())?;
        if let Some(path) = &self.context_schema {
            validate_path_string("paths.context_schema", &path.to_string_lossy())?;
        }
        if let Some(path) = &self.action_schema {
            validate_path_string("paths.action_schema", &path.to_string_lossy())?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default RNG seed.
pub(crate) const fn default_seed() -> u64 {
    DEFAULT_SEED
}

/// Default attempt ceiling.
pub(crate) const fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

/// Default training split size.
pub(crate) const fn default_train_samples() -> usize {
    DEFAULT_TRAIN_SAMPLES
}

/// Default evaluation split size.
pub(crate) const fn default_eval_samples() -> usize {
    DEFAULT_EVAL_SAMPLES
}

/// Default output directory.
fn default_out_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUT_DIR)
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Where the config path came from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigSource {
    /// Named by the caller or the environment.
    Explicit(PathBuf),
    /// The implicit default file name.
    Default(PathBuf),
}

impl ConfigSource {
    /// Returns the resolved path.
    fn path(&self) -> &Path {
        match self {
            Self::Explicit(path) | Self::Default(path) => path,
        }
    }

    /// Returns true for the implicit default file.
    const fn is_default(&self) -> bool {
        matches!(self, Self::Default(_))
    }
}

/// Resolves the config path from the caller, the environment, or the default.
fn resolve_path(path: Option<&Path>, env_path: Option<OsString>) -> Result<ConfigSource, ConfigError> {
    if let Some(path) = path {
        return Ok(ConfigSource::Explicit(path.to_path_buf()));
    }
    if let Some(env_path) = env_path.filter(|value| !value.is_empty()) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(ConfigSource::Explicit(PathBuf::from(env_path)));
    }
    Ok(ConfigSource::Default(PathBuf::from(DEFAULT_CONFIG_NAME)))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a configured path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
