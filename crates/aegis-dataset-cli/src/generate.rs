// crates/aegis-dataset-cli/src/generate.rs
// ============================================================================
// Module: Generate Command
// Description: Config overrides and the three-split dataset run.
// Purpose: Turn a validated configuration into train/eval_a/eval_b files.
// Dependencies: aegis-dataset-core, aegis-dataset-config, rand, tracing
// ============================================================================

//! ## Overview
//! Command-line flags override file configuration, and the merged result is
//! re-validated before anything is written. One seeded RNG drives the splits
//! in order `train`, `eval_a`, `eval_b`, so a fixed seed reproduces all three
//! files byte for byte.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use aegis_dataset_config::ConfigError;
use aegis_dataset_config::DatasetConfig;
use aegis_dataset_core::DatasetSplit;
use aegis_dataset_core::DatasetWriter;
use aegis_dataset_core::GenerationError;
use aegis_dataset_core::RunSummary;
use aegis_dataset_core::SampleAssembler;
use aegis_dataset_schema::CatalogError;
use aegis_dataset_schema::ToolCatalog;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::info;

// ============================================================================
// SECTION: Overrides
// ============================================================================

/// Command-line values that replace configuration file values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOverrides {
    /// RNG seed.
    pub seed: Option<u64>,
    /// Training split size.
    pub train: Option<usize>,
    /// First evaluation split size.
    pub eval_a: Option<usize>,
    /// Second evaluation split size.
    pub eval_b: Option<usize>,
    /// Output directory.
    pub out_dir: Option<PathBuf>,
    /// Per-sample attempt ceiling.
    pub max_attempts: Option<usize>,
    /// Context tool document.
    pub context_schema: Option<PathBuf>,
    /// Action tool document.
    pub action_schema: Option<PathBuf>,
}

impl GenerateOverrides {
    /// Applies the overrides and re-validates the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when an override is out of range.
    pub fn apply(self, mut config: DatasetConfig) -> Result<DatasetConfig, ConfigError> {
        if let Some(seed) = self.seed {
            config.generation.seed = seed;
        }
        if let Some(max_attempts) = self.max_attempts {
            config.generation.max_attempts = max_attempts;
        }
        if let Some(train) = self.train {
            config.splits.train = train;
        }
        if let Some(eval_a) = self.eval_a {
            config.splits.eval_a = eval_a;
        }
        if let Some(eval_b) = self.eval_b {
            config.splits.eval_b = eval_b;
        }
        if let Some(out_dir) = self.out_dir {
            config.paths.out_dir = out_dir;
        }
        if self.context_schema.is_some() {
            config.paths.context_schema = self.context_schema;
        }
        if self.action_schema.is_some() {
            config.paths.action_schema = self.action_schema;
        }
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures of a dataset run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Tool documents failed to load or lack a generated tool.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// The output directory or a split file could not be created.
    #[error("cannot create {path}: {error}")]
    Output {
        /// Path being created.
        path: PathBuf,
        /// Underlying error.
        error: std::io::Error,
    },
    /// Sample generation or writing failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

// ============================================================================
// SECTION: Run
// ============================================================================

/// Loads the catalog from `config` and writes all three splits.
///
/// # Errors
///
/// Returns [`GenerateError`] on catalog, filesystem, or generation failure.
pub fn run_generation(config: &DatasetConfig) -> Result<RunSummary, GenerateError> {
    let catalog = ToolCatalog::load(
        config.paths.context_schema.as_deref(),
        config.paths.action_schema.as_deref(),
    )?;
    let assembler = SampleAssembler::new(&catalog)?;
    let writer = DatasetWriter::new(assembler, config.generation.max_attempts);

    let out_dir = &config.paths.out_dir;
    fs::create_dir_all(out_dir).map_err(|error| GenerateError::Output {
        path: out_dir.clone(),
        error,
    })?;
    info!(
        seed = config.generation.seed,
        out_dir = %out_dir.display(),
        max_attempts = config.generation.max_attempts,
        "dataset run started"
    );

    let mut rng = StdRng::seed_from_u64(config.generation.seed);
    let mut summary = RunSummary::default();
    for split in DatasetSplit::ALL {
        let path = out_dir.join(split.file_name());
        let file = File::create(&path).map_err(|error| GenerateError::Output {
            path: path.clone(),
            error,
        })?;
        let counts =
            writer.write_split(&mut rng, split, config.splits.get(split), BufWriter::new(file))?;
        summary.set(split, counts);
    }
    Ok(summary)
}
