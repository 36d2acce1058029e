// crates/aegis-dataset-core/src/runtime/dataset.rs
// ============================================================================
// Module: Dataset Writer
// Description: Bounded-retry sample generation and JSON-lines output.
// Purpose: Write one split's records with an exact bucket composition.
// Dependencies: rand, tracing, crate::runtime
// ============================================================================

//! ## Overview
//! Each split follows its [`BucketPlan`], shuffled with the run RNG. Every
//! sample runs through [`retry_bounded`]: recoverable failures redraw, fatal
//! failures abort at once, and exhausting the attempt ceiling aborts the run.
//! The RNG is shared across attempts and splits, so a fixed seed reproduces
//! the same files.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;

use rand::Rng;
use tracing::debug;
use tracing::info;

use crate::core::Bucket;
use crate::core::BucketCounts;
use crate::core::DatasetSplit;
use crate::error::GenerationError;
use crate::error::SampleError;
use crate::runtime::assembler::SampleAssembler;
use crate::runtime::assembler::render_line;
use crate::runtime::plan::BucketPlan;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default per-sample attempt ceiling.
pub const DEFAULT_MAX_ATTEMPTS: usize = 30;

// ============================================================================
// SECTION: Bounded Retry
// ============================================================================

/// Outcome of a bounded retry loop.
#[derive(Debug)]
pub enum Attempt<T> {
    /// An attempt succeeded.
    Accepted {
        /// Produced value.
        value: T,
        /// Attempts used, including the successful one.
        attempts: usize,
    },
    /// Every attempt failed recoverably.
    Exhausted {
        /// Attempts made.
        attempts: usize,
        /// Error from the final attempt.
        last_error: SampleError,
    },
}

/// Runs `attempt` until it succeeds, fails fatally, or `max_attempts` is spent.
///
/// `attempt` receives the 1-based attempt number. A ceiling of zero is treated
/// as one.
///
/// # Errors
///
/// Returns the first non-recoverable [`SampleError`].
pub fn retry_bounded<T, F>(max_attempts: usize, mut attempt: F) -> Result<Attempt<T>, SampleError>
where
    F: FnMut(usize) -> Result<T, SampleError>,
{
    let ceiling = max_attempts.max(1);
    let mut number = 1;
    loop {
        match attempt(number) {
            Ok(value) => {
                return Ok(Attempt::Accepted {
                    value,
                    attempts: number,
                });
            }
            Err(error) if !error.is_recoverable() => return Err(error),
            Err(error) if number >= ceiling => {
                return Ok(Attempt::Exhausted {
                    attempts: number,
                    last_error: error,
                });
            }
            Err(_) => number += 1,
        }
    }
}

// ============================================================================
// SECTION: Dataset Writer
// ============================================================================

/// Writes dataset splits as JSON lines.
#[derive(Debug, Clone, Copy)]
pub struct DatasetWriter<'a> {
    /// Sample assembler bound to the loaded catalog.
    assembler: SampleAssembler<'a>,
    /// Per-sample attempt ceiling.
    max_attempts: usize,
}

impl<'a> DatasetWriter<'a> {
    /// Creates a writer.
    #[must_use]
    pub const fn new(assembler: SampleAssembler<'a>, max_attempts: usize) -> Self {
        Self {
            assembler,
            max_attempts,
        }
    }

    /// Generates `total` samples for `split` and writes them to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] on exhaustion, fatal sample errors, and
    /// write failures.
    pub fn write_split<R, W>(
        &self,
        rng: &mut R,
        split: DatasetSplit,
        total: usize,
        mut out: W,
    ) -> Result<BucketCounts, GenerationError>
    where
        R: Rng + ?Sized,
        W: Write,
    {
        let io_error = |error| GenerationError::Io {
            split,
            error,
        };
        let mut counts = BucketCounts::default();
        for bucket in BucketPlan::new(total).shuffled(rng) {
            let line = self.generate_line(rng, split, bucket)?;
            out.write_all(line.as_bytes()).map_err(io_error)?;
            out.write_all(b"\n").map_err(io_error)?;
            counts.record(bucket);
        }
        out.flush().map_err(io_error)?;
        info!(split = split.as_str(), samples = counts.total(), "split complete");
        Ok(counts)
    }

    /// Produces one rendered line for `bucket`, retrying recoverable failures.
    fn generate_line<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        split: DatasetSplit,
        bucket: Bucket,
    ) -> Result<String, GenerationError> {
        let outcome = retry_bounded(self.max_attempts, |attempt| {
            let result =
                self.assembler.assemble(rng, bucket, split).and_then(|sample| render_line(&sample));
            if let Err(error) = &result {
                debug!(
                    split = split.as_str(),
                    bucket = bucket.as_str(),
                    attempt,
                    error = %error,
                    "sample attempt rejected"
                );
            }
            result
        })
        .map_err(|error| GenerationError::Sample {
            split,
            bucket,
            error,
        })?;
        match outcome {
            Attempt::Accepted {
                value, ..
            } => Ok(value),
            Attempt::Exhausted {
                attempts,
                last_error,
            } => Err(GenerationError::Exhausted {
                split,
                bucket,
                attempts,
                last_error,
            }),
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::use_debug,
        reason = "Test-only assertions are permitted."
    )]

    use aegis_dataset_schema::CatalogError;
    use aegis_dataset_schema::ToolKind;

    use super::Attempt;
    use super::retry_bounded;
    use crate::error::SampleError;

    #[test]
    fn accepts_after_recoverable_failures() {
        let outcome = retry_bounded(5, |attempt| {
            if attempt < 3 { Err(SampleError::EmbeddedNewline) } else { Ok(attempt) }
        });
        match outcome {
            Ok(Attempt::Accepted {
                value: 3,
                attempts: 3,
            }) => {}
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn exhausts_at_ceiling() {
        let mut calls = 0;
        let outcome = retry_bounded::<(), _>(4, |_| {
            calls += 1;
            Err(SampleError::EmbeddedNewline)
        });
        assert!(matches!(outcome, Ok(Attempt::Exhausted { attempts: 4, .. })));
        assert_eq!(calls, 4);
    }

    #[test]
    fn fatal_errors_stop_immediately() {
        let mut calls = 0;
        let outcome = retry_bounded::<(), _>(10, |_| {
            calls += 1;
            Err(SampleError::Catalog(CatalogError::UnknownTool {
                kind: ToolKind::Action,
                name: "missing".to_string(),
            }))
        });
        assert!(matches!(outcome, Err(SampleError::Catalog(_))));
        assert_eq!(calls, 1);
    }
}
