use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::strandness::Layout;

/// Everything that can stop a job between argument parsing and submission
///
/// Validation errors (missing files, bad option values) are raised before anything is written to
/// disk. The remaining variants happen while staging or submitting and may leave a job script
/// behind.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("{kind} file does not appear to exist: {}. Check path", .path.display())]
    MissingFile { kind: &'static str, path: PathBuf },

    #[error("invalid strandness '{value}'. Must be {allowed} for {layout} sequencing")]
    InvalidStrandness {
        value: String,
        layout: Layout,
        allowed: &'static str,
    },

    #[error("invalid strandness '{0}'. Must be 0 (unstranded), 1 (stranded) or 2 (reversely stranded)")]
    InvalidCountStrandness(String),

    #[error("invalid job name '{0}'. Job names are used as file names and can't be empty or contain '/'")]
    InvalidJobName(String),

    #[error("can't render {name} template: {source}")]
    Template {
        name: &'static str,
        source: tinytemplate::error::Error,
    },

    #[error("can't create directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("can't write job script {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("can't run {program}: {source}")]
    Spawn { program: String, source: io::Error },

    #[error("{program} failed ({status}): {stderr}")]
    Sbatch {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

impl JobError {
    /// Validation errors are raised before a job script exists on disk
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            JobError::MissingFile { .. }
                | JobError::InvalidStrandness { .. }
                | JobError::InvalidCountStrandness(_)
                | JobError::InvalidJobName(_)
        )
    }
}
