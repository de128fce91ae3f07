//! Per-tool validation rules and templates
//!
//! Every wrapped program implements [`Tool`]: its raw command line arguments are validated into a
//! `Params` record which doubles as the rendering context of the tool's workflow template.

use std::fmt::Debug;
use std::path::Path;

use serde::Serialize;

use crate::cli::SlurmArgs;
use crate::error::JobError;
use crate::slurm::array::ArraySpec;
use crate::slurm::job_request::SlurmDefaults;
use crate::WorkingDirectory;

/// BBDuk adapter and quality trimming
pub mod bbduk;
/// featureCounts read summarisation
pub mod featurecounts;
/// HISAT2 alignment followed by samtools conversion and sorting
pub mod hisat2;

pub trait Tool: Debug + Clone {
    /// Validated parameters, serialised into the workflow template
    type Params: Serialize + Debug + Clone;

    /// Used for the template name and log messages
    const NAME: &'static str;
    /// Workflow section of the job script (module setup and commands)
    const TEMPLATE: &'static str;
    const DEFAULTS: SlurmDefaults;

    fn slurm_args(&self) -> &SlurmArgs;

    /// Check input files and option values, fails before anything is written
    fn validate(&self) -> Result<Self::Params, JobError>;

    /// Array range passed to sbatch, if this is an array job
    fn array(params: &Self::Params) -> Option<&ArraySpec>;

    /// Create anything the job expects to exist before it starts
    fn prepare(_params: &Self::Params, _wd: &WorkingDirectory) -> Result<(), JobError> {
        Ok(())
    }
}

/// Zero padded array task index, expanded by the shell on the compute node
pub const TASK_INDEX: &str = "`printf \"%03d\" $SLURM_ARRAY_TASK_ID`";

/// File name stem of one array task: the prefix followed by the padded task index
pub fn task_basename(prefix: &str) -> String {
    format!("{prefix}{TASK_INDEX}")
}

/// Directories are glued directly to file names in templates
pub fn with_trailing_slash(directory: &str) -> String {
    match directory.ends_with('/') {
        true => directory.to_string(),
        false => format!("{directory}/"),
    }
}

fn require_file(kind: &'static str, path: &Path) -> Result<(), JobError> {
    match path.is_file() {
        true => Ok(()),
        false => Err(JobError::MissingFile {
            kind,
            path: path.to_path_buf(),
        }),
    }
}
