//! Render job scripts from templates and submit them to SLURM

use log::info;

use crate::error::JobError;
use crate::tool::Tool;
use crate::WorkingDirectory;

/// sbatch `--array` ranges
pub mod array;
/// Read configuration templates and render them with validated parameters
pub mod job;
/// Raw arguments are validated into a set of structs defined here
pub mod job_request;
pub mod state;
/// Run sbatch
pub mod submit;

use job::JobPath;
use job_request::JobRequest;
use state::JobState;
use submit::{Sbatch, Submission};

/// How far a job got
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `--dry-run`: the script was written but not submitted
    Staged(JobPath),
    Submitted(JobPath, Submission),
}

/// Validate, render, write and submit one job
///
/// Stops at the first error. Validation errors leave nothing behind, later errors may leave the
/// written job script in place.
pub fn run<T: Tool>(args: &T, wd: &WorkingDirectory, sbatch: &Sbatch, dry_run: bool) -> Result<Outcome, JobError> {
    let result = stage_and_submit(args, wd, sbatch, dry_run);
    match &result {
        Ok(_) => transition::<T>(JobState::Done),
        Err(_) => transition::<T>(JobState::Failed),
    }
    result
}

fn stage_and_submit<T: Tool>(args: &T, wd: &WorkingDirectory, sbatch: &Sbatch, dry_run: bool) -> Result<Outcome, JobError> {
    transition::<T>(JobState::Validating);
    let request = JobRequest::new(args)?;

    transition::<T>(JobState::Rendering);
    let job = request.create(wd)?;

    if dry_run {
        info!("--dry-run set, not submitting {}", job.path.display());
        return Ok(Outcome::Staged(job));
    }

    transition::<T>(JobState::Submitting);
    let submission = sbatch.submit(&job, T::array(&request.params))?;
    info!("{}", submission.stdout);

    Ok(Outcome::Submitted(job, submission))
}

fn transition<T: Tool>(state: JobState) {
    info!("{} job: {}", T::NAME, state);
}
