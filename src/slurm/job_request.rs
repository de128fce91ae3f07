use serde::Serialize;

use crate::cli::SlurmArgs;
use crate::error::JobError;
use crate::tool::Tool;

/// Resources requested in the SBATCH header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlurmOptions {
    pub job_name: String,
    pub queue: String,
    pub nodes: u32,
    pub tasks: u32,
    pub memory: String,
}

/// Per-tool fallback for every SLURM option the user didn't set
#[derive(Debug, Clone, Copy)]
pub struct SlurmDefaults {
    pub job_name: &'static str,
    pub queue: &'static str,
    pub nodes: u32,
    pub tasks: u32,
    pub memory: &'static str,
}

impl SlurmOptions {
    pub fn resolve(args: &SlurmArgs, defaults: &SlurmDefaults) -> Result<SlurmOptions, JobError> {
        let job_name = args.job_name.clone().unwrap_or_else(|| defaults.job_name.to_string());
        if job_name.is_empty() || job_name.contains('/') {
            return Err(JobError::InvalidJobName(job_name));
        }

        Ok(SlurmOptions {
            job_name,
            queue: args.queue.clone().unwrap_or_else(|| defaults.queue.to_string()),
            nodes: args.nodes.unwrap_or(defaults.nodes),
            tasks: args.tasks.unwrap_or(defaults.tasks),
            memory: args.memory.clone().unwrap_or_else(|| defaults.memory.to_string()),
        })
    }
}

/// A fully validated job: scheduler resources plus tool parameters
///
/// Only [`JobRequest::new`] builds one, so rendering never has to re-check its input.
#[derive(Debug, Clone)]
pub struct JobRequest<T: Tool> {
    pub slurm: SlurmOptions,
    pub params: T::Params,
}

impl<T: Tool> JobRequest<T> {
    pub fn new(args: &T) -> Result<JobRequest<T>, JobError> {
        let slurm = SlurmOptions::resolve(args.slurm_args(), &T::DEFAULTS)?;
        let params = args.validate()?;
        Ok(JobRequest { slurm, params })
    }
}
