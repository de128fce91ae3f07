use std::fmt;
use std::process::Command;

use log::info;

use crate::error::JobError;
use crate::slurm::array::ArraySpec;
use crate::slurm::job::JobPath;

/// The program that hands job scripts to the scheduler
#[derive(Debug, Clone)]
pub struct Sbatch {
    program: String,
}

impl Default for Sbatch {
    fn default() -> Self {
        Sbatch::new("sbatch")
    }
}

/// A job script accepted by sbatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// The command line that was run
    pub command: String,
    /// Captured stdout, normally `Submitted batch job <id>`
    pub stdout: String,
}

impl Sbatch {
    pub fn new(program: impl Into<String>) -> Self {
        Sbatch { program: program.into() }
    }

    fn arguments(&self, job: &JobPath, array: Option<&ArraySpec>) -> Vec<String> {
        let mut arguments = Vec::new();
        if let Some(array) = array {
            arguments.push(array.to_arg());
        }
        arguments.push(job.path.display().to_string());
        arguments
    }

    /// Run sbatch and wait for it, a non-zero exit is returned as [`JobError::Sbatch`]
    pub fn submit(&self, job: &JobPath, array: Option<&ArraySpec>) -> Result<Submission, JobError> {
        let arguments = self.arguments(job, array);
        let command = std::iter::once(self.program.as_str())
            .chain(arguments.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");

        let mut sbatch = Command::new(&self.program);
        let cmd = sbatch.args(&arguments);
        info!("Running sbatch process");
        info!("{:?}", &cmd);

        let output = cmd.output().map_err(|source| JobError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(JobError::Sbatch {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(Submission {
            command,
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        })
    }
}

impl fmt::Display for Submission {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.command)?;
        if !self.stdout.is_empty() {
            writeln!(f, "{}", self.stdout)?;
        }
        write!(f, "Job submitted successfully!")
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn job() -> JobPath {
        JobPath { path: PathBuf::from("./src/bbduk.sh") }
    }

    #[test]
    fn array_goes_before_script() {
        let array: ArraySpec = "1-3".parse().unwrap();
        let arguments = Sbatch::default().arguments(&job(), Some(&array));
        assert_eq!(arguments, vec!["--array=1-3", "./src/bbduk.sh"]);
    }

    #[test]
    fn no_array() {
        let arguments = Sbatch::default().arguments(&job(), None);
        assert_eq!(arguments, vec!["./src/bbduk.sh"]);
    }

    #[test]
    fn missing_program() {
        let sbatch = Sbatch::new("/nonexistent/sbatch");
        let err = sbatch.submit(&job(), None).unwrap_err();
        assert!(matches!(err, JobError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit() {
        let err = Sbatch::new("false").submit(&job(), None).unwrap_err();
        assert!(matches!(err, JobError::Sbatch { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn stderr_is_captured() {
        let missing = JobPath { path: PathBuf::from("/nonexistent/missing.sh") };
        let err = Sbatch::new("ls").submit(&missing, None).unwrap_err();
        let JobError::Sbatch { stderr, .. } = err else { panic!("expected an sbatch error") };
        assert!(stderr.contains("missing.sh"));
    }

    #[cfg(unix)]
    #[test]
    fn success_reports_command() {
        let submission = Sbatch::new("true").submit(&job(), None).unwrap();
        assert_eq!(submission.command, "true ./src/bbduk.sh");
        assert_eq!(submission.to_string(), "true ./src/bbduk.sh\nJob submitted successfully!");
    }
}
