use std::fmt;

/// A simple way to keep track of where a job is.
///
/// States only move forward: validating, rendering (templates rendered and written to disk),
/// submitting (sbatch running), then done or failed. Used for log messages.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum JobState {
    Validating,
    Rendering,
    Submitting,
    Done,
    Failed,
}

impl JobState {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Validating => "VALIDATING",
            JobState::Rendering => "RENDERING",
            JobState::Submitting => "SUBMITTING",
            JobState::Done => "DONE",
            JobState::Failed => "FAILED",
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
