//! Render SLURM job scripts for bbduk, HISAT2 and featureCounts and submit them with sbatch

use std::path::PathBuf;

pub mod cli;
pub mod error;
pub mod slurm;
pub mod strandness;
pub mod tool;

/// Directory job scripts and result directories are created relative to
#[derive(Debug, Clone)]
pub struct WorkingDirectory {
    pub path: PathBuf,
}
