use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use crate::cli::{Hisat2Args, SlurmArgs};
use crate::error::JobError;
use crate::slurm::array::ArraySpec;
use crate::slurm::job_request::SlurmDefaults;
use crate::strandness::{Layout, RnaStrandness};
use crate::tool::{require_file, task_basename, with_trailing_slash, Tool};
use crate::WorkingDirectory;

/// Rendering context for the HISAT2 workflow
#[derive(Debug, Clone, Serialize)]
pub struct Hisat2Params {
    pub directory: String,
    /// Prefix and padded task index, also names the per-sample results directory
    pub basename: String,
    pub suffix: String,
    pub index: String,
    pub paired: bool,
    /// `--rna-strandness` value, absent for unstranded libraries
    pub strandness: Option<&'static str>,
    pub add_options: String,
    #[serde(skip)]
    pub array: ArraySpec,
}

impl Tool for Hisat2Args {
    type Params = Hisat2Params;

    const NAME: &'static str = "hisat2";
    /// included HISAT2 + samtools template
    const TEMPLATE: &'static str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/templates/hisat2.txt"));
    const DEFAULTS: SlurmDefaults = SlurmDefaults {
        job_name: "hisat2",
        queue: "lowmem",
        nodes: 1,
        tasks: 4,
        memory: "4GB",
    };

    fn slurm_args(&self) -> &SlurmArgs {
        &self.slurm
    }

    fn validate(&self) -> Result<Hisat2Params, JobError> {
        // hisat2-build writes <basename>.1.ht2 ... <basename>.8.ht2
        require_file("Index", &PathBuf::from(format!("{}.1.ht2", self.index)))?;

        let layout = Layout::from_single_end(self.single_end);
        let strandness = RnaStrandness::parse(&self.strandness, layout)?;

        Ok(Hisat2Params {
            directory: with_trailing_slash(&self.directory),
            basename: task_basename(&self.prefix),
            suffix: self.suffix.clone(),
            index: self.index.clone(),
            paired: layout.is_paired(),
            strandness: strandness.flag(),
            add_options: self.add_options.trim().to_string(),
            array: self.array.clone(),
        })
    }

    fn array(params: &Hisat2Params) -> Option<&ArraySpec> {
        Some(&params.array)
    }

    /// Alignments are written to `results/aligned_hisat/<sample>/`, the job only creates the last level
    fn prepare(_params: &Hisat2Params, wd: &WorkingDirectory) -> Result<(), JobError> {
        let results = wd.path.join("results");
        match results.exists() {
            true => info!("results/ directory already exists"),
            false => {
                create_dir(&results)?;
                info!("results/ directory created");
            }
        }

        let aligned = results.join("aligned_hisat");
        if !aligned.exists() {
            create_dir(&aligned)?;
        }
        Ok(())
    }
}

fn create_dir(path: &Path) -> Result<(), JobError> {
    fs::create_dir_all(path).map_err(|source| JobError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
