use serde::Serialize;

use crate::cli::{BbdukArgs, SlurmArgs};
use crate::error::JobError;
use crate::slurm::array::ArraySpec;
use crate::slurm::job_request::SlurmDefaults;
use crate::strandness::Layout;
use crate::tool::{task_basename, with_trailing_slash, Tool};

/// Rendering context for the bbduk workflow
#[derive(Debug, Clone, Serialize)]
pub struct BbdukParams {
    /// Input directory, prefix and padded task index
    pub basename: String,
    pub ext: String,
    pub paired: bool,
    #[serde(skip)]
    pub array: ArraySpec,
}

impl Tool for BbdukArgs {
    type Params = BbdukParams;

    const NAME: &'static str = "bbduk";
    /// included bbduk template
    const TEMPLATE: &'static str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/templates/bbduk.txt"));
    const DEFAULTS: SlurmDefaults = SlurmDefaults {
        job_name: "bbduk",
        queue: "lowmem",
        nodes: 1,
        tasks: 1,
        memory: "1GB",
    };

    fn slurm_args(&self) -> &SlurmArgs {
        &self.slurm
    }

    // fastq files are only referenced by pattern, nothing to check on the submit host
    fn validate(&self) -> Result<BbdukParams, JobError> {
        let directory = with_trailing_slash(&self.directory);
        Ok(BbdukParams {
            basename: format!("{directory}{}", task_basename(&self.prefix)),
            ext: self.ext.clone(),
            paired: Layout::from_single_end(self.single_end).is_paired(),
            array: self.array.clone(),
        })
    }

    fn array(params: &BbdukParams) -> Option<&ArraySpec> {
        Some(&params.array)
    }
}
