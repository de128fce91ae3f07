use std::path::Path;

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

use crate::cli::{FeatureCountsArgs, SlurmArgs};
use crate::error::JobError;
use crate::slurm::array::ArraySpec;
use crate::slurm::job_request::SlurmDefaults;
use crate::strandness::{CountStrandness, Layout};
use crate::tool::{require_file, Tool};

/// Rendering context for the featureCounts workflow
#[derive(Debug, Clone, Serialize)]
pub struct FeatureCountsParams {
    /// Shell pattern expanded by `ls` on the compute node
    pub files: String,
    pub gtf: String,
    pub outname: String,
    pub paired: bool,
    pub strandness: CountStrandness,
}

impl Tool for FeatureCountsArgs {
    type Params = FeatureCountsParams;

    const NAME: &'static str = "featureCounts";
    /// included featureCounts template
    const TEMPLATE: &'static str =
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/templates/featurecounts.txt"));
    const DEFAULTS: SlurmDefaults = SlurmDefaults {
        job_name: "featureCounts",
        queue: "lowmem",
        nodes: 1,
        tasks: 4,
        memory: "3GB",
    };

    fn slurm_args(&self) -> &SlurmArgs {
        &self.slurm
    }

    fn validate(&self) -> Result<FeatureCountsParams, JobError> {
        require_file("GTF", Path::new(&self.gtf))?;
        let strandness = CountStrandness::parse(&self.strandness)?;

        // resolved here so rendering stays deterministic
        let outname = match &self.outname {
            Some(outname) => outname.clone(),
            None => default_outname(&Local::now()),
        };

        Ok(FeatureCountsParams {
            files: self.files.clone(),
            gtf: self.gtf.clone(),
            outname,
            paired: Layout::from_single_end(self.single_end).is_paired(),
            strandness,
        })
    }

    fn array(_params: &FeatureCountsParams) -> Option<&ArraySpec> {
        None
    }
}

/// `featCounts_<date>_<time>.csv`
fn default_outname<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("featCounts_{}.csv", now.format("%Y-%m-%d_%H.%M.%S"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::Utc;
    use tempfile::TempDir;

    use crate::slurm::job_request::JobRequest;

    use super::*;

    struct Fixture {
        _tmp: TempDir,
        gtf: String,
    }

    fn fixture() -> Fixture {
        let tmp = TempDir::new().unwrap();
        let gtf = tmp.path().join("genes.gtf");
        fs::write(&gtf, b"").unwrap();
        Fixture { gtf: gtf.display().to_string(), _tmp: tmp }
    }

    fn args(gtf: &str, single_end: bool, strandness: &str) -> FeatureCountsArgs {
        FeatureCountsArgs {
            files: "results/aligned_hisat/s*/*.sorted.bam".to_string(),
            gtf: gtf.to_string(),
            outname: Some("counts.csv".to_string()),
            single_end,
            strandness: strandness.to_string(),
            slurm: SlurmArgs::default(),
        }
    }

    #[test]
    fn paired_workflow() {
        let fx = fixture();
        let request = JobRequest::new(&args(&fx.gtf, false, "2")).unwrap();
        let script = request.render().unwrap().text();
        let workflow = script.split_once("#SBATCH -e jobs/featureCounts-%A_%a.err\n\n").unwrap().1;
        assert_eq!(
            workflow,
            format!(
                "module load Subread/2.0.0-IGB-gcc-8.2.0\n\
                 \n\
                 filelist=$(ls -1 results/aligned_hisat/s*/*.sorted.bam |awk 'ORS=\" \"{{print}}')\n\
                 \n\
                 featureCounts -T 4 -p -C -t exon -g gene_id -s 2 -a {} -o counts.csv $filelist\n\
                 \n",
                fx.gtf
            )
        );
    }

    #[test]
    fn single_end_drops_pair_flags() {
        let fx = fixture();
        let script = JobRequest::new(&args(&fx.gtf, true, "0")).unwrap().render().unwrap().text();
        let line = script.lines().find(|l| l.starts_with("featureCounts ")).unwrap();
        assert!(line.starts_with("featureCounts -T 4 -t exon -g gene_id -s 0 -a "));
    }

    #[test]
    fn defaults() {
        let fx = fixture();
        let request = JobRequest::new(&args(&fx.gtf, false, "2")).unwrap();
        assert_eq!(request.slurm.job_name, "featureCounts");
        assert_eq!(request.slurm.memory, "3GB");
        assert_eq!(request.slurm.tasks, 4);
        assert!(FeatureCountsArgs::array(&request.params).is_none());
    }

    #[test]
    fn missing_gtf() {
        let err = JobRequest::new(&args("/no/such/genes.gtf", false, "2")).unwrap_err();
        assert!(matches!(err, JobError::MissingFile { kind: "GTF", .. }));
    }

    #[test]
    fn invalid_strandness() {
        let fx = fixture();
        let err = JobRequest::new(&args(&fx.gtf, false, "RF")).unwrap_err();
        assert!(matches!(err, JobError::InvalidCountStrandness(_)));
    }

    #[test]
    fn timestamped_outname() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(default_outname(&now), "featCounts_2024-03-09_14.05.07.csv");

        let fx = fixture();
        let mut unnamed = args(&fx.gtf, false, "2");
        unnamed.outname = None;
        let params = unnamed.validate().unwrap();
        assert!(params.outname.starts_with("featCounts_"));
        assert!(params.outname.ends_with(".csv"));
    }
}
