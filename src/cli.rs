use clap::{Args, Parser, Subcommand};

use crate::slurm::array::ArraySpec;

#[derive(Debug, Parser)]
#[command(name = "seqbatch", version, about = "Render and submit SLURM job scripts for bbduk, HISAT2 and featureCounts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Write the job script but don't call sbatch
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Program used to submit job scripts
    #[arg(long, global = true, value_name = "PROGRAM", default_value = "sbatch")]
    pub sbatch: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit a BBDuk trimming array job
    Bbduk(BbdukArgs),
    /// Submit a HISAT2 alignment array job
    Hisat2(Hisat2Args),
    /// Submit a featureCounts job
    #[command(name = "featurecounts", alias = "featureCounts")]
    FeatureCounts(FeatureCountsArgs),
}

/// SBATCH header options, unset values fall back to the defaults of each tool
#[derive(Debug, Clone, Default, Args)]
#[command(next_help_heading = "SLURM options")]
pub struct SlurmArgs {
    /// Name of the job [default: the tool name]
    #[arg(short = 'j', long = "job-name", alias = "job_name", value_name = "NAME")]
    pub job_name: Option<String>,

    /// Cluster queue to submit the job [default: lowmem]
    #[arg(short = 'q', long, value_name = "QUEUE")]
    pub queue: Option<String>,

    /// Number of nodes [default: 1]
    #[arg(short = 'N', long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub nodes: Option<u32>,

    /// Number of tasks per node [default: bbduk 1, hisat2 4, featurecounts 4]
    #[arg(short = 'n', long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub tasks: Option<u32>,

    /// Memory requested, include units e.g. MB/GB [default: bbduk 1GB, hisat2 4GB, featurecounts 3GB]
    #[arg(short = 'm', long = "mem", value_name = "MEM")]
    pub memory: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct BbdukArgs {
    /// Path to directory with fastq files
    pub directory: String,

    /// Portion of filename before the sample number
    pub prefix: String,

    /// Array of numbers to process, can be range e.g. 1-5 or list e.g. 1,2,5
    pub array: ArraySpec,

    /// The fastq file extension
    #[arg(short = 'e', long, value_name = "EXT", default_value = ".fastq.gz", help_heading = "BBDuk options")]
    pub ext: String,

    /// Toggle single-end sequencing (default: paired-end)
    #[arg(short = 'S', long, help_heading = "BBDuk options")]
    pub single_end: bool,

    #[command(flatten)]
    pub slurm: SlurmArgs,
}

#[derive(Debug, Clone, Args)]
pub struct Hisat2Args {
    /// Path to directory with fastq files
    pub directory: String,

    /// Portion of filename before the sample number
    pub prefix: String,

    /// Path and basename of the HISAT2 reference genome index
    pub index: String,

    /// Array of numbers to process, can be range e.g. 1-5 or list e.g. 1,2,5
    pub array: ArraySpec,

    /// Portion of filename after the sample number, and after _1/_2 for paired sequencing
    #[arg(short = 's', long, value_name = "SUFFIX", default_value = ".bbdtrim.fastq.gz", help_heading = "HISAT2 options")]
    pub suffix: String,

    /// Toggle single-end sequencing (default: paired-end)
    #[arg(short = 'S', long, help_heading = "HISAT2 options")]
    pub single_end: bool,

    /// Strandness of sequenced reads: RF, FR or Unstranded for paired-end, R, F or Unstranded for single-end
    #[arg(short = 'r', long, value_name = "CODE", default_value = "RF", help_heading = "HISAT2 options")]
    pub strandness: String,

    /// Additional options passed to HISAT2, use quotes e.g. "--max-intronlen 10000"
    #[arg(
        long = "add-options",
        alias = "add_options",
        value_name = "OPTIONS",
        default_value = "",
        allow_hyphen_values = true,
        help_heading = "HISAT2 options"
    )]
    pub add_options: String,

    #[command(flatten)]
    pub slurm: SlurmArgs,
}

#[derive(Debug, Clone, Args)]
pub struct FeatureCountsArgs {
    /// Quoted wildcard pattern listing the sorted BAM files, e.g. "results/aligned_hisat/sample_*/*.sorted.bam"
    pub files: String,

    /// Path to the GTF annotation the reads were aligned to
    pub gtf: String,

    /// Name of the output counts table [default: featCounts_<date>_<time>.csv]
    #[arg(short = 'o', long, value_name = "NAME", help_heading = "featureCounts options")]
    pub outname: Option<String>,

    /// Toggle single-end sequencing (default: paired-end)
    #[arg(short = 'S', long, help_heading = "featureCounts options")]
    pub single_end: bool,

    /// Strandness of sequenced reads: 0 (unstranded), 1 (FR ligation) or 2 (RF dUTP)
    #[arg(short = 'r', long, value_name = "CODE", default_value = "2", help_heading = "featureCounts options")]
    pub strandness: String,

    #[command(flatten)]
    pub slurm: SlurmArgs,
}
