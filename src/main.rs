use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{error, info};

use seqbatch::cli::{Cli, Command};
use seqbatch::slurm::submit::Sbatch;
use seqbatch::slurm::{self, Outcome};
use seqbatch::tool::Tool;
use seqbatch::WorkingDirectory;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    info!("seqbatch {} starting up", env!("CARGO_PKG_VERSION"));

    let args = Cli::parse();
    if let Err(err) = run(args) {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

fn run(args: Cli) -> Result<()> {
    let wd = WorkingDirectory { path: PathBuf::from(".") };
    let sbatch = Sbatch::new(&args.sbatch);

    let outcome = match &args.command {
        Command::Bbduk(job) => submit(job, &wd, &sbatch, args.dry_run),
        Command::Hisat2(job) => submit(job, &wd, &sbatch, args.dry_run),
        Command::FeatureCounts(job) => submit(job, &wd, &sbatch, args.dry_run),
    }?;

    match outcome {
        Outcome::Staged(job) => println!("Job script written to {} (not submitted)", job.path.display()),
        Outcome::Submitted(_, submission) => println!("{}", submission),
    }
    Ok(())
}

fn submit<T: Tool>(job: &T, wd: &WorkingDirectory, sbatch: &Sbatch, dry_run: bool) -> Result<Outcome> {
    slurm::run(job, wd, sbatch, dry_run).with_context(|| format!("can't submit {} job", T::NAME))
}
