use std::fs;
use std::path::Path;

use clap::Parser;
use tempfile::TempDir;

use seqbatch::cli::{Cli, Command};
use seqbatch::error::JobError;
use seqbatch::slurm::job_request::JobRequest;
use seqbatch::slurm::submit::Sbatch;
use seqbatch::slurm::{self, Outcome};
use seqbatch::WorkingDirectory;

const TASK_INDEX: &str = "`printf \"%03d\" $SLURM_ARRAY_TASK_ID`";

fn working_directory(with_src: bool) -> (TempDir, WorkingDirectory) {
    let tmp = TempDir::new().unwrap();
    if with_src {
        fs::create_dir(tmp.path().join("src")).unwrap();
    }
    let wd = WorkingDirectory { path: tmp.path().to_path_buf() };
    (tmp, wd)
}

fn parse(args: &[&str]) -> Command {
    let argv = std::iter::once("seqbatch").chain(args.iter().copied());
    Cli::try_parse_from(argv).unwrap().command
}

fn bbduk(args: &[&str]) -> seqbatch::cli::BbdukArgs {
    match parse(args) {
        Command::Bbduk(args) => args,
        other => panic!("expected bbduk, got {other:?}"),
    }
}

fn hisat2(args: &[&str]) -> seqbatch::cli::Hisat2Args {
    match parse(args) {
        Command::Hisat2(args) => args,
        other => panic!("expected hisat2, got {other:?}"),
    }
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

// `echo` stands in for sbatch and prints the arguments it was given
#[cfg(unix)]
#[test]
fn bbduk_array_job_end_to_end() {
    let (_tmp, wd) = working_directory(true);
    let args = bbduk(&["bbduk", "/data/", "sample", "1-3"]);

    let outcome = slurm::run(&args, &wd, &Sbatch::new("echo"), false).unwrap();
    let script_path = wd.path.join("src").join("bbduk.sh");
    let Outcome::Submitted(job, submission) = outcome else { panic!("expected a submission") };

    assert_eq!(job.path, script_path);
    assert_eq!(submission.stdout, format!("--array=1-3 {}", script_path.display()));
    assert_eq!(submission.command, format!("echo --array=1-3 {}", script_path.display()));

    let script = fs::read_to_string(&script_path).unwrap();
    assert!(script.starts_with("#!/bin/bash -x\n#SBATCH -p lowmem\n#SBATCH -N 1\n#SBATCH -n 1\n#SBATCH -J bbduk\n#SBATCH --mem=1GB\n"));
    assert!(script.contains(&format!("in1=/data/sample{TASK_INDEX}_#.fastq.gz ")));
    assert!(script.contains(&format!("out=/data/sample{TASK_INDEX}_#.bbdtrim.fastq.gz ")));
}

#[test]
fn dry_run_writes_without_src_dir() {
    let (_tmp, wd) = working_directory(false);
    let args = bbduk(&["bbduk", "reads", "x", "1,4", "-S", "-j", "trim", "-e", ".fq"]);

    // never spawned in a dry run
    let sbatch = Sbatch::new("/nonexistent/sbatch");
    let outcome = slurm::run(&args, &wd, &sbatch, true).unwrap();

    let path = wd.path.join("trim.sh");
    assert_eq!(outcome, Outcome::Staged(seqbatch::slurm::job::JobPath { path: path.clone() }));
    let script = fs::read_to_string(path).unwrap();
    assert!(script.contains("#SBATCH -J trim\n"));
    assert!(script.contains(&format!("bbduk.sh in=reads/x{TASK_INDEX}.fq out=reads/x{TASK_INDEX}.bbdtrim.fq ")));
}

#[test]
fn missing_index_stops_before_writing() {
    let (_tmp, wd) = working_directory(true);
    let args = hisat2(&["hisat2", "reads", "s", "/no/such/genome", "1-3"]);

    let err = slurm::run(&args, &wd, &Sbatch::new("/nonexistent/sbatch"), false).unwrap_err();

    assert!(matches!(err, JobError::MissingFile { .. }));
    assert!(err.is_validation());
    assert!(entries(&wd.path.join("src")).is_empty());
    assert!(!wd.path.join("results").exists());
}

#[test]
fn invalid_strandness_stops_before_writing() {
    let (_tmp, wd) = working_directory(false);
    fs::write(wd.path.join("genome.1.ht2"), b"").unwrap();
    let index = wd.path.join("genome").display().to_string();
    let args = hisat2(&["hisat2", "reads", "s", &index, "1-3", "-r", "F"]);

    let err = slurm::run(&args, &wd, &Sbatch::default(), true).unwrap_err();

    assert!(matches!(err, JobError::InvalidStrandness { .. }));
    assert_eq!(entries(&wd.path), vec!["genome.1.ht2"]);
}

#[cfg(unix)]
#[test]
fn failed_submission_leaves_script() {
    let (_tmp, wd) = working_directory(true);
    fs::write(wd.path.join("genome.1.ht2"), b"").unwrap();
    let index = wd.path.join("genome").display().to_string();
    let args = hisat2(&["hisat2", "reads", "s", &index, "2"]);

    let err = slurm::run(&args, &wd, &Sbatch::new("false"), false).unwrap_err();

    assert!(matches!(err, JobError::Sbatch { .. }));
    assert!(!err.is_validation());
    assert!(wd.path.join("src").join("hisat2.sh").is_file());
    assert!(wd.path.join("results").join("aligned_hisat").is_dir());
}

#[test]
fn rendering_is_idempotent() {
    let args = bbduk(&["bbduk", "/data", "sample", "1-3", "-m", "2GB"]);
    let request = JobRequest::new(&args).unwrap();
    assert_eq!(request.render().unwrap().text(), request.render().unwrap().text());

    let again = JobRequest::new(&args).unwrap();
    assert_eq!(request.render().unwrap(), again.render().unwrap());
}

#[test]
fn rewriting_a_job_replaces_the_script() {
    let (_tmp, wd) = working_directory(true);
    let paired = bbduk(&["bbduk", "/data", "sample", "1-3"]);
    let single = bbduk(&["bbduk", "/data", "sample", "1-3", "-S"]);

    slurm::run(&paired, &wd, &Sbatch::default(), true).unwrap();
    slurm::run(&single, &wd, &Sbatch::default(), true).unwrap();

    let script = fs::read_to_string(wd.path.join("src").join("bbduk.sh")).unwrap();
    assert_eq!(script, JobRequest::new(&single).unwrap().render().unwrap().text());
}
