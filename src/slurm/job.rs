use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Serialize;
use tinytemplate::{format_unescaped, TinyTemplate};

use crate::error::JobError;
use crate::slurm::job_request::{JobRequest, SlurmOptions};
use crate::tool::Tool;
use crate::WorkingDirectory;

/// A JobPath is the path to a job script that's submitted to SLURM via sbatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPath {
    pub path: PathBuf,
}

impl<T: Tool> JobRequest<T> {
    /// Render the complete job script, no side effects
    pub fn render(&self) -> Result<JobScript, JobError> {
        let header = render_header(&self.slurm)?;
        let workflow = render_workflow::<T>(&self.params)?;
        Ok(JobScript { header, workflow })
    }

    /// Prepare the working directory and write the rendered script to `<srcdir>/<job name>.sh`
    pub fn create(&self, wd: &WorkingDirectory) -> Result<JobPath, JobError> {
        let script = self.render()?;
        T::prepare(&self.params, wd)?;

        let path = script_dir(wd).join(format!("{}.sh", self.slurm.job_name));
        info!("Creating {} job {}", T::NAME, path.display());
        script.write(&path)?;

        Ok(JobPath { path })
    }
}

/// Job scripts go to `./src/` when the project has one, otherwise straight into the working directory
pub fn script_dir(wd: &WorkingDirectory) -> PathBuf {
    let src = wd.path.join("src");
    match src.is_dir() {
        true => src,
        false => wd.path.clone(),
    }
}

/// All rendered text of one job script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobScript {
    header: Header,
    workflow: Workflow,
}

impl JobScript {
    pub fn text(&self) -> String {
        // order is important
        [self.header.content.as_str(), self.workflow.content.as_str()].concat()
    }

    /// Write the complete job script, replacing an existing file
    fn write(&self, out_path: &Path) -> Result<(), JobError> {
        if out_path.exists() {
            warn!("Job script {} already exists and will be overwritten", out_path.display());
        }
        fs::write(out_path, self.text()).map_err(|source| JobError::Write {
            path: out_path.to_path_buf(),
            source,
        })
    }
}

/// Rendered SBATCH header
///
/// SLURM job options are parsed by sbatch from `#SBATCH` lines [before executable commands](https://slurm.schedmd.com/sbatch.html#SECTION_DESCRIPTION):
/// partition, nodes, tasks, job name and memory come from [`SlurmOptions`]. stdout and stderr of
/// every array task go to `jobs/<job name>-<job id>_<task id>.{out,err}`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Header {
    content: String,
}

/// Rendered workflow section: environment modules and tool commands
#[derive(Debug, Clone, PartialEq, Eq)]
struct Workflow {
    content: String,
}

/// Render the SBATCH header using TinyTemplate
fn render_header(slurm: &SlurmOptions) -> Result<Header, JobError> {
    /// included header template
    static HEADER: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/templates/header.txt"));
    let content = render_template("header", HEADER, slurm)?;
    Ok(Header { content })
}

/// Render the tool specific commands using TinyTemplate
fn render_workflow<T: Tool>(params: &T::Params) -> Result<Workflow, JobError> {
    let content = render_template(T::NAME, T::TEMPLATE, params)?;
    Ok(Workflow { content })
}

fn render_template<C: Serialize>(name: &'static str, template: &'static str, context: &C) -> Result<String, JobError> {
    let mut tt = TinyTemplate::new();
    // shell scripts, not HTML
    tt.set_default_formatter(&format_unescaped);
    tt.add_template(name, template)
        .map_err(|source| JobError::Template { name, source })?;
    tt.render(name, context)
        .map_err(|source| JobError::Template { name, source })
}
