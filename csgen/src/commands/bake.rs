use std::path::PathBuf;

use clap::Args;
use csgen_manifest::CsgenToml;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops::{self, BakeOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct BakeCommand {
    /// Path to csgen.toml (defaults to ./csgen.toml)
    #[arg(short, long, default_value = "csgen.toml")]
    pub config: PathBuf,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Write files concurrently
    #[arg(long)]
    pub parallel: bool,

    /// Leave files that already exist untouched
    #[arg(long)]
    pub skip_existing: bool,
}

impl BakeCommand {
    /// Run the bake command
    pub fn run(&self) -> Result<()> {
        let csgen_toml = CsgenToml::open(&self.config).unwrap_or_exit();
        let sources = csgen_toml.manifest().generate().unwrap_or_exit();

        let report = ops::bake(
            &sources,
            BakeOptions {
                output_dir: &self.output,
                dry_run: self.dry_run,
                parallel: self.parallel,
                skip_existing: self.skip_existing,
            },
        )?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
