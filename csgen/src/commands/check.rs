use std::path::PathBuf;

use clap::Args;
use csgen_manifest::CsgenToml;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to csgen.toml (defaults to ./csgen.toml)
    #[arg(short, long, default_value = "csgen.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let csgen_toml = CsgenToml::open(&self.config).unwrap_or_exit();
        let manifest = csgen_toml.manifest();

        // Emission catches what parsing cannot, e.g. unsupported declarations
        let sources = manifest.generate().unwrap_or_exit();

        let report = ops::check(manifest, &sources, csgen_toml.path());
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
