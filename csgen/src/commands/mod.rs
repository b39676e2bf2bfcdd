mod bake;
mod check;
mod completions;

use bake::BakeCommand;
use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for csgen_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "csgen")]
#[command(version)]
#[command(about = "Generate C# source files from TOML definitions")]
pub(crate) struct Cli {
    /// Log emission details (overridden by CSGEN_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Bake(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate C# sources from csgen.toml
    Bake(BakeCommand),

    /// Validate csgen.toml and list the types it declares
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["csgen", "check", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Check(_)));
    }

    #[test]
    fn test_bake_flags() {
        let cli = Cli::try_parse_from([
            "csgen",
            "bake",
            "-c",
            "shop.toml",
            "-o",
            "Generated",
            "--parallel",
            "--skip-existing",
        ])
        .unwrap();

        let Commands::Bake(bake) = cli.command else {
            panic!("expected bake");
        };
        assert_eq!(bake.config.to_str(), Some("shop.toml"));
        assert_eq!(bake.output.to_str(), Some("Generated"));
        assert!(bake.parallel);
        assert!(bake.skip_existing);
        assert!(!bake.dry_run);
    }
}
