//! The build command.

use std::path::PathBuf;

use clap::Args;
use folio_build::{BuildOptions, build};
use folio_config::Config;

use crate::error::CliError;
use crate::output::Output;

/// Arguments of a build.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Compare generated files with a fresh build instead of writing them.
    #[arg(long)]
    check: bool,

    /// Only build the component API model (`api.json`).
    #[arg(long)]
    api: bool,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output (log every build stage).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    fn options(&self) -> BuildOptions {
        BuildOptions {
            check: self.check,
            api_only: self.api,
        }
    }

    /// Execute the build.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the build fails.
    pub(crate) fn execute(&self, output: &Output) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref())?;
        tracing::info!(
            output_dir = %config.docs_resolved.output_dir.display(),
            packages = config.packages_resolved.len(),
            "Loaded configuration"
        );

        let report = build(&config, self.options())?;
        output.report(&report, self.check);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        build: BuildArgs,
    }

    fn parse(args: &[&str]) -> BuildArgs {
        TestCli::parse_from(std::iter::once("folio").chain(args.iter().copied())).build
    }

    #[test]
    fn test_flags() {
        let args = parse(&["--check", "--api", "--config", "site/folio.toml", "-v"]);
        let options = args.options();
        assert!(options.check);
        assert!(options.api_only);
        assert!(args.verbose);
        assert_eq!(args.config, Some(PathBuf::from("site/folio.toml")));
    }

    #[test]
    fn test_defaults() {
        let options = parse(&[]).options();
        assert!(!options.check);
        assert!(!options.api_only);
    }

    #[test]
    fn test_execute_with_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("folio.toml"),
            "[[packages]]\nid = \"core\"\ncontracts = \"contracts.json\"\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("contracts.json"),
            r#"{"components": {"x-badge": {"summary": "Status label."}}}"#,
        )
        .unwrap();

        let config = dir.path().join("folio.toml");
        let args = parse(&["--api", "--config", config.to_str().unwrap()]);
        args.execute(&Output::new()).unwrap();

        let api = std::fs::read_to_string(dir.path().join("generated/api.json")).unwrap();
        assert!(api.contains("\"tagName\": \"x-badge\""));
    }
}
