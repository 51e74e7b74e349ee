//! `shaderpass` command-line entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use shaderpass::app::{self, RunOptions};
use shaderpass_core::SectionKeyword;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ScopeArg {
    Pass,
    Program,
}

impl From<ScopeArg> for SectionKeyword {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Pass => SectionKeyword::Pass,
            ScopeArg::Program => SectionKeyword::Program,
        }
    }
}

/// Run a multi-pass shader document in a window.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Annotated GLSL document
    document: PathBuf,

    /// Section keyword of the document (detected when omitted)
    #[arg(long, value_enum)]
    scope: Option<ScopeArg>,

    /// Exit after presenting this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    app::init_tracing(args.verbose);

    let options = RunOptions {
        document: args.document,
        keyword: args.scope.map(Into::into),
        frames: args.frames,
    };
    match app::run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_flags() {
        let args = Args::parse_from(["shaderpass", "demo.glsl", "--scope", "program", "--frames", "3", "-vv"]);
        assert_eq!(args.document, PathBuf::from("demo.glsl"));
        assert_eq!(args.scope, Some(ScopeArg::Program));
        assert_eq!(args.frames, Some(3));
        assert_eq!(args.verbose, 2);
    }
}
