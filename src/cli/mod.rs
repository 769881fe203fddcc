//! Command-line interface

pub mod args;

pub use args::{Args, AwsArgs, DockerAction, OpenStackArgs, SubCommand, VmwareArgs, WorkspaceAction};

use crate::output::OutputFormat;

impl Args {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Off;
        }
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    pub fn init_logging(&self) {
        env_logger::Builder::from_default_env()
            .filter_level(self.log_level())
            .format_timestamp(None)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_log_level_mapping() {
        let quiet = Args::try_parse_from(["terrawork", "-q", "-vv", "menu"]).unwrap();
        assert_eq!(quiet.log_level(), log::LevelFilter::Off);

        let default = Args::try_parse_from(["terrawork", "menu"]).unwrap();
        assert_eq!(default.log_level(), log::LevelFilter::Warn);

        let loud = Args::try_parse_from(["terrawork", "-vvvv", "menu"]).unwrap();
        assert_eq!(loud.log_level(), log::LevelFilter::Trace);
    }

    #[test]
    fn test_output_format() {
        let args = Args::try_parse_from(["terrawork", "--json", "workspace", "list"]).unwrap();
        assert_eq!(args.output_format(), OutputFormat::Json);
    }
}
