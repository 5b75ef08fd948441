//! CLI argument definitions for `countrycode`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use country_model::StandardKey;

#[derive(Parser)]
#[command(
    name = "countrycode",
    version,
    about = "Convert country codes between ISO 3166-1, FIPS 10-4 and GENC",
    long_about = "Convert country codes between ISO 3166-1, FIPS 10-4 and GENC.\n\n\
                  Standards are given as NAME (latest edition), NAME:VERSION or NAME: \
                  (unversioned). The mapping table can be replaced with --mappings or \
                  the COUNTRYCODE_MAPPINGS environment variable."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a code value from one standard to another.
    Convert(ConvertArgs),

    /// List the standards supported by the mapping table.
    Standards(StandardsArgs),
}

/// Options selecting and loading the mapping table.
#[derive(Args)]
pub struct TableArgs {
    /// Mapping table to use instead of the embedded one.
    #[arg(long = "mappings", value_name = "PATH")]
    pub mappings: Option<PathBuf>,

    /// Drop header columns naming unknown standards or formats instead of failing.
    #[arg(long = "lenient")]
    pub lenient: bool,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Code value to convert, e.g. AFG or 004.
    #[arg(value_name = "VALUE")]
    pub value: String,

    /// Standard of VALUE (default: the converter's default standard).
    #[arg(long = "from", value_name = "STANDARD")]
    pub from: Option<StandardKey>,

    /// Standard to convert to (default: the converter's default standard).
    #[arg(long = "to", value_name = "STANDARD")]
    pub to: Option<StandardKey>,

    /// Print matches as JSON.
    #[arg(long = "json")]
    pub json: bool,

    #[command(flatten)]
    pub table: TableArgs,
}

#[derive(Parser)]
pub struct StandardsArgs {
    #[command(flatten)]
    pub table: TableArgs,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_standard_keys() {
        let cli = Cli::try_parse_from(["countrycode", "convert", "AFG", "--to", "FIPS:2014"]).unwrap();
        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.to.map(|key| key.to_string()), Some("FIPS:2014".to_string()));
        assert!(args.from.is_none());
        assert!(!args.table.lenient);
    }

    #[test]
    fn rejects_malformed_keys() {
        let result = Cli::try_parse_from(["countrycode", "convert", "AFG", "--from", "ISO:1:2"]);
        assert!(result.is_err());
    }
}
