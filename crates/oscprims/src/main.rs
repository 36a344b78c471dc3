mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "oscprims", version, about = "Open Sound Control packet tool")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        env = "OSCPRIMS_LOG_LEVEL",
        default_value = "warn",
        global = true
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_encode_subcommand() {
        let cli = Cli::try_parse_from([
            "oscprims",
            "encode",
            "/synth/freq",
            "--arg",
            "f:440",
            "-a",
            "s:sine",
            "--bundle",
            "--time-tag",
            "immediate",
        ])
        .expect("encode args should parse");

        match cli.command {
            Command::Encode(args) => {
                assert_eq!(args.address, "/synth/freq");
                assert_eq!(args.args.len(), 2);
                assert!(args.bundle);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_argument_value() {
        let err = Cli::try_parse_from(["oscprims", "encode", "/x", "--arg", "q:1"])
            .expect_err("unknown tag should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn time_tag_requires_bundle() {
        let err = Cli::try_parse_from(["oscprims", "encode", "/x", "--time-tag", "now"])
            .expect_err("time tag without bundle should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn rejects_conflicting_decode_inputs() {
        let err = Cli::try_parse_from([
            "oscprims", "decode", "--input", "/tmp/x.bin", "--hex", "2f78",
        ])
        .expect_err("conflicting inputs should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn parses_decode_subcommand() {
        let cli = Cli::try_parse_from(["oscprims", "decode", "--slip", "--max-depth", "3"])
            .expect("decode args should parse");
        match cli.command {
            Command::Decode(args) => {
                assert!(args.slip);
                assert_eq!(args.max_depth, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
