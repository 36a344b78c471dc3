use clap::{Args, Subcommand};
use oscprims_codec::TimeTag;
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod version;

use encode::ArgValue;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a message (optionally wrapped in a bundle) and print its bytes.
    Encode(EncodeArgs),
    /// Decode packets and print every message they contain.
    Decode(DecodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Address pattern, e.g. /synth/1/freq.
    pub address: String,
    /// Argument as TYPE:VALUE (i:1, f:0.5, s:text, b:cafe, r:ff0000ff, m:0,144,60,100, T, N, [ ...).
    #[arg(long = "arg", short = 'a', value_name = "TYPE:VALUE", value_parser = encode::parse_arg_value)]
    pub args: Vec<ArgValue>,
    /// Wrap the message in a bundle.
    #[arg(long)]
    pub bundle: bool,
    /// Bundle time tag: now, immediate or a raw 64-bit NTP value.
    #[arg(long, value_name = "TAG", requires = "bundle", value_parser = encode::parse_time_tag)]
    pub time_tag: Option<TimeTag>,
    /// SLIP-encode the packet.
    #[arg(long)]
    pub slip: bool,
    /// Write the encoded bytes to a file.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Read packet bytes from a file (default: stdin).
    #[arg(long, short = 'i', value_name = "FILE", conflicts_with = "hex")]
    pub input: Option<PathBuf>,
    /// Packet bytes as a hex string.
    #[arg(long, value_name = "HEX")]
    pub hex: Option<String>,
    /// Input is a stream of SLIP frames.
    #[arg(long)]
    pub slip: bool,
    /// Maximum bundle nesting depth.
    #[arg(long, env = "OSCPRIMS_MAX_DEPTH", default_value_t = oscprims_codec::limits::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build information.
    #[arg(long)]
    pub extended: bool,
}
