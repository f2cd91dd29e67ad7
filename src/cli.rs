//! Command-line surface.

use std::ffi::OsString;

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;

/// Printed to stdout for any wrong argument count.
pub const USAGE: &str = "Usage: ha-notify <failure hostname>";

// No help or version flags: the single argument is always a hostname.
#[derive(Debug, Parser)]
#[command(name = "ha-notify", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Name of the failed compute host
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    hostname: String,
}

/// What the binary should do with its arguments.
#[derive(Debug)]
pub enum Invocation {
    /// Deliver a notification for this host.
    Notify(String),
    /// Wrong argument count, or an empty or non-UTF-8 hostname.
    Usage,
}

/// Interpret the full argument list, program name included.
///
/// Exactly one argument after the program name is accepted and taken verbatim,
/// even when it looks like an option.
pub fn parse_args<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let Ok([program, hostname]) = <[OsString; 2]>::try_from(args) else {
        return Invocation::Usage;
    };

    match Cli::try_parse_from([program, OsString::from("--"), hostname]) {
        Ok(cli) => Invocation::Notify(cli.hostname),
        Err(_) => Invocation::Usage,
    }
}
