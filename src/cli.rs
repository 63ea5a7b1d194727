//! Command-line parsing and dispatch.

use crate::{
    client::HttpTransport,
    config::Config,
    lookup::{list_all_analyzers, list_available_responders},
    reporter::Reporter,
};
use clap::{error::ErrorKind, Parser, Subcommand};
use std::ffi::OsString;
use std::io::{self, Write};

pub const BIN_NAME: &str = "cortex-list";

#[derive(Parser, Debug)]
#[command(name = BIN_NAME)]
#[command(about = "List the Cortex analyzers and responders available in TheHive")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List all analyzers
    #[command(disable_help_flag = true)]
    Analyzers {
        /// Ignored
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
        rest: Vec<String>,
    },
    /// List the responders available for an entity
    #[command(disable_help_flag = true)]
    Responders {
        /// case, alert, observable or case_artifact
        #[arg(allow_hyphen_values = true)]
        entity_type: String,
        /// Identifier of the entity
        #[arg(allow_hyphen_values = true)]
        entity_id: String,
    },
}

/// What a command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Run(Commands),
    /// No action given.
    Usage,
    /// Unknown action or missing parameters.
    Invalid,
    /// `--help` / `--version` text rendered by clap.
    Info(String),
}

impl Invocation {
    /// Parse `args` (including the program name). The action is matched
    /// case-insensitively.
    pub fn parse<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        if let Some(action) = args.get_mut(1) {
            let lowered = action
                .to_str()
                .filter(|a| !a.starts_with('-'))
                .map(str::to_lowercase);
            if let Some(lowered) = lowered {
                *action = lowered.into();
            }
        }

        match Cli::try_parse_from(args) {
            Ok(Cli { command: Some(command) }) => Invocation::Run(command),
            Ok(Cli { command: None }) => Invocation::Usage,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                Invocation::Info(e.to_string())
            }
            Err(_) => Invocation::Invalid,
        }
    }
}

pub fn print_usage<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Usage:")?;
    writeln!(out, "  List all analyzers: {} analyzers", BIN_NAME)?;
    writeln!(out, "  List entity responders: {} responders <entity_type> <entity_id>", BIN_NAME)?;
    writeln!(out, "  Example: {} responders case_artifact 12345", BIN_NAME)
}

pub fn print_invalid<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Invalid command or missing parameters.")?;
    writeln!(out, "Use 'analyzers' to list all analyzers")?;
    writeln!(out, "Use 'responders <entity_type> <entity_id>' to list responders for a specific entity")
}

/// Carry out one invocation. Lookup failures are reported on `out`; only a
/// failure to write output is returned.
pub async fn run<T, W>(invocation: Invocation, config: &Config, transport: &T, out: &mut W) -> io::Result<()>
where
    T: HttpTransport + ?Sized,
    W: Write,
{
    match invocation {
        Invocation::Run(Commands::Analyzers { .. }) => {
            list_all_analyzers(transport, config.api_base(), out).await
        }
        Invocation::Run(Commands::Responders { entity_type, entity_id }) => {
            let responders =
                list_available_responders(transport, config.api_base(), &entity_type, &entity_id, out)
                    .await?;
            Reporter::new(out).print_responders(responders)
        }
        Invocation::Usage => print_usage(out),
        Invocation::Invalid => print_invalid(out),
        Invocation::Info(text) => write!(out, "{}", text),
    }
}
