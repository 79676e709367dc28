// ABOUTME: Command line interface for the toxide binary
// ABOUTME: Subcommands mirror the host commands plus listing and watching

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "toxide", version, about = "Run tox environments from your terminal")]
pub struct Cli {
    /// Increase logging verbosity (repeat for more)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file to use instead of the discovered toxide.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Working-directory template, overriding the `cwd` setting
    #[arg(long, global = true, value_name = "TEMPLATE")]
    pub cwd: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pick one tox environment and run it
    Select {
        /// File standing in for the active editor document
        file: Option<PathBuf>,
    },
    /// Pick several tox environments and run them together
    SelectMultiple {
        /// File standing in for the active editor document
        file: Option<PathBuf>,
    },
    /// List the tox environments of the resolved project
    List {
        /// File standing in for the active editor document
        file: Option<PathBuf>,
    },
    /// Watch a folder and print test tree updates for its tox.ini
    Watch {
        /// Directory to watch (defaults to the current directory)
        dir: Option<PathBuf>,
    },
}
