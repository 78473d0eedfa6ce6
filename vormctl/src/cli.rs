use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vorm::Id;

/// Vorm control
#[derive(Default, Clone, Debug, Parser)]
#[command(version, infer_subcommands = true)]
pub struct Cli {
    #[clap(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    /// Sets a custom config directory
    ///
    /// The default value is $VORM_CONFIG if it is set, or
    /// $XDG_CONFIG_HOME/vorm otherwise
    #[arg(
        short = 'C',
        long,
        value_name = "DIR",
        global = true,
        help_heading = "Global options"
    )]
    pub config: Option<PathBuf>,

    /// Sets a custom data directory
    ///
    /// The default value is $VORM_DATA if it is set, or
    /// $XDG_DATA_HOME/vorm otherwise
    #[arg(
        short = 'D',
        long,
        value_name = "DIR",
        global = true,
        help_heading = "Global options"
    )]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// User related commands
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Recreate the users table and run the scripted walkthrough
    Demo {},
    /// Reset the database
    #[command(hide = true)]
    Reset {
        #[arg(long, required = true)]
        confirm: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum UserCommands {
    /// List users
    List {},
    /// Show a user
    Show {
        /// Id of the user
        id: Id,
    },
    /// Insert a user, or update it if the id is already taken
    Save {
        /// Id of the user
        id: Id,
        /// Name of the user
        username: String,
        /// Email address of the user
        email: String,
    },
    /// Delete a user
    Delete {
        /// Id of the user
        id: Id,
    },
}
