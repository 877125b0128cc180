use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "profilebot")]
#[command(author, version, about = "Telegram bot with a catalog of profile cards", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot (default when no subcommand is given)
    Run,

    /// Print the profile catalog the bot would load, then exit
    Profiles {
        /// Catalog file, defaults to PROFILES_PATH
        #[arg(long)]
        path: Option<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
