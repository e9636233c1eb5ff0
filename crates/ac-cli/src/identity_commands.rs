use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum IdentityCommands {
    /// Activate the persisted identity, or the first available one
    Restore {
        /// JSON file holding the identity list
        #[arg(long)]
        identities: PathBuf,
    },

    /// Switch to another identity
    Switch {
        /// Actor ID
        id: String,

        /// JSON file holding the identity list
        #[arg(long)]
        identities: PathBuf,
    },

    /// Show the persisted identity
    Show {
        /// JSON file used to resolve the full actor
        #[arg(long)]
        identities: Option<PathBuf>,
    },
}
