use crate::identity_commands::IdentityCommands;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Print the cache key of a server object
    Key {
        /// JSON object, or @path to a file containing one
        input: String,
    },

    /// Identity operations
    Identity {
        #[command(subcommand)]
        action: IdentityCommands,
    },

    /// Clear the active identity, stored tokens and cached actor data
    Logout,
}
