use crate::commands::Commands;

use ac_config::Config;

use clap::Parser;

#[derive(Parser)]
#[command(name = "ac")]
#[command(about = "Actor cache CLI: cache keys and identity switching")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// GraphQL endpoint (overrides transport.endpoint)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Do not contact the server; switching skips the actor-scoped refetch
    #[arg(long, global = true)]
    pub offline: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

impl Cli {
    /// Applies command-line flags on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref endpoint) = self.endpoint {
            config.transport.endpoint = endpoint.clone();
        }
        if self.offline {
            config.session.refetch_enabled = false;
        }
    }
}
