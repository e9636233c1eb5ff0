//! ac - actor cache CLI
//!
//! Resolves cache keys and drives identity switching from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Cache key of a server object
//! ac key '{"__typename": "Address", "origin_id": "osm:42"}'
//!
//! # Activate the persisted identity
//! ac identity restore --identities identities.json --pretty
//!
//! # Switch without refetching
//! ac identity switch 7 --identities identities.json --offline
//! ```

use ac_cli::{Runner, cli::Cli, logger};

use ac_config::Config;

use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    cli.apply_overrides(&mut config);

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    let log_file = match config.log_file_path() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error resolving log file: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = logger::initialize(config.logging.level, log_file, config.logging.colored) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    config.log_summary();

    let pretty = cli.pretty;
    let result = match Runner::new(config) {
        Ok(runner) => runner.run(cli.command).await,
        Err(e) => Err(e),
    };

    // Handle result
    match result {
        Ok(value) => {
            let output = if pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };

            match output {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error serializing response: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
