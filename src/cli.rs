//! Command line interface

use clap::Parser;

use crate::config::Overrides;

#[derive(Parser, Debug)]
#[command(name = "coi-serve")]
#[command(version, about = "Static file server with cross-origin isolation headers")]
pub struct Args {
    /// Port to listen on [default: 8000]
    pub port: Option<u16>,

    /// Address to bind to [default: all interfaces]
    #[arg(short, long, value_name = "ADDRESS")]
    pub bind: Option<String>,

    /// Directory to serve [default: current directory]
    #[arg(short, long)]
    pub directory: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Settings from the command line that win over file and environment
    pub fn overrides(&self) -> Overrides {
        Overrides {
            port: self.port,
            bind: self.bind.clone(),
            directory: self.directory.clone(),
            log_level: self.verbose.then(|| "debug".to_string()),
        }
    }
}
