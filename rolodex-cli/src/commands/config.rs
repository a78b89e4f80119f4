//! Config inspection commands

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::{RolodexConfig, ServerOverrides};

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Show the effective settings after flags, env and config file
    Show(ShowArgs),
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub overrides: ServerOverrides,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            println!("{}", RolodexConfig::config_path().display());
            Ok(())
        }
        ConfigCommands::Show(args) => {
            let settings = RolodexConfig::load()?.resolve(&args.overrides);
            let rendered =
                toml::to_string_pretty(&settings).context("Failed to render settings")?;
            print!("{}", rendered);
            Ok(())
        }
    }
}
