//! Command-line argument parsing for the keystack driver
//!
//! Supports:
//! - Replaying event files before reading stdin
//! - Layering an extra keymap over the defaults
//! - Choosing the engine config file
//! - Turning off the command echo round trip

use clap::Parser;
use std::path::PathBuf;

/// Stacked keybinding engine driven by event lines on stdin
#[derive(Parser, Debug)]
#[command(
    name = "keystack",
    version,
    about = "Stacked keybinding engine driven by event lines on stdin"
)]
pub struct CliArgs {
    /// Event files to replay before reading stdin
    #[arg(value_name = "FILES")]
    pub inputs: Vec<PathBuf>,

    /// Keymap file layered over the default and user keymaps
    #[arg(short = 'k', long, value_name = "FILE")]
    pub keymap: Option<PathBuf>,

    /// Engine config file (default: ~/.config/keystack/config.yaml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Start without the built-in keymap
    #[arg(long)]
    pub no_defaults: bool,

    /// Don't feed sent `event ...` and `set ...` commands back in
    #[arg(long)]
    pub no_echo: bool,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Files replayed in order before stdin
    pub inputs: Vec<PathBuf>,
    /// Extra keymap layer
    pub keymap: Option<PathBuf>,
    /// Engine config override
    pub config: Option<PathBuf>,
    /// Install the embedded keymap
    pub use_defaults: bool,
    /// Echo host commands back as events
    pub echo: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        if let Some(missing) = self.inputs.iter().find(|p| !p.is_file()) {
            return Err(format!("Input file not found: {}", missing.display()));
        }

        if let Some(keymap) = &self.keymap {
            if !keymap.is_file() {
                return Err(format!("Keymap file not found: {}", keymap.display()));
            }
        }

        Ok(StartupConfig {
            inputs: self.inputs,
            keymap: self.keymap,
            config: self.config,
            use_defaults: !self.no_defaults,
            echo: !self.no_echo,
        })
    }
}
