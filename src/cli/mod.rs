// CLI module for aigc-relay
// Author: kelexine (https://github.com/kelexine)

use clap::Parser;
use std::path::PathBuf;

/// aigc-relay - Access-code gated relay for OpenAI, HuggingFace and Stable Diffusion
#[derive(Parser, Debug)]
#[command(name = "aigc-relay", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.aigc-relay/config.toml)
    #[arg(long, env = "AIGC_RELAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind, overrides the config file
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind, overrides the config file
    #[arg(long)]
    pub port: Option<u16>,
}
