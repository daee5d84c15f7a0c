use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to config TOML
    #[arg(long, default_value = "config.toml")]
    pub config: String,

    /// Session length in seconds (overrides config)
    #[arg(long)]
    pub duration: Option<f32>,

    /// Simulator seed (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write a per-tick trace CSV to this path (overrides config)
    #[arg(long)]
    pub trace: Option<String>,

    /// Preset TOML path (overrides config)
    #[arg(long)]
    pub preset: Option<String>,
}
