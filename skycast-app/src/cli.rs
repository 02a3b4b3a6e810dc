use clap::Parser;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// City to show on startup, instead of the stored preference or
    /// location detection.
    #[arg(long)]
    pub city: Option<String>,

    /// Start in the dark theme.
    #[arg(long)]
    pub dark: bool,
}
