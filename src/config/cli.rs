use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "keycap-catalog")]
#[command(about = "Query the keycap catalog content store and print view models as JSON")]
pub struct CliConfig {
    /// TOML settings file; CONTENTFUL_* environment variables are used otherwise
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Read drafts from the preview API")]
    pub preview: bool,

    #[arg(long, help = "Pretty-print JSON output")]
    pub pretty: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Profiles grouped by shape
    NavLinks,
    ProfileSlugs,
    ProfileTitles,
    /// Homepage copy and profile cards
    Home,
    SocialLinks,
    /// Catalog articles, optionally for one profile
    Articles {
        #[arg(long)]
        profile: Option<String>,
    },
    Dropshipping,
    /// One random Open Graph fallback image URL
    OgImage,
}
