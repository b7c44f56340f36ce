use clap::Parser;
use keycap_catalog::utils::error::ErrorSeverity;
use keycap_catalog::utils::logger;
use keycap_catalog::utils::validation::Validate;
use keycap_catalog::{
    CliConfig, Command, ContentAdapter, ContentConfig, ContentError, DeliveryClient,
    DisplayConfig, TomlConfig,
};
use serde::Serialize;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting keycap-catalog CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Query failed: {} (Severity: {:?})",
            e,
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

fn load_settings(cli: &CliConfig) -> Result<(ContentConfig, DisplayConfig), ContentError> {
    let (mut content, display) = match &cli.config {
        Some(path) => {
            tracing::debug!("Loading settings from {}", path.display());
            let file = TomlConfig::from_file(path)?;
            file.validate()?;
            (file.contentful, file.display)
        }
        None => (ContentConfig::from_env()?, DisplayConfig::default()),
    };

    if cli.preview {
        content.preview = true;
    }

    Ok((content, display))
}

async fn run(cli: &CliConfig) -> Result<(), ContentError> {
    let (content, display) = load_settings(cli)?;
    let client = DeliveryClient::new(&content)?;
    let adapter = ContentAdapter::with_display(client, display);

    match &cli.command {
        Command::NavLinks => print_json(&adapter.get_navigation_links().await?, cli.pretty),
        Command::ProfileSlugs => print_json(&adapter.get_profile_slugs().await?, cli.pretty),
        Command::ProfileTitles => print_json(&adapter.get_profile_titles().await?, cli.pretty),
        Command::Home => print_json(&adapter.get_home_page_information().await?, cli.pretty),
        Command::SocialLinks => {
            print_json(&adapter.get_social_links_entries().await?, cli.pretty)
        }
        Command::Articles { profile } => {
            let articles = adapter.get_articles(profile.as_deref()).await?;
            tracing::info!("📦 {} articles", articles.len());
            print_json(&articles, cli.pretty)
        }
        Command::Dropshipping => print_json(&adapter.get_dropshipping_sites().await?, cli.pretty),
        Command::OgImage => print_json(&adapter.get_random_og_api_img().await?, cli.pretty),
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), ContentError> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", output);
    Ok(())
}
