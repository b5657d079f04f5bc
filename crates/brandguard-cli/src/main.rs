mod render;
mod watch;

use brandguard_core::NewMention;
use brandguard_sync::{load_snapshot, DashboardClient, SnapshotOutcome, SyncStore};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "brandguard")]
#[command(about = "BrandGuard live mention and alert dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Follow mentions and alerts live until interrupted (default)
    Watch,
    /// Load the current mentions and alerts once and print them
    Snapshot,
    /// Create a mention through the API; watchers see it arrive live
    PostMention {
        /// Mention text
        #[arg(long)]
        text: String,
        #[arg(long, default_value = "cli")]
        source: String,
        #[arg(long, default_value = "cli_user")]
        author: String,
        #[arg(long, default_value = "")]
        url: String,
        /// Sentiment label, e.g. positive, negative, neutral
        #[arg(long)]
        sentiment: Option<String>,
        #[arg(long)]
        reach: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = brandguard_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command.unwrap_or(Commands::Watch) {
        Commands::Watch => watch::run_watch(&config).await,
        Commands::Snapshot => run_snapshot(&config).await,
        Commands::PostMention {
            text,
            source,
            author,
            url,
            sentiment,
            reach,
        } => {
            let now = chrono::Utc::now();
            let mention = NewMention {
                source_id: format!("{source}-{}", now.timestamp()),
                source,
                author,
                text,
                url,
                published_at: Some(now.format("%Y-%m-%dT%H:%M:%S").to_string()),
                sentiment,
                reach,
            };
            run_post_mention(&config, &mention).await
        }
    }
}

async fn run_snapshot(config: &brandguard_core::AppConfig) -> anyhow::Result<()> {
    let client = DashboardClient::new(config.api_base.as_str(), &config.user_agent)?;
    let store = SyncStore::new();

    match load_snapshot(&client, &store).await {
        SnapshotOutcome::Loaded { mentions, alerts } => {
            println!("{mentions} mentions, {alerts} alerts\n");
            println!("Mentions");
            print!("{}", render::render_mentions(&store.mentions(), usize::MAX));
            println!("\nAlerts");
            print!("{}", render::render_alerts(&store.alerts(), usize::MAX));
            Ok(())
        }
        outcome => anyhow::bail!("snapshot did not load ({outcome:?}); see log for details"),
    }
}

async fn run_post_mention(
    config: &brandguard_core::AppConfig,
    mention: &NewMention,
) -> anyhow::Result<()> {
    let client = DashboardClient::new(config.api_base.as_str(), &config.user_agent)?;
    let created = client.create_mention(mention).await?;
    tracing::info!(id = created.id, status = %created.status, "mention created");
    println!("created mention {}", created.id);
    Ok(())
}
