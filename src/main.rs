use poise::serenity_prelude as serenity;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::BotConfig;
use crate::data::stats::backend::SledBackend;
use crate::data::stats::store::StatStore;

pub struct CommandStatus {
    pub name: String,
    pub status: String,
}

pub struct Data {
    pub started_at: Instant,
    pub commands_check_duration: Duration,
    pub command_statuses: Vec<CommandStatus>,
    pub config: Arc<BotConfig>,
    pub stats: Arc<RwLock<StatStore>>,
    pub publish_lock: Mutex<()>,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;

pub mod config;
mod handlers;
pub mod commands;
pub mod data;

fn open_stat_store(config: &BotConfig) -> Result<StatStore, data::error::StatError> {
    match &config.stats_db_path {
        Some(path) => {
            let store = StatStore::with_backend(Box::new(SledBackend::open(path)?))?;
            info!(path = %path.display(), players = store.len(), "loaded persisted stats");
            Ok(store)
        }
        None => {
            info!("STATS_DB_PATH not set, stats are kept in memory only");
            Ok(StatStore::new())
        }
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let program_started = Instant::now();

    let config = match BotConfig::from_env() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!("invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let stats = match open_stat_store(&config) {
        Ok(store) => store,
        Err(e) => {
            warn!("failed to open stats database, falling back to memory: {}", e);
            StatStore::new()
        }
    };
    let stats = Arc::new(RwLock::new(stats));

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let framework_config = config.clone();
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::commands(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(config.command_prefix.clone()),
                ..Default::default()
            },
            event_handler: |ctx, event, framework, data| {
                Box::pin(async move {
                    handlers::event_handler::handle_event(ctx, event, framework, data).await
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            let program_started = program_started;
            Box::pin(async move {
                let mut statuses: Vec<CommandStatus> = framework
                    .options()
                    .commands
                    .iter()
                    .map(|c| CommandStatus {
                        name: c.name.to_string(),
                        status: "Loaded".to_string(),
                    })
                    .collect();

                let check_started = Instant::now();
                let reg_result = poise::builtins::register_globally(ctx, &framework.options().commands).await;
                let commands_check_duration = check_started.elapsed();

                match reg_result {
                    Ok(()) => {
                        for s in &mut statuses {
                            s.status = "Registered".to_string();
                        }
                    }
                    Err(e) => {
                        warn!("slash command registration failed: {}", e);
                        let msg = format!("Reg err: {}", e);
                        for s in &mut statuses {
                            s.status = msg.clone();
                        }
                    }
                }

                Ok(Data {
                    started_at: program_started,
                    commands_check_duration,
                    command_statuses: statuses,
                    config: framework_config,
                    stats,
                    publish_lock: Mutex::new(()),
                })
            })
        })
        .build();

    let client = serenity::ClientBuilder::new(&config.token, intents)
        .framework(framework)
        .await;
    let mut client = match client {
        Ok(c) => c,
        Err(e) => {
            error!("failed to create Discord client: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = client.start().await {
        error!("client stopped: {}", e);
    }
}
