//! discord-send - send friend requests and files through a bot API
//!
//! Each operation is a single authenticated POST; HTTP 200 is success.

mod api;
mod auth;
mod config;
mod models;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, Overrides};

#[derive(Parser)]
#[command(name = "discord-send")]
#[command(about = "Send friend requests and files through a chat bot API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the per-user config directory)
    #[arg(long, global = true, env = "DISCORD_SEND_CONFIG")]
    config: Option<PathBuf>,

    /// Bot token, overrides the config file
    #[arg(long, global = true, env = "DISCORD_SEND_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Friend request endpoint, overrides the config file
    #[arg(long, global = true, env = "DISCORD_SEND_FRIEND_REQUEST_URL")]
    friend_request_url: Option<String>,

    /// Upload endpoint template containing {friend_id}, overrides the config file
    #[arg(long, global = true, env = "DISCORD_SEND_UPLOAD_URL")]
    upload_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a template config file
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Show where config is read from and which values are set
    Status,

    /// Send a friend request
    FriendRequest {
        /// Target username
        username: String,

        /// Target discriminator
        discriminator: String,
    },

    /// Upload a file to a friend
    SendFile {
        /// Recipient (friend) ID
        #[arg(short, long)]
        to: String,

        /// File to upload
        path: PathBuf,
    },

    /// Send the friend request, then the file, using [targets] from the config
    Run,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let path = Config::resolve_path(cli.config.as_deref())?;
    let overrides = Overrides {
        token: cli.token,
        friend_request_url: cli.friend_request_url,
        upload_url: cli.upload_url,
    };
    let mut out = std::io::stdout();

    // Config is loaded per command so `init --force` can replace a broken file
    let ok = match cli.command {
        Commands::Init { force } => {
            Config::write_template(&path, force)?;
            println!("Wrote template config to {}", path.display());
            true
        }
        Commands::Status => {
            let config = load_config(&path, overrides)?;
            print_status(&path, &config);
            true
        }
        Commands::FriendRequest {
            username,
            discriminator,
        } => {
            let client = load_config(&path, overrides)?.client()?;
            tracing::info!("Sending friend request...");
            api::friend_request(&mut out, &client, &username, &discriminator).await
        }
        Commands::SendFile { to, path: file } => {
            let client = load_config(&path, overrides)?.client()?;
            tracing::info!("Sending file...");
            api::send_file(&mut out, &client, &to, &file).await
        }
        Commands::Run => {
            let config = load_config(&path, overrides)?;
            let client = config.client()?;
            api::run(&mut out, &client, &config.targets).await
        }
    };

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn load_config(path: &Path, overrides: Overrides) -> Result<Config> {
    let mut config = Config::load_from(path)?;
    config.apply_overrides(overrides);
    Ok(config)
}

fn print_status(path: &Path, config: &Config) {
    fn show(value: &str) -> &str {
        if value.is_empty() {
            "(not set)"
        } else {
            value
        }
    }

    let exists = if path.exists() { "" } else { " (missing)" };
    println!("Config:             {}{}", path.display(), exists);
    println!(
        "Token:              {}",
        config
            .bot_token()
            .map(|t| t.masked())
            .unwrap_or_else(|e| format!("({:#})", e))
    );
    println!("Friend request URL: {}", show(&config.friend_request_url));
    println!("Upload URL:         {}", show(&config.upload_url));
    match config.timeout_secs {
        Some(secs) => println!("Timeout:            {}s", secs),
        None => println!("Timeout:            (none)"),
    }
    if let Err(e) = config.endpoints() {
        println!("Endpoints invalid:  {:#}", e);
    }
}
