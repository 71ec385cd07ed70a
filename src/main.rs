//! # memobird-bot CLI
//!
//! Runs the bot service and offers a few operator commands.
//!
//! ## Usage
//!
//! ```bash
//! # Run the service (HTTP server + bot)
//! MEMOBIRD_AK=... BOT_USERNAME=memobird_bot memobird-bot serve
//!
//! # Print text directly on a device
//! memobird-bot print --device 0123456789abcdef "Hello!"
//!
//! # Bind a device to the application's access key
//! memobird-bot bind --device 0123456789abcdef
//! ```

use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;

use memobird_bot::{
    BotError,
    bot::Bot,
    config::{MemobirdArgs, ServeArgs},
    memobird::{App, BirdApp},
    server::{self, ServerConfig},
    store,
};

/// memobird-bot - Memobird printers for chat users
#[derive(Parser, Debug)]
#[command(name = "memobird-bot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server and handle chat messages
    Serve(ServeArgs),

    /// Print text on a device
    Print {
        #[command(flatten)]
        memobird: MemobirdArgs,

        /// Memobird device ID
        #[arg(long)]
        device: String,

        /// Text to print
        text: String,
    },

    /// Bind a device to the application
    Bind {
        #[command(flatten)]
        memobird: MemobirdArgs,

        /// Memobird device ID
        #[arg(long)]
        device: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memobird_bot=info,tower_http=info".into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), BotError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            if args.bot_username.trim().is_empty() {
                return Err(BotError::Config("BOT_USERNAME must not be empty".to_string()));
            }
            let app = new_app(&args.memobird)?;
            let pool = store::connect(&args.database_url).await?;
            let bot = Bot::from_pool(pool, Arc::new(app), args.bot_username.trim());

            info!(bot_username = %args.bot_username, "Starting memobird-bot");
            server::serve(
                ServerConfig {
                    listen_addr: args.listen_addr(),
                },
                bot,
            )
            .await?;
        }
        Commands::Print {
            memobird,
            device,
            text,
        } => {
            let app = new_app(&memobird)?;
            let result = app.print_text(&text, &device).await?;
            println!("- Sent: {}\n- Printed: {}", result.success, result.printed);
            if let Some(err) = result.error {
                println!("- Error: {}", err);
            }
            if result.success {
                println!("- Content ID: {}", result.content_id);
            }
        }
        Commands::Bind { memobird, device } => {
            let app = new_app(&memobird)?;
            let result = app.bind_device(&device).await?;
            println!("- Bound: {}", result.success);
            if let Some(err) = result.error {
                println!("- Error: {}", err);
            }
            if result.success {
                println!("- User ID: {}", result.user_id);
            }
        }
    }

    Ok(())
}

fn new_app(args: &MemobirdArgs) -> Result<App, BotError> {
    if args.access_key.trim().is_empty() {
        return Err(BotError::Config("MEMOBIRD_AK must not be empty".to_string()));
    }
    Ok(App::new(args.app_config())?)
}
