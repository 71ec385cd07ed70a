//! # Configuration
//!
//! Command-line options, each with an environment variable fallback so the
//! service can be configured entirely from its environment.

use clap::Args;
use std::time::Duration;

use crate::memobird::AppConfig;
use crate::memobird::client::API_PREFIX;

/// Options for talking to the Memobird API.
#[derive(Args, Debug, Clone)]
pub struct MemobirdArgs {
    /// Access key of the Memobird application
    #[arg(long = "access-key", env = "MEMOBIRD_AK", hide_env_values = true)]
    pub access_key: String,

    /// API prefix
    #[arg(long, env = "MEMOBIRD_API_PREFIX", default_value = API_PREFIX)]
    pub api_prefix: String,

    /// Request timeout in seconds
    #[arg(long, env = "MEMOBIRD_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,
}

impl MemobirdArgs {
    pub fn app_config(&self) -> AppConfig {
        AppConfig::new(&self.access_key)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_api_prefix(&self.api_prefix)
    }
}

/// Options for running the bot service.
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub memobird: MemobirdArgs,

    /// Chat handle of the bot, printed in verification instructions
    #[arg(long, env = "BOT_USERNAME")]
    pub bot_username: String,

    /// SQLite database URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:memobird-bot.db")]
    pub database_url: String,

    /// Address to listen on
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen: String,

    /// Port to listen on, replacing the port of --listen
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,
}

impl ServeArgs {
    pub fn listen_addr(&self) -> String {
        match self.port {
            Some(port) => {
                let host = self.listen.rsplit_once(':').map_or(self.listen.as_str(), |(host, _)| host);
                format!("{}:{}", host, port)
            }
            None => self.listen.clone(),
        }
    }
}
