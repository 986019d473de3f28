use keyturn_ops::config::SolanaConfig;
use serde::Deserialize;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{pubkey::Pubkey, signature::Keypair};
use std::sync::Arc;

pub mod api;
pub mod dedupe;
pub mod error;

use dedupe::SignatureStore;

#[derive(Deserialize, Clone)]
pub struct Config {
    #[serde(default = "Config::default_host")]
    pub host: String,
    #[serde(default = "Config::default_port")]
    pub port: u16,
    #[serde(default)]
    pub cors_origins: Vec<String>,
    #[serde(default)]
    pub solana: SolanaConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            cors_origins: Vec::new(),
            solana: SolanaConfig::default(),
        }
    }
}

impl Config {
    pub fn default_host() -> String {
        "127.0.0.1".to_owned()
    }

    pub fn default_port() -> u16 {
        8080
    }

    /// Load from the TOML file named by `argv[1]` ("-" reads stdin), then
    /// overlay environment variables; defaults cover everything else.
    pub fn get_config() -> Self {
        let mut config = match std::env::args().nth(1) {
            Some(s) => if s == "-" {
                use std::io::Read;
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(|error| {
                        tracing::error!("Error reading STDIN: {}", error);
                    })
                    .map(move |_| buf)
            } else {
                std::fs::read_to_string(s).map_err(|error| {
                    tracing::error!("Error reading config: {}", error);
                })
            }
            .and_then(|s| {
                toml::from_str(&s).map_err(|error| {
                    tracing::error!("Error parsing config: {}", error);
                })
            })
            .map_err(|_| {
                tracing::warn!("Invalid config file, using default");
            })
            .unwrap_or_default(),
            None => {
                tracing::info!("No config specified, using default");
                Config::default()
            }
        };
        config.solana.apply_env();
        config
    }

    /// Build a CORS middleware.
    pub fn cors(&self) -> actix_cors::Cors {
        let mut cors = actix_cors::Cors::default()
            .allow_any_header()
            .allow_any_method();
        if self.cors_origins.is_empty() {
            cors = cors.allow_any_origin();
        } else {
            for origin in &self.cors_origins {
                cors = cors.allowed_origin(origin);
            }
        }
        cors
    }
}

/// Per-process state shared by every handler.
pub struct AppContext {
    pub client: Arc<RpcClient>,
    /// Update-authority wallet; signs delegations and updates, pays fees.
    pub wallet: Arc<Keypair>,
    pub escrow_program: Pubkey,
    pub escrow_authority: Pubkey,
    pub escrow_bump: u8,
    pub signatures: Arc<dyn SignatureStore>,
}
