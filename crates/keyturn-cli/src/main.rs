use anyhow::{anyhow, bail};
use clap::{Parser, Subcommand};
use keyturn_helius::{CreateWebhookRequest, Helius};
use keyturn_ops::{
    config::SolanaConfig,
    delegate::{self, DelegationOutcome},
    pda, status,
    update::{self, MetadataPatch, UpdateAuthority},
};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey, signer::Signer};
use std::str::FromStr;

/// Operational tooling for the KeyTurn escrow workflow.
///
/// Configuration comes from the environment: WALLET_SECRET_KEY_BASE58,
/// SOLANA_RPC_URL, ESCROW_PROGRAM_ID and, where needed, CANDY_MACHINE_ID and
/// HELIUS_API_KEY.
#[derive(Parser)]
#[command(name = "keyturn", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the derived escrow, metadata and delegate-record addresses
    Pda {
        /// NFT mint address; omit to print only the escrow authority
        #[arg(long)]
        mint: Option<String>,
    },
    /// Delegate the AuthorityItem role over a mint to the escrow authority
    Delegate {
        #[arg(long)]
        mint: String,
    },
    /// Revoke a previously created AuthorityItem delegation
    Revoke {
        #[arg(long)]
        mint: String,
    },
    /// Lock a mint's metadata (one-way)
    SetImmutable {
        #[arg(long)]
        mint: String,
    },
    /// Rewrite the metadata URI, and optionally name and symbol
    UpdateUri {
        #[arg(long)]
        mint: String,
        #[arg(long)]
        uri: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        symbol: Option<String>,
    },
    /// Report metadata and delegation state for a mint
    Status {
        #[arg(long)]
        mint: String,
    },
    /// Print the configured wallet's balance
    Balance,
    /// Register the webhook endpoint with Helius for candy-machine mints
    SetupWebhook {
        /// Publicly reachable URL of the /api/mint-hook endpoint
        #[arg(long)]
        url: String,
        #[arg(long, default_value = "devnet")]
        network: String,
    },
}

fn parse_mint(mint: &str) -> anyhow::Result<Pubkey> {
    Pubkey::from_str(mint).map_err(|_| anyhow!("invalid mint address: {mint}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = SolanaConfig::from_env()?;
    let client = RpcClient::new_with_commitment(
        config.rpc_url.clone(),
        CommitmentConfig::confirmed(),
    );
    let wallet = config.keypair()?;
    let (escrow_authority, escrow_bump) = config.escrow_authority()?;

    match cli.command {
        Command::Pda { mint } => {
            println!("escrow program:   {}", config.escrow_program()?);
            println!("escrow authority: {escrow_authority} (bump {escrow_bump})");
            if let Some(mint) = mint {
                let mint = parse_mint(&mint)?;
                let (metadata, _) = pda::find_metadata(&mint);
                let (record, _) =
                    pda::find_authority_item_record(&mint, &wallet.pubkey(), &escrow_authority);
                println!("metadata:         {metadata}");
                println!("delegate record:  {record}");
            }
        }
        Command::Delegate { mint } => {
            let mint = parse_mint(&mint)?;
            match delegate::delegate_authority_item(&client, &wallet, &mint, &escrow_authority)
                .await?
            {
                DelegationOutcome::Delegated(signature) => println!("delegated: {signature}"),
                DelegationOutcome::AlreadyDelegated => println!("already delegated"),
            }
        }
        Command::Revoke { mint } => {
            let mint = parse_mint(&mint)?;
            let signature =
                delegate::revoke_authority_item(&client, &wallet, &mint, &escrow_authority).await?;
            println!("revoked: {signature}");
        }
        Command::SetImmutable { mint } => {
            let mint = parse_mint(&mint)?;
            let signature = update::set_immutable(
                &client,
                &wallet,
                &mint,
                UpdateAuthority::UpdateAuthority,
            )
            .await?;
            println!("metadata locked: {signature}");
        }
        Command::UpdateUri {
            mint,
            uri,
            name,
            symbol,
        } => {
            let mint = parse_mint(&mint)?;
            let patch = MetadataPatch {
                name,
                symbol,
                uri: Some(uri),
            };
            let signature = update::update_data(&client, &wallet, &mint, patch).await?;
            println!("metadata updated: {signature}");
        }
        Command::Status { mint } => {
            let mint = parse_mint(&mint)?;
            let status = status::mint_status(&client, &mint, &escrow_authority).await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Command::Balance => {
            let balance = status::wallet_balance(&client, &wallet.pubkey()).await?;
            println!("{} lamports ({})", balance, wallet.pubkey());
        }
        Command::SetupWebhook { url, network } => {
            let api_key = config
                .helius_api_key
                .clone()
                .ok_or_else(|| anyhow!("HELIUS_API_KEY is not set"))?;
            let Some(candy_machine) = config.candy_machine.clone() else {
                bail!("CANDY_MACHINE_ID is not set");
            };

            let webhook_type = match network.as_str() {
                "devnet" => "enhancedDevnet",
                "mainnet" | "mainnet-beta" => "enhanced",
                other => bail!("unknown network: {other}"),
            };

            let helius = Helius::new(reqwest::Client::new(), &api_key);
            let webhook = helius
                .create_webhook(CreateWebhookRequest {
                    webhook_url: url,
                    transaction_types: vec!["NFT_MINT".to_owned()],
                    account_addresses: vec![candy_machine],
                    webhook_type: Some(webhook_type.to_owned()),
                    auth_header: None,
                })
                .await?;
            println!("webhook created: {}", webhook.webhook_id);
        }
    }

    Ok(())
}
