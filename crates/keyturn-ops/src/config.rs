use serde::Deserialize;
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use std::str::FromStr;

/// Chain-facing configuration shared by the server and the admin CLI.
///
/// Values can come from a TOML config file; the environment variables below
/// override the file so secrets never need to live on disk.
#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct SolanaConfig {
    pub rpc_url: String,
    /// Base58-encoded secret key of the update-authority wallet.
    pub wallet_secret_key: String,
    /// Program the escrow authority PDA is derived under.
    pub escrow_program_id: String,
    pub candy_machine: Option<String>,
    pub collection_mint: Option<String>,
    pub helius_api_key: Option<String>,
}

impl Default for SolanaConfig {
    fn default() -> Self {
        Self {
            rpc_url: Self::default_rpc_url(),
            wallet_secret_key: String::new(),
            escrow_program_id: String::new(),
            candy_machine: None,
            collection_mint: None,
            helius_api_key: None,
        }
    }
}

impl SolanaConfig {
    pub fn default_rpc_url() -> String {
        "https://api.devnet.solana.com".to_owned()
    }

    /// Overlay values from the environment.
    pub fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("SOLANA_RPC_URL") {
            self.rpc_url = v;
        }
        if let Ok(v) = std::env::var("WALLET_SECRET_KEY_BASE58") {
            self.wallet_secret_key = v;
        }
        if let Ok(v) = std::env::var("ESCROW_PROGRAM_ID") {
            self.escrow_program_id = v;
        }
        if let Ok(v) = std::env::var("CANDY_MACHINE_ID") {
            self.candy_machine = Some(v);
        }
        if let Ok(v) = std::env::var("COLLECTION_MINT") {
            self.collection_mint = Some(v);
        }
        if let Ok(v) = std::env::var("HELIUS_API_KEY") {
            self.helius_api_key = Some(v);
        }
    }

    /// Environment-only construction, validated; used by the CLI.
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Self::default();
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Nothing works without the wallet, the RPC endpoint and the escrow
    /// program id, so a broken value must stop the process at startup.
    pub fn validate(&self) -> crate::Result<()> {
        self.keypair()?;
        self.escrow_program()?;
        if let Some(candy_machine) = &self.candy_machine {
            parse_pubkey(candy_machine, "CANDY_MACHINE_ID")?;
        }
        if let Some(collection) = &self.collection_mint {
            parse_pubkey(collection, "COLLECTION_MINT")?;
        }
        Ok(())
    }

    pub fn keypair(&self) -> crate::Result<Keypair> {
        if self.wallet_secret_key.is_empty() {
            return Err(crate::Error::InvalidSecretKey(
                "WALLET_SECRET_KEY_BASE58 is not set".to_owned(),
            ));
        }
        crate::utils::keypair_from_base58(&self.wallet_secret_key)
    }

    pub fn escrow_program(&self) -> crate::Result<Pubkey> {
        parse_pubkey(&self.escrow_program_id, "ESCROW_PROGRAM_ID")
    }

    /// The escrow authority PDA and its bump.
    pub fn escrow_authority(&self) -> crate::Result<(Pubkey, u8)> {
        Ok(crate::pda::find_escrow(&self.escrow_program()?))
    }
}

pub fn parse_pubkey(value: &str, what: &str) -> crate::Result<Pubkey> {
    if value.is_empty() {
        return Err(crate::Error::InvalidAddress(format!("{what} is not set")));
    }
    Pubkey::from_str(value)
        .map_err(|_| crate::Error::InvalidAddress(format!("{what}: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signer::Signer;

    fn valid_config() -> SolanaConfig {
        let keypair = Keypair::new();
        SolanaConfig {
            wallet_secret_key: bs58::encode(keypair.to_bytes()).into_string(),
            escrow_program_id: Pubkey::new_unique().to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        valid_config().validate().unwrap();
    }

    #[test]
    fn test_validate_requires_wallet() {
        let config = SolanaConfig {
            wallet_secret_key: String::new(),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(),
            Err(crate::Error::InvalidSecretKey(_))
        ));
    }

    #[test]
    fn test_validate_requires_escrow_program() {
        let config = SolanaConfig {
            escrow_program_id: String::new(),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(),
            Err(crate::Error::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_validate_rejects_malformed_candy_machine() {
        let config = SolanaConfig {
            candy_machine: Some("definitely-not-a-pubkey".to_owned()),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(),
            Err(crate::Error::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_escrow_authority_matches_pda_helper() {
        let config = valid_config();
        let program = config.escrow_program().unwrap();
        assert_eq!(
            config.escrow_authority().unwrap(),
            crate::pda::find_escrow(&program)
        );
        let keypair = config.keypair().unwrap();
        assert_ne!(keypair.pubkey(), Pubkey::default());
    }
}
