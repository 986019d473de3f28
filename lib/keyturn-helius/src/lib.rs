use anyhow::ensure;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

pub mod payload;

pub use payload::{extract_deposit_event, extract_mint_event, DepositEvent, MintEvent};

const WEBHOOK_API_URL: &str = "https://api.helius.xyz/v0/webhooks";

#[derive(Debug)]
pub struct Helius {
    client: reqwest::Client,
    api_key: String,
}

pub fn is_pubkey(s: &str) -> Result<&str, anyhow::Error> {
    let mut buf = [0u8; 32];
    let written = bs58::decode(s).into(&mut buf)?;
    ensure!(written == buf.len(), "invalid pubkey");
    Ok(s)
}

#[skip_serializing_none]
#[derive(Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebhookRequest {
    #[serde(rename = "webhookURL")]
    pub webhook_url: String,
    pub transaction_types: Vec<String>,
    pub account_addresses: Vec<String>,
    /// "enhanced" on mainnet, "enhancedDevnet" on devnet.
    pub webhook_type: Option<String>,
    pub auth_header: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    #[serde(rename = "webhookID")]
    pub webhook_id: String,
    pub wallet: Option<String>,
    #[serde(rename = "webhookURL")]
    pub webhook_url: String,
    #[serde(default)]
    pub transaction_types: Vec<String>,
    #[serde(default)]
    pub account_addresses: Vec<String>,
    pub webhook_type: Option<String>,
}

impl Helius {
    pub fn new(client: reqwest::Client, apikey: &str) -> Self {
        Self {
            client,
            api_key: apikey.to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{WEBHOOK_API_URL}{path}?api-key={}", self.api_key)
    }

    /// Subscribe a webhook URL to events on the given accounts.
    pub async fn create_webhook(&self, req: CreateWebhookRequest) -> Result<Webhook, anyhow::Error> {
        for address in &req.account_addresses {
            is_pubkey(address)?;
        }

        let webhook = self
            .client
            .post(self.url(""))
            .json(&req)
            .send()
            .await?
            .error_for_status()?
            .json::<Webhook>()
            .await?;

        tracing::info!(webhook_id = %webhook.webhook_id, "created helius webhook");

        Ok(webhook)
    }

    pub async fn get_webhooks(&self) -> Result<Vec<Webhook>, anyhow::Error> {
        let webhooks = self
            .client
            .get(self.url(""))
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Webhook>>()
            .await?;
        Ok(webhooks)
    }

    pub async fn delete_webhook(&self, webhook_id: &str) -> Result<(), anyhow::Error> {
        self.client
            .delete(self.url(&format!("/{webhook_id}")))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pubkey() {
        assert!(is_pubkey("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s").is_ok());
        assert!(is_pubkey("too-short").is_err());
        assert!(is_pubkey("").is_err());
    }

    #[test]
    fn test_create_webhook_request_serializes_camel_case() {
        let req = CreateWebhookRequest {
            webhook_url: "https://example.com/api/mint-hook".to_owned(),
            transaction_types: vec!["NFT_MINT".to_owned()],
            account_addresses: vec!["metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s".to_owned()],
            webhook_type: Some("enhancedDevnet".to_owned()),
            auth_header: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["webhookURL"], "https://example.com/api/mint-hook");
        assert_eq!(json["transactionTypes"][0], "NFT_MINT");
        assert_eq!(json["webhookType"], "enhancedDevnet");
        // skipped, not null
        assert!(json.get("authHeader").is_none());
    }
}
