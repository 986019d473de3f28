//! Webhook payload envelopes and mint-event extraction.
//!
//! Indexers deliver several shapes for the same logical event; extraction
//! tries them in a fixed order and gives up rather than guessing.

use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Loose union of every field the supported payload shapes may carry.
/// Shyft uses snake_case where Helius uses camelCase, hence the aliases.
#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct WebhookEnvelope {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub account: Option<String>,
    pub mint: Option<String>,
    #[serde(alias = "nft_address")]
    pub nft_address: Option<String>,
    #[serde(alias = "candy_machine")]
    pub candy_machine: Option<String>,
    pub signature: Option<String>,
    #[serde(alias = "tx_signature")]
    pub tx_signature: Option<String>,
    pub nft_mint: Option<String>,
    pub owner: Option<String>,
    pub parsed: Option<JsonValue>,
    pub account_data: Option<JsonValue>,
}

/// A freshly minted NFT reported by the indexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintEvent {
    pub mint: String,
    pub candy_machine: Option<String>,
    pub signature: Option<String>,
}

/// An NFT deposited back into the escrow flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositEvent {
    pub nft_mint: String,
    pub owner: String,
    pub signature: Option<String>,
}

fn str_field(value: &JsonValue, key: &str) -> Option<String> {
    value.get(key).and_then(JsonValue::as_str).map(str::to_owned)
}

/// Pull a mint event out of a webhook body, trying each supported shape in
/// turn. Returns `None` when no shape yields a mint address.
pub fn extract_mint_event(payload: &JsonValue) -> Option<MintEvent> {
    let env: WebhookEnvelope = serde_json::from_value(payload.clone()).ok()?;

    // Helius enhanced event (primary)
    if env.event_type.as_deref() == Some("NFT_MINT") {
        return env.account.map(|mint| MintEvent {
            mint,
            candy_machine: env.candy_machine,
            signature: env.signature,
        });
    }

    // Helius parsed-transaction shape
    if let Some(data) = env.parsed.as_ref().and_then(|parsed| parsed.get("data")) {
        let mint = str_field(data, "mint")
            .or_else(|| str_field(data, "account"))
            .or_else(|| str_field(data, "nftMint"));
        return mint.map(|mint| MintEvent {
            mint,
            candy_machine: None,
            signature: env.signature,
        });
    }

    // Helius raw account-data shape
    if let Some(first) = env
        .account_data
        .as_ref()
        .and_then(JsonValue::as_array)
        .and_then(|entries| entries.first())
    {
        let mint = str_field(first, "account").or_else(|| str_field(first, "mint"));
        return mint.map(|mint| MintEvent {
            mint,
            candy_machine: None,
            signature: env.signature,
        });
    }

    // Shyft fallback
    if env.event_type.as_deref() == Some("NFT_CREATED") {
        let mint = env.account.or(env.mint).or(env.nft_address);
        return mint.map(|mint| MintEvent {
            mint,
            candy_machine: env.candy_machine,
            signature: env.signature.or(env.tx_signature),
        });
    }

    None
}

/// Pull a deposit event out of a webhook body. Both the tagged
/// `NFT_DEPOSIT` shape and the direct `{nftMint, owner}` shape are accepted;
/// both require mint and owner.
pub fn extract_deposit_event(payload: &JsonValue) -> Option<DepositEvent> {
    let env: WebhookEnvelope = serde_json::from_value(payload.clone()).ok()?;

    if env.event_type.as_deref() == Some("NFT_DEPOSIT") {
        return match (env.nft_mint, env.owner) {
            (Some(nft_mint), Some(owner)) => Some(DepositEvent {
                nft_mint,
                owner,
                signature: env.signature,
            }),
            _ => None,
        };
    }

    match (env.nft_mint, env.owner) {
        (Some(nft_mint), Some(owner)) => Some(DepositEvent {
            nft_mint,
            owner,
            signature: env.signature.or(env.tx_signature),
        }),
        _ => None,
    }
}

/// Top-level keys of a payload, for "no mint address found" acknowledgments.
pub fn top_level_fields(payload: &JsonValue) -> Vec<String> {
    payload
        .as_object()
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MINT: &str = "8LB1Hm9YyA1y2CcBxuQzBMwDkRC2cQCrSo2DduUqp61Y";

    #[test]
    fn test_helius_nft_mint_shape() {
        let payload = json!({
            "type": "NFT_MINT",
            "account": MINT,
            "candyMachine": "CMid111111111111111111111111111111111111111",
            "signature": "sig-1",
        });
        let event = extract_mint_event(&payload).unwrap();
        assert_eq!(event.mint, MINT);
        assert_eq!(
            event.candy_machine.as_deref(),
            Some("CMid111111111111111111111111111111111111111")
        );
        assert_eq!(event.signature.as_deref(), Some("sig-1"));
    }

    #[test]
    fn test_helius_parsed_data_shape() {
        let payload = json!({
            "parsed": { "data": { "mint": MINT } },
            "signature": "sig-2",
        });
        let event = extract_mint_event(&payload).unwrap();
        assert_eq!(event.mint, MINT);
        assert_eq!(event.signature.as_deref(), Some("sig-2"));

        // alternate field names inside parsed.data
        let payload = json!({ "parsed": { "data": { "nftMint": MINT } } });
        assert_eq!(extract_mint_event(&payload).unwrap().mint, MINT);
    }

    #[test]
    fn test_helius_account_data_shape() {
        let payload = json!({
            "accountData": [ { "account": MINT }, { "account": "ignored" } ],
            "signature": "sig-3",
        });
        let event = extract_mint_event(&payload).unwrap();
        assert_eq!(event.mint, MINT);

        let payload = json!({ "accountData": [] });
        assert!(extract_mint_event(&payload).is_none());
    }

    #[test]
    fn test_shyft_nft_created_shape() {
        let payload = json!({
            "type": "NFT_CREATED",
            "nft_address": MINT,
            "candy_machine": "CMid111111111111111111111111111111111111111",
            "tx_signature": "sig-4",
        });
        let event = extract_mint_event(&payload).unwrap();
        assert_eq!(event.mint, MINT);
        assert_eq!(event.signature.as_deref(), Some("sig-4"));
    }

    #[test]
    fn test_unrecognized_payload_yields_nothing() {
        assert!(extract_mint_event(&json!({ "hello": "world" })).is_none());
        assert!(extract_mint_event(&json!("not even an object")).is_none());
        assert!(extract_mint_event(&json!({ "type": "NFT_MINT" })).is_none());
    }

    #[test]
    fn test_deposit_tagged_shape() {
        let payload = json!({
            "type": "NFT_DEPOSIT",
            "nftMint": MINT,
            "owner": "ownerAddr",
            "signature": "sig-5",
        });
        let event = extract_deposit_event(&payload).unwrap();
        assert_eq!(event.nft_mint, MINT);
        assert_eq!(event.owner, "ownerAddr");
        assert_eq!(event.signature.as_deref(), Some("sig-5"));
    }

    #[test]
    fn test_deposit_direct_shape_with_tx_signature() {
        let payload = json!({
            "nftMint": MINT,
            "owner": "ownerAddr",
            "txSignature": "sig-6",
        });
        let event = extract_deposit_event(&payload).unwrap();
        assert_eq!(event.signature.as_deref(), Some("sig-6"));
    }

    #[test]
    fn test_deposit_requires_mint_and_owner() {
        assert!(extract_deposit_event(&json!({ "nftMint": MINT })).is_none());
        assert!(extract_deposit_event(&json!({ "owner": "ownerAddr" })).is_none());
        assert!(extract_deposit_event(&json!({ "type": "NFT_DEPOSIT" })).is_none());
    }

    #[test]
    fn test_top_level_fields() {
        let fields = top_level_fields(&json!({ "a": 1, "b": 2 }));
        assert_eq!(fields, vec!["a".to_owned(), "b".to_owned()]);
        assert!(top_level_fields(&json!([1, 2])).is_empty());
    }
}
