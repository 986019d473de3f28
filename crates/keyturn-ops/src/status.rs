use mpl_token_metadata::accounts::Metadata;
use serde::Serialize;
use solana_sdk::commitment_config::CommitmentConfig;

use crate::prelude::*;

/// Read-only snapshot of a mint's metadata and its escrow delegation state.
///
/// Reflects on-chain state at confirmed commitment at call time; callers that
/// need finality should re-query rather than sleep.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintStatus {
    pub mint: String,
    pub metadata_address: String,
    pub update_authority: String,
    pub is_mutable: bool,
    pub primary_sale_happened: bool,
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub delegate: String,
    pub delegate_record: String,
    pub delegate_record_exists: bool,
}

/// Fetch and decode the metadata account for `mint`.
pub async fn read_metadata(client: &RpcClient, mint: &Pubkey) -> crate::Result<Metadata> {
    let (metadata_address, _) = crate::pda::find_metadata(mint);

    let response = client
        .get_account_with_commitment(&metadata_address, CommitmentConfig::confirmed())
        .await?;

    let account = match response.value {
        Some(account) => account,
        None => return Err(crate::Error::AccountNotFound(metadata_address)),
    };

    Ok(Metadata::safe_deserialize(&account.data)?)
}

pub async fn account_exists(client: &RpcClient, address: &Pubkey) -> crate::Result<bool> {
    let response = client
        .get_account_with_commitment(address, CommitmentConfig::confirmed())
        .await?;
    Ok(response.value.is_some())
}

/// Report metadata state and whether `delegate` holds an AuthorityItem
/// delegation over `mint`.
pub async fn mint_status(
    client: &RpcClient,
    mint: &Pubkey,
    delegate: &Pubkey,
) -> crate::Result<MintStatus> {
    let metadata = read_metadata(client, mint).await?;
    let (metadata_address, _) = crate::pda::find_metadata(mint);
    let (delegate_record, _) =
        crate::pda::find_authority_item_record(mint, &metadata.update_authority, delegate);
    let delegate_record_exists = account_exists(client, &delegate_record).await?;

    Ok(MintStatus {
        mint: mint.to_string(),
        metadata_address: metadata_address.to_string(),
        update_authority: metadata.update_authority.to_string(),
        is_mutable: metadata.is_mutable,
        primary_sale_happened: metadata.primary_sale_happened,
        name: trimmed(&metadata.name),
        symbol: trimmed(&metadata.symbol),
        uri: trimmed(&metadata.uri),
        delegate: delegate.to_string(),
        delegate_record: delegate_record.to_string(),
        delegate_record_exists,
    })
}

pub async fn wallet_balance(client: &RpcClient, address: &Pubkey) -> crate::Result<u64> {
    Ok(client.get_balance(address).await?)
}

/// On-chain strings are stored zero-padded to their maximum length.
pub(crate) fn trimmed(value: &str) -> String {
    value.trim_end_matches('\0').to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_strips_padding() {
        assert_eq!(trimmed("Burrow Born #1\0\0\0\0"), "Burrow Born #1");
        assert_eq!(trimmed("plain"), "plain");
        assert_eq!(trimmed(""), "");
    }

    #[tokio::test]
    #[ignore = "requires devnet RPC access"]
    async fn test_devnet_read_known_metadata() {
        let client = RpcClient::new("https://api.devnet.solana.com".to_owned());
        // token-metadata program itself has no metadata account
        let program: Pubkey = "metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s"
            .parse()
            .unwrap();
        let result = read_metadata(&client, &program).await;
        assert!(matches!(result, Err(crate::Error::AccountNotFound(_))));
    }
}
