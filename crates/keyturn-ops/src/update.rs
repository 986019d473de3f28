use mpl_token_metadata::instructions::{
    UpdateAsAuthorityItemDelegateV2Builder, UpdateAsUpdateAuthorityV2Builder,
};
use mpl_token_metadata::types::Data;
use tracing::info;

use crate::prelude::*;
use crate::utils::{execute, submit_transaction};

/// Which capacity the signer acts in when mutating metadata.
#[derive(Debug, Clone, Copy)]
pub enum UpdateAuthority {
    /// The signer is the metadata's update authority.
    UpdateAuthority,
    /// The signer holds an AuthorityItem delegation. The update authority
    /// recorded on the metadata is needed to locate the delegate record.
    AuthorityItemDelegate { update_authority: Pubkey },
}

/// Clear the mutability flag on `mint`'s metadata.
///
/// One-way: the metadata program refuses every later update, including a
/// second call to this function, which then fails with [`crate::Error::Immutable`].
pub async fn set_immutable(
    client: &RpcClient,
    authority: &Keypair,
    mint: &Pubkey,
    role: UpdateAuthority,
) -> crate::Result<Signature> {
    let (metadata, _) = crate::pda::find_metadata(mint);

    info!(%mint, authority = %authority.pubkey(), "setting metadata immutable");

    let update_ix = match role {
        UpdateAuthority::UpdateAuthority => UpdateAsUpdateAuthorityV2Builder::new()
            .authority(authority.pubkey())
            .mint(*mint)
            .metadata(metadata)
            .payer(authority.pubkey())
            .is_mutable(false)
            .instruction(),
        UpdateAuthority::AuthorityItemDelegate { update_authority } => {
            let (delegate_record, _) = crate::pda::find_authority_item_record(
                mint,
                &update_authority,
                &authority.pubkey(),
            );
            UpdateAsAuthorityItemDelegateV2Builder::new()
                .authority(authority.pubkey())
                .delegate_record(Some(delegate_record))
                .mint(*mint)
                .metadata(metadata)
                .payer(authority.pubkey())
                .is_mutable(false)
                .instruction()
        }
    };

    let (mut tx, recent_blockhash) = execute(client, &authority.pubkey(), &[update_ix]).await?;
    tx.try_sign(&[authority], recent_blockhash)?;

    submit_transaction(client, tx).await
}

/// Fields of the on-chain `Data` struct that can be rewritten. Anything left
/// `None` keeps its current value.
#[derive(Debug, Clone, Default)]
pub struct MetadataPatch {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub uri: Option<String>,
}

/// Rewrite name/symbol/uri as the update authority, preserving every field
/// the patch does not name. The current state is read back at confirmed
/// commitment first since the program expects the full `Data` struct.
pub async fn update_data(
    client: &RpcClient,
    authority: &Keypair,
    mint: &Pubkey,
    patch: MetadataPatch,
) -> crate::Result<Signature> {
    let current = crate::status::read_metadata(client, mint).await?;
    if !current.is_mutable {
        return Err(crate::Error::Immutable);
    }

    let (metadata, _) = crate::pda::find_metadata(mint);

    let data = Data {
        name: patch
            .name
            .unwrap_or_else(|| crate::status::trimmed(&current.name)),
        symbol: patch
            .symbol
            .unwrap_or_else(|| crate::status::trimmed(&current.symbol)),
        uri: patch
            .uri
            .unwrap_or_else(|| crate::status::trimmed(&current.uri)),
        seller_fee_basis_points: current.seller_fee_basis_points,
        creators: current.creators,
    };

    info!(%mint, name = %data.name, uri = %data.uri, "updating metadata fields");

    let update_ix = UpdateAsUpdateAuthorityV2Builder::new()
        .authority(authority.pubkey())
        .mint(*mint)
        .metadata(metadata)
        .payer(authority.pubkey())
        .data(data)
        .instruction();

    let (mut tx, recent_blockhash) = execute(client, &authority.pubkey(), &[update_ix]).await?;
    tx.try_sign(&[authority], recent_blockhash)?;

    submit_transaction(client, tx).await
}
