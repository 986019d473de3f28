use mpl_token_metadata::instructions::{
    DelegateAuthorityItemV1Builder, RevokeAuthorityItemV1Builder,
};
use tracing::info;

use crate::prelude::*;
use crate::utils::{execute, submit_transaction};

/// Result of a delegation attempt. An existing record is a satisfied state,
/// not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegationOutcome {
    Delegated(Signature),
    AlreadyDelegated,
}

impl DelegationOutcome {
    pub fn signature(&self) -> Option<&Signature> {
        match self {
            DelegationOutcome::Delegated(signature) => Some(signature),
            DelegationOutcome::AlreadyDelegated => None,
        }
    }
}

/// Grant `delegate` the AuthorityItem role over the metadata of `mint`.
///
/// `authority` must control the mint's current update authority; it also
/// pays the fee. Submitting for a pair that is already delegated returns
/// [`DelegationOutcome::AlreadyDelegated`].
pub async fn delegate_authority_item(
    client: &RpcClient,
    authority: &Keypair,
    mint: &Pubkey,
    delegate: &Pubkey,
) -> crate::Result<DelegationOutcome> {
    let (metadata, _) = crate::pda::find_metadata(mint);
    let (master_edition, _) = crate::pda::find_master_edition(mint);
    let (delegate_record, _) =
        crate::pda::find_authority_item_record(mint, &authority.pubkey(), delegate);

    info!(%mint, %delegate, %delegate_record, "delegating authority item");

    let delegate_ix = DelegateAuthorityItemV1Builder::new()
        .delegate_record(Some(delegate_record))
        .delegate(*delegate)
        .metadata(metadata)
        .master_edition(Some(master_edition))
        .mint(*mint)
        .authority(authority.pubkey())
        .payer(authority.pubkey())
        .instruction();

    let (mut tx, recent_blockhash) = execute(client, &authority.pubkey(), &[delegate_ix]).await?;
    tx.try_sign(&[authority], recent_blockhash)?;

    match submit_transaction(client, tx).await {
        Ok(signature) => {
            info!(%mint, %signature, "authority item delegated");
            Ok(DelegationOutcome::Delegated(signature))
        }
        Err(crate::Error::AlreadyDelegated) => {
            info!(%mint, %delegate, "delegate record already exists");
            Ok(DelegationOutcome::AlreadyDelegated)
        }
        Err(e) => Err(e),
    }
}

/// Revoke an AuthorityItem delegation previously granted to `delegate`.
pub async fn revoke_authority_item(
    client: &RpcClient,
    authority: &Keypair,
    mint: &Pubkey,
    delegate: &Pubkey,
) -> crate::Result<Signature> {
    let (metadata, _) = crate::pda::find_metadata(mint);
    let (master_edition, _) = crate::pda::find_master_edition(mint);
    let (delegate_record, _) =
        crate::pda::find_authority_item_record(mint, &authority.pubkey(), delegate);

    info!(%mint, %delegate, %delegate_record, "revoking authority item");

    let revoke_ix = RevokeAuthorityItemV1Builder::new()
        .delegate_record(Some(delegate_record))
        .delegate(*delegate)
        .metadata(metadata)
        .master_edition(Some(master_edition))
        .mint(*mint)
        .authority(authority.pubkey())
        .payer(authority.pubkey())
        .instruction();

    let (mut tx, recent_blockhash) = execute(client, &authority.pubkey(), &[revoke_ix]).await?;
    tx.try_sign(&[authority], recent_blockhash)?;

    submit_transaction(client, tx).await
}
