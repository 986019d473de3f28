//! End-to-end devnet exercise of the delegate-then-lock workflow.
//!
//! Needs a funded update-authority wallet (environment configuration as in
//! `SolanaConfig::from_env`) plus TEST_MINT pointing at a mutable NFT whose
//! update authority is that wallet. Run with `cargo test -- --ignored`.

use keyturn_ops::{
    config::SolanaConfig,
    delegate::{self, DelegationOutcome},
    prelude::*,
    status,
    update::{self, UpdateAuthority},
};
use solana_sdk::commitment_config::CommitmentConfig;

#[tokio::test]
#[ignore = "requires devnet RPC access and a funded wallet"]
async fn test_delegate_then_lock_flow() {
    let config = SolanaConfig::from_env().unwrap();
    let mint: Pubkey = std::env::var("TEST_MINT")
        .expect("TEST_MINT must name a mutable NFT owned by the wallet")
        .parse()
        .unwrap();

    let client = RpcClient::new_with_commitment(
        config.rpc_url.clone(),
        CommitmentConfig::confirmed(),
    );
    let wallet = config.keypair().unwrap();
    let (escrow, _) = config.escrow_authority().unwrap();

    // delegation is idempotent from the caller's perspective
    let outcome = delegate::delegate_authority_item(&client, &wallet, &mint, &escrow)
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        DelegationOutcome::Delegated(_) | DelegationOutcome::AlreadyDelegated
    ));
    let outcome = delegate::delegate_authority_item(&client, &wallet, &mint, &escrow)
        .await
        .unwrap();
    assert_eq!(outcome, DelegationOutcome::AlreadyDelegated);

    let before = status::mint_status(&client, &mint, &escrow).await.unwrap();
    assert!(before.delegate_record_exists);

    if before.is_mutable {
        update::set_immutable(&client, &wallet, &mint, UpdateAuthority::UpdateAuthority)
            .await
            .unwrap();
    }

    let after = status::mint_status(&client, &mint, &escrow).await.unwrap();
    assert!(!after.is_mutable);

    // locked is final: no success signature ever again
    let err = update::set_immutable(&client, &wallet, &mint, UpdateAuthority::UpdateAuthority)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        keyturn_ops::Error::Immutable | keyturn_ops::Error::Program(_)
    ));
}
