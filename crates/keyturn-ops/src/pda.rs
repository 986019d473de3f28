use mpl_token_metadata::accounts::{MasterEdition, Metadata, MetadataDelegateRecord};
use mpl_token_metadata::types::MetadataDelegateRole;
use solana_program::pubkey::Pubkey;

/// Escrow authority PDA: seeds = ["escrow"]
///
/// Has no private key; acts as the delegated authority over deposited NFTs.
pub fn find_escrow(escrow_program: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[b"escrow"], escrow_program)
}

/// Token-metadata account PDA for a mint.
pub fn find_metadata(mint: &Pubkey) -> (Pubkey, u8) {
    Metadata::find_pda(mint)
}

/// Master edition PDA for a mint.
pub fn find_master_edition(mint: &Pubkey) -> (Pubkey, u8) {
    MasterEdition::find_pda(mint)
}

/// Delegate record PDA for the AuthorityItem role granted by
/// `update_authority` to `delegate` over `mint`.
pub fn find_authority_item_record(
    mint: &Pubkey,
    update_authority: &Pubkey,
    delegate: &Pubkey,
) -> (Pubkey, u8) {
    MetadataDelegateRecord::find_pda(
        mint,
        MetadataDelegateRole::AuthorityItem,
        update_authority,
        delegate,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program() -> Pubkey {
        "metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s".parse().unwrap()
    }

    #[test]
    fn test_escrow_derivation_deterministic() {
        let (escrow1, bump1) = find_escrow(&program());
        let (escrow2, bump2) = find_escrow(&program());
        assert_eq!(escrow1, escrow2);
        assert_eq!(bump1, bump2);
    }

    #[test]
    fn test_escrow_differs_per_program() {
        let other: Pubkey = "So11111111111111111111111111111111111111112"
            .parse()
            .unwrap();
        let (escrow_a, _) = find_escrow(&program());
        let (escrow_b, _) = find_escrow(&other);
        assert_ne!(escrow_a, escrow_b);
    }

    #[test]
    fn test_metadata_pdas_differ_per_mint() {
        let mint_a: Pubkey = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"
            .parse()
            .unwrap();
        let mint_b: Pubkey = "So11111111111111111111111111111111111111112"
            .parse()
            .unwrap();
        let (metadata_a, _) = find_metadata(&mint_a);
        let (metadata_b, _) = find_metadata(&mint_b);
        assert_ne!(metadata_a, metadata_b);
    }

    #[test]
    fn test_delegate_record_unique_per_party() {
        let mint = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let delegate_a = Pubkey::new_unique();
        let delegate_b = Pubkey::new_unique();

        let (record_a1, bump_a1) = find_authority_item_record(&mint, &authority, &delegate_a);
        let (record_a2, bump_a2) = find_authority_item_record(&mint, &authority, &delegate_a);
        assert_eq!(record_a1, record_a2);
        assert_eq!(bump_a1, bump_a2);

        let (record_b, _) = find_authority_item_record(&mint, &authority, &delegate_b);
        assert_ne!(record_a1, record_b);
    }

    #[test]
    fn test_derived_addresses_distinct_per_kind() {
        let mint = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let (escrow, _) = find_escrow(&program());
        let (metadata, _) = find_metadata(&mint);
        let (edition, _) = find_master_edition(&mint);
        let (record, _) = find_authority_item_record(&mint, &authority, &escrow);
        assert_ne!(metadata, edition);
        assert_ne!(metadata, record);
        assert_ne!(escrow, record);
    }
}
