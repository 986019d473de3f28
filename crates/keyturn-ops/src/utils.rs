use solana_client::nonblocking::rpc_client::RpcClient;
use solana_program::{hash::Hash, instruction::Instruction, message::Message, pubkey::Pubkey};
use solana_sdk::{
    signature::{Keypair, Signature},
    transaction::Transaction,
};

/// Build an unsigned transaction over `instructions`, checking that the fee
/// payer can actually cover the fee before anything is signed.
pub async fn execute(
    client: &RpcClient,
    fee_payer: &Pubkey,
    instructions: &[Instruction],
) -> crate::Result<(Transaction, Hash)> {
    let recent_blockhash = client.get_latest_blockhash().await?;

    let message = Message::new_with_blockhash(instructions, Some(fee_payer), &recent_blockhash);

    let balance = client.get_balance(fee_payer).await?;

    let needed = client.get_fee_for_message(&message).await?;

    if balance < needed {
        return Err(crate::Error::InsufficientSolanaBalance { balance, needed });
    }

    let transaction = Transaction::new_unsigned(message);

    Ok((transaction, recent_blockhash))
}

/// Submit and confirm, translating program rejections into the typed
/// taxonomy.
pub async fn submit_transaction(client: &RpcClient, tx: Transaction) -> crate::Result<Signature> {
    client
        .send_and_confirm_transaction(&tx)
        .await
        .map_err(crate::error::classify_client_error)
}

/// Decode a base58-encoded 64-byte secret key into a keypair.
pub fn keypair_from_base58(encoded: &str) -> crate::Result<Keypair> {
    let bytes = bs58::decode(encoded.trim())
        .into_vec()
        .map_err(|e| crate::Error::InvalidSecretKey(e.to_string()))?;
    Keypair::from_bytes(&bytes).map_err(|e| crate::Error::InvalidSecretKey(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signer::Signer;

    #[test]
    fn test_keypair_base58_round_trip() {
        let keypair = Keypair::new();
        let encoded = bs58::encode(keypair.to_bytes()).into_string();
        let decoded = keypair_from_base58(&encoded).unwrap();
        assert_eq!(decoded.pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_keypair_rejects_garbage() {
        assert!(matches!(
            keypair_from_base58("not base58 at all!"),
            Err(crate::Error::InvalidSecretKey(_))
        ));
        // valid base58 but wrong length
        assert!(matches!(
            keypair_from_base58("abc"),
            Err(crate::Error::InvalidSecretKey(_))
        ));
    }
}
