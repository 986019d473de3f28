use std::error::Error as StdError;
use std::result::Result as StdResult;

use mpl_token_metadata::errors::MplTokenMetadataError;
use num_traits::FromPrimitive;
use solana_client::client_error::ClientError;
use solana_sdk::instruction::InstructionError;
use solana_sdk::transaction::TransactionError;
use thiserror::Error as ThisError;

pub type BoxedError = Box<dyn StdError + Send + Sync>;

pub type Result<T> = StdResult<T, Error>;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Any(#[from] anyhow::Error),
    #[error("solana client error: {0}")]
    SolanaClient(#[from] ClientError),
    #[error(transparent)]
    SolanaProgram(#[from] solana_sdk::program_error::ProgramError),
    #[error(transparent)]
    Signer(#[from] solana_sdk::signer::SignerError),
    #[error("failed to decode account data: {0}")]
    AccountDecode(#[from] std::io::Error),
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("invalid wallet secret key: {0}")]
    InvalidSecretKey(String),
    #[error("account not found: {0}")]
    AccountNotFound(solana_sdk::pubkey::Pubkey),
    #[error("delegate record already exists")]
    AlreadyDelegated,
    #[error("delegate record not found")]
    DelegateNotFound,
    #[error("authority is not permitted to update this metadata: {0}")]
    PermissionDenied(String),
    #[error("metadata is immutable")]
    Immutable,
    #[error("metadata program rejected the instruction: {0}")]
    Program(String),
    #[error("insufficient solana balance, needed={needed}; have={balance};")]
    InsufficientSolanaBalance { needed: u64, balance: u64 },
}

impl Error {
    pub fn custom<E: Into<anyhow::Error>>(e: E) -> Self {
        Error::Any(e.into())
    }

    /// True for transport-level failures worth retrying; ledger verdicts
    /// (permission, immutability, existing records) are final.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::SolanaClient(_))
    }
}

/// Map an RPC client error onto the typed taxonomy where the metadata
/// program reported a recognizable custom error code. Anything else stays a
/// client error.
pub fn classify_client_error(err: ClientError) -> Error {
    if let Some(TransactionError::InstructionError(_, InstructionError::Custom(code))) =
        err.get_transaction_error()
    {
        if let Some(program_err) = MplTokenMetadataError::from_u32(code) {
            return match program_err {
                MplTokenMetadataError::DelegateAlreadyExists => Error::AlreadyDelegated,
                MplTokenMetadataError::DelegateNotFound => Error::DelegateNotFound,
                MplTokenMetadataError::UpdateAuthorityIncorrect
                | MplTokenMetadataError::UpdateAuthorityIsNotSigner => {
                    Error::PermissionDenied(program_err.to_string())
                }
                MplTokenMetadataError::DataIsImmutable => Error::Immutable,
                other => Error::Program(other.to_string()),
            };
        }
    }
    Error::SolanaClient(err)
}
