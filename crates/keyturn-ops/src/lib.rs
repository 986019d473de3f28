//! Operation layer for the KeyTurn escrow workflow: deterministic address
//! derivation, authority delegation, metadata mutation and read-only status
//! queries over the token-metadata program.

pub mod config;
pub mod delegate;
pub mod error;
pub mod pda;
pub mod status;
pub mod update;
pub mod utils;

pub use error::{classify_client_error, Error, Result};

pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use solana_client::nonblocking::rpc_client::RpcClient;
    pub use solana_sdk::{
        pubkey::Pubkey,
        signature::{Keypair, Signature},
        signer::Signer,
    };
    pub use std::sync::Arc;
}
