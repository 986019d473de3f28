use super::prelude::*;
use chrono::{DateTime, Utc};
use keyturn_helius::payload;
use keyturn_ops::update::{self, UpdateAuthority};
use serde_json::Value as JsonValue;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MutationSummary {
    pub success: bool,
    pub signature: Option<String>,
    pub detail: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nft_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MutationSummary>,
    pub timestamp: DateTime<Utc>,
}

impl Output {
    fn acknowledge(message: impl Into<String>) -> Self {
        Output {
            message: message.into(),
            nft_address: None,
            owner_address: None,
            metadata: None,
            timestamp: Utc::now(),
        }
    }
}

pub fn service() -> impl HttpServiceFactory {
    web::resource("/deposit-hook").route(web::post().to(deposit_hook))
}

/// Same ingestion state machine as the mint hook, but the downstream action
/// locks the deposited NFT's metadata.
async fn deposit_hook(
    ctx: web::Data<AppContext>,
    body: web::Json<JsonValue>,
) -> Result<web::Json<Output>, Error> {
    let payload = body.into_inner();
    tracing::debug!(%payload, "received deposit webhook");

    let Some(event) = payload::extract_deposit_event(&payload) else {
        return Err(Error::Validation(
            "invalid deposit data: nftMint and owner are required".to_owned(),
        ));
    };

    let mint = Pubkey::from_str(&event.nft_mint)
        .map_err(|_| Error::Validation(format!("invalid mint address: {}", event.nft_mint)))?;

    if let Some(signature) = &event.signature {
        if !ctx.signatures.insert_if_absent(signature) {
            tracing::info!(%mint, %signature, "deposit already processed, skipping");
            return Ok(web::Json(Output {
                nft_address: Some(event.nft_mint),
                ..Output::acknowledge("already processed")
            }));
        }
    }

    tracing::info!(%mint, owner = %event.owner, "processing deposit, locking metadata");

    let metadata = match update::set_immutable(
        &ctx.client,
        &ctx.wallet,
        &mint,
        UpdateAuthority::UpdateAuthority,
    )
    .await
    {
        Ok(signature) => MutationSummary {
            success: true,
            signature: Some(signature.to_string()),
            detail: "metadata is now immutable; NFT ready for return".to_owned(),
        },
        Err(e) => {
            tracing::error!(%mint, error = %e, "metadata update failed");
            MutationSummary {
                success: false,
                signature: None,
                detail: e.to_string(),
            }
        }
    };

    Ok(web::Json(Output {
        nft_address: Some(event.nft_mint),
        owner_address: Some(event.owner),
        metadata: Some(metadata),
        ..Output::acknowledge("deposit webhook processed")
    }))
}
