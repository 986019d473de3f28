use super::prelude::*;
use chrono::{DateTime, Utc};
use keyturn_helius::payload;
use keyturn_ops::delegate::{self, DelegationOutcome};
use serde_json::Value as JsonValue;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// Outcome of the downstream delegation attempt, reported in the hook
/// response but never turned into a non-200 status: the hook acknowledges
/// dispatch, it does not re-queue failures.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DelegationSummary {
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
    pub available_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegation: Option<DelegationSummary>,
    pub timestamp: DateTime<Utc>,
}

impl Output {
    fn acknowledge(message: impl Into<String>) -> Self {
        Output {
            message: message.into(),
            nft_address: None,
            available_fields: None,
            delegation: None,
            timestamp: Utc::now(),
        }
    }
}

pub fn service() -> impl HttpServiceFactory {
    web::resource("/mint-hook").route(web::post().to(mint_hook))
}

/// received -> validated -> dedupe-checked -> processing -> done
///
/// Terminal alternatives: rejected (no/bad mint address) and
/// already-processed (duplicate signature).
async fn mint_hook(
    ctx: web::Data<AppContext>,
    body: web::Json<JsonValue>,
) -> Result<web::Json<Output>, Error> {
    let payload = body.into_inner();
    tracing::debug!(%payload, "received mint webhook");

    let Some(event) = payload::extract_mint_event(&payload) else {
        tracing::warn!("no mint address found in webhook payload");
        return Ok(web::Json(Output {
            available_fields: Some(payload::top_level_fields(&payload)),
            ..Output::acknowledge("no mint address found")
        }));
    };

    let mint = Pubkey::from_str(&event.mint)
        .map_err(|_| Error::Validation(format!("invalid mint address: {}", event.mint)))?;

    if let Some(signature) = &event.signature {
        if !ctx.signatures.insert_if_absent(signature) {
            tracing::info!(%mint, %signature, "transaction already processed, skipping");
            return Ok(web::Json(Output {
                nft_address: Some(event.mint),
                ..Output::acknowledge("already processed")
            }));
        }
    }

    tracing::info!(%mint, candy_machine = ?event.candy_machine, "processing new mint");

    let delegation = match delegate::delegate_authority_item(
        &ctx.client,
        &ctx.wallet,
        &mint,
        &ctx.escrow_authority,
    )
    .await
    {
        Ok(DelegationOutcome::Delegated(signature)) => DelegationSummary {
            success: true,
            signature: Some(signature.to_string()),
            detail: "NFT authority delegated to escrow".to_owned(),
        },
        Ok(DelegationOutcome::AlreadyDelegated) => DelegationSummary {
            success: true,
            signature: None,
            detail: "NFT already delegated".to_owned(),
        },
        Err(e) => {
            tracing::error!(%mint, error = %e, "delegation failed");
            DelegationSummary {
                success: false,
                signature: None,
                detail: e.to_string(),
            }
        }
    };

    Ok(web::Json(Output {
        nft_address: Some(event.mint),
        delegation: Some(delegation),
        ..Output::acknowledge("webhook processed")
    }))
}
