use super::prelude::*;
use keyturn_ops::update::{self, UpdateAuthority};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    #[serde(default)]
    pub mint_address: Option<String>,
}

#[derive(Serialize)]
pub struct Output {
    pub success: bool,
    pub signature: String,
    pub message: String,
}

pub fn service() -> impl HttpServiceFactory {
    web::resource("/update-metadata").route(web::post().to(update_metadata))
}

/// Lock a mint's metadata on request. Unlike the hooks this endpoint
/// reports downstream failures: permission problems come back as 400 with a
/// delegation hint, the rest as 500.
async fn update_metadata(
    ctx: web::Data<AppContext>,
    params: web::Json<Params>,
) -> Result<web::Json<Output>, Error> {
    let mint_address = params
        .into_inner()
        .mint_address
        .ok_or_else(|| Error::Validation("mint address is required".to_owned()))?;

    let mint = Pubkey::from_str(&mint_address)
        .map_err(|_| Error::Validation(format!("invalid mint address: {mint_address}")))?;

    tracing::info!(%mint, "updating NFT to immutable");

    let signature = update::set_immutable(
        &ctx.client,
        &ctx.wallet,
        &mint,
        UpdateAuthority::UpdateAuthority,
    )
    .await?;

    Ok(web::Json(Output {
        success: true,
        signature: signature.to_string(),
        message: "NFT updated to immutable".to_owned(),
    }))
}
