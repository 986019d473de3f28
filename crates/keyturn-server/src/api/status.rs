use super::prelude::*;
use keyturn_ops::status::{self, MintStatus};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

pub fn service() -> impl HttpServiceFactory {
    web::resource("/status/{mint}").route(web::get().to(mint_status))
}

/// Read-only diagnosis: metadata state plus whether the escrow authority
/// holds a delegation over the mint.
async fn mint_status(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<web::Json<MintStatus>, Error> {
    let mint_address = path.into_inner();
    let mint = Pubkey::from_str(&mint_address)
        .map_err(|_| Error::Validation(format!("invalid mint address: {mint_address}")))?;

    let status = status::mint_status(&ctx.client, &mint, &ctx.escrow_authority).await?;

    Ok(web::Json(status))
}
