use super::prelude::*;
use keyturn_ops::status;
use solana_sdk::signer::Signer;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    pub wallet: String,
    pub escrow_program: String,
    pub escrow_authority: String,
    pub escrow_bump: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candy_machine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_mint: Option<String>,
    pub balance_lamports: u64,
}

pub fn service() -> impl HttpServiceFactory {
    web::resource("/info").route(web::get().to(info))
}

/// Service identity: the configured addresses and the wallet's balance.
async fn info(
    ctx: web::Data<AppContext>,
    config: web::Data<Config>,
) -> Result<web::Json<Output>, Error> {
    let balance_lamports = status::wallet_balance(&ctx.client, &ctx.wallet.pubkey()).await?;

    Ok(web::Json(Output {
        wallet: ctx.wallet.pubkey().to_string(),
        escrow_program: ctx.escrow_program.to_string(),
        escrow_authority: ctx.escrow_authority.to_string(),
        escrow_bump: ctx.escrow_bump,
        candy_machine: config.solana.candy_machine.clone(),
        collection_mint: config.solana.collection_mint.clone(),
        balance_lamports,
    }))
}
