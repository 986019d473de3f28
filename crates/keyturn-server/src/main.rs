use actix_web::{middleware::Logger, web, App, HttpServer};
use keyturn_server::{api, api::prelude::Success, dedupe::InMemorySignatureStore, AppContext, Config};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, signer::Signer};
use std::sync::Arc;

#[actix_web::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::get_config();

    // Nothing works without the wallet and the escrow program; refuse to
    // start rather than limp along.
    let wallet = match config.solana.keypair() {
        Ok(keypair) => Arc::new(keypair),
        Err(e) => {
            tracing::error!("invalid wallet configuration: {}", e);
            return;
        }
    };

    let escrow_program = match config.solana.escrow_program() {
        Ok(program) => program,
        Err(e) => {
            tracing::error!("invalid escrow program configuration: {}", e);
            return;
        }
    };

    if let Err(e) = config.solana.validate() {
        tracing::error!("invalid configuration: {}", e);
        return;
    }

    let (escrow_authority, escrow_bump) = keyturn_ops::pda::find_escrow(&escrow_program);

    tracing::info!(wallet = %wallet.pubkey(), "update authority wallet loaded");
    tracing::info!(%escrow_authority, escrow_bump, "derived escrow authority");
    tracing::info!(rpc_url = %config.solana.rpc_url, "using solana RPC endpoint");

    let client = Arc::new(RpcClient::new_with_commitment(
        config.solana.rpc_url.clone(),
        CommitmentConfig::confirmed(),
    ));

    let ctx = web::Data::new(AppContext {
        client,
        wallet,
        escrow_program,
        escrow_authority,
        escrow_bump,
        signatures: Arc::new(InMemorySignatureStore::default()),
    });

    let host = config.host.clone();
    let port = config.port;

    tracing::info!("listening on {:?} port {:?}", host, port);

    let config = web::Data::new(config);

    HttpServer::new(move || {
        let api = web::scope("/api")
            .wrap(config.cors())
            .service(api::mint_hook::service())
            .service(api::deposit_hook::service())
            .service(api::update_metadata::service())
            .service(api::status::service())
            .service(api::info::service());

        let healthcheck = web::resource("/healthcheck")
            .route(web::get().to(|| async { web::Json(Success) }));

        App::new()
            .wrap(Logger::new(r#""%r" %s %b %Dms"#).exclude("/healthcheck"))
            .app_data(config.clone())
            .app_data(ctx.clone())
            .service(api)
            .service(healthcheck)
    })
    .bind((host, port))
    .unwrap()
    .run()
    .await
    .unwrap();
}
