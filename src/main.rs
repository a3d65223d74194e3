use hiscore_proxy::config::{Config, ServeMode};
use hiscore_proxy::hiscore::HiscoreClient;
use hiscore_proxy::server::{HiscoreRouter, Listener, StaticPageRouter};
use hiscore_proxy::tls;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tls::install_crypto_provider();

    let cfg = Config::load()?;
    let listener = Listener::bind(&cfg).await?;

    tracing::info!(mode = ?cfg.mode, "Starting HTTPS server");

    tokio::select! {
        res = serve(&cfg, listener) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

async fn serve(cfg: &Config, listener: Listener) -> anyhow::Result<()> {
    match cfg.mode {
        ServeMode::Hiscore => {
            let client = HiscoreClient::new(&cfg.hiscore)?;
            listener.run(HiscoreRouter::new(client)).await
        }
        ServeMode::StaticPage => listener.run(StaticPageRouter).await,
    }
}
