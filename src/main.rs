use krill_server::{Config, Server, ServerState, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    match std::env::var("LOG_DIR") {
        Ok(dir) => krill_server::init_logger_with_file(Some(&dir)),
        Err(_) => krill_server::init_logger(),
    }

    print_banner();

    tracing::info!("Krill server starting...");

    let config = Config::from_env();
    let state = ServerState::initialize(&config).await?;

    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
