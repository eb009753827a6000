use checkout_server::{core, init_logger_with_file, Config, ServerState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env is optional, env vars win)
    dotenv::dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        Some(&format!("{}/logs", config.work_dir)),
    );

    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        "Checkout server starting"
    );

    // 3. Initialize server state (database, repositories, coordinator)
    let state = ServerState::initialize(&config).await?;

    // 4. Optional stale-order sweep
    core::tasks::spawn_stale_order_sweep(state.clone());

    // 5. Serve HTTP
    let app = checkout_server::api::build_app(state);
    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
