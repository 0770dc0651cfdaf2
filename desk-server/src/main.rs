use desk_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 日志)
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;
    let log_dir = config.log_dir();
    init_logger_with_file(Some(&config.log_level), log_dir.to_str());

    tracing::info!("Hotel front desk server starting...");

    // 2. 初始化服务器状态
    let state = ServerState::initialize(&config).await.map_err(|e| {
        tracing::error!("Initialization failed: {e}");
        anyhow::anyhow!("{e}")
    })?;

    // 3. 启动 HTTP 服务器
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {e}");
        return Err(anyhow::anyhow!("{e}"));
    }

    Ok(())
}
