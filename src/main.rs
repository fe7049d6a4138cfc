use ems_server::core::{Config, Server, ServerState};
use ems_server::utils::init_logger_with_file;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(None, config.log_dir.as_deref());
    tracing::info!(
        environment = %config.environment,
        data_dir = %config.data_dir.display(),
        "Starting employee management server"
    );

    let state = ServerState::initialize(config).await?;
    Server::with_state(state).run().await
}
