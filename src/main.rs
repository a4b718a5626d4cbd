use std::process::ExitCode;
use std::sync::Arc;

use articles::{ArticleStore, Config, Server, api};
use tracing::{Level, error};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = Config::default();
    let store = Arc::new(ArticleStore::new(config.seed));

    let server = match Server::bind(config.addr).await {
        Ok(server) => server,
        Err(e) => {
            error!(addr = %config.addr, "failed to bind: {e}");
            return ExitCode::FAILURE;
        }
    };

    match server.serve(api::routes(store)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("server error: {e}");
            ExitCode::FAILURE
        }
    }
}
