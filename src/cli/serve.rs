use crate::{config::AppConfig, error, info, server};

pub async fn serve(cfg: AppConfig) {
    info!(
        "Starting relay on {} with {} YouTube key(s)",
        cfg.server_addr,
        cfg.youtube.credentials.len()
    );

    if let Err(e) = server::serve(cfg).await {
        error!("Server stopped. Err: {}", e);
    }
}
