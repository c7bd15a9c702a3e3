use tokio::signal;
use tokio::task::JoinHandle;
use tracing::warn;

/// 等待 Ctrl+C，随后停止后台任务
pub async fn listen_for_shutdown(background: Vec<JoinHandle<()>>) {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received, initiating graceful shutdown...");

    for task in background {
        task.abort();
    }
}
