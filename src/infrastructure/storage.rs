use crate::config::AppConfig;
use crate::services::storage::LocalStorageService;
use std::sync::Arc;
use tracing::info;

pub async fn setup_storage(config: &AppConfig) -> anyhow::Result<Arc<LocalStorageService>> {
    let dir = &config.upload_dir;

    info!("🗂️  Upload directory: {}", dir.display());

    if tokio::fs::try_exists(dir).await? {
        info!("✅ Upload directory is ready");
    } else {
        info!("📁 Upload directory not found, creating...");
        tokio::fs::create_dir_all(dir).await?;
        info!("✅ Upload directory created");
    }

    Ok(Arc::new(LocalStorageService::new(dir.clone())))
}
