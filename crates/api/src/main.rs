//! Screening Pipeline - Main Entry Point

use api::{init_logging, run_server, RiskModel, Settings};
use std::path::Path;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!("=== NeuroCascade Screening Pipeline v{} ===", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load()?;
    let model = RiskModel::select(Path::new(&settings.artifacts_dir));
    info!("model: {}", model.model_type());

    run_server(&settings.bind_addr, model).await?;

    Ok(())
}
