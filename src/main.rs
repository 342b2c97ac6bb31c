// --- Dashboard de Ocupação dos Consultórios - Archivo principal ---

use std::sync::Arc;

use consultorios::config::Config;
use consultorios::{load_tables_from_path, run_server};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = match Config::from_env(std::env::args().nth(1)) {
        Ok(c) => c,
        Err(e) => {
            log::error!("❌ {}", e);
            std::process::exit(2);
        }
    };

    log::info!("=== Dashboard de Ocupação dos Consultórios ===");
    log::info!("📄 planilha: {}", cfg.xlsx_path.display());

    let tablas = match load_tables_from_path(&cfg.xlsx_path) {
        Ok(t) => t,
        Err(e) => {
            log::error!("❌ {}", e);
            std::process::exit(1);
        }
    };
    log::info!(
        "✅ {} linhas de agenda, {} médicos cadastrados",
        tablas.agenda.len(),
        tablas.medicos.len()
    );

    run_server(&cfg.bind, Arc::new(tablas), cfg.top_medicos).await
}
