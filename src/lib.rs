// Biblioteca raíz del crate `consultorios`.
// Lee la planilla de consultórios, extrae la agenda y el cadastro de médicos y
// expone los indicadores del dashboard por HTTP.
pub mod config;
pub mod error;
pub mod excel;
pub mod models;
pub mod dashboard;
pub mod api_json;
pub mod server;
mod server_handlers;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
pub use dashboard::{build_dashboard, load_tables, load_tables_from_path, Filtros, Tablas};
pub use error::{DashboardError, Result};
