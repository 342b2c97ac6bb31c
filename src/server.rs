use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;

use crate::dashboard::Tablas;
use crate::server_handlers::{
    agenda_csv_handler, agenda_handler, chart_handler, dashboard_get_handler, dashboard_post_handler,
    help_handler, medicos_handler, opcoes_handler,
};

/// Estado compartido (sólo lectura) entre los workers de actix.
pub struct AppState {
    pub tablas: Arc<Tablas>,
    pub top_medicos: usize,
}

/// Registra las rutas del dashboard. Separado de `run_server` para poder
/// montar la app en los tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard", web::get().to(dashboard_get_handler))
        .route("/dashboard", web::post().to(dashboard_post_handler))
        .route("/agenda", web::get().to(agenda_handler))
        .route("/agenda.csv", web::get().to(agenda_csv_handler))
        .route("/medicos", web::get().to(medicos_handler))
        .route("/charts/{arquivo}", web::get().to(chart_handler))
        .route("/opcoes", web::get().to(opcoes_handler))
        .route("/help", web::get().to(help_handler))
        .route("/", web::get().to(help_handler));
}

pub async fn run_server(bind_addr: &str, tablas: Arc<Tablas>, top_medicos: usize) -> std::io::Result<()> {
    let state = web::Data::new(AppState { tablas, top_medicos });
    log::info!("🚀 servidor em http://{}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
