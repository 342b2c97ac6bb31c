use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use std::collections::HashMap;

use crate::api_json::{parse_json_filtros, parse_query_filtros};
use crate::dashboard::{build_dashboard, charts::Eixo, chart_svg, opcoes, Filtros};
use crate::server::AppState;

fn dashboard_response(state: &AppState, filtros: &Filtros) -> HttpResponse {
    let d = build_dashboard(&state.tablas, filtros, state.top_medicos);
    HttpResponse::Ok().json(d)
}

/// GET /dashboard?salas=..&dias=..&turnos=..&medicos=..
pub async fn dashboard_get_handler(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    match parse_query_filtros(&query.into_inner()) {
        Ok(f) => dashboard_response(&state, &f),
        Err(e) => HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    }
}

/// POST /dashboard con los filtros en JSON (ver `api_json::parse_json_filtros`).
pub async fn dashboard_post_handler(state: web::Data<AppState>, body: web::Bytes) -> impl Responder {
    let json_str = match std::str::from_utf8(&body) {
        Ok(s) if !s.trim().is_empty() => s,
        Ok(_) => "{}",
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("invalid body: {}", e)})),
    };
    match parse_json_filtros(json_str) {
        Ok(f) => dashboard_response(&state, &f),
        Err(e) => HttpResponse::BadRequest().json(json!({"error": format!("failed to parse filtros: {}", e)})),
    }
}

/// GET /opcoes: valores disponibles para cada filtro.
pub async fn opcoes_handler(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(opcoes(&state.tablas.agenda))
}

/// GET /charts/{sala|dia|turno}.svg
pub async fn chart_handler(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let arquivo = path.into_inner();
    let eixo = match Eixo::from_slug(arquivo.strip_suffix(".svg").unwrap_or(&arquivo)) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(json!({"error": format!("gráfico desconhecido: {}", arquivo)})),
    };
    let filtros = match parse_query_filtros(&query.into_inner()) {
        Ok(f) => f,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    };
    match chart_svg(&state.tablas, &filtros, eixo) {
        Ok(svg) => HttpResponse::Ok().content_type("image/svg+xml").body(svg),
        Err(e) => {
            log::error!("❌ {}", e);
            HttpResponse::InternalServerError().json(json!({"error": e.to_string()}))
        }
    }
}
