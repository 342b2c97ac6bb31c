use actix_web::{http::header, web, HttpResponse, Responder};
use serde_json::json;
use std::collections::HashMap;

use crate::api_json::parse_query_filtros;
use crate::dashboard::{agenda_filtrada, export, medicos_enriquecidos};
use crate::server::AppState;

/// GET /agenda: filas detalladas ordenadas por sala, día y turno.
pub async fn agenda_handler(state: web::Data<AppState>, query: web::Query<HashMap<String, String>>) -> impl Responder {
    match parse_query_filtros(&query.into_inner()) {
        Ok(f) => HttpResponse::Ok().json(agenda_filtrada(&state.tablas, &f)),
        Err(e) => HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    }
}

/// GET /agenda.csv: mismas filas, como descarga CSV.
pub async fn agenda_csv_handler(state: web::Data<AppState>, query: web::Query<HashMap<String, String>>) -> impl Responder {
    let filtros = match parse_query_filtros(&query.into_inner()) {
        Ok(f) => f,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    };
    let filas = agenda_filtrada(&state.tablas, &filtros);
    match export::agenda_to_csv(&filas) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export::CSV_FILE_NAME),
            ))
            .body(bytes),
        Err(e) => {
            log::error!("❌ {}", e);
            HttpResponse::InternalServerError().json(json!({"error": e.to_string()}))
        }
    }
}

/// GET /medicos: cadastro enriquecido con los turnos utilizados.
pub async fn medicos_handler(state: web::Data<AppState>, query: web::Query<HashMap<String, String>>) -> impl Responder {
    match parse_query_filtros(&query.into_inner()) {
        Ok(f) => HttpResponse::Ok().json(medicos_enriquecidos(&state.tablas, &f)),
        Err(e) => HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    }
}
