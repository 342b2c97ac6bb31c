use std::collections::{BTreeSet, HashMap};

use crate::dashboard::Filtros;
use crate::error::{DashboardError, Result};
use crate::excel::agenda::parse_dia;
use crate::excel::normalize_name;
use crate::models::{DiaSemana, Turno};

/// Filtros en el cuerpo JSON (POST /dashboard).
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "salas": ["CONSULTÓRIO 1", "CONSULTÓRIO 2"],
///   "dias": ["Segunda", "Terça"],
///   "turnos": ["Manhã"],
///   "medicos": ["Dr. Fulano"]
/// }
/// ```
///
/// Todos los campos son opcionales; un campo ausente no filtra.
pub fn parse_json_filtros(json_str: &str) -> std::result::Result<Filtros, serde_json::Error> {
    serde_json::from_str::<Filtros>(json_str)
}

/// Convierte 'a,b,c' -> ["a", "b", "c"]. `None` si el parámetro no viene;
/// un parámetro presente pero vacío es una selección vacía.
pub fn split_list(s_opt: Option<&String>) -> Option<Vec<String>> {
    s_opt.map(|s| s.split(',').map(|p| p.trim().to_string()).filter(|p| !p.is_empty()).collect())
}

/// Acepta "Manhã", "manha", "MANHA", "tarde"...
pub fn parse_turno(raw: &str) -> Option<Turno> {
    match normalize_name(raw).as_str() {
        "manha" => Some(Turno::Manha),
        "tarde" => Some(Turno::Tarde),
        _ => None,
    }
}

/// Filtros a partir de los parámetros de query (`salas`, `dias`, `turnos`,
/// `medicos`), listas separadas por comas.
pub fn parse_query_filtros(qm: &HashMap<String, String>) -> Result<Filtros> {
    parse_query_filtros_with_resolver(qm, parse_dia, parse_turno)
}

/// Versión parametrizable para pruebas: recibe los resolutores de día y turno.
pub fn parse_query_filtros_with_resolver<D, T>(qm: &HashMap<String, String>, dia_of: D, turno_of: T) -> Result<Filtros>
where
    D: Fn(&str) -> Option<DiaSemana>,
    T: Fn(&str) -> Option<Turno>,
{
    let salas = split_list(qm.get("salas")).map(|v| v.into_iter().collect::<BTreeSet<_>>());
    let medicos = split_list(qm.get("medicos")).map(|v| v.into_iter().collect::<BTreeSet<_>>());

    let dias = match split_list(qm.get("dias")) {
        Some(v) => Some(
            v.iter()
                .map(|d| dia_of(d).ok_or_else(|| DashboardError::InvalidFilter(format!("dia '{}'", d))))
                .collect::<Result<BTreeSet<_>>>()?,
        ),
        None => None,
    };
    let turnos = match split_list(qm.get("turnos")) {
        Some(v) => Some(
            v.iter()
                .map(|t| turno_of(t).ok_or_else(|| DashboardError::InvalidFilter(format!("turno '{}'", t))))
                .collect::<Result<BTreeSet<_>>>()?,
        ),
        None => None,
    };

    Ok(Filtros { salas, dias, turnos, medicos })
}
