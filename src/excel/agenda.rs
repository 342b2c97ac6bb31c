use std::collections::HashSet;

use crate::excel::header::{detect_schedule_table, TabelaTurnos};
use crate::excel::io::{RawSheet, Workbook};
use crate::excel::normalize_name;
use crate::models::{DiaSemana, FilaAgenda, Turno};

/// `true` para abas de consultório ("CONSULTÓRIO 1", "Consultorio 2"...),
/// excluyendo la aba resumen "OCUPAÇÃO DAS SALAS".
pub fn is_schedule_sheet(sheet_name: &str) -> bool {
    let n = normalize_name(sheet_name);
    n.contains("consult") && !n.contains("ocupa")
}

/// Restaura acentos y capitaliza: "terca" -> "Terça", "SABADO" -> "Sábado".
pub fn canonical_day_text(raw: &str) -> String {
    let lower = raw.trim().to_lowercase().replace("terca", "terça").replace("sabado", "sábado");
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Interpreta el texto de la columna Dia. `None` si no es uno de los seis días.
pub fn parse_dia(raw: &str) -> Option<DiaSemana> {
    DiaSemana::from_label(&canonical_day_text(raw))
}

fn doctor_text(raw: Option<&str>) -> &str {
    match raw.map(str::trim) {
        Some("nan") | Some("None") | None => "",
        Some(s) => s,
    }
}

/// Pasa la tabla ancha (una fila por día) a formato largo (una fila por
/// sala × día × turno). Sólo se emiten los turnos cuyas columnas existen.
pub fn reshape_long(sala: &str, tabla: &TabelaTurnos) -> Vec<FilaAgenda> {
    let mut out = Vec::with_capacity(tabla.rows.len() * 2);
    let mut vistos: HashSet<DiaSemana> = HashSet::new();

    for fila in tabla.rows.iter() {
        let dia = match parse_dia(&fila.dia) {
            Some(d) => d,
            None => {
                log::debug!("aba '{}': dia desconhecido '{}' descartado", sala, fila.dia);
                continue;
            }
        };
        if !vistos.insert(dia) {
            log::warn!("⚠️ aba '{}': dia '{}' repetido, mantida a primeira linha", sala, dia);
            continue;
        }

        if tabla.has_manha {
            out.push(FilaAgenda::new(sala, dia, Turno::Manha, doctor_text(fila.manha.as_deref())));
        }
        if tabla.has_tarde {
            out.push(FilaAgenda::new(sala, dia, Turno::Tarde, doctor_text(fila.tarde.as_deref())));
        }
    }

    out
}

/// Extrae la agenda de una sola aba (ya sabiendo que es de consultório).
pub fn extract_sheet(sheet: &RawSheet) -> Vec<FilaAgenda> {
    match detect_schedule_table(sheet) {
        Some(tabla) if !tabla.is_empty() => reshape_long(&sheet.name, &tabla),
        _ => Vec::new(),
    }
}

/// Recorre todas las abas de consultório del libro y concatena sus filas.
/// Devuelve un vector vacío si ninguna aba produjo datos.
pub fn extract_agenda(workbook: &Workbook) -> Vec<FilaAgenda> {
    let mut filas: Vec<FilaAgenda> = Vec::new();

    for sheet in workbook.sheets() {
        if !is_schedule_sheet(&sheet.name) {
            continue;
        }
        let extraidas = extract_sheet(sheet);
        if extraidas.is_empty() {
            log::info!("aba '{}' sem dados de agenda, ignorada", sheet.name);
            continue;
        }
        log::debug!("aba '{}': {} turnos", sheet.name, extraidas.len());
        filas.extend(extraidas);
    }

    log::info!("📋 Agenda: {} turnos em {} salas", filas.len(), count_salas(&filas));
    filas
}

fn count_salas(filas: &[FilaAgenda]) -> usize {
    filas.iter().map(|f| f.sala.as_str()).collect::<HashSet<_>>().len()
}
