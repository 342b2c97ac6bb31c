//! Módulo `excel`: lectura de la planilla de consultórios y extracción de las
//! dos tablas normalizadas.
//!
//! Submódulos:
//! - `io`: carga del workbook con calamine y helpers de celdas
//! - `normalize`: normalización de nombres (acentos, mayúsculas, espacios)
//! - `numbers`: interpretación de números en formato local
//! - `header`: detección del encabezado y columnas Dia/Manhã/Tarde
//! - `agenda`: abas CONSULTÓRIO -> filas (sala, dia, turno, médico)
//! - `medicos`: abas MÉDICOS -> cadastro de médicos

/// Carga del workbook y conversión de celdas
pub mod io;

/// `normalize_name`
mod normalize;

/// `parse_number`
pub mod numbers;

/// Detección de encabezado (cadena de estrategias)
pub mod header;

/// Extracción de la agenda
pub mod agenda;

/// Extracción del cadastro de médicos
pub mod medicos;

pub use normalize::normalize_name;
pub use numbers::{parse_number, parse_number_cell};
pub use io::{load_workbook, load_workbook_from_bytes, RawSheet, Workbook};
pub use header::{detect_schedule_table, TabelaTurnos};
pub use agenda::{extract_agenda, is_schedule_sheet};
pub use medicos::{extract_medicos, is_registry_sheet};

/// Tipo de aba según su nombre normalizado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipoAba {
    Consultorio,
    Medicos,
    Ignorada,
}

/// Clasifica una aba por su nombre.
pub fn classify_sheet(sheet_name: &str) -> TipoAba {
    if is_schedule_sheet(sheet_name) {
        TipoAba::Consultorio
    } else if is_registry_sheet(sheet_name) {
        TipoAba::Medicos
    } else {
        TipoAba::Ignorada
    }
}

/// Lista las abas del workbook con su clasificación (útil para diagnóstico).
pub fn listar_abas(workbook: &Workbook) -> Vec<(String, TipoAba)> {
    workbook
        .sheet_names()
        .into_iter()
        .map(|n| (n.to_string(), classify_sheet(n)))
        .collect()
}
