//! Detección de la fila de encabezado y de las columnas Dia / Manhã / Tarde en
//! una aba CONSULTÓRIO.
//!
//! Las planillas reales suelen tener títulos o celdas combinadas antes del
//! encabezado verdadero, así que se prueba una cadena ordenada de estrategias
//! (una por fila candidata) y gana la primera que reconoce la tabla.

use calamine::Data;

use crate::excel::io::{cell_to_string, is_blank, RawSheet};
use crate::excel::normalize_name;

/// Filas candidatas a encabezado, en orden de prueba.
pub const HEADER_OFFSETS: [usize; 5] = [0, 1, 2, 3, 4];

/// Tokens (normalizados) que identifican un día de la semana.
pub const DIA_TOKENS: [&str; 6] = ["segunda", "terca", "quarta", "quinta", "sexta", "sabado"];

/// Palabras clave de cada columna semántica. Cada categoría se evalúa por
/// separado: "Manhã (segunda a sexta)" sigue siendo la columna de la mañana.
#[derive(Debug, Clone)]
pub struct ScheduleColumns {
    pub dia: Vec<&'static str>,
    pub manha: Vec<&'static str>,
    pub tarde: Vec<&'static str>,
}

impl Default for ScheduleColumns {
    fn default() -> Self {
        let mut dia = vec!["dia"];
        dia.extend_from_slice(&DIA_TOKENS);
        ScheduleColumns { dia, manha: vec!["manha"], tarde: vec!["tarde"] }
    }
}

impl ScheduleColumns {
    fn is_dia(&self, header_norm: &str) -> bool {
        self.dia.iter().any(|k| header_norm.contains(k))
    }

    fn is_manha(&self, header_norm: &str) -> bool {
        self.manha.iter().any(|k| header_norm.contains(k))
    }

    fn is_tarde(&self, header_norm: &str) -> bool {
        self.tarde.iter().any(|k| header_norm.contains(k))
    }
}

/// `true` si el texto contiene el nombre de algún día (con o sin acento).
pub fn contains_weekday(text: &str) -> bool {
    let norm = normalize_name(text);
    DIA_TOKENS.iter().any(|d| norm.contains(d))
}

/// Una fila de la tabla ancha: el texto del día y el contenido de cada turno.
#[derive(Debug, Clone, PartialEq)]
pub struct FilaTurnos {
    pub dia: String,
    pub manha: Option<String>,
    pub tarde: Option<String>,
}

/// Resultado de la detección: tabla ancha con columnas canónicas.
#[derive(Debug, Clone, PartialEq)]
pub struct TabelaTurnos {
    /// Fila del encabezado dentro de la hoja
    pub header_offset: usize,
    pub has_manha: bool,
    pub has_tarde: bool,
    pub rows: Vec<FilaTurnos>,
}

impl TabelaTurnos {
    /// Columnas canónicas presentes, en orden.
    pub fn columns(&self) -> Vec<&'static str> {
        let mut cols = vec!["Dia"];
        if self.has_manha {
            cols.push("Manhã");
        }
        if self.has_tarde {
            cols.push("Tarde");
        }
        cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Una forma de intentar leer la tabla de turnos de una hoja.
pub trait HeaderStrategy {
    fn describe(&self) -> String;
    fn try_parse(&self, sheet: &RawSheet, cols: &ScheduleColumns) -> Option<TabelaTurnos>;
}

/// Usa la fila `n` (0-based) como encabezado.
#[derive(Debug, Clone, Copy)]
pub struct HeaderAtRow(pub usize);

impl HeaderStrategy for HeaderAtRow {
    fn describe(&self) -> String {
        format!("cabeçalho na linha {}", self.0)
    }

    fn try_parse(&self, sheet: &RawSheet, cols: &ScheduleColumns) -> Option<TabelaTurnos> {
        let frame = Frame::at(sheet, self.0)?;
        let headers_norm: Vec<String> = frame.headers.iter().map(|h| normalize_name(h)).collect();

        let mut col_dia: Option<usize> = None;
        let mut col_manha: Option<usize> = None;
        let mut col_tarde: Option<usize> = None;

        // primera coincidencia por categoría
        for (i, h) in headers_norm.iter().enumerate() {
            if col_dia.is_none() && cols.is_dia(h) {
                col_dia = Some(i);
            }
            if col_manha.is_none() && cols.is_manha(h) {
                col_manha = Some(i);
            }
            if col_tarde.is_none() && cols.is_tarde(h) {
                col_tarde = Some(i);
            }
        }

        // fallback: la primera columna contiene nombres de días
        if col_dia.is_none() {
            let first_has_days = frame.rows.iter().any(|r| contains_weekday(&cell_to_string(&r[0])));
            if first_has_days {
                col_dia = Some(0);
            }
        }

        let col_dia = col_dia?;
        if col_manha.is_none() && col_tarde.is_none() {
            return None;
        }

        let shift_text = |row: &[Data], col: Option<usize>| col.map(|c| cell_to_string(&row[c]));
        let rows: Vec<FilaTurnos> = frame
            .rows
            .iter()
            .filter_map(|r| {
                let dia = cell_to_string(&r[col_dia]).trim().to_string();
                if dia.is_empty() {
                    return None;
                }
                Some(FilaTurnos { dia, manha: shift_text(r, col_manha), tarde: shift_text(r, col_tarde) })
            })
            .collect();

        Some(TabelaTurnos {
            header_offset: self.0,
            has_manha: col_manha.is_some(),
            has_tarde: col_tarde.is_some(),
            rows,
        })
    }
}

/// Cadena por defecto: encabezado en las filas 0..=4.
pub fn default_chain() -> Vec<Box<dyn HeaderStrategy>> {
    HEADER_OFFSETS
        .iter()
        .map(|&n| Box::new(HeaderAtRow(n)) as Box<dyn HeaderStrategy>)
        .collect()
}

/// Prueba las estrategias en orden y devuelve la primera tabla reconocida.
pub fn detect_with(
    sheet: &RawSheet,
    cols: &ScheduleColumns,
    chain: &[Box<dyn HeaderStrategy>],
) -> Option<TabelaTurnos> {
    for strategy in chain {
        if let Some(tabla) = strategy.try_parse(sheet, cols) {
            log::debug!("aba '{}': agenda encontrada ({})", sheet.name, strategy.describe());
            return Some(tabla);
        }
    }
    log::info!("aba '{}': nenhuma agenda encontrada", sheet.name);
    None
}

/// Detecta la tabla de turnos de una aba con la configuración por defecto.
pub fn detect_schedule_table(sheet: &RawSheet) -> Option<TabelaTurnos> {
    detect_with(sheet, &ScheduleColumns::default(), &default_chain())
}

/// Vista de la hoja con una fila como encabezado, sin filas ni columnas
/// completamente vacías.
#[derive(Debug)]
struct Frame {
    headers: Vec<String>,
    rows: Vec<Vec<Data>>,
}

impl Frame {
    fn at(sheet: &RawSheet, offset: usize) -> Option<Frame> {
        if offset >= sheet.rows.len() {
            return None;
        }
        let width = sheet.width();

        let headers: Vec<String> = (0..width)
            .map(|c| {
                let h = cell_to_string(sheet.cell(offset, c));
                if h.is_empty() { format!("Unnamed: {}", c) } else { h }
            })
            .collect();

        let rows: Vec<Vec<Data>> = (offset + 1..sheet.rows.len())
            .map(|r| (0..width).map(|c| sheet.cell(r, c).clone()).collect::<Vec<Data>>())
            .filter(|row| !row.iter().all(is_blank))
            .collect();

        // columna vacía = sin encabezado y sin datos
        let keep: Vec<usize> = (0..width)
            .filter(|&c| !is_blank(sheet.cell(offset, c)) || rows.iter().any(|r| !is_blank(&r[c])))
            .collect();
        if rows.is_empty() || keep.is_empty() {
            return None;
        }

        Some(Frame {
            headers: keep.iter().map(|&c| headers[c].clone()).collect(),
            rows: rows.into_iter().map(|r| keep.iter().map(|&c| r[c].clone()).collect()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encabezado_despues_de_titulo_y_linea_en_blanco() {
        let sheet = RawSheet::from_strings(
            "Consultório 1",
            &[
                &["ESCALA DO CONSULTÓRIO 1", "", ""],
                &["", "", ""],
                &["DIA", "MANHÃ", "TARDE"],
                &["Segunda", "Dr. X", ""],
                &["Terça", "", "Dra. Y"],
            ],
        );
        let tabla = detect_schedule_table(&sheet).expect("debe detectar la tabla");
        assert_eq!(tabla.header_offset, 2);
        assert_eq!(tabla.columns(), vec!["Dia", "Manhã", "Tarde"]);
        assert_eq!(tabla.rows.len(), 2);
        assert_eq!(tabla.rows[0].manha.as_deref(), Some("Dr. X"));
        assert_eq!(tabla.rows[1].tarde.as_deref(), Some("Dra. Y"));
    }

    #[test]
    fn primera_coincidencia_gana() {
        let sheet = RawSheet::from_strings(
            "Consultório",
            &[
                &["Dia", "Manhã", "Manhã (extra)", "Tarde"],
                &["Segunda", "A", "B", "C"],
            ],
        );
        let tabla = detect_schedule_table(&sheet).unwrap();
        assert_eq!(tabla.rows[0].manha.as_deref(), Some("A"));
        assert_eq!(tabla.rows[0].tarde.as_deref(), Some("C"));
    }

    #[test]
    fn fallback_primera_columna_con_dias() {
        let sheet = RawSheet::from_strings(
            "Consultório 3",
            &[
                &["", "Manhã", "Tarde"],
                &["SEGUNDA", "Dr. A", ""],
                &["SÁBADO", "", "Dr. B"],
            ],
        );
        let tabla = detect_schedule_table(&sheet).unwrap();
        assert_eq!(tabla.header_offset, 0);
        assert_eq!(tabla.rows.len(), 2);
        assert_eq!(tabla.rows[1].dia, "SÁBADO");
    }

    #[test]
    fn solo_manana_es_valido() {
        let sheet = RawSheet::from_strings("Consultório 2", &[&["Dia", "Manhã"], &["Quarta", "Dr. Z"]]);
        let tabla = detect_schedule_table(&sheet).unwrap();
        assert!(tabla.has_manha);
        assert!(!tabla.has_tarde);
        assert_eq!(tabla.columns(), vec!["Dia", "Manhã"]);
        assert_eq!(tabla.rows[0].tarde, None);
    }

    #[test]
    fn turno_con_dias_en_el_encabezado() {
        let sheet = RawSheet::from_strings(
            "Consultório 5",
            &[&["Dia", "Manhã (segunda a sexta)", "Tarde"], &["Segunda", "Dr. A", "Dr. B"]],
        );
        let tabla = detect_schedule_table(&sheet).expect("debe detectar la tabla");
        assert!(tabla.has_manha);
        assert!(tabla.has_tarde);
        assert_eq!(tabla.rows[0].dia, "Segunda");
        assert_eq!(tabla.rows[0].manha.as_deref(), Some("Dr. A"));
        assert_eq!(tabla.rows[0].tarde.as_deref(), Some("Dr. B"));
    }

    #[test]
    fn unico_turno_con_dias_en_el_encabezado() {
        let sheet = RawSheet::from_strings(
            "Consultório 6",
            &[&["Dia", "Manhã (segunda a sábado)"], &["Segunda", "Dr. A"]],
        );
        let tabla = detect_schedule_table(&sheet).expect("la aba no debe descartarse");
        assert_eq!(tabla.columns(), vec!["Dia", "Manhã"]);
        assert_eq!(tabla.rows[0].dia, "Segunda");
        assert_eq!(tabla.rows[0].manha.as_deref(), Some("Dr. A"));
    }

    #[test]
    fn sin_columnas_de_turno_devuelve_none() {
        let sheet = RawSheet::from_strings("Consultório 9", &[&["Dia", "Obs"], &["Segunda", "fechado"]]);
        assert!(detect_schedule_table(&sheet).is_none());
    }

    #[test]
    fn descarta_columnas_sin_datos_y_filas_sin_dia() {
        let sheet = RawSheet::from_strings(
            "Consultório",
            &[
                &["", "Dia", "Manhã", "Tarde"],
                &["", "Segunda", "Dr. A", ""],
                &["", "", "Dr. perdido", ""],
                &["", "", "", ""],
            ],
        );
        let tabla = detect_schedule_table(&sheet).unwrap();
        // la primera columna (sin encabezado ni datos) se elimina; Tarde se
        // conserva aunque esté vacía
        assert!(tabla.has_tarde);
        assert_eq!(tabla.rows.len(), 1);
        assert_eq!(tabla.rows[0].dia, "Segunda");
        assert_eq!(tabla.rows[0].tarde.as_deref(), Some(""));
    }
}
