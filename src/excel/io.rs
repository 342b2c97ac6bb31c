use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::error::{DashboardError, Result};

/// Convierte un `Data` de calamine a String (versión genérica para celdas)
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => format!("{}", b),
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(s) => s.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Igual que `cell_to_string` pero sin tocar los floats (útil para números)
pub fn data_to_string(d: &Data) -> String {
    match d {
        Data::Float(f) => f.to_string(),
        other => cell_to_string(other),
    }
}

/// Celda vacía o con sólo espacios.
pub fn is_blank(c: &Data) -> bool {
    match c {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Una hoja tal como la entrega calamine: rejilla densa de celdas, comenzando
/// en la primera celda usada.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSheet {
    pub name: String,
    pub rows: Vec<Vec<Data>>,
}

impl RawSheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Data>>) -> Self {
        RawSheet { name: name.into(), rows }
    }

    /// Atajo para tests y fixtures: construye la hoja desde texto plano
    /// (cadena vacía = celda vacía).
    pub fn from_strings(name: impl Into<String>, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|r| {
                r.iter()
                    .map(|s| if s.is_empty() { Data::Empty } else { Data::String(s.to_string()) })
                    .collect()
            })
            .collect();
        RawSheet { name: name.into(), rows }
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> &Data {
        self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(&Data::Empty)
    }
}

/// Libro completo en memoria. Se lee una sola vez y después sólo se consulta.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<RawSheet>,
    /// Abas que calamine no pudo leer
    unreadable: Vec<String>,
}

impl Workbook {
    pub fn from_sheets(sheets: Vec<RawSheet>) -> Self {
        Workbook { sheets, unreadable: Vec::new() }
    }

    pub fn sheets(&self) -> &[RawSheet] {
        &self.sheets
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn unreadable(&self) -> &[String] {
        &self.unreadable
    }
}

/// Abre el workbook (xlsx/xls/xlsb/ods) y carga todas sus abas.
pub fn load_workbook<P: AsRef<Path>>(path: P) -> Result<Workbook> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| DashboardError::unreadable(path.display().to_string(), e))?;
    let wb = read_all_sheets(&mut workbook);
    log::info!("✅ Planilha '{}' carregada: {} abas", path.display(), wb.sheets.len());
    Ok(wb)
}

/// Igual que `load_workbook` pero desde bytes en memoria.
pub fn load_workbook_from_bytes(bytes: Vec<u8>) -> Result<Workbook> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| DashboardError::unreadable("<memória>", e))?;
    Ok(read_all_sheets(&mut workbook))
}

fn read_all_sheets<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> Workbook {
    let names = workbook.sheet_names().to_owned();
    let mut out = Workbook::default();

    for name in names {
        match workbook.worksheet_range(&name) {
            Ok(range) => {
                let rows: Vec<Vec<Data>> = range.rows().map(|r| r.to_vec()).collect();
                out.sheets.push(RawSheet { name, rows });
            }
            Err(e) => {
                log::warn!("⚠️ Aba '{}' ignorada: {}", name, e);
                out.unreadable.push(name);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_to_string_formatea_enteros() {
        assert_eq!(cell_to_string(&Data::Float(12345.0)), "12345");
        assert_eq!(cell_to_string(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_to_string(&Data::String("  Dr. X ".to_string())), "Dr. X");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn raw_sheet_desde_strings() {
        let s = RawSheet::from_strings("Sala 1", &[&["DIA", "MANHÃ"], &["Segunda", ""]]);
        assert_eq!(s.width(), 2);
        assert_eq!(s.cell(1, 1), &Data::Empty);
        assert_eq!(s.cell(9, 9), &Data::Empty);
        assert!(is_blank(s.cell(1, 1)));
        assert!(!is_blank(s.cell(1, 0)));
    }

    #[test]
    fn bytes_invalidos_son_workbook_unreadable() {
        let err = load_workbook_from_bytes(b"isto nao e uma planilha".to_vec()).unwrap_err();
        assert!(matches!(err, DashboardError::WorkbookUnreadable { .. }));
        assert!(err.is_fatal());
    }
}
