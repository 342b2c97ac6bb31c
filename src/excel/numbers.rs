use calamine::Data;

use crate::excel::io::data_to_string;

/// Convierte texto numérico en formato local ("R$ 1.500,00", "1234,56",
/// "2000.5") a `f64`. `None` si la entrada falta o no se puede interpretar;
/// nunca es un error.
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    let mut txt: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();

    let tiene_coma = txt.contains(',');
    let tiene_punto = txt.contains('.');
    if tiene_coma && tiene_punto {
        // punto = separador de miles, coma = decimal
        txt = txt.replace('.', "").replace(',', ".");
    } else if tiene_coma {
        txt = txt.replace(',', ".");
    }

    txt.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Variante para celdas de calamine: las celdas numéricas se usan tal cual.
pub fn parse_number_cell(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) if f.is_finite() => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::Empty | Data::Error(_) => None,
        other => parse_number(Some(&data_to_string(other))),
    }
}
