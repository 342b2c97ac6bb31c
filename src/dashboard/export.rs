use std::io::Write;

use crate::error::Result;
use crate::models::FilaAgenda;

pub const CSV_FILE_NAME: &str = "agenda_filtrada.csv";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Ordena las filas por sala, día y turno (orden estable para la tabla
/// detallada y la exportación).
pub fn sort_agenda(filas: &mut [&FilaAgenda]) {
    filas.sort_by(|a, b| {
        a.sala
            .cmp(&b.sala)
            .then_with(|| a.dia.cmp(&b.dia))
            .then_with(|| a.turno.cmp(&b.turno))
    });
}

/// Escribe las filas como CSV (UTF-8 con BOM, para que Excel lea los acentos).
pub fn write_csv<W: Write>(mut out: W, filas: &[&FilaAgenda]) -> Result<()> {
    out.write_all(UTF8_BOM)?;
    let mut wtr = csv::WriterBuilder::new().terminator(csv::Terminator::Any(b'\n')).from_writer(out);
    if filas.is_empty() {
        wtr.write_record(["Sala", "Dia", "Turno", "Médico", "Ocupado"])?;
    }
    let mut ordenadas = filas.to_vec();
    sort_agenda(&mut ordenadas);
    for f in ordenadas {
        wtr.serialize(f)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn agenda_to_csv(filas: &[&FilaAgenda]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(&mut buf, filas)?;
    Ok(buf)
}
