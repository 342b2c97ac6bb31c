use consultorios::excel::{load_workbook, load_workbook_from_bytes};
use consultorios::models::{DiaSemana, Turno};
use consultorios::{load_tables, load_tables_from_path, DashboardError};
use rust_xlsxwriter::Workbook as XlsxWorkbook;

/// Escala de prueba: dos consultórios, la aba de resumen y una aba MÉDICOS.
fn escala_xlsx() -> XlsxWorkbook {
    let mut wb = XlsxWorkbook::new();

    let ws = wb.add_worksheet();
    ws.set_name("CONSULTÓRIO 1").expect("nombre válido");
    ws.write_string(0, 0, "ESCALA CONSULTÓRIO 1").unwrap();
    ws.write_string(2, 0, "DIA").unwrap();
    ws.write_string(2, 1, "MANHÃ").unwrap();
    ws.write_string(2, 2, "TARDE").unwrap();
    ws.write_string(3, 0, "Segunda").unwrap();
    ws.write_string(3, 1, "Dr. Ávila").unwrap();
    ws.write_string(4, 0, "Terça").unwrap();
    ws.write_string(4, 2, "Dra. Souza").unwrap();

    let ws = wb.add_worksheet();
    ws.set_name("CONSULTÓRIO 2").expect("nombre válido");
    ws.write_string(0, 0, "Dia").unwrap();
    ws.write_string(0, 1, "Manhã").unwrap();
    ws.write_string(1, 0, "Quarta").unwrap();
    ws.write_string(1, 1, "Dr. Ávila").unwrap();
    ws.write_string(2, 0, "Quinta").unwrap();

    let ws = wb.add_worksheet();
    ws.set_name("OCUPAÇÃO DAS SALAS").expect("nombre válido");
    ws.write_string(0, 0, "Dia").unwrap();
    ws.write_string(0, 1, "Manhã").unwrap();
    ws.write_string(1, 0, "Segunda").unwrap();
    ws.write_string(1, 1, "100%").unwrap();

    let ws = wb.add_worksheet();
    ws.set_name("MÉDICOS").expect("nombre válido");
    for (c, h) in ["Nome", "Especialidade", "Planos", "Valor Aluguel", "Sala Exclusiva"].iter().enumerate() {
        ws.write_string(0, c as u16, *h).unwrap();
    }
    ws.write_string(1, 0, "Dr. Ávila").unwrap();
    ws.write_string(1, 1, "Cardiologia").unwrap();
    ws.write_string(1, 2, "Plano A").unwrap();
    ws.write_number(1, 3, 1500.0).unwrap();
    ws.write_string(1, 4, "X").unwrap();
    ws.write_string(2, 0, "Dra. Souza").unwrap();
    ws.write_string(2, 1, "Pediatria").unwrap();
    ws.write_string(2, 2, "Plano B").unwrap();
    ws.write_string(2, 3, "R$ 2.250,50").unwrap();

    wb
}

#[test]
fn test_xlsx_en_disco() {
    let dir = tempfile::tempdir().expect("Debe crear directorio temporal");
    let path = dir.path().join("escala.xlsx");
    escala_xlsx().save(&path).expect("Debe guardar la planilla");

    let wb = load_workbook(&path).expect("Debe abrir la planilla");
    assert_eq!(wb.sheet_names().len(), 4);

    let tablas = load_tables(&wb).expect("Debe extraer la agenda");
    // 2 días × 2 turnos + 2 días × 1 turno
    assert_eq!(tablas.agenda.len(), 6);
    assert!(tablas.agenda.iter().all(|f| f.sala.starts_with("CONSULTÓRIO")));

    let terca_tarde = tablas
        .agenda
        .iter()
        .find(|f| f.sala == "CONSULTÓRIO 1" && f.dia == DiaSemana::Terca && f.turno == Turno::Tarde)
        .expect("Debe existir Terça/Tarde");
    assert_eq!(terca_tarde.medico, "Dra. Souza");
    assert!(terca_tarde.ocupado);

    assert_eq!(tablas.medicos.len(), 2);
    assert_eq!(tablas.medicos[0].valor_aluguel, Some(1500.0));
    assert_eq!(tablas.medicos[1].valor_aluguel, Some(2250.5));
    assert_eq!(tablas.medicos[1].plano.as_deref(), Some("Plano B"));
}

#[test]
fn test_xlsx_en_memoria_igual_que_en_disco() {
    let dir = tempfile::tempdir().expect("Debe crear directorio temporal");
    let path = dir.path().join("escala.xlsx");
    escala_xlsx().save(&path).expect("Debe guardar la planilla");
    let bytes = escala_xlsx().save_to_buffer().expect("Debe serializar la planilla");

    let desde_disco = load_tables_from_path(&path).expect("disco");
    let desde_bytes = load_tables(&load_workbook_from_bytes(bytes).expect("bytes")).expect("bytes");
    assert_eq!(desde_disco.agenda, desde_bytes.agenda);
    assert_eq!(desde_disco.medicos, desde_bytes.medicos);
}

#[test]
fn test_archivo_inexistente_es_fatal() {
    let dir = tempfile::tempdir().expect("Debe crear directorio temporal");
    let err = load_tables_from_path(dir.path().join("nao_existe.xlsx")).unwrap_err();
    assert!(matches!(err, DashboardError::WorkbookUnreadable { .. }));
    assert!(err.is_fatal());
}

#[test]
fn test_archivo_que_no_es_planilla() {
    let dir = tempfile::tempdir().expect("Debe crear directorio temporal");
    let path = dir.path().join("escala.xlsx");
    std::fs::write(&path, b"isto nao e uma planilha").unwrap();
    let err = load_workbook(&path).unwrap_err();
    assert!(matches!(err, DashboardError::WorkbookUnreadable { .. }));
}
