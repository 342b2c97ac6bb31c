use calamine::Data;

use crate::excel::io::{cell_to_string, RawSheet, Workbook};
use crate::excel::normalize_name;
use crate::excel::numbers::parse_number_cell;
use crate::models::{MarcaSala, RegistroMedico};

/// Campos canónicos de una aba MÉDICOS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CampoMedico {
    Nome,
    Crm,
    Especialidade,
    Planos,
    ValorAluguel,
    SalaExclusiva,
    SalaDividida,
}

impl CampoMedico {
    pub fn label(&self) -> &'static str {
        match self {
            CampoMedico::Nome => "Médico",
            CampoMedico::Crm => "CRM",
            CampoMedico::Especialidade => "Especialidade",
            CampoMedico::Planos => "Planos",
            CampoMedico::ValorAluguel => "Valor Aluguel",
            CampoMedico::SalaExclusiva => "Sala Exclusiva",
            CampoMedico::SalaDividida => "Sala Dividida",
        }
    }
}

/// Regla de coincidencia sobre el nombre de columna ya normalizado.
#[derive(Debug, Clone, Copy)]
pub enum Regla {
    Contem(&'static str),
    Igual(&'static str),
}

impl Regla {
    fn matches(&self, col_norm: &str) -> bool {
        match self {
            Regla::Contem(k) => col_norm.contains(k),
            Regla::Igual(k) => col_norm == *k,
        }
    }
}

/// Tabla de palabras clave. El orden de declaración es la prioridad: una
/// columna se asigna al primer campo cuyas reglas coinciden.
pub const CAMPOS_MEDICO: &[(CampoMedico, &[Regla])] = &[
    (CampoMedico::Nome, &[Regla::Contem("nome"), Regla::Contem("medico")]),
    (CampoMedico::Crm, &[Regla::Contem("crm")]),
    (CampoMedico::Especialidade, &[Regla::Contem("especial")]),
    (CampoMedico::Planos, &[Regla::Contem("planos"), Regla::Igual("plano")]),
    (
        CampoMedico::ValorAluguel,
        &[Regla::Contem("valor"), Regla::Contem("aluguel"), Regla::Contem("negoci")],
    ),
    (CampoMedico::SalaExclusiva, &[Regla::Contem("exclus")]),
    (CampoMedico::SalaDividida, &[Regla::Contem("divid")]),
];

/// Campo canónico de un nombre de columna (cualquier forma, se normaliza aquí).
pub fn campo_for_column(header: &str) -> Option<CampoMedico> {
    let norm = normalize_name(header);
    CAMPOS_MEDICO
        .iter()
        .find(|(_, reglas)| reglas.iter().any(|r| r.matches(&norm)))
        .map(|(campo, _)| *campo)
}

/// Asigna columnas a campos. Si dos columnas apuntan al mismo campo se queda
/// la primera (de izquierda a derecha).
pub fn map_columns(headers: &[String]) -> Vec<(CampoMedico, usize)> {
    let mut out: Vec<(CampoMedico, usize)> = Vec::new();
    for (i, h) in headers.iter().enumerate() {
        if let Some(campo) = campo_for_column(h) {
            if out.iter().any(|(c, _)| *c == campo) {
                log::debug!("coluna '{}' ignorada: campo {} já mapeado", h, campo.label());
                continue;
            }
            out.push((campo, i));
        }
    }
    out
}

/// `true` para abas "MÉDICOS", "Medicos 2", etc.
pub fn is_registry_sheet(sheet_name: &str) -> bool {
    normalize_name(sheet_name).contains("medic")
}

fn texto(cell: &Data) -> Option<String> {
    let s = cell_to_string(cell);
    let s = s.trim();
    if s.is_empty() || s == "nan" || s == "None" { None } else { Some(s.to_string()) }
}

/// "X" -> Sim, vacío -> EmBranco, cualquier otro valor se conserva.
pub fn parse_marca(cell: &Data) -> MarcaSala {
    let s = cell_to_string(cell).trim().to_uppercase();
    match s.as_str() {
        "" => MarcaSala::EmBranco,
        "X" => MarcaSala::Sim,
        _ => {
            log::warn!("⚠️ marcação de sala não reconhecida '{}', mantida como está", s);
            MarcaSala::Outro(s)
        }
    }
}

/// Lee una aba MÉDICOS con la primera fila como encabezado. `None` si la aba
/// está vacía o no tiene ninguna columna reconocida.
pub fn extract_sheet_medicos(sheet: &RawSheet) -> Option<Vec<RegistroMedico>> {
    let (header_row, data_rows) = sheet.rows.split_first()?;
    if data_rows.is_empty() {
        return None;
    }

    let headers: Vec<String> = (0..sheet.width())
        .map(|c| {
            let h = header_row.get(c).map(cell_to_string).unwrap_or_default();
            if h.is_empty() { format!("Unnamed: {}", c) } else { h }
        })
        .collect();
    let mapa = map_columns(&headers);
    if mapa.is_empty() {
        log::info!("aba '{}' sem colunas reconhecidas, ignorada", sheet.name);
        return None;
    }

    let col = |campo: CampoMedico| mapa.iter().find(|(c, _)| *c == campo).map(|(_, i)| *i);
    let nome_col = col(CampoMedico::Nome);
    let crm_col = col(CampoMedico::Crm);
    let esp_col = col(CampoMedico::Especialidade);
    let plano_col = col(CampoMedico::Planos);
    let valor_col = col(CampoMedico::ValorAluguel);
    let excl_col = col(CampoMedico::SalaExclusiva);
    let divid_col = col(CampoMedico::SalaDividida);

    let mut registros = Vec::new();
    for row in data_rows {
        let cell = |i: usize| row.get(i).unwrap_or(&Data::Empty);
        // sin nombre no hay registro
        let nome = match nome_col.and_then(|i| texto(cell(i))) {
            Some(n) => n,
            None => continue,
        };

        let mut reg = RegistroMedico::new(nome, sheet.name.trim());
        reg.crm = crm_col.and_then(|i| texto(cell(i)));
        reg.especialidade = esp_col.and_then(|i| texto(cell(i)));
        reg.plano = plano_col.and_then(|i| texto(cell(i)));
        reg.valor_aluguel = valor_col.and_then(|i| parse_number_cell(cell(i)));
        reg.sala_exclusiva = excl_col.map(|i| parse_marca(cell(i)));
        reg.sala_dividida = divid_col.map(|i| parse_marca(cell(i)));
        registros.push(reg);
    }

    Some(registros)
}

/// Une todas las abas MÉDICOS del libro. No elimina duplicados: el mismo
/// médico en dos abas aparece dos veces.
pub fn extract_medicos(workbook: &Workbook) -> Vec<RegistroMedico> {
    let mut out = Vec::new();
    for sheet in workbook.sheets() {
        if !is_registry_sheet(&sheet.name) {
            continue;
        }
        if let Some(regs) = extract_sheet_medicos(sheet) {
            log::debug!("aba '{}': {} médicos", sheet.name, regs.len());
            out.extend(regs);
        }
    }
    if out.is_empty() {
        log::warn!("⚠️ Nenhuma aba MÉDICOS encontrada; indicadores de plano/aluguel ficarão ocultos");
    } else {
        log::info!("👩‍⚕️ Cadastro: {} registros de médicos", out.len());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prioridad_de_campos() {
        assert_eq!(campo_for_column("NOME"), Some(CampoMedico::Nome));
        assert_eq!(campo_for_column("Médico"), Some(CampoMedico::Nome));
        assert_eq!(campo_for_column("CRM/UF"), Some(CampoMedico::Crm));
        assert_eq!(campo_for_column("Especialidade"), Some(CampoMedico::Especialidade));
        assert_eq!(campo_for_column("PLANOS"), Some(CampoMedico::Planos));
        assert_eq!(campo_for_column("Plano"), Some(CampoMedico::Planos));
        assert_eq!(campo_for_column("Plano de saúde"), None);
        assert_eq!(campo_for_column("Valor Negociado"), Some(CampoMedico::ValorAluguel));
        assert_eq!(campo_for_column("ALUGUEL"), Some(CampoMedico::ValorAluguel));
        assert_eq!(campo_for_column("Sala Exclusiva"), Some(CampoMedico::SalaExclusiva));
        assert_eq!(campo_for_column("SALA DIVIDIDA"), Some(CampoMedico::SalaDividida));
        // "nome" tiene prioridad sobre "valor"
        assert_eq!(campo_for_column("Nome / Valor"), Some(CampoMedico::Nome));
        assert_eq!(campo_for_column("Telefone"), None);
    }

    #[test]
    fn primera_columna_por_campo() {
        let headers = vec!["Nome".to_string(), "Médico responsável".to_string(), "CRM".to_string()];
        let mapa = map_columns(&headers);
        assert_eq!(mapa, vec![(CampoMedico::Nome, 0), (CampoMedico::Crm, 2)]);
    }

    #[test]
    fn marcas_de_sala() {
        assert_eq!(parse_marca(&Data::String(" x ".to_string())), MarcaSala::Sim);
        assert_eq!(parse_marca(&Data::Empty), MarcaSala::EmBranco);
        assert_eq!(parse_marca(&Data::String("sim".to_string())), MarcaSala::Outro("SIM".to_string()));
    }

    #[test]
    fn aba_sin_columnas_reconocidas() {
        let sheet = RawSheet::from_strings("MÉDICOS 4", &[&["Telefone", "Email"], &["1234", "a@b.c"]]);
        assert!(extract_sheet_medicos(&sheet).is_none());
    }

    #[test]
    fn filas_sin_nombre_se_descartan() {
        let sheet = RawSheet::from_strings(
            "MÉDICOS",
            &[&["Nome", "Planos", "Valor"], &["Dr. A", " Plano A ", "R$ 1.500,00"], &["", "Plano B", "900"]],
        );
        let regs = extract_sheet_medicos(&sheet).unwrap();
        assert_eq!(regs.len(), 1);
        assert_eq!(regs[0].plano.as_deref(), Some("Plano A"));
        assert_eq!(regs[0].valor_aluguel, Some(1500.0));
        assert_eq!(regs[0].sala_exclusiva, None);
        assert_eq!(regs[0].aba, "MÉDICOS");
    }
}
