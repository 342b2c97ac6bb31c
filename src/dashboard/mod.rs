// Módulo `dashboard`: consume las dos tablas normalizadas (agenda y cadastro
// de médicos) y produce los indicadores, exportaciones y gráficos.

/// Filtros sala/día/turno/médico
pub mod filters;
/// KPIs y taxas de ocupación
pub mod ocupacao;
/// Indicadores PLANOS × Aluguel
pub mod planos;
/// Exportación CSV
pub mod export;
/// Gráficos SVG
pub mod charts;

pub use filters::{apply_all_filters, apply_base, opcoes, Filtros, OpcoesFiltro};
pub use ocupacao::{Kpis, TaxaGrupo, UsoMedico};
pub use planos::{IndicadoresMedicos, MedicoEnriquecido};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

use crate::error::{DashboardError, Result};
use crate::excel::{self, Workbook};
use crate::models::{FilaAgenda, RegistroMedico};

pub const AVISO_SEM_MEDICOS: &str =
    "Não foram encontradas abas de MÉDICOS com colunas reconhecidas; indicadores de PLANOS × Aluguel indisponíveis.";

/// Las dos tablas extraídas de la planilla, inmutables tras la carga.
#[derive(Debug, Clone, Serialize)]
pub struct Tablas {
    pub agenda: Vec<FilaAgenda>,
    pub medicos: Vec<RegistroMedico>,
    pub carregado_em: DateTime<Utc>,
    /// Abas que calamine no pudo leer
    pub abas_ignoradas: Vec<String>,
}

/// Extrae agenda y cadastro de un workbook ya cargado.
pub fn load_tables(workbook: &Workbook) -> Result<Tablas> {
    let agenda = excel::extract_agenda(workbook);
    if agenda.is_empty() {
        return Err(DashboardError::NoScheduleFound);
    }
    let medicos = excel::extract_medicos(workbook);
    Ok(Tablas {
        agenda,
        medicos,
        carregado_em: Utc::now(),
        abas_ignoradas: workbook.unreadable().to_vec(),
    })
}

pub fn load_tables_from_path<P: AsRef<Path>>(path: P) -> Result<Tablas> {
    let wb = excel::load_workbook(path)?;
    load_tables(&wb)
}

/// Respuesta completa del dashboard para un conjunto de filtros.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub filtros: Filtros,
    pub kpis: Kpis,
    pub por_sala: Vec<TaxaGrupo>,
    pub por_dia: Vec<TaxaGrupo>,
    pub por_turno: Vec<TaxaGrupo>,
    pub top_medicos: Vec<UsoMedico>,
    pub medicos: Option<IndicadoresMedicos>,
    pub avisos: Vec<String>,
    pub carregado_em: DateTime<Utc>,
}

pub fn build_dashboard(tablas: &Tablas, filtros: &Filtros, top_n: usize) -> Dashboard {
    let base = apply_base(&tablas.agenda, filtros);
    let filtradas = apply_all_filters(&tablas.agenda, filtros);

    let mut avisos = Vec::new();
    if base.is_empty() {
        avisos.push("Nenhum registro para os filtros selecionados.".to_string());
    }

    let usos = ocupacao::turnos_por_medico(&base);
    let medicos = planos::indicadores(&tablas.medicos, &usos);
    if medicos.is_none() {
        avisos.push(AVISO_SEM_MEDICOS.to_string());
    }

    Dashboard {
        filtros: filtros.clone(),
        kpis: ocupacao::kpis(&base),
        por_sala: ocupacao::taxa_por_sala(&base),
        por_dia: ocupacao::taxa_por_dia(&base),
        por_turno: ocupacao::taxa_por_turno(&base),
        top_medicos: ocupacao::top_medicos(&filtradas, top_n),
        medicos,
        avisos,
        carregado_em: tablas.carregado_em,
    }
}

/// Filas detalladas (todos los filtros), ordenadas por sala, día y turno.
pub fn agenda_filtrada<'a>(tablas: &'a Tablas, filtros: &Filtros) -> Vec<&'a FilaAgenda> {
    let mut filas = apply_all_filters(&tablas.agenda, filtros);
    export::sort_agenda(&mut filas);
    filas
}

/// Cadastro enriquecido con los turnos utilizados en la tabla base.
pub fn medicos_enriquecidos(tablas: &Tablas, filtros: &Filtros) -> Vec<MedicoEnriquecido> {
    let base = apply_base(&tablas.agenda, filtros);
    let usos = ocupacao::turnos_por_medico(&base);
    planos::indicadores(&tablas.medicos, &usos).map(|i| i.tabela).unwrap_or_default()
}

/// Gráfico de barras de la taxa por sala, día o turno.
pub fn chart_svg(tablas: &Tablas, filtros: &Filtros, eixo: charts::Eixo) -> Result<String> {
    let base = apply_base(&tablas.agenda, filtros);
    let grupos = match eixo {
        charts::Eixo::Sala => ocupacao::taxa_por_sala(&base),
        charts::Eixo::Dia => ocupacao::taxa_por_dia(&base),
        charts::Eixo::Turno => ocupacao::taxa_por_turno(&base),
    };
    charts::bar_chart_svg(eixo.titulo(), &grupos)
}
