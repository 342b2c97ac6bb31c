use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::models::{DiaSemana, FilaAgenda, Turno};

/// Redondea a `n` decimales.
pub fn round_to(v: f64, n: i32) -> f64 {
    let f = 10f64.powi(n);
    (v * f).round() / f
}

/// Indicadores generales calculados sobre la tabla base.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub consultorios: usize,
    pub slots: usize,
    pub ocupados: usize,
    pub livres: usize,
    /// Porcentaje 0-100
    pub taxa_ocupacao: f64,
    pub medicos_distintos: usize,
}

pub fn kpis(base: &[&FilaAgenda]) -> Kpis {
    let slots = base.len();
    let ocupados = base.iter().filter(|f| f.ocupado).count();
    let consultorios = base.iter().map(|f| f.sala.as_str()).collect::<BTreeSet<_>>().len();
    let medicos_distintos = base
        .iter()
        .filter(|f| f.ocupado)
        .map(|f| f.medico.as_str())
        .collect::<BTreeSet<_>>()
        .len();
    let taxa = if slots > 0 { ocupados as f64 / slots as f64 * 100.0 } else { 0.0 };

    Kpis {
        consultorios,
        slots,
        ocupados,
        livres: slots.saturating_sub(ocupados),
        taxa_ocupacao: taxa,
        medicos_distintos,
    }
}

/// Taxa de ocupación de un grupo (sala, día o turno).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxaGrupo {
    pub grupo: String,
    pub slots: usize,
    pub ocupados: usize,
    /// Porcentaje 0-100 con un decimal
    pub taxa: f64,
}

fn taxa_por<K: Ord, F>(base: &[&FilaAgenda], key: F, label: impl Fn(&K) -> String) -> Vec<TaxaGrupo>
where
    F: Fn(&FilaAgenda) -> K,
{
    let mut grupos: BTreeMap<K, (usize, usize)> = BTreeMap::new();
    for &f in base {
        let e = grupos.entry(key(f)).or_insert((0, 0));
        e.0 += 1;
        if f.ocupado {
            e.1 += 1;
        }
    }
    grupos
        .into_iter()
        .map(|(k, (slots, ocupados))| TaxaGrupo {
            grupo: label(&k),
            slots,
            ocupados,
            taxa: round_to(ocupados as f64 / slots as f64 * 100.0, 1),
        })
        .collect()
}

pub fn taxa_por_sala(base: &[&FilaAgenda]) -> Vec<TaxaGrupo> {
    taxa_por(base, |f| f.sala.clone(), |s: &String| s.clone())
}

/// Ordenado de Segunda a Sábado.
pub fn taxa_por_dia(base: &[&FilaAgenda]) -> Vec<TaxaGrupo> {
    taxa_por(base, |f| f.dia, |d: &DiaSemana| d.label().to_string())
}

pub fn taxa_por_turno(base: &[&FilaAgenda]) -> Vec<TaxaGrupo> {
    taxa_por(base, |f| f.turno, |t: &Turno| t.label().to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsoMedico {
    pub medico: String,
    pub turnos_utilizados: usize,
}

/// Médicos con más turnos ocupados (desc, empate por nombre).
pub fn top_medicos(filas: &[&FilaAgenda], n: usize) -> Vec<UsoMedico> {
    let usos = turnos_por_medico(filas);
    let mut v: Vec<UsoMedico> = usos
        .into_iter()
        .map(|(medico, turnos_utilizados)| UsoMedico { medico, turnos_utilizados })
        .collect();
    v.sort_by(|a, b| b.turnos_utilizados.cmp(&a.turnos_utilizados).then_with(|| a.medico.cmp(&b.medico)));
    v.truncate(n);
    v
}

/// Cantidad de turnos ocupados por cada médico.
pub fn turnos_por_medico(filas: &[&FilaAgenda]) -> HashMap<String, usize> {
    let mut usos: HashMap<String, usize> = HashMap::new();
    for f in filas.iter().filter(|f| f.ocupado) {
        *usos.entry(f.medico.clone()).or_insert(0) += 1;
    }
    usos
}
