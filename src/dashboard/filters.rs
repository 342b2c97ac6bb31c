//! Filtros del dashboard.
//!
//! Los filtros de sala, día y turno definen la tabla "base" que alimenta los
//! KPIs y los gráficos de ocupación. El filtro de médico sólo se aplica a la
//! tabla detallada, al ranking de médicos y a la exportación CSV.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::{DiaSemana, FilaAgenda, Turno};

/// `None` = sin filtro. Un conjunto vacío de salas/días/turnos no deja pasar
/// nada; un conjunto vacío de médicos equivale a no filtrar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filtros {
    #[serde(default)]
    pub salas: Option<BTreeSet<String>>,
    #[serde(default)]
    pub dias: Option<BTreeSet<DiaSemana>>,
    #[serde(default)]
    pub turnos: Option<BTreeSet<Turno>>,
    #[serde(default)]
    pub medicos: Option<BTreeSet<String>>,
}

impl Filtros {
    pub fn is_empty(&self) -> bool {
        self.salas.is_none() && self.dias.is_none() && self.turnos.is_none() && !self.filtra_medico()
    }

    fn filtra_medico(&self) -> bool {
        self.medicos.as_ref().is_some_and(|m| !m.is_empty())
    }

    /// Predicado de la tabla base (sala × día × turno).
    pub fn matches_base(&self, fila: &FilaAgenda) -> bool {
        if let Some(ref salas) = self.salas {
            if !salas.contains(&fila.sala) {
                return false;
            }
        }
        if let Some(ref dias) = self.dias {
            if !dias.contains(&fila.dia) {
                return false;
            }
        }
        if let Some(ref turnos) = self.turnos {
            if !turnos.contains(&fila.turno) {
                return false;
            }
        }
        true
    }

    /// Predicado completo (base + médico).
    pub fn matches(&self, fila: &FilaAgenda) -> bool {
        if !self.matches_base(fila) {
            return false;
        }
        match self.medicos {
            Some(ref medicos) if !medicos.is_empty() => medicos.contains(&fila.medico),
            _ => true,
        }
    }
}

/// Filas que pasan los filtros de sala/día/turno.
pub fn apply_base<'a>(filas: &'a [FilaAgenda], filtros: &Filtros) -> Vec<&'a FilaAgenda> {
    filas.iter().filter(|f| filtros.matches_base(f)).collect()
}

/// Filas que pasan todos los filtros.
pub fn apply_all_filters<'a>(filas: &'a [FilaAgenda], filtros: &Filtros) -> Vec<&'a FilaAgenda> {
    filas.iter().filter(|f| filtros.matches(f)).collect()
}

/// Valores disponibles para cada filtro.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OpcoesFiltro {
    pub salas: Vec<String>,
    pub dias: Vec<DiaSemana>,
    pub turnos: Vec<Turno>,
    pub medicos: Vec<String>,
}

pub fn opcoes(filas: &[FilaAgenda]) -> OpcoesFiltro {
    let salas: BTreeSet<&str> = filas.iter().map(|f| f.sala.as_str()).collect();
    let dias: BTreeSet<DiaSemana> = filas.iter().map(|f| f.dia).collect();
    let turnos: BTreeSet<Turno> = filas.iter().map(|f| f.turno).collect();
    let medicos: BTreeSet<&str> = filas.iter().filter(|f| f.ocupado).map(|f| f.medico.as_str()).collect();

    OpcoesFiltro {
        salas: salas.into_iter().map(String::from).collect(),
        dias: dias.into_iter().collect(),
        turnos: turnos.into_iter().collect(),
        medicos: medicos.into_iter().map(String::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filas() -> Vec<FilaAgenda> {
        vec![
            FilaAgenda::new("Sala 1", DiaSemana::Segunda, Turno::Manha, "Dr. X"),
            FilaAgenda::new("Sala 1", DiaSemana::Segunda, Turno::Tarde, ""),
            FilaAgenda::new("Sala 2", DiaSemana::Sabado, Turno::Manha, "Dra. Y"),
        ]
    }

    #[test]
    fn sin_filtros_pasa_todo() {
        let f = Filtros::default();
        assert!(f.is_empty());
        assert_eq!(apply_all_filters(&filas(), &f).len(), 3);
    }

    #[test]
    fn filtro_de_medico_no_afecta_la_base() {
        let f = Filtros { medicos: Some(["Dr. X".to_string()].into()), ..Default::default() };
        let todas = filas();
        assert_eq!(apply_base(&todas, &f).len(), 3);
        assert_eq!(apply_all_filters(&todas, &f).len(), 1);
    }

    #[test]
    fn conjunto_vacio_de_medicos_no_filtra() {
        let f = Filtros { medicos: Some(BTreeSet::new()), ..Default::default() };
        assert!(f.is_empty());
        assert_eq!(apply_all_filters(&filas(), &f).len(), 3);
    }

    #[test]
    fn opciones_en_orden() {
        let o = opcoes(&filas());
        assert_eq!(o.salas, vec!["Sala 1", "Sala 2"]);
        assert_eq!(o.dias, vec![DiaSemana::Segunda, DiaSemana::Sabado]);
        assert_eq!(o.medicos, vec!["Dr. X", "Dra. Y"]);
    }
}
