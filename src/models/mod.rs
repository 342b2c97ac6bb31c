// Estructuras de datos principales

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Día de la semana de la escala. El orden de declaración (Segunda → Sábado)
/// es el orden usado para ordenar filas y ejes de gráficos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DiaSemana {
    #[serde(rename = "Segunda")]
    Segunda,
    #[serde(rename = "Terça")]
    Terca,
    #[serde(rename = "Quarta")]
    Quarta,
    #[serde(rename = "Quinta")]
    Quinta,
    #[serde(rename = "Sexta")]
    Sexta,
    #[serde(rename = "Sábado")]
    Sabado,
}

impl DiaSemana {
    pub const TODOS: [DiaSemana; 6] = [
        DiaSemana::Segunda,
        DiaSemana::Terca,
        DiaSemana::Quarta,
        DiaSemana::Quinta,
        DiaSemana::Sexta,
        DiaSemana::Sabado,
    ];

    /// Etiqueta para mostrar (con acentos restaurados).
    pub fn label(&self) -> &'static str {
        match self {
            DiaSemana::Segunda => "Segunda",
            DiaSemana::Terca => "Terça",
            DiaSemana::Quarta => "Quarta",
            DiaSemana::Quinta => "Quinta",
            DiaSemana::Sexta => "Sexta",
            DiaSemana::Sabado => "Sábado",
        }
    }

    /// Busca el día cuya etiqueta coincide exactamente con `label`.
    pub fn from_label(label: &str) -> Option<DiaSemana> {
        DiaSemana::TODOS.iter().copied().find(|d| d.label() == label)
    }
}

impl fmt::Display for DiaSemana {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Turno {
    #[serde(rename = "Manhã")]
    Manha,
    #[serde(rename = "Tarde")]
    Tarde,
}

impl Turno {
    pub const TODOS: [Turno; 2] = [Turno::Manha, Turno::Tarde];

    pub fn label(&self) -> &'static str {
        match self {
            Turno::Manha => "Manhã",
            Turno::Tarde => "Tarde",
        }
    }
}

impl fmt::Display for Turno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Una franja (sala × día × turno) de la escala en formato largo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilaAgenda {
    #[serde(rename = "Sala")]
    pub sala: String,
    #[serde(rename = "Dia")]
    pub dia: DiaSemana,
    #[serde(rename = "Turno")]
    pub turno: Turno,
    /// Vacío = franja libre.
    #[serde(rename = "Médico")]
    pub medico: String,
    #[serde(rename = "Ocupado")]
    pub ocupado: bool,
}

impl FilaAgenda {
    /// Construye la fila recortando el nombre del médico y derivando `ocupado`.
    pub fn new(sala: &str, dia: DiaSemana, turno: Turno, medico: &str) -> Self {
        let medico = medico.trim().to_string();
        let ocupado = !medico.is_empty();
        FilaAgenda { sala: sala.trim().to_string(), dia, turno, medico, ocupado }
    }
}

/// Marca de las columnas "Sala Exclusiva" / "Sala Dividida".
///
/// Sólo la letra `X` se interpreta como `Sim`; cualquier otro valor no vacío
/// se conserva tal cual (en mayúsculas) en `Outro`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarcaSala {
    Sim,
    EmBranco,
    Outro(String),
}

impl MarcaSala {
    pub fn as_str(&self) -> &str {
        match self {
            MarcaSala::Sim => "Sim",
            MarcaSala::EmBranco => "",
            MarcaSala::Outro(s) => s.as_str(),
        }
    }

    pub fn is_sim(&self) -> bool {
        matches!(self, MarcaSala::Sim)
    }
}

impl Serialize for MarcaSala {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Registro de un médico tal como aparece en una aba MÉDICOS.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistroMedico {
    #[serde(rename = "Médico")]
    pub nome: String,
    #[serde(rename = "CRM")]
    pub crm: Option<String>,
    #[serde(rename = "Especialidade")]
    pub especialidade: Option<String>,
    #[serde(rename = "Planos")]
    pub plano: Option<String>,
    /// `None` cuando el valor no se pudo interpretar como número.
    #[serde(rename = "Valor Aluguel")]
    pub valor_aluguel: Option<f64>,
    #[serde(rename = "Sala Exclusiva")]
    pub sala_exclusiva: Option<MarcaSala>,
    #[serde(rename = "Sala Dividida")]
    pub sala_dividida: Option<MarcaSala>,
    /// Aba de origen
    #[serde(skip)]
    pub aba: String,
}

impl RegistroMedico {
    pub fn new(nome: impl Into<String>, aba: impl Into<String>) -> Self {
        RegistroMedico {
            nome: nome.into(),
            crm: None,
            especialidade: None,
            plano: None,
            valor_aluguel: None,
            sala_exclusiva: None,
            sala_dividida: None,
            aba: aba.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orden_de_dias_es_fijo() {
        let mut dias = vec![DiaSemana::Sabado, DiaSemana::Segunda, DiaSemana::Quarta];
        dias.sort();
        assert_eq!(dias, vec![DiaSemana::Segunda, DiaSemana::Quarta, DiaSemana::Sabado]);
    }

    #[test]
    fn fila_deriva_ocupado() {
        let libre = FilaAgenda::new(" Sala 1 ", DiaSemana::Segunda, Turno::Manha, "   ");
        assert_eq!(libre.sala, "Sala 1");
        assert!(!libre.ocupado);
        let ocupada = FilaAgenda::new("Sala 1", DiaSemana::Segunda, Turno::Tarde, " Dr. X ");
        assert_eq!(ocupada.medico, "Dr. X");
        assert!(ocupada.ocupado);
    }

    #[test]
    fn serializa_etiquetas_en_portugues() {
        let fila = FilaAgenda::new("Sala 2", DiaSemana::Terca, Turno::Manha, "Dra. Ana");
        let v = serde_json::to_value(&fila).unwrap();
        assert_eq!(v["Dia"], "Terça");
        assert_eq!(v["Turno"], "Manhã");
        assert_eq!(v["Médico"], "Dra. Ana");
        assert_eq!(serde_json::to_value(MarcaSala::Sim).unwrap(), "Sim");
    }
}
