//! Errores del crate.
//!
//! Sólo `WorkbookUnreadable` y `NoScheduleFound` detienen el dashboard; los
//! problemas de una hoja concreta se registran en el log y la hoja se omite.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// El archivo no se pudo abrir como planilla.
    #[error("não foi possível abrir o arquivo '{path}': {reason}")]
    WorkbookUnreadable { path: String, reason: String },

    /// Ninguna aba CONSULTÓRIO produjo filas de agenda.
    #[error("não foram encontrados dados nas abas 'CONSULTÓRIO'")]
    NoScheduleFound,

    #[error("configuração inválida: {0}")]
    Config(String),

    /// Valor de filtro desconocido (día o turno).
    #[error("filtro inválido: {0}")]
    InvalidFilter(String),

    #[error("erro ao desenhar gráfico: {0}")]
    Render(String),

    #[error("erro ao exportar CSV: {0}")]
    Export(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    pub fn unreadable(path: impl Into<String>, reason: impl ToString) -> Self {
        DashboardError::WorkbookUnreadable { path: path.into(), reason: reason.to_string() }
    }

    /// `true` si el error impide mostrar cualquier dato.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DashboardError::WorkbookUnreadable { .. } | DashboardError::NoScheduleFound)
    }
}
