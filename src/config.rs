//! Configuración del proceso, leída una sola vez al arrancar.
//!
//! Variables (también desde `.env`):
//! - `CONSULTORIOS_XLSX`: ruta de la planilla por defecto
//! - `CONSULTORIOS_BIND`: dirección del servidor HTTP
//! - `CONSULTORIOS_TOP_MEDICOS`: tamaño del ranking de médicos

use std::env;
use std::path::PathBuf;

use crate::error::{DashboardError, Result};

pub const DEFAULT_XLSX_PATH: &str = "/mnt/data/ESCALA DOS CONSULTORIOS DEFINITIVO.xlsx";
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_TOP_MEDICOS: usize = 15;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub xlsx_path: PathBuf,
    pub bind: String,
    pub top_medicos: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            xlsx_path: PathBuf::from(DEFAULT_XLSX_PATH),
            bind: DEFAULT_BIND.to_string(),
            top_medicos: DEFAULT_TOP_MEDICOS,
        }
    }
}

// load .env if present
fn load_dotenv() {
    let _ = dotenv::dotenv();
}

impl Config {
    /// Lee la configuración del entorno. `path_override` (p. ej. el primer
    /// argumento de la línea de comandos) tiene prioridad sobre
    /// `CONSULTORIOS_XLSX`.
    pub fn from_env(path_override: Option<String>) -> Result<Config> {
        load_dotenv();
        Config::from_lookup(path_override, |k| env::var(k).ok())
    }

    /// Versión parametrizable para pruebas (inyección de la fuente de variables).
    pub fn from_lookup<F>(path_override: Option<String>, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();

        if let Some(p) = path_override.or_else(|| lookup("CONSULTORIOS_XLSX")) {
            if p.trim().is_empty() {
                return Err(DashboardError::Config("CONSULTORIOS_XLSX vazio".to_string()));
            }
            cfg.xlsx_path = PathBuf::from(p.trim());
        }
        if let Some(b) = lookup("CONSULTORIOS_BIND").filter(|b| !b.trim().is_empty()) {
            cfg.bind = b.trim().to_string();
        }
        if let Some(n) = lookup("CONSULTORIOS_TOP_MEDICOS") {
            cfg.top_medicos = n
                .trim()
                .parse::<usize>()
                .map_err(|e| DashboardError::Config(format!("CONSULTORIOS_TOP_MEDICOS='{}': {}", n, e)))?;
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn valores_por_defecto() {
        let cfg = Config::from_lookup(None, lookup_from(&[])).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn override_tiene_prioridad() {
        let cfg = Config::from_lookup(
            Some("/tmp/outra.xlsx".to_string()),
            lookup_from(&[("CONSULTORIOS_XLSX", "/tmp/env.xlsx"), ("CONSULTORIOS_BIND", "0.0.0.0:9000")]),
        )
        .unwrap();
        assert_eq!(cfg.xlsx_path, PathBuf::from("/tmp/outra.xlsx"));
        assert_eq!(cfg.bind, "0.0.0.0:9000");
    }

    #[test]
    fn top_medicos_invalido() {
        let err = Config::from_lookup(None, lookup_from(&[("CONSULTORIOS_TOP_MEDICOS", "muitos")])).unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));
    }
}
