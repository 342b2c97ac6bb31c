//! Indicadores PLANOS × Aluguel × Profissionais.
//!
//! Se calculan sobre el cadastro de médicos unido (por nombre exacto) con la
//! cantidad de turnos que cada médico ocupa en la tabla base.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::dashboard::ocupacao::round_to;
use crate::models::RegistroMedico;

/// Límites de las faixas de aluguel (intervalos cerrados a la derecha; el
/// primero incluye el 0).
pub const FAIXAS_LIMITES: [f64; 7] = [0.0, 500.0, 1000.0, 1500.0, 2000.0, 3000.0, 9_999_999.0];
pub const FAIXAS_LABELS: [&str; 6] = ["até 500", "501–1000", "1001–1500", "1501–2000", "2001–3000", "3000+"];

/// Faixa de un valor de aluguel; `None` fuera de rango.
pub fn faixa_aluguel(valor: f64) -> Option<&'static str> {
    if valor < FAIXAS_LIMITES[0] {
        return None;
    }
    FAIXAS_LIMITES
        .windows(2)
        .position(|w| valor <= w[1] && (valor > w[0] || w[0] == FAIXAS_LIMITES[0]))
        .map(|i| FAIXAS_LABELS[i])
}

/// Formato monetario brasileño sin símbolo: 1234.5 -> "1.234,50".
pub fn format_brl(valor: f64) -> String {
    let txt = format!("{:.2}", valor.abs());
    let (inteiro, decimal) = txt.split_once('.').unwrap_or((txt.as_str(), "00"));

    let mut agrupado = String::with_capacity(inteiro.len() + inteiro.len() / 3);
    for (i, c) in inteiro.chars().enumerate() {
        if i > 0 && (inteiro.len() - i) % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(c);
    }

    let sinal = if valor < 0.0 && txt != "0.00" { "-" } else { "" };
    format!("{}{},{}", sinal, agrupado, decimal)
}

/// Registro del cadastro con los turnos utilizados en la agenda filtrada.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicoEnriquecido {
    #[serde(flatten)]
    pub registro: RegistroMedico,
    #[serde(rename = "Turnos Utilizados")]
    pub turnos_utilizados: Option<usize>,
}

/// Left join cadastro ← usos (por nombre exacto).
pub fn enrich(medicos: &[RegistroMedico], usos: &HashMap<String, usize>) -> Vec<MedicoEnriquecido> {
    medicos
        .iter()
        .map(|m| MedicoEnriquecido { registro: m.clone(), turnos_utilizados: usos.get(&m.nome).copied() })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContagemGrupo {
    pub grupo: String,
    pub profissionais: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaGrupo {
    pub grupo: String,
    /// `None` si ningún médico del grupo tiene valor
    pub valor_medio: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContagemCruzada {
    pub grupo: String,
    pub plano: String,
    pub profissionais: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicadoresMedicos {
    pub profissionais: usize,
    pub categorias_planos: usize,
    pub valor_medio_aluguel: Option<f64>,
    /// "1.234,56" o "—"
    pub valor_medio_aluguel_fmt: String,
    pub profissionais_por_plano: Vec<ContagemGrupo>,
    pub valor_medio_por_plano: Vec<MediaGrupo>,
    /// grupo = faixa de aluguel
    pub faixas_por_plano: Vec<ContagemCruzada>,
    /// Ordenado de mayor a menor valor medio
    pub valor_medio_por_especialidade: Vec<MediaGrupo>,
    /// grupo = especialidade
    pub especialidade_por_plano: Vec<ContagemCruzada>,
    pub tipo_sala: Vec<ContagemGrupo>,
    pub tabela: Vec<MedicoEnriquecido>,
}

fn mean(valores: &[f64]) -> Option<f64> {
    if valores.is_empty() { None } else { Some(valores.iter().sum::<f64>() / valores.len() as f64) }
}

/// Cuenta nombres distintos por clave.
fn distinct_por<K: Ord + Clone>(pares: impl Iterator<Item = (K, String)>) -> BTreeMap<K, usize> {
    let mut sets: BTreeMap<K, BTreeSet<String>> = BTreeMap::new();
    for (k, nome) in pares {
        sets.entry(k).or_default().insert(nome);
    }
    sets.into_iter().map(|(k, s)| (k, s.len())).collect()
}

fn media_por(pares: impl Iterator<Item = (String, Option<f64>)>) -> Vec<MediaGrupo> {
    let mut grupos: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (k, v) in pares {
        let e = grupos.entry(k).or_default();
        if let Some(v) = v {
            e.push(v);
        }
    }
    grupos
        .into_iter()
        .map(|(grupo, vals)| MediaGrupo { grupo, valor_medio: mean(&vals).map(|m| round_to(m, 2)) })
        .collect()
}

/// Tipo de sala: Exclusiva tiene prioridad sobre Dividida.
pub fn tipo_sala(m: &RegistroMedico) -> Option<&'static str> {
    if m.sala_exclusiva.as_ref().is_some_and(|s| s.is_sim()) {
        Some("Exclusiva")
    } else if m.sala_dividida.as_ref().is_some_and(|s| s.is_sim()) {
        Some("Dividida")
    } else {
        None
    }
}

fn cmp_opt_str(a: &Option<String>, b: &Option<String>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn cmp_opt_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Calcula todos los indicadores. `None` si el cadastro está vacío.
pub fn indicadores(medicos: &[RegistroMedico], usos: &HashMap<String, usize>) -> Option<IndicadoresMedicos> {
    if medicos.is_empty() {
        return None;
    }
    let mut tabela = enrich(medicos, usos);

    let profissionais = medicos.iter().map(|m| m.nome.as_str()).collect::<BTreeSet<_>>().len();
    let categorias_planos = medicos.iter().filter_map(|m| m.plano.as_deref()).collect::<BTreeSet<_>>().len();
    let valores: Vec<f64> = medicos.iter().filter_map(|m| m.valor_aluguel).collect();
    let valor_medio_aluguel = mean(&valores);
    let valor_medio_aluguel_fmt = valor_medio_aluguel.map(format_brl).unwrap_or_else(|| "—".to_string());

    let profissionais_por_plano = distinct_por(
        medicos.iter().filter_map(|m| m.plano.clone().map(|p| (p, m.nome.clone()))),
    )
    .into_iter()
    .map(|(grupo, profissionais)| ContagemGrupo { grupo, profissionais })
    .collect();

    let valor_medio_por_plano =
        media_por(medicos.iter().filter_map(|m| m.plano.clone().map(|p| (p, m.valor_aluguel))));

    let faixas_por_plano = distinct_por(medicos.iter().filter_map(|m| {
        let plano = m.plano.clone()?;
        let faixa = faixa_aluguel(m.valor_aluguel?)?;
        Some(((plano, faixa_idx(faixa)), m.nome.clone()))
    }))
    .into_iter()
    .map(|((plano, idx), profissionais)| ContagemCruzada { grupo: FAIXAS_LABELS[idx].to_string(), plano, profissionais })
    .collect();

    let mut valor_medio_por_especialidade =
        media_por(medicos.iter().filter_map(|m| m.especialidade.clone().map(|e| (e, m.valor_aluguel))));
    valor_medio_por_especialidade.sort_by(|a, b| match (a.valor_medio, b.valor_medio) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    let especialidade_por_plano = distinct_por(medicos.iter().filter_map(|m| {
        Some(((m.especialidade.clone()?, m.plano.clone()?), m.nome.clone()))
    }))
    .into_iter()
    .map(|((grupo, plano), profissionais)| ContagemCruzada { grupo, plano, profissionais })
    .collect();

    let tipo_sala = distinct_por(medicos.iter().filter_map(|m| tipo_sala(m).map(|t| (t.to_string(), m.nome.clone()))))
        .into_iter()
        .map(|(grupo, profissionais)| ContagemGrupo { grupo, profissionais })
        .collect();

    tabela.sort_by(|a, b| {
        let (x, y) = (&a.registro, &b.registro);
        cmp_opt_str(&x.plano, &y.plano)
            .then_with(|| cmp_opt_str(&x.especialidade, &y.especialidade))
            .then_with(|| cmp_opt_f64(x.valor_aluguel, y.valor_aluguel))
            .then_with(|| x.nome.cmp(&y.nome))
    });

    Some(IndicadoresMedicos {
        profissionais,
        categorias_planos,
        valor_medio_aluguel,
        valor_medio_aluguel_fmt,
        profissionais_por_plano,
        valor_medio_por_plano,
        faixas_por_plano,
        valor_medio_por_especialidade,
        especialidade_por_plano,
        tipo_sala,
        tabela,
    })
}

fn faixa_idx(label: &str) -> usize {
    FAIXAS_LABELS.iter().position(|l| *l == label).unwrap_or(FAIXAS_LABELS.len() - 1)
}
