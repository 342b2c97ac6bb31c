//! Gráficos de barras de la taxa de ocupação, generados como SVG en memoria.

use plotters::prelude::*;
use std::fmt::Display;

use crate::dashboard::ocupacao::TaxaGrupo;
use crate::error::{DashboardError, Result};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 420;
const BARRA: RGBColor = RGBColor(31, 119, 180);

/// Dimensión por la que se agrupa un gráfico.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eixo {
    Sala,
    Dia,
    Turno,
}

impl Eixo {
    pub fn from_slug(s: &str) -> Option<Eixo> {
        match s.trim().to_lowercase().as_str() {
            "sala" | "salas" => Some(Eixo::Sala),
            "dia" | "dias" => Some(Eixo::Dia),
            "turno" | "turnos" => Some(Eixo::Turno),
            _ => None,
        }
    }

    pub fn titulo(&self) -> &'static str {
        match self {
            Eixo::Sala => "Taxa de ocupação por Sala",
            Eixo::Dia => "Taxa de ocupação por Dia",
            Eixo::Turno => "Taxa de ocupação por Turno",
        }
    }
}

fn render_err<E: Display>(e: E) -> DashboardError {
    DashboardError::Render(e.to_string())
}

/// Dibuja un gráfico de barras (eje Y de 0 a 100 %) y devuelve el SVG.
pub fn bar_chart_svg(titulo: &str, grupos: &[TaxaGrupo]) -> Result<String> {
    let labels: Vec<String> = grupos.iter().map(|g| g.grupo.clone()).collect();
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(titulo, ("sans-serif", 20).into_font())
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d((0..labels.len().max(1)).into_segmented(), 0f64..100f64)
            .map_err(render_err)?;

        let formatter = |v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len().max(1))
            .x_label_formatter(&formatter)
            .y_desc("Taxa (%)")
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BARRA.filled())
                    .margin(8)
                    .data(grupos.iter().enumerate().map(|(i, g)| (i, g.taxa))),
            )
            .map_err(render_err)?;

        // etiqueta con el valor sobre cada barra
        chart
            .draw_series(grupos.iter().enumerate().map(|(i, g)| {
                Text::new(
                    format!("{:.1}%", g.taxa),
                    (SegmentValue::CenterOf(i), (g.taxa + 3.0).min(97.0)),
                    ("sans-serif", 12).into_font(),
                )
            }))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }
    Ok(svg)
}
