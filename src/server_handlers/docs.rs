use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::server::AppState;

pub async fn help_handler(state: web::Data<AppState>) -> impl Responder {
    let help = json!({
        "description": "Dashboard de ocupação dos consultórios. Todos os endpoints GET aceitam filtros na query como listas separadas por vírgula: salas, dias, turnos, medicos.",
        "endpoints": {
            "GET /dashboard": "KPIs, taxas por sala/dia/turno, top médicos e indicadores PLANOS × Aluguel",
            "POST /dashboard": "mesmo resultado, com os filtros no corpo JSON",
            "GET /agenda": "tabela detalhada (Sala, Dia, Turno, Médico, Ocupado)",
            "GET /agenda.csv": "tabela detalhada em CSV (agenda_filtrada.csv)",
            "GET /medicos": "cadastro de médicos com turnos utilizados",
            "GET /charts/{sala|dia|turno}.svg": "gráfico de barras da taxa de ocupação",
            "GET /opcoes": "valores disponíveis para cada filtro"
        },
        "get_example_query": "/dashboard?salas=CONSULTÓRIO 1,CONSULTÓRIO 2&dias=Segunda,Terça&turnos=Manhã",
        "post_example": {"salas": ["CONSULTÓRIO 1"], "dias": ["Segunda"], "turnos": ["Manhã", "Tarde"], "medicos": []},
        "carregado_em": state.tablas.carregado_em,
        "linhas_agenda": state.tablas.agenda.len(),
        "medicos_cadastrados": state.tablas.medicos.len()
    });

    HttpResponse::Ok().json(help)
}
