use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;

use crate::history::SortOrder;
use crate::lookup::{CompanySource, Lookup, LookupError};
use crate::ui;
use crate::utils;

pub struct AppState<S> {
    pub lookup: Lookup<S>,
}

#[derive(Deserialize)]
pub struct HistoricoQuery {
    #[serde(default)]
    pub ordem: SortOrder,
}

fn error_response(err: &LookupError, cnpj_recebido: &str) -> HttpResponse {
    let body = serde_json::json!({
        "erro": err.to_string(),
        "cnpj_recebido": cnpj_recebido,
    });
    let mut response = match err {
        e if e.is_invalid_format() => HttpResponse::BadRequest(),
        LookupError::NotFound => HttpResponse::NotFound(),
        LookupError::Transport(_) => HttpResponse::BadGateway(),
        _ => HttpResponse::InternalServerError(),
    };
    response.json(body)
}

pub async fn consultar_cnpj<S: CompanySource + 'static>(
    cnpj: web::Path<String>,
    state: web::Data<AppState<S>>,
) -> ActixResult<HttpResponse> {
    let cnpj = cnpj.into_inner();
    match state.lookup.lookup(&cnpj).await {
        Ok(record) => Ok(HttpResponse::Ok().json(record.raw)),
        Err(e) => {
            log::info!("Consulta de {} falhou: {}", cnpj, e);
            Ok(error_response(&e, &utils::digits_only(&cnpj)))
        }
    }
}

pub async fn historico<S: CompanySource + 'static>(
    query: web::Query<HistoricoQuery>,
    state: web::Data<AppState<S>>,
) -> ActixResult<HttpResponse> {
    let entries = state.lookup.history().list(query.ordem);
    Ok(HttpResponse::Ok().json(entries))
}

async fn health_check() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "mensagem": "API CNPJ está funcionando"
    })))
}

pub fn routes<S: CompanySource + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/cnpj/{cnpj}", web::get().to(consultar_cnpj::<S>))
        .route("/historico", web::get().to(historico::<S>))
        .route("/health", web::get().to(health_check));
}

pub async fn start_server<S: CompanySource + 'static>(
    lookup: Lookup<S>,
    host: &str,
    port: u16,
) -> anyhow::Result<()> {
    let app_state = web::Data::new(AppState { lookup });
    let address = format!("{}:{}", host, port);

    ui::print_header("🌐 Servidor API de consulta");
    ui::print_success(&format!("Servidor iniciando em http://{}", address));
    ui::print_info("Endpoints disponíveis:");
    ui::print_bullet("GET /cnpj/{cnpj}       - Consulta um CNPJ na CNPJá");
    ui::print_bullet("GET /historico?ordem=  - Histórico (nome, recente, antiga, insercao)");
    ui::print_bullet("GET /health            - Verifica status do servidor");
    ui::print_verbose(&format!("Exemplo: curl http://{}/cnpj/00000000000191", address));
    ui::print_separator();

    actix_web::HttpServer::new(move || {
        actix_web::App::new()
            .app_data(app_state.clone())
            .configure(routes::<S>)
    })
    .bind(&address)?
    // Um único worker: o arquivo de histórico é gravado sem trava.
    .workers(1)
    .run()
    .await?;

    Ok(())
}
