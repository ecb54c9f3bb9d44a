use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Cada operação devolve o erro de forma síncrona ao chamador;
// nada é re-tentado internamente e nenhuma falha derruba o processo.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Validações que não passam pelo `validator` (campo ausente,
    // referência a um pai inexistente ou inativo, vigência invertida)
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    // Violação de código único no escopo, ou atribuição com vigência sobreposta
    #[error("{0}")]
    Conflict(String),

    // A cadeia de fallback da resolução se esgotou. O chamador deve tratar
    // como "calendário indeterminado", não como "fechado".
    #[error("Nenhum calendário de trabalho resolvido para o alvo informado.")]
    NoCalendarResolved,

    #[error("O cabeçalho X-User-Id é obrigatório e deve ser um UUID.")]
    MissingActor,

    // A mutação principal foi persistida; apenas o registro de auditoria falhou.
    // Não existe transação compensatória.
    #[error("Falha ao gravar o registro de auditoria: {0}")]
    AuditLogFailed(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::MissingActor => (StatusCode::BAD_REQUEST, AppError::MissingActor.to_string()),

            // Distinto de um 404 comum: o corpo carrega um código próprio
            // para o chamador diferenciar "indeterminado" de "não existe".
            AppError::NoCalendarResolved => {
                let body = Json(json!({
                    "error": AppError::NoCalendarResolved.to_string(),
                    "code": "NO_CALENDAR_RESOLVED",
                }));
                return (StatusCode::NOT_FOUND, body).into_response();
            }

            // A entidade foi gravada; o corpo deixa isso explícito.
            AppError::AuditLogFailed(detail) => {
                tracing::error!("Falha de auditoria (mutação principal persistida): {}", detail);
                let body = Json(json!({
                    "error": "A operação foi aplicada, mas o registro de auditoria falhou.",
                    "code": "AUDIT_LOG_FAILED",
                }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que o `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
