use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro central, com `thiserror` para melhor ergonomia.
// Cada variante mapeia para um status HTTP e um `code` estável que o
// frontend consegue tratar programaticamente.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Etiqueta já existe")]
    TagAlreadyExists,

    #[error("SKU já existe")]
    SkuAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado")]
    Forbidden,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Ativo não encontrado")]
    AssetNotFound,

    #[error("Evento não encontrado")]
    EventNotFound,

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Saldo de consumível não encontrado")]
    StockNotFound,

    #[error("Chamado não encontrado")]
    TicketNotFound,

    #[error("Chamado já encerrado")]
    TicketAlreadyClosed,

    #[error("Responsável inválido")]
    InvalidOwner,

    #[error("Estoque insuficiente")]
    InsufficientStock,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            // Validação devolve também os detalhes por campo.
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
                    "message": "Um ou mais campos são inválidos.",
                    "code": "VALIDATION",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "CONFLICT", "Este e-mail já está em uso.")
            }
            AppError::TagAlreadyExists => {
                (StatusCode::CONFLICT, "CONFLICT", "Esta etiqueta já está em uso.")
            }
            AppError::SkuAlreadyExists => {
                (StatusCode::CONFLICT, "CONFLICT", "Este SKU já está em uso.")
            }
            AppError::TicketAlreadyClosed => {
                (StatusCode::CONFLICT, "CONFLICT", "Este chamado já foi encerrado.")
            }

            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                "E-mail ou senha inválidos.",
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                "Token de autenticação inválido ou ausente.",
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Você não tem permissão para realizar esta ação.",
            ),

            AppError::UserNotFound => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", "Usuário não encontrado.")
            }
            AppError::AssetNotFound => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", "Ativo não encontrado.")
            }
            AppError::EventNotFound => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", "Evento não encontrado.")
            }
            AppError::ProductNotFound => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", "Produto não encontrado.")
            }
            AppError::StockNotFound => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Saldo de consumível não encontrado.",
            ),
            AppError::TicketNotFound => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", "Chamado não encontrado.")
            }

            AppError::InvalidOwner => (
                StatusCode::BAD_REQUEST,
                "INVALID_OWNER",
                "O responsável informado não existe.",
            ),
            AppError::InsufficientStock => (
                StatusCode::BAD_REQUEST,
                "VALIDATION",
                "Estoque insuficiente para a saída.",
            ),

            // Todos os outros erros (DatabaseError, InternalServerError...)
            // viram 500. O `tracing` loga a mensagem detalhada na borda.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "Ocorreu um erro inesperado.",
                )
            }
        };

        let body = Json(json!({ "message": message, "code": code }));
        (status, body).into_response()
    }
}
