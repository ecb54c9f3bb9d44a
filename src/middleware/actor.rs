// src/middleware/actor.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::common::error::AppError;

// Os nomes dos cabeçalhos HTTP que identificam quem opera
const USER_ID_HEADER: &str = "x-user-id";
const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

// O extrator de contexto do operador.
// A autenticação em si fica fora deste serviço; aqui só precisamos
// saber QUEM assina a mutação (created_by/updated_by e trilha de auditoria).
#[derive(Debug, Clone)]
pub struct ActorContext {
    pub user_id: Uuid,
    pub ip_address: Option<String>,
}

impl<S> FromRequestParts<S> for ActorContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Tenta ler o cabeçalho X-User-Id
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok())
            .ok_or(AppError::MissingActor)?;

        // O IP de origem é opcional e só alimenta a trilha de auditoria
        let ip_address = parts
            .headers
            .get(FORWARDED_FOR_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(|value| value.trim().to_string());

        Ok(ActorContext {
            user_id,
            ip_address,
        })
    }
}
