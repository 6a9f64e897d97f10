//! Errores tipados de la capa de servicios.
//!
//! Las validaciones de invariantes (tope de pago, remanente de entrega,
//! existencias) viven en los servicios y regresan `BusinessRule`; los
//! handlers sólo traducen a código HTTP.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BusinessRule(String),

    #[error("error de base de datos: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        ServiceError::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ServiceError::Validation(msg.into())
    }

    pub fn business_rule(msg: impl Into<String>) -> Self {
        ServiceError::BusinessRule(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::BusinessRule(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Database(_) | ServiceError::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // los detalles internos se quedan en el log, no en la respuesta
        let message = match &self {
            ServiceError::Database(e) => {
                error!(error = %e, "database error");
                "Error de base de datos".to_string()
            }
            ServiceError::Other(e) => {
                error!(error = %e, "internal error");
                "Error interno del servidor".to_string()
            }
            otro => otro.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServiceError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::business_rule("x").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
