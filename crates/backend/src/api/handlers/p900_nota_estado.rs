use axum::Json;
use serde_json::json;

use crate::projections::p900_nota_estado::projection_builder;

/// POST /api/p900/rebuild: reconstruye la proyección de estados completa
pub async fn rebuild() -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    match projection_builder::rebuild_all().await {
        Ok(total) => Ok(Json(json!({"rebuilt": total}))),
        Err(e) => {
            tracing::error!("Failed to rebuild p900_nota_estado: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
