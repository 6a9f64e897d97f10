use axum::{extract::Path, Json};
use serde_json::json;

use contracts::domain::a005_nota_venta::aggregate::EntregaDto;

use crate::domain::a007_entrega;
use crate::shared::error::ServiceError;

/// POST /api/entrega: alta o edición, valida el remanente del pedido
pub async fn upsert(Json(dto): Json<EntregaDto>) -> Result<Json<serde_json::Value>, ServiceError> {
    let id = if dto.id.is_some() {
        a007_entrega::service::update(dto).await?;
        uuid::Uuid::nil().to_string()
    } else {
        a007_entrega::service::create(dto).await?
    };
    Ok(Json(json!({"id": id})))
}

/// DELETE /api/entrega/:id
pub async fn delete(Path(id): Path<String>) -> Result<Json<serde_json::Value>, ServiceError> {
    let deleted = a007_entrega::service::delete(&id).await?;
    if !deleted {
        return Err(ServiceError::not_found("Entrega no encontrada"));
    }
    Ok(Json(json!({"success": true})))
}
