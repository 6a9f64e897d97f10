use axum::{extract::Path, Json};
use serde_json::json;

use contracts::domain::a005_nota_venta::aggregate::PedidoDto;

use crate::domain::a006_pedido;
use crate::shared::error::ServiceError;

/// POST /api/pedido: alta o edición, valida existencias del producto
pub async fn upsert(Json(dto): Json<PedidoDto>) -> Result<Json<serde_json::Value>, ServiceError> {
    let id = if dto.id.is_some() {
        a006_pedido::service::update(dto).await?;
        uuid::Uuid::nil().to_string()
    } else {
        a006_pedido::service::create(dto).await?
    };
    Ok(Json(json!({"id": id})))
}

/// DELETE /api/pedido/:id
pub async fn delete(Path(id): Path<String>) -> Result<Json<serde_json::Value>, ServiceError> {
    let deleted = a006_pedido::service::delete(&id).await?;
    if !deleted {
        return Err(ServiceError::not_found("Pedido no encontrado"));
    }
    Ok(Json(json!({"success": true})))
}
